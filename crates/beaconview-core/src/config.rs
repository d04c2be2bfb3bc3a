/// Deployment configuration, loaded once at startup from environment
/// variables. The engine and core take these as plain values — nothing
/// below this boundary reads the environment or bakes in a deployment
/// URL or secret.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// SQL-over-HTTP endpoint of the external column store.
    pub store_url: String,
    /// Bearer token for the store endpoint.
    pub store_token: String,
    /// Dataset (table) the tracking beacons are written to.
    pub store_dataset: String,
    /// Static key the dashboard presents on every API call.
    pub api_key: String,
    /// Allowed CORS origins; empty means allow any origin.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("BEACONVIEW_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            store_url: std::env::var("BEACONVIEW_STORE_URL")
                .map_err(|_| "BEACONVIEW_STORE_URL is required".to_string())?,
            store_token: std::env::var("BEACONVIEW_STORE_TOKEN")
                .map_err(|_| "BEACONVIEW_STORE_TOKEN is required".to_string())?,
            store_dataset: std::env::var("BEACONVIEW_STORE_DATASET")
                .unwrap_or_else(|_| "site_events".to_string()),
            api_key: std::env::var("BEACONVIEW_API_KEY")
                .map_err(|_| "BEACONVIEW_API_KEY is required".to_string())?,
            cors_origins: std::env::var("BEACONVIEW_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
