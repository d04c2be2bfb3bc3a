use thiserror::Error;

/// Failure modes of the aggregation engine.
///
/// Validation variants (`InvalidInterval`, `InvalidTimezone`,
/// `MissingParameter`, `UnknownEndpoint`) are raised before any store
/// round-trip. `QueryExecution` wraps a store failure unmodified with
/// the endpoint that issued it; the engine never retries.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unrecognized interval: {0}")]
    InvalidInterval(String),

    /// Recovered at the API boundary by falling back to UTC (logged).
    #[error("unrecognized timezone: {0}")]
    InvalidTimezone(String),

    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    #[error("query failed for endpoint {endpoint}: {source}")]
    QueryExecution {
        endpoint: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl EngineError {
    /// True for errors the HTTP layer should map to a client error.
    pub fn is_validation(&self) -> bool {
        !matches!(self, EngineError::QueryExecution { .. })
    }
}
