//! Allow-listed equality filters compiled from raw query parameters.

use crate::schema::LogicalField;

/// Dimension filters applied uniformly to every analytics query.
///
/// Only the seven allow-listed dimensions are representable; anything
/// else in the query string is ignored at construction so unrecognized
/// (or future) keys never become predicates. `None` means "no filter on
/// this dimension". Filters always compose as a conjunction of exact
/// equalities — no OR, no negation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    pub path: Option<String>,
    pub referrer: Option<String>,
    pub device_model: Option<String>,
    pub device_type: Option<String>,
    pub country: Option<String>,
    pub browser_name: Option<String>,
    pub browser_version: Option<String>,
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl FilterSet {
    /// Build from raw `(key, value)` query parameters.
    ///
    /// Unknown keys are skipped (not an error, for forward-compatible
    /// query strings); empty values are treated the same as absent.
    pub fn from_params<'a, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filters = FilterSet::default();
        for (key, value) in params {
            match key {
                "path" => filters.path = non_empty(value),
                "referrer" => filters.referrer = non_empty(value),
                "deviceModel" => filters.device_model = non_empty(value),
                "deviceType" => filters.device_type = non_empty(value),
                "country" => filters.country = non_empty(value),
                "browserName" => filters.browser_name = non_empty(value),
                "browserVersion" => filters.browser_version = non_empty(value),
                _ => {}
            }
        }
        filters
    }

    /// Active predicates as `(field, value)` pairs for the SQL layer.
    pub fn entries(&self) -> Vec<(LogicalField, &str)> {
        [
            (LogicalField::Path, self.path.as_deref()),
            (LogicalField::Referrer, self.referrer.as_deref()),
            (LogicalField::DeviceModel, self.device_model.as_deref()),
            (LogicalField::DeviceType, self.device_type.as_deref()),
            (LogicalField::Country, self.country.as_deref()),
            (LogicalField::BrowserName, self.browser_name.as_deref()),
            (LogicalField::BrowserVersion, self.browser_version.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|value| (field, value)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}
