pub mod analytics;
pub mod config;
pub mod error;
pub mod filters;
pub mod metrics;
pub mod results;
pub mod schema;
pub mod time_range;
