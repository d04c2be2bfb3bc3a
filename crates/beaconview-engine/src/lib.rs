pub mod engine;
pub mod queries;
pub mod sql;
pub mod store;

pub use engine::AnalyticsEngine;
pub use store::{AggregateStore, HttpStoreClient};
