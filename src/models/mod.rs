//! Forecasting models.

pub mod artifact;
pub mod baseline;
pub mod error;
pub mod factory;
pub mod metrics;
pub mod parameters;
pub mod traits;
