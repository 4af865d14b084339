pub mod clean;
pub mod cutoff;
pub mod error;
pub mod outliers;
pub mod scaler;
pub mod split;
