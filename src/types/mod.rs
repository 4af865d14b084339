pub mod error;
pub mod frequency_frames;
pub mod model_family;
pub mod season;
pub mod time_series;
