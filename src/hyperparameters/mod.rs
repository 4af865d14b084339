pub mod error;
pub mod io;
pub mod record;
pub mod reformat;
