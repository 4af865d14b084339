use crate::error::ForecastError;
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const OUTPUT_DIR_NAME: &str = "sunshine_forecast";

/// `<local data dir>/sunshine_forecast`, e.g. `~/.local/share/sunshine_forecast` on Linux.
pub fn default_output_dir() -> Result<PathBuf, ForecastError> {
    dirs::data_local_dir()
        .ok_or(ForecastError::OutputDirResolution)
        .map(|p| p.join(OUTPUT_DIR_NAME))
}

pub fn ensure_dir_exists(path: &Path) -> Result<(), ForecastError> {
    match fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(ForecastError::OutputDirNotADirectory(path.to_path_buf()));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating output directory: {}", path.display());
            fs::create_dir_all(path)
                .map_err(|e| ForecastError::OutputDirCreation(path.to_path_buf(), e))
        }
        Err(e) => Err(ForecastError::OutputDirCreation(path.to_path_buf(), e)),
    }
}
