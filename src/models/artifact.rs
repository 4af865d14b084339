//! Binary artifacts for the natively implemented models.

use crate::models::error::ModelError;
use bincode::config::{Configuration, Fixint, LittleEndian};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const ARTIFACT_EXTENSION: &str = "bin";

const BINCODE_CONFIG: Configuration<LittleEndian, Fixint> =
    bincode::config::standard().with_fixed_int_encoding();

pub fn write_artifact<T: Serialize>(path: &Path, model: &T) -> Result<(), ModelError> {
    let bytes = bincode::serde::encode_to_vec(model, BINCODE_CONFIG)
        .map_err(|e| ModelError::ArtifactEncode(Box::new(e)))?;
    fs::write(path, &bytes).map_err(|e| ModelError::ArtifactWrite(path.to_path_buf(), e))?;
    log::debug!("Wrote {} byte model artifact to {:?}", bytes.len(), path);
    Ok(())
}

pub fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = fs::read(path).map_err(|e| ModelError::ArtifactRead(path.to_path_buf(), e))?;
    let (model, _) = bincode::serde::decode_from_slice::<T, _>(&bytes, BINCODE_CONFIG)
        .map_err(|e| ModelError::ArtifactDecode(path.to_path_buf(), Box::new(e)))?;
    Ok(model)
}
