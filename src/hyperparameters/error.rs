use crate::json_file::JsonFileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HyperparameterError {
    #[error(
        "Cannot parse hyperparameter key '{key}', \
         expected '<family>_fh<N>' or '<family>_<variant>_fh<N>'"
    )]
    Parse { key: String },

    #[error("Hyperparameter key '{key}' names an unknown model")]
    UnknownModel { key: String },

    #[error(
        "Hyperparameter key '{key}' has horizon {horizon}, \
         which is not an expected forecast horizon"
    )]
    UnexpectedHorizon { key: String, horizon: usize },

    #[error("Invalid hyperparameter key pattern")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    JsonFile(#[from] JsonFileError),
}
