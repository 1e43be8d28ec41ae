use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure to bring a dataset or alias file into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Reading {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Decoding JSON in {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Decoding YAML in {path:?}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
