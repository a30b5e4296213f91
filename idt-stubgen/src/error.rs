/// Crate-level error for the command-line surface. Generation itself never
/// fails; everything here comes from arguments, config files or output I/O.
use crate::config::ConfigError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid number for {flag}: '{value}'")]
    InvalidNumber { flag: String, value: String },
    #[error("unknown argument: {0}")]
    UnknownFlag(String),
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write to stdout: {0}")]
    Stdout(#[source] std::io::Error),
}
