/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*             Error types             */
/***************************************/
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid command: {0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, Error>;
