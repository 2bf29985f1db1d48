use std::io;

use crate::network;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Http: {0}")]
    Http(#[from] network::http::Error),

    #[error("Io: {0}")]
    Io(#[from] io::Error),

    #[error("Json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Range: {0}")]
    Range(#[from] crate::range::RangeError),

    #[error("Config: {0}")]
    Config(#[from] crate::config::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(network::http::Error::from(err))
    }
}
