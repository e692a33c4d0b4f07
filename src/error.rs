//! Error type for the fallible surfaces of gitpaint.
//!
//! Classification and colorizing never fail: unrecognized input is simply
//! left alone. Errors only come from loading configuration, reading input and
//! serializing the grammar.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown color token: {0}")]
    UnknownToken(String),
    #[error("unknown shape: {0}")]
    UnknownShape(String),
}

pub type Result<T> = std::result::Result<T, Error>;
