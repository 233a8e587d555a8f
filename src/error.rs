//! Error types for pokedex-gateway

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{resource} request failed with status {status}")]
    UpstreamStatus { resource: &'static str, status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Upstream connection pool is closed")]
    PoolClosed,
}

impl Error {
    pub fn status(resource: &'static str, status: u16) -> Self {
        Error::UpstreamStatus { resource, status }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Error::Decode(msg.into())
    }

    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Error::InvalidUrl(msg.into())
    }
}
