//! Error types shared by the store, the request handlers and the tracker client

use thiserror::Error;

/// Failure talking to the external spreadsheet store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid service account credentials: {0}")]
    Credentials(String),

    #[error("token exchange failed: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("spreadsheet API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected spreadsheet response: {0}")]
    Decode(String),

    /// Used by test doubles to simulate an outage
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failure appending a behavior log entry
#[derive(Error, Debug)]
pub enum LogError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure calling the tracker server from the terminal view
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid server url: {0}")]
    Url(String),
}
