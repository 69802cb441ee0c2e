use thiserror::Error;

use crate::auth::AuthError;

/// HTTP-level and decoding failures talking to the values API
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Sheets API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Sheets request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Sheets response could not be parsed: {0}")]
    Decode(String),

    #[error("Invalid Sheets API URL: {0}")]
    InvalidUrl(String),

    #[error("Malformed row {row} in {range}: {reason}")]
    MalformedRow {
        range: String,
        row: usize,
        reason: String,
    },
}

/// Errors surfaced by the data-access layer, tagged by kind so callers can
/// branch without inspecting messages.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("UTM URL already exists: {utm_url}")]
    Duplicate { utm_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    Sheet,
    Duplicate,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Auth(_) => ErrorKind::Auth,
            Error::Sheet(_) => ErrorKind::Sheet,
            Error::Duplicate { .. } => ErrorKind::Duplicate,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind() == ErrorKind::Duplicate
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
