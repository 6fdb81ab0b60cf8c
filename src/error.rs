use reqwest::StatusCode;
use thiserror::Error;

use crate::record::Record;

/// Failures surfaced by the provider. Nothing is retried; every failure is
/// returned to the caller immediately with the context it was raised in.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API token is required")]
    MissingToken,

    #[error("invalid API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse XML response: {source}; body: {body}")]
    Xml {
        #[source]
        source: quick_xml::DeError,
        body: String,
    },

    #[error("API error for zone {zone:?}: code {code} - {detail}")]
    Api {
        zone: String,
        code: i32,
        detail: String,
    },

    #[error("record not found: {name} {rtype}")]
    RecordNotFound { name: String, rtype: String },
}

/// Failure of a per-record loop, carrying the prefix of records that were
/// applied before the failing call. A non-empty `applied` means the zone
/// was partially modified; callers must never read an error as "nothing
/// happened".
#[derive(Error, Debug)]
#[error("{error}")]
pub struct PartialError {
    pub applied: Vec<Record>,
    #[source]
    pub error: Error,
}

impl PartialError {
    pub(crate) fn new(applied: Vec<Record>, error: Error) -> Self {
        Self { applied, error }
    }
}

impl From<Error> for PartialError {
    fn from(error: Error) -> Self {
        Self {
            applied: Vec::new(),
            error,
        }
    }
}
