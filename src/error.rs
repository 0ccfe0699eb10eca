//! Fatal conditions that halt an import run.

use thiserror::Error;

use crate::api::{Oid, Table};
use crate::models::IdentityKey;

/// Every problem the importer detects ends the run with one of these.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint} reported an error: {message}")]
    Backend { endpoint: String, message: String },

    #[error("{endpoint} returned an unreadable response: {body}")]
    Malformed { endpoint: String, body: String },

    #[error("table {table} still holds {count} records after drop")]
    TableNotEmpty { table: Table, count: usize },

    #[error("duplicate person: {0}")]
    DuplicatePerson(IdentityKey),

    #[error("person {0} listed more than once at address {1}")]
    DuplicateHouseholdMember(Oid, Oid),

    #[error("{count} addresses match {line_one:?}; address data is duplicated")]
    AmbiguousAddress { line_one: String, count: usize },

    #[error("no imported person matches {0}")]
    UnknownPerson(IdentityKey),
}

pub type Result<T> = std::result::Result<T, ImportError>;
