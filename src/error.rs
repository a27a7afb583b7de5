use thiserror::Error;

/// Errors surfaced by the genre playlist pipeline.
///
/// `Http` and `Catalog` are remote call failures. They are never retried and
/// abort the run. Duplicate ledger inserts are not errors at all, see
/// [`crate::ledger::SqliteLedger`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("remote catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote catalog call failed: {0}")]
    Catalog(String),

    #[error("ledger error: {0}")]
    Ledger(#[from] rusqlite::Error),

    #[error("ledger connection lock was poisoned")]
    LedgerLock,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed saved track: {0}")]
    MalformedItem(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),
}

pub type Result<T> = std::result::Result<T, Error>;
