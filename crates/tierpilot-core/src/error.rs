//! Shared error type across tierpilot crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// Catalog could not be read or parsed.
    CatalogUnavailable,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::CatalogUnavailable => "CATALOG_UNAVAILABLE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TierPilotError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum TierPilotError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("catalog: {0}")]
    Catalog(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl TierPilotError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            TierPilotError::BadRequest(_) => ClientCode::BadRequest,
            TierPilotError::Catalog(_) => ClientCode::CatalogUnavailable,
            TierPilotError::Internal(_) => ClientCode::Internal,
        }
    }
}
