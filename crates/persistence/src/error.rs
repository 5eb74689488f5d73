// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_grid::GatewayError;
use shift_grid_domain::DomainError;

/// Errors raised by the persistence backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// Opening the backing database failed.
    ConnectionFailed(String),
    /// Applying the embedded migrations failed.
    MigrationFailed(String),
    /// A query or statement failed.
    QueryFailed(String),
    /// A stored document could not be serialized or deserialized.
    SerializationFailed(String),
    /// Reading or writing the store directory failed.
    Io(String),
    /// A stored row holds data the domain rejects.
    InvalidRecord(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionFailed(msg) => write!(f, "Database connection failed: {msg}"),
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationFailed(msg) => write!(f, "Serialization error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::InvalidRecord(msg) => write!(f, "Invalid stored record: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::ConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationFailed(err.to_string())
    }
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::InvalidRecord(err.to_string())
    }
}

impl From<PersistenceError> for GatewayError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConnectionFailed(msg) => Self::Unavailable(msg),
            other => Self::Io(other.to_string()),
        }
    }
}
