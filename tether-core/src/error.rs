use crate::truncate_long;
use std::fmt::Display;
use thiserror::Error;

/// Every failure a persistence operation can surface.
///
/// Callers are expected to match on the variant: `InvalidPrimaryKey` means "no such row" while
/// `DatabaseAction` means the statement itself was rejected by the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Table, column, type or primary key metadata is missing on an entity.
    #[error("Metadata not found: {0}")]
    MetadataNotFound(String),
    /// The table chosen by name does not exist.
    #[error("Table `{0}` does not exist")]
    TableNotFound(String),
    /// A statement failed for a reason other than a missing primary key.
    #[error("Database action failed: {0}")]
    DatabaseAction(String),
    /// No row matches the primary key targeted by an update, remove or select.
    #[error("No row matches the primary key {0}")]
    InvalidPrimaryKey(String),
    /// The object factory could not build a blank instance of the type.
    #[error("Cannot instantiate a blank `{0}`")]
    Instantiation(&'static str),
    /// A property name is not mapped to any column.
    #[error("Property `{0}` is not mapped to any column")]
    PropertyNotFound(String),
    /// A value could not be converted to the requested type.
    #[error("Conversion error: {0}")]
    Conversion(String),
}

impl Error {
    /// `DatabaseAction` carrying the (truncated) query that failed.
    pub fn database_action(message: impl Display, query: &str) -> Self {
        Error::DatabaseAction(format!(
            "{}, while executing the query:\n{}",
            message,
            truncate_long!(query)
        ))
    }

    /// `InvalidPrimaryKey` carrying the (truncated) query that found no row.
    pub fn invalid_primary_key(key: impl Display, query: &str) -> Self {
        Error::InvalidPrimaryKey(format!("{} (query: {})", key, truncate_long!(query)))
    }

    pub fn is_invalid_primary_key(&self) -> bool {
        matches!(self, Error::InvalidPrimaryKey(..))
    }

    pub fn is_database_action(&self) -> bool {
        matches!(self, Error::DatabaseAction(..))
    }
}
