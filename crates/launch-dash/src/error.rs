//! Dashboard errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised while loading data, wiring the layout or serving requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashError {
    /// Dataset file could not be opened or read.
    #[error("dataset error '{0}'")]
    Dataset(SmolStr),

    /// A required CSV column is missing from the header row.
    #[error("missing column '{0}'")]
    MissingColumn(SmolStr),

    /// A data row failed to parse or violates the launch schema.
    #[error("invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: SmolStr },

    /// The dataset has no rows, so payload bounds cannot be derived.
    #[error("dataset contains no launch records")]
    EmptyDataset,

    /// Unknown launch site name.
    #[error("unknown launch site '{0}'")]
    UnknownSite(SmolStr),

    /// A control value is missing, malformed or out of range.
    #[error("invalid value for '{id}': {message}")]
    InvalidControl { id: SmolStr, message: SmolStr },

    /// Configuration error.
    #[error("invalid config '{0}'")]
    InvalidConfig(SmolStr),

    /// Callback wiring does not match the layout.
    #[error("invalid layout '{0}'")]
    InvalidLayout(SmolStr),

    /// Web server error.
    #[error("web error '{0}'")]
    Web(SmolStr),
}

impl DashError {
    pub(crate) fn invalid_control(id: &str, message: impl Into<SmolStr>) -> Self {
        Self::InvalidControl {
            id: SmolStr::new(id),
            message: message.into(),
        }
    }
}
