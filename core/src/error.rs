//! Error types for pipeline operations

use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum FieldbookError {
    /// Object identifier could not be mapped to an API name
    #[error("Failed to resolve object identifier '{identifier}': {reason}")]
    Resolution {
        /// Identifier that failed to resolve
        identifier: String,
        /// Reason for failure
        reason: String,
    },

    /// Picklist lookup failed for a field
    #[error("Failed to fetch picklist values for {object}.{field}: {reason}")]
    PicklistFetch {
        /// Object the field belongs to
        object: String,
        /// Field API name
        field: String,
        /// Reason for failure
        reason: String,
    },

    /// Bulk field-description fetch failed for an object
    #[error("Failed to fetch field descriptions for '{object}': {reason}")]
    DescribeFetch {
        /// Object API name
        object: String,
        /// Reason for failure
        reason: String,
    },

    /// The row source table never appeared
    #[error("Row source not found: {0}")]
    SourceNotFound(String),

    /// Workbook assembly or serialization failure
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, FieldbookError>;

impl FieldbookError {
    /// Create a new resolution error
    #[must_use]
    pub fn resolution(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create a new picklist fetch error
    #[must_use]
    pub fn picklist_fetch(
        object: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::PicklistFetch {
            object: object.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new describe fetch error
    #[must_use]
    pub fn describe_fetch(object: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DescribeFetch {
            object: object.into(),
            reason: reason.into(),
        }
    }

    /// Create a new source-not-found error
    #[must_use]
    pub fn source_not_found(message: impl Into<String>) -> Self {
        Self::SourceNotFound(message.into())
    }

    /// Create a new workbook error
    #[must_use]
    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook(message.into())
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error aborts the whole operation.
    ///
    /// Resolution, picklist and describe failures are absorbed at row or
    /// object granularity; everything else propagates to the caller.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::Resolution { .. } | Self::PicklistFetch { .. } | Self::DescribeFetch { .. }
        )
    }
}
