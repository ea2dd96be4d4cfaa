//! # Fieldbook Core
//!
//! Core types and traits for the fieldbook metadata enrichment and export
//! pipeline.
//!
//! This crate provides the fundamental building blocks shared by the pipeline
//! service: the field-row data model, the collaborator trait boundaries
//! (metadata provider, row source, workbook writer), error handling, and
//! configuration structures.
//!
//! ## Design Principles
//!
//! - **Pull-based row access**: the pipeline never touches a rendering
//!   toolkit; rendered rows arrive through the [`traits::RowSource`] boundary.
//! - **One channel for privileged lookups**: every authenticated metadata
//!   request goes through [`traits::MetadataProvider`], whatever transport a
//!   concrete implementation uses.
//! - **Type Safety**: invariants such as sheet-name uniqueness are owned by
//!   the assembling code, not by downstream writers.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Core error types for pipeline operations
pub mod error;

/// Core trait definitions for pipeline collaborators
pub mod traits;

/// Type definitions for field rows, object descriptors and workbooks
pub mod types;

/// Configuration types for the pipeline
pub mod config;

// Re-export commonly used types
pub use config::{EnrichmentConfig, ExportConfig, FieldbookConfig};
pub use error::{FieldbookError, Result};
pub use traits::{MetadataProvider, MutationStream, RowSource, WorkbookWriter};
pub use types::{
    EnrichmentStatus, FieldDescription, FieldRow, ObjectDescriptor, ObjectRef, RenderedRow,
    RowKey, Sheet, TableMutation, TableSnapshot, Workbook,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{FieldbookError, Result};
    pub use crate::traits::*;
    pub use crate::types::*;
}
