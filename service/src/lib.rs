//! # Fieldbook Service
//!
//! Metadata enrichment and export pipeline for schema object consoles.
//!
//! The pipeline takes the field table a host console has rendered, annotates
//! picklist fields with asynchronously fetched metadata, filters rows against
//! a live search query, and exports field metadata for one or many objects
//! into spreadsheet workbooks with uniquely named sheets.
//!
//! ## Overview
//!
//! - [`enrichment::EnrichmentEngine`]: per-row annotation state machine;
//!   requests picklist metadata exactly once per row identity.
//! - [`enrichment::ReprocessingTrigger`]: re-runs enrichment when the host
//!   table mutates, relying on the engine's idempotence.
//! - [`search::is_visible`]: live substring filter over label, annotation,
//!   API name and type text.
//! - [`export::ExportEngine`]: assembles one sheet per object, degrading
//!   per-object on metadata failures, and hands the workbook to a writer.
//! - [`export::XlsxWriter`]: default `rust_xlsxwriter`-backed writer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fieldbook_core::prelude::*;
//! use fieldbook_service::enrichment::EnrichmentEngine;
//! use fieldbook_service::export::{ExportEngine, XlsxWriter};
//!
//! # async fn run(provider: Arc<dyn MetadataProvider>) -> Result<()> {
//! let config = FieldbookConfig::default();
//! config.validate()?;
//!
//! let enrichment = Arc::new(EnrichmentEngine::new(
//!     provider.clone(),
//!     config.enrichment.clone(),
//!     "https://example.my.console",
//! ));
//! enrichment.set_query("status");
//!
//! let writer = Arc::new(XlsxWriter::new("/tmp"));
//! let export = ExportEngine::new(provider, writer, config.export.clone());
//!
//! let targets = vec![ObjectRef::new("Account", "Account")];
//! let summary = export.export_selected(&targets, "https://example.my.console").await?;
//! println!("wrote {} sheets to {}", summary.sheet_count, summary.filename);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Per-row picklist enrichment and incremental reprocessing
pub mod enrichment;

/// Workbook assembly, sheet naming and the default xlsx writer
pub mod export;

/// Field-type normalization for export cells
pub mod normalize;

/// Live row filtering
pub mod search;

pub use enrichment::{EnrichmentEngine, ReprocessingTrigger};
pub use export::{ExportEngine, ExportSummary, XlsxWriter};
pub use normalize::normalize_field_type;
pub use search::is_visible;
