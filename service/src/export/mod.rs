//! Workbook assembly and export orchestration
//!
//! One engine serves the three export modes: the currently rendered object,
//! every listed object, or a user-selected subset. All modes share the same
//! assembly path: build a data table per object, normalize field types,
//! allocate a collision-free sheet name, append, and finally hand the
//! workbook to the writer. Per-object metadata failures degrade to a
//! placeholder sheet; only infrastructure errors abort an export.

pub mod sheet_name;
mod xlsx;

pub use xlsx::XlsxWriter;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info};

use fieldbook_core::config::ExportConfig;
use fieldbook_core::error::Result;
use fieldbook_core::traits::{MetadataProvider, RowSource, WorkbookWriter};
use fieldbook_core::types::{FieldRow, ObjectDescriptor, ObjectRef, Sheet, Workbook};

use crate::normalize::normalize_field_type;

/// Header row for bulk and selected exports.
const BULK_HEADER: [&str; 5] = [
    "Field Label",
    "API Name",
    "Field Type",
    "Field Length",
    "Picklist Values",
];

/// Header row for single-object exports. The rendered table exposes no
/// reliable length column, so this mode omits "Field Length"; the asymmetry
/// against bulk exports is deliberate and kept as-is.
const CURRENT_HEADER: [&str; 4] = ["Field Label", "API Name", "Field Type", "Picklist Values"];

/// Type-column marker written when an object's fields could not be fetched.
pub const FIELD_FETCH_ERROR: &str = "Error fetching fields";

/// Outcome of one export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Filename handed to the writer
    pub filename: String,
    /// Number of sheets in the workbook
    pub sheet_count: usize,
    /// Objects whose metadata could not be fetched
    pub failed_objects: usize,
}

/// Assembles workbooks of field metadata and hands them to a writer.
pub struct ExportEngine<P: ?Sized, W: ?Sized> {
    provider: Arc<P>,
    writer: Arc<W>,
    config: ExportConfig,
    /// Export gate: sheet-name allocation is stateful per run, so at most
    /// one export runs at a time; concurrent triggers queue here.
    gate: Mutex<()>,
}

impl<P: MetadataProvider + ?Sized, W: WorkbookWriter + ?Sized> ExportEngine<P, W> {
    /// Create an export engine.
    pub fn new(provider: Arc<P>, writer: Arc<W>, config: ExportConfig) -> Self {
        Self {
            provider,
            writer,
            config,
            gate: Mutex::new(()),
        }
    }

    /// Export the currently rendered object as a one-sheet workbook.
    ///
    /// `enriched` is the engine's current row set; rows are matched to the
    /// snapshot by field API name so resolved picklist annotations land in
    /// the picklist column.
    ///
    /// # Errors
    ///
    /// Propagates [`fieldbook_core::error::FieldbookError::SourceNotFound`]
    /// when the table snapshot fails, and writer errors.
    pub async fn export_current(
        &self,
        source: &dyn RowSource,
        enriched: &[FieldRow],
    ) -> Result<ExportSummary> {
        let _guard = self.gate.lock().await;
        let snapshot = source.snapshot()?;
        info!(object = %snapshot.object_api_name, rows = snapshot.rows.len(), "exporting current object");

        let by_field: HashMap<&str, &FieldRow> = enriched
            .iter()
            .map(|row| (row.api_name.as_str(), row))
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::with_capacity(snapshot.rows.len() + 1);
        rows.push(CURRENT_HEADER.iter().map(ToString::to_string).collect());
        for rendered in &snapshot.rows {
            let enriched_row = by_field.get(rendered.api_name.as_str());
            let length = enriched_row.and_then(|row| row.length);
            let picklist = enriched_row.map_or(String::new(), |row| row.picklist_text.clone());
            rows.push(vec![
                rendered.label.clone(),
                rendered.api_name.clone(),
                normalize_field_type(&rendered.type_text, length),
                picklist,
            ]);
        }

        let mut workbook = Workbook::new();
        workbook.push(Sheet::new(sheet_name::sanitize(&snapshot.object_api_name), rows));

        let filename = format!(
            "{}{}",
            snapshot.object_api_name, self.config.current_filename_suffix
        );
        self.finish(workbook, filename, 0).await
    }

    /// Export every listed object, one sheet each.
    ///
    /// # Errors
    ///
    /// Propagates writer errors; per-object metadata failures are absorbed
    /// into placeholder sheets.
    pub async fn export_all(&self, listed: &[ObjectRef], origin: &str) -> Result<ExportSummary> {
        let filename = self.config.full_export_filename.clone();
        self.export_objects(listed, origin, filename).await
    }

    /// Export a user-selected subset of objects, one sheet each.
    ///
    /// # Errors
    ///
    /// Propagates writer errors; per-object metadata failures are absorbed
    /// into placeholder sheets.
    pub async fn export_selected(
        &self,
        selection: &[ObjectRef],
        origin: &str,
    ) -> Result<ExportSummary> {
        let filename = self.config.selected_export_filename.clone();
        self.export_objects(selection, origin, filename).await
    }

    async fn export_objects(
        &self,
        objects: &[ObjectRef],
        origin: &str,
        filename: String,
    ) -> Result<ExportSummary> {
        let _guard = self.gate.lock().await;
        info!(objects = objects.len(), %filename, "exporting object metadata");

        let mut workbook = Workbook::new();
        let mut used_names: HashSet<String> = HashSet::new();
        let mut failed_objects = 0;

        // Sequential per object: sheet-name allocation is stateful, and the
        // provider channel is the bottleneck anyway.
        for object in objects {
            let rows = match self.describe_object(object, origin).await {
                Ok(descriptor) => descriptor_rows(&descriptor),
                Err(err) => {
                    error!(object = %object.api_name, %err, "object export degraded to placeholder");
                    failed_objects += 1;
                    placeholder_rows(object)
                }
            };

            let name = sheet_name::allocate(&sheet_name::sanitize(&object.label), &used_names);
            used_names.insert(name.clone());
            workbook.push(Sheet::new(name, rows));
        }

        self.finish(workbook, filename, failed_objects).await
    }

    async fn describe_object(&self, object: &ObjectRef, origin: &str) -> Result<ObjectDescriptor> {
        let api_name = if is_opaque_identifier(&object.api_name) {
            self.provider
                .resolve_object_api_name(&object.api_name, origin)
                .await?
        } else {
            object.api_name.clone()
        };

        let fields = self
            .provider
            .fetch_object_field_descriptions(&api_name, origin)
            .await?;

        Ok(ObjectDescriptor {
            label: object.label.clone(),
            api_name,
            fields,
        })
    }

    async fn finish(
        &self,
        workbook: Workbook,
        filename: String,
        failed_objects: usize,
    ) -> Result<ExportSummary> {
        let sheet_count = workbook.len();
        self.writer.write(&workbook, &filename).await?;
        info!(%filename, sheet_count, failed_objects, "export finished");
        Ok(ExportSummary {
            filename,
            sheet_count,
            failed_objects,
        })
    }
}

fn descriptor_rows(descriptor: &ObjectDescriptor) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(descriptor.fields.len() + 1);
    rows.push(BULK_HEADER.iter().map(ToString::to_string).collect());
    for field in &descriptor.fields {
        rows.push(vec![
            field.field_label.clone(),
            field.field_api_name.clone(),
            normalize_field_type(&field.field_type, field.field_length),
            field
                .field_length
                .map_or(String::new(), |length| length.to_string()),
            field.picklist_values.clone(),
        ]);
    }
    rows
}

fn placeholder_rows(object: &ObjectRef) -> Vec<Vec<String>> {
    vec![
        BULK_HEADER.iter().map(ToString::to_string).collect(),
        vec![
            object.label.clone(),
            object.api_name.clone(),
            FIELD_FETCH_ERROR.to_string(),
            String::new(),
            String::new(),
        ],
    ]
}

/// Whether a listed identifier is an opaque internal id rather than an API
/// name.
///
/// Internal ids are fixed-width (15 or 18 characters) base-62 strings with
/// at least one digit; API names of that width are CamelCase or carry
/// underscores.
#[must_use]
pub fn is_opaque_identifier(identifier: &str) -> bool {
    let len = identifier.chars().count();
    (len == 15 || len == 18)
        && identifier.chars().all(|c| c.is_ascii_alphanumeric())
        && identifier.chars().any(|c| c.is_ascii_digit())
}
