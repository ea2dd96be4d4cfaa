//! Core type definitions for field rows, object descriptors and workbooks

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a workbook sheet name, in characters.
pub const SHEET_NAME_MAX_LEN: usize = 31;

/// Identity of a rendered field row: object API name plus field API name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    /// API name of the object the field belongs to
    pub object: String,
    /// API name of the field
    pub field: String,
}

impl RowKey {
    /// Create a new row key
    #[must_use]
    pub fn new(object: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.object, self.field)
    }
}

/// Enrichment lifecycle of a field row.
///
/// A row moves `Unprocessed -> InFlight -> Done` exactly once per rendering;
/// there is no transition back. A row that reached `Done` is only queried
/// again if the host replaces it with a new identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrichmentStatus {
    /// Row has been registered but not yet picked up
    #[default]
    Unprocessed,
    /// A picklist request is outstanding for this row
    InFlight,
    /// Enrichment finished (with or without an annotation)
    Done,
}

/// One rendered field-definition entry with enrichment state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    /// Human-readable field label
    pub label: String,
    /// Field API name
    pub api_name: String,
    /// Raw field type text as rendered by the host page
    pub type_text: String,
    /// Field length, when the host page exposes one
    pub length: Option<u32>,
    /// Enrichment lifecycle state
    pub status: EnrichmentStatus,
    /// Resolved picklist text; empty when not applicable or unresolved
    pub picklist_text: String,
}

impl FieldRow {
    /// Create an unprocessed row from its rendered parts.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        api_name: impl Into<String>,
        type_text: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            api_name: api_name.into(),
            type_text: type_text.into(),
            length: None,
            status: EnrichmentStatus::default(),
            picklist_text: String::new(),
        }
    }
}

impl From<&RenderedRow> for FieldRow {
    fn from(row: &RenderedRow) -> Self {
        Self::new(&row.label, &row.api_name, &row.type_text)
    }
}

/// A field-definition row as rendered by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRow {
    /// Human-readable field label
    pub label: String,
    /// Field API name
    pub api_name: String,
    /// Raw field type text
    pub type_text: String,
}

impl RenderedRow {
    /// Create a rendered row triple
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        api_name: impl Into<String>,
        type_text: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            api_name: api_name.into(),
            type_text: type_text.into(),
        }
    }
}

/// One field description from a bulk describe response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescription {
    /// Human-readable field label
    pub field_label: String,
    /// Field API name
    pub field_api_name: String,
    /// Raw field type token
    pub field_type: String,
    /// Declared field length, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_length: Option<u32>,
    /// Picklist values rendered as a single string, empty when not a picklist
    #[serde(default)]
    pub picklist_values: String,
}

/// An export target: display label plus object API name.
///
/// The `api_name` may still be an opaque internal identifier; the export
/// engine resolves those through the metadata provider before describing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Display label of the object
    pub label: String,
    /// Object API name or opaque identifier
    pub api_name: String,
}

impl ObjectRef {
    /// Create a new object reference
    #[must_use]
    pub fn new(label: impl Into<String>, api_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            api_name: api_name.into(),
        }
    }
}

/// Fully described object, constructed per export operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    /// Display label of the object
    pub label: String,
    /// Resolved object API name
    pub api_name: String,
    /// Ordered field descriptions
    pub fields: Vec<FieldDescription>,
}

/// One named tab of a workbook: the header row comes first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name, unique within its workbook and at most
    /// [`SHEET_NAME_MAX_LEN`] characters
    pub name: String,
    /// Tabular cell data, header row first
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Create a sheet from a name and its rows
    #[must_use]
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Ordered sequence of uniquely named sheets.
///
/// Sheets are appended during assembly and the workbook is immutable once
/// handed to a [`crate::traits::WorkbookWriter`]. Name uniqueness is owned by
/// the assembling code; this type only stores the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet
    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    /// Sheets in assembly order
    #[must_use]
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Number of sheets
    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether the workbook has no sheets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Snapshot of the currently rendered field table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSnapshot {
    /// Display label of the rendered object
    pub object_label: String,
    /// API name of the rendered object
    pub object_api_name: String,
    /// Rendered rows in display order
    pub rows: Vec<RenderedRow>,
}

/// Batched notification from the row-source mutation stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableMutation {
    /// Rows were inserted; carries the full current row set
    RowsInserted(TableSnapshot),
    /// The host navigated away from the current object
    Navigated,
}
