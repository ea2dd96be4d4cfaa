//! Configuration structures for the fieldbook pipeline
//!
//! All tunable values are externalized here so embedders can deserialize them
//! from whatever configuration source they use; every structure carries
//! defaults matching the stock behavior.

use crate::error::{FieldbookError, Result};
use crate::types::SHEET_NAME_MAX_LEN;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level pipeline configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldbookConfig {
    /// Enrichment configuration
    pub enrichment: EnrichmentConfig,
    /// Export configuration
    pub export: ExportConfig,
}

impl FieldbookConfig {
    /// Validate the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        self.enrichment.validate()?;
        self.export.validate()
    }
}

/// Enrichment configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Suffix marking a custom field API name; fields without it are
    /// treated as standard fields when requesting picklist values
    pub custom_field_suffix: String,

    /// Substring of the raw type text identifying a picklist field,
    /// compared case-insensitively
    pub picklist_type_marker: String,

    /// Timeout applied by provider implementations to each metadata request
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            custom_field_suffix: "__c".to_string(),
            picklist_type_marker: "picklist".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl EnrichmentConfig {
    /// Validate enrichment settings.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::Config` when a marker or suffix is empty.
    pub fn validate(&self) -> Result<()> {
        if self.custom_field_suffix.is_empty() {
            return Err(FieldbookError::config("custom_field_suffix must not be empty"));
        }
        if self.picklist_type_marker.is_empty() {
            return Err(FieldbookError::config("picklist_type_marker must not be empty"));
        }
        Ok(())
    }
}

/// Export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Filename suffix appended to the object API name for single-object
    /// exports
    pub current_filename_suffix: String,

    /// Default filename for full exports
    pub full_export_filename: String,

    /// Default filename for selected-object exports
    pub selected_export_filename: String,

    /// Sheet name length cap; the workbook format fixes this at 31
    pub sheet_name_max_len: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            current_filename_suffix: "_fields.xlsx".to_string(),
            full_export_filename: "full_export.xlsx".to_string(),
            selected_export_filename: "selected_export.xlsx".to_string(),
            sheet_name_max_len: SHEET_NAME_MAX_LEN,
        }
    }
}

impl ExportConfig {
    /// Validate export settings.
    ///
    /// # Errors
    ///
    /// Returns `FieldbookError::Config` for empty filenames or a sheet-name
    /// cap the workbook format cannot honor.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("current_filename_suffix", &self.current_filename_suffix),
            ("full_export_filename", &self.full_export_filename),
            ("selected_export_filename", &self.selected_export_filename),
        ] {
            if value.is_empty() {
                return Err(FieldbookError::config(format!("{name} must not be empty")));
            }
        }
        if self.sheet_name_max_len != SHEET_NAME_MAX_LEN {
            return Err(FieldbookError::config(format!(
                "sheet_name_max_len must be {SHEET_NAME_MAX_LEN}, got {}",
                self.sheet_name_max_len
            )));
        }
        Ok(())
    }
}
