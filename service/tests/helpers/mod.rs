//! Shared test doubles for the pipeline integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use fieldbook_core::error::{FieldbookError, Result};
use fieldbook_core::traits::{MetadataProvider, RowSource, WorkbookWriter};
use fieldbook_core::types::{FieldDescription, RenderedRow, TableSnapshot, Workbook};

/// Fixture-backed metadata provider recording every call.
#[derive(Default)]
pub struct MockProvider {
    picklists: HashMap<(String, String), String>,
    failing_picklists: HashSet<(String, String)>,
    describes: HashMap<String, Vec<FieldDescription>>,
    failing_describes: HashSet<String>,
    resolutions: HashMap<String, String>,
    /// When set, picklist responses wait for one permit each
    gate: Option<Arc<Notify>>,

    pub picklist_calls: AtomicUsize,
    pub describe_calls: AtomicUsize,
    pub resolve_calls: AtomicUsize,
    /// Arguments of every picklist request: (object, field, `is_standard`)
    pub picklist_requests: Mutex<Vec<(String, String, bool)>>,
    /// Object API names passed to describe, in call order
    pub described_objects: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picklist(
        mut self,
        object: &str,
        field: &str,
        values: &str,
    ) -> Self {
        self.picklists
            .insert((object.to_string(), field.to_string()), values.to_string());
        self
    }

    pub fn with_failing_picklist(mut self, object: &str, field: &str) -> Self {
        self.failing_picklists
            .insert((object.to_string(), field.to_string()));
        self
    }

    pub fn with_describe(mut self, object: &str, fields: Vec<FieldDescription>) -> Self {
        self.describes.insert(object.to_string(), fields);
        self
    }

    pub fn with_failing_describe(mut self, object: &str) -> Self {
        self.failing_describes.insert(object.to_string());
        self
    }

    pub fn with_resolution(mut self, identifier: &str, api_name: &str) -> Self {
        self.resolutions
            .insert(identifier.to_string(), api_name.to_string());
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl MetadataProvider for MockProvider {
    async fn resolve_object_api_name(&self, identifier: &str, _origin: &str) -> Result<String> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        self.resolutions
            .get(identifier)
            .cloned()
            .ok_or_else(|| FieldbookError::resolution(identifier, "unknown identifier"))
    }

    async fn fetch_picklist_values(
        &self,
        object_api_name: &str,
        field_api_name: &str,
        _origin: &str,
        is_standard_field: bool,
    ) -> Result<String> {
        self.picklist_calls.fetch_add(1, Ordering::SeqCst);
        self.picklist_requests
            .lock()
            .expect("lock should not be poisoned")
            .push((
                object_api_name.to_string(),
                field_api_name.to_string(),
                is_standard_field,
            ));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let key = (object_api_name.to_string(), field_api_name.to_string());
        if self.failing_picklists.contains(&key) {
            return Err(FieldbookError::picklist_fetch(
                object_api_name,
                field_api_name,
                "simulated channel failure",
            ));
        }
        self.picklists
            .get(&key)
            .cloned()
            .ok_or_else(|| {
                FieldbookError::picklist_fetch(object_api_name, field_api_name, "no fixture")
            })
    }

    async fn fetch_object_field_descriptions(
        &self,
        object_api_name: &str,
        _origin: &str,
    ) -> Result<Vec<FieldDescription>> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.described_objects
            .lock()
            .expect("lock should not be poisoned")
            .push(object_api_name.to_string());
        if self.failing_describes.contains(object_api_name) {
            return Err(FieldbookError::describe_fetch(
                object_api_name,
                "simulated describe failure",
            ));
        }
        self.describes
            .get(object_api_name)
            .cloned()
            .ok_or_else(|| FieldbookError::describe_fetch(object_api_name, "no fixture"))
    }
}

/// Writer that records workbooks instead of serializing them.
#[derive(Default)]
pub struct MemoryWriter {
    fail: bool,
    pub written: Mutex<Vec<(Workbook, String)>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last(&self) -> Option<(Workbook, String)> {
        self.written
            .lock()
            .expect("lock should not be poisoned")
            .last()
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.written
            .lock()
            .expect("lock should not be poisoned")
            .len()
    }
}

#[async_trait]
impl WorkbookWriter for MemoryWriter {
    async fn write(&self, workbook: &Workbook, filename: &str) -> Result<()> {
        if self.fail {
            return Err(FieldbookError::workbook("simulated writer failure"));
        }
        self.written
            .lock()
            .expect("lock should not be poisoned")
            .push((workbook.clone(), filename.to_string()));
        Ok(())
    }
}

/// Row source backed by an optional snapshot.
pub struct MockRowSource {
    snapshot: Option<TableSnapshot>,
}

impl MockRowSource {
    pub fn new(snapshot: TableSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    pub fn missing() -> Self {
        Self { snapshot: None }
    }
}

impl RowSource for MockRowSource {
    fn snapshot(&self) -> Result<TableSnapshot> {
        self.snapshot
            .clone()
            .ok_or_else(|| FieldbookError::source_not_found("field table never rendered"))
    }
}

/// Build a table snapshot from (label, api name, type text) triples.
pub fn snapshot(label: &str, api_name: &str, rows: &[(&str, &str, &str)]) -> TableSnapshot {
    TableSnapshot {
        object_label: label.to_string(),
        object_api_name: api_name.to_string(),
        rows: rows
            .iter()
            .map(|(label, api_name, type_text)| RenderedRow::new(*label, *api_name, *type_text))
            .collect(),
    }
}

/// Build a field description fixture.
pub fn field(
    label: &str,
    api_name: &str,
    field_type: &str,
    length: Option<u32>,
    picklist: &str,
) -> FieldDescription {
    FieldDescription {
        field_label: label.to_string(),
        field_api_name: api_name.to_string(),
        field_type: field_type.to_string(),
        field_length: length,
        picklist_values: picklist.to_string(),
    }
}
