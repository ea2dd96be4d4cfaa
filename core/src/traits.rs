//! Core trait definitions for pipeline collaborators
//!
//! These traits are the seams between the pipeline and its environment: the
//! privileged metadata backend, the host page's rendered table, and the
//! artifact writer. Every trait here is dyn-compatible so embedders can hand
//! the service `Arc<dyn MetadataProvider>`-style handles.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{FieldDescription, TableMutation, TableSnapshot, Workbook};

/// Receiving side of the row-source mutation stream.
///
/// The DOM-observer collaborator batches row insertions and navigation
/// events into [`TableMutation`] values and feeds them through this channel.
pub type MutationStream = tokio::sync::mpsc::Receiver<TableMutation>;

/// Asynchronous request/response channel to the privileged metadata backend.
///
/// Any concrete transport (in-process call, extension messaging, RPC, HTTP)
/// satisfies this contract. Implementations are expected to apply the
/// configured request timeout and map transport failures into the matching
/// [`crate::error::FieldbookError`] kind; they must not retry on their own.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Map an opaque internal object identifier to its API name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FieldbookError::Resolution`] when the
    /// identifier cannot be mapped.
    async fn resolve_object_api_name(&self, identifier: &str, origin: &str) -> Result<String>;

    /// Fetch the picklist values of one field, rendered as a single string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FieldbookError::PicklistFetch`] when the
    /// lookup fails.
    async fn fetch_picklist_values(
        &self,
        object_api_name: &str,
        field_api_name: &str,
        origin: &str,
        is_standard_field: bool,
    ) -> Result<String>;

    /// Fetch the full field description set of an object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FieldbookError::DescribeFetch`] when the
    /// describe call fails.
    async fn fetch_object_field_descriptions(
        &self,
        object_api_name: &str,
        origin: &str,
    ) -> Result<Vec<FieldDescription>>;
}

/// Access to the currently rendered field table.
///
/// The mutation stream counterpart is delivered out-of-band as a
/// [`crate::types::TableMutation`] channel; this trait only covers the
/// pull side.
pub trait RowSource: Send + Sync {
    /// Snapshot the rendered table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FieldbookError::SourceNotFound`] when the
    /// table never appeared; this is the one fatal condition of an export
    /// or enrichment pass.
    fn snapshot(&self) -> Result<TableSnapshot>;
}

/// Writer/download collaborator producing the final spreadsheet artifact.
///
/// The workbook handed in already satisfies the sheet-name invariants; a
/// writer only serializes.
#[async_trait]
pub trait WorkbookWriter: Send + Sync {
    /// Serialize the workbook under the given filename.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::FieldbookError::Workbook`] or an IO error
    /// when serialization fails.
    async fn write(&self, workbook: &Workbook, filename: &str) -> Result<()>;
}
