//! Per-row picklist enrichment
//!
//! The enrichment engine owns the rendered row set and drives each row
//! through `Unprocessed -> InFlight -> Done` exactly once. Picklist rows
//! issue a single metadata request; everything else completes immediately
//! with an empty annotation. Completions only ever write to their own row,
//! so any number of requests may be outstanding concurrently.

mod trigger;

pub use trigger::ReprocessingTrigger;

use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, warn};

use fieldbook_core::config::EnrichmentConfig;
use fieldbook_core::traits::MetadataProvider;
use fieldbook_core::types::{EnrichmentStatus, FieldRow, RenderedRow, RowKey};

use crate::search::is_visible;

/// Annotates rendered field rows with asynchronously fetched picklist
/// metadata and keeps the active search result set current.
pub struct EnrichmentEngine<P: ?Sized> {
    provider: Arc<P>,
    /// Custom-field suffix; rows without it are standard fields
    custom_field_suffix: String,
    /// Lowercased marker identifying picklist type text
    picklist_marker: String,
    /// Host origin forwarded with every provider request
    origin: String,
    rows: RwLock<IndexMap<RowKey, FieldRow>>,
    /// Active query, stored lowercased
    query: RwLock<String>,
    visibility_tx: watch::Sender<Vec<RowKey>>,
}

impl<P: MetadataProvider + ?Sized> EnrichmentEngine<P> {
    /// Create an engine for one console session.
    pub fn new(provider: Arc<P>, config: EnrichmentConfig, origin: impl Into<String>) -> Self {
        let (visibility_tx, _) = watch::channel(Vec::new());
        Self {
            provider,
            custom_field_suffix: config.custom_field_suffix,
            picklist_marker: config.picklist_type_marker.to_lowercase(),
            origin: origin.into(),
            rows: RwLock::new(IndexMap::new()),
            query: RwLock::new(String::new()),
            visibility_tx,
        }
    }

    /// Register rendered rows as unprocessed.
    ///
    /// A key that is already registered keeps its state: the same identity
    /// means the same enrichment lifecycle.
    pub fn insert_rows(&self, object_api_name: &str, rendered: &[RenderedRow]) {
        let mut rows = self.rows.write();
        for row in rendered {
            let key = RowKey::new(object_api_name, &row.api_name);
            rows.entry(key).or_insert_with(|| FieldRow::from(row));
        }
    }

    /// Enrich one row.
    ///
    /// No-op unless the row exists and is `Unprocessed`. Re-entrant calls
    /// while a request is in flight, or after completion, do nothing:
    /// exactly one request is ever issued per row identity. Failures are
    /// absorbed and the row still reaches `Done`, with an empty annotation.
    pub async fn enrich(&self, key: &RowKey) {
        let is_standard_field = {
            let mut rows = self.rows.write();
            let Some(row) = rows.get_mut(key) else {
                return;
            };
            if row.status != EnrichmentStatus::Unprocessed {
                return;
            }
            row.status = EnrichmentStatus::InFlight;
            if !self.is_picklist_type(&row.type_text) {
                row.status = EnrichmentStatus::Done;
                return;
            }
            !key.field.ends_with(&self.custom_field_suffix)
        };

        debug!(row = %key, "requesting picklist values");
        let outcome = self
            .provider
            .fetch_picklist_values(&key.object, &key.field, &self.origin, is_standard_field)
            .await;

        let annotated = {
            let mut rows = self.rows.write();
            let Some(row) = rows.get_mut(key) else {
                return;
            };
            row.status = EnrichmentStatus::Done;
            match outcome {
                Ok(text) => {
                    row.picklist_text = text;
                    true
                }
                Err(error) => {
                    warn!(row = %key, %error, "picklist enrichment failed");
                    false
                }
            }
        };

        if annotated {
            self.refresh_visibility();
        }
    }

    /// Enrich every unprocessed row concurrently.
    ///
    /// Safe to call repeatedly: rows already in flight or done are skipped,
    /// so only genuinely new rows cause work.
    pub async fn enrich_all(&self) {
        let pending: Vec<RowKey> = {
            let rows = self.rows.read();
            rows.iter()
                .filter(|(_, row)| row.status == EnrichmentStatus::Unprocessed)
                .map(|(key, _)| key.clone())
                .collect()
        };
        if pending.is_empty() {
            return;
        }
        debug!(count = pending.len(), "enriching unprocessed rows");
        join_all(pending.iter().map(|key| self.enrich(key))).await;
    }

    /// Replace the active query and recompute visibility.
    ///
    /// The query is lowercased here once; row text is lowercased per
    /// comparison by the filter.
    pub fn set_query(&self, query: &str) {
        {
            let mut active = self.query.write();
            *active = query.to_lowercase();
        }
        self.refresh_visibility();
    }

    /// Keys of the rows visible under the active query, in render order.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<RowKey> {
        let query = self.query.read().clone();
        self.rows
            .read()
            .iter()
            .filter(|(_, row)| is_visible(row, &query))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Subscribe to visibility recomputations.
    ///
    /// A new value is published whenever the query changes or an annotation
    /// lands; the UI collaborator applies it to the rendered table.
    #[must_use]
    pub fn subscribe_visibility(&self) -> watch::Receiver<Vec<RowKey>> {
        self.visibility_tx.subscribe()
    }

    /// Current rows in render order, cloned for export.
    #[must_use]
    pub fn rows(&self) -> Vec<FieldRow> {
        self.rows.read().values().cloned().collect()
    }

    /// Look up one row by key.
    #[must_use]
    pub fn row(&self, key: &RowKey) -> Option<FieldRow> {
        self.rows.read().get(key).cloned()
    }

    /// Number of registered rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    /// Whether no rows are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }

    /// Drop all rows. Invoked on navigation: a re-rendered table is a new
    /// set of row identities.
    pub fn reset(&self) {
        self.rows.write().clear();
        self.refresh_visibility();
    }

    fn is_picklist_type(&self, type_text: &str) -> bool {
        type_text.to_lowercase().contains(&self.picklist_marker)
    }

    fn refresh_visibility(&self) {
        let visible = self.visible_rows();
        self.visibility_tx.send_replace(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fieldbook_core::error::Result;
    use fieldbook_core::types::FieldDescription;
    use pretty_assertions::assert_eq;

    /// Provider that must never be reached; non-picklist rows complete
    /// without any request.
    struct UnreachableProvider;

    #[async_trait]
    impl MetadataProvider for UnreachableProvider {
        async fn resolve_object_api_name(&self, _: &str, _: &str) -> Result<String> {
            panic!("provider should not be called");
        }

        async fn fetch_picklist_values(&self, _: &str, _: &str, _: &str, _: bool) -> Result<String> {
            panic!("provider should not be called");
        }

        async fn fetch_object_field_descriptions(
            &self,
            _: &str,
            _: &str,
        ) -> Result<Vec<FieldDescription>> {
            panic!("provider should not be called");
        }
    }

    fn engine() -> EnrichmentEngine<UnreachableProvider> {
        EnrichmentEngine::new(
            Arc::new(UnreachableProvider),
            EnrichmentConfig::default(),
            "https://example.test",
        )
    }

    #[tokio::test]
    async fn non_picklist_rows_complete_without_requests() {
        let engine = engine();
        engine.insert_rows(
            "Account",
            &[
                RenderedRow::new("Name", "Name", "String"),
                RenderedRow::new("Active", "Active__c", "Checkbox"),
            ],
        );
        engine.enrich_all().await;

        let row = engine
            .row(&RowKey::new("Account", "Name"))
            .expect("row should be registered");
        assert_eq!(row.status, EnrichmentStatus::Done);
        assert!(row.picklist_text.is_empty());
    }

    #[tokio::test]
    async fn reinserting_a_done_row_keeps_its_state() {
        let engine = engine();
        let rendered = [RenderedRow::new("Name", "Name", "String")];
        engine.insert_rows("Account", &rendered);
        engine.enrich_all().await;
        engine.insert_rows("Account", &rendered);

        let row = engine
            .row(&RowKey::new("Account", "Name"))
            .expect("row should be registered");
        assert_eq!(row.status, EnrichmentStatus::Done);
        // A second pass over the same identities does nothing.
        engine.enrich_all().await;
    }

    #[tokio::test]
    async fn query_filters_rows_in_render_order() {
        let engine = engine();
        engine.insert_rows(
            "Account",
            &[
                RenderedRow::new("Name", "Name", "String"),
                RenderedRow::new("Billing City", "BillingCity", "String"),
                RenderedRow::new("Billing State", "BillingState", "String"),
            ],
        );

        engine.set_query("Billing");
        let visible = engine.visible_rows();
        assert_eq!(
            visible,
            vec![
                RowKey::new("Account", "BillingCity"),
                RowKey::new("Account", "BillingState"),
            ]
        );

        engine.set_query("");
        assert_eq!(engine.visible_rows().len(), 3);
    }

    #[tokio::test]
    async fn reset_clears_rows_and_publishes_empty_visibility() {
        let engine = engine();
        let mut visibility = engine.subscribe_visibility();
        engine.insert_rows("Account", &[RenderedRow::new("Name", "Name", "String")]);
        engine.set_query("");
        assert_eq!(engine.len(), 1);

        engine.reset();
        assert!(engine.is_empty());
        visibility
            .changed()
            .await
            .expect("visibility sender should be alive");
        assert!(visibility.borrow().is_empty());
    }
}
