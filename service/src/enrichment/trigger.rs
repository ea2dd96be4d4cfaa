//! Incremental reprocessing of a mutating table
//!
//! The host page re-renders its field table incrementally; a DOM-observer
//! collaborator batches insertions into [`TableMutation`] notifications.
//! The trigger re-runs enrichment over the full current row set on every
//! batch (safe because the engine is idempotent per row) and owns the
//! session's last-processed-object state explicitly, with a reset on
//! navigation.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use fieldbook_core::traits::{MetadataProvider, MutationStream};
use fieldbook_core::types::{TableMutation, TableSnapshot};

use super::EnrichmentEngine;

/// Re-invokes enrichment when the rendered table gains rows.
pub struct ReprocessingTrigger<P: ?Sized> {
    engine: Arc<EnrichmentEngine<P>>,
    /// API name of the last processed object; `None` before the first batch
    /// and after navigation
    session_object: Mutex<Option<String>>,
}

impl<P: MetadataProvider + ?Sized> ReprocessingTrigger<P> {
    /// Create a trigger driving the given engine.
    pub fn new(engine: Arc<EnrichmentEngine<P>>) -> Self {
        Self {
            engine,
            session_object: Mutex::new(None),
        }
    }

    /// Handle one batched mutation notification.
    pub async fn handle(&self, mutation: TableMutation) {
        match mutation {
            TableMutation::RowsInserted(snapshot) => self.process_snapshot(snapshot).await,
            TableMutation::Navigated => {
                info!("navigation detected, resetting enrichment session");
                self.reset();
            }
        }
    }

    /// Drain mutations until the notification channel closes.
    pub async fn run(&self, mut mutations: MutationStream) {
        while let Some(mutation) = mutations.recv().await {
            self.handle(mutation).await;
        }
        debug!("mutation stream closed");
    }

    /// Forget the session object and drop all engine rows.
    pub fn reset(&self) {
        *self.session_object.lock() = None;
        self.engine.reset();
    }

    /// API name of the last processed object, if any.
    #[must_use]
    pub fn session_object(&self) -> Option<String> {
        self.session_object.lock().clone()
    }

    async fn process_snapshot(&self, snapshot: TableSnapshot) {
        {
            let mut session = self.session_object.lock();
            if session.as_deref() != Some(snapshot.object_api_name.as_str()) {
                // New object: rendered rows are new identities.
                self.engine.reset();
                *session = Some(snapshot.object_api_name.clone());
            }
        }
        self.engine
            .insert_rows(&snapshot.object_api_name, &snapshot.rows);
        self.engine.enrich_all().await;
    }
}
