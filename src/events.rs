//! Resource rename events and cache invalidation.
//!
//! Renaming the IRI of a restricted datatype invalidates the restriction
//! map as a whole: the listener re-fetches instead of patching entries.
//! Re-fetches are fire-and-forget; a failure leaves the stale map in place.

use crate::validator::DatatypeValidator;
use oxigraph::model::NamedNode;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A resource changed its identifying IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEvent {
    pub old_iri: NamedNode,
    pub new_iri: NamedNode,
}

/// Subscribe the validator to a rename event stream. A rename whose
/// `old_iri` is a key of the current cache triggers a full re-fetch;
/// renames of unrestricted resources are ignored. The task ends when the
/// sending side is dropped.
pub fn spawn_rename_listener(
    validator: Arc<DatatypeValidator>,
    mut events: broadcast::Receiver<RenameEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if !validator.cache().contains(&event.old_iri) {
                        continue;
                    }
                    debug!(
                        old = %event.old_iri,
                        new = %event.new_iri,
                        "restricted datatype renamed, refreshing restriction cache"
                    );
                    if let Err(err) = validator.init_datatype_restrictions().await {
                        warn!(%err, "restriction refresh after rename failed, keeping previous cache");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Missed events may have renamed cached keys.
                    warn!(skipped, "rename event stream lagged, refreshing restriction cache");
                    if let Err(err) = validator.init_datatype_restrictions().await {
                        warn!(%err, "restriction refresh after lag failed, keeping previous cache");
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
