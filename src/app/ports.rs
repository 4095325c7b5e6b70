//! External collaborator interfaces
//!
//! The adaptor consumes the message-history store and the outbound transport
//! through these traits; the real implementations live outside this crate.

use crate::Result;
use crate::app::models::{DeliveryReceipt, Destination, MessageRecord, VesselPayload};
use async_trait::async_trait;

/// Read access to previously exchanged messages
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// Look up a prior message by its identifier
    ///
    /// Returns `Ok(None)` when no message with that id is known.
    async fn lookup_message_by_id(&self, id: &str) -> Result<Option<MessageRecord>>;
}

/// Outbound delivery channel for assembled message batches
#[async_trait]
pub trait DeliveryService: Send + Sync {
    /// Deliver one payload under a resolved context to a resolved destination
    ///
    /// Invoked once per message group. The returned receipt carries the
    /// generated message id and the acknowledgment of the remote service.
    async fn deliver(
        &self,
        payload: &VesselPayload,
        context_id: &str,
        destination: &Destination,
    ) -> Result<DeliveryReceipt>;
}
