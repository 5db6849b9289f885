// src/application/ports/output/transport_port.rs
use crate::domain::entities::card::CardDocument;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("replace request failed: {0}")]
    Request(String),

    #[error("replace endpoint returned status {0}")]
    Status(u16),
}

/// Outbound port to the external message transport. Replacement of the
/// previously delivered card is best effort; a failure here never affects
/// the response already returned to the initiating recipient.
#[async_trait]
pub trait CardTransportPort: Send + Sync {
    async fn replace_card(
        &self,
        notification_id: &str,
        recipient_id: &str,
        card: &CardDocument,
    ) -> Result<(), TransportError>;
}
