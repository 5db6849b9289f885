// src/domain/services/card_update_publisher.rs
use crate::application::ports::output::transport_port::CardTransportPort;
use crate::domain::entities::card::InvokeResponse;
use crate::domain::entities::notification::NotificationRecord;
use crate::domain::services::card_renderer::CardRenderer;
use crate::error::RenderError;
use log::warn;
use std::sync::Arc;

/// Re-renders a handled notification with the acknowledgment notice and
/// pushes the result two ways: back to the initiating recipient as the
/// invoke response, and to the external transport as a best-effort in-place
/// replacement of the delivered card.
pub struct CardUpdatePublisher {
    renderer: CardRenderer,
    transport: Arc<dyn CardTransportPort>,
}

impl CardUpdatePublisher {
    pub fn new(renderer: CardRenderer, transport: Arc<dyn CardTransportPort>) -> Self {
        Self {
            renderer,
            transport,
        }
    }

    pub async fn publish(
        &self,
        record: &NotificationRecord,
        recipient_id: &str,
    ) -> Result<InvokeResponse, RenderError> {
        let card = self.renderer.render(record, true)?;

        // Replacement failure leaves the live card stale until the next
        // interaction; the response below is returned regardless so the
        // recipient's client can update optimistically.
        if let Err(e) = self
            .transport
            .replace_card(&record.id, recipient_id, &card)
            .await
        {
            warn!(
                "in-place card replacement failed for notification {} recipient {}: {}",
                record.id, recipient_id, e
            );
        }

        Ok(InvokeResponse::ok(card))
    }
}
