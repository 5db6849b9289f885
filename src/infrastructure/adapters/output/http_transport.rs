// src/infrastructure/adapters/output/http_transport.rs
use crate::application::ports::output::transport_port::{CardTransportPort, TransportError};
use crate::domain::entities::card::CardDocument;
use async_trait::async_trait;
use log::debug;
use serde::Serialize;

/// Pushes card replacement requests to the external transport's webhook.
/// Retry and timeout policy for the transport belongs to that collaborator;
/// this adapter makes one attempt and reports the outcome.
pub struct HttpCardTransport {
    client: reqwest::Client,
    replace_url: String,
}

#[derive(Serialize)]
struct ReplaceRequest<'a> {
    notification_id: &'a str,
    recipient_id: &'a str,
    card: &'a CardDocument,
}

impl HttpCardTransport {
    pub fn new(replace_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            replace_url,
        }
    }
}

#[async_trait]
impl CardTransportPort for HttpCardTransport {
    async fn replace_card(
        &self,
        notification_id: &str,
        recipient_id: &str,
        card: &CardDocument,
    ) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.replace_url)
            .json(&ReplaceRequest {
                notification_id,
                recipient_id,
                card,
            })
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Transport used when no replace endpoint is configured; replacement
/// requests are dropped and the live card stays as delivered.
pub struct SilentCardTransport;

#[async_trait]
impl CardTransportPort for SilentCardTransport {
    async fn replace_card(
        &self,
        notification_id: &str,
        recipient_id: &str,
        _card: &CardDocument,
    ) -> Result<(), TransportError> {
        debug!(
            "no replace endpoint configured; dropping replacement for {} / {}",
            notification_id, recipient_id
        );
        Ok(())
    }
}
