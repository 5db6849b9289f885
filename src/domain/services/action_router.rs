// src/domain/services/action_router.rs
use crate::application::ports::output::store_port::NotificationStorePort;
use crate::domain::entities::card::InvokeResponse;
use crate::domain::entities::interaction::InteractionPayload;
use crate::domain::services::card_renderer::ACKNOWLEDGE_VERB;
use crate::domain::services::card_update_publisher::CardUpdatePublisher;
use crate::domain::services::click_tracker::ClickTracker;
use crate::error::{ServiceError, TrackingError};
use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

/// Aggregate and per-recipient counters are keyed by this button name for
/// acknowledgment interactions.
pub const ACKNOWLEDGED_BUTTON: &str = "Acknowledged";

/// Why an inbound interaction was rejected. Rejection produces no store
/// mutation and no response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    UnknownVerb(String),
    NotificationNotFound(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownVerb(verb) => write!(f, "unknown verb {:?}", verb),
            RejectReason::NotificationNotFound(id) => {
                write!(f, "notification {} not found", id)
            }
        }
    }
}

/// Terminal outcome of routing one inbound interaction.
#[derive(Debug)]
pub enum RouteOutcome {
    Handled(InvokeResponse),
    Rejected(RejectReason),
}

/// Intermediate routing states, logged for tracing the state machine
/// `Received -> Routed -> Handled | Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteState {
    Received,
    Routed,
}

/// Dispatches inbound interaction payloads. Every invocation starts in
/// `Received` with no cross-invocation state; record state is re-read from
/// the stores each time.
pub struct ActionRouter {
    notifications: Arc<dyn NotificationStorePort>,
    tracker: Arc<ClickTracker>,
    publisher: Arc<CardUpdatePublisher>,
}

impl ActionRouter {
    pub fn new(
        notifications: Arc<dyn NotificationStorePort>,
        tracker: Arc<ClickTracker>,
        publisher: Arc<CardUpdatePublisher>,
    ) -> Self {
        Self {
            notifications,
            tracker,
            publisher,
        }
    }

    pub async fn route(
        &self,
        payload: &InteractionPayload,
        recipient_id: &str,
    ) -> Result<RouteOutcome, ServiceError> {
        let state = RouteState::Received;
        debug!(
            "interaction from {}: verb {:?} ({:?})",
            recipient_id, payload.action.verb, state
        );

        if payload.action.verb != ACKNOWLEDGE_VERB {
            return Ok(RouteOutcome::Rejected(RejectReason::UnknownVerb(
                payload.action.verb.clone(),
            )));
        }

        let notification_id = payload.action.data.action.as_str();
        if self.notifications.fetch(notification_id).await?.is_none() {
            return Ok(RouteOutcome::Rejected(RejectReason::NotificationNotFound(
                notification_id.to_string(),
            )));
        }

        let state = RouteState::Routed;
        debug!("interaction routed for {} ({:?})", notification_id, state);

        // Aggregate first, then per-recipient. Failures are isolated per
        // layer: an abandoned aggregate update must never block the
        // per-recipient write, and a missing delivery record must not undo
        // the aggregate count. The aggregate running ahead of (or behind)
        // per-recipient truth is an accepted partial-failure outcome.
        let updated = match self
            .tracker
            .record_aggregate_click(notification_id, ACKNOWLEDGED_BUTTON)
            .await
        {
            Ok(record) => Some(record),
            Err(TrackingError::NotificationNotFound(id)) => {
                return Ok(RouteOutcome::Rejected(RejectReason::NotificationNotFound(id)));
            }
            Err(e) => {
                warn!(
                    "aggregate tracking failed for {}: {}; continuing",
                    notification_id, e
                );
                None
            }
        };

        match self
            .tracker
            .record_recipient_acknowledge(notification_id, recipient_id, ACKNOWLEDGED_BUTTON)
            .await
        {
            Ok(()) => {}
            Err(TrackingError::RecipientNotFound(_, _)) => {
                debug!(
                    "no delivery record for {} / {}; skipping per-recipient update",
                    notification_id, recipient_id
                );
            }
            Err(e) => {
                warn!(
                    "per-recipient tracking failed for {} / {}: {}; continuing",
                    notification_id, recipient_id, e
                );
            }
        }

        let record = match updated {
            Some(record) => record,
            // Aggregate update was abandoned; respond from current state.
            None => {
                self.notifications
                    .fetch(notification_id)
                    .await?
                    .map(|versioned| versioned.record)
                    .ok_or_else(|| {
                        ServiceError::Tracking(TrackingError::NotificationNotFound(
                            notification_id.to_string(),
                        ))
                    })?
            }
        };

        let response = self.publisher.publish(&record, recipient_id).await?;
        info!(
            "acknowledge handled for notification {} recipient {}",
            notification_id, recipient_id
        );
        Ok(RouteOutcome::Handled(response))
    }
}
