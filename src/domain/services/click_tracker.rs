// src/domain/services/click_tracker.rs
use crate::application::ports::output::store_port::{
    DeliveryStorePort, NotificationStorePort, StoreError,
};
use crate::domain::entities::delivery::ClickEntry;
use crate::domain::entities::notification::NotificationRecord;
use crate::error::TrackingError;
use chrono::Utc;
use log::{debug, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Concurrency-safe read-modify-write updates of the aggregate and
/// per-recipient tracking state.
///
/// The aggregate counter mapping on a notification is the only shared
/// mutable resource across recipients, so its update runs as a bounded
/// optimistic-retry loop over the store's conditional write. Exhausting the
/// bound abandons only that update; it never blocks or fails the
/// per-recipient path.
pub struct ClickTracker {
    notifications: Arc<dyn NotificationStorePort>,
    deliveries: Arc<dyn DeliveryStorePort>,
    max_retries: u32,
    abandoned_updates: AtomicU64,
}

impl ClickTracker {
    pub fn new(
        notifications: Arc<dyn NotificationStorePort>,
        deliveries: Arc<dyn DeliveryStorePort>,
        max_retries: u32,
    ) -> Self {
        Self {
            notifications,
            deliveries,
            max_retries,
            abandoned_updates: AtomicU64::new(0),
        }
    }

    /// Number of aggregate updates abandoned after retry exhaustion. The
    /// aggregate count may run behind recorded per-recipient truth by this
    /// many interactions.
    pub fn abandoned_updates(&self) -> u64 {
        self.abandoned_updates.load(Ordering::Relaxed)
    }

    /// Increment the notification's aggregate counter for `button_name`,
    /// inserting at 1 if absent. Returns the updated record on success.
    pub async fn record_aggregate_click(
        &self,
        notification_id: &str,
        button_name: &str,
    ) -> Result<NotificationRecord, TrackingError> {
        for attempt in 0..self.max_retries {
            let versioned = self
                .notifications
                .fetch(notification_id)
                .await?
                .ok_or_else(|| {
                    TrackingError::NotificationNotFound(notification_id.to_string())
                })?;

            let mut record = versioned.record;
            *record.button_clicks.entry(button_name.to_string()).or_insert(0) += 1;

            match self
                .notifications
                .update(notification_id, versioned.version, record.clone())
                .await
            {
                Ok(()) => return Ok(record),
                Err(StoreError::Conflict) => {
                    debug!(
                        "aggregate counter conflict on {} (attempt {})",
                        notification_id,
                        attempt + 1
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.abandoned_updates.fetch_add(1, Ordering::Relaxed);
        warn!(
            "abandoning aggregate counter update for {} after {} attempts",
            notification_id, self.max_retries
        );
        Err(TrackingError::ConcurrencyExhausted(self.max_retries))
    }

    /// Record an acknowledgment click against the recipient's delivery
    /// record. The first acknowledge sets `acknowledge_status` and
    /// `acknowledged_at`; repeats only bump the matching click-history
    /// entry's count and timestamp. A missing delivery record is non-fatal
    /// for the invocation and surfaces as `RecipientNotFound`.
    pub async fn record_recipient_acknowledge(
        &self,
        notification_id: &str,
        recipient_id: &str,
        button_name: &str,
    ) -> Result<(), TrackingError> {
        for _ in 0..self.max_retries {
            let versioned = self
                .deliveries
                .fetch(notification_id, recipient_id)
                .await?
                .ok_or_else(|| {
                    TrackingError::RecipientNotFound(
                        notification_id.to_string(),
                        recipient_id.to_string(),
                    )
                })?;

            let mut record = versioned.record;
            let now = Utc::now();
            if !record.acknowledge_status {
                record.acknowledge_status = true;
                record.acknowledged_at = Some(now);
            }
            record
                .click_history
                .entry(button_name.to_string())
                .and_modify(|entry| {
                    entry.count += 1;
                    entry.last_clicked_at = now;
                })
                .or_insert(ClickEntry {
                    count: 1,
                    last_clicked_at: now,
                });

            match self
                .deliveries
                .update(notification_id, recipient_id, versioned.version, record)
                .await
            {
                Ok(()) => return Ok(()),
                Err(StoreError::Conflict) => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(TrackingError::ConcurrencyExhausted(self.max_retries))
    }
}
