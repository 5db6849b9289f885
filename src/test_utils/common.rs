// src/test_utils/common.rs
use crate::config::Settings;
use crate::delivery::api_server::AppState;
use crate::domain::entities::delivery::DeliveryRecord;
use crate::domain::entities::notification::NotificationRecord;
use crate::infrastructure::repositories::memory_store::{
    MemoryDeliveryStore, MemoryNotificationStore,
};
use actix_web::web;
use std::sync::Arc;

/// Build an application state over fresh in-memory stores preloaded with
/// the given records, returning the store handles for assertions.
pub fn seeded_state(
    notifications: Vec<NotificationRecord>,
    deliveries: Vec<DeliveryRecord>,
) -> (
    web::Data<AppState>,
    Arc<MemoryNotificationStore>,
    Arc<MemoryDeliveryStore>,
) {
    let notification_store = Arc::new(MemoryNotificationStore::new());
    for record in notifications {
        notification_store.insert(record);
    }
    let delivery_store = Arc::new(MemoryDeliveryStore::new());
    for record in deliveries {
        delivery_store.insert(record);
    }

    let state = web::Data::new(AppState::build(
        &Settings::default(),
        notification_store.clone(),
        delivery_store.clone(),
    ));
    (state, notification_store, delivery_store)
}

/// An acknowledgment-capable, important notification record.
pub fn sample_notification(id: &str) -> NotificationRecord {
    let mut record = NotificationRecord::new(id, "Policy Update");
    record.summary = Some("Please read the updated travel policy".to_string());
    record.author = Some("HR".to_string());
    record.ack_capable = true;
    record.is_important = true;
    record.color = "High Priority".to_string();
    record
}

pub fn sample_delivery(notification_id: &str, recipient_id: &str) -> DeliveryRecord {
    DeliveryRecord::new(notification_id, recipient_id)
}
