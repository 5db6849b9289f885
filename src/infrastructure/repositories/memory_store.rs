// src/infrastructure/repositories/memory_store.rs
/*
In-Memory Versioned Stores

Adapters backing the store output ports with process-local state. Each entry
carries a monotonically increasing version; a conditional write against a
stale version is rejected with `StoreError::Conflict`, which is the behavior
the click tracker's optimistic-retry loop is written against.

Storage engine internals are out of scope for this service; these adapters
exist so it runs standalone and so the concurrency discipline is testable.
Records are seeded at startup (see `SeedData`) because creation is owned by
the external composition and delivery pipelines.
*/

use crate::application::ports::output::store_port::{
    DeliveryStorePort, NotificationStorePort, StoreError, Versioned,
};
use crate::domain::entities::delivery::DeliveryRecord;
use crate::domain::entities::notification::NotificationRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    entries: RwLock<HashMap<String, Versioned<NotificationRecord>>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record at version 1, replacing any previous entry.
    pub fn insert(&self, record: NotificationRecord) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(record.id.clone(), Versioned { version: 1, record });
    }
}

#[async_trait]
impl NotificationStorePort for MemoryNotificationStore {
    async fn fetch(&self, id: &str) -> Result<Option<Versioned<NotificationRecord>>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Unavailable("notification store poisoned".to_string()))?;
        Ok(entries.get(id).cloned())
    }

    async fn update(
        &self,
        id: &str,
        expected_version: u64,
        record: NotificationRecord,
    ) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Unavailable("notification store poisoned".to_string()))?;
        match entries.get_mut(id) {
            Some(entry) if entry.version == expected_version => {
                *entry = Versioned {
                    version: expected_version + 1,
                    record,
                };
                Ok(())
            }
            _ => Err(StoreError::Conflict),
        }
    }
}

fn delivery_key(notification_id: &str, recipient_id: &str) -> (String, String) {
    (notification_id.to_string(), recipient_id.to_string())
}

#[derive(Debug, Default)]
pub struct MemoryDeliveryStore {
    entries: RwLock<HashMap<(String, String), Versioned<DeliveryRecord>>>,
}

impl MemoryDeliveryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: DeliveryRecord) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let key = delivery_key(&record.notification_id, &record.recipient_id);
        entries.insert(key, Versioned { version: 1, record });
    }
}

#[async_trait]
impl DeliveryStorePort for MemoryDeliveryStore {
    async fn fetch(
        &self,
        notification_id: &str,
        recipient_id: &str,
    ) -> Result<Option<Versioned<DeliveryRecord>>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Unavailable("delivery store poisoned".to_string()))?;
        Ok(entries
            .get(&delivery_key(notification_id, recipient_id))
            .cloned())
    }

    async fn update(
        &self,
        notification_id: &str,
        recipient_id: &str,
        expected_version: u64,
        record: DeliveryRecord,
    ) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Unavailable("delivery store poisoned".to_string()))?;
        match entries.get_mut(&delivery_key(notification_id, recipient_id)) {
            Some(entry) if entry.version == expected_version => {
                *entry = Versioned {
                    version: expected_version + 1,
                    record,
                };
                Ok(())
            }
            _ => Err(StoreError::Conflict),
        }
    }
}

/// Startup seed: notification and delivery records loaded from YAML.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub notifications: Vec<NotificationRecord>,
    #[serde(default)]
    pub deliveries: Vec<DeliveryRecord>,
}

impl SeedData {
    pub fn load_from_file(filename: &str) -> Result<SeedData, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(filename)?;
        let seed: SeedData = serde_yaml::from_str(&content)?;
        Ok(seed)
    }

    pub fn apply(
        self,
        notifications: &MemoryNotificationStore,
        deliveries: &MemoryDeliveryStore,
    ) {
        for record in self.notifications {
            notifications.insert(record);
        }
        for record in self.deliveries {
            deliveries.insert(record);
        }
    }
}
