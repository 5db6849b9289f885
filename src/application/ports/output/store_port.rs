// src/application/ports/output/store_port.rs
/*
Store Output Ports

Narrow interfaces over the external storage engine. The backing store offers
no native atomic increment for the structures we mutate, so both ports expose
a versioned read plus a conditional write: callers re-read, re-apply their
delta, and write back against the version they read. A conflicting writer
surfaces as `StoreError::Conflict` and the caller retries.
*/

use crate::domain::entities::delivery::DeliveryRecord;
use crate::domain::entities::notification::NotificationRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("conditional write lost to a concurrent writer")]
    Conflict,

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A record together with the store version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: u64,
    pub record: T,
}

#[async_trait]
pub trait NotificationStorePort: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<Option<Versioned<NotificationRecord>>, StoreError>;

    /// Write `record` back only if the stored version still equals
    /// `expected_version`.
    async fn update(
        &self,
        id: &str,
        expected_version: u64,
        record: NotificationRecord,
    ) -> Result<(), StoreError>;
}

#[async_trait]
pub trait DeliveryStorePort: Send + Sync {
    async fn fetch(
        &self,
        notification_id: &str,
        recipient_id: &str,
    ) -> Result<Option<Versioned<DeliveryRecord>>, StoreError>;

    async fn update(
        &self,
        notification_id: &str,
        recipient_id: &str,
        expected_version: u64,
        record: DeliveryRecord,
    ) -> Result<(), StoreError>;
}
