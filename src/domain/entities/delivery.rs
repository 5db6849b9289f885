// src/domain/entities/delivery.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-recipient click history for one button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEntry {
    pub count: u64,
    pub last_clicked_at: DateTime<Utc>,
}

/// One record per (notification, recipient) pair, created by the external
/// delivery pipeline at send time. Mutated only through the click tracker's
/// per-recipient path; never deleted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub notification_id: String,
    pub recipient_id: String,
    #[serde(default)]
    pub acknowledge_status: bool,
    /// Set if and only if `acknowledge_status` is true. First acknowledge
    /// wins; subsequent interactions never move it.
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub click_history: BTreeMap<String, ClickEntry>,
}

impl DeliveryRecord {
    pub fn new(notification_id: impl Into<String>, recipient_id: impl Into<String>) -> Self {
        Self {
            notification_id: notification_id.into(),
            recipient_id: recipient_id.into(),
            acknowledge_status: false,
            acknowledged_at: None,
            click_history: BTreeMap::new(),
        }
    }
}
