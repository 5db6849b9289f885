// src/domain/entities/notification.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record per broadcast notification. Created by the external
/// composition flow; read by the card renderer; only the aggregate click
/// counters are mutated here, and only through the click tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_link: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub button_title: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    /// JSON-encoded list of additional `{title, url}` buttons.
    #[serde(default)]
    pub buttons_json: Option<String>,
    /// Tracking-pixel URL template; placeholders are substituted by an
    /// external collaborator, never here.
    #[serde(default)]
    pub tracking_url: Option<String>,
    #[serde(default)]
    pub channel_image: Option<String>,
    #[serde(default)]
    pub channel_title: Option<String>,
    /// Whether recipients may acknowledge this notification.
    #[serde(default)]
    pub ack_capable: bool,
    /// Accent color level name; unknown names resolve to the default level.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_important: bool,
    /// Cross-recipient click counts, keyed by button name. Counts never
    /// decrease; keys are exactly the button names ever clicked.
    #[serde(default)]
    pub button_clicks: BTreeMap<String, u64>,
}

impl NotificationRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_link: None,
            summary: None,
            author: None,
            button_title: None,
            button_link: None,
            buttons_json: None,
            tracking_url: None,
            channel_image: None,
            channel_title: None,
            ack_capable: false,
            color: String::new(),
            is_important: false,
            button_clicks: BTreeMap::new(),
        }
    }
}
