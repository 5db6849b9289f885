// src/domain/entities/interaction.rs
use serde::{Deserialize, Serialize};

/// Payload carried inside an inbound interaction, echoing the submit-action
/// data of the delivered card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionData {
    /// The notification id the interaction refers to.
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionAction {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub title: String,
    pub verb: String,
    pub data: InteractionData,
}

/// The inbound interaction payload dispatched by the external transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPayload {
    pub action: InteractionAction,
    #[serde(default)]
    pub trigger: String,
}

impl InteractionPayload {
    /// Convenience constructor for the single recognized verb shape.
    pub fn acknowledge(notification_id: impl Into<String>) -> Self {
        Self {
            action: InteractionAction {
                kind: "Action.Execute".to_string(),
                title: "Acknowledge".to_string(),
                verb: "acknowledge".to_string(),
                data: InteractionData {
                    action: notification_id.into(),
                },
            },
            trigger: "manual".to_string(),
        }
    }
}
