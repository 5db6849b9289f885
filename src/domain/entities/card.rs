// src/domain/entities/card.rs
use serde::{Deserialize, Serialize};

/// Content type identifying an invoke-response payload as a rendered card.
pub const CARD_CONTENT_TYPE: &str = "application/vnd.card.adaptive";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextSize {
    Small,
    Default,
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextWeight {
    Lighter,
    Bolder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextColor {
    Attention,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Spacing {
    Small,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSize {
    Small,
    Stretch,
}

/// One node of the rendered card tree. The tree is produced fresh on every
/// render call and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardNode {
    Container {
        style: String,
        #[serde(rename = "backgroundImage")]
        background_image: String,
        items: Vec<CardNode>,
    },
    ColumnSet {
        columns: Vec<CardNode>,
    },
    Column {
        #[serde(default)]
        separator: bool,
        items: Vec<CardNode>,
    },
    TextBlock {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<TextSize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<TextWeight>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<TextColor>,
        #[serde(default)]
        wrap: bool,
        #[serde(default)]
        separator: bool,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        spacing: Option<Spacing>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<ImageSize>,
        #[serde(
            rename = "isVisible",
            default = "default_visible",
            skip_serializing_if = "is_true"
        )]
        is_visible: bool,
        #[serde(rename = "altText", default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
    },
}

fn default_visible() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_true(v: &bool) -> bool {
    *v
}

/// Payload attached to the submit action; the external transport echoes it
/// back inside the inbound interaction payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionData {
    pub action: String,
}

/// A top-level card action: open-link actions plus at most one submit
/// action per card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardAction {
    #[serde(rename = "Action.OpenUrl")]
    OpenUrl { title: String, url: String },
    #[serde(rename = "Action.Execute")]
    Execute {
        title: String,
        verb: String,
        data: ActionData,
    },
}

/// The ephemeral rendered output: an ordered tree of typed nodes plus the
/// top-level actions list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDocument {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub body: Vec<CardNode>,
    pub actions: Vec<CardAction>,
}

impl CardDocument {
    pub fn new(body: Vec<CardNode>, actions: Vec<CardAction>) -> Self {
        Self {
            kind: "AdaptiveCard".to_string(),
            version: "1.4".to_string(),
            body,
            actions,
        }
    }
}

/// Response returned to the initiating recipient after a handled
/// interaction, carrying the freshly rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: CardDocument,
}

impl InvokeResponse {
    pub fn ok(card: CardDocument) -> Self {
        Self {
            status_code: 200,
            content_type: CARD_CONTENT_TYPE.to_string(),
            value: card,
        }
    }
}
