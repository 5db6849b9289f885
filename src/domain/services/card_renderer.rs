// src/domain/services/card_renderer.rs
use crate::domain::entities::card::{
    ActionData, CardAction, CardDocument, CardNode, ImageSize, Spacing, TextColor, TextSize,
    TextWeight,
};
use crate::domain::entities::notification::NotificationRecord;
use crate::domain::services::color_table;
use crate::error::RenderError;
use serde::Deserialize;

/// Verb carried by the card's submit action.
pub const ACKNOWLEDGE_VERB: &str = "acknowledge";

const IMPORTANT_MARKER: &str = "IMPORTANT!";
const ACKNOWLEDGED_NOTICE: &str =
    "Thank you for your response. You have acknowledged this message";
const TRACKING_PIXEL_SUFFIX: &str = "/?id=[ID]&key=[KEY]";

/// An entry of the extra-buttons JSON field.
#[derive(Debug, Clone, Deserialize)]
struct LinkButton {
    title: String,
    url: String,
}

fn has_text(value: &Option<String>) -> bool {
    value
        .as_deref()
        .is_some_and(|s| !s.trim().is_empty())
}

/// Builds renderable card documents from notification records. Stateless;
/// identical (record, recipient_acknowledged) inputs always produce
/// byte-identical output, because delivered cards are diffed and replaced
/// against previous renders.
#[derive(Debug, Clone, Default)]
pub struct CardRenderer;

impl CardRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        record: &NotificationRecord,
        recipient_acknowledged: bool,
    ) -> Result<CardDocument, RenderError> {
        // The extra-buttons field is parsed up front: a malformed list is
        // terminal for the whole render call, with no partial document.
        let extra_buttons = self.parse_extra_buttons(record)?;

        let mut items = Vec::new();

        if record.is_important {
            items.push(CardNode::TextBlock {
                text: IMPORTANT_MARKER.to_string(),
                size: Some(TextSize::Small),
                weight: Some(TextWeight::Bolder),
                color: Some(TextColor::Attention),
                wrap: true,
                separator: false,
            });
        }

        if has_text(&record.channel_image) {
            items.push(CardNode::Image {
                url: record.channel_image.clone().unwrap_or_default(),
                spacing: None,
                size: None,
                is_visible: true,
                alt_text: None,
            });
        }

        if has_text(&record.channel_title) {
            items.push(CardNode::TextBlock {
                text: record.channel_title.clone().unwrap_or_default(),
                size: None,
                weight: None,
                color: None,
                wrap: true,
                separator: false,
            });
        }

        items.push(CardNode::TextBlock {
            text: record.title.clone(),
            size: Some(TextSize::ExtraLarge),
            weight: Some(TextWeight::Bolder),
            color: None,
            wrap: true,
            separator: false,
        });

        if has_text(&record.image_link) {
            items.push(CardNode::Image {
                url: record.image_link.clone().unwrap_or_default(),
                spacing: Some(Spacing::Default),
                size: Some(ImageSize::Stretch),
                is_visible: true,
                alt_text: Some(String::new()),
            });
        }

        if has_text(&record.summary) {
            items.push(CardNode::TextBlock {
                text: record.summary.clone().unwrap_or_default(),
                size: None,
                weight: None,
                color: None,
                wrap: true,
                separator: false,
            });
        }

        if has_text(&record.author) {
            items.push(CardNode::TextBlock {
                text: record.author.clone().unwrap_or_default(),
                size: Some(TextSize::Small),
                weight: Some(TextWeight::Lighter),
                color: None,
                wrap: true,
                separator: false,
            });
        }

        if recipient_acknowledged {
            items.push(CardNode::TextBlock {
                text: ACKNOWLEDGED_NOTICE.to_string(),
                size: Some(TextSize::Small),
                weight: Some(TextWeight::Lighter),
                color: Some(TextColor::Good),
                wrap: true,
                separator: false,
            });
        }

        if has_text(&record.tracking_url) {
            // The [ID]/[KEY] placeholders are substituted downstream by an
            // external collaborator; they pass through unresolved here.
            let url = format!(
                "{}{}",
                record.tracking_url.clone().unwrap_or_default(),
                TRACKING_PIXEL_SUFFIX
            );
            items.push(CardNode::Image {
                url,
                spacing: Some(Spacing::Small),
                size: Some(ImageSize::Small),
                is_visible: false,
                alt_text: Some(String::new()),
            });
        }

        let column = CardNode::Column {
            separator: true,
            items,
        };
        let column_set = CardNode::ColumnSet {
            columns: vec![column],
        };
        let container = CardNode::Container {
            style: "emphasis".to_string(),
            background_image: color_table::background_image(&record.color),
            items: vec![column_set],
        };

        let mut actions = Vec::new();

        if has_text(&record.button_title)
            && has_text(&record.button_link)
            && !has_text(&record.buttons_json)
        {
            actions.push(CardAction::OpenUrl {
                title: record.button_title.clone().unwrap_or_default(),
                url: record.button_link.clone().unwrap_or_default(),
            });
        }

        if record.ack_capable && !recipient_acknowledged {
            actions.push(CardAction::Execute {
                title: "Acknowledge".to_string(),
                verb: ACKNOWLEDGE_VERB.to_string(),
                data: ActionData {
                    action: record.id.clone(),
                },
            });
        }

        for button in extra_buttons {
            actions.push(CardAction::OpenUrl {
                title: button.title,
                url: button.url,
            });
        }

        Ok(CardDocument::new(vec![container], actions))
    }

    fn parse_extra_buttons(
        &self,
        record: &NotificationRecord,
    ) -> Result<Vec<LinkButton>, RenderError> {
        match record.buttons_json.as_deref() {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str::<Vec<LinkButton>>(raw)
                .map_err(|_| RenderError::MalformedButtonList),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::card::CardAction;

    fn record() -> NotificationRecord {
        let mut r = NotificationRecord::new("n1", "Policy Update");
        r.summary = Some("Please read the new policy".to_string());
        r.author = Some("HR".to_string());
        r.ack_capable = true;
        r.is_important = true;
        r.color = "High Priority".to_string();
        r
    }

    fn column_items(card: &CardDocument) -> &Vec<CardNode> {
        let CardNode::Container { items, .. } = &card.body[0] else {
            panic!("body root is not a container");
        };
        let CardNode::ColumnSet { columns } = &items[0] else {
            panic!("container does not hold a column set");
        };
        let CardNode::Column { items, .. } = &columns[0] else {
            panic!("column set does not hold a column");
        };
        items
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = CardRenderer::new();
        let r = record();
        let a = serde_json::to_string(&renderer.render(&r, false).unwrap()).unwrap();
        let b = serde_json::to_string(&renderer.render(&r, false).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_block_order() {
        let renderer = CardRenderer::new();
        let mut r = record();
        r.image_link = Some("https://example.com/banner.png".to_string());
        r.tracking_url = Some("https://example.com/pixel".to_string());
        let card = renderer.render(&r, true).unwrap();
        let items = column_items(&card);

        // important marker, title, body image, summary, author, notice, pixel
        assert_eq!(items.len(), 7);
        assert!(matches!(&items[0], CardNode::TextBlock { text, .. } if text == "IMPORTANT!"));
        assert!(matches!(&items[1], CardNode::TextBlock { text, .. } if text == "Policy Update"));
        assert!(matches!(&items[2], CardNode::Image { is_visible: true, .. }));
        assert!(
            matches!(&items[5], CardNode::TextBlock { color: Some(TextColor::Good), .. })
        );
        assert!(matches!(
            &items[6],
            CardNode::Image { url, is_visible: false, .. }
                if url == "https://example.com/pixel/?id=[ID]&key=[KEY]"
        ));
    }

    #[test]
    fn test_submit_action_present_only_before_acknowledgment() {
        let renderer = CardRenderer::new();
        let r = record();

        let before = renderer.render(&r, false).unwrap();
        assert!(matches!(
            &before.actions[0],
            CardAction::Execute { verb, data, .. }
                if verb == "acknowledge" && data.action == "n1"
        ));

        let after = renderer.render(&r, true).unwrap();
        assert!(after.actions.is_empty());
    }

    #[test]
    fn test_single_button_suppressed_when_extras_present() {
        let renderer = CardRenderer::new();
        let mut r = record();
        r.ack_capable = false;
        r.button_title = Some("Learn More".to_string());
        r.button_link = Some("https://example.com".to_string());

        let alone = renderer.render(&r, false).unwrap();
        assert_eq!(
            alone.actions,
            vec![CardAction::OpenUrl {
                title: "Learn More".to_string(),
                url: "https://example.com".to_string(),
            }]
        );

        r.buttons_json = Some(
            r#"[{"title":"Docs","url":"https://example.com/docs"},
                {"title":"FAQ","url":"https://example.com/faq"}]"#
                .to_string(),
        );
        let with_extras = renderer.render(&r, false).unwrap();
        assert_eq!(
            with_extras.actions,
            vec![
                CardAction::OpenUrl {
                    title: "Docs".to_string(),
                    url: "https://example.com/docs".to_string(),
                },
                CardAction::OpenUrl {
                    title: "FAQ".to_string(),
                    url: "https://example.com/faq".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_malformed_button_list_is_terminal() {
        let renderer = CardRenderer::new();
        let mut r = record();
        r.buttons_json = Some("{\"not\":\"a list\"}".to_string());
        assert_eq!(
            renderer.render(&r, false),
            Err(RenderError::MalformedButtonList)
        );
    }

    #[test]
    fn test_unknown_color_renders_default_swatch() {
        let renderer = CardRenderer::new();
        let mut r = record();
        r.color = "Chartreuse".to_string();
        let unknown = renderer.render(&r, false).unwrap();
        r.color = "White".to_string();
        let default = renderer.render(&r, false).unwrap();

        let bg = |card: &CardDocument| -> String {
            let CardNode::Container {
                background_image, ..
            } = &card.body[0]
            else {
                panic!("no container");
            };
            background_image.clone()
        };
        assert_eq!(bg(&unknown), bg(&default));
    }
}
