//! Card rendering.
//!
//! A card is a title, some content, an optional icon and severity, and a body
//! made of typed segments. Cards deserialize from the JSON shape services
//! return:
//!
//! ```json
//! {
//!   "title": "Sample Card",
//!   "content": "This is a sample content.",
//!   "icon": "path/to/icon.png",
//!   "severity": "high",
//!   "body": [
//!     { "type": "keyValuePairs", "data": [{ "key": "Age", "value": 30 }] },
//!     { "type": "separator" },
//!     { "type": "badge", "text": "new" }
//!   ]
//! }
//! ```

use super::escape_html;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Write};

/// One key/value pair of a [`CardSegment::KeyValuePairs`] segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Label.
    pub key: String,
    /// Value; strings render as-is, anything else as JSON.
    pub value: Value,
}

impl KeyValue {
    /// Create a pair.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A typed piece of a card body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardSegment {
    /// A comma-separated run of `key: value` pairs.
    KeyValuePairs {
        /// The pairs, in display order.
        data: Vec<KeyValue>,
    },
    /// A horizontal rule.
    Separator,
    /// A paragraph of text.
    Text {
        /// Paragraph text.
        text: String,
    },
    /// An image.
    Image {
        /// Image source.
        src: String,
        /// Alternative text.
        #[serde(default)]
        alt: String,
    },
    /// A hyperlink.
    Link {
        /// Link target.
        href: String,
        /// Link text.
        text: String,
    },
    /// A small label.
    Badge {
        /// Badge text.
        text: String,
        /// Optional style variant, rendered as `badge-<variant>`.
        #[serde(default)]
        variant: Option<String>,
    },
}

impl CardSegment {
    fn render_into(&self, out: &mut String) -> fmt::Result {
        match self {
            CardSegment::KeyValuePairs { data } => {
                out.push_str("<div class=\"keyValuePairs\">");
                for (i, pair) in data.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let value = match &pair.value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    write!(
                        out,
                        "<span class=\"key\">{}</span>: <span class=\"value\">{}</span>",
                        escape_html(&pair.key),
                        escape_html(&value)
                    )?;
                }
                out.push_str("</div>");
            }
            CardSegment::Separator => out.push_str("<hr>"),
            CardSegment::Text { text } => write!(out, "<p class=\"text\">{}</p>", escape_html(text))?,
            CardSegment::Image { src, alt } => write!(
                out,
                "<img src=\"{}\" alt=\"{}\" class=\"card-image\">",
                escape_html(src),
                escape_html(alt)
            )?,
            CardSegment::Link { href, text } => write!(
                out,
                "<a href=\"{}\" class=\"card-link\">{}</a>",
                escape_html(href),
                escape_html(text)
            )?,
            CardSegment::Badge { text, variant } => {
                let class = match variant {
                    Some(v) => format!("badge badge-{}", escape_html(v)),
                    None => "badge".to_owned(),
                };
                write!(out, "<span class=\"{class}\">{}</span>", escape_html(text))?;
            }
        }
        Ok(())
    }
}

/// A card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Card {
    /// Heading.
    pub title: String,
    /// Lead paragraph.
    #[serde(default)]
    pub content: String,
    /// Icon source.
    #[serde(default)]
    pub icon: Option<String>,
    /// Severity, added as a class on the card.
    #[serde(default)]
    pub severity: Option<String>,
    /// Body segments.
    #[serde(default)]
    pub body: Vec<CardSegment>,
}

impl Card {
    /// Create a card with a title and content and an empty body.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the severity.
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Append a body segment.
    pub fn with_segment(mut self, segment: CardSegment) -> Self {
        self.body.push(segment);
        self
    }

    /// Render the card as HTML.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = escape_html(&self.title);
        match &self.severity {
            Some(severity) => write!(f, "<div class=\"card {}\">", escape_html(severity))?,
            None => f.write_str("<div class=\"card\">")?,
        }
        if let Some(icon) = &self.icon {
            write!(
                f,
                "<img src=\"{}\" alt=\"{title} icon\" class=\"card-icon\">",
                escape_html(icon)
            )?;
        }
        write!(f, "<h2>{title}</h2><p>{}</p>", escape_html(&self.content))?;

        let mut body = String::new();
        for segment in &self.body {
            segment.render_into(&mut body)?;
        }
        write!(f, "<div class=\"card-body\">{body}</div></div>")
    }
}

/// Draws cards into a container, in order.
#[derive(Debug, Clone)]
pub struct CardDrawer {
    container_id: String,
    cards: Vec<String>,
}

impl CardDrawer {
    /// Create a drawer for the container element `container_id`.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            cards: Vec::new(),
        }
    }

    /// Append `card` to the container.
    pub fn draw(&mut self, card: &Card) {
        self.cards.push(card.render());
    }

    /// Number of cards drawn.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether no card has been drawn.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The container and every drawn card as HTML.
    pub fn html(&self) -> String {
        format!(
            "<div id=\"{}\">{}</div>",
            escape_html(&self.container_id),
            self.cards.concat()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_minimal_card() {
        let card = Card::new("Title", "Content");
        assert_eq!(
            card.render(),
            "<div class=\"card\"><h2>Title</h2><p>Content</p><div class=\"card-body\"></div></div>"
        );
    }

    #[test]
    fn test_render_every_segment() {
        let card = Card::new("Sample", "Body")
            .with_icon("icon.png")
            .with_severity("high")
            .with_segment(CardSegment::KeyValuePairs {
                data: vec![KeyValue::new("Age", 30), KeyValue::new("Gender", "Male")],
            })
            .with_segment(CardSegment::Separator)
            .with_segment(CardSegment::Text {
                text: "Note".into(),
            })
            .with_segment(CardSegment::Image {
                src: "a.png".into(),
                alt: "A".into(),
            })
            .with_segment(CardSegment::Link {
                href: "/x".into(),
                text: "More".into(),
            })
            .with_segment(CardSegment::Badge {
                text: "new".into(),
                variant: Some("info".into()),
            });

        assert_eq!(
            card.render(),
            concat!(
                "<div class=\"card high\">",
                "<img src=\"icon.png\" alt=\"Sample icon\" class=\"card-icon\">",
                "<h2>Sample</h2><p>Body</p><div class=\"card-body\">",
                "<div class=\"keyValuePairs\"><span class=\"key\">Age</span>: <span class=\"value\">30</span>, ",
                "<span class=\"key\">Gender</span>: <span class=\"value\">Male</span></div>",
                "<hr>",
                "<p class=\"text\">Note</p>",
                "<img src=\"a.png\" alt=\"A\" class=\"card-image\">",
                "<a href=\"/x\" class=\"card-link\">More</a>",
                "<span class=\"badge badge-info\">new</span>",
                "</div></div>"
            )
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let card = Card::new("<script>", "a & b");
        let html = card.render();
        assert!(html.contains("<h2>&lt;script&gt;</h2>"));
        assert!(html.contains("<p>a &amp; b</p>"));
    }

    #[test]
    fn test_deserialize_json_shape() {
        let card: Card = serde_json::from_str(
            r#"{
                "title": "Sample Card",
                "content": "This is a sample content.",
                "severity": "high",
                "body": [
                    { "type": "keyValuePairs", "data": [{ "key": "Age", "value": 30 }] },
                    { "type": "separator" },
                    { "type": "badge", "text": "new" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(card.body.len(), 3);
        assert_eq!(card.body[1], CardSegment::Separator);
        assert_eq!(
            card.body[2],
            CardSegment::Badge {
                text: "new".into(),
                variant: None
            }
        );
        assert!(card.icon.is_none());
    }

    #[test]
    fn test_drawer_appends_cards() {
        let mut drawer = CardDrawer::new("cards");
        assert!(drawer.is_empty());
        drawer.draw(&Card::new("A", ""));
        drawer.draw(&Card::new("B", ""));

        assert_eq!(drawer.len(), 2);
        let html = drawer.html();
        assert!(html.starts_with("<div id=\"cards\"><div class=\"card\"><h2>A</h2>"));
        assert!(html.find("<h2>A</h2>") < html.find("<h2>B</h2>"));
    }
}
