use serde::{Deserialize, Serialize};

/// One classified, renderable unit derived from one line of analysis text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DisplayBlock {
    /// A numbered heading such as "1. Coin Identification:".
    SectionHeader { title: String },
    /// A "- Label: Value" line.
    LabeledField { label: String, value: String },
    /// A plain "- text" line with no colon.
    BulletItem { text: String },
    /// Anything else.
    Paragraph { text: String },
}

impl DisplayBlock {
    pub fn header(title: impl Into<String>) -> Self {
        Self::SectionHeader { title: title.into() }
    }

    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self::LabeledField { label: label.into(), value: value.into() }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        Self::BulletItem { text: text.into() }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }
}
