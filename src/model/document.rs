//! Export input and assembled output.

use super::locale::Locale;
use super::node::StyledNode;
use super::section::Section;
use super::title::{DocumentStyle, TitleFields};

/// Everything the generator and the UI hand over for one export.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExportRequest {
    #[cfg_attr(feature = "serde", serde(alias = "title_page"))]
    pub fields: TitleFields,
    pub sections: Vec<Section>,
    pub style: DocumentStyle,
    /// Overrides the configured locale when set.
    pub locale: Option<Locale>,
}

impl ExportRequest {
    pub fn new(fields: TitleFields) -> Self {
        Self {
            fields,
            ..Default::default()
        }
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_style(mut self, style: DocumentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }
}

/// A fully assembled document, ready for serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub author: String,
    /// BCP 47 language tag.
    pub language: String,
    pub nodes: Vec<StyledNode>,
}

impl Document {
    /// Headings in document order.
    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            StyledNode::Heading(h) => Some(h.text.as_str()),
            _ => None,
        })
    }

    /// Text of every paragraph node, in order.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                StyledNode::Paragraph(p) => Some(p.text()),
                _ => None,
            })
            .collect()
    }
}
