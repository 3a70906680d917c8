//! Output segments produced by the transform engine and step modules.

use std::collections::BTreeMap;

use serde::Serialize;

/// One piece of transformed content: literal text or a format-native rich object.
///
/// Serializes a literal as a bare JSON string and a rich object as a tagged map,
/// so a sequence reads naturally: `["Install APFR in ", {"type": "run", ...}]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// Literal text, passed through unchanged.
    Literal(String),
    /// Format-native rich object.
    Rich(RichNode),
}

impl Segment {
    /// Create a literal segment.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Create a display markup segment.
    #[must_use]
    pub fn markup(html: impl Into<String>) -> Self {
        Self::Rich(RichNode::Markup { html: html.into() })
    }

    /// Return the literal text, if this is a literal segment.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(text) => Some(text),
            Self::Rich(_) => None,
        }
    }

    /// Whether this is a rich object.
    #[must_use]
    pub fn is_rich(&self) -> bool {
        matches!(self, Self::Rich(_))
    }

    /// Human-readable text of the segment, dropping all styling.
    ///
    /// Markup is returned as written.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Rich(node) => node.plain_text(),
        }
    }
}

impl From<DocxRun> for Segment {
    fn from(run: DocxRun) -> Self {
        Self::Rich(RichNode::Run(run))
    }
}

impl From<Element> for Segment {
    fn from(element: Element) -> Self {
        Self::Rich(RichNode::Element(element))
    }
}

/// Format-native rich object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RichNode {
    /// Word-processing document text run.
    Run(DocxRun),
    /// Styled display markup.
    Markup {
        /// Markup fragment, already escaped.
        html: String,
    },
    /// UI-component element.
    Element(Element),
}

impl RichNode {
    /// Text content without styling.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Run(run) => run.text.clone(),
            Self::Markup { html } => html.clone(),
            Self::Element(element) => element.plain_text(),
        }
    }
}

/// A text run in a word-processing document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocxRun {
    /// Run text.
    pub text: String,
    /// Bold weight.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    /// Font color as a six-digit hex string without `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font family override (used for symbol glyphs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl DocxRun {
    /// Create a plain run.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Make the run bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the font color.
    #[must_use]
    pub fn color(mut self, hex: impl Into<String>) -> Self {
        self.color = Some(hex.into());
        self
    }

    /// Set the font family.
    #[must_use]
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }
}

/// A UI-component element: tag, string props and children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Element or component name (`span`, `ApfrInstall`, ...).
    pub tag: String,
    /// Props, sorted by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    /// Child nodes in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementChild>,
}

impl Element {
    /// Create an element with no props or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Add a prop.
    #[must_use]
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ElementChild::Text(text.into()));
        self
    }

    /// Append an element child.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(ElementChild::Element(child));
        self
    }

    /// Get a prop value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                ElementChild::Text(text) => out.push_str(text),
                ElementChild::Element(element) => out.push_str(&element.plain_text()),
            }
        }
        out
    }
}

/// Child of an [`Element`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ElementChild {
    /// Text node.
    Text(String),
    /// Nested element.
    Element(Element),
}
