//! Output format families understood by the transform engine.

use std::fmt;
use std::str::FromStr;

use crate::TransformError;

/// Format a [`TextTransform`](crate::TextTransform) is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformFormat {
    /// Plain text. Tokens become their glyphs, keywords stay as written.
    Text,
    /// Styled markup for screen display.
    Html,
    /// Word-processing document runs.
    Docx,
    /// UI-component element tree.
    React,
}

impl TransformFormat {
    /// All supported formats.
    pub const ALL: [Self; 4] = [Self::Text, Self::Html, Self::Docx, Self::React];

    /// Lowercase name used in configuration and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::Docx => "docx",
            Self::React => "react",
        }
    }
}

impl fmt::Display for TransformFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TransformError::UnsupportedFormat(s.to_owned()))
    }
}
