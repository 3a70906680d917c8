//! Output types and their alteration fallback chains.

use std::fmt;
use std::str::FromStr;

use stepdoc_transform::TransformFormat;

use crate::StepModuleError;

/// Per-format alteration variant a module may implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlterVariant {
    /// EVA-specific document tier.
    EvaDocx,
    /// Generic document tier.
    Docx,
    /// EVA-specific markup tier.
    EvaHtml,
    /// Generic markup tier.
    Html,
    /// UI-component tree.
    React,
    /// Plain text. Every module implements it.
    Base,
}

impl AlterVariant {
    /// Variant name as used in logs and errors.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EvaDocx => "EvaDocx",
            Self::Docx => "Docx",
            Self::EvaHtml => "EvaHtml",
            Self::Html => "Html",
            Self::React => "React",
            Self::Base => "Base",
        }
    }

    /// Transform format family this variant renders into.
    #[must_use]
    pub fn family(self) -> TransformFormat {
        match self {
            Self::EvaDocx | Self::Docx => TransformFormat::Docx,
            Self::EvaHtml | Self::Html => TransformFormat::Html,
            Self::React => TransformFormat::React,
            Self::Base => TransformFormat::Text,
        }
    }
}

impl fmt::Display for AlterVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output type requested by a render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Plain text.
    Text,
    /// Display markup.
    Html,
    /// EVA display markup.
    EvaHtml,
    /// Word-processing document.
    Docx,
    /// EVA word-processing document.
    EvaDocx,
    /// UI-component tree.
    React,
}

impl OutputType {
    /// All output types.
    pub const ALL: [Self; 6] = [
        Self::Text,
        Self::Html,
        Self::EvaHtml,
        Self::Docx,
        Self::EvaDocx,
        Self::React,
    ];

    /// Name used by callers and configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::EvaHtml => "evaHtml",
            Self::Docx => "docx",
            Self::EvaDocx => "evaDocx",
            Self::React => "react",
        }
    }

    /// Variants to try, most specific first. Always ends in [`AlterVariant::Base`].
    #[must_use]
    pub fn fallback_chain(self) -> &'static [AlterVariant] {
        use AlterVariant::{Base, Docx, EvaDocx, EvaHtml, Html, React};

        match self {
            Self::Text => &[Base],
            Self::Html => &[Html, Base],
            Self::EvaHtml => &[EvaHtml, Html, Base],
            Self::Docx => &[Docx, Base],
            Self::EvaDocx => &[EvaDocx, Docx, Base],
            Self::React => &[React, Base],
        }
    }

    /// Transform format of the most specific variant in the chain.
    #[must_use]
    pub fn family(self) -> TransformFormat {
        self.fallback_chain()
            .first()
            .map_or(TransformFormat::Text, |variant| variant.family())
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = StepModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|output| output.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StepModuleError::UnsupportedOutputType(s.to_owned()))
    }
}

/// Fallback chain for an output type name; empty for unknown names.
#[must_use]
pub fn fallback_chain(output_type: &str) -> &'static [AlterVariant] {
    output_type
        .parse::<OutputType>()
        .map(OutputType::fallback_chain)
        .unwrap_or_default()
}
