//! Alteration descriptors returned by step modules.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use stepdoc_transform::Segment;

use crate::StepModuleError;

/// How an alteration's content merges into a step's existing content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlterationType {
    /// Add after existing content.
    Append,
    /// Add before existing content.
    Prepend,
    /// Replace existing content.
    Overwrite,
}

impl AlterationType {
    /// Uppercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Append => "APPEND",
            Self::Prepend => "PREPEND",
            Self::Overwrite => "OVERWRITE",
        }
    }
}

impl fmt::Display for AlterationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlterationType {
    type Err = StepModuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Append, Self::Prepend, Self::Overwrite]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StepModuleError::UnsupportedAlterationType(s.to_owned()))
    }
}

/// Content accepted by [`Alteration::new`]: a single segment or a sequence.
///
/// Scalars are coerced into a one-element sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlterationContent(Vec<Segment>);

impl From<Vec<Segment>> for AlterationContent {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl From<Segment> for AlterationContent {
    fn from(segment: Segment) -> Self {
        Self(vec![segment])
    }
}

impl From<String> for AlterationContent {
    fn from(text: String) -> Self {
        Self(vec![Segment::Literal(text)])
    }
}

impl From<&str> for AlterationContent {
    fn from(text: &str) -> Self {
        Self(vec![Segment::literal(text)])
    }
}

/// Canonical `{content, type}` result of a step module alteration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alteration {
    content: Vec<Segment>,
    #[serde(rename = "type")]
    kind: AlterationType,
}

impl Alteration {
    /// Build an alteration from a typed kind.
    #[must_use]
    pub fn new(kind: AlterationType, content: impl Into<AlterationContent>) -> Self {
        Self {
            content: content.into().0,
            kind,
        }
    }

    /// Content sequence.
    #[must_use]
    pub fn content(&self) -> &[Segment] {
        &self.content
    }

    /// Merge policy.
    #[must_use]
    pub fn kind(&self) -> AlterationType {
        self.kind
    }

    /// Content flattened to plain text.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.content.iter().map(Segment::plain_text).collect()
    }

    /// Merge this alteration into existing step content.
    pub fn apply_to(&self, existing: &mut Vec<Segment>) {
        match self.kind {
            AlterationType::Append => existing.extend(self.content.iter().cloned()),
            AlterationType::Prepend => {
                existing.splice(0..0, self.content.iter().cloned());
            }
            AlterationType::Overwrite => existing.clone_from(&self.content),
        }
    }
}

/// Build an alteration from an untyped kind name.
///
/// `kind` is matched case-insensitively against `APPEND`, `PREPEND` and
/// `OVERWRITE`.
///
/// # Errors
///
/// Returns [`StepModuleError::UnsupportedAlterationType`] for any other kind.
///
/// # Example
///
/// ```
/// use stepdoc_modules::{AlterationType, format_step_mod_alterations};
///
/// let alteration = format_step_mod_alterations("append", "Install APFR").unwrap();
/// assert_eq!(alteration.kind(), AlterationType::Append);
/// assert_eq!(alteration.content().len(), 1);
/// ```
pub fn format_step_mod_alterations(
    kind: &str,
    content: impl Into<AlterationContent>,
) -> Result<Alteration, StepModuleError> {
    Ok(Alteration::new(kind.parse()?, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("APPEND".parse::<AlterationType>().unwrap(), AlterationType::Append);
        assert_eq!("prepend".parse::<AlterationType>().unwrap(), AlterationType::Prepend);
        assert_eq!("Overwrite".parse::<AlterationType>().unwrap(), AlterationType::Overwrite);
    }

    #[test]
    fn test_unsupported_kind() {
        let err = format_step_mod_alterations("INSERT", "x").unwrap_err();
        assert!(matches!(err, StepModuleError::UnsupportedAlterationType(ref k) if k == "INSERT"));
    }

    #[test]
    fn test_scalar_coerced_to_sequence() {
        let alteration = format_step_mod_alterations("APPEND", "line").unwrap();
        assert_eq!(alteration.content(), &[Segment::literal("line")]);
    }

    #[test]
    fn test_empty_content() {
        let alteration = Alteration::new(AlterationType::Overwrite, Vec::new());
        assert!(alteration.content().is_empty());
    }

    #[test]
    fn test_apply_append() {
        let mut existing = vec![Segment::literal("a")];
        Alteration::new(AlterationType::Append, "b").apply_to(&mut existing);
        assert_eq!(existing, vec![Segment::literal("a"), Segment::literal("b")]);
    }

    #[test]
    fn test_apply_prepend() {
        let mut existing = vec![Segment::literal("a")];
        Alteration::new(
            AlterationType::Prepend,
            vec![Segment::literal("x"), Segment::literal("y")],
        )
        .apply_to(&mut existing);
        assert_eq!(
            existing,
            vec![Segment::literal("x"), Segment::literal("y"), Segment::literal("a")]
        );
    }

    #[test]
    fn test_apply_overwrite() {
        let mut existing = vec![Segment::literal("a"), Segment::literal("b")];
        Alteration::new(AlterationType::Overwrite, "c").apply_to(&mut existing);
        assert_eq!(existing, vec![Segment::literal("c")]);
    }

    #[test]
    fn test_serialize() {
        let alteration = Alteration::new(AlterationType::Prepend, "PGT [B7, CW2]");
        assert_eq!(
            serde_json::to_value(&alteration).unwrap(),
            serde_json::json!({"content": ["PGT [B7, CW2]"], "type": "PREPEND"})
        );
    }
}
