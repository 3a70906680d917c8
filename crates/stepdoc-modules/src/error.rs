//! Error types for step modules.

use stepdoc_transform::TransformError;

/// Error from directive parsing, validation or alteration dispatch.
///
/// Messages name the directive key, the offending value and the table or
/// category it was checked against, since they are shown to procedure
/// authors as-is.
#[derive(Debug, thiserror::Error)]
pub enum StepModuleError {
    /// Positional or named value not in its domain table.
    #[error("{key}: invalid {category} value \"{value}\" (expected one of: {expected})")]
    InvalidValue {
        /// Directive key.
        key: &'static str,
        /// Setting category (e.g. "clock").
        category: &'static str,
        /// Offending value.
        value: String,
        /// Comma-separated legal values.
        expected: String,
    },

    /// Worksite interface identifier not recognized.
    #[error(
        "{key}: invalid WIF \"{value}\" (expected \"SSRMS\" or \"<location> WIF <1-99>\" with location one of: {locations})"
    )]
    InvalidWif {
        /// Directive key.
        key: &'static str,
        /// Offending value.
        value: String,
        /// Comma-separated legal locations.
        locations: String,
    },

    /// Socket given twice (third and fourth positional argument).
    #[error("{key}: socket already set to \"{existing}\", cannot also set \"{value}\"")]
    DuplicateSocket {
        /// Directive key.
        key: &'static str,
        /// Socket assigned first.
        existing: String,
        /// Second socket value.
        value: String,
    },

    /// Required argument absent or empty.
    #[error("{key}: missing {category}")]
    MissingArgument {
        /// Directive key.
        key: &'static str,
        /// Missing setting category.
        category: &'static str,
    },

    /// More positional arguments than the directive accepts.
    #[error("{key}: expected at most {max} arguments, got {count} in \"{raw}\"")]
    TooManyArguments {
        /// Directive key.
        key: &'static str,
        /// Maximum argument count.
        max: usize,
        /// Actual argument count.
        count: usize,
        /// Raw directive value.
        raw: String,
    },

    /// Directive shape is wrong (bad YAML type, unknown field, ...).
    #[error("{key}: {reason}")]
    InvalidDirective {
        /// Directive key (as written).
        key: String,
        /// What is wrong.
        reason: String,
    },

    /// No module is registered for the key.
    #[error("unknown directive \"{0}\"")]
    UnknownDirective(String),

    /// Alteration type is not APPEND, PREPEND or OVERWRITE.
    #[error("unsupported alteration type \"{0}\" (expected one of: APPEND, PREPEND, OVERWRITE)")]
    UnsupportedAlterationType(String),

    /// Output type name not recognized.
    #[error(
        "unsupported output type \"{0}\" (expected one of: text, html, evaHtml, docx, evaDocx, react)"
    )]
    UnsupportedOutputType(String),

    /// Transform engine could not be created.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// No variant in the resolved fallback chain is implemented.
    #[error("{key}: no alteration variant implemented for output type \"{output_type}\" (tried: {tried})")]
    NoAlterationVariant {
        /// Directive key.
        key: &'static str,
        /// Requested output type.
        output_type: String,
        /// Variants tried, in order.
        tried: String,
    },

    /// `transform` called before an output type was resolved.
    #[error("{key}: transform requested before an output type was resolved")]
    ChainNotResolved {
        /// Directive key.
        key: &'static str,
    },

    /// Module declares a component view but no renderer is registered.
    #[error("{key}: no component renderer registered")]
    MissingComponentRenderer {
        /// Directive key.
        key: &'static str,
    },
}

impl StepModuleError {
    /// Whether this error signals a defect in a module or registry rather
    /// than invalid authoring input.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NoAlterationVariant { .. }
                | Self::ChainNotResolved { .. }
                | Self::MissingComponentRenderer { .. }
        )
    }
}

/// Comma-separated list of legal values for error messages.
pub(crate) fn expected_list(values: &[&str]) -> String {
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err = StepModuleError::InvalidValue {
            key: "apfr.install",
            category: "clock",
            value: "13".to_owned(),
            expected: expected_list(&["1", "2"]),
        };
        assert_eq!(
            err.to_string(),
            r#"apfr.install: invalid clock value "13" (expected one of: 1, 2)"#
        );
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_configuration_errors() {
        assert!(StepModuleError::ChainNotResolved { key: "pgt.set" }.is_configuration());
        assert!(StepModuleError::MissingComponentRenderer { key: "pgt.set" }.is_configuration());
        assert!(!StepModuleError::UnknownDirective("x".to_owned()).is_configuration());
    }
}
