//! Raw directives as read from a step definition.
//!
//! A directive is a single-key YAML mapping. Its value is either a scalar of
//! comma-delimited positional arguments or a mapping of named arguments:
//!
//! ```yaml
//! pgt.set: B7, CW2, 2.5
//! apfr.install:
//!   wif: SSRMS
//!   setting: 6, PP, F, 6
//! ```

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::StepModuleError;
use crate::error::expected_list;

/// Raw directive value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Comma-delimited positional arguments.
    Scalar(String),
    /// Named arguments. Non-string YAML scalars are stringified.
    Mapping(BTreeMap<String, String>),
}

impl DirectiveValue {
    /// Convert a YAML value into a directive value.
    ///
    /// # Errors
    ///
    /// Returns [`StepModuleError::InvalidDirective`] for sequences, nested
    /// mappings or non-string mapping keys.
    pub fn from_yaml(key: &str, value: &Value) -> Result<Self, StepModuleError> {
        if let Some(scalar) = scalar_to_string(value) {
            return Ok(Self::Scalar(scalar));
        }

        let Value::Mapping(mapping) = value else {
            return Err(invalid(key, "value must be a string or a mapping"));
        };

        let mut named = BTreeMap::new();
        for (name, value) in mapping {
            let Value::String(name) = name else {
                return Err(invalid(key, "argument names must be strings"));
            };
            let value = scalar_to_string(value)
                .ok_or_else(|| invalid(key, &format!("argument \"{name}\" must be a scalar")))?;
            named.insert(name.clone(), value);
        }
        Ok(Self::Mapping(named))
    }

    /// Convert back into YAML.
    #[must_use]
    pub fn to_yaml(&self) -> Value {
        match self {
            Self::Scalar(s) => Value::String(s.clone()),
            Self::Mapping(named) => Value::Mapping(
                named
                    .iter()
                    .map(|(k, v)| (Value::String(k.clone()), Value::String(v.clone())))
                    .collect(),
            ),
        }
    }
}

/// A keyed directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// Directive key (e.g. `apfr.install`).
    pub key: String,
    /// Raw value.
    pub value: DirectiveValue,
}

impl Directive {
    /// Create a directive.
    #[must_use]
    pub fn new(key: impl Into<String>, value: DirectiveValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Create a directive with a scalar value.
    #[must_use]
    pub fn scalar(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, DirectiveValue::Scalar(value.into()))
    }

    /// Create a directive with named arguments.
    #[must_use]
    pub fn mapping<K, V>(key: impl Into<String>, args: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let named = args
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(key, DirectiveValue::Mapping(named))
    }

    /// Parse a directive from a single-key YAML mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StepModuleError::InvalidDirective`] if `value` is not a
    /// mapping with exactly one string key, or the value has the wrong shape.
    pub fn from_yaml(value: &Value) -> Result<Self, StepModuleError> {
        let Value::Mapping(mapping) = value else {
            return Err(invalid("directive", "must be a mapping"));
        };
        let mut iter = mapping.iter();
        let (Some((Value::String(key), raw)), None) = (iter.next(), iter.next()) else {
            return Err(invalid(
                "directive",
                "must be a mapping with exactly one string key",
            ));
        };
        Ok(Self::new(key.clone(), DirectiveValue::from_yaml(key, raw)?))
    }

    /// Parse a directive from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`StepModuleError::InvalidDirective`] if the YAML is malformed
    /// or the directive has the wrong shape.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StepModuleError> {
        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| invalid("directive", &format!("invalid YAML: {e}")))?;
        Self::from_yaml(&value)
    }

    /// Convert into a single-key YAML mapping.
    #[must_use]
    pub fn to_yaml(&self) -> Value {
        let mut mapping = Mapping::new();
        mapping.insert(Value::String(self.key.clone()), self.value.to_yaml());
        Value::Mapping(mapping)
    }
}

/// Split a positional argument string.
///
/// Surrounding `[...]` decoration is removed, then the value is split on
/// commas and each component trimmed. Empty components are kept so callers
/// can tell `"B7, CW2, "` apart from `"B7, CW2"`.
pub(crate) fn split_positional(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner.split(',').map(str::trim).collect()
}

/// Read named arguments, rejecting any name outside `allowed`.
pub(crate) fn check_named_args(
    key: &'static str,
    named: &BTreeMap<String, String>,
    allowed: &[&str],
) -> Result<(), StepModuleError> {
    if let Some(unknown) = named.keys().find(|name| !allowed.contains(&name.as_str())) {
        return Err(invalid(
            key,
            &format!(
                "unknown argument \"{unknown}\" (expected: {})",
                allowed.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Check `value` against a domain table.
pub(crate) fn validate_choice(
    key: &'static str,
    category: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<String, StepModuleError> {
    if allowed.contains(&value) {
        Ok(value.to_owned())
    } else {
        Err(StepModuleError::InvalidValue {
            key,
            category,
            value: value.to_owned(),
            expected: expected_list(allowed),
        })
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn invalid(key: &str, reason: &str) -> StepModuleError {
    StepModuleError::InvalidDirective {
        key: key.to_owned(),
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scalar_directive() {
        let directive = Directive::from_yaml_str("pgt.set: B7, CW2, 2.5").unwrap();
        assert_eq!(directive, Directive::scalar("pgt.set", "B7, CW2, 2.5"));
    }

    #[test]
    fn test_mapping_directive_stringifies_numbers() {
        let directive =
            Directive::from_yaml_str("pgt.set:\n  torqueCollar: B7\n  mtlCollar: 2.5\n").unwrap();
        let DirectiveValue::Mapping(named) = directive.value else {
            panic!("expected mapping");
        };
        assert_eq!(named.get("torqueCollar").map(String::as_str), Some("B7"));
        assert_eq!(named.get("mtlCollar").map(String::as_str), Some("2.5"));
    }

    #[test]
    fn test_null_value_is_empty_scalar() {
        let directive = Directive::from_yaml_str("pgt.set:").unwrap();
        assert_eq!(directive.value, DirectiveValue::Scalar(String::new()));
    }

    #[test]
    fn test_multiple_keys_rejected() {
        let err = Directive::from_yaml_str("a: 1\nb: 2").unwrap_err();
        assert!(matches!(err, StepModuleError::InvalidDirective { .. }));
    }

    #[test]
    fn test_sequence_value_rejected() {
        let err = Directive::from_yaml_str("pgt.set: [B7, CW2]").unwrap_err();
        assert!(err.to_string().contains("pgt.set"));
    }

    #[test]
    fn test_nested_mapping_rejected() {
        let err = Directive::from_yaml_str("apfr.install:\n  wif:\n    a: b\n").unwrap_err();
        assert!(err.to_string().contains("\"wif\""));
    }

    #[test]
    fn test_yaml_round_trip() {
        let directive = Directive::mapping("apfr.install", [("wif", "SSRMS"), ("setting", "6,PP,F,6")]);
        let reparsed = Directive::from_yaml(&directive.to_yaml()).unwrap();
        assert_eq!(reparsed, directive);
    }

    #[test]
    fn test_split_positional() {
        assert_eq!(split_positional(" 6, PP ,F,6 "), vec!["6", "PP", "F", "6"]);
        assert_eq!(split_positional("[6,PP,F,6]"), vec!["6", "PP", "F", "6"]);
        assert_eq!(split_positional("B7, CW2, "), vec!["B7", "CW2", ""]);
        assert_eq!(split_positional(""), vec![""]);
    }

    #[test]
    fn test_check_named_args() {
        let named: BTreeMap<String, String> =
            [("wif".to_owned(), "SSRMS".to_owned()), ("foo".to_owned(), "x".to_owned())].into();
        let err = check_named_args("apfr.install", &named, &["wif", "setting"]).unwrap_err();
        assert!(err.to_string().contains("\"foo\""));
    }
}
