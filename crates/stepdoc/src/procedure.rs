//! Procedure files: YAML step lists.
//!
//! A procedure is either a list of steps or a mapping with a `steps` list.
//! A step is a plain string or a mapping holding an optional `text` plus
//! any number of directives:
//!
//! ```yaml
//! steps:
//!   - Egress airlock
//!   - text: "{{CHECK}} Tether attached"
//!     pgt.set: B7, CW2, 2.5
//! ```

use std::path::Path;

use serde_yaml::Value;
use stepdoc_modules::ModuleRegistry;

use crate::error::CliError;

/// Read the steps of a procedure file.
pub(crate) fn read_steps(path: &Path) -> Result<Vec<Value>, CliError> {
    let content = std::fs::read_to_string(path)?;
    parse_steps(&content)
}

/// Parse the steps of a procedure document.
pub(crate) fn parse_steps(yaml: &str) -> Result<Vec<Value>, CliError> {
    let document: Value = serde_yaml::from_str(yaml)?;
    match document {
        Value::Sequence(steps) => Ok(steps),
        Value::Mapping(mut mapping) => match mapping.remove("steps") {
            Some(Value::Sequence(steps)) => Ok(steps),
            _ => Err(CliError::Validation(
                "procedure mapping must contain a `steps` list".to_owned(),
            )),
        },
        Value::Null => Ok(Vec::new()),
        _ => Err(CliError::Validation(
            "procedure must be a list of steps or a mapping with `steps`".to_owned(),
        )),
    }
}

/// Author text of a step: the step itself when it is a string, else its `text` key.
pub(crate) fn step_text(step: &Value) -> Option<&str> {
    match step {
        Value::String(text) => Some(text),
        Value::Mapping(mapping) => mapping.get("text").and_then(Value::as_str),
        _ => None,
    }
}

/// Directive-shaped keys (containing a `.`) that no registered module handles.
pub(crate) fn unhandled_keys<'a>(step: &'a Value, registry: &ModuleRegistry) -> Vec<&'a str> {
    let Value::Mapping(mapping) = step else {
        return Vec::new();
    };
    mapping
        .keys()
        .filter_map(Value::as_str)
        .filter(|key| key.contains('.') && !registry.contains(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_list() {
        let steps = parse_steps("- Egress airlock\n- pgt.set: B7, CW2\n").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(step_text(&steps[0]), Some("Egress airlock"));
        assert_eq!(step_text(&steps[1]), None);
    }

    #[test]
    fn test_parse_steps_mapping() {
        let steps = parse_steps("title: EVA 1\nsteps:\n  - text: Go\n").unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(step_text(&steps[0]), Some("Go"));
    }

    #[test]
    fn test_mapping_without_steps() {
        let err = parse_steps("title: EVA 1\n").unwrap_err();
        assert!(err.to_string().contains("steps"));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_steps("").unwrap().is_empty());
    }

    #[test]
    fn test_scalar_document_rejected() {
        assert!(parse_steps("just text").is_err());
    }

    #[test]
    fn test_unhandled_keys() {
        let step: Value =
            serde_yaml::from_str("text: Go\npgt.set: B7, CW2\nsscu.gang: on\n").unwrap();
        assert_eq!(
            unhandled_keys(&step, ModuleRegistry::standard()),
            vec!["sscu.gang"]
        );
    }

    #[test]
    fn test_read_steps_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eva.yaml");
        std::fs::write(&path, "- apfr.install: SSRMS, 6, PP, F, 6\n").unwrap();
        assert_eq!(read_steps(&path).unwrap().len(), 1);
    }
}
