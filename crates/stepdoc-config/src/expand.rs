//! Environment and home-directory expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` / `${VAR:-default}` references, then a leading `~`.
///
/// Bare `$VAR` is left alone. An unset variable without a default is an
/// error naming `field`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    let expanded = if value.contains("${") {
        shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
            std::env::var(var).map(Some).map_err(|_| LookupError {
                var_name: var.to_owned(),
            })
        })
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{0}}} not set", e.cause.var_name),
        })?
        .into_owned()
    } else {
        value.to_owned()
    };

    Ok(shellexpand::tilde(&expanded).into_owned())
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("STEPDOC_TEST_PROC_ROOT", "/srv/eva");
        }
        let result = expand_path("${STEPDOC_TEST_PROC_ROOT}/procedures", "procedures.dir").unwrap();
        assert_eq!(result, "/srv/eva/procedures");
        unsafe {
            std::env::remove_var("STEPDOC_TEST_PROC_ROOT");
        }
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("STEPDOC_TEST_UNSET");
        }
        let result = expand_path("${STEPDOC_TEST_UNSET:-procs}", "procedures.dir").unwrap();
        assert_eq!(result, "procs");
    }

    #[test]
    fn test_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("STEPDOC_TEST_MISSING");
        }
        let err = expand_path("${STEPDOC_TEST_MISSING}", "procedures.dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("STEPDOC_TEST_MISSING"));
        assert!(err.to_string().contains("procedures.dir"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_path("$HOME/x", "f").unwrap(), "$HOME/x");
    }

    #[test]
    fn test_tilde() {
        let result = expand_path("~/procedures", "procedures.dir").unwrap();
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("/procedures"));
    }
}
