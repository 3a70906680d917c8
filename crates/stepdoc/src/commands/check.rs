//! `stepdoc check` command implementation.

use std::path::PathBuf;

use clap::Args;
use serde_yaml::Value;
use stepdoc_config::{CliSettings, Config};
use stepdoc_modules::{DirectiveValue, ModuleRegistry, OutputType, StepModuleError};

use crate::error::CliError;
use crate::output::Output;
use crate::procedure::{read_steps, unhandled_keys};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Procedure file (relative paths also resolve against `procedures.dir`).
    file: PathBuf,

    /// Directory that relative procedure paths resolve against (overrides config).
    #[arg(long)]
    procedures_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover stepdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Outcome of checking every directive of a procedure.
#[derive(Debug, Default)]
pub(crate) struct CheckReport {
    /// Number of registered directives found.
    pub(crate) directives: usize,
    /// Failures as (1-based step, error).
    pub(crate) failures: Vec<(usize, StepModuleError)>,
    /// Directive-shaped keys without a module, as (1-based step, key).
    pub(crate) unhandled: Vec<(usize, String)>,
}

impl CheckArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            procedures_dir: self.procedures_dir.clone(),
            ..Default::default()
        }
    }

    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure cannot be read or any directive is
    /// invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let path = config.procedures_resolved.resolve(&self.file);
        output.info(&format!("Checking {}", path.display()));
        let steps = read_steps(&path)?;

        let report = check_steps(&steps, ModuleRegistry::standard());

        for (step, key) in &report.unhandled {
            output.warning(&format!("step {step}: no step module handles \"{key}\""));
        }
        for (step, err) in &report.failures {
            output.error(&format!("step {step}: {err}"));
        }

        if report.failures.is_empty() {
            output.success(&format!(
                "{} directives valid in {} steps",
                report.directives,
                steps.len()
            ));
            Ok(())
        } else {
            Err(CliError::Validation(format!(
                "{} of {} directives invalid in {}",
                report.failures.len(),
                report.directives,
                path.display()
            )))
        }
    }
}

/// Validate every registered directive and render it for every output type.
///
/// Unlike rendering, this does not stop at the first failure.
pub(crate) fn check_steps(steps: &[Value], registry: &ModuleRegistry) -> CheckReport {
    let mut report = CheckReport::default();

    for (idx, step) in steps.iter().enumerate() {
        let number = idx + 1;
        report.unhandled.extend(
            unhandled_keys(step, registry)
                .into_iter()
                .map(|key| (number, key.to_owned())),
        );

        let Value::Mapping(mapping) = step else {
            continue;
        };
        for (key, raw) in mapping {
            let Some(entry) = key.as_str().and_then(|key| registry.get(key)) else {
                continue;
            };
            report.directives += 1;

            let checked = DirectiveValue::from_yaml(entry.key(), raw)
                .and_then(|value| entry.instantiate(&value))
                .and_then(|mut instance| {
                    OutputType::ALL
                        .into_iter()
                        .try_for_each(|output_type| instance.alter_step(output_type).map(drop))
                });
            if let Err(err) = checked {
                report.failures.push((number, err));
            }
        }
    }

    report
}
