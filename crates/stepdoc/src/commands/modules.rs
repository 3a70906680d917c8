//! `stepdoc modules` command implementation.

use clap::Args;
use serde::Serialize;
use stepdoc_modules::{ModuleEntry, ModuleRegistry};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the modules command.
#[derive(Args)]
pub(crate) struct ModulesArgs {
    /// Print the module list as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ModuleSummary {
    key: &'static str,
    variants: Vec<&'static str>,
    component: bool,
}

impl From<&ModuleEntry> for ModuleSummary {
    fn from(entry: &ModuleEntry) -> Self {
        Self {
            key: entry.key(),
            variants: entry.variants().iter().map(|v| v.as_str()).collect(),
            component: entry.component().is_some(),
        }
    }
}

impl ModulesArgs {
    /// Execute the modules command.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let summaries: Vec<ModuleSummary> = ModuleRegistry::standard()
            .entries()
            .iter()
            .map(ModuleSummary::from)
            .collect();

        if self.json {
            output.data(&serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }

        for summary in &summaries {
            output.heading(summary.key);
            output.data(&format!("  variants: {}", summary.variants.join(", ")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_summaries() {
        let summaries: Vec<ModuleSummary> = ModuleRegistry::standard()
            .entries()
            .iter()
            .map(ModuleSummary::from)
            .collect();
        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "key": "apfr.install",
                    "variants": ["Docx", "Html", "React", "Base"],
                    "component": true
                },
                {
                    "key": "pgt.set",
                    "variants": ["EvaDocx", "Html", "React", "Base"],
                    "component": true
                }
            ])
        );
    }
}
