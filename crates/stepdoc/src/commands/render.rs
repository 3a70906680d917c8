//! `stepdoc render` command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use serde_yaml::Value;
use stepdoc_config::{CliSettings, Config, ReportFormat};
use stepdoc_modules::{Alteration, ModuleRegistry, OutputType};
use stepdoc_transform::{Segment, TextTransform};

use crate::error::CliError;
use crate::output::Output;
use crate::procedure::{read_steps, step_text, unhandled_keys};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Procedure file (relative paths also resolve against `procedures.dir`).
    file: PathBuf,

    /// Output type to render for (overrides config).
    #[arg(short, long)]
    output: Option<OutputType>,

    /// Report format: json or text (overrides config).
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Directory that relative procedure paths resolve against (overrides config).
    #[arg(long)]
    procedures_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover stepdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// A step after all of its alterations were merged.
#[derive(Debug, Serialize)]
pub(crate) struct RenderedStep {
    /// 1-based step number.
    step: usize,
    /// Step text with every alteration applied.
    content: Vec<Segment>,
    alterations: Vec<RenderedAlteration>,
}

#[derive(Debug, Serialize)]
struct RenderedAlteration {
    directive: &'static str,
    #[serde(flatten)]
    alteration: Alteration,
}

impl RenderArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            output: self.output,
            format: self.format,
            procedures_dir: self.procedures_dir.clone(),
        }
    }

    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading the procedure or any
    /// directive fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;

        let path = config.procedures_resolved.resolve(&self.file);
        let steps = read_steps(&path)?;
        let output_type = config.render_resolved.output;
        tracing::info!(
            file = %path.display(),
            %output_type,
            steps = steps.len(),
            "Rendering procedure"
        );

        let registry = ModuleRegistry::standard();
        for (idx, step) in steps.iter().enumerate() {
            for key in unhandled_keys(step, registry) {
                tracing::warn!(step = idx + 1, key, "No step module handles directive");
            }
        }

        let rendered = render_steps(&steps, registry, output_type)?;
        let report = match config.render_resolved.format {
            ReportFormat::Json => serde_json::to_string_pretty(&rendered)?,
            ReportFormat::Text => format_text(&rendered),
        };
        output.data(&report);

        Ok(())
    }
}

/// Instantiate and apply every directive of every step.
pub(crate) fn render_steps(
    steps: &[Value],
    registry: &ModuleRegistry,
    output_type: OutputType,
) -> Result<Vec<RenderedStep>, CliError> {
    let transform = TextTransform::new(output_type.family());

    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| {
            let number = idx + 1;
            let step_error = |source| CliError::Step {
                step: number,
                source,
            };

            let mut content = step_text(step)
                .map(|text| transform.transform(text))
                .unwrap_or_default();
            let mut alterations = Vec::new();
            for mut instance in registry.instantiate_step(step).map_err(step_error)? {
                let alteration = instance.alter_step(output_type).map_err(step_error)?;
                alteration.apply_to(&mut content);
                alterations.push(RenderedAlteration {
                    directive: instance.key(),
                    alteration,
                });
            }

            Ok(RenderedStep {
                step: number,
                content,
                alterations,
            })
        })
        .collect()
}

/// One line per step followed by one indented line per alteration.
pub(crate) fn format_text(rendered: &[RenderedStep]) -> String {
    let mut out = String::new();
    for step in rendered {
        let text: String = step.content.iter().map(Segment::plain_text).collect();
        let _ = writeln!(out, "{}. {text}", step.step);
        for entry in &step.alterations {
            let _ = writeln!(
                out,
                "   {} {}: {}",
                entry.directive,
                entry.alteration.kind(),
                entry.alteration.plain_text()
            );
        }
    }
    out.truncate(out.trim_end().len());
    out
}
