//! `stepdoc transform` command implementation.

use clap::Args;
use stepdoc_transform::TextTransform;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the transform command.
#[derive(Args)]
pub(crate) struct TransformArgs {
    /// Text containing tokens such as `{{CHECK}}` or `NO GO`.
    text: String,

    /// Target format: text, html, docx or react.
    #[arg(short, long, default_value = "text")]
    format: String,
}

impl TransformArgs {
    /// Execute the transform command.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown formats.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let engine = TextTransform::for_format_name(&self.format)?;
        let segments = engine.transform(&self.text);
        output.data(&serde_json::to_string_pretty(&segments)?);
        Ok(())
    }
}
