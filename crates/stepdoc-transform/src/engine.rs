//! The token transform engine.

use std::sync::Arc;

use crate::backend::{DocxBackend, HtmlBackend, ReactBackend, TextBackend, TokenBackend};
use crate::segment::Segment;
use crate::table::{Token, TransformTable};
use crate::{TransformError, TransformFormat};

/// Pending work while walking the text.
enum Work<'t> {
    /// Text still to be scanned.
    Text(&'t str),
    /// Matched token text and the token it becomes.
    Token(&'t str, Token),
}

/// Transforms step text into literal and rich segments for one format.
///
/// # Matching policy
///
/// The table is scanned in declaration order and the first entry whose text
/// occurs *anywhere* in the remaining text is selected, even when another
/// entry occurs closer to the start. The text is split at the first
/// occurrence of that entry into prefix, token and suffix; prefix and suffix
/// are scanned again the same way. Prefix and suffix pieces that are empty
/// or whitespace only produce no segments.
///
/// # Example
///
/// ```
/// use stepdoc_transform::{DocxRun, Segment, TextTransform, TransformFormat};
///
/// let engine = TextTransform::new(TransformFormat::Docx);
/// let segments = engine.transform("{{CHECK}} GO");
///
/// assert_eq!(
///     segments,
///     vec![
///         Segment::from(DocxRun::new("✓").font("Segoe UI Symbol")),
///         Segment::from(DocxRun::new("GO").bold().color("000000")),
///     ]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct TextTransform {
    format: TransformFormat,
    table: Arc<TransformTable>,
}

impl TextTransform {
    /// Create an engine bound to the standard table.
    #[must_use]
    pub fn new(format: TransformFormat) -> Self {
        Self::with_table(format, TransformTable::standard())
    }

    /// Create an engine bound to a custom table.
    #[must_use]
    pub fn with_table(format: TransformFormat, table: Arc<TransformTable>) -> Self {
        tracing::debug!(%format, entries = table.entries().len(), "Created text transform");
        Self { format, table }
    }

    /// Create an engine from a format name.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnsupportedFormat`] for unknown names.
    pub fn for_format_name(name: &str) -> Result<Self, TransformError> {
        Ok(Self::new(name.parse()?))
    }

    /// Format this engine emits.
    #[must_use]
    pub fn format(&self) -> TransformFormat {
        self.format
    }

    /// Transform `text` into an ordered sequence of segments.
    ///
    /// Empty input yields an empty sequence; input without any token yields a
    /// single literal equal to the input.
    #[must_use]
    pub fn transform(&self, text: &str) -> Vec<Segment> {
        let mut out = Vec::new();
        if text.is_empty() {
            return out;
        }

        // Suffix is pushed first so the prefix is popped (and emitted) first.
        let mut stack = vec![Work::Text(text)];
        while let Some(work) = stack.pop() {
            match work {
                Work::Token(matched, token) => out.push(self.render(matched, token)),
                Work::Text(piece) => match self.table.find(piece) {
                    None => out.push(Segment::literal(piece)),
                    Some((entry, pos)) => {
                        let end = pos + entry.text().len();
                        push_piece(&mut stack, &piece[end..]);
                        stack.push(Work::Token(&piece[pos..end], entry.token()));
                        push_piece(&mut stack, &piece[..pos]);
                    }
                },
            }
        }

        out
    }

    fn render(&self, matched: &str, token: Token) -> Segment {
        match self.format {
            TransformFormat::Text => render_with::<TextBackend>(matched, token),
            TransformFormat::Html => render_with::<HtmlBackend>(matched, token),
            TransformFormat::Docx => render_with::<DocxBackend>(matched, token),
            TransformFormat::React => render_with::<ReactBackend>(matched, token),
        }
    }
}

fn push_piece<'t>(stack: &mut Vec<Work<'t>>, piece: &'t str) {
    if !piece.trim().is_empty() {
        stack.push(Work::Text(piece));
    }
}

fn render_with<B: TokenBackend>(matched: &str, token: Token) -> Segment {
    match token {
        Token::Symbol(symbol) => B::symbol(symbol),
        Token::Color(color) => B::color(matched, color),
    }
}
