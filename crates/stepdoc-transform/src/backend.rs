//! Per-format token rendering.

use crate::segment::{DocxRun, Element, Segment};
use crate::table::{Color, Symbol};

/// Font used for symbol glyphs in documents.
const SYMBOL_FONT: &str = "Segoe UI Symbol";

/// Format-specific rendering of matched tokens.
///
/// Symbols resolve by direct lookup; color keywords are rendered from the
/// matched text so a table can map several spellings to one color.
pub trait TokenBackend {
    /// Render a symbolic token.
    fn symbol(symbol: Symbol) -> Segment;

    /// Render a color keyword.
    fn color(text: &str, color: Color) -> Segment;
}

/// Plain text: glyphs for symbols, keywords unchanged.
pub struct TextBackend;

impl TokenBackend for TextBackend {
    fn symbol(symbol: Symbol) -> Segment {
        Segment::literal(symbol.glyph())
    }

    fn color(text: &str, _color: Color) -> Segment {
        Segment::literal(text)
    }
}

/// Display markup.
pub struct HtmlBackend;

impl TokenBackend for HtmlBackend {
    fn symbol(symbol: Symbol) -> Segment {
        Segment::markup(format!(
            r#"<span class="step-symbol step-symbol-{}">{}</span>"#,
            symbol.name(),
            symbol.glyph()
        ))
    }

    fn color(text: &str, color: Color) -> Segment {
        Segment::markup(format!(
            r#"<strong class="step-keyword" style="color:#{}">{}</strong>"#,
            color.hex,
            escape_html(text)
        ))
    }
}

/// Word-processing document runs.
pub struct DocxBackend;

impl TokenBackend for DocxBackend {
    fn symbol(symbol: Symbol) -> Segment {
        DocxRun::new(symbol.glyph()).font(SYMBOL_FONT).into()
    }

    fn color(text: &str, color: Color) -> Segment {
        DocxRun::new(text).bold().color(color.hex).into()
    }
}

/// UI-component elements.
pub struct ReactBackend;

impl TokenBackend for ReactBackend {
    fn symbol(symbol: Symbol) -> Segment {
        Element::new("span")
            .prop("className", format!("step-symbol step-symbol-{}", symbol.name()))
            .text(symbol.glyph())
            .into()
    }

    fn color(text: &str, color: Color) -> Segment {
        Element::new("strong")
            .prop("className", format!("step-keyword text-{}", color.name))
            .prop("color", format!("#{}", color.hex))
            .text(text)
            .into()
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::RichNode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_backend() {
        assert_eq!(TextBackend::symbol(Symbol::Left), Segment::literal("←"));
        assert_eq!(TextBackend::color("GO", Color::BLACK), Segment::literal("GO"));
    }

    #[test]
    fn test_html_backend_symbol() {
        assert_eq!(
            HtmlBackend::symbol(Symbol::Check),
            Segment::markup(r#"<span class="step-symbol step-symbol-check">✓</span>"#)
        );
    }

    #[test]
    fn test_html_backend_color_escapes() {
        let segment = HtmlBackend::color("A&B", Color::RED);
        assert_eq!(
            segment,
            Segment::markup(r#"<strong class="step-keyword" style="color:#FF0000">A&amp;B</strong>"#)
        );
    }

    #[test]
    fn test_docx_backend() {
        assert_eq!(
            DocxBackend::symbol(Symbol::Check),
            Segment::Rich(RichNode::Run(DocxRun::new("✓").font("Segoe UI Symbol")))
        );
        assert_eq!(
            DocxBackend::color("GO", Color::BLACK),
            Segment::Rich(RichNode::Run(DocxRun::new("GO").bold().color("000000")))
        );
    }

    #[test]
    fn test_react_backend_color() {
        let Segment::Rich(RichNode::Element(element)) = ReactBackend::color("NOTE", Color::BLUE)
        else {
            panic!("expected element");
        };
        assert_eq!(element.tag, "strong");
        assert_eq!(element.get("color"), Some("#0070C0"));
        assert_eq!(element.plain_text(), "NOTE");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
    }
}
