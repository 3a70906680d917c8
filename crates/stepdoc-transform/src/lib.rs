//! Token transform engine for procedure step text.
//!
//! Step text written by procedure authors may embed symbolic tokens
//! (`{{CHECK}}`, `{{LEFT}}`, ...) and color keywords (`GO`, `NO GO`,
//! `CAUTION`, ...). [`TextTransform`] scans the text and produces an ordered
//! sequence of [`Segment`]s: literal text interleaved with format-native rich
//! objects for the requested [`TransformFormat`].
//!
//! # Architecture
//!
//! - [`TransformTable`]: ordered token definitions. Table order is a
//!   priority order: the first declared entry found anywhere in the text wins.
//! - [`TokenBackend`]: per-format rendering of a matched token (plain text,
//!   display markup, document runs, component elements).
//! - [`TextTransform`]: the engine, bound to one format and one table.
//!
//! # Example
//!
//! ```
//! use stepdoc_transform::{Segment, TextTransform, TransformFormat};
//!
//! let engine = TextTransform::new(TransformFormat::Text);
//! let segments = engine.transform("Verify {{CHECK}}");
//!
//! assert_eq!(
//!     segments,
//!     vec![Segment::literal("Verify "), Segment::literal("✓")]
//! );
//! ```

mod backend;
mod engine;
mod error;
mod format;
mod segment;
mod table;

pub use backend::{DocxBackend, HtmlBackend, ReactBackend, TextBackend, TokenBackend, escape_html};
pub use engine::TextTransform;
pub use error::TransformError;
pub use format::TransformFormat;
pub use segment::{DocxRun, Element, ElementChild, RichNode, Segment};
pub use table::{
    COLOR_KEYWORDS, Color, PALETTE, Symbol, Token, TransformEntry, TransformTable,
    TransformTableBuilder,
};
