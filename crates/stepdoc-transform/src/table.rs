//! Transform table: ordered token definitions.
//!
//! The standard table lists every symbolic token first, then the color
//! keywords generated from [`COLOR_KEYWORDS`] and the [`PALETTE`]. Because
//! lookup is first-declared-wins, symbolic tokens always take priority over
//! a color word that happens to occur inside the same text, and `NO GO`
//! is declared before the generic `GO`.

use std::sync::{Arc, LazyLock};

/// Symbolic token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// `{{CHECK}}`
    Check,
    /// `{{CHECKBOX}}`
    Checkbox,
    /// `{{CHECKEDBOX}}`
    CheckedBox,
    /// `{{LEFT}}`
    Left,
    /// `{{RIGHT}}`
    Right,
    /// `{{UP}}`
    Up,
    /// `{{DOWN}}`
    Down,
    /// `{{CLOCKWISE}}`
    Clockwise,
    /// `{{COUNTERCLOCKWISE}}`
    CounterClockwise,
}

impl Symbol {
    /// All symbols in standard table order.
    pub const ALL: [Self; 9] = [
        Self::Check,
        Self::Checkbox,
        Self::CheckedBox,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
        Self::Clockwise,
        Self::CounterClockwise,
    ];

    /// Token text as written by authors.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Check => "{{CHECK}}",
            Self::Checkbox => "{{CHECKBOX}}",
            Self::CheckedBox => "{{CHECKEDBOX}}",
            Self::Left => "{{LEFT}}",
            Self::Right => "{{RIGHT}}",
            Self::Up => "{{UP}}",
            Self::Down => "{{DOWN}}",
            Self::Clockwise => "{{CLOCKWISE}}",
            Self::CounterClockwise => "{{COUNTERCLOCKWISE}}",
        }
    }

    /// Unicode glyph the token stands for.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Check => "✓",
            Self::Checkbox => "☐",
            Self::CheckedBox => "☑",
            Self::Left => "←",
            Self::Right => "→",
            Self::Up => "↑",
            Self::Down => "↓",
            Self::Clockwise => "↻",
            Self::CounterClockwise => "↺",
        }
    }

    /// Short kebab-case name, used for CSS classes.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Check => "check",
            Self::Checkbox => "checkbox",
            Self::CheckedBox => "checkedbox",
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
            Self::Clockwise => "clockwise",
            Self::CounterClockwise => "counterclockwise",
        }
    }
}

/// Palette color: name and display hex (no leading `#`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Color name.
    pub name: &'static str,
    /// Six-digit uppercase hex.
    pub hex: &'static str,
}

impl Color {
    pub const BLACK: Self = Self::new("black", "000000");
    pub const BLUE: Self = Self::new("blue", "0070C0");
    pub const GREEN: Self = Self::new("green", "00B050");
    pub const ORANGE: Self = Self::new("orange", "FFC000");
    pub const PINK: Self = Self::new("pink", "FF66FF");
    pub const PURPLE: Self = Self::new("purple", "7030A0");
    pub const RED: Self = Self::new("red", "FF0000");
    pub const YELLOW: Self = Self::new("yellow", "FFFF00");

    const fn new(name: &'static str, hex: &'static str) -> Self {
        Self { name, hex }
    }

    /// Look up a palette color by name (case-insensitive).
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        PALETTE
            .iter()
            .copied()
            .find(|color| color.name.eq_ignore_ascii_case(name))
    }
}

/// Fixed display palette.
pub const PALETTE: [Color; 8] = [
    Color::BLACK,
    Color::BLUE,
    Color::GREEN,
    Color::ORANGE,
    Color::PINK,
    Color::PURPLE,
    Color::RED,
    Color::YELLOW,
];

/// Color keywords in priority order. Specific multi-word keywords come
/// before the generic `GO`.
pub const COLOR_KEYWORDS: [(&str, Color); 6] = [
    ("NO GO", Color::RED),
    ("NO-GO", Color::RED),
    ("GO", Color::BLACK),
    ("WARNING", Color::RED),
    ("CAUTION", Color::ORANGE),
    ("NOTE", Color::BLUE),
];

/// What a table entry transforms into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// Symbolic token, rendered by direct lookup.
    Symbol(Symbol),
    /// Color keyword, rendered from the matched text.
    Color(Color),
}

/// One table entry: the text to find and the token it becomes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransformEntry {
    text: String,
    token: Token,
}

impl TransformEntry {
    /// Text matched in the input.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Token the match becomes.
    #[must_use]
    pub fn token(&self) -> Token {
        self.token
    }
}

static STANDARD: LazyLock<Arc<TransformTable>> = LazyLock::new(|| {
    let mut builder = TransformTable::builder();
    for symbol in Symbol::ALL {
        builder = builder.symbol(symbol);
    }
    Arc::new(builder.color_keywords().build())
});

/// Ordered, immutable list of transform entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformTable {
    entries: Vec<TransformEntry>,
}

impl TransformTable {
    /// Shared standard table (symbols, then color keywords).
    #[must_use]
    pub fn standard() -> Arc<Self> {
        Arc::clone(&STANDARD)
    }

    /// Start building a custom table.
    #[must_use]
    pub fn builder() -> TransformTableBuilder {
        TransformTableBuilder::default()
    }

    /// Entries in priority order.
    #[must_use]
    pub fn entries(&self) -> &[TransformEntry] {
        &self.entries
    }

    /// Find the first declared entry occurring anywhere in `text`, with the
    /// byte offset of its first occurrence.
    pub(crate) fn find(&self, text: &str) -> Option<(&TransformEntry, usize)> {
        self.entries
            .iter()
            .find_map(|entry| text.find(&entry.text).map(|pos| (entry, pos)))
    }
}

/// Builder for [`TransformTable`]. Entries keep insertion order.
#[derive(Debug, Default)]
pub struct TransformTableBuilder {
    entries: Vec<TransformEntry>,
}

impl TransformTableBuilder {
    /// Add a symbol under its standard token text.
    #[must_use]
    pub fn symbol(self, symbol: Symbol) -> Self {
        self.entry(symbol.token(), Token::Symbol(symbol))
    }

    /// Add a color keyword.
    #[must_use]
    pub fn color_keyword(self, word: impl Into<String>, color: Color) -> Self {
        self.entry(word, Token::Color(color))
    }

    /// Append every entry of [`COLOR_KEYWORDS`].
    #[must_use]
    pub fn color_keywords(mut self) -> Self {
        for (word, color) in COLOR_KEYWORDS {
            self = self.color_keyword(word, color);
        }
        self
    }

    /// Add an entry matching arbitrary text. Empty text is ignored.
    #[must_use]
    pub fn entry(mut self, text: impl Into<String>, token: Token) -> Self {
        let text = text.into();
        if text.is_empty() {
            tracing::warn!(?token, "Ignoring transform entry with empty match text");
            return self;
        }
        self.entries.push(TransformEntry { text, token });
        self
    }

    /// Finish the table.
    #[must_use]
    pub fn build(self) -> TransformTable {
        TransformTable {
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standard_symbols_precede_color_keywords() {
        let table = TransformTable::standard();
        let first_color = table
            .entries()
            .iter()
            .position(|e| matches!(e.token(), Token::Color(_)))
            .unwrap();
        assert_eq!(first_color, Symbol::ALL.len());
        assert!(
            table.entries()[first_color..]
                .iter()
                .all(|e| matches!(e.token(), Token::Color(_)))
        );
    }

    #[test]
    fn test_no_go_declared_before_go() {
        let table = TransformTable::standard();
        let pos = |text: &str| table.entries().iter().position(|e| e.text() == text).unwrap();
        assert!(pos("NO GO") < pos("GO"));
        assert!(pos("NO-GO") < pos("GO"));
    }

    #[test]
    fn test_standard_table_is_shared() {
        let a = TransformTable::standard();
        let b = TransformTable::standard();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_color_by_name() {
        assert_eq!(Color::by_name("Red"), Some(Color::RED));
        assert_eq!(Color::by_name("teal"), None);
    }

    #[test]
    fn test_find_uses_declaration_order() {
        let table = TransformTable::builder()
            .color_keyword("LATE", Color::RED)
            .color_keyword("EARLY", Color::BLUE)
            .build();
        let (entry, pos) = table.find("EARLY then LATE").unwrap();
        assert_eq!(entry.text(), "LATE");
        assert_eq!(pos, 11);
    }

    #[test]
    fn test_find_none() {
        let table = TransformTable::standard();
        assert!(table.find("nothing to see").is_none());
    }

    #[test]
    fn test_empty_entry_ignored() {
        let table = TransformTable::builder()
            .entry("", Token::Symbol(Symbol::Check))
            .symbol(Symbol::Up)
            .build();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0].text(), "{{UP}}");
    }
}
