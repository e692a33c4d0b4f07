//! Line/Document model
//!
//! A [`Document`] is one code block handed over by the host renderer: a
//! language tag plus the block's lines. The engine mutates it in place. The
//! only text mutation is [`Line::edit_text`]; the number and order of lines is
//! fixed at construction.

/// A single line of a code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    index: usize,
    text: String,
}

impl Line {
    fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Position of this line inside its document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the line in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the half-open character range `[start, end)` with `new_text`.
    ///
    /// Positions are character offsets. Ranges past the end of the line are
    /// clamped, and an inverted range inserts at `start`.
    pub fn edit_text(&mut self, start: usize, end: usize, new_text: &str) {
        let start_byte = self.byte_offset(start);
        let end_byte = self.byte_offset(end.max(start));
        self.text.replace_range(start_byte..end_byte, new_text);
    }

    /// Whole-line replacement, the form every colorizer uses.
    pub fn replace(&mut self, new_text: &str) {
        let len = self.char_len();
        self.edit_text(0, len, new_text);
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

/// A code block: language tag plus lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    language: String,
    lines: Vec<Line>,
    trailing_newline: bool,
}

impl Document {
    /// Build a document from a block's source text.
    ///
    /// Lines are split on `\n`; a `\r` before the newline is kept as part of
    /// the line so that `raw_text` reproduces the source exactly.
    pub fn new(language: impl Into<String>, source: &str) -> Self {
        let trailing_newline = source.ends_with('\n');
        let body = source.strip_suffix('\n').unwrap_or(source);
        let lines = if source.is_empty() {
            Vec::new()
        } else {
            body.split('\n')
                .enumerate()
                .map(|(index, text)| Line::new(index, text))
                .collect()
        };

        Self {
            language: language.into(),
            lines,
            trailing_newline,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    /// Lines in order. Every call starts a fresh traversal.
    pub fn lines(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Mutable lines in order. Text can change; the set of lines cannot.
    pub fn lines_mut(&mut self) -> std::slice::IterMut<'_, Line> {
        self.lines.iter_mut()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The concatenation of all line texts with line separators.
    pub fn raw_text(&self) -> String {
        let mut text = self
            .lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            text.push('\n');
        }
        text
    }
}
