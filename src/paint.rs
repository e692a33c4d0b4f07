//! Line painting: turns a sequence of plain/painted segments into one
//! rewritten line with embedded SGR sequences.

use crate::palette::{ColorToken, Palette, RESET};

/// A piece of a line, optionally painted with a color token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'t> {
    pub text: &'t str,
    pub token: Option<ColorToken>,
}

impl Segment<'_> {
    /// Whitespace-only segments are never painted.
    fn effective_token(&self) -> Option<ColorToken> {
        self.token.filter(|_| !self.text.trim().is_empty())
    }
}

/// Accumulates the segments of one line, in order.
#[derive(Debug, Default, Clone)]
pub struct LinePainter<'t> {
    segments: Vec<Segment<'t>>,
}

impl<'t> LinePainter<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(&mut self, text: &'t str) -> &mut Self {
        if !text.is_empty() {
            self.segments.push(Segment { text, token: None });
        }
        self
    }

    pub fn paint(&mut self, token: ColorToken, text: &'t str) -> &mut Self {
        if !text.is_empty() {
            self.segments.push(Segment {
                text,
                token: Some(token),
            });
        }
        self
    }

    pub fn segments(&self) -> &[Segment<'t>] {
        &self.segments
    }

    /// True if at least one visible segment carries a color.
    pub fn is_painted(&self) -> bool {
        self.segments.iter().any(|s| s.effective_token().is_some())
    }

    /// Render the line.
    ///
    /// Runs of the same token share one escape sequence, including any
    /// whitespace between them. A reset is emitted before every switch to
    /// another token or to plain text, and after the last painted segment.
    pub fn render(&self, palette: &Palette) -> String {
        let mut out = String::new();
        let mut open: Option<ColorToken> = None;
        // Whitespace seen after a painted segment, held until we know
        // whether the run continues.
        let mut gap = String::new();

        for segment in &self.segments {
            match segment.effective_token() {
                Some(token) if open == Some(token) => {}
                Some(token) => {
                    if open.is_some() {
                        out.push_str(RESET);
                    }
                    out.push_str(&gap);
                    gap.clear();
                    out.push_str(&palette.escape(token));
                    open = Some(token);
                }
                None if open.is_some() && segment.text.trim().is_empty() => {
                    gap.push_str(segment.text);
                    continue;
                }
                None => {
                    if open.take().is_some() {
                        out.push_str(RESET);
                    }
                }
            }
            out.push_str(&gap);
            gap.clear();
            out.push_str(segment.text);
        }

        if open.is_some() {
            out.push_str(RESET);
        }
        out.push_str(&gap);
        out
    }
}
