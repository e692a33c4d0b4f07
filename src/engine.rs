//! Dispatch and orchestration.
//!
//! The host renderer calls into the engine at two points per code block:
//!
//! 1. [`Engine::preprocess_language`] before tokenization: alias tags are
//!    folded onto the canonical tag, and plain-text tags are promoted when a
//!    shape is detected.
//! 2. [`Engine::preprocess_core`] before rendering: typed escape spellings
//!    become real escapes, pre-colored blocks are left alone, and otherwise
//!    the first matching entry of [`DISPATCH`] colorizes the block.
//!
//! [`Engine::process`] runs both steps.

use crate::colorizing;
use crate::config::{GitpaintConfig, LanguageConfig};
use crate::detection::{detect, is_painted};
use crate::document::Document;
use crate::error::Result;
use crate::palette::{Palette, ESC};
use crate::shape::Shape;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// One dispatch entry: a primary shape and the shapes also applied after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub primary: Shape,
    /// Run in order after the primary, each only if its own detector matches.
    pub also: &'static [Shape],
}

const fn entry(primary: Shape, also: &'static [Shape]) -> Dispatch {
    Dispatch { primary, also }
}

/// Dispatch table in priority order.
pub const DISPATCH: [Dispatch; 16] = [
    entry(Shape::Diff, &[]),
    entry(Shape::StatusLong, &[]),
    entry(Shape::StatusShort, &[]),
    entry(Shape::Merge, &[Shape::TransportError]),
    entry(Shape::Bisect, &[Shape::Log, Shape::TransportError]),
    entry(Shape::Log, &[]),
    entry(Shape::Reflog, &[]),
    entry(Shape::Branch, &[]),
    entry(Shape::StashList, &[]),
    entry(Shape::RemoteVerbose, &[]),
    entry(Shape::CheckIgnoreVerbose, &[]),
    entry(Shape::Blame, &[]),
    entry(Shape::CountObjects, &[]),
    entry(Shape::Version, &[]),
    entry(Shape::ConfigUsage, &[]),
    entry(Shape::TransportError, &[]),
];

/// What [`Engine::preprocess_core`] did with a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum Outcome {
    /// The language tag is not the canonical one.
    Ineligible,
    /// The block already contains escape sequences.
    PreColored,
    /// No detector matched.
    Unrecognized,
    /// A shape was recognized and colorized.
    Colored { shape: Shape, also: Vec<Shape> },
}

impl Outcome {
    /// The primary shape, or `Shape::None`.
    pub fn shape(&self) -> Shape {
        match self {
            Outcome::Colored { shape, .. } => *shape,
            _ => Shape::None,
        }
    }
}

/// Typed spellings of the escape character that precede a CSI `[`.
static ESCAPE_SPELLING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:u001[bB]|x1[bB]|033|e)\[").unwrap());

/// The first shape in dispatch order whose detector matches.
pub fn classify(doc: &Document) -> Shape {
    find_dispatch(doc).map_or(Shape::None, |entry| entry.primary)
}

fn find_dispatch(doc: &Document) -> Option<&'static Dispatch> {
    DISPATCH.iter().find(|entry| detect(entry.primary, doc))
}

/// Rewrite typed escape spellings (`\u001b[`, `\x1b[`, `\033[`, `\e[`) into a
/// literal escape. Returns the number of lines changed.
pub fn normalize_escapes(doc: &mut Document) -> usize {
    let replacement = format!("{ESC}[");
    let mut changed = 0;
    for line in doc.lines_mut() {
        if !ESCAPE_SPELLING.is_match(line.text()) {
            continue;
        }
        let rewritten = ESCAPE_SPELLING
            .replace_all(line.text(), replacement.as_str())
            .into_owned();
        line.replace(&rewritten);
        changed += 1;
    }
    changed
}

/// Classification and colorizing engine. Holds configuration only, no
/// per-document state.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    language: LanguageConfig,
    palette: Palette,
}

impl Engine {
    /// An engine with the built-in language rules and the ANSI palette.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &GitpaintConfig) -> Result<Self> {
        Ok(Self {
            language: config.language.clone(),
            palette: config.palette()?,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn canonical_language(&self) -> &str {
        &self.language.canonical
    }

    /// Fold the document's language tag. Returns whether the document is
    /// now tagged as git output.
    pub fn preprocess_language(&self, doc: &mut Document) -> bool {
        let tag = doc.language().to_string();
        let promote = if self.language.is_alias(&tag) {
            true
        } else if self.language.auto_detect && self.language.is_plain(&tag) {
            let shape = classify(doc);
            tracing::debug!(
                target: "gitpaint.engine",
                tag = %tag,
                shape = %shape,
                "auto-detecting plain block"
            );
            !shape.is_none()
        } else {
            false
        };

        if promote && tag != self.language.canonical {
            doc.set_language(self.language.canonical.as_str());
        }
        promote
    }

    /// Colorize a document already tagged as git output.
    pub fn preprocess_core(&self, doc: &mut Document) -> Outcome {
        if doc.language() != self.language.canonical {
            return Outcome::Ineligible;
        }

        let normalized = normalize_escapes(doc);
        if doc.lines().any(|line| is_painted(line.text())) {
            tracing::debug!(
                target: "gitpaint.engine",
                normalized,
                "block is pre-colored, leaving it alone"
            );
            return Outcome::PreColored;
        }

        let Some(entry) = find_dispatch(doc) else {
            tracing::debug!(target: "gitpaint.engine", "no shape matched");
            return Outcome::Unrecognized;
        };

        // Secondary detectors look at the block as authored, before the
        // primary pass adds escapes.
        let also: Vec<Shape> = entry
            .also
            .iter()
            .copied()
            .filter(|shape| detect(*shape, doc))
            .collect();

        let mut rewritten = colorizing::colorize(entry.primary, doc, &self.palette);
        for shape in &also {
            rewritten += colorizing::colorize(*shape, doc, &self.palette);
        }

        tracing::debug!(
            target: "gitpaint.engine",
            shape = %entry.primary,
            also = ?also,
            rewritten,
            "block colorized"
        );
        Outcome::Colored {
            shape: entry.primary,
            also,
        }
    }

    /// Run both preprocessing steps.
    pub fn process(&self, doc: &mut Document) -> Outcome {
        if !self.preprocess_language(doc) {
            return Outcome::Ineligible;
        }
        self.preprocess_core(doc)
    }

    /// Process `text` tagged `language` and return the rendered block.
    pub fn colorize_str(&self, language: &str, text: &str) -> String {
        let mut doc = Document::new(language, text);
        self.process(&mut doc);
        doc.raw_text()
    }
}
