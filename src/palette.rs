//! Color tokens and the palette that resolves them to SGR sequences.
//!
//! Colorizers only ever pick a [`ColorToken`]. The [`Palette`] turns a token
//! into the escape sequence that is embedded in the rewritten line; the
//! default palette is the plain 8/16-color ANSI mapping git itself uses.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The escape character every painted segment starts with.
pub const ESC: char = '\u{1b}';

/// Sequence appended after painted segments.
pub const RESET: &str = "\u{1b}[0m";

/// Abstract style identifier chosen by the colorizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorToken {
    Success,
    Danger,
    Warning,
    Info,
    Emphasis,
    Dim,
    Hash,
    Ref,
    Meta,
    Hunk,
    Added,
    Removed,
    PathStaged,
    PathUnstaged,
    PathUntracked,
    PathUnmerged,
    Branch,
}

impl ColorToken {
    pub const ALL: [ColorToken; 17] = [
        ColorToken::Success,
        ColorToken::Danger,
        ColorToken::Warning,
        ColorToken::Info,
        ColorToken::Emphasis,
        ColorToken::Dim,
        ColorToken::Hash,
        ColorToken::Ref,
        ColorToken::Meta,
        ColorToken::Hunk,
        ColorToken::Added,
        ColorToken::Removed,
        ColorToken::PathStaged,
        ColorToken::PathUnstaged,
        ColorToken::PathUntracked,
        ColorToken::PathUnmerged,
        ColorToken::Branch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Success => "success",
            ColorToken::Danger => "danger",
            ColorToken::Warning => "warning",
            ColorToken::Info => "info",
            ColorToken::Emphasis => "emphasis",
            ColorToken::Dim => "dim",
            ColorToken::Hash => "hash",
            ColorToken::Ref => "ref",
            ColorToken::Meta => "meta",
            ColorToken::Hunk => "hunk",
            ColorToken::Added => "added",
            ColorToken::Removed => "removed",
            ColorToken::PathStaged => "path-staged",
            ColorToken::PathUnstaged => "path-unstaged",
            ColorToken::PathUntracked => "path-untracked",
            ColorToken::PathUnmerged => "path-unmerged",
            ColorToken::Branch => "branch",
        }
    }

    /// Scope name used for this token in the declarative grammar.
    pub fn scope(self) -> String {
        format!("gitbash.{}", self.name())
    }

    /// SGR parameters of the legacy ANSI mapping.
    fn ansi16(self) -> &'static str {
        match self {
            ColorToken::Success | ColorToken::Added | ColorToken::PathStaged => "32",
            ColorToken::Danger
            | ColorToken::Removed
            | ColorToken::PathUnstaged
            | ColorToken::PathUntracked
            | ColorToken::PathUnmerged => "31",
            ColorToken::Warning | ColorToken::Hash => "33",
            ColorToken::Info | ColorToken::Hunk => "36",
            ColorToken::Emphasis | ColorToken::Meta => "1",
            ColorToken::Dim => "2",
            ColorToken::Ref => "1;36",
            ColorToken::Branch => "1;32",
        }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorToken::ALL
            .into_iter()
            .find(|token| token.name() == s)
            .ok_or_else(|| Error::UnknownToken(s.to_string()))
    }
}

/// Mapping from color token to SGR parameters (the part between `ESC[` and `m`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    codes: BTreeMap<ColorToken, String>,
}

impl Palette {
    /// The legacy inline-escape palette: 8/16-color ANSI codes.
    pub fn ansi16() -> Self {
        let codes = ColorToken::ALL
            .into_iter()
            .map(|token| (token, token.ansi16().to_string()))
            .collect();
        Self { codes }
    }

    /// Replace the SGR parameters used for one token.
    pub fn with_override(mut self, token: ColorToken, sgr: impl Into<String>) -> Self {
        self.codes.insert(token, sgr.into());
        self
    }

    /// Build a palette from `token-name -> sgr` pairs layered over the ANSI defaults.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut palette = Self::ansi16();
        for (name, sgr) in entries {
            let token: ColorToken = name.parse()?;
            palette.codes.insert(token, sgr.to_string());
        }
        Ok(palette)
    }

    pub fn sgr(&self, token: ColorToken) -> &str {
        self.codes
            .get(&token)
            .map_or_else(|| token.ansi16(), String::as_str)
    }

    /// The full escape sequence that starts a segment painted with `token`.
    pub fn escape(&self, token: ColorToken) -> String {
        format!("{ESC}[{}m", self.sgr(token))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi16()
    }
}
