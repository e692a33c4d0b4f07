//! The closed catalog of git output shapes.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of git output a code block represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    StatusLong,
    StatusShort,
    Diff,
    Merge,
    Log,
    Reflog,
    Branch,
    StashList,
    RemoteVerbose,
    CheckIgnoreVerbose,
    Blame,
    Bisect,
    CountObjects,
    Version,
    ConfigUsage,
    TransportError,
    None,
}

impl Shape {
    /// Every recognizable shape, in declaration order (excludes `None`).
    pub const RECOGNIZABLE: [Shape; 16] = [
        Shape::StatusLong,
        Shape::StatusShort,
        Shape::Diff,
        Shape::Merge,
        Shape::Log,
        Shape::Reflog,
        Shape::Branch,
        Shape::StashList,
        Shape::RemoteVerbose,
        Shape::CheckIgnoreVerbose,
        Shape::Blame,
        Shape::Bisect,
        Shape::CountObjects,
        Shape::Version,
        Shape::ConfigUsage,
        Shape::TransportError,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Shape::StatusLong => "status-long",
            Shape::StatusShort => "status-short",
            Shape::Diff => "diff",
            Shape::Merge => "merge",
            Shape::Log => "log",
            Shape::Reflog => "reflog",
            Shape::Branch => "branch",
            Shape::StashList => "stash-list",
            Shape::RemoteVerbose => "remote-verbose",
            Shape::CheckIgnoreVerbose => "check-ignore-verbose",
            Shape::Blame => "blame",
            Shape::Bisect => "bisect",
            Shape::CountObjects => "count-objects",
            Shape::Version => "version",
            Shape::ConfigUsage => "config-usage",
            Shape::TransportError => "transport-error",
            Shape::None => "none",
        }
    }

    pub fn is_none(self) -> bool {
        self == Shape::None
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::RECOGNIZABLE
            .into_iter()
            .chain(std::iter::once(Shape::None))
            .find(|shape| shape.name() == s)
            .ok_or_else(|| Error::UnknownShape(s.to_string()))
    }
}
