//! # gitpaint
//!
//! Recognizes literal `git` CLI output pasted into documentation and puts the
//! terminal colors back.
//!
//! A code block is wrapped in a [`Document`]. The [`Engine`] folds its
//! language tag, classifies it as one of a closed catalog of [`Shape`]s and
//! rewrites the lines it recognizes with embedded ANSI SGR sequences:
//!
//! ```text
//! let engine = Engine::new();
//! let colored = engine.colorize_str("git", "?? newfile.txt\n");
//! assert_eq!(colored, "\u{1b}[31m?? newfile.txt\u{1b}[0m\n");
//! ```
//!
//! The same marker table also drives [`grammar::Grammar`], a declarative
//! TextMate-style grammar for tokenizing highlighters.
//!
//! ## Layout
//!
//! - [`document`]: lines and the whole-line edit primitive
//! - [`markers`]: the shared marker table
//! - [`detection`]: one predicate per shape
//! - [`colorizing`]: one rewrite pass per shape
//! - [`engine`]: dispatch, tag folding and escape normalization
//! - [`grammar`]: the declarative backend
//! - [`palette`], [`config`], [`error`]: ambient plumbing

pub mod colorizing;
pub mod config;
pub mod detection;
pub mod document;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod markers;
pub mod paint;
pub mod palette;
pub mod shape;

pub use document::{Document, Line};
pub use engine::{classify, Engine, Outcome};
pub use error::{Error, Result};
pub use palette::{ColorToken, Palette};
pub use shape::Shape;
