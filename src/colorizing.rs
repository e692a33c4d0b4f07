//! Shape colorizers.
//!
//! A colorizer rewrites the content lines of a document it recognizes and
//! leaves everything else byte-identical. Lines are rewritten whole, at most
//! once per pass, through [`Line::replace`](crate::document::Line::replace).
//!
//! Scaffolding lines and lines that already carry an escape sequence are
//! never touched. The second rule is what lets chained colorizers (Bisect
//! followed by Log, say) run over the same document without repainting each
//! other's lines.

mod status;

use crate::detection::{is_painted, is_scaffolding, line_body};
use crate::document::Document;
use crate::markers::Group;
use crate::palette::Palette;
use crate::shape::Shape;

/// Marker groups a shape's colorizer walks, in the order they are tried.
pub fn groups(shape: Shape) -> &'static [Group] {
    match shape {
        Shape::Diff => &[Group::Diff],
        Shape::StatusLong => &[
            Group::StatusStaged,
            Group::StatusUnstaged,
            Group::StatusUnmerged,
            Group::StatusUntracked,
            Group::Status,
        ],
        Shape::StatusShort => &[Group::ShortStatus],
        Shape::Merge => &[Group::Merge, Group::Diffstat],
        Shape::Log => &[Group::Log, Group::Diffstat],
        Shape::Reflog => &[Group::Reflog],
        Shape::Branch => &[Group::Branch],
        Shape::StashList => &[Group::Stash],
        Shape::RemoteVerbose => &[Group::Remote],
        Shape::CheckIgnoreVerbose => &[Group::CheckIgnore],
        Shape::Blame => &[Group::Blame],
        Shape::Bisect => &[Group::Bisect],
        Shape::CountObjects => &[Group::CountObjects],
        Shape::Version => &[Group::Version],
        Shape::ConfigUsage => &[Group::Usage],
        Shape::TransportError => &[Group::Errors],
        Shape::None => &[],
    }
}

/// Run the colorizer for `shape` over `doc`. Returns the number of lines rewritten.
pub fn colorize(shape: Shape, doc: &mut Document, palette: &Palette) -> usize {
    let rewritten = match shape {
        Shape::StatusLong => status::colorize(doc, palette),
        Shape::None => 0,
        _ => {
            let groups = groups(shape);
            rewrite_lines(doc, |text| {
                groups.iter().find_map(|group| group.paint(text, palette))
            })
        }
    };

    tracing::trace!(
        target: "gitpaint.colorize",
        shape = %shape,
        rewritten,
        "colorizer pass finished"
    );
    rewritten
}

/// Offer every content line to `rewrite`; replace the line when it returns text.
///
/// `rewrite` sees the line without its `\r`, which is put back afterwards.
pub(crate) fn rewrite_lines<F>(doc: &mut Document, mut rewrite: F) -> usize
where
    F: FnMut(&str) -> Option<String>,
{
    let mut rewritten = 0;
    for line in doc.lines_mut() {
        let text = line.text();
        let body = line_body(text);
        if is_scaffolding(body) || is_painted(body) {
            continue;
        }
        let Some(mut replacement) = rewrite(body) else {
            continue;
        };
        if body.len() != text.len() {
            replacement.push('\r');
        }
        line.replace(&replacement);
        rewritten += 1;
    }
    rewritten
}
