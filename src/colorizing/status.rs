//! Long-form `git status` colorizer.
//!
//! Entries and hints are colored by the section they appear in, so this pass
//! threads the current section through one forward scan of the document. A
//! section header opens a section. Any other non-indented content line closes
//! it; blank lines do not.

use super::rewrite_lines;
use crate::document::Document;
use crate::markers::{Group, Rule};
use crate::palette::Palette;

pub(super) fn colorize(doc: &mut Document, palette: &Palette) -> usize {
    let mut section: Option<Group> = None;

    rewrite_lines(doc, |text| {
        if let Some((group, header)) = section_header(text) {
            section = Some(group);
            return header.paint(text, palette);
        }
        if !text.starts_with(char::is_whitespace) {
            section = None;
        }

        section
            .and_then(|group| section_rule(group, text))
            .and_then(|rule| rule.paint(text, palette))
            .or_else(|| Group::Status.paint(text, palette))
    })
}

fn section_header(text: &str) -> Option<(Group, &'static Rule)> {
    Group::SECTIONS.into_iter().find_map(|group| {
        let header = group.rules().first()?;
        header.is_match(text).then_some((group, header))
    })
}

/// Hint and entry rules of a section, skipping its header.
fn section_rule(group: Group, text: &str) -> Option<&'static Rule> {
    group.rules().iter().skip(1).find(|rule| rule.is_match(text))
}
