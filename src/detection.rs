//! Shape Detection
//!
//! One pure predicate per [`Shape`]. Detectors only look at content lines:
//! blank lines, prompt lines and comment-like lines are authoring
//! scaffolding and never count as CLI output.
//!
//! Most shapes are recognized by a single line matching one of their
//! evidence markers. Diff, Branch and Log need a little more context and
//! have their own predicates below.

use crate::document::Document;
use crate::markers::{Group, Rule};
use crate::palette::ESC;
use crate::shape::Shape;

const COMMENT_PREFIXES: [&str; 4] = ["#", "//", "<!--", "/*"];

/// Phrases that only occur in an editor commit-message template.
const TEMPLATE_GUARDS: [&str; 2] = [
    "Please enter the commit message for your changes.",
    "Lines starting with '#' will be ignored",
];

/// Whether a line is blank, a prompt line or a comment-like line.
///
/// Comment markers only count at column 0: indented text such as a log
/// subject `    #42 fix crash` is output. Prompts may be indented.
pub fn is_scaffolding(text: &str) -> bool {
    if COMMENT_PREFIXES.iter().any(|prefix| text.starts_with(prefix)) {
        return true;
    }
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return true;
    }
    match trimmed.strip_prefix('$').or_else(|| trimmed.strip_prefix('>')) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Whether a line already carries an escape sequence.
pub fn is_painted(text: &str) -> bool {
    text.contains(ESC)
}

/// Strip the `\r` of a CRLF line ending.
pub(crate) fn line_body(text: &str) -> &str {
    text.strip_suffix('\r').unwrap_or(text)
}

/// The non-scaffolding lines of a document, without CR line endings.
pub fn content_lines(doc: &Document) -> impl Iterator<Item = &str> {
    doc.lines()
        .map(|line| line_body(line.text()))
        .filter(|text| !is_scaffolding(text))
}

/// Whether the document is an editor commit-message template.
pub fn is_commit_template(doc: &Document) -> bool {
    let raw = doc.raw_text();
    TEMPLATE_GUARDS.iter().any(|guard| raw.contains(guard))
}

/// Run the detector for `shape`. `Shape::None` never matches.
pub fn detect(shape: Shape, doc: &Document) -> bool {
    match shape {
        Shape::StatusLong => !is_commit_template(doc) && has_evidence(doc, &STATUS_LONG_GROUPS),
        Shape::StatusShort => !is_commit_template(doc) && has_evidence(doc, &[Group::ShortStatus]),
        Shape::Diff => is_diff(doc),
        Shape::Merge => has_evidence(doc, &[Group::Merge]),
        Shape::Log => is_log(doc),
        Shape::Reflog => has_evidence(doc, &[Group::Reflog]),
        Shape::Branch => is_branch_listing(doc),
        Shape::StashList => has_evidence(doc, &[Group::Stash]),
        Shape::RemoteVerbose => has_evidence(doc, &[Group::Remote]),
        Shape::CheckIgnoreVerbose => has_evidence(doc, &[Group::CheckIgnore]),
        Shape::Blame => has_evidence(doc, &[Group::Blame]),
        Shape::Bisect => has_evidence(doc, &[Group::Bisect]),
        Shape::CountObjects => has_evidence(doc, &[Group::CountObjects]),
        Shape::Version => has_evidence(doc, &[Group::Version]),
        Shape::ConfigUsage => has_evidence(doc, &[Group::Usage]),
        Shape::TransportError => has_evidence(doc, &[Group::Errors]),
        Shape::None => false,
    }
}

const STATUS_LONG_GROUPS: [Group; 5] = [
    Group::Status,
    Group::StatusStaged,
    Group::StatusUnstaged,
    Group::StatusUnmerged,
    Group::StatusUntracked,
];

fn has_evidence(doc: &Document, groups: &[Group]) -> bool {
    content_lines(doc).any(|line| {
        groups.iter().any(|group| {
            group
                .rules()
                .iter()
                .any(|rule| rule.marker.evidence && rule.is_match(line))
        })
    })
}

/// A diff header anywhere, or both a file marker and a hunk marker anywhere.
fn is_diff(doc: &Document) -> bool {
    let rule = |name| Group::Diff.rule(name);
    let (Some(header), Some(old), Some(new), Some(hunk)) =
        (rule("header"), rule("file-old"), rule("file-new"), rule("hunk"))
    else {
        return false;
    };

    let mut file_marker = false;
    let mut hunk_marker = false;
    for line in content_lines(doc) {
        if header.is_match(line) {
            return true;
        }
        file_marker |= old.is_match(line) || new.is_match(line);
        hunk_marker |= hunk.is_match(line);
    }
    file_marker && hunk_marker
}

/// Every content line is a branch line, and one of them is the current branch.
fn is_branch_listing(doc: &Document) -> bool {
    let mut saw_current = false;
    for line in content_lines(doc) {
        match Group::Branch.find(line) {
            Some(rule) if rule.marker.name == "current" => saw_current = true,
            Some(_) => {}
            None => return false,
        }
    }
    saw_current
}

/// A `commit <hash>` header, or a one-line entry that is neither a reflog
/// entry nor a blame line.
fn is_log(doc: &Document) -> bool {
    let (Some(commit), Some(oneline)) = (Group::Log.rule("commit"), Group::Log.rule("oneline"))
    else {
        return false;
    };

    content_lines(doc).any(|line| {
        commit.is_match(line)
            || (oneline_hash_has_digit(oneline, line)
                && Group::Reflog.find(line).is_none()
                && Group::Blame.find(line).is_none())
    })
}

/// Words like `deadbeef` also parse as a hash; an abbreviated commit id
/// without a single digit is rare enough to ignore.
fn oneline_hash_has_digit(oneline: &Rule, line: &str) -> bool {
    oneline
        .regex
        .captures(line)
        .and_then(|caps| caps.name("hash"))
        .is_some_and(|hash| hash.as_str().bytes().any(|b| b.is_ascii_digit()))
}
