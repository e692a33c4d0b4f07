//! Marker Table
//!
//! The single source of truth for how git output is recognized and colored.
//! Each [`Marker`] is a line regex with named capture groups, plus the color
//! token for the whole match (`scope`) and for individual captures. Markers
//! are organized in [`Group`]s; the imperative colorizers walk the groups of
//! their shape, and the grammar generator turns the very same groups into
//! declarative tokenizer rules.
//!
//! Within a group, markers are tried in declaration order and the first one
//! that matches a line owns it.

use crate::paint::LinePainter;
use crate::palette::{ColorToken, Palette};
use once_cell::sync::Lazy;
use regex::Regex;

/// One recognizable line form.
#[derive(Debug)]
pub struct Marker {
    /// Identifier, unique within its group.
    pub name: &'static str,
    /// Line regex in `regex` crate syntax.
    pub pattern: &'static str,
    /// Token for the matched text outside of listed captures.
    pub scope: Option<ColorToken>,
    /// Named captures that get their own token.
    pub captures: &'static [(&'static str, ColorToken)],
    /// Whether a match counts as evidence for the group's shape.
    pub evidence: bool,
    /// A representative line, used by tests and documentation.
    pub sample: &'static str,
}

/// Marker groups. Each is one entry of the generated grammar repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Diff,
    StatusStaged,
    StatusUnstaged,
    StatusUnmerged,
    StatusUntracked,
    Status,
    ShortStatus,
    Merge,
    Diffstat,
    Bisect,
    Log,
    Reflog,
    Branch,
    Stash,
    Remote,
    CheckIgnore,
    Blame,
    CountObjects,
    Version,
    Usage,
    Errors,
}

impl Group {
    /// All groups; the order matches the enum discriminants.
    pub const ALL: [Group; 21] = [
        Group::Diff,
        Group::StatusStaged,
        Group::StatusUnstaged,
        Group::StatusUnmerged,
        Group::StatusUntracked,
        Group::Status,
        Group::ShortStatus,
        Group::Merge,
        Group::Diffstat,
        Group::Bisect,
        Group::Log,
        Group::Reflog,
        Group::Branch,
        Group::Stash,
        Group::Remote,
        Group::CheckIgnore,
        Group::Blame,
        Group::CountObjects,
        Group::Version,
        Group::Usage,
        Group::Errors,
    ];

    /// Long-status sections. Their first marker is the section header.
    pub const SECTIONS: [Group; 4] = [
        Group::StatusStaged,
        Group::StatusUnstaged,
        Group::StatusUnmerged,
        Group::StatusUntracked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Group::Diff => "diff",
            Group::StatusStaged => "status-staged",
            Group::StatusUnstaged => "status-unstaged",
            Group::StatusUnmerged => "status-unmerged",
            Group::StatusUntracked => "status-untracked",
            Group::Status => "status",
            Group::ShortStatus => "short-status",
            Group::Merge => "merge",
            Group::Diffstat => "diffstat",
            Group::Bisect => "bisect",
            Group::Log => "log",
            Group::Reflog => "reflog",
            Group::Branch => "branch",
            Group::Stash => "stash",
            Group::Remote => "remote",
            Group::CheckIgnore => "check-ignore",
            Group::Blame => "blame",
            Group::CountObjects => "count-objects",
            Group::Version => "version",
            Group::Usage => "usage",
            Group::Errors => "errors",
        }
    }

    pub fn is_section(self) -> bool {
        Group::SECTIONS.contains(&self)
    }

    pub fn markers(self) -> &'static [Marker] {
        match self {
            Group::Diff => DIFF,
            Group::StatusStaged => STATUS_STAGED,
            Group::StatusUnstaged => STATUS_UNSTAGED,
            Group::StatusUnmerged => STATUS_UNMERGED,
            Group::StatusUntracked => STATUS_UNTRACKED,
            Group::Status => STATUS,
            Group::ShortStatus => SHORT_STATUS,
            Group::Merge => MERGE,
            Group::Diffstat => DIFFSTAT,
            Group::Bisect => BISECT,
            Group::Log => LOG,
            Group::Reflog => REFLOG,
            Group::Branch => BRANCH,
            Group::Stash => STASH,
            Group::Remote => REMOTE,
            Group::CheckIgnore => CHECK_IGNORE,
            Group::Blame => BLAME,
            Group::CountObjects => COUNT_OBJECTS,
            Group::Version => VERSION,
            Group::Usage => USAGE,
            Group::Errors => ERRORS,
        }
    }

    /// Compiled rules of this group, in declaration order.
    pub fn rules(self) -> &'static [Rule] {
        &COMPILED[self as usize]
    }

    /// Look up a compiled rule by marker name.
    pub fn rule(self, name: &str) -> Option<&'static Rule> {
        self.rules().iter().find(|rule| rule.marker.name == name)
    }

    /// The first rule of this group whose regex matches `text`.
    pub fn find(self, text: &str) -> Option<&'static Rule> {
        self.rules().iter().find(|rule| rule.is_match(text))
    }

    /// Paint `text` with the first rule of this group that matches it.
    pub fn paint(self, text: &str, palette: &Palette) -> Option<String> {
        self.find(text).and_then(|rule| rule.paint(text, palette))
    }
}

/// A marker with its compiled regex.
#[derive(Debug)]
pub struct Rule {
    pub marker: &'static Marker,
    pub regex: Regex,
}

impl Rule {
    fn compile(marker: &'static Marker) -> Self {
        let regex = Regex::new(marker.pattern).unwrap();
        Self { marker, regex }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Split `text` into plain and painted segments according to this marker.
    ///
    /// Leading indentation and text outside the whole match are never
    /// painted. Returns `None` if the regex does not match.
    pub fn painter<'t>(&self, text: &'t str) -> Option<LinePainter<'t>> {
        let caps = self.regex.captures(text)?;
        let whole = caps.get(0)?;
        let indent = text.len() - text.trim_start().len();
        let scope_from = indent.max(whole.start());
        let scope_to = whole.end();

        let mut spans: Vec<(usize, usize, ColorToken)> = self
            .marker
            .captures
            .iter()
            .filter_map(|(name, token)| {
                caps.name(name)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| (m.start(), m.end(), *token))
            })
            .collect();
        spans.sort_by_key(|(start, _, _)| *start);

        let mut painter = LinePainter::new();
        let mut pos = 0;
        for (start, end, token) in spans {
            // Nested captures: the outer one wins.
            if start < pos {
                continue;
            }
            self.paint_gap(&mut painter, text, pos, start, scope_from, scope_to);
            painter.paint(token, &text[start..end]);
            pos = end;
        }
        self.paint_gap(&mut painter, text, pos, text.len(), scope_from, scope_to);
        Some(painter)
    }

    /// Render `text` through this marker. `None` if it does not match or
    /// nothing on the line would be colored.
    pub fn paint(&self, text: &str, palette: &Palette) -> Option<String> {
        let painter = self.painter(text)?;
        painter.is_painted().then(|| painter.render(palette))
    }

    fn paint_gap<'t>(
        &self,
        painter: &mut LinePainter<'t>,
        text: &'t str,
        from: usize,
        to: usize,
        scope_from: usize,
        scope_to: usize,
    ) {
        if from >= to {
            return;
        }
        let a = scope_from.clamp(from, to);
        let b = scope_to.clamp(from, to).max(a);
        painter.plain(&text[from..a]);
        match self.marker.scope {
            Some(token) => painter.paint(token, &text[a..b]),
            None => painter.plain(&text[a..b]),
        };
        painter.plain(&text[b..to]);
    }
}

static COMPILED: Lazy<Vec<Vec<Rule>>> = Lazy::new(|| {
    Group::ALL
        .iter()
        .map(|group| group.markers().iter().map(Rule::compile).collect())
        .collect()
});

use ColorToken as T;

const DIFF: &[Marker] = &[
    Marker {
        name: "header",
        pattern: r"^diff --(?:git|cc|combined) .*$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: true,
        sample: "diff --git a/src/main.rs b/src/main.rs",
    },
    Marker {
        name: "index",
        pattern: r"^index [0-9a-f]+(?:,[0-9a-f]+)*\.\.[0-9a-f]+.*$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: "index 3b18e51..a4f9c2d 100644",
    },
    Marker {
        name: "mode",
        pattern: r"^(?:(?:new|deleted) file mode|old mode|new mode) \d+$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: "new file mode 100644",
    },
    Marker {
        name: "rename",
        pattern: r"^(?:(?:rename|copy) (?:from|to) .+|(?:dis)?similarity index \d+%)$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: "similarity index 90%",
    },
    Marker {
        name: "binary",
        pattern: r"^Binary files .+ differ$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: "Binary files a/logo.png and b/logo.png differ",
    },
    Marker {
        name: "file-old",
        pattern: r"^--- .*$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: "--- a/src/main.rs",
    },
    Marker {
        name: "file-new",
        pattern: r"^\+\+\+ .*$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: "+++ b/src/main.rs",
    },
    Marker {
        name: "hunk",
        pattern: r"^(?P<range>@@@? [-+0-9, ]+ @@@?)(?P<context>.*)$",
        scope: None,
        captures: &[("range", T::Hunk)],
        evidence: false,
        sample: "@@ -1,4 +1,5 @@ fn main() {",
    },
    Marker {
        name: "no-newline",
        pattern: r"^\\ No newline at end of file$",
        scope: Some(T::Meta),
        captures: &[],
        evidence: false,
        sample: r"\ No newline at end of file",
    },
    Marker {
        name: "added",
        pattern: r"^\+.*$",
        scope: Some(T::Added),
        captures: &[],
        evidence: false,
        sample: "+    println!(\"hello\");",
    },
    Marker {
        name: "removed",
        pattern: r"^-.*$",
        scope: Some(T::Removed),
        captures: &[],
        evidence: false,
        sample: "-    println!(\"hi\");",
    },
];

const STATUS_STAGED: &[Marker] = &[
    Marker {
        name: "header",
        pattern: r"^Changes to be committed:$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: "Changes to be committed:",
    },
    Marker {
        name: "hint",
        pattern: r"^\s+\(.*\)$",
        scope: Some(T::Success),
        captures: &[],
        evidence: false,
        sample: "  (use \"git restore --staged <file>...\" to unstage)",
    },
    Marker {
        name: "entry",
        pattern: r"^\s+(?P<action>(?:new file|modified|deleted|renamed|copied|typechange):)\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("action", T::Success), ("path", T::PathStaged)],
        evidence: false,
        sample: "\tnew file:   src/lib.rs",
    },
];

const STATUS_UNSTAGED: &[Marker] = &[
    Marker {
        name: "header",
        pattern: r"^Changes not staged for commit:$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "Changes not staged for commit:",
    },
    Marker {
        name: "hint",
        pattern: r"^\s+\(.*\)$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: false,
        sample: "  (use \"git add <file>...\" to update what will be committed)",
    },
    Marker {
        name: "entry",
        pattern: r"^\s+(?P<action>(?:new file|modified|deleted|renamed|copied|typechange):)\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("action", T::Danger), ("path", T::PathUnstaged)],
        evidence: false,
        sample: "\tmodified:   README.md",
    },
];

const STATUS_UNMERGED: &[Marker] = &[
    Marker {
        name: "header",
        pattern: r"^Unmerged paths:$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "Unmerged paths:",
    },
    Marker {
        name: "hint",
        pattern: r"^\s+\(.*\)$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: false,
        sample: "  (use \"git add <file>...\" to mark resolution)",
    },
    Marker {
        name: "entry",
        pattern: r"^\s+(?P<action>(?:both modified|both deleted|both added|added by us|added by them|deleted by us|deleted by them):)\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("action", T::Danger), ("path", T::PathUnmerged)],
        evidence: false,
        sample: "\tboth modified:   index.html",
    },
];

const STATUS_UNTRACKED: &[Marker] = &[
    Marker {
        name: "header",
        pattern: r"^Untracked files:$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "Untracked files:",
    },
    Marker {
        name: "hint",
        pattern: r"^\s+\(.*\)$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: false,
        sample: "  (use \"git add <file>...\" to include in what will be committed)",
    },
    Marker {
        name: "entry",
        pattern: r"^\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("path", T::PathUntracked)],
        evidence: false,
        sample: "\tnotes.txt",
    },
];

const STATUS: &[Marker] = &[
    Marker {
        name: "on-branch",
        pattern: r"^On branch (?P<branch>\S+)$",
        scope: None,
        captures: &[("branch", T::Branch)],
        evidence: true,
        sample: "On branch main",
    },
    Marker {
        name: "detached",
        pattern: r"^(?P<label>HEAD detached (?:at|from)) (?P<rev>\S+)$",
        scope: None,
        captures: &[("label", T::Danger), ("rev", T::Hash)],
        evidence: true,
        sample: "HEAD detached at 3b18e51",
    },
    Marker {
        name: "tracking",
        pattern: r"^Your branch (?:is|and) .*$",
        scope: Some(T::Info),
        captures: &[],
        evidence: true,
        sample: "Your branch is up to date with 'origin/main'.",
    },
    Marker {
        name: "clean",
        pattern: r"^nothing to commit.*$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: "nothing to commit, working tree clean",
    },
    Marker {
        name: "resolved",
        pattern: r"^All conflicts fixed but you are still merging\.$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: "All conflicts fixed but you are still merging.",
    },
    Marker {
        name: "no-changes",
        pattern: r"^no changes added to commit.*$",
        scope: Some(T::Warning),
        captures: &[],
        evidence: true,
        sample: "no changes added to commit (use \"git add\" and/or \"git commit -a\")",
    },
    Marker {
        name: "untracked-only",
        pattern: r"^nothing added to commit but untracked files present.*$",
        scope: Some(T::Warning),
        captures: &[],
        evidence: true,
        sample: "nothing added to commit but untracked files present (use \"git add\" to track)",
    },
    Marker {
        name: "unmerged",
        pattern: r"^You have unmerged paths\.$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "You have unmerged paths.",
    },
    Marker {
        name: "in-progress",
        pattern: r"^(?:You are currently (?:rebasing|bisecting|cherry-picking|reverting|editing|splitting)|interactive rebase in progress).*$",
        scope: Some(T::Warning),
        captures: &[],
        evidence: true,
        sample: "You are currently bisecting, started from branch 'main'.",
    },
    Marker {
        name: "hint",
        pattern: r"^\s+\(.*\)$",
        scope: Some(T::Dim),
        captures: &[],
        evidence: false,
        sample: "  (use \"git push\" to publish your local commits)",
    },
];

// Legal two-letter codes per git-status(1); anything else is not short status.
const SHORT_STATUS: &[Marker] = &[
    Marker {
        name: "untracked",
        pattern: r"^(?P<code>\?\?)\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("code", T::Danger), ("path", T::Danger)],
        evidence: true,
        sample: "?? notes.txt",
    },
    Marker {
        name: "ignored",
        pattern: r"^(?P<code>!!)\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("code", T::Dim), ("path", T::Dim)],
        evidence: true,
        sample: "!! target/",
    },
    Marker {
        name: "unmerged",
        pattern: r"^(?P<code>DD|AU|UD|UA|DU|AA|UU)\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("code", T::Danger), ("path", T::Danger)],
        evidence: true,
        sample: "UU index.html",
    },
    Marker {
        name: "both",
        pattern: r"^(?P<index>[MTARC])(?P<worktree>[MTD])\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[
            ("index", T::Success),
            ("worktree", T::Danger),
            ("path", T::Danger),
        ],
        evidence: true,
        sample: "MM src/lib.rs",
    },
    Marker {
        name: "worktree",
        pattern: r"^ (?P<worktree>[AMDTRC])\s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("worktree", T::Danger), ("path", T::Danger)],
        evidence: true,
        sample: " M README.md",
    },
    Marker {
        name: "index",
        pattern: r"^(?P<index>[MTARCD]) \s+(?P<path>\S.*)$",
        scope: None,
        captures: &[("index", T::Success), ("path", T::Success)],
        evidence: true,
        sample: "A  src/new.rs",
    },
];

const MERGE: &[Marker] = &[
    Marker {
        name: "updating",
        pattern: r"^Updating (?P<from>[0-9a-f]{7,40})\.\.(?P<to>[0-9a-f]{7,40})$",
        scope: Some(T::Info),
        captures: &[("from", T::Hash), ("to", T::Hash)],
        evidence: true,
        sample: "Updating 3b18e51..a4f9c2d",
    },
    Marker {
        name: "fast-forward",
        pattern: r"^Fast-forward$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: "Fast-forward",
    },
    Marker {
        name: "merge-made",
        pattern: r"^Merge made by .*$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: "Merge made by the 'ort' strategy.",
    },
    Marker {
        name: "up-to-date",
        pattern: r"^Already up[ -]to[ -]date\.?$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: "Already up to date.",
    },
    Marker {
        name: "auto-merging",
        pattern: r"^Auto-merging .+$",
        scope: Some(T::Dim),
        captures: &[],
        evidence: true,
        sample: "Auto-merging index.html",
    },
    Marker {
        name: "merge-failed",
        pattern: r"^Automatic merge failed.*$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "Automatic merge failed; fix conflicts and then commit the result.",
    },
    Marker {
        name: "create-mode",
        pattern: r"^\s*create mode \d{6} .+$",
        scope: Some(T::Success),
        captures: &[],
        evidence: true,
        sample: " create mode 100644 src/new.rs",
    },
    Marker {
        name: "delete-mode",
        pattern: r"^\s*delete mode \d{6} .+$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: " delete mode 100644 src/old.rs",
    },
];

const DIFFSTAT: &[Marker] = &[
    Marker {
        name: "file",
        pattern: r"^\s*(?P<path>\S.*?)\s+\|\s+(?P<count>\d+)\s*(?P<added>\+*)(?P<removed>-*)$",
        scope: None,
        captures: &[
            ("count", T::Info),
            ("added", T::Added),
            ("removed", T::Removed),
        ],
        evidence: false,
        sample: " src/main.rs | 12 +++++++++---",
    },
    Marker {
        name: "summary",
        pattern: r"^\s*(?P<files>\d+) files? changed(?:, (?P<insertions>\d+) insertions?\(\+\))?(?:, (?P<deletions>\d+) deletions?\(-\))?$",
        scope: None,
        captures: &[
            ("files", T::Info),
            ("insertions", T::Added),
            ("deletions", T::Removed),
        ],
        evidence: false,
        sample: " 2 files changed, 9 insertions(+), 3 deletions(-)",
    },
];

const BISECT: &[Marker] = &[
    Marker {
        name: "bisecting",
        pattern: r"^Bisecting: .*$",
        scope: Some(T::Info),
        captures: &[],
        evidence: true,
        sample: "Bisecting: 3 revisions left to test after this (roughly 2 steps)",
    },
    Marker {
        name: "first-bad",
        pattern: r"^(?P<hash>[0-9a-f]{7,40}(?:\.\.\.)?) is the first bad commit$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "a4f9c2d8e1b7 is the first bad commit",
    },
    Marker {
        name: "step",
        pattern: r"^\[(?P<hash>[0-9a-f]{4,40}(?:\.\.\.)?)\] (?P<subject>.*)$",
        scope: None,
        captures: &[("hash", T::Hash)],
        evidence: true,
        sample: "[a4f9c2d8e1b7...] Refactor the parser",
    },
    Marker {
        name: "waiting",
        pattern: r"^status: waiting for .*$",
        scope: Some(T::Dim),
        captures: &[],
        evidence: true,
        sample: "status: waiting for both good and bad commits",
    },
];

const LOG: &[Marker] = &[
    Marker {
        name: "commit",
        pattern: r"^(?P<keyword>commit) (?P<hash>[0-9a-f]{7,40})(?: (?P<refs>\(.+\)))?$",
        scope: None,
        captures: &[
            ("keyword", T::Dim),
            ("hash", T::Hash),
            ("refs", T::Ref),
        ],
        evidence: true,
        sample: "commit a4f9c2d8e1b7 (HEAD -> main, origin/main)",
    },
    Marker {
        name: "merge-parents",
        pattern: r"^(?P<key>Merge:)\s+(?P<parents>[0-9a-f]{7,40}(?: [0-9a-f]{7,40})+)$",
        scope: None,
        captures: &[("key", T::Dim), ("parents", T::Hash)],
        evidence: false,
        sample: "Merge: 3b18e51 a4f9c2d",
    },
    Marker {
        name: "author",
        pattern: r"^Author:\s+.+$",
        scope: Some(T::Info),
        captures: &[],
        evidence: false,
        sample: "Author: Ada Lovelace <ada@example.com>",
    },
    Marker {
        name: "date",
        pattern: r"^Date:\s+.+$",
        scope: Some(T::Dim),
        captures: &[],
        evidence: false,
        sample: "Date:   Mon Jan 1 12:00:00 2024 +0800",
    },
    Marker {
        name: "subject",
        pattern: r"^ {4}(?P<subject>\S.*)$",
        scope: None,
        captures: &[("subject", T::Emphasis)],
        evidence: false,
        sample: "    Fix off-by-one in the pager",
    },
    Marker {
        name: "oneline",
        pattern: r"^(?P<graph>[*|\\/ _]*?)(?P<hash>[0-9a-f]{7,40})(?: (?P<refs>\([^)]*\)))? (?P<subject>.*)$",
        scope: None,
        captures: &[("graph", T::Dim), ("hash", T::Hash), ("refs", T::Ref)],
        evidence: true,
        sample: "* a4f9c2d (HEAD -> main) Fix off-by-one in the pager",
    },
];

const REFLOG: &[Marker] = &[Marker {
    name: "entry",
    pattern: r"^(?P<hash>[0-9a-f]{7,40}) (?:(?P<refs>\([^)]*\)) )?(?P<selector>\S+@\{[^}]+\}): (?P<action>[^:]+): (?P<message>.*)$",
    scope: None,
    captures: &[
        ("hash", T::Hash),
        ("refs", T::Ref),
        ("selector", T::Info),
        ("action", T::Emphasis),
    ],
    evidence: true,
    sample: "a4f9c2d HEAD@{0}: commit: Fix off-by-one in the pager",
}];

const BRANCH: &[Marker] = &[
    Marker {
        name: "current",
        pattern: r"^(?P<marker>\*) (?P<name>\([^)]*\)|\S+)(?:\s+(?P<hash>[0-9a-f]{7,40})(?: (?P<upstream>\[[^\]]+\]))?(?:\s+.*)?)?$",
        scope: None,
        captures: &[
            ("marker", T::Branch),
            ("name", T::Branch),
            ("hash", T::Hash),
            ("upstream", T::Ref),
        ],
        evidence: true,
        sample: "* main a4f9c2d [origin/main] Fix off-by-one in the pager",
    },
    Marker {
        name: "worktree",
        pattern: r"^(?P<marker>\+) (?P<name>\S+)(?:\s+(?P<hash>[0-9a-f]{7,40})(?:\s+.*)?)?$",
        scope: None,
        captures: &[
            ("marker", T::Info),
            ("name", T::Info),
            ("hash", T::Hash),
        ],
        evidence: false,
        sample: "+ hotfix 3b18e51 Patch release",
    },
    Marker {
        name: "remote",
        pattern: r"^\s{2,}(?P<name>remotes/\S+)(?: -> (?P<target>\S+))?(?:\s+(?P<hash>[0-9a-f]{7,40})(?:\s+.*)?)?$",
        scope: None,
        captures: &[
            ("name", T::Danger),
            ("target", T::Ref),
            ("hash", T::Hash),
        ],
        evidence: false,
        sample: "  remotes/origin/HEAD -> origin/main",
    },
    Marker {
        name: "local",
        pattern: r"^\s{2,}(?P<name>[^\s*+]\S*)(?:\s+(?P<hash>[0-9a-f]{7,40})(?: (?P<upstream>\[[^\]]+\]))?(?:\s+.*)?)?$",
        scope: None,
        captures: &[("hash", T::Hash), ("upstream", T::Ref)],
        evidence: false,
        sample: "  feature/login 3b18e51 Add login form",
    },
];

const STASH: &[Marker] = &[Marker {
    name: "entry",
    pattern: r"^(?P<stash>stash@\{\d+\}): (?:(?P<origin>(?:WIP on|On) [^:]+): )?(?P<message>.*)$",
    scope: None,
    captures: &[("stash", T::Warning), ("origin", T::Info)],
    evidence: true,
    sample: "stash@{0}: WIP on main: a4f9c2d Fix off-by-one in the pager",
}];

const REMOTE: &[Marker] = &[Marker {
    name: "entry",
    pattern: r"^(?P<name>\S+)\s+(?P<url>\S+)\s+(?P<direction>\((?:fetch|push)\))$",
    scope: None,
    captures: &[
        ("name", T::Success),
        ("url", T::Info),
        ("direction", T::Dim),
    ],
    evidence: true,
    sample: "origin\thttps://github.com/example/project.git (fetch)",
}];

const CHECK_IGNORE: &[Marker] = &[Marker {
    name: "entry",
    pattern: r"^(?P<source>[^:\s]+):(?P<line>\d+):(?P<pattern>\S*)\s+(?P<path>\S.*)$",
    scope: None,
    captures: &[
        ("source", T::Info),
        ("line", T::Dim),
        ("pattern", T::Warning),
        ("path", T::Emphasis),
    ],
    evidence: true,
    sample: ".gitignore:3:*.log\tdebug.log",
}];

const BLAME: &[Marker] = &[Marker {
    name: "entry",
    pattern: r"^(?P<hash>\^?[0-9a-f]{7,40})\s+(?:(?P<file>\S+)\s+)?\((?P<meta>[^)]*?\s\d+)\)\s?(?P<code>.*)$",
    scope: None,
    captures: &[("hash", T::Hash), ("file", T::Info), ("meta", T::Dim)],
    evidence: true,
    sample: "a4f9c2d8 (Ada Lovelace 2024-01-01 12:00:00 +0800  1) fn main() {",
}];

const COUNT_OBJECTS: &[Marker] = &[
    Marker {
        name: "field",
        pattern: r"^(?P<key>count|size|in-pack|packs|size-pack|prune-packable|garbage|size-garbage): (?P<value>.+)$",
        scope: None,
        captures: &[("key", T::Info), ("value", T::Emphasis)],
        evidence: true,
        sample: "size-pack: 1024",
    },
    Marker {
        name: "summary",
        pattern: r"^(?P<objects>\d+) objects?, (?P<size>\d+) kilobytes$",
        scope: None,
        captures: &[("objects", T::Emphasis), ("size", T::Emphasis)],
        evidence: true,
        sample: "12 objects, 48 kilobytes",
    },
];

const VERSION: &[Marker] = &[Marker {
    name: "version",
    pattern: r"^(?P<label>git version) (?P<version>\d+(?:\.\d+)+\S*)(?: \((?P<build>[^)]*)\))?$",
    scope: None,
    captures: &[
        ("label", T::Dim),
        ("version", T::Success),
        ("build", T::Dim),
    ],
    evidence: true,
    sample: "git version 2.43.0 (Apple Git-145)",
}];

const USAGE: &[Marker] = &[
    Marker {
        name: "usage",
        pattern: r"^(?P<label>usage:) (?P<command>git [\w-]+)(?P<rest>.*)$",
        scope: None,
        captures: &[("label", T::Warning), ("command", T::Emphasis)],
        evidence: true,
        sample: "usage: git config [<options>]",
    },
    Marker {
        name: "or",
        pattern: r"^\s+(?P<label>or:) (?P<command>git [\w-]+)(?P<rest>.*)$",
        scope: None,
        captures: &[("label", T::Warning), ("command", T::Emphasis)],
        evidence: false,
        sample: "   or: git config --get name",
    },
    Marker {
        name: "option",
        pattern: r"^\s+(?P<option>-{1,2}[A-Za-z0-9][^\s,]*(?:, -{1,2}[^\s,]+)*(?: <[^>]+>|\[=<[^>]+>\])?)\s{2,}(?P<description>\S.*)$",
        scope: None,
        captures: &[("option", T::Info)],
        evidence: false,
        sample: "    -f, --file <file>     use given config file",
    },
];

const ERRORS: &[Marker] = &[
    Marker {
        name: "fatal",
        pattern: r"^fatal:.*$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "fatal: unable to access 'https://github.com/example/project.git/'",
    },
    Marker {
        name: "error",
        pattern: r"^error:.*$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "error: failed to push some refs to 'origin'",
    },
    Marker {
        name: "warning",
        pattern: r"^warning:.*$",
        scope: Some(T::Warning),
        captures: &[],
        evidence: true,
        sample: "warning: LF will be replaced by CRLF in README.md.",
    },
    Marker {
        name: "hint",
        pattern: r"^hint:.*$",
        scope: Some(T::Dim),
        captures: &[],
        evidence: true,
        sample: "hint: Updates were rejected because the tip of your current branch is behind",
    },
    Marker {
        name: "remote",
        pattern: r"^(?P<label>remote:)(?P<message>.*)$",
        scope: None,
        captures: &[("label", T::Info)],
        evidence: true,
        sample: "remote: Enumerating objects: 5, done.",
    },
    Marker {
        name: "rejected",
        pattern: r"^\s*!\s+\[(?:remote )?rejected\].*$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: " ! [rejected]        main -> main (fetch first)",
    },
    Marker {
        name: "conflict",
        pattern: r"^CONFLICT \([^)]+\): .*$",
        scope: Some(T::Danger),
        captures: &[],
        evidence: true,
        sample: "CONFLICT (content): Merge conflict in index.html",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_pattern_compiles() {
        for group in Group::ALL {
            assert_eq!(group.rules().len(), group.markers().len());
        }
    }

    #[test]
    fn group_order_matches_discriminants() {
        for (i, group) in Group::ALL.into_iter().enumerate() {
            assert_eq!(group as usize, i);
        }
    }

    #[test]
    fn marker_names_are_unique_per_group() {
        for group in Group::ALL {
            let names: HashSet<_> = group.markers().iter().map(|m| m.name).collect();
            assert_eq!(names.len(), group.markers().len(), "{}", group.name());
        }
    }

    #[test]
    fn captures_name_real_groups() {
        for group in Group::ALL {
            for rule in group.rules() {
                let names: HashSet<_> = rule.regex.capture_names().flatten().collect();
                for (capture, _) in rule.marker.captures {
                    assert!(
                        names.contains(capture),
                        "{}/{} lists unknown capture {capture}",
                        group.name(),
                        rule.marker.name
                    );
                }
            }
        }
    }

    #[test]
    fn every_sample_matches_its_own_marker() {
        for group in Group::ALL {
            for rule in group.rules() {
                assert!(
                    rule.is_match(rule.marker.sample),
                    "{}/{} does not match its sample",
                    group.name(),
                    rule.marker.name
                );
            }
        }
    }

    #[test]
    fn sections_start_with_their_header() {
        for group in Group::SECTIONS {
            assert!(group.is_section());
            assert_eq!(group.markers()[0].name, "header");
        }
        assert!(!Group::Status.is_section());
    }

    #[test]
    fn painter_colors_each_capture_with_its_token() {
        let rule = Group::Log.rule("commit").unwrap();
        let painter = rule.painter("commit a4f9c2d (HEAD -> main)").unwrap();
        let painted: Vec<_> = painter
            .segments()
            .iter()
            .filter_map(|s| s.token.map(|t| (s.text, t)))
            .collect();
        assert_eq!(
            painted,
            vec![
                ("commit", ColorToken::Dim),
                ("a4f9c2d", ColorToken::Hash),
                ("(HEAD -> main)", ColorToken::Ref),
            ]
        );
    }

    #[test]
    fn scope_skips_indentation() {
        let rule = Group::Merge.rule("create-mode").unwrap();
        let painter = rule.painter(" create mode 100644 a.txt").unwrap();
        let segments = painter.segments();
        assert_eq!(segments[0].text, " ");
        assert_eq!(segments[0].token, None);
        assert_eq!(segments[1].text, "create mode 100644 a.txt");
        assert_eq!(segments[1].token, Some(ColorToken::Success));
    }

    #[test]
    fn diffstat_splits_graph_runs() {
        let rule = Group::Diffstat.rule("file").unwrap();
        let painter = rule.painter(" src/main.rs | 12 +++++++++---").unwrap();
        let painted: Vec<_> = painter
            .segments()
            .iter()
            .filter_map(|s| s.token.map(|t| (s.text, t)))
            .collect();
        assert_eq!(
            painted,
            vec![
                ("12", ColorToken::Info),
                ("+++++++++", ColorToken::Added),
                ("---", ColorToken::Removed),
            ]
        );
    }

    #[test]
    fn short_status_rejects_illegal_codes() {
        for line in ["MA file", "  file", "XY file", "DM file", " U file"] {
            assert!(
                Group::ShortStatus.find(line).is_none(),
                "{line:?} should not be short status"
            );
        }
        for line in ["?? a", "!! a", "UU a", "MM a", " M a", "M  a", "D  a", " A a", "RM a"] {
            assert!(
                Group::ShortStatus.find(line).is_some(),
                "{line:?} should be short status"
            );
        }
    }

    #[test]
    fn nothing_painted_means_no_rewrite() {
        let rule = Group::Branch.rule("local").unwrap();
        assert!(rule.is_match("  develop"));
        assert_eq!(rule.paint("  develop", &Palette::default()), None);
    }
}
