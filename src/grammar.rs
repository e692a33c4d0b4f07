//! Declarative grammar generation.
//!
//! Builds a TextMate-style grammar from the marker table so an external
//! tokenizer assigns the same color tokens the imperative colorizers do.
//! Each marker group becomes one repository entry. Long-status sections
//! become begin/end blocks that stay open until the next non-indented line,
//! which mirrors the section state kept by the status colorizer.
//!
//! Scope names are `gitbash.<token>`, plus `gitbash.prompt` for prompt
//! markers in the scaffolding entry. Named groups are emitted as
//! `(?<name>..)` and captures are keyed by group index.

use crate::config::LanguageConfig;
use crate::error::Result;
use crate::markers::{Group, Rule};
use crate::palette::ColorToken;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DISPLAY_NAME: &str = "Git Bash Output";

/// Repository key of the entry that swallows prompts, comments and blanks.
pub const SCAFFOLDING: &str = "scaffolding";

/// Prompt lines; capture 1 is the prompt marker.
const PROMPT_PATTERN: &str = r"^\s*([$>])(?:\s.*)?$";

/// Scope of the prompt marker. Prompts are never painted, so this is not a
/// palette token.
pub const PROMPT_SCOPE: &str = "gitbash.prompt";

/// Blank lines and comment-like lines, which only count at column 0.
const SCAFFOLDING_PATTERN: &str = r"^(?:\s*|(?:#|//|<!--|/\*).*)$";

/// Sections end at the first non-indented line; blank lines keep them open.
const SECTION_END: &str = r"^(?=\S)";

/// Top-level include order after the scaffolding entry. Earlier entries win
/// when two patterns match the same line.
const INCLUDE_ORDER: [Group; 21] = [
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
    Group::Reflog,
    Group::Blame,
    Group::Log,
    Group::Branch,
    Group::Stash,
    Group::Remote,
    Group::CheckIgnore,
    Group::CountObjects,
    Group::Version,
    Group::Usage,
    Group::Errors,
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub display_name: String,
    pub name: String,
    pub aliases: Vec<String>,
    pub scope_name: String,
    pub patterns: Vec<Pattern>,
    pub repository: BTreeMap<String, RepositoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryEntry {
    pub patterns: Vec<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    pub name: String,
}

impl From<ColorToken> for Capture {
    fn from(token: ColorToken) -> Self {
        Self {
            name: token.scope(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    Include {
        include: String,
    },
    Match {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(rename = "match")]
        regex: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        captures: BTreeMap<String, Capture>,
    },
    Block {
        begin: String,
        #[serde(rename = "beginCaptures", default)]
        begin_captures: BTreeMap<String, Capture>,
        end: String,
        patterns: Vec<Pattern>,
    },
}

impl Pattern {
    fn include(key: &str) -> Self {
        Pattern::Include {
            include: format!("#{key}"),
        }
    }
}

impl Grammar {
    /// The grammar for the built-in language tags.
    pub fn generate() -> Self {
        Self::for_language(&LanguageConfig::default())
    }

    /// The grammar named after `language.canonical` with `language.aliases`.
    pub fn for_language(language: &LanguageConfig) -> Self {
        let mut repository = BTreeMap::new();
        repository.insert(
            SCAFFOLDING.to_string(),
            RepositoryEntry {
                patterns: vec![
                    Pattern::Match {
                        name: None,
                        regex: PROMPT_PATTERN.to_string(),
                        captures: BTreeMap::from([(
                            "1".to_string(),
                            Capture {
                                name: PROMPT_SCOPE.to_string(),
                            },
                        )]),
                    },
                    Pattern::Match {
                        name: None,
                        regex: SCAFFOLDING_PATTERN.to_string(),
                        captures: BTreeMap::new(),
                    },
                ],
            },
        );
        for group in Group::ALL {
            repository.insert(group.name().to_string(), group_entry(group));
        }

        let patterns = std::iter::once(SCAFFOLDING)
            .chain(INCLUDE_ORDER.iter().map(|group| group.name()))
            .map(Pattern::include)
            .collect();

        Self {
            display_name: DISPLAY_NAME.to_string(),
            name: language.canonical.clone(),
            aliases: language.aliases.clone(),
            scope_name: format!("source.{}", language.canonical),
            patterns,
            repository,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

fn group_entry(group: Group) -> RepositoryEntry {
    let rules = group.rules();
    let patterns = match rules.split_first() {
        Some((header, body)) if group.is_section() => vec![section_block(header, body)],
        _ => rules.iter().map(match_pattern).collect(),
    };
    RepositoryEntry { patterns }
}

fn section_block(header: &Rule, body: &[Rule]) -> Pattern {
    let begin_captures = header
        .marker
        .scope
        .map(|token| ("0".to_string(), Capture::from(token)))
        .into_iter()
        .collect();
    Pattern::Block {
        begin: textmate_regex(header.marker.pattern),
        begin_captures,
        end: SECTION_END.to_string(),
        patterns: body.iter().map(match_pattern).collect(),
    }
}

fn match_pattern(rule: &Rule) -> Pattern {
    let names: Vec<Option<&str>> = rule.regex.capture_names().collect();
    let captures = rule
        .marker
        .captures
        .iter()
        .filter_map(|(capture, token)| {
            let index = names.iter().position(|name| *name == Some(*capture))?;
            Some((index.to_string(), Capture::from(*token)))
        })
        .collect();

    Pattern::Match {
        name: rule.marker.scope.map(ColorToken::scope),
        regex: textmate_regex(rule.marker.pattern),
        captures,
    }
}

/// `regex` crate named groups to the Oniguruma spelling.
fn textmate_regex(pattern: &str) -> String {
    pattern.replace("(?P<", "(?<")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn all_patterns(grammar: &Grammar) -> Vec<&Pattern> {
        fn walk<'g>(patterns: &'g [Pattern], out: &mut Vec<&'g Pattern>) {
            for pattern in patterns {
                out.push(pattern);
                if let Pattern::Block { patterns, .. } = pattern {
                    walk(patterns, out);
                }
            }
        }
        let mut out = Vec::new();
        for entry in grammar.repository.values() {
            walk(&entry.patterns, &mut out);
        }
        out
    }

    #[test]
    fn header_fields() {
        let grammar = Grammar::generate();
        assert_eq!(grammar.name, "git-bash");
        assert_eq!(grammar.scope_name, "source.git-bash");
        assert_eq!(grammar.display_name, "Git Bash Output");
        assert_eq!(grammar.aliases, vec!["git", "git-output", "gitbash"]);
    }

    #[test]
    fn every_group_is_included_once() {
        let grammar = Grammar::generate();
        assert_eq!(grammar.repository.len(), Group::ALL.len() + 1);
        assert_eq!(grammar.patterns.len(), grammar.repository.len());
        assert_eq!(grammar.patterns[0], Pattern::include(SCAFFOLDING));
        for pattern in &grammar.patterns {
            let Pattern::Include { include } = pattern else {
                panic!("top level should only include: {pattern:?}");
            };
            let key = include.trim_start_matches('#');
            assert!(grammar.repository.contains_key(key), "dangling {include}");
        }
    }

    #[test]
    fn scopes_are_color_tokens() {
        let grammar = Grammar::generate();
        let scopes: Vec<String> = ColorToken::ALL.iter().map(|t| t.scope()).collect();
        for pattern in all_patterns(&grammar) {
            let mut names: Vec<&String> = Vec::new();
            match pattern {
                Pattern::Match { name, captures, .. } => {
                    names.extend(name.iter());
                    names.extend(captures.values().map(|c| &c.name));
                }
                Pattern::Block { begin_captures, .. } => {
                    names.extend(begin_captures.values().map(|c| &c.name));
                }
                Pattern::Include { .. } => {}
            }
            for name in names.into_iter().filter(|name| *name != PROMPT_SCOPE) {
                assert!(scopes.contains(name), "unexpected scope {name}");
            }
        }
    }

    #[test]
    fn capture_indices_follow_group_order() {
        let grammar = Grammar::generate();
        let Pattern::Match { captures, regex, .. } = &grammar.repository["log"].patterns[0] else {
            panic!("log commit should be a match rule");
        };
        assert!(regex.starts_with("^(?<keyword>commit)"));
        assert_eq!(captures["1"].name, "gitbash.dim");
        assert_eq!(captures["2"].name, "gitbash.hash");
        assert_eq!(captures["3"].name, "gitbash.ref");
    }

    #[test]
    fn converted_patterns_still_match_their_samples() {
        for group in Group::ALL {
            for rule in group.rules() {
                let converted = textmate_regex(rule.marker.pattern);
                assert!(!converted.contains("(?P<"));
                let regex = Regex::new(&converted).expect("converted pattern compiles");
                assert!(regex.is_match(rule.marker.sample), "{}", rule.marker.name);
            }
        }
    }

    #[test]
    fn sections_are_blocks() {
        let grammar = Grammar::generate();
        for group in Group::SECTIONS {
            let entry = &grammar.repository[group.name()];
            let [Pattern::Block { begin_captures, end, patterns, .. }] = entry.patterns.as_slice()
            else {
                panic!("{} should be a single block", group.name());
            };
            assert_eq!(end, SECTION_END);
            assert!(begin_captures.contains_key("0"));
            assert_eq!(patterns.len(), group.markers().len() - 1);
        }
    }

    #[test]
    fn scaffolding_patterns_agree_with_detection() {
        let prompt = Regex::new(PROMPT_PATTERN).expect("compiles");
        let rest = Regex::new(SCAFFOLDING_PATTERN).expect("compiles");
        let matches = |line: &str| prompt.is_match(line) || rest.is_match(line);

        for line in ["", "   ", "$ git status", "  $ git log", "$", "> git log", "# note", "// x", "<!-- x", "/* x"] {
            assert!(matches(line), "{line:?}");
            assert!(crate::detection::is_scaffolding(line));
        }
        for line in ["$HOME", "On branch main", "+new", "    #42 fix crash", "\t#draft#", "  // kept"] {
            assert!(!matches(line), "{line:?}");
            assert!(!crate::detection::is_scaffolding(line));
        }
    }

    #[test]
    fn prompt_marker_is_scoped() {
        let grammar = Grammar::generate();
        let Pattern::Match { regex, captures, .. } = &grammar.repository[SCAFFOLDING].patterns[0]
        else {
            panic!("prompt should be a match rule");
        };
        let caps = Regex::new(regex)
            .expect("compiles")
            .captures("$ git status")
            .expect("prompt matches");
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("$"));
        assert_eq!(captures["1"].name, PROMPT_SCOPE);
    }

    #[test]
    fn json_round_trips() {
        let grammar = Grammar::generate();
        let json = grammar.to_json(true).expect("json");
        assert!(json.contains("\"scopeName\": \"source.git-bash\""));
        let parsed: Grammar = serde_json::from_str(&json).expect("parse back");
        assert_eq!(parsed, grammar);
    }

    #[test]
    fn language_config_names_the_grammar() {
        let language = LanguageConfig {
            canonical: "git-console".to_string(),
            aliases: vec!["gitc".to_string()],
            ..LanguageConfig::default()
        };
        let grammar = Grammar::for_language(&language);
        assert_eq!(grammar.name, "git-console");
        assert_eq!(grammar.scope_name, "source.git-console");
        assert_eq!(grammar.aliases, vec!["gitc"]);
    }
}
