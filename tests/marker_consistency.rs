//! The imperative colorizers and the generated grammar are two readings of
//! the same marker table; these tests keep them from drifting apart.

use gitpaint::colorizing::colorize;
use gitpaint::grammar::{Capture, Grammar, Pattern};
use gitpaint::markers::{Group, Rule};
use gitpaint::paint::Segment;
use gitpaint::{ColorToken, Document, Palette, Shape};
use regex::Regex;
use std::collections::BTreeMap;

/// The shape whose colorizer owns a group's lines.
fn shape_for(group: Group) -> Shape {
    match group {
        Group::Diff => Shape::Diff,
        Group::StatusStaged
        | Group::StatusUnstaged
        | Group::StatusUnmerged
        | Group::StatusUntracked
        | Group::Status => Shape::StatusLong,
        Group::ShortStatus => Shape::StatusShort,
        Group::Merge | Group::Diffstat => Shape::Merge,
        Group::Bisect => Shape::Bisect,
        Group::Log => Shape::Log,
        Group::Reflog => Shape::Reflog,
        Group::Branch => Shape::Branch,
        Group::Stash => Shape::StashList,
        Group::Remote => Shape::RemoteVerbose,
        Group::CheckIgnore => Shape::CheckIgnoreVerbose,
        Group::Blame => Shape::Blame,
        Group::CountObjects => Shape::CountObjects,
        Group::Version => Shape::Version,
        Group::Usage => Shape::ConfigUsage,
        Group::Errors => Shape::TransportError,
    }
}

#[test]
fn samples_render_the_same_through_their_colorizer() {
    let palette = Palette::default();
    for group in Group::ALL {
        for rule in group.rules() {
            let sample = rule.marker.sample;
            // Section entries only color inside their section.
            let source = match group.rules().first() {
                Some(header) if group.is_section() && header.marker.name != rule.marker.name => {
                    format!("{}\n{sample}\n", header.marker.sample)
                }
                _ => format!("{sample}\n"),
            };

            let mut doc = Document::new("git-bash", &source);
            colorize(shape_for(group), &mut doc, &palette);
            let actual = doc.lines().last().map(|line| line.text().to_string());

            let expected = rule
                .paint(sample, &palette)
                .unwrap_or_else(|| sample.to_string());
            assert_eq!(
                actual.as_deref(),
                Some(expected.as_str()),
                "{}/{}",
                group.name(),
                rule.marker.name
            );
        }
    }
}

/// Every grammar rule for a group, in the order of the group's markers.
fn flatten(patterns: &[Pattern]) -> Vec<(Option<&String>, &String, &BTreeMap<String, Capture>)> {
    let mut out = Vec::new();
    for pattern in patterns {
        match pattern {
            Pattern::Match {
                name,
                regex,
                captures,
            } => out.push((name.as_ref(), regex, captures)),
            Pattern::Block {
                begin,
                begin_captures,
                patterns,
                ..
            } => {
                out.push((None, begin, begin_captures));
                out.extend(flatten(patterns));
            }
            Pattern::Include { .. } => {}
        }
    }
    out
}

fn painted<'t>(rule: &Rule, text: &'t str) -> Vec<Segment<'t>> {
    rule.painter(text)
        .map(|painter| painter.segments().to_vec())
        .unwrap_or_default()
}

#[test]
fn grammar_captures_color_what_the_painter_colors() {
    let grammar = Grammar::generate();
    let scopes: BTreeMap<String, ColorToken> = ColorToken::ALL
        .iter()
        .map(|token| (token.scope(), *token))
        .collect();

    for group in Group::ALL {
        let entry = &grammar.repository[group.name()];
        let rules = flatten(&entry.patterns);
        assert_eq!(rules.len(), group.rules().len(), "{}", group.name());

        for ((name, regex, captures), rule) in rules.into_iter().zip(group.rules()) {
            // Section headers carry their scope as capture 0 of the block.
            let is_header = group.is_section() && rule.marker.name == "header";
            let expected_name = rule
                .marker
                .scope
                .filter(|_| !is_header)
                .map(ColorToken::scope);
            assert_eq!(
                name.cloned(),
                expected_name,
                "{}/{}",
                group.name(),
                rule.marker.name
            );

            let sample = rule.marker.sample;
            let regex = Regex::new(regex).expect("grammar regex compiles");
            let caps = regex.captures(sample).expect("grammar regex matches sample");
            let segments = painted(rule, sample);

            for (index, capture) in captures {
                let index: usize = index.parse().expect("numeric capture key");
                let Some(m) = caps.get(index) else { continue };
                let token = scopes[&capture.name];
                assert!(
                    segments
                        .iter()
                        .any(|s| s.text == m.as_str() && s.token == Some(token)),
                    "{}/{}: capture {index} {:?} should be {token}",
                    group.name(),
                    rule.marker.name,
                    m.as_str()
                );
            }
        }
    }
}
