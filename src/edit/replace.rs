//! Regex find/replace across run boundaries.
//!
//! Matches are located over the paragraph's concatenated run text, so a
//! match never has to lie within a single run. Before rewriting, the
//! matched span (and every capture-group span) is isolated at run
//! boundaries; the replacement then inherits formatting run-by-run:
//! literal replacement text takes the properties of the first matched run
//! outside any capture group, and a `$n`/`${name}` reference takes the
//! properties of that group's first run.

use crate::document::{Document, Paragraph, Run};
use crate::error::Result;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::ops::Range;

/// A located match over a paragraph's run text
#[derive(Clone, Debug)]
pub struct Match {
    /// Byte span of the whole match in the paragraph text
    pub span: Range<usize>,
    /// Byte spans per capture group; index 0 is the whole match,
    /// non-participating groups are `None`
    pub groups: Vec<Option<Range<usize>>>,
}

/// A parsed piece of the replacement string
#[derive(Clone, Debug, PartialEq, Eq)]
enum ReplSegment {
    Literal(String),
    Group(GroupRef),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum GroupRef {
    Index(usize),
    Name(String),
}

/// Find all matches of `pattern` over the paragraph's run text.
///
/// Read-only: run boundaries are untouched.
pub fn find(paragraph: &Paragraph, pattern: &Regex) -> Vec<Match> {
    let text = paragraph.text();
    pattern
        .captures_iter(&text)
        .map(|caps| {
            let groups = (0..caps.len())
                .map(|i| caps.get(i).map(|m| m.range()))
                .collect();
            let span = caps.get(0).expect("group 0 always participates").range();
            Match { span, groups }
        })
        .collect()
}

/// Replace every match of `pattern` in the paragraph with `replacement`.
///
/// The replacement string uses the `regex` crate's syntax: `$1` or
/// `${name}` expands a capture group, `$$` is a literal dollar. Matches
/// are rewritten back-to-front so earlier spans stay valid. Returns the
/// number of substitutions made; zero matches is a no-op. Empty matches
/// are skipped.
pub fn find_and_replace(
    paragraph: &mut Paragraph,
    pattern: &Regex,
    replacement: &str,
) -> Result<usize> {
    let matches = find(paragraph, pattern);
    if matches.is_empty() {
        return Ok(0);
    }

    let segments = parse_replacement(replacement);
    let names = group_name_index(pattern);

    let mut count = 0usize;
    for m in matches.iter().rev() {
        if m.span.is_empty() {
            continue;
        }
        rewrite_match(paragraph, m, &segments, &names)?;
        count += 1;
    }
    debug!(
        "replaced {count} of {} matches of /{pattern}/",
        matches.len()
    );
    Ok(count)
}

/// Apply [`find_and_replace`] to every paragraph of the document
pub fn find_and_replace_all(
    document: &mut Document,
    pattern: &Regex,
    replacement: &str,
) -> Result<usize> {
    let mut total = 0usize;
    for paragraph in document.paragraphs_mut() {
        total += find_and_replace(paragraph, pattern, replacement)?;
    }
    Ok(total)
}

/// Rewrite one match: isolate its runs, build the replacement runs, splice
fn rewrite_match(
    paragraph: &mut Paragraph,
    m: &Match,
    segments: &[ReplSegment],
    names: &HashMap<String, usize>,
) -> Result<()> {
    // Snapshot for group expansion; isolation never changes the text.
    let text = paragraph.text();

    paragraph.isolate_span(m.span.clone())?;
    for span in m.groups.iter().skip(1).flatten() {
        if !span.is_empty() {
            paragraph.isolate_span(span.clone())?;
        }
    }

    let bounds = paragraph.run_boundaries();
    let match_runs = run_range(&bounds, &m.span);
    let group_runs: Vec<Option<Range<usize>>> = m
        .groups
        .iter()
        .map(|g| g.as_ref().map(|span| run_range(&bounds, span)))
        .collect();

    // Literal segments take the formatting of the first matched run that no
    // capture group owns; when the groups cover the whole match, the first
    // matched run.
    let covered =
        |idx: usize| group_runs.iter().skip(1).flatten().any(|r| r.contains(&idx));
    let anchor = match_runs
        .clone()
        .find(|&idx| !covered(idx))
        .unwrap_or(match_runs.start);
    let normal_props = paragraph.run(anchor).and_then(|r| r.properties.clone());

    let mut replacement_runs = Vec::new();
    for segment in segments {
        match segment {
            ReplSegment::Literal(s) => {
                if !s.is_empty() {
                    replacement_runs.push(Run::with_properties(s.clone(), normal_props.clone()));
                }
            }
            ReplSegment::Group(group) => {
                let idx = match group {
                    GroupRef::Index(i) => Some(*i),
                    GroupRef::Name(n) => names.get(n).copied(),
                };
                // unknown or non-participating groups expand to nothing,
                // matching the regex crate's expansion rules
                let Some(idx) = idx else { continue };
                let Some(Some(span)) = m.groups.get(idx) else { continue };
                if span.is_empty() {
                    continue;
                }
                let props = group_runs
                    .get(idx)
                    .and_then(|r| r.as_ref())
                    .and_then(|r| paragraph.run(r.start))
                    .and_then(|run| run.properties.clone())
                    .or_else(|| normal_props.clone());
                replacement_runs.push(Run::with_properties(&text[span.clone()], props));
            }
        }
    }

    paragraph.splice_runs(match_runs, replacement_runs)
}

/// Run-index range for a byte span whose edges lie on run boundaries
fn run_range(bounds: &[usize], span: &Range<usize>) -> Range<usize> {
    let start = bounds.partition_point(|&b| b < span.start);
    let end = bounds.partition_point(|&b| b < span.end);
    start..end
}

fn group_name_index(pattern: &Regex) -> HashMap<String, usize> {
    pattern
        .capture_names()
        .enumerate()
        .filter_map(|(i, name)| name.map(|n| (n.to_string(), i)))
        .collect()
}

/// Split a replacement string into literal and group-reference segments
fn parse_replacement(replacement: &str) -> Vec<ReplSegment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = replacement;

    fn flush(segments: &mut Vec<ReplSegment>, literal: &mut String) {
        if !literal.is_empty() {
            segments.push(ReplSegment::Literal(std::mem::take(literal)));
        }
    }

    while let Some(pos) = rest.find('$') {
        literal.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(tail) = rest.strip_prefix('$') {
            literal.push('$');
            rest = tail;
            continue;
        }

        if let Some(tail) = rest.strip_prefix('{') {
            match tail.find('}') {
                Some(close) if is_group_name(&tail[..close]) => {
                    flush(&mut segments, &mut literal);
                    segments.push(ReplSegment::Group(group_ref(&tail[..close])));
                    rest = &tail[close + 1..];
                }
                _ => literal.push('$'),
            }
            continue;
        }

        // bare reference: greedy run of word characters, as the regex
        // crate's expansion parses it
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if end == 0 {
            literal.push('$');
        } else {
            flush(&mut segments, &mut literal);
            segments.push(ReplSegment::Group(group_ref(&rest[..end])));
            rest = &rest[end..];
        }
    }

    literal.push_str(rest);
    flush(&mut segments, &mut literal);
    segments
}

fn is_group_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn group_ref(name: &str) -> GroupRef {
    match name.parse::<usize>() {
        Ok(index) => GroupRef::Index(index),
        Err(_) => GroupRef::Name(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn para(texts: &[&str]) -> Paragraph {
        let mut p = Paragraph::default();
        for t in texts {
            p.add_run(Run::new(*t));
        }
        p
    }

    #[test]
    fn test_parse_replacement_segments() {
        use GroupRef::*;
        use ReplSegment::*;

        // bare references are greedy: "$1b" names the group "1b", not
        // group 1 followed by "b"; braces disambiguate
        assert_eq!(
            parse_replacement("a$1b${name}c$$d"),
            vec![
                Literal("a".into()),
                Group(Name("1b".into())),
                Group(Name("name".into())),
                Literal("c$d".into()),
            ]
        );
        assert_eq!(
            parse_replacement("a${1}b"),
            vec![Literal("a".into()), Group(Index(1)), Literal("b".into())]
        );
        assert_eq!(parse_replacement("$2 $1"), vec![
            Group(Index(2)),
            Literal(" ".into()),
            Group(Index(1)),
        ]);
        assert_eq!(parse_replacement("plain"), vec![Literal("plain".into())]);
        assert_eq!(parse_replacement("$ x"), vec![Literal("$ x".into())]);
        assert_eq!(
            parse_replacement("${}"),
            vec![Literal("${}".into())]
        );
    }

    #[test]
    fn test_find_reports_spans_and_groups() {
        let p = para(&["The ", "cat", " sat on a cat"]);
        let re = Regex::new("(c)(at)").unwrap();

        let matches = find(&p, &re);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].span, 4..7);
        assert_eq!(matches[0].groups, vec![Some(4..7), Some(4..5), Some(5..7)]);
        assert_eq!(matches[1].span, 17..20);
    }

    #[test]
    fn test_find_no_match() {
        let p = para(&["nothing here"]);
        let re = Regex::new("absent").unwrap();
        assert!(find(&p, &re).is_empty());
    }

    #[test]
    fn test_replace_within_single_run() {
        let mut p = para(&["The ", "cat", " sat"]);
        let re = Regex::new("cat").unwrap();

        let n = find_and_replace(&mut p, &re, "dog").unwrap();
        assert_eq!(n, 1);
        assert_eq!(p.text(), "The dog sat");
    }

    #[test]
    fn test_replace_across_run_boundary() {
        let mut p = para(&["The ca", "t sat"]);
        let re = Regex::new("cat").unwrap();

        let n = find_and_replace(&mut p, &re, "dog").unwrap();
        assert_eq!(n, 1);
        assert_eq!(p.text(), "The dog sat");
    }

    #[test]
    fn test_replace_noop_keeps_runs() {
        let mut p = para(&["The ", "cat", " sat"]);
        let re = Regex::new("dog").unwrap();

        let n = find_and_replace(&mut p, &re, "ferret").unwrap();
        assert_eq!(n, 0);
        assert_eq!(p.text(), "The cat sat");
        assert_eq!(p.run_count(), 3);
    }

    #[test]
    fn test_replace_multiple_matches() {
        let mut p = para(&["one cat, two cat", "s"]);
        let re = Regex::new("cat").unwrap();

        let n = find_and_replace(&mut p, &re, "dog").unwrap();
        assert_eq!(n, 2);
        assert_eq!(p.text(), "one dog, two dogs");
    }

    #[test]
    fn test_replace_with_group_reference_order() {
        let mut p = para(&["alpha beta"]);
        let re = Regex::new(r"(\w+) (\w+)").unwrap();

        find_and_replace(&mut p, &re, "$2 $1").unwrap();
        assert_eq!(p.text(), "beta alpha");
    }

    #[test]
    fn test_replace_with_named_group() {
        let mut p = para(&["id=42"]);
        let re = Regex::new(r"id=(?P<num>\d+)").unwrap();

        find_and_replace(&mut p, &re, "number ${num}").unwrap();
        assert_eq!(p.text(), "number 42");
    }

    #[test]
    fn test_replace_skips_empty_matches() {
        let mut p = para(&["abc"]);
        let re = Regex::new("x*").unwrap();

        let n = find_and_replace(&mut p, &re, "!").unwrap();
        assert_eq!(n, 0);
        assert_eq!(p.text(), "abc");
    }
}
