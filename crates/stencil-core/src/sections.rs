//! Splitting a template body into `## ` sections, and writing it back.

use std::collections::HashSet;

use crate::error::{Result, TemplateError};
use crate::template::{Section, Template};

/// Marker that opens a section heading.
const HEADING_MARKER: &str = "## ";

/// Splits body lines into a preamble and an ordered list of sections.
///
/// Lines inside fenced code blocks never open a section. Deeper headings
/// (`###` and below) stay in the current section body.
pub fn split_sections(lines: &[&str]) -> Result<(String, Vec<Section>)> {
    let mut preamble: Vec<&str> = Vec::new();
    let mut sections: Vec<(String, Vec<&str>)> = Vec::new();
    let mut fence: Option<char> = None;

    for &line in lines {
        if let Some(marker) = fence_marker(line) {
            fence = match fence {
                None => Some(marker),
                Some(open) if open == marker => None,
                other => other,
            };
        } else if fence.is_none() {
            if let Some(heading) = parse_heading(line) {
                sections.push((heading, Vec::new()));
                continue;
            }
        }

        match sections.last_mut() {
            Some((_, body)) => body.push(line),
            None => preamble.push(line),
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(sections.len());
    for (heading, body) in sections {
        if !seen.insert(heading.clone()) {
            return Err(TemplateError::DuplicateSection(heading));
        }
        out.push(Section {
            heading,
            body: join_trimmed(&body),
        });
    }

    Ok((join_trimmed(&preamble), out))
}

/// Writes the preamble and sections in canonical layout.
///
/// Every block is preceded by one blank line; the output ends with a newline
/// unless the template has no body at all.
pub fn write_body(template: &Template, out: &mut String) {
    if !template.preamble.is_empty() {
        out.push('\n');
        out.push_str(&template.preamble);
        out.push('\n');
    }
    for section in &template.sections {
        out.push('\n');
        out.push_str(HEADING_MARKER);
        out.push_str(&section.heading);
        if strips_as_closing_sequence(&section.heading) {
            out.push_str(" ##");
        }
        out.push('\n');
        if !section.body.is_empty() {
            out.push_str(&section.body);
            out.push('\n');
        }
    }
}

/// Returns the heading text if `line` opens a level-two section.
fn parse_heading(line: &str) -> Option<String> {
    let rest = line.strip_prefix(HEADING_MARKER)?;
    let mut heading = rest.trim();

    // Optional closing sequence: `## Goals ##`.
    if strips_as_closing_sequence(heading) {
        heading = heading.trim_end_matches('#').trim_end();
    }
    Some(heading.to_string())
}

/// Whether trailing `#`s in `heading` read as a closing sequence.
fn strips_as_closing_sequence(heading: &str) -> bool {
    let stripped = heading.trim_end_matches('#');
    stripped.len() != heading.len() && (stripped.is_empty() || stripped.ends_with(' '))
}

/// Returns the fence character if `line` opens or closes a fenced code block.
fn fence_marker(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

/// Joins lines with `\n`, dropping leading and trailing blank lines.
fn join_trimmed(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(s), Some(e)) => lines[s..=e].join("\n"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn split(text: &str) -> (String, Vec<Section>) {
        let lines: Vec<&str> = text.lines().collect();
        split_sections(&lines).unwrap()
    }

    #[test]
    fn splits_on_level_two_headings() {
        let (preamble, sections) = split("\n## Overview\nWhat it is.\n\n## Goals\n- one\n- two\n");
        assert_eq!(preamble, "");
        assert_eq!(
            sections,
            vec![
                Section::new("Overview", "What it is."),
                Section::new("Goals", "- one\n- two"),
            ]
        );
    }

    #[test]
    fn deeper_headings_stay_in_body() {
        let (_, sections) = split("## Overview\n### Background\ntext\n");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "### Background\ntext");
    }

    #[test]
    fn fenced_heading_does_not_split() {
        let text = "## Implementation Details\n```md\n## not a section\n```\n## Challenges\nnone";
        let (_, sections) = split(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(
            sections[0].body,
            "```md\n## not a section\n```"
        );
        assert_eq!(sections[1].heading, "Challenges");
    }

    #[test]
    fn tilde_fence_is_not_closed_by_backticks() {
        let text = "## A\n~~~\n```\n## B\n~~~\n## C";
        let (_, sections) = split(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].heading, "C");
    }

    #[test]
    fn text_before_first_heading_is_preamble() {
        let (preamble, sections) = split("\nPlease fill in every section.\n\n## Overview\n");
        assert_eq!(preamble, "Please fill in every section.");
        assert_eq!(sections, vec![Section::new("Overview", "")]);
    }

    #[test]
    fn closing_hashes_are_stripped_but_not_from_words() {
        assert_eq!(parse_heading("## Goals ##").as_deref(), Some("Goals"));
        assert_eq!(parse_heading("## Port to C#").as_deref(), Some("Port to C#"));
        assert_eq!(parse_heading("### Deep"), None);
        assert_eq!(parse_heading("##NoSpace"), None);
    }

    #[test]
    fn duplicate_heading_is_rejected() {
        let lines: Vec<&str> = "## Goals\na\n## Goals\nb".lines().collect();
        let err = split_sections(&lines).unwrap_err();
        assert_eq!(err, TemplateError::DuplicateSection("Goals".into()));
    }

    #[test]
    fn write_body_layout() {
        let mut t = Template::new("t");
        t.sections.push(Section::new("Overview", "text"));
        t.sections.push(Section::new("Goals", ""));
        t.sections.push(Section::new("Challenges", "none"));
        let mut out = String::new();
        write_body(&t, &mut out);
        assert_eq!(out, "\n## Overview\ntext\n\n## Goals\n\n## Challenges\nnone\n");
    }

    #[test]
    fn trailing_hash_heading_gets_closing_sequence() {
        let (_, sections) = split("## A # #\nbody\n## Port to C#\n");
        assert_eq!(sections[0].heading, "A #");
        assert_eq!(sections[1].heading, "Port to C#");

        let mut t = Template::new("t");
        t.sections = sections;
        let mut out = String::new();
        write_body(&t, &mut out);
        assert_eq!(out, "\n## A # ##\nbody\n\n## Port to C#\n");

        let lines: Vec<&str> = out.lines().collect();
        let (_, again) = split_sections(&lines).unwrap();
        assert_eq!(again, t.sections);
    }
}
