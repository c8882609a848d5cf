//! The template record.
//!
//! Field values are kept exactly as the document states them. `labels` and
//! `assignees` stay opaque strings; [`Template::label_list`] and
//! [`Template::assignee_list`] split them for consumers that want sets.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Section headings every template of the feature family is expected to carry.
pub const CONVENTIONAL_SECTIONS: &[&str] = &[
    "Overview",
    "Goals",
    "Implementation Details",
    "Challenges",
    "Related Issues",
    "Additional Context",
];

/// A titled free-text block in the template body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text without the leading `## `.
    pub heading: String,

    /// Body text with surrounding blank lines removed.
    pub body: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}

/// A parsed issue template document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Template {
    /// Identifier, unique within a store.
    pub name: String,

    /// Short description shown in the template chooser.
    pub about: String,

    /// Default issue title; may hold a placeholder such as `[Feat]: Title`.
    pub title: String,

    /// Raw label list (comma-separated, empty when unset).
    pub labels: String,

    /// Raw assignee list (comma-separated, empty when unset).
    pub assignees: String,

    /// Front-matter keys beyond the five known fields, in document order.
    #[serde(skip_serializing_if = "serde_yaml::Mapping::is_empty")]
    pub extra: serde_yaml::Mapping,

    /// Text between the metadata block and the first section heading.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub preamble: String,

    /// Body sections in document order.
    pub sections: Vec<Section>,

    /// Where this template was loaded from (set by the loader).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

impl Template {
    /// Creates a template with the given name and every other field empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Labels split on commas, trimmed, empty entries dropped.
    pub fn label_list(&self) -> Vec<String> {
        parse_comma_list(&self.labels)
    }

    /// Assignees split on commas, trimmed, empty entries dropped.
    pub fn assignee_list(&self) -> Vec<String> {
        parse_comma_list(&self.assignees)
    }

    /// Looks up a section by exact heading.
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Section headings in document order.
    pub fn headings(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.heading.as_str()).collect()
    }

    /// File stem of the source document, if the template was loaded from disk.
    pub fn file_stem(&self) -> Option<&str> {
        self.source
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
    }
}

/// Parse a comma-separated string into a vector of trimmed, non-empty strings.
pub fn parse_comma_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    s.split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
