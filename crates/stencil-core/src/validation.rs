//! Template validation and lint rules.
//!
//! [`validate`] enforces the hard rules a template must satisfy to be loaded.
//! [`lint`] adds convention checks (the expected section family, a filled-in
//! `about`) that only ever produce warnings unless they wrap a hard failure.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{Result, TemplateError};
use crate::template::{CONVENTIONAL_SECTIONS, Template};

/// Validates a template using the hard rules only.
pub fn validate(template: &Template) -> Result<()> {
    if template.name.trim().is_empty() {
        return Err(TemplateError::MissingRequiredField("name".into()));
    }
    let mut seen = HashSet::new();
    for section in &template.sections {
        if !seen.insert(section.heading.as_str()) {
            return Err(TemplateError::DuplicateSection(section.heading.clone()));
        }
    }
    Ok(())
}

/// How serious a lint finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// One lint result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    /// Stable rule identifier, e.g. `missing-section`.
    pub rule: &'static str,
    pub message: String,
}

impl Finding {
    fn warning(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            rule,
            message: message.into(),
        }
    }

    /// Wraps a hard failure as an error finding.
    pub fn from_error(err: &TemplateError) -> Self {
        let rule = match err {
            TemplateError::MalformedMetadata(_) => "malformed-metadata",
            TemplateError::MissingRequiredField(_) => "missing-field",
            TemplateError::DuplicateTemplateName(_) => "duplicate-name",
            TemplateError::DuplicateSection(_) => "duplicate-section",
            TemplateError::Unreadable(_) => "unreadable",
        };
        Self {
            severity: Severity::Error,
            rule,
            message: err.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Convention rules applied by [`lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintRules {
    /// Headings every template is expected to carry, in order.
    pub expected_sections: Vec<String>,

    /// Warn about headings outside `expected_sections`.
    pub strict_sections: bool,

    /// Warn when `about` is empty.
    pub require_about: bool,
}

impl Default for LintRules {
    fn default() -> Self {
        Self {
            expected_sections: CONVENTIONAL_SECTIONS.iter().map(|s| s.to_string()).collect(),
            strict_sections: false,
            require_about: true,
        }
    }
}

/// Runs the hard rules and the convention rules over one template.
pub fn lint(template: &Template, rules: &LintRules) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Err(e) = validate(template) {
        findings.push(Finding::from_error(&e));
    }

    if rules.require_about && template.about.trim().is_empty() {
        findings.push(Finding::warning("empty-about", "`about` is empty"));
    }

    for expected in &rules.expected_sections {
        if template.section(expected).is_none() {
            findings.push(Finding::warning(
                "missing-section",
                format!("missing section `{}`", expected),
            ));
        }
    }

    // Expected headings that are present should keep their relative order.
    let positions: Vec<usize> = rules
        .expected_sections
        .iter()
        .filter_map(|h| template.sections.iter().position(|s| &s.heading == h))
        .collect();
    if positions.windows(2).any(|w| w[0] > w[1]) {
        findings.push(Finding::warning(
            "section-order",
            format!(
                "sections are out of order (expected {})",
                rules.expected_sections.join(", ")
            ),
        ));
    }

    if rules.strict_sections {
        for section in &template.sections {
            if !rules.expected_sections.iter().any(|h| h == &section.heading) {
                findings.push(Finding::warning(
                    "unexpected-section",
                    format!("unexpected section `{}`", section.heading),
                ));
            }
        }
    }

    findings
}
