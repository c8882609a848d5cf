//! In-memory template store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use stencil_core::document::parse_document;
use stencil_core::error::TemplateError;
use stencil_core::template::Template;
use stencil_core::validation::validate;
use tracing::{debug, warn};

use crate::error::{FileError, Result, StoreError};
use crate::traits::TemplateStore;

/// File extensions treated as template documents.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A set of templates keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: BTreeMap<String, Template>,
}

impl TemplateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every template document in `dir` (non-recursive).
    ///
    /// Files are read in file-name order. Files without a template extension
    /// (such as the platform's `config.yml`) are skipped. Every failing file is
    /// collected; if any fail the whole load fails with [`StoreError::Load`].
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let (set, errors) = Self::load_dir_lenient(dir)?;
        into_result(set, errors)
    }

    /// Like [`TemplateSet::load_dir`], but keeps the templates that loaded
    /// and returns the per-file failures alongside them. A file that cannot
    /// be read or is not UTF-8 is a per-file [`TemplateError::Unreadable`].
    ///
    /// # Errors
    ///
    /// Only directory-level problems fail: [`StoreError::DirNotFound`] or
    /// [`StoreError::Io`] when the directory listing itself cannot be read.
    pub fn load_dir_lenient(dir: &Path) -> Result<(Self, Vec<FileError>)> {
        if !dir.is_dir() {
            return Err(StoreError::DirNotFound(dir.to_path_buf()));
        }

        let io_err = |source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(io_err)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()
            .map_err(io_err)?;
        paths.retain(|p| p.is_file());
        paths.sort();

        let mut set = Self::new();
        let mut errors = Vec::new();
        for path in paths {
            if !is_template_file(&path) {
                debug!(path = %path.display(), "skipping non-template file");
                continue;
            }
            let parsed = read_document(&path).and_then(|text| parse_document(&text));
            set.add_parsed(path, parsed, &mut errors);
        }

        debug!(count = set.len(), failed = errors.len(), "templates loaded");
        Ok((set, errors))
    }

    /// Build a store from `(source, text)` pairs, in the given order.
    pub fn from_documents<P, S>(documents: impl IntoIterator<Item = (P, S)>) -> Result<Self>
    where
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let (set, errors) = Self::from_documents_lenient(documents);
        into_result(set, errors)
    }

    /// Build a store from `(source, text)` pairs, keeping every document that
    /// parses and collecting the failures of the rest.
    pub fn from_documents_lenient<P, S>(
        documents: impl IntoIterator<Item = (P, S)>,
    ) -> (Self, Vec<FileError>)
    where
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        let mut errors = Vec::new();

        for (path, text) in documents {
            set.add_parsed(path.into(), parse_document(text.as_ref()), &mut errors);
        }

        debug!(count = set.len(), failed = errors.len(), "templates loaded");
        (set, errors)
    }

    /// Insert a parsed document, or record why it cannot be added.
    fn add_parsed(
        &mut self,
        path: PathBuf,
        parsed: std::result::Result<Template, TemplateError>,
        errors: &mut Vec<FileError>,
    ) {
        let result = parsed.and_then(|mut t| {
            t.source = Some(path.clone());
            self.insert(t)
        });
        if let Err(error) = result {
            warn!(path = %path.display(), %error, "template failed to load");
            errors.push(FileError { path, error });
        }
    }

    /// Add one template.
    ///
    /// # Errors
    ///
    /// Returns the [`validate`] error for an invalid template, or
    /// [`TemplateError::DuplicateTemplateName`] if the name is taken.
    pub fn insert(&mut self, template: Template) -> std::result::Result<(), TemplateError> {
        validate(&template)?;
        if self.templates.contains_key(&template.name) {
            return Err(TemplateError::DuplicateTemplateName(template.name));
        }
        debug!(name = %template.name, "template added");
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for TemplateSet {
    fn list(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    fn get(&self, name: &str) -> Result<&Template> {
        self.templates
            .get(name)
            .ok_or_else(|| StoreError::not_found(name))
    }

    fn templates(&self) -> Vec<&Template> {
        self.templates.values().collect()
    }
}

fn into_result(set: TemplateSet, errors: Vec<FileError>) -> Result<TemplateSet> {
    if errors.is_empty() {
        Ok(set)
    } else {
        Err(StoreError::Load(errors))
    }
}

/// Read a document as UTF-8 text.
fn read_document(path: &Path) -> std::result::Result<String, TemplateError> {
    let bytes = fs::read(path).map_err(|e| TemplateError::Unreadable(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| {
        TemplateError::Unreadable(format!(
            "invalid UTF-8 at byte {}",
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Returns `true` if `path` has a template document extension.
pub fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| TEMPLATE_EXTENSIONS.contains(&e.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FEATURE: &str = "---
name: Feature issue template
about: Suggest a new feature
title: '[Feat]: Title'
labels: ''
assignees: SL9-1994
---

## Overview

## Goals
";

    const BUG: &str = "---
name: Bug report
about: Report a defect
title: ''
labels: bug
assignees: ''
---

## Overview
";

    fn write(dir: &Path, file: &str, text: &str) {
        fs::write(dir.join(file), text).unwrap();
    }

    #[test]
    fn list_then_get_returns_matching_metadata() {
        let set = TemplateSet::from_documents([("feature.md", FEATURE), ("bug.md", BUG)]).unwrap();
        assert_eq!(set.list(), vec!["Bug report", "Feature issue template"]);
        for name in set.list() {
            let t = set.get(name).unwrap();
            assert_eq!(t.name, name);
        }

        let feature = set.get("Feature issue template").unwrap();
        assert_eq!(feature.title, "[Feat]: Title");
        assert_eq!(feature.assignees, "SL9-1994");
        assert!(feature.label_list().is_empty());

        let bug = set.get("Bug report").unwrap();
        assert_eq!(bug.title, "");
        assert_eq!(bug.label_list(), vec!["bug"]);
    }

    #[test]
    fn get_unknown_is_not_found() {
        let set = TemplateSet::from_documents([("bug.md", BUG)]).unwrap();
        let err = set.get("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn resolve_by_file_stem() {
        let set = TemplateSet::from_documents([("dir/feature_request.md", FEATURE)]).unwrap();
        assert_eq!(
            set.resolve("feature_request").unwrap().name,
            "Feature issue template"
        );
        assert_eq!(
            set.resolve("Feature issue template").unwrap().name,
            "Feature issue template"
        );
        assert!(set.resolve("bug_report").unwrap_err().is_not_found());
    }

    #[test]
    fn duplicate_names_are_reported_on_second_file() {
        let err = TemplateSet::from_documents([("a.md", BUG), ("b.md", BUG)]).unwrap_err();
        let files = err.file_errors();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("b.md"));
        assert_eq!(
            files[0].error,
            TemplateError::DuplicateTemplateName("Bug report".into())
        );
    }

    #[test]
    fn all_failures_are_collected() {
        let broken = "---\nname: Broken\n";
        let nameless = "---\nabout: x\n---\n";
        let err =
            TemplateSet::from_documents([("ok.md", BUG), ("broken.md", broken), ("nameless.md", nameless)])
                .unwrap_err();
        let files = err.file_errors();
        assert_eq!(files.len(), 2);
        assert_eq!(
            files[0].error,
            TemplateError::MalformedMetadata("missing closing delimiter".into())
        );
        assert_eq!(
            files[1].error,
            TemplateError::MissingRequiredField("name".into())
        );
    }

    #[test]
    fn lenient_load_keeps_good_templates() {
        let (set, errors) =
            TemplateSet::from_documents_lenient([("bug.md", BUG), ("broken.md", "no front matter")]);
        assert_eq!(set.list(), vec!["Bug report"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, PathBuf::from("broken.md"));
        assert!(errors[0].error.is_malformed());
    }

    #[test]
    fn insert_rejects_invalid_template() {
        let mut set = TemplateSet::new();
        assert_eq!(
            set.insert(Template::new("")).unwrap_err(),
            TemplateError::MissingRequiredField("name".into())
        );
        set.insert(Template::new("x")).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn load_dir_reads_markdown_and_skips_config() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "feature_request.md", FEATURE);
        write(dir.path(), "bug_report.MD", BUG);
        write(dir.path(), "config.yml", "blank_issues_enabled: false\n");

        let set = TemplateSet::load_dir(dir.path()).unwrap();
        assert_eq!(set.len(), 2);
        let feature = set.get("Feature issue template").unwrap();
        assert_eq!(feature.file_stem(), Some("feature_request"));
        assert_eq!(feature.headings(), vec!["Overview", "Goals"]);
    }

    #[test]
    fn load_dir_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ISSUE_TEMPLATE");
        let err = TemplateSet::load_dir(&missing).unwrap_err();
        assert!(matches!(err, StoreError::DirNotFound(p) if p == missing));
    }

    #[test]
    fn load_dir_empty_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let set = TemplateSet::load_dir(dir.path()).unwrap();
        assert!(set.is_empty());
        assert!(set.list().is_empty());
    }

    #[test]
    fn lenient_load_reports_invalid_utf8_per_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "feature_request.md", FEATURE);
        fs::write(dir.path().join("bad.md"), b"---\nname: Bad\xff\n---\n").unwrap();

        let (set, errors) = TemplateSet::load_dir_lenient(dir.path()).unwrap();
        assert_eq!(set.list(), vec!["Feature issue template"]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, dir.path().join("bad.md"));
        assert_eq!(
            errors[0].error,
            TemplateError::Unreadable("invalid UTF-8 at byte 13".into())
        );

        let err = TemplateSet::load_dir(dir.path()).unwrap_err();
        assert_eq!(err.file_errors().len(), 1);
    }

    #[test]
    fn load_dir_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "feature_request.md", FEATURE);
        fs::create_dir(dir.path().join("nested.md")).unwrap();

        let (set, errors) = TemplateSet::load_dir_lenient(dir.path()).unwrap();
        assert_eq!(set.len(), 1);
        assert!(errors.is_empty());
    }

    #[test]
    fn is_template_file_checks_extension() {
        assert!(is_template_file(Path::new("a.md")));
        assert!(is_template_file(Path::new("a.Markdown")));
        assert!(!is_template_file(Path::new("config.yml")));
        assert!(!is_template_file(Path::new("README")));
    }
}
