//! Template document codec.
//!
//! A document is a `---` delimited YAML front-matter block followed by a
//! markdown body. [`parse_document`] turns text into a [`Template`];
//! [`to_document`] writes the canonical form back out.

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_yaml::{Mapping, Value};

use crate::error::{Result, TemplateError};
use crate::sections::{split_sections, write_body};
use crate::template::Template;

/// Line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// Wire shape of the metadata block.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FrontMatter {
    #[serde(default, deserialize_with = "opaque_string")]
    name: String,

    #[serde(default, deserialize_with = "opaque_string")]
    about: String,

    #[serde(default, deserialize_with = "opaque_string")]
    title: String,

    #[serde(default, deserialize_with = "opaque_string")]
    labels: String,

    #[serde(default, deserialize_with = "opaque_string")]
    assignees: String,

    #[serde(flatten)]
    extra: Mapping,
}

/// Parse a template document.
///
/// # Errors
///
/// - [`TemplateError::MalformedMetadata`] if a delimiter is missing, the block
///   is not a YAML mapping, or a field holds a mapping.
/// - [`TemplateError::MissingRequiredField`] if `name` is empty.
/// - [`TemplateError::DuplicateSection`] if a heading repeats.
pub fn parse_document(text: &str) -> Result<Template> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines().skip_while(|l| l.trim().is_empty());

    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Err(TemplateError::malformed("missing opening delimiter")),
    }

    let mut block: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == DELIMITER {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return Err(TemplateError::malformed("missing closing delimiter"));
    }

    let front = parse_front_matter(&block.join("\n"))?;
    if front.name.trim().is_empty() {
        return Err(TemplateError::MissingRequiredField("name".into()));
    }

    let body: Vec<&str> = lines.collect();
    let (preamble, sections) = split_sections(&body)?;

    Ok(Template {
        name: front.name,
        about: front.about,
        title: front.title,
        labels: front.labels,
        assignees: front.assignees,
        extra: front.extra,
        preamble,
        sections,
        source: None,
    })
}

/// Serialize a template to its canonical document form.
///
/// Parsing the output with [`parse_document`] yields an identical record
/// (apart from `source`, which is never written).
pub fn to_document(template: &Template) -> Result<String> {
    let front = FrontMatter {
        name: template.name.clone(),
        about: template.about.clone(),
        title: template.title.clone(),
        labels: template.labels.clone(),
        assignees: template.assignees.clone(),
        extra: template.extra.clone(),
    };
    let yaml = serde_yaml::to_string(&front).map_err(TemplateError::malformed)?;

    let mut out = String::with_capacity(yaml.len() + 256);
    out.push_str(DELIMITER);
    out.push('\n');
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(DELIMITER);
    out.push('\n');
    write_body(template, &mut out);
    Ok(out)
}

/// Returns only the markdown body (preamble and sections) of a template.
pub fn body_markdown(template: &Template) -> String {
    let mut out = String::new();
    write_body(template, &mut out);
    out.trim_start_matches('\n').to_string()
}

fn parse_front_matter(block: &str) -> Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    serde_yaml::from_str(block).map_err(TemplateError::malformed)
}

/// Accepts any scalar, a null, or a sequence of scalars as a plain string.
fn opaque_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None => Ok(String::new()),
        Some(Value::Sequence(items)) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in &items {
                match scalar_string(item) {
                    Some(s) if !s.is_empty() => parts.push(s),
                    Some(_) => {}
                    None => return Err(de::Error::custom("list entries must be plain values")),
                }
            }
            Ok(parts.join(", "))
        }
        Some(other) => scalar_string(&other)
            .ok_or_else(|| de::Error::custom("expected a string, found a mapping")),
    }
}

/// Scalars arrive already typed by YAML: `1.10` is the number `1.1` and
/// `0x1F` is `31`, the same values the issue platform reads.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}
