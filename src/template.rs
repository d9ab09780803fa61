// Template engine: substitutes `{{name}}` placeholders in the string leaves
// of a JSON document using the values of one record.

use crate::error::SourceError;
use crate::records::Record;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

const PLACEHOLDER: &str = r"\{\{([A-Za-z0-9_]+)\}\}";

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER).expect("placeholder pattern is valid"))
}

fn exact_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^{PLACEHOLDER}$")).expect("placeholder pattern is valid")
    })
}

/// A request body template loaded once and rendered for every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    root: Value,
}

impl Template {
    /// Read and parse a UTF-8 JSON template file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|err| SourceError::read(path, err))?;
        Ok(Template::from_value(serde_json::from_str(&raw)?))
    }

    pub fn from_value(root: Value) -> Self {
        Template { root }
    }

    /// Produce the body for `record`. The template itself is left untouched.
    pub fn render(&self, record: &Record) -> Value {
        render(&self.root, record)
    }

    /// Distinct placeholder names in the order they first appear.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names = Vec::new();
        collect_placeholders(&self.root, &mut names);
        names
    }
}

/// Build a new document shaped like `template` with placeholders resolved
/// against `record`.
///
/// A string that is exactly one placeholder is replaced by the record value
/// as a whole; placeholders embedded in longer strings are replaced in place.
/// Either way a name missing from the record leaves the `{{name}}` text as is.
/// Object keys, numbers, booleans and null are copied unchanged.
pub fn render(template: &Value, record: &Record) -> Value {
    match template {
        Value::Array(items) => Value::Array(items.iter().map(|item| render(item, record)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), render(value, record)))
                .collect::<Map<String, Value>>(),
        ),
        Value::String(text) => render_string(text, record),
        other => other.clone(),
    }
}

fn render_string(text: &str, record: &Record) -> Value {
    if let Some(caps) = exact_placeholder().captures(text) {
        let name = &caps[1];
        return match record.get(name) {
            Some(value) => Value::String(value.clone()),
            None => {
                log::debug!("no column for placeholder {{{{{name}}}}}, left as-is");
                Value::String(text.to_string())
            }
        };
    }

    let replaced = placeholder().replace_all(text, |caps: &Captures| match record.get(&caps[1]) {
        Some(value) => value.clone(),
        None => {
            log::debug!("no column for placeholder {}, left as-is", &caps[0]);
            caps[0].to_string()
        }
    });
    Value::String(replaced.into_owned())
}

fn collect_placeholders(node: &Value, names: &mut Vec<String>) {
    match node {
        Value::Array(items) => items.iter().for_each(|item| collect_placeholders(item, names)),
        Value::Object(fields) => fields.values().for_each(|value| collect_placeholders(value, names)),
        Value::String(text) => {
            for caps in placeholder().captures_iter(text) {
                if !names.iter().any(|seen| seen == &caps[1]) {
                    names.push(caps[1].to_string());
                }
            }
        }
        _ => {}
    }
}
