//! Dataset files: loading, schema validation and lint.
//!
//! A dataset is either a JSON array of records or a JSON-Lines file
//! (`.jsonl`, one record per line, blank lines ignored). Every record is
//! checked on load; the first broken record fails the whole file with a
//! [`DataError`] naming the file, the line or index, and the item.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use impara_core::conjugator::Conjugation;
use impara_core::error::{DataError, RecordLocation};
use impara_core::model::{Adjective, Lexeme, Noun, Tense, Verb, PERSON_COUNT};

/// A record type that can be loaded from a dataset file.
pub trait DatasetRecord: DeserializeOwned + Lexeme {
    /// Field that identifies a record in error messages.
    const KEY_FIELD: &'static str;

    /// Schema rules serde cannot express.
    fn check(&self) -> Result<(), String>;

    /// Non-fatal issue specific to the record type.
    fn lint(&self) -> Option<String> {
        None
    }
}

fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} must not be empty"))
    } else {
        Ok(())
    }
}

fn check_forms(forms: Option<&[String]>, field: &str, expected: usize) -> Result<(), String> {
    let Some(forms) = forms else {
        return Ok(());
    };
    if forms.len() != expected {
        return Err(format!(
            "{field} must have {expected} forms, found {}",
            forms.len()
        ));
    }
    match forms.iter().position(|f| f.trim().is_empty()) {
        Some(i) => Err(format!("{field} form {i} is empty")),
        None => Ok(()),
    }
}

impl DatasetRecord for Verb {
    const KEY_FIELD: &'static str = "infinitive";

    fn check(&self) -> Result<(), String> {
        require(&self.infinitive, "infinitive")?;
        for tense in Tense::ALL {
            check_forms(self.forms(tense), &tense.to_string(), PERSON_COUNT)?;
        }
        check_forms(self.imperative.as_deref(), "imperative", 2)
    }

    fn lint(&self) -> Option<String> {
        if !self.irregular && Conjugation::of(&self.infinitive).is_none() {
            Some(format!(
                "regular verb '{}' does not end in -are, -ere or -ire",
                self.infinitive
            ))
        } else {
            None
        }
    }
}

impl DatasetRecord for Noun {
    const KEY_FIELD: &'static str = "id";

    fn check(&self) -> Result<(), String> {
        require(&self.id, "id")?;
        require(&self.lemma, "lemma")?;
        require(&self.forms.sg, "forms.sg")?;
        require(&self.forms.pl, "forms.pl")
    }
}

impl DatasetRecord for Adjective {
    const KEY_FIELD: &'static str = "id";

    fn check(&self) -> Result<(), String> {
        require(&self.id, "id")?;
        require(&self.lemma, "lemma")
    }
}

fn is_jsonl(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"))
}

/// Split a file's content into raw records with their locations.
fn raw_records(path: &Path, content: &str) -> Result<Vec<(RecordLocation, Value)>, DataError> {
    if is_jsonl(path) {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .map(|value| (RecordLocation::Line(i + 1), value))
                    .map_err(|source| DataError::ParseLine {
                        path: path.to_path_buf(),
                        line: i + 1,
                        source,
                    })
            })
            .collect()
    } else {
        let values: Vec<Value> =
            serde_json::from_str(content).map_err(|source| DataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (RecordLocation::Index(i), value))
            .collect())
    }
}

fn record_label(value: &Value, key_field: &str) -> String {
    value
        .get(key_field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("<unnamed>")
        .to_string()
}

/// Parse and validate every record in `content`, attributing errors to `path`.
pub fn parse_records<T: DatasetRecord>(path: &Path, content: &str) -> Result<Vec<T>, DataError> {
    raw_records(path, content)?
        .into_iter()
        .map(|(location, value)| {
            let item = record_label(&value, T::KEY_FIELD);
            let invalid = |reason: String| DataError::Invalid {
                path: path.to_path_buf(),
                location,
                item: item.clone(),
                reason,
            };
            let record: T = serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
            record.check().map_err(invalid)?;
            Ok(record)
        })
        .collect()
}

/// Load and validate a dataset file.
pub fn load_records<T: DatasetRecord>(path: &Path) -> Result<Vec<T>, DataError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(path, &content)
}

/// A non-fatal issue found by [`lint`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// Key of the record the warning is about.
    pub key: String,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

/// Check loaded records for common issues.
pub fn lint<T: DatasetRecord>(records: &[T]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |record: &T, message: String| ValidationWarning {
        key: record.key().to_string(),
        message,
    };

    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.key()) {
            warnings.push(warn(record, format!("duplicate key: {}", record.key())));
        }
    }

    for record in records {
        if record.translations().is_empty() {
            warnings.push(warn(record, "missing translation".into()));
        }
    }

    for record in records {
        if let Some(message) = record.lint() {
            warnings.push(warn(record, message));
        }
    }

    warnings
}
