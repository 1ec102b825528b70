//! JSON-file-backed progress store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use impara_core::progress::{ProgressDocument, ProgressEvent};
use impara_core::traits::ProgressStore;

/// Progress store that owns the document and rewrites the whole file after
/// every recorded answer.
///
/// A missing or unreadable file opens as an empty document; a file with
/// valid syntax keeps every entry that can be read. A failed write is logged
/// and the in-memory document stays authoritative for the process.
#[derive(Debug)]
pub struct JsonProgressStore {
    path: PathBuf,
    doc: ProgressDocument,
}

impl JsonProgressStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = read_document(&path);
        Self { path, doc }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.doc).context("failed to serialize progress")?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write progress to {}", self.path.display()))
    }
}

fn read_document(path: &Path) -> ProgressDocument {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable progress file, starting empty");
            return ProgressDocument::default();
        }
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => ProgressDocument::from_json_value(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "malformed progress file, starting empty");
            ProgressDocument::default()
        }
    }
}

impl ProgressStore for JsonProgressStore {
    fn document(&self) -> &ProgressDocument {
        &self.doc
    }

    fn record(&mut self, event: ProgressEvent<'_>) {
        self.doc.apply(&event);
        if let Err(e) = self.persist() {
            warn!(error = %format!("{e:#}"), "progress not saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impara_core::model::{AdjForm, LexDir, NounForm, Person, Pos, Tense};

    fn progress_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("progress.json")
    }

    #[test]
    fn saves_and_reloads_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = progress_path(&dir);

        let mut a = JsonProgressStore::open(&path);
        a.update("parlare", Tense::Present, Person::Io, true);
        a.update_lexical(Pos::Verb, "parlare", LexDir::It2En, true);
        a.update_gender("n-casa", false);
        a.update_adjective_form("adj-rosso", AdjForm::Fp, true);

        let b = JsonProgressStore::open(&path);
        assert_eq!(b.attempts("parlare", Tense::Present), 1);
        assert_eq!(b.lexical_correct(Pos::Verb, "parlare", LexDir::It2En), 1);
        assert_eq!(b.document().noun_gender("n-casa").attempts, 1);
        assert_eq!(b.adjective_form_correct("adj-rosso", AdjForm::Fp), 1);
        assert_eq!(b.document(), a.document());
    }

    #[test]
    fn file_uses_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = progress_path(&dir);
        let mut store = JsonProgressStore::open(&path);
        store.update_noun_form("n-casa", NounForm::Pl, true);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"nouns\""));
    }

    #[test]
    fn recovers_from_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = progress_path(&dir);
        std::fs::write(&path, "{ this is : not json").unwrap();

        let mut store = JsonProgressStore::open(&path);
        assert_eq!(store.attempts("foo", Tense::Present), 0);
        assert_eq!(store.lexical_attempts(Pos::Verb, "foo"), 0);

        store.update("foo", Tense::Present, Person::Io, true);
        let reopened = JsonProgressStore::open(&path);
        assert_eq!(reopened.attempts("foo", Tense::Present), 1);
    }

    #[test]
    fn misshapen_entry_keeps_other_progress() {
        let dir = tempfile::tempdir().unwrap();
        let path = progress_path(&dir);
        let cell = r#"{"correct": 1, "attempts": 2}"#;
        std::fs::write(
            &path,
            format!(
                r#"{{"parlare": {{"present": [{cell}, {cell}, {cell}, {cell}, {cell}, {cell}]}},
                    "andare": {{"present": [{cell}]}}}}"#
            ),
        )
        .unwrap();

        let mut store = JsonProgressStore::open(&path);
        assert_eq!(store.attempts("parlare", Tense::Present), 12);
        assert_eq!(store.attempts("andare", Tense::Present), 2);

        store.update("essere", Tense::Present, Person::Io, true);
        let reopened = JsonProgressStore::open(&path);
        assert_eq!(reopened.attempts("parlare", Tense::Present), 12);
        assert_eq!(reopened.attempts("andare", Tense::Present), 2);
        assert_eq!(reopened.attempts("essere", Tense::Present), 1);

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["andare"]["present"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn missing_file_starts_empty_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.json");

        let mut store = JsonProgressStore::open(&path);
        assert!(store.document().verbs.is_empty());
        store.update("andare", Tense::Future, Person::Loro, false);
        assert!(path.exists());
    }

    #[test]
    fn mastery_after_three_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProgressStore::open(progress_path(&dir));

        store.update("parlare", Tense::Present, Person::Io, true);
        store.update("parlare", Tense::Present, Person::Tu, false);
        assert_eq!(store.mastery("parlare", Tense::Present), 0.0);

        store.update("parlare", Tense::Present, Person::Noi, true);
        assert!((store.mastery("parlare", Tense::Present) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn lexical_gate_needs_both_directions() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonProgressStore::open(progress_path(&dir));

        for _ in 0..3 {
            store.update_lexical(Pos::Verb, "essere", LexDir::It2En, true);
        }
        for _ in 0..2 {
            store.update_lexical(Pos::Verb, "essere", LexDir::En2It, true);
        }
        assert!(!store.has_lexical_gate(Pos::Verb, "essere", 3));

        store.update_lexical(Pos::Verb, "essere", LexDir::En2It, true);
        assert!(store.has_lexical_gate(Pos::Verb, "essere", 3));
        assert_eq!(store.lexical_attempts(Pos::Verb, "essere"), 6);
    }

    #[test]
    fn write_failure_keeps_memory_copy() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be overwritten as a file.
        let mut store = JsonProgressStore::open(dir.path());
        store.update("parlare", Tense::Past, Person::Voi, true);
        assert_eq!(store.attempts("parlare", Tense::Past), 1);
        assert!(dir.path().is_dir());
    }
}
