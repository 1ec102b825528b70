//! Themes catalog and category-aware dataset access.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use impara_core::model::{Adjective, Category, Noun, Verb};
use impara_core::traits::DataSource;

use crate::dataset::{load_records, DatasetRecord};

/// Catalog file name inside the data directory.
pub const THEMES_FILE: &str = "themes.json";

/// Contents of `themes.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemesCatalog {
    #[serde(default)]
    pub themes: Vec<Category>,
}

/// Reads the datasets a category names, relative to the data directory.
#[derive(Debug, Clone)]
pub struct DataRepository {
    data_dir: PathBuf,
    catalog: ThemesCatalog,
}

impl DataRepository {
    /// Open the catalog in `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let path = data_dir.join(THEMES_FILE);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read themes catalog: {}", path.display()))?;
        let catalog: ThemesCatalog = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse themes catalog: {}", path.display()))?;
        info!(
            path = %path.display(),
            categories = catalog.themes.len(),
            "loaded themes catalog"
        );
        Ok(Self { data_dir, catalog })
    }

    /// Merge every file in `files`, skipping the ones that do not exist.
    fn load<T: DatasetRecord>(&self, files: &[String]) -> Result<Vec<T>> {
        let mut merged = Vec::new();
        for file in files {
            let path = self.data_dir.join(file);
            if !path.exists() {
                warn!(path = %path.display(), "dataset file not found, skipping");
                continue;
            }
            let records: Vec<T> = load_records(&path)?;
            info!(path = %path.display(), records = records.len(), "loaded dataset");
            merged.extend(records);
        }
        Ok(merged)
    }
}

impl DataSource for DataRepository {
    fn categories(&self) -> &[Category] {
        &self.catalog.themes
    }

    fn verbs(&self, category: &Category) -> Result<Vec<Verb>> {
        self.load(&category.files.verbs)
    }

    fn nouns(&self, category: &Category) -> Result<Vec<Noun>> {
        self.load(&category.files.nouns)
    }

    fn adjectives(&self, category: &Category) -> Result<Vec<Adjective>> {
        self.load(&category.files.adjectives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impara_core::error::DataError;
    use std::path::Path;

    const THEMES: &str = r#"{
  "themes": [
    {"id": "base", "label": "Basics", "files": {"verbs": ["verbs.json", "extra.jsonl", "missing.json"], "nouns": ["nouns.json"]}},
    {"id": "empty", "label": "Empty"}
  ]
}"#;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    fn setup() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), THEMES_FILE, THEMES);
        write(
            dir.path(),
            "verbs.json",
            r#"[{"infinitive": "parlare", "translation": "to speak"}]"#,
        );
        write(
            dir.path(),
            "extra.jsonl",
            "{\"infinitive\": \"andare\", \"irregular\": true}\n",
        );
        write(
            dir.path(),
            "nouns.json",
            r#"[{"id": "n-casa", "lemma": "casa", "gender": "f", "forms": {"sg": "casa", "pl": "case"}}]"#,
        );
        dir
    }

    #[test]
    fn lists_categories() {
        let dir = setup();
        let repo = DataRepository::open(dir.path()).unwrap();
        let ids: Vec<&str> = repo.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["base", "empty"]);
        assert_eq!(repo.category("empty").unwrap().label, "Empty");
        assert!(repo.category("nope").is_none());
    }

    #[test]
    fn merges_files_and_skips_missing() {
        let dir = setup();
        let repo = DataRepository::open(dir.path()).unwrap();
        let base = repo.category("base").unwrap().clone();

        let verbs = repo.verbs(&base).unwrap();
        let names: Vec<&str> = verbs.iter().map(|v| v.infinitive.as_str()).collect();
        assert_eq!(names, vec!["parlare", "andare"]);
        assert_eq!(repo.nouns(&base).unwrap().len(), 1);
        assert!(repo.adjectives(&base).unwrap().is_empty());

        let empty = repo.category("empty").unwrap().clone();
        assert!(repo.verbs(&empty).unwrap().is_empty());
    }

    #[test]
    fn invalid_dataset_is_fatal() {
        let dir = setup();
        write(dir.path(), "extra.jsonl", "{\"infinitive\": \"\"}\n");
        let repo = DataRepository::open(dir.path()).unwrap();
        let base = repo.category("base").unwrap().clone();

        let err = repo.verbs(&base).unwrap_err();
        let data_err = err.downcast_ref::<DataError>().unwrap();
        assert!(matches!(data_err, DataError::Invalid { .. }));
        assert!(err.to_string().contains("extra.jsonl"));
    }

    #[test]
    fn missing_catalog_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataRepository::open(dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("themes.json"));
    }
}
