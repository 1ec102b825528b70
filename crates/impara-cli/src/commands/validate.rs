//! The `impara validate` command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ValueEnum;

use impara_core::model::{Adjective, Noun, Verb};
use impara_core::traits::DataSource;
use impara_store::{lint, load_records, DataRepository, DatasetRecord, ValidationWarning};

/// Record type held by a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    Verbs,
    Nouns,
    Adjectives,
}

impl DatasetKind {
    /// Guess from the file name, defaulting to verbs.
    fn guess(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.contains("noun") {
            DatasetKind::Nouns
        } else if name.contains("adj") {
            DatasetKind::Adjectives
        } else {
            DatasetKind::Verbs
        }
    }
}

pub fn execute(data: PathBuf, kind: Option<DatasetKind>) -> Result<()> {
    let total_warnings = if data.is_dir() {
        validate_directory(&data)?
    } else {
        let kind = kind.unwrap_or_else(|| DatasetKind::guess(&data));
        validate_file(&data, kind)?
    };

    if total_warnings == 0 {
        println!("All datasets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

fn print_warnings(warnings: &[ValidationWarning]) {
    for w in warnings {
        println!("  [{}] WARNING: {}", w.key, w.message);
    }
}

fn check_file<T: DatasetRecord>(path: &Path, noun: &str) -> Result<usize> {
    let records: Vec<T> = load_records(path)?;
    println!("{}: {} {noun}", path.display(), records.len());
    let warnings = lint(&records);
    print_warnings(&warnings);
    Ok(warnings.len())
}

fn validate_file(path: &Path, kind: DatasetKind) -> Result<usize> {
    match kind {
        DatasetKind::Verbs => check_file::<Verb>(path, "verbs"),
        DatasetKind::Nouns => check_file::<Noun>(path, "nouns"),
        DatasetKind::Adjectives => check_file::<Adjective>(path, "adjectives"),
    }
}

fn validate_directory(dir: &Path) -> Result<usize> {
    let repo = DataRepository::open(dir)?;
    let mut total = 0;

    for category in repo.categories() {
        let verbs = repo.verbs(category)?;
        let nouns = repo.nouns(category)?;
        let adjectives = repo.adjectives(category)?;
        println!(
            "Category: {} ({} verbs, {} nouns, {} adjectives)",
            category.label,
            verbs.len(),
            nouns.len(),
            adjectives.len()
        );

        let warnings: Vec<ValidationWarning> = lint(&verbs)
            .into_iter()
            .chain(lint(&nouns))
            .chain(lint(&adjectives))
            .collect();
        print_warnings(&warnings);
        total += warnings.len();
    }

    Ok(total)
}
