//! The `impara tables` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use impara_core::conjugator::{self, Conjugation};
use impara_core::model::{Person, Tense, Verb};
use impara_core::traits::DataSource;
use impara_store::{load_config_from, DataRepository};

pub fn execute(
    tense: Tense,
    endings: bool,
    category: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    if endings {
        print_endings();
        return Ok(());
    }

    let config = load_config_from(config.as_deref())?;
    let repo = DataRepository::open(&config.data_dir)?;
    let verbs = collect_verbs(&repo, category.as_deref())?;
    if verbs.is_empty() {
        println!("No verbs found.");
        return Ok(());
    }

    let mut header = vec!["Verb".to_string()];
    header.extend(Person::ALL.iter().map(|p| p.italian().to_string()));
    let imperative = tense == Tense::Present;
    if imperative {
        header.push("imperativo (tu / voi)".to_string());
    }
    let mut table = Table::new();
    table.set_header(header);

    let mut missing = 0;
    for verb in &verbs {
        let mut row = vec![Cell::new(&verb.infinitive)];
        match conjugator::table(verb, tense) {
            Some(forms) => row.extend(forms.into_iter().map(Cell::new)),
            None => {
                missing += 1;
                row.extend(Person::ALL.iter().map(|_| Cell::new("(n/a)")));
            }
        }
        if imperative {
            row.push(Cell::new(imperative_pair(verb)));
        }
        table.add_row(row);
    }

    println!("{} tense ({} verbs)", tense.title(), verbs.len());
    println!("{table}");
    if missing > 0 {
        println!("{missing} verb(s) have no {tense} forms stored or derivable.");
    }
    Ok(())
}

fn imperative_pair(verb: &Verb) -> String {
    match (
        conjugator::imperative(verb, Person::Tu),
        conjugator::imperative(verb, Person::Voi),
    ) {
        (Some(tu), Some(voi)) => format!("{tu} / {voi}"),
        _ => "-".to_string(),
    }
}

/// Verbs of one category, or of every category without duplicates.
fn collect_verbs(repo: &DataRepository, category: Option<&str>) -> Result<Vec<Verb>> {
    if let Some(id) = category {
        let category = repo
            .category(id)
            .ok_or_else(|| anyhow::anyhow!("unknown category: {id}"))?;
        return repo.verbs(category);
    }

    let mut seen = HashSet::new();
    let mut verbs = Vec::new();
    for category in repo.categories() {
        for verb in repo.verbs(category)? {
            if seen.insert(verb.infinitive.clone()) {
                verbs.push(verb);
            }
        }
    }
    Ok(verbs)
}

fn print_endings() {
    let mut table = Table::new();
    let mut header = vec!["Person".to_string()];
    header.extend(Conjugation::ALL.iter().map(|c| c.suffix().to_string()));
    table.set_header(header);

    for person in Person::ALL {
        let mut row = vec![Cell::new(person.italian())];
        row.extend(
            Conjugation::ALL
                .iter()
                .map(|c| Cell::new(format!("-{}", c.present_endings()[person.index()]))),
        );
        table.add_row(row);
    }

    println!("Present tense endings");
    println!("{table}");
    println!("Imperative (tu / voi): -are → -a / -ate, -ere → -i / -ete, -ire → -i / -ite");
}
