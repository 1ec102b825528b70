//! The `impara status` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use impara_core::model::{Pos, Tense};
use impara_core::report::{gate_mark, lexeme_table, LexemeStatus, ProgressReport};
use impara_core::traits::ProgressStore;
use impara_store::{load_config_from, JsonProgressStore};

pub fn execute(
    tense: Tense,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let store = JsonProgressStore::open(&config.progress_path);
    let report = ProgressReport::build(store.document(), tense, config.lexical_gate);

    match format.as_str() {
        "json" => match output {
            Some(path) => {
                report.save_json(&path)?;
                eprintln!("Report written to {}", path.display());
            }
            None => {
                let json =
                    serde_json::to_string_pretty(&report).context("failed to serialize report")?;
                println!("{json}");
            }
        },
        "text" => print_text(&report, store.path()),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_text(report: &ProgressReport, progress_path: &Path) {
    println!("Progress file: {}", progress_path.display());
    if report.is_empty() {
        println!("No progress recorded yet.");
        return;
    }

    if !report.verbs.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            "Verb", "Attempts", "Mastery", "it→en", "en→it", "Gate",
        ]);
        for verb in &report.verbs {
            table.add_row(vec![
                Cell::new(&verb.key),
                Cell::new(verb.attempts),
                Cell::new(format!("{:.0}%", verb.mastery * 100.0)),
                Cell::new(verb.it2en),
                Cell::new(verb.en2it),
                Cell::new(gate_mark(verb.gated)),
            ]);
        }
        let (gated, total) = report.gated(Pos::Verb);
        println!("Verbs ({}, {gated}/{total} past the lexical gate)", report.tense);
        println!("{table}\n");
    }

    print_lexemes(report, Pos::Noun, &report.nouns);
    print_lexemes(report, Pos::Adjective, &report.adjectives);
}

fn print_lexemes(report: &ProgressReport, pos: Pos, items: &[LexemeStatus]) {
    if items.is_empty() {
        return;
    }
    let table = lexeme_table("Item", items, report.lexical_gate);
    let (gated, total) = report.gated(pos);
    println!("{} ({gated}/{total} past the lexical gate)", capitalized(pos.plural()));
    println!("{table}\n");
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
