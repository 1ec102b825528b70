//! Progress report: a serializable snapshot of what the learner knows.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Table};
use serde::{Deserialize, Serialize};

use crate::model::{LexDir, Pos, Tense};
use crate::progress::{LexicalRecord, ProgressDocument};

/// Snapshot of the progress document for one tense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Tense the verb mastery columns refer to.
    pub tense: Tense,
    /// Correct answers per direction that pass the lexical gate.
    pub lexical_gate: u32,
    pub verbs: Vec<VerbStatus>,
    pub nouns: Vec<LexemeStatus>,
    pub adjectives: Vec<LexemeStatus>,
}

/// Status of one verb.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbStatus {
    pub key: String,
    /// Conjugation attempts in the report tense.
    pub attempts: u32,
    /// Aggregate accuracy, 0 below the minimum attempt count.
    pub mastery: f64,
    pub mastered: bool,
    pub it2en: u32,
    pub en2it: u32,
    pub gated: bool,
}

/// Lexical status of one noun or adjective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexemeStatus {
    pub key: String,
    pub it2en: u32,
    pub en2it: u32,
    pub lexical_attempts: u32,
    pub gated: bool,
}

impl LexemeStatus {
    pub fn from_record(key: impl Into<String>, lex: LexicalRecord, gate: u32) -> Self {
        Self {
            key: key.into(),
            it2en: lex.correct(LexDir::It2En),
            en2it: lex.correct(LexDir::En2It),
            lexical_attempts: lex.attempts(),
            gated: lex.passes_gate(gate),
        }
    }
}

impl ProgressReport {
    /// Build a report over every item present in `doc`, sorted by key.
    pub fn build(doc: &ProgressDocument, tense: Tense, lexical_gate: u32) -> Self {
        let verbs = doc
            .verbs
            .keys()
            .map(|key| {
                let lex = doc.lexical(Pos::Verb, key);
                VerbStatus {
                    key: key.clone(),
                    attempts: doc.tense_attempts(key, tense),
                    mastery: doc.mastery(key, tense),
                    mastered: doc.is_mastered(key, tense),
                    it2en: lex.correct(LexDir::It2En),
                    en2it: lex.correct(LexDir::En2It),
                    gated: lex.passes_gate(lexical_gate),
                }
            })
            .collect();
        let nouns = doc
            .nouns
            .keys()
            .map(|key| LexemeStatus::from_record(key, doc.lexical(Pos::Noun, key), lexical_gate))
            .collect();
        let adjectives = doc
            .adjectives
            .keys()
            .map(|key| {
                LexemeStatus::from_record(key, doc.lexical(Pos::Adjective, key), lexical_gate)
            })
            .collect();

        Self {
            created_at: Utc::now(),
            tense,
            lexical_gate,
            verbs,
            nouns,
            adjectives,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty() && self.nouns.is_empty() && self.adjectives.is_empty()
    }

    /// Items of `pos` that passed the gate, and how many were tracked.
    pub fn gated(&self, pos: Pos) -> (usize, usize) {
        match pos {
            Pos::Verb => (
                self.verbs.iter().filter(|v| v.gated).count(),
                self.verbs.len(),
            ),
            Pos::Noun => (
                self.nouns.iter().filter(|n| n.gated).count(),
                self.nouns.len(),
            ),
            Pos::Adjective => (
                self.adjectives.iter().filter(|a| a.gated).count(),
                self.adjectives.len(),
            ),
        }
    }

    /// Save the report as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

/// Gate column value.
pub fn gate_mark(gated: bool) -> &'static str {
    if gated {
        "yes"
    } else {
        "-"
    }
}

/// Lexical progress table: correct answers per direction out of the gate,
/// attempts and gate status. `label` heads the item column.
pub fn lexeme_table(label: &str, items: &[LexemeStatus], gate: u32) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        label,
        LexDir::It2En.arrow(),
        LexDir::En2It.arrow(),
        "Attempts",
        "Gate",
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(&item.key),
            Cell::new(format!("{}/{gate}", item.it2en)),
            Cell::new(format!("{}/{gate}", item.en2it)),
            Cell::new(item.lexical_attempts),
            Cell::new(gate_mark(item.gated)),
        ]);
    }
    table
}
