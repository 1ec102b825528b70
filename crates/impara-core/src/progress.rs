//! Per-item mastery records.
//!
//! One [`ProgressDocument`] holds every counter impara tracks: conjugation
//! cells per verb/tense/person, lexical cells per translation direction, and
//! the extra form/gender cells for nouns and adjectives. Verbs live at the top
//! level keyed by infinitive; nouns and adjectives get their own sections.
//!
//! The document is pure data. Persistence lives behind
//! [`ProgressStore`](crate::traits::ProgressStore).

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::model::{AdjForm, LexDir, NounForm, Person, Pos, Tense, PERSON_COUNT};

/// Aggregate attempts a tense needs before its mastery counts.
pub const MASTER_MIN_ATTEMPTS: u32 = 3;

/// Accuracy at which practiced material counts as mastered.
pub const MASTER_ACCURACY: f64 = 0.9;

/// Correct answers needed in each direction to pass the lexical gate.
pub const DEFAULT_LEXICAL_GATE: u32 = 3;

/// Attempts/correct counter. `correct <= attempts` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCell {
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub attempts: u32,
}

impl ProgressCell {
    pub fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.attempts)
        }
    }
}

/// Six cells, one per grammatical person.
pub type TenseRecord = [ProgressCell; PERSON_COUNT];

/// Translation counters in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub it2en: Option<ProgressCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en2it: Option<ProgressCell>,
}

impl LexicalRecord {
    pub fn cell(&self, dir: LexDir) -> ProgressCell {
        match dir {
            LexDir::It2En => self.it2en,
            LexDir::En2It => self.en2it,
        }
        .unwrap_or_default()
    }

    fn cell_mut(&mut self, dir: LexDir) -> &mut ProgressCell {
        match dir {
            LexDir::It2En => self.it2en.get_or_insert_with(ProgressCell::default),
            LexDir::En2It => self.en2it.get_or_insert_with(ProgressCell::default),
        }
    }

    pub fn record(&mut self, dir: LexDir, correct: bool) {
        self.cell_mut(dir).record(correct);
    }

    pub fn correct(&self, dir: LexDir) -> u32 {
        self.cell(dir).correct
    }

    /// Attempts across both directions.
    pub fn attempts(&self) -> u32 {
        self.cell(LexDir::It2En).attempts + self.cell(LexDir::En2It).attempts
    }

    /// Gate passes on correct counts only; accuracy is irrelevant.
    pub fn passes_gate(&self, required: u32) -> bool {
        LexDir::ALL.iter().all(|dir| self.correct(*dir) >= required)
    }
}

/// Progress for one verb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerbProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub present: Option<TenseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past: Option<TenseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub future: Option<TenseRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex: Option<LexicalRecord>,
}

impl VerbProgress {
    pub fn tense(&self, tense: Tense) -> Option<&TenseRecord> {
        match tense {
            Tense::Present => self.present.as_ref(),
            Tense::Past => self.past.as_ref(),
            Tense::Future => self.future.as_ref(),
        }
    }

    fn tense_mut(&mut self, tense: Tense) -> &mut TenseRecord {
        let slot = match tense {
            Tense::Present => &mut self.present,
            Tense::Past => &mut self.past,
            Tense::Future => &mut self.future,
        };
        slot.get_or_insert_with(Default::default)
    }
}

/// Singular/plural counters for a noun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounFormRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sg: Option<ProgressCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pl: Option<ProgressCell>,
}

impl NounFormRecord {
    fn slot(&mut self, form: NounForm) -> &mut Option<ProgressCell> {
        match form {
            NounForm::Sg => &mut self.sg,
            NounForm::Pl => &mut self.pl,
        }
    }

    pub fn cell(&self, form: NounForm) -> ProgressCell {
        match form {
            NounForm::Sg => self.sg,
            NounForm::Pl => self.pl,
        }
        .unwrap_or_default()
    }
}

/// Progress for one noun.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NounProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex: Option<LexicalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<NounFormRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<ProgressCell>,
}

/// Agreement-form counters for an adjective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjFormRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ms: Option<ProgressCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mp: Option<ProgressCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<ProgressCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fp: Option<ProgressCell>,
}

impl AdjFormRecord {
    fn slot(&mut self, form: AdjForm) -> &mut Option<ProgressCell> {
        match form {
            AdjForm::Ms => &mut self.ms,
            AdjForm::Mp => &mut self.mp,
            AdjForm::Fs => &mut self.fs,
            AdjForm::Fp => &mut self.fp,
        }
    }

    pub fn cell(&self, form: AdjForm) -> ProgressCell {
        match form {
            AdjForm::Ms => self.ms,
            AdjForm::Mp => self.mp,
            AdjForm::Fs => self.fs,
            AdjForm::Fp => self.fp,
        }
        .unwrap_or_default()
    }
}

/// Progress for one adjective.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjectiveProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex: Option<LexicalRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<AdjFormRecord>,
}

/// A single graded answer, as reported by an exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProgressEvent<'a> {
    Conjugation {
        key: &'a str,
        tense: Tense,
        person: Person,
        correct: bool,
    },
    Lexical {
        pos: Pos,
        key: &'a str,
        dir: LexDir,
        correct: bool,
    },
    NounForm {
        key: &'a str,
        form: NounForm,
        correct: bool,
    },
    NounGender {
        key: &'a str,
        correct: bool,
    },
    AdjectiveForm {
        key: &'a str,
        form: AdjForm,
        correct: bool,
    },
}

/// The whole progress map, as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressDocument {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nouns: BTreeMap<String, NounProgress>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub adjectives: BTreeMap<String, AdjectiveProgress>,
    #[serde(flatten)]
    pub verbs: BTreeMap<String, VerbProgress>,
}

impl ProgressDocument {
    /// Apply one graded answer. Counters only ever increase.
    pub fn apply(&mut self, event: &ProgressEvent<'_>) {
        match *event {
            ProgressEvent::Conjugation {
                key,
                tense,
                person,
                correct,
            } => {
                let record = self.verbs.entry(key.to_string()).or_default().tense_mut(tense);
                record[person.index()].record(correct);
            }
            ProgressEvent::Lexical {
                pos,
                key,
                dir,
                correct,
            } => {
                self.lexical_mut(pos, key).record(dir, correct);
            }
            ProgressEvent::NounForm { key, form, correct } => {
                let entry = self.nouns.entry(key.to_string()).or_default();
                entry
                    .forms
                    .get_or_insert_with(Default::default)
                    .slot(form)
                    .get_or_insert_with(Default::default)
                    .record(correct);
            }
            ProgressEvent::NounGender { key, correct } => {
                let entry = self.nouns.entry(key.to_string()).or_default();
                entry
                    .gender
                    .get_or_insert_with(Default::default)
                    .record(correct);
            }
            ProgressEvent::AdjectiveForm { key, form, correct } => {
                let entry = self.adjectives.entry(key.to_string()).or_default();
                entry
                    .forms
                    .get_or_insert_with(Default::default)
                    .slot(form)
                    .get_or_insert_with(Default::default)
                    .record(correct);
            }
        }
    }

    fn lexical_mut(&mut self, pos: Pos, key: &str) -> &mut LexicalRecord {
        let slot = match pos {
            Pos::Verb => &mut self.verbs.entry(key.to_string()).or_default().lex,
            Pos::Noun => &mut self.nouns.entry(key.to_string()).or_default().lex,
            Pos::Adjective => &mut self.adjectives.entry(key.to_string()).or_default().lex,
        };
        slot.get_or_insert_with(Default::default)
    }

    /// Lexical counters for an item; all zero if it was never drilled.
    pub fn lexical(&self, pos: Pos, key: &str) -> LexicalRecord {
        let lex = match pos {
            Pos::Verb => self.verbs.get(key).and_then(|p| p.lex),
            Pos::Noun => self.nouns.get(key).and_then(|p| p.lex),
            Pos::Adjective => self.adjectives.get(key).and_then(|p| p.lex),
        };
        lex.unwrap_or_default()
    }

    fn tense_totals(&self, key: &str, tense: Tense) -> (u32, u32) {
        self.verbs
            .get(key)
            .and_then(|p| p.tense(tense))
            .map(|cells| {
                cells
                    .iter()
                    .fold((0, 0), |(c, a), cell| (c + cell.correct, a + cell.attempts))
            })
            .unwrap_or((0, 0))
    }

    /// Aggregate accuracy for a tense, or 0 until the tense has at least
    /// [`MASTER_MIN_ATTEMPTS`] attempts summed over all persons.
    pub fn mastery(&self, key: &str, tense: Tense) -> f64 {
        let (correct, attempts) = self.tense_totals(key, tense);
        if attempts < MASTER_MIN_ATTEMPTS {
            return 0.0;
        }
        f64::from(correct) / f64::from(attempts)
    }

    /// Attempts summed over the six persons.
    pub fn tense_attempts(&self, key: &str, tense: Tense) -> u32 {
        self.tense_totals(key, tense).1
    }

    /// Whether every person has enough attempts at [`MASTER_ACCURACY`].
    pub fn is_mastered(&self, key: &str, tense: Tense) -> bool {
        self.verbs
            .get(key)
            .and_then(|p| p.tense(tense))
            .is_some_and(|cells| {
                cells.iter().all(|cell| {
                    cell.attempts >= MASTER_MIN_ATTEMPTS && cell.accuracy() >= MASTER_ACCURACY
                })
            })
    }

    pub fn noun_form(&self, key: &str, form: NounForm) -> ProgressCell {
        self.nouns
            .get(key)
            .and_then(|p| p.forms)
            .map(|f| f.cell(form))
            .unwrap_or_default()
    }

    pub fn noun_gender(&self, key: &str) -> ProgressCell {
        self.nouns
            .get(key)
            .and_then(|p| p.gender)
            .unwrap_or_default()
    }

    pub fn adjective_form(&self, key: &str, form: AdjForm) -> ProgressCell {
        self.adjectives
            .get(key)
            .and_then(|p| p.forms)
            .map(|f| f.cell(form))
            .unwrap_or_default()
    }
}

impl ProgressDocument {
    /// Build a document from parsed JSON, one entry at a time.
    ///
    /// An entry that does not match the expected shape is salvaged: missing
    /// or non-numeric counters read as 0, tense arrays are padded or cut to
    /// six cells. Entries with nothing to salvage (a top-level scalar, say)
    /// are dropped. Other entries are never affected.
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(entries) = value else {
            debug!("progress document is not an object, starting empty");
            return Self::default();
        };

        let mut doc = Self::default();
        for (key, value) in entries {
            match key.as_str() {
                "nouns" => doc.nouns = read_section("nouns", value, repair_noun),
                "adjectives" => {
                    doc.adjectives = read_section("adjectives", value, repair_adjective)
                }
                _ => {
                    if let Some(verb) = read_entry("verbs", &key, value, repair_verb) {
                        doc.verbs.insert(key, verb);
                    }
                }
            }
        }
        doc
    }
}

fn read_section<T: DeserializeOwned>(
    section: &str,
    value: Value,
    repair: fn(&Value) -> Option<T>,
) -> BTreeMap<String, T> {
    let Value::Object(entries) = value else {
        debug!(section, "progress section is not an object, skipping");
        return BTreeMap::new();
    };
    entries
        .into_iter()
        .filter_map(|(key, value)| {
            read_entry(section, &key, value, repair).map(|entry| (key, entry))
        })
        .collect()
}

fn read_entry<T: DeserializeOwned>(
    section: &str,
    key: &str,
    value: Value,
    repair: fn(&Value) -> Option<T>,
) -> Option<T> {
    match T::deserialize(&value) {
        Ok(entry) => Some(entry),
        Err(e) => {
            let repaired = repair(&value);
            debug!(
                section,
                key,
                error = %e,
                repaired = repaired.is_some(),
                "malformed progress entry"
            );
            repaired
        }
    }
}

fn counter(obj: &Map<String, Value>, field: &str) -> u32 {
    obj.get(field)
        .and_then(Value::as_u64)
        .map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX))
}

fn repair_cell(value: &Value) -> Option<ProgressCell> {
    let obj = value.as_object()?;
    let attempts = counter(obj, "attempts");
    Some(ProgressCell {
        correct: counter(obj, "correct").min(attempts),
        attempts,
    })
}

fn named_cell(obj: &Map<String, Value>, field: &str) -> Option<ProgressCell> {
    obj.get(field).and_then(repair_cell)
}

fn repair_tense(value: &Value) -> Option<TenseRecord> {
    let items = value.as_array()?;
    let mut record = TenseRecord::default();
    for (cell, item) in record.iter_mut().zip(items) {
        *cell = repair_cell(item).unwrap_or_default();
    }
    Some(record)
}

fn repair_lexical(value: &Value) -> Option<LexicalRecord> {
    let obj = value.as_object()?;
    Some(LexicalRecord {
        it2en: named_cell(obj, "it2en"),
        en2it: named_cell(obj, "en2it"),
    })
}

fn repair_verb(value: &Value) -> Option<VerbProgress> {
    let obj = value.as_object()?;
    Some(VerbProgress {
        present: obj.get("present").and_then(repair_tense),
        past: obj.get("past").and_then(repair_tense),
        future: obj.get("future").and_then(repair_tense),
        lex: obj.get("lex").and_then(repair_lexical),
    })
}

fn repair_noun(value: &Value) -> Option<NounProgress> {
    let obj = value.as_object()?;
    let forms = obj.get("forms").and_then(Value::as_object).map(|forms| NounFormRecord {
        sg: named_cell(forms, "sg"),
        pl: named_cell(forms, "pl"),
    });
    Some(NounProgress {
        lex: obj.get("lex").and_then(repair_lexical),
        forms,
        gender: named_cell(obj, "gender"),
    })
}

fn repair_adjective(value: &Value) -> Option<AdjectiveProgress> {
    let obj = value.as_object()?;
    let forms = obj.get("forms").and_then(Value::as_object).map(|forms| AdjFormRecord {
        ms: named_cell(forms, "ms"),
        mp: named_cell(forms, "mp"),
        fs: named_cell(forms, "fs"),
        fp: named_cell(forms, "fp"),
    });
    Some(AdjectiveProgress {
        lex: obj.get("lex").and_then(repair_lexical),
        forms,
    })
}
