//! Seams between the drill engine and the outside world.
//!
//! The engine talks to the learner through [`Console`], records answers
//! through [`ProgressStore`] and reads datasets through [`DataSource`].
//! `impara-store` and `impara-cli` provide the real implementations;
//! [`crate::mock`] provides in-memory ones for tests.

use crate::model::{Adjective, AdjForm, Category, LexDir, Noun, NounForm, Person, Pos, Tense, Verb};
use crate::progress::{ProgressDocument, ProgressEvent};

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Visual role of a line of output. Terminals map these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Highlight,
    Hint,
    Success,
    Failure,
}

/// Line-based interaction with the learner.
pub trait Console {
    /// Clear the screen, if the terminal supports it.
    fn clear(&mut self);

    /// Print one line in the given tone.
    fn print(&mut self, text: &str, tone: Tone);

    /// Show `prompt` and read one line. Returns the trimmed answer, or
    /// `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Print one plain line.
    fn say(&mut self, text: &str) {
        self.print(text, Tone::Plain);
    }

    /// Wait for Enter. Returns `false` on end of input.
    fn pause(&mut self, prompt: &str) -> bool {
        self.read_line(prompt).is_some()
    }
}

// ---------------------------------------------------------------------------
// Progress store
// ---------------------------------------------------------------------------

/// Owner of the progress document.
///
/// Implementors supply read access and a way to record one event; every
/// query and update below is derived from those two.
pub trait ProgressStore {
    /// Current document.
    fn document(&self) -> &ProgressDocument;

    /// Apply a graded answer and persist it.
    fn record(&mut self, event: ProgressEvent<'_>);

    fn update(&mut self, key: &str, tense: Tense, person: Person, correct: bool) {
        self.record(ProgressEvent::Conjugation {
            key,
            tense,
            person,
            correct,
        });
    }

    fn mastery(&self, key: &str, tense: Tense) -> f64 {
        self.document().mastery(key, tense)
    }

    fn attempts(&self, key: &str, tense: Tense) -> u32 {
        self.document().tense_attempts(key, tense)
    }

    fn update_lexical(&mut self, pos: Pos, key: &str, dir: LexDir, correct: bool) {
        self.record(ProgressEvent::Lexical {
            pos,
            key,
            dir,
            correct,
        });
    }

    fn lexical_correct(&self, pos: Pos, key: &str, dir: LexDir) -> u32 {
        self.document().lexical(pos, key).correct(dir)
    }

    fn has_lexical_gate(&self, pos: Pos, key: &str, required: u32) -> bool {
        self.document().lexical(pos, key).passes_gate(required)
    }

    fn lexical_attempts(&self, pos: Pos, key: &str) -> u32 {
        self.document().lexical(pos, key).attempts()
    }

    fn update_noun_form(&mut self, key: &str, form: NounForm, correct: bool) {
        self.record(ProgressEvent::NounForm { key, form, correct });
    }

    fn noun_form_correct(&self, key: &str, form: NounForm) -> u32 {
        self.document().noun_form(key, form).correct
    }

    fn update_gender(&mut self, key: &str, correct: bool) {
        self.record(ProgressEvent::NounGender { key, correct });
    }

    fn gender_correct(&self, key: &str) -> u32 {
        self.document().noun_gender(key).correct
    }

    fn update_adjective_form(&mut self, key: &str, form: AdjForm, correct: bool) {
        self.record(ProgressEvent::AdjectiveForm { key, form, correct });
    }

    fn adjective_form_correct(&self, key: &str, form: AdjForm) -> u32 {
        self.document().adjective_form(key, form).correct
    }
}

// ---------------------------------------------------------------------------
// Data source
// ---------------------------------------------------------------------------

/// Source of categories and the items belonging to each.
pub trait DataSource {
    fn categories(&self) -> &[Category];

    fn verbs(&self, category: &Category) -> anyhow::Result<Vec<Verb>>;

    fn nouns(&self, category: &Category) -> anyhow::Result<Vec<Noun>>;

    fn adjectives(&self, category: &Category) -> anyhow::Result<Vec<Adjective>>;

    /// Look a category up by id.
    fn category(&self, id: &str) -> Option<&Category> {
        self.categories().iter().find(|c| c.id == id)
    }
}
