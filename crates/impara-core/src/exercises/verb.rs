//! Verb drills plus the translation drill shared by every part of speech.

use tracing::debug;

use super::{ask, feedback, Exercise, ExerciseContext, Outcome};
use crate::conjugator;
use crate::fuzzy::is_correct;
use crate::model::{LexDir, Lexeme, Person, Pos, Verb};
use crate::random::pick_index;
use crate::traits::Tone;

/// Retype the headword. Spelling practice only; nothing is recorded.
#[derive(Debug, Default, Clone, Copy)]
pub struct InfinitiveTypingExercise;

impl<I: Lexeme> Exercise<I> for InfinitiveTypingExercise {
    fn name(&self) -> &'static str {
        "InfinitiveTyping"
    }

    fn run(&self, item: &I, ctx: &mut ExerciseContext<'_>) -> Outcome {
        ctx.console
            .print(&format!("Italian: {}", item.lemma()), Tone::Highlight);
        let prompt = match I::POS {
            Pos::Verb => "Type the Italian infinitive: ",
            _ => "Type the Italian word: ",
        };
        let Some(answer) = ask(ctx.console, prompt) else {
            return Outcome::Quit;
        };
        let ok = is_correct(&answer, item.lemma());
        feedback(ctx.console, ok, item.lemma())
    }
}

/// Translate in a random direction and record the lexical result.
#[derive(Debug, Default, Clone, Copy)]
pub struct TranslationExercise;

impl TranslationExercise {
    /// Direction for a draw `r`: it→en when `r < 0.5` and there is an
    /// English side to check against.
    pub fn direction(r: f64, has_translation: bool) -> LexDir {
        if r < 0.5 && has_translation {
            LexDir::It2En
        } else {
            LexDir::En2It
        }
    }
}

impl<I: Lexeme> Exercise<I> for TranslationExercise {
    fn name(&self) -> &'static str {
        "Translation"
    }

    fn run(&self, item: &I, ctx: &mut ExerciseContext<'_>) -> Outcome {
        let translations = item.translations();
        let dir = Self::direction(ctx.rng.next_f64(), !translations.is_empty());

        let ok = match dir {
            LexDir::It2En => {
                ctx.console
                    .print(&format!("Italian: {}", item.lemma()), Tone::Highlight);
                let Some(answer) = ask(ctx.console, "Translate to English: ") else {
                    return Outcome::Quit;
                };
                let ok = translations.iter().any(|t| is_correct(&answer, t));
                feedback(ctx.console, ok, &translations.display());
                ok
            }
            LexDir::En2It => {
                let english = translations.primary().unwrap_or("(no translation)");
                ctx.console
                    .print(&format!("English: {english}"), Tone::Hint);
                let prompt = match I::POS {
                    Pos::Verb => "Italian infinitive: ",
                    _ => "Italian: ",
                };
                let Some(answer) = ask(ctx.console, prompt) else {
                    return Outcome::Quit;
                };
                let ok = is_correct(&answer, item.lemma());
                feedback(ctx.console, ok, item.lemma());
                ok
            }
        };

        ctx.progress.update_lexical(I::POS, item.key(), dir, ok);
        debug!(key = item.key(), %dir, ok, "translation graded");
        Outcome::from_bool(ok)
    }
}

/// Conjugate for one randomly chosen person in the session tense.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConjugationExercise;

impl Exercise<Verb> for ConjugationExercise {
    fn name(&self) -> &'static str {
        "Conjugation"
    }

    fn run(&self, verb: &Verb, ctx: &mut ExerciseContext<'_>) -> Outcome {
        let person = Person::from_index(pick_index(ctx.rng, Person::ALL.len()))
            .unwrap_or(Person::Loro);
        let expected = conjugator::expected_form(verb, ctx.tense, person);

        let prompt = format!(
            "{} ({}) form of {} in {}: ",
            person.italian(),
            person.english(),
            verb.infinitive,
            ctx.tense
        );
        let Some(answer) = ask(ctx.console, &prompt) else {
            return Outcome::Quit;
        };

        let ok = is_correct(&answer, expected.as_deref().unwrap_or(""));
        ctx.progress.update(&verb.infinitive, ctx.tense, person, ok);
        debug!(verb = %verb.infinitive, %person, ok, "conjugation graded");
        feedback(ctx.console, ok, expected.as_deref().unwrap_or("(n/a)"))
    }
}
