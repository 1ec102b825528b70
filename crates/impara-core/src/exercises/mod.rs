//! Drill strategies.
//!
//! An exercise takes one item, asks one question, grades the answer with the
//! fuzzy matcher and reports the result to the progress store. Exercises
//! hold no state between runs.

pub mod adjective;
pub mod noun;
pub mod verb;

pub use adjective::AdjectiveFormsExercise;
pub use noun::{NounFormsExercise, NounGenderExercise};
pub use verb::{ConjugationExercise, InfinitiveTypingExercise, TranslationExercise};

use crate::model::Tense;
use crate::random::RandomSource;
use crate::traits::{Console, ProgressStore, Tone};

/// Answer that leaves the current loop instead of being graded.
pub const QUIT_KEYWORD: &str = "q";

/// Result of one exercise run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Nothing could be asked for this item.
    Skipped,
    /// The learner asked to leave; progress is untouched.
    Quit,
}

impl Outcome {
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

/// Everything an exercise may touch while running.
pub struct ExerciseContext<'a> {
    pub console: &'a mut dyn Console,
    pub progress: &'a mut dyn ProgressStore,
    pub rng: &'a mut dyn RandomSource,
    /// Tense drilled by conjugation exercises.
    pub tense: Tense,
}

/// A single-question drill over items of type `I`.
pub trait Exercise<I> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn run(&self, item: &I, ctx: &mut ExerciseContext<'_>) -> Outcome;
}

/// Whether a raw answer means "leave": empty, or the quit keyword.
pub fn is_quit(answer: &str) -> bool {
    let answer = answer.trim();
    answer.is_empty() || answer.eq_ignore_ascii_case(QUIT_KEYWORD)
}

/// Prompt for an answer. `None` when the learner quits or input ends.
pub(crate) fn ask(console: &mut dyn Console, prompt: &str) -> Option<String> {
    console.read_line(prompt).filter(|answer| !is_quit(answer))
}

/// Print the verdict and turn it into an [`Outcome`].
pub(crate) fn feedback(console: &mut dyn Console, ok: bool, expected: &str) -> Outcome {
    if ok {
        console.print("✔ Correct!", Tone::Success);
    } else {
        console.print(&format!("✘ Wrong: \"{expected}\""), Tone::Failure);
    }
    Outcome::from_bool(ok)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedConsole;

    #[test]
    fn quit_answers() {
        assert!(is_quit(""));
        assert!(is_quit("  "));
        assert!(is_quit("q"));
        assert!(is_quit("Q"));
        assert!(!is_quit("quando"));
    }

    #[test]
    fn ask_filters_quit_and_eof() {
        let mut console = ScriptedConsole::new(["parlo", "q"]);
        assert_eq!(ask(&mut console, "> ").as_deref(), Some("parlo"));
        assert_eq!(ask(&mut console, "> "), None);
        assert_eq!(ask(&mut console, "> "), None);
    }

    #[test]
    fn feedback_lines() {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        assert_eq!(feedback(&mut console, true, "x"), Outcome::Correct);
        assert_eq!(feedback(&mut console, false, "parlo"), Outcome::Incorrect);
        assert_eq!(console.output[0], (Tone::Success, "✔ Correct!".to_string()));
        assert_eq!(
            console.output[1],
            (Tone::Failure, "✘ Wrong: \"parlo\"".to_string())
        );
    }
}
