//! Noun drills: singular/plural forms and gender.

use super::{ask, feedback, Exercise, ExerciseContext, Outcome};
use crate::fuzzy::is_correct;
use crate::model::{Gender, Noun, NounForm};
use crate::traits::Tone;

/// Produce the singular or the plural, chosen at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct NounFormsExercise;

impl Exercise<Noun> for NounFormsExercise {
    fn name(&self) -> &'static str {
        "NounForms"
    }

    fn run(&self, noun: &Noun, ctx: &mut ExerciseContext<'_>) -> Outcome {
        let form = if ctx.rng.next_f64() < 0.5 {
            NounForm::Pl
        } else {
            NounForm::Sg
        };
        let target = match form {
            NounForm::Sg => &noun.forms.sg,
            NounForm::Pl => &noun.forms.pl,
        };

        ctx.console
            .print(&format!("Base: {}", noun.lemma), Tone::Highlight);
        let Some(answer) = ask(ctx.console, &format!("Italian {} form: ", form.label())) else {
            return Outcome::Quit;
        };
        let ok = is_correct(&answer, target);
        ctx.progress.update_noun_form(&noun.id, form, ok);
        feedback(ctx.console, ok, target)
    }
}

/// Name the grammatical gender.
#[derive(Debug, Default, Clone, Copy)]
pub struct NounGenderExercise;

impl Exercise<Noun> for NounGenderExercise {
    fn name(&self) -> &'static str {
        "NounGender"
    }

    fn run(&self, noun: &Noun, ctx: &mut ExerciseContext<'_>) -> Outcome {
        let prompt = format!("Gender of {} (m/f): ", noun.lemma);
        let Some(answer) = ask(ctx.console, &prompt) else {
            return Outcome::Quit;
        };
        let ok = Gender::parse_answer(&answer) == Some(noun.gender);
        ctx.progress.update_gender(&noun.id, ok);
        feedback(ctx.console, ok, noun.gender.short())
    }
}
