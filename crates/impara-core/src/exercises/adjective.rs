use super::{ask, feedback, Exercise, ExerciseContext, Outcome};
use crate::fuzzy::is_correct;
use crate::model::Adjective;
use crate::random::pick_index;
use crate::traits::Tone;

/// Produce one of the adjective's available agreement forms.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdjectiveFormsExercise;

impl Exercise<Adjective> for AdjectiveFormsExercise {
    fn name(&self) -> &'static str {
        "AdjectiveForms"
    }

    fn run(&self, adj: &Adjective, ctx: &mut ExerciseContext<'_>) -> Outcome {
        let available = adj.forms.available();
        if available.is_empty() {
            ctx.console.say("(no forms available)");
            return Outcome::Skipped;
        }
        let form = available[pick_index(ctx.rng, available.len())];
        let Some(target) = adj.forms.get(form) else {
            return Outcome::Skipped;
        };

        ctx.console
            .print(&format!("Lemma: {}", adj.lemma), Tone::Highlight);
        let Some(answer) = ask(ctx.console, &format!("Italian form ({}): ", form.label())) else {
            return Outcome::Quit;
        };
        let ok = is_correct(&answer, target);
        ctx.progress.update_adjective_form(&adj.id, form, ok);
        feedback(ctx.console, ok, target)
    }
}
