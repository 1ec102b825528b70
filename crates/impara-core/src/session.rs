//! Drill sessions.
//!
//! A session walks one batch through its phases. Every session opens with a
//! translation warm-up that repeats until the learner moves on; verb
//! sessions can continue with conjugation, noun sessions with forms and
//! gender, adjective sessions with agreement forms.

use tracing::debug;

use crate::exercises::{
    AdjectiveFormsExercise, ConjugationExercise, Exercise, ExerciseContext,
    InfinitiveTypingExercise, NounFormsExercise, NounGenderExercise, Outcome,
    TranslationExercise, QUIT_KEYWORD,
};
use crate::model::{Adjective, Lexeme, Noun, Verb, VerbFilter};
use crate::progress::DEFAULT_LEXICAL_GATE;
use crate::report::{lexeme_table, LexemeStatus};
use crate::scheduler::{ScheduleOptions, Scheduler, DEFAULT_BATCH_SIZE};
use crate::traits::Tone;

/// Whether the lexical gate must be reached before leaving the warm-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePolicy {
    /// Gate progress is shown but the learner may move on at any time.
    #[default]
    Advisory,
    /// Moving on is refused until every item in the batch passed the gate.
    Enforced,
}

/// Knobs shared by every session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    /// Correct answers needed per direction.
    pub lexical_gate: u32,
    pub gate_policy: GatePolicy,
    pub batch_size: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            lexical_gate: DEFAULT_LEXICAL_GATE,
            gate_policy: GatePolicy::Advisory,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// All phases ran or were skipped.
    Finished,
    /// The learner quit, or input ran out.
    Quit,
}

/// Command that leaves the warm-up for the next phase.
struct Advance {
    key: &'static str,
    label: &'static str,
}

enum WarmupExit {
    Advance,
    Leave,
}

fn matches_command(answer: &str, key: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(key)
}

fn gated_count<I: Lexeme>(ctx: &ExerciseContext<'_>, batch: &[I], required: u32) -> usize {
    batch
        .iter()
        .filter(|item| ctx.progress.has_lexical_gate(I::POS, item.key(), required))
        .count()
}

fn show_gate<I: Lexeme>(ctx: &mut ExerciseContext<'_>, batch: &[I], required: u32) {
    let ready = gated_count(ctx, batch, required);
    ctx.console.print(
        &format!(
            "\nLexical ready: {ready}/{} (need {required} correct each way)",
            batch.len()
        ),
        Tone::Hint,
    );
}

fn show_status<I: Lexeme>(ctx: &mut ExerciseContext<'_>, batch: &[I], required: u32) {
    ctx.console.print("\n=== Warm-up Status ===", Tone::Heading);
    let rows: Vec<LexemeStatus> = batch
        .iter()
        .map(|item| {
            let lex = ctx.progress.document().lexical(I::POS, item.key());
            LexemeStatus::from_record(item.lemma(), lex, required)
        })
        .collect();
    let table = lexeme_table(&capitalize(I::POS.to_string()), &rows, required);
    for line in table.to_string().lines() {
        ctx.console.say(line);
    }
}

fn capitalize(word: String) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => word,
    }
}

fn list_batch<I: Lexeme>(ctx: &mut ExerciseContext<'_>, title: &str, batch: &[I]) {
    ctx.console.clear();
    ctx.console.print(
        &format!("\n=== {title} ({} {}) ===", batch.len(), I::POS.plural()),
        Tone::Heading,
    );
    ctx.console.say("");
    for (i, item) in batch.iter().enumerate() {
        ctx.console.say(&format!(
            "  {}. {}: {}",
            i + 1,
            item.lemma(),
            item.translations().display()
        ));
    }
}

/// Translation warm-up over `batch`, repeated until the learner leaves.
///
/// Menu commands: Enter runs a round, `s` shows the status table, the
/// `advance` key moves on, `q` (or end of input) leaves.
fn warmup<I: Lexeme>(
    ctx: &mut ExerciseContext<'_>,
    settings: &SessionSettings,
    batch: &[I],
    exercises: &[&dyn Exercise<I>],
    advance: Option<Advance>,
) -> WarmupExit {
    let required = settings.lexical_gate;
    let menu = match &advance {
        Some(a) => format!("Enter to start, s=status, {}={}, q=quit", a.key, a.label),
        None => "Enter to start, s=status, q=quit".to_string(),
    };

    loop {
        ctx.console.print(
            &format!("\nWarm-up: {} translations (it↔en).", I::POS),
            Tone::Highlight,
        );
        ctx.console.say(&menu);
        let Some(command) = ctx.console.read_line("> ") else {
            return WarmupExit::Leave;
        };

        if matches_command(&command, QUIT_KEYWORD) {
            return WarmupExit::Leave;
        }
        if matches_command(&command, "s") {
            show_status(ctx, batch, required);
            continue;
        }
        if let Some(a) = &advance {
            if matches_command(&command, a.key) {
                let ready = gated_count(ctx, batch, required);
                if settings.gate_policy == GatePolicy::Enforced && ready < batch.len() {
                    ctx.console.print(
                        &format!(
                            "Finish the warm-up first: {ready}/{} items have passed the lexical gate.",
                            batch.len()
                        ),
                        Tone::Failure,
                    );
                    continue;
                }
                debug!(ready, total = batch.len(), "leaving warm-up");
                return WarmupExit::Advance;
            }
        }

        'round: for item in batch {
            ctx.console.clear();
            ctx.console
                .print(&format!("\nWarm-up: {}", item.lemma()), Tone::Heading);
            for exercise in exercises {
                let outcome = exercise.run(item, ctx);
                debug!(exercise = exercise.name(), key = item.key(), ?outcome, "warm-up answer");
                if outcome == Outcome::Quit {
                    break 'round;
                }
            }
            match ctx.console.read_line("\nEnter to continue, b=break, q=quit: ") {
                None => return WarmupExit::Leave,
                Some(answer) if matches_command(&answer, QUIT_KEYWORD) => {
                    return WarmupExit::Leave
                }
                Some(answer) if matches_command(&answer, "b") => break 'round,
                Some(_) => {}
            }
        }
        show_gate(ctx, batch, required);
    }
}

/// Run `exercise` once per item after an opt-in prompt.
///
/// Returns [`SessionEnd::Quit`] only when input ran out; `q` just skips the
/// rest of the phase.
fn drill_phase<I: Lexeme>(
    ctx: &mut ExerciseContext<'_>,
    title: &str,
    intro: &str,
    batch: &[I],
    exercise: &dyn Exercise<I>,
) -> SessionEnd {
    ctx.console.clear();
    ctx.console.print(
        &format!("\n{title}: {} {}.", batch.len(), I::POS.plural()),
        Tone::Hint,
    );
    ctx.console.say(intro);
    let Some(start) = ctx.console.read_line("> ") else {
        return SessionEnd::Quit;
    };
    if matches_command(&start, QUIT_KEYWORD) {
        return SessionEnd::Finished;
    }

    for (i, item) in batch.iter().enumerate() {
        ctx.console.clear();
        ctx.console.print(
            &format!("\n{title} {}/{}: {}", i + 1, batch.len(), item.lemma()),
            Tone::Heading,
        );
        let outcome = exercise.run(item, ctx);
        debug!(exercise = exercise.name(), key = item.key(), ?outcome, "drill answer");
        if outcome == Outcome::Quit {
            break;
        }
        match ctx.console.read_line("\nEnter to continue, q=skip: ") {
            None => return SessionEnd::Quit,
            Some(answer) if matches_command(&answer, QUIT_KEYWORD) => break,
            Some(_) => {}
        }
    }
    SessionEnd::Finished
}

fn leave(ctx: &mut ExerciseContext<'_>) -> SessionEnd {
    ctx.console.say("\nExiting to main menu.");
    SessionEnd::Quit
}

// ---------------------------------------------------------------------------
// Verbs
// ---------------------------------------------------------------------------

/// Warm-up on a verb batch, optionally followed by conjugation.
#[derive(Debug, Clone)]
pub struct VerbSession {
    pub title: String,
    /// Verbs drilled in the warm-up.
    pub batch: Vec<Verb>,
    /// Verbs the conjugation phase may draw from.
    pub pool: Vec<Verb>,
    pub filter: VerbFilter,
    /// Run the conjugation phase after the warm-up.
    pub conjugation: bool,
}

impl VerbSession {
    pub fn run(&self, ctx: &mut ExerciseContext<'_>, settings: &SessionSettings) -> SessionEnd {
        list_batch(ctx, &self.title, &self.batch);
        if self.batch.is_empty() {
            ctx.console.print(
                &format!("No {} verbs available for this selection.", ctx.tense),
                Tone::Failure,
            );
            return SessionEnd::Finished;
        }

        let exercises: [&dyn Exercise<Verb>; 2] =
            [&InfinitiveTypingExercise, &TranslationExercise];
        let advance = self.conjugation.then_some(Advance {
            key: "c",
            label: "conjugation",
        });
        match warmup(ctx, settings, &self.batch, &exercises, advance) {
            WarmupExit::Leave if self.conjugation => return leave(ctx),
            WarmupExit::Leave => {
                ctx.console.print("\nWarm-up finished!", Tone::Success);
                return SessionEnd::Finished;
            }
            WarmupExit::Advance => {}
        }

        let opts = ScheduleOptions::new(ctx.tense)
            .filter(self.filter)
            .batch_size(settings.batch_size)
            .lexical_gate(settings.lexical_gate);
        let batch = Scheduler::new(&*ctx.progress).conjugation_batch(&self.pool, &opts, ctx.rng);
        if batch.is_empty() {
            ctx.console.print(
                &format!("No verbs have a complete {} table.", ctx.tense),
                Tone::Failure,
            );
            return SessionEnd::Finished;
        }

        ctx.console.clear();
        ctx.console.print(
            &format!("\nConjugation: {} ({} verbs)", ctx.tense.title(), batch.len()),
            Tone::Heading,
        );
        for (i, verb) in batch.iter().enumerate() {
            ctx.console.print(
                &format!("\nVerb {}/{}: {}", i + 1, batch.len(), verb.infinitive),
                Tone::Heading,
            );
            if ConjugationExercise.run(verb, ctx) == Outcome::Quit {
                break;
            }
            match ctx.console.read_line("\nEnter to continue, q=finish: ") {
                None => return SessionEnd::Quit,
                Some(answer) if matches_command(&answer, QUIT_KEYWORD) => break,
                Some(_) => ctx.console.clear(),
            }
        }

        ctx.console.print("\n✅ Session finished!", Tone::Success);
        SessionEnd::Finished
    }
}

// ---------------------------------------------------------------------------
// Nouns and adjectives
// ---------------------------------------------------------------------------

/// Warm-up, then singular/plural forms, then gender.
#[derive(Debug, Clone)]
pub struct NounSession {
    pub title: String,
    pub batch: Vec<Noun>,
}

impl NounSession {
    pub fn run(&self, ctx: &mut ExerciseContext<'_>, settings: &SessionSettings) -> SessionEnd {
        list_batch(ctx, &self.title, &self.batch);
        let advance = Advance {
            key: "f",
            label: "forms",
        };
        let exercises: [&dyn Exercise<Noun>; 1] = [&TranslationExercise];
        if let WarmupExit::Leave = warmup(ctx, settings, &self.batch, &exercises, Some(advance)) {
            return leave(ctx);
        }

        let phases: [(&str, &str, &dyn Exercise<Noun>); 2] = [
            (
                "Forms",
                "Enter to start, or q to skip to gender.",
                &NounFormsExercise,
            ),
            ("Gender", "Enter to start, or q to finish.", &NounGenderExercise),
        ];
        for (title, intro, exercise) in phases {
            if drill_phase(ctx, title, intro, &self.batch, exercise) == SessionEnd::Quit {
                return SessionEnd::Quit;
            }
        }

        ctx.console.clear();
        ctx.console
            .print("\n✅ Noun session finished!", Tone::Success);
        SessionEnd::Finished
    }
}

/// Warm-up, then agreement forms.
#[derive(Debug, Clone)]
pub struct AdjectiveSession {
    pub title: String,
    pub batch: Vec<Adjective>,
}

impl AdjectiveSession {
    pub fn run(&self, ctx: &mut ExerciseContext<'_>, settings: &SessionSettings) -> SessionEnd {
        list_batch(ctx, &self.title, &self.batch);
        let advance = Advance {
            key: "f",
            label: "forms",
        };
        let exercises: [&dyn Exercise<Adjective>; 1] = [&TranslationExercise];
        if let WarmupExit::Leave = warmup(ctx, settings, &self.batch, &exercises, Some(advance)) {
            return leave(ctx);
        }

        if drill_phase(
            ctx,
            "Forms",
            "Enter to start, or q to finish.",
            &self.batch,
            &AdjectiveFormsExercise,
        ) == SessionEnd::Quit
        {
            return SessionEnd::Quit;
        }

        ctx.console.clear();
        ctx.console
            .print("\n✅ Adjective session finished!", Tone::Success);
        SessionEnd::Finished
    }
}
