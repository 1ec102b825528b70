//! The interactive menus and the scenes that launch sessions.

use anyhow::Context as _;
use tracing::info;

use crate::error::FlowError;
use crate::flow::{FlowContext, FlowRunner, Scene, SceneId, SceneResult, SessionState, StatePatch};
use crate::model::{Category, Tense, VerbFilter};
use crate::scheduler::{ScheduleOptions, Scheduler};
use crate::session::{AdjectiveSession, NounSession, VerbSession};
use crate::traits::{Console, DataSource, Tone};

/// A runner with every scene registered. Start it at [`SceneId::Category`].
pub fn default_flow() -> FlowRunner {
    FlowRunner::new()
        .register(CategoryScene)
        .register(MainMenuScene)
        .register(FilterScene)
        .register(VerbSessionScene)
        .register(WarmupScene)
        .register(NounSessionScene)
        .register(AdjectiveSessionScene)
}

/// Parsed answer to a numbered menu.
enum Choice {
    Number(usize),
    Quit,
    Invalid,
}

fn read_choice(console: &mut dyn Console, prompt: &str) -> Choice {
    match console.read_line(prompt) {
        None => Choice::Quit,
        Some(answer) => {
            let answer = answer.trim();
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                Choice::Quit
            } else {
                answer
                    .parse::<usize>()
                    .map(Choice::Number)
                    .unwrap_or(Choice::Invalid)
            }
        }
    }
}

/// "Return to main menu? (Y/n)": Enter or yes goes back, anything else stops.
fn return_to_menu(console: &mut dyn Console) -> SceneResult {
    match console.read_line("Return to main menu? (Y/n): ") {
        Some(answer) => {
            let answer = answer.trim().to_lowercase();
            if answer.is_empty() || answer == "y" || answer == "yes" {
                SceneResult::goto(SceneId::MainMenu)
            } else {
                SceneResult::stop()
            }
        }
        None => SceneResult::stop(),
    }
}

fn selected_category<'d>(ctx: &FlowContext<'d>, state: &SessionState, scene: SceneId) -> anyhow::Result<&'d Category> {
    let id = state.category.as_deref().ok_or(FlowError::MissingState {
        scene,
        field: "category",
    })?;
    let data: &'d dyn DataSource = ctx.data;
    data.category(id)
        .with_context(|| format!("category '{id}' is not in the catalog"))
}

fn count_label(label: &str, count: usize) -> String {
    if count == 0 {
        format!("{label}: no data")
    } else {
        format!("{label} ({count})")
    }
}

// ---------------------------------------------------------------------------
// Menus
// ---------------------------------------------------------------------------

/// Pick a themed category.
pub struct CategoryScene;

impl Scene for CategoryScene {
    fn id(&self) -> SceneId {
        SceneId::Category
    }

    fn run(&self, ctx: &mut FlowContext<'_>, _state: &SessionState) -> anyhow::Result<SceneResult> {
        ctx.console.clear();
        let categories = ctx.data.categories();
        if categories.is_empty() {
            ctx.console.print(
                "No categories found. Run `impara init` or check `data_dir`.",
                Tone::Failure,
            );
            return Ok(SceneResult::stop());
        }

        ctx.console.print("\n=== Choose a Category ===\n", Tone::Heading);
        for (i, category) in categories.iter().enumerate() {
            ctx.console
                .say(&format!("{}) {} ({})", i + 1, category.label, category.id));
        }
        let quit = categories.len() + 1;
        ctx.console.say(&format!("{quit}) Quit"));

        match read_choice(ctx.console, &format!("\nSelect (1-{quit}): ")) {
            Choice::Number(n) if n == quit => Ok(SceneResult::stop()),
            Choice::Quit => Ok(SceneResult::stop()),
            Choice::Number(n) if (1..quit).contains(&n) => {
                let category = &categories[n - 1];
                info!(category = %category.id, "category selected");
                Ok(SceneResult::goto(SceneId::MainMenu).with_patch(StatePatch {
                    category: Some(category.id.clone()),
                    ..StatePatch::default()
                }))
            }
            _ => {
                ctx.console.print("Invalid choice.", Tone::Failure);
                Ok(SceneResult::goto(SceneId::Category))
            }
        }
    }
}

/// Top-level menu for the selected category.
pub struct MainMenuScene;

impl Scene for MainMenuScene {
    fn id(&self) -> SceneId {
        SceneId::MainMenu
    }

    fn run(&self, ctx: &mut FlowContext<'_>, state: &SessionState) -> anyhow::Result<SceneResult> {
        let category = selected_category(ctx, state, SceneId::MainMenu)?;
        let verbs = ctx.data.verbs(category)?.len();
        let nouns = ctx.data.nouns(category)?.len();
        let adjectives = ctx.data.adjectives(category)?.len();

        ctx.console.clear();
        ctx.console
            .print(&format!("\n=== Practice: {} ===\n", category.label), Tone::Heading);
        ctx.console
            .say(&format!("1) {}", count_label("Practice verbs", verbs)));
        ctx.console
            .say(&format!("2) {}", count_label("Practice nouns", nouns)));
        ctx.console
            .say(&format!("3) {}", count_label("Practice adjectives", adjectives)));
        ctx.console.say("4) Verb warm-up only");
        ctx.console.say("5) Change category");
        ctx.console.say("6) Quit");

        let next = match read_choice(ctx.console, "\nSelect an option (1-6): ") {
            Choice::Number(1) => SceneId::Filter,
            Choice::Number(2) => SceneId::NounSession,
            Choice::Number(3) => SceneId::AdjectiveSession,
            Choice::Number(4) => SceneId::WarmupOnly,
            Choice::Number(5) => SceneId::Category,
            Choice::Number(6) | Choice::Quit => return Ok(SceneResult::stop()),
            _ => {
                ctx.console.print("Invalid choice.", Tone::Failure);
                SceneId::MainMenu
            }
        };
        Ok(SceneResult::goto(next))
    }
}

/// Choose the tense and the verb set.
pub struct FilterScene;

impl Scene for FilterScene {
    fn id(&self) -> SceneId {
        SceneId::Filter
    }

    fn run(&self, ctx: &mut FlowContext<'_>, _state: &SessionState) -> anyhow::Result<SceneResult> {
        ctx.console.clear();
        ctx.console.print("\nChoose tense:", Tone::Hint);
        for (i, tense) in Tense::ALL.iter().enumerate() {
            ctx.console.say(&format!("{}) {}", i + 1, tense.title()));
        }
        ctx.console.say("4) Back");
        let tense = match read_choice(ctx.console, "Select an option (1-4): ") {
            Choice::Number(n @ 1..=3) => Tense::ALL[n - 1],
            _ => return Ok(SceneResult::goto(SceneId::MainMenu)),
        };

        ctx.console.clear();
        ctx.console.print(
            &format!("\n{}: choose verb set:", tense.title().to_uppercase()),
            Tone::Hint,
        );
        ctx.console.say("1) Regular verbs");
        ctx.console.say("2) Irregular verbs");
        ctx.console.say("3) Mixed (all verbs)");
        ctx.console.say("4) Back");
        let filter = match read_choice(ctx.console, "Select an option (1-4): ") {
            Choice::Number(1) => VerbFilter::Regular,
            Choice::Number(2) => VerbFilter::Irregular,
            Choice::Number(3) => VerbFilter::All,
            _ => return Ok(SceneResult::goto(SceneId::MainMenu)),
        };

        Ok(SceneResult::goto(SceneId::VerbSession).with_patch(StatePatch {
            tense: Some(tense),
            filter: Some(filter),
            ..StatePatch::default()
        }))
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Verb warm-up followed by conjugation.
pub struct VerbSessionScene;

impl Scene for VerbSessionScene {
    fn id(&self) -> SceneId {
        SceneId::VerbSession
    }

    fn run(&self, ctx: &mut FlowContext<'_>, state: &SessionState) -> anyhow::Result<SceneResult> {
        let missing = |field| FlowError::MissingState {
            scene: SceneId::VerbSession,
            field,
        };
        let tense = state.tense.ok_or_else(|| missing("tense"))?;
        let filter = state.filter.ok_or_else(|| missing("filter"))?;
        let category = selected_category(ctx, state, SceneId::VerbSession)?;
        let verbs = ctx.data.verbs(category)?;

        let opts = ScheduleOptions::new(tense)
            .filter(filter)
            .batch_size(ctx.settings.batch_size)
            .lexical_gate(ctx.settings.lexical_gate);
        let batch = Scheduler::new(&*ctx.progress).pick_batch(&verbs, &opts, ctx.rng);

        let session = VerbSession {
            title: format!("{} Tense: {filter}", tense.title()),
            batch,
            pool: verbs,
            filter,
            conjugation: true,
        };
        let settings = ctx.settings.clone();
        session.run(&mut ctx.exercise_context(tense), &settings);
        Ok(return_to_menu(ctx.console))
    }
}

/// Verb translation warm-up with no conjugation phase.
pub struct WarmupScene;

impl Scene for WarmupScene {
    fn id(&self) -> SceneId {
        SceneId::WarmupOnly
    }

    fn run(&self, ctx: &mut FlowContext<'_>, state: &SessionState) -> anyhow::Result<SceneResult> {
        let category = selected_category(ctx, state, SceneId::WarmupOnly)?;
        let verbs = ctx.data.verbs(category)?;
        if verbs.is_empty() {
            return Ok(no_data(ctx, "verb"));
        }

        let settings = ctx.settings.clone();
        let batch = Scheduler::new(&*ctx.progress).pick_lexemes(
            &verbs,
            settings.batch_size,
            settings.lexical_gate,
            ctx.rng,
        );
        let session = VerbSession {
            title: format!("Verb warm-up: {}", category.label),
            batch,
            pool: Vec::new(),
            filter: VerbFilter::All,
            conjugation: false,
        };
        session.run(&mut ctx.exercise_context(Tense::Present), &settings);
        Ok(return_to_menu(ctx.console))
    }
}

fn no_data(ctx: &mut FlowContext<'_>, pos: &str) -> SceneResult {
    ctx.console
        .say(&format!("\nNo {pos} data for this category."));
    if ctx.console.pause("Press Enter to continue...") {
        SceneResult::goto(SceneId::MainMenu)
    } else {
        SceneResult::stop()
    }
}

/// Noun warm-up, forms and gender.
pub struct NounSessionScene;

impl Scene for NounSessionScene {
    fn id(&self) -> SceneId {
        SceneId::NounSession
    }

    fn run(&self, ctx: &mut FlowContext<'_>, state: &SessionState) -> anyhow::Result<SceneResult> {
        let category = selected_category(ctx, state, SceneId::NounSession)?;
        let nouns = ctx.data.nouns(category)?;
        if nouns.is_empty() {
            return Ok(no_data(ctx, "noun"));
        }

        let settings = ctx.settings.clone();
        let batch = Scheduler::new(&*ctx.progress).pick_lexemes(
            &nouns,
            settings.batch_size,
            settings.lexical_gate,
            ctx.rng,
        );
        let session = NounSession {
            title: format!("Nouns: {}", category.label),
            batch,
        };
        session.run(&mut ctx.exercise_context(Tense::Present), &settings);
        Ok(return_to_menu(ctx.console))
    }
}

/// Adjective warm-up and agreement forms.
pub struct AdjectiveSessionScene;

impl Scene for AdjectiveSessionScene {
    fn id(&self) -> SceneId {
        SceneId::AdjectiveSession
    }

    fn run(&self, ctx: &mut FlowContext<'_>, state: &SessionState) -> anyhow::Result<SceneResult> {
        let category = selected_category(ctx, state, SceneId::AdjectiveSession)?;
        let adjectives = ctx.data.adjectives(category)?;
        if adjectives.is_empty() {
            return Ok(no_data(ctx, "adjective"));
        }

        let settings = ctx.settings.clone();
        let batch = Scheduler::new(&*ctx.progress).pick_lexemes(
            &adjectives,
            settings.batch_size,
            settings.lexical_gate,
            ctx.rng,
        );
        let session = AdjectiveSession {
            title: format!("Adjectives: {}", category.label),
            batch,
        };
        session.run(&mut ctx.exercise_context(Tense::Present), &settings);
        Ok(return_to_menu(ctx.console))
    }
}
