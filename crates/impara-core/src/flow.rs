//! Scene flow.
//!
//! The interactive program is a small state machine. Each [`Scene`] reads
//! the accumulated [`SessionState`], talks to the learner, and returns a
//! [`SceneResult`] naming the next scene (or none, to stop) together with a
//! typed patch to the state. [`FlowRunner`] checks before every transition
//! that the target scene has the state it needs.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::FlowError;
use crate::exercises::ExerciseContext;
use crate::model::{Tense, VerbFilter};
use crate::random::RandomSource;
use crate::session::SessionSettings;
use crate::traits::{Console, DataSource, ProgressStore};

/// Identifies a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Category,
    MainMenu,
    Filter,
    VerbSession,
    WarmupOnly,
    NounSession,
    AdjectiveSession,
}

impl SceneId {
    /// State fields that must be set before the scene can run.
    fn requires(self) -> &'static [StateField] {
        match self {
            SceneId::Category => &[],
            SceneId::MainMenu
            | SceneId::Filter
            | SceneId::WarmupOnly
            | SceneId::NounSession
            | SceneId::AdjectiveSession => &[StateField::Category],
            SceneId::VerbSession => &[StateField::Category, StateField::Tense, StateField::Filter],
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneId::Category => "category",
            SceneId::MainMenu => "main-menu",
            SceneId::Filter => "filter",
            SceneId::VerbSession => "verb-session",
            SceneId::WarmupOnly => "warmup-only",
            SceneId::NounSession => "noun-session",
            SceneId::AdjectiveSession => "adjective-session",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
enum StateField {
    Category,
    Tense,
    Filter,
}

impl StateField {
    fn name(self) -> &'static str {
        match self {
            StateField::Category => "category",
            StateField::Tense => "tense",
            StateField::Filter => "filter",
        }
    }

    fn is_set(self, state: &SessionState) -> bool {
        match self {
            StateField::Category => state.category.is_some(),
            StateField::Tense => state.tense.is_some(),
            StateField::Filter => state.filter.is_some(),
        }
    }
}

/// Selections accumulated while navigating menus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Id of the selected category.
    pub category: Option<String>,
    pub tense: Option<Tense>,
    pub filter: Option<VerbFilter>,
}

impl SessionState {
    /// Overwrite every field the patch sets.
    pub fn apply(&mut self, patch: StatePatch) {
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(tense) = patch.tense {
            self.tense = Some(tense);
        }
        if let Some(filter) = patch.filter {
            self.filter = Some(filter);
        }
    }

    /// Fails with [`FlowError::MissingState`] if `scene` cannot run yet.
    pub fn check(&self, scene: SceneId) -> Result<(), FlowError> {
        match scene.requires().iter().find(|field| !field.is_set(self)) {
            Some(field) => Err(FlowError::MissingState {
                scene,
                field: field.name(),
            }),
            None => Ok(()),
        }
    }
}

/// Fields a scene wants to change. `None` leaves the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatePatch {
    pub category: Option<String>,
    pub tense: Option<Tense>,
    pub filter: Option<VerbFilter>,
}

/// What a scene asks the runner to do next.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneResult {
    /// Next scene; `None` stops the flow.
    pub next: Option<SceneId>,
    pub patch: StatePatch,
}

impl SceneResult {
    pub fn goto(next: SceneId) -> Self {
        Self {
            next: Some(next),
            patch: StatePatch::default(),
        }
    }

    pub fn stop() -> Self {
        Self {
            next: None,
            patch: StatePatch::default(),
        }
    }

    pub fn with_patch(mut self, patch: StatePatch) -> Self {
        self.patch = patch;
        self
    }
}

/// Services available to every scene.
pub struct FlowContext<'a> {
    pub console: &'a mut dyn Console,
    pub progress: &'a mut dyn ProgressStore,
    pub rng: &'a mut dyn RandomSource,
    pub data: &'a dyn DataSource,
    pub settings: SessionSettings,
}

impl FlowContext<'_> {
    /// Borrow the pieces an exercise or session needs.
    pub fn exercise_context(&mut self, tense: Tense) -> ExerciseContext<'_> {
        ExerciseContext {
            console: &mut *self.console,
            progress: &mut *self.progress,
            rng: &mut *self.rng,
            tense,
        }
    }
}

/// One step of the interactive flow.
pub trait Scene {
    fn id(&self) -> SceneId;

    fn run(&self, ctx: &mut FlowContext<'_>, state: &SessionState) -> anyhow::Result<SceneResult>;
}

/// Runs scenes until one stops the flow.
#[derive(Default)]
pub struct FlowRunner {
    scenes: HashMap<SceneId, Box<dyn Scene>>,
}

impl FlowRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene under its own id, replacing any previous one.
    pub fn register(mut self, scene: impl Scene + 'static) -> Self {
        self.scenes.insert(scene.id(), Box::new(scene));
        self
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    /// Run from `start` and return the final state.
    pub fn run(
        &self,
        ctx: &mut FlowContext<'_>,
        start: SceneId,
        mut state: SessionState,
    ) -> anyhow::Result<SessionState> {
        let mut current = Some(start);
        while let Some(id) = current {
            state.check(id)?;
            let scene = self.scenes.get(&id).ok_or(FlowError::UnknownScene(id))?;
            debug!(scene = %id, "entering scene");
            let result = scene.run(ctx, &state)?;
            state.apply(result.patch);
            current = result.next;
        }
        debug!("flow finished");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{InMemoryProgressStore, ScriptedConsole, StaticData};
    use crate::random::FixedRandom;

    /// Scene that returns a fixed result and logs its id to the console.
    struct Step {
        id: SceneId,
        result: SceneResult,
    }

    impl Scene for Step {
        fn id(&self) -> SceneId {
            self.id
        }

        fn run(&self, ctx: &mut FlowContext<'_>, _state: &SessionState) -> anyhow::Result<SceneResult> {
            ctx.console.say(&self.id.to_string());
            Ok(self.result.clone())
        }
    }

    fn run_flow(runner: &FlowRunner, start: SceneId) -> (anyhow::Result<SessionState>, ScriptedConsole) {
        let mut console = ScriptedConsole::new(Vec::<String>::new());
        let mut progress = InMemoryProgressStore::new();
        let mut rng = FixedRandom::new(vec![0.0]);
        let data = StaticData::single("base", vec![], vec![], vec![]);
        let result = {
            let mut ctx = FlowContext {
                console: &mut console,
                progress: &mut progress,
                rng: &mut rng,
                data: &data,
                settings: SessionSettings::default(),
            };
            runner.run(&mut ctx, start, SessionState::default())
        };
        (result, console)
    }

    #[test]
    fn patches_accumulate_and_flow_stops() {
        let runner = FlowRunner::new()
            .register(Step {
                id: SceneId::Category,
                result: SceneResult::goto(SceneId::Filter).with_patch(StatePatch {
                    category: Some("base".into()),
                    ..StatePatch::default()
                }),
            })
            .register(Step {
                id: SceneId::Filter,
                result: SceneResult::goto(SceneId::VerbSession).with_patch(StatePatch {
                    tense: Some(Tense::Past),
                    filter: Some(VerbFilter::Irregular),
                    ..StatePatch::default()
                }),
            })
            .register(Step {
                id: SceneId::VerbSession,
                result: SceneResult::stop(),
            });

        let (state, console) = run_flow(&runner, SceneId::Category);
        let state = state.unwrap();
        assert_eq!(state.category.as_deref(), Some("base"));
        assert_eq!(state.tense, Some(Tense::Past));
        assert_eq!(state.filter, Some(VerbFilter::Irregular));
        assert_eq!(console.transcript(), "category\nfilter\nverb-session");
    }

    #[test]
    fn transition_without_state_fails() {
        let runner = FlowRunner::new()
            .register(Step {
                id: SceneId::Category,
                result: SceneResult::goto(SceneId::VerbSession).with_patch(StatePatch {
                    category: Some("base".into()),
                    ..StatePatch::default()
                }),
            })
            .register(Step {
                id: SceneId::VerbSession,
                result: SceneResult::stop(),
            });

        let (result, console) = run_flow(&runner, SceneId::Category);
        let err = result.unwrap_err();
        let flow_err = err.downcast_ref::<FlowError>().unwrap();
        assert!(matches!(
            flow_err,
            FlowError::MissingState {
                scene: SceneId::VerbSession,
                field: "tense"
            }
        ));
        assert!(!console.saw("verb-session"));
    }

    #[test]
    fn unknown_scene_fails() {
        let runner = FlowRunner::new().register(Step {
            id: SceneId::Category,
            result: SceneResult::goto(SceneId::Category).with_patch(StatePatch::default()),
        });
        assert!(runner.contains(SceneId::Category));

        let runner = FlowRunner::new();
        let (result, _) = run_flow(&runner, SceneId::Category);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "no scene registered for key: category");
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut state = SessionState {
            category: Some("base".into()),
            tense: Some(Tense::Present),
            filter: None,
        };
        state.apply(StatePatch {
            filter: Some(VerbFilter::Regular),
            ..StatePatch::default()
        });
        assert_eq!(state.tense, Some(Tense::Present));
        assert_eq!(state.filter, Some(VerbFilter::Regular));
        assert!(state.check(SceneId::VerbSession).is_ok());
        assert!(SessionState::default().check(SceneId::Category).is_ok());
        assert!(SessionState::default().check(SceneId::MainMenu).is_err());
    }
}
