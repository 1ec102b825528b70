//! The `impara practice` command.

use std::path::PathBuf;

use anyhow::Result;

use impara_core::flow::{FlowContext, SceneId, SessionState};
use impara_core::preload::PreloadedData;
use impara_core::random::{RandomSource, SeededRandom, ThreadRandom};
use impara_core::scenes::default_flow;
use impara_core::traits::DataSource;
use impara_store::{load_config_from, DataRepository, JsonProgressStore};

use crate::console::TerminalConsole;

pub fn execute(category: Option<String>, seed: Option<u64>, config: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config.as_deref())?;
    let repository = DataRepository::open(&config.data_dir)?;
    let data = PreloadedData::load(&repository)?;

    let start = match &category {
        Some(id) => {
            if data.category(id).is_none() {
                anyhow::bail!("unknown category: {id}");
            }
            SceneId::MainMenu
        }
        None => SceneId::Category,
    };

    tracing::info!(
        data_dir = %config.data_dir.display(),
        progress = %config.progress_path.display(),
        ?seed,
        "starting practice"
    );
    let mut progress = JsonProgressStore::open(&config.progress_path);
    let mut console = TerminalConsole::new(config.clear_screen);
    let mut rng: Box<dyn RandomSource> = match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };

    let mut ctx = FlowContext {
        console: &mut console,
        progress: &mut progress,
        rng: rng.as_mut(),
        data: &data,
        settings: config.session_settings(),
    };
    let state = SessionState {
        category,
        ..SessionState::default()
    };
    default_flow().run(&mut ctx, start, state)?;

    println!("\nA presto!");
    Ok(())
}
