//! In-memory test doubles for the engine's seams.

use std::collections::VecDeque;

use crate::model::{Adjective, Category, CategoryFiles, Noun, Verb};
use crate::progress::{ProgressDocument, ProgressEvent};
use crate::traits::{Console, DataSource, ProgressStore, Tone};

/// A progress store that never touches disk.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProgressStore {
    doc: ProgressDocument,
    /// Number of events recorded.
    pub writes: usize,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for InMemoryProgressStore {
    fn document(&self) -> &ProgressDocument {
        &self.doc
    }

    fn record(&mut self, event: ProgressEvent<'_>) {
        self.doc.apply(&event);
        self.writes += 1;
    }
}

/// A console that replays canned answers and records everything shown.
///
/// Once the answers run out, `read_line` reports end of input.
#[derive(Debug, Default, Clone)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    /// Printed lines, in order.
    pub output: Vec<(Tone, String)>,
    /// Prompts shown, in order.
    pub prompts: Vec<String>,
    /// Number of times the screen was cleared.
    pub clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// All printed text joined with newlines.
    pub fn transcript(&self) -> String {
        self.output
            .iter()
            .map(|(_, line)| line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any printed line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|(_, line)| line.contains(needle))
    }
}

impl Console for ScriptedConsole {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn print(&mut self, text: &str, tone: Tone) {
        self.output.push((tone, text.to_string()));
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().map(|a| a.trim().to_string())
    }
}

/// A data source over fixed in-memory lists; every category sees all items.
#[derive(Debug, Clone)]
pub struct StaticData {
    pub categories: Vec<Category>,
    pub verbs: Vec<Verb>,
    pub nouns: Vec<Noun>,
    pub adjectives: Vec<Adjective>,
}

impl StaticData {
    /// One category named `id` holding the given items.
    pub fn single(id: &str, verbs: Vec<Verb>, nouns: Vec<Noun>, adjectives: Vec<Adjective>) -> Self {
        Self {
            categories: vec![Category {
                id: id.to_string(),
                label: id.to_string(),
                files: CategoryFiles::default(),
            }],
            verbs,
            nouns,
            adjectives,
        }
    }
}

impl DataSource for StaticData {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn verbs(&self, _category: &Category) -> anyhow::Result<Vec<Verb>> {
        Ok(self.verbs.clone())
    }

    fn nouns(&self, _category: &Category) -> anyhow::Result<Vec<Noun>> {
        Ok(self.nouns.clone())
    }

    fn adjectives(&self, _category: &Category) -> anyhow::Result<Vec<Adjective>> {
        Ok(self.adjectives.clone())
    }
}
