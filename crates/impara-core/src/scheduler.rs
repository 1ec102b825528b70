//! Batch selection.
//!
//! The [`Scheduler`] decides which items a drill sprint covers. Verbs are
//! ranked by conjugation mastery with a bias toward items already started;
//! nouns and adjectives are ranked by lexical progress. Every selection ends
//! with a shuffle driven by an injected [`RandomSource`].

use std::cmp::Ordering;

use tracing::debug;

use crate::model::{LexDir, Lexeme, Pos, Tense, Verb, VerbFilter};
use crate::progress::{DEFAULT_LEXICAL_GATE, MASTER_ACCURACY};
use crate::random::{shuffle, RandomSource};
use crate::traits::ProgressStore;

/// Default number of items per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Bonus for items with at least one conjugation attempt.
const PRACTICED_BONUS: f64 = 0.25;

/// Options controlling a verb batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOptions {
    pub tense: Tense,
    pub filter: VerbFilter,
    pub batch_size: usize,
    /// Prefer verbs that already passed the lexical gate.
    pub require_lex_gate: bool,
    /// Boost verbs with many translation attempts.
    pub prefer_lexical_attempts: bool,
    /// Correct answers per direction that pass the gate.
    pub lexical_gate: u32,
}

impl ScheduleOptions {
    pub fn new(tense: Tense) -> Self {
        Self {
            tense,
            filter: VerbFilter::All,
            batch_size: DEFAULT_BATCH_SIZE,
            require_lex_gate: false,
            prefer_lexical_attempts: false,
            lexical_gate: DEFAULT_LEXICAL_GATE,
        }
    }

    pub fn filter(mut self, filter: VerbFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    pub fn require_lex_gate(mut self, on: bool) -> Self {
        self.require_lex_gate = on;
        self
    }

    pub fn prefer_lexical_attempts(mut self, on: bool) -> Self {
        self.prefer_lexical_attempts = on;
        self
    }

    pub fn lexical_gate(mut self, required: u32) -> Self {
        self.lexical_gate = required;
        self
    }
}

/// Picks batches using the learner's recorded progress.
pub struct Scheduler<'a> {
    progress: &'a dyn ProgressStore,
}

impl<'a> Scheduler<'a> {
    pub fn new(progress: &'a dyn ProgressStore) -> Self {
        Self { progress }
    }

    fn gated(&self, verb: &Verb, required: u32) -> bool {
        self.progress
            .has_lexical_gate(Pos::Verb, &verb.infinitive, required)
    }

    /// Priority of a verb within its partition. Higher is drilled sooner.
    pub fn score(&self, verb: &Verb, opts: &ScheduleOptions) -> f64 {
        let key = verb.infinitive.as_str();
        let mastery = self.progress.mastery(key, opts.tense);
        let attempts = self.progress.attempts(key, opts.tense);
        let lex_attempts = f64::from(self.progress.lexical_attempts(Pos::Verb, key));

        let mut boost: f64 = 0.0;
        if opts.require_lex_gate {
            boost = boost.max((lex_attempts / 20.0).min(0.25));
        }
        if opts.prefer_lexical_attempts {
            boost = boost.max((lex_attempts / 10.0).min(0.5));
        }

        let practiced = if attempts > 0 { PRACTICED_BONUS } else { 0.0 };
        (1.0 - mastery) + practiced + boost
    }

    fn is_practiced(&self, verb: &Verb, tense: Tense) -> bool {
        let key = verb.infinitive.as_str();
        self.progress.attempts(key, tense) > 0 && self.progress.mastery(key, tense) < MASTER_ACCURACY
    }

    fn rank<'v>(&self, verbs: Vec<&'v Verb>, opts: &ScheduleOptions) -> Vec<&'v Verb> {
        let mut scored: Vec<(f64, &Verb)> =
            verbs.into_iter().map(|v| (self.score(v, opts), v)).collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.into_iter().map(|(_, v)| v).collect()
    }

    /// Select up to `opts.batch_size` verbs for a conjugation sprint.
    ///
    /// Only verbs matching the filter and holding a full six-form table for
    /// the tense are eligible. Started-but-unmastered verbs rank ahead of the
    /// rest; the top `max(2n, n + 1)` are shuffled and cut to `n`.
    pub fn pick_batch(
        &self,
        verbs: &[Verb],
        opts: &ScheduleOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Verb> {
        let size = opts.batch_size;
        if size == 0 {
            return Vec::new();
        }

        let eligible: Vec<&Verb> = verbs
            .iter()
            .filter(|v| opts.filter.matches(v))
            .filter(|v| v.has_complete_forms(opts.tense))
            .collect();

        let candidates = if opts.require_lex_gate {
            let (gated, rest): (Vec<&Verb>, Vec<&Verb>) = eligible
                .into_iter()
                .partition(|v| self.gated(v, opts.lexical_gate));
            if gated.len() >= size {
                gated
            } else {
                gated.into_iter().chain(rest).collect()
            }
        } else {
            eligible
        };

        let (practiced, fresh): (Vec<&Verb>, Vec<&Verb>) = candidates
            .into_iter()
            .partition(|v| self.is_practiced(v, opts.tense));
        let practiced_count = practiced.len();

        let mut ordered = self.rank(practiced, opts);
        ordered.extend(self.rank(fresh, opts));

        let take = (size * 2).max(size + 1);
        let mut top: Vec<Verb> = ordered.into_iter().take(take).cloned().collect();
        shuffle(&mut top, rng);
        top.truncate(size);

        debug!(
            tense = %opts.tense,
            filter = %opts.filter,
            practiced = practiced_count,
            selected = top.len(),
            "picked verb batch"
        );
        top
    }

    /// Batch for the conjugation phase: lexically gated verbs first, then
    /// filler chosen by [`pick_batch`](Self::pick_batch) with a preference
    /// for verbs that saw the most translation practice.
    pub fn conjugation_batch(
        &self,
        verbs: &[Verb],
        opts: &ScheduleOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Verb> {
        let (gated, rest): (Vec<Verb>, Vec<Verb>) = verbs
            .iter()
            .cloned()
            .partition(|v| self.gated(v, opts.lexical_gate));

        let mut batch = self.pick_batch(&gated, opts, rng);
        let missing = opts.batch_size.saturating_sub(batch.len());
        if missing > 0 {
            let filler_opts = opts
                .clone()
                .batch_size(missing)
                .require_lex_gate(false)
                .prefer_lexical_attempts(true);
            let filler = self.pick_batch(&rest, &filler_opts, rng);
            debug!(
                gated = batch.len(),
                filler = filler.len(),
                "filled conjugation batch"
            );
            batch.extend(filler);
        }
        batch
    }

    /// Select up to `size` nouns or adjectives for a translation warm-up.
    ///
    /// Items still short of the gate come first, fewest correct answers
    /// first; the top `2 * size` are shuffled and cut to `size`.
    pub fn pick_lexemes<I: Lexeme + Clone>(
        &self,
        items: &[I],
        size: usize,
        required: u32,
        rng: &mut dyn RandomSource,
    ) -> Vec<I> {
        if size == 0 {
            return Vec::new();
        }
        let mut ranked: Vec<(bool, u32, &I)> = items
            .iter()
            .map(|item| {
                let lex = self.progress.document().lexical(I::POS, item.key());
                let correct = lex.correct(LexDir::It2En) + lex.correct(LexDir::En2It);
                (lex.passes_gate(required), correct, item)
            })
            .collect();
        ranked.sort_by_key(|(gated, correct, _)| (*gated, *correct));

        let mut top: Vec<I> = ranked
            .into_iter()
            .take(size * 2)
            .map(|(_, _, item)| item.clone())
            .collect();
        shuffle(&mut top, rng);
        top.truncate(size);

        let pos = I::POS;
        debug!(pos = %pos, selected = top.len(), "picked lexical batch");
        top
    }
}
