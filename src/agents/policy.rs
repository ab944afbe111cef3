//! Policy capability shared by every heuristic agent

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    AgentKind, Mood, PaddleCommand, PaddleView, RallyClock, Sentiment,
    mood::{self, SCALE_MAX},
};

/// State every agent variant carries besides its own skill fields
///
/// Persisted flat: the mood metrics, the rally window and the sentiment label
/// sit next to the variant's own fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(into = "CoreRecord", from = "CoreRecord")]
pub struct AgentCore {
    pub mood: Mood,
    pub rallies: RallyClock,
    /// Rally outcomes folded in over the agent's lifetime
    pub experiences: u64,
}

/// Stored form of [`AgentCore`]
///
/// `sentiment` is written for readers of the snapshot and recomputed from
/// the mood on load.
#[derive(Serialize, Deserialize)]
struct CoreRecord {
    #[serde(flatten)]
    mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sentiment: Option<Sentiment>,
    #[serde(flatten)]
    rallies: RallyClock,
    #[serde(default)]
    experiences: u64,
}

impl From<AgentCore> for CoreRecord {
    fn from(core: AgentCore) -> Self {
        Self {
            sentiment: Some(core.mood.sentiment()),
            mood: core.mood,
            rallies: core.rallies,
            experiences: core.experiences,
        }
    }
}

impl From<CoreRecord> for AgentCore {
    fn from(record: CoreRecord) -> Self {
        Self {
            mood: record.mood,
            rallies: record.rallies,
            experiences: record.experiences,
        }
    }
}

/// Record produced each time an agent folds in a rally outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub kind: AgentKind,
    /// +1 ahead, 0 level, -1 behind
    pub score: i8,
    pub difficulty: f64,
    pub satisfaction: f64,
    pub frustration: f64,
    /// Variant-specific skill metric after the update
    pub skill: f64,
    pub iq_before: f64,
    pub iq_after: f64,
    pub sentiment: Sentiment,
}

/// Policy trait - the common call signature of the heuristic agents
///
/// Variants differ only in how they move and in how a rally outcome shifts
/// their skill metric. Everything derived from the metrics (IQ, sentiment,
/// experience records) is provided here.
///
/// # Call Sequence
///
/// 1. `on_match_start()` - once before the first tick of every match
/// 2. For each tick: `next_move(view)`
/// 3. For each finished rally: `register_rally(ticks)` then `on_rally_end(score)`
///
/// # Determinism
///
/// `next_move` depends only on the view and on serialisable state, so an
/// agent restored from a snapshot answers exactly like the one that was saved.
pub trait Policy {
    fn kind(&self) -> AgentKind;

    fn core(&self) -> &AgentCore;

    fn core_mut(&mut self) -> &mut AgentCore;

    /// Name of the variant-specific skill metric
    fn skill_name(&self) -> &'static str;

    /// Variant-specific skill metric on the 0..=10 scale
    fn skill(&self) -> f64;

    /// Choose paddle movement for this tick.
    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand;

    /// Variant learning rule.
    ///
    /// Called with the rally outcome and the rolling average rally length
    /// (in ticks); adjusts the variant's own fields and returns the perceived
    /// `(difficulty, satisfaction)` for this rally.
    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64);

    /// Number of paddles this agent controls.
    ///
    /// # Default Implementation
    ///
    /// One paddle.
    fn paddle_count(&self) -> usize {
        1
    }

    /// Paddle height this agent wants, if it differs from the arena default.
    ///
    /// Read every tick, so agents may grow their paddle mid-match.
    ///
    /// # Default Implementation
    ///
    /// Returns `None` (arena default).
    fn paddle_height(&self) -> Option<f64> {
        None
    }

    /// Reset match-scoped timers.
    ///
    /// Learned metrics persist across matches; only state tied to a single
    /// match (clocks, temporary boosts) is cleared.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_match_start(&mut self) {}

    /// Record the length of a finished rally.
    fn register_rally(&mut self, ticks: u64) {
        self.core_mut().rallies.register(ticks);
    }

    /// Fold a rally outcome into the agent's metrics.
    ///
    /// `score` is clamped to its sign: +1 when the agent is ahead, 0 when
    /// level, -1 when behind.
    fn on_rally_end(&mut self, score: i8) -> Experience {
        let score = score.signum();
        let iq_before = self.iq();
        let average = self.core().rallies.average();
        let (difficulty, satisfaction) = self.adapt(score, average);

        let core = self.core_mut();
        core.mood.record(difficulty, satisfaction, score);
        core.experiences += 1;
        let mood = core.mood;

        Experience {
            kind: self.kind(),
            score,
            difficulty: mood.difficulty,
            satisfaction: mood.satisfaction,
            frustration: mood.frustration,
            skill: self.skill(),
            iq_before,
            iq_after: self.iq(),
            sentiment: mood.sentiment(),
        }
    }

    /// Named sub-metrics the IQ is averaged over.
    fn metrics(&self) -> Vec<(&'static str, f64)> {
        let mood = self.core().mood;
        vec![
            (self.skill_name(), self.skill()),
            ("satisfaction", mood.satisfaction),
            ("composure", mood.composure()),
        ]
    }

    /// Mean of [`Policy::metrics`]
    fn iq(&self) -> f64 {
        let metrics = self.metrics();
        if metrics.is_empty() {
            return 0.0;
        }
        let total: f64 = metrics.iter().map(|(_, value)| value).sum();
        mood::scale(total / metrics.len() as f64)
    }

    fn sentiment(&self) -> Sentiment {
        self.core().mood.sentiment()
    }
}

/// Random source for one time window of a seeded agent.
///
/// Depends only on the seed and the window index, never on how many draws
/// were made before.
pub(crate) fn window_rng(seed: u64, window: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ window.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Average rally length mapped onto 0..=10 (100 ticks per point)
pub(crate) fn rally_length_score(average_rally: f64) -> f64 {
    (average_rally / 100.0).min(SCALE_MAX)
}
