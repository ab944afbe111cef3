//! Bounded mood metrics and the sentiment label derived from them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of every mood and skill metric
pub const SCALE_MAX: f64 = 10.0;

/// Clamp to `[0, SCALE_MAX]` and round to two decimals
pub(crate) fn scale(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value.clamp(0.0, SCALE_MAX) * 100.0).round() / 100.0
}

/// How a rally felt, on three independent 0..=10 scales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    /// Perceived strength of the opponent
    pub difficulty: f64,
    pub satisfaction: f64,
    pub frustration: f64,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            difficulty: 5.0,
            satisfaction: 5.0,
            frustration: 0.0,
        }
    }
}

impl Mood {
    /// Fold one rally outcome into the mood.
    ///
    /// Difficulty and satisfaction are replaced; frustration accumulates,
    /// rising faster after losses to a strong opponent and easing on wins.
    pub fn record(&mut self, difficulty: f64, satisfaction: f64, score: i8) {
        self.difficulty = scale(difficulty);
        self.satisfaction = scale(satisfaction);
        let delta = match score.signum() {
            -1 => 1.0 + self.difficulty / SCALE_MAX,
            0 => 0.0,
            _ => -1.5,
        };
        self.frustration = scale(self.frustration + delta);
    }

    /// Inverse of frustration, so that higher is better for every metric
    pub fn composure(&self) -> f64 {
        SCALE_MAX - self.frustration
    }

    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_satisfaction(self.satisfaction)
    }
}

/// Reporting label for an agent's satisfaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Elated,
    Content,
    Neutral,
    Frustrated,
    Furious,
}

impl Sentiment {
    pub fn from_satisfaction(satisfaction: f64) -> Self {
        match satisfaction {
            s if s >= 8.0 => Sentiment::Elated,
            s if s >= 6.0 => Sentiment::Content,
            s if s >= 4.0 => Sentiment::Neutral,
            s if s >= 2.0 => Sentiment::Frustrated,
            _ => Sentiment::Furious,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Elated => "elated",
            Sentiment::Content => "content",
            Sentiment::Neutral => "neutral",
            Sentiment::Frustrated => "frustrated",
            Sentiment::Furious => "furious",
        };
        f.write_str(label)
    }
}
