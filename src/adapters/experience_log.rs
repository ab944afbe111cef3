//! Experience log - records every agent update during matches and renders a
//! per-agent report

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::{
    Result,
    agents::{AgentKind, Experience},
    arena::Side,
    error::Error,
    ports::MatchObserver,
};

/// One logged agent update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub match_index: usize,
    pub side: Side,
    #[serde(flatten)]
    pub experience: Experience,
}

/// Averages over every entry of one agent
///
/// Agents are told apart by side and kind, labelled e.g. `tracker (left)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub label: String,
    pub kind: AgentKind,
    pub side: Side,
    pub entries: usize,
    pub avg_difficulty: f64,
    pub avg_satisfaction: f64,
    pub avg_frustration: f64,
    /// IQ before the first logged update
    pub initial_iq: f64,
    /// IQ after the last logged update
    pub final_iq: f64,
}

/// Observer that keeps every [`Experience`] it is shown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceLog {
    entries: Vec<ExperienceEntry>,
    #[serde(skip)]
    current_match: usize,
}

impl ExperienceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ExperienceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, match_index: usize, side: Side, experience: Experience) {
        self.entries.push(ExperienceEntry {
            match_index,
            side,
            experience,
        });
    }

    /// Per-agent summaries in order of first appearance.
    pub fn summaries(&self) -> Vec<AgentSummary> {
        let mut groups: Vec<(Side, AgentKind, Vec<&Experience>)> = Vec::new();
        for entry in &self.entries {
            let kind = entry.experience.kind;
            match groups
                .iter_mut()
                .find(|(side, k, _)| *side == entry.side && *k == kind)
            {
                Some((_, _, group)) => group.push(&entry.experience),
                None => groups.push((entry.side, kind, vec![&entry.experience])),
            }
        }

        groups
            .into_iter()
            .filter_map(|(side, kind, group)| {
                let first = group.first()?;
                let last = group.last()?;
                Some(AgentSummary {
                    label: format!("{kind} ({side})"),
                    kind,
                    side,
                    entries: group.len(),
                    avg_difficulty: group.iter().map(|e| e.difficulty).mean(),
                    avg_satisfaction: group.iter().map(|e| e.satisfaction).mean(),
                    avg_frustration: group.iter().map(|e| e.frustration).mean(),
                    initial_iq: first.iq_before,
                    final_iq: last.iq_after,
                })
            })
            .collect()
    }

    /// Plain-text report of [`ExperienceLog::summaries`]
    pub fn render_report(&self) -> String {
        let rule = "=".repeat(50);
        let mut out = format!("{rule}\n{:^50}\n{rule}\n", "MATCH REPORT");
        for summary in self.summaries() {
            let lines = [
                format!("--- {} ---", summary.label.to_uppercase()),
                format!("  > Perceived difficulty: {:.2} / 10", summary.avg_difficulty),
                format!("  > Satisfaction:         {:.2} / 10", summary.avg_satisfaction),
                format!("  > Frustration:          {:.2} / 10", summary.avg_frustration),
                format!("  > Initial IQ:           {:.2}", summary.initial_iq),
                format!("  > Final IQ:             {:.2}", summary.final_iq),
            ];
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }

    /// Write every entry as a pretty JSON array.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create experience log {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.flush()?;
        tracing::info!(?path, entries = self.entries.len(), "saved experience log");
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open experience log {path:?}"),
            source,
        })?;
        let entries: Vec<ExperienceEntry> = serde_json::from_reader(BufReader::new(file))?;
        let current_match = entries.last().map_or(0, |e| e.match_index + 1);
        Ok(Self {
            entries,
            current_match,
        })
    }
}

impl MatchObserver for ExperienceLog {
    fn on_match_start(&mut self, match_index: usize, _: AgentKind, _: AgentKind) -> Result<()> {
        self.current_match = match_index;
        Ok(())
    }

    fn on_experience(&mut self, side: Side, experience: &Experience) -> Result<()> {
        self.push(self.current_match, side, experience.clone());
        Ok(())
    }
}
