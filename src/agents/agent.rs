//! Tagged union over the agent variants

use serde::{Deserialize, Serialize};

use super::{
    AgentCore, AgentKind, Cautious, Chaotic, Escalating, Ladder, PaddleCommand, PaddleView,
    Policy, Predictor, Tracker,
};
use crate::Result;

/// Any heuristic agent
///
/// Serialises as a flat record tagged by `kind`, which is what the roster
/// snapshot stores per agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Agent {
    Tracker(Tracker),
    Predictor(Predictor),
    Chaotic(Chaotic),
    Cautious(Cautious),
    Escalating(Escalating),
    Ladder(Ladder),
}

macro_rules! dispatch {
    ($self:expr, $agent:ident => $body:expr) => {
        match $self {
            Agent::Tracker($agent) => $body,
            Agent::Predictor($agent) => $body,
            Agent::Chaotic($agent) => $body,
            Agent::Cautious($agent) => $body,
            Agent::Escalating($agent) => $body,
            Agent::Ladder($agent) => $body,
        }
    };
}

impl Agent {
    /// Build a fresh agent from an identifier or alias.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownAgent`] for an identifier outside the registry.
    pub fn from_id(id: &str, seed: u64) -> Result<Self> {
        Ok(id.parse::<AgentKind>()?.build(seed))
    }
}

impl Policy for Agent {
    fn kind(&self) -> AgentKind {
        dispatch!(self, a => a.kind())
    }

    fn core(&self) -> &AgentCore {
        dispatch!(self, a => a.core())
    }

    fn core_mut(&mut self) -> &mut AgentCore {
        dispatch!(self, a => a.core_mut())
    }

    fn skill_name(&self) -> &'static str {
        dispatch!(self, a => a.skill_name())
    }

    fn skill(&self) -> f64 {
        dispatch!(self, a => a.skill())
    }

    fn next_move(&mut self, view: &PaddleView<'_>) -> PaddleCommand {
        dispatch!(self, a => a.next_move(view))
    }

    fn adapt(&mut self, score: i8, average_rally: f64) -> (f64, f64) {
        dispatch!(self, a => a.adapt(score, average_rally))
    }

    fn paddle_count(&self) -> usize {
        dispatch!(self, a => a.paddle_count())
    }

    fn paddle_height(&self) -> Option<f64> {
        dispatch!(self, a => a.paddle_height())
    }

    fn on_match_start(&mut self) {
        dispatch!(self, a => a.on_match_start())
    }

    fn metrics(&self) -> Vec<(&'static str, f64)> {
        dispatch!(self, a => a.metrics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agents::Sentiment,
        arena::{Arena, ArenaConfig, Side},
    };

    #[test]
    fn test_from_id() {
        assert_eq!(Agent::from_id("iaa", 3).unwrap().kind(), AgentKind::Chaotic);
        assert!(Agent::from_id("nobody", 3).is_err());
    }

    #[test]
    fn test_serialises_as_tagged_record() {
        let agent = Agent::from_id("tracker", 0).unwrap();
        let json = serde_json::to_value(&agent).unwrap();
        assert_eq!(json["kind"], "tracker");
        assert_eq!(json["speed"], 5.0);
    }

    #[test]
    fn test_record_is_flat_with_sentiment() {
        let mut agent = Agent::from_id("tracker", 0).unwrap();
        agent.register_rally(120);
        agent.on_rally_end(1);

        let json = serde_json::to_value(&agent).unwrap();
        let record = json.as_object().unwrap();
        assert!(!record.contains_key("core"));
        assert!(!record.contains_key("mood"));
        assert_eq!(json["satisfaction"], agent.core().mood.satisfaction);
        assert_eq!(json["frustration"], agent.core().mood.frustration);
        assert_eq!(json["sentiment"], agent.sentiment().to_string());
        assert_eq!(json["experiences"], 1);
        assert_eq!(json["durations"], serde_json::json!([120]));

        let restored: Agent = serde_json::from_value(json).unwrap();
        assert_eq!(restored, agent);
        let bytes = rmp_serde::to_vec_named(&agent).unwrap();
        assert_eq!(rmp_serde::from_slice::<Agent>(&bytes).unwrap(), agent);
    }

    #[test]
    fn test_sentiment_is_recomputed_on_load() {
        let mut json = serde_json::to_value(Agent::from_id("ladder", 0).unwrap()).unwrap();
        json["satisfaction"] = serde_json::json!(9.0);
        json["sentiment"] = serde_json::json!("furious");
        let agent: Agent = serde_json::from_value(json).unwrap();
        assert_eq!(agent.sentiment(), Sentiment::Elated);
    }

    #[test]
    fn test_restored_agent_moves_identically() {
        let arena = Arena::new(ArenaConfig::default(), Some(4)).unwrap();
        for kind in AgentKind::ALL {
            let mut original = kind.build(42);
            original.register_rally(300);
            original.on_rally_end(-1);

            let json = serde_json::to_string(&original).unwrap();
            let mut restored: Agent = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, original);

            for tick in [0, 1, 59, 600, 1500] {
                let view = PaddleView::from_arena(&arena, Side::Left, tick, tick as f64 / 60.0);
                assert_eq!(
                    original.next_move(&view),
                    restored.next_move(&view),
                    "{kind} diverged at tick {tick}"
                );
            }
        }
    }
}
