//! Observer port - hooks into the match controller
//!
//! Observers collect data while matches run without the controller knowing
//! about output formats.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Result,
    agents::{AgentKind, Experience},
    arena::Side,
    pipeline::{MatchContext, MatchReport},
};

/// Observer trait for monitoring arena matches
///
/// # Event Sequence
///
/// 1. `on_match_start(match_index, left, right)` - once per match
/// 2. For each point:
///    - `on_point(scorer, context)`
///    - `on_experience(side, experience)` - once per agent
/// 3. `on_experience(side, experience)` - once per agent for the final outcome
/// 4. `on_match_end(report)`
///
/// # Examples
///
/// ```no_run
/// use arcade::{arena::Side, pipeline::MatchContext, ports::MatchObserver};
///
/// struct PointCounter {
///     points: usize,
/// }
///
/// impl MatchObserver for PointCounter {
///     fn on_point(&mut self, _scorer: Side, _context: &MatchContext) -> arcade::Result<()> {
///         self.points += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait MatchObserver: Send {
    /// Called before the first tick of a match.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_match_start(
        &mut self,
        _match_index: usize,
        _left: AgentKind,
        _right: AgentKind,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after a ball leaves the arena, once the score is updated.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_point(&mut self, _scorer: Side, _context: &MatchContext) -> Result<()> {
        Ok(())
    }

    /// Called whenever an agent folds a rally outcome into its metrics.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_experience(&mut self, _side: Side, _experience: &Experience) -> Result<()> {
        Ok(())
    }

    /// Called once the match has ended and both agents have been updated.
    ///
    /// # Default Implementation
    ///
    /// Does nothing.
    fn on_match_end(&mut self, _report: &MatchReport) -> Result<()> {
        Ok(())
    }
}

/// Shared observers, so the caller can read results back after a run
impl<T: MatchObserver> MatchObserver for Arc<Mutex<T>> {
    fn on_match_start(&mut self, match_index: usize, left: AgentKind, right: AgentKind) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_match_start(match_index, left, right)
    }

    fn on_point(&mut self, scorer: Side, context: &MatchContext) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_point(scorer, context)
    }

    fn on_experience(&mut self, side: Side, experience: &Experience) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_experience(side, experience)
    }

    fn on_match_end(&mut self, report: &MatchReport) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_match_end(report)
    }
}
