//! Match controller for the arena
//!
//! Owns the tick loop: policies move, the arena advances, points update the
//! [`MatchContext`], and both agents learn from every finished rally.

use std::{thread, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agents::{PaddleView, Policy},
    arena::{Arena, ArenaConfig, Side},
    ports::MatchObserver,
};

/// Why a match stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    TimeLimit,
    /// A side scored the configured number of points in a row
    Streak(Side),
    /// A side reached the configured point total
    Points(Side),
}

/// Mutable state of a running match
///
/// Threaded explicitly through the controller and handed to observers by
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContext {
    pub left_score: u32,
    pub right_score: u32,
    pub left_streak: u32,
    pub right_streak: u32,
    /// Ticks simulated so far
    pub tick: u64,
    /// Ticks since the last point
    pub rally_ticks: u64,
    pub points_played: u32,
    pub outcome: Option<EndReason>,
    tick_secs: f64,
}

impl MatchContext {
    pub fn new(tick_secs: f64) -> Self {
        Self {
            left_score: 0,
            right_score: 0,
            left_streak: 0,
            right_streak: 0,
            tick: 0,
            rally_ticks: 0,
            points_played: 0,
            outcome: None,
            tick_secs,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    pub fn streak(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_streak,
            Side::Right => self.right_streak,
        }
    }

    /// Simulated match clock
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 * self.tick_secs
    }

    /// +1 when `side` leads, -1 when it trails, 0 when level
    pub fn standing(&self, side: Side) -> i8 {
        match self.score(side).cmp(&self.score(side.opponent())) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
        self.rally_ticks += 1;
    }

    /// Credit a point; returns the length of the rally it closed
    pub(crate) fn record_point(&mut self, scorer: Side) -> u64 {
        match scorer {
            Side::Left => {
                self.left_score += 1;
                self.left_streak += 1;
                self.right_streak = 0;
            }
            Side::Right => {
                self.right_score += 1;
                self.right_streak += 1;
                self.left_streak = 0;
            }
        }
        self.points_played += 1;
        std::mem::take(&mut self.rally_ticks)
    }

    /// End condition for the current tick, checked as time limit, then
    /// streak, then point total.
    pub fn end_condition(&self, config: &ArenaConfig) -> Option<EndReason> {
        if self.tick >= config.tick_limit() {
            return Some(EndReason::TimeLimit);
        }
        if let Some(needed) = config.streak_to_win {
            if let Some(side) = Side::BOTH.into_iter().find(|&s| self.streak(s) >= needed) {
                return Some(EndReason::Streak(side));
            }
        }
        if let Some(needed) = config.points_to_win {
            if let Some(side) = Side::BOTH.into_iter().find(|&s| self.score(s) >= needed) {
                return Some(EndReason::Points(side));
            }
        }
        None
    }
}

/// Result of one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub left_score: u32,
    pub right_score: u32,
    pub reason: EndReason,
    /// `None` for a drawn match
    pub winner: Option<Side>,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub points_played: u32,
}

impl MatchReport {
    fn from_context(context: &MatchContext, reason: EndReason) -> Self {
        let winner = match reason {
            EndReason::Streak(side) | EndReason::Points(side) => Some(side),
            EndReason::TimeLimit => match context.standing(Side::Left) {
                1 => Some(Side::Left),
                -1 => Some(Side::Right),
                _ => None,
            },
        };
        Self {
            left_score: context.left_score,
            right_score: context.right_score,
            reason,
            winner,
            ticks: context.tick,
            elapsed_secs: context.elapsed_secs(),
            points_played: context.points_played,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left_score,
            Side::Right => self.right_score,
        }
    }

    /// +1 if `side` won, -1 if it lost, 0 for a draw
    pub fn outcome_for(&self, side: Side) -> i8 {
        match self.winner {
            Some(winner) if winner == side => 1,
            Some(_) => -1,
            None => 0,
        }
    }
}

/// Runs arena matches between two policies
pub struct MatchController {
    config: ArenaConfig,
    seed: Option<u64>,
    realtime: bool,
    matches_played: usize,
    observers: Vec<Box<dyn MatchObserver>>,
}

impl MatchController {
    pub fn new(config: ArenaConfig) -> Self {
        Self {
            config,
            seed: None,
            realtime: false,
            matches_played: 0,
            observers: Vec::new(),
        }
    }

    /// Seed for the arena's serve direction. Match `n` uses `seed + n`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sleep one tick interval per tick so a viewer can follow along
    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Add an observer
    pub fn with_observer(mut self, observer: Box<dyn MatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn matches_played(&self) -> usize {
        self.matches_played
    }

    /// Play one match in a freshly served arena.
    pub fn run(&mut self, left: &mut dyn Policy, right: &mut dyn Policy) -> Result<MatchReport> {
        let seed = self
            .seed
            .map(|seed| seed.wrapping_add(self.matches_played as u64));
        let arena = Arena::new(self.config.clone(), seed)?;
        self.play(arena, left, right)
    }

    /// Play one match in a prepared arena.
    ///
    /// The arena's configuration takes precedence over the controller's.
    pub fn play(
        &mut self,
        mut arena: Arena,
        left: &mut dyn Policy,
        right: &mut dyn Policy,
    ) -> Result<MatchReport> {
        let config = arena.config().clone();
        let match_index = self.matches_played;
        self.matches_played += 1;

        left.on_match_start();
        right.on_match_start();
        equip(&mut arena, Side::Left, &*left);
        equip(&mut arena, Side::Right, &*right);
        for observer in &mut self.observers {
            observer.on_match_start(match_index, left.kind(), right.kind())?;
        }

        let pause = Duration::from_secs_f64(config.tick_secs());
        let mut context = MatchContext::new(config.tick_secs());
        let reason = loop {
            drive(&mut arena, Side::Left, left, &context)?;
            drive(&mut arena, Side::Right, right, &context)?;

            let scored = arena.advance();
            context.advance_tick();

            for scorer in scored {
                let rally = context.record_point(scorer);
                tracing::debug!(
                    %scorer,
                    left = context.left_score,
                    right = context.right_score,
                    rally,
                    "point"
                );
                for observer in &mut self.observers {
                    observer.on_point(scorer, &context)?;
                }
                left.register_rally(rally);
                right.register_rally(rally);
                self.share_experience(left, right, |side| context.standing(side))?;
            }

            if let Some(reason) = context.end_condition(&config) {
                break reason;
            }
            arena.replenish();
            if self.realtime {
                thread::sleep(pause);
            }
        };
        context.outcome = Some(reason);

        if context.rally_ticks > 0 {
            left.register_rally(context.rally_ticks);
            right.register_rally(context.rally_ticks);
        }
        let report = MatchReport::from_context(&context, reason);
        self.share_experience(left, right, |side| report.outcome_for(side))?;

        tracing::info!(
            left = %left.kind(),
            right = %right.kind(),
            left_score = report.left_score,
            right_score = report.right_score,
            reason = ?report.reason,
            ticks = report.ticks,
            "match finished"
        );
        for observer in &mut self.observers {
            observer.on_match_end(&report)?;
        }
        Ok(report)
    }

    fn share_experience(
        &mut self,
        left: &mut dyn Policy,
        right: &mut dyn Policy,
        score_of: impl Fn(Side) -> i8,
    ) -> Result<()> {
        let left_experience = left.on_rally_end(score_of(Side::Left));
        let right_experience = right.on_rally_end(score_of(Side::Right));
        for observer in &mut self.observers {
            observer.on_experience(Side::Left, &left_experience)?;
            observer.on_experience(Side::Right, &right_experience)?;
        }
        Ok(())
    }
}

fn equip(arena: &mut Arena, side: Side, agent: &dyn Policy) {
    let height = agent
        .paddle_height()
        .unwrap_or(arena.config().paddle_height);
    arena.set_paddles(side, agent.paddle_count(), height);
}

fn drive(
    arena: &mut Arena,
    side: Side,
    agent: &mut dyn Policy,
    context: &MatchContext,
) -> Result<()> {
    if let Some(height) = agent.paddle_height() {
        let current = arena.rack(side).paddles().first().map(|p| p.height);
        if current != Some(height) {
            arena.set_paddle_height(side, height);
        }
    }
    let command = {
        let view = PaddleView::from_arena(arena, side, context.tick, context.elapsed_secs());
        agent.next_move(&view)
    };
    arena.move_paddles(side, agent.kind().id(), command.deltas())
}
