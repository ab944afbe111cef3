//! Rolling record of rally lengths

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of recent rallies kept for the average
pub const RALLY_WINDOW: usize = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RallyClock {
    durations: VecDeque<u64>,
}

impl RallyClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished rally; zero-length rallies are ignored
    pub fn register(&mut self, ticks: u64) {
        if ticks == 0 {
            return;
        }
        if self.durations.len() == RALLY_WINDOW {
            self.durations.pop_front();
        }
        self.durations.push_back(ticks);
    }

    /// Mean rally length in ticks, 0 before any rally
    pub fn average(&self) -> f64 {
        if self.durations.is_empty() {
            0.0
        } else {
            self.durations.iter().sum::<u64>() as f64 / self.durations.len() as f64
        }
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_over_bounded_window() {
        let mut clock = RallyClock::new();
        assert_eq!(clock.average(), 0.0);
        clock.register(0);
        assert!(clock.is_empty());

        for _ in 0..RALLY_WINDOW {
            clock.register(100);
        }
        clock.register(200);
        assert_eq!(clock.len(), RALLY_WINDOW);
        assert_eq!(clock.average(), 101.0);
    }
}
