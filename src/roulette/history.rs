//! Bounded window of recent outcomes

use std::collections::VecDeque;

use super::wheel::POCKETS;

/// The most recent `capacity` outcomes, oldest first
///
/// Purely informational: nothing in the wheel reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutcomeHistory {
    capacity: usize,
    outcomes: VecDeque<u8>,
    counts: [u32; POCKETS],
}

impl OutcomeHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            outcomes: VecDeque::with_capacity(capacity),
            counts: [0; POCKETS],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Record an outcome, evicting the oldest once the window is full
    pub fn push(&mut self, number: u8) {
        if self.capacity == 0 {
            return;
        }
        if self.outcomes.len() == self.capacity {
            if let Some(old) = self.outcomes.pop_front() {
                self.counts[old as usize] -= 1;
            }
        }
        self.outcomes.push_back(number);
        self.counts[number as usize] += 1;
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
        self.counts = [0; POCKETS];
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.outcomes.iter().copied()
    }

    pub fn count(&self, number: u8) -> u32 {
        self.counts.get(number as usize).copied().unwrap_or(0)
    }

    /// Normalised frequency of each pocket in the window (all zeros when empty)
    pub fn histogram(&self) -> [f64; POCKETS] {
        let mut histogram = [0.0; POCKETS];
        if self.outcomes.is_empty() {
            return histogram;
        }
        let total = self.outcomes.len() as f64;
        for (bin, &count) in histogram.iter_mut().zip(self.counts.iter()) {
            *bin = count as f64 / total;
        }
        histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_evicts_oldest() {
        let mut history = OutcomeHistory::new(3);
        for n in [1, 2, 3, 4] {
            history.push(n);
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(history.count(1), 0);
        assert_eq!(history.count(4), 1);
    }

    #[test]
    fn test_histogram_is_normalised() {
        let mut history = OutcomeHistory::new(10);
        for n in [0, 0, 5, 36] {
            history.push(n);
        }
        let histogram = history.histogram();
        assert_eq!(histogram[0], 0.5);
        assert_eq!(histogram[5], 0.25);
        assert!((histogram.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_and_zero_capacity() {
        let mut history = OutcomeHistory::new(0);
        history.push(3);
        assert!(history.is_empty());
        assert!(history.histogram().iter().all(|&p| p == 0.0));
    }
}
