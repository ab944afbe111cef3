//! Session statistics over every drawn outcome

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use super::wheel::{self, POCKETS, Sector};

/// One resolved spin, as logged by the environment and exported to CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub step: u64,
    pub number: u8,
    /// Active bets joined with `+`, or `-` when none
    pub bets: String,
    pub reward: f64,
    pub balance: f64,
}

/// A number with its share of all draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberShare {
    pub number: u8,
    pub count: u64,
    pub percent: f64,
}

/// Frequency summary of a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    counts: Vec<u64>,
    total: u64,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            counts: vec![0; POCKETS],
            total: 0,
        }
    }
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_outcomes(outcomes: impl IntoIterator<Item = u8>) -> Self {
        let mut stats = Self::new();
        for number in outcomes {
            stats.record(number);
        }
        stats
    }

    pub fn record(&mut self, number: u8) {
        if let Some(count) = self.counts.get_mut(number as usize) {
            *count += 1;
            self.total += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn count(&self, number: u8) -> u64 {
        self.counts.get(number as usize).copied().unwrap_or(0)
    }

    fn percent(&self, count: u64) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total as f64
        }
    }

    /// The `n` most frequent numbers, ties broken by the lower number
    pub fn top_numbers(&self, n: usize) -> Vec<NumberShare> {
        let mut shares: Vec<NumberShare> = (0..POCKETS as u8)
            .map(|number| {
                let count = self.count(number);
                NumberShare {
                    number,
                    count,
                    percent: self.percent(count),
                }
            })
            .filter(|share| share.count > 0)
            .collect();
        shares.sort_by(|a, b| b.count.cmp(&a.count).then(a.number.cmp(&b.number)));
        shares.truncate(n);
        shares
    }

    pub fn sector_counts(&self) -> [(Sector, u64); 3] {
        Sector::ALL.map(|sector| {
            let count = sector.numbers().iter().map(|&n| self.count(n)).sum();
            (sector, count)
        })
    }

    /// Draws per dozen; zero is excluded
    pub fn dozen_counts(&self) -> [u64; 3] {
        self.grouped(wheel::dozen)
    }

    /// Draws per column; zero is excluded
    pub fn column_counts(&self) -> [u64; 3] {
        self.grouped(wheel::column)
    }

    fn grouped(&self, group: fn(u8) -> Option<usize>) -> [u64; 3] {
        let mut counts = [0; 3];
        for number in 1..POCKETS as u8 {
            if let Some(idx) = group(number) {
                counts[idx] += self.count(number);
            }
        }
        counts
    }

    pub fn hottest_sector(&self) -> Option<Sector> {
        self.sector_counts()
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .max_by_key(|&(_, count)| count)
            .map(|(sector, _)| sector)
    }

    /// Pearson chi-square statistic against a uniform wheel
    pub fn chi_square(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let expected = self.total as f64 / POCKETS as f64;
        self.counts
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Probability of a statistic at least this large under a uniform wheel
    pub fn uniformity_p_value(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let distribution = ChiSquared::new((POCKETS - 1) as f64).ok()?;
        Some(distribution.sf(self.chi_square()))
    }
}
