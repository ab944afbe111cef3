//! Single-zero wheel layout and outcome draws

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// Number of pockets on a single-zero wheel (0..=36)
pub const POCKETS: usize = 37;

/// Red pockets; every other non-zero pocket is black
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

pub const VOISINS_DU_ZERO: [u8; 17] = [
    0, 2, 3, 4, 7, 12, 15, 18, 19, 21, 22, 25, 26, 28, 29, 32, 35,
];

pub const TIERS_DU_CYLINDRE: [u8; 12] = [5, 8, 10, 11, 13, 16, 23, 24, 27, 30, 33, 36];

pub const ORPHELINS: [u8; 8] = [1, 6, 9, 14, 17, 20, 31, 34];

/// The three named sectors of the wheel; together they cover every pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    VoisinsDuZero,
    TiersDuCylindre,
    Orphelins,
}

impl Sector {
    pub const ALL: [Sector; 3] = [
        Sector::VoisinsDuZero,
        Sector::TiersDuCylindre,
        Sector::Orphelins,
    ];

    pub fn numbers(self) -> &'static [u8] {
        match self {
            Sector::VoisinsDuZero => &VOISINS_DU_ZERO,
            Sector::TiersDuCylindre => &TIERS_DU_CYLINDRE,
            Sector::Orphelins => &ORPHELINS,
        }
    }

    pub fn contains(self, number: u8) -> bool {
        self.numbers().contains(&number)
    }

    /// Sector a pocket belongs to
    pub fn of(number: u8) -> Option<Sector> {
        Self::ALL.into_iter().find(|s| s.contains(number))
    }

    pub fn label(self) -> &'static str {
        match self {
            Sector::VoisinsDuZero => "voisins du zero",
            Sector::TiersDuCylindre => "tiers du cylindre",
            Sector::Orphelins => "orphelins",
        }
    }
}

pub fn is_red(number: u8) -> bool {
    RED_NUMBERS.contains(&number)
}

pub fn is_black(number: u8) -> bool {
    number != 0 && number <= 36 && !is_red(number)
}

/// Dozen index (0, 1, 2) for 1..=36; zero has none
pub fn dozen(number: u8) -> Option<usize> {
    (1..=36)
        .contains(&number)
        .then(|| (number as usize - 1) / 12)
}

/// Column index (0, 1, 2) for 1..=36; zero has none
pub fn column(number: u8) -> Option<usize> {
    (1..=36)
        .contains(&number)
        .then(|| (number as usize - 1) % 3)
}

/// Source of roulette outcomes
pub trait Spinner {
    /// Draw the next outcome in 0..=36
    fn spin(&mut self) -> u8;

    /// Restart the outcome stream from a seed
    fn reseed(&mut self, seed: u64);
}

/// Independent uniform draws over the 37 pockets
///
/// Draws never consult any history; past outcomes carry no information about
/// the next one.
#[derive(Debug, Clone)]
pub struct UniformSpinner {
    rng: StdRng,
}

impl UniformSpinner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self { rng }
    }
}

impl Default for UniformSpinner {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Spinner for UniformSpinner {
    fn spin(&mut self) -> u8 {
        self.rng.random_range(0..POCKETS as u8)
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Replays a recorded sequence of outcomes, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSpinner {
    outcomes: Vec<u8>,
    cursor: usize,
}

impl ScriptedSpinner {
    /// Outcomes above 36 are folded back onto the wheel.
    pub fn new(outcomes: impl Into<Vec<u8>>) -> Self {
        let outcomes: Vec<u8> = outcomes
            .into()
            .into_iter()
            .map(|n| n % POCKETS as u8)
            .collect();
        Self {
            outcomes: if outcomes.is_empty() { vec![0] } else { outcomes },
            cursor: 0,
        }
    }
}

impl Spinner for ScriptedSpinner {
    fn spin(&mut self) -> u8 {
        let number = self.outcomes[self.cursor % self.outcomes.len()];
        self.cursor += 1;
        number
    }

    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_partition_non_zero_pockets() {
        let reds = (1..=36).filter(|&n| is_red(n)).count();
        let blacks = (1..=36).filter(|&n| is_black(n)).count();
        assert_eq!(reds, 18);
        assert_eq!(blacks, 18);
        assert!(!is_red(0) && !is_black(0));
    }

    #[test]
    fn test_sectors_cover_wheel_once() {
        for n in 0..POCKETS as u8 {
            let owners = Sector::ALL.iter().filter(|s| s.contains(n)).count();
            assert_eq!(owners, 1, "pocket {n} should belong to exactly one sector");
        }
    }

    #[test]
    fn test_dozens_and_columns() {
        assert_eq!(dozen(0), None);
        assert_eq!(dozen(12), Some(0));
        assert_eq!(dozen(13), Some(1));
        assert_eq!(dozen(36), Some(2));
        assert_eq!(column(1), Some(0));
        assert_eq!(column(2), Some(1));
        assert_eq!(column(36), Some(2));
        assert_eq!(column(0), None);
    }

    #[test]
    fn test_uniform_spinner_stays_on_wheel_and_is_reproducible() {
        let mut a = UniformSpinner::new(Some(9));
        let mut b = UniformSpinner::new(Some(9));
        for _ in 0..500 {
            let x = a.spin();
            assert!(x < 37);
            assert_eq!(x, b.spin());
        }
    }

    #[test]
    fn test_scripted_spinner_cycles() {
        let mut spinner = ScriptedSpinner::new(vec![2, 4, 7]);
        let drawn: Vec<u8> = (0..5).map(|_| spinner.spin()).collect();
        assert_eq!(drawn, vec![2, 4, 7, 2, 4]);
        spinner.reseed(0);
        assert_eq!(spinner.spin(), 2);
    }
}
