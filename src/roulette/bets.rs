//! Bet categories, payout table, and the fixed-length bet vector

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::wheel::{self, Sector};
use crate::{Error, Result};

/// Number of independent bet flags in a [`BetSlip`]
pub const BET_COUNT: usize = 16;

/// A named bet category
///
/// The discriminant is the flag index in the bet vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bet {
    Red = 0,
    Black = 1,
    Even = 2,
    Odd = 3,
    Low = 4,
    High = 5,
    FirstDozen = 6,
    SecondDozen = 7,
    ThirdDozen = 8,
    /// Single number chosen by the table configuration
    Direct = 9,
    FirstColumn = 10,
    SecondColumn = 11,
    ThirdColumn = 12,
    VoisinsDuZero = 13,
    TiersDuCylindre = 14,
    Orphelins = 15,
}

impl Bet {
    pub const ALL: [Bet; BET_COUNT] = [
        Bet::Red,
        Bet::Black,
        Bet::Even,
        Bet::Odd,
        Bet::Low,
        Bet::High,
        Bet::FirstDozen,
        Bet::SecondDozen,
        Bet::ThirdDozen,
        Bet::Direct,
        Bet::FirstColumn,
        Bet::SecondColumn,
        Bet::ThirdColumn,
        Bet::VoisinsDuZero,
        Bet::TiersDuCylindre,
        Bet::Orphelins,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Bet::Red => "red",
            Bet::Black => "black",
            Bet::Even => "even",
            Bet::Odd => "odd",
            Bet::Low => "low",
            Bet::High => "high",
            Bet::FirstDozen => "dozen1",
            Bet::SecondDozen => "dozen2",
            Bet::ThirdDozen => "dozen3",
            Bet::Direct => "direct",
            Bet::FirstColumn => "column1",
            Bet::SecondColumn => "column2",
            Bet::ThirdColumn => "column3",
            Bet::VoisinsDuZero => "voisins",
            Bet::TiersDuCylindre => "tiers",
            Bet::Orphelins => "orphelins",
        }
    }

    /// Net winnings per unit staked when the bet hits
    pub fn payout_multiplier(self) -> f64 {
        match self {
            Bet::Red | Bet::Black | Bet::Even | Bet::Odd | Bet::Low | Bet::High => 1.0,
            Bet::FirstDozen | Bet::SecondDozen | Bet::ThirdDozen => 2.0,
            Bet::FirstColumn | Bet::SecondColumn | Bet::ThirdColumn => 2.0,
            Bet::VoisinsDuZero | Bet::TiersDuCylindre | Bet::Orphelins => 2.0,
            Bet::Direct => 35.0,
        }
    }

    /// Whether `number` wins this bet. Zero only wins a direct bet on zero or
    /// the sector that physically contains it.
    pub fn covers(self, number: u8, direct_number: u8) -> bool {
        let non_zero = (1..=36).contains(&number);
        match self {
            Bet::Red => wheel::is_red(number),
            Bet::Black => wheel::is_black(number),
            Bet::Even => non_zero && number % 2 == 0,
            Bet::Odd => non_zero && number % 2 == 1,
            Bet::Low => (1..=18).contains(&number),
            Bet::High => (19..=36).contains(&number),
            Bet::FirstDozen => wheel::dozen(number) == Some(0),
            Bet::SecondDozen => wheel::dozen(number) == Some(1),
            Bet::ThirdDozen => wheel::dozen(number) == Some(2),
            Bet::Direct => number == direct_number,
            Bet::FirstColumn => wheel::column(number) == Some(0),
            Bet::SecondColumn => wheel::column(number) == Some(1),
            Bet::ThirdColumn => wheel::column(number) == Some(2),
            Bet::VoisinsDuZero => Sector::VoisinsDuZero.contains(number),
            Bet::TiersDuCylindre => Sector::TiersDuCylindre.contains(number),
            Bet::Orphelins => Sector::Orphelins.contains(number),
        }
    }

    /// Reward for one active bet: `multiplier × stake` on a hit, `-stake` otherwise
    pub fn resolve(self, number: u8, direct_number: u8, stake: f64) -> f64 {
        if self.covers(number, direct_number) {
            self.payout_multiplier() * stake
        } else {
            -stake
        }
    }

    fn names() -> String {
        Self::ALL.iter().map(|b| b.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|b| b.name() == needle)
            .ok_or_else(|| Error::UnknownBet {
                name: s.to_string(),
                expected: Self::names(),
            })
    }
}

/// Fixed-length vector of independent bet flags, one unit stake per active flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BetSlip([bool; BET_COUNT]);

impl BetSlip {
    /// A slip with no active bets
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw flags; the length must be exactly [`BET_COUNT`]
    pub fn from_flags(flags: &[bool]) -> Result<Self> {
        let array: [bool; BET_COUNT] =
            flags
                .try_into()
                .map_err(|_| Error::InvalidBetVector {
                    expected: BET_COUNT,
                    got: flags.len(),
                })?;
        Ok(Self(array))
    }

    /// Build from bet categories
    pub fn of(bets: &[Bet]) -> Self {
        let mut slip = Self::empty();
        for &bet in bets {
            slip.0[bet.index()] = true;
        }
        slip
    }

    /// Parse a comma-separated list of bet names, e.g. `"red,even"`
    pub fn parse_list(list: &str) -> Result<Self> {
        let bets = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Bet::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::of(&bets))
    }

    pub fn with(mut self, bet: Bet) -> Self {
        self.0[bet.index()] = true;
        self
    }

    pub fn is_active(&self, bet: Bet) -> bool {
        self.0[bet.index()]
    }

    pub fn active(&self) -> impl Iterator<Item = Bet> + '_ {
        Bet::ALL.into_iter().filter(|&b| self.is_active(b))
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    pub fn flags(&self) -> &[bool; BET_COUNT] {
        &self.0
    }

    /// Sum of the per-bet rewards for one outcome
    pub fn resolve(&self, number: u8, direct_number: u8, stake: f64) -> f64 {
        self.active()
            .map(|bet| bet.resolve(number, direct_number, stake))
            .sum()
    }
}

impl fmt::Display for BetSlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.active().map(Bet::name).collect();
        if names.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&names.join("+"))
        }
    }
}
