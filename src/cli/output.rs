//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Result,
    pipeline::{EndReason, MatchReport},
    ports::MatchObserver,
};

/// Create a progress bar counting `unit`s
pub fn create_progress(total: u64, unit: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} ({{msg}})"
            ))
            .map_err(|e| Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:24} {}", format!("{key}:"), value);
}

pub fn describe_reason(reason: EndReason) -> String {
    match reason {
        EndReason::TimeLimit => "time limit".to_string(),
        EndReason::Streak(side) => format!("{side} scoring streak"),
        EndReason::Points(side) => format!("{side} reached the point target"),
    }
}

/// Progress bar over a series of matches
pub struct MatchProgress {
    bar: ProgressBar,
    left_wins: usize,
    right_wins: usize,
    draws: usize,
}

impl MatchProgress {
    pub fn new(matches: usize) -> Result<Self> {
        Ok(Self {
            bar: create_progress(matches as u64, "matches")?,
            left_wins: 0,
            right_wins: 0,
            draws: 0,
        })
    }

    fn message(&self) -> String {
        format!("L:{} R:{} D:{}", self.left_wins, self.right_wins, self.draws)
    }
}

impl MatchObserver for MatchProgress {
    fn on_match_end(&mut self, report: &MatchReport) -> Result<()> {
        match report.outcome_for(crate::arena::Side::Left) {
            1 => self.left_wins += 1,
            -1 => self.right_wins += 1,
            _ => self.draws += 1,
        }
        self.bar.inc(1);
        self.bar.set_message(self.message());
        if self.bar.position() >= self.bar.length().unwrap_or(0) {
            self.bar.finish_with_message(self.message());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_progress_template_is_valid() {
        assert!(create_progress(10, "episodes").is_ok());
    }
}
