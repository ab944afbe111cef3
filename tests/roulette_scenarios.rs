//! Roulette sessions driven through the episode contract

use arcade::{
    Environment, Error,
    export::{CsvExporter, read_spins},
    pipeline::EpisodeRunner,
    roulette::{
        Bet, BetSlip, RouletteConfig, RouletteEnv, ScriptedSpinner, SessionStats, Spinner,
        UniformSpinner,
    },
};
use tempfile::TempDir;

fn scripted(config: RouletteConfig, outcomes: &[u8]) -> RouletteEnv<ScriptedSpinner> {
    let mut env = RouletteEnv::new(config, ScriptedSpinner::new(outcomes.to_vec())).unwrap();
    env.reset(None);
    env
}

#[test]
fn test_even_bet_over_two_four_seven() {
    let mut env = scripted(RouletteConfig::default(), &[2, 4, 7]);
    let slip = BetSlip::of(&[Bet::Even]);

    let rewards: Vec<f64> = (0..3).map(|_| env.step(slip).unwrap().reward).collect();
    assert_eq!(rewards, vec![1.0, 1.0, -1.0]);
    assert_eq!(env.balance(), 101.0);
    assert_eq!(env.steps(), 3);
}

#[test]
fn test_zero_loses_outside_bets() {
    let mut env = scripted(RouletteConfig::default(), &[0]);
    let step = env.step(BetSlip::of(&[Bet::Red])).unwrap();
    assert_eq!(step.reward, -1.0);
    assert_eq!(step.info.drawn_number, Some(0));
}

#[test]
fn test_combined_bets_sum_independently() {
    let mut env = scripted(RouletteConfig::default(), &[7]);
    let step = env.step(BetSlip::of(&[Bet::Red, Bet::Direct])).unwrap();
    // red pays 1, the direct bet on 7 pays 35
    assert_eq!(step.reward, 36.0);
    assert_eq!(step.observation.balance, 136.0);
}

#[test]
fn test_bankruptcy_terminates_and_blocks_further_steps() {
    let config = RouletteConfig::default().with_initial_balance(1.0);
    let mut env = scripted(config, &[0]);

    let step = env.step(BetSlip::parse_list("red").unwrap()).unwrap();
    assert!(step.terminated);
    assert!(!step.truncated);
    assert_eq!(step.observation.balance, 0.0);
    assert!(matches!(
        env.step(BetSlip::empty()),
        Err(Error::EpisodeFinished)
    ));

    env.reset(None);
    assert_eq!(env.balance(), 1.0);
    assert!(!env.is_done());
}

#[test]
fn test_history_window_does_not_change_draws() {
    let draws = |window: usize| {
        let config = RouletteConfig::default()
            .with_history_window(window)
            .with_histogram(true)
            .with_max_steps(200);
        let mut env = RouletteEnv::uniform(config, Some(17)).unwrap();
        let mut numbers = Vec::new();
        env.reset(Some(17));
        for _ in 0..50 {
            let step = env.step(BetSlip::of(&[Bet::Black])).unwrap();
            numbers.push(step.info.drawn_number.unwrap());
        }
        numbers
    };

    assert_eq!(draws(5), draws(100));
}

#[test]
fn test_histogram_tracks_recent_window() {
    let config = RouletteConfig::default()
        .with_history_window(2)
        .with_histogram(true);
    let mut env = scripted(config, &[3, 3, 9]);
    for _ in 0..3 {
        env.step(BetSlip::empty()).unwrap();
    }
    assert_eq!(env.history().len(), 2);
    assert_eq!(env.history().count(3), 1);
    assert_eq!(env.history().count(9), 1);
}

#[test]
fn test_uniform_wheel_covers_every_pocket() {
    let mut spinner = UniformSpinner::new(Some(2024));
    let stats = SessionStats::from_outcomes((0..3_700).map(|_| spinner.spin()));
    assert_eq!(stats.total(), 3_700);
    assert!((0..37).all(|n| stats.count(n) > 0));
    assert!(stats.uniformity_p_value().unwrap() > 0.0);
}

#[test]
fn test_spin_log_exports_to_csv() {
    let config = RouletteConfig::default().with_spin_log(true).with_max_steps(3);
    let mut env = scripted(config, &[12, 0, 35]);
    let slip = BetSlip::of(&[Bet::Low, Bet::Odd]);
    let summary = EpisodeRunner::new().run(&mut env, None, |_, _| slip).unwrap();
    assert!(summary.truncated);
    assert_eq!(env.spins().len(), 3);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spins.csv");
    assert_eq!(CsvExporter::write_spins(&path, env.spins()).unwrap(), 3);
    let restored = read_spins(&path).unwrap();
    assert_eq!(restored, env.spins());
    assert_eq!(restored.last().map(|s| s.balance), Some(env.balance()));
}
