//! Arena matches played through the app container

mod common;

use std::sync::{Arc, Mutex};

use arcade::{
    AgentKind, Policy,
    adapters::ExperienceLog,
    arena::{Arena, ArenaConfig, Ball, Side},
    pipeline::{EndReason, MatchController, Tournament},
};
use common::test_app;

#[test]
fn test_every_point_produces_one_experience_per_agent() {
    let app = test_app(7);
    let log = Arc::new(Mutex::new(ExperienceLog::new()));
    let mut controller = app
        .match_controller()
        .with_observer(Box::new(Arc::clone(&log)));
    let roster = app.load_roster();
    let mut left = app.agent(&roster, "tracker").unwrap();
    let mut right = app.agent(&roster, "iaf").unwrap();
    assert_eq!(right.kind(), AgentKind::Ladder);

    let reports: Vec<_> = (0..2)
        .map(|_| controller.run(&mut left, &mut right).unwrap())
        .collect();

    let log = log.lock().unwrap();
    for (index, report) in reports.iter().enumerate() {
        let for_match = |side: Side| {
            log.entries()
                .iter()
                .filter(|e| e.match_index == index && e.side == side)
                .count()
        };
        let expected = report.points_played as usize + 1;
        assert_eq!(for_match(Side::Left), expected);
        assert_eq!(for_match(Side::Right), expected);
        assert_eq!(report.left_score + report.right_score, report.points_played);
    }

    let summaries = log.summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].label, "tracker (left)");
    assert_eq!(summaries[1].label, "ladder (right)");
    assert_eq!(summaries[0].final_iq, left.iq());
    assert!(log.render_report().contains("LADDER (RIGHT)"));
}

#[test]
fn test_time_limit_bounds_match_length() {
    let config = ArenaConfig::default()
        .with_time_limit(3.0)
        .with_streak_to_win(None);
    let mut controller = MatchController::new(config).with_seed(Some(5));
    let mut left = AgentKind::Cautious.build(1);
    let mut right = AgentKind::Chaotic.build(2);

    let report = controller.run(&mut left, &mut right).unwrap();
    assert_eq!(report.reason, EndReason::TimeLimit);
    assert_eq!(report.ticks, 180);
    assert_eq!(report.winner.is_none(), report.left_score == report.right_score);
}

#[test]
fn test_points_target_ends_match_for_the_scorer() {
    let config = ArenaConfig::default()
        .with_time_limit(600.0)
        .with_streak_to_win(None)
        .with_points_to_win(Some(2));
    let mut controller = MatchController::new(config).with_seed(Some(9));
    let mut left = AgentKind::Predictor.build(0);
    let mut right = AgentKind::Chaotic.build(3);

    let report = controller.run(&mut left, &mut right).unwrap();
    match report.reason {
        EndReason::Points(side) => {
            assert_eq!(report.winner, Some(side));
            assert_eq!(report.score(side), 2);
        }
        other => panic!("expected a points finish, got {other:?}"),
    }
}

#[test]
fn test_restored_agents_replay_identically() {
    let app = test_app(21);
    let mut left = AgentKind::Escalating.build(0);
    let mut right = AgentKind::Predictor.build(0);
    Tournament::new(app.match_controller(), 2)
        .run(&mut left, &mut right)
        .unwrap();

    let mut roster = app.load_roster();
    roster.insert(left.kind().id(), left.clone());
    roster.insert(right.kind().id(), right.clone());
    app.save_roster(&roster).unwrap();

    let restored = app.load_roster();
    let mut restored_left = app.agent(&restored, "iaj").unwrap();
    let mut restored_right = app.agent(&restored, "predictor").unwrap();
    assert_eq!(restored_left, left);
    assert_eq!(restored_right, right);

    let original = app
        .match_controller()
        .run(&mut left, &mut right)
        .unwrap();
    let replay = app
        .match_controller()
        .run(&mut restored_left, &mut restored_right)
        .unwrap();
    assert_eq!(original, replay);
    assert_eq!(restored_left, left);
}

#[test]
fn test_seeded_tournaments_agree() {
    let run = || {
        let app = test_app(33);
        let mut left = AgentKind::Tracker.build(0);
        let mut right = AgentKind::Cautious.build(4);
        Tournament::new(app.match_controller(), 3)
            .run(&mut left, &mut right)
            .unwrap()
    };
    let result = run();
    assert_eq!(result.matches, 3);
    assert_eq!(result, run());
}

fn ball(x: f64, y: f64, dx: f64, dy: f64) -> Ball {
    Ball {
        x,
        y,
        dx,
        dy,
        size: 15.0,
    }
}

#[test]
fn test_multi_ball_replaces_only_the_scoring_ball() {
    let config = ArenaConfig::default().with_balls(2);
    let mut arena = Arena::new(config, Some(1)).unwrap();
    assert_eq!(arena.balls().len(), 2);
    arena.clear_balls();
    // one ball about to leave past the left paddle, one crossing mid-court
    arena.insert_ball(ball(3.0, 500.0, -5.0, 0.0));
    arena.insert_ball(ball(400.0, 300.0, 5.0, 0.0));

    assert_eq!(arena.advance(), vec![Side::Right]);
    assert_eq!(arena.balls(), &[ball(405.0, 300.0, 5.0, 0.0)]);

    assert_eq!(arena.replenish(), 1);
    assert_eq!(arena.balls().len(), 2);
    assert_eq!(arena.balls()[0], ball(405.0, 300.0, 5.0, 0.0));
    let fresh = arena.balls()[1];
    assert_eq!(fresh.x, (800.0 - 15.0) / 2.0);
    assert_eq!(fresh.y, (600.0 - 15.0) / 2.0);

    assert!(arena.advance().is_empty());
    assert_eq!(arena.balls()[0].x, 410.0);
}

#[test]
fn test_simultaneous_points_are_credited_separately() {
    let config = ArenaConfig::default()
        .with_balls(2)
        .with_streak_to_win(None)
        .with_points_to_win(Some(2));
    let mut arena = Arena::new(config.clone(), Some(2)).unwrap();
    arena.clear_balls();
    arena.insert_ball(ball(3.0, 20.0, -5.0, 0.0));
    arena.insert_ball(ball(3.0, 500.0, -5.0, 0.0));

    let log = Arc::new(Mutex::new(ExperienceLog::new()));
    let mut controller = MatchController::new(config).with_observer(Box::new(Arc::clone(&log)));
    let mut left = AgentKind::Tracker.build(0);
    let mut right = AgentKind::Tracker.build(0);

    let report = controller.play(arena, &mut left, &mut right).unwrap();
    assert_eq!(report.ticks, 1);
    assert_eq!(report.reason, EndReason::Points(Side::Right));
    assert_eq!((report.left_score, report.right_score), (0, 2));
    assert_eq!(report.points_played, 2);

    // two point updates plus the final outcome, for each agent
    let log = log.lock().unwrap();
    assert_eq!(log.entries().iter().filter(|e| e.side == Side::Left).count(), 3);
    assert_eq!(log.entries().iter().filter(|e| e.side == Side::Right).count(), 3);
}

#[test]
fn test_multi_ball_match_keeps_score_consistent() {
    let config = ArenaConfig::default()
        .with_balls(3)
        .with_time_limit(60.0)
        .with_streak_to_win(None);
    let mut controller = MatchController::new(config).with_seed(Some(12));
    let mut left = AgentKind::Chaotic.build(1);
    let mut right = AgentKind::Ladder.build(0);

    let report = controller.run(&mut left, &mut right).unwrap();
    assert_eq!(report.reason, EndReason::TimeLimit);
    assert!(report.points_played > 0);
    assert_eq!(report.left_score + report.right_score, report.points_played);
}
