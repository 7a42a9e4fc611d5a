//! Integration test: Session scenarios
//!
//! Exercises the physics update, spawner and jump controller together through
//! the public API, without the loop driver.

use flappy::core::constants::{BIRD_START_Y, BOARD_HEIGHT, PIPE_GAP, PIPE_HEIGHT, PIPE_WIDTH};
use flappy::core::geometry::{intersects, Rect};
use flappy::game::logic::{process_key, update_frame};
use flappy::game::spawner::{spawn_pipe_pair, spawn_pipes};
use flappy::game::types::{Pipe, PipeVariant};
use flappy::{GameOverReason, GamePhase, GameSession, JumpOutcome};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const EPS: f64 = 1e-9;

// =============================================================================
// Physics
// =============================================================================

#[test]
fn test_bird_at_rest_after_one_update() {
    let mut session = GameSession::new();
    update_frame(&mut session);
    assert!((session.velocity_y - 0.4).abs() < EPS);
    assert!((session.bird.y - 320.4).abs() < EPS);
}

#[test]
fn test_bird_never_above_board_top() {
    let mut session = GameSession::new();
    let mut now = 0;
    for _ in 0..300 {
        // Flap as often as the cooldown allows
        process_key(&mut session, "Space", now);
        update_frame(&mut session);
        assert!(session.bird.y >= 0.0);
        now += 16;
    }
    assert!(session.is_running());
    assert_eq!(session.bird.y, 0.0);
}

#[test]
fn test_falling_below_board_ends_run_near_pipe() {
    let mut session = GameSession::new();
    session.bird.y = 600.0;
    session
        .pipes
        .push_back(Pipe::new(PipeVariant::Top, 40.0, 0.0));

    // The bird sits below the pipe's bottom edge at 512
    assert!(!intersects(&session.bird.rect(), &session.pipes[0].rect()));
    assert!(session.bird.y + session.bird.height > BOARD_HEIGHT);

    let mut frames = 0;
    while session.is_running() {
        update_frame(&mut session);
        frames += 1;
        assert!(frames < 100);
    }

    assert!(session.bird.y > BOARD_HEIGHT);
    assert_eq!(session.phase, GamePhase::GameOver);
    assert_eq!(session.game_over_reason, Some(GameOverReason::FellOffBoard));
    assert_eq!(session.score(), 0.0);
}

#[test]
fn test_hitting_pipe_ends_run() {
    let mut session = GameSession::new();
    // Pipe overlapping the bird's column and height
    session
        .pipes
        .push_back(Pipe::new(PipeVariant::Bottom, 60.0, 300.0));

    let events = update_frame(&mut session).expect("running");
    assert!(events.collided);
    assert!(events.ended_run);
    assert_eq!(session.game_over_reason, Some(GameOverReason::HitPipe));

    // Further updates are no-ops
    let y = session.bird.y;
    assert!(update_frame(&mut session).is_none());
    assert_eq!(session.bird.y, y);
}

// =============================================================================
// Scoring and pipe lifecycle
// =============================================================================

#[test]
fn test_pair_passed_scores_one_point() {
    let mut session = GameSession::new();
    // Opening centered on the bird: top pipe ends at 296, bottom starts at 456
    spawn_pipe_pair(&mut session, 296.0 - PIPE_HEIGHT);
    // After one move the trailing edge sits at 42, just behind the bird at 45
    for pipe in session.pipes.iter_mut() {
        pipe.x = -20.0;
    }
    session.velocity_y = -0.4;

    let events = update_frame(&mut session).expect("running");
    assert_eq!(events.pipes_passed, 2);
    assert!(!events.collided);
    assert_eq!(session.score(), 1.0);

    // Passed pipes never score again
    session.velocity_y = -0.4;
    update_frame(&mut session);
    assert_eq!(session.score(), 1.0);
}

#[test]
fn test_score_moves_in_half_steps_and_never_decreases() {
    let mut session = GameSession::new();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut last = 0.0;
    let mut now = 0;

    for frame in 0..2_000u64 {
        if frame % 100 == 0 {
            spawn_pipes(&mut session, &mut rng);
        }
        // Hover in place
        if session.velocity_y > 0.0 {
            process_key(&mut session, "ArrowUp", now);
        }
        update_frame(&mut session);
        let score = session.score();
        assert!(score >= last);
        assert!(score - last <= 1.0);
        assert_eq!((score * 2.0).fract(), 0.0);
        last = score;
        now += 16;
        if session.is_game_over() {
            break;
        }
    }
}

#[test]
fn test_pipes_removed_in_order_once_off_screen() {
    let mut session = GameSession::new();
    session.bird.y = 0.0;
    session.bird.x = -1_000.0;
    session
        .pipes
        .push_back(Pipe::new(PipeVariant::Top, -PIPE_WIDTH + 1.0, 0.0));
    session
        .pipes
        .push_back(Pipe::new(PipeVariant::Bottom, -PIPE_WIDTH + 3.0, 0.0));
    session
        .pipes
        .push_back(Pipe::new(PipeVariant::Top, 100.0, 0.0));

    // First pipe moves to -PIPE_WIDTH - 1 and goes; the second is still on the board
    let events = update_frame(&mut session).expect("running");
    assert_eq!(events.pipes_removed, 1);
    assert_eq!(session.pipes.len(), 2);
    assert!((session.pipes[0].x + PIPE_WIDTH - 1.0).abs() < EPS);
    assert!(!session.pipes[0].is_off_screen());

    let events = update_frame(&mut session).expect("running");
    assert_eq!(events.pipes_removed, 1);
    assert_eq!(session.pipes.len(), 1);
    assert!((session.pipes[0].x - 96.0).abs() < EPS);
}

// =============================================================================
// Spawner
// =============================================================================

#[test]
fn test_zero_offset_pair() {
    let mut session = GameSession::new();
    spawn_pipe_pair(&mut session, 0.0);
    assert!((session.pipes[0].y - 0.0).abs() < EPS);
    assert!((session.pipes[1].y - 672.0).abs() < EPS);
}

#[test]
fn test_spawned_pairs_have_constant_opening() {
    let mut session = GameSession::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..50 {
        spawn_pipes(&mut session, &mut rng);
    }
    assert_eq!(session.pipes.len(), 100);

    for pair in session.pipes.make_contiguous().chunks(2) {
        let (top, bottom) = (&pair[0], &pair[1]);
        assert_eq!(top.variant, PipeVariant::Top);
        assert_eq!(bottom.variant, PipeVariant::Bottom);
        assert!((bottom.y - top.y - (PIPE_HEIGHT + PIPE_GAP)).abs() < EPS);
        assert!((PIPE_GAP - BOARD_HEIGHT / 4.0).abs() < EPS);
        assert!(!top.passed && !bottom.passed);
    }
}

// =============================================================================
// Jump and restart
// =============================================================================

#[test]
fn test_jump_then_rejected_within_cooldown() {
    let mut session = GameSession::new();
    assert_eq!(process_key(&mut session, "Space", 1_000), JumpOutcome::Jumped);
    assert!((session.velocity_y + 6.0).abs() < EPS);

    session.velocity_y = 2.0;
    assert_eq!(
        process_key(&mut session, "Space", 1_099),
        JumpOutcome::CoolingDown
    );
    assert!((session.velocity_y - 2.0).abs() < EPS);

    assert_eq!(process_key(&mut session, "Space", 1_100), JumpOutcome::Jumped);
}

#[test]
fn test_jump_in_game_over_restarts() {
    let mut session = GameSession::new();
    spawn_pipe_pair(&mut session, -200.0);
    session.award_half_point();
    session.bird.y = 700.0;
    session.end_run(GameOverReason::FellOffBoard);

    assert_eq!(process_key(&mut session, "KeyX", 5_000), JumpOutcome::Restarted);
    assert_eq!(session.score(), 0.0);
    assert!(session.pipes.is_empty());
    assert_eq!(session.bird.y, BIRD_START_Y);
    assert_eq!(session.phase, GamePhase::Running);
    assert_eq!(session.game_over_reason, None);
    assert!((session.velocity_y + 6.0).abs() < EPS);
}

#[test]
fn test_non_jump_key_in_game_over_does_nothing() {
    let mut session = GameSession::new();
    session.end_run(GameOverReason::HitPipe);
    assert_eq!(process_key(&mut session, "KeyQ", 0), JumpOutcome::Ignored);
    assert!(session.is_game_over());
}

#[test]
fn test_intersects_symmetric() {
    let rects = [
        Rect::new(0.0, 0.0, 10.0, 10.0),
        Rect::new(5.0, 5.0, 10.0, 10.0),
        Rect::new(10.0, 0.0, 10.0, 10.0),
        Rect::new(-5.0, -5.0, 3.0, 3.0),
    ];
    for a in &rects {
        for b in &rects {
            assert_eq!(intersects(a, b), intersects(b, a));
        }
    }
}
