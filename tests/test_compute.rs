use super_trooper::compute::*;
use super_trooper::consts::*;
use super_trooper::entities::*;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    GameState::default() // player at (50, 30)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Every `gen::<f64>()` draw is close to 1.0, so the spawn roll never passes.
fn no_spawn_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let mut s = make_state();
    move_player_left(&mut s);
    assert_eq!(s.player.pos.x, 48.0); // step is 2
}

#[test]
fn move_left_clamps_at_boundary() {
    let mut s = make_state();
    s.player.pos.x = 1.0;
    move_player_left(&mut s);
    assert_eq!(s.player.pos.x, 0.0);
}

#[test]
fn move_right_normal() {
    let mut s = make_state();
    move_player_right(&mut s);
    assert_eq!(s.player.pos.x, 52.0);
}

#[test]
fn move_right_clamps_at_boundary() {
    let mut s = make_state();
    s.player.pos.x = WIDTH - 2.0;
    move_player_right(&mut s);
    assert_eq!(s.player.pos.x, WIDTH - 1.0);
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shoot_adds_shot_above_player() {
    let mut s = make_state();
    player_shoot(&mut s);
    assert_eq!(s.shots.len(), 1);
    assert_eq!(s.shots[0].pos, Position::new(50.0, 29.0));
    assert_eq!(s.shots[0].speed, SHOT_SPEED);
}

#[test]
fn apply_command_ignores_quit_and_none() {
    let mut s = make_state();
    apply_command(&mut s, None);
    apply_command(&mut s, Some(Command::Quit));
    assert_eq!(s.player.pos.x, 50.0);
    assert!(s.shots.is_empty());

    apply_command(&mut s, Some(Command::Fire));
    apply_command(&mut s, Some(Command::MoveRight));
    assert_eq!(s.shots.len(), 1);
    assert_eq!(s.player.pos.x, 52.0);
}

// ── advance ───────────────────────────────────────────────────────────────────

#[test]
fn advance_moves_creatures_down_and_shots_up() {
    let mut creatures = vec![Creature::fast_enemy(Position::new(10.0, 5.0), 1)];
    let mut shots = vec![Shot::new(Position::new(20.0, 10.0))];
    advance(&mut creatures, &mut shots);
    assert!((creatures[0].pos.y - 5.1).abs() < 1e-9);
    assert_eq!(shots[0].pos.y, 9.5);
    assert_eq!(creatures[0].pos.x, 10.0);
    assert_eq!(shots[0].pos.x, 20.0);
}

// ── alive check ───────────────────────────────────────────────────────────────

#[test]
fn alive_until_life_below_one() {
    let mut s = make_state();
    s.player.life = 1;
    assert!(check_alive(&mut s.player));
    s.player.life = 0;
    assert!(!check_alive(&mut s.player));
    assert!(!s.player.is_alive);
}

// ── level-up ──────────────────────────────────────────────────────────────────

#[test]
fn level_up_at_threshold() {
    let mut s = make_state();
    s.player.score = 100;
    s.player.next_level = 100;
    s.creatures.push(Creature::slow_enemy(Position::new(10.0, 5.0), 1));
    s.creatures.push(Creature::extra_life(Position::new(20.0, 5.0)));

    assert!(maybe_level_up(&mut s));
    assert_eq!(s.player.level, 2);
    assert!(s.player.next_level > 100);
    assert!(s.level_up_timer > 0);
    assert_eq!(s.creatures[0].value(), Some(11));
    assert!(s.creatures[0].speed > SLOW_ENEMY_SPEED);
    assert_eq!(s.creatures[1].speed, POWER_UP_SPEED);
}

#[test]
fn no_level_up_below_threshold() {
    let mut s = make_state();
    s.player.score = 99;
    assert!(!maybe_level_up(&mut s));
    assert_eq!(s.player.level, 1);
    assert_eq!(s.level_up_timer, 0);
}

#[test]
fn next_level_strictly_increases() {
    let mut s = make_state();
    let mut last = s.player.next_level;
    for _ in 0..10 {
        s.player.score = s.player.next_level;
        assert!(maybe_level_up(&mut s));
        assert!(s.player.next_level > last);
        last = s.player.next_level;
    }
    assert_eq!(s.player.level, 11);
}

// ── step pipeline ─────────────────────────────────────────────────────────────

#[test]
fn step_increments_tick() {
    let mut s = make_state();
    step(&mut s, None, &mut seeded_rng());
    step(&mut s, None, &mut seeded_rng());
    assert_eq!(s.tick, 2);
}

#[test]
fn step_applies_input_before_motion() {
    let mut s = make_state();
    step(&mut s, Some(Command::Fire), &mut no_spawn_rng());
    assert_eq!(s.shots.len(), 1);
    // spawned at 29, already advanced once
    assert_eq!(s.shots[0].pos.y, 29.0 - SHOT_SPEED);
}

#[test]
fn step_shot_destroys_enemy_and_scores() {
    let mut s = make_state();
    s.creatures.push(Creature::slow_enemy(Position::new(20.0, 10.0), 1));
    s.shots.push(Shot::new(Position::new(20.0, 10.6)));
    let report = step(&mut s, None, &mut no_spawn_rng());
    assert_eq!(report.kills, 1);
    assert!(s.creatures.is_empty());
    assert!(s.shots.is_empty());
    assert_eq!(s.player.score, 10);
}

#[test]
fn step_enemy_contact_kills_last_life() {
    let mut s = make_state();
    s.player.life = 1;
    s.creatures.push(Creature::slow_enemy(Position::new(50.0, 29.9), 1));
    step(&mut s, None, &mut no_spawn_rng());
    assert_eq!(s.player.life, 0);
    assert!(!s.player.is_alive);
}

#[test]
fn step_kill_can_trigger_level_up() {
    let mut s = make_state();
    s.player.score = 95;
    s.creatures.push(Creature::slow_enemy(Position::new(20.0, 10.0), 1));
    s.creatures.push(Creature::fast_enemy(Position::new(70.0, 5.0), 1));
    s.shots.push(Shot::new(Position::new(20.0, 10.6)));
    step(&mut s, None, &mut no_spawn_rng());
    assert_eq!(s.player.score, 105);
    assert_eq!(s.player.level, 2);
    // the surviving enemy was rescaled in place
    assert_eq!(s.creatures[0].value(), Some(24));
}

#[test]
fn step_can_spawn_from_ceiling() {
    // All draws are 0.0: the spawn roll passes and the cascade picks a slow enemy.
    let mut s = make_state();
    step(&mut s, None, &mut StepRng::new(0, 0));
    assert_eq!(s.creatures.len(), 1);
    assert_eq!(s.creatures[0].category(), Category::SlowEnemy);
    assert_eq!(s.creatures[0].pos.x, 0.0);
    assert!((s.creatures[0].pos.y - (CEILING + SLOW_ENEMY_SPEED)).abs() < 1e-9);
}
