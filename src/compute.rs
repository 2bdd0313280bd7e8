//! Game-logic functions for one simulation tick.
//!
//! Every public function mutates the `GameState` it is handed; the only other
//! side effect is the injected RNG, so callers control determinism (tests pass
//! a seeded RNG).

use rand::Rng;

use crate::collision::{resolve_collisions, CollisionReport};
use crate::consts::LEVEL_SCORE_STEP;
use crate::entities::{Command, Creature, CreatureKind, GameState, Player, Position, Shot};
use crate::spawn::maybe_spawn;

// ── Input-driven state transitions ───────────────────────────────────────────

pub fn move_player_left(state: &mut GameState) {
    let p = &mut state.player;
    p.pos.x = (p.pos.x - p.step).max(0.0);
}

pub fn move_player_right(state: &mut GameState) {
    let max_x = state.bounds.width - 1.0;
    let p = &mut state.player;
    p.pos.x = (p.pos.x + p.step).min(max_x);
}

/// Fire a shot from the row above the player.
pub fn player_shoot(state: &mut GameState) {
    let p = &state.player.pos;
    state.shots.push(Shot::new(Position::new(p.x, p.y - 1.0)));
}

/// Apply one polled command. `Quit` is the loop's concern and is ignored here.
pub fn apply_command(state: &mut GameState, command: Option<Command>) {
    match command {
        Some(Command::MoveLeft) => move_player_left(state),
        Some(Command::MoveRight) => move_player_right(state),
        Some(Command::Fire) => player_shoot(state),
        Some(Command::Quit) | None => {}
    }
}

// ── Motion ────────────────────────────────────────────────────────────────────

/// Creatures descend, shots ascend, each by its own speed.
pub fn advance(creatures: &mut [Creature], shots: &mut [Shot]) {
    for creature in creatures.iter_mut() {
        creature.pos.y += creature.speed;
    }
    for shot in shots.iter_mut() {
        shot.pos.y -= shot.speed;
    }
}

// ── Progress ──────────────────────────────────────────────────────────────────

/// Clears `is_alive` once life drops below one. Returns the new flag.
pub fn check_alive(player: &mut Player) -> bool {
    if player.life < 1 && player.is_alive {
        player.is_alive = false;
        log::debug!("player died with score {}", player.score);
    }
    player.is_alive
}

/// Rescale an on-screen creature for the next level. Power-ups are unaffected.
fn level_up_creature(creature: &mut Creature) {
    if let CreatureKind::Enemy(stats) = &mut creature.kind {
        creature.speed *= stats.level_multiplier;
        stats.value = (stats.value as f64 * stats.level_multiplier).round() as u32;
    }
}

/// Promote the player once the score reaches the threshold. Enemies already
/// on screen get faster and worth more. Returns true on promotion.
pub fn maybe_level_up(state: &mut GameState) -> bool {
    let p = &mut state.player;
    if p.score < p.next_level {
        return false;
    }

    p.level += 1;
    p.next_level += LEVEL_SCORE_STEP * p.level as u64;
    state.level_up_timer = state.level_up_banner_frames;

    for creature in state.creatures.iter_mut() {
        level_up_creature(creature);
    }

    log::info!(
        "level up: now level {} (next at {})",
        state.player.level,
        state.player.next_level
    );
    true
}

// ── Per-tick pipeline ─────────────────────────────────────────────────────────

/// Advance the simulation by one tick:
/// input → spawn → advance → collisions → alive check → level-up.
pub fn step(state: &mut GameState, command: Option<Command>, rng: &mut impl Rng) -> CollisionReport {
    state.tick += 1;

    apply_command(state, command);

    let b = state.bounds;
    if let Some(creature) = maybe_spawn(state.player.level, b.width, b.ceiling, rng) {
        state.creatures.push(creature);
    }

    advance(&mut state.creatures, &mut state.shots);

    let report = resolve_collisions(state);

    check_alive(&mut state.player);
    maybe_level_up(state);

    report
}
