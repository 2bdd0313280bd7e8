//! Per-tick bounds purge and collision resolution.
//!
//! The passes run in a fixed order: purge shots, purge creatures, player
//! against creatures, shots against enemies. Removal is mark-and-compact so
//! iteration order is stable for the whole tick and nothing is removed twice.

use crate::consts::WEAPON_BOOST_SCORE;
use crate::entities::{Bounds, Creature, CreatureKind, GameState, Player, Shot};

/// Player hit-box half extents (after rounding both positions to whole cells).
/// Wider than tall to match the three-column player sprite.
const PLAYER_HIT_DY: f64 = 0.75;
const PLAYER_HIT_DX: f64 = 1.8;

/// Shot hit-box half extent on both axes.
const SHOT_HIT_D: f64 = 1.0;

/// What a single resolution pass removed and changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub shots_purged: usize,
    pub creatures_purged: usize,
    /// Enemies that ran into the player.
    pub player_hits: usize,
    pub lives_gained: usize,
    pub boosts_caught: usize,
    /// Enemies destroyed by shots.
    pub kills: usize,
    pub score_gained: u64,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        *self == CollisionReport::default()
    }
}

/// Run every pass in order against the live state.
pub fn resolve_collisions(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    let (shots_purged, creatures_purged) =
        purge_out_of_bounds(&mut state.shots, &mut state.creatures, &state.bounds);
    report.shots_purged = shots_purged;
    report.creatures_purged = creatures_purged;

    resolve_player_collisions(&mut state.player, &mut state.creatures, &mut report);
    resolve_shot_collisions(
        &mut state.player,
        &mut state.shots,
        &mut state.creatures,
        &mut report,
    );

    if report.player_hits > 0 {
        log::debug!(
            "player hit {} time(s), life now {}",
            report.player_hits,
            state.player.life
        );
    }
    report
}

// ── Bounds purge ──────────────────────────────────────────────────────────────

/// Drop shots above the ceiling or below the bottom, and creatures below the
/// bottom. Creatures escaping past the player carry no penalty.
///
/// Returns `(shots_removed, creatures_removed)`.
pub fn purge_out_of_bounds(
    shots: &mut Vec<Shot>,
    creatures: &mut Vec<Creature>,
    bounds: &Bounds,
) -> (usize, usize) {
    let shots_before = shots.len();
    shots.retain(|s| s.pos.y >= bounds.ceiling && s.pos.y <= bounds.height);

    let creatures_before = creatures.len();
    creatures.retain(|c| c.pos.y <= bounds.height);

    (shots_before - shots.len(), creatures_before - creatures.len())
}

// ── Player ↔ creature ─────────────────────────────────────────────────────────

fn touches_player(player: &Player, creature: &Creature) -> bool {
    let dy = (creature.pos.y.round() - player.pos.y.round()).abs();
    let dx = (creature.pos.x.round() - player.pos.x.round()).abs();
    dy < PLAYER_HIT_DY && dx < PLAYER_HIT_DX
}

/// Every creature touching the player is consumed: enemies cost a life,
/// extra lives add one, weapon boosts add score.
pub fn resolve_player_collisions(
    player: &mut Player,
    creatures: &mut Vec<Creature>,
    report: &mut CollisionReport,
) {
    creatures.retain(|creature| {
        if !touches_player(player, creature) {
            return true;
        }
        match creature.kind {
            CreatureKind::Enemy(_) => {
                player.life -= 1;
                report.player_hits += 1;
            }
            CreatureKind::ExtraLife => {
                player.life += 1;
                report.lives_gained += 1;
            }
            CreatureKind::WeaponBoost => {
                player.score += WEAPON_BOOST_SCORE;
                report.boosts_caught += 1;
                report.score_gained += WEAPON_BOOST_SCORE;
            }
        }
        false
    });
}

// ── Shot ↔ enemy ──────────────────────────────────────────────────────────────

fn shot_hits(shot: &Shot, creature: &Creature) -> bool {
    creature.is_enemy()
        && (shot.pos.y - creature.pos.y).abs() < SHOT_HIT_D
        && (shot.pos.x - creature.pos.x).abs() < SHOT_HIT_D
}

/// Each shot destroys at most one enemy. Newest shots are resolved first and
/// each takes the newest live enemy it overlaps. Both are removed and the
/// enemy's value is scored.
pub fn resolve_shot_collisions(
    player: &mut Player,
    shots: &mut Vec<Shot>,
    creatures: &mut Vec<Creature>,
    report: &mut CollisionReport,
) {
    if shots.is_empty() || creatures.is_empty() {
        return;
    }

    let mut destroyed = vec![false; creatures.len()];
    let mut spent = vec![false; shots.len()];

    for (si, shot) in shots.iter().enumerate().rev() {
        let target = (0..creatures.len())
            .rev()
            .find(|&ci| !destroyed[ci] && shot_hits(shot, &creatures[ci]));

        if let Some(ci) = target {
            let value = creatures[ci].value().unwrap_or(0) as u64;
            player.score += value;
            report.kills += 1;
            report.score_gained += value;
            destroyed[ci] = true;
            spent[si] = true;
        }
    }

    if spent.contains(&true) {
        compact(shots, &spent);
        compact(creatures, &destroyed);
    }
}

/// Drop every item whose flag is set, keeping the rest in order.
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !removed[idx];
        idx += 1;
        keep
    });
}
