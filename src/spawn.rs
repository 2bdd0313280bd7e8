//! Probabilistic creature spawning.
//!
//! One roll per tick decides whether anything spawns; a cascade of further
//! independent rolls then picks the category. The cascade draws a fresh sample
//! for every branch, so a weapon boost is only considered after the extra-life
//! roll fails and ends up rarer than its threshold alone suggests.

use rand::Rng;

use crate::consts::*;
use crate::entities::{Category, Creature, Position};

/// Per-tick spawn probability: `level / 120`, reaching 1 at level 120.
pub fn spawn_probability(level: u32) -> f64 {
    (level as f64 / SPAWN_LEVEL_DIVISOR).min(1.0)
}

/// Pick the category of a new creature. Draws up to three samples.
pub fn classify(rng: &mut impl Rng) -> Category {
    if rng.gen::<f64>() > EXTRA_LIFE_THRESHOLD {
        Category::ExtraLife
    } else if rng.gen::<f64>() > WEAPON_BOOST_THRESHOLD {
        Category::WeaponBoost
    } else if rng.gen::<f64>() > FAST_ENEMY_THRESHOLD {
        Category::FastEnemy
    } else {
        Category::SlowEnemy
    }
}

/// Roll for a new creature on the ceiling row at a uniform x in `[0, width)`.
pub fn maybe_spawn(level: u32, width: f64, ceiling: f64, rng: &mut impl Rng) -> Option<Creature> {
    if rng.gen::<f64>() >= spawn_probability(level) {
        return None;
    }

    let category = classify(rng);
    let pos = Position::new(rng.gen::<f64>() * width, ceiling);

    let creature = match category {
        Category::ExtraLife => Creature::extra_life(pos),
        Category::WeaponBoost => Creature::weapon_boost(pos),
        Category::FastEnemy => Creature::fast_enemy(pos, level),
        _ => Creature::slow_enemy(pos, level),
    };
    log::trace!("spawned {:?} at x={:.1}", category, pos.x);
    Some(creature)
}
