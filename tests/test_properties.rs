use proptest::prelude::*;

use super_trooper::collision::*;
use super_trooper::compute::maybe_level_up;
use super_trooper::entities::*;

fn creature_strategy() -> impl Strategy<Value = Creature> {
    (0u8..4, -5.0f64..105.0, -5.0f64..35.0, 1u32..6).prop_map(|(kind, x, y, level)| {
        let pos = Position::new(x, y);
        match kind {
            0 => Creature::slow_enemy(pos, level),
            1 => Creature::fast_enemy(pos, level),
            2 => Creature::extra_life(pos),
            _ => Creature::weapon_boost(pos),
        }
    })
}

fn shot_strategy() -> impl Strategy<Value = Shot> {
    (-5.0f64..105.0, -5.0f64..35.0).prop_map(|(x, y)| Shot::new(Position::new(x, y)))
}

fn state_strategy() -> impl Strategy<Value = GameState> {
    (
        prop::collection::vec(creature_strategy(), 0..30),
        prop::collection::vec(shot_strategy(), 0..30),
        0.0f64..100.0,
    )
        .prop_map(|(creatures, shots, player_x)| {
            let mut state = GameState::default();
            state.player.pos.x = player_x;
            state.creatures = creatures;
            state.shots = shots;
            state
        })
}

proptest! {
    #[test]
    fn nothing_out_of_bounds_after_resolution(mut state in state_strategy()) {
        resolve_collisions(&mut state);
        let b = state.bounds;
        for s in &state.shots {
            prop_assert!(s.pos.y >= b.ceiling && s.pos.y <= b.height);
        }
        for c in &state.creatures {
            prop_assert!(c.pos.y <= b.height);
        }
    }

    #[test]
    fn resolution_is_idempotent(mut state in state_strategy()) {
        resolve_collisions(&mut state);
        let before = state.clone();
        let report = resolve_collisions(&mut state);
        prop_assert!(report.is_empty());
        prop_assert_eq!(state.player, before.player);
        prop_assert_eq!(state.creatures, before.creatures);
        prop_assert_eq!(state.shots, before.shots);
    }

    #[test]
    fn removals_account_for_every_change(mut state in state_strategy()) {
        let creatures_before = state.creatures.len();
        let shots_before = state.shots.len();
        let life_before = state.player.life;
        let score_before = state.player.score;

        let r = resolve_collisions(&mut state);

        // one shot per kill, one creature per contact or kill
        prop_assert_eq!(state.shots.len(), shots_before - r.shots_purged - r.kills);
        prop_assert_eq!(
            state.creatures.len(),
            creatures_before - r.creatures_purged - r.player_hits - r.lives_gained - r.boosts_caught - r.kills
        );
        prop_assert_eq!(
            state.player.life,
            life_before - r.player_hits as i32 + r.lives_gained as i32
        );
        prop_assert_eq!(state.player.score, score_before + r.score_gained);
    }

    #[test]
    fn level_ups_only_ever_raise_stats(
        creatures in prop::collection::vec(creature_strategy(), 0..20),
        promotions in 1usize..8,
    ) {
        let mut state = GameState::default();
        state.creatures = creatures;
        let mut threshold = state.player.next_level;

        for _ in 0..promotions {
            let before = state.creatures.clone();
            state.player.score = state.player.next_level;
            prop_assert!(maybe_level_up(&mut state));
            prop_assert!(state.player.next_level > threshold);
            threshold = state.player.next_level;

            for (old, new) in before.iter().zip(&state.creatures) {
                prop_assert!(new.speed >= old.speed);
                prop_assert!(new.value() >= old.value());
            }
        }
    }
}
