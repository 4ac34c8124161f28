use super::*;
use crate::encounter::spawn_batch;
use crate::types::{EncounterSpec, EnemyKind};
use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

fn combat_with(count: u32, kind: EnemyKind) -> Combat {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    Combat::new(spawn_batch(EncounterSpec { count, kind }, &mut rng))
}

fn ids(combat: &Combat) -> Vec<EnemyId> {
    combat.enemies().keys().collect()
}

fn damage_events(events: &[CombatEvent]) -> usize {
    events.iter().filter(|event| matches!(event, CombatEvent::PlayerDamaged { .. })).count()
}

#[test]
fn proximity_grows_with_speed_and_elapsed_time() {
    let mut combat = combat_with(1, EnemyKind::Zombie);
    let id = ids(&combat)[0];
    combat.enemies_mut()[id].speed = 1.0;

    let events = combat.advance(1000.0);
    assert!(events.is_empty());
    let scale = combat.enemies()[id].scale;
    assert!((scale - (SPAWN_SCALE + 0.05)).abs() < 1e-5, "scale was {scale}");
}

#[test]
fn crossing_threshold_damages_once_and_pushes_back() {
    let mut combat = combat_with(1, EnemyKind::Zombie);
    let id = ids(&combat)[0];
    combat.enemies_mut()[id].scale = 1.49;
    combat.enemies_mut()[id].speed = 1.0;

    let events = combat.advance(400.0);
    assert_eq!(events, vec![CombatEvent::PlayerDamaged { by: id, amount: ATTACK_DAMAGE }]);
    assert_eq!(combat.enemies()[id].scale, PUSHBACK_SCALE);

    let events = combat.advance(16.0);
    assert_eq!(damage_events(&events), 0, "the same crossing must not be counted again");
    assert_eq!(combat.remaining(), 1, "push-back never removes an enemy");
}

#[test]
fn huge_frame_gap_still_counts_one_attack_per_enemy() {
    let mut combat = combat_with(3, EnemyKind::Zombie);
    let events = combat.advance(600_000.0);
    assert_eq!(damage_events(&events), 3);
    assert!(combat.enemies().values().all(|enemy| enemy.scale == PUSHBACK_SCALE));
}

#[test]
fn three_hits_remove_a_zombie_and_spare_the_others() {
    let mut combat = combat_with(3, EnemyKind::Zombie);
    let all = ids(&combat);
    let target = all[0];

    assert!(matches!(
        combat.resolve_shot(Some(target)),
        FireOutcome::Hit { remaining_hp: 2, .. }
    ));
    assert!(matches!(
        combat.resolve_shot(Some(target)),
        FireOutcome::Hit { remaining_hp: 1, .. }
    ));
    assert_eq!(combat.resolve_shot(Some(target)), FireOutcome::Killed { target });

    assert!(combat.enemies().get(target).is_none());
    for other in &all[1..] {
        assert_eq!(combat.enemies()[*other].hp, 3);
    }
}

#[test]
fn shooting_a_removed_enemy_changes_nothing() {
    let mut combat = combat_with(2, EnemyKind::Zombie);
    let all = ids(&combat);
    for _ in 0..3 {
        combat.resolve_shot(Some(all[0]));
    }
    let before: Vec<_> = combat.enemies().values().cloned().collect();

    assert_eq!(combat.resolve_shot(Some(all[0])), FireOutcome::Stale { target: all[0] });
    let after: Vec<_> = combat.enemies().values().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn knockback_never_goes_below_minimum_scale() {
    let mut combat = combat_with(1, EnemyKind::Boss);
    let id = ids(&combat)[0];
    combat.enemies_mut()[id].scale = 0.15;

    combat.resolve_shot(Some(id));
    assert_eq!(combat.enemies()[id].scale, MIN_SCALE);
    combat.resolve_shot(Some(id));
    assert_eq!(combat.enemies()[id].scale, MIN_SCALE);
}

#[test]
fn cleared_fires_once_after_settle_delay() {
    let mut combat = combat_with(1, EnemyKind::Zombie);
    let id = ids(&combat)[0];
    for _ in 0..3 {
        combat.resolve_shot(Some(id));
    }
    assert!(combat.settling());

    let mut cleared = 0;
    let mut waited = 0.0;
    while waited < 3000.0 {
        let events = combat.advance(16.0);
        waited += 16.0;
        if events.contains(&CombatEvent::Cleared) {
            cleared += 1;
            assert!(waited >= SETTLE_DELAY_MS, "cleared early at {waited}ms");
        }
    }
    assert_eq!(cleared, 1);
    assert!(combat.is_cleared());
}

#[test]
fn enemies_mid_attack_keep_the_encounter_open() {
    let mut combat = combat_with(2, EnemyKind::Zombie);
    for _ in 0..200 {
        let events = combat.advance(500.0);
        assert!(!events.contains(&CombatEvent::Cleared));
    }
    assert_eq!(combat.remaining(), 2);
}

#[test]
fn teardown_stops_all_processing() {
    let mut combat = combat_with(2, EnemyKind::Zombie);
    combat.teardown();

    assert!(!combat.is_active());
    assert!(combat.advance(100_000.0).is_empty());
    assert_eq!(combat.remaining(), 0);
}

proptest! {
    #[test]
    fn scale_is_monotonic_until_reset(
        speed in 0.5f32..=1.0,
        frames in proptest::collection::vec(1.0f32..200.0, 1..400),
    ) {
        let mut combat = combat_with(1, EnemyKind::Zombie);
        let id = ids(&combat)[0];
        combat.enemies_mut()[id].speed = speed;

        let mut previous = combat.enemies()[id].scale;
        for elapsed in frames {
            let events = combat.advance(elapsed);
            let current = combat.enemies()[id].scale;
            if damage_events(&events) == 1 {
                prop_assert_eq!(current, PUSHBACK_SCALE);
            } else {
                prop_assert!(current >= previous);
                prop_assert!(current < ATTACK_THRESHOLD);
            }
            previous = current;
        }
    }
}
