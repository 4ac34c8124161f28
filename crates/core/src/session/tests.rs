use super::*;
use crate::content::{EncounterPayload, FALLBACK_NARRATIVE, StateUpdate, parse_turn_response};
use crate::encounter::Enemy;
use crate::state::{MAX_HEALTH, STARTING_AMMO};

fn quiet_turn(narrative: &str) -> TurnResponse {
    TurnResponse {
        narrative: narrative.to_string(),
        visual_prompt: "Dim corridor".to_string(),
        encounter: None,
        state_update: StateUpdate::default(),
    }
}

fn ambush(count: i32, kind: EnemyKind) -> TurnResponse {
    TurnResponse {
        encounter: Some(EncounterPayload { has_enemies: true, enemy_count: count, enemy_type: kind }),
        ..quiet_turn("They are here.")
    }
}

/// A session past its boot scene, ready for actions.
fn ready_session() -> Session {
    let mut session = Session::new(42);
    let boot = session.boot();
    assert_eq!(session.resolve_scene(boot.ticket, false), SceneDecision::Keep);
    assert_eq!(session.phase(), Phase::Exploring);
    session
}

fn play(session: &mut Session, response: TurnResponse) -> TurnOutcome {
    let request = session.submit_action(PlayerAction::MoveForward).expect("accepted");
    session.apply_turn(request.ticket, response)
}

fn enter_combat(count: i32) -> Session {
    let mut session = ready_session();
    let outcome = play(&mut session, ambush(count, EnemyKind::Zombie));
    assert!(matches!(outcome, TurnOutcome::Applied { entered_combat: true, .. }));
    session
}

fn enemy_ids(session: &Session) -> Vec<EnemyId> {
    session.enemies().expect("in combat").keys().collect()
}

#[test]
fn boot_loads_then_explores() {
    let mut session = Session::new(1);
    assert_eq!(session.phase(), Phase::Exploring);

    let boot = session.boot();
    assert_eq!(boot.description, STARTING_SCENE);
    assert_eq!(session.phase(), Phase::Loading);
    assert!(session.is_booting());
    assert_eq!(session.submit_action(PlayerAction::Search), Err(SessionError::TurnInFlight));

    assert_eq!(session.resolve_scene(boot.ticket, true), SceneDecision::Show);
    assert_eq!(session.phase(), Phase::Exploring);
    assert!(session.has_shown_scene());
}

#[test]
fn turn_deltas_apply_together() {
    let mut session = ready_session();
    let response = TurnResponse {
        state_update: StateUpdate {
            health_change: Some(-15),
            ammo_change: Some(-3),
            location: Some("Cellar".to_string()),
            item_found: None,
        },
        ..quiet_turn("Something bit you.")
    };

    let request = session.submit_action(PlayerAction::MoveForward).expect("accepted");
    assert_eq!(request.action, "Move forward");
    assert_eq!(request.context.health, MAX_HEALTH);
    assert_eq!(request.context.ammo, STARTING_AMMO);
    assert_eq!(session.phase(), Phase::Loading);

    let outcome = session.apply_turn(request.ticket, response);
    assert!(matches!(outcome, TurnOutcome::Applied { entered_combat: false, scene: Some(_) }));

    let player = session.player();
    assert_eq!(player.health(), 85);
    assert_eq!(player.status(), HealthStatus::Fine);
    assert_eq!(player.ammo, 12);
    assert_eq!(player.location, "Cellar");
    assert_eq!(player.last_log, "Something bit you.");
    assert_eq!(player.visual_description, "Dim corridor");
    assert_eq!(session.phase(), Phase::Exploring);
}

#[test]
fn blank_location_and_visual_prompt_keep_previous_values() {
    let mut session = ready_session();
    let response = TurnResponse {
        visual_prompt: "   ".to_string(),
        state_update: StateUpdate { location: Some(String::new()), ..StateUpdate::default() },
        ..quiet_turn("Quiet.")
    };
    let outcome = play(&mut session, response);

    assert_eq!(outcome, TurnOutcome::Applied { entered_combat: false, scene: None });
    assert_eq!(session.player().location, "Main Hall");
    assert_eq!(session.player().visual_description, STARTING_SCENE);
}

#[test]
fn malformed_payload_falls_back_to_an_uneventful_turn() {
    let mut session = ready_session();
    let request = session.submit_action(PlayerAction::Search).expect("accepted");

    let response = parse_turn_response("{ not json").unwrap_or_else(|_| TurnResponse::fallback());
    session.apply_turn(request.ticket, response);

    assert_eq!(session.phase(), Phase::Exploring);
    assert_eq!(session.player().last_log, FALLBACK_NARRATIVE);
    assert_eq!(session.player().health(), MAX_HEALTH);
    assert!(session.combat().is_none());
}

#[test]
fn unusable_found_item_still_starts_the_ambush() {
    let mut session = ready_session();
    let request = session.submit_action(PlayerAction::Search).expect("accepted");
    let response = parse_turn_response(
        r#"{"narrative":"Something lunges.","visualPrompt":"Pantry",
        "encounter":{"hasEnemies":true,"enemyCount":2,"enemyType":"zombie"},
        "stateUpdate":{"healthChange":-10,"ammoChange":2,"location":"Pantry","itemFound":{}}}"#,
    )
    .unwrap_or_else(|_| TurnResponse::fallback());

    let outcome = session.apply_turn(request.ticket, response);
    assert!(matches!(outcome, TurnOutcome::Applied { entered_combat: true, .. }));
    assert_eq!(session.phase(), Phase::InCombat);
    assert_eq!(session.enemies().map(EnemySet::len), Some(2));

    let player = session.player();
    assert_eq!(player.health(), 90);
    assert_eq!(player.ammo, STARTING_AMMO + 2);
    assert_eq!(player.location, "Pantry");
    assert!(player.inventory.is_empty());
}

#[test]
fn encounter_enters_combat_and_locks_exploration() {
    let mut session = enter_combat(3);
    assert_eq!(session.phase(), Phase::InCombat);
    assert_eq!(session.enemies().map(EnemySet::len), Some(3));
    assert_eq!(
        session.submit_action(PlayerAction::TurnLeft),
        Err(SessionError::CombatInProgress)
    );
    assert!(!session.accepts_actions());
}

#[test]
fn zero_enemy_encounter_stays_exploring() {
    let mut session = ready_session();
    let outcome = play(&mut session, ambush(0, EnemyKind::Zombie));
    assert!(matches!(outcome, TurnOutcome::Applied { entered_combat: false, .. }));
    assert_eq!(session.phase(), Phase::Exploring);
}

#[test]
fn fatal_turn_ends_the_run_even_with_enemies() {
    let mut session = ready_session();
    let response = TurnResponse {
        state_update: StateUpdate { health_change: Some(-140), ..StateUpdate::default() },
        ..ambush(2, EnemyKind::Zombie)
    };
    play(&mut session, response);

    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.player().health(), -40);
    assert!(session.combat().is_none());
    assert_eq!(session.submit_action(PlayerAction::Search), Err(SessionError::GameOver));
    assert_eq!(session.fire(None), Err(SessionError::GameOver));
}

#[test]
fn three_shots_remove_one_zombie() {
    let mut session = enter_combat(3);
    let ids = enemy_ids(&session);

    for _ in 0..2 {
        assert!(matches!(session.fire(Some(ids[0])), Ok(FireOutcome::Hit { .. })));
    }
    assert_eq!(session.fire(Some(ids[0])), Ok(FireOutcome::Killed { target: ids[0] }));

    let enemies = session.enemies().expect("still fighting");
    assert!(enemies.get(ids[0]).is_none());
    assert!(ids[1..].iter().all(|id| enemies[*id].hp == 3));
    assert_eq!(session.player().ammo, STARTING_AMMO - 3);
}

#[test]
fn dry_fire_touches_nothing() {
    let mut session = enter_combat(2);
    session.player.ammo = 0;
    let before: Vec<Enemy> = session.enemies().expect("combat").values().cloned().collect();
    let target = enemy_ids(&session)[0];

    assert_eq!(session.fire(Some(target)), Ok(FireOutcome::DryFire));
    assert_eq!(session.player().ammo, 0);
    assert!(session.player().effects.is_active(Effect::DryFire));
    let after: Vec<Enemy> = session.enemies().expect("combat").values().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn miss_still_spends_a_round_and_flashes() {
    let mut session = enter_combat(1);
    assert_eq!(session.fire_at((0.0, 0.0), (1000.0, 800.0)), Ok(FireOutcome::Miss));
    assert_eq!(session.player().ammo, STARTING_AMMO - 1);
    assert!(session.player().effects.is_active(Effect::MuzzleFlash));

    session.frame(150.0);
    assert!(!session.player().effects.any_active());
}

#[test]
fn firing_outside_combat_is_rejected() {
    let mut session = ready_session();
    assert_eq!(session.fire(None), Err(SessionError::NotInCombat));
    assert_eq!(session.player().ammo, STARTING_AMMO);
}

#[test]
fn clearing_the_area_returns_to_exploring_once() {
    let mut session = enter_combat(1);
    let target = enemy_ids(&session)[0];
    for _ in 0..3 {
        session.fire(Some(target)).expect("in combat");
    }
    assert_eq!(session.phase(), Phase::InCombat, "settle delay still running");

    let mut cleared = 0;
    for _ in 0..100 {
        if session.frame(16.0).encounter_cleared {
            cleared += 1;
        }
    }
    assert_eq!(cleared, 1);
    assert_eq!(session.phase(), Phase::Exploring);
    assert_eq!(session.player().last_log, AREA_CLEAR_LOG);
    assert!(session.combat().is_none());
    assert_eq!(session.encounters_cleared(), 1);
    assert!(session.submit_action(PlayerAction::MoveForward).is_ok());
}

#[test]
fn repeated_attacks_kill_the_player() {
    let mut session = enter_combat(8);
    let mut died = false;
    for _ in 0..10_000 {
        let report = session.frame(50.0);
        if report.died {
            died = true;
            break;
        }
    }
    assert!(died);
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.player().health() <= 0);
    assert!(session.combat().is_none());
    assert_eq!(session.frame(1000.0), FrameReport::default());
}

#[test]
fn stale_turn_responses_are_dropped() {
    let mut session = ready_session();
    let first = session.submit_action(PlayerAction::MoveForward).expect("accepted");
    session.apply_turn(first.ticket, quiet_turn("first"));

    assert_eq!(session.apply_turn(first.ticket, quiet_turn("again")), TurnOutcome::Stale);
    assert_eq!(session.player().last_log, "first");
}

#[test]
fn restart_invalidates_everything_in_flight() {
    let mut session = ready_session();
    let request = session.submit_action(PlayerAction::MoveForward).expect("accepted");
    assert!(session.is_turn_pending());

    let boot = session.restart();
    assert_eq!(session.epoch(), 1);
    assert_eq!(session.phase(), Phase::Loading);
    assert!(!session.is_turn_pending());
    assert_eq!(session.apply_turn(request.ticket, ambush(3, EnemyKind::Boss)), TurnOutcome::Stale);
    assert_eq!(session.player().health(), MAX_HEALTH);
    assert_eq!(session.player().ammo, STARTING_AMMO);

    assert_eq!(session.resolve_scene(boot.ticket, true), SceneDecision::Show);
    assert_eq!(session.phase(), Phase::Exploring);
}

#[test]
fn scene_from_previous_run_is_ignored() {
    let mut session = ready_session();
    let request = session.submit_action(PlayerAction::MoveForward).expect("accepted");
    let TurnOutcome::Applied { scene: Some(old_scene), .. } =
        session.apply_turn(request.ticket, quiet_turn("on"))
    else {
        panic!("expected a scene request");
    };

    session.restart();
    assert_eq!(session.resolve_scene(old_scene.ticket, true), SceneDecision::Stale);
    assert!(!session.has_shown_scene());
}

#[test]
fn older_scene_never_replaces_a_newer_one() {
    let mut session = ready_session();
    let mut scenes = Vec::new();
    for narrative in ["one", "two"] {
        let request = session.submit_action(PlayerAction::MoveForward).expect("accepted");
        if let TurnOutcome::Applied { scene: Some(scene), .. } =
            session.apply_turn(request.ticket, quiet_turn(narrative))
        {
            scenes.push(scene);
        }
    }
    assert_eq!(scenes.len(), 2);

    assert_eq!(session.resolve_scene(scenes[1].ticket, true), SceneDecision::Show);
    assert_eq!(session.resolve_scene(scenes[0].ticket, true), SceneDecision::Stale);
}

#[test]
fn missing_image_keeps_the_background() {
    let mut session = ready_session();
    let request = session.submit_action(PlayerAction::TurnRight).expect("accepted");
    let TurnOutcome::Applied { scene: Some(scene), .. } =
        session.apply_turn(request.ticket, quiet_turn("turned"))
    else {
        panic!("expected a scene request");
    };
    assert_eq!(session.resolve_scene(scene.ticket, false), SceneDecision::Keep);
    assert!(!session.has_shown_scene());
}
