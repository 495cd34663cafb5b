//! Enemy domain: unit tests for the patrol state machine and enemy health.

use bevy::prelude::*;

use super::components::{next_ai_state, AiState, EnemyAi, EnemyHealth};

#[test]
fn test_detection_scenario() {
    let detection = 5.0;
    let attack = 1.0;
    let mut state = AiState::Patrol;

    // Out of range: keeps patrolling.
    state = next_ai_state(state, 6.0, detection, attack);
    assert_eq!(state, AiState::Patrol);

    // Inside detection: chase.
    state = next_ai_state(state, 4.0, detection, attack);
    assert_eq!(state, AiState::Chase);

    // Point blank: attack.
    state = next_ai_state(state, 0.5, detection, attack);
    assert_eq!(state, AiState::Attack);

    // Retreat past the release radius: attack drops to chase, then chase
    // drops to patrol once strictly past detection * 1.5.
    state = next_ai_state(state, 7.6, detection, attack);
    assert_eq!(state, AiState::Chase);
    state = next_ai_state(state, 7.6, detection, attack);
    assert_eq!(state, AiState::Patrol);
}

#[test]
fn test_chase_hysteresis_band() {
    let detection = 5.0;
    let attack = 1.0;

    // Between detection and detection * 1.5: a chasing enemy keeps
    // chasing, a patrolling one does not start.
    assert_eq!(
        next_ai_state(AiState::Chase, 6.0, detection, attack),
        AiState::Chase
    );
    assert_eq!(
        next_ai_state(AiState::Patrol, 6.0, detection, attack),
        AiState::Patrol
    );

    // Exactly on the release boundary still chases.
    assert_eq!(
        next_ai_state(AiState::Chase, 7.5, detection, attack),
        AiState::Chase
    );
}

#[test]
fn test_attack_hysteresis_band() {
    let detection = 5.0;
    let attack = 1.0;

    assert_eq!(
        next_ai_state(AiState::Attack, 1.1, detection, attack),
        AiState::Attack
    );
    assert_eq!(
        next_ai_state(AiState::Attack, 1.3, detection, attack),
        AiState::Chase
    );
}

#[test]
fn test_enemy_health_floors_and_reports_death() {
    let mut health = EnemyHealth::new(3, 8.0);

    assert!(!health.take_damage(2));
    assert_eq!(health.current, 1);

    assert!(health.take_damage(5));
    assert_eq!(health.current, 0);
}

#[test]
fn test_patrol_waypoint_flip() {
    let mut ai = EnemyAi::new(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 0.0));
    assert_eq!(ai.current_target(), Vec2::new(-2.0, 0.0));

    ai.toward_b = true;
    assert_eq!(ai.current_target(), Vec2::new(2.0, 0.0));
}
