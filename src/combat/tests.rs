//! Combat domain: unit tests for health rules and attack direction.

use bevy::prelude::*;

use super::components::{AttackDirection, PlayerHealth};
use super::systems::knockback_velocity;
use crate::movement::{Facing, TuningProfile};

fn profile() -> TuningProfile {
    let mut p = TuningProfile::default();
    p.validate(9.81).unwrap();
    p
}

#[test]
fn test_damage_then_invulnerability_window() {
    let mut health = PlayerHealth::new(5);

    assert!(health.take_damage(2, 1.0));
    assert_eq!(health.current, 3);
    assert!(health.is_invulnerable());

    // A second hit inside the window changes nothing.
    health.invuln_remaining -= 0.01;
    assert!(!health.take_damage(2, 1.0));
    assert_eq!(health.current, 3);
}

#[test]
fn test_damage_floors_at_zero() {
    let mut health = PlayerHealth::new(3);
    assert!(health.take_damage(10, 1.0));
    assert_eq!(health.current, 0);
    assert!(health.is_dead());

    // Dead: further damage is rejected.
    health.invuln_remaining = 0.0;
    assert!(!health.take_damage(1, 1.0));
    assert_eq!(health.current, 0);
}

#[test]
fn test_heal_is_capped_and_idempotent_at_full() {
    let mut health = PlayerHealth::new(5);
    assert_eq!(health.heal(2), 0);
    assert_eq!(health.current, 5);

    health.take_damage(3, 0.0);
    assert_eq!(health.heal(10), 3);
    assert_eq!(health.current, 5);
}

#[test]
fn test_attack_direction_vertical_priority() {
    assert_eq!(
        AttackDirection::from_input(1.0, Facing::Left),
        AttackDirection::Up
    );
    assert_eq!(
        AttackDirection::from_input(-1.0, Facing::Right),
        AttackDirection::Down
    );
    assert_eq!(
        AttackDirection::from_input(0.0, Facing::Right),
        AttackDirection::Right
    );
    assert_eq!(
        AttackDirection::from_input(0.0, Facing::Left),
        AttackDirection::Left
    );
}

#[test]
fn test_knockback_points_away_from_source() {
    let p = profile();

    // Source to the left: pushed right, always lifted.
    let v = knockback_velocity(&p, Vec2::new(0.0, 0.0), Vec2::new(-1.0, 0.0));
    assert!(v.x > 0.0);
    assert_eq!(v.y, p.knockback_force_y);

    // Source to the right: pushed left.
    let v = knockback_velocity(&p, Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
    assert!(v.x < 0.0);

    // Exactly on top of the source: defaults to pushing right.
    let v = knockback_velocity(&p, Vec2::ZERO, Vec2::ZERO);
    assert!(v.x > 0.0);
}
