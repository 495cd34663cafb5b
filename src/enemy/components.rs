//! Enemy domain: patrol state machine, health, and contact damage.

use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct Enemy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
    Attack,
}

/// Distance-driven state transitions with hysteresis: chase is entered at
/// `detection_range` but only released past 1.5x it, and attack releases at
/// 1.2x its entry radius, so the machine cannot flicker on the boundary.
pub fn next_ai_state(
    state: AiState,
    distance: f32,
    detection_range: f32,
    attack_range: f32,
) -> AiState {
    match state {
        AiState::Patrol => {
            if distance <= detection_range {
                AiState::Chase
            } else {
                AiState::Patrol
            }
        }
        AiState::Chase => {
            if distance <= attack_range {
                AiState::Attack
            } else if distance > detection_range * 1.5 {
                AiState::Patrol
            } else {
                AiState::Chase
            }
        }
        AiState::Attack => {
            if distance > attack_range * 1.2 {
                AiState::Chase
            } else {
                AiState::Attack
            }
        }
    }
}

/// Waypoint patrol between two points with a pause at each end.
#[derive(Component, Debug)]
pub struct EnemyAi {
    pub state: AiState,
    pub point_a: Vec2,
    pub point_b: Vec2,
    /// Heading toward `point_b` when true.
    pub toward_b: bool,
    pub is_waiting: bool,
    pub wait_timer: f32,
    pub facing_right: bool,
}

impl EnemyAi {
    pub fn new(point_a: Vec2, point_b: Vec2) -> Self {
        Self {
            state: AiState::Patrol,
            point_a,
            point_b,
            toward_b: false,
            is_waiting: false,
            wait_timer: 0.0,
            facing_right: true,
        }
    }

    pub fn current_target(&self) -> Vec2 {
        if self.toward_b { self.point_b } else { self.point_a }
    }
}

#[derive(Component, Debug, Clone)]
pub struct EnemyHealth {
    pub current: i32,
    pub max: i32,
    pub knockback_force: f32,
}

impl EnemyHealth {
    pub fn new(max: i32, knockback_force: f32) -> Self {
        Self {
            current: max,
            max,
            knockback_force,
        }
    }

    /// Returns true when this damage killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.current = (self.current - amount).max(0);
        self.current == 0
    }
}

/// Touch damage against the player: once on contact, then on a fixed
/// interval while the contact persists.
#[derive(Component, Debug)]
pub struct ContactDamage {
    pub amount: i32,
    pub interval: f32,
    pub cooldown: f32,
    pub touching: bool,
}

impl ContactDamage {
    pub fn new(amount: i32, interval: f32) -> Self {
        Self {
            amount,
            interval,
            cooldown: 0.0,
            touching: false,
        }
    }
}

/// Red tint countdown after a hit.
#[derive(Component, Debug)]
pub struct DamageFlash(pub f32);
