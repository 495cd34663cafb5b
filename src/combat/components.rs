//! Combat domain: player health and the melee attack task.

use bevy::prelude::*;

use crate::movement::Facing;

/// Player health plus the invulnerability window and pending respawn.
#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    pub current: i32,
    pub max: i32,
    pub invuln_remaining: f32,
    /// Countdown to respawn once dead.
    pub respawn_in: Option<f32>,
}

impl PlayerHealth {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            invuln_remaining: 0.0,
            respawn_in: None,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_remaining > 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    /// Apply damage unless invulnerable or already dead. Returns whether
    /// the hit landed; a landed hit arms the invulnerability window.
    pub fn take_damage(&mut self, amount: i32, invuln_time: f32) -> bool {
        if self.is_invulnerable() || self.is_dead() {
            return false;
        }

        self.current = (self.current - amount).max(0);
        self.invuln_remaining = invuln_time;
        true
    }

    /// Heal up to the cap. Returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if self.current >= self.max {
            return 0;
        }

        let healed = amount.min(self.max - self.current);
        self.current += healed;
        healed
    }
}

/// The four attack directions. Vertical input wins over facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AttackDirection {
    pub fn from_input(axis_y: f32, facing: Facing) -> Self {
        if axis_y > 0.5 {
            AttackDirection::Up
        } else if axis_y < -0.5 {
            AttackDirection::Down
        } else {
            match facing {
                Facing::Right => AttackDirection::Right,
                Facing::Left => AttackDirection::Left,
            }
        }
    }

    pub fn vec(self) -> Vec2 {
        match self {
            AttackDirection::Up => Vec2::Y,
            AttackDirection::Down => Vec2::NEG_Y,
            AttackDirection::Left => Vec2::NEG_X,
            AttackDirection::Right => Vec2::X,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackPhase {
    /// Startup window before the swing connects.
    Windup { remaining: f32 },
    /// Swing has resolved; waiting out the rest of the attack.
    Recover { remaining: f32 },
}

/// One in-flight swing. No cancellation; a new attack cannot start until
/// this one clears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackTask {
    pub direction: AttackDirection,
    pub phase: AttackPhase,
}

#[derive(Component, Debug, Default)]
pub struct MeleeAttack {
    pub active: Option<AttackTask>,
}

impl MeleeAttack {
    pub fn is_attacking(&self) -> bool {
        self.active.is_some()
    }
}
