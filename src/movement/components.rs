//! Movement domain: character state, physics layers, and locomotion modes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::TuningProfile;

/// Physics layers for collision filtering and sensor queries.
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Static terrain: floors, platforms, walls. Ground and wall sensing
    /// differ by probe placement, not by layer.
    Terrain,
    /// Player character
    Player,
    /// Enemy characters
    Enemy,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for terrain colliders.
#[derive(Component, Debug)]
pub struct Terrain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Horizontal direction of a jump kicking off this wall.
    pub fn away_sign(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashPhase {
    /// Constant-velocity burst, gravity off.
    Burst,
    /// Decaying tail, gravity restored.
    Tail,
}

/// One in-flight dash. Advanced once per tick by the controller until the
/// tail expires; there is no cancellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashTask {
    pub phase: DashPhase,
    pub remaining: f32,
    pub dir: Vec2,
}

/// The one mode that gates force application this tick.
///
/// Transitions (all others are illegal by construction):
///   Grounded    -> Jumping (jump), Falling (walked off), Dashing (dash)
///   Jumping     -> Falling (apex), Dashing (dash)
///   Falling     -> Grounded (contact), Jumping (air/wall jump),
///                  WallSliding (hold toward wall), Dashing (dash)
///   WallSliding -> Falling (released), Grounded (contact),
///                  Jumping (wall jump), Dashing (dash)
///   Dashing     -> Falling (tail expired)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocomotionMode {
    #[default]
    Grounded,
    Jumping,
    Falling,
    WallSliding(WallSide),
    Dashing(DashTask),
}

/// All mutable controller state for one character. Owned exclusively by the
/// movement systems; everything else reads it.
#[derive(Component, Debug)]
pub struct CharacterState {
    pub mode: LocomotionMode,
    pub facing: Facing,

    /// Jump button released before apex; elevated gravity until grounded.
    pub jump_cut: bool,
    /// Past the apex of a jump. Survives a wall-slide interlude so apex
    /// hang still applies after peeling off a wall.
    pub jump_falling: bool,

    // Coyote-style grace timers, seconds remaining. Positive means the
    // contact was true recently enough to still count.
    pub ground_grace: f32,
    pub wall_grace_left: f32,
    pub wall_grace_right: f32,

    // Buffered intent, seconds remaining until the press is forgotten.
    pub jump_buffer: f32,
    pub dash_buffer: f32,
    pub attack_buffer: f32,

    pub air_jumps_left: u8,
    pub dashes_left: u8,
    /// Countdown of the single in-flight dash refill, if any.
    pub dash_refill: Option<f32>,

    /// Seconds of reduced run authority after a wall jump.
    pub wall_jump_lockout: f32,
}

impl CharacterState {
    pub fn new(profile: &TuningProfile) -> Self {
        Self {
            mode: LocomotionMode::Grounded,
            facing: Facing::Right,
            jump_cut: false,
            jump_falling: false,
            ground_grace: 0.0,
            wall_grace_left: 0.0,
            wall_grace_right: 0.0,
            jump_buffer: 0.0,
            dash_buffer: 0.0,
            attack_buffer: 0.0,
            air_jumps_left: profile.air_jumps,
            dashes_left: profile.dash_amount,
            dash_refill: None,
            wall_jump_lockout: 0.0,
        }
    }

    /// Wholesale reset on respawn.
    pub fn reset(&mut self, profile: &TuningProfile) {
        *self = Self::new(profile);
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.mode, LocomotionMode::Dashing(_))
    }

    /// Dash burst phase: gravity is forced to zero.
    pub fn is_dash_bursting(&self) -> bool {
        matches!(
            self.mode,
            LocomotionMode::Dashing(DashTask { phase: DashPhase::Burst, .. })
        )
    }

    pub fn is_jumping(&self) -> bool {
        self.mode == LocomotionMode::Jumping
    }

    pub fn is_wall_sliding(&self) -> bool {
        matches!(self.mode, LocomotionMode::WallSliding(_))
    }

    /// Grounded in the coyote sense: contact now or recently enough.
    pub fn grounded(&self) -> bool {
        self.ground_grace > 0.0
    }

    pub fn wall_grace(&self) -> f32 {
        self.wall_grace_left.max(self.wall_grace_right)
    }

    pub fn can_ground_jump(&self) -> bool {
        self.grounded() && !self.is_jumping()
    }

    pub fn can_air_jump(&self) -> bool {
        self.air_jumps_left > 0 && !self.grounded() && !self.is_jumping()
    }

    pub fn can_wall_jump(&self) -> bool {
        self.wall_grace() > 0.0 && !self.grounded() && !self.is_jumping()
    }

    /// Which wall a wall jump kicks off. When both sides are within their
    /// grace window the most recently touched one wins; an exact tie goes
    /// to the right wall.
    pub fn wall_jump_side(&self) -> WallSide {
        if self.wall_grace_left > self.wall_grace_right {
            WallSide::Left
        } else {
            WallSide::Right
        }
    }

    pub fn can_wall_slide(&self) -> bool {
        self.wall_grace() > 0.0
            && !self.is_jumping()
            && !self.is_dashing()
            && !self.grounded()
    }

    /// Decay every countdown by one tick. Timers are allowed to go
    /// negative; "active" always means strictly positive. The expiring
    /// dash refill restores one charge up to the cap.
    pub fn decay_timers(&mut self, dt: f32, profile: &TuningProfile) {
        self.ground_grace -= dt;
        self.wall_grace_left -= dt;
        self.wall_grace_right -= dt;
        self.jump_buffer -= dt;
        self.dash_buffer -= dt;
        self.attack_buffer -= dt;

        if self.wall_jump_lockout > 0.0 {
            self.wall_jump_lockout -= dt;
        }

        if let Some(remaining) = &mut self.dash_refill {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.dash_refill = None;
                self.dashes_left = (self.dashes_left + 1).min(profile.dash_amount);
            }
        }
    }

    /// Consume a dash charge and enter the burst phase toward `dir`.
    /// Caller has already checked the buffer and the charge count.
    pub fn start_dash(&mut self, dir: Vec2, profile: &TuningProfile) {
        self.dash_buffer = 0.0;
        self.ground_grace = 0.0;
        self.jump_cut = false;
        self.dashes_left -= 1;
        self.mode = LocomotionMode::Dashing(DashTask {
            phase: DashPhase::Burst,
            remaining: profile.dash_attack_time,
            dir,
        });
    }
}
