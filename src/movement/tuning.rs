//! Movement domain: designer tuning profile and derived physics constants.
//!
//! The profile is a read-only bag of numbers once [`TuningProfile::validate`]
//! has run. Designers edit the plain fields (in code or in
//! `assets/data/tuning.ron`); the derived fields are recomputed from the
//! kinematic formulas on every validate and must never be set by hand.

use bevy::prelude::*;
use ron::Options;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scale between designer acceleration units and applied force per unit of
/// speed difference.
const ACCEL_FORCE_SCALE: f32 = 50.0;

/// Invalid tuning values. Raised once at load time; the profile is never
/// re-checked on the hot path.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveTimeToApex(f32),
    NonPositiveMaxSpeed(f32),
    AccelerationOutOfRange { field: &'static str, value: f32, max: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveTimeToApex(v) => {
                write!(f, "jump_time_to_apex must be positive, got {}", v)
            }
            ConfigError::NonPositiveMaxSpeed(v) => {
                write!(f, "run_max_speed must be positive, got {}", v)
            }
            ConfigError::AccelerationOutOfRange { field, value, max } => {
                write!(f, "{} must be in (0, {}], got {}", field, max, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TuningProfile {
    // Gravity feel
    pub fall_gravity_mult: f32,
    pub max_fall_speed: f32,
    pub fast_fall_gravity_mult: f32,
    pub max_fast_fall_speed: f32,

    // Run
    pub run_max_speed: f32,
    pub run_acceleration: f32,
    pub run_decceleration: f32,
    pub accel_in_air: f32,
    pub deccel_in_air: f32,
    pub conserve_momentum: bool,

    // Jump
    pub jump_height: f32,
    pub jump_time_to_apex: f32,
    pub jump_cut_gravity_mult: f32,
    pub jump_hang_gravity_mult: f32,
    pub jump_hang_threshold: f32,
    pub jump_hang_accel_mult: f32,
    pub jump_hang_max_speed_mult: f32,
    pub air_jumps: u8,

    // Wall jump
    pub wall_jump_force_x: f32,
    pub wall_jump_force_y: f32,
    pub wall_jump_run_lerp: f32,
    pub wall_jump_time: f32,
    pub turn_on_wall_jump: bool,

    // Wall slide
    pub slide_speed: f32,
    pub slide_accel: f32,
    pub wall_slide_gravity_mult: f32,

    // Assists
    pub coyote_time: f32,
    pub jump_buffer_time: f32,

    // Dash
    pub dash_amount: u8,
    pub dash_speed: f32,
    pub dash_attack_time: f32,
    pub dash_end_time: f32,
    pub dash_end_speed_x: f32,
    pub dash_end_speed_y: f32,
    pub dash_end_run_lerp: f32,
    pub dash_refill_time: f32,
    pub dash_buffer_time: f32,

    // Attack
    pub attack_buffer_time: f32,
    pub attack_range: f32,
    pub attack_hitbox_width: f32,
    pub attack_hitbox_height: f32,
    pub attack_damage: i32,
    pub attack_startup_time: f32,
    pub attack_duration: f32,
    pub pogo_force_mult: f32,
    pub pogo_hit_force_mult: f32,

    // Health
    pub max_health: i32,
    pub invulnerability_time: f32,
    pub knockback_force_x: f32,
    pub knockback_force_y: f32,
    pub respawn_delay: f32,

    // Derived — recomputed by validate(), never read from config.
    #[serde(skip)]
    pub gravity_strength: f32,
    #[serde(skip)]
    pub gravity_scale: f32,
    #[serde(skip)]
    pub jump_force: f32,
    #[serde(skip)]
    pub run_accel_amount: f32,
    #[serde(skip)]
    pub run_deccel_amount: f32,
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self {
            fall_gravity_mult: 2.5,
            max_fall_speed: 18.0,
            fast_fall_gravity_mult: 3.5,
            max_fast_fall_speed: 25.0,

            run_max_speed: 6.0,
            run_acceleration: 4.0,
            run_decceleration: 4.5,
            accel_in_air: 0.7,
            deccel_in_air: 0.75,
            conserve_momentum: true,

            jump_height: 4.2,
            jump_time_to_apex: 0.45,
            jump_cut_gravity_mult: 2.2,
            jump_hang_gravity_mult: 0.4,
            jump_hang_threshold: 2.5,
            jump_hang_accel_mult: 1.15,
            jump_hang_max_speed_mult: 1.1,
            air_jumps: 1,

            wall_jump_force_x: 12.0,
            wall_jump_force_y: 16.0,
            wall_jump_run_lerp: 0.3,
            wall_jump_time: 0.15,
            turn_on_wall_jump: true,

            slide_speed: -1.5,
            slide_accel: 20.0,
            wall_slide_gravity_mult: 0.3,

            coyote_time: 0.12,
            jump_buffer_time: 0.1,

            dash_amount: 1,
            dash_speed: 18.0,
            dash_attack_time: 0.18,
            dash_end_time: 0.22,
            dash_end_speed_x: 8.0,
            dash_end_speed_y: 8.0,
            dash_end_run_lerp: 0.6,
            dash_refill_time: 0.05,
            dash_buffer_time: 0.1,

            attack_buffer_time: 0.1,
            attack_range: 0.9,
            attack_hitbox_width: 1.2,
            attack_hitbox_height: 0.8,
            attack_damage: 1,
            attack_startup_time: 0.1,
            attack_duration: 0.35,
            pogo_force_mult: 0.5,
            pogo_hit_force_mult: 0.7,

            max_health: 5,
            invulnerability_time: 1.0,
            knockback_force_x: 8.0,
            knockback_force_y: 6.0,
            respawn_delay: 1.5,

            gravity_strength: 0.0,
            gravity_scale: 0.0,
            jump_force: 0.0,
            run_accel_amount: 0.0,
            run_deccel_amount: 0.0,
        }
    }
}

impl TuningProfile {
    /// Recompute derived constants and reject values that would break the
    /// kinematics. `world_gravity` is the magnitude of the world's gravity
    /// (positive). Must be called before the profile is handed to any
    /// system, and again after any field change.
    pub fn validate(&mut self, world_gravity: f32) -> Result<(), ConfigError> {
        if self.jump_time_to_apex <= 0.0 {
            return Err(ConfigError::NonPositiveTimeToApex(self.jump_time_to_apex));
        }
        if self.run_max_speed <= 0.0 {
            return Err(ConfigError::NonPositiveMaxSpeed(self.run_max_speed));
        }
        if self.run_acceleration <= 0.0 || self.run_acceleration > self.run_max_speed {
            return Err(ConfigError::AccelerationOutOfRange {
                field: "run_acceleration",
                value: self.run_acceleration,
                max: self.run_max_speed,
            });
        }
        if self.run_decceleration <= 0.0 || self.run_decceleration > self.run_max_speed {
            return Err(ConfigError::AccelerationOutOfRange {
                field: "run_decceleration",
                value: self.run_decceleration,
                max: self.run_max_speed,
            });
        }

        // Projectile kinematics: height and time-to-apex pin down gravity,
        // gravity and time-to-apex pin down launch speed.
        self.gravity_strength =
            -(2.0 * self.jump_height) / (self.jump_time_to_apex * self.jump_time_to_apex);
        self.gravity_scale = self.gravity_strength / -world_gravity;
        self.jump_force = self.gravity_strength.abs() * self.jump_time_to_apex;

        self.run_accel_amount = (ACCEL_FORCE_SCALE * self.run_acceleration) / self.run_max_speed;
        self.run_deccel_amount = (ACCEL_FORCE_SCALE * self.run_decceleration) / self.run_max_speed;

        Ok(())
    }

    pub fn wall_jump_force(&self) -> Vec2 {
        Vec2::new(self.wall_jump_force_x, self.wall_jump_force_y)
    }

    pub fn dash_end_speed(&self) -> Vec2 {
        Vec2::new(self.dash_end_speed_x, self.dash_end_speed_y)
    }

    pub fn knockback_force(&self) -> Vec2 {
        Vec2::new(self.knockback_force_x, self.knockback_force_y)
    }

    pub fn attack_hitbox(&self) -> Vec2 {
        Vec2::new(self.attack_hitbox_width, self.attack_hitbox_height)
    }

    /// Minimum simulated time a dash keeps its owner in the dashing mode.
    pub fn dash_total_time(&self) -> f32 {
        self.dash_attack_time + self.dash_end_time
    }
}

/// Failure to read the tuning file. Distinct from [`ConfigError`]: a missing
/// file degrades to defaults, a malformed one is fatal.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a profile from a RON file. Derived fields in the file are ignored;
/// the caller still has to run validate().
pub fn load_profile(path: &Path) -> Result<TuningProfile, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron_options()
        .from_str(&contents)
        .map_err(|e| TuningLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

/// Build the session profile: tuning.ron if present, compiled defaults
/// otherwise. Invalid values abort startup.
pub fn startup_profile(base_path: &Path, world_gravity: f32) -> TuningProfile {
    let path = base_path.join("data/tuning.ron");
    let mut profile = if path.exists() {
        match load_profile(&path) {
            Ok(p) => p,
            Err(e) => panic!("{}", e),
        }
    } else {
        warn!("No tuning file at {}, using defaults", path.display());
        TuningProfile::default()
    };

    if let Err(e) = profile.validate(world_gravity) {
        panic!("Invalid tuning profile: {}", e);
    }
    profile
}
