//! Movement tuning: speeds, friction, acceleration, gravity, jump.

use serde::Deserialize;

/// Ground/air movement tuning. Units are meters and seconds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct MovementCfg {
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    /// Linear velocity step toward the wish velocity while grounded (m/s^2).
    pub ground_accel: f32,
    /// Deceleration toward zero when grounded with no input (m/s^2).
    pub ground_friction: f32,
    /// Air-strafe acceleration (m/s^2).
    pub air_accel: f32,
    /// Cap on projected speed gained along the wish direction while airborne.
    pub max_air_speed: f32,
    /// Velocity scale at a 90-degree direction change.
    pub turn_penalty_mild: f32,
    /// Velocity scale at a full 180-degree reversal.
    pub turn_penalty_full: f32,
    /// Base gravity magnitude (m/s^2).
    pub gravity: f32,
    /// Multiplier applied to gravity for both falling and jump take-off.
    pub gravity_scale: f32,
    /// Small downward velocity held while grounded so slopes keep contact.
    pub ground_stick: f32,
    /// Most negative vertical velocity allowed.
    pub terminal_velocity: f32,
    /// Target apex height of a normal jump (m).
    pub jump_height: f32,
    /// Apex height forced by a jump pad, overriding the requested height.
    pub jump_pad_height: f32,
}

impl Default for MovementCfg {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            sprint_speed: 10.0,
            crouch_speed: 2.5,
            ground_accel: 40.0,
            ground_friction: 30.0,
            air_accel: 20.0,
            max_air_speed: 12.0,
            turn_penalty_mild: 0.85,
            turn_penalty_full: 0.2,
            gravity: 9.81,
            gravity_scale: 3.0,
            ground_stick: -0.5,
            terminal_velocity: -60.0,
            jump_height: 2.0,
            jump_pad_height: 8.0,
        }
    }
}

impl MovementCfg {
    /// Effective gravity magnitude after scaling.
    #[inline]
    #[must_use]
    pub fn gravity_eff(&self) -> f32 {
        self.gravity * self.gravity_scale
    }
}
