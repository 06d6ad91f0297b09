//! Quake-style movement model over decomposed velocity.
//!
//! Pure functions from (input, ground state, velocity, tuning, dt) to the
//! next velocity. Grounded ticks run friction, then a direction-change
//! penalty, then a linear step toward the wish velocity. Airborne ticks run
//! the classic projected-speed air strafe with a hard cap. No ability
//! awareness lives here.

use data_runtime::configs::movement::MovementCfg;
use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}

/// Speed cap for the current stance. Crouch takes priority over sprint.
#[inline]
pub fn max_speed(cfg: &MovementCfg, sprint: bool, crouch: bool) -> f32 {
    if crouch {
        cfg.crouch_speed
    } else if sprint {
        cfg.sprint_speed
    } else {
        cfg.walk_speed
    }
}

/// Rotate local movement intent into the world ground plane.
/// Returns a unit vector, or zero when there is no intent.
pub fn wish_dir(mov: Vec2, yaw: f32) -> Vec2 {
    let forward = Vec2::new(yaw.sin(), yaw.cos());
    let right = Vec2::new(yaw.cos(), -yaw.sin());
    (right * mov.x + forward * mov.y).normalize_or_zero()
}

/// Velocity scale applied when the wish direction opposes current travel.
/// Identity at or below 90 degrees, harshest at a full reversal.
pub fn turn_penalty(cfg: &MovementCfg, angle_rad: f32) -> f32 {
    if angle_rad <= FRAC_PI_2 {
        return 1.0;
    }
    let t = inverse_lerp(FRAC_PI_2, PI, angle_rad);
    lerp(cfg.turn_penalty_mild, cfg.turn_penalty_full, t * t)
}

/// One grounded tick of horizontal movement.
pub fn ground_step(
    cfg: &MovementCfg,
    vel: Vec2,
    wish: Vec2,
    target_speed: f32,
    dt: f32,
) -> Vec2 {
    let mut v = vel;
    if wish == Vec2::ZERO {
        // Friction only: decelerate toward zero, never past it.
        let speed = v.length();
        if speed <= 0.0 {
            return Vec2::ZERO;
        }
        let drop = cfg.ground_friction * dt;
        return if speed <= drop {
            Vec2::ZERO
        } else {
            v * ((speed - drop) / speed)
        };
    }
    if v.length_squared() > 1e-6 {
        let cos = (v / v.length()).dot(wish).clamp(-1.0, 1.0);
        v *= turn_penalty(cfg, cos.acos());
    }
    // Constant step toward the wish velocity, not an exponential blend.
    let delta = wish * target_speed - v;
    let max_step = cfg.ground_accel * dt;
    if delta.length() <= max_step {
        wish * target_speed
    } else {
        v + delta.normalize_or_zero() * max_step
    }
}

/// One airborne tick: id-Tech air strafe. Acceleration is granted only up
/// to the cap on speed projected along the wish direction.
pub fn air_step(cfg: &MovementCfg, vel: Vec2, wish: Vec2, dt: f32) -> Vec2 {
    if wish == Vec2::ZERO {
        return vel;
    }
    let add_speed = cfg.max_air_speed - vel.dot(wish);
    if add_speed <= 0.0 {
        return vel;
    }
    vel + wish * (cfg.air_accel * dt).min(add_speed)
}

/// One tick of vertical velocity: continuous gravity with a terminal floor,
/// clamped to a small stick value while grounded and not moving upward.
pub fn vertical_step(cfg: &MovementCfg, vel_v: f32, grounded: bool, dt: f32) -> f32 {
    if grounded && vel_v <= 0.0 {
        return cfg.ground_stick;
    }
    (vel_v - cfg.gravity_eff() * dt).max(cfg.terminal_velocity)
}

/// Take-off speed for a target apex height.
#[inline]
pub fn jump_speed(cfg: &MovementCfg, height: f32) -> f32 {
    (height * 2.0 * cfg.gravity * cfg.gravity_scale).sqrt()
}
