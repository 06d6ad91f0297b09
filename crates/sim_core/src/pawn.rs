//! Pawn kinematic state with decomposed velocity.

use glam::{Vec2, Vec3};

/// Kinematic state of one player pawn.
///
/// Velocity is decomposed into a ground-plane component (`vel_h`, world x/z)
/// and a vertical scalar so friction and gravity apply independently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pawn {
    pub pos: Vec3,
    pub yaw: f32,
    pub vel_h: Vec2,
    pub vel_v: f32,
    pub grounded: bool,
    pub crouching: bool,
    /// Capsule radius used for sweeps.
    pub radius: f32,
    /// Standing height, feet at `pos.y`.
    pub height: f32,
}

impl Pawn {
    pub fn new(pos: Vec3) -> Self {
        Self {
            pos,
            yaw: 0.0,
            vel_h: Vec2::ZERO,
            vel_v: 0.0,
            grounded: false,
            crouching: false,
            radius: 0.4,
            height: 1.8,
        }
    }

    /// Recomposed 3D velocity.
    #[inline]
    pub fn vel3(&self) -> Vec3 {
        Vec3::new(self.vel_h.x, self.vel_v, self.vel_h.y)
    }

    #[inline]
    pub fn set_vel3(&mut self, v: Vec3) {
        self.vel_h = Vec2::new(v.x, v.z);
        self.vel_v = v.y;
    }

    /// Eye point used as the origin for aim raycasts.
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.height * 0.85, 0.0)
    }

    /// Capsule center used as the origin for obstacle sweeps.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.height * 0.5, 0.0)
    }

    /// Hard stop, used around scripted moves and respawn placement.
    pub fn zero_velocity(&mut self) {
        self.vel_h = Vec2::ZERO;
        self.vel_v = 0.0;
    }
}
