//! Mantle: scripted pull-up onto a ledge, collision disabled while it runs.

use super::Phase;
use crate::collision::CollisionQuery;
use crate::pawn::Pawn;
use data_runtime::configs::abilities::MantleCfg;
use glam::Vec3;

#[inline]
fn ease_in_out(s: f32) -> f32 {
    s * s * (3.0 - 2.0 * s)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MantleState {
    pub phase: Phase,
    pub t: f32,
    pub start: Vec3,
    pub target: Vec3,
}

impl MantleState {
    /// Attempt a mantle: airborne, with a qualifying ledge ahead.
    /// Velocity is zeroed entering the scripted motion.
    pub fn try_trigger(
        &mut self,
        cfg: &MantleCfg,
        pawn: &mut Pawn,
        world: &dyn CollisionQuery,
    ) -> bool {
        if self.phase != Phase::Idle || pawn.grounded {
            return false;
        }
        let forward = Vec3::new(pawn.yaw.sin(), 0.0, pawn.yaw.cos());
        let Some(hit) = world.ledge_scan(pawn.pos, forward, cfg.min_ledge, cfg.max_ledge, cfg.reach)
        else {
            return false;
        };
        pawn.zero_velocity();
        self.start = pawn.pos;
        self.target = hit.stand_pos;
        self.t = 0.0;
        self.phase = Phase::Active;
        true
    }

    /// One scripted tick: height eases over the whole window, the forward
    /// offset eases in starting at `forward_start` of the duration. Lands
    /// exactly on the target with zero velocity.
    pub fn tick(&mut self, cfg: &MantleCfg, pawn: &mut Pawn, dt: f32) {
        if self.phase != Phase::Active {
            return;
        }
        self.t += dt;
        let s = (self.t / cfg.duration).min(1.0);
        let height = ease_in_out(s);
        let forward = if s <= cfg.forward_start {
            0.0
        } else {
            ease_in_out((s - cfg.forward_start) / (1.0 - cfg.forward_start))
        };
        let horiz = Vec3::new(
            self.target.x - self.start.x,
            0.0,
            self.target.z - self.start.z,
        );
        pawn.pos = Vec3::new(
            self.start.x,
            self.start.y + (self.target.y - self.start.y) * height,
            self.start.z,
        ) + horiz * forward;
        if s >= 1.0 {
            pawn.pos = self.target;
            pawn.zero_velocity();
            pawn.grounded = true;
            self.phase = Phase::Idle;
            self.t = 0.0;
        }
    }

    /// External cancel: stop where we are, zero velocity, back to idle.
    pub fn cancel(&mut self, pawn: &mut Pawn) {
        if self.phase == Phase::Active {
            pawn.zero_velocity();
            self.phase = Phase::Idle;
            self.t = 0.0;
        }
    }
}
