//! Pull-grapple: straight-line pull toward a raycast anchor.

use super::Phase;
use crate::collision::CollisionQuery;
use crate::pawn::Pawn;
use data_runtime::configs::abilities::GrappleCfg;
use glam::Vec3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GrappleState {
    pub phase: Phase,
    pub elapsed: f32,
    pub cooldown_t: f32,
    pub anchor: Option<Vec3>,
}

impl GrappleState {
    /// Attempt to latch. A no-op while swinging: swing holds precedence.
    pub fn try_trigger(
        &mut self,
        cfg: &GrappleCfg,
        pawn: &Pawn,
        look: Vec3,
        world: &dyn CollisionQuery,
        swinging: bool,
    ) -> bool {
        if swinging || self.phase != Phase::Idle || self.cooldown_t > 0.0 {
            return false;
        }
        let look = look.normalize_or_zero();
        if look == Vec3::ZERO {
            return false;
        }
        let Some(hit) = world.raycast(pawn.eye(), look, cfg.range) else {
            return false;
        };
        if !hit.grappleable {
            return false;
        }
        self.anchor = Some(hit.point);
        self.phase = Phase::Active;
        self.elapsed = 0.0;
        true
    }

    /// One tick. While active, writes the pull velocity onto the pawn and
    /// handles the three completion exits (arrival, obstacle, duration cap),
    /// all of which grant the momentum boost. Otherwise drains the cooldown.
    pub fn tick(&mut self, cfg: &GrappleCfg, pawn: &mut Pawn, world: &dyn CollisionQuery, dt: f32) {
        if self.phase != Phase::Active {
            self.tick_cooldown(dt);
            return;
        }
        let Some(anchor) = self.anchor else {
            // Unreachable by construction; resolve rather than wedge.
            self.cancel(cfg);
            return;
        };
        self.elapsed += dt;
        let to = anchor - pawn.center();
        let dist = to.length();
        if dist <= cfg.arrive_radius {
            self.complete(cfg, pawn, to.normalize_or_zero());
            return;
        }
        let dir = to / dist;
        let step = cfg.pull_speed * dt + pawn.radius;
        let obstacle = world
            .sweep(pawn.center(), dir, pawn.radius, step)
            .is_some_and(|h| (h.point - anchor).length() > cfg.arrive_radius * 2.0);
        if obstacle || self.elapsed >= cfg.max_duration {
            self.complete(cfg, pawn, dir);
            return;
        }
        pawn.set_vel3(dir * cfg.pull_speed);
    }

    /// Completion exit: final pull-direction velocity times the boost,
    /// applied to both horizontal and vertical components.
    fn complete(&mut self, cfg: &GrappleCfg, pawn: &mut Pawn, dir: Vec3) {
        pawn.set_vel3(dir * cfg.pull_speed * cfg.exit_boost);
        self.phase = Phase::Cooldown;
        self.cooldown_t = cfg.cooldown;
        self.elapsed = 0.0;
        self.anchor = None;
    }

    /// External cancel (ceiling, jump pad, landing, swing start, death):
    /// current velocity is kept, no boost, straight to cooldown.
    pub fn cancel(&mut self, cfg: &GrappleCfg) {
        if self.phase == Phase::Active {
            self.phase = Phase::Cooldown;
            self.cooldown_t = cfg.cooldown;
            self.elapsed = 0.0;
            self.anchor = None;
        }
    }

    fn tick_cooldown(&mut self, dt: f32) {
        if self.phase == Phase::Cooldown {
            self.cooldown_t -= dt;
            if self.cooldown_t <= 0.0 {
                self.cooldown_t = 0.0;
                self.phase = Phase::Idle;
            }
        }
    }
}
