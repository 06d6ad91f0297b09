//! Swing grapple: constrained pendulum around a raycast anchor.

use super::Phase;
use crate::collision::CollisionQuery;
use crate::pawn::Pawn;
use data_runtime::configs::abilities::SwingCfg;
use glam::Vec3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwingState {
    pub phase: Phase,
    pub anchor: Option<Vec3>,
    pub rope_len: f32,
}

impl SwingState {
    /// Attempt to latch a swing anchor. Airborne only.
    pub fn try_trigger(
        &mut self,
        cfg: &SwingCfg,
        pawn: &Pawn,
        look: Vec3,
        world: &dyn CollisionQuery,
    ) -> bool {
        if self.phase != Phase::Idle || pawn.grounded {
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
        self.rope_len = (pawn.center() - hit.point).length().max(1.0);
        self.phase = Phase::Active;
        true
    }

    /// One pendulum tick: tangential gravity only, radial velocity stripped,
    /// position re-projected onto the rope sphere. Integrates the pawn
    /// itself; ends on ground proximity with velocity kept as-is.
    pub fn tick(
        &mut self,
        cfg: &SwingCfg,
        pawn: &mut Pawn,
        world: &dyn CollisionQuery,
        gravity_eff: f32,
        dt: f32,
    ) {
        if self.phase != Phase::Active {
            return;
        }
        let near_ground = world
            .raycast(
                pawn.pos + Vec3::new(0.0, 0.05, 0.0),
                Vec3::NEG_Y,
                cfg.ground_clearance,
            )
            .is_some();
        if near_ground {
            self.release();
            return;
        }
        let Some(anchor) = self.anchor else {
            self.release();
            return;
        };
        let radial = (pawn.center() - anchor).normalize_or_zero();
        let mut v = pawn.vel3();
        let g = Vec3::new(0.0, -gravity_eff, 0.0);
        v += (g - radial * g.dot(radial)) * dt;
        v -= radial * v.dot(radial);
        let mut center = pawn.center() + v * dt;
        let off = center - anchor;
        center = anchor + off.normalize_or_zero() * self.rope_len;
        pawn.pos = center - Vec3::new(0.0, pawn.height * 0.5, 0.0);
        pawn.set_vel3(v);
    }

    /// Rope release: straight back to idle, no cooldown, velocity kept.
    pub fn release(&mut self) {
        self.phase = Phase::Idle;
        self.anchor = None;
        self.rope_len = 0.0;
    }
}
