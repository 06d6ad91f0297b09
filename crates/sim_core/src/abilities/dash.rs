//! Dash: instantaneous additive boost with a ground-gated cooldown.

use super::Phase;
use crate::movement;
use crate::pawn::Pawn;
use data_runtime::configs::abilities::DashCfg;
use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashState {
    pub phase: Phase,
    pub active_t: f32,
    pub cooldown_t: f32,
    /// An air dash holds its cooldown countdown until the next ground contact.
    pub pending_ground: bool,
}

impl DashState {
    /// Attempt a dash. The boost lands immediately; the short active window
    /// only shields the boosted velocity from ground friction.
    pub fn try_trigger(
        &mut self,
        cfg: &DashCfg,
        mov: Vec2,
        yaw: f32,
        grounded: bool,
        pawn: &mut Pawn,
    ) -> bool {
        if self.phase != Phase::Idle || self.cooldown_t > 0.0 {
            return false;
        }
        if mov.length() < cfg.min_input {
            return false;
        }
        let dir = movement::wish_dir(mov, yaw);
        if dir == Vec2::ZERO {
            return false;
        }
        // Additive, vertical untouched.
        pawn.vel_h += dir * cfg.boost;
        self.phase = Phase::Active;
        self.active_t = cfg.duration;
        self.pending_ground = !grounded;
        true
    }

    /// Advance timers. Runs every tick regardless of phase.
    pub fn tick(&mut self, cfg: &DashCfg, grounded: bool, dt: f32) {
        if grounded {
            self.pending_ground = false;
        }
        match self.phase {
            Phase::Active => {
                self.active_t -= dt;
                if self.active_t <= 0.0 {
                    // Boosted velocity is kept; only the phase moves on.
                    self.active_t = 0.0;
                    self.phase = Phase::Cooldown;
                    self.cooldown_t = cfg.cooldown;
                }
            }
            Phase::Cooldown => {
                if !self.pending_ground {
                    self.cooldown_t -= dt;
                    if self.cooldown_t <= 0.0 {
                        self.cooldown_t = 0.0;
                        self.phase = Phase::Idle;
                    }
                }
            }
            Phase::Idle => {}
        }
    }

    /// Preemption/death path: same exit as normal completion.
    pub fn cancel(&mut self, cfg: &DashCfg) {
        if self.phase == Phase::Active {
            self.active_t = 0.0;
            self.phase = Phase::Cooldown;
            self.cooldown_t = cfg.cooldown;
        }
    }
}
