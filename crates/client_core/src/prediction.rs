//! Owner-side prediction with server reconciliation.
//!
//! The client applies its own input through the shared `sim_core` step the
//! moment it is sampled, keeps every unacknowledged frame's resolved
//! sample, and on each authoritative snapshot rewinds to the server state
//! and replays the pending tail. Ability *timers* are client-local
//! approximations (the wire carries only coarse phases); the replicated
//! phases win whenever presentation disagrees.

use data_runtime::configs::abilities::AbilitiesCfg;
use data_runtime::configs::movement::MovementCfg;
use glam::{Vec2, Vec3};
use net_core::command::{ClientCmd, InputFrame};
use net_core::snapshot::{FLAG_CROUCHING, FLAG_GROUNDED, PlayerStateMsg};
use sim_core::input::{EdgeSet, InputSample, resolve_frame};
use sim_core::step::SimCfg;
use sim_core::{Abilities, CollisionQuery, Pawn, simulate};
use std::collections::VecDeque;

struct PendingInput {
    seq: u32,
    sample: InputSample,
    dt: f32,
}

pub struct Predictor {
    pub pawn: Pawn,
    pub abilities: Abilities,
    movement_cfg: MovementCfg,
    abilities_cfg: AbilitiesCfg,
    edges: EdgeSet,
    pending: VecDeque<PendingInput>,
}

impl Predictor {
    #[must_use]
    pub fn new(spawn_pos: Vec3, movement_cfg: MovementCfg, abilities_cfg: AbilitiesCfg) -> Self {
        Self {
            pawn: Pawn::new(spawn_pos),
            abilities: Abilities::default(),
            movement_cfg,
            abilities_cfg,
            edges: EdgeSet::default(),
            pending: VecDeque::new(),
        }
    }

    /// Apply one sampled frame locally and return the command to send.
    pub fn predict(&mut self, frame: InputFrame, world: &dyn CollisionQuery, dt: f32) -> ClientCmd {
        let sample = resolve_frame(&mut self.edges, &frame);
        let cfg = SimCfg {
            movement: &self.movement_cfg,
            abilities: &self.abilities_cfg,
        };
        simulate(&mut self.pawn, &mut self.abilities, &sample, &cfg, world, dt);
        self.pending.push_back(PendingInput {
            seq: frame.seq,
            sample,
            dt,
        });
        ClientCmd::Input(frame)
    }

    /// Adopt an authoritative snapshot for the owned player and replay the
    /// unacknowledged tail. Returns how far the prediction had drifted.
    pub fn reconcile(&mut self, msg: &PlayerStateMsg, world: &dyn CollisionQuery) -> f32 {
        while self
            .pending
            .front()
            .is_some_and(|p| p.seq <= msg.ack_input)
        {
            self.pending.pop_front();
        }
        let predicted_pos = self.pawn.pos;
        self.pawn.pos = Vec3::from_array(msg.pos);
        self.pawn.vel_h = Vec2::from_array(msg.vel_h);
        self.pawn.vel_v = msg.vel_v;
        self.pawn.yaw = msg.yaw;
        self.pawn.grounded = msg.flags & FLAG_GROUNDED != 0;
        self.pawn.crouching = msg.flags & FLAG_CROUCHING != 0;
        let cfg = SimCfg {
            movement: &self.movement_cfg,
            abilities: &self.abilities_cfg,
        };
        for p in &self.pending {
            simulate(&mut self.pawn, &mut self.abilities, &p.sample, &cfg, world, p.dt);
        }
        (self.pawn.pos - predicted_pos).length()
    }

    #[inline]
    #[must_use]
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use net_core::command::BTN_SPRINT;
    use net_core::snapshot::FLAG_GROUNDED;
    use sim_core::StaticWorld;

    fn frame(seq: u32, mov: [f32; 2], buttons: u8) -> InputFrame {
        InputFrame {
            seq,
            mov,
            look: [0.0, 0.0, 1.0],
            buttons,
        }
    }

    fn snapshot_of(pawn: &Pawn, ack: u32) -> PlayerStateMsg {
        PlayerStateMsg {
            id: 1,
            seq: ack,
            ack_input: ack,
            pos: pawn.pos.to_array(),
            vel_h: pawn.vel_h.to_array(),
            vel_v: pawn.vel_v,
            yaw: pawn.yaw,
            health: 100.0,
            flags: FLAG_GROUNDED,
            phases: [0; 4],
            kills: 0,
            deaths: 0,
            assists: 0,
            time_tagged: 0,
        }
    }

    #[test]
    fn ack_trims_the_pending_buffer() {
        let world = StaticWorld::flat();
        let mut pred = Predictor::new(Vec3::ZERO, MovementCfg::default(), AbilitiesCfg::default());
        pred.pawn.grounded = true;
        for seq in 1..=5 {
            let _ = pred.predict(frame(seq, [0.0, 1.0], BTN_SPRINT), &world, 1.0 / 60.0);
        }
        assert_eq!(pred.pending_inputs(), 5);
        let snap = snapshot_of(&pred.pawn.clone(), 3);
        pred.reconcile(&snap, &world);
        assert_eq!(pred.pending_inputs(), 2);
    }

    #[test]
    fn matching_server_state_replays_to_zero_drift() {
        // A mirrored simulation acknowledging every frame reproduces the
        // client's prediction exactly: same code, same inputs.
        let world = StaticWorld::flat();
        let mut pred = Predictor::new(Vec3::ZERO, MovementCfg::default(), AbilitiesCfg::default());
        pred.pawn.grounded = true;

        let mut mirror_pawn = Pawn::new(Vec3::ZERO);
        mirror_pawn.grounded = true;
        let mut mirror_ab = Abilities::default();
        let mut mirror_edges = EdgeSet::default();
        let mv = MovementCfg::default();
        let ac = AbilitiesCfg::default();

        for seq in 1..=20 {
            let f = frame(seq, [0.0, 1.0], BTN_SPRINT);
            let _ = pred.predict(f, &world, 1.0 / 60.0);
            let sample = resolve_frame(&mut mirror_edges, &f);
            let cfg = SimCfg {
                movement: &mv,
                abilities: &ac,
            };
            simulate(&mut mirror_pawn, &mut mirror_ab, &sample, &cfg, &world, 1.0 / 60.0);
            let drift = pred.reconcile(&snapshot_of(&mirror_pawn, seq), &world);
            assert!(drift < 1e-4, "prediction and authority must agree");
        }
    }
}
