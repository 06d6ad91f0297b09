//! Outbound gameplay events drained once per tick by the embedding
//! presentation layer (animation, camera, kill feed, scoreboard, audio).
//!
//! Absence of an event is the only signal of a rejected request.

use crate::player::{BodyPart, PlayerId};
use glam::Vec3;
use sim_core::abilities::{AbilityKind, Phase};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    VelocityChanged {
        id: PlayerId,
        vel: Vec3,
    },
    CrouchChanged {
        id: PlayerId,
        crouching: bool,
    },
    AbilityChanged {
        id: PlayerId,
        which: AbilityKind,
        phase: Phase,
    },
    DamageApplied {
        target: PlayerId,
        amount: f32,
        point: Vec3,
        dir: Vec3,
    },
    PlayerDied {
        id: PlayerId,
        hit_point: Vec3,
        hit_dir: Vec3,
        body_part: BodyPart,
    },
    PlayerRespawned {
        id: PlayerId,
        pos: Vec3,
        yaw: f32,
    },
    KillCredited {
        killer: Option<PlayerId>,
        victim: PlayerId,
        assists: Vec<PlayerId>,
    },
    TagTransferred {
        from: PlayerId,
        to: PlayerId,
    },
    HopballEquipped {
        holder: PlayerId,
    },
    HopballDropped {
        pos: Vec3,
        yaw: f32,
    },
}
