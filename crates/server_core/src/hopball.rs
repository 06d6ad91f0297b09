//! Hopball: the carryable objective with server-arbitrated ownership.
//!
//! Equip is two-phase: clients show optimistic visuals and send a request;
//! the authority validates and broadcasts. Losing requests are silently
//! ignored; the loser's visual rolls back when the authoritative carry
//! state replicates. Drops use the holder's *visual* carry transform so
//! observers see no teleport; the forced drop on death uses the logical
//! position since no client visual exists here.

use crate::ServerState;
use crate::events::GameEvent;
use crate::player::PlayerId;
use glam::Vec3;
use net_core::replicated::ReplicatedValue;
use net_core::snapshot::HopballMsg;

/// A pickup request from farther away than this is stale and ignored.
const PICKUP_RADIUS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarryState {
    Dropped { pos: Vec3, yaw: f32 },
    Equipped { holder: PlayerId },
}

/// Carry state behind one replicated field: at most one holder, writes
/// observable by everyone in per-field order.
#[derive(Debug, Clone, Copy)]
pub struct Hopball {
    state: ReplicatedValue<CarryState>,
}

impl Hopball {
    pub fn new(pos: Vec3) -> Self {
        let mut state = ReplicatedValue::new(CarryState::Dropped { pos, yaw: 0.0 });
        // The rest pose goes out with the first snapshot.
        state.mark_dirty();
        Self { state }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> CarryState {
        self.state.get()
    }

    #[inline]
    #[must_use]
    pub fn holder(&self) -> Option<PlayerId> {
        match self.state.get() {
            CarryState::Equipped { holder } => Some(holder),
            CarryState::Dropped { .. } => None,
        }
    }

    /// Wire record for a pending carry-state change, if any.
    pub(crate) fn take_snapshot(&mut self) -> Option<HopballMsg> {
        self.state.take_change().map(|(seq, state)| {
            let (holder, pos, yaw) = match state {
                CarryState::Equipped { holder } => (holder.0, [0.0; 3], 0.0),
                CarryState::Dropped { pos, yaw } => (0, pos.to_array(), yaw),
            };
            HopballMsg {
                seq,
                holder,
                pos,
                yaw,
            }
        })
    }
}

/// Authority side of the pickup request. First valid request wins; every
/// later request this tick sees `Equipped` and falls through silently.
pub(crate) fn request_pickup(srv: &mut ServerState, who: PlayerId, _claimed_pos: Vec3) {
    let Some(ball) = srv.hopball.as_ref() else {
        return;
    };
    let CarryState::Dropped { pos, .. } = ball.state() else {
        return;
    };
    let Some(p) = srv.players.get(who) else {
        return;
    };
    if !p.alive() || (p.pawn.pos - pos).length() > PICKUP_RADIUS {
        return;
    }
    if let Some(ball) = srv.hopball.as_mut() {
        ball.state.set(CarryState::Equipped { holder: who });
    }
    if let Some(p) = srv.players.get_mut(who) {
        p.carrying = true;
    }
    srv.events.push(GameEvent::HopballEquipped { holder: who });
}

/// Authority side of the drop request. Position/rotation come from the
/// holder's visual carry transform; the impulse happens client-side only
/// after this confirmation replicates.
pub(crate) fn request_drop(srv: &mut ServerState, who: PlayerId, visual_pos: Vec3, yaw: f32) {
    let Some(ball) = srv.hopball.as_ref() else {
        return;
    };
    if ball.holder() != Some(who) {
        return;
    }
    drop_at(srv, who, visual_pos, yaw);
}

/// Death path: bypasses the request validation (the authority already
/// decided) and places the ball at the holder's logical position.
pub(crate) fn forced_drop(srv: &mut ServerState, who: PlayerId) {
    let holder = srv.hopball.as_ref().and_then(Hopball::holder);
    if holder != Some(who) {
        return;
    }
    let pos = srv
        .players
        .get(who)
        .map_or(Vec3::ZERO, |p| p.pawn.pos + Vec3::new(0.0, 0.5, 0.0));
    let yaw = srv.players.get(who).map_or(0.0, |p| p.pawn.yaw);
    drop_at(srv, who, pos, yaw);
}

fn drop_at(srv: &mut ServerState, who: PlayerId, pos: Vec3, yaw: f32) {
    if let Some(ball) = srv.hopball.as_mut() {
        ball.state.set(CarryState::Dropped { pos, yaw });
    }
    if let Some(p) = srv.players.get_mut(who) {
        p.carrying = false;
    }
    srv.events.push(GameEvent::HopballDropped { pos, yaw });
}
