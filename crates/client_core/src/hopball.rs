//! Client half of the hopball two-phase equip protocol.
//!
//! A pickup shows the local carry visual immediately (owner prediction) and
//! sends the request; the authority's carry snapshot is the truth that
//! either confirms it or rolls it back. Drops send the *visual* carry
//! transform so the authoritative rest position matches what everyone was
//! already seeing; the physics impulse is enabled only after confirmation.

use net_core::command::ClientCmd;
use net_core::snapshot::HopballMsg;

/// What the carry-visual presentation should show this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarryVisual {
    Dropped { pos: [f32; 3], yaw: f32 },
    /// Held by the local player. `confirmed` distinguishes the optimistic
    /// window from the authoritative state (holder vs. observer treatments
    /// differ, and an unconfirmed visual must not enable physics).
    HeldByMe { confirmed: bool },
    HeldByOther { holder: u32 },
}

pub struct HopballClient {
    my_id: u32,
    optimistic: bool,
    last: Option<HopballMsg>,
}

impl HopballClient {
    #[must_use]
    pub fn new(my_id: u32) -> Self {
        Self {
            my_id,
            optimistic: false,
            last: None,
        }
    }

    /// Optimistically equip and build the request command.
    pub fn request_pickup(&mut self, ball_pos: [f32; 3]) -> ClientCmd {
        self.optimistic = true;
        ClientCmd::HopballPickup { pos: ball_pos }
    }

    /// Build a drop request from the current visual carry transform.
    pub fn request_drop(&mut self, visual_pos: [f32; 3], yaw: f32, vel: [f32; 3]) -> ClientCmd {
        // The local visual ends now; the authority confirms the rest pose.
        self.optimistic = false;
        ClientCmd::HopballDrop {
            pos: visual_pos,
            yaw,
            vel,
        }
    }

    /// Feed the latest authoritative carry state. A snapshot that shows
    /// someone else holding (or the ball still down) rolls the optimistic
    /// visual back; the losing request is never retried.
    pub fn on_replicated(&mut self, msg: HopballMsg) {
        if self.optimistic && msg.holder != 0 {
            self.optimistic = false;
        }
        if self.optimistic && self.last.is_some_and(|prev| prev.seq < msg.seq) {
            // The authority spoke after our request and we are not holding.
            self.optimistic = false;
        }
        self.last = Some(msg);
    }

    /// Current presentation state.
    #[must_use]
    pub fn visual(&self) -> Option<CarryVisual> {
        if let Some(msg) = self.last {
            if msg.holder == self.my_id {
                return Some(CarryVisual::HeldByMe { confirmed: true });
            }
            if msg.holder != 0 {
                return Some(CarryVisual::HeldByOther { holder: msg.holder });
            }
        }
        if self.optimistic {
            return Some(CarryVisual::HeldByMe { confirmed: false });
        }
        self.last.map(|msg| CarryVisual::Dropped {
            pos: msg.pos,
            yaw: msg.yaw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(seq: u32) -> HopballMsg {
        HopballMsg {
            seq,
            holder: 0,
            pos: [1.0, 0.5, 0.0],
            yaw: 0.0,
        }
    }

    fn held_by(seq: u32, holder: u32) -> HopballMsg {
        HopballMsg {
            seq,
            holder,
            pos: [0.0; 3],
            yaw: 0.0,
        }
    }

    #[test]
    fn optimistic_visual_confirms_on_equip() {
        let mut hb = HopballClient::new(7);
        hb.on_replicated(dropped(1));
        let _ = hb.request_pickup([1.0, 0.5, 0.0]);
        assert_eq!(hb.visual(), Some(CarryVisual::HeldByMe { confirmed: false }));
        hb.on_replicated(held_by(2, 7));
        assert_eq!(hb.visual(), Some(CarryVisual::HeldByMe { confirmed: true }));
    }

    #[test]
    fn losing_request_rolls_back_to_the_winner() {
        let mut hb = HopballClient::new(7);
        hb.on_replicated(dropped(1));
        let _ = hb.request_pickup([1.0, 0.5, 0.0]);
        hb.on_replicated(held_by(2, 9));
        assert_eq!(hb.visual(), Some(CarryVisual::HeldByOther { holder: 9 }));
    }

    #[test]
    fn authoritative_silence_after_request_rolls_back() {
        let mut hb = HopballClient::new(7);
        hb.on_replicated(dropped(3));
        let _ = hb.request_pickup([1.0, 0.5, 0.0]);
        // A newer dropped snapshot means the authority ignored us.
        hb.on_replicated(dropped(4));
        assert_eq!(
            hb.visual(),
            Some(CarryVisual::Dropped {
                pos: [1.0, 0.5, 0.0],
                yaw: 0.0
            })
        );
    }
}
