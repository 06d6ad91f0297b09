//! Client replication buffer.
//!
//! Buffers incoming framed snapshot messages and applies them with
//! per-field ordering: each player record and the hopball carry state carry
//! their own sequence, and stale deliveries drop silently. Cross-field
//! atomicity is deliberately not promised: a kill-feed entry may land a
//! frame before or after the victim's dead flag, and readers tolerate it.

use net_core::frame;
use net_core::replicated::ReplicaSlot;
use net_core::snapshot::{
    HopballMsg, KillFeedMsg, PlayerStateMsg, SnapshotDecode, TAG_HOPBALL, TAG_KILL_FEED,
    TAG_PLAYER_STATE,
};
use std::collections::HashMap;

#[derive(Default)]
pub struct ReplicationBuffer {
    players: HashMap<u32, ReplicaSlot<PlayerStateMsg>>,
    pub hopball: ReplicaSlot<HopballMsg>,
    /// Kill feed entries since the last drain.
    kill_feed: Vec<KillFeedMsg>,
}

impl ReplicationBuffer {
    /// Apply a buffer of back-to-back frames. Returns how many messages
    /// changed local state; undecodable bytes are skipped, not fatal.
    pub fn apply_frames(&mut self, bytes: &[u8]) -> usize {
        let Ok(msgs) = frame::split_msgs(bytes) else {
            return 0;
        };
        msgs.into_iter()
            .filter(|payload| self.apply_message(payload))
            .count()
    }

    /// Apply a single unframed message. Returns whether anything changed.
    pub fn apply_message(&mut self, payload: &[u8]) -> bool {
        match payload.first() {
            Some(&TAG_PLAYER_STATE) => {
                let mut slice = payload;
                let Ok(msg) = PlayerStateMsg::decode(&mut slice) else {
                    return false;
                };
                self.players
                    .entry(msg.id)
                    .or_default()
                    .apply(msg.seq, msg)
            }
            Some(&TAG_HOPBALL) => {
                let mut slice = payload;
                let Ok(msg) = HopballMsg::decode(&mut slice) else {
                    return false;
                };
                self.hopball.apply(msg.seq, msg)
            }
            Some(&TAG_KILL_FEED) => {
                let mut slice = payload;
                let Ok(msg) = KillFeedMsg::decode(&mut slice) else {
                    return false;
                };
                self.kill_feed.push(msg);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn player(&self, id: u32) -> Option<PlayerStateMsg> {
        self.players.get(&id).and_then(ReplicaSlot::get)
    }

    pub fn players(&self) -> impl Iterator<Item = PlayerStateMsg> + '_ {
        self.players.values().filter_map(ReplicaSlot::get)
    }

    /// Drain kill feed entries accumulated since the last call.
    pub fn drain_kill_feed(&mut self) -> Vec<KillFeedMsg> {
        std::mem::take(&mut self.kill_feed)
    }
}
