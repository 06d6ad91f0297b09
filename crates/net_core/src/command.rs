//! Client->server commands (sequenced input and hopball requests).
//! Minimal binary encoding with a leading tag distinct from snapshots.
//!
//! Commands are requests: the authority may apply or silently ignore them.

use crate::snapshot::{SnapshotDecode, take, take_u8};

pub const TAG_CLIENT_CMD: u8 = 0xC1;

pub const BTN_SPRINT: u8 = 1 << 0;
pub const BTN_CROUCH: u8 = 1 << 1;
pub const BTN_JUMP: u8 = 1 << 2;
pub const BTN_DASH: u8 = 1 << 3;
pub const BTN_GRAPPLE: u8 = 1 << 4;
pub const BTN_SWING: u8 = 1 << 5;

/// One sampled input frame for the owning player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputFrame {
    pub seq: u32,
    /// Movement intent in the ground plane, components in [-1, 1].
    pub mov: [f32; 2],
    /// Unit aim direction for grapple/swing anchor raycasts.
    pub look: [f32; 3],
    pub buttons: u8,
}

impl InputFrame {
    #[inline]
    #[must_use]
    pub fn pressed(&self, btn: u8) -> bool {
        self.buttons & btn != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientCmd {
    Input(InputFrame),
    HopballPickup {
        pos: [f32; 3],
    },
    /// Drop request with the holder's visual carry transform and throw velocity.
    HopballDrop {
        pos: [f32; 3],
        yaw: f32,
        vel: [f32; 3],
    },
}

impl ClientCmd {
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_CLIENT_CMD);
        match self {
            ClientCmd::Input(f) => {
                out.push(0);
                out.extend_from_slice(&f.seq.to_le_bytes());
                for c in f.mov {
                    out.extend_from_slice(&c.to_le_bytes());
                }
                for c in f.look {
                    out.extend_from_slice(&c.to_le_bytes());
                }
                out.push(f.buttons);
            }
            ClientCmd::HopballPickup { pos } => {
                out.push(1);
                for c in pos {
                    out.extend_from_slice(&c.to_le_bytes());
                }
            }
            ClientCmd::HopballDrop { pos, yaw, vel } => {
                out.push(2);
                for c in pos {
                    out.extend_from_slice(&c.to_le_bytes());
                }
                out.extend_from_slice(&yaw.to_le_bytes());
                for c in vel {
                    out.extend_from_slice(&c.to_le_bytes());
                }
            }
        }
    }
}

impl SnapshotDecode for ClientCmd {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let tag = take_u8(inp)?;
        if tag != TAG_CLIENT_CMD {
            anyhow::bail!("not a client cmd tag");
        }
        let kind = take_u8(inp)?;
        match kind {
            0 => {
                let seq = u32::from_le_bytes(take::<4>(inp)?);
                let mut mov = [0.0f32; 2];
                for v in &mut mov {
                    *v = f32::from_le_bytes(take::<4>(inp)?);
                }
                let mut look = [0.0f32; 3];
                for v in &mut look {
                    *v = f32::from_le_bytes(take::<4>(inp)?);
                }
                let buttons = take_u8(inp)?;
                Ok(Self::Input(InputFrame {
                    seq,
                    mov,
                    look,
                    buttons,
                }))
            }
            1 => {
                let mut pos = [0.0f32; 3];
                for v in &mut pos {
                    *v = f32::from_le_bytes(take::<4>(inp)?);
                }
                Ok(Self::HopballPickup { pos })
            }
            2 => {
                let mut pos = [0.0f32; 3];
                for v in &mut pos {
                    *v = f32::from_le_bytes(take::<4>(inp)?);
                }
                let yaw = f32::from_le_bytes(take::<4>(inp)?);
                let mut vel = [0.0f32; 3];
                for v in &mut vel {
                    *v = f32::from_le_bytes(take::<4>(inp)?);
                }
                Ok(Self::HopballDrop { pos, yaw, vel })
            }
            k => anyhow::bail!("unknown client cmd kind: {k}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_roundtrip() {
        let cmd = ClientCmd::Input(InputFrame {
            seq: 11,
            mov: [0.5, -1.0],
            look: [0.0, 0.2, 0.98],
            buttons: BTN_SPRINT | BTN_JUMP,
        });
        let mut buf = Vec::new();
        cmd.encode(&mut buf);
        let mut slice: &[u8] = &buf;
        assert_eq!(ClientCmd::decode(&mut slice).expect("decode"), cmd);
    }

    #[test]
    fn hopball_drop_roundtrip() {
        let cmd = ClientCmd::HopballDrop {
            pos: [3.0, 1.2, -4.0],
            yaw: 1.1,
            vel: [2.0, 1.0, 0.0],
        };
        let mut buf = Vec::new();
        cmd.encode(&mut buf);
        let mut slice: &[u8] = &buf;
        assert_eq!(ClientCmd::decode(&mut slice).expect("decode"), cmd);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let buf = [TAG_CLIENT_CMD, 9];
        let mut slice: &[u8] = &buf;
        assert!(ClientCmd::decode(&mut slice).is_err());
    }
}
