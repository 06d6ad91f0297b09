//! Snapshot encode/decode traits and replicated state messages.
//!
//! Encoding is deliberately plain little-endian records behind a leading
//! tag byte; later phases can swap in deltas without breaking the traits.

/// Types implementing snapshot encoding write themselves into a byte buffer.
pub trait SnapshotEncode {
    fn encode(&self, out: &mut Vec<u8>);
}

/// Types implementing snapshot decoding reconstruct themselves from a byte slice.
pub trait SnapshotDecode: Sized {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self>;
}

/// Pop a fixed-size array off the front of the slice.
pub(crate) fn take<const N: usize>(inp: &mut &[u8]) -> anyhow::Result<[u8; N]> {
    if inp.len() < N {
        anyhow::bail!("short read");
    }
    let (a, b) = inp.split_at(N);
    *inp = b;
    let mut buf = [0u8; N];
    buf.copy_from_slice(a);
    Ok(buf)
}

pub(crate) fn take_u8(inp: &mut &[u8]) -> anyhow::Result<u8> {
    let b = inp
        .first()
        .copied()
        .ok_or_else(|| anyhow::anyhow!("short read"))?;
    *inp = &inp[1..];
    Ok(b)
}

pub const TAG_PLAYER_STATE: u8 = 0xA1;
pub const TAG_HOPBALL: u8 = 0xA2;
pub const TAG_KILL_FEED: u8 = 0xA3;

pub const FLAG_DEAD: u8 = 1 << 0;
pub const FLAG_CROUCHING: u8 = 1 << 1;
pub const FLAG_GROUNDED: u8 = 1 << 2;
pub const FLAG_TAGGED: u8 = 1 << 3;
pub const FLAG_CARRYING: u8 = 1 << 4;

/// Per-player authoritative state record.
///
/// `seq` orders records for one player id; `ack_input` echoes the last
/// input frame the authority applied so the owner can trim its prediction
/// buffer. Velocity stays decomposed on the wire exactly as simulated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStateMsg {
    pub id: u32,
    pub seq: u32,
    pub ack_input: u32,
    pub pos: [f32; 3],
    pub vel_h: [f32; 2],
    pub vel_v: f32,
    pub yaw: f32,
    pub health: f32,
    pub flags: u8,
    /// Ability phases in dash/grapple/swing/mantle order (0 idle, 1 active, 2 cooldown).
    pub phases: [u8; 4],
    pub kills: u16,
    pub deaths: u16,
    pub assists: u16,
    /// Whole seconds the player has held the tag flag (tag mode scoring).
    pub time_tagged: u32,
}

impl SnapshotEncode for PlayerStateMsg {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_PLAYER_STATE);
        out.extend_from_slice(&self.id.to_le_bytes());
        out.extend_from_slice(&self.seq.to_le_bytes());
        out.extend_from_slice(&self.ack_input.to_le_bytes());
        for c in self.pos {
            out.extend_from_slice(&c.to_le_bytes());
        }
        for c in self.vel_h {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.vel_v.to_le_bytes());
        out.extend_from_slice(&self.yaw.to_le_bytes());
        out.extend_from_slice(&self.health.to_le_bytes());
        out.push(self.flags);
        out.extend_from_slice(&self.phases);
        out.extend_from_slice(&self.kills.to_le_bytes());
        out.extend_from_slice(&self.deaths.to_le_bytes());
        out.extend_from_slice(&self.assists.to_le_bytes());
        out.extend_from_slice(&self.time_tagged.to_le_bytes());
    }
}

impl SnapshotDecode for PlayerStateMsg {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let tag = take_u8(inp)?;
        if tag != TAG_PLAYER_STATE {
            anyhow::bail!("not a player state tag");
        }
        let id = u32::from_le_bytes(take::<4>(inp)?);
        let seq = u32::from_le_bytes(take::<4>(inp)?);
        let ack_input = u32::from_le_bytes(take::<4>(inp)?);
        let mut pos = [0.0f32; 3];
        for v in &mut pos {
            *v = f32::from_le_bytes(take::<4>(inp)?);
        }
        let mut vel_h = [0.0f32; 2];
        for v in &mut vel_h {
            *v = f32::from_le_bytes(take::<4>(inp)?);
        }
        let vel_v = f32::from_le_bytes(take::<4>(inp)?);
        let yaw = f32::from_le_bytes(take::<4>(inp)?);
        let health = f32::from_le_bytes(take::<4>(inp)?);
        let flags = take_u8(inp)?;
        let phases = take::<4>(inp)?;
        let kills = u16::from_le_bytes(take::<2>(inp)?);
        let deaths = u16::from_le_bytes(take::<2>(inp)?);
        let assists = u16::from_le_bytes(take::<2>(inp)?);
        let time_tagged = u32::from_le_bytes(take::<4>(inp)?);
        Ok(Self {
            id,
            seq,
            ack_input,
            pos,
            vel_h,
            vel_v,
            yaw,
            health,
            flags,
            phases,
            kills,
            deaths,
            assists,
            time_tagged,
        })
    }
}

/// Hopball carry state. `holder == 0` means dropped at `pos`/`yaw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopballMsg {
    pub seq: u32,
    pub holder: u32,
    pub pos: [f32; 3],
    pub yaw: f32,
}

impl HopballMsg {
    #[inline]
    #[must_use]
    pub fn equipped(&self) -> bool {
        self.holder != 0
    }
}

impl SnapshotEncode for HopballMsg {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_HOPBALL);
        out.extend_from_slice(&self.seq.to_le_bytes());
        out.extend_from_slice(&self.holder.to_le_bytes());
        for c in self.pos {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.extend_from_slice(&self.yaw.to_le_bytes());
    }
}

impl SnapshotDecode for HopballMsg {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let tag = take_u8(inp)?;
        if tag != TAG_HOPBALL {
            anyhow::bail!("not a hopball tag");
        }
        let seq = u32::from_le_bytes(take::<4>(inp)?);
        let holder = u32::from_le_bytes(take::<4>(inp)?);
        let mut pos = [0.0f32; 3];
        for v in &mut pos {
            *v = f32::from_le_bytes(take::<4>(inp)?);
        }
        let yaw = f32::from_le_bytes(take::<4>(inp)?);
        Ok(Self {
            seq,
            holder,
            pos,
            yaw,
        })
    }
}

/// One kill-feed entry. The hit point/direction ride along for death
/// presentation; they may lag the dead flag by a frame and readers must
/// tolerate that (per-field ordering only).
#[derive(Debug, Clone, PartialEq)]
pub struct KillFeedMsg {
    pub killer: u32,
    pub victim: u32,
    pub hit_point: [f32; 3],
    pub hit_dir: [f32; 3],
    pub body_part: u8,
    pub assists: Vec<u32>,
}

impl SnapshotEncode for KillFeedMsg {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(TAG_KILL_FEED);
        out.extend_from_slice(&self.killer.to_le_bytes());
        out.extend_from_slice(&self.victim.to_le_bytes());
        for c in self.hit_point {
            out.extend_from_slice(&c.to_le_bytes());
        }
        for c in self.hit_dir {
            out.extend_from_slice(&c.to_le_bytes());
        }
        out.push(self.body_part);
        let n = u8::try_from(self.assists.len().min(255)).unwrap_or(255);
        out.push(n);
        for a in self.assists.iter().take(n as usize) {
            out.extend_from_slice(&a.to_le_bytes());
        }
    }
}

impl SnapshotDecode for KillFeedMsg {
    fn decode(inp: &mut &[u8]) -> anyhow::Result<Self> {
        let tag = take_u8(inp)?;
        if tag != TAG_KILL_FEED {
            anyhow::bail!("not a kill feed tag");
        }
        let killer = u32::from_le_bytes(take::<4>(inp)?);
        let victim = u32::from_le_bytes(take::<4>(inp)?);
        let mut hit_point = [0.0f32; 3];
        for v in &mut hit_point {
            *v = f32::from_le_bytes(take::<4>(inp)?);
        }
        let mut hit_dir = [0.0f32; 3];
        for v in &mut hit_dir {
            *v = f32::from_le_bytes(take::<4>(inp)?);
        }
        let body_part = take_u8(inp)?;
        let n = take_u8(inp)? as usize;
        let mut assists = Vec::with_capacity(n);
        for _ in 0..n {
            assists.push(u32::from_le_bytes(take::<4>(inp)?));
        }
        Ok(Self {
            killer,
            victim,
            hit_point,
            hit_dir,
            body_part,
            assists,
        })
    }
}
