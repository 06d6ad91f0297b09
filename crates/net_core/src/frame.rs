//! Versioned length framing for replication messages.
//!
//! Format (little-endian):
//! - u8 `FRAME_VERSION` (1)
//! - u32 LEN (bytes of payload)
//! - [u8; LEN] payload
//!
//! Multiplexed streams use this to delimit messages without peeking into
//! inner payloads; payloads carry their own leading tag byte.

const FRAME_VERSION: u8 = 1;
// Player/hopball/kill-feed records are tiny; anything near this is corrupt.
const MAX_FRAME_LEN: usize = 65_536;

/// Write a framed message into `out`, appending to any existing bytes.
pub fn write_msg(out: &mut Vec<u8>, payload: &[u8]) {
    out.push(FRAME_VERSION);
    let len = u32::try_from(payload.len()).unwrap_or(0);
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(payload);
}

/// Read a single framed message from the front of `inp`.
///
/// Returns the payload and the total bytes consumed, so callers can walk a
/// buffer holding several frames.
pub fn read_msg(inp: &[u8]) -> anyhow::Result<(&[u8], usize)> {
    use anyhow::bail;
    if inp.len() < 5 {
        bail!("short frame header");
    }
    let ver = inp[0];
    if ver != FRAME_VERSION {
        bail!("unsupported frame version: {ver}");
    }
    let mut lenb = [0u8; 4];
    lenb.copy_from_slice(&inp[1..5]);
    let len = u32::from_le_bytes(lenb) as usize;
    if len > MAX_FRAME_LEN {
        bail!("frame too large: {len} > {MAX_FRAME_LEN}");
    }
    if inp.len() < 5 + len {
        bail!("short frame payload");
    }
    Ok((&inp[5..5 + len], 5 + len))
}

/// Split a buffer of back-to-back frames into payload slices.
pub fn split_msgs(mut inp: &[u8]) -> anyhow::Result<Vec<&[u8]>> {
    let mut out = Vec::new();
    while !inp.is_empty() {
        let (payload, used) = read_msg(inp)?;
        out.push(payload);
        inp = &inp[used..];
    }
    Ok(out)
}
