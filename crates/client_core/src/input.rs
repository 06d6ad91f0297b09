//! Raw key/button state to wire input frames.
//!
//! Pure, testable mapping; the device binding layer that fills
//! `RawButtons` is an external collaborator.

use net_core::command::{
    BTN_CROUCH, BTN_DASH, BTN_GRAPPLE, BTN_JUMP, BTN_SPRINT, BTN_SWING, InputFrame,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawButtons {
    pub w: bool,
    pub s: bool,
    pub a: bool,
    pub d: bool,
    pub shift: bool,
    pub ctrl: bool,
    pub space: bool,
    pub dash: bool,
    pub grapple: bool,
    pub swing: bool,
}

/// Movement intent: x strafes right, y pushes forward; opposite keys cancel.
#[must_use]
pub fn move_axes(raw: RawButtons) -> [f32; 2] {
    let x = f32::from(i8::from(raw.d) - i8::from(raw.a));
    let y = f32::from(i8::from(raw.w) - i8::from(raw.s));
    [x, y]
}

/// Pack held buttons into the wire bit set.
#[must_use]
pub fn button_bits(raw: RawButtons) -> u8 {
    let mut bits = 0;
    if raw.shift {
        bits |= BTN_SPRINT;
    }
    if raw.ctrl {
        bits |= BTN_CROUCH;
    }
    if raw.space {
        bits |= BTN_JUMP;
    }
    if raw.dash {
        bits |= BTN_DASH;
    }
    if raw.grapple {
        bits |= BTN_GRAPPLE;
    }
    if raw.swing {
        bits |= BTN_SWING;
    }
    bits
}

/// Sequenced frame builder for the owning player.
#[derive(Debug, Default)]
pub struct FrameEncoder {
    next_seq: u32,
}

impl FrameEncoder {
    /// Build the next frame from raw state and the camera aim direction.
    pub fn frame(&mut self, raw: RawButtons, look: [f32; 3]) -> InputFrame {
        self.next_seq += 1;
        InputFrame {
            seq: self.next_seq,
            mov: move_axes(raw),
            look,
            buttons: button_bits(raw),
        }
    }
}
