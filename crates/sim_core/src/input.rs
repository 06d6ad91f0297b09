//! Input sample consumed by the simulation step.

use glam::{Vec2, Vec3};

/// One tick of resolved input for the owning player.
///
/// `jump`, `dash`, and `grapple` are rising edges (true for the single tick
/// the button went down); `swing` is the held state, since releasing the
/// rope is what ends a swing. Both sides must run the same edge detection
/// ([`Edge`]) or prediction diverges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Movement intent in the player's local frame, components in [-1, 1].
    pub mov: Vec2,
    /// Unit aim direction for grapple/swing anchor raycasts.
    pub look: Vec3,
    pub sprint: bool,
    pub crouch: bool,
    pub jump: bool,
    pub dash: bool,
    pub grapple: bool,
    pub swing: bool,
}

/// Rising-edge detector for a single button.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edge {
    prev: bool,
}

impl Edge {
    /// Feed the held state; returns true only on the tick it became held.
    pub fn rising(&mut self, held: bool) -> bool {
        let edge = held && !self.prev;
        self.prev = held;
        edge
    }
}

/// Edge detectors for the one-shot buttons of a single player.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeSet {
    pub jump: Edge,
    pub dash: Edge,
    pub grapple: Edge,
}

/// Resolve a wire input frame into a simulation sample.
///
/// The authority and the predicting owner both run this over the same frame
/// stream, so the derived edges stay in lockstep.
pub fn resolve_frame(edges: &mut EdgeSet, f: &net_core::command::InputFrame) -> InputSample {
    use net_core::command::{BTN_CROUCH, BTN_DASH, BTN_GRAPPLE, BTN_JUMP, BTN_SPRINT, BTN_SWING};
    InputSample {
        mov: Vec2::new(f.mov[0].clamp(-1.0, 1.0), f.mov[1].clamp(-1.0, 1.0)),
        look: Vec3::from_array(f.look),
        sprint: f.pressed(BTN_SPRINT),
        crouch: f.pressed(BTN_CROUCH),
        jump: edges.jump.rising(f.pressed(BTN_JUMP)),
        dash: edges.dash.rising(f.pressed(BTN_DASH)),
        grapple: edges.grapple.rising(f.pressed(BTN_GRAPPLE)),
        swing: f.pressed(BTN_SWING),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_fires_once_per_press() {
        let mut e = Edge::default();
        assert!(e.rising(true));
        assert!(!e.rising(true));
        assert!(!e.rising(false));
        assert!(e.rising(true));
    }
}
