//! Tag-mode overlay: the damage pipeline transfers a flag instead of
//! depleting health.
//!
//! Rules:
//! - only a tagged attacker transfers the flag; the transfer atomically
//!   clears the attacker and sets the victim in one authoritative step
//! - an untagged attacker hitting a tagged victim shaves one banked second
//!   off the victim's score, floored at zero, with no transfer
//! - the current holder accrues one second of `time_tagged` per second

use crate::ServerState;
use crate::events::GameEvent;
use crate::player::PlayerId;

/// Damage interception, called before any health mutation (the
/// out-of-bounds sentinel never routes here).
pub(crate) fn intercept(srv: &mut ServerState, attacker: PlayerId, target: PlayerId) {
    if attacker == target {
        return;
    }
    let Some(atk_tagged) = srv.players.get(attacker).map(|a| a.tagged) else {
        return;
    };
    let Some((victim_alive, victim_tagged)) =
        srv.players.get(target).map(|v| (v.alive(), v.tagged))
    else {
        return;
    };
    if !victim_alive {
        return;
    }
    if atk_tagged {
        if victim_tagged {
            // Already transferring; re-hits are no-ops.
            return;
        }
        // Atomic within the authoritative step: clear and set together.
        if let Some(v) = srv.players.get_mut(target) {
            v.tagged = true;
        }
        if let Some(a) = srv.players.get_mut(attacker) {
            a.tagged = false;
        }
        srv.events.push(GameEvent::TagTransferred {
            from: attacker,
            to: target,
        });
    } else if victim_tagged
        && let Some(v) = srv.players.get_mut(target)
    {
        v.time_tagged_s = (v.time_tagged_s - 1.0).max(0.0);
    }
}

/// Score accrual for the current flag holder.
pub(crate) fn accrue(srv: &mut ServerState, dt: f32) {
    if !srv.mode.tag_mode {
        return;
    }
    for p in srv.players.iter_mut() {
        if p.alive() && p.tagged {
            p.time_tagged_s += dt;
        }
    }
}
