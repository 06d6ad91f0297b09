//! Authoritative health: damage, death, kill/assist credit, respawn, regen.
//!
//! All mutation lives on `ServerState`; observers only see replicated
//! values. Gameplay faults (hitting a dead player, an unknown id) are
//! normal outcomes and absorb silently as unchanged state.

use crate::ServerState;
use crate::events::GameEvent;
use crate::player::{BodyPart, PlayerId, WORLD_ATTACKER};
use glam::Vec3;
use net_core::snapshot::KillFeedMsg;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct AssistEntry {
    damage: f32,
    last_hit_s: f32,
}

/// Per-victim damage buckets for assist credit.
#[derive(Default)]
pub struct AssistTracker {
    buckets: HashMap<(PlayerId, PlayerId), AssistEntry>,
}

impl AssistTracker {
    pub fn record(&mut self, victim: PlayerId, attacker: PlayerId, amount: f32, now_s: f32) {
        let e = self
            .buckets
            .entry((victim, attacker))
            .or_insert(AssistEntry {
                damage: 0.0,
                last_hit_s: now_s,
            });
        e.damage += amount;
        e.last_hit_s = now_s;
    }

    /// Attackers other than the killer whose bucket is fresh enough and big
    /// enough. Clears every bucket for the victim.
    pub fn credit(
        &mut self,
        victim: PlayerId,
        killer: Option<PlayerId>,
        now_s: f32,
        window_s: f32,
        min_damage: f32,
    ) -> Vec<PlayerId> {
        let mut out = Vec::new();
        for ((v, attacker), e) in &self.buckets {
            if *v != victim || Some(*attacker) == killer {
                continue;
            }
            if now_s - e.last_hit_s <= window_s && e.damage >= min_damage {
                out.push(*attacker);
            }
        }
        self.buckets.retain(|(v, _), _| *v != victim);
        out.sort_by_key(|p| p.0);
        out
    }

    /// Drop buckets that aged out of the window.
    pub fn expire(&mut self, now_s: f32, window_s: f32) {
        self.buckets
            .retain(|_, e| now_s - e.last_hit_s <= window_s);
    }

    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

impl ServerState {
    /// Apply damage to `target`. Returns whether this call killed.
    ///
    /// No-ops when the target is unknown or already dead. Out-of-bounds
    /// damage (`WORLD_ATTACKER`) always kills and bypasses the tag-mode
    /// interception. In tag mode, regular damage never reaches health.
    pub fn apply_damage(
        &mut self,
        target: PlayerId,
        attacker: PlayerId,
        amount: f32,
        hit_point: Vec3,
        hit_dir: Vec3,
        body_part: BodyPart,
    ) -> bool {
        let Some(p) = self.players.get(target) else {
            return false;
        };
        if p.dead {
            return false;
        }
        let oob = attacker == WORLD_ATTACKER;
        if !oob {
            // Friendly fire gate in team modes.
            if self.mode.team_based && !self.mode.friendly_fire && attacker != target {
                let same_team = self
                    .players
                    .get(attacker)
                    .map(|a| a.team == p.team)
                    .unwrap_or(false);
                if same_team {
                    return false;
                }
            }
            if self.mode.tag_mode {
                crate::tag::intercept(self, attacker, target);
                return false;
            }
        }
        let amount = amount.max(0.0);
        let Some(p) = self.players.get_mut(target) else {
            return false;
        };
        p.health = if oob {
            0.0
        } else {
            (p.health - amount).clamp(0.0, self.combat_cfg.max_health)
        };
        p.since_damage_s = 0.0;
        self.events.push(GameEvent::DamageApplied {
            target,
            amount,
            point: hit_point,
            dir: hit_dir,
        });
        if !oob && attacker != target {
            self.assists.record(target, attacker, amount, self.time_s);
        }
        let lethal = self.players.get(target).map(|p| p.health <= 0.0) == Some(true);
        if lethal {
            let killer = if oob || attacker == target {
                None
            } else {
                Some(attacker)
            };
            self.kill(target, killer, hit_point, hit_dir, body_part);
        }
        lethal
    }

    /// The one-shot death transition. Idempotent: a second zero-health
    /// event on an already-dead player changes nothing.
    fn kill(
        &mut self,
        victim: PlayerId,
        killer: Option<PlayerId>,
        hit_point: Vec3,
        hit_dir: Vec3,
        body_part: BodyPart,
    ) {
        let respawn_delay = self.combat_cfg.respawn_delay;
        {
            let Some(p) = self.players.get_mut(victim) else {
                return;
            };
            if p.dead {
                return;
            }
            p.dead = true;
            p.health = 0.0;
            p.deaths += 1;
            p.respawn_t = respawn_delay;
            p.tagged = false;
        }
        // Abilities must resolve before the pawn goes inert.
        let abilities_cfg = self.abilities_cfg;
        if let Some(p) = self.players.get_mut(victim) {
            let mut pawn = p.pawn;
            p.abilities.cancel_active(&abilities_cfg, &mut pawn);
            p.pawn = pawn;
        }
        crate::hopball::forced_drop(self, victim);
        if let Some(k) = killer
            && let Some(kp) = self.players.get_mut(k)
        {
            kp.kills += 1;
        }
        let assists = self.assists.credit(
            victim,
            killer,
            self.time_s,
            self.combat_cfg.assist_window,
            self.combat_cfg.assist_min_damage,
        );
        for a in &assists {
            if let Some(ap) = self.players.get_mut(*a) {
                ap.assists += 1;
            }
        }
        // Synchronous reservation: a same-tick second death sees this one.
        let reservation = self.spawns.reserve(victim);
        if reservation.is_none() {
            log::warn!("no free spawn point for {victim:?}; will respawn in place");
        }
        if let Some(p) = self.players.get_mut(victim) {
            p.reservation = reservation;
        }
        self.events.push(GameEvent::PlayerDied {
            id: victim,
            hit_point,
            hit_dir,
            body_part,
        });
        self.events.push(GameEvent::KillCredited {
            killer,
            victim,
            assists: assists.clone(),
        });
        self.pending_kill_feed.push(KillFeedMsg {
            killer: killer.map_or(0, |k| k.0),
            victim: victim.0,
            hit_point: hit_point.to_array(),
            hit_dir: hit_dir.to_array(),
            body_part: body_part.code(),
            assists: assists.iter().map(|a| a.0).collect(),
        });
    }
}

/// Respawn countdowns. Placement resets the pawn at the reserved point and
/// only then releases the reservation.
pub(crate) fn respawn_players(srv: &mut ServerState, dt: f32) {
    let max_health = srv.combat_cfg.max_health;
    for id in srv.players.ids() {
        let Some(p) = srv.players.get_mut(id) else {
            continue;
        };
        if !p.dead {
            continue;
        }
        p.respawn_t -= dt;
        if p.respawn_t > 0.0 {
            continue;
        }
        let reservation = p.reservation;
        let point = reservation.and_then(|r| srv.spawns.get(r)).copied();
        let Some(p) = srv.players.get_mut(id) else {
            continue;
        };
        let (pos, yaw) = point.map_or((p.pawn.pos, p.pawn.yaw), |sp| (sp.pos, sp.yaw));
        p.pawn = sim_core::Pawn::new(pos);
        p.pawn.yaw = yaw;
        p.pawn.grounded = true;
        p.health = max_health;
        p.dead = false;
        p.respawn_t = 0.0;
        p.since_damage_s = f32::MAX;
        // Placed; the point can be handed out again.
        if let Some(r) = reservation {
            srv.spawns.release(r);
        }
        if let Some(p) = srv.players.get_mut(id) {
            p.reservation = None;
        }
        srv.events.push(GameEvent::PlayerRespawned { id, pos, yaw });
    }
}

/// Continuous regeneration after the no-damage grace period.
pub(crate) fn regen_health(srv: &mut ServerState, dt: f32) {
    let cfg = srv.combat_cfg;
    for p in srv.players.iter_mut() {
        if p.dead {
            continue;
        }
        if p.since_damage_s < f32::MAX {
            p.since_damage_s += dt;
        }
        if p.since_damage_s >= cfg.regen_delay && p.health < cfg.max_health {
            p.health = (p.health + cfg.regen_rate * dt).min(cfg.max_health);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assist_window_boundary_is_inclusive() {
        let mut t = AssistTracker::default();
        let (victim, a) = (PlayerId(1), PlayerId(2));
        t.record(victim, a, 25.0, 0.0);
        let got = t.credit(victim, Some(PlayerId(3)), 9.9, 10.0, 10.0);
        assert_eq!(got, vec![a]);

        t.record(victim, a, 25.0, 0.0);
        let got = t.credit(victim, Some(PlayerId(3)), 10.1, 10.0, 10.0);
        assert!(got.is_empty(), "past the window, no assist");
    }

    #[test]
    fn killer_never_earns_an_assist_and_buckets_clear() {
        let mut t = AssistTracker::default();
        let victim = PlayerId(1);
        t.record(victim, PlayerId(2), 50.0, 1.0);
        t.record(victim, PlayerId(3), 15.0, 2.0);
        let got = t.credit(victim, Some(PlayerId(2)), 3.0, 10.0, 10.0);
        assert_eq!(got, vec![PlayerId(3)]);
        assert_eq!(t.bucket_count(), 0, "credit clears the victim's buckets");
    }

    #[test]
    fn below_threshold_damage_earns_nothing() {
        let mut t = AssistTracker::default();
        let victim = PlayerId(1);
        t.record(victim, PlayerId(2), 5.0, 0.0);
        let got = t.credit(victim, Some(PlayerId(3)), 1.0, 10.0, 10.0);
        assert!(got.is_empty());
    }
}
