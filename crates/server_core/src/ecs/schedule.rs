//! Ordered tick schedule over the player store, with per-tick event buses.
//!
//! One authoritative simulation step per network tick. Every delay in the
//! core (ability durations, cooldowns, respawns) is countdown state advanced
//! here, never a blocking wait, so one stalled player can never stall the
//! shared simulation.

use crate::ServerState;
use crate::events::GameEvent;
use crate::hopball::Hopball;
use crate::player::{BodyPart, PlayerId, WORLD_ATTACKER};
use glam::Vec3;
use net_core::command::ClientCmd;
use net_core::frame;
use net_core::snapshot::{PlayerStateMsg, SnapshotEncode};
use sim_core::abilities::AbilityKind;
use sim_core::input::resolve_frame;
use sim_core::step::SimCfg;
use sim_core::simulate;

/// Everything below this height is out of bounds.
const KILL_Y: f32 = -50.0;

/// Damage staged for this tick, applied in arrival order.
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: PlayerId,
    pub attacker: PlayerId,
    pub amount: f32,
    pub hit_point: Vec3,
    pub hit_dir: Vec3,
    pub body_part: BodyPart,
}

/// Per-tick scratch state.
#[derive(Default)]
pub struct Ctx {
    pub dt: f32,
    pub dmg: Vec<DamageEvent>,
}

impl Ctx {
    #[must_use]
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            dmg: Vec::new(),
        }
    }
}

pub struct Schedule;

impl Schedule {
    pub fn run(&mut self, srv: &mut ServerState, ctx: &mut Ctx) {
        ingest_commands(srv);
        simulate_players(srv, ctx.dt);
        world_kill_plane(srv, ctx);
        tag_accrue(srv, ctx.dt);
        apply_damage_events(srv, ctx);
        respawn_players(srv, ctx.dt);
        regen_health(srv, ctx.dt);
        expire_assists(srv);
        emit_snapshots(srv);
    }
}

/// Fixed system order, exposed so ordering is testable by name.
#[must_use]
pub fn system_names_for_test() -> &'static [&'static str] {
    &[
        "ingest_commands",
        "simulate_players",
        "world_kill_plane",
        "tag_accrue",
        "apply_damage_events",
        "respawn_players",
        "regen_health",
        "expire_assists",
        "emit_snapshots",
    ]
}

/// Decode queued client commands in arrival order. Input frames older than
/// the last applied sequence are dropped; requests route to their
/// authority-side handlers.
fn ingest_commands(srv: &mut ServerState) {
    let cmds = std::mem::take(&mut srv.pending_cmds);
    for (from, cmd) in cmds {
        match cmd {
            ClientCmd::Input(f) => {
                if let Some(p) = srv.players.get_mut(from) {
                    if f.seq <= p.last_input_seq && p.last_input_seq != 0 {
                        continue;
                    }
                    let sample = resolve_frame(&mut p.edges, &f);
                    p.input = sample;
                    p.last_input_seq = f.seq;
                }
            }
            ClientCmd::HopballPickup { pos } => {
                crate::hopball::request_pickup(srv, from, Vec3::from_array(pos));
            }
            ClientCmd::HopballDrop { pos, yaw, vel: _ } => {
                crate::hopball::request_drop(srv, from, Vec3::from_array(pos), yaw);
            }
        }
    }
}

/// Run the shared simulation step for every living player and emit the
/// presentation events for what changed.
fn simulate_players(srv: &mut ServerState, dt: f32) {
    let cfg = SimCfg {
        movement: &srv.movement_cfg,
        abilities: &srv.abilities_cfg,
    };
    let world: &dyn sim_core::CollisionQuery = &*srv.world;
    for p in srv.players.iter_mut() {
        if p.dead {
            continue;
        }
        let prev_phases = p.abilities.phases();
        let prev_crouch = p.pawn.crouching;
        let prev_vel = p.pawn.vel3();
        let input = p.input;
        simulate(&mut p.pawn, &mut p.abilities, &input, &cfg, world, dt);
        // One-shot edges are consumed by the step they were sampled for.
        p.input.jump = false;
        p.input.dash = false;
        p.input.grapple = false;

        let phases = p.abilities.phases();
        const KINDS: [AbilityKind; 4] = [
            AbilityKind::Dash,
            AbilityKind::Grapple,
            AbilityKind::Swing,
            AbilityKind::Mantle,
        ];
        for (i, kind) in KINDS.iter().enumerate() {
            if phases[i] != prev_phases[i] {
                srv.events.push(GameEvent::AbilityChanged {
                    id: p.id,
                    which: *kind,
                    phase: phases[i],
                });
            }
        }
        if p.pawn.crouching != prev_crouch {
            srv.events.push(GameEvent::CrouchChanged {
                id: p.id,
                crouching: p.pawn.crouching,
            });
        }
        if (p.pawn.vel3() - prev_vel).length() > 0.01 {
            srv.events.push(GameEvent::VelocityChanged {
                id: p.id,
                vel: p.pawn.vel3(),
            });
        }
    }
}

/// Stage lethal out-of-bounds damage for anyone below the kill plane.
fn world_kill_plane(srv: &mut ServerState, ctx: &mut Ctx) {
    let amount = srv.combat_cfg.max_health;
    for p in srv.players.iter() {
        if !p.dead && p.pawn.pos.y < KILL_Y {
            ctx.dmg.push(DamageEvent {
                target: p.id,
                attacker: WORLD_ATTACKER,
                amount,
                hit_point: p.pawn.pos,
                hit_dir: Vec3::NEG_Y,
                body_part: BodyPart::Body,
            });
        }
    }
}

fn tag_accrue(srv: &mut ServerState, dt: f32) {
    crate::tag::accrue(srv, dt);
}

fn apply_damage_events(srv: &mut ServerState, ctx: &mut Ctx) {
    for d in std::mem::take(&mut ctx.dmg) {
        let _ = srv.apply_damage(
            d.target,
            d.attacker,
            d.amount,
            d.hit_point,
            d.hit_dir,
            d.body_part,
        );
    }
}

fn respawn_players(srv: &mut ServerState, dt: f32) {
    crate::health::respawn_players(srv, dt);
}

fn regen_health(srv: &mut ServerState, dt: f32) {
    crate::health::regen_health(srv, dt);
}

fn expire_assists(srv: &mut ServerState) {
    let window = srv.combat_cfg.assist_window;
    let now = srv.time_s;
    srv.assists.expire(now, window);
}

/// Frame the per-player records, the hopball carry state when it changed,
/// and any kill-feed entries into the broadcast outbox.
fn emit_snapshots(srv: &mut ServerState) {
    let mut scratch = Vec::new();
    for p in srv.players.iter_mut() {
        p.repl_seq = p.repl_seq.wrapping_add(1);
        let time_tagged = p.time_tagged_s.max(0.0) as u32;
        let msg = PlayerStateMsg {
            id: p.id.0,
            seq: p.repl_seq,
            ack_input: p.last_input_seq,
            pos: p.pawn.pos.to_array(),
            vel_h: p.pawn.vel_h.to_array(),
            vel_v: p.pawn.vel_v,
            yaw: p.pawn.yaw,
            health: p.health,
            flags: p.flags(),
            phases: p.abilities.phases_wire(),
            kills: u16::try_from(p.kills.min(u32::from(u16::MAX))).unwrap_or(u16::MAX),
            deaths: u16::try_from(p.deaths.min(u32::from(u16::MAX))).unwrap_or(u16::MAX),
            assists: u16::try_from(p.assists.min(u32::from(u16::MAX))).unwrap_or(u16::MAX),
            time_tagged,
        };
        scratch.clear();
        msg.encode(&mut scratch);
        let mut framed = Vec::new();
        frame::write_msg(&mut framed, &scratch);
        srv.outbox.push(framed);
    }
    let ball_msg = srv.hopball.as_mut().and_then(Hopball::take_snapshot);
    if let Some(msg) = ball_msg {
        scratch.clear();
        msg.encode(&mut scratch);
        let mut framed = Vec::new();
        frame::write_msg(&mut framed, &scratch);
        srv.outbox.push(framed);
    }
    for kf in std::mem::take(&mut srv.pending_kill_feed) {
        scratch.clear();
        kf.encode(&mut scratch);
        let mut framed = Vec::new();
        frame::write_msg(&mut framed, &scratch);
        srv.outbox.push(framed);
    }
}
