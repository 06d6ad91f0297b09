//! One simulation tick for a single pawn.
//!
//! The server runs this per player per network tick; the owning client runs
//! the identical code for prediction. Abilities share the pawn velocity as
//! their sole mutation target and at most one writes it per tick; the
//! exclusivity comes from the trigger/preemption rules here, not a lock.

use crate::abilities::{Abilities, AbilityKind, Phase};
use crate::collision::CollisionQuery;
use crate::input::InputSample;
use crate::movement;
use crate::pawn::Pawn;
use data_runtime::configs::abilities::AbilitiesCfg;
use data_runtime::configs::movement::MovementCfg;
use glam::{Vec2, Vec3};

const SKIN: f32 = 0.02;
const GROUND_EPS: f32 = 0.05;

/// Tuning handed to the step; both sides must use identical values.
#[derive(Clone, Copy)]
pub struct SimCfg<'a> {
    pub movement: &'a MovementCfg,
    pub abilities: &'a AbilitiesCfg,
}

/// Facts about the tick the embedding layer cares about.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOutput {
    pub jumped: bool,
    pub landed: bool,
    pub ceiling: bool,
}

#[derive(Default)]
struct MoveFlags {
    ceiling: bool,
}

/// Advance one pawn by `dt`.
pub fn simulate(
    pawn: &mut Pawn,
    ab: &mut Abilities,
    input: &InputSample,
    cfg: &SimCfg,
    world: &dyn CollisionQuery,
    dt: f32,
) -> StepOutput {
    let mut out = StepOutput::default();
    let was_grounded = pawn.grounded;
    pawn.crouching = input.crouch;

    // Trigger attempts. A successful start preempts the active ability;
    // grapple alone is refused outright during a swing (swing precedence).
    if input.swing && ab.swing.phase == Phase::Idle {
        let started = ab.swing.try_trigger(&cfg.abilities.swing, pawn, input.look, world);
        if started {
            ab.grapple.cancel(&cfg.abilities.grapple);
            ab.dash.cancel(&cfg.abilities.dash);
            ab.mantle.cancel(pawn);
        }
    }
    if !input.swing && ab.swing.phase == Phase::Active {
        ab.swing.release();
    }
    if input.grapple {
        let swinging = ab.swing.phase == Phase::Active;
        let started = ab
            .grapple
            .try_trigger(&cfg.abilities.grapple, pawn, input.look, world, swinging);
        if started {
            ab.dash.cancel(&cfg.abilities.dash);
            ab.mantle.cancel(pawn);
        }
    }
    if input.dash {
        let started = ab
            .dash
            .try_trigger(&cfg.abilities.dash, input.mov, pawn.yaw, pawn.grounded, pawn);
        if started {
            ab.grapple.cancel(&cfg.abilities.grapple);
            ab.swing.release();
            ab.mantle.cancel(pawn);
        }
    }
    // Mantle arms itself: airborne, pushing forward, qualifying ledge ahead.
    if ab.active_kind().is_none() && input.mov.y > 0.0 {
        let _ = ab.mantle.try_trigger(&cfg.abilities.mantle, pawn, world);
    }

    let mut grapple_ticked = false;
    match ab.active_kind() {
        Some(AbilityKind::Mantle) => {
            // Scripted motion: no gravity, no collision.
            ab.mantle.tick(&cfg.abilities.mantle, pawn, dt);
        }
        Some(AbilityKind::Swing) => {
            // Pendulum integrates the pawn itself under the rope constraint.
            ab.swing.tick(
                &cfg.abilities.swing,
                pawn,
                world,
                cfg.movement.gravity_eff(),
                dt,
            );
        }
        Some(AbilityKind::Grapple) => {
            ab.grapple.tick(&cfg.abilities.grapple, pawn, world, dt);
            grapple_ticked = true;
            let flags = move_pawn(pawn, world, dt);
            out.ceiling = flags.ceiling;
            // Contact cancels: ceiling, landing, jump pad.
            if flags.ceiling
                || pawn.grounded
                || world.jump_pad_at(pawn.pos, pawn.radius).is_some()
            {
                ab.grapple.cancel(&cfg.abilities.grapple);
            }
        }
        _ => {
            // Normal movement; an active dash only shields its boosted
            // velocity from the ground friction/acceleration pass.
            let wish = movement::wish_dir(input.mov, pawn.yaw);
            if pawn.grounded && input.jump {
                let height = world
                    .jump_pad_at(pawn.pos, pawn.radius)
                    .unwrap_or(cfg.movement.jump_height);
                pawn.vel_v = movement::jump_speed(cfg.movement, height);
                pawn.grounded = false;
                out.jumped = true;
            }
            if ab.dash.phase != Phase::Active {
                let target = movement::max_speed(cfg.movement, input.sprint, input.crouch);
                pawn.vel_h = if pawn.grounded {
                    movement::ground_step(cfg.movement, pawn.vel_h, wish, target, dt)
                } else {
                    movement::air_step(cfg.movement, pawn.vel_h, wish, dt)
                };
            }
            if !out.jumped {
                pawn.vel_v = movement::vertical_step(cfg.movement, pawn.vel_v, pawn.grounded, dt);
            }
            let flags = move_pawn(pawn, world, dt);
            out.ceiling = flags.ceiling;
        }
    }

    out.landed = !was_grounded && pawn.grounded;
    // Dash timers run every tick; landing also releases a deferred cooldown.
    ab.dash.tick(&cfg.abilities.dash, pawn.grounded, dt);
    if !grapple_ticked {
        // Cooldown drain for ticks where the grapple step did not run.
        ab.grapple.tick(&cfg.abilities.grapple, pawn, world, dt);
    }
    out
}

/// Direct-velocity collision move: slide on walls, clamp at ceilings,
/// settle on the highest support below.
fn move_pawn(pawn: &mut Pawn, world: &dyn CollisionQuery, dt: f32) -> MoveFlags {
    let mut flags = MoveFlags::default();
    let h = Vec3::new(pawn.vel_h.x, 0.0, pawn.vel_h.y);
    let hspeed = h.length();
    if hspeed > 1e-6 {
        let dir = h / hspeed;
        let travel = hspeed * dt;
        if let Some(hit) = world.sweep(pawn.center(), dir, pawn.radius, travel + SKIN) {
            let allowed = (hit.dist - SKIN).clamp(0.0, travel);
            pawn.pos += dir * allowed;
            let n = Vec2::new(hit.normal.x, hit.normal.z);
            let into = pawn.vel_h.dot(n);
            if into < 0.0 {
                pawn.vel_h -= n * into;
            }
        } else {
            pawn.pos += dir * travel;
        }
    }
    let start_y = pawn.pos.y;
    if pawn.vel_v > 0.0 {
        let up = pawn.vel_v * dt;
        let head = pawn.pos + Vec3::new(0.0, pawn.height, 0.0);
        if let Some(hit) = world.sweep(head, Vec3::Y, pawn.radius, up + SKIN) {
            pawn.pos.y += (hit.dist - SKIN).max(0.0);
            pawn.vel_v = 0.0;
            flags.ceiling = true;
        } else {
            pawn.pos.y += up;
        }
        pawn.grounded = false;
    } else {
        pawn.pos.y += pawn.vel_v * dt;
        let support = world.ground_height(pawn.pos, pawn.radius, start_y + GROUND_EPS);
        if pawn.pos.y <= support + GROUND_EPS {
            pawn.pos.y = support;
            pawn.grounded = true;
        } else {
            pawn.grounded = false;
        }
    }
    flags
}
