//! Cross-cancellation: at most one ability is ever active, and every
//! external cancel leaves a resolvable state.

use data_runtime::configs::abilities::AbilitiesCfg;
use data_runtime::configs::movement::MovementCfg;
use glam::{Vec2, Vec3};
use sim_core::collision::{Aabb, StaticWorld};
use sim_core::step::SimCfg;
use sim_core::{Abilities, AbilityKind, InputSample, Pawn, Phase, simulate};

fn arena() -> StaticWorld {
    StaticWorld::flat()
        // Overhead beam for swing/grapple anchors.
        .with_box(Aabb::new(
            Vec3::new(-3.0, 25.0, -3.0),
            Vec3::new(3.0, 26.0, 3.0),
        ))
}

fn cfgs() -> (MovementCfg, AbilitiesCfg) {
    (MovementCfg::default(), AbilitiesCfg::default())
}

fn active_count(ab: &Abilities) -> usize {
    ab.phases().iter().filter(|p| **p == Phase::Active).count()
}

#[test]
fn dash_during_swing_leaves_exactly_one_active() {
    let (mv, abc) = cfgs();
    let cfg = SimCfg {
        movement: &mv,
        abilities: &abc,
    };
    let world = arena();
    let mut pawn = Pawn::new(Vec3::new(0.0, 12.0, 0.0));
    let mut ab = Abilities::default();
    let swing_input = InputSample {
        look: Vec3::Y,
        swing: true,
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &swing_input, &cfg, &world, 1.0 / 60.0);
    assert_eq!(ab.active_kind(), Some(AbilityKind::Swing));

    let dash_input = InputSample {
        look: Vec3::Y,
        swing: true,
        dash: true,
        mov: Vec2::new(0.0, 1.0),
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &dash_input, &cfg, &world, 1.0 / 60.0);
    assert_eq!(active_count(&ab), 1, "never two active abilities");
    assert_eq!(ab.active_kind(), Some(AbilityKind::Dash));
}

#[test]
fn swing_start_cancels_active_grapple() {
    let (mv, abc) = cfgs();
    let cfg = SimCfg {
        movement: &mv,
        abilities: &abc,
    };
    let world = arena();
    let mut pawn = Pawn::new(Vec3::new(0.0, 12.0, 0.0));
    let mut ab = Abilities::default();
    let grapple_input = InputSample {
        look: Vec3::Y,
        grapple: true,
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &grapple_input, &cfg, &world, 1.0 / 60.0);
    assert_eq!(ab.active_kind(), Some(AbilityKind::Grapple));

    let swing_input = InputSample {
        look: Vec3::Y,
        swing: true,
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &swing_input, &cfg, &world, 1.0 / 60.0);
    assert_eq!(ab.active_kind(), Some(AbilityKind::Swing));
    assert_eq!(ab.grapple.phase, Phase::Cooldown, "pull exits via cooldown");
}

#[test]
fn grapple_is_refused_while_swinging() {
    let (mv, abc) = cfgs();
    let cfg = SimCfg {
        movement: &mv,
        abilities: &abc,
    };
    let world = arena();
    let mut pawn = Pawn::new(Vec3::new(0.0, 12.0, 0.0));
    let mut ab = Abilities::default();
    let swing_input = InputSample {
        look: Vec3::Y,
        swing: true,
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &swing_input, &cfg, &world, 1.0 / 60.0);
    assert_eq!(ab.active_kind(), Some(AbilityKind::Swing));

    let both = InputSample {
        look: Vec3::Y,
        swing: true,
        grapple: true,
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &both, &cfg, &world, 1.0 / 60.0);
    assert_eq!(ab.active_kind(), Some(AbilityKind::Swing));
    assert_eq!(ab.grapple.phase, Phase::Idle, "grapple trigger is a no-op");
}

#[test]
fn external_cancel_resolves_everything_to_idle_or_cooldown() {
    let (mv, abc) = cfgs();
    let cfg = SimCfg {
        movement: &mv,
        abilities: &abc,
    };
    let world = arena();
    let mut pawn = Pawn::new(Vec3::new(0.0, 12.0, 0.0));
    let mut ab = Abilities::default();
    let swing_input = InputSample {
        look: Vec3::Y,
        swing: true,
        ..Default::default()
    };
    simulate(&mut pawn, &mut ab, &swing_input, &cfg, &world, 1.0 / 60.0);
    ab.cancel_active(&abc, &mut pawn);
    assert_eq!(ab.active_kind(), None);
    for p in ab.phases() {
        assert_ne!(p, Phase::Active);
    }
}
