//! Health regeneration: nothing during the grace window, continuous after,
//! and fresh damage resets the clock.

use glam::Vec3;
use server_core::{BodyPart, ServerState, Team};
use sim_core::StaticWorld;

fn advance(srv: &mut ServerState, seconds: f32) {
    let steps = (seconds / 0.1).round() as i32;
    for _ in 0..steps {
        srv.step_authoritative(0.1);
    }
}

#[test]
fn regen_waits_out_the_grace_then_fills() {
    let mut srv = ServerState::new(
        Box::new(StaticWorld::flat()),
        data_runtime::configs::game_mode::GameModeCfg::default(),
    );
    let id = srv.connect(Team::Solo);
    let other = srv.connect(Team::Solo);
    srv.apply_damage(id, other, 40.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    assert!((srv.players.get(id).expect("p").health - 60.0).abs() < 1e-4);

    // Inside the grace window: no healing.
    advance(&mut srv, 9.0);
    assert!((srv.players.get(id).expect("p").health - 60.0).abs() < 1e-4);

    // Past it: continuous regen at the configured rate.
    advance(&mut srv, 2.0);
    let h = srv.players.get(id).expect("p").health;
    assert!(h > 60.0 && h < srv.combat_cfg.max_health);

    // Long enough: clamped at full.
    advance(&mut srv, 10.0);
    assert!((srv.players.get(id).expect("p").health - srv.combat_cfg.max_health).abs() < 1e-4);
}

#[test]
fn new_damage_resets_the_grace_timer() {
    let mut srv = ServerState::new(
        Box::new(StaticWorld::flat()),
        data_runtime::configs::game_mode::GameModeCfg::default(),
    );
    let id = srv.connect(Team::Solo);
    let other = srv.connect(Team::Solo);
    srv.apply_damage(id, other, 40.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    advance(&mut srv, 9.5);
    srv.apply_damage(id, other, 10.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    // Would have healed by now had the clock not reset.
    advance(&mut srv, 5.0);
    assert!((srv.players.get(id).expect("p").health - 50.0).abs() < 1e-4);
}
