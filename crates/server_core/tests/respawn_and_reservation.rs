//! Respawn flow: two same-tick deaths never share a spawn point, and a
//! reservation is released only once the player is actually placed.

use glam::Vec3;
use server_core::{BodyPart, ServerState, Team};
use sim_core::StaticWorld;

fn deathmatch() -> ServerState {
    ServerState::new(
        Box::new(StaticWorld::flat()),
        data_runtime::configs::game_mode::GameModeCfg::default(),
    )
}

#[test]
fn same_tick_deaths_get_distinct_points() {
    let mut srv = deathmatch();
    let a = srv.connect(Team::Solo);
    let b = srv.connect(Team::Solo);
    let killer = srv.connect(Team::Solo);

    srv.apply_damage(a, killer, 1000.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    srv.apply_damage(b, killer, 1000.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);

    let ra = srv.players.get(a).expect("a").reservation.expect("a point");
    let rb = srv.players.get(b).expect("b").reservation.expect("b point");
    assert_ne!(ra, rb, "double-booked spawn point");
    assert_eq!(srv.spawns.reserved_count(), 2);
}

#[test]
fn reservation_survives_until_placement() {
    let mut srv = deathmatch();
    let a = srv.connect(Team::Solo);
    let killer = srv.connect(Team::Solo);
    srv.apply_damage(a, killer, 1000.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    let point = srv.players.get(a).expect("a").reservation.expect("point");

    // Mid-countdown: still dead, still reserved.
    for _ in 0..20 {
        srv.step_authoritative(0.1);
    }
    assert!(srv.players.get(a).expect("a").dead);
    assert!(srv.spawns.is_reserved(point));

    // Past the respawn delay: placed at the point, reservation released.
    for _ in 0..15 {
        srv.step_authoritative(0.1);
    }
    let p = srv.players.get(a).expect("a");
    assert!(!p.dead);
    assert!((p.health - srv.combat_cfg.max_health).abs() < f32::EPSILON);
    assert!(p.reservation.is_none());
    assert!(!srv.spawns.is_reserved(point));
    let sp = srv.spawns.get(point).expect("spawn point");
    assert!((p.pawn.pos - sp.pos).length() < 1e-3, "placed at the reserved point");
    let respawned = srv
        .drain_events()
        .into_iter()
        .any(|e| matches!(e, server_core::GameEvent::PlayerRespawned { id, .. } if id == a));
    assert!(respawned);
}
