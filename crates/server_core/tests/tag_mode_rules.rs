//! Tag mode: damage moves the flag instead of health, scoring accrues per
//! second of possession, and out-of-bounds damage still kills.

use data_runtime::configs::game_mode::GameModeCfg;
use glam::Vec3;
use server_core::{BodyPart, ServerState, Team, WORLD_ATTACKER};
use sim_core::StaticWorld;

fn tag_server() -> ServerState {
    let mode = GameModeCfg {
        tag_mode: true,
        ..Default::default()
    };
    ServerState::new(Box::new(StaticWorld::flat()), mode)
}

#[test]
fn tagged_attacker_transfers_the_flag_atomically() {
    let mut srv = tag_server();
    let it = srv.connect(Team::Solo);
    let target = srv.connect(Team::Solo);
    srv.players.get_mut(it).expect("it").tagged = true;

    let killed = srv.apply_damage(target, it, 30.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    assert!(!killed, "tag-mode damage never kills");
    let (a, b) = (
        srv.players.get(it).expect("it"),
        srv.players.get(target).expect("target"),
    );
    assert!(!a.tagged && b.tagged, "flag moved in one atomic step");
    assert!((b.health - srv.combat_cfg.max_health).abs() < f32::EPSILON, "health untouched");

    // Re-hit after the transfer: the attacker is untagged now, no bounce-back.
    srv.apply_damage(target, it, 30.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    assert!(srv.players.get(target).expect("target").tagged);
}

#[test]
fn untagged_hit_shaves_banked_seconds() {
    let mut srv = tag_server();
    let hunter = srv.connect(Team::Solo);
    let runner = srv.connect(Team::Solo);
    {
        let r = srv.players.get_mut(runner).expect("runner");
        r.tagged = true;
        r.time_tagged_s = 2.5;
    }
    srv.apply_damage(runner, hunter, 10.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    let r = srv.players.get(runner).expect("runner");
    assert!(r.tagged, "no transfer from an untagged attacker");
    assert!((r.time_tagged_s - 1.5).abs() < 1e-5);

    // Floors at zero.
    srv.apply_damage(runner, hunter, 10.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    srv.apply_damage(runner, hunter, 10.0, Vec3::ZERO, Vec3::Z, BodyPart::Body);
    assert!(srv.players.get(runner).expect("runner").time_tagged_s >= 0.0);
}

#[test]
fn possession_accrues_one_second_per_second() {
    let mut srv = tag_server();
    let it = srv.connect(Team::Solo);
    srv.players.get_mut(it).expect("it").tagged = true;
    for _ in 0..20 {
        srv.step_authoritative(0.1);
    }
    let t = srv.players.get(it).expect("it").time_tagged_s;
    assert!((t - 2.0).abs() < 1e-3);
}

#[test]
fn out_of_bounds_kills_even_in_tag_mode() {
    let mut srv = tag_server();
    let it = srv.connect(Team::Solo);
    let killed = srv.apply_damage(it, WORLD_ATTACKER, 1.0, Vec3::ZERO, Vec3::NEG_Y, BodyPart::Body);
    assert!(killed, "the sentinel bypasses tag interception");
    assert!(srv.players.get(it).expect("it").dead);
}
