//! Hopball ownership: server-arbitrated equip/drop, first valid request
//! wins, forced drop on death.

use data_runtime::configs::game_mode::GameModeCfg;
use glam::Vec3;
use net_core::command::ClientCmd;
use server_core::{BodyPart, CarryState, ServerState, Team};
use sim_core::StaticWorld;

fn hopball_server() -> ServerState {
    let mode = GameModeCfg {
        team_based: true,
        hopball: true,
        ..Default::default()
    };
    ServerState::new(Box::new(StaticWorld::flat()), mode)
}

fn move_near_ball(srv: &mut ServerState, id: server_core::PlayerId) {
    let p = srv.players.get_mut(id).expect("player");
    p.pawn.pos = Vec3::new(1.0, 0.0, 0.0);
}

#[test]
fn equip_drop_reequip_roundtrip() {
    let mut srv = hopball_server();
    let a = srv.connect(Team::Red);
    let b = srv.connect(Team::Blue);
    move_near_ball(&mut srv, a);

    srv.enqueue(a, ClientCmd::HopballPickup { pos: [1.0, 0.0, 0.0] });
    srv.step_authoritative(0.1);
    assert_eq!(srv.hopball.expect("ball").holder(), Some(a));
    assert!(srv.players.get(a).expect("a").carrying);

    // Drop at the visual carry position.
    srv.enqueue(
        a,
        ClientCmd::HopballDrop {
            pos: [2.0, 1.1, 0.5],
            yaw: 0.7,
            vel: [1.0, 2.0, 0.0],
        },
    );
    srv.step_authoritative(0.1);
    let ball = srv.hopball.expect("ball");
    assert_eq!(ball.holder(), None);
    match ball.state() {
        CarryState::Dropped { pos, yaw } => {
            assert!((pos - Vec3::new(2.0, 1.1, 0.5)).length() < 1e-6);
            assert!((yaw - 0.7).abs() < 1e-6);
        }
        CarryState::Equipped { .. } => panic!("ball should be dropped"),
    }
    assert!(!srv.players.get(a).expect("a").carrying);

    // A different player picks it up; holder updates, never two at once.
    let p = srv.players.get_mut(b).expect("b");
    p.pawn.pos = Vec3::new(2.0, 0.0, 0.5);
    srv.enqueue(b, ClientCmd::HopballPickup { pos: [2.0, 0.0, 0.5] });
    srv.step_authoritative(0.1);
    assert_eq!(srv.hopball.expect("ball").holder(), Some(b));
    assert!(!srv.players.get(a).expect("a").carrying);
    assert!(srv.players.get(b).expect("b").carrying);
}

#[test]
fn first_valid_request_wins() {
    let mut srv = hopball_server();
    let a = srv.connect(Team::Red);
    let b = srv.connect(Team::Blue);
    move_near_ball(&mut srv, a);
    move_near_ball(&mut srv, b);

    srv.enqueue(a, ClientCmd::HopballPickup { pos: [1.0, 0.0, 0.0] });
    srv.enqueue(b, ClientCmd::HopballPickup { pos: [1.0, 0.0, 0.0] });
    srv.step_authoritative(0.1);

    assert_eq!(srv.hopball.expect("ball").holder(), Some(a), "first wins");
    assert!(!srv.players.get(b).expect("b").carrying, "loser sees nothing");
}

#[test]
fn death_forces_a_drop_at_the_logical_position() {
    let mut srv = hopball_server();
    let a = srv.connect(Team::Red);
    let killer = srv.connect(Team::Blue);
    move_near_ball(&mut srv, a);
    srv.enqueue(a, ClientCmd::HopballPickup { pos: [1.0, 0.0, 0.0] });
    srv.step_authoritative(0.1);
    assert_eq!(srv.hopball.expect("ball").holder(), Some(a));

    let death_pos = srv.players.get(a).expect("a").pawn.pos;
    srv.apply_damage(a, killer, 1000.0, death_pos, Vec3::Z, BodyPart::Body);
    let ball = srv.hopball.expect("ball");
    assert_eq!(ball.holder(), None, "dead players cannot carry");
    match ball.state() {
        CarryState::Dropped { pos, .. } => {
            let horizontal = Vec3::new(pos.x - death_pos.x, 0.0, pos.z - death_pos.z);
            assert!(horizontal.length() < 1e-4, "dropped where the holder died");
        }
        CarryState::Equipped { .. } => panic!("ball must be dropped on death"),
    }
}
