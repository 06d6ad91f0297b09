//! End-to-end: several records framed into one buffer, walked back out in order.

use net_core::command::{BTN_GRAPPLE, ClientCmd, InputFrame};
use net_core::frame::{split_msgs, write_msg};
use net_core::snapshot::{
    FLAG_GROUNDED, HopballMsg, PlayerStateMsg, SnapshotDecode, SnapshotEncode,
};

#[test]
fn mixed_frames_decode_in_order() {
    let player = PlayerStateMsg {
        id: 1,
        seq: 5,
        ack_input: 4,
        pos: [0.0, 0.6, 0.0],
        vel_h: [3.0, 0.0],
        vel_v: -0.5,
        yaw: 0.0,
        health: 100.0,
        flags: FLAG_GROUNDED,
        phases: [0; 4],
        kills: 0,
        deaths: 0,
        assists: 0,
        time_tagged: 0,
    };
    let ball = HopballMsg {
        seq: 2,
        holder: 1,
        pos: [0.0; 3],
        yaw: 0.0,
    };
    let cmd = ClientCmd::Input(InputFrame {
        seq: 5,
        mov: [0.0, 1.0],
        look: [0.0, 0.0, 1.0],
        buttons: BTN_GRAPPLE,
    });

    let mut stream = Vec::new();
    let mut scratch = Vec::new();
    player.encode(&mut scratch);
    write_msg(&mut stream, &scratch);
    scratch.clear();
    ball.encode(&mut scratch);
    write_msg(&mut stream, &scratch);
    scratch.clear();
    cmd.encode(&mut scratch);
    write_msg(&mut stream, &scratch);

    let msgs = split_msgs(&stream).expect("split");
    assert_eq!(msgs.len(), 3);
    let mut s0: &[u8] = msgs[0];
    assert_eq!(PlayerStateMsg::decode(&mut s0).expect("player"), player);
    let mut s1: &[u8] = msgs[1];
    assert_eq!(HopballMsg::decode(&mut s1).expect("ball"), ball);
    let mut s2: &[u8] = msgs[2];
    assert_eq!(ClientCmd::decode(&mut s2).expect("cmd"), cmd);
}
