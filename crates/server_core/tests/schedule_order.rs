//! Structural guards on the tick order: inputs are ingested before the
//! simulation, damage resolves before respawns, snapshots go out last.

use server_core::ecs::schedule::system_names_for_test;

fn index_of(name: &str) -> usize {
    system_names_for_test()
        .iter()
        .position(|n| *n == name)
        .unwrap_or_else(|| panic!("system name present: {name}"))
}

#[test]
fn inputs_come_before_simulation() {
    assert!(index_of("ingest_commands") < index_of("simulate_players"));
}

#[test]
fn damage_resolves_before_respawns_and_regen() {
    let dmg = index_of("apply_damage_events");
    assert!(dmg < index_of("respawn_players"));
    assert!(dmg < index_of("regen_health"));
}

#[test]
fn kill_plane_feeds_the_damage_bus_same_tick() {
    assert!(index_of("world_kill_plane") < index_of("apply_damage_events"));
}

#[test]
fn snapshots_are_emitted_last() {
    let last = system_names_for_test().len() - 1;
    assert_eq!(index_of("emit_snapshots"), last);
}
