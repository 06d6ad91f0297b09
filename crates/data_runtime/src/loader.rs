//! Config loaders resolving JSON under the workspace `data/` directory.

use crate::configs::abilities::AbilitiesCfg;
use crate::configs::combat::CombatCfg;
use crate::configs::game_mode::GameModes;
use crate::configs::movement::MovementCfg;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn data_root() -> PathBuf {
    // Prefer the top-level workspace `data/` so tests and tools can run from any crate.
    let here = Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Read a raw JSON file under `data/` and return its string.
pub fn read_json(rel: impl AsRef<Path>) -> Result<String> {
    let path = data_root().join(rel);
    let s = fs::read_to_string(&path).with_context(|| format!("read data: {}", path.display()))?;
    Ok(s)
}

pub fn load_movement() -> Result<MovementCfg> {
    let txt = read_json("config/movement.json")?;
    serde_json::from_str(&txt).context("parse movement json")
}

pub fn load_abilities() -> Result<AbilitiesCfg> {
    let txt = read_json("config/abilities.json")?;
    serde_json::from_str(&txt).context("parse abilities json")
}

pub fn load_combat() -> Result<CombatCfg> {
    let txt = read_json("config/combat.json")?;
    serde_json::from_str(&txt).context("parse combat json")
}

pub fn load_game_modes() -> Result<GameModes> {
    let txt = read_json("config/game_modes.json")?;
    serde_json::from_str(&txt).context("parse game modes json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_configs_parse_and_match_defaults() {
        let mv = load_movement().expect("movement config");
        assert!((mv.walk_speed - MovementCfg::default().walk_speed).abs() < f32::EPSILON);
        let ab = load_abilities().expect("abilities config");
        assert!(ab.dash.duration > 0.0 && ab.grapple.range > 0.0);
        let cb = load_combat().expect("combat config");
        assert!((cb.max_health - 100.0).abs() < f32::EPSILON);
        let modes = load_game_modes().expect("game modes config");
        assert!(modes.get("tag").expect("tag mode").tag_mode);
        assert!(!modes.get("deathmatch").expect("dm mode").tag_mode);
    }
}
