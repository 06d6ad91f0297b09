//! Game-mode switches consulted by the damage/tag pipeline.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct GameModeCfg {
    pub team_based: bool,
    /// Damage transfers the tag flag instead of depleting health.
    pub tag_mode: bool,
    pub friendly_fire: bool,
    /// Whether the hopball objective spawns in this mode.
    pub hopball: bool,
}

/// Named modes as loaded from `data/config/game_modes.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameModes {
    #[serde(flatten)]
    pub modes: HashMap<String, GameModeCfg>,
}

impl GameModes {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<GameModeCfg> {
        self.modes.get(name).copied()
    }
}
