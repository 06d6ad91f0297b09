//! Combat tuning: health pool, respawn, regeneration, assist credit.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CombatCfg {
    pub max_health: f32,
    /// Delay between death and placement at the reserved spawn point (s).
    pub respawn_delay: f32,
    /// No-damage grace before regeneration starts (s).
    pub regen_delay: f32,
    /// Continuous regeneration rate once the grace elapses (hp/s).
    pub regen_rate: f32,
    /// Rolling window in which pre-kill damage earns an assist (s).
    pub assist_window: f32,
    /// Minimum accumulated damage for assist credit.
    pub assist_min_damage: f32,
}

impl Default for CombatCfg {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            respawn_delay: 3.0,
            regen_delay: 10.0,
            regen_rate: 10.0,
            assist_window: 10.0,
            assist_min_damage: 10.0,
        }
    }
}
