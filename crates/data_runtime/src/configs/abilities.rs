//! Ability tuning: dash, pull-grapple, swing, mantle.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DashCfg {
    /// Seconds the boost is considered active (friction suspended).
    pub duration: f32,
    pub cooldown: f32,
    /// Additive horizontal speed applied in the input direction (m/s).
    pub boost: f32,
    /// Minimum input magnitude to accept a dash trigger.
    pub min_input: f32,
}

impl Default for DashCfg {
    fn default() -> Self {
        Self {
            duration: 0.05,
            cooldown: 2.0,
            boost: 12.0,
            min_input: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GrappleCfg {
    /// Max anchor distance for the trigger raycast (m).
    pub range: f32,
    /// Fixed pull speed toward the anchor (m/s).
    pub pull_speed: f32,
    /// Early-exit distance to the anchor (m).
    pub arrive_radius: f32,
    /// Hard cap on active pull time (s).
    pub max_duration: f32,
    pub cooldown: f32,
    /// Multiplier on the final pull-direction velocity at exit.
    pub exit_boost: f32,
}

impl Default for GrappleCfg {
    fn default() -> Self {
        Self {
            range: 30.0,
            pull_speed: 25.0,
            arrive_radius: 1.0,
            max_duration: 3.0,
            cooldown: 4.0,
            exit_boost: 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SwingCfg {
    /// Max anchor distance for the trigger raycast (m).
    pub range: f32,
    /// Downward clearance that ends the swing near the ground (m).
    pub ground_clearance: f32,
}

impl Default for SwingCfg {
    fn default() -> Self {
        Self {
            range: 25.0,
            ground_clearance: 1.2,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct MantleCfg {
    /// Ledge height window relative to the feet (m).
    pub min_ledge: f32,
    pub max_ledge: f32,
    /// Forward reach of the ledge scan (m).
    pub reach: f32,
    /// Scripted motion length (s).
    pub duration: f32,
    /// Fraction of the duration after which the forward ease begins.
    pub forward_start: f32,
}

impl Default for MantleCfg {
    fn default() -> Self {
        Self {
            min_ledge: 0.8,
            max_ledge: 2.5,
            reach: 0.75,
            duration: 0.3,
            forward_start: 0.4,
        }
    }
}

/// All four ability tunings as loaded from `data/config/abilities.json`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct AbilitiesCfg {
    pub dash: DashCfg,
    pub grapple: GrappleCfg,
    pub swing: SwingCfg,
    pub mantle: MantleCfg,
}
