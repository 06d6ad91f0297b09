//! data_runtime: gameplay tuning schemas and loaders.
//!
//! Holds the serde structs for movement, ability, combat, and game-mode
//! tuning so server/client/sim crates can depend on a stable data API.
//! Every struct's `Default` mirrors the shipped JSON under `data/config/`,
//! so tests and headless tools never need the files on disk.

pub mod loader;
pub mod configs {
    pub mod abilities;
    pub mod combat;
    pub mod game_mode;
    pub mod movement;
}
