//! sim_core: deterministic player simulation shared by server and client.
//!
//! Everything here is engine-free and pure with respect to its inputs: the
//! authoritative server steps it per network tick, the owning client steps
//! the same code for prediction and gets identical results for identical
//! `InputSample` streams. Collision is consulted through the narrow
//! [`collision::CollisionQuery`] oracle; presentation never appears.

pub mod abilities;
pub mod collision;
pub mod input;
pub mod movement;
pub mod pawn;
pub mod step;

pub use abilities::{Abilities, AbilityKind, Phase};
pub use collision::{CollisionQuery, StaticWorld};
pub use input::InputSample;
pub use pawn::Pawn;
pub use step::{StepOutput, simulate};
