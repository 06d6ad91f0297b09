//! Client glue: input resolution, owner-side prediction, replication apply,
//! and the client half of the hopball equip protocol.
//!
//! Nothing here mutates authoritative state: the client predicts with the
//! shared `sim_core` step, sends requests, and reconciles against whatever
//! the authority replicates back.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools
)]

pub mod hopball;
pub mod input;
pub mod prediction;
pub mod replication;
