//! `net_core`: snapshot schema + in-proc replication plumbing.
//!
//! Scope
//! - Snapshot encode/decode traits and the player/hopball/kill-feed messages
//! - Client->server command encoding (input frames, hopball requests)
//! - Versioned length framing and non-blocking byte channels
//! - `ReplicatedValue`: server-owned field with per-field ordered observation
//!
//! The transport itself is an external collaborator; the contract here is
//! only that authoritative writes are observable by everyone, eventually,
//! in per-field order.

#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

pub mod channel;
pub mod command;
pub mod frame;
pub mod replicated;
pub mod snapshot;
