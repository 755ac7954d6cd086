//! ClipEditor Application Orchestration Layer
//!
//! This crate contains the sync controller and the use cases it drives.
//!
//! ```text
//! store change / field edit / focus / button
//!         ↓
//!   SyncController  (trigger policy, one-shot app start, debounce)
//!         ↓
//!   ReentrancyGuard (drop events while propagating)
//!         ↓
//!   PullExternal / PushLocal / ClearExternal / ApplyInbound
//! ```

pub mod config_store;
pub mod controller;
pub mod deps;
pub mod usecases;

pub use config_store::SyncConfigStore;
pub use controller::{Propagation, SkipReason, SyncController};
pub use deps::SyncDeps;
