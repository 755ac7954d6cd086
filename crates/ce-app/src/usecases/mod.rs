//! Use cases driven by the sync controller and the settings surface.
//!
//! The sync use cases all take a [`GuardToken`](ce_core::GuardToken): they
//! can only run while the controller holds the reentrancy guard.

pub mod settings;
pub mod sync;
