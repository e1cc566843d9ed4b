//! Repository modules for the persisted entities.
//!
//! Each module adds methods to `EzService` via `impl EzService` blocks.

pub mod listing;
pub mod swipe;
pub mod task;
pub mod template;
