//! # ez-core
//!
//! Core types and ID prefixes for Ezriya.
//!
//! This crate provides the foundational types shared across all Ezriya crates:
//! - Entity structs for buyer needs, listings, workflow templates, and tasks
//! - Status and label enums (with the task state machine)
//! - ID prefix constants
//! - Response bodies returned by the function endpoints

pub mod entities;
pub mod enums;
pub mod ids;
pub mod responses;
