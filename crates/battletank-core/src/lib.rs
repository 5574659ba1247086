//! Core types and definitions for the battle tank simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid types, entity components, combat state, commands, snapshots,
//! events, and tuning constants. It has no dependency on the ECS or
//! any runtime framework.

pub mod combat;
pub mod commands;
pub mod components;
pub mod constants;
pub mod entity;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
