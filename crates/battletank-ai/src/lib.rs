//! Enemy AI for the battle tank simulation.
//!
//! Per-enemy behavior state machine and difficulty-scaled aim and
//! fire profiles. Pure functions over plain data; the caller owns the
//! random source.

pub mod fsm;
pub mod profiles;

pub use battletank_core as core;

#[cfg(test)]
mod tests;
