//! Core simulation systems, one module per pipeline stage.
//!
//! Canonical order: timers -> (external AI/commands) -> movement ->
//! volumes/grid rebuild -> collision -> hit resolution -> detonations ->
//! damage application -> loot -> cleanup/regen.

pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod loot;
pub mod movement;
pub mod timers;
pub mod volumes;
