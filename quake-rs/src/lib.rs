//! Quake-RS library
//!
//! Command implementations of the `quake-rs` binary together with the player
//! asset helpers they share: directory discovery, skin registry, texture
//! cache and playback rate.

#[cfg(feature = "player")]
pub mod assets;
pub mod cli;
pub mod commands;
pub mod utils;
