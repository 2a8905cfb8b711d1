//! Small helpers shared by the quake-rs asset crates.

pub mod debug;
