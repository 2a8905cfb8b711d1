//! Command implementations

#[cfg(feature = "md2")]
pub mod md2;
#[cfg(feature = "pcx")]
pub mod pcx;
#[cfg(feature = "player")]
pub mod player;
