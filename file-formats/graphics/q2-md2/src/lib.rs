//! Parser for Quake II MD2 models.
//!
//! An MD2 file stores a triangle mesh together with a list of keyframes, each
//! holding every vertex position compressed to three bytes. Animation clips
//! are not stored explicitly and are derived from the frame names.

pub mod animation;
pub mod error;
pub mod header;
pub mod model;
pub mod types;

// Re-export common types
pub use animation::{AnimClip, AnimClips, AnimationPlayer, PoseVertex};
pub use error::{Md2Error, Result};
pub use header::Md2Header;
pub use model::Md2Model;
pub use types::{Frame, RawVertex, Skin, TexCoord, Triangle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
