//! MD2 Animation System
//!
//! This module provides:
//! - Clip indexing from frame names
//! - Linear interpolation between two keyframes
//! - A playback state machine stepping through the active clip
//!
//! # Example
//!
//! ```rust,no_run
//! use q2_md2::Md2Model;
//! use q2_md2::animation::AnimationPlayer;
//!
//! let model = Md2Model::load("models/players/male/tris.md2")?;
//! let mut player = AnimationPlayer::with_model(&model);
//! player.select_clip("run");
//!
//! // 7 frames per second at 60 updates per second
//! player.set_step(7.0 / 60.0);
//! player.advance();
//!
//! if let Some(pose) = player.pose(0.1)? {
//!     println!("{} triangle corners", pose.len());
//! }
//! # Ok::<(), q2_md2::Md2Error>(())
//! ```

mod clips;
mod interpolation;
mod player;

pub use clips::{AnimClip, AnimClips, build_clips, clip_name};
pub use interpolation::{PoseVertex, interpolate, interpolate_into};
pub use player::AnimationPlayer;
