//! Playback state machine for MD2 clips
//!
//! The player walks the frames of the active clip, blending from the current
//! frame towards the next one. Once the blend reaches 1 both frames move one
//! step forward, wrapping back to the start of the clip.

use log::debug;

use super::clips::AnimClip;
use super::interpolation::{PoseVertex, interpolate};
use crate::error::Result;
use crate::model::Md2Model;

/// Animation player borrowing a model
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer<'m> {
    /// Bound model
    model: Option<&'m Md2Model>,
    /// Active clip, `None` while unbound or when the model has no frames
    clip: Option<&'m AnimClip>,
    /// Frame blended from
    current_frame: usize,
    /// Frame blended towards
    next_frame: usize,
    /// Progress from current to next frame
    blend: f32,
    /// Blend increment used by `advance`
    step: f32,
}

impl<'m> AnimationPlayer<'m> {
    /// Create a player with no model attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player already bound to a model
    pub fn with_model(model: &'m Md2Model) -> Self {
        let mut player = Self::new();
        player.bind(model);
        player
    }

    /// Attach a model and start its first clip from the beginning
    pub fn bind(&mut self, model: &'m Md2Model) {
        self.model = Some(model);
        self.clip = model.clips().first();
        self.current_frame = self.clip.map_or(0, |clip| clip.start);
        self.next_frame = self.current_frame;
        self.blend = 0.0;

        match self.clip {
            Some(clip) => debug!("Player bound, starting clip '{}'", clip.name),
            None => debug!("Player bound to a model without frames"),
        }
    }

    /// Switch to the clip called `name`.
    ///
    /// The frame position and blend carry over; the next `tick` brings them
    /// back inside the new clip. Returns `false` and leaves the player
    /// untouched when no such clip exists.
    pub fn select_clip(&mut self, name: &str) -> bool {
        let Some(clip) = self.model.and_then(|model| model.clips().get(name)) else {
            debug!("No clip named '{name}'");
            return false;
        };

        self.clip = Some(clip);
        true
    }

    /// Advance the blend by `delta` and step frames once it reaches 1
    pub fn tick(&mut self, delta: f32) {
        let Some(clip) = self.clip else {
            return;
        };

        if !clip.contains(self.current_frame) {
            self.current_frame = clip.start;
            self.next_frame = clip.wrap(self.current_frame + 1);
        } else if !clip.contains(self.next_frame) {
            self.next_frame = clip.wrap(self.current_frame + 1);
        }

        self.blend += delta;
        if self.blend >= 1.0 {
            self.blend = 0.0;
            self.current_frame = clip.wrap(self.current_frame + 1);
            self.next_frame = clip.wrap(self.current_frame + 1);
        }
    }

    /// Tick by the stored step
    pub fn advance(&mut self) {
        self.tick(self.step);
    }

    /// Store the blend increment used by [`advance`](Self::advance)
    pub fn set_step(&mut self, step: f32) {
        self.step = step;
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Interpolated pose at the current position, `None` without an active clip
    pub fn pose(&self, scale: f32) -> Result<Option<Vec<PoseVertex>>> {
        match (self.model, self.clip) {
            (Some(model), Some(_)) => {
                interpolate(model, self.current_frame, self.next_frame, self.blend, scale).map(Some)
            }
            _ => Ok(None),
        }
    }

    pub fn model(&self) -> Option<&'m Md2Model> {
        self.model
    }

    /// Active clip
    pub fn clip(&self) -> Option<&'m AnimClip> {
        self.clip
    }

    pub fn is_bound(&self) -> bool {
        self.model.is_some()
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn next_frame(&self) -> usize {
        self.next_frame
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }
}
