//! Animation clips derived from frame names
//!
//! MD2 files carry no animation table. Frames are named after the animation
//! they belong to plus a frame number (`stand01`, `run3`, `pain204`), and
//! consecutive frames sharing a base name form one clip.

use log::{debug, warn};
use std::ops::Range;

/// A named, half-open range of frames
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnimClip {
    /// Base name shared by the frames
    pub name: String,
    /// First frame of the clip
    pub start: usize,
    /// One past the last frame of the clip
    pub end: usize,
}

impl AnimClip {
    /// Number of frames in the clip
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clips built from frames are never empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check whether a frame belongs to the clip
    pub fn contains(&self, frame: usize) -> bool {
        self.frames().contains(&frame)
    }

    /// Frame indices as a range
    pub fn frames(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Wrap a frame back to the start once it leaves the clip
    pub fn wrap(&self, frame: usize) -> usize {
        if self.contains(frame) {
            frame
        } else {
            self.start
        }
    }
}

/// Clip table of a model, ordered by name and then start frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimClips {
    clips: Vec<AnimClip>,
}

impl AnimClips {
    /// Number of clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Check whether the table is empty (only for models without frames)
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Look a clip up by name. When a name occurs in several runs of frames
    /// the earliest run is returned.
    pub fn get(&self, name: &str) -> Option<&AnimClip> {
        self.index_of(name).map(|index| &self.clips[index])
    }

    /// Position of a clip in enumeration order
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let index = self
            .clips
            .partition_point(|clip| clip.name.as_str() < name);
        (self.clips.get(index)?.name == name).then_some(index)
    }

    /// First clip in enumeration order
    pub fn first(&self) -> Option<&AnimClip> {
        self.clips.first()
    }

    /// Iterate clips in enumeration order
    pub fn iter(&self) -> std::slice::Iter<'_, AnimClip> {
        self.clips.iter()
    }

    /// Clips as a slice, in enumeration order
    pub fn as_slice(&self) -> &[AnimClip] {
        &self.clips
    }
}

impl<'a> IntoIterator for &'a AnimClips {
    type Item = &'a AnimClip;
    type IntoIter = std::slice::Iter<'a, AnimClip>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Derive the clip name of a frame.
///
/// The name is cut at its first digit. A three character numeric suffix that
/// does not start with `0` keeps its first digit, so `pain101` and `pain201`
/// end up in the clips `pain1` and `pain2` while `stand10` stays in `stand`.
pub fn clip_name(frame_name: &str) -> &str {
    let Some(mut len) = frame_name.find(|c: char| c.is_ascii_digit()) else {
        return frame_name;
    };

    let suffix = &frame_name[len..];
    if suffix.chars().count() == 3 && !suffix.starts_with('0') {
        // The first suffix char is an ASCII digit, one byte wide
        len += 1;
    }

    &frame_name[..len]
}

/// Partition a sequence of frame names into clips.
///
/// Consecutive frames with the same clip name form one clip; the ranges cover
/// every frame exactly once.
pub fn build_clips<I, S>(frame_names: I) -> AnimClips
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut clips: Vec<AnimClip> = Vec::new();

    for (index, frame_name) in frame_names.into_iter().enumerate() {
        let name = clip_name(frame_name.as_ref());
        match clips.last_mut() {
            Some(clip) if clip.name == name => clip.end = index + 1,
            _ => clips.push(AnimClip {
                name: name.to_string(),
                start: index,
                end: index + 1,
            }),
        }
    }

    clips.sort_by(|a, b| a.name.cmp(&b.name).then(a.start.cmp(&b.start)));

    for pair in clips.windows(2) {
        if pair[0].name == pair[1].name {
            warn!(
                "Clip '{}' appears at frames {:?} and {:?}; lookups use the first",
                pair[0].name,
                pair[0].frames(),
                pair[1].frames()
            );
        }
    }

    for clip in &clips {
        debug!("Clip '{}': frames {:?}", clip.name, clip.frames());
    }

    AnimClips { clips }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("stand01", "stand" ; "two digit suffix")]
    #[test_case("stand10", "stand" ; "suffix of ten")]
    #[test_case("run1", "run" ; "one digit suffix")]
    #[test_case("pain101", "pain1" ; "three digit suffix keeps one digit")]
    #[test_case("pain301", "pain3" ; "three digit suffix third variant")]
    #[test_case("death001", "death" ; "three digit suffix starting with zero")]
    #[test_case("flip", "flip" ; "no digits")]
    #[test_case("123", "1" ; "only digits")]
    #[test_case("", "" ; "empty")]
    #[test_case("run1\u{ff}2", "run1" ; "high byte in suffix counts as one char")]
    #[test_case("pos\u{e9}101", "pos\u{e9}1" ; "high byte before suffix")]
    fn test_clip_name(frame: &str, expected: &str) {
        assert_eq!(clip_name(frame), expected);
    }

    fn ranges(clips: &AnimClips) -> Vec<(&str, usize, usize)> {
        clips
            .iter()
            .map(|c| (c.name.as_str(), c.start, c.end))
            .collect()
    }

    #[test]
    fn test_stand_and_run() {
        let clips = build_clips(["stand1", "stand2", "stand10", "run1", "run2"]);
        assert_eq!(ranges(&clips), vec![("run", 3, 5), ("stand", 0, 3)]);

        let stand = clips.get("stand").unwrap();
        assert_eq!(stand.frames(), 0..3);
        assert_eq!(stand.len(), 3);
        assert_eq!(clips.index_of("stand"), Some(1));
        assert_eq!(clips.first().map(|c| c.name.as_str()), Some("run"));
        assert!(clips.get("jump").is_none());
    }

    #[test]
    fn test_no_frames() {
        let clips = build_clips(Vec::<String>::new());
        assert!(clips.is_empty());
        assert!(clips.first().is_none());
    }

    #[test_log::test]
    fn test_duplicate_runs_are_kept() {
        let clips = build_clips(["stand1", "stand2", "run1", "stand3"]);
        assert_eq!(
            ranges(&clips),
            vec![("run", 2, 3), ("stand", 0, 2), ("stand", 3, 4)]
        );
        assert_eq!(clips.get("stand").map(AnimClip::frames), Some(0..2));
        assert_eq!(clips.index_of("stand"), Some(1));
    }

    #[test]
    fn test_clips_partition_frames() {
        let names = [
            "stand01", "stand02", "run1", "run2", "run3", "pain101", "pain102", "pain201",
            "death001", "death002", "flip",
        ];
        let clips = build_clips(names);

        let mut covered: Vec<usize> = clips.iter().flat_map(AnimClip::frames).collect();
        covered.sort_unstable();
        assert_eq!(covered, (0..names.len()).collect::<Vec<_>>());
        assert!(clips.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_wrap() {
        let clip = AnimClip {
            name: "run".to_string(),
            start: 3,
            end: 6,
        };
        assert_eq!(clip.wrap(4), 4);
        assert_eq!(clip.wrap(6), 3);
        assert_eq!(clip.wrap(1), 3);
    }
}
