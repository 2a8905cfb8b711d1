use custom_debug::Debug;
use q2_utils::debug;

/// Number of entries in the trailing palette
pub const PALETTE_COLORS: usize = 256;
/// Size in bytes of the trailing palette (256 RGB triples)
pub const PALETTE_SIZE: usize = PALETTE_COLORS * 3;

/// The 256-color palette stored in the last 768 bytes of the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette {
    #[debug(with = debug::trimmed_collection_fmt)]
    entries: [u8; PALETTE_SIZE],
}

impl Palette {
    /// Wrap raw palette bytes
    pub fn new(entries: [u8; PALETTE_SIZE]) -> Self {
        Self { entries }
    }

    /// Copy the palette out of a 768-byte slice. Returns `None` when the
    /// slice has a different length.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let entries: [u8; PALETTE_SIZE] = bytes.try_into().ok()?;
        Some(Self { entries })
    }

    /// Raw palette bytes, RGB triples in file order
    pub fn as_bytes(&self) -> &[u8; PALETTE_SIZE] {
        &self.entries
    }

    /// Look up a palette index and reorder its channels.
    #[inline]
    pub fn color(&self, index: u8, order: ComponentOrder) -> [u8; 3] {
        let base = usize::from(index) * 3;
        let [c0, c1, c2] = order.channels();
        [
            self.entries[base + c0],
            self.entries[base + c1],
            self.entries[base + c2],
        ]
    }
}

/// Channel order used when a palette entry is expanded into an output pixel.
///
/// Output channel `k` is read from palette component `channels()[k]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentOrder([usize; 3]);

impl ComponentOrder {
    /// Palette order is kept as-is
    pub const RGB: Self = Self([0, 1, 2]);
    /// Red and blue are swapped
    pub const BGR: Self = Self([2, 1, 0]);

    /// Build a custom order. Every entry must be a channel index below 3.
    pub fn new(channels: [usize; 3]) -> Option<Self> {
        channels.iter().all(|&c| c < 3).then_some(Self(channels))
    }

    /// Source channel for each output channel
    pub fn channels(self) -> [usize; 3] {
        self.0
    }
}

impl Default for ComponentOrder {
    fn default() -> Self {
        Self::RGB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette_with(index: usize, rgb: [u8; 3]) -> Palette {
        let mut entries = [0u8; PALETTE_SIZE];
        entries[index * 3..index * 3 + 3].copy_from_slice(&rgb);
        Palette::new(entries)
    }

    #[test]
    fn test_identity_order() {
        let palette = palette_with(5, [10, 20, 30]);
        assert_eq!(palette.color(5, ComponentOrder::default()), [10, 20, 30]);
    }

    #[test]
    fn test_swapped_order() {
        let palette = palette_with(255, [1, 2, 3]);
        assert_eq!(palette.color(255, ComponentOrder::BGR), [3, 2, 1]);
    }

    #[test]
    fn test_custom_order_validation() {
        assert_eq!(ComponentOrder::new([1, 1, 1]).map(|o| o.channels()), Some([1, 1, 1]));
        assert!(ComponentOrder::new([0, 1, 3]).is_none());
    }

    #[test]
    fn test_from_slice_length() {
        assert!(Palette::from_slice(&[0; PALETTE_SIZE]).is_some());
        assert!(Palette::from_slice(&[0; PALETTE_SIZE - 1]).is_none());
    }
}
