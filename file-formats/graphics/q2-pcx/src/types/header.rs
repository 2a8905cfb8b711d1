use custom_debug::Debug;
use q2_utils::debug;

/// Manufacturer byte every PCX file starts with (ZSoft)
pub const PCX_MAGIC: u8 = 0x0A;
/// Size of the fixed header block at the start of the file
pub const PCX_HEADER_SIZE: usize = 128;
/// Byte expected right before the trailing 256-color palette
pub const PCX_PALETTE_MARKER: u8 = 0x0C;

/// Parsed PCX header. Field order strictly follows the on-disk layout,
/// all 16-bit values are little-endian.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PcxHeader {
    /// Manufacturer tag, always [`PCX_MAGIC`] for valid files
    pub manufacturer: u8,
    /// PC Paintbrush version that wrote the file
    pub version: u8,
    /// Encoding, 1 means run-length encoded
    pub encoding: u8,
    /// Bits per pixel per plane, 8 for palettized images
    pub bits_per_pixel: u8,
    /// Left edge of the image window (inclusive)
    pub xmin: u16,
    /// Top edge of the image window (inclusive)
    pub ymin: u16,
    /// Right edge of the image window (inclusive)
    pub xmax: u16,
    /// Bottom edge of the image window (inclusive)
    pub ymax: u16,
    /// Horizontal resolution in DPI
    pub horz_res: u16,
    /// Vertical resolution in DPI
    pub vert_res: u16,
    /// Embedded EGA palette, unused when the trailing palette is present
    #[debug(with = debug::trimmed_collection_fmt)]
    pub ega_palette: [u8; 48],
    /// Reserved, should be zero
    pub reserved: u8,
    /// Number of color planes, 1 for palettized images
    pub color_planes: u8,
    /// Decoded bytes per scanline per plane, may exceed the image width
    pub bytes_per_scanline: u16,
    /// Palette interpretation (1 = color, 2 = grayscale)
    pub palette_type: u16,
    /// Horizontal screen size
    pub horz_size: u16,
    /// Vertical screen size
    pub vert_size: u16,
}

impl PcxHeader {
    /// Image width derived from the inclusive bounding box.
    /// Negative when `xmax < xmin`.
    pub fn width(&self) -> i32 {
        i32::from(self.xmax) - i32::from(self.xmin) + 1
    }

    /// Image height derived from the inclusive bounding box.
    /// Negative when `ymax < ymin`.
    pub fn height(&self) -> i32 {
        i32::from(self.ymax) - i32::from(self.ymin) + 1
    }

    /// Whether the header describes the single-plane 8-bit layout this
    /// decoder supports
    pub fn is_palettized(&self) -> bool {
        self.bits_per_pixel == 8 && self.color_planes == 1
    }
}
