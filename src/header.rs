//! PCX header parsing.
//!
//! The header is a fixed 128-byte record. All multi-byte fields are
//! little-endian; bytes 68..128 (palette info, screen size, filler) carry
//! nothing the decoder needs and are ignored.

use crate::error::PcxError;

/// Size of the fixed PCX header. Compressed scanlines start here.
pub const HEADER_LEN: usize = 128;

/// Byte 0 of every PCX file (ZSoft manufacturer id).
pub const MAGIC: u8 = 0x0a;

/// Length of the 16-color palette embedded at offset 16.
pub const HEADER_PALETTE_LEN: usize = 48;

/// How the pixel stream maps to color, derived from bits-per-pixel and
/// plane count.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// 8 bits, 1 plane: palette indices resolved through the trailing
    /// 256-color palette.
    Indexed8,
    /// 8 bits, 3 planes: one plane each of red, green, blue.
    TrueColor24,
    /// 1 bit per plane, 1 to 4 planes: bit `p` of a pixel's index comes from
    /// plane `p`; colors come from the header's 16-color palette.
    Planar { planes: u8 },
}

impl ColorMode {
    /// Classify a bits-per-pixel / plane-count pair.
    pub fn from_layout(bits_per_pixel: u8, planes: u8) -> Result<Self, PcxError> {
        match (bits_per_pixel, planes) {
            (8, 1) => Ok(Self::Indexed8),
            (8, 3) => Ok(Self::TrueColor24),
            (1, 1..=4) => Ok(Self::Planar { planes }),
            _ => Err(PcxError::UnsupportedFormat {
                bits_per_pixel,
                planes,
            }),
        }
    }

    /// Whether pixels go through a palette lookup.
    pub fn is_indexed(self) -> bool {
        !matches!(self, Self::TrueColor24)
    }
}

/// Decoded PCX header.
///
/// Only [`Header::parse`] constructs one, so every `Header` in hand has a
/// valid magic byte and a non-empty bounding box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    version: u8,
    encoding: u8,
    bits_per_pixel: u8,
    xmin: u16,
    ymin: u16,
    xmax: u16,
    ymax: u16,
    hdpi: u16,
    vdpi: u16,
    palette: [u8; HEADER_PALETTE_LEN],
    planes: u8,
    bytes_per_line: u16,
    width: u32,
    height: u32,
}

impl Header {
    /// Parse and validate the header at the start of `data`.
    ///
    /// A first byte other than 0x0a is reported as
    /// [`PcxError::InvalidMagic`] even when the buffer is also too short to
    /// hold a header.
    pub fn parse(data: &[u8]) -> Result<Self, PcxError> {
        match data.first() {
            Some(&MAGIC) => {}
            Some(&other) => return Err(PcxError::InvalidMagic(other)),
            None => return Err(PcxError::TruncatedHeader { len: 0 }),
        }
        let raw: &[u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or(PcxError::TruncatedHeader { len: data.len() })?;

        let word = |off: usize| u16::from_le_bytes([raw[off], raw[off + 1]]);
        let (xmin, ymin, xmax, ymax) = (word(4), word(6), word(8), word(10));

        // Compare before subtracting: the bounds are unsigned.
        if xmax < xmin || ymax < ymin {
            return Err(PcxError::InvalidDimensions {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }

        let mut palette = [0u8; HEADER_PALETTE_LEN];
        palette.copy_from_slice(&raw[16..16 + HEADER_PALETTE_LEN]);

        Ok(Self {
            version: raw[1],
            encoding: raw[2],
            bits_per_pixel: raw[3],
            xmin,
            ymin,
            xmax,
            ymax,
            hdpi: word(12),
            vdpi: word(14),
            palette,
            planes: raw[65],
            bytes_per_line: word(66),
            width: u32::from(xmax - xmin) + 1,
            height: u32::from(ymax - ymin) + 1,
        })
    }

    /// Format version (0, 2, 3, 4 or 5 in practice).
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Encoding byte. 1 means run-length; the decoder treats every stream as
    /// run-length regardless.
    pub fn encoding(&self) -> u8 {
        self.encoding
    }

    /// Bits per pixel per plane.
    pub fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    /// Number of color planes.
    pub fn planes(&self) -> u8 {
        self.planes
    }

    /// Bytes per scanline per plane, including padding.
    pub fn bytes_per_line(&self) -> u16 {
        self.bytes_per_line
    }

    /// Inclusive bounding box `(xmin, ymin, xmax, ymax)`.
    pub fn bounds(&self) -> (u16, u16, u16, u16) {
        (self.xmin, self.ymin, self.xmax, self.ymax)
    }

    /// `xmax - xmin + 1`, always at least 1.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// `ymax - ymin + 1`, always at least 1.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resolution hint `(horizontal, vertical)`.
    pub fn dpi(&self) -> (u16, u16) {
        (self.hdpi, self.vdpi)
    }

    /// The 48-byte, 16-entry palette embedded in the header.
    pub fn header_palette(&self) -> &[u8; HEADER_PALETTE_LEN] {
        &self.palette
    }

    /// Classify this header's pixel layout.
    pub fn color_mode(&self) -> Result<ColorMode, PcxError> {
        ColorMode::from_layout(self.bits_per_pixel, self.planes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn raw_header(bpp: u8, planes: u8, bounds: [u16; 4], bpl: u16) -> Vec<u8> {
        let mut h = vec![0u8; HEADER_LEN];
        h[0] = MAGIC;
        h[1] = 5;
        h[2] = 1;
        h[3] = bpp;
        for (i, v) in bounds.iter().enumerate() {
            h[4 + i * 2..6 + i * 2].copy_from_slice(&v.to_le_bytes());
        }
        h[12..14].copy_from_slice(&300u16.to_le_bytes());
        h[14..16].copy_from_slice(&150u16.to_le_bytes());
        h[65] = planes;
        h[66..68].copy_from_slice(&bpl.to_le_bytes());
        h
    }

    #[test]
    fn ten_by_ten() {
        let mut data = vec![10, 5, 1, 8, 0, 0, 0, 0, 9, 0, 9, 0];
        data.resize(HEADER_LEN, 0);
        let header = Header::parse(&data).unwrap();
        assert_eq!(header.width(), 10);
        assert_eq!(header.height(), 10);
        assert_eq!(header.version(), 5);
        assert_eq!(header.encoding(), 1);
        assert_eq!(header.bits_per_pixel(), 8);
    }

    #[test]
    fn fields_at_fixed_offsets() {
        let mut data = raw_header(1, 4, [3, 7, 42, 19], 6);
        for i in 0..HEADER_PALETTE_LEN {
            data[16 + i] = i as u8;
        }
        let header = Header::parse(&data).unwrap();
        assert_eq!(header.bounds(), (3, 7, 42, 19));
        assert_eq!(header.width(), 40);
        assert_eq!(header.height(), 13);
        assert_eq!(header.dpi(), (300, 150));
        assert_eq!(header.planes(), 4);
        assert_eq!(header.bytes_per_line(), 6);
        assert_eq!(header.header_palette()[0], 0);
        assert_eq!(header.header_palette()[47], 47);
        assert_eq!(header.color_mode().unwrap(), ColorMode::Planar { planes: 4 });
    }

    #[test]
    fn single_pixel_bounds() {
        let data = raw_header(8, 1, [5, 5, 5, 5], 2);
        let header = Header::parse(&data).unwrap();
        assert_eq!((header.width(), header.height()), (1, 1));
    }

    #[test]
    fn full_u16_range() {
        let data = raw_header(8, 1, [0, 0, u16::MAX, u16::MAX], 0);
        let header = Header::parse(&data).unwrap();
        assert_eq!(header.width(), 65536);
        assert_eq!(header.height(), 65536);
    }

    #[test]
    fn inverted_bounds_rejected() {
        let data = raw_header(8, 1, [10, 0, 9, 0], 2);
        assert!(matches!(
            Header::parse(&data),
            Err(PcxError::InvalidDimensions { xmin: 10, xmax: 9, .. })
        ));
        let data = raw_header(8, 1, [0, 4, 0, 3], 2);
        assert!(matches!(
            Header::parse(&data),
            Err(PcxError::InvalidDimensions { ymin: 4, ymax: 3, .. })
        ));
    }

    #[test]
    fn magic_checked_before_length() {
        assert!(matches!(Header::parse(&[0x89]), Err(PcxError::InvalidMagic(0x89))));
        let mut data = raw_header(8, 1, [0, 0, 1, 1], 2);
        data[0] = 0x0b;
        assert!(matches!(Header::parse(&data), Err(PcxError::InvalidMagic(0x0b))));
    }

    #[test]
    fn short_input() {
        assert!(matches!(
            Header::parse(&[]),
            Err(PcxError::TruncatedHeader { len: 0 })
        ));
        let data = raw_header(8, 1, [0, 0, 1, 1], 2);
        assert!(matches!(
            Header::parse(&data[..127]),
            Err(PcxError::TruncatedHeader { len: 127 })
        ));
    }

    #[test]
    fn color_modes() {
        assert_eq!(ColorMode::from_layout(8, 1).unwrap(), ColorMode::Indexed8);
        assert_eq!(ColorMode::from_layout(8, 3).unwrap(), ColorMode::TrueColor24);
        for planes in 1..=4 {
            assert_eq!(
                ColorMode::from_layout(1, planes).unwrap(),
                ColorMode::Planar { planes }
            );
        }
        for (bpp, planes) in [(8, 4), (8, 0), (1, 0), (1, 5), (2, 1), (4, 1), (24, 1)] {
            assert!(matches!(
                ColorMode::from_layout(bpp, planes),
                Err(PcxError::UnsupportedFormat { bits_per_pixel, planes: p })
                    if bits_per_pixel == bpp && p == planes
            ));
        }
        assert!(ColorMode::Indexed8.is_indexed());
        assert!(!ColorMode::TrueColor24.is_indexed());
    }
}
