//! Palette resolution for the indexed color modes.

use crate::error::PcxError;
use crate::header::{HEADER_LEN, HEADER_PALETTE_LEN};

/// Marker byte that precedes the trailing 256-color palette.
pub const PALETTE_MARKER: u8 = 0x0c;

/// Size of a full 256-entry RGB palette.
pub const PALETTE_LEN: usize = 768;

/// Marker plus palette at the end of an 8-bit indexed file.
pub(crate) const PALETTE_TRAILER_LEN: usize = PALETTE_LEN + 1;

/// 256 RGB triples.
///
/// Palettes built from the 16-color header table have entries 16..256 set
/// to black; 1-bit planar images can only index the first 16.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    rgb: [u8; PALETTE_LEN],
}

impl Palette {
    /// Expand the 48-byte header palette to 256 entries.
    pub fn from_header(table: &[u8; HEADER_PALETTE_LEN]) -> Self {
        let mut rgb = [0u8; PALETTE_LEN];
        rgb[..HEADER_PALETTE_LEN].copy_from_slice(table);
        Self { rgb }
    }

    /// Read the 256-color palette trailing an 8-bit indexed file.
    ///
    /// `data` is the whole file. The marker is expected at `len - 769`.
    /// A file with no byte at that offset fails with
    /// [`PcxError::TruncatedStream`]; a wrong marker byte fails with
    /// [`PcxError::MissingPalette`]; a marked trailer that overlaps the
    /// header fails with [`PcxError::TruncatedStream`].
    pub fn from_trailer(data: &[u8]) -> Result<Self, PcxError> {
        let start = data
            .len()
            .checked_sub(PALETTE_TRAILER_LEN)
            .ok_or(PcxError::TruncatedStream { offset: data.len() })?;
        let (marker, table) = data[start..]
            .split_first()
            .ok_or(PcxError::MissingPalette)?;
        if *marker != PALETTE_MARKER {
            log::trace!("byte {marker:#04x} where the palette marker belongs");
            return Err(PcxError::MissingPalette);
        }
        if start < HEADER_LEN {
            return Err(PcxError::TruncatedStream { offset: data.len() });
        }
        let mut rgb = [0u8; PALETTE_LEN];
        rgb.copy_from_slice(table);
        Ok(Self { rgb })
    }

    /// RGB triple for `index`: bytes `3i`, `3i + 1`, `3i + 2`.
    #[inline]
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        let i = usize::from(index) * 3;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }

    /// RGBA for `index`, alpha always 255.
    #[inline]
    pub fn rgba(&self, index: u8) -> [u8; 4] {
        let [r, g, b] = self.rgb(index);
        [r, g, b, 255]
    }

    /// Raw 768-byte table.
    pub fn as_bytes(&self) -> &[u8; PALETTE_LEN] {
        &self.rgb
    }

    /// The palette as typed RGB entries.
    #[cfg(feature = "rgb")]
    pub fn colors(&self) -> &[rgb::RGB8] {
        use rgb::AsPixels as _;
        self.rgb[..].as_pixels()
    }
}

impl core::fmt::Debug for Palette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Palette")
            .field("first", &self.rgb(0))
            .field("last", &self.rgb(255))
            .finish_non_exhaustive()
    }
}
