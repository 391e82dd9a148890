use crate::error::PcxError;
use crate::header::{ColorMode, Header, MAGIC};

/// Image metadata obtained from the header alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u8,
    pub planes: u8,
    pub color_mode: ColorMode,
    /// Resolution hint `(horizontal, vertical)`.
    pub dpi: (u16, u16),
}

impl ImageInfo {
    /// Probe a PCX buffer without decoding pixels.
    ///
    /// Fails like a decode would on a bad header or an unsupported
    /// bits/planes combination. Palette and stream problems only surface
    /// when decoding.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PcxError> {
        let header = Header::parse(data)?;
        Ok(Self {
            width: header.width(),
            height: header.height(),
            bits_per_pixel: header.bits_per_pixel(),
            planes: header.planes(),
            color_mode: header.color_mode()?,
            dpi: header.dpi(),
        })
    }
}

/// Whether `data` starts with the PCX magic byte.
pub fn is_pcx(data: &[u8]) -> bool {
    data.first() == Some(&MAGIC)
}
