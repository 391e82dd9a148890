use alloc::string::String;
use enough::StopReason;

/// Errors from PCX decoding.
///
/// Every error is terminal for the decode call that produced it: no partial
/// pixel buffer is ever returned alongside one.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PcxError {
    #[error("input is {len} bytes, shorter than the 128-byte PCX header")]
    TruncatedHeader { len: usize },

    #[error("invalid PCX magic byte {0:#04x} (expected 0x0a)")]
    InvalidMagic(u8),

    #[error("invalid dimensions: x {xmin}..={xmax}, y {ymin}..={ymax}")]
    InvalidDimensions {
        xmin: u16,
        ymin: u16,
        xmax: u16,
        ymax: u16,
    },

    #[error("unsupported format: {bits_per_pixel} bits per pixel with {planes} planes")]
    UnsupportedFormat { bits_per_pixel: u8, planes: u8 },

    #[error("256-color palette marker missing from end of file")]
    MissingPalette,

    #[error("compressed pixel stream ends early at offset {offset}")]
    TruncatedStream { offset: usize },

    #[error("scanline of {bytes_per_line} bytes per plane cannot hold {needed} bytes of pixels")]
    ScanlineTooShort { bytes_per_line: u16, needed: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PcxError {
    fn from(r: StopReason) -> Self {
        PcxError::Cancelled(r)
    }
}
