//! # zenpcx
//!
//! PCX (ZSoft Paintbrush) image decoder producing RGBA8.
//!
//! Decoding is a pure, synchronous transform: the input buffer is borrowed
//! for the call and a freshly allocated RGBA buffer is returned. Nothing is
//! cached between calls, so independent files can be decoded in parallel.
//!
//! ## Supported Formats
//!
//! - **8-bit indexed** (1 plane) — colors from the 256-entry palette that
//!   trails the pixel data (marker byte `0x0C`)
//! - **24-bit true-color** (3 planes of 8 bits: red, green, blue)
//! - **1-bit planar** (1 to 4 planes) — monochrome, CGA-style and EGA
//!   16-color images, colors from the header's 16-entry palette
//!
//! ## Non-Goals
//!
//! - Encoding
//! - 2-bit and 4-bit packed pixels, 4-plane 8-bit (RGBA) files
//! - Streaming decode; the whole file must be in memory
//!
//! ## Usage
//!
//! ```no_run
//! use zenpcx::ImageInfo;
//!
//! let data: &[u8] = &[]; // your PCX bytes
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.color_mode);
//!
//! let image = zenpcx::decode(data)?;
//! assert_eq!(image.pixels().len(), image.width() as usize * image.height() as usize * 4);
//! # Ok::<(), zenpcx::PcxError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod header;
mod info;
mod limits;
mod palette;
mod pixels;
mod rle;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeRequest, DecodedImage};
pub use enough::{Stop, Unstoppable};
pub use error::PcxError;
pub use header::{ColorMode, HEADER_LEN, Header, MAGIC};
pub use info::{ImageInfo, is_pcx};
pub use limits::Limits;
pub use palette::{PALETTE_LEN, PALETTE_MARKER, Palette};

/// Decode a complete PCX file to RGBA8.
pub fn decode(data: &[u8]) -> Result<DecodedImage, PcxError> {
    DecodeRequest::new(data).decode(Unstoppable)
}

/// Parse and validate the 128-byte header.
pub fn parse_header(data: &[u8]) -> Result<Header, PcxError> {
    Header::parse(data)
}

/// Decode the pixels of `data` described by an already parsed `header`.
///
/// Returns the RGBA8 buffer only; use [`decode`] to also get the palette.
pub fn decode_pixels(data: &[u8], header: &Header) -> Result<Vec<u8>, PcxError> {
    let out_len = limits::rgba_len(header.width(), header.height())?;
    Ok(pixels::decode_pixels(data, header, out_len, &Unstoppable)?.pixels)
}
