//! Scanline decoding: RLE stream to RGBA8.
//!
//! Each scanline is stored as `planes` consecutive plane lines of
//! `bytes_per_line` decompressed bytes. Bytes past the visible width are
//! padding: they are decompressed to keep the stream aligned, then dropped.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::PcxError;
use crate::header::{ColorMode, HEADER_LEN, Header};
use crate::palette::{PALETTE_TRAILER_LEN, Palette};
use crate::rle::RleReader;

/// Rows decoded between stop checks.
const STOP_INTERVAL: usize = 16;

/// Most decompressed bytes one compressed byte can produce (half of a
/// maximal two-byte run, rounded up).
const MAX_EXPANSION: u64 = 32;

/// RGBA pixels plus the palette they were resolved through.
pub(crate) struct DecodedPixels {
    pub pixels: Vec<u8>,
    pub palette: Option<Palette>,
}

/// Decode the pixel stream described by `header` into a fresh RGBA buffer
/// of `out_len` bytes.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &Header,
    out_len: usize,
    stop: &dyn Stop,
) -> Result<DecodedPixels, PcxError> {
    let mode = header.color_mode()?;
    let width = header.width() as usize;
    let bytes_per_line = usize::from(header.bytes_per_line());
    let needed = match mode {
        ColorMode::Planar { .. } => width.div_ceil(8),
        ColorMode::Indexed8 | ColorMode::TrueColor24 => width,
    };
    if bytes_per_line < needed {
        return Err(PcxError::ScanlineTooShort {
            bytes_per_line: header.bytes_per_line(),
            needed,
        });
    }

    log::debug!(
        "decoding {}x{} PCX v{} as {:?}, {} bytes per plane line",
        header.width(),
        header.height(),
        header.version(),
        mode,
        bytes_per_line
    );

    let planes = match mode {
        ColorMode::Indexed8 => 1,
        ColorMode::TrueColor24 => 3,
        ColorMode::Planar { planes } => u64::from(planes),
    };
    let expanded_len = u64::from(header.height()) * planes * bytes_per_line as u64;

    match mode {
        ColorMode::Indexed8 => {
            let palette = Palette::from_trailer(data)?;
            // from_trailer guarantees the header and trailer both fit
            let stream = &data[HEADER_LEN..data.len() - PALETTE_TRAILER_LEN];
            check_stream_len(stream, expanded_len)?;
            let pixels = decode_indexed8(stream, width, bytes_per_line, &palette, out_len, stop)?;
            Ok(DecodedPixels {
                pixels,
                palette: Some(palette),
            })
        }
        ColorMode::TrueColor24 => {
            let stream = data.get(HEADER_LEN..).unwrap_or_default();
            check_stream_len(stream, expanded_len)?;
            let pixels = decode_truecolor(stream, width, bytes_per_line, out_len, stop)?;
            Ok(DecodedPixels {
                pixels,
                palette: None,
            })
        }
        ColorMode::Planar { planes } => {
            let palette = Palette::from_header(header.header_palette());
            log::trace!("planar image uses header palette {palette:?}");
            let stream = data.get(HEADER_LEN..).unwrap_or_default();
            check_stream_len(stream, expanded_len)?;
            let pixels = decode_planar(
                stream,
                width,
                bytes_per_line,
                usize::from(planes),
                &palette,
                out_len,
                stop,
            )?;
            Ok(DecodedPixels {
                pixels,
                palette: Some(palette),
            })
        }
    }
}

/// Reject streams too short to expand to `expanded_len` bytes before the
/// output buffer is allocated.
fn check_stream_len(stream: &[u8], expanded_len: u64) -> Result<(), PcxError> {
    if (stream.len() as u64).saturating_mul(MAX_EXPANSION) < expanded_len {
        return Err(PcxError::TruncatedStream {
            offset: HEADER_LEN + stream.len(),
        });
    }
    Ok(())
}

fn decode_indexed8(
    stream: &[u8],
    width: usize,
    bytes_per_line: usize,
    palette: &Palette,
    out_len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PcxError> {
    let mut out = vec![0u8; out_len];
    let mut reader = RleReader::new(stream, HEADER_LEN);
    let mut line = vec![0u8; bytes_per_line];

    for (y, row) in out.chunks_exact_mut(width * 4).enumerate() {
        if y % STOP_INTERVAL == 0 {
            stop.check()?;
        }
        reader.read_line(&mut line)?;
        for (px, &index) in row.chunks_exact_mut(4).zip(&line[..width]) {
            px.copy_from_slice(&palette.rgba(index));
        }
    }
    log_trailing(&reader, stream.len());
    Ok(out)
}

fn decode_truecolor(
    stream: &[u8],
    width: usize,
    bytes_per_line: usize,
    out_len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PcxError> {
    let mut out = vec![0u8; out_len];
    let mut reader = RleReader::new(stream, HEADER_LEN);
    let mut line = vec![0u8; bytes_per_line];

    for (y, row) in out.chunks_exact_mut(width * 4).enumerate() {
        if y % STOP_INTERVAL == 0 {
            stop.check()?;
        }
        // Plane order is R, G, B; alpha goes in with the blue plane.
        for channel in 0..3 {
            reader.read_line(&mut line)?;
            for (px, &v) in row.chunks_exact_mut(4).zip(&line[..width]) {
                px[channel] = v;
                if channel == 2 {
                    px[3] = 255;
                }
            }
        }
    }
    log_trailing(&reader, stream.len());
    Ok(out)
}

fn decode_planar(
    stream: &[u8],
    width: usize,
    bytes_per_line: usize,
    planes: usize,
    palette: &Palette,
    out_len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PcxError> {
    let mut out = vec![0u8; out_len];
    let mut reader = RleReader::new(stream, HEADER_LEN);
    let mut line = vec![0u8; bytes_per_line];
    let mut indices = vec![0u8; width];

    for (y, row) in out.chunks_exact_mut(width * 4).enumerate() {
        if y % STOP_INTERVAL == 0 {
            stop.check()?;
        }
        indices.fill(0);
        for plane in 0..planes {
            reader.read_line(&mut line)?;
            accumulate_plane(&line, plane, &mut indices);
        }
        for (px, &index) in row.chunks_exact_mut(4).zip(&indices) {
            px.copy_from_slice(&palette.rgba(index));
        }
    }
    log_trailing(&reader, stream.len());
    Ok(out)
}

/// OR bit `plane` of each pixel's index in from one packed plane line.
///
/// The most significant bit of each byte is the leftmost pixel. Bits past
/// `indices.len()` are padding.
fn accumulate_plane(line: &[u8], plane: usize, indices: &mut [u8]) {
    for (chunk, &byte) in indices.chunks_mut(8).zip(line) {
        for (i, index) in chunk.iter_mut().enumerate() {
            *index |= ((byte >> (7 - i)) & 1) << plane;
        }
    }
}

fn log_trailing(reader: &RleReader<'_>, stream_len: usize) {
    let left = stream_len - reader.consumed();
    if left > 0 {
        log::debug!("{left} compressed bytes left after the last scanline");
    }
}
