//! PCX run-length decompression.
//!
//! A byte with both high bits set (`0xC0..=0xFF`) is a run: its low six bits
//! are a count and the next byte is repeated that many times. Any other byte
//! is a single literal. Runs are not bounded by scanlines or planes, so the
//! reader carries an unfinished run into the next line.

use crate::error::PcxError;

const RUN_FLAG: u8 = 0xc0;
const COUNT_MASK: u8 = 0x3f;

/// Cursor over a compressed PCX pixel stream.
pub(crate) struct RleReader<'a> {
    data: &'a [u8],
    pos: usize,
    /// File offset of `data[0]`, for error reporting.
    origin: usize,
    run: u8,
    value: u8,
}

impl<'a> RleReader<'a> {
    pub(crate) fn new(data: &'a [u8], origin: usize) -> Self {
        Self {
            data,
            pos: 0,
            origin,
            run: 0,
            value: 0,
        }
    }

    fn read_raw(&mut self) -> Result<u8, PcxError> {
        let b = *self.data.get(self.pos).ok_or(PcxError::TruncatedStream {
            offset: self.origin + self.pos,
        })?;
        self.pos += 1;
        Ok(b)
    }

    /// Next decompressed byte.
    #[inline]
    pub(crate) fn next_byte(&mut self) -> Result<u8, PcxError> {
        loop {
            if self.run > 0 {
                self.run -= 1;
                return Ok(self.value);
            }
            let control = self.read_raw()?;
            if control & RUN_FLAG != RUN_FLAG {
                return Ok(control);
            }
            // 0xC0 is a zero-length run: consume its value and move on.
            self.run = control & COUNT_MASK;
            self.value = self.read_raw()?;
        }
    }

    /// Fill `line` with one plane's worth of decompressed scanline bytes,
    /// padding included.
    pub(crate) fn read_line(&mut self, line: &mut [u8]) -> Result<(), PcxError> {
        for b in line.iter_mut() {
            *b = self.next_byte()?;
        }
        Ok(())
    }

    /// Compressed bytes consumed so far.
    pub(crate) fn consumed(&self) -> usize {
        self.pos
    }
}
