use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::error::PcxError;
use crate::header::Header;
use crate::limits::{Limits, rgba_len};
use crate::palette::Palette;
use crate::pixels;

/// Builder for a single decode call.
///
/// ```no_run
/// use zenpcx::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your PCX bytes
/// let limits = Limits {
///     max_pixels: Some(16_000_000),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.pixels().len(), image.width() as usize * image.height() as usize * 4);
/// # Ok::<(), zenpcx::PcxError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Decode the complete file in `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before any pixel memory is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the decode. `stop` is polled between scanlines; pass
    /// [`enough::Unstoppable`] for a plain uninterruptible decode.
    pub fn decode(self, stop: impl Stop) -> Result<DecodedImage, PcxError> {
        let header = Header::parse(self.data)?;
        let (width, height) = (header.width(), header.height());
        let out_len = match self.limits {
            Some(limits) => limits.check(width, height)?,
            None => rgba_len(width, height)?,
        };
        stop.check()?;
        let decoded = pixels::decode_pixels(self.data, &header, out_len, &stop)?;
        Ok(DecodedImage {
            pixels: decoded.pixels,
            width,
            height,
            header,
            palette: decoded.palette,
        })
    }
}

/// A fully decoded PCX image: RGBA8 pixels, row-major, top row first,
/// alpha always 255.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    header: Header,
    palette: Option<Palette>,
}

impl DecodedImage {
    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data, `width * height * 4` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The parsed file header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The palette pixels were resolved through, or `None` for 24-bit
    /// true-color images.
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Reinterpret pixel data as typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::RGBA8] {
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::RGBA8> {
        imgref::ImgRef::new(
            self.as_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }

    /// Convert to an [`imgref::ImgVec`] of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGBA8> {
        imgref::ImgVec::new(
            self.as_pixels().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}
