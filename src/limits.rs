use alloc::format;

use crate::error::PcxError;

/// Resource limits applied before the RGBA output buffer is allocated.
///
/// All fields default to `None` (no limit). PCX geometry is bounded by
/// 16-bit coordinates, so the worst case without limits is a
/// 65536x65536 image (16 GiB of RGBA).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum size in bytes of the RGBA output buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Validate `width` x `height` against every configured limit.
    ///
    /// Returns the RGBA output size in bytes on success.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<usize, PcxError> {
        if let Some(max_w) = self.max_width.filter(|&m| width > m) {
            return Err(PcxError::LimitExceeded(format!(
                "width {width} exceeds limit {max_w}"
            )));
        }
        if let Some(max_h) = self.max_height.filter(|&m| height > m) {
            return Err(PcxError::LimitExceeded(format!(
                "height {height} exceeds limit {max_h}"
            )));
        }
        let pixels = u64::from(width) * u64::from(height);
        if let Some(max_px) = self.max_pixels.filter(|&m| pixels > m) {
            return Err(PcxError::LimitExceeded(format!(
                "pixel count {pixels} exceeds limit {max_px}"
            )));
        }
        let bytes = rgba_len(width, height)?;
        if let Some(max_mem) = self.max_memory_bytes.filter(|&m| bytes as u64 > m) {
            return Err(PcxError::LimitExceeded(format!(
                "allocation {bytes} bytes exceeds memory limit {max_mem}"
            )));
        }
        Ok(bytes)
    }
}

/// Byte length of a `width` x `height` RGBA8 buffer.
pub(crate) fn rgba_len(width: u32, height: u32) -> Result<usize, PcxError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(4))
        .ok_or(PcxError::DimensionsTooLarge { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert_eq!(limits.check(640, 480).unwrap(), 640 * 480 * 4);
    }

    #[test]
    fn each_limit_is_enforced() {
        let limits = Limits {
            max_width: Some(10),
            max_height: Some(20),
            max_pixels: Some(150),
            max_memory_bytes: Some(580),
        };
        assert_eq!(limits.check(10, 14).unwrap(), 560);
        assert!(matches!(limits.check(11, 1), Err(PcxError::LimitExceeded(_))));
        assert!(matches!(limits.check(1, 21), Err(PcxError::LimitExceeded(_))));
        assert!(matches!(limits.check(10, 16), Err(PcxError::LimitExceeded(_))));
        // 150 pixels passes the pixel cap but needs 600 bytes
        assert!(matches!(limits.check(10, 15), Err(PcxError::LimitExceeded(_))));
    }
}
