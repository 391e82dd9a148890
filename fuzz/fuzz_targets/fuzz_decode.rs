#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic; a successful decode must fill the whole buffer.
    let _ = zenpcx::ImageInfo::from_bytes(data);
    if let Ok(image) = zenpcx::decode(data) {
        assert_eq!(
            image.pixels().len(),
            image.width() as usize * image.height() as usize * 4
        );
        assert!(image.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    // Tight limits must reject rather than allocate.
    let limits = zenpcx::Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let _ = zenpcx::DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
});
