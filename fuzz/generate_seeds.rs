#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(bpp: u8, planes: u8, width: u16, height: u16, bpl: u16) -> Vec<u8> {
    let mut h = vec![0u8; 128];
    h[0] = 0x0a; h[1] = 5; h[2] = 1; h[3] = bpp;
    h[8..10].copy_from_slice(&(width - 1).to_le_bytes()); // xmax
    h[10..12].copy_from_slice(&(height - 1).to_le_bytes()); // ymax
    h[65] = planes;
    h[66..68].copy_from_slice(&bpl.to_le_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 8-bit indexed 2x2, one run per line, gray ramp palette
    let mut indexed = header(8, 1, 2, 2, 2);
    indexed.extend_from_slice(&[0xc2, 0x01, 0x02, 0x03]);
    indexed.push(0x0c);
    indexed.extend((0..768).map(|i| (i / 3) as u8));
    fs::write(format!("{dir}/indexed_2x2.pcx"), &indexed).unwrap();

    // 24-bit 2x1: R, G, B plane lines
    let mut rgb = header(8, 3, 2, 1, 2);
    rgb.extend_from_slice(&[0xc2, 0xff, 0x00, 0x80, 0x10, 0x20]);
    fs::write(format!("{dir}/rgb_2x1.pcx"), rgb).unwrap();

    // 1-bit 4-plane 8x2 with EGA-ish header palette
    let mut ega = header(1, 4, 8, 2, 2);
    for (i, b) in ega[16..64].iter_mut().enumerate() {
        *b = (i * 5) as u8;
    }
    for _ in 0..2 {
        ega.extend_from_slice(&[0x55, 0x00, 0x33, 0x00, 0x0f, 0x00, 0xc1, 0xf0, 0x00]);
    }
    fs::write(format!("{dir}/planar_8x2.pcx"), ega).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"\x0a").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(8, 1, 64, 64, 64)).unwrap();
    let mut no_marker = indexed.clone();
    let marker = no_marker.len() - 769;
    no_marker[marker] = 0;
    fs::write(format!("{dir}/no_palette_marker.bin"), no_marker).unwrap();

    println!("Generated seed corpus in {dir}/");
}
