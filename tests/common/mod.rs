//! Minimal PCX writer for tests. Emits the same layouts the decoder reads:
//! version 5 header, RLE scanlines padded to an even byte count, and a
//! trailing 256-color palette for 8-bit indexed images.

#![allow(dead_code)]

/// Build a 128-byte header.
pub fn header(bpp: u8, planes: u8, width: u16, height: u16, bpl: u16, ega: &[u8; 48]) -> Vec<u8> {
    let mut h = vec![0u8; 128];
    h[0] = 10;
    h[1] = 5;
    h[2] = 1;
    h[3] = bpp;
    h[8..10].copy_from_slice(&(width - 1).to_le_bytes());
    h[10..12].copy_from_slice(&(height - 1).to_le_bytes());
    h[12..14].copy_from_slice(&72u16.to_le_bytes());
    h[14..16].copy_from_slice(&72u16.to_le_bytes());
    h[16..64].copy_from_slice(ega);
    h[65] = planes;
    h[66..68].copy_from_slice(&bpl.to_le_bytes());
    h
}

/// Run-length encode one plane line. Runs never cross lines.
pub fn rle_line(line: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < line.len() {
        let v = line[i];
        let mut run = 1;
        while i + run < line.len() && line[i + run] == v && run < 63 {
            run += 1;
        }
        if run > 1 || v >= 0xc0 {
            out.push(0xc0 | run as u8);
        }
        out.push(v);
        i += run;
    }
}

fn even(n: usize) -> usize {
    n + (n & 1)
}

/// 8-bit indexed image with a trailing palette.
pub fn encode_indexed8(indices: &[u8], width: u16, height: u16, palette: &[u8; 768]) -> Vec<u8> {
    let w = usize::from(width);
    let bpl = even(w);
    let mut out = header(8, 1, width, height, bpl as u16, &[0; 48]);
    let mut line = vec![0u8; bpl];
    for row in indices.chunks_exact(w) {
        line[..w].copy_from_slice(row);
        rle_line(&line, &mut out);
    }
    out.push(12);
    out.extend_from_slice(palette);
    out
}

/// 24-bit image from packed RGB.
pub fn encode_truecolor(rgb: &[u8], width: u16, height: u16) -> Vec<u8> {
    let w = usize::from(width);
    let bpl = even(w);
    let mut out = header(8, 3, width, height, bpl as u16, &[0; 48]);
    let mut line = vec![0u8; bpl];
    for row in rgb.chunks_exact(w * 3) {
        for channel in 0..3 {
            for (dst, px) in line.iter_mut().zip(row.chunks_exact(3)) {
                *dst = px[channel];
            }
            rle_line(&line, &mut out);
        }
    }
    out
}

/// 1-bit planar image: bit `p` of each index goes to plane `p`.
pub fn encode_planar(indices: &[u8], width: u16, height: u16, planes: u8, ega: &[u8; 48]) -> Vec<u8> {
    let w = usize::from(width);
    let bpl = even(w.div_ceil(8));
    let mut out = header(1, planes, width, height, bpl as u16, ega);
    let mut line = vec![0u8; bpl];
    for row in indices.chunks_exact(w) {
        for plane in 0..planes {
            line.fill(0);
            for (x, &index) in row.iter().enumerate() {
                let bit = (index >> plane) & 1;
                line[x / 8] |= bit << (7 - x % 8);
            }
            rle_line(&line, &mut out);
        }
    }
    out
}

/// Expected RGBA for `indices` looked up in a packed RGB palette.
pub fn expand(indices: &[u8], palette: &[u8]) -> Vec<u8> {
    indices
        .iter()
        .flat_map(|&i| {
            let p = usize::from(i) * 3;
            [palette[p], palette[p + 1], palette[p + 2], 255]
        })
        .collect()
}

/// xorshift noise, reproducible across runs.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

pub fn gradient_palette() -> [u8; 768] {
    let mut pal = [0u8; 768];
    for (i, entry) in pal.chunks_exact_mut(3).enumerate() {
        entry[0] = i as u8;
        entry[1] = 255 - i as u8;
        entry[2] = (i as u8).wrapping_mul(7);
    }
    pal
}

/// The standard EGA 16-color palette.
pub fn ega_palette() -> [u8; 48] {
    [
        0, 0, 0, 0, 0, 170, 0, 170, 0, 0, 170, 170, 170, 0, 0, 170, 0, 170, 170, 85, 0, 170, 170,
        170, 85, 85, 85, 85, 85, 255, 85, 255, 85, 85, 255, 255, 255, 85, 85, 255, 85, 255, 255,
        255, 85, 255, 255, 255,
    ]
}
