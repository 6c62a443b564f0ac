#![allow(dead_code)]

use libpak::{
    image::{planar, raw::PakHeader},
    rle::{self, Standard},
    PixelBuffer,
};

/// Deterministic noise, good enough to defeat run detection
pub fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            seed.to_le_bytes()[1]
        })
        .collect()
}

/// Checkerboard alternating a nibble with its complement, walking through all 16 values
pub fn checkerboard(width: u16, height: u16) -> Vec<u8> {
    let (width, height) = (usize::from(width), usize::from(height));
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let v = u8::try_from((x + y * 3) % 16).unwrap();
            if (x + y) % 2 == 0 {
                v
            } else {
                15 - v
            }
        })
        .collect()
}

/// 4-bit bitmap whose first `filled` rows hold the checkerboard and the rest are index 0
pub fn bitmap_with_empty_tail(width: u16, height: u16, filled: u16) -> PixelBuffer {
    let mut indices = checkerboard(width, height);
    // index 0 never fills a whole checkerboard row, so the filled rows stay non-empty
    for px in indices.iter_mut().skip(usize::from(width) * usize::from(filled)) {
        *px = 0;
    }
    PixelBuffer::from_indices(width, height, 4, &indices).unwrap()
}

/// Compresses a raw payload the way PAK files store it
pub fn pak_from_payload(payload: &[u8]) -> Vec<u8> {
    let mut out = rle::encode(&Standard, payload);
    out.extend_from_slice(&u16::try_from(payload.len()).unwrap().to_le_bytes());
    out
}

/// Builds a PAK file declaring the bitmap's full height while storing only `rows` scanlines
pub fn truncated_pak(bitmap: &PixelBuffer, rows: usize) -> Vec<u8> {
    let (byte_width, planes) = planar::encode_planes(bitmap, rows).unwrap();
    let header = PakHeader::new(
        u8::try_from(byte_width).unwrap(),
        u8::try_from(bitmap.height()).unwrap(),
    );
    let mut payload = header.to_bytes().to_vec();
    payload.extend_from_slice(&planes);
    pak_from_payload(&payload)
}
