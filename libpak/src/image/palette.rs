use crate::Error;

/// 16-entry grayscale ramp attached to 4-bit images, black at index 0
pub const GRAYSCALE_16: [[u8; 3]; 16] = gray_ramp::<16>();

#[allow(clippy::cast_possible_truncation)]
const fn gray_ramp<const N: usize>() -> [[u8; 3]; N] {
    let mut out = [[0; 3]; N];
    let mut i = 0;
    while i < N {
        let v = (i * 255 / (N - 1)) as u8;
        out[i] = [v, v, v];
        i += 1;
    }
    out
}

/// Generates an evenly spaced grayscale palette with `2^bits_per_pixel` entries
///
/// # Errors
///
/// Errors if `bits_per_pixel` is not in `1..=8`
pub fn grayscale_palette(bits_per_pixel: u8) -> Result<Vec<[u8; 3]>, Error> {
    if !(1..=8).contains(&bits_per_pixel) {
        return Err(Error::UnsupportedPixelDepth(bits_per_pixel));
    }
    let last = (1usize << bits_per_pixel) - 1;
    Ok((0..=last)
        .map(|i| {
            let v = u8::try_from(i * 255 / last).unwrap_or(u8::MAX);
            [v, v, v]
        })
        .collect())
}

/// Returns the index of the palette entry closest to `rgb`
#[must_use]
pub fn nearest_index(palette: &[[u8; 3]], rgb: [u8; 3]) -> u8 {
    let distance = |entry: &[u8; 3]| -> u32 {
        entry
            .iter()
            .zip(rgb)
            .map(|(&a, b)| u32::from(a.abs_diff(b)).pow(2))
            .sum()
    };
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| distance(entry))
        .and_then(|(i, _)| u8::try_from(i).ok())
        .unwrap_or(0)
}
