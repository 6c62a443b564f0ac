//! Quad-plane 4-bit images.
//!
//! Each scanline holds four 1-bit planes back to back, one per bit of the pixel index:
//!
//! ```plain
//! | plane 0 (byte_width bytes) | plane 1 | plane 2 | plane 3 |
//! ```
//!
//! Read as a single 1-bit image, a scanline is four times as wide as the picture. Pixel `x` of
//! row `y` takes bit `i` from column `i * width + x` of that wide row.

use itertools::iproduct;
use tracing::{instrument, trace};

use super::bitmap::{pack_from_bytes, unpack_to_bytes, PixelBuffer};
use crate::Error;

/// Number of planes per scanline
pub const PLANES: usize = 4;

/// Decodes raw plane data into a 4-bit [`PixelBuffer`] that is `byte_width * 8` pixels wide and
/// `height` rows high.
///
/// `plane_data` may hold fewer than `height` scanlines; the rows it lacks are left at index 0.
///
/// # Errors
///
/// - [`Error::ScanlineMisalignment`] if `plane_data` does not end on a scanline boundary
/// - [`Error::SizeMismatch`] if it holds more than `height` scanlines
/// - [`Error::ImageTooLarge`] if the resulting image does not fit 16-bit dimensions
#[instrument(skip(plane_data), fields(len = plane_data.len()), level = "trace")]
pub fn decode_planes(
    plane_data: &[u8],
    byte_width: usize,
    height: usize,
) -> Result<PixelBuffer, Error> {
    let width = byte_width * 8;
    let stride = byte_width * PLANES;
    let too_large = || Error::ImageTooLarge {
        width,
        height,
        size: stride * height,
        limit: "dimensions exceed 65535 pixels",
    };
    let (out_width, out_height) = (
        u16::try_from(width).map_err(|_| too_large())?,
        u16::try_from(height).map_err(|_| too_large())?,
    );

    let rows = match stride {
        0 => 0,
        s if plane_data.len() % s != 0 => {
            return Err(Error::ScanlineMisalignment {
                data_len: plane_data.len(),
                stride: s,
            })
        }
        s => plane_data.len() / s,
    };
    if rows > height {
        return Err(Error::SizeMismatch {
            expected: stride * height,
            actual: plane_data.len(),
        });
    }

    // one byte per bit keeps the plane lookups simple
    let wide = width * PLANES;
    let bits = unpack_to_bytes(plane_data, wide, rows, stride, 1)?;
    let mut indices = vec![0u8; width * height];
    for (y, x) in iproduct!(0..rows, 0..width) {
        let offset = y * wide + x;
        indices[y * width + x] = (0..PLANES)
            .fold(0, |px, plane| px | (bits[offset + plane * width] << plane));
    }
    trace!("decoded {rows} of {height} rows");

    PixelBuffer::from_indices(out_width, out_height, 4, &indices)
}

/// Encodes the first `rows` rows of a 4-bit [`PixelBuffer`] into raw plane data.
///
/// The image is padded with index 0 to a multiple of 8 pixels. Returns the byte width (bytes per
/// plane row) together with the plane data.
///
/// # Errors
///
/// - [`Error::UnsupportedPixelDepth`] if `bitmap` is not 4 bits per pixel
/// - [`Error::SizeMismatch`] if `rows` exceeds the bitmap's height
#[instrument(skip(bitmap), fields(width = bitmap.width(), height = bitmap.height()), level = "trace")]
pub fn encode_planes(bitmap: &PixelBuffer, rows: usize) -> Result<(usize, Vec<u8>), Error> {
    if bitmap.bits_per_pixel() != 4 {
        return Err(Error::UnsupportedPixelDepth(bitmap.bits_per_pixel()));
    }
    let width = usize::from(bitmap.width());
    let height = usize::from(bitmap.height());
    if rows > height {
        return Err(Error::SizeMismatch {
            expected: height,
            actual: rows,
        });
    }
    let byte_width = width.div_ceil(8);
    let aligned = byte_width * 8;
    let wide = aligned * PLANES;

    let indices = bitmap.to_indices();
    let mut bits = vec![0u8; wide * rows];
    for (y, x) in iproduct!(0..rows, 0..width) {
        let px = indices[y * width + x];
        let offset = y * wide + x;
        for plane in 0..PLANES {
            bits[offset + plane * aligned] = (px >> plane) & 1;
        }
    }

    let (planes, stride) = pack_from_bytes(&bits, wide, rows, 1)?;
    debug_assert_eq!(stride, byte_width * PLANES);
    Ok((byte_width, planes))
}
