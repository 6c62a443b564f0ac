use crate::Error;

/// Bytes per row of a packed buffer `width` pixels wide
#[must_use]
pub const fn packed_stride(width: usize, bits_per_pixel: u8) -> usize {
    (width * bits_per_pixel as usize).div_ceil(8)
}

fn check_depth(bits_per_pixel: u8) -> Result<(), Error> {
    match bits_per_pixel {
        1 | 2 | 4 | 8 => Ok(()),
        _ => Err(Error::UnsupportedPixelDepth(bits_per_pixel)),
    }
}

// pixels are stored most significant bits first
const fn shift_for(x: usize, bits_per_pixel: u8) -> usize {
    let per_byte = 8 / bits_per_pixel as usize;
    8 - bits_per_pixel as usize * (x % per_byte + 1)
}

// caller guarantees `data` holds `height` rows of `stride` bytes
fn unpack_rows(data: &[u8], width: usize, height: usize, stride: usize, bits_per_pixel: u8) -> Vec<u8> {
    let mask = u8::MAX >> (8 - bits_per_pixel);
    let bpp = usize::from(bits_per_pixel);
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let line = &data[y * stride..];
        out.extend((0..width).map(|x| (line[x * bpp / 8] >> shift_for(x, bits_per_pixel)) & mask));
    }
    out
}

// caller guarantees `indices` holds `height` rows of `width` pixels
fn pack_rows(indices: &[u8], width: usize, height: usize, bits_per_pixel: u8) -> (Vec<u8>, usize) {
    let stride = packed_stride(width, bits_per_pixel);
    let mask = u8::MAX >> (8 - bits_per_pixel);
    let bpp = usize::from(bits_per_pixel);
    let mut out = vec![0; stride * height];
    if width == 0 {
        return (out, stride);
    }
    for (y, row) in indices.chunks_exact(width).take(height).enumerate() {
        let line = &mut out[y * stride..(y + 1) * stride];
        for (x, &px) in row.iter().enumerate() {
            line[x * bpp / 8] |= (px & mask) << shift_for(x, bits_per_pixel);
        }
    }
    (out, stride)
}

/// Expands packed `bits_per_pixel` data to one byte per pixel.
///
/// # Errors
///
/// Errors if the depth is not 1, 2, 4 or 8, or if `data` is too short for the given geometry.
pub fn unpack_to_bytes(
    data: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    bits_per_pixel: u8,
) -> Result<Vec<u8>, Error> {
    check_depth(bits_per_pixel)?;
    let row_len = packed_stride(width, bits_per_pixel);
    let expected = match height {
        0 => 0,
        h => stride * (h - 1) + row_len,
    };
    if stride < row_len || data.len() < expected {
        return Err(Error::InvalidBuffer {
            width,
            height,
            bits_per_pixel,
            stride,
            expected,
            actual: data.len(),
        });
    }
    Ok(unpack_rows(data, width, height, stride, bits_per_pixel))
}

/// Packs one-byte-per-pixel indices down to `bits_per_pixel`, returning the data and its stride.
///
/// Index bits above the depth are dropped.
///
/// # Errors
///
/// Errors if the depth is not 1, 2, 4 or 8, or if `indices` is not exactly `width * height` long.
pub fn pack_from_bytes(
    indices: &[u8],
    width: usize,
    height: usize,
    bits_per_pixel: u8,
) -> Result<(Vec<u8>, usize), Error> {
    check_depth(bits_per_pixel)?;
    if indices.len() != width * height {
        return Err(Error::InvalidBuffer {
            width,
            height,
            bits_per_pixel: 8,
            stride: width,
            expected: width * height,
            actual: indices.len(),
        });
    }
    Ok(pack_rows(indices, width, height, bits_per_pixel))
}

/// Indexed image, packed at 1, 2, 4 or 8 bits per pixel
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    bits_per_pixel: u8,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a [`PixelBuffer`] from already packed data
    ///
    /// # Errors
    ///
    /// Errors if the depth is unsupported, `stride` is too small for `width`, or `data` is not
    /// exactly `stride * height` bytes long.
    pub fn new(
        width: u16,
        height: u16,
        bits_per_pixel: u8,
        stride: usize,
        data: Vec<u8>,
    ) -> Result<Self, Error> {
        check_depth(bits_per_pixel)?;
        let expected = stride * usize::from(height);
        if stride < packed_stride(usize::from(width), bits_per_pixel) || data.len() != expected {
            return Err(Error::InvalidBuffer {
                width: usize::from(width),
                height: usize::from(height),
                bits_per_pixel,
                stride,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            stride,
            data,
        })
    }

    /// Creates a [`PixelBuffer`] by packing one-byte-per-pixel indices
    ///
    /// # Errors
    ///
    /// See [`pack_from_bytes`]
    pub fn from_indices(
        width: u16,
        height: u16,
        bits_per_pixel: u8,
        indices: &[u8],
    ) -> Result<Self, Error> {
        let (data, stride) = pack_from_bytes(
            indices,
            usize::from(width),
            usize::from(height),
            bits_per_pixel,
        )?;
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            stride,
            data,
        })
    }

    /// Returns the pixel indexes of the image, one byte per pixel
    #[must_use]
    pub fn to_indices(&self) -> Vec<u8> {
        unpack_rows(
            &self.data,
            usize::from(self.width),
            usize::from(self.height),
            self.stride,
            self.bits_per_pixel,
        )
    }

    /// Returns the pixel indexes of a single row
    #[must_use]
    pub fn row_indices(&self, y: u16) -> Option<Vec<u8>> {
        if y >= self.height {
            return None;
        }
        let start = usize::from(y) * self.stride;
        Some(unpack_rows(
            &self.data[start..start + self.stride],
            usize::from(self.width),
            1,
            self.stride,
            self.bits_per_pixel,
        ))
    }

    /// Returns the index of a specific pixel
    #[must_use]
    pub fn pixel_index(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = usize::from(self.bits_per_pixel);
        let x = usize::from(x);
        let byte = self.data[usize::from(y) * self.stride + x * bpp / 8];
        Some((byte >> shift_for(x, self.bits_per_pixel)) & (u8::MAX >> (8 - self.bits_per_pixel)))
    }

    /// Whether every pixel of row `y` is index 0. Rows outside the image count as empty.
    #[must_use]
    pub fn is_row_empty(&self, y: u16) -> bool {
        self.row_indices(y)
            .map_or(true, |row| row.iter().all(|&px| px == 0))
    }

    /// Returns the width of the image
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the image
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Returns the pixel depth
    #[must_use]
    pub const fn bits_per_pixel(&self) -> u8 {
        self.bits_per_pixel
    }

    /// Returns the number of bytes per row
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the packed pixel data
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
