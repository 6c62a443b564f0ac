use crate::Error;

/// Length of the header at the start of the decompressed payload
pub const HEADER_LEN: usize = 2;
/// Length of the little-endian decompressed-size footer
pub const FOOTER_LEN: usize = 2;
/// Largest decompressed payload the footer can describe
pub const MAX_DATA_SIZE: usize = 0xFFFF;
/// Largest image width accepted on save
pub const MAX_WIDTH: usize = 320;
/// Largest image height accepted on save
pub const MAX_HEIGHT: usize = 200;

/// The two-byte header opening a decompressed PAK payload
///
/// ```plain
/// byte 0: byte width (bytes per 1-bit plane row)
/// byte 1: declared height
/// ```
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct PakHeader {
    /// Bytes per row of a single 1-bit plane
    pub byte_width: u8,
    /// Declared number of scanlines
    pub height: u8,
}

impl PakHeader {
    /// Creates a new [`PakHeader`]
    #[must_use]
    pub const fn new(byte_width: u8, height: u8) -> Self {
        Self { byte_width, height }
    }

    /// Reads and validates the header at the start of `payload`
    ///
    /// # Errors
    ///
    /// Errors if `payload` is shorter than [`HEADER_LEN`], either dimension is zero, or the plane
    /// data would exceed [`MAX_DATA_SIZE`].
    pub fn parse(payload: &[u8]) -> Result<Self, Error> {
        let [byte_width, height, ..] = *payload else {
            return Err(Error::HeaderTooShort {
                len: payload.len(),
                needed: HEADER_LEN,
            });
        };
        let header = Self::new(byte_width, height);
        header.validate()?;
        Ok(header)
    }

    /// Checks that both dimensions are non-zero and the plane data fits [`MAX_DATA_SIZE`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroDimension`] or [`Error::ImageTooLarge`]
    pub fn validate(&self) -> Result<(), Error> {
        if self.byte_width == 0 || self.height == 0 {
            return Err(Error::ZeroDimension {
                byte_width: self.byte_width,
                height: self.height,
            });
        }
        if self.image_size() > MAX_DATA_SIZE {
            return Err(Error::ImageTooLarge {
                width: self.image_width(),
                height: self.height as usize,
                size: self.image_size(),
                limit: "plane data exceeds 65535 bytes",
            });
        }
        Ok(())
    }

    /// Bytes per scanline: four 1-bit planes of [`Self::byte_width`] bytes each
    #[must_use]
    pub const fn plane_stride(&self) -> usize {
        self.byte_width as usize * 4
    }

    /// Image width in pixels
    #[must_use]
    pub const fn image_width(&self) -> usize {
        self.byte_width as usize * 8
    }

    /// Size of the full plane data for the declared height
    #[must_use]
    pub const fn image_size(&self) -> usize {
        self.plane_stride() * self.height as usize
    }

    /// Serializes the header
    #[must_use]
    pub const fn to_bytes(self) -> [u8; HEADER_LEN] {
        [self.byte_width, self.height]
    }
}
