use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libpak` errors
pub enum Error {
    /// Error returned if a file is too short to hold its header (or footer)
    #[error("data too short to hold a header: {len} bytes, need at least {needed}")]
    HeaderTooShort {
        /// length of the data received
        len: usize,
        /// minimum length required
        needed: usize,
    },
    /// Error returned if the first RLE code of a PAK file has a run length of zero
    #[error("illegal leading code: first RLE code has a run length of 0")]
    IllegalLeadingCode,
    /// Error returned if the RLE stream holds an illegal code, or a code cannot be read
    #[error("RLE decompression failed at input offset {offset}: {reason}")]
    DecompressionFailed {
        /// input offset of the failing code
        offset: usize,
        /// short description of the failure
        reason: &'static str,
    },
    /// Error returned if the decompressed length disagrees with the stored length
    #[error("decompressed size mismatch. expected: {expected}, actual: {actual}")]
    SizeMismatch {
        /// the length declared by the file
        expected: usize,
        /// the length actually decoded
        actual: usize,
    },
    /// Error returned if the image data is cut off in the middle of a scanline
    #[error("cutoff not aligned to a scanline: {data_len} bytes of plane data, stride {stride}")]
    ScanlineMisalignment {
        /// length of the plane data (without header)
        data_len: usize,
        /// bytes per scanline
        stride: usize,
    },
    /// Error returned if the header declares a zero width or height
    #[error("zero dimension in header: byte width {byte_width}, height {height}")]
    ZeroDimension {
        /// declared plane stride in bytes
        byte_width: u8,
        /// declared scanline count
        height: u8,
    },
    /// Error returned if the image exceeds the format's size limits
    #[error("image {width}x{height} ({size} bytes) is too large: {limit}")]
    ImageTooLarge {
        /// image width in pixels
        width: usize,
        /// image height in pixels
        height: usize,
        /// size of the uncompressed plane data in bytes
        size: usize,
        /// the limit that was exceeded
        limit: &'static str,
    },
    /// Error returned if the pixel depth is not supported by the operation
    #[error("unsupported pixel depth: {0} bits per pixel")]
    UnsupportedPixelDepth(u8),
    /// Error returned if a pixel buffer's data does not match its geometry
    #[error("invalid pixel buffer: {width}x{height} at {bits_per_pixel}bpp with stride {stride} needs {expected} bytes, got {actual}")]
    InvalidBuffer {
        /// width in pixels
        width: usize,
        /// height in pixels
        height: usize,
        /// bits per pixel
        bits_per_pixel: u8,
        /// bytes per row
        stride: usize,
        /// expected data length
        expected: usize,
        /// actual data length
        actual: usize,
    },
}
