#![allow(clippy::module_name_repetitions)]

pub(crate) mod bitmap;
pub(crate) mod header;
pub(crate) mod palette;
pub mod planar;

/// Module containing the packed pixel helpers
pub mod raw {
    pub use crate::image::bitmap::{pack_from_bytes, packed_stride, unpack_to_bytes};
    pub use crate::image::header::{
        PakHeader, FOOTER_LEN, HEADER_LEN, MAX_DATA_SIZE, MAX_HEIGHT, MAX_WIDTH,
    };
}

use crate::{
    error::Error,
    rle::{self, Standard},
};
use anyhow::{Context, Result};
use bitmap::PixelBuffer;
use bon::Builder;
use header::{PakHeader, FOOTER_LEN, HEADER_LEN, MAX_DATA_SIZE, MAX_HEIGHT, MAX_WIDTH};
use palette::GRAYSCALE_16;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::{debug, info, instrument, trace, warn};

/// Options applied when saving a PAK image
#[derive(Builder, Default, Debug, Eq, PartialEq, Copy, Clone)]
pub struct SaveOptions {
    /// Drop trailing scanlines that are entirely index 0 ("CUT")
    #[builder(default)]
    pub cut: bool,
}

impl SaveOptions {
    /// Suggests options for `bitmap`: cutting is switched on when its last row is all index 0
    #[must_use]
    pub fn suggested_for(bitmap: &PixelBuffer) -> Self {
        let cut = bitmap
            .height()
            .checked_sub(1)
            .is_some_and(|last| bitmap.is_row_empty(last));
        Self { cut }
    }
}

/// A typed representation of a KotB PAK image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PakImageFile {
    header: PakHeader,
    bitmap: PixelBuffer,
    palette: Vec<[u8; 3]>,
    cutoff: Option<u16>,
}

impl PakImageFile {
    /// Creates a new [`PakImageFile`] from a 4-bit bitmap, attaching the grayscale palette
    ///
    /// # Errors
    ///
    /// This function errors if the bitmap cannot be stored as a PAK image; see [`save_to_bytes`]
    pub fn new(bitmap: PixelBuffer) -> Result<Self, Error> {
        let header = header_for(&bitmap)?;
        Ok(Self {
            header,
            bitmap,
            palette: GRAYSCALE_16.to_vec(),
            cutoff: None,
        })
    }

    /// Returns a reference to the [`PakHeader`]
    #[must_use]
    pub const fn header(&self) -> &PakHeader {
        &self.header
    }

    /// Returns a reference to the decoded [`PixelBuffer`]
    #[must_use]
    pub const fn bitmap(&self) -> &PixelBuffer {
        &self.bitmap
    }

    /// Returns the palette attached to the image
    #[must_use]
    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    /// Returns the image width
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.bitmap.width()
    }

    /// Returns the image height (the declared height, including cut off rows)
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.bitmap.height()
    }

    /// Returns the number of scanlines actually stored, if the file holds fewer than it declares
    #[must_use]
    pub const fn cutoff_height(&self) -> Option<u16> {
        self.cutoff
    }

    /// Informational note about the loaded file, if any
    #[must_use]
    pub fn extra_info(&self) -> Option<String> {
        self.cutoff
            .map(|rows| format!("Data cut off at {rows} lines."))
    }

    /// Splits the file into bitmap, palette and extra info
    #[must_use]
    pub fn into_parts(self) -> (PixelBuffer, Vec<[u8; 3]>, Option<String>) {
        let info = self.extra_info();
        (self.bitmap, self.palette, info)
    }

    /// Tries to read a [`Self`] from the bytes of a PAK file
    ///
    /// # Errors
    ///
    /// This function will error if the data is not a valid PAK file:
    /// - too short to hold the footer and a header
    /// - the first RLE code has a run length of 0
    /// - the RLE stream is corrupt, decodes to a different length than the footer states, or has data
///   left over once that length is reached
    /// - the header declares a zero or oversized image
    /// - the plane data ends in the middle of a scanline
    #[instrument(skip(data), fields(len = data.len()), level = "debug")]
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.len() < FOOTER_LEN + 1 {
            return Err(Error::HeaderTooShort {
                len: data.len(),
                needed: FOOTER_LEN + 1,
            });
        }
        let (compressed, footer) = data.split_at(data.len() - FOOTER_LEN);
        let expected = usize::from(u16::from_le_bytes([footer[0], footer[1]]));
        debug!("footer declares {expected} decompressed bytes");
        if expected < HEADER_LEN {
            return Err(Error::HeaderTooShort {
                len: expected,
                needed: HEADER_LEN,
            });
        }
        if compressed[0] & 0x7F == 0 {
            return Err(Error::IllegalLeadingCode);
        }

        let mut payload = vec![0; expected];
        let (written, consumed) = rle::decode_counted(&Standard, compressed, &mut payload, true)?;
        if consumed < compressed.len() {
            return Err(Error::DecompressionFailed {
                offset: consumed,
                reason: "data left after the declared decompressed length",
            });
        }
        if written != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: written,
            });
        }

        let header = PakHeader::parse(&payload)?;
        trace!("header: {header:?}");
        let plane_data = &payload[HEADER_LEN..];
        let bitmap = planar::decode_planes(
            plane_data,
            usize::from(header.byte_width),
            usize::from(header.height),
        )?;

        let rows = plane_data.len() / header.plane_stride();
        let cutoff = u16::try_from(rows)
            .ok()
            .filter(|&rows| rows < u16::from(header.height));
        if let Some(rows) = cutoff {
            warn!("Data cut off at {rows} lines (declared {})", header.height);
        }

        Ok(Self {
            header,
            bitmap,
            palette: GRAYSCALE_16.to_vec(),
            cutoff,
        })
    }

    /// Tries to read a [`Self`] from a reader
    ///
    /// # Errors
    ///
    /// This function will error if reading fails or the data is invalid; see [`Self::from_bytes`]
    pub fn from_reader(mut r: impl Read) -> Result<Self> {
        let mut data = Vec::new();
        let read = r.read_to_end(&mut data).context("Read PAK data")?;
        debug!("read {read} bytes");
        Ok(Self::from_bytes(&data)?)
    }

    /// Tries to read [`Self`] from a provided file path
    ///
    /// # Errors
    ///
    /// This function will error if the file cannot be opened or if the file contains invalid data.
    /// See [`Self::from_bytes`] for potential errors
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let file = File::open(filename).context("Open PAK file")?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serializes [`Self`] into the bytes of a PAK file
    ///
    /// # Errors
    ///
    /// See [`save_to_bytes`]
    pub fn to_bytes(&self, options: &SaveOptions) -> Result<Vec<u8>, Error> {
        save_to_bytes(&self.bitmap, options)
    }

    /// Attempts to serialize and save [`Self`] as a file at the provided path
    ///
    /// # Errors
    ///
    /// This will error if the image cannot be encoded or the file cannot be written
    pub fn into_file(self, filename: impl AsRef<Path>, options: &SaveOptions) -> Result<()> {
        let bytes = self.to_bytes(options)?;
        let f = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(filename)
            .context("Open output file")?;
        let mut f = BufWriter::new(f);
        f.write_all(&bytes).context("Write PAK data")?;
        f.flush()?;
        info!("Finished writing {} bytes to file", bytes.len());
        Ok(())
    }

    /// Returns an iterator over the palette colors the pixel indexes correspond to
    pub fn as_palette_iter(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        let palette = &self.palette;
        self.bitmap
            .to_indices()
            .into_iter()
            .map(move |i| palette.get(usize::from(i)).copied().unwrap_or_default())
    }

    /// Renders the image through its palette
    #[must_use]
    pub fn to_rgb_image(&self) -> ::image::RgbImage {
        let (width, height) = (u32::from(self.width()), u32::from(self.height()));
        let rgb: Vec<u8> = self.as_palette_iter().flatten().collect();
        ::image::RgbImage::from_vec(width, height, rgb)
            .unwrap_or_else(|| ::image::RgbImage::new(width, height))
    }
}

fn header_for(bitmap: &PixelBuffer) -> Result<PakHeader, Error> {
    if bitmap.bits_per_pixel() != 4 {
        return Err(Error::UnsupportedPixelDepth(bitmap.bits_per_pixel()));
    }
    let (width, height) = (usize::from(bitmap.width()), usize::from(bitmap.height()));
    let byte_width = width.div_ceil(8);
    let size = byte_width * 4 * height;
    if width > MAX_WIDTH || height > MAX_HEIGHT {
        return Err(Error::ImageTooLarge {
            width,
            height,
            size,
            limit: "dimensions exceed 320x200",
        });
    }
    if HEADER_LEN + size > MAX_DATA_SIZE {
        return Err(Error::ImageTooLarge {
            width,
            height,
            size,
            limit: "plane data exceeds 65535 bytes",
        });
    }
    // both fit a byte after the checks above
    let header = PakHeader::new(
        u8::try_from(byte_width).unwrap_or(u8::MAX),
        u8::try_from(height).unwrap_or(u8::MAX),
    );
    header.validate()?;
    Ok(header)
}

/// Reads a PAK file into its bitmap, palette and informational metadata
///
/// # Errors
///
/// See [`PakImageFile::from_bytes`]
pub fn load_from_bytes(
    data: &[u8],
) -> Result<(PixelBuffer, Vec<[u8; 3]>, Option<String>), Error> {
    PakImageFile::from_bytes(data).map(PakImageFile::into_parts)
}

/// Encodes a 4-bit bitmap as a PAK file
///
/// # Errors
///
/// This function errors if the bitmap is not 4 bits per pixel, has a zero dimension, is larger
/// than 320x200, or its plane data would exceed 65535 bytes
#[instrument(skip(bitmap), fields(width = bitmap.width(), height = bitmap.height()), level = "debug")]
pub fn save_to_bytes(bitmap: &PixelBuffer, options: &SaveOptions) -> Result<Vec<u8>, Error> {
    let header = header_for(bitmap)?;

    let mut rows = bitmap.height();
    if options.cut {
        while rows > 0 && bitmap.is_row_empty(rows - 1) {
            rows -= 1;
        }
        debug!("cut {} empty rows", bitmap.height() - rows);
    }

    let (byte_width, planes) = planar::encode_planes(bitmap, usize::from(rows))?;
    debug_assert_eq!(byte_width, usize::from(header.byte_width));

    let mut payload = Vec::with_capacity(HEADER_LEN + planes.len());
    payload.extend_from_slice(&header.to_bytes());
    payload.extend_from_slice(&planes);
    let payload_len = u16::try_from(payload.len()).map_err(|_| Error::ImageTooLarge {
        width: usize::from(bitmap.width()),
        height: usize::from(bitmap.height()),
        size: planes.len(),
        limit: "plane data exceeds 65535 bytes",
    })?;

    let mut out = rle::encode(&Standard, &payload);
    trace!("compressed {} bytes to {}", payload.len(), out.len());
    out.extend_from_slice(&payload_len.to_le_bytes());
    Ok(out)
}
