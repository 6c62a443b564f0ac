//! # libpak
//!
//!
//! This library provides the compression codecs and image i/o used for converting vintage game
//! assets, centered on the "KotB PAK" 4-bit bit-plane image format.
//!
//! It is split in two layers:
//!
//! - [`rle`]: a format-agnostic run-length engine. The byte layout of the codes is supplied by an
//!   [`rle::RleStrategy`]; [`rle::Standard`] (7-bit amounts, top bit marks a repeat) and
//!   [`rle::Westwood`] (negated repeat amounts plus a 16-bit extended repeat) are provided.
//! - [`image`]: pixel buffers, the quad-plane codec and the PAK file layout built on top of the
//!   standard RLE codes.
//!
//! ### The PAK layout
//!
//! ```plain
//! [RLE-compressed payload (standard codes)] [u16le: decompressed payload length]
//!
//! payload:
//! byte 0      byte width (bytes per 1-bit plane row)
//! byte 1      declared height
//! bytes 2..   scanlines of four 1-bit planes, byte width * 4 bytes each
//! ```
//!
//! Some game assets store fewer scanlines than they declare; the missing rows are all index 0.
//! This is not an error: [`PakImageFile::cutoff_height`] reports how many rows were present, and
//! [`SaveOptions::cut`] reproduces the truncation when saving.
//!
//! ### Usage
//!
//! #### Converting a PAK image file to a PNG
//!
//! ```rust,no_run
//! use libpak::PakImageFile;
//!
//! fn main() -> anyhow::Result<()> {
//!     let pak = PakImageFile::from_file("title.pak")?;
//!     if let Some(info) = pak.extra_info() {
//!         println!("{info}");
//!     }
//!     pak.to_rgb_image().save("title.png")?;
//!     Ok(())
//! }
//! ```
//!
//! #### Encoding a bitmap
//!
//! ```rust
//! use libpak::{load_from_bytes, save_to_bytes, PixelBuffer, SaveOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     // 16x4 image, bottom row left at index 0
//!     let mut indices = vec![0u8; 16 * 4];
//!     for (i, px) in indices.iter_mut().take(16 * 3).enumerate() {
//!         *px = (i % 16) as u8;
//!     }
//!     let bitmap = PixelBuffer::from_indices(16, 4, 4, &indices)?;
//!
//!     let options = SaveOptions::suggested_for(&bitmap);
//!     assert!(options.cut);
//!     let bytes = save_to_bytes(&bitmap, &options)?;
//!
//!     let (decoded, palette, info) = load_from_bytes(&bytes)?;
//!     assert_eq!(decoded, bitmap);
//!     assert_eq!(palette.len(), 16);
//!     assert_eq!(info.as_deref(), Some("Data cut off at 3 lines."));
//!     Ok(())
//! }
//! ```
//!
//! #### Raw RLE
//!
//! ```rust
//! use libpak::rle::{self, Westwood};
//!
//! let data = [7u8; 300];
//! let packed = rle::encode(&Westwood::new(true), &data);
//! assert_eq!(packed, [0x00, 0x2C, 0x01, 0x07]);
//! let unpacked = rle::decode(&Westwood::new(true), &packed, data.len(), true).unwrap();
//! assert_eq!(unpacked, data);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

mod error;
/// Module containing bitmap, palette and PAK image types
pub mod image;
/// Module containing the run-length engine and its code strategies
pub mod rle;

pub use error::Error;
pub use crate::image::bitmap::PixelBuffer;
pub use crate::image::palette::{grayscale_palette, nearest_index, GRAYSCALE_16};
pub use crate::image::{load_from_bytes, save_to_bytes, PakImageFile, SaveOptions};
pub use crate::rle::RleFlavor;
