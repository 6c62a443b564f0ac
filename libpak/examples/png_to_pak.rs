/// Demonstrates how to create a [`PakImageFile`] from a png file
/// using the [`image`] crate
///
///
use anyhow::Context;
use libpak::{nearest_index, PakImageFile, PixelBuffer, SaveOptions, GRAYSCALE_16};

fn main() -> anyhow::Result<()> {
    let Some(input) = std::env::args().nth(1) else {
        anyhow::bail!("usage: png_to_pak <file.png>");
    };
    let img = image::open(&input)
        .context("Failed to open image")?
        .into_rgb8();
    let width = u16::try_from(img.width()).context("width is too big")?;
    let height = u16::try_from(img.height()).context("height is too big")?;

    // PAK images are 4-bit grayscale: map each pixel to the closest of the 16 shades
    let indices: Vec<u8> = img
        .pixels()
        .map(|p| nearest_index(&GRAYSCALE_16, p.0))
        .collect();
    let bitmap = PixelBuffer::from_indices(width, height, 4, &indices)?;

    let options = SaveOptions::suggested_for(&bitmap);
    PakImageFile::new(bitmap)?.into_file("png_to_pak_example.pak", &options)?;
    Ok(())
}
