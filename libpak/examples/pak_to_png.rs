/// Demonstrates how to create a png file from a [`PakImageFile`]
/// using the [`image`] crate
///
use image::{codecs::png::PngEncoder, ImageEncoder};
use libpak::PakImageFile;
use std::fs::File;

fn main() -> anyhow::Result<()> {
    let Some(input) = std::env::args().nth(1) else {
        anyhow::bail!("usage: pak_to_png <file.pak>");
    };
    let pak = PakImageFile::from_file(&input)?;
    if let Some(info) = pak.extra_info() {
        println!("{info}");
    }

    let as_rgb: Vec<_> = pak.as_palette_iter().flatten().collect();

    let output = File::options()
        .create(true)
        .write(true)
        .truncate(true)
        .open("pak_to_png_example.png")?;

    let encoder = PngEncoder::new(output);
    encoder.write_image(
        &as_rgb,
        u32::from(pak.width()),
        u32::from(pak.height()),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}
