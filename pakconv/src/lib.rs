use std::{fs, path::Path};

use anyhow::{Context, Result};
use libpak::{nearest_index, PakImageFile, PixelBuffer, RleFlavor, SaveOptions, GRAYSCALE_16};
use tracing::{debug, info, instrument, warn};

#[instrument]
pub fn pak_to_image(pak_file: &Path, output_name: &Path) -> Result<()> {
    let pak = PakImageFile::from_file(pak_file)?;
    debug!("Read pak from file");
    if let Some(note) = pak.extra_info() {
        info!("{note}");
    }

    info!("Writing applied palette image to {}", output_name.display());
    pak.to_rgb_image()
        .save(output_name)
        .with_context(|| format!("Write image to {}", output_name.display()))?;
    info!(
        "Successfully wrote palette image to {}",
        output_name.display()
    );
    Ok(())
}

#[instrument]
pub fn image_to_pak(image_file: &Path, output_name: &Path, cut: Option<bool>) -> Result<()> {
    let img = image::open(image_file)
        .with_context(|| format!("Open image {}", image_file.display()))?
        .into_rgb8();
    let width = u16::try_from(img.width()).context("width is too big")?;
    let height = u16::try_from(img.height()).context("height is too big")?;

    let indices: Vec<u8> = img
        .pixels()
        .map(|p| nearest_index(&GRAYSCALE_16, p.0))
        .collect();
    debug!("Mapped {} pixels to the grayscale palette", indices.len());
    let bitmap = PixelBuffer::from_indices(width, height, 4, &indices)?;

    let suggested = SaveOptions::suggested_for(&bitmap);
    let options = match cut {
        Some(cut) => SaveOptions::builder().cut(cut).build(),
        None => {
            if suggested.cut {
                info!("Last row is empty, cutting trailing empty rows");
            }
            suggested
        }
    };

    PakImageFile::new(bitmap)?.into_file(output_name, &options)?;
    info!("Successfully wrote pak to {}", output_name.display());
    Ok(())
}

/// Human-readable summary of a PAK file
#[instrument]
pub fn pak_info(pak_file: &Path) -> Result<String> {
    let pak = PakImageFile::from_file(pak_file)?;
    let header = pak.header();
    let mut out = format!(
        "{}\n  size:        {}x{}\n  byte width:  {}\n  line stride: {}\n",
        pak_file.display(),
        pak.width(),
        pak.height(),
        header.byte_width,
        header.plane_stride(),
    );
    match pak.extra_info() {
        Some(note) => out.push_str(&format!("  {note}\n")),
        None => out.push_str("  no cutoff\n"),
    }
    Ok(out)
}

#[instrument]
pub fn compress_file(input: &Path, output_name: &Path, flavor: RleFlavor) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("Read {}", input.display()))?;
    let packed = flavor.encode(&data);
    info!(
        "Compressed {} bytes to {} with {flavor} codes",
        data.len(),
        packed.len()
    );
    fs::write(output_name, packed).with_context(|| format!("Write {}", output_name.display()))
}

#[instrument]
pub fn decompress_file(
    input: &Path,
    output_name: &Path,
    flavor: RleFlavor,
    size: usize,
) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("Read {}", input.display()))?;
    let mut out = vec![0; size];
    let written = flavor.decode_into(&data, &mut out, false)?;
    if written < size {
        warn!("Input ended after {written} of {size} bytes");
        out.truncate(written);
    }
    fs::write(output_name, out).with_context(|| format!("Write {}", output_name.display()))
}
