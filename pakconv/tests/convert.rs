use image::{Rgb, RgbImage};
use libpak::{PakImageFile, RleFlavor};
use mktemp::Temp;
use std::path::{Path, PathBuf};
use pakconv::{compress_file, decompress_file, image_to_pak, pak_info, pak_to_image};

fn path_in(dir: &Temp, name: &str) -> PathBuf {
    AsRef::<Path>::as_ref(dir).join(name)
}

fn gradient(width: u32, height: u32, black_rows: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if y >= height - black_rows {
            Rgb([0, 0, 0])
        } else {
            let v = u8::try_from(((x + y) % 16) * 17).unwrap();
            Rgb([v, v, v])
        }
    })
}

#[test]
fn png_to_pak_and_back() -> anyhow::Result<()> {
    let dir = Temp::new_dir()?;
    let png = path_in(&dir, "in.png");
    let pak = path_in(&dir, "in.pak");
    let out = path_in(&dir, "out.png");
    let img = gradient(16, 6, 2);
    img.save(&png)?;

    image_to_pak(&png, &pak, None)?;
    let decoded = PakImageFile::from_file(&pak)?;
    assert_eq!(decoded.cutoff_height(), Some(4));
    assert!(pak_info(&pak)?.contains("Data cut off at 4 lines."));

    pak_to_image(&pak, &out)?;
    assert_eq!(image::open(&out)?.into_rgb8(), img);
    Ok(())
}

#[test]
fn no_cut_keeps_all_rows() -> anyhow::Result<()> {
    let dir = Temp::new_dir()?;
    let png = path_in(&dir, "in.png");
    let pak = path_in(&dir, "in.pak");
    gradient(8, 4, 1).save(&png)?;

    image_to_pak(&png, &pak, Some(false))?;
    assert_eq!(PakImageFile::from_file(&pak)?.cutoff_height(), None);
    assert!(pak_info(&pak)?.contains("no cutoff"));
    Ok(())
}

#[test]
fn raw_rle_files_round_trip() -> anyhow::Result<()> {
    let dir = Temp::new_dir()?;
    let raw = path_in(&dir, "data.bin");
    let packed = path_in(&dir, "data.rle");
    let unpacked = path_in(&dir, "data.out");
    let mut data = vec![0x11; 500];
    data.extend(0..=255u8);
    std::fs::write(&raw, &data)?;

    for flavor in [RleFlavor::Standard, RleFlavor::Westwood, RleFlavor::WestwoodSwapped] {
        compress_file(&raw, &packed, flavor)?;
        decompress_file(&packed, &unpacked, flavor, data.len())?;
        assert_eq!(std::fs::read(&unpacked)?, data);
    }
    Ok(())
}
