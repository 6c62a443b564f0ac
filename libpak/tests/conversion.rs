mod common;

use common::{bitmap_with_empty_tail, checkerboard, pak_from_payload, truncated_pak};
use libpak::{
    load_from_bytes, save_to_bytes, Error, PakImageFile, PixelBuffer, SaveOptions, GRAYSCALE_16,
};
use mktemp::Temp;

#[test]
fn scenario_payload_decodes() -> anyhow::Result<()> {
    let payload = [0x01, 0x02, 0xFF, 0x00, 0x00, 0xFF, 0x00, 0x00, 0xFF, 0x00];
    let pak = PakImageFile::from_bytes(&pak_from_payload(&payload))?;
    assert_eq!((pak.width(), pak.height()), (8, 2));
    assert_eq!(pak.cutoff_height(), None);
    assert_eq!(pak.extra_info(), None);
    assert_eq!(pak.bitmap().row_indices(0), Some(vec![9; 8]));
    assert_eq!(pak.bitmap().row_indices(1), Some(vec![4; 8]));
    assert_eq!(pak.palette(), GRAYSCALE_16);

    let saved = pak.to_bytes(&SaveOptions::default())?;
    assert_eq!(saved, pak_from_payload(&payload));
    Ok(())
}

#[test]
fn cutoff_is_reported_not_rejected() -> anyhow::Result<()> {
    let bitmap = PixelBuffer::from_indices(16, 20, 4, &checkerboard(16, 20))?;
    let pak = PakImageFile::from_bytes(&truncated_pak(&bitmap, 15))?;

    assert_eq!(pak.height(), 20);
    assert_eq!(pak.cutoff_height(), Some(15));
    assert_eq!(pak.height() - pak.cutoff_height().unwrap(), 5);
    assert_eq!(pak.extra_info().as_deref(), Some("Data cut off at 15 lines."));
    for y in 0..15 {
        assert_eq!(pak.bitmap().row_indices(y), bitmap.row_indices(y));
    }
    for y in 15..20 {
        assert!(pak.bitmap().is_row_empty(y));
    }
    Ok(())
}

#[test]
fn cut_trims_trailing_rows() -> anyhow::Result<()> {
    let bitmap = bitmap_with_empty_tail(16, 10, 7);
    let options = SaveOptions::builder().cut(true).build();
    let cut = save_to_bytes(&bitmap, &options)?;

    let pak = PakImageFile::from_bytes(&cut)?;
    assert_eq!(pak.height(), 10);
    assert_eq!(pak.cutoff_height(), Some(7));
    assert_eq!(pak.bitmap(), &bitmap);

    // saving the decoded image again reproduces the file
    assert_eq!(pak.to_bytes(&options)?, cut);

    let full = save_to_bytes(&bitmap, &SaveOptions::default())?;
    assert_ne!(full, cut);
    let pak = PakImageFile::from_bytes(&full)?;
    assert_eq!(pak.cutoff_height(), None);
    assert_eq!(pak.bitmap(), &bitmap);
    Ok(())
}

#[test]
fn cut_of_an_empty_image_keeps_only_the_header() -> anyhow::Result<()> {
    let bitmap = PixelBuffer::from_indices(8, 3, 4, &[0; 24])?;
    let bytes = save_to_bytes(&bitmap, &SaveOptions { cut: true })?;
    assert_eq!(bytes, [0x02, 0x01, 0x03, 0x02, 0x00]);

    let (decoded, _, info) = load_from_bytes(&bytes)?;
    assert_eq!(decoded, bitmap);
    assert_eq!(info.as_deref(), Some("Data cut off at 0 lines."));
    Ok(())
}

#[test]
fn cut_is_suggested_for_empty_last_row() -> anyhow::Result<()> {
    assert!(SaveOptions::suggested_for(&bitmap_with_empty_tail(8, 4, 3)).cut);
    assert!(!SaveOptions::suggested_for(&bitmap_with_empty_tail(8, 4, 4)).cut);
    assert!(!SaveOptions::suggested_for(&PixelBuffer::from_indices(8, 0, 4, &[])?).cut);
    Ok(())
}

#[test]
fn load_errors() {
    let err = |data: &[u8]| PakImageFile::from_bytes(data).unwrap_err();

    assert!(matches!(err(&[0x01, 0x00]), Error::HeaderTooShort { len: 2, .. }));
    assert!(matches!(err(&[0x01, 0x05, 0x01, 0x00]), Error::HeaderTooShort { len: 1, .. }));
    assert!(matches!(err(&[0x80, 0x05, 0x02, 0x00]), Error::IllegalLeadingCode));
    assert!(matches!(err(&[0x00, 0x05, 0x02, 0x00]), Error::IllegalLeadingCode));
    assert!(matches!(
        err(&[0x02, 0x01, 0x01, 0x00, 0x0A, 0x00]),
        Error::DecompressionFailed { offset: 3, .. }
    ));

    let mut longer = pak_from_payload(&[1, 1, 0xAA, 0xBB, 0xCC, 0xDD]);
    let footer = longer.len() - 2;
    longer[footer] += 1;
    assert!(matches!(err(&longer), Error::SizeMismatch { expected: 7, actual: 6 }));

    // stream keeps going after the footer's length is reached
    assert!(matches!(
        err(&[0x07, 1, 1, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0x85, 0x11, 0x06, 0x00]),
        Error::DecompressionFailed { offset: 7, .. }
    ));

    assert!(matches!(
        err(&pak_from_payload(&[0, 1])),
        Error::ZeroDimension { byte_width: 0, height: 1 }
    ));
    assert!(matches!(
        err(&pak_from_payload(&[1, 0])),
        Error::ZeroDimension { byte_width: 1, height: 0 }
    ));
    assert!(matches!(err(&pak_from_payload(&[255, 255])), Error::ImageTooLarge { .. }));
    assert!(matches!(
        err(&pak_from_payload(&[1, 2, 0xFF, 0xFF, 0xFF])),
        Error::ScanlineMisalignment { data_len: 3, stride: 4 }
    ));
    assert!(matches!(
        err(&pak_from_payload(&[1, 1, 1, 2, 3, 4, 5, 6, 7, 8])),
        Error::SizeMismatch { .. }
    ));
}

#[test]
fn save_errors() -> anyhow::Result<()> {
    let options = SaveOptions::default();

    let eight_bit = PixelBuffer::from_indices(8, 1, 8, &[0; 8])?;
    assert!(matches!(
        save_to_bytes(&eight_bit, &options),
        Err(Error::UnsupportedPixelDepth(8))
    ));

    let wide = PixelBuffer::from_indices(328, 1, 4, &vec![1; 328])?;
    assert!(matches!(save_to_bytes(&wide, &options), Err(Error::ImageTooLarge { .. })));

    let tall = PixelBuffer::from_indices(8, 201, 4, &vec![1; 8 * 201])?;
    assert!(matches!(save_to_bytes(&tall, &options), Err(Error::ImageTooLarge { .. })));

    let empty = PixelBuffer::from_indices(0, 5, 4, &[])?;
    assert!(matches!(
        save_to_bytes(&empty, &options),
        Err(Error::ZeroDimension { byte_width: 0, height: 5 })
    ));
    assert!(PakImageFile::new(eight_bit).is_err());
    Ok(())
}

#[test]
fn largest_image_round_trips() -> anyhow::Result<()> {
    let bitmap = PixelBuffer::from_indices(320, 200, 4, &checkerboard(320, 200))?;
    let bytes = save_to_bytes(&bitmap, &SaveOptions::default())?;
    let footer = u16::from_le_bytes([bytes[bytes.len() - 2], bytes[bytes.len() - 1]]);
    assert_eq!(footer, 2 + 40 * 4 * 200);
    assert_eq!(PakImageFile::from_bytes(&bytes)?.bitmap(), &bitmap);
    Ok(())
}

#[test]
fn file_round_trip() -> anyhow::Result<()> {
    let bitmap = bitmap_with_empty_tail(24, 12, 9);
    let tmp_pak = Temp::new_file()?;
    PakImageFile::new(bitmap.clone())?.into_file(&tmp_pak, &SaveOptions::suggested_for(&bitmap))?;

    let pak = PakImageFile::from_file(&tmp_pak)?;
    assert_eq!(pak.bitmap(), &bitmap);
    assert_eq!(pak.cutoff_height(), Some(9));
    Ok(())
}

#[test]
fn renders_through_palette() -> anyhow::Result<()> {
    let bitmap = PixelBuffer::from_indices(8, 1, 4, &[0, 1, 2, 3, 12, 13, 14, 15])?;
    let pak = PakImageFile::new(bitmap)?;
    let rgb: Vec<_> = pak.as_palette_iter().collect();
    assert_eq!(rgb[1], [17, 17, 17]);
    assert_eq!(rgb[7], [255, 255, 255]);

    let img = pak.to_rgb_image();
    assert_eq!(img.dimensions(), (8, 1));
    assert_eq!(img.get_pixel(4, 0).0, [204, 204, 204]);
    Ok(())
}
