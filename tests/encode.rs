use std::io::Cursor;
use svg2ico::{Error, IconDir, IconEntry, RasterImage};

//===========================================================================//

/// Builds a square test image with a per-pixel gradient so that compression
/// has real data to chew on.
fn gradient_image(size: u32) -> RasterImage {
    let mut rgba = Vec::<u8>::new();
    for row in 0..size {
        for col in 0..size {
            rgba.push((col * 255 / size) as u8);
            rgba.push((row * 255 / size) as u8);
            rgba.push(0x80);
            rgba.push(((row + col) * 255 / (2 * size)) as u8);
        }
    }
    RasterImage::from_rgba(size, size, rgba).unwrap()
}

fn icon_with_sizes(sizes: &[u32]) -> IconDir {
    let mut icondir = IconDir::new();
    for &size in sizes {
        icondir.add_entry(IconEntry::encode(&gradient_image(size)).unwrap());
    }
    icondir
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

//===========================================================================//

#[test]
fn scenario_six_standard_sizes() {
    let sizes = [16, 32, 48, 64, 128, 256];
    let icondir = icon_with_sizes(&sizes);
    let bytes = icondir.to_bytes().unwrap();

    // Header: reserved=0, type=1 (icon), count=6.
    assert_eq!(read_u16(&bytes, 0), 0);
    assert_eq!(read_u16(&bytes, 2), 1);
    assert_eq!(read_u16(&bytes, 4), 6);

    // Entry 0 describes a 16x16, 32-bit entry.
    assert_eq!(bytes[6], 16); // width
    assert_eq!(bytes[7], 16); // height
    assert_eq!(read_u16(&bytes, 10), 1); // planes
    assert_eq!(read_u16(&bytes, 12), 32); // bits per pixel

    // Entry 5 (size 256) uses the 0-means-256 convention.
    let entry5 = 6 + 5 * 16;
    assert_eq!(bytes[entry5], 0);
    assert_eq!(bytes[entry5 + 1], 0);

    // Total file length is header + directory + blobs.
    let blob_total: u32 =
        (0..6).map(|index| read_u32(&bytes, 6 + index * 16 + 8)).sum();
    assert_eq!(bytes.len() as u32, 6 + 6 * 16 + blob_total);
}

#[test]
fn directory_offsets_are_contiguous() {
    let icondir = icon_with_sizes(&[16, 32, 48, 64]);
    let bytes = icondir.to_bytes().unwrap();
    let count = read_u16(&bytes, 4) as usize;
    assert_eq!(count, 4);
    let mut expected_offset = 6 + 16 * (count as u32);
    for index in 0..count {
        let record = 6 + index * 16;
        let length = read_u32(&bytes, record + 8);
        let offset = read_u32(&bytes, record + 12);
        assert_eq!(offset, expected_offset, "entry {} offset", index);
        expected_offset += length;
    }
    assert_eq!(expected_offset, bytes.len() as u32);
}

#[test]
fn directory_length_bounds_each_blob() {
    let icondir = icon_with_sizes(&[16, 32]);
    let bytes = icondir.to_bytes().unwrap();
    for index in 0..2 {
        let record = 6 + index * 16;
        let length = read_u32(&bytes, record + 8) as usize;
        let offset = read_u32(&bytes, record + 12) as usize;
        let blob = &bytes[offset..offset + length];
        // Each blob is an independently decodable PNG.
        let image = RasterImage::read_png(blob).unwrap();
        assert_eq!(image.width(), if index == 0 { 16 } else { 32 });
    }
}

#[test]
fn encoding_is_deterministic() {
    let icondir = icon_with_sizes(&[16, 32, 48]);
    let first = icondir.to_bytes().unwrap();
    let second = icondir.to_bytes().unwrap();
    assert_eq!(first, second);
}

#[test]
fn full_round_trip() {
    let sizes = [16, 32, 48, 64, 128, 256];
    let icondir = icon_with_sizes(&sizes);
    let bytes = icondir.to_bytes().unwrap();
    let icondir = IconDir::read(Cursor::new(&bytes)).unwrap();
    assert_eq!(icondir.entries().len(), sizes.len());
    for (index, &size) in sizes.iter().enumerate() {
        let entry = &icondir.entries()[index];
        assert_eq!(entry.width(), size);
        assert_eq!(entry.height(), size);
        let decoded = entry.decode().unwrap();
        let original = gradient_image(size);
        assert_eq!(decoded.rgba_data(), original.rgba_data());
    }
}

#[test]
fn reject_non_square_image() {
    let rgba = vec![0u8; 32 * 16 * 4];
    let result = RasterImage::from_rgba(32, 16, rgba);
    assert!(matches!(result, Err(Error::InvalidImage(_))));
}

#[test]
fn reject_empty_container() {
    let icondir = IconDir::new();
    assert!(matches!(icondir.to_bytes(), Err(Error::NoEntries)));
}

//===========================================================================//
