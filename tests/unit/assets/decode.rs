use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn from_bytes_sniffs_png_and_keeps_dimensions() {
    let asset = ImageAsset::from_bytes(png_bytes(3, 2, [10, 20, 30, 255])).unwrap();
    assert_eq!(asset.width(), 3);
    assert_eq!(asset.height(), 2);
    assert_eq!(asset.mime_type(), "image/png");
    assert_eq!(asset.pixels().get_pixel(2, 1).0, [10, 20, 30, 255]);
}

#[test]
fn garbage_bytes_are_input_errors() {
    let err = ImageAsset::from_bytes(b"not an image".to_vec()).unwrap_err();
    assert!(matches!(err, MemeError::Input(_)));
}

#[test]
fn data_url_round_trips_through_base64() {
    let asset = ImageAsset::from_bytes(png_bytes(1, 1, [1, 2, 3, 255])).unwrap();
    let url = asset.to_data_url();
    assert!(url.starts_with("data:image/png;base64,"));

    let back = ImageAsset::from_data_url(&url).unwrap();
    assert_eq!(back.encoded(), asset.encoded());
    assert_eq!(back.pixels().as_raw(), asset.pixels().as_raw());
}

#[test]
fn data_url_without_mime_defaults_to_png() {
    let (mime, payload) = parse_data_url("data:;base64,AAAA").unwrap();
    assert_eq!(mime, DEFAULT_MIME_TYPE);
    assert_eq!(payload, "AAAA");

    let (mime, _) = parse_data_url("data:image/jpeg;base64,AAAA").unwrap();
    assert_eq!(mime, "image/jpeg");
}

#[test]
fn malformed_data_urls_are_rejected() {
    assert!(parse_data_url("image/png;base64,AAAA").is_err());
    assert!(parse_data_url("data:image/png;base64").is_err());
    assert!(parse_data_url("data:text/plain,hello").is_err());
}

#[test]
fn premultiply_then_unpremultiply_is_stable_for_common_alphas() {
    let mut px = vec![100u8, 50, 200, 128, 7, 8, 9, 255, 40, 40, 40, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(
        &px[..4],
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(&px[4..8], &[7, 8, 9, 255]);
    assert_eq!(&px[8..], &[0, 0, 0, 0]);

    unpremultiply_rgba8_in_place(&mut px);
    assert!((i16::from(px[0]) - 100).abs() <= 1);
    assert!((i16::from(px[1]) - 50).abs() <= 1);
    assert!((i16::from(px[2]) - 200).abs() <= 1);
    assert_eq!(&px[4..8], &[7, 8, 9, 255]);
}
