use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let prepared = decode_image(&png_bytes(1, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(err.to_string().contains("decode error:"));
}

#[test]
fn decode_svg_parse_ok_and_err() {
    let ok = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    parse_svg(ok).unwrap();

    let bad = br#"<svg"#;
    assert!(parse_svg(bad).is_err());
}

#[test]
fn decode_graphic_sniffs_svg_and_raster() {
    let svg = br#"
        <svg xmlns="http://www.w3.org/2000/svg" width="4" height="2"></svg>"#;
    let g = decode_graphic(svg).unwrap();
    assert!(matches!(g, PreparedGraphic::Svg(_)));
    assert_eq!(g.intrinsic_size(), (4, 2));

    let g = decode_graphic(&png_bytes(3, 5, [0, 0, 0, 255])).unwrap();
    assert!(matches!(g, PreparedGraphic::Raster(_)));
    assert_eq!(g.intrinsic_size(), (3, 5));
}

#[test]
fn svg_rasterizes_stretched_to_target() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
        <rect x="0" y="0" width="10" height="10" fill="#ff0000"/>
    </svg>"##;
    let g = decode_graphic(svg).unwrap();
    let img = g.rasterize(30, 6).unwrap();
    assert_eq!((img.width, img.height), (30, 6));
    assert_eq!(img.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(img.pixel(29, 5), [255, 0, 0, 255]);
}

#[test]
fn raster_graphic_resizes_to_target() {
    let g = decode_graphic(&png_bytes(2, 2, [0, 255, 0, 255])).unwrap();
    let img = g.rasterize(8, 4).unwrap();
    assert_eq!((img.width, img.height), (8, 4));
    let px = img.pixel(3, 2);
    assert!(px[0] <= 1 && px[1] >= 254 && px[2] <= 1 && px[3] >= 254);
    assert!(g.rasterize(0, 4).is_err());
}

#[test]
fn font_dir_loading_skips_missing_dirs_and_non_fonts() {
    let mut db = usvg::fontdb::Database::new();
    assert_eq!(
        load_fonts_from_dir(&mut db, Path::new("target/no_such_font_dir")),
        0
    );

    let dir = std::path::PathBuf::from("target").join("unit_svg_font_dir");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("notes.txt"), b"not a font").unwrap();
    assert_eq!(load_fonts_from_dir(&mut db, &dir), 0);
    assert_eq!(db.len(), 0);
}

#[test]
fn svg_text_without_matching_font_still_parses() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
        <text x="0" y="8" font-family="No Such Family">x</text>
    </svg>"#;
    let empty = Arc::new(usvg::fontdb::Database::new());
    let parsed = parse_svg_with_fonts(svg, empty).unwrap();
    assert_eq!(parsed.tree.size().width(), 10.0);
}
