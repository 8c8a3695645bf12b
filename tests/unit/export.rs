use super::*;
use crate::foundation::core::Canvas;

#[test]
fn png_round_trips_straight_alpha() {
    let canvas = Canvas {
        width: 2,
        height: 1,
    };
    let surface = Surface::from_premul(canvas, vec![255, 0, 0, 255, 64, 0, 0, 128]).unwrap();
    let png = encode_png(&surface).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [128, 0, 0, 128]);
}

#[test]
fn write_png_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target")
        .join("unit_export")
        .join("nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("out.png");
    let surface = Surface::new(Canvas {
        width: 3,
        height: 3,
    })
    .unwrap();
    write_png(&surface, &path).unwrap();
    let decoded = image::open(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (3, 3));
}
