use super::*;

#[test]
fn pixmap_from_premul_bytes_checks_size() {
    let pm = pixmap_from_premul_bytes(&[1, 2, 3, 255, 4, 5, 6, 128], 2, 1).unwrap();
    assert_eq!((pm.width(), pm.height()), (2, 1));
    assert_eq!(pm.data_as_u8_slice(), &[1, 2, 3, 255, 4, 5, 6, 128]);

    assert!(pixmap_from_premul_bytes(&[0; 4], 2, 1).is_err());
    assert!(pixmap_from_premul_bytes(&[], 70_000, 0).is_err());
}

#[test]
fn opaque_image_covers_its_placement() {
    let canvas = Canvas {
        width: 8,
        height: 8,
    };
    let img = PreparedImage::from_premul(2, 2, [0u8, 0, 255, 255].repeat(4)).unwrap();
    let src = SourceImage::from_prepared(img).unwrap();
    let mut raster = CpuRasterizer::new();

    let layer = raster
        .draw_image(
            canvas,
            &src,
            Affine::translate((2.0, 2.0)) * Affine::scale(2.0),
        )
        .unwrap();
    let data = layer.data_as_u8_slice();
    let px = |x: usize, y: usize| &data[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
    assert_eq!(px(3, 3), &[0, 0, 255, 255]);
    assert_eq!(px(0, 0), &[0, 0, 0, 0]);
    assert_eq!(px(7, 7), &[0, 0, 0, 0]);

    // second call reuses the context and starts from a clean layer
    let again = raster
        .draw_image(canvas, &src, Affine::translate((6.0, 6.0)))
        .unwrap();
    assert_eq!(&again.data_as_u8_slice()[(3 * 8 + 3) * 4..(3 * 8 + 3) * 4 + 4], &[0, 0, 0, 0]);
}

#[test]
fn source_image_decodes_png() {
    let mut png = Vec::new();
    image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 8, 7, 255]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let src = SourceImage::decode(&png).unwrap();
    assert_eq!((src.width(), src.height()), (3, 2));
    assert_eq!(src.prepared().pixel(2, 1), [9, 8, 7, 255]);
    assert!(SourceImage::decode(b"nope").is_err());
}
