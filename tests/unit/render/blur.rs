use super::*;

#[test]
fn kernel_sums_to_one_in_q16() {
    for (r, s) in [(1, 0.5), (3, 1.0), (2, 0.5), (6, 2.0)] {
        let k = gaussian_kernel_q16(r, s).unwrap();
        assert_eq!(k.len(), (2 * r + 1) as usize);
        assert_eq!(k.iter().map(|&w| u64::from(w)).sum::<u64>(), 1 << 16);
    }
    assert!(gaussian_kernel_q16(2, 0.0).is_err());
    assert_eq!(gaussian_kernel_q16(0, 0.0).unwrap(), vec![1 << 16]);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    let k = gaussian_kernel_q16(3, 1.5).unwrap();
    assert_eq!(blur_rgba8_premul(&src, w, h, &k).unwrap(), src);
}

#[test]
fn single_pixel_spreads_and_keeps_energy() {
    let (w, h) = (7u32, 7u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((3 * w + 3) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let k = gaussian_kernel_q16(3, 1.0).unwrap();
    let out = blur_rgba8_premul(&src, w, h, &k).unwrap();
    assert!(out.chunks_exact(4).filter(|px| px[3] != 0).count() > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn region_blur_leaves_outside_pixels_alone() {
    let canvas = Canvas {
        width: 6,
        height: 1,
    };
    let mut buf = vec![0u8; canvas.byte_len()];
    buf[8..12].copy_from_slice(&[200, 200, 200, 200]);
    buf[20..24].copy_from_slice(&[9, 9, 9, 9]);
    let region = PixelRect {
        x: 0,
        y: 0,
        width: 4,
        height: 1,
    };
    blur_region_in_place(&mut buf, canvas, region, ShadowBlur::from_blur(2.0)).unwrap();
    assert_eq!(&buf[20..24], &[9, 9, 9, 9]);
    assert!(buf[3] > 0 || buf[7] > 0);
    assert!(buf[11] < 200);
}
