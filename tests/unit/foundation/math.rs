use super::*;

#[test]
fn mul_div255_endpoints() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn premultiply_matches_rounded_product() {
    assert_eq!(
        premultiply_px([100, 50, 200, 128]),
        [
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128
        ]
    );
    assert_eq!(premultiply_px([9, 9, 9, 0]), [0, 0, 0, 0]);
}

#[test]
fn opaque_pixels_survive_premul_round_trip() {
    let px = [12, 200, 77, 255];
    assert_eq!(unpremultiply_px(premultiply_px(px)), px);
}

#[test]
fn unpremultiply_is_close_for_translucent_pixels() {
    let px = [200, 100, 40, 128];
    let back = unpremultiply_px(premultiply_px(px));
    for c in 0..3 {
        assert!((i32::from(back[c]) - i32::from(px[c])).abs() <= 2);
    }
    assert_eq!(back[3], 128);
}

#[test]
fn luma_weights_sum_to_one() {
    let sum: f32 = LUMA_WEIGHTS.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
    let sum: f32 = BLEND_LUM_WEIGHTS.iter().sum();
    assert!((sum - 1.0).abs() < 1e-6);
}
