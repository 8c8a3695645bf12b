use super::*;

fn close(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn set_lum_hits_target_luminosity() {
    for c in [[1.0, 0.9, 0.9], [0.0, 0.6, 0.9], [0.2, 0.2, 0.2]] {
        for l in [0.0, 0.1, 0.5, 0.93, 1.0] {
            let out = set_lum(c, l);
            assert!(close(lum(out), l, 1e-4), "{c:?} -> {l}: {out:?}");
            assert!(out.iter().all(|v| (-1e-5..=1.0 + 1e-5).contains(v)));
        }
    }
}

#[test]
fn zero_strength_is_a_no_op() {
    let mut buf = vec![10, 200, 30, 255, 0, 0, 0, 0, 40, 40, 40, 128];
    let before = buf.clone();
    apply_tint(&mut buf, Rgba8::rgb(0xff, 0xe8, 0xe8), 0.0).unwrap();
    assert_eq!(buf, before);
}

#[test]
fn full_strength_keeps_luminosity_and_takes_fill_hue() {
    let fill = Rgba8::rgb(0xff, 0xe8, 0xe8);
    let mut buf = vec![128, 128, 128, 255, 30, 30, 30, 255];
    let lums_before: Vec<f32> = buf
        .chunks_exact(4)
        .map(|p| lum([p[0] as f32 / 255.0, p[1] as f32 / 255.0, p[2] as f32 / 255.0]))
        .collect();
    apply_tint(&mut buf, fill, 1.0).unwrap();

    for (px, before) in buf.chunks_exact(4).zip(lums_before) {
        let out = [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ];
        assert!(close(lum(out), before, 1.5 / 255.0), "{px:?}");
        assert_eq!(px[3], 255);
        // fill is reddish: red leads, green and blue stay equal
        assert!(px[0] > px[1]);
        assert!((i16::from(px[1]) - i16::from(px[2])).abs() <= 1);
    }
}

#[test]
fn partial_strength_mixes_toward_blend() {
    let fill = Rgba8::rgb(0xff, 0xe8, 0xe8);
    let mut weak = vec![128, 128, 128, 255];
    let mut strong = weak.clone();
    apply_tint(&mut weak, fill, 0.28).unwrap();
    apply_tint(&mut strong, fill, 1.0).unwrap();
    assert!(weak[0] > 128 && weak[0] < strong[0]);
    assert!(weak[1] <= 128 && weak[1] >= strong[1]);
}

#[test]
fn transparent_backdrop_gets_plain_fill() {
    let mut buf = vec![0, 0, 0, 0];
    apply_tint(&mut buf, Rgba8::rgb(255, 0, 0), 0.5).unwrap();
    assert_eq!(buf, vec![128, 0, 0, 128]);
}

#[test]
fn rejects_bad_input() {
    let mut odd = vec![0u8; 3];
    assert!(apply_tint(&mut odd, Rgba8::WHITE, 0.5).is_err());
    let mut ok = vec![0u8; 4];
    assert!(apply_tint(&mut ok, Rgba8::WHITE, f32::NAN).is_err());
}
