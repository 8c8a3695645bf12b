use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.svg").unwrap(), "a/b.svg");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn prepared_image_checks_buffer_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul(0, 2, vec![]).is_err());
}

#[test]
fn prepared_image_pixel_is_transparent_outside() {
    let img = PreparedImage::from_premul(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(img.pixel(1, 0), [5, 6, 7, 8]);
    assert_eq!(img.pixel(2, 0), [0, 0, 0, 0]);
    assert_eq!(img.pixel(0, 1), [0, 0, 0, 0]);
    assert_eq!(img.pixel(u32::MAX, u32::MAX), [0, 0, 0, 0]);
}

#[test]
fn line_breaks_become_spaces() {
    assert!(matches!(single_line("Anna Andersson"), Cow::Borrowed(_)));
    assert_eq!(single_line("Anna\nAndersson"), "Anna Andersson");
    assert_eq!(single_line("a\r\nb\u{2028}c"), "a  b c");
}

#[test]
fn metrics_middle_sits_between_ascent_and_descent() {
    let m = TextMetrics {
        width: 100.0,
        baseline: 40.0,
        ascent: 40.0,
        descent: 10.0,
    };
    // em-box middle is 15px above the baseline
    assert_eq!(m.middle_y(), 25.0);
}

#[test]
fn register_font_rejects_non_font_bytes() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.register_font(b"not a font").is_err());
}
