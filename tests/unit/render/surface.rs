use super::*;

#[test]
fn new_surface_is_transparent_and_sized() {
    let s = Surface::new(Canvas {
        width: 3,
        height: 2,
    })
    .unwrap();
    assert_eq!(s.data().len(), 24);
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.pixel(10, 10), [0; 4]);
    assert!(
        Surface::new(Canvas {
            width: 0,
            height: 2
        })
        .is_err()
    );
}

#[test]
fn from_premul_checks_length_and_clear_resets() {
    let c = Canvas {
        width: 1,
        height: 1,
    };
    assert!(Surface::from_premul(c, vec![1, 2, 3]).is_err());
    let mut s = Surface::from_premul(c, vec![64, 0, 0, 128]).unwrap();
    assert_eq!(s.to_straight_rgba(), vec![128, 0, 0, 128]);
    s.clear();
    assert_eq!(s.pixel(0, 0), [0; 4]);
}

#[test]
fn blit_image_at_offset() {
    let mut s = Surface::new(Canvas {
        width: 2,
        height: 2,
    })
    .unwrap();
    let img = PreparedImage::from_premul(1, 1, vec![0, 255, 0, 255]).unwrap();
    s.blit_over(&img, 1, 1).unwrap();
    assert_eq!(s.pixel(1, 1), [0, 255, 0, 255]);
    assert_eq!(s.pixel(0, 0), [0; 4]);
}
