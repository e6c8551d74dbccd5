use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn hsv_primaries() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
    assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
    assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    assert_eq!(hsv_to_rgb(0.5, 0.0, 1.0), [255, 255, 255]);
}

#[test]
fn rgb_hsv_roundtrip_on_saturated_colors() {
    for c in [[255u8, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 0], [10, 200, 90]] {
        let (h, s, v) = rgb_to_hsv(c);
        let back = hsv_to_rgb(h, s, v);
        for i in 0..3 {
            assert!((i32::from(back[i]) - i32::from(c[i])).abs() <= 1, "{c:?} -> {back:?}");
        }
    }
}

#[test]
fn half_degree_hue_wraps() {
    assert_eq!(half_degree_hue_to_rgb(0), half_degree_hue_to_rgb(180));
    assert_eq!(half_degree_hue_to_rgb(60), [0, 255, 0]);
}

#[test]
fn hash01_is_stable_and_in_range() {
    for k in 0..200 {
        let a = hash01(k, 7);
        assert_eq!(a, hash01(k, 7));
        assert!((0.0..1.0).contains(&a));
    }
    assert_ne!(hash01(1, 7), hash01(2, 7));
}
