use super::*;
use crate::assets::decode::SpriteChannels;

#[test]
fn additive_saturates() {
    let mut dst = Frame::filled(2, 1, [200, 10, 0]);
    let layer = Frame::filled(2, 1, [100, 20, 0]);
    composite_layer(&mut dst, &layer, CompositeOp::Additive).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([255, 30, 0]));
}

#[test]
fn weighted_blends_every_pixel() {
    let mut dst = Frame::filled(1, 1, [100, 100, 100]);
    let layer = Frame::new(1, 1);
    composite_layer(&mut dst, &layer, CompositeOp::Weighted { alpha: 0.3 }).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([70, 70, 70]));
}

#[test]
fn masked_weighted_leaves_unpainted_pixels() {
    let mut dst = Frame::filled(2, 1, [100, 100, 100]);
    let mut layer = Frame::new(2, 1);
    layer.set_pixel(1, 0, [200, 200, 200]);
    composite_layer(&mut dst, &layer, CompositeOp::MaskedWeighted { alpha: 0.5 }).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([100, 100, 100]));
    assert_eq!(dst.pixel(1, 0), Some([150, 150, 150]));
}

#[test]
fn size_mismatch_is_rejected() {
    let mut dst = Frame::new(2, 2);
    let layer = Frame::new(1, 2);
    assert!(composite_layer(&mut dst, &layer, CompositeOp::Additive).is_err());
}

#[test]
fn op_validation() {
    assert!(CompositeOp::Weighted { alpha: 0.3 }.validate().is_ok());
    assert!(CompositeOp::Weighted { alpha: 1.3 }.validate().is_err());
    assert!(CompositeOp::MaskedWeighted { alpha: f32::NAN }.validate().is_err());
}

#[test]
fn alpha_blit_matches_blend_formula_for_every_pixel() {
    let mut bg = Frame::new(8, 8);
    for y in 0..8 {
        for x in 0..8 {
            bg.set_pixel(x, y, [(x * 30) as u8, (y * 30) as u8, 77]);
        }
    }
    let mut px = Vec::new();
    for i in 0..16u32 {
        px.extend_from_slice(&[250, 5, (i * 10) as u8, (i * 17) as u8]);
    }
    let sprite = SpriteAsset::from_raw(4, 4, SpriteChannels::Alpha, px.clone()).unwrap();

    let mut out = bg.clone();
    assert_eq!(blit_sprite(&mut out, &sprite, 2, 3), DrawOutcome::Drawn);

    for sy in 0..4i32 {
        for sx in 0..4i32 {
            let s = &px[((sy * 4 + sx) * 4) as usize..][..4];
            let a = f32::from(s[3]) / 255.0;
            let b = bg.pixel(sx + 2, sy + 3).unwrap();
            let expected = [
                (f32::from(b[0]) * (1.0 - a) + f32::from(s[0]) * a).round() as u8,
                (f32::from(b[1]) * (1.0 - a) + f32::from(s[1]) * a).round() as u8,
                (f32::from(b[2]) * (1.0 - a) + f32::from(s[2]) * a).round() as u8,
            ];
            assert_eq!(out.pixel(sx + 2, sy + 3), Some(expected));
        }
    }
    assert_eq!(out.pixel(0, 0), bg.pixel(0, 0));
}

#[test]
fn opaque_blit_overwrites() {
    let mut f = Frame::filled(4, 4, [9, 9, 9]);
    let sprite = SpriteAsset::solid_rgb(2, 2, [1, 2, 3]).unwrap();
    assert_eq!(blit_sprite(&mut f, &sprite, 2, 2), DrawOutcome::Drawn);
    assert_eq!(f.pixel(3, 3), Some([1, 2, 3]));
    assert_eq!(f.pixel(1, 1), Some([9, 9, 9]));
}

#[test]
fn out_of_bounds_blit_is_skipped_untouched() {
    let mut f = Frame::filled(4, 4, [9, 9, 9]);
    let before = f.clone();
    let sprite = SpriteAsset::solid_rgb(2, 2, [1, 2, 3]).unwrap();
    assert!(blit_sprite(&mut f, &sprite, 3, 0).is_skipped());
    assert!(blit_sprite(&mut f, &sprite, -1, 0).is_skipped());
    assert!(blit_sprite(&mut f, &sprite, 0, 3).is_skipped());
    assert_eq!(f, before);
}
