use super::*;

#[test]
fn default_is_identity() {
    let mut f = Frame::filled(3, 3, [12, 200, 77]);
    let before = f.clone();
    ToneAdjust::default().apply(&mut f, Tick(5)).unwrap();
    assert_eq!(f, before);
}

#[test]
fn brightness_raises_value_and_clamps() {
    let tone = ToneAdjust {
        brightness: 1.2,
        ..ToneAdjust::default()
    };
    let mut f = Frame::filled(1, 1, [100, 100, 100]);
    tone.apply(&mut f, Tick(0)).unwrap();
    assert_eq!(f.pixel(0, 0), Some([120, 120, 120]));

    let mut white = Frame::filled(1, 1, [250, 250, 250]);
    tone.apply(&mut white, Tick(0)).unwrap();
    assert_eq!(white.pixel(0, 0), Some([255, 255, 255]));
}

#[test]
fn saturation_spreads_channels_but_keeps_gray() {
    let tone = ToneAdjust {
        saturation: 1.5,
        ..ToneAdjust::default()
    };
    let mut gray = Frame::filled(1, 1, [90, 90, 90]);
    tone.apply(&mut gray, Tick(0)).unwrap();
    assert_eq!(gray.pixel(0, 0), Some([90, 90, 90]));

    let mut c = Frame::filled(1, 1, [200, 150, 150]);
    tone.apply(&mut c, Tick(0)).unwrap();
    let px = c.pixel(0, 0).unwrap();
    assert_eq!(px[0], 200);
    assert!(px[1] < 150);
}

#[test]
fn contrast_pushes_away_from_mid_gray() {
    let tone = ToneAdjust {
        contrast: 2.0,
        ..ToneAdjust::default()
    };
    let mut f = Frame::filled(1, 1, [138, 118, 128]);
    tone.apply(&mut f, Tick(0)).unwrap();
    let px = f.pixel(0, 0).unwrap();
    assert!(px[0] > 138);
    assert!(px[1] < 118);
}

#[test]
fn pulse_tint_weight_follows_sine() {
    let tint = PulseTint::default();
    assert!((tint.weight(Tick(0)) - 30.0 / 255.0).abs() < 1e-6);
    let mut f = Frame::new(2, 2);
    let tone = ToneAdjust {
        pulse_tint: Some(tint),
        ..ToneAdjust::default()
    };
    tone.apply(&mut f, Tick(0)).unwrap();
    assert_eq!(f.pixel(1, 1), Some([0, 30, 30]));
}

#[test]
fn glow_keeps_flat_frames_flat() {
    let tone = ToneAdjust {
        glow: Some(Glow::default()),
        ..ToneAdjust::default()
    };
    let mut f = Frame::filled(16, 16, [80, 90, 100]);
    tone.apply(&mut f, Tick(0)).unwrap();
    let px = f.pixel(8, 8).unwrap();
    for (got, want) in px.into_iter().zip([80u8, 90, 100]) {
        assert!(got.abs_diff(want) <= 1, "{px:?}");
    }
}

#[test]
fn glow_spreads_a_bright_point() {
    let mut f = Frame::new(21, 21);
    f.set_pixel(10, 10, [255, 255, 255]);
    let blurred = Glow::default().blurred(&f).unwrap();
    let center = blurred.pixel(10, 10).unwrap()[0];
    let near = blurred.pixel(12, 10).unwrap()[0];
    assert!(center < 255);
    assert!(near > 0);
    assert!(near <= center);
    assert_eq!(blurred.pixel(0, 0), Some([0, 0, 0]));
}

#[test]
fn glow_sigma_must_be_positive() {
    let tone = ToneAdjust {
        glow: Some(Glow {
            sigma: 0.0,
            mix: 0.3,
        }),
        ..ToneAdjust::default()
    };
    assert!(tone.validate().is_err());
}

#[test]
fn validation_rejects_negative_gain() {
    let tone = ToneAdjust {
        saturation: -1.0,
        ..ToneAdjust::default()
    };
    assert!(tone.validate().is_err());
    assert!(ToneAdjust::baby_boost().validate().is_ok());
}
