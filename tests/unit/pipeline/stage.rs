use std::sync::Arc;

use super::*;
use crate::assets::decode::SpriteAsset;
use crate::effects::distort::DistortionConfig;
use crate::effects::particles::Sparkle;

fn run(stage: &mut Stage, frame: &mut Frame, tick: u64, now: f64) -> TickStats {
    let mut rng = fastrand::Rng::with_seed(11);
    let mut stats = TickStats::default();
    let mut ctx = EffectContext {
        tick: Tick(tick),
        now_secs: now,
        rng: &mut rng,
        stats: &mut stats,
    };
    stage.apply(frame, &mut ctx).unwrap();
    stats
}

#[test]
fn ranks_follow_fixed_order() {
    assert!(StageRank::Tone < StageRank::PreTransform);
    assert!(StageRank::PreTransform < StageRank::Sprites);
    assert!(StageRank::Sprites < StageRank::Particles);
    assert!(StageRank::Particles < StageRank::OneShots);
    assert!(StageRank::OneShots < StageRank::Distortion);
    assert!(StageRank::Distortion < StageRank::Text);
}

#[test]
fn sprite_stage_emits_one_cue_per_reflected_axis() {
    let asset = Arc::new(SpriteAsset::solid_rgb(10, 10, [1, 2, 3]).unwrap());
    let sprite = AnimatedSprite::new(asset, CueId::new("fish"), (35, 35), (5, 5));
    let mut stage = Stage::Sprite(sprite);
    let mut frame = Frame::new(45, 45);
    let stats = run(&mut stage, &mut frame, 0, 0.0);
    assert_eq!(stats.cues, vec![CueId::new("fish"), CueId::new("fish")]);
    assert_eq!(stats.bounds_skips, 0);
    assert_eq!(frame.pixel(35, 35), Some([1, 2, 3]));
}

#[test]
fn swallow_stage_counts_off_frame_skip() {
    let asset = Arc::new(SpriteAsset::solid_rgba(8, 8, [9, 9, 9, 255]).unwrap());
    let mut swallow = SwallowFlyby::new(asset, Default::default()).unwrap();
    let mut rng = fastrand::Rng::with_seed(1);
    swallow.activate(32, &mut rng);
    let mut stage = Stage::Swallow(swallow);
    let mut frame = Frame::new(32, 32);
    let stats = run(&mut stage, &mut frame, 0, 0.0);
    assert_eq!(stats.bounds_skips, 1);
}

#[test]
fn inactive_one_shots_are_not_skips() {
    let mut stage = Stage::Rainbow(RainbowHalo::new(Default::default()).unwrap());
    let mut frame = Frame::new(16, 16);
    let stats = run(&mut stage, &mut frame, 0, 0.0);
    assert_eq!(stats.bounds_skips, 0);
    assert_eq!(frame, Frame::new(16, 16));
}

#[test]
fn distortion_stage_reports_kind() {
    let mut stage = Stage::Distortion(
        DistortionStage::new(DistortionConfig {
            mode: crate::effects::distort::DistortionMode::Cycle,
            ..DistortionConfig::default()
        })
        .unwrap(),
    );
    let mut frame = Frame::filled(8, 8, [5, 5, 5]);
    let stats = run(&mut stage, &mut frame, 1200, 0.0);
    assert_eq!(stats.distortion, Some(DistortionKind::Swirl));
}

#[test]
fn labels_name_generators() {
    let stage = Stage::Particles(Generator::Sparkle(Sparkle::default()));
    assert_eq!(stage.label(), "sparkle");
    assert_eq!(stage.rank(), StageRank::Particles);
}

#[test]
fn validate_checks_parameters_against_the_canvas() {
    let c = Canvas::new(40, 30).unwrap();
    let big = Stage::Particles(Generator::Sparkle(Sparkle {
        radius_max: 41,
        ..Sparkle::default()
    }));
    assert!(big.validate(c).is_err());
    assert!(big.validate(Canvas::new(41, 30).unwrap()).is_ok());

    let wobble = Stage::PreTransform(Wobble {
        amplitude: f32::NAN,
        ..Wobble::default()
    });
    assert!(wobble.validate(c).is_err());
    assert!(Stage::Tone(ToneAdjust::baby_boost()).validate(c).is_ok());
}
