use std::path::Path;

use crate::assets::store::AssetStore;
use crate::effects::composite::CompositeOp;
use crate::effects::distort::{DistortionConfig, DistortionMode, DistortionStage, Wobble};
use crate::effects::particles::{Bubble, BubbleColor, Generator, RainbowBand, Sparkle, StarTwinkle};
use crate::effects::tone::{PulseTint, ToneAdjust};
use crate::foundation::core::{Canvas, CueId};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::io::cue::CuePlayer;
use crate::layers::oneshot::{RainbowHalo, RainbowHaloParams, SwallowFlyby, SwallowParams};
use crate::layers::sprite::{AnimatedSprite, SpeedRange};
use crate::layers::text::{TextOverlay, TextParams};
use crate::pipeline::orchestrator::Pipeline;
use crate::pipeline::stage::Stage;

/// A bouncing sprite: image path relative to the asset root, cue, and speed ranges.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpriteConfig {
    /// Image path relative to the asset root.
    pub image: String,
    /// Cue played on every bounce.
    pub cue: CueId,
    /// Horizontal speed magnitude range.
    pub speed_x: SpeedRange,
    /// Vertical speed magnitude range.
    pub speed_y: SpeedRange,
}

impl SpriteConfig {
    fn new(name: &str, min: i32, max: i32) -> Self {
        Self {
            image: format!("{name}.png"),
            cue: CueId::new(name),
            speed_x: SpeedRange::new(min, max),
            speed_y: SpeedRange::new(min, max),
        }
    }
}

/// Swallow flyby: image path plus timing/motion parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SwallowConfig {
    /// Image path relative to the asset root.
    pub image: String,
    #[serde(flatten)]
    pub params: SwallowParams,
}

/// Built-in configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Boosted colors with glow, bouncing animals, rainbow halo and swallow.
    Baby,
    /// Rainbow stripes, sparkles, pulsing tint, breathing zoom and a caption.
    Party,
    /// Everything, with the distortion cycling every epoch.
    Combined,
}

impl Preset {
    /// Lowercase name, as accepted by `--preset`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Baby => "baby",
            Self::Party => "party",
            Self::Combined => "combined",
        }
    }
}

/// Complete pipeline description, loadable from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Session resolution.
    pub canvas: Canvas,
    /// Seed for the random stream; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub tone: ToneAdjust,
    pub pre_transform: Option<Wobble>,
    pub sprites: Vec<SpriteConfig>,
    /// Applied in list order after the sprites.
    pub generators: Vec<Generator>,
    pub rainbow: Option<RainbowHaloParams>,
    pub swallow: Option<SwallowConfig>,
    pub distortion: DistortionConfig,
    pub text: Option<TextParams>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 640,
                height: 480,
            },
            seed: None,
            tone: ToneAdjust::default(),
            pre_transform: None,
            sprites: Vec::new(),
            generators: Vec::new(),
            rainbow: None,
            swallow: None,
            distortion: DistortionConfig::default(),
            text: None,
        }
    }
}

fn baby_sprites() -> Vec<SpriteConfig> {
    vec![
        SpriteConfig::new("star", 1, 3),
        SpriteConfig::new("sun", 1, 2),
        SpriteConfig::new("butterfly", 2, 4),
        SpriteConfig::new("fish", 3, 5),
        SpriteConfig::new("turtle", 1, 2),
        SpriteConfig::new("dog", 4, 6),
    ]
}

fn baby_swallow() -> SwallowConfig {
    SwallowConfig {
        image: "swallow.png".to_owned(),
        params: SwallowParams::default(),
    }
}

impl PipelineConfig {
    /// Built-in configuration.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Baby => Self {
                tone: ToneAdjust::baby_boost(),
                sprites: baby_sprites(),
                rainbow: Some(RainbowHaloParams::default()),
                swallow: Some(baby_swallow()),
                ..Self::default()
            },
            Preset::Party => Self {
                tone: ToneAdjust {
                    pulse_tint: Some(PulseTint::default()),
                    ..ToneAdjust::default()
                },
                pre_transform: Some(Wobble::default()),
                generators: vec![
                    Generator::RainbowBand(RainbowBand::default()),
                    Generator::Sparkle(Sparkle::default()),
                ],
                text: Some(TextParams::default()),
                ..Self::default()
            },
            Preset::Combined => Self {
                tone: ToneAdjust::baby_boost(),
                sprites: baby_sprites(),
                generators: vec![
                    Generator::Bubble(Bubble {
                        color: BubbleColor::Random,
                        burst: true,
                        ..Bubble::default()
                    }),
                    Generator::Sparkle(Sparkle {
                        op: CompositeOp::Weighted { alpha: 0.3 },
                        ..Sparkle::default()
                    }),
                    Generator::StarTwinkle(StarTwinkle::default()),
                ],
                rainbow: Some(RainbowHaloParams::default()),
                swallow: Some(baby_swallow()),
                distortion: DistortionConfig {
                    mode: DistortionMode::Cycle,
                    ..DistortionConfig::default()
                },
                text: Some(TextParams {
                    captions: vec![
                        "HELLO BABY!".to_owned(),
                        "PEEK-A-BOO!".to_owned(),
                        "PARTY TIME!".to_owned(),
                    ],
                    ..TextParams::default()
                }),
                ..Self::default()
            },
        }
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> BabycamResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: &Path) -> BabycamResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| BabycamError::validation(format!("read config '{}': {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Pretty JSON for the `preset` subcommand.
    pub fn to_json_pretty(&self) -> BabycamResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every section.
    pub fn validate(&self) -> BabycamResult<()> {
        self.canvas.validate()?;
        self.tone.validate()?;
        if let Some(w) = self.pre_transform {
            w.validate()?;
        }
        for s in &self.sprites {
            if s.image.trim().is_empty() {
                return Err(BabycamError::validation("sprite image path must be non-empty"));
            }
            s.speed_x.validate()?;
            s.speed_y.validate()?;
        }
        for g in &self.generators {
            g.validate(self.canvas)?;
        }
        if let Some(r) = &self.rainbow {
            r.validate()?;
        }
        if let Some(s) = &self.swallow {
            if s.image.trim().is_empty() {
                return Err(BabycamError::validation("swallow image path must be non-empty"));
            }
            s.params.validate()?;
        }
        self.distortion.validate()?;
        if let Some(t) = &self.text {
            t.validate()?;
        }
        Ok(())
    }
}

/// Validate `config`, load its images and assemble the pipeline.
///
/// Image and font failures are fatal `Asset` errors. Sprites spawn at random positions from the config's
/// random stream, which then continues as the pipeline's stream.
#[tracing::instrument(skip_all, fields(sprites = config.sprites.len(), generators = config.generators.len()))]
pub fn build_pipeline(
    config: &PipelineConfig,
    assets: &mut AssetStore,
    cue_player: Box<dyn CuePlayer>,
) -> BabycamResult<Pipeline> {
    config.validate()?;
    let mut rng = config
        .seed
        .map(fastrand::Rng::with_seed)
        .unwrap_or_else(fastrand::Rng::new);

    let mut stages = vec![Stage::Tone(config.tone)];
    if let Some(w) = config.pre_transform {
        stages.push(Stage::PreTransform(w));
    }
    for s in &config.sprites {
        let asset = assets.load_sprite(&s.image)?;
        let sprite =
            AnimatedSprite::spawn(asset, s.cue.clone(), config.canvas, s.speed_x, s.speed_y, &mut rng)?;
        stages.push(Stage::Sprite(sprite));
    }
    stages.extend(config.generators.iter().copied().map(Stage::Particles));
    if let Some(r) = &config.rainbow {
        stages.push(Stage::Rainbow(RainbowHalo::new(r.clone())?));
    }
    if let Some(s) = &config.swallow {
        let asset = assets.load_sprite(&s.image)?;
        stages.push(Stage::Swallow(SwallowFlyby::new(asset, s.params.clone())?));
    }
    if config.distortion.mode != DistortionMode::None {
        stages.push(Stage::Distortion(DistortionStage::new(config.distortion)?));
    }
    if let Some(t) = &config.text {
        let font = assets.load_font(&t.font)?;
        stages.push(Stage::Text(TextOverlay::new(t.clone(), font)?));
    }

    let pipeline = Pipeline::new(config.canvas, stages, cue_player, rng)?;
    tracing::debug!(stages = ?pipeline.stage_labels(), "pipeline built");
    Ok(pipeline)
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
