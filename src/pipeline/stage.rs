use crate::effects::composite::DrawOutcome;
use crate::effects::distort::{DistortionKind, DistortionStage, Wobble};
use crate::effects::particles::Generator;
use crate::effects::tone::ToneAdjust;
use crate::foundation::core::{Canvas, CueId, Frame, Tick};
use crate::foundation::error::BabycamResult;
use crate::layers::oneshot::{RainbowHalo, SwallowFlyby};
use crate::layers::sprite::AnimatedSprite;
use crate::layers::text::TextOverlay;

/// Per-tick counters reported by [`crate::Pipeline::process`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    /// Tick that was processed.
    pub tick: Tick,
    /// Stages applied, including ones that drew nothing.
    pub stages_applied: u32,
    /// Draws dropped for leaving the frame.
    pub bounds_skips: u32,
    /// Non-fatal stage failures (the stage's effect is missing from this frame).
    pub stage_errors: u32,
    /// Cues emitted this tick, in order.
    pub cues: Vec<CueId>,
    /// Distortion applied this tick, if a distortion stage ran.
    pub distortion: Option<DistortionKind>,
}

/// Everything a stage may read or mutate besides the frame.
pub struct EffectContext<'a> {
    /// Tick being processed.
    pub tick: Tick,
    /// Seconds since session start.
    pub now_secs: f64,
    /// Shared random stream.
    pub rng: &'a mut fastrand::Rng,
    /// Counters for this tick.
    pub stats: &'a mut TickStats,
}

impl EffectContext<'_> {
    /// Queue a cue for playback after the frame is finished.
    pub fn emit(&mut self, cue: &CueId) {
        self.stats.cues.push(cue.clone());
    }

    /// Count a skipped draw.
    pub fn record(&mut self, outcome: DrawOutcome) {
        if outcome.is_skipped() {
            self.stats.bounds_skips += 1;
        }
    }
}

/// Position of a stage in the fixed per-tick order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StageRank {
    Tone,
    PreTransform,
    Sprites,
    Particles,
    OneShots,
    Distortion,
    Text,
}

/// One effect in the pipeline.
#[derive(Debug)]
pub enum Stage {
    /// Global color transform, glow and tint.
    Tone(ToneAdjust),
    /// Geometric pre-transform (breathing zoom).
    PreTransform(Wobble),
    /// Bouncing sprite.
    Sprite(AnimatedSprite),
    /// Particle/overlay generator.
    Particles(Generator),
    /// Rainbow halo one-shot.
    Rainbow(RainbowHalo),
    /// Swallow flyby one-shot.
    Swallow(SwallowFlyby),
    /// Kaleidoscope/swirl/mosaic/wobble stage.
    Distortion(DistortionStage),
    /// Caption overlay.
    Text(TextOverlay),
}

impl Stage {
    /// Slot in the per-tick order.
    pub fn rank(&self) -> StageRank {
        match self {
            Self::Tone(_) => StageRank::Tone,
            Self::PreTransform(_) => StageRank::PreTransform,
            Self::Sprite(_) => StageRank::Sprites,
            Self::Particles(_) => StageRank::Particles,
            Self::Rainbow(_) | Self::Swallow(_) => StageRank::OneShots,
            Self::Distortion(_) => StageRank::Distortion,
            Self::Text(_) => StageRank::Text,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tone(_) => "tone",
            Self::PreTransform(_) => "pre_transform",
            Self::Sprite(_) => "sprite",
            Self::Particles(g) => g.label(),
            Self::Rainbow(_) => "rainbow",
            Self::Swallow(_) => "swallow",
            Self::Distortion(_) => "distortion",
            Self::Text(_) => "text",
        }
    }

    /// Check parameters that constructors do not, against the session `canvas`.
    pub fn validate(&self, canvas: Canvas) -> BabycamResult<()> {
        match self {
            Self::Tone(t) => t.validate(),
            Self::PreTransform(w) => w.validate(),
            Self::Particles(g) => g.validate(canvas),
            Self::Sprite(_)
            | Self::Rainbow(_)
            | Self::Swallow(_)
            | Self::Distortion(_)
            | Self::Text(_) => Ok(()),
        }
    }

    /// Apply this stage to `frame` for the context's tick.
    pub fn apply(&mut self, frame: &mut Frame, ctx: &mut EffectContext<'_>) -> BabycamResult<()> {
        match self {
            Self::Tone(t) => t.apply(frame, ctx.tick)?,
            Self::PreTransform(w) => w.apply(frame, ctx.tick),
            Self::Sprite(s) => {
                let bounce = s.advance(frame.width(), frame.height());
                for _ in 0..bounce.count() {
                    ctx.emit(s.cue());
                }
                ctx.record(s.render(frame));
            }
            Self::Particles(g) => g.apply(frame, ctx.tick, ctx.rng)?,
            Self::Rainbow(h) => {
                let outcome = h.render(frame, ctx.now_secs)?;
                ctx.record(outcome);
            }
            Self::Swallow(s) => {
                s.advance(frame.width());
                ctx.record(s.render(frame));
            }
            Self::Distortion(d) => ctx.stats.distortion = Some(d.apply(frame, ctx.tick)),
            Self::Text(t) => t.render(frame, ctx.tick)?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/stage.rs"]
mod tests;
