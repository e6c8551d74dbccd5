//! Timed one-shot effects: externally activated, self-deactivating overlays.
//!
//! Both effects are created inactive and draw nothing until activated. Activating an active
//! effect is a no-op, so at most one instance of each kind runs at a time.

use std::sync::Arc;

use vello_cpu::kurbo::Point;

use crate::assets::decode::SpriteAsset;
use crate::effects::composite::{DrawOutcome, blit_sprite};
use crate::effects::raster::Layer;
use crate::foundation::core::{CueId, Frame};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::foundation::math::hsv_to_rgb;

/// Parameters of the full-screen rainbow halo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RainbowHaloParams {
    /// Seconds the halo stays up after activation.
    pub duration_secs: f64,
    /// Seconds between activation attempts.
    pub interval_secs: f64,
    /// Cue played on activation.
    pub cue: CueId,
    /// Number of concentric rings.
    pub rings: u32,
    /// Radius step between rings in pixels.
    pub ring_spacing: u32,
    /// Ring stroke width in pixels.
    pub thickness: u32,
}

impl Default for RainbowHaloParams {
    fn default() -> Self {
        Self {
            duration_secs: 5.0,
            interval_secs: 30.0,
            cue: CueId::new("rainbow"),
            rings: 6,
            ring_spacing: 5,
            thickness: 5,
        }
    }
}

impl RainbowHaloParams {
    /// Reject non-positive timings and empty ring sets.
    pub fn validate(&self) -> BabycamResult<()> {
        if !(self.duration_secs.is_finite() && self.duration_secs > 0.0) {
            return Err(BabycamError::validation("rainbow.duration_secs must be > 0"));
        }
        if !(self.interval_secs.is_finite() && self.interval_secs > 0.0) {
            return Err(BabycamError::validation("rainbow.interval_secs must be > 0"));
        }
        if self.rings == 0 || self.thickness == 0 {
            return Err(BabycamError::validation(
                "rainbow.rings and rainbow.thickness must be > 0",
            ));
        }
        Ok(())
    }
}

/// Concentric hue-ramped rings around the frame center for a fixed duration.
#[derive(Clone, Debug)]
pub struct RainbowHalo {
    params: RainbowHaloParams,
    active: bool,
    started_at: f64,
}

impl RainbowHalo {
    /// Create an inactive halo.
    pub fn new(params: RainbowHaloParams) -> BabycamResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            active: false,
            started_at: 0.0,
        })
    }

    /// Parameters.
    pub fn params(&self) -> &RainbowHaloParams {
        &self.params
    }

    /// Return `true` while the halo is showing.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Activation time of the current (or last) run in seconds.
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    /// Start the halo at `now_secs`, returning the cue to play. No-op while already active.
    pub fn activate(&mut self, now_secs: f64) -> Option<CueId> {
        if self.active {
            return None;
        }
        self.active = true;
        self.started_at = now_secs;
        tracing::debug!(now_secs, "rainbow halo activated");
        Some(self.params.cue.clone())
    }

    /// Color of ring `index`: its share of the full hue circle, fully saturated.
    pub fn ring_color(&self, index: u32) -> [u8; 3] {
        hsv_to_rgb(index as f32 / self.params.rings as f32, 1.0, 1.0)
    }

    /// Draw the rings, then deactivate if the duration has elapsed.
    ///
    /// The call that observes `elapsed > duration` still draws; later calls draw nothing.
    pub fn render(&mut self, frame: &mut Frame, now_secs: f64) -> BabycamResult<DrawOutcome> {
        if !self.active {
            return Ok(DrawOutcome::Idle);
        }

        let (cx, cy) = frame.canvas().center();
        let center = Point::new(f64::from(cx) + 0.5, f64::from(cy) + 0.5);
        let outer = f64::from(frame.width().min(frame.height()) / 2);
        let mut layer = Layer::for_frame(frame)?;
        for i in 0..self.params.rings {
            let r = outer - f64::from(i) * f64::from(self.params.ring_spacing);
            if r <= 0.0 {
                break;
            }
            layer.stroke_circle(
                center,
                r,
                f64::from(self.params.thickness),
                self.ring_color(i),
            );
        }
        layer.finish().draw_over(frame)?;

        if now_secs - self.started_at > self.params.duration_secs {
            self.active = false;
            tracing::debug!(now_secs, "rainbow halo finished");
        }
        Ok(DrawOutcome::Drawn)
    }
}

/// Parameters of the swallow flyby.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SwallowParams {
    /// Cue played on activation.
    pub cue: CueId,
    /// Horizontal speed in pixels per tick.
    pub speed: i32,
    /// Starting x, normally off-screen left.
    pub start_x: i32,
    /// Seconds between activation attempts.
    pub interval_secs: f64,
}

impl Default for SwallowParams {
    fn default() -> Self {
        Self {
            cue: CueId::new("swallow"),
            speed: 10,
            start_x: -100,
            interval_secs: 45.0,
        }
    }
}

impl SwallowParams {
    /// The flyby must move right and fire on a positive interval.
    pub fn validate(&self) -> BabycamResult<()> {
        if self.speed <= 0 {
            return Err(BabycamError::validation("swallow.speed must be > 0"));
        }
        if !(self.interval_secs.is_finite() && self.interval_secs > 0.0) {
            return Err(BabycamError::validation("swallow.interval_secs must be > 0"));
        }
        Ok(())
    }
}

/// A sprite crossing the frame left to right at a random height.
#[derive(Clone, Debug)]
pub struct SwallowFlyby {
    params: SwallowParams,
    asset: Arc<SpriteAsset>,
    active: bool,
    x: i32,
    y: i32,
}

impl SwallowFlyby {
    /// Create an inactive flyby.
    pub fn new(asset: Arc<SpriteAsset>, params: SwallowParams) -> BabycamResult<Self> {
        params.validate()?;
        Ok(Self {
            x: params.start_x,
            y: 0,
            params,
            asset,
            active: false,
        })
    }

    /// Parameters.
    pub fn params(&self) -> &SwallowParams {
        &self.params
    }

    /// Return `true` while crossing.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Top-left corner.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Start a crossing at `start_x` and a random `y` in `[0, frame_height - asset_height]`.
    /// No-op while already active.
    pub fn activate(&mut self, frame_height: u32, rng: &mut fastrand::Rng) -> Option<CueId> {
        if self.active {
            return None;
        }
        let max_y = (frame_height as i32 - self.asset.height() as i32).max(0);
        self.x = self.params.start_x;
        self.y = rng.i32(0..=max_y);
        self.active = true;
        tracing::debug!(y = self.y, "swallow flyby activated");
        Some(self.params.cue.clone())
    }

    /// Move right by `speed`; deactivate once `x > frame_width`.
    pub fn advance(&mut self, frame_width: u32) {
        if !self.active {
            return;
        }
        self.x += self.params.speed;
        if self.x > frame_width as i32 {
            self.active = false;
            tracing::debug!("swallow flyby finished");
        }
    }

    /// Alpha-composite at the current position; skipped while partly off-frame.
    pub fn render(&self, frame: &mut Frame) -> DrawOutcome {
        if !self.active {
            return DrawOutcome::Idle;
        }
        blit_sprite(frame, &self.asset, i64::from(self.x), i64::from(self.y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/oneshot.rs"]
mod tests;
