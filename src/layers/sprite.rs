use std::sync::Arc;

use crate::assets::decode::SpriteAsset;
use crate::effects::composite::{DrawOutcome, blit_sprite};
use crate::foundation::core::{Canvas, CueId, Frame};
use crate::foundation::error::{BabycamError, BabycamResult};

/// Axes that reflected during one [`AnimatedSprite::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounce {
    /// Horizontal velocity flipped.
    pub x: bool,
    /// Vertical velocity flipped.
    pub y: bool,
}

impl Bounce {
    /// Number of cue emissions this bounce causes (a corner hit counts twice).
    pub fn count(self) -> usize {
        usize::from(self.x) + usize::from(self.y)
    }

    /// Return `true` if either axis reflected.
    pub fn any(self) -> bool {
        self.x || self.y
    }
}

/// Inclusive speed magnitude range in pixels per tick; the sign is picked at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct SpeedRange {
    /// Smallest magnitude.
    pub min: i32,
    /// Largest magnitude.
    pub max: i32,
}

impl SpeedRange {
    /// Build a range.
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Reject negative or inverted ranges.
    pub fn validate(self) -> BabycamResult<()> {
        if self.min < 0 || self.min > self.max {
            return Err(BabycamError::validation(format!(
                "speed range must satisfy 0 <= min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn sample(self, rng: &mut fastrand::Rng) -> i32 {
        let mag = rng.i32(self.min..=self.max);
        if rng.bool() { mag } else { -mag }
    }
}

impl From<[i32; 2]> for SpeedRange {
    fn from(v: [i32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<SpeedRange> for [i32; 2] {
    fn from(r: SpeedRange) -> Self {
        [r.min, r.max]
    }
}

/// A positioned image with integer velocity that reflects off the frame edges.
#[derive(Clone, Debug)]
pub struct AnimatedSprite {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    asset: Arc<SpriteAsset>,
    cue: CueId,
}

impl AnimatedSprite {
    /// Place a sprite at an explicit position and velocity.
    pub fn new(asset: Arc<SpriteAsset>, cue: CueId, position: (i32, i32), velocity: (i32, i32)) -> Self {
        Self {
            x: position.0,
            y: position.1,
            dx: velocity.0,
            dy: velocity.1,
            asset,
            cue,
        }
    }

    /// Spawn at a random in-frame position with velocity magnitudes drawn from the given ranges.
    ///
    /// The asset must fit inside `canvas`; otherwise it could never be drawn.
    pub fn spawn(
        asset: Arc<SpriteAsset>,
        cue: CueId,
        canvas: Canvas,
        speed_x: SpeedRange,
        speed_y: SpeedRange,
        rng: &mut fastrand::Rng,
    ) -> BabycamResult<Self> {
        speed_x.validate()?;
        speed_y.validate()?;
        if asset.width() > canvas.width || asset.height() > canvas.height {
            return Err(BabycamError::asset(format!(
                "sprite for cue '{cue}' is {}x{}, larger than the {}x{} frame",
                asset.width(),
                asset.height(),
                canvas.width,
                canvas.height
            )));
        }
        let x = rng.i32(0..=(canvas.width - asset.width()) as i32);
        let y = rng.i32(0..=(canvas.height - asset.height()) as i32);
        let velocity = (speed_x.sample(rng), speed_y.sample(rng));
        Ok(Self::new(asset, cue, (x, y), velocity))
    }

    /// Top-left corner.
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Velocity in pixels per tick.
    pub fn velocity(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    /// Shared image.
    pub fn asset(&self) -> &Arc<SpriteAsset> {
        &self.asset
    }

    /// Cue played on every reflection.
    pub fn cue(&self) -> &CueId {
        &self.cue
    }

    /// Move one tick and reflect off any edge the bounding box crossed.
    ///
    /// A reflected axis is clamped back into `[0, frame - asset]`, so the sprite never drifts
    /// further out on the following tick.
    pub fn advance(&mut self, frame_width: u32, frame_height: u32) -> Bounce {
        self.x += self.dx;
        self.y += self.dy;

        let max_x = frame_width as i32 - self.asset.width() as i32;
        let max_y = frame_height as i32 - self.asset.height() as i32;
        let mut bounce = Bounce::default();
        if self.x < 0 || self.x > max_x {
            self.dx = -self.dx;
            self.x = self.x.clamp(0, max_x.max(0));
            bounce.x = true;
        }
        if self.y < 0 || self.y > max_y {
            self.dy = -self.dy;
            self.y = self.y.clamp(0, max_y.max(0));
            bounce.y = true;
        }
        bounce
    }

    /// Draw at the current position; skipped when the rectangle leaves the frame.
    pub fn render(&self, frame: &mut Frame) -> DrawOutcome {
        blit_sprite(frame, &self.asset, i64::from(self.x), i64::from(self.y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/sprite.rs"]
mod tests;
