use std::f64::consts::TAU;

use kurbo::{Affine, Point};

use crate::foundation::core::{FRAME_CHANNELS, Frame, Tick};
use crate::foundation::error::{BabycamError, BabycamResult};

/// Which spatial remap a tick uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionKind {
    /// Leave the frame untouched.
    None,
    /// Rotated wedge mirror.
    Kaleidoscope,
    /// Radius-dependent polar twist.
    Swirl,
    /// Blocky pixelation.
    Mosaic,
    /// Breathing zoom about the center.
    Wobble,
}

/// Selection policy for the distortion stage: epoch cycling or one fixed distortion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistortionMode {
    /// Rotate through mosaic, swirl and none once per epoch.
    Cycle,
    None,
    Kaleidoscope,
    Swirl,
    Mosaic,
    Wobble,
}

impl DistortionMode {
    /// The fixed distortion, or `None` when cycling.
    pub fn fixed_kind(self) -> Option<DistortionKind> {
        match self {
            Self::Cycle => Option::None,
            Self::None => Some(DistortionKind::None),
            Self::Kaleidoscope => Some(DistortionKind::Kaleidoscope),
            Self::Swirl => Some(DistortionKind::Swirl),
            Self::Mosaic => Some(DistortionKind::Mosaic),
            Self::Wobble => Some(DistortionKind::Wobble),
        }
    }
}

/// Deterministic epoch rotation: `(tick / epoch_ticks) mod 3` picks mosaic, swirl or none.
pub fn select_for_tick(tick: Tick, epoch_ticks: u64) -> DistortionKind {
    match (tick.0 / epoch_ticks.max(1)) % 3 {
        0 => DistortionKind::Mosaic,
        1 => DistortionKind::Swirl,
        _ => DistortionKind::None,
    }
}

/// Parameters of the distortion stage.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DistortionConfig {
    /// Selection policy.
    pub mode: DistortionMode,
    /// Ticks per epoch in [`DistortionMode::Cycle`].
    pub epoch_ticks: u64,
    /// Kaleidoscope wedge count.
    pub segments: u32,
    /// Mosaic block size in pixels.
    pub block: u32,
    /// Swirl angle gain per tick.
    pub swirl_strength: f32,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            mode: DistortionMode::None,
            epoch_ticks: 1000,
            segments: 8,
            block: 10,
            swirl_strength: 0.02,
        }
    }
}

impl DistortionConfig {
    /// Check segment/block counts.
    pub fn validate(&self) -> BabycamResult<()> {
        if self.epoch_ticks == 0 {
            return Err(BabycamError::validation("distortion.epoch_ticks must be > 0"));
        }
        if self.segments < 2 {
            return Err(BabycamError::validation("distortion.segments must be >= 2"));
        }
        if self.block == 0 {
            return Err(BabycamError::validation("distortion.block must be > 0"));
        }
        if !self.swirl_strength.is_finite() {
            return Err(BabycamError::validation("distortion.swirl_strength must be finite"));
        }
        Ok(())
    }
}

/// Nearest-neighbor remap: `map(x, y)` yields the source pixel for each destination pixel;
/// `None` or out-of-range sources become black.
fn remap_nearest(src: &Frame, dst: &mut Frame, mut map: impl FnMut(u32, u32) -> Option<(i64, i64)>) {
    let (w, h) = (src.width(), src.height());
    let s = src.as_bytes();
    let d = dst.as_bytes_mut();
    for y in 0..h {
        for x in 0..w {
            let di = ((y as usize) * (w as usize) + (x as usize)) * FRAME_CHANNELS;
            let px = match map(x, y) {
                Some((sx, sy)) if sx >= 0 && sy >= 0 && sx < i64::from(w) && sy < i64::from(h) => {
                    let si = ((sy as usize) * (w as usize) + (sx as usize)) * FRAME_CHANNELS;
                    [s[si], s[si + 1], s[si + 2]]
                }
                _ => [0, 0, 0],
            };
            d[di..di + FRAME_CHANNELS].copy_from_slice(&px);
        }
    }
}

fn center_of(frame: &Frame) -> Point {
    Point::new(f64::from(frame.width()) / 2.0, f64::from(frame.height()) / 2.0)
}

/// Rotation/scale about `c`, inverted so it maps destination pixels back to the source.
fn inverse_about(c: Point, rotate_rad: f64, scale: f64) -> Affine {
    let fwd = Affine::translate(c.to_vec2())
        * Affine::rotate(rotate_rad)
        * Affine::scale(scale)
        * Affine::translate(-c.to_vec2());
    fwd.inverse()
}

/// Kaleidoscope: each angular wedge shows its own rotated, scaled copy of the frame.
pub fn kaleidoscope(frame: &mut Frame, tick: Tick, segments: u32) {
    let n = segments.max(2);
    let t = tick.as_f64();
    let c = center_of(frame);
    let scale = 1.0 + 0.1 * (t * 0.05).sin();
    let inverses: Vec<Affine> = (0..n)
        .map(|s| {
            let deg = t * 0.1 + f64::from(s) * (360.0 / f64::from(n));
            inverse_about(c, deg.to_radians(), scale)
        })
        .collect();
    let wedge = TAU / f64::from(n);

    let src = frame.clone();
    remap_nearest(&src, frame, |x, y| {
        let p = Point::new(f64::from(x), f64::from(y));
        let ang = (p.y - c.y).atan2(p.x - c.x).rem_euclid(TAU);
        let seg = ((ang / wedge) as usize).min(inverses.len() - 1);
        let q = inverses[seg] * p;
        Some((q.x.round() as i64, q.y.round() as i64))
    });
}

/// Pixelate by averaging `block x block` cells and filling each cell with its mean.
pub fn mosaic(frame: &mut Frame, block: u32) {
    let b = block.max(1);
    if b == 1 {
        return;
    }
    let (w, h) = (frame.width(), frame.height());
    let mut by = 0;
    while by < h {
        let bh = b.min(h - by);
        let mut bx = 0;
        while bx < w {
            let bw = b.min(w - bx);
            let mut acc = [0u32; FRAME_CHANNELS];
            for y in by..by + bh {
                for x in bx..bx + bw {
                    let i = frame.index(x, y);
                    for c in 0..FRAME_CHANNELS {
                        acc[c] += u32::from(frame.as_bytes()[i + c]);
                    }
                }
            }
            let n = bw * bh;
            let mean = acc.map(|v| ((v + n / 2) / n) as u8);
            for y in by..by + bh {
                for x in bx..bx + bw {
                    let i = frame.index(x, y);
                    frame.as_bytes_mut()[i..i + FRAME_CHANNELS].copy_from_slice(&mean);
                }
            }
            bx += b;
        }
        by += b;
    }
}

/// Breathing zoom: scale `1 + amplitude*sin(tick*rate)` about the center.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Wobble {
    /// Zoom amplitude.
    pub amplitude: f32,
    /// Angular rate per tick.
    pub rate: f32,
}

impl Default for Wobble {
    fn default() -> Self {
        Self {
            amplitude: 0.05,
            rate: 0.1,
        }
    }
}

impl Wobble {
    /// Amplitude and rate must be finite.
    pub fn validate(&self) -> BabycamResult<()> {
        if !(self.amplitude.is_finite() && self.rate.is_finite()) {
            return Err(BabycamError::validation("pre_transform must be finite"));
        }
        Ok(())
    }

    /// Zoom factor at `tick`.
    pub fn scale(&self, tick: Tick) -> f64 {
        1.0 + f64::from(self.amplitude) * (tick.as_f64() * f64::from(self.rate)).sin()
    }

    /// Apply the zoom in place.
    pub fn apply(&self, frame: &mut Frame, tick: Tick) {
        let scale = self.scale(tick);
        if scale == 1.0 {
            return;
        }
        let inv = inverse_about(center_of(frame), 0.0, scale);
        let src = frame.clone();
        remap_nearest(&src, frame, |x, y| {
            let q = inv * Point::new(f64::from(x), f64::from(y));
            Some((q.x.round() as i64, q.y.round() as i64))
        });
    }
}

/// Per-pixel polar coordinates relative to the frame center, computed once per resolution.
#[derive(Clone, Debug)]
struct PolarTable {
    width: u32,
    height: u32,
    max_radius: f32,
    radius: Vec<f32>,
    angle: Vec<f32>,
}

impl PolarTable {
    fn new(width: u32, height: u32) -> Self {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let n = (width as usize) * (height as usize);
        let mut radius = Vec::with_capacity(n);
        let mut angle = Vec::with_capacity(n);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                radius.push((dx * dx + dy * dy).sqrt());
                angle.push(dy.atan2(dx));
            }
        }
        Self {
            width,
            height,
            max_radius: (cx * cx + cy * cy).sqrt().max(f32::EPSILON),
            radius,
            angle,
        }
    }
}

/// Swirl: angle offset grows toward the center and with time.
#[derive(Clone, Debug, Default)]
pub struct Swirl {
    table: Option<PolarTable>,
}

impl Swirl {
    /// Twist the frame in place. Samples falling outside the frame become black.
    pub fn apply(&mut self, frame: &mut Frame, tick: Tick, strength: f32) {
        let (w, h) = (frame.width(), frame.height());
        let stale = self
            .table
            .as_ref()
            .is_none_or(|t| t.width != w || t.height != h);
        if stale {
            self.table = Some(PolarTable::new(w, h));
        }
        let Some(table) = self.table.as_ref() else {
            return;
        };

        let twist = tick.as_f32() * strength;
        let cx = w as f32 / 2.0;
        let cy = h as f32 / 2.0;
        let src = frame.clone();
        remap_nearest(&src, frame, |x, y| {
            let i = (y as usize) * (w as usize) + (x as usize);
            let r = table.radius[i];
            let a = table.angle[i] + (table.max_radius - r) / table.max_radius * twist;
            let (s, c) = a.sin_cos();
            Some(((cx + r * c).round() as i64, (cy + r * s).round() as i64))
        });
    }
}

/// Distortion stage: applies one distortion per tick according to its mode.
#[derive(Clone, Debug, Default)]
pub struct DistortionStage {
    config: DistortionConfig,
    swirl: Swirl,
}

impl DistortionStage {
    /// Build from validated parameters.
    pub fn new(config: DistortionConfig) -> BabycamResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            swirl: Swirl::default(),
        })
    }

    /// Distortion applied at `tick`.
    pub fn kind_at(&self, tick: Tick) -> DistortionKind {
        self.config
            .mode
            .fixed_kind()
            .unwrap_or_else(|| select_for_tick(tick, self.config.epoch_ticks))
    }

    /// Apply this tick's distortion in place.
    pub fn apply(&mut self, frame: &mut Frame, tick: Tick) -> DistortionKind {
        let kind = self.kind_at(tick);
        match kind {
            DistortionKind::None => {}
            DistortionKind::Kaleidoscope => kaleidoscope(frame, tick, self.config.segments),
            DistortionKind::Swirl => self.swirl.apply(frame, tick, self.config.swirl_strength),
            DistortionKind::Mosaic => mosaic(frame, self.config.block),
            DistortionKind::Wobble => Wobble::default().apply(frame, tick),
        }
        kind
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/distort.rs"]
mod tests;
