//! Overlay generators: each call draws primitives onto a fresh transient layer and composites it
//! onto the frame with the generator's configured operator.

use std::f32::consts::TAU;

use vello_cpu::kurbo::{BezPath, Point};

use crate::effects::composite::{CompositeOp, composite_layer};
use crate::effects::raster::Layer;
use crate::foundation::core::{Canvas, Frame, Rgb8, Tick};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::foundation::math::{half_degree_hue_to_rgb, hash01};

/// Seven-band rainbow palette, red to violet.
pub const RAINBOW: [Rgb8; 7] = [
    [255, 0, 0],
    [255, 127, 0],
    [255, 255, 0],
    [0, 255, 0],
    [0, 0, 255],
    [75, 0, 130],
    [143, 0, 255],
];

/// Horizontal rainbow stripes sliding up and down the frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RainbowBand {
    /// Compositing operator.
    pub op: CompositeOp,
    /// Angular rate of the vertical oscillation per tick.
    pub rate: f32,
}

impl Default for RainbowBand {
    fn default() -> Self {
        Self {
            op: CompositeOp::Weighted { alpha: 0.3 },
            rate: 0.05,
        }
    }
}

impl RainbowBand {
    /// Top edge of the first band for a tick.
    pub fn band_top(&self, height: u32, tick: Tick) -> i32 {
        let phase = (tick.as_f32() * self.rate).sin() * 0.5 + 0.5;
        (height as f32 * phase) as i32
    }

    fn draw(&self, layer: &mut Layer, canvas: Canvas, tick: Tick) {
        let bar = (canvas.height as i32 / RAINBOW.len() as i32).max(1);
        let top = self.band_top(canvas.height, tick);
        for (i, color) in RAINBOW.iter().enumerate() {
            let y0 = f64::from(top + i as i32 * bar);
            let y1 = y0 + f64::from(bar);
            layer.fill_rect(0.0, y0, f64::from(canvas.width), y1, *color);
        }
    }
}

/// Random white glints, re-rolled every tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Sparkle {
    /// Compositing operator.
    pub op: CompositeOp,
    /// Glints per tick.
    pub count: u32,
    /// Smallest radius (inclusive).
    pub radius_min: u32,
    /// Largest radius (inclusive).
    pub radius_max: u32,
    /// Glint color.
    pub color: Rgb8,
}

impl Default for Sparkle {
    fn default() -> Self {
        Self {
            op: CompositeOp::Additive,
            count: 50,
            radius_min: 2,
            radius_max: 4,
            color: [255, 255, 255],
        }
    }
}

impl Sparkle {
    fn draw(&self, layer: &mut Layer, canvas: Canvas, rng: &mut fastrand::Rng) {
        for _ in 0..self.count {
            let x = rng.u32(0..canvas.width);
            let y = rng.u32(0..canvas.height);
            let r = rng.u32(self.radius_min..=self.radius_max);
            layer.fill_circle(pixel_center(x as i32, y as i32), f64::from(r), self.color);
        }
    }
}

/// How bubble colors are chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BubbleColor {
    /// Fresh random RGB per bubble per tick.
    Random,
    /// Hue cycled by `(tick*2 + i*30) mod 180`.
    HueCycle,
}

/// Orbiting bubbles with breathing radii and an optional popping phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Bubble {
    /// Compositing operator.
    pub op: CompositeOp,
    /// Number of bubbles.
    pub count: u32,
    /// Mean radius in pixels.
    pub base_radius: f32,
    /// Radius oscillation amplitude in pixels.
    pub radius_swing: f32,
    /// Color policy.
    pub color: BubbleColor,
    /// Draw popping outlines during the last ticks of every 50-tick cycle.
    pub burst: bool,
}

impl Default for Bubble {
    fn default() -> Self {
        Self {
            op: CompositeOp::Weighted { alpha: 0.3 },
            count: 15,
            base_radius: 20.0,
            radius_swing: 10.0,
            color: BubbleColor::HueCycle,
            burst: false,
        }
    }
}

impl Bubble {
    /// Center of bubble `i` at `tick`.
    pub fn center(&self, i: u32, width: u32, height: u32, tick: Tick) -> (i32, i32) {
        let phase = tick.as_f32() * 0.01 + i as f32 * 0.5;
        let x = width as f32 * (0.5 + 0.4 * phase.sin());
        let y = height as f32 * (0.5 + 0.4 * phase.cos());
        (x as i32, y as i32)
    }

    /// Radius of bubble `i` at `tick`, at least one pixel.
    pub fn radius(&self, i: u32, tick: Tick) -> f64 {
        let r = self.base_radius + self.radius_swing * (tick.as_f32() * 0.1 + i as f32 * 0.5).sin();
        f64::from(r).max(1.0)
    }

    /// Return `true` during the popping window (`tick mod 50 > 45`).
    pub fn is_bursting(&self, tick: Tick) -> bool {
        self.burst && tick.0 % 50 > 45
    }

    fn draw(&self, layer: &mut Layer, canvas: Canvas, tick: Tick, rng: &mut fastrand::Rng) {
        let bursting = self.is_bursting(tick);
        for i in 0..self.count {
            let (x, y) = self.center(i, canvas.width, canvas.height, tick);
            let c = pixel_center(x, y);
            let r = self.radius(i, tick);
            let color = match self.color {
                BubbleColor::Random => [rng.u8(..), rng.u8(..), rng.u8(..)],
                BubbleColor::HueCycle => {
                    let hue = (tick.0.wrapping_mul(2).wrapping_add(u64::from(i) * 30) % 180) as u32;
                    half_degree_hue_to_rgb(hue)
                }
            };
            if bursting {
                layer.stroke_circle(c, r, 2.0, color);
                layer.stroke_line(Point::new(c.x - r, c.y), Point::new(c.x + r, c.y), 2.0, color);
                layer.stroke_line(Point::new(c.x, c.y - r), Point::new(c.x, c.y + r), 2.0, color);
            } else {
                layer.fill_circle(c, r, color);
            }
        }
    }
}

/// Fixed field of pentagram stars whose core dot blinks on a 30-tick square wave.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarTwinkle {
    /// Compositing operator.
    pub op: CompositeOp,
    /// Number of stars.
    pub count: u32,
    /// Smallest tip radius in pixels.
    pub size_min: f32,
    /// Largest tip radius in pixels.
    pub size_max: f32,
    /// Layout seed; the same seed gives the same star field.
    pub seed: u32,
    /// Star color.
    pub color: Rgb8,
}

impl Default for StarTwinkle {
    fn default() -> Self {
        Self {
            op: CompositeOp::Additive,
            count: 30,
            size_min: 6.0,
            size_max: 14.0,
            seed: 0x5eed,
            color: [255, 255, 200],
        }
    }
}

impl StarTwinkle {
    /// Return `true` while the core dots are lit: on for 15 ticks, off for 15.
    pub fn core_visible(tick: Tick) -> bool {
        tick.0 % 30 < 15
    }

    /// Center of star `i`; stable across ticks.
    pub fn center(&self, i: u32, width: u32, height: u32) -> (i32, i32) {
        let x = hash01(i * 2, self.seed) * width as f32;
        let y = hash01(i * 2 + 1, self.seed) * height as f32;
        (x as i32, y as i32)
    }

    /// Closed five-line pentagram outline for star `i` at `tick`.
    pub fn outline(&self, i: u32, center: Point, tick: Tick) -> BezPath {
        let size = self.size_min + (self.size_max - self.size_min) * hash01(i, !self.seed);
        let spin = tick.as_f32() * 0.02 + i as f32;
        let tips: [Point; 5] = std::array::from_fn(|k| {
            let a = spin + k as f32 * TAU / 5.0;
            Point::new(
                center.x + f64::from(a.cos() * size),
                center.y + f64::from(a.sin() * size),
            )
        });
        let mut path = BezPath::new();
        path.move_to(tips[0]);
        for k in 1..5 {
            path.line_to(tips[(k * 2) % 5]);
        }
        path.close_path();
        path
    }

    fn draw(&self, layer: &mut Layer, canvas: Canvas, tick: Tick) {
        let dot = Self::core_visible(tick);
        for i in 0..self.count {
            let (cx, cy) = self.center(i, canvas.width, canvas.height);
            let c = pixel_center(cx, cy);
            layer.stroke_path(&self.outline(i, c, tick), 1.0, self.color);
            if dot {
                layer.fill_circle(c, 2.0, self.color);
            }
        }
    }
}

/// A particle/overlay generator. Pure in `(frame, tick)` apart from the shared random stream.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Generator {
    /// Sliding rainbow stripes.
    RainbowBand(RainbowBand),
    /// Random glints.
    Sparkle(Sparkle),
    /// Orbiting bubbles.
    Bubble(Bubble),
    /// Blinking star field.
    StarTwinkle(StarTwinkle),
}

impl Generator {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RainbowBand(_) => "rainbow_band",
            Self::Sparkle(_) => "sparkle",
            Self::Bubble(_) => "bubble",
            Self::StarTwinkle(_) => "star_twinkle",
        }
    }

    /// Compositing operator used by this generator.
    pub fn op(&self) -> CompositeOp {
        match self {
            Self::RainbowBand(g) => g.op,
            Self::Sparkle(g) => g.op,
            Self::Bubble(g) => g.op,
            Self::StarTwinkle(g) => g.op,
        }
    }

    /// Check counts, ranges and the operator. Sizes may not exceed the larger canvas side.
    pub fn validate(&self, canvas: Canvas) -> BabycamResult<()> {
        self.op().validate()?;
        let limit = canvas.width.max(canvas.height) as f32;
        match self {
            Self::RainbowBand(g) => {
                if !g.rate.is_finite() {
                    return Err(BabycamError::validation("rainbow_band.rate must be finite"));
                }
            }
            Self::Sparkle(g) => {
                if g.count == 0 {
                    return Err(BabycamError::validation("sparkle.count must be > 0"));
                }
                if g.radius_min > g.radius_max {
                    return Err(BabycamError::validation(
                        "sparkle.radius_min must be <= radius_max",
                    ));
                }
                if g.radius_max as f32 > limit {
                    return Err(BabycamError::validation(format!(
                        "sparkle.radius_max must be <= {limit}"
                    )));
                }
            }
            Self::Bubble(g) => {
                if g.count == 0 {
                    return Err(BabycamError::validation("bubble.count must be > 0"));
                }
                if !g.base_radius.is_finite() || !g.radius_swing.is_finite() {
                    return Err(BabycamError::validation("bubble radii must be finite"));
                }
                if g.base_radius.abs() + g.radius_swing.abs() > limit {
                    return Err(BabycamError::validation(format!(
                        "bubble base_radius + radius_swing must be <= {limit}"
                    )));
                }
            }
            Self::StarTwinkle(g) => {
                if g.count == 0 {
                    return Err(BabycamError::validation("star_twinkle.count must be > 0"));
                }
                if !(g.size_min.is_finite() && g.size_max.is_finite() && g.size_min <= g.size_max)
                {
                    return Err(BabycamError::validation(
                        "star_twinkle.size_min must be <= size_max",
                    ));
                }
                if g.size_max > limit {
                    return Err(BabycamError::validation(format!(
                        "star_twinkle.size_max must be <= {limit}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draw the primitives for `tick` onto a blank layer the size of `canvas_of`, flattened over
    /// black.
    pub fn render_layer(
        &self,
        canvas_of: &Frame,
        tick: Tick,
        rng: &mut fastrand::Rng,
    ) -> BabycamResult<Frame> {
        let canvas = canvas_of.canvas();
        let mut layer = Layer::for_frame(canvas_of)?;
        match self {
            Self::RainbowBand(g) => g.draw(&mut layer, canvas, tick),
            Self::Sparkle(g) => g.draw(&mut layer, canvas, rng),
            Self::Bubble(g) => g.draw(&mut layer, canvas, tick, rng),
            Self::StarTwinkle(g) => g.draw(&mut layer, canvas, tick),
        }
        layer.finish().to_frame()
    }

    /// Render this tick's layer and composite it onto `frame`.
    pub fn apply(
        &self,
        frame: &mut Frame,
        tick: Tick,
        rng: &mut fastrand::Rng,
    ) -> BabycamResult<()> {
        let layer = self.render_layer(frame, tick, rng)?;
        composite_layer(frame, &layer, self.op())
    }
}

/// Center of pixel `(x, y)` in layer coordinates.
fn pixel_center(x: i32, y: i32) -> Point {
    Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/particles.rs"]
mod tests;
