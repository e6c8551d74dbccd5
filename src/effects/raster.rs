//! Anti-aliased vector drawing onto transient RGBA layers, rasterized by `vello_cpu`.
//!
//! A [`Layer`] collects fills and strokes in frame pixel coordinates; [`Layer::finish`] renders
//! them into premultiplied RGBA8 [`LayerPixels`], which are then either flattened into a [`Frame`]
//! for [`crate::effects::composite::composite_layer`] or drawn source-over onto the frame.

use vello_cpu::kurbo::{Affine, BezPath, Circle, Point, Rect, Shape, Stroke};
use vello_cpu::peniko::{Color, FontData};

use crate::foundation::core::{FRAME_CHANNELS, Frame, Rgb8};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::foundation::math::mul_div255_u8;

const TOLERANCE: f64 = 0.1;

/// Vector drawing surface the size of a frame.
pub struct Layer {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Layer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Layer {
    /// Create a transparent layer. Dimensions must fit the rasterizer's `u16` surface size.
    pub fn new(width: u32, height: u32) -> BabycamResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| BabycamError::validation("layer width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| BabycamError::validation("layer height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(BabycamError::validation("layer must be non-empty"));
        }
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(Affine::IDENTITY);
        Ok(Self {
            ctx,
            width: w,
            height: h,
        })
    }

    /// Transparent layer matching `frame`'s size.
    pub fn for_frame(frame: &Frame) -> BabycamResult<Self> {
        Self::new(frame.width(), frame.height())
    }

    fn paint(&mut self, color: Rgb8) {
        let [r, g, b] = color;
        self.ctx.set_paint(Color::from_rgba8(r, g, b, 255));
    }

    /// Opaque rectangle `[x0, x1) x [y0, y1)`.
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb8) {
        self.paint(color);
        self.ctx.fill_rect(&Rect::new(x0, y0, x1, y1));
    }

    /// Opaque disc.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb8) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        self.paint(color);
        self.ctx.fill_path(&Circle::new(center, radius).to_path(TOLERANCE));
    }

    /// Circle outline of stroke `width`, centered on `radius`.
    pub fn stroke_circle(&mut self, center: Point, radius: f64, width: f64, color: Rgb8) {
        if radius.is_nan() || width.is_nan() || radius <= 0.0 || width <= 0.0 {
            return;
        }
        self.stroke_path(&Circle::new(center, radius).to_path(TOLERANCE), width, color);
    }

    /// Straight segment of stroke `width`.
    pub fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Rgb8) {
        let mut path = BezPath::new();
        path.move_to(from);
        path.line_to(to);
        self.stroke_path(&path, width, color);
    }

    /// Stroke an arbitrary path.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgb8) {
        self.paint(color);
        self.ctx.set_stroke(Stroke::new(width));
        self.ctx.stroke_path(path);
    }

    /// Fill a run of glyphs from `font`, positioned in layout space and placed by `transform`.
    pub fn fill_glyphs(
        &mut self,
        font: &FontData,
        size_px: f32,
        transform: Affine,
        glyphs: impl Iterator<Item = vello_cpu::Glyph>,
        color: Rgb8,
    ) {
        self.paint(color);
        self.ctx.set_transform(transform);
        self.ctx.glyph_run(font).font_size(size_px).fill_glyphs(glyphs);
        self.ctx.set_transform(Affine::IDENTITY);
    }

    /// Rasterize everything drawn so far.
    pub fn finish(mut self) -> LayerPixels {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        LayerPixels {
            width: u32::from(self.width),
            height: u32::from(self.height),
            rgba_premul: pixmap.data_as_u8_slice().to_vec(),
        }
    }
}

/// Rendered layer: premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerPixels {
    width: u32,
    height: u32,
    rgba_premul: Vec<u8>,
}

impl LayerPixels {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`, `None` outside the layer.
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some(self.rgba_premul[i + 3])
    }

    /// The layer flattened over black: the premultiplied color channels as an RGB frame.
    pub fn to_frame(&self) -> BabycamResult<Frame> {
        let mut rgb = Vec::with_capacity((self.width as usize) * (self.height as usize) * 3);
        for px in self.rgba_premul.chunks_exact(4) {
            rgb.extend_from_slice(&px[..FRAME_CHANNELS]);
        }
        Frame::from_raw(self.width, self.height, rgb)
    }

    /// Source-over onto `dst`: `dst = src + dst*(1 - a)`.
    pub fn draw_over(&self, dst: &mut Frame) -> BabycamResult<()> {
        if dst.width() != self.width || dst.height() != self.height {
            return Err(BabycamError::validation(format!(
                "layer size {}x{} does not match frame {}x{}",
                self.width,
                self.height,
                dst.width(),
                dst.height()
            )));
        }
        for (d, s) in dst
            .as_bytes_mut()
            .chunks_exact_mut(FRAME_CHANNELS)
            .zip(self.rgba_premul.chunks_exact(4))
        {
            let inv = 255 - u16::from(s[3]);
            if inv == 255 {
                continue;
            }
            for c in 0..FRAME_CHANNELS {
                d[c] = s[c].saturating_add(mul_div255_u8(u16::from(d[c]), inv));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/raster.rs"]
mod tests;
