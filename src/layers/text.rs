use std::borrow::Cow;
use std::f32::consts::PI;
use std::sync::Arc;

use parley::layout::PositionedLayoutItem;
use parley::style::{FontStack, StyleProperty};
use vello_cpu::kurbo::Affine;
use vello_cpu::peniko::FontData;

use crate::effects::raster::Layer;
use crate::foundation::core::{Frame, Rgb8, Tick};
use crate::foundation::error::{BabycamError, BabycamResult};

const OUTLINE_OFFSETS: [(f64, f64); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Caption overlay parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TextParams {
    /// Rotating caption list.
    pub captions: Vec<String>,
    /// Ticks each caption stays up.
    pub caption_ticks: u64,
    /// Font file, relative to the asset root.
    pub font: String,
    /// Base font size in pixels before the beat/vibrate modulation.
    pub font_size: f32,
    /// Peak positional jitter in frame pixels.
    pub jitter_px: f32,
    /// Draw a dark outline pass under the colored text.
    pub outline: bool,
    /// Outline color.
    pub outline_color: Rgb8,
}

impl Default for TextParams {
    fn default() -> Self {
        Self {
            captions: vec!["PARTY TIME!".to_owned()],
            caption_ticks: 100,
            font: "font.ttf".to_owned(),
            font_size: 40.0,
            jitter_px: 4.0,
            outline: true,
            outline_color: [0, 0, 0],
        }
    }
}

impl TextParams {
    /// Captions must be non-empty, a font named and sizes positive.
    pub fn validate(&self) -> BabycamResult<()> {
        if self.captions.is_empty() {
            return Err(BabycamError::validation("text.captions must be non-empty"));
        }
        if self.caption_ticks == 0 {
            return Err(BabycamError::validation("text.caption_ticks must be > 0"));
        }
        if self.font.trim().is_empty() {
            return Err(BabycamError::validation("text.font must be non-empty"));
        }
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(BabycamError::validation("text.font_size must be > 0"));
        }
        if !(self.jitter_px.is_finite() && self.jitter_px >= 0.0) {
            return Err(BabycamError::validation("text.jitter_px must be >= 0"));
        }
        Ok(())
    }
}

/// Pulsing, jittering, color-cycling caption centered on the frame.
///
/// Captions are shaped with `parley` against a single font and rasterized as `vello_cpu`
/// glyph runs, so any script the font covers renders as such.
pub struct TextOverlay {
    params: TextParams,
    family: String,
    font: FontData,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl std::fmt::Debug for TextOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextOverlay")
            .field("params", &self.params)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl TextOverlay {
    /// Register `font_bytes` as the caption font. Fails if the bytes hold no usable font family.
    pub fn new(params: TextParams, font_bytes: Arc<Vec<u8>>) -> BabycamResult<Self> {
        params.validate()?;

        let mut font_ctx = parley::FontContext::default();
        let blob = parley::fontique::Blob::from(font_bytes.as_ref().clone());
        let families = font_ctx.collection.register_fonts(blob, None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BabycamError::asset(format!("no font families in '{}'", params.font))
        })?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                BabycamError::asset(format!("font '{}' has no family name", params.font))
            })?
            .to_owned();
        tracing::debug!(font = %params.font, family = %family, "caption font registered");

        let font = FontData::new(vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()), 0);
        Ok(Self {
            params,
            family,
            font,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    /// Parameters this overlay was built with.
    pub fn params(&self) -> &TextParams {
        &self.params
    }

    /// Family name of the registered caption font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Caption shown at `tick`: `captions[(tick / caption_ticks) mod len]`.
    pub fn caption_at(&self, tick: Tick) -> &str {
        let n = self.params.captions.len() as u64;
        let i = (tick.0 / self.params.caption_ticks) % n;
        &self.params.captions[i as usize]
    }

    /// Slow beat times fast vibrate.
    pub fn scale_factor(tick: Tick) -> f32 {
        let t = tick.as_f32();
        let beat = 1.0 + 0.2 * (t * 0.3).sin();
        let vibrate = 1.0 + 0.05 * (t * 3.0).sin();
        beat * vibrate
    }

    /// Offset from the centered position.
    pub fn jitter(&self, tick: Tick) -> (i32, i32) {
        let t = tick.as_f32();
        let j = self.params.jitter_px;
        ((j * (t * 0.5).sin()).round() as i32, (j * (t * 0.7).cos()).round() as i32)
    }

    /// Three-phase squared-sine color ramp.
    pub fn color_at(tick: Tick) -> Rgb8 {
        let t = tick.as_f32() * 0.1;
        std::array::from_fn(|k| {
            let s = (t + k as f32 * PI / 3.0).sin();
            (255.0 * s * s).round() as u8
        })
    }

    /// Shape `text` at `size_px` on a single unwrapped line.
    fn layout(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(StyleProperty::FontStack(FontStack::Source(Cow::Owned(
            self.family.clone(),
        ))));
        builder.push_default(StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Draw this tick's caption, clipping at the frame edges.
    pub fn render(&mut self, frame: &mut Frame, tick: Tick) -> BabycamResult<()> {
        let text = self.caption_at(tick).to_owned();
        let size = self.params.font_size * Self::scale_factor(tick);
        let layout = self.layout(&text, size);

        let (jx, jy) = self.jitter(tick);
        let x = (f64::from(frame.width()) - f64::from(layout.width())) / 2.0 + f64::from(jx);
        let y = (f64::from(frame.height()) - f64::from(layout.height())) / 2.0 + f64::from(jy);

        let mut layer = Layer::for_frame(frame)?;
        if self.params.outline {
            let o = f64::from((size / 16.0).max(1.0));
            for (ox, oy) in OUTLINE_OFFSETS {
                let at = Affine::translate((x + ox * o, y + oy * o));
                fill_layout(&mut layer, &layout, &self.font, at, self.params.outline_color);
            }
        }
        let at = Affine::translate((x, y));
        fill_layout(&mut layer, &layout, &self.font, at, Self::color_at(tick));
        layer.finish().draw_over(frame)
    }
}

fn fill_layout(
    layer: &mut Layer,
    layout: &parley::Layout<()>,
    font: &FontData,
    transform: Affine,
    color: Rgb8,
) {
    for line in layout.lines() {
        for item in line.items() {
            let PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            layer.fill_glyphs(font, run.run().font_size(), transform, glyphs, color);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/text.rs"]
mod tests;
