use crate::effects::composite::{CompositeOp, composite_layer};
use crate::foundation::core::{FRAME_CHANNELS, Frame, Rgb8, Tick};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::foundation::math::{clamp_u8, hsv_to_rgb, rgb_to_hsv};

/// Soft "fluffy edge" glow: blend the frame with a blurred copy of itself.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Glow {
    /// Gaussian blur sigma in pixels.
    pub sigma: f32,
    /// Weight of the blurred copy in `[0, 1]`.
    pub mix: f32,
}

impl Glow {
    /// Blurred copy of `frame`.
    pub fn blurred(&self, frame: &Frame) -> BabycamResult<Frame> {
        let (w, h) = (frame.width(), frame.height());
        let img = image::RgbImage::from_raw(w, h, frame.as_bytes().to_vec())
            .ok_or_else(|| BabycamError::validation("glow: frame size mismatch"))?;
        let out = image::imageops::blur(&img, self.sigma);
        Frame::from_raw(w, h, out.into_raw())
    }
}

impl Default for Glow {
    fn default() -> Self {
        Self {
            sigma: 3.5,
            mix: 0.3,
        }
    }
}

/// Full-frame additive tint whose strength pulses with the tick.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseTint {
    /// Tint color.
    pub color: Rgb8,
    /// Peak-to-center amplitude in 8-bit units.
    pub amplitude: f32,
    /// Angular rate per tick.
    pub rate: f32,
}

impl Default for PulseTint {
    fn default() -> Self {
        Self {
            color: [0, 255, 255],
            amplitude: 30.0,
            rate: 0.1,
        }
    }
}

impl PulseTint {
    /// Tint weight in `[0, 1]` for a tick: `(sin(t*rate)*amp + amp) / 255`.
    pub fn weight(&self, tick: Tick) -> f32 {
        let pulse = (tick.as_f32() * self.rate).sin() * self.amplitude + self.amplitude;
        (pulse / 255.0).clamp(0.0, 1.0)
    }
}

/// Global per-frame brightness/contrast/saturation transform.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToneAdjust {
    /// Multiplier on HSV value.
    pub brightness: f32,
    /// Contrast gain around mid-gray.
    pub contrast: f32,
    /// Multiplier on HSV saturation.
    pub saturation: f32,
    /// Optional glow pass after the color transform.
    pub glow: Option<Glow>,
    /// Optional pulsing tint after the glow.
    pub pulse_tint: Option<PulseTint>,
}

impl Default for ToneAdjust {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            glow: None,
            pulse_tint: None,
        }
    }
}

impl ToneAdjust {
    /// The baby-cam look: saturation x1.5, brightness x1.2, soft glow.
    pub fn baby_boost() -> Self {
        Self {
            brightness: 1.2,
            saturation: 1.5,
            glow: Some(Glow::default()),
            ..Self::default()
        }
    }

    /// Reject non-finite or negative gains and out-of-range mixes.
    pub fn validate(&self) -> BabycamResult<()> {
        for (name, v) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(BabycamError::validation(format!(
                    "tone.{name} must be finite and >= 0"
                )));
            }
        }
        if let Some(g) = self.glow {
            if !(0.0..=1.0).contains(&g.mix) {
                return Err(BabycamError::validation("tone.glow.mix must be within [0, 1]"));
            }
            if !(g.sigma.is_finite() && g.sigma > 0.0) {
                return Err(BabycamError::validation("tone.glow.sigma must be > 0"));
            }
        }
        if let Some(p) = self.pulse_tint {
            if !p.amplitude.is_finite() || !p.rate.is_finite() {
                return Err(BabycamError::validation("tone.pulse_tint must be finite"));
            }
        }
        Ok(())
    }

    fn is_color_identity(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0 && self.saturation == 1.0
    }

    /// Apply the transform in place.
    pub fn apply(&self, frame: &mut Frame, tick: Tick) -> BabycamResult<()> {
        if !self.is_color_identity() {
            for px in frame.as_bytes_mut().chunks_exact_mut(FRAME_CHANNELS) {
                let out = self.adjust_pixel([px[0], px[1], px[2]]);
                px.copy_from_slice(&out);
            }
        }

        if let Some(glow) = self.glow {
            let blurred = glow.blurred(frame)?;
            composite_layer(frame, &blurred, CompositeOp::Weighted { alpha: glow.mix })?;
        }

        if let Some(tint) = self.pulse_tint {
            let w = tint.weight(tick);
            let add = tint.color.map(|c| clamp_u8(f32::from(c) * w));
            for px in frame.as_bytes_mut().chunks_exact_mut(FRAME_CHANNELS) {
                for c in 0..FRAME_CHANNELS {
                    px[c] = px[c].saturating_add(add[c]);
                }
            }
        }
        Ok(())
    }

    fn adjust_pixel(&self, c: Rgb8) -> Rgb8 {
        let (h, s, v) = rgb_to_hsv(c);
        let s = (s * self.saturation).clamp(0.0, 1.0);
        let v = (v * self.brightness).clamp(0.0, 1.0);
        let out = hsv_to_rgb(h, s, v);
        if self.contrast == 1.0 {
            return out;
        }
        out.map(|ch| clamp_u8((f32::from(ch) - 128.0) * self.contrast + 128.0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/tone.rs"]
mod tests;
