use crate::assets::decode::SpriteAsset;
use crate::foundation::core::{FRAME_CHANNELS, Frame};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::foundation::math::clamp_u8;

/// Arithmetic rule used to merge an overlay layer onto the base frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CompositeOp {
    /// `dst = clamp(dst + layer, 0, 255)`.
    Additive,
    /// `dst = dst*(1-alpha) + layer*alpha` over every pixel.
    Weighted {
        /// Layer weight in `[0, 1]`.
        alpha: f32,
    },
    /// Weighted blend restricted to pixels the layer actually painted (non-black).
    MaskedWeighted {
        /// Layer weight in `[0, 1]`.
        alpha: f32,
    },
}

impl CompositeOp {
    /// Reject weights outside `[0, 1]`.
    pub fn validate(self) -> BabycamResult<()> {
        match self {
            Self::Additive => Ok(()),
            Self::Weighted { alpha } | Self::MaskedWeighted { alpha } => {
                if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
                    return Err(BabycamError::validation(format!(
                        "composite alpha must be within [0, 1], got {alpha}"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Result of a draw that may be dropped for falling outside the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Pixels were written.
    Drawn,
    /// The draw was dropped because it would leave the frame.
    Skipped,
    /// Nothing to draw this tick (inactive layer).
    Idle,
}

impl DrawOutcome {
    /// Return `true` when the draw was dropped for falling out of bounds.
    pub fn is_skipped(self) -> bool {
        self == Self::Skipped
    }
}

/// `dst*(1-a) + src*a`, rounded to the nearest integer.
#[inline]
pub fn blend_channel(dst: u8, src: u8, a: f32) -> u8 {
    clamp_u8(f32::from(dst) * (1.0 - a) + f32::from(src) * a)
}

/// Merge a same-size layer onto `dst` in place.
pub fn composite_layer(dst: &mut Frame, layer: &Frame, op: CompositeOp) -> BabycamResult<()> {
    if !dst.same_size(layer) {
        return Err(BabycamError::validation(
            "composite_layer expects equal-size frames",
        ));
    }

    let src = layer.as_bytes();
    match op {
        CompositeOp::Additive => {
            for (d, s) in dst.as_bytes_mut().iter_mut().zip(src) {
                *d = d.saturating_add(*s);
            }
        }
        CompositeOp::Weighted { alpha } => {
            let a = alpha.clamp(0.0, 1.0);
            for (d, s) in dst.as_bytes_mut().iter_mut().zip(src) {
                *d = blend_channel(*d, *s, a);
            }
        }
        CompositeOp::MaskedWeighted { alpha } => {
            let a = alpha.clamp(0.0, 1.0);
            for (d, s) in dst
                .as_bytes_mut()
                .chunks_exact_mut(FRAME_CHANNELS)
                .zip(src.chunks_exact(FRAME_CHANNELS))
            {
                if s == [0, 0, 0] {
                    continue;
                }
                for c in 0..FRAME_CHANNELS {
                    d[c] = blend_channel(d[c], s[c], a);
                }
            }
        }
    }
    Ok(())
}

/// Draw a sprite with its top-left corner at `(x, y)`.
///
/// Alpha sprites blend per pixel as `dst*(1-a) + src*a`; opaque sprites overwrite. A rectangle
/// that does not fit entirely inside the frame is skipped (no clipping).
pub fn blit_sprite(dst: &mut Frame, sprite: &SpriteAsset, x: i64, y: i64) -> DrawOutcome {
    let (w, h) = (sprite.width(), sprite.height());
    if !dst.contains_rect(x, y, w, h) {
        return DrawOutcome::Skipped;
    }
    let (x, y) = (x as u32, y as u32);
    let stride = sprite.channels().count();
    let src = sprite.pixels();
    let alpha = sprite.has_alpha();

    for row in 0..h {
        let src_row = &src[(row as usize) * (w as usize) * stride..][..(w as usize) * stride];
        let start = dst.index(x, y + row);
        let dst_row = &mut dst.as_bytes_mut()[start..start + (w as usize) * FRAME_CHANNELS];
        for (d, s) in dst_row
            .chunks_exact_mut(FRAME_CHANNELS)
            .zip(src_row.chunks_exact(stride))
        {
            if alpha {
                let a = f32::from(s[3]) / 255.0;
                for c in 0..FRAME_CHANNELS {
                    d[c] = blend_channel(d[c], s[c], a);
                }
            } else {
                d.copy_from_slice(&s[..FRAME_CHANNELS]);
            }
        }
    }
    DrawOutcome::Drawn
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
