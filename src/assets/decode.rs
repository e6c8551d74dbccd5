use std::sync::Arc;

use crate::foundation::error::{BabycamError, BabycamResult};

/// Channel layout of a decoded sprite image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteChannels {
    /// RGB8, drawn as a direct overwrite.
    Opaque,
    /// Straight (non-premultiplied) RGBA8, alpha-blended onto the frame.
    Alpha,
}

impl SpriteChannels {
    /// Bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Opaque => 3,
            Self::Alpha => 4,
        }
    }
}

/// Immutable sprite image shared read-only by every layer that references it.
#[derive(Clone, Debug)]
pub struct SpriteAsset {
    width: u32,
    height: u32,
    channels: SpriteChannels,
    pixels: Arc<Vec<u8>>,
}

impl SpriteAsset {
    /// Build from raw row-major bytes, rejecting zero sizes and length mismatches.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: SpriteChannels,
        pixels: Vec<u8>,
    ) -> BabycamResult<Self> {
        if width == 0 || height == 0 {
            return Err(BabycamError::asset(format!(
                "sprite must be non-empty, got {width}x{height}"
            )));
        }
        let expected = (width as usize) * (height as usize) * channels.count();
        if pixels.len() != expected {
            return Err(BabycamError::asset(format!(
                "sprite buffer has {} bytes, expected {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels: Arc::new(pixels),
        })
    }

    /// Solid opaque sprite, handy for tests and placeholders.
    pub fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> BabycamResult<Self> {
        let pixels = color.repeat((width as usize) * (height as usize));
        Self::from_raw(width, height, SpriteChannels::Opaque, pixels)
    }

    /// Solid sprite with a constant alpha value.
    pub fn solid_rgba(width: u32, height: u32, color: [u8; 4]) -> BabycamResult<Self> {
        let pixels = color.repeat((width as usize) * (height as usize));
        Self::from_raw(width, height, SpriteChannels::Alpha, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    pub fn channels(&self) -> SpriteChannels {
        self.channels
    }

    /// Return `true` when the sprite carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.channels == SpriteChannels::Alpha
    }

    /// Raw row-major pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Decode an encoded image (PNG, JPEG, ...) into a sprite, keeping alpha when present.
pub fn decode_sprite(bytes: &[u8]) -> BabycamResult<SpriteAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| BabycamError::asset(format!("decode sprite image: {e}")))?;

    if dyn_img.color().has_alpha() {
        let rgba = dyn_img.to_rgba8();
        let (w, h) = rgba.dimensions();
        SpriteAsset::from_raw(w, h, SpriteChannels::Alpha, rgba.into_raw())
    } else {
        let rgb = dyn_img.to_rgb8();
        let (w, h) = rgb.dimensions();
        SpriteAsset::from_raw(w, h, SpriteChannels::Opaque, rgb.into_raw())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
