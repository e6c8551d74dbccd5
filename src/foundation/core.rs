use crate::foundation::error::{BabycamError, BabycamResult};

/// 8-bit RGB color triple in the pipeline's channel order.
pub type Rgb8 = [u8; 3];

/// Bytes per pixel of a [`Frame`].
pub const FRAME_CHANNELS: usize = 3;

/// Monotonic 0-based tick index (one processed frame cycle).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Tick(pub u64);

impl Tick {
    /// Tick value as `f32` for animation formulas.
    pub fn as_f32(self) -> f32 {
        self.0 as f32
    }

    /// Tick value as `f64` for animation formulas.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }

    /// Next tick, saturating at `u64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Session frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas with non-zero dimensions that fit the rasterizer.
    pub fn new(width: u32, height: u32) -> BabycamResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Reject zero-sized canvases and sides past `u16::MAX`.
    pub fn validate(self) -> BabycamResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BabycamError::validation("canvas width and height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(BabycamError::validation(format!(
                "canvas width and height must be <= {}",
                u16::MAX
            )));
        }
        Ok(())
    }

    /// Integer center point `(w/2, h/2)`.
    pub fn center(self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Number of bytes in an RGB8 frame of this size.
    pub fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * FRAME_CHANNELS
    }
}

/// Mutable RGB8 pixel grid, row-major, fixed size for a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Frame {
    /// Black frame of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Frame filled with a single color.
    pub fn filled(width: u32, height: u32, color: Rgb8) -> Self {
        let data = color.repeat((width as usize) * (height as usize));
        Self {
            width,
            height,
            data,
        }
    }

    /// Black frame matching a canvas.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self::new(canvas.width, canvas.height)
    }

    /// Wrap raw RGB8 bytes, validating the length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> BabycamResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(FRAME_CHANNELS))
            .ok_or_else(|| BabycamError::validation("frame buffer size overflow"))?;
        if data.len() != expected {
            return Err(BabycamError::validation(format!(
                "frame buffer has {} bytes, expected {expected} for {width}x{height} rgb8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frame dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the raw row-major RGB8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutably borrow the raw bytes. The length cannot change.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame, returning its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Return `true` when both frames have identical dimensions.
    pub fn same_size(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * FRAME_CHANNELS
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Read a pixel, `None` outside the frame.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb8> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let i = self.index(x as u32, y as u32);
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Write a pixel; writes outside the frame are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb8) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.index(x as u32, y as u32);
        self.data[i..i + FRAME_CHANNELS].copy_from_slice(&color);
    }

    /// Fill the whole frame with one color.
    pub fn clear(&mut self, color: Rgb8) {
        for px in self.data.chunks_exact_mut(FRAME_CHANNELS) {
            px.copy_from_slice(&color);
        }
    }

    /// Return `true` when the rectangle `[x, x+w) x [y, y+h)` lies entirely inside the frame.
    pub fn contains_rect(&self, x: i64, y: i64, w: u32, h: u32) -> bool {
        x >= 0
            && y >= 0
            && x + i64::from(w) <= i64::from(self.width)
            && y + i64::from(h) <= i64::from(self.height)
    }
}

/// Identifier of a sound played through a cue player, e.g. `"rainbow"`.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CueId(pub String);

impl CueId {
    /// Create a cue id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
