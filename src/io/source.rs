use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Frame};
use crate::foundation::error::{BabycamError, BabycamResult};

/// Pull source of camera frames.
///
/// `Ok(None)` means end of stream and ends the session cleanly. Every frame of a session has the
/// same resolution; a source that cannot deliver frames returns a `FrameSource` error.
pub trait FrameSource {
    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> BabycamResult<Option<Frame>>;
}

/// Frames queued in memory, yielded in order.
#[derive(Debug, Default)]
pub struct VecSource {
    frames: VecDeque<Frame>,
}

impl VecSource {
    /// Serve `frames` in order, then report the end of the stream.
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet pulled.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecSource {
    fn next_frame(&mut self) -> BabycamResult<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

/// Synthetic animated gradient standing in for a live camera.
#[derive(Debug)]
pub struct TestPatternSource {
    canvas: Canvas,
    produced: u64,
    limit: Option<u64>,
}

impl TestPatternSource {
    /// Endless pattern of the given size.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            produced: 0,
            limit: None,
        }
    }

    /// Stop after `frames` frames.
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    fn render(&self) -> Frame {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let shift = (self.produced * 3) as u32;
        let mut frame = Frame::for_canvas(self.canvas);
        for (i, px) in frame.as_bytes_mut().chunks_exact_mut(3).enumerate() {
            let x = (i as u32) % w;
            let y = (i as u32) / w;
            px[0] = ((x * 255 / w.max(1)).wrapping_add(shift) & 0xFF) as u8;
            px[1] = (y * 255 / h.max(1)) as u8;
            px[2] = 96;
        }
        frame
    }
}

impl FrameSource for TestPatternSource {
    fn next_frame(&mut self) -> BabycamResult<Option<Frame>> {
        if self.limit.is_some_and(|n| self.produced >= n) {
            return Ok(None);
        }
        let frame = self.render();
        self.produced += 1;
        Ok(Some(frame))
    }
}

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "ppm"];

/// Sorted still images from a directory, decoded to RGB8.
///
/// The first image fixes the session resolution; a later image of a different size is a fatal
/// `FrameSource` error.
#[derive(Debug)]
pub struct ImageSequenceSource {
    paths: VecDeque<PathBuf>,
    canvas: Option<Canvas>,
}

impl ImageSequenceSource {
    /// List image files in `dir` in lexicographic order.
    pub fn open(dir: impl AsRef<Path>) -> BabycamResult<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            BabycamError::frame_source(format!("open input dir '{}': {e}", dir.display()))
        })?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| BabycamError::frame_source(format!("list '{}': {e}", dir.display())))?
                .path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if path.is_file() && is_image {
                paths.push(path);
            }
        }
        if paths.is_empty() {
            return Err(BabycamError::frame_source(format!(
                "no images found in '{}'",
                dir.display()
            )));
        }
        paths.sort();
        tracing::debug!(dir = %dir.display(), frames = paths.len(), "opened image sequence");
        Ok(Self {
            paths: paths.into(),
            canvas: None,
        })
    }

    /// Resolution fixed by the first decoded frame.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Read the size of the next image from its header without decoding it.
    pub fn probe_canvas(&self) -> BabycamResult<Canvas> {
        let path = self
            .paths
            .front()
            .ok_or_else(|| BabycamError::frame_source("image sequence is exhausted"))?;
        let (w, h) = image::image_dimensions(path)
            .map_err(|e| BabycamError::frame_source(format!("probe '{}': {e}", path.display())))?;
        Canvas::new(w, h)
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> BabycamResult<Option<Frame>> {
        let Some(path) = self.paths.pop_front() else {
            return Ok(None);
        };
        let img = image::open(&path)
            .map_err(|e| BabycamError::frame_source(format!("decode '{}': {e}", path.display())))?
            .to_rgb8();
        let (w, h) = img.dimensions();
        match self.canvas {
            None => self.canvas = Some(Canvas::new(w, h)?),
            Some(c) if c.width != w || c.height != h => {
                return Err(BabycamError::frame_source(format!(
                    "'{}' is {w}x{h}, session resolution is {}x{}",
                    path.display(),
                    c.width,
                    c.height
                )));
            }
            Some(_) => {}
        }
        Frame::from_raw(w, h, img.into_raw()).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/source.rs"]
mod tests;
