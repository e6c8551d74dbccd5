use std::path::PathBuf;

use crate::foundation::core::{Frame, Tick};
use crate::foundation::error::{BabycamError, BabycamResult};

/// Configuration provided to a [`FrameSink`] when a session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Nominal frames per second (best effort).
    pub fps: f64,
}

/// Display contract for composited frames.
///
/// `push_frame` is called in strictly increasing tick order between one `begin` and one `end`.
pub trait FrameSink {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BabycamResult<()>;
    /// Show one frame.
    fn push_frame(&mut self, tick: Tick, frame: &Frame) -> BabycamResult<()>;
    /// Called once after the last frame, on every exit path.
    fn end(&mut self) -> BabycamResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(Tick, Frame)>,
    ended: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(Tick, Frame)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BabycamResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, tick: Tick, frame: &Frame) -> BabycamResult<()> {
        self.frames.push((tick, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> BabycamResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Discards frames, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    /// Frames pushed since `begin`.
    pub frames: u64,
}

impl FrameSink for NullSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BabycamResult<()> {
        self.frames = 0;
        Ok(())
    }

    fn push_frame(&mut self, _tick: Tick, _frame: &Frame) -> BabycamResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> BabycamResult<()> {
        Ok(())
    }
}

/// Writes each frame as `frame_NNNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
}

impl PngSequenceSink {
    /// Write frames into `dir`, created on `begin`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
        }
    }

    /// Number of files written.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Output path for a tick.
    pub fn path_for(&self, tick: Tick) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", tick.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> BabycamResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            anyhow::anyhow!("create output dir '{}': {e}", self.dir.display())
        })?;
        tracing::debug!(dir = %self.dir.display(), width = cfg.width, height = cfg.height, "png sink ready");
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, tick: Tick, frame: &Frame) -> BabycamResult<()> {
        let path = self.path_for(tick);
        image::save_buffer_with_format(
            &path,
            frame.as_bytes(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgb8,
            image::ImageFormat::Png,
        )
        .map_err(|e| BabycamError::Other(anyhow::anyhow!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BabycamResult<()> {
        tracing::debug!(written = self.written, "png sink closed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/sink.rs"]
mod tests;
