use crate::foundation::core::{Frame, Tick};
use crate::foundation::error::BabycamResult;
use crate::io::exit::{ExitSignal, LoopControl};
use crate::io::sink::{FrameSink, SinkConfig};
use crate::io::source::FrameSource;
use crate::pipeline::clock::Clock;
use crate::pipeline::orchestrator::Pipeline;

/// Why a session loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The frame source reported end of stream.
    SourceExhausted,
    /// The exit signal asked to stop.
    ExitRequested,
}

/// Totals for a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames processed and displayed.
    pub frames: u64,
    /// Draws skipped for leaving the frame.
    pub bounds_skips: u64,
    /// Cues emitted.
    pub cues_emitted: u64,
    /// Non-fatal stage failures.
    pub stage_errors: u64,
    /// Reason the loop stopped.
    pub end: SessionEnd,
}

/// Calls `end` on the sink when dropped unless [`SinkGuard::finish`] already did.
struct SinkGuard<'a> {
    sink: &'a mut dyn FrameSink,
    ended: bool,
}

impl SinkGuard<'_> {
    fn push(&mut self, tick: Tick, frame: &Frame) -> BabycamResult<()> {
        self.sink.push_frame(tick, frame)
    }

    fn finish(mut self) -> BabycamResult<()> {
        self.ended = true;
        self.sink.end()
    }
}

impl Drop for SinkGuard<'_> {
    fn drop(&mut self) {
        if !self.ended {
            let _ = self.sink.end();
        }
    }
}

/// Run the camera loop until the source ends or the exit signal fires.
///
/// Per tick: poll the exit signal, pull a frame, process it, show it. The sink's `end` runs on
/// every exit path, including errors and panics inside a tick.
#[tracing::instrument(skip_all, fields(width = pipeline.canvas().width, height = pipeline.canvas().height))]
pub fn run_session(
    pipeline: &mut Pipeline,
    source: &mut dyn FrameSource,
    sink: &mut dyn FrameSink,
    exit: &mut dyn ExitSignal,
    clock: &dyn Clock,
    fps: f64,
) -> BabycamResult<SessionSummary> {
    let canvas = pipeline.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps,
    })?;
    let mut guard = SinkGuard { sink, ended: false };
    tracing::info!(stages = ?pipeline.stage_labels(), "session started");

    let mut frames = 0u64;
    let end = loop {
        if exit.poll() == LoopControl::Stop {
            break SessionEnd::ExitRequested;
        }
        let Some(mut frame) = source.next_frame()? else {
            break SessionEnd::SourceExhausted;
        };
        let tick = pipeline.tick();
        pipeline.process(&mut frame, clock.now_secs(tick))?;
        guard.push(tick, &frame)?;
        frames += 1;
    };
    guard.finish()?;

    let state = pipeline.state();
    let summary = SessionSummary {
        frames,
        bounds_skips: state.bounds_skips,
        cues_emitted: state.cues_emitted,
        stage_errors: state.stage_errors,
        end,
    };
    tracing::info!(
        frames,
        bounds_skips = summary.bounds_skips,
        cues = summary.cues_emitted,
        end = ?end,
        "session finished"
    );
    Ok(summary)
}
