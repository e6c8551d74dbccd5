use crate::foundation::core::{Canvas, Frame, Tick};
use crate::foundation::error::{BabycamError, BabycamResult};
use crate::io::cue::CuePlayer;
use crate::pipeline::stage::{EffectContext, Stage, TickStats};
use crate::pipeline::trigger::IntervalTrigger;

/// Session-wide mutable state shared by every stage call.
#[derive(Debug)]
pub struct PipelineState {
    /// Next tick to process.
    pub tick: Tick,
    /// Random stream for particles and spawn positions.
    pub rng: fastrand::Rng,
    /// Rainbow activation timer, if a rainbow stage exists.
    pub rainbow_timer: Option<IntervalTrigger>,
    /// Swallow activation timer, if a swallow stage exists.
    pub swallow_timer: Option<IntervalTrigger>,
    /// Draws skipped for leaving the frame since session start.
    pub bounds_skips: u64,
    /// Cues emitted since session start.
    pub cues_emitted: u64,
    /// Non-fatal stage failures since session start.
    pub stage_errors: u64,
}

impl PipelineState {
    /// Fresh state at tick 0 with no timers and zeroed counters.
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            tick: Tick(0),
            rng,
            rainbow_timer: None,
            swallow_timer: None,
            bounds_skips: 0,
            cues_emitted: 0,
            stage_errors: 0,
        }
    }
}

/// Ordered effect list plus the per-session state that drives it.
///
/// Each call to [`Pipeline::process`] handles one tick: fire due one-shot timers, apply every
/// stage in rank order, hand emitted cues to the player, advance the tick counter.
pub struct Pipeline {
    canvas: Canvas,
    stages: Vec<Stage>,
    state: PipelineState,
    cue_player: Box<dyn CuePlayer>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("canvas", &self.canvas)
            .field("stages", &self.stage_labels())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Build a pipeline. Every stage is validated against `canvas`, then stably sorted into the
    /// fixed per-tick order, so stages of the same rank keep their given order. At most one
    /// rainbow and one swallow are allowed.
    pub fn new(
        canvas: Canvas,
        mut stages: Vec<Stage>,
        cue_player: Box<dyn CuePlayer>,
        rng: fastrand::Rng,
    ) -> BabycamResult<Self> {
        canvas.validate()?;
        for stage in &stages {
            stage.validate(canvas).map_err(|e| match e {
                BabycamError::Validation(msg) => {
                    BabycamError::validation(format!("{} stage: {msg}", stage.label()))
                }
                other => other,
            })?;
        }
        stages.sort_by_key(Stage::rank);

        let mut state = PipelineState::new(rng);
        for stage in &stages {
            match stage {
                Stage::Rainbow(h) => {
                    if state.rainbow_timer.is_some() {
                        return Err(BabycamError::validation("at most one rainbow stage allowed"));
                    }
                    state.rainbow_timer = Some(IntervalTrigger::new(h.params().interval_secs, 0.0));
                }
                Stage::Swallow(s) => {
                    if state.swallow_timer.is_some() {
                        return Err(BabycamError::validation("at most one swallow stage allowed"));
                    }
                    state.swallow_timer = Some(IntervalTrigger::new(s.params().interval_secs, 0.0));
                }
                _ => {}
            }
        }

        Ok(Self {
            canvas,
            stages,
            state,
            cue_player,
        })
    }

    /// Session resolution.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Next tick to be processed.
    pub fn tick(&self) -> Tick {
        self.state.tick
    }

    /// Session state (counters, timers).
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Stages in application order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Mutable access to stages, e.g. to trigger a one-shot by hand.
    pub fn stages_mut(&mut self) -> &mut [Stage] {
        &mut self.stages
    }

    /// Stage labels in application order.
    pub fn stage_labels(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::label).collect()
    }

    /// Process one frame in place at `now_secs` since session start.
    ///
    /// Errors only for a frame of the wrong resolution or a fatal stage failure; non-fatal stage
    /// failures are logged and counted, leaving that stage's effect out of this frame.
    pub fn process(&mut self, frame: &mut Frame, now_secs: f64) -> BabycamResult<TickStats> {
        if frame.canvas() != self.canvas {
            return Err(BabycamError::frame_source(format!(
                "frame is {}x{}, session resolution is {}x{}",
                frame.width(),
                frame.height(),
                self.canvas.width,
                self.canvas.height
            )));
        }

        let tick = self.state.tick;
        let mut stats = TickStats {
            tick,
            ..TickStats::default()
        };
        self.fire_triggers(frame.height(), now_secs, &mut stats);

        let mut ctx = EffectContext {
            tick,
            now_secs,
            rng: &mut self.state.rng,
            stats: &mut stats,
        };
        for stage in &mut self.stages {
            match stage.apply(frame, &mut ctx) {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(stage = stage.label(), tick = tick.0, error = %e, "stage failed");
                    ctx.stats.stage_errors += 1;
                }
            }
            ctx.stats.stages_applied += 1;
        }

        for cue in &stats.cues {
            if let Err(e) = self.cue_player.play(cue) {
                tracing::warn!(cue = %cue, error = %e, "cue playback failed");
            }
        }

        self.state.bounds_skips += u64::from(stats.bounds_skips);
        self.state.cues_emitted += stats.cues.len() as u64;
        self.state.stage_errors += u64::from(stats.stage_errors);
        self.state.tick = tick.next();
        Ok(stats)
    }

    fn fire_triggers(&mut self, frame_height: u32, now_secs: f64, stats: &mut TickStats) {
        let state = &mut self.state;
        for stage in &mut self.stages {
            match stage {
                Stage::Rainbow(h) => {
                    if let Some(timer) = state.rainbow_timer.as_mut()
                        && timer.is_due(now_secs)
                        && !h.is_active()
                        && let Some(cue) = h.activate(now_secs)
                    {
                        timer.mark(now_secs);
                        stats.cues.push(cue);
                    }
                }
                Stage::Swallow(s) => {
                    if let Some(timer) = state.swallow_timer.as_mut()
                        && timer.is_due(now_secs)
                        && !s.is_active()
                        && let Some(cue) = s.activate(frame_height, &mut state.rng)
                    {
                        timer.mark(now_secs);
                        stats.cues.push(cue);
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/orchestrator.rs"]
mod tests;
