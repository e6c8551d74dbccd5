use std::sync::{Arc, Mutex};

use crate::foundation::core::CueId;
use crate::foundation::error::{BabycamError, BabycamResult};

/// Fire-and-forget sound playback.
///
/// Errors are reported to the caller, which logs and ignores them; a missing sound never halts
/// the pipeline.
pub trait CuePlayer: Send {
    /// Start playing `cue` without waiting for it to finish.
    fn play(&mut self, cue: &CueId) -> BabycamResult<()>;
}

/// Player that only logs cue names. Used when no audio device is attached.
#[derive(Debug, Default)]
pub struct LogCuePlayer;

impl CuePlayer for LogCuePlayer {
    fn play(&mut self, cue: &CueId) -> BabycamResult<()> {
        tracing::info!(cue = %cue, "play cue");
        Ok(())
    }
}

/// Player that records every cue into a shared list. Clones share the same list.
#[derive(Clone, Debug, Default)]
pub struct RecordingCuePlayer {
    played: Arc<Mutex<Vec<CueId>>>,
    missing: Vec<CueId>,
}

impl RecordingCuePlayer {
    /// Empty log; every cue plays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `cue` as a missing sound: `play` fails for it and does not record it.
    pub fn with_missing(mut self, cue: CueId) -> Self {
        self.missing.push(cue);
        self
    }

    /// Snapshot of the cues played so far, in order.
    pub fn played(&self) -> Vec<CueId> {
        self.played.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl CuePlayer for RecordingCuePlayer {
    fn play(&mut self, cue: &CueId) -> BabycamResult<()> {
        if self.missing.contains(cue) {
            return Err(BabycamError::asset(format!("no sound loaded for cue '{cue}'")));
        }
        self.played
            .lock()
            .map_err(|_| anyhow::anyhow!("cue recorder lock poisoned"))?
            .push(cue.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/cue.rs"]
mod tests;
