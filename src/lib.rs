//! Babycam is a real-time camera frame compositor.
//!
//! Each tick a [`Pipeline`] takes one camera [`Frame`] and layers stateful effects onto it in a
//! fixed order:
//!
//! - global tone adjust (saturation/brightness, glow, pulse tint)
//! - geometric pre-transform
//! - bouncing sprites that play a cue on every edge hit
//! - particle generators (rainbow band, bubble, sparkle, star twinkle)
//! - timed one-shots (rainbow halo, swallow flyby)
//! - distortion (kaleidoscope, swirl, mosaic, wobble)
//! - caption text
//!
//! [`run_session`] drives a pipeline from a [`FrameSource`] into a [`FrameSink`] until the
//! source ends or an [`ExitSignal`] fires.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub mod config;
pub mod effects;
pub mod io;
pub mod layers;
pub mod pipeline;
pub mod session;

pub use crate::assets::decode::{SpriteAsset, SpriteChannels, decode_sprite};
pub use crate::assets::store::{AssetStore, normalize_rel_path};
pub use crate::foundation::core::{Canvas, CueId, FRAME_CHANNELS, Frame, Rgb8, Tick};
pub use crate::foundation::error::{BabycamError, BabycamResult};
pub use crate::foundation::math::{half_degree_hue_to_rgb, hsv_to_rgb, rgb_to_hsv};

pub use crate::config::{PipelineConfig, Preset, SpriteConfig, SwallowConfig, build_pipeline};
pub use crate::effects::composite::{CompositeOp, DrawOutcome};
pub use crate::io::cue::{CuePlayer, LogCuePlayer, RecordingCuePlayer};
pub use crate::io::exit::{ExitSignal, FrameBudget, LoopControl, Never, StopFlag};
pub use crate::io::sink::{FrameSink, InMemorySink, NullSink, PngSequenceSink, SinkConfig};
pub use crate::io::source::{FrameSource, ImageSequenceSource, TestPatternSource, VecSource};
pub use crate::pipeline::clock::{Clock, FrameClock, ManualClock, SystemClock};
pub use crate::pipeline::orchestrator::{Pipeline, PipelineState};
pub use crate::pipeline::stage::{EffectContext, Stage, StageRank, TickStats};
pub use crate::session::{SessionEnd, SessionSummary, run_session};
