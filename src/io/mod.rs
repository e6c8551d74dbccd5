//! Contracts for the collaborators around the pipeline (camera, display, audio, exit key) and
//! small implementations used by the CLI and tests.

pub mod cue;
pub mod exit;
pub mod sink;
pub mod source;
