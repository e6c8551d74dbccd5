//! Stateful layers that carry position or activation state across ticks.

pub mod oneshot;
pub mod sprite;
pub mod text;
