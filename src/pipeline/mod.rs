pub mod clock;
pub mod orchestrator;
pub mod stage;
pub mod trigger;
