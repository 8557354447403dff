//! Application layer
//!
//! Use cases that orchestrate a verification run:
//! discovery, the passes, then report aggregation.
//!
//! - `VerifyUseCase` - runs the selected passes and writes every report

pub mod verify;

pub use verify::{run_passes, VerifyOptions, VerifyOutcome, VerifyUseCase};
