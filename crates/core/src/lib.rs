//! `arssi-core` — ARSSI survey scoring engine.
//!
//! Pure engine crate: receives a pre-loaded frame, returns the augmented
//! frame plus fit summary. No CLI or file IO dependencies.

pub mod error;
pub mod frame;
pub mod items;
pub mod pipeline;
pub mod stats;

pub use error::ScoreError;
pub use frame::{Frame, Value};
pub use pipeline::{run, ScoreOutput, ScoreSummary};
