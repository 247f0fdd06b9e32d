//! `arssi-io` — file import/export for the ARSSI scorer.
//!
//! Import produces an `arssi_core::Frame` with the first file row as header;
//! export renders a frame back to delimited text. The scoring engine never
//! touches files directly.

pub mod csv;
pub mod xlsx;
