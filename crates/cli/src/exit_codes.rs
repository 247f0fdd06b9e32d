//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | score            | Scoring-pipeline codes                   |

use arssi_core::ScoreError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Score (3-9)
// =============================================================================

/// A required column (q40/q41) is absent from the input.
pub const EXIT_SCORE_MISSING_COLUMN: u8 = 3;

/// Input has a header but no data rows.
pub const EXIT_SCORE_EMPTY_INPUT: u8 = 4;

/// SEI has zero variance; the regression slope is undefined.
pub const EXIT_SCORE_DEGENERATE: u8 = 5;

/// Input file could not be read or parsed.
pub const EXIT_SCORE_PARSE: u8 = 6;

/// Exit code for a scoring-engine error.
pub fn score_exit_code(err: &ScoreError) -> u8 {
    match err {
        ScoreError::MissingColumn(_) => EXIT_SCORE_MISSING_COLUMN,
        ScoreError::EmptyInput => EXIT_SCORE_EMPTY_INPUT,
        ScoreError::DegenerateRegression { .. } => EXIT_SCORE_DEGENERATE,
    }
}
