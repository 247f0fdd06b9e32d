//! The ARSSI scoring pipeline.
//!
//! A pure function from an input frame to the augmented frame plus the fit
//! summary: select item columns, coerce them to numeric, derive ATR and SEI,
//! fit the ATR~SEI slope, and emit the regression-debiased ARSSI per row.
//! No partial results: any fatal condition aborts before the frame is
//! augmented.

use serde::Serialize;

use crate::error::ScoreError;
use crate::frame::Frame;
use crate::items::{self, RECOVERY_A, RECOVERY_B};
use crate::stats;

/// Derived column: ability to recover, `q40 + q41`.
pub const ATR_COLUMN: &str = "ATR";
/// Derived column: shock exposure index, sum of coerced item columns.
pub const SEI_COLUMN: &str = "SEI";
/// Derived column: adjusted index, `ATR + b*(Y - SEI)`.
pub const ARSSI_COLUMN: &str = "ARSSI";

/// Scalars and audit counts from one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Respondent (data row) count.
    pub rows: usize,
    /// Item columns found, in source order.
    pub item_columns: Vec<String>,
    /// Item cells defaulted to 0 during coercion.
    pub cells_defaulted: usize,
    /// OLS slope of ATR on SEI (the `b` coefficient).
    pub slope: f64,
    /// Mean SEI across all rows (the `Y` scalar).
    pub mean_sei: f64,
}

/// Augmented frame + fit summary.
#[derive(Debug, Clone)]
pub struct ScoreOutput {
    pub frame: Frame,
    pub summary: ScoreSummary,
}

/// Run the full pipeline. The output frame is the input frame with the item
/// columns coerced in place and `ATR`, `SEI`, `ARSSI` appended (overwritten
/// if already present); rows are never dropped or reordered.
pub fn run(frame: Frame) -> Result<ScoreOutput, ScoreError> {
    let mut frame = frame;

    // Required recovery columns, checked before any computation.
    let col_a = frame
        .column_index(RECOVERY_A)
        .ok_or_else(|| ScoreError::MissingColumn(RECOVERY_A.to_string()))?;
    let col_b = frame
        .column_index(RECOVERY_B)
        .ok_or_else(|| ScoreError::MissingColumn(RECOVERY_B.to_string()))?;

    if frame.n_rows() == 0 {
        return Err(ScoreError::EmptyInput);
    }

    let item_columns = items::select_item_columns(&frame);
    let report = items::coerce_items(&mut frame, &item_columns);

    // ATR reads q40/q41 strictly: a non-numeric recovery cell poisons that
    // row's ATR (and ARSSI) with NaN rather than being defaulted.
    let atr: Vec<f64> = (0..frame.n_rows())
        .map(|row| {
            let a = frame.value(row, col_a).as_number_strict().unwrap_or(f64::NAN);
            let b = frame.value(row, col_b).as_number_strict().unwrap_or(f64::NAN);
            a + b
        })
        .collect();

    let item_indices: Vec<usize> = item_columns
        .iter()
        .filter_map(|c| frame.column_index(c))
        .collect();
    let sei: Vec<f64> = (0..frame.n_rows())
        .map(|row| item_indices.iter().map(|&c| frame.value(row, c).as_number()).sum())
        .collect();

    let slope = stats::ols_slope(&sei, &atr)
        .ok_or(ScoreError::DegenerateRegression { rows: sei.len() })?;
    let mean_sei = stats::mean(&sei);

    let arssi: Vec<f64> = atr
        .iter()
        .zip(&sei)
        .map(|(&atr_v, &sei_v)| atr_v + slope * (mean_sei - sei_v))
        .collect();

    let summary = ScoreSummary {
        rows: frame.n_rows(),
        item_columns,
        cells_defaulted: report.cells_defaulted,
        slope,
        mean_sei,
    };

    frame.set_column(ATR_COLUMN, &atr);
    frame.set_column(SEI_COLUMN, &sei);
    frame.set_column(ARSSI_COLUMN, &arssi);

    Ok(ScoreOutput { frame, summary })
}
