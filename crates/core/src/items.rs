//! Item-column selection and numeric coercion.
//!
//! The survey schema is name-driven: shock-exposure items are the columns
//! `q2`..`q39`, and the two recovery items are `q40`/`q41`. The range is a
//! fixed convention of the instrument, not configuration.

use crate::frame::{Frame, Value};

/// Lowest item suffix that counts toward SEI.
pub const ITEM_MIN: u32 = 2;
/// Highest item suffix that counts toward SEI.
pub const ITEM_MAX: u32 = 39;

/// First recovery column (ATR = q40 + q41).
pub const RECOVERY_A: &str = "q40";
/// Second recovery column.
pub const RECOVERY_B: &str = "q41";

/// Cells rewritten to 0 during coercion, so callers can audit how much of
/// the input was defaulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoercionReport {
    pub cells_defaulted: usize,
}

/// True for column names of the form `q<N>` with N in [2,39].
///
/// The whole suffix must be digits: `q7x` and `qabc` are not items, and
/// neither are `q1`, `q0`, or the recovery columns `q40`/`q41`.
pub fn is_item_column(name: &str) -> bool {
    let Some(suffix) = name.strip_prefix('q') else {
        return false;
    };
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match suffix.parse::<u32>() {
        Ok(n) => (ITEM_MIN..=ITEM_MAX).contains(&n),
        Err(_) => false,
    }
}

/// Item columns present in the frame, in source column order.
pub fn select_item_columns(frame: &Frame) -> Vec<String> {
    frame
        .columns()
        .iter()
        .filter(|c| is_item_column(c))
        .cloned()
        .collect()
}

/// Overwrite every cell in the given columns that does not hold a finite
/// number with `Number(0.0)`.
///
/// This is the documented coercion step: missing and unparseable item
/// responses contribute nothing to SEI. Literal "NaN"/"inf" text parses to a
/// non-finite number at load time and is defaulted here too, so SEI and the
/// fit stay finite. Returns how many cells were defaulted. Columns not
/// present in the frame are ignored.
pub fn coerce_items(frame: &mut Frame, columns: &[String]) -> CoercionReport {
    let mut report = CoercionReport::default();

    for name in columns {
        let Some(col) = frame.column_index(name) else {
            continue;
        };
        for row in 0..frame.n_rows() {
            let finite = frame
                .value(row, col)
                .as_number_strict()
                .is_some_and(f64::is_finite);
            if !finite {
                frame.set_value(row, col, Value::Number(0.0));
                report.cells_defaulted += 1;
            }
        }
    }

    report
}
