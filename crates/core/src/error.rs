use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ScoreError {
    /// A required column (`q40`, `q41`) is absent from the input frame.
    MissingColumn(String),
    /// The frame has no data rows; mean and regression are undefined.
    EmptyInput,
    /// SEI is constant across all rows (zero variance), so the OLS slope is
    /// undefined. Includes the single-row case.
    DegenerateRegression { rows: usize },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn(name) => {
                write!(f, "required column '{name}' not found in input")
            }
            Self::EmptyInput => write!(f, "input has no data rows"),
            Self::DegenerateRegression { rows } => {
                write!(
                    f,
                    "SEI has zero variance across {rows} row(s); regression slope is undefined"
                )
            }
        }
    }
}

impl std::error::Error for ScoreError {}
