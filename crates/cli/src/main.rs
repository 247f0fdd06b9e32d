// ARSSI CLI - headless survey scoring
//
// Reads a survey export (CSV/TSV/Excel), runs the ARSSI pipeline, and writes
// the augmented table as CSV.

mod exit_codes;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use arssi_core::pipeline::{ARSSI_COLUMN, ATR_COLUMN, SEI_COLUMN};
use arssi_core::{Frame, ScoreError, ScoreOutput};
use exit_codes::{score_exit_code, EXIT_SCORE_PARSE, EXIT_SUCCESS, EXIT_USAGE};

/// Rows shown in the result preview, matching the upload-preview convention.
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "arssi")]
#[command(about = "ARSSI survey scorer (shock exposure, recovery, adjusted index)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a survey export and write the augmented table as CSV
    #[command(after_help = "\
Examples:
  arssi score survey.xlsx
  arssi score survey.xlsx -o scored.csv
  arssi score wave3.xlsx --sheet Wave3 -o - | head -5
  arssi score survey.csv --summary-json
  arssi score legacy.txt --from csv --delimiter ';'")]
    Score {
        /// Input file (csv, tsv, xlsx, xls, xlsb, ods)
        input: PathBuf,

        /// Input format (default: by file extension)
        #[arg(long, short = 'f')]
        from: Option<Format>,

        /// Output CSV file ('-' for stdout)
        #[arg(long, short = 'o', default_value = "ARSSI_results.csv")]
        output: PathBuf,

        /// CSV delimiter (default: sniffed from the file)
        #[arg(long)]
        delimiter: Option<char>,

        /// Sheet name for Excel inputs (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Print the fit summary as JSON instead of the human-readable report
        #[arg(long)]
        summary_json: bool,

        /// Suppress the summary and preview
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List the item columns (q2..q39) detected in a survey export
    #[command(after_help = "\
Examples:
  arssi columns survey.xlsx
  arssi columns survey.csv --delimiter ';'")]
    Columns {
        /// Input file (csv, tsv, xlsx, xls, xlsb, ods)
        input: PathBuf,

        /// Input format (default: by file extension)
        #[arg(long, short = 'f')]
        from: Option<Format>,

        /// CSV delimiter (default: sniffed from the file)
        #[arg(long)]
        delimiter: Option<char>,

        /// Sheet name for Excel inputs (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Tsv,
    Excel,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score { input, from, output, delimiter, sheet, summary_json, quiet } => {
            cmd_score(&input, from, &output, delimiter, sheet.as_deref(), summary_json, quiet)
        }
        Commands::Columns { input, from, delimiter, sheet } => {
            cmd_columns(&input, from, delimiter, sheet.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SCORE_PARSE, message: msg.into(), hint: None }
    }

    /// Create error from a scoring-engine error with proper exit code.
    pub fn score(err: ScoreError) -> Self {
        let hint = match &err {
            ScoreError::MissingColumn(_) => {
                Some("the export must carry the recovery items q40 and q41 in its header row".to_string())
            }
            ScoreError::EmptyInput => {
                Some("the file has a header but no respondent rows".to_string())
            }
            ScoreError::DegenerateRegression { .. } => {
                Some("every respondent has the same shock-exposure sum, so ATR cannot be regressed on SEI".to_string())
            }
        };
        Self { code: score_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// input loading
// ============================================================================

fn detect_format(path: &Path) -> Format {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "xlsx" | "xls" | "xlsb" | "ods" => Format::Excel,
        "tsv" => Format::Tsv,
        _ => Format::Csv,
    }
}

fn load_frame(
    input: &Path,
    from: Option<Format>,
    delimiter: Option<char>,
    sheet: Option<&str>,
) -> Result<Frame, CliError> {
    let format = from.unwrap_or_else(|| detect_format(input));

    if sheet.is_some() && format != Format::Excel {
        return Err(CliError::usage("--sheet only applies to Excel inputs"));
    }
    if delimiter.is_some() && format == Format::Excel {
        return Err(CliError::usage("--delimiter does not apply to Excel inputs"));
    }

    let frame = match format {
        Format::Excel => arssi_io::xlsx::import_sheet(input, sheet),
        Format::Tsv => arssi_io::csv::import_tsv(input),
        Format::Csv => match delimiter {
            Some(d) => {
                if !d.is_ascii() {
                    return Err(CliError::usage(format!("delimiter must be ASCII, got '{d}'")));
                }
                arssi_io::csv::import_with_delimiter(input, d as u8)
            }
            None => arssi_io::csv::import(input),
        },
    };

    frame.map_err(|e| {
        CliError::parse(format!("{}: {}", input.display(), e))
            .with_hint("expected a delimited text or Excel file with a header row")
    })
}

// ============================================================================
// score
// ============================================================================

fn cmd_score(
    input: &Path,
    from: Option<Format>,
    output: &Path,
    delimiter: Option<char>,
    sheet: Option<&str>,
    summary_json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let frame = load_frame(input, from, delimiter, sheet)?;
    let scored = arssi_core::run(frame).map_err(CliError::score)?;

    if summary_json {
        let json = serde_json::to_string_pretty(&scored.summary)
            .map_err(|e| CliError::parse(e.to_string()))?;
        println!("{}", json);
    } else if !quiet {
        print_report(&scored);
    }

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        arssi_io::csv::export_to_writer(&scored.frame, stdout.lock())
            .map_err(CliError::parse)?;
    } else {
        arssi_io::csv::export(&scored.frame, output)
            .map_err(|e| CliError::parse(format!("{}: {}", output.display(), e)))?;
        if !quiet && !summary_json {
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

fn print_report(scored: &ScoreOutput) {
    let summary = &scored.summary;

    println!(
        "Scored {} respondent(s): {} item column(s), {} cell(s) defaulted to 0",
        summary.rows,
        summary.item_columns.len(),
        summary.cells_defaulted
    );
    println!();
    println!("Regression coefficient (b): {:.4}", summary.slope);
    println!("Mean SEI (Y):               {:.4}", summary.mean_sei);
    println!();

    println!("{:>12} {:>12} {:>12}", ATR_COLUMN, SEI_COLUMN, ARSSI_COLUMN);
    let frame = &scored.frame;
    let cols = [ATR_COLUMN, SEI_COLUMN, ARSSI_COLUMN]
        .map(|name| frame.column_index(name).unwrap_or_default());
    for row in 0..frame.n_rows().min(PREVIEW_ROWS) {
        let [atr, sei, arssi] = cols.map(|c| frame.value(row, c).as_number());
        println!("{:>12.4} {:>12.4} {:>12.4}", atr, sei, arssi);
    }
    if frame.n_rows() > PREVIEW_ROWS {
        println!("... {} more row(s)", frame.n_rows() - PREVIEW_ROWS);
    }
    println!();
}

// ============================================================================
// columns
// ============================================================================

fn cmd_columns(
    input: &Path,
    from: Option<Format>,
    delimiter: Option<char>,
    sheet: Option<&str>,
) -> Result<(), CliError> {
    let frame = load_frame(input, from, delimiter, sheet)?;
    let items = arssi_core::items::select_item_columns(&frame);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for name in &items {
        writeln!(handle, "{}", name).map_err(|e| CliError::parse(e.to_string()))?;
    }
    if items.is_empty() {
        eprintln!("no item columns (q2..q39) found in {}", input.display());
    }

    Ok(())
}
