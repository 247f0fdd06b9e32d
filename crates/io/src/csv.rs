// CSV/TSV import/export

use std::io::{Read, Write};
use std::path::Path;

use arssi_core::{Frame, Value};

pub fn import(path: &Path) -> Result<Frame, String> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Frame, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
}

pub fn import_with_delimiter(path: &Path, delimiter: u8) -> Result<Frame, String> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, delimiter)
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Must produce >1 field on the first line to be viable
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Score: (number of lines with same field count as line 1) * field_count
        // Higher field count breaks ties — more columns = more likely real delimiter
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Parse delimited text into a frame. The first record is the header row;
/// short data records are padded to the header width, long ones truncated.
fn import_from_string(content: &str, delimiter: u8) -> Result<Frame, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(result) => result.map_err(|e| e.to_string())?,
        None => return Err("input has no header row".to_string()),
    };
    let columns: Vec<String> = header.iter().map(|f| f.trim().to_string()).collect();
    let mut frame = Frame::new(columns);

    for result in records {
        let record = result.map_err(|e| e.to_string())?;
        frame.push_row(record.iter().map(Value::from_input).collect());
    }

    Ok(frame)
}

pub fn export(frame: &Frame, path: &Path) -> Result<(), String> {
    let file = std::fs::File::create(path).map_err(|e| e.to_string())?;
    export_to_writer(frame, file)
}

/// Write header + all rows as comma-delimited UTF-8. Every row gets one
/// field per column — no index column, no trailing-field trimming, so the
/// output is rectangular and re-importable.
pub fn export_to_writer<W: Write>(frame: &Frame, writer: W) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .from_writer(writer);

    writer
        .write_record(frame.columns())
        .map_err(|e| e.to_string())?;

    for row in 0..frame.n_rows() {
        let record: Vec<String> = frame.row(row).iter().map(Value::display).collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "id;q2;q3\nr1;3;1\nr2;2;4\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "id,q2,q3\nr1,3,1\nr2,2,4\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "id\tq2\tq3\nr1\t3\t1\nr2\t2\t4\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_pipe_delimiter() {
        let content = "id|q2|q3\nr1|3|1\nr2|2|4\n";
        assert_eq!(sniff_delimiter(content), b'|');
    }

    #[test]
    fn test_import_header_and_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("survey.csv");
        fs::write(&path, "id,q2,q40\nr1,3,not sure\nr2,1.5,2\n").unwrap();

        let frame = import(&path).unwrap();
        assert_eq!(frame.columns(), &["id", "q2", "q40"].map(String::from));
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(frame.value(0, 0), &Value::Text("r1".into()));
        assert_eq!(frame.value(0, 1), &Value::Number(3.0));
        assert_eq!(frame.value(0, 2), &Value::Text("not sure".into()));
        assert_eq!(frame.value(1, 1), &Value::Number(1.5));
    }

    #[test]
    fn test_import_pads_short_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "a,b,c\n1,2\n").unwrap();

        let frame = import(&path).unwrap();
        assert_eq!(frame.n_cols(), 3);
        assert_eq!(frame.value(0, 2), &Value::Empty);
    }

    #[test]
    fn test_import_empty_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        assert!(import(&path).is_err());
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin.csv");
        // "café" with 0xE9 (Windows-1252 é), invalid as UTF-8
        fs::write(&path, b"name,q2\ncaf\xe9,3\n").unwrap();

        let frame = import(&path).unwrap();
        assert_eq!(frame.value(0, 0), &Value::Text("café".into()));
    }

    #[test]
    fn test_export_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut frame = Frame::new(vec!["id".into(), "SEI".into(), "ARSSI".into()]);
        frame.push_row(vec![
            Value::Text("r1".into()),
            Value::Number(3.0),
            Value::Number(5.25),
        ]);
        frame.push_row(vec![
            Value::Text("r2".into()),
            Value::Number(4.0),
            Value::Number(5.0),
        ]);

        export(&frame, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,SEI,ARSSI\nr1,3,5.25\nr2,4,5\n");

        let reimported = import(&path).unwrap();
        assert_eq!(reimported, frame);
    }

    #[test]
    fn test_export_quotes_embedded_delimiters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quoted.csv");

        let mut frame = Frame::new(vec!["note".into(), "q2".into()]);
        frame.push_row(vec![Value::Text("a, b".into()), Value::Number(1.0)]);
        export(&frame, &path).unwrap();

        let reimported = import_with_delimiter(&path, b',').unwrap();
        assert_eq!(reimported.value(0, 0), &Value::Text("a, b".into()));
    }
}
