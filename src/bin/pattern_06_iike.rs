use colored::Colorize;
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

// =============================================================================
// IIKE pipeline: information, initialization, knowledge, execution
//
// A four-phase batch job over a delimited file: collect the raw rows,
// allocate the working table, filter by a threshold and annotate with the
// mean of what survived, then persist the result. Each phase is guarded
// by the previous phase's output; an early failure turns the rest of the
// run into reported no-ops instead of a crash.
// =============================================================================

const VALUE_COLUMN: &str = "value";
const AVERAGE_COLUMN: &str = "average";
const THRESHOLD: f64 = 10.0;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("input has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("row {row}: '{text}' is not numeric")]
    BadNumber { row: usize, text: String },
}

/// In-memory tabular data: a header row plus string rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn read(path: &Path) -> Result<Self, PipelineError> {
        let wrap = |source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path).map_err(wrap)?;
        let headers = reader.headers().map_err(wrap)?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(wrap)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(DataTable { headers, rows })
    }

    fn write(&self, path: &Path) -> Result<(), PipelineError> {
        let wrap = |source| PipelineError::Write {
            path: path.to_path_buf(),
            source,
        };

        let mut writer = WriterBuilder::new().from_path(path).map_err(wrap)?;
        writer.write_record(&self.headers).map_err(wrap)?;
        for row in &self.rows {
            writer.write_record(row).map_err(wrap)?;
        }
        writer.flush().map_err(|e| wrap(e.into()))
    }
}

/// Keep the rows whose `value` exceeds the threshold and attach an
/// `average` column holding the mean of the retained values.
fn apply_business_logic(data: &DataTable) -> Result<DataTable, PipelineError> {
    let value_index = data
        .column_index(VALUE_COLUMN)
        .ok_or(PipelineError::MissingColumn(VALUE_COLUMN))?;

    let mut kept: Vec<(Vec<String>, f64)> = Vec::new();
    for (i, row) in data.rows.iter().enumerate() {
        let text = row.get(value_index).map(String::as_str).unwrap_or("");
        let value: f64 = text.trim().parse().map_err(|_| PipelineError::BadNumber {
            // header is line 1
            row: i + 2,
            text: text.to_string(),
        })?;
        if value > THRESHOLD {
            kept.push((row.clone(), value));
        }
    }

    let mut headers = data.headers.clone();
    headers.push(AVERAGE_COLUMN.to_string());

    if kept.is_empty() {
        return Ok(DataTable {
            headers,
            rows: Vec::new(),
        });
    }

    let average = kept.iter().map(|(_, v)| v).sum::<f64>() / kept.len() as f64;
    let rows = kept
        .into_iter()
        .map(|(mut row, _)| {
            row.push(average.to_string());
            row
        })
        .collect();

    Ok(DataTable { headers, rows })
}

pub struct Pipeline {
    input_path: PathBuf,
    output_path: PathBuf,
    data: Option<DataTable>,
    processed: Option<DataTable>,
}

impl Pipeline {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Pipeline {
            input_path: input_path.into(),
            output_path: output_path.into(),
            data: None,
            processed: None,
        }
    }

    /// Phase 1 — information: collect the raw rows from the input file.
    pub fn information<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Collecting information from the file...")?;
        match DataTable::read(&self.input_path) {
            Ok(table) => {
                self.data = Some(table);
                writeln!(out, "{}", "Information collected successfully!".green())
            }
            Err(err) => {
                self.data = None;
                writeln!(out, "{}", format!("File not found. {err}").red())
            }
        }
    }

    /// Phase 2 — initialization: allocate the working table.
    pub fn initialization<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Initializing variables...")?;
        match &self.data {
            Some(data) => {
                self.processed = Some(DataTable {
                    headers: data.headers.clone(),
                    rows: Vec::new(),
                });
                writeln!(out, "{}", "Variables initialized successfully!".green())
            }
            None => {
                self.processed = None;
                writeln!(out, "Failed to initialize variables due to lack of data.")
            }
        }
    }

    /// Phase 3 — knowledge: apply the filter-and-annotate business logic.
    pub fn knowledge<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Applying business logic...")?;
        let Some(data) = &self.data else {
            self.processed = None;
            return writeln!(out, "Failed to apply business logic due to lack of data.");
        };

        match apply_business_logic(data) {
            Ok(table) => {
                self.processed = Some(table);
                writeln!(out, "{}", "Business logic applied successfully!".green())
            }
            Err(err) => {
                self.processed = None;
                writeln!(out, "{}", format!("Failed to apply business logic: {err}").red())
            }
        }
    }

    /// Phase 4 — execution: persist the processed table. Returns whether
    /// the output file was written.
    pub fn execution<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        writeln!(out, "Executing main task...")?;
        match &self.processed {
            Some(processed) if !processed.is_empty() => match processed.write(&self.output_path) {
                Ok(()) => {
                    writeln!(
                        out,
                        "{}",
                        format!(
                            "Main task executed successfully! Data saved in {}",
                            self.output_path.display()
                        )
                        .green()
                    )?;
                    Ok(true)
                }
                Err(err) => {
                    writeln!(out, "{}", format!("Failed to save the data: {err}").red())?;
                    Ok(false)
                }
            },
            _ => {
                writeln!(out, "Failed to execute main task due to lack of processed data.")?;
                Ok(false)
            }
        }
    }

    /// Run all four phases in order. Phases after a failure report it and
    /// fall through; nothing raises past the phase boundary.
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<bool> {
        self.information(out)?;
        self.initialization(out)?;
        self.knowledge(out)?;
        self.execution(out)
    }
}

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "data.csv".to_string());
    let output = args.next().unwrap_or_else(|| "processed_data.csv".to_string());

    let mut pipeline = Pipeline::new(input, output);
    let stdout = io::stdout();
    match pipeline.run(&mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn table(headers: &[&str], rows: &[&[&str]]) -> DataTable {
        DataTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_filter_and_average() {
        let input = table(&["name", "value"], &[&["a", "5"], &["b", "15"], &["c", "20"]]);
        let result = apply_business_logic(&input).unwrap();

        assert_eq!(result.headers, vec!["name", "value", "average"]);
        assert_eq!(
            result.rows,
            vec![
                vec!["b".to_string(), "15".to_string(), "17.5".to_string()],
                vec!["c".to_string(), "20".to_string(), "17.5".to_string()],
            ]
        );
    }

    #[test]
    fn test_filter_can_empty_the_table() {
        let input = table(&["value"], &[&["1"], &["2"]]);
        let result = apply_business_logic(&input).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.headers, vec!["value", "average"]);
    }

    #[test]
    fn test_missing_value_column_is_an_error() {
        let input = table(&["name"], &[&["a"]]);
        assert!(matches!(
            apply_business_logic(&input),
            Err(PipelineError::MissingColumn("value"))
        ));
    }

    #[test]
    fn test_non_numeric_value_reports_the_row() {
        let input = table(&["value"], &[&["12"], &["oops"]]);
        match apply_business_logic(&input) {
            Err(PipelineError::BadNumber { row, text }) => {
                assert_eq!(row, 3);
                assert_eq!(text, "oops");
            }
            other => panic!("expected BadNumber, got {other:?}"),
        }
    }

    #[test]
    fn test_full_run_writes_annotated_output() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("processed_data.csv");
        fs::write(&input, "name,value\na,5\nb,15\nc,20\n").unwrap();

        let mut pipeline = Pipeline::new(&input, &output);
        let mut log = Vec::new();
        let persisted = pipeline.run(&mut log).unwrap();
        assert!(persisted);

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "name,value,average\nb,15,17.5\nc,20,17.5\n");

        let log = String::from_utf8(log).unwrap();
        assert!(log.contains("Information collected successfully!"));
        assert!(log.contains("Business logic applied successfully!"));
        assert!(log.contains("Main task executed successfully!"));
    }

    #[test]
    fn test_missing_file_short_circuits_later_phases() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let output = dir.path().join("processed_data.csv");

        let mut pipeline = Pipeline::new(dir.path().join("absent.csv"), &output);
        let mut log = Vec::new();
        let persisted = pipeline.run(&mut log).unwrap();
        assert!(!persisted);
        assert!(!output.exists());

        let log = String::from_utf8(log).unwrap();
        assert!(log.contains("File not found."));
        assert!(log.contains("Failed to initialize variables due to lack of data."));
        assert!(log.contains("Failed to apply business logic due to lack of data."));
        assert!(log.contains("Failed to execute main task due to lack of processed data."));
    }

    #[test]
    fn test_empty_result_is_not_persisted() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("processed_data.csv");
        fs::write(&input, "value\n1\n2\n").unwrap();

        let mut pipeline = Pipeline::new(&input, &output);
        let mut log = Vec::new();
        let persisted = pipeline.run(&mut log).unwrap();
        assert!(!persisted);
        assert!(!output.exists());
    }

    #[test]
    fn test_bad_row_fails_only_the_knowledge_phase() {
        colored::control::set_override(false);
        let dir = tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let output = dir.path().join("processed_data.csv");
        fs::write(&input, "value\n12\noops\n").unwrap();

        let mut pipeline = Pipeline::new(&input, &output);
        let mut log = Vec::new();
        let persisted = pipeline.run(&mut log).unwrap();
        assert!(!persisted);

        let log = String::from_utf8(log).unwrap();
        assert!(log.contains("Information collected successfully!"));
        assert!(log.contains("Variables initialized successfully!"));
        assert!(log.contains("Failed to apply business logic"));
        assert!(log.contains("'oops' is not numeric"));
    }
}
