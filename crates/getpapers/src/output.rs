//! Rendering of the result set as a grid table or a CSV file.
//!
//! Both formats use [`PaperRecord::HEADERS`] as the column headers, in the same order.
//!
//! # Examples
//!
//! ```no_run
//! use getpapers::output::{self, CsvOutcome};
//!
//! # fn example(papers: Vec<getpapers::paper::PaperRecord>) -> Result<(), Box<dyn std::error::Error>> {
//! println!("{}", output::render_table(&papers));
//!
//! match output::write_csv(&papers, "out/results.csv")? {
//!   CsvOutcome::Written(rows) => println!("wrote {rows} rows"),
//!   CsvOutcome::NoData => println!("nothing to write"),
//! }
//! # Ok(())
//! # }
//! ```

use comfy_table::{presets::ASCII_FULL, Table};

use super::*;

/// What [`write_csv`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvOutcome {
  /// The file was written with this many data rows
  Written(usize),
  /// There were no records, so no file was written
  NoData,
}

/// Renders `records` as a bordered grid with a header row.
///
/// The output only depends on `records`; rendering the same records twice gives the same
/// text.
pub fn render_table(records: &[PaperRecord]) -> String {
  let mut table = Table::new();
  table.load_preset(ASCII_FULL).set_header(PaperRecord::HEADERS.to_vec());
  for record in records {
    table.add_row(record.fields().to_vec());
  }
  table.to_string()
}

/// Writes `records` to `path` as a UTF-8, comma-separated CSV file with a header row.
///
/// Missing parent directories are created first. When `records` is empty no file is
/// created and [`CsvOutcome::NoData`] is returned. An existing file is overwritten.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created, or a row cannot be
/// written.
pub fn write_csv(
  records: &[PaperRecord],
  path: impl AsRef<Path>,
) -> Result<CsvOutcome, GetPapersError> {
  let path = path.as_ref();

  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    trace!("Creating parent directories: {}", parent.display());
    std::fs::create_dir_all(parent)?;
  }

  if records.is_empty() {
    debug!("No records to write to {}", path.display());
    return Ok(CsvOutcome::NoData);
  }

  let mut writer = csv::Writer::from_path(path)?;
  for record in records {
    writer.serialize(record)?;
  }
  writer.flush()?;

  debug!("Wrote {} records to {}", records.len(), path.display());
  Ok(CsvOutcome::Written(records.len()))
}
