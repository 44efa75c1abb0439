//! Location file
//!
//! Load, append and rewrite operations against the backing text file.
//! Every operation opens the file right before use and drops the handle
//! before returning, on success and error paths alike.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::config::FieldLimits;
use crate::error::{DirectoryError, Result};
use crate::table::{LocationEntry, LocationTable};

use super::format::{format_line, parse_line, ParsedLine, HEADER_LINES};

/// Outcome of a full load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Entries inserted into the table
    pub loaded: usize,

    /// Lines with fewer than five fields, skipped
    pub malformed: usize,

    /// Entries dropped because the table could not allocate for them
    pub allocation_failures: usize,

    /// The file could not be opened; the table was left empty
    pub file_missing: bool,

    /// The file opened but reading it failed; the table was left empty
    pub read_failed: bool,
}

/// Text-file persistence for a [`LocationTable`]
#[derive(Debug, Clone)]
pub struct LocationStore {
    /// Backing data file
    path: PathBuf,

    /// Truncation applied to fields read from the file
    limits: FieldLimits,
}

impl LocationStore {
    pub fn new(path: impl Into<PathBuf>, limits: FieldLimits) -> Self {
        Self {
            path: path.into(),
            limits,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rebuild `table` from the backing file
    ///
    /// The table is cleared first. A file that cannot be opened or read is
    /// not an error: the table stays empty and the report has `file_missing`
    /// or `read_failed` set.
    pub fn load_all(&self, table: &mut LocationTable) -> Result<LoadReport> {
        table.clear();
        let mut report = LoadReport::default();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "location file not found or could not be opened; location features will be empty"
                );
                report.file_missing = true;
                return Ok(report);
            }
        };

        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "location file could not be read; location features will be empty"
                    );
                    table.clear();
                    return Ok(LoadReport {
                        read_failed: true,
                        ..LoadReport::default()
                    });
                }
            }

            let line = String::from_utf8_lossy(&buf);
            match parse_line(&line, &self.limits) {
                ParsedLine::Blank => {}
                ParsedLine::Malformed => report.malformed += 1,
                ParsedLine::Entry(entry) => match table.insert(entry) {
                    Ok(()) => report.loaded += 1,
                    Err(e) => {
                        error!(error = %e, "dropping location during load");
                        report.allocation_failures += 1;
                    }
                },
            }
        }

        debug!(
            path = %self.path.display(),
            loaded = report.loaded,
            malformed = report.malformed,
            "loaded location file"
        );
        Ok(report)
    }

    /// Append one entry to the file, then reload `table` from it
    ///
    /// The entry reaches memory only through the reload. If the file cannot
    /// be opened or written, `table` is left exactly as it was.
    pub fn append_one(&self, table: &mut LocationTable, entry: &LocationEntry) -> Result<LoadReport> {
        self.append_line(&format_line(entry))
            .map_err(|e| DirectoryError::file_write(&self.path, e))?;
        debug!(path = %self.path.display(), key = %entry.key, "appended location");

        self.load_all(table)
    }

    /// Overwrite the file with a header and every entry of `table`
    ///
    /// Entries are written in `table.iter()` order. Returns the number of
    /// entry lines written.
    pub fn rewrite_all(&self, table: &LocationTable) -> Result<usize> {
        let written = self
            .write_all_lines(table)
            .map_err(|e| DirectoryError::file_write(&self.path, e))?;
        debug!(path = %self.path.display(), entries = written, "rewrote location file");
        Ok(written)
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        // Hand-edited files may lack a final newline
        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn write_all_lines(&self, table: &LocationTable) -> std::io::Result<usize> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        for header in HEADER_LINES {
            writeln!(writer, "{header}")?;
        }

        let mut written = 0;
        for entry in table {
            writeln!(writer, "{}", format_line(entry))?;
            written += 1;
        }

        writer.flush()?;
        Ok(written)
    }
}
