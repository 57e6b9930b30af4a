//! CSV output for roster rows.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rosters_shared::{CSV_COLUMNS, Player, Result, RosterError, Season};

/// Default output file for a season; append runs go to a separate `_adds` file.
pub fn output_path(dir: &Path, season: &Season, append: bool) -> PathBuf {
    if append {
        dir.join(format!("rosters_{season}_adds.csv"))
    } else {
        dir.join(format!("rosters_{season}.csv"))
    }
}

/// Writes players as CSV rows in [`CSV_COLUMNS`] order.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl CsvSink<File> {
    /// Create (truncate) `path` and write the header row, or append to it.
    ///
    /// In append mode the header is written only when the file is new or empty.
    pub fn create(path: &Path, append: bool) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| RosterError::io(parent, e))?;
        }

        let file = if append {
            OpenOptions::new().create(true).append(true).open(path)
        } else {
            File::create(path)
        }
        .map_err(|e| RosterError::io(path, e))?;

        let empty = file
            .metadata()
            .map(|m| m.len() == 0)
            .map_err(|e| RosterError::io(path, e))?;

        Self::from_writer(file, !append || empty)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W, write_header: bool) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(inner);
        if write_header {
            writer.write_record(CSV_COLUMNS).map_err(output_error)?;
        }
        Ok(Self { writer, rows: 0 })
    }

    pub fn write_players(&mut self, players: &[Player]) -> Result<()> {
        for player in players {
            self.writer
                .write_record(player.csv_record())
                .map_err(output_error)?;
            self.rows += 1;
        }
        Ok(())
    }

    /// Player rows written so far (excluding the header).
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| RosterError::Output(e.to_string()))
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| RosterError::Output(e.to_string()))
    }
}

fn output_error(e: csv::Error) -> RosterError {
    RosterError::Output(e.to_string())
}
