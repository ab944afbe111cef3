//! CSV writers for session data

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{Result, adapters::AgentSummary, error::Error, roulette::SpinRecord};

/// Writes serde records as CSV with a header row
pub struct CsvExporter;

impl CsvExporter {
    /// Write one row per spin: step, number, bets, reward, balance.
    pub fn write_spins<P: AsRef<Path>>(path: P, spins: &[SpinRecord]) -> Result<usize> {
        Self::write_file(path.as_ref(), spins)
    }

    /// Write one row per agent summary.
    pub fn write_summaries<P: AsRef<Path>>(path: P, summaries: &[AgentSummary]) -> Result<usize> {
        Self::write_file(path.as_ref(), summaries)
    }

    /// Serialize `records` to any writer, returning the number of rows.
    pub fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<usize> {
        let mut csv = csv::Writer::from_writer(writer);
        for record in records {
            csv.serialize(record)?;
        }
        csv.flush()?;
        Ok(records.len())
    }

    fn write_file<T: Serialize>(path: &Path, records: &[T]) -> Result<usize> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create csv {path:?}"),
            source,
        })?;
        let rows = Self::write_records(file, records)?;
        tracing::info!(?path, rows, "exported csv");
        Ok(rows)
    }
}

/// Read a spin log written by [`CsvExporter::write_spins`].
pub fn read_spins<P: AsRef<Path>>(path: P) -> Result<Vec<SpinRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let spins = reader.deserialize().collect::<std::result::Result<_, _>>()?;
    Ok(spins)
}
