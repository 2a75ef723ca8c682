use std::fs;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};

/// ===============================
/// Read a whole table
/// ===============================
pub fn read_table<T: DeserializeOwned>(path: &Path, headers: &[&str]) -> LedgerResult<Vec<T>> {
    let mut reader = ReaderBuilder::new().trim(csv::Trim::None).from_path(path)?;

    let found = reader.headers()?;
    if found.iter().ne(headers.iter().copied()) {
        return Err(LedgerError::PersistenceFailure(format!(
            "{}: unexpected header `{}`",
            path.display(),
            found.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut rows = Vec::new();
    for (line, row) in reader.deserialize::<T>().enumerate() {
        let row = row.map_err(|e| {
            LedgerError::PersistenceFailure(format!(
                "{}: malformed row {}: {}",
                path.display(),
                line + 1,
                e
            ))
        })?;
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "table loaded");
    Ok(rows)
}

/// ===============================
/// Rewrite a whole table
/// ===============================
///
/// Rows go to a sibling `.tmp` file which is then renamed over `path`.
pub fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> LedgerResult<()> {
    let tmp = tmp_path(path);

    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .from_path(&tmp)?;

        writer.write_record(headers)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
    }

    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })?;

    debug!(path = %path.display(), rows = rows.len(), "table written");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
