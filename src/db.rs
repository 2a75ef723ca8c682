use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::LedgerResult;
use crate::model::user::{USER_HEADERS, User};
use crate::utils::csv_utils::write_table;

/// Where the ledger keeps its tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub users_csv: PathBuf,
    pub attendance_dir: PathBuf,
}

impl StorageLayout {
    pub fn new(users_csv: impl Into<PathBuf>, attendance_dir: impl Into<PathBuf>) -> Self {
        Self {
            users_csv: users_csv.into(),
            attendance_dir: attendance_dir.into(),
        }
    }

    /// `users.csv` and `attendance_logs/` under one data directory.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self::new(root.join("users.csv"), root.join("attendance_logs"))
    }
}

/// Create the users table (header only) and the attendance directory if missing.
pub fn init_storage(layout: &StorageLayout) -> LedgerResult<()> {
    if let Some(parent) = layout.users_csv.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if !layout.users_csv.exists() {
        info!(path = %layout.users_csv.display(), "creating users table");
        write_table::<User>(&layout.users_csv, USER_HEADERS, &[])?;
    }

    if !layout.attendance_dir.exists() {
        info!(path = %layout.attendance_dir.display(), "creating attendance directory");
        fs::create_dir_all(&layout.attendance_dir)?;
    }

    Ok(())
}
