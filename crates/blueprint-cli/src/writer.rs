//! Migration file writer.
//!
//! Owns the Laravel file-naming convention (timestamp prefix plus the
//! snake-cased migration name) and the write-to-disk step. The writer never
//! overwrites: an existing file with the same name is an error.

use std::fs;
use std::path::PathBuf;

use blueprint_core::{render_migration, snake_case, MigrationIntent};
use chrono::Local;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// Writes rendered migrations into an output directory.
#[derive(Debug, Clone)]
pub struct MigrationWriter {
    out_dir: PathBuf,
}

impl MigrationWriter {
    /// Creates a writer targeting `out_dir`. The directory is created on
    /// first write if it does not exist.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The Laravel convention file name for this intent, stamped with the
    /// current local time: `Y_m_d_His_<snake_case(name)>.php`.
    #[must_use]
    pub fn file_name(intent: &MigrationIntent) -> String {
        let timestamp = Local::now().format("%Y_%m_%d_%H%M%S");
        format!("{timestamp}_{}.php", snake_case(&intent.migration_name))
    }

    /// Renders the migration and writes it under the output directory.
    ///
    /// Returns the path of the written file.
    ///
    /// # Errors
    ///
    /// Fails if the intent does not validate, if the target file already
    /// exists, or on any IO error. No file is written on a generation
    /// failure.
    pub fn write(&self, intent: &MigrationIntent) -> Result<PathBuf> {
        self.write_named(intent, &Self::file_name(intent))
    }

    fn write_named(&self, intent: &MigrationIntent, file_name: &str) -> Result<PathBuf> {
        let code = render_migration(intent)?;
        debug!(bytes = code.len(), "Rendered migration");

        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(file_name);
        if path.exists() {
            return Err(CliError::MigrationExists(path));
        }
        fs::write(&path, &code)?;
        info!("Created migration: {}", path.display());
        Ok(path)
    }
}
