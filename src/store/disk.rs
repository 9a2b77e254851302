use crate::core::registry::Ledger;
use crate::store::{LedgerStore, PersistenceError, decode, encode};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name of the ledger document inside the data directory.
pub const DATA_FILE_NAME: &str = "shareholders_data.json";

/// Stores the ledger as a pretty-printed JSON file.
///
/// Saves go to a sibling temp file first and are renamed over the target,
/// so a crash mid-write leaves either the old or the new document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store for [`DATA_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, path: &Path, source: io::Error) -> PersistenceError {
        debug!("Ledger I/O error on {}: {}", path.display(), source);
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".tmp-{}", std::process::id()));
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, contents: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(parent, e))?;
        }

        let tmp = self.temp_path();
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(contents.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &self.path)) {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_error(&self.path, e));
        }
        Ok(())
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Ledger, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No ledger at {}, starting empty", self.path.display());
                return Ok(Ledger::new());
            }
            Err(e) => return Err(self.io_error(&self.path, e)),
        };

        let text = String::from_utf8(bytes).map_err(|e| PersistenceError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let ledger = decode(&self.path, &text)?;
        debug!(
            "Loaded {} shareholder(s) from {}",
            ledger.len(),
            self.path.display()
        );
        Ok(ledger)
    }

    fn save(&self, ledger: &Ledger) -> Result<(), PersistenceError> {
        let contents = encode(&self.path, ledger)?;
        self.write_atomic(&contents)?;
        debug!(
            "Saved {} shareholder(s) to {}",
            ledger.len(),
            self.path.display()
        );
        Ok(())
    }
}
