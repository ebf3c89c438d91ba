//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Suffix appended to the document path for the in-flight replacement.
const TEMP_SUFFIX: &str = "tmp";

/// A file-based storage backend.
///
/// This backend keeps one document in one file. Data survives process
/// restarts.
///
/// # Durability
///
/// Every `store` uses the write-then-rename pattern:
/// 1. Write the new document to `<file>.tmp`
/// 2. Sync the temporary file (when `sync_on_write` is enabled)
/// 3. Rename it over the target file
/// 4. Sync the parent directory so the rename itself is durable
///
/// A crash mid-write therefore leaves either the old or the new document,
/// never a truncated one.
///
/// The rename is the commit point. Once it has happened `store` reports
/// success; a failed directory sync after it only costs durability of
/// the rename and is logged.
///
/// # Example
///
/// ```no_run
/// use filedb_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::open(Path::new("data/list.json")).unwrap();
/// let current = backend.load().unwrap();
/// backend.store(&current).unwrap();
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    sync_on_write: bool,
}

impl FileBackend {
    /// Opens an existing document file.
    ///
    /// The file is never created here; a missing file is an error.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file does not exist, or an I/O error if
    /// the path exists but is not a regular file.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        if !metadata.is_file() {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("not a regular file: {}", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            sync_on_write: true,
        })
    }

    /// Creates a new document file holding `initial`.
    ///
    /// Used for seeding a data directory. Fails if the file already exists
    /// so that existing data is never clobbered.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` if the file is present, or an I/O error.
    pub fn create(path: &Path, initial: &[u8]) -> StorageResult<Self> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        file.write_all(initial)?;
        file.sync_all()?;

        Ok(Self {
            path: path.to_path_buf(),
            sync_on_write: true,
        })
    }

    /// Sets whether the temporary file is fsynced before the rename.
    #[must_use]
    pub fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the temporary file used during `store`.
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".");
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Syncs the parent directory so a completed rename is durable.
    #[cfg(unix)]
    fn sync_directory(&self) -> StorageResult<()> {
        let dir = File::open(self.parent_dir())?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StorageResult<()> {
        // NTFS journals metadata; directory handles cannot be fsynced
        Ok(())
    }
}

impl FileBackend {
    /// Settles the post-rename directory sync. The new document is already
    /// in place, so a failure here must not be reported as a failed store.
    fn finish_commit(&self, synced: StorageResult<()>) {
        if let Err(err) = synced {
            warn!(
                path = %self.path.display(),
                error = %err,
                "document replaced but directory sync failed"
            );
        }
    }
}

impl StorageBackend for FileBackend {
    fn load(&self) -> StorageResult<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(data) => Ok(data),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StorageError::NotFound {
                path: self.path.clone(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn store(&mut self, data: &[u8]) -> StorageResult<()> {
        let temp_path = self.temp_path();

        let written = (|| -> StorageResult<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            if self.sync_on_write {
                file.sync_all()?;
            }
            Ok(())
        })();

        if let Err(err) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(err);
        }

        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }

        if self.sync_on_write {
            self.finish_commit(self.sync_directory());
        }

        debug!(path = %self.path.display(), bytes = data.len(), "document replaced");
        Ok(())
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(fs::metadata(&self.path)?.len())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
