//! Whole-file JSON store with atomic replacement.

use super::{
    StoreError, StoreLock,
    models::{SCHEMA_VERSION, StoreDocument},
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use cap_std::{ambient_authority, fs_utf8::Dir};
use mockable::Clock;
use std::io::{self, Write};
use std::sync::Arc;

/// Single-file JSON store.
///
/// The file is never held open between operations; every call reloads or
/// rewrites the whole document. Saves write a sibling temporary file, flush
/// it to disk, and rename it over the real path, so readers observe either
/// the previous or the next complete document.
#[derive(Debug)]
pub struct JsonStore<C> {
    path: Utf8PathBuf,
    parent: Utf8PathBuf,
    file_name: String,
    clock: Arc<C>,
}

impl<C> JsonStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPath`] when `path` has no file name.
    pub fn new(path: impl Into<Utf8PathBuf>, clock: Arc<C>) -> Result<Self, StoreError> {
        let path = path.into();
        let Some(file_name) = path.file_name().map(str::to_owned) else {
            return Err(StoreError::InvalidPath(path));
        };
        let parent = match path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir.to_owned(),
            _ => Utf8PathBuf::from("."),
        };
        Ok(Self {
            path,
            parent,
            file_name,
            clock,
        })
    }

    /// Returns the store file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Returns the current time from the store clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Returns the path of the temporary file used during saves.
    #[must_use]
    pub fn temp_path(&self) -> Utf8PathBuf {
        self.parent.join(self.temp_name())
    }

    /// Returns the path of the advisory lock directory.
    #[must_use]
    pub fn lock_path(&self) -> Utf8PathBuf {
        self.parent.join(self.lock_name())
    }

    /// Loads the document.
    ///
    /// A missing file yields a fresh empty document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] when the content does not parse or the
    /// schema version differs, and [`StoreError::Io`] on read failures.
    pub fn load(&self) -> Result<StoreDocument, StoreError> {
        let dir = match Dir::open_ambient_dir(&self.parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(self.empty()),
            Err(err) => return Err(StoreError::Io(err)),
        };
        let contents = match dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(self.empty()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let document: StoreDocument =
            serde_json::from_str(&contents).map_err(|err| self.corrupt(err.to_string()))?;
        if document.version != SCHEMA_VERSION {
            return Err(self.corrupt(format!(
                "schema version {} does not match expected {SCHEMA_VERSION}",
                document.version
            )));
        }

        tracing::debug!(path = %self.path, rows = document.todos.len(), "loaded store");
        Ok(document)
    }

    /// Atomically replaces the store file with `document`.
    ///
    /// The version and save time are stamped before writing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when writing, flushing, or renaming fails.
    /// The previous file is left intact in that case.
    pub fn save(&self, mut document: StoreDocument) -> Result<(), StoreError> {
        document.version = SCHEMA_VERSION;
        document.saved_at = self.clock.utc();
        let bytes = serde_json::to_vec_pretty(&document).map_err(StoreError::Serialize)?;

        let dir = self.open_parent()?;
        let temp_name = self.temp_name();
        {
            let mut file = dir.create(&temp_name)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        dir.rename(&temp_name, &dir, &self.file_name)?;
        self.sync_parent(&dir);

        tracing::debug!(path = %self.path, rows = document.todos.len(), "saved store");
        Ok(())
    }

    /// Acquires the advisory lock beside the store file without waiting.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Locked`] when another holder owns the lock.
    pub fn lock(&self) -> Result<StoreLock, StoreError> {
        let info = format!(
            "pid={}\nat={}\n",
            std::process::id(),
            self.clock.utc().to_rfc3339()
        );
        StoreLock::acquire(self.open_parent()?, self.lock_name(), self.lock_path(), &info)
    }

    /// Runs a load, mutate, save cycle under the store lock.
    ///
    /// The document is only saved when `mutate` succeeds. The lock is
    /// released on every path. Once the save has landed the call succeeds;
    /// a failure to remove the lock directory afterwards is only logged.
    ///
    /// # Errors
    ///
    /// Propagates lock, load, and save failures as well as the error
    /// returned by `mutate`.
    pub fn update<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T, E>,
        E: From<StoreError>,
    {
        let lock = self.lock()?;
        let mut document = self.load()?;
        let outcome = mutate(&mut document)?;
        self.save(document)?;
        if let Err(err) = lock.release() {
            tracing::warn!(
                lock = %self.lock_path(),
                error = %err,
                "failed to release store lock after save"
            );
        }
        Ok(outcome)
    }

    fn open_parent(&self) -> Result<Dir, StoreError> {
        Ok(Dir::open_ambient_dir(&self.parent, ambient_authority())?)
    }

    /// Flushes the directory entry for the rename. Failure is logged only.
    fn sync_parent(&self, dir: &Dir) {
        let synced = dir.open(".").and_then(|handle| handle.sync_all());
        if let Err(err) = synced {
            tracing::warn!(path = %self.parent, error = %err, "failed to sync store directory");
        }
    }

    fn empty(&self) -> StoreDocument {
        StoreDocument::empty(self.clock.utc())
    }

    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            reason,
        }
    }

    fn temp_name(&self) -> String {
        format!("{}.tmp", self.file_name)
    }

    fn lock_name(&self) -> String {
        format!("{}.lockdir", self.file_name)
    }
}
