//! Advisory directory lock guarding store mutations.
//!
//! The lock is a sibling directory named `<store file>.lockdir`. Creating a
//! directory is atomic and fails when it already exists, which gives
//! create-exclusive semantics on every platform. Acquisition never waits.

use super::StoreError;
use camino::Utf8PathBuf;
use cap_std::fs_utf8::Dir;
use std::io;

const INFO_FILE: &str = "info.txt";

/// RAII guard for the store lock directory. Dropping the guard releases it.
#[derive(Debug)]
pub struct StoreLock {
    parent: Dir,
    name: String,
    path: Utf8PathBuf,
    released: bool,
}

impl StoreLock {
    /// Creates the lock directory inside `parent`.
    ///
    /// `info` is written to a debug file inside the lock directory on a
    /// best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Locked`] when the directory already exists and
    /// [`StoreError::Io`] for any other filesystem failure.
    pub fn acquire(
        parent: Dir,
        name: String,
        path: Utf8PathBuf,
        info: &str,
    ) -> Result<Self, StoreError> {
        match parent.create_dir(&name) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::Locked(path));
            }
            Err(err) => return Err(StoreError::Io(err)),
        }

        let written = parent
            .open_dir(&name)
            .and_then(|lock_dir| lock_dir.write(INFO_FILE, info));
        if let Err(err) = written {
            tracing::warn!(lock = %path, error = %err, "failed to write lock info file");
        }

        tracing::debug!(lock = %path, "acquired store lock");
        Ok(Self {
            parent,
            name,
            path,
            released: false,
        })
    }

    /// Returns the lock directory path.
    #[must_use]
    pub const fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    /// Removes the lock directory.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the directory cannot be removed.
    pub fn release(mut self) -> Result<(), StoreError> {
        self.released = true;
        self.parent.remove_dir_all(&self.name)?;
        tracing::debug!(lock = %self.path, "released store lock");
        Ok(())
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self.parent.remove_dir_all(&self.name) {
            tracing::warn!(lock = %self.path, error = %err, "failed to release store lock");
        }
    }
}
