//! File-per-user storage: path mapping, id generation and locked file I/O.

pub mod codec;

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use fs2::FileExt;
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::config::StorageConfig;
use crate::error::{Result, UserError};

pub use codec::{decode, encode, LINE_SEPARATOR};

/// Handle to a storage directory holding `<id>.txt` files.
///
/// Cheap to clone; every [`crate::UserRecord`] keeps its own copy.
#[derive(Debug, Clone)]
pub struct UserStorage {
    config: StorageConfig,
}

impl UserStorage {
    /// Binds storage to `config`.
    ///
    /// # Errors
    /// Returns [`UserError::Config`] if the config is invalid.
    pub fn new(config: StorageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates the storage directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        let dir = self.config.storage_dir();
        fs::create_dir_all(dir).map_err(|e| UserError::io(dir, e))
    }

    /// Path of the file for `id`: `<storage_dir>/<id>.txt`.
    pub fn path_for(&self, id: u32) -> PathBuf {
        self.config.storage_dir().join(format!("{}.txt", id))
    }

    /// Whether a user file for `id` is present right now.
    pub fn exists(&self, id: u32) -> bool {
        self.path_for(id).is_file()
    }

    /// Draws a candidate id uniformly from `1..=max_id`.
    ///
    /// The id may already be taken; callers find out when creating the file.
    pub fn generate_id(&self) -> u32 {
        rand::rng().random_range(1..=self.config.max_id)
    }

    /// Writes a new user file, failing if one already exists for `id`.
    ///
    /// Contents go to a temporary file in the storage directory first, which
    /// is then linked into place without replacing an existing file. The user
    /// file therefore appears fully written, and two writers drawing the same
    /// id cannot both succeed.
    #[instrument(skip(self, contents))]
    pub fn create_new(&self, id: u32, contents: &str) -> Result<()> {
        let dir = self.config.storage_dir();
        let path = self.path_for(id);

        let staged = tempfile::Builder::new()
            .prefix(".user-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| UserError::io(dir, e))?;
        write_locked(staged.as_file(), contents).map_err(|e| UserError::io(staged.path(), e))?;

        // A failed persist drops the staged file, removing it.
        match staged.persist_noclobber(&path) {
            Ok(_) => {
                debug!(path = %path.display(), "Created user file");
                Ok(())
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                warn!("Id already taken");
                Err(UserError::Conflict(id))
            }
            Err(e) => Err(UserError::io(path, e.error)),
        }
    }

    /// Overwrites the user file for `id` under an exclusive lock.
    #[instrument(skip(self, contents))]
    pub fn write(&self, id: u32, contents: &str) -> Result<()> {
        let path = self.path_for(id);
        // Truncate only once the lock is held.
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| UserError::io(&path, e))?;

        write_locked(&file, contents).map_err(|e| UserError::io(&path, e))?;
        debug!(path = %path.display(), "Wrote user file");
        Ok(())
    }

    /// Reads the user file for `id` under a shared lock.
    ///
    /// # Errors
    /// Returns [`UserError::NotFound`] if there is no file for `id`.
    #[instrument(skip(self))]
    pub fn read(&self, id: u32) -> Result<String> {
        let path = self.path_for(id);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("User file not found");
                return Err(UserError::NotFound(id));
            }
            Err(e) => return Err(UserError::io(path, e)),
        };

        let mut contents = String::new();
        FileExt::lock_shared(&file)
            .and_then(|_| file.read_to_string(&mut contents))
            .and_then(|_| FileExt::unlock(&file))
            .map_err(|e| UserError::io(&path, e))?;

        Ok(contents)
    }
}

fn write_locked(file: &File, contents: &str) -> std::io::Result<()> {
    FileExt::lock_exclusive(file)?;
    let mut writer = file;
    let result = file
        .set_len(0)
        .and_then(|_| writer.write_all(contents.as_bytes()))
        .and_then(|_| writer.flush());
    // The lock is released on close anyway; report the first failure.
    let unlocked = FileExt::unlock(file);
    result.and(unlocked)
}
