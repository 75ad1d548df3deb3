//! Bootstrapping of configuration files
//!
//! Before a document is opened, its locator must name a file that exists.
//! [`ensure_file`] creates missing parent directories and an empty file and
//! reports what it created so the caller can log it.

use std::fs::{self, OpenOptions};

use crate::{Error, NormalizedPath, Result};

/// What [`ensure_file`] had to create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bootstrap {
    /// The containing directory did not exist and was created
    pub dir_created: bool,
    /// The file did not exist and was created empty
    pub file_created: bool,
}

/// Ensure the file at `path` and its containing directory exist.
///
/// # Errors
///
/// Returns `IsDirectory` if `path` names a directory, or `Io` if a directory
/// or the file cannot be created.
pub fn ensure_file(path: &NormalizedPath) -> Result<Bootstrap> {
    let native_path = path.to_native();
    if native_path.is_dir() {
        return Err(Error::IsDirectory { path: native_path });
    }

    let mut outcome = Bootstrap::default();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        outcome.dir_created = true;
    }

    match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&native_path)
    {
        Ok(_) => outcome.file_created = true,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(Error::io(&native_path, e)),
    }

    tracing::debug!(
        path = %path,
        dir_created = outcome.dir_created,
        file_created = outcome.file_created,
        "Bootstrapped configuration file"
    );
    Ok(outcome)
}

