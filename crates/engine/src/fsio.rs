//! Manifest file access

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use xcpatch_core::{Error, Limits, Result};

/// Read the manifest as UTF-8, enforcing the size limit
pub fn read_manifest(path: &Path, limits: &Limits) -> Result<String> {
    let len = fs::metadata(path).map_err(|e| Error::file(path, e))?.len();
    limits.validate_manifest_size(usize::try_from(len).unwrap_or(usize::MAX))?;
    let bytes = fs::read(path).map_err(|e| Error::file(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        Error::file(
            path,
            io::Error::new(io::ErrorKind::InvalidData, format!("not valid UTF-8: {}", e)),
        )
    })
}

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("project.pbxproj"));
    name.push(suffix);
    path.with_file_name(name)
}

/// Where [`write_backup`] puts the copy of `path`
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

/// Save the original text next to the manifest
///
/// A backup left by an earlier run is replaced, with a warning.
pub fn write_backup(path: &Path, original: &str) -> Result<PathBuf> {
    let backup = backup_path(path);
    if backup.exists() {
        tracing::warn!(backup = %backup.display(), "replacing backup from an earlier run");
    }
    fs::write(&backup, original).map_err(|e| Error::file(&backup, e))?;
    tracing::info!(backup = %backup.display(), "wrote backup");
    Ok(backup)
}

/// Replace the file atomically (temp + fsync + rename)
pub fn write_atomic(path: &Path, text: &str) -> Result<()> {
    let tmp_path = sibling(path, ".tmp");
    let result = (|| -> io::Result<()> {
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::file(path, e));
    }
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote manifest");
    Ok(())
}
