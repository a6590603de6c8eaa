use crate::errors::OutputError;
use std::fs;
use std::path::{Path, PathBuf};

fn write_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Write {
        path: path.display().to_string(),
        source,
    }
}

/// A directory artifact staged next to its destination.
///
/// Files are written into `<dest>.staging`; [`commit`](StagedDir::commit)
/// removes the previous destination and renames the staging directory into
/// place, so readers only ever see a complete output set.
#[derive(Debug)]
pub struct StagedDir {
    staging: PathBuf,
    dest: PathBuf,
}

impl StagedDir {
    pub fn create(dest: &Path) -> Result<Self, OutputError> {
        let staging = staging_path(dest);
        if staging.exists() {
            fs::remove_dir_all(&staging).map_err(|e| write_error(&staging, e))?;
        }
        fs::create_dir_all(&staging).map_err(|e| write_error(&staging, e))?;
        Ok(Self {
            staging,
            dest: dest.to_path_buf(),
        })
    }

    pub fn write_file(&self, name: &str, contents: &str) -> Result<(), OutputError> {
        let path = self.staging.join(name);
        fs::write(&path, contents).map_err(|e| write_error(&path, e))
    }

    pub fn commit(self) -> Result<(), OutputError> {
        if self.dest.exists() {
            fs::remove_dir_all(&self.dest).map_err(|e| write_error(&self.dest, e))?;
        }
        if let Some(parent) = self.dest.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }
        fs::rename(&self.staging, &self.dest).map_err(|e| write_error(&self.dest, e))
    }

    /// Drop the staged files, keeping the previous destination as-is.
    pub fn discard(self) {
        let _ = fs::remove_dir_all(&self.staging);
    }
}

/// A single-file artifact staged next to its destination.
#[derive(Debug)]
pub struct StagedFile {
    staging: PathBuf,
    dest: PathBuf,
}

impl StagedFile {
    pub fn write(dest: &Path, contents: &str) -> Result<Self, OutputError> {
        let staging = staging_path(dest);
        if let Some(parent) = staging.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }
        fs::write(&staging, contents).map_err(|e| write_error(&staging, e))?;
        Ok(Self {
            staging,
            dest: dest.to_path_buf(),
        })
    }

    pub fn commit(self) -> Result<(), OutputError> {
        fs::rename(&self.staging, &self.dest).map_err(|e| write_error(&self.dest, e))
    }

    pub fn discard(self) {
        let _ = fs::remove_file(&self.staging);
    }
}

fn staging_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    name.push_str(".staging");
    dest.with_file_name(name)
}
