//! JSON persistence helpers
//!
//! Writes go through a [`WriteBatch`]. Every file in the batch is first
//! written to a synced `<name>.tmp` sibling. Only when all of them are staged
//! are they renamed over their targets, and a rename failure puts back the
//! targets already replaced. A single-file write is a batch of one.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::error::MoneybagsError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, MoneybagsError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from a file that must exist (a saved parse result, a mapping)
pub fn read_json_required<T, P>(path: P) -> Result<T, MoneybagsError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(MoneybagsError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T, MoneybagsError> {
    let file = File::open(path).map_err(|e| {
        MoneybagsError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        MoneybagsError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write one JSON file so that it is either fully replaced or left untouched
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), MoneybagsError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let mut batch = WriteBatch::new();
    batch.stage(path, data)?;
    batch.commit()
}

/// `budget.json` + `.tmp` -> `budget.json.tmp`
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

struct StagedFile {
    target: PathBuf,
    temp: PathBuf,
}

/// A target that has been swapped for its staged content
struct ReplacedFile {
    target: PathBuf,
    /// Previous content, moved aside; None if the target did not exist
    backup: Option<PathBuf>,
}

impl ReplacedFile {
    fn restore(&self) {
        let result = match &self.backup {
            Some(backup) => fs::rename(backup, &self.target),
            None => fs::remove_file(&self.target),
        };
        if let Err(e) = result {
            error!(path = %self.target.display(), error = %e, "Failed to restore file");
        }
    }

    fn discard_backup(&self) {
        if let Some(backup) = &self.backup {
            if let Err(e) = fs::remove_file(backup) {
                debug!(path = %backup.display(), error = %e, "Could not remove backup");
            }
        }
    }
}

/// A set of JSON files committed together
///
/// Dropping an uncommitted batch removes its temp files and leaves every
/// target as it was.
#[derive(Default)]
pub struct WriteBatch {
    staged: Vec<StagedFile>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `data` into a synced temp file next to `path`
    pub fn stage<T, P>(&mut self, path: P, data: &T) -> Result<(), MoneybagsError>
    where
        T: Serialize,
        P: AsRef<Path>,
    {
        let target = path.as_ref().to_path_buf();

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                MoneybagsError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp = sibling(&target, ".tmp");
        let file = File::create(&temp)
            .map_err(|e| MoneybagsError::Storage(format!("Failed to create temp file: {}", e)))?;

        if let Err(e) = write_synced(file, data) {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }

        self.staged.push(StagedFile { target, temp });
        Ok(())
    }

    /// Rename every staged file over its target
    ///
    /// On failure, targets replaced earlier in this commit get their previous
    /// content back and the remaining temp files are removed.
    pub fn commit(mut self) -> Result<(), MoneybagsError> {
        let staged = std::mem::take(&mut self.staged);
        let mut replaced = Vec::with_capacity(staged.len());

        for (i, file) in staged.iter().enumerate() {
            match replace(file) {
                Ok(done) => replaced.push(done),
                Err(e) => {
                    for done in replaced.iter().rev() {
                        done.restore();
                    }
                    remove_temps(&staged[i..]);
                    return Err(e);
                }
            }
        }

        for done in &replaced {
            done.discard_backup();
        }
        debug!(files = replaced.len(), "Committed write batch");
        Ok(())
    }
}

impl Drop for WriteBatch {
    fn drop(&mut self) {
        remove_temps(&self.staged);
    }
}

fn write_synced<T: Serialize>(file: File, data: &T) -> Result<(), MoneybagsError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| MoneybagsError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| MoneybagsError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| MoneybagsError::Storage(format!("Failed to sync data: {}", e)))
}

fn replace(file: &StagedFile) -> Result<ReplacedFile, MoneybagsError> {
    let backup = if file.target.exists() {
        let backup = sibling(&file.target, ".bak");
        fs::rename(&file.target, &backup).map_err(|e| {
            MoneybagsError::Storage(format!(
                "Failed to move aside {}: {}",
                file.target.display(),
                e
            ))
        })?;
        Some(backup)
    } else {
        None
    };

    if let Err(e) = fs::rename(&file.temp, &file.target) {
        if let Some(backup) = &backup {
            let _ = fs::rename(backup, &file.target);
        }
        return Err(MoneybagsError::Storage(format!(
            "Failed to rename temp file for {}: {}",
            file.target.display(),
            e
        )));
    }

    Ok(ReplacedFile {
        target: file.target.clone(),
        backup,
    })
}

fn remove_temps(files: &[StagedFile]) {
    for file in files {
        let _ = fs::remove_file(&file.temp);
    }
}
