//! Caller side of the external background-removal collaborator.
//!
//! The model itself is an opaque operation taking image bytes and returning
//! image bytes. This module owns everything around that call: the lazy
//! `.bak` backup, the in-place overwrite and the per-file reporting that
//! keeps a batch running past individual failures.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Error;
use crate::Result;

pub const BACKUP_FILE_SUFFIX: &str = ".bak";

const REMOVER_PROGRAM_NAME: &str = "rembg";

pub trait BackgroundRemover {
    fn remove(&self, input: &[u8]) -> Result<Vec<u8>>;
}

/// Pipes image bytes through the `rembg` executable's stdin/stdout.
pub struct CommandBackgroundRemover {
    program: PathBuf,
}

impl CommandBackgroundRemover {
    pub fn locate() -> Result<Self> {
        let program =
            which::which(REMOVER_PROGRAM_NAME).map_err(Error::BackgroundRemoverNotFound)?;
        Ok(CommandBackgroundRemover { program })
    }
}

impl BackgroundRemover for CommandBackgroundRemover {
    fn remove(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .arg("i")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| Error::BackgroundRemovalFailed(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::BackgroundRemovalFailed("stdin not captured".to_owned()))?;
        stdin
            .write_all(input)
            .map_err(|e| Error::BackgroundRemovalFailed(e.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .map_err(|e| Error::BackgroundRemovalFailed(e.to_string()))?;
        if !output.status.success() {
            return Err(Error::BackgroundRemovalFailed(format!(
                "'{}' exited with {}",
                self.program.display(),
                output.status
            )));
        }
        Ok(output.stdout)
    }
}

pub fn backup_path_for(image_path: &Path) -> PathBuf {
    let mut backup_name = image_path.as_os_str().to_owned();
    backup_name.push(BACKUP_FILE_SUFFIX);
    PathBuf::from(backup_name)
}

/// Backups are created lazily: an existing `.bak` keeps the first "before"
/// state across repeated runs and is never overwritten.
fn create_backup(image_path: &Path) -> Result<()> {
    let backup_path = backup_path_for(image_path);
    if backup_path.exists() {
        return Ok(());
    }
    fs::copy(image_path, &backup_path)
        .map_err(|e| Error::UnableToCreateBackupFile(backup_path.display().to_string(), e))?;
    log::info!("Backup created at {}", backup_path.display());
    Ok(())
}

/// Backs the file up, pipes its bytes through the remover and overwrites the
/// original with the result.
pub fn strip_background(remover: &impl BackgroundRemover, image_path: &Path) -> Result<()> {
    log::info!("Processing {}...", image_path.display());
    if !image_path.exists() {
        return Err(Error::InputFileNotFound(image_path.display().to_string()));
    }
    create_backup(image_path)?;
    let input_data = fs::read(image_path)
        .map_err(|e| Error::UnableToReadInputFile(image_path.display().to_string(), e))?;
    let output_data = remover.remove(&input_data)?;
    fs::write(image_path, output_data).map_err(|e| {
        Error::UnableToOpenOutputFileForWriting(image_path.display().to_string(), e)
    })?;
    log::info!("Successfully processed {}", image_path.display());
    Ok(())
}

/// Processes each file in turn; a failure is logged and the batch continues.
pub fn strip_backgrounds(remover: &impl BackgroundRemover, image_paths: &[PathBuf]) {
    for image_path in image_paths {
        if let Err(error) = strip_background(remover, image_path) {
            log::error!("Failed to process {}: {}", image_path.display(), error);
        }
    }
}
