//! Writes emission units into an output directory.

use std::io::{ErrorKind, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::emit::EmissionUnit;
use crate::error::{StronglyError, StronglyResult};

/// Result of writing one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum WriteOutcome {
    /// The file was created or its content replaced.
    Written,
    /// The file already held identical content.
    Unchanged,
}

/// Writes each unit to `<root>/<hint_name>`.
#[derive(Debug)]
pub struct DirectorySink {
    root: Utf8PathBuf,
    dir: Dir,
}

impl DirectorySink {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`StronglyError::Io`] when the directory cannot be created or
    /// opened.
    pub fn open(root: impl Into<Utf8PathBuf>) -> StronglyResult<Self> {
        let root = root.into();
        let dir = ensure_dir(&root)?;
        Ok(Self { root, dir })
    }

    /// Output directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `unit`, skipping the write when the file content is identical.
    ///
    /// # Errors
    ///
    /// Returns [`StronglyError::Io`] when the file cannot be read or written.
    pub fn write(&self, unit: &EmissionUnit) -> StronglyResult<WriteOutcome> {
        let path = self.root.join(&unit.hint_name);
        match self.dir.read_to_string(&unit.hint_name) {
            Ok(existing) if existing == unit.source() => {
                tracing::debug!(%path, "generated file unchanged");
                return Ok(WriteOutcome::Unchanged);
            }
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(io_error(&path, err)),
        }

        let mut file = self
            .dir
            .open_with(
                &unit.hint_name,
                OpenOptions::new().write(true).create(true).truncate(true),
            )
            .map_err(|err| io_error(&path, err))?;
        file.write_all(unit.source().as_bytes())
            .map_err(|err| io_error(&path, err))?;
        tracing::debug!(%path, fingerprint = %unit.fingerprint(), "wrote generated file");
        Ok(WriteOutcome::Written)
    }

    /// Write every unit in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first I/O failure.
    pub fn write_all<'u>(
        &self,
        units: impl IntoIterator<Item = &'u EmissionUnit>,
    ) -> StronglyResult<Vec<WriteOutcome>> {
        units.into_iter().map(|unit| self.write(unit)).collect()
    }
}

fn io_error(path: &Utf8Path, source: std::io::Error) -> StronglyError {
    StronglyError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn ensure_dir(path: &Utf8Path) -> StronglyResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|io_err| io_error(path, io_err))?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| io_error(path, io_err))
        }
        Err(open_err) => Err(io_error(path, open_err)),
    }
}
