//! Note files on disk.
//!
//! A [`Note`] pairs a path with the [`NoteBuffer`] holding its text.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::editor::NoteBuffer;

/// Extension appended to new note names.
pub const NOTE_EXTENSION: &str = ".md";

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("note not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("a note with this name already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("note name is empty")]
    EmptyName,
    #[error("failed to {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct Note {
    path: PathBuf,
    buffer: NoteBuffer,
}

impl Note {
    /// Read a note into a clean buffer.
    ///
    /// # Errors
    /// `NotFound` when the file is missing, `Io` for any other read failure.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, NoteError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                NoteError::NotFound(path.clone())
            } else {
                NoteError::Io {
                    action: "open",
                    path: path.clone(),
                    source,
                }
            }
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "opened note");
        Ok(Self {
            buffer: NoteBuffer::from_text(&text),
            path,
        })
    }

    /// Create `<dir>/<name>.md` starting with a level-1 heading, then open it.
    ///
    /// # Errors
    /// `EmptyName` for a blank name, `AlreadyExists` if the file is present,
    /// `Io` if it cannot be written.
    pub fn create(dir: &Path, name: &str) -> Result<Self, NoteError> {
        let title = name.trim();
        if title.is_empty() {
            return Err(NoteError::EmptyName);
        }
        let file_name = if title.ends_with(NOTE_EXTENSION) {
            title.to_string()
        } else {
            format!("{title}{NOTE_EXTENSION}")
        };
        let path = dir.join(file_name);
        let heading = title.strip_suffix(NOTE_EXTENSION).unwrap_or(title);
        let written = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| file.write_all(format!("# {heading}\n\n").as_bytes()));
        written.map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                NoteError::AlreadyExists(path.clone())
            } else {
                NoteError::Io {
                    action: "create",
                    path: path.clone(),
                    source,
                }
            }
        })?;
        tracing::info!(path = %path.display(), "created note");
        Self::open(path)
    }

    /// Write the buffer back to disk and mark it clean.
    ///
    /// # Errors
    /// `Io` if the file cannot be written.
    pub fn save(&mut self) -> Result<(), NoteError> {
        fs::write(&self.path, self.buffer.text()).map_err(|source| NoteError::Io {
            action: "save",
            path: self.path.clone(),
            source,
        })?;
        self.buffer.mark_clean();
        tracing::debug!(path = %self.path.display(), "saved note");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without extension, used as a display title.
    pub fn title(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub const fn buffer(&self) -> &NoteBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut NoteBuffer {
        &mut self.buffer
    }

    /// Hand the buffer over to an editing session.
    pub fn into_buffer(self) -> NoteBuffer {
        self.buffer
    }
}
