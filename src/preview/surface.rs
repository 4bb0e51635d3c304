//! Output surfaces that display rendered markup.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Something that can display a full page of markup.
///
/// Each call replaces whatever was shown before.
pub trait MarkupSurface {
    /// # Errors
    /// Returns an error if the page cannot be displayed.
    fn set_page(&mut self, markup: &str) -> Result<()>;
}

/// Writes each page to a file, replacing it atomically.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl MarkupSurface for FileSurface {
    fn set_page(&mut self, markup: &str) -> Result<()> {
        // Readers of `path` never observe a partially written page.
        let staging = self.staging_path();
        fs::write(&staging, markup)
            .with_context(|| format!("Failed to write {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))
    }
}

/// Prints each page to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSurface;

impl MarkupSurface for StdoutSurface {
    fn set_page(&mut self, markup: &str) -> Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{markup}").context("Failed to write to stdout")?;
        out.flush().context("Failed to flush stdout")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_surface_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preview.html");
        let mut surface = FileSurface::new(&path);
        surface.set_page("<html>one</html>").unwrap();
        surface.set_page("<html>two</html>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html>two</html>");
        assert!(!dir.path().join("preview.html.tmp").exists());
    }

    #[test]
    fn test_file_surface_reports_missing_dir() {
        let dir = tempdir().unwrap();
        let mut surface = FileSurface::new(dir.path().join("nope").join("out.html"));
        let err = surface.set_page("x").unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
