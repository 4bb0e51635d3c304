//! Re-render a note whenever its file changes on disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use super::{Edit, MarkupSurface, PreviewSession};
use crate::watcher::NoteWatcher;

/// How often [`LivePreview::run`] polls the watcher.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A preview session driven by file-change notifications.
pub struct LivePreview<S> {
    session: PreviewSession<S>,
    path: PathBuf,
    watcher: Option<NoteWatcher>,
}

impl<S: MarkupSurface> LivePreview<S> {
    /// Wrap `session` for the note at `path`. No watch is started yet.
    pub fn new(session: PreviewSession<S>, path: impl Into<PathBuf>) -> Self {
        Self {
            session,
            path: path.into(),
            watcher: None,
        }
    }

    /// Start watching the note file.
    ///
    /// # Errors
    /// Returns an error if the watch cannot be registered.
    pub fn start_watch(&mut self, debounce: Duration) -> Result<()> {
        let watcher = NoteWatcher::new(&self.path, debounce)
            .with_context(|| format!("Failed to watch {}", self.path.display()))?;
        self.watcher = Some(watcher);
        Ok(())
    }

    pub const fn session(&self) -> &PreviewSession<S> {
        &self.session
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the current buffer unconditionally.
    ///
    /// # Errors
    /// Returns an error if the surface fails.
    pub fn refresh(&mut self) -> Result<()> {
        self.session.refresh()
    }

    /// Read the note from disk and re-render if its text changed.
    ///
    /// Returns `true` when a render happened.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the surface fails.
    pub fn reload_from_disk(&mut self) -> Result<bool> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content == self.session.buffer().text() {
            tracing::trace!("note unchanged on disk");
            return Ok(false);
        }
        self.session.apply(Edit::Replace(content))?;
        // The buffer now mirrors the file exactly.
        self.session.mark_saved();
        tracing::info!(status = %self.session.status_line(), "re-rendered");
        Ok(true)
    }

    /// Check the watcher once and reload if a change is ready.
    ///
    /// # Errors
    /// Returns an error if the note cannot be read or the surface fails.
    /// A note missing from disk is skipped until it reappears.
    pub fn poll(&mut self) -> Result<bool> {
        let ready = self
            .watcher
            .as_mut()
            .is_some_and(NoteWatcher::take_change_ready);
        if !ready {
            return Ok(false);
        }
        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "note disappeared, keeping last render");
            return Ok(false);
        }
        self.reload_from_disk()
    }

    /// Poll forever.
    ///
    /// # Errors
    /// Returns the first surface or read error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.poll()?;
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::NoteBuffer;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recorder {
        pages: Vec<String>,
    }

    impl MarkupSurface for Recorder {
        fn set_page(&mut self, markup: &str) -> Result<()> {
            self.pages.push(markup.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_reload_renders_only_on_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("n.md");
        std::fs::write(&path, "one").unwrap();
        let session = PreviewSession::new(NoteBuffer::from_text("one"), Recorder::default());
        let mut live = LivePreview::new(session, &path);

        assert!(!live.reload_from_disk().unwrap());
        std::fs::write(&path, "**two**").unwrap();
        assert!(live.reload_from_disk().unwrap());

        let pages = &live.session().surface().pages;
        assert_eq!(pages.len(), 1);
        assert!(pages[0].contains("<strong>two</strong>"));
        assert!(!live.session().buffer().is_dirty());
    }

    #[test]
    fn test_poll_without_watch_is_idle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("n.md");
        std::fs::write(&path, "x").unwrap();
        let session = PreviewSession::new(NoteBuffer::empty(), Recorder::default());
        let mut live = LivePreview::new(session, &path);
        assert!(!live.poll().unwrap());
    }

    #[test]
    fn test_reload_missing_file_errors() {
        let dir = tempdir().unwrap();
        let session = PreviewSession::new(NoteBuffer::empty(), Recorder::default());
        let mut live = LivePreview::new(session, dir.path().join("gone.md"));
        assert!(live.reload_from_disk().is_err());
    }
}
