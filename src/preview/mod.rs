//! Live preview session.
//!
//! A [`PreviewSession`] owns the note buffer, a renderer and an output
//! surface. Every edit fires a change notification; the notification
//! renders the full buffer and replaces the surface content. Renders are
//! synchronous and the latest one always wins.

mod live;
mod surface;

pub use live::{LivePreview, POLL_INTERVAL};
pub use surface::{FileSurface, MarkupSurface, StdoutSurface};

use anyhow::Result;

use crate::document::{MarkupRenderer, RenderMode};
use crate::editor::NoteBuffer;
use crate::perf;

/// A single change to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Insert text at the caret
    Insert(String),
    /// Delete the character (or line break) before the caret
    Backspace,
    /// Replace the whole buffer, e.g. after an external reload
    Replace(String),
}

pub struct PreviewSession<S> {
    buffer: NoteBuffer,
    renderer: Box<dyn MarkupRenderer>,
    surface: S,
    visible: bool,
    last_markup: Option<String>,
    renders: u64,
}

impl<S: MarkupSurface> PreviewSession<S> {
    /// Start a session with the default renderer.
    pub fn new(buffer: NoteBuffer, surface: S) -> Self {
        Self {
            buffer,
            renderer: RenderMode::default().renderer(),
            surface,
            visible: true,
            last_markup: None,
            renders: 0,
        }
    }

    /// Use the renderer for `mode`.
    #[must_use]
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.renderer = mode.renderer();
        self
    }

    /// Use a custom renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Box<dyn MarkupRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub const fn buffer(&self) -> &NoteBuffer {
        &self.buffer
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Markup from the most recent render, if any.
    pub fn last_markup(&self) -> Option<&str> {
        self.last_markup.as_deref()
    }

    /// Number of renders pushed to the surface.
    pub const fn render_count(&self) -> u64 {
        self.renders
    }

    /// `Lines: N, Characters: M` with a modified marker.
    pub fn status_line(&self) -> String {
        self.buffer.stats().to_string()
    }

    /// Apply an edit, then notify if the text changed.
    ///
    /// An empty insert or a backspace at the start of the buffer changes
    /// nothing and fires no notification.
    ///
    /// # Errors
    /// Returns an error if the surface rejects the new page.
    pub fn apply(&mut self, edit: Edit) -> Result<()> {
        let changed = match edit {
            Edit::Insert(text) => self.buffer.insert_str(&text),
            Edit::Backspace => self.buffer.delete_back(),
            Edit::Replace(text) => {
                self.buffer.replace_text(&text);
                true
            }
        };
        if changed {
            self.on_buffer_changed()?;
        }
        Ok(())
    }

    /// Change notification: re-render the whole buffer when visible.
    ///
    /// # Errors
    /// Returns an error if the surface rejects the new page.
    pub fn on_buffer_changed(&mut self) -> Result<()> {
        if !self.visible {
            tracing::trace!("preview hidden, skipping render");
            return Ok(());
        }
        self.refresh()
    }

    /// Render the current buffer and push it to the surface.
    ///
    /// # Errors
    /// Returns an error if the surface rejects the new page.
    pub fn refresh(&mut self) -> Result<()> {
        let source = self.buffer.text();
        let markup = {
            let _scope = perf::scope("preview.render");
            self.renderer.render(&source)
        };
        perf::log_event(
            "preview.render",
            format!("source={} markup={}", source.len(), markup.len()),
        );
        self.surface.set_page(&markup)?;
        self.renders += 1;
        self.last_markup = Some(markup);
        Ok(())
    }

    /// Show or hide the preview. Showing it renders immediately.
    ///
    /// # Errors
    /// Returns an error if the surface rejects the new page.
    pub fn set_visible(&mut self, visible: bool) -> Result<()> {
        let was_visible = std::mem::replace(&mut self.visible, visible);
        if visible && !was_visible {
            self.refresh()?;
        }
        Ok(())
    }

    /// # Errors
    /// Returns an error if the surface rejects the new page.
    pub fn toggle_visible(&mut self) -> Result<()> {
        self.set_visible(!self.visible)
    }

    /// Clear the modified flag after the buffer has been persisted.
    pub const fn mark_saved(&mut self) {
        self.buffer.mark_clean();
    }
}
