#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    clippy::module_name_repetitions
)]

//! # Notepreview
//!
//! Live markdown preview for plain-text notes.
//!
//! Notepreview turns the text of a note into a complete HTML page on every
//! edit:
//! - `#`/`##`/`###` headings, `**strong**`, `*emphasis*`, `` `code` ``
//! - `[[Note Name]]` cross-note links
//! - Paragraphs on blank lines, line breaks on single newlines
//!
//! ## Architecture
//!
//! - A [`editor::NoteBuffer`] holds the text being edited
//! - A [`preview::PreviewSession`] receives every change, renders the whole
//!   buffer and pushes the page to a [`preview::MarkupSurface`]
//! - Rendering is a pure function of the buffer text
//!
//! ## Modules
//!
//! - [`document`]: Markdown parsing and HTML rendering
//! - [`editor`]: Note buffer
//! - [`preview`]: Change-driven rendering and output surfaces
//! - [`note`]: Reading, saving and creating note files
//! - [`watcher`]: File watching
//! - [`config`]: Saved default flags
//! - [`perf`]: Timing and debug event log

pub mod config;
pub mod document;
pub mod editor;
pub mod note;
pub mod perf;
pub mod preview;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{MarkupRenderer, NoteDocument, RenderMode, render, render_with};
    pub use crate::editor::NoteBuffer;
    pub use crate::note::Note;
    pub use crate::preview::{Edit, MarkupSurface, PreviewSession};
}
