//! In-memory note buffer.
//!
//! Provides a rope-backed text buffer with a caret and the modified flag
//! the preview session reports in its status line.

mod buffer;

pub use buffer::{BufferStats, NoteBuffer};
