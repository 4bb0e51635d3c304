//! Markdown-to-HTML rendering for the live preview.
//!
//! This module handles:
//! - The substitution pipeline ([`LegacyRenderer`]) that reproduces the
//!   established preview output byte for byte
//! - A tokenizer that builds a [`NoteDocument`] node tree, rendered by
//!   [`TreeRenderer`] with closed headings and escaped text
//! - The fixed page shell both renderers wrap their output in
//!
//! Every renderer is total: any input string yields a full page.

pub mod html;
mod legacy;
mod parser;
mod types;

pub use html::{PAGE_HEAD, PAGE_TAIL, PLACEHOLDER_BODY};
pub use parser::parse;
pub use types::{Block, HeadingRef, Inline, NoteDocument, plain_text};

/// Which rendering strategy to use.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Ordered string substitutions (compatible output)
    #[default]
    Legacy,
    /// Parse to a node tree, then render
    Structured,
}

impl RenderMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Structured => "structured",
        }
    }

    pub fn parse_name(s: &str) -> Option<Self> {
        match s {
            "legacy" => Some(Self::Legacy),
            "structured" => Some(Self::Structured),
            _ => None,
        }
    }

    /// Boxed renderer for this mode.
    pub fn renderer(self) -> Box<dyn MarkupRenderer> {
        match self {
            Self::Legacy => Box::new(LegacyRenderer),
            Self::Structured => Box::new(TreeRenderer),
        }
    }
}

/// A pure, stateless transform from buffer text to a displayable page.
pub trait MarkupRenderer: Send + Sync {
    fn render(&self, source: &str) -> String;
}

/// Substitution-pipeline renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyRenderer;

impl MarkupRenderer for LegacyRenderer {
    fn render(&self, source: &str) -> String {
        legacy::render(source)
    }
}

/// Node-tree renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeRenderer;

impl MarkupRenderer for TreeRenderer {
    fn render(&self, source: &str) -> String {
        html::render_document(&parse(source))
    }
}

/// Render with the default (legacy) renderer.
///
/// ```
/// let page = notepreview::document::render("**bold**");
/// assert!(page.contains("<strong>bold</strong>"));
/// ```
pub fn render(source: &str) -> String {
    render_with(RenderMode::default(), source)
}

/// Render with an explicit mode.
pub fn render_with(mode: RenderMode, source: &str) -> String {
    match mode {
        RenderMode::Legacy => LegacyRenderer.render(source),
        RenderMode::Structured => TreeRenderer.render(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_legacy() {
        assert_eq!(RenderMode::default(), RenderMode::Legacy);
        assert_eq!(render("# T"), LegacyRenderer.render("# T"));
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in [RenderMode::Legacy, RenderMode::Structured] {
            assert_eq!(RenderMode::parse_name(mode.as_str()), Some(mode));
        }
        assert_eq!(RenderMode::parse_name("fancy"), None);
    }

    #[test]
    fn test_boxed_renderer_matches_mode() {
        let boxed = RenderMode::Structured.renderer();
        assert_eq!(
            boxed.render("# T"),
            render_with(RenderMode::Structured, "# T")
        );
    }

    #[test]
    fn test_modes_differ_on_heading_close() {
        assert!(!render_with(RenderMode::Legacy, "# T").contains("</h1>"));
        assert!(render_with(RenderMode::Structured, "# T").contains("</h1>"));
    }

    #[test]
    fn test_structured_whitespace_only_is_placeholder() {
        let page = render_with(RenderMode::Structured, "  \n\n ");
        assert!(page.contains(PLACEHOLDER_BODY));
    }
}
