//! Core document types.

use serde::Serialize;

/// A parsed note: an ordered list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDocument {
    blocks: Vec<Block>,
}

/// Block-level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// `#`, `##` or `###` heading line
    Heading { level: u8, content: Vec<Inline> },
    /// Consecutive non-heading lines, joined by line breaks
    Paragraph { content: Vec<Inline> },
}

/// Inline node inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    /// Raw code span contents, never parsed further
    Code(String),
    /// `[[Note Name]]` cross-note link
    WikiLink(String),
    LineBreak,
}

/// Reference to a heading, for building an outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRef {
    /// Heading level (1-3)
    pub level: u8,
    /// Heading text (plain, no formatting)
    pub text: String,
    /// Index of the heading block
    pub block: usize,
}

impl NoteDocument {
    /// Create an empty document.
    pub const fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    pub(crate) const fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All headings in document order.
    pub fn headings(&self) -> Vec<HeadingRef> {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(block, b)| match b {
                Block::Heading { level, content } => Some(HeadingRef {
                    level: *level,
                    text: plain_text(content),
                    block,
                }),
                Block::Paragraph { .. } => None,
            })
            .collect()
    }

    /// Names of every `[[wiki link]]`, in document order, duplicates kept.
    pub fn links(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for block in &self.blocks {
            let content = match block {
                Block::Heading { content, .. } | Block::Paragraph { content } => content,
            };
            collect_links(content, &mut out);
        }
        out
    }
}

fn collect_links<'a>(inlines: &'a [Inline], out: &mut Vec<&'a str>) {
    for inline in inlines {
        match inline {
            Inline::WikiLink(name) => out.push(name.as_str()),
            Inline::Strong(children) | Inline::Emphasis(children) => collect_links(children, out),
            Inline::Text(_) | Inline::Code(_) | Inline::LineBreak => {}
        }
    }
}

/// Flatten inline content to its visible text.
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    push_plain(inlines, &mut text);
    text
}

fn push_plain(inlines: &[Inline], text: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Code(s) | Inline::WikiLink(s) => text.push_str(s),
            Inline::Strong(children) | Inline::Emphasis(children) => push_plain(children, text),
            Inline::LineBreak => text.push(' '),
        }
    }
}
