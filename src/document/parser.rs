//! Line-oriented markdown tokenizer for the structured renderer.
//!
//! Recognizes exactly the subset the preview supports: `#`..`###`
//! headings, paragraphs, `**strong**`, `*emphasis*`, `` `code` `` and
//! `[[wiki links]]`. Paired delimiters never span lines and always close
//! on the nearest matching delimiter.

use super::types::{Block, Inline, NoteDocument};

/// Deepest heading level that gets its own block.
const MAX_HEADING_LEVEL: usize = 3;

/// Parse a note into a [`NoteDocument`].
///
/// # Example
///
/// ```
/// use notepreview::document::{Block, NoteDocument};
///
/// let doc = NoteDocument::parse("# Hello\n\nWorld");
/// assert_eq!(doc.blocks().len(), 2);
/// assert!(matches!(doc.blocks()[0], Block::Heading { level: 1, .. }));
/// ```
impl NoteDocument {
    pub fn parse(source: &str) -> Self {
        parse(source)
    }
}

/// Parse a note into a [`NoteDocument`]. Never fails.
pub fn parse(source: &str) -> NoteDocument {
    let normalized = source.replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in normalized.split('\n') {
        if line.trim().is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }
        if let Some((level, text)) = heading_line(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level,
                content: parse_inlines(text),
            });
            continue;
        }
        paragraph.push(line);
    }
    flush_paragraph(&mut paragraph, &mut blocks);

    NoteDocument::from_blocks(blocks)
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if lines.is_empty() {
        return;
    }
    let mut content = Vec::new();
    for (i, line) in lines.drain(..).enumerate() {
        if i > 0 {
            content.push(Inline::LineBreak);
        }
        content.extend(parse_inlines(line));
    }
    blocks.push(Block::Paragraph { content });
}

/// Split `## Title` into `(2, "Title")`.
fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let text = line[hashes..].strip_prefix(' ')?;
    let level = u8::try_from(hashes).ok()?;
    Some((level, text))
}

/// Parse inline constructs within a single line.
pub(crate) fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut text = String::new();
    let mut rest = line;

    while let Some(ch) = rest.chars().next() {
        if let Some((node, consumed)) = paired(rest) {
            flush_text(&mut text, &mut out);
            out.push(node);
            rest = &rest[consumed..];
            continue;
        }
        // An unmatched two-char opener is literal as a whole, so its second
        // char can't start a construct of its own.
        let step = if rest.starts_with("**") || rest.starts_with("[[") {
            2
        } else {
            ch.len_utf8()
        };
        text.push_str(&rest[..step]);
        rest = &rest[step..];
    }
    flush_text(&mut text, &mut out);
    out
}

fn flush_text(text: &mut String, out: &mut Vec<Inline>) {
    if !text.is_empty() {
        out.push(Inline::Text(std::mem::take(text)));
    }
}

/// Try to match a paired construct at the start of `rest`.
///
/// Returns the node and the number of bytes it consumed.
fn paired(rest: &str) -> Option<(Inline, usize)> {
    if let Some(inner) = delimited(rest, "[[", "]]") {
        return Some((Inline::WikiLink(inner.to_string()), inner.len() + 4));
    }
    if let Some(inner) = delimited(rest, "`", "`") {
        return Some((Inline::Code(inner.to_string()), inner.len() + 2));
    }
    if let Some(inner) = delimited(rest, "**", "**") {
        return Some((Inline::Strong(parse_inlines(inner)), inner.len() + 4));
    }
    if !rest.starts_with("**") {
        if let Some(inner) = delimited(rest, "*", "*") {
            return Some((Inline::Emphasis(parse_inlines(inner)), inner.len() + 2));
        }
    }
    None
}

/// Shortest non-empty run between `open` at the start and the next `close`.
fn delimited<'a>(rest: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let body = rest.strip_prefix(open)?;
    let end = body.find(close)?;
    let inner = &body[..end];
    (!inner.is_empty()).then_some(inner)
}
