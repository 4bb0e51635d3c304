//! HTML page shell and node-tree rendering.

use std::fmt::Write as _;

use super::types::{Block, Inline, NoteDocument};

/// Opening half of every preview page, up to and including `<body>`.
pub const PAGE_HEAD: &str = concat!(
    "<html><head><style>",
    "body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; ",
    "line-height: 1.6; margin: 20px; }",
    "h1 { color: #2c3e50; border-bottom: 2px solid #3498db; }",
    "h2 { color: #34495e; border-bottom: 1px solid #bdc3c7; }",
    "h3 { color: #7f8c8d; }",
    "code { background-color: #f8f9fa; padding: 2px 4px; border-radius: 3px; ",
    "font-family: 'Monaco', 'Courier New', monospace; }",
    "pre { background-color: #f8f9fa; padding: 10px; border-radius: 5px; overflow-x: auto; }",
    "blockquote { border-left: 4px solid #3498db; margin-left: 0; padding-left: 15px; ",
    "color: #7f8c8d; font-style: italic; }",
    "a { color: #3498db; text-decoration: none; }",
    "a:hover { text-decoration: underline; }",
    "</style></head><body>",
);

/// Closing half of every preview page.
pub const PAGE_TAIL: &str = "</body></html>";

/// Body shown when the buffer has nothing to render.
pub const PLACEHOLDER_BODY: &str = "<p><i>Start typing to see preview...</i></p>";

/// Link target used until notes are resolved to paths.
pub const LINK_PLACEHOLDER: &str = "#";

/// Wrap rendered body markup in the page shell.
pub fn wrap_page(body: &str) -> String {
    let mut page = String::with_capacity(PAGE_HEAD.len() + body.len() + PAGE_TAIL.len());
    page.push_str(PAGE_HEAD);
    page.push_str(body);
    page.push_str(PAGE_TAIL);
    page
}

/// The full placeholder page.
pub fn placeholder_page() -> String {
    wrap_page(PLACEHOLDER_BODY)
}

/// Render a parsed document to a full page.
pub fn render_document(doc: &NoteDocument) -> String {
    if doc.is_empty() {
        return placeholder_page();
    }
    let mut body = String::new();
    for block in doc.blocks() {
        match block {
            Block::Heading { level, content } => {
                let _ = write!(body, "<h{level}>");
                push_inlines(content, &mut body);
                let _ = write!(body, "</h{level}>");
            }
            Block::Paragraph { content } => {
                body.push_str("<p>");
                push_inlines(content, &mut body);
                body.push_str("</p>");
            }
        }
    }
    wrap_page(&body)
}

fn push_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => push_escaped(text, out),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                push_inlines(children, out);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                push_inlines(children, out);
                out.push_str("</em>");
            }
            Inline::Code(code) => {
                out.push_str("<code>");
                push_escaped(code, out);
                out.push_str("</code>");
            }
            Inline::WikiLink(name) => {
                let _ = write!(out, "<a href=\"{LINK_PLACEHOLDER}\">");
                push_escaped(name, out);
                out.push_str("</a>");
            }
            Inline::LineBreak => out.push_str("<br>"),
        }
    }
}

fn push_escaped(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(source: &str) -> String {
        let page = render_document(&NoteDocument::parse(source));
        page.strip_prefix(PAGE_HEAD)
            .and_then(|rest| rest.strip_suffix(PAGE_TAIL))
            .expect("page shell")
            .to_string()
    }

    #[test]
    fn test_empty_document_renders_placeholder() {
        assert_eq!(render_document(&NoteDocument::empty()), placeholder_page());
    }

    #[test]
    fn test_heading_is_closed() {
        assert_eq!(body("# Title"), "<h1>Title</h1>");
    }

    #[test]
    fn test_paragraphs_and_breaks() {
        assert_eq!(body("a\nb\n\nc"), "<p>a<br>b</p><p>c</p>");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            body("**a** *b* `c` [[D]]"),
            "<p><strong>a</strong> <em>b</em> <code>c</code> <a href=\"#\">D</a></p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            body("<script> & \"x\""),
            "<p>&lt;script&gt; &amp; &quot;x&quot;</p>"
        );
        assert_eq!(body("`<b>`"), "<p><code>&lt;b&gt;</code></p>");
    }

    #[test]
    fn test_placeholder_page_has_shell() {
        let page = placeholder_page();
        assert!(page.starts_with(PAGE_HEAD));
        assert!(page.contains("Start typing"));
        assert!(page.ends_with(PAGE_TAIL));
    }
}
