//! Substitution-pipeline renderer.
//!
//! Rewrites the buffer with a fixed sequence of string and regex
//! substitutions. Order matters: every pass runs over the output of the
//! previous one, so tags inserted early can be touched by later passes.
//! Heading prefixes produce an opening tag only. Text is not escaped.

use once_cell::sync::Lazy;
use regex::Regex;

use super::html::{LINK_PLACEHOLDER, placeholder_page, wrap_page};

/// Heading prefixes, longest first so `### ` is not eaten by `# `.
const HEADING_PREFIXES: [(&str, &str); 3] = [("### ", "<h3>"), ("## ", "<h2>"), ("# ", "<h1>")];

// Spans stop at `\r` as well as `\n`.
static STRONG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^\r\n]*?)\*\*").expect("valid strong regex"));
static EMPHASIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^\r\n]*?)\*").expect("valid emphasis regex"));
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^\r\n]*?)`").expect("valid code regex"));
static WIKI_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^\r\n]*?)\]\]").expect("valid wiki link regex"));

/// Render `source` through the substitution pipeline.
pub fn render(source: &str) -> String {
    if source.is_empty() {
        return placeholder_page();
    }

    let mut text = source.to_string();
    for (prefix, tag) in HEADING_PREFIXES {
        text = text.replace(prefix, tag);
    }

    let text = STRONG_RE.replace_all(&text, "<strong>$1</strong>");
    let text = EMPHASIS_RE.replace_all(&text, "<em>$1</em>");
    let text = CODE_RE.replace_all(&text, "<code>$1</code>");
    let link = format!("<a href=\"{LINK_PLACEHOLDER}\">$1</a>");
    let text = WIKI_LINK_RE.replace_all(&text, link.as_str());

    let text = text.replace("\n\n", "</p><p>").replace('\n', "<br>");

    wrap_page(&format!("<p>{text}</p>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::html::{PAGE_HEAD, PAGE_TAIL};

    fn body(source: &str) -> String {
        let page = render(source);
        page.strip_prefix(PAGE_HEAD)
            .and_then(|rest| rest.strip_suffix(PAGE_TAIL))
            .expect("page shell")
            .to_string()
    }

    #[test]
    fn test_empty_input_renders_placeholder() {
        assert_eq!(render(""), placeholder_page());
    }

    #[test]
    fn test_heading_has_no_closing_tag() {
        assert_eq!(body("# Title"), "<p><h1>Title</p>");
    }

    #[test]
    fn test_heading_prefixes_longest_first() {
        assert_eq!(body("### Three"), "<p><h3>Three</p>");
        assert_eq!(body("## Two"), "<p><h2>Two</p>");
    }

    #[test]
    fn test_heading_prefix_replaced_mid_line() {
        assert_eq!(body("issue # 4"), "<p>issue <h1>4</p>");
    }

    #[test]
    fn test_strong_spans_are_shortest_match() {
        assert_eq!(
            body("**a** and **b**"),
            "<p><strong>a</strong> and <strong>b</strong></p>"
        );
    }

    #[test]
    fn test_emphasis_and_code() {
        assert_eq!(body("*italic*"), "<p><em>italic</em></p>");
        assert_eq!(body("`code`"), "<p><code>code</code></p>");
    }

    #[test]
    fn test_emphasis_runs_before_code() {
        assert_eq!(body("`a*b*c`"), "<p><code>a<em>b</em>c</code></p>");
    }

    #[test]
    fn test_wiki_link_uses_placeholder_target() {
        assert_eq!(
            body("[[Note Name]]"),
            "<p><a href=\"#\">Note Name</a></p>"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(body("line1\n\nline2"), "<p>line1</p><p>line2</p>");
        assert_eq!(body("line1\nline2"), "<p>line1<br>line2</p>");
        assert_eq!(body("a\n\n\nb"), "<p>a</p><p><br>b</p>");
    }

    #[test]
    fn test_unclosed_strong_degrades_to_empty_emphasis() {
        assert_eq!(body("**open"), "<p><em></em>open</p>");
        assert_eq!(body("`open"), "<p>`open</p>");
    }

    #[test]
    fn test_markup_is_not_escaped() {
        assert_eq!(body("<b>x</b>"), "<p><b>x</b></p>");
    }

    #[test]
    fn test_pairs_do_not_cross_newlines() {
        assert_eq!(body("*a\nb*"), "<p>*a<br>b*</p>");
    }

    #[test]
    fn test_pairs_do_not_cross_carriage_returns() {
        assert_eq!(body("*a\rb*"), "<p>*a\rb*</p>");
        assert_eq!(body("**a\r\nb**"), "<p><em></em>a\r<br>b<em></em></p>");
        assert_eq!(body("`x\ry`"), "<p>`x\ry`</p>");
    }
}
