//! Inline link substitution.

use std::sync::LazyLock;

use regex::Regex;

use super::types::InlineFragment;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

/// Split `text` into plain and link fragments.
///
/// Matches `[label](url)` left to right. Anything that does not match,
/// including half-written link syntax, is kept verbatim as text.
///
/// ```
/// use folio::document::{split_links, InlineFragment};
///
/// let parts = split_links("plain [link](http://e.org) text");
/// assert_eq!(parts[1], InlineFragment::Link {
///     label: "link".to_string(),
///     url: "http://e.org".to_string(),
/// });
/// ```
pub fn split_links(text: &str) -> Vec<InlineFragment> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in LINK_RE.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if whole.start() > last {
            parts.push(InlineFragment::Text(text[last..whole.start()].to_string()));
        }
        parts.push(InlineFragment::Link {
            label: label.as_str().to_string(),
            url: url.as_str().to_string(),
        });
        last = whole.end();
    }
    if last < text.len() {
        parts.push(InlineFragment::Text(text[last..].to_string()));
    }
    parts
}

/// The text a reader sees once links are replaced by their labels.
pub fn display_text(text: &str) -> String {
    split_links(text)
        .iter()
        .map(InlineFragment::display_text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(label: &str, url: &str) -> InlineFragment {
        InlineFragment::Link {
            label: label.to_string(),
            url: url.to_string(),
        }
    }

    fn text(s: &str) -> InlineFragment {
        InlineFragment::Text(s.to_string())
    }

    #[test]
    fn test_link_in_middle_of_text() {
        assert_eq!(
            split_links("plain [link](http://e.org) text"),
            vec![text("plain "), link("link", "http://e.org"), text(" text")]
        );
    }

    #[test]
    fn test_multiple_links_per_line() {
        assert_eq!(
            split_links("[a](u1) and [b](u2)"),
            vec![link("a", "u1"), text(" and "), link("b", "u2")]
        );
    }

    #[test]
    fn test_plain_text_is_untouched() {
        assert_eq!(split_links("no links here"), vec![text("no links here")]);
        assert!(split_links("").is_empty());
    }

    #[test]
    fn test_malformed_syntax_stays_literal() {
        for input in ["[open](no close", "[](empty)", "[label]()", "[a] (b)", "]x[(y)"] {
            assert_eq!(split_links(input), vec![text(input)], "input: {input}");
        }
    }

    #[test]
    fn test_display_text_uses_labels() {
        assert_eq!(
            display_text("see [docs](https://example.org)!"),
            "see docs!"
        );
    }

    #[test]
    fn test_multibyte_text_around_links() {
        assert_eq!(
            split_links("資料: [リンク](https://example.jp)です"),
            vec![text("資料: "), link("リンク", "https://example.jp"), text("です")]
        );
    }
}
