//! Laying out display blocks as wrapped terminal lines.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::inline::split_links;
use super::types::{
    DisplayBlock, InlineFragment, InlineSpan, InlineStyle, LineType, LinkRef, PageLayout,
    RenderedLine,
};

const BULLET_FIRST: &str = "• ";
const BULLET_NEXT: &str = "  ";

/// Lay out blocks for a content area `width` columns wide.
///
/// Blocks are separated by one empty line. Link fragments become styled
/// spans and each link is recorded once, on the row where it starts.
pub fn layout_blocks(blocks: &[DisplayBlock], width: u16) -> PageLayout {
    let mut layout = PageLayout::default();
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            layout
                .lines
                .push(RenderedLine::new(String::new(), LineType::Empty));
        }
        match block {
            DisplayBlock::Heading { level, text } => {
                layout.append(layout_text(text, LineType::Heading(*level), width));
            }
            DisplayBlock::Paragraph { text } => {
                for line in text.split('\n') {
                    layout.append(layout_text(line, LineType::Paragraph, width));
                }
            }
            DisplayBlock::BulletList { items } => {
                for item in items {
                    layout.append(layout_bullet(item, width));
                }
            }
        }
    }
    layout
}

/// Lay out one logical line of text, resolving inline links.
pub fn layout_text(text: &str, line_type: LineType, width: u16) -> PageLayout {
    layout_wrapped(text, line_type, width, "", "")
}

/// Lay out one bullet item with a hanging indent.
pub fn layout_bullet(text: &str, width: u16) -> PageLayout {
    layout_wrapped(text, LineType::ListItem, width, BULLET_FIRST, BULLET_NEXT)
}

fn layout_wrapped(
    text: &str,
    line_type: LineType,
    width: u16,
    prefix_first: &str,
    prefix_next: &str,
) -> PageLayout {
    let base_style = InlineStyle {
        strong: matches!(line_type, LineType::Heading(_)),
        link: false,
    };
    let fragments = split_links(text);
    let mut tokens = Vec::new();
    let mut links: Vec<(String, String)> = Vec::new();
    for fragment in &fragments {
        match fragment {
            InlineFragment::Text(text) => {
                tokens.extend(split_tokens(text, base_style, None));
            }
            InlineFragment::Link { label, url } => {
                let style = InlineStyle {
                    link: true,
                    ..base_style
                };
                tokens.extend(split_tokens(label, style, Some(links.len())));
                links.push((label.clone(), url.clone()));
            }
        }
    }

    let rows = wrap_tokens(tokens, usize::from(width.max(1)), prefix_first, prefix_next);

    let mut layout = PageLayout::default();
    let mut seen = vec![false; links.len()];
    for (row_idx, row) in rows.into_iter().enumerate() {
        for token in &row {
            if let Some(link_idx) = token.link
                && !seen[link_idx]
            {
                seen[link_idx] = true;
                let (label, url) = &links[link_idx];
                layout.links.push(LinkRef {
                    text: label.clone(),
                    url: url.clone(),
                    line: row_idx,
                });
            }
        }
        let spans: Vec<InlineSpan> = row.into_iter().map(|token| token.span).collect();
        let content = spans_to_string(&spans);
        layout
            .lines
            .push(RenderedLine::with_spans(content, line_type, spans));
    }
    layout
}

#[derive(Debug, Clone)]
struct Token {
    span: InlineSpan,
    link: Option<usize>,
}

impl Token {
    fn width(&self) -> usize {
        self.span.text().width()
    }

    fn is_whitespace(&self) -> bool {
        self.span.text().chars().all(char::is_whitespace)
    }
}

/// Split text into alternating whitespace / non-whitespace runs.
fn split_tokens(text: &str, style: InlineStyle, link: Option<usize>) -> Vec<Token> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut ws_state: Option<bool> = None;

    for ch in text.chars() {
        let is_ws = ch.is_whitespace();
        match ws_state {
            Some(state) if state == is_ws => buf.push(ch),
            Some(_) => {
                out.push(Token {
                    span: InlineSpan::new(std::mem::take(&mut buf), style),
                    link,
                });
                buf.push(ch);
                ws_state = Some(is_ws);
            }
            None => {
                buf.push(ch);
                ws_state = Some(is_ws);
            }
        }
    }

    if !buf.is_empty() {
        out.push(Token {
            span: InlineSpan::new(buf, style),
            link,
        });
    }
    out
}

#[derive(Debug, Default)]
struct Row {
    tokens: Vec<Token>,
    width: usize,
    has_word: bool,
}

impl Row {
    fn start(prefix: &str) -> Self {
        let mut row = Self::default();
        if !prefix.is_empty() {
            row.tokens.push(Token {
                span: InlineSpan::new(prefix.to_string(), InlineStyle::default()),
                link: None,
            });
            row.width = prefix.width();
        }
        row
    }

    fn push_char(&mut self, ch: char, style: InlineStyle, link: Option<usize>) {
        let same_run = self
            .tokens
            .last()
            .is_some_and(|last| last.link == link && last.span.style() == style && self.has_word);
        if same_run && let Some(last) = self.tokens.last_mut() {
            let mut text = last.span.text().to_string();
            text.push(ch);
            last.span = InlineSpan::new(text, style);
        } else {
            self.tokens.push(Token {
                span: InlineSpan::new(ch.to_string(), style),
                link,
            });
        }
        self.width += ch.width().unwrap_or(0);
        self.has_word = true;
    }
}

fn wrap_tokens(
    tokens: Vec<Token>,
    width: usize,
    prefix_first: &str,
    prefix_next: &str,
) -> Vec<Vec<Token>> {
    let mut rows: Vec<Vec<Token>> = Vec::new();
    let mut row = Row::start(prefix_first);

    for token in tokens {
        let token_width = token.width();
        let token_is_ws = token.is_whitespace();

        if row.width + token_width > width && row.has_word {
            rows.push(std::mem::take(&mut row.tokens));
            row = Row::start(prefix_next);
        }

        if token_is_ws && !row.has_word {
            // Drop leading whitespace at wrapped line starts.
            continue;
        }

        if row.width + token_width > width && !token_is_ws {
            // Too long even for a fresh row (e.g. an unbroken CJK run).
            let style = token.span.style();
            for ch in token.span.text().chars() {
                let ch_width = ch.width().unwrap_or(0);
                if row.width + ch_width > width && row.has_word {
                    rows.push(std::mem::take(&mut row.tokens));
                    row = Row::start(prefix_next);
                }
                row.push_char(ch, style, token.link);
            }
            continue;
        }

        row.width += token_width;
        row.tokens.push(token);
        row.has_word = true;
    }

    rows.push(row.tokens);
    rows
}

fn spans_to_string(spans: &[InlineSpan]) -> String {
    let mut content = String::new();
    for span in spans {
        content.push_str(span.text());
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::render;

    fn contents(layout: &PageLayout) -> Vec<&str> {
        layout.lines.iter().map(RenderedLine::content).collect()
    }

    #[test]
    fn test_blocks_are_separated_by_empty_lines() {
        let blocks = render(&["## Title", "body", "- a", "- b"]);
        let layout = layout_blocks(&blocks, 40);
        assert_eq!(contents(&layout), vec!["Title", "", "body", "", "• a", "• b"]);
        assert_eq!(*layout.lines[0].line_type(), LineType::Heading(2));
        assert_eq!(*layout.lines[1].line_type(), LineType::Empty);
        assert_eq!(*layout.lines[4].line_type(), LineType::ListItem);
    }

    #[test]
    fn test_paragraph_keeps_source_line_breaks() {
        let layout = layout_blocks(&render(&["one", "two"]), 40);
        assert_eq!(contents(&layout), vec!["one", "two"]);
    }

    #[test]
    fn test_paragraph_wraps_to_width() {
        let layout = layout_text("alpha beta gamma delta", LineType::Paragraph, 11);
        assert_eq!(contents(&layout), vec!["alpha beta ", "gamma delta"]);
    }

    #[test]
    fn test_bullet_wraps_with_hanging_indent() {
        let layout = layout_bullet("alpha beta gamma", 12);
        assert_eq!(contents(&layout), vec!["• alpha beta", "  gamma"]);
    }

    #[test]
    fn test_wide_run_is_hard_broken_by_display_width() {
        let layout = layout_text("日本語のテキスト", LineType::Paragraph, 6);
        let rows = contents(&layout);
        assert_eq!(rows, vec!["日本語", "のテキ", "スト"]);
        for row in rows {
            assert!(row.width() <= 6);
        }
    }

    #[test]
    fn test_links_are_styled_and_recorded() {
        let layout = layout_text(
            "plain [link](http://e.org) text",
            LineType::Paragraph,
            80,
        );
        assert_eq!(contents(&layout), vec!["plain link text"]);
        let spans = layout.lines[0].spans().unwrap();
        let link_span = spans.iter().find(|s| s.text() == "link").unwrap();
        assert!(link_span.style().link);
        assert_eq!(
            layout.links,
            vec![LinkRef {
                text: "link".to_string(),
                url: "http://e.org".to_string(),
                line: 0,
            }]
        );
    }

    #[test]
    fn test_link_lines_account_for_preceding_blocks() {
        let blocks = render(&["## Docs", "", "- [repo](https://example.org/repo)"]);
        let layout = layout_blocks(&blocks, 40);
        assert_eq!(layout.links.len(), 1);
        assert_eq!(layout.links[0].line, 2);
        assert_eq!(layout.links[0].url, "https://example.org/repo");
    }

    #[test]
    fn test_heading_spans_are_strong() {
        let layout = layout_text("Heading", LineType::Heading(3), 40);
        assert!(layout.lines[0].spans().unwrap()[0].style().strong);
    }

    #[test]
    fn test_empty_text_yields_one_empty_row() {
        let layout = layout_text("", LineType::Paragraph, 40);
        assert_eq!(contents(&layout), vec![""]);
    }
}
