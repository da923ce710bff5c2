//! Line-oriented block classification.
//!
//! Page content is a sequence of plain lines using a tiny subset of markdown:
//! `##`/`###`/`####` headings, `-`/`*` bullets, and paragraphs separated by
//! blank lines. [`render`] turns those lines into [`DisplayBlock`]s in one
//! forward pass.

use super::types::DisplayBlock;

/// How a single (right-trimmed) line participates in block building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Bullet(&'a str),
    Heading(u8, &'a str),
    Text(&'a str),
}

/// Classify one line. Priority: bullet, heading 2, 3, 4, then text.
///
/// ```
/// use folio::document::{classify, LineKind};
///
/// assert_eq!(classify("### C"), LineKind::Heading(3, "C"));
/// assert_eq!(classify("  * item"), LineKind::Bullet("item"));
/// assert_eq!(classify("#tag"), LineKind::Text("#tag"));
/// ```
pub fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim_end();
    if line.trim_start().is_empty() {
        return LineKind::Blank;
    }
    if let Some(item) = bullet_content(line) {
        return LineKind::Bullet(item);
    }
    if let Some((level, text)) = heading_content(line) {
        return LineKind::Heading(level, text);
    }
    LineKind::Text(line)
}

/// `-` or `*`, optionally indented, then whitespace, then content.
fn bullet_content(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let rest = rest.strip_prefix('-').or_else(|| rest.strip_prefix('*'))?;
    marker_gap(rest)
}

/// A `#` run of exactly 2, 3 or 4 followed by whitespace and content.
fn heading_content(line: &str) -> Option<(u8, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    let level = match hashes {
        2 => 2,
        3 => 3,
        4 => 4,
        _ => return None,
    };
    marker_gap(&line[hashes..]).map(|text| (level, text))
}

/// Content following a marker: requires at least one whitespace char, then
/// something non-blank.
fn marker_gap(rest: &str) -> Option<&str> {
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let content = rest.trim_start();
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Render a line sequence into display blocks.
///
/// Consecutive text lines merge into one paragraph, consecutive bullets
/// into one list. Blank lines and headings close whatever is pending.
///
/// ```
/// use folio::document::{render, DisplayBlock};
///
/// let blocks = render(&["## A", "line1", "line2", "- x", "- y", "### B"]);
/// assert_eq!(
///     blocks,
///     vec![
///         DisplayBlock::heading(2, "A"),
///         DisplayBlock::paragraph("line1\nline2"),
///         DisplayBlock::bullets(["x", "y"]),
///         DisplayBlock::heading(3, "B"),
///     ]
/// );
/// ```
pub fn render<S: AsRef<str>>(lines: &[S]) -> Vec<DisplayBlock> {
    let mut builder = BlockBuilder::default();
    for raw in lines {
        builder.push_line(raw.as_ref());
    }
    builder.finish()
}

/// Like [`render`], but absent or empty input means "nothing to show".
pub fn render_optional<S: AsRef<str>>(lines: Option<&[S]>) -> Option<Vec<DisplayBlock>> {
    let lines = lines.filter(|lines| !lines.is_empty())?;
    Some(render(lines))
}

#[derive(Debug, Default)]
struct BlockBuilder {
    blocks: Vec<DisplayBlock>,
    paragraph: Vec<String>,
    list_items: Vec<String>,
}

impl BlockBuilder {
    fn push_line(&mut self, raw: &str) {
        let kind = classify(raw);
        match kind {
            LineKind::Blank => {
                self.flush_paragraph();
                self.flush_list();
                return;
            }
            LineKind::Bullet(item) => {
                self.flush_paragraph();
                self.list_items.push(item.to_string());
                return;
            }
            LineKind::Heading(..) | LineKind::Text(_) => {}
        }

        // Any non-bullet line terminates a list.
        self.flush_list();

        match kind {
            LineKind::Heading(level, text) => {
                self.flush_paragraph();
                self.blocks.push(DisplayBlock::heading(level, text));
            }
            LineKind::Text(text) => self.paragraph.push(text.to_string()),
            LineKind::Blank | LineKind::Bullet(_) => {}
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.paragraph).join("\n");
        self.blocks.push(DisplayBlock::Paragraph { text });
    }

    fn flush_list(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.list_items);
        self.blocks.push(DisplayBlock::BulletList { items });
    }

    fn finish(mut self) -> Vec<DisplayBlock> {
        self.flush_paragraph();
        self.flush_list();
        self.blocks
    }
}
