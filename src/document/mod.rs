//! Page content rendering.
//!
//! This module handles:
//! - Classifying markdown-like lines into display blocks ([`render`])
//! - Substituting inline `[label](url)` links ([`split_links`])
//! - Laying blocks out as wrapped, styled terminal lines ([`layout_blocks`])

mod blocks;
mod inline;
mod layout;
mod types;

pub use blocks::{LineKind, classify, render, render_optional};
pub use inline::{display_text, split_links};
pub use layout::{layout_blocks, layout_bullet, layout_text};
pub use types::{
    DisplayBlock, InlineFragment, InlineSpan, InlineStyle, LineType, LinkRef, PageLayout,
    RenderedLine,
};

/// Render blocks as plain text, one block per paragraph.
///
/// Headings keep their `#` markers, bullets are written as `- item`, and
/// links as `label <url>`. Used by `--dump`.
pub fn blocks_to_plain_text(blocks: &[DisplayBlock]) -> String {
    let mut out: Vec<String> = Vec::with_capacity(blocks.len());
    for block in blocks {
        let rendered = match block {
            DisplayBlock::Heading { level, text } => {
                format!("{} {}", "#".repeat(usize::from(*level)), plain_inline(text))
            }
            DisplayBlock::Paragraph { text } => text
                .split('\n')
                .map(plain_inline)
                .collect::<Vec<_>>()
                .join("\n"),
            DisplayBlock::BulletList { items } => items
                .iter()
                .map(|item| format!("- {}", plain_inline(item)))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        out.push(rendered);
    }
    out.join("\n\n")
}

fn plain_inline(text: &str) -> String {
    split_links(text)
        .into_iter()
        .map(|fragment| match fragment {
            InlineFragment::Text(text) => text,
            InlineFragment::Link { label, url } => format!("{label} <{url}>"),
        })
        .collect()
}
