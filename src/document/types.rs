//! Core document types.

/// One structural unit of rendered page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// Consecutive plain lines, joined with `\n`.
    Paragraph { text: String },
    /// Consecutive bullet lines, markers stripped.
    BulletList { items: Vec<String> },
    /// A single heading line (level 2-4).
    Heading { level: u8, text: String },
}

impl DisplayBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    pub fn bullets<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BulletList {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    /// Raw (pre link substitution) text segments carried by this block.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            Self::Paragraph { text } | Self::Heading { text, .. } => vec![text.as_str()],
            Self::BulletList { items } => items.iter().map(String::as_str).collect(),
        }
    }
}

/// A piece of block text after inline link substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineFragment {
    Text(String),
    Link { label: String, url: String },
}

impl InlineFragment {
    /// The text a reader sees for this fragment.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Link { label, .. } => label,
        }
    }
}

/// A single rendered line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// The text content of the line
    content: String,
    /// The type of line (for styling)
    line_type: LineType,
    /// Optional inline-styled spans for rendering
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    /// Create a new rendered line.
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    /// Create a new rendered line with inline spans.
    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the line type.
    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Get inline spans, if present.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub strong: bool,
    pub link: bool,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (2-4 for page content, 1 for section titles)
    Heading(u8),
    /// Bullet list item (first or continuation row)
    ListItem,
    /// Empty line
    Empty,
}

/// Reference to a link in a laid-out page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// Link text
    pub text: String,
    /// Link URL
    pub url: String,
    /// Line number in the laid-out page
    pub line: usize,
}

/// Blocks laid out for a terminal of a given width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub lines: Vec<RenderedLine>,
    pub links: Vec<LinkRef>,
}

impl PageLayout {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get visible lines for rendering.
    ///
    /// Returns lines from `offset` to `offset + count`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> Vec<&RenderedLine> {
        self.lines.iter().skip(offset).take(count).collect()
    }

    /// Append another layout below this one, shifting its link lines.
    pub fn append(&mut self, other: Self) {
        let base = self.lines.len();
        self.lines.extend(other.lines);
        self.links.extend(other.links.into_iter().map(|mut link| {
            link.line += base;
            link
        }));
    }
}
