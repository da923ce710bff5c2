//! Turning catalog content into laid-out pages.
//!
//! The portfolio behind the modal and every modal page are expressed as
//! [`DisplayBlock`]s and go through the same layout as markdown pages.

use std::ops::Range;

use crate::catalog::{Catalog, ProductionItem, SkillCategory};
use crate::document::{
    DisplayBlock, LineType, PageLayout, RenderedLine, blocks_to_plain_text, layout_blocks,
    layout_text, render_optional,
};
use crate::modal::ModalPage;

/// The scrollable portfolio page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Portfolio {
    pub layout: PageLayout,
    /// Rows occupied by each production item, in catalog order.
    pub item_lines: Vec<Range<usize>>,
}

impl Portfolio {
    pub fn build(catalog: &Catalog, width: u16) -> Self {
        let mut builder = SectionBuilder::new(width);
        let profile = &catalog.profile;

        let mut intro = Vec::new();
        if !profile.description.is_empty() {
            intro.push(DisplayBlock::paragraph(&profile.description));
        }
        let name = if profile.name.is_empty() {
            "Portfolio"
        } else {
            profile.name.as_str()
        };
        builder.section(name, &intro);

        let qualifications = named_bullets(catalog.qualifications.iter().map(|q| q.name.clone()));
        builder.section("Qualifications", &qualifications);
        let activities = named_bullets(
            catalog
                .activities
                .iter()
                .map(|a| format!("[{}]({})", a.name, a.url)),
        );
        builder.section("Activities", &activities);
        let hobbies = named_bullets(catalog.hobbies.iter().map(|h| h.name.clone()));
        builder.section("Hobbies", &hobbies);

        let mut skills = Vec::new();
        for category in SkillCategory::ALL {
            let names: Vec<&str> = catalog
                .skills_in(category)
                .map(|skill| skill.name.as_str())
                .collect();
            if !names.is_empty() {
                skills.push(DisplayBlock::heading(3, category.label()));
                skills.push(DisplayBlock::paragraph(names.join(", ")));
            }
        }
        builder.section("Skills", &skills);

        let mut careers = Vec::new();
        for career in &catalog.careers {
            careers.push(DisplayBlock::heading(4, &career.period));
            careers.push(DisplayBlock::paragraph(&career.description));
        }
        builder.section("Career", &careers);

        let mut item_lines = Vec::with_capacity(catalog.production.len());
        if !catalog.production.is_empty() {
            builder.title("Production");
            for item in &catalog.production {
                item_lines.push(builder.blocks(&production_summary(item)));
            }
        }

        Self {
            layout: builder.finish(),
            item_lines,
        }
    }

    /// The production item drawn on `line`, if any.
    pub fn item_at_line(&self, line: usize) -> Option<usize> {
        self.item_lines.iter().position(|range| range.contains(&line))
    }
}

struct SectionBuilder {
    width: u16,
    layout: PageLayout,
}

impl SectionBuilder {
    const fn new(width: u16) -> Self {
        Self {
            width,
            layout: PageLayout {
                lines: Vec::new(),
                links: Vec::new(),
            },
        }
    }

    fn gap(&mut self) {
        if !self.layout.lines.is_empty() {
            self.layout
                .lines
                .push(RenderedLine::new(String::new(), LineType::Empty));
        }
    }

    fn title(&mut self, title: &str) {
        self.gap();
        self.layout
            .append(layout_text(title, LineType::Heading(1), self.width));
    }

    /// Append blocks and return the rows they occupy.
    fn blocks(&mut self, blocks: &[DisplayBlock]) -> Range<usize> {
        self.gap();
        let start = self.layout.line_count();
        self.layout.append(layout_blocks(blocks, self.width));
        start..self.layout.line_count()
    }

    fn section(&mut self, title: &str, blocks: &[DisplayBlock]) {
        if blocks.is_empty() {
            return;
        }
        self.title(title);
        self.blocks(blocks);
    }

    fn finish(self) -> PageLayout {
        self.layout
    }
}

fn named_bullets(names: impl Iterator<Item = String>) -> Vec<DisplayBlock> {
    let items: Vec<String> = names.collect();
    if items.is_empty() {
        Vec::new()
    } else {
        vec![DisplayBlock::BulletList { items }]
    }
}

fn production_summary(item: &ProductionItem) -> Vec<DisplayBlock> {
    let mut blocks = vec![DisplayBlock::heading(3, &item.title)];
    let mut lines = Vec::new();
    if let Some(description) = &item.description {
        lines.push(description.clone());
    }
    if !item.tags.is_empty() {
        lines.push(item.tags.join(" · "));
    }
    if let Some(date) = &item.published_at {
        lines.push(format!("Published {date}"));
    }
    if !lines.is_empty() {
        blocks.push(DisplayBlock::paragraph(lines.join("\n")));
    }
    blocks
}

/// Footer label for a modal page.
pub fn page_label(item: &ProductionItem, page: ModalPage) -> String {
    match page {
        ModalPage::Overview => "Overview".to_string(),
        ModalPage::Markdown(idx) => item
            .pages()
            .get(idx)
            .and_then(|page| page.title.clone())
            .unwrap_or_else(|| format!("Page {}", idx + 2)),
    }
}

/// Display blocks for one modal page.
pub fn page_blocks(item: &ProductionItem, page: ModalPage) -> Vec<DisplayBlock> {
    match page {
        ModalPage::Overview => overview_blocks(item),
        ModalPage::Markdown(idx) => item
            .pages()
            .get(idx)
            .and_then(|page| render_optional(Some(page.content.as_slice())))
            .unwrap_or_default(),
    }
}

/// The overview page. Description and features share the markdown pages'
/// inline-link handling.
fn overview_blocks(item: &ProductionItem) -> Vec<DisplayBlock> {
    let mut blocks = Vec::new();
    if let Some(description) = &item.description {
        blocks.push(DisplayBlock::heading(3, "Overview"));
        blocks.push(DisplayBlock::paragraph(description));
    }
    if !item.tags.is_empty() {
        blocks.push(DisplayBlock::heading(3, "Tech stack"));
        blocks.push(DisplayBlock::paragraph(item.tags.join(", ")));
    }
    if !item.features.is_empty() {
        blocks.push(DisplayBlock::heading(3, "Features"));
        blocks.push(DisplayBlock::bullets(item.features.iter().cloned()));
    }
    blocks
}

/// Lay out a modal page body: the page title (markdown pages only) and
/// its blocks.
pub fn page_layout(item: &ProductionItem, page: ModalPage, width: u16) -> PageLayout {
    let mut layout = PageLayout::default();
    if let ModalPage::Markdown(idx) = page
        && let Some(title) = item.pages().get(idx).and_then(|p| p.title.as_deref())
    {
        layout.append(layout_text(title, LineType::Heading(1), width));
        layout
            .lines
            .push(RenderedLine::new(String::new(), LineType::Empty));
    }
    layout.append(layout_blocks(&page_blocks(item, page), width));
    layout
}

/// Links shown beside the page body.
pub fn item_links(item: &ProductionItem) -> Vec<(&'static str, &str)> {
    let mut links = Vec::new();
    if let Some(modal) = &item.modal {
        if let Some(url) = &modal.demo_url {
            links.push(("Demo", url.as_str()));
        }
        if let Some(url) = &modal.repo_url {
            links.push(("Repository", url.as_str()));
        }
    }
    if links.is_empty()
        && let Some(url) = &item.url
    {
        links.push(("Link", url.as_str()));
    }
    links
}

/// Every page of an item as plain text, for `--dump`.
pub fn item_plain_text(item: &ProductionItem) -> String {
    let total = item.pages().len() + 1;
    let mut out = format!("# {}\n", item.title);
    for index in 0..total {
        let page = if index == 0 {
            ModalPage::Overview
        } else {
            ModalPage::Markdown(index - 1)
        };
        out.push_str(&format!(
            "\n== {} ({}/{}) ==\n\n",
            page_label(item, page),
            index + 1,
            total
        ));
        let body = blocks_to_plain_text(&page_blocks(item, page));
        if !body.is_empty() {
            out.push_str(&body);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MarkdownPage, ModalContent};

    fn item_with_pages() -> ProductionItem {
        ProductionItem {
            id: "demo".to_string(),
            title: "Demo".to_string(),
            description: Some("A small demo.".to_string()),
            tags: vec!["Rust".to_string(), "TUI".to_string()],
            features: vec!["Paging".to_string()],
            modal: Some(ModalContent {
                pages: vec![
                    MarkdownPage {
                        title: Some("Background".to_string()),
                        content: vec!["## Why".to_string(), "Because.".to_string()],
                    },
                    MarkdownPage {
                        title: None,
                        content: Vec::new(),
                    },
                ],
                repo_url: Some("https://example.org/repo".to_string()),
                ..ModalContent::default()
            }),
            ..ProductionItem::default()
        }
    }

    #[test]
    fn test_overview_blocks_cover_description_tags_and_features() {
        let blocks = page_blocks(&item_with_pages(), ModalPage::Overview);
        assert_eq!(
            blocks,
            vec![
                DisplayBlock::heading(3, "Overview"),
                DisplayBlock::paragraph("A small demo."),
                DisplayBlock::heading(3, "Tech stack"),
                DisplayBlock::paragraph("Rust, TUI"),
                DisplayBlock::heading(3, "Features"),
                DisplayBlock::bullets(["Paging"]),
            ]
        );
    }

    #[test]
    fn test_markdown_page_renders_its_lines() {
        let blocks = page_blocks(&item_with_pages(), ModalPage::Markdown(0));
        assert_eq!(
            blocks,
            vec![
                DisplayBlock::heading(2, "Why"),
                DisplayBlock::paragraph("Because.")
            ]
        );
    }

    #[test]
    fn test_empty_or_missing_page_has_nothing_to_show() {
        let item = item_with_pages();
        assert!(page_blocks(&item, ModalPage::Markdown(1)).is_empty());
        assert!(page_blocks(&item, ModalPage::Markdown(9)).is_empty());
    }

    #[test]
    fn test_page_labels() {
        let item = item_with_pages();
        assert_eq!(page_label(&item, ModalPage::Overview), "Overview");
        assert_eq!(page_label(&item, ModalPage::Markdown(0)), "Background");
        assert_eq!(page_label(&item, ModalPage::Markdown(1)), "Page 3");
    }

    #[test]
    fn test_page_layout_starts_with_title() {
        let layout = page_layout(&item_with_pages(), ModalPage::Markdown(0), 40);
        assert_eq!(layout.lines[0].content(), "Background");
        assert_eq!(*layout.lines[0].line_type(), LineType::Heading(1));
        assert_eq!(*layout.lines[1].line_type(), LineType::Empty);
        assert_eq!(layout.lines[2].content(), "Why");
    }

    #[test]
    fn test_item_links_prefer_modal_links() {
        let item = item_with_pages();
        assert_eq!(item_links(&item), vec![("Repository", "https://example.org/repo")]);

        let plain = ProductionItem {
            url: Some("https://example.org".to_string()),
            ..ProductionItem::default()
        };
        assert_eq!(item_links(&plain), vec![("Link", "https://example.org")]);
    }

    #[test]
    fn test_overview_links_in_description_and_features_are_followable() {
        let item = ProductionItem {
            title: "Demo".to_string(),
            description: Some("See [docs](https://example.org/docs).".to_string()),
            features: vec!["Built on [ratatui](https://ratatui.rs)".to_string()],
            ..ProductionItem::default()
        };
        let layout = page_layout(&item, ModalPage::Overview, 60);
        let urls: Vec<&str> = layout.links.iter().map(|link| link.url.as_str()).collect();
        assert_eq!(urls, vec!["https://example.org/docs", "https://ratatui.rs"]);
        assert!(layout.lines.iter().any(|line| line.content() == "See docs."));
    }

    #[test]
    fn test_portfolio_records_item_rows() {
        let catalog = Catalog::bundled().unwrap();
        let portfolio = Portfolio::build(&catalog, 60);
        assert_eq!(portfolio.item_lines.len(), catalog.production.len());
        for (idx, range) in portfolio.item_lines.iter().enumerate() {
            let heading = &portfolio.layout.lines[range.start];
            assert_eq!(heading.content(), catalog.production[idx].title);
            assert_eq!(portfolio.item_at_line(range.start), Some(idx));
        }
        assert_eq!(portfolio.item_at_line(0), None);
    }

    #[test]
    fn test_portfolio_activity_links_are_recorded() {
        let catalog = Catalog::bundled().unwrap();
        let portfolio = Portfolio::build(&catalog, 80);
        assert!(
            portfolio
                .layout
                .links
                .iter()
                .any(|link| link.text == "GitHub")
        );
    }

    #[test]
    fn test_item_plain_text_lists_every_page() {
        let text = item_plain_text(&item_with_pages());
        assert!(text.starts_with("# Demo\n"));
        assert!(text.contains("== Overview (1/3) =="));
        assert!(text.contains("== Background (2/3) ==\n\n## Why\n\nBecause.\n"));
        assert!(text.contains("== Page 3 (3/3) =="));
    }
}
