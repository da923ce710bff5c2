//! The bundled catalog drives every page through the public API.

use folio::app::{item_plain_text, page_layout};
use folio::catalog::Catalog;
use folio::modal::ModalPage;

#[test]
fn every_bundled_item_dumps_all_pages() {
    let catalog = Catalog::bundled().unwrap();
    for item in &catalog.production {
        let text = item_plain_text(item);
        let total = item.pages().len() + 1;
        assert!(text.starts_with(&format!("# {}\n", item.title)));
        assert!(text.contains(&format!("(1/{total})")));
        assert!(text.contains(&format!("({total}/{total})")));
    }
}

#[test]
fn every_markdown_page_lays_out_within_width() {
    let catalog = Catalog::bundled().unwrap();
    for item in &catalog.production {
        for idx in 0..item.pages().len() {
            let layout = page_layout(item, ModalPage::Markdown(idx), 30);
            for line in &layout.lines {
                assert!(
                    unicode_width::UnicodeWidthStr::width(line.content()) <= 30,
                    "{} page {idx}: {:?}",
                    item.id,
                    line.content()
                );
            }
        }
    }
}
