//! End-to-end flows against the demo page through the public API only.

use folio_dom::NodeId;
use folio_page::demo::{demo_document, read_more};
use folio_page::scroll::scroll_percent;
use folio_page::{ContentCatalog, HeadlessHost, Host, OpenOutcome, PageEvent, Portfolio};
use folio_types::config::PageConfig;
use folio_types::input::Key;

fn page() -> Portfolio<HeadlessHost> {
    let catalog = ContentCatalog::builtin();
    let doc = demo_document(&catalog);
    let host = HeadlessHost::fit_document(800, &doc);
    Portfolio::new(doc, catalog, PageConfig::default(), host)
}

fn tag_texts(page: &Portfolio<HeadlessHost>) -> Vec<String> {
    let doc = page.document();
    let tags: NodeId = page.overlay().unwrap().surface().tags;
    doc.get(tags)
        .children
        .iter()
        .map(|&t| doc.text_content(t))
        .collect()
}

#[test]
fn open_unknown_after_known_keeps_content() {
    let mut page = page();
    assert_eq!(page.catalog().ids().collect::<Vec<_>>(), [
        "article1", "article2", "article3", "article4"
    ]);

    assert_eq!(page.open_article("article2"), Some(OpenOutcome::Opened));
    let title = page.overlay().unwrap().surface().title;
    assert_eq!(page.document().text_content(title), "Legal Aid in India");
    assert_eq!(tag_texts(&page), [
        "Human Rights",
        "Access to Justice",
        "Legal Aid"
    ]);

    let before = page.snapshot().overlay;
    assert_eq!(page.open_article("article9"), Some(OpenOutcome::UnknownArticle));
    assert_eq!(page.document().text_content(title), "Legal Aid in India");
    assert_eq!(page.snapshot().overlay, before);
}

#[test]
fn every_article_round_trips_to_closed() {
    let mut page = page();
    let ids: Vec<String> = page.catalog().ids().map(str::to_string).collect();
    for id in ids {
        page.open_article(&id);
        assert!(page.scroll_locked());
        assert!(page.close_article());
        let overlay = page.snapshot().overlay;
        assert!(!overlay.is_open());
        assert_eq!(overlay.active_article_id(), None);
        assert!(!page.scroll_locked());
    }
    assert!(!page.close_article());
}

#[test]
fn escape_only_acts_while_open() {
    let mut page = page();
    let esc = PageEvent::KeyDown {
        key: Key::Escape,
        target: None,
    };
    page.dispatch(esc.clone());
    assert!(!page.snapshot().overlay.is_open());

    let trigger = read_more(page.document(), "article4").unwrap();
    page.dispatch(PageEvent::Click { target: trigger });
    assert!(page.snapshot().overlay.is_open());
    page.dispatch(esc);
    assert!(!page.snapshot().overlay.is_open());
}

#[test]
fn scrolling_through_the_page() {
    let mut page = page();
    let max = page.host().max_scroll();
    let mut seen = Vec::new();
    for y in (0..=max).step_by(100) {
        page.host_mut().set_scroll_y(y);
        page.dispatch(PageEvent::Scroll);
        let snap = page.snapshot().scroll;
        if let Some(id) = snap.current_section_id
            && seen.last() != Some(&id)
        {
            seen.push(id);
        }
    }
    assert_eq!(seen, ["home", "about", "articles", "resume", "contact"]);

    let snap = page.snapshot().scroll;
    assert_eq!(snap.scroll_percent, 100.0);
    assert_eq!(page.snapshot().pending_reveals, 0);

    let v = page.host().viewport();
    assert_eq!(scroll_percent(0, v.document_height, v.height), 0.0);
    assert_eq!(scroll_percent(0, v.height, v.height), 0.0);
}
