//! The stock portfolio page as a document tree.
//!
//! Section boxes are laid out top to bottom the way a desktop browser
//! renders the page at full width.

use folio_dom::{Document, ElementBuilder, NodeId, TagName};

use crate::catalog::ContentCatalog;

/// Nav entries: label and fragment.
const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", "home"),
    ("About", "about"),
    ("Articles", "articles"),
    ("Resume", "resume"),
    ("Contact", "contact"),
];

pub const NAVBAR_HEIGHT: i32 = 70;
const CARD_HEIGHT: i32 = 180;
const CARD_GAP: i32 = 20;

/// Build the page with one article card per catalog entry.
pub fn demo_document(catalog: &ContentCatalog) -> Document {
    let mut doc = Document::new();
    let root = doc.root;
    let html = ElementBuilder::new(TagName::Html)
        .attr("lang", "en")
        .append_to(&mut doc, root);
    let body = ElementBuilder::new(TagName::Body).append_to(&mut doc, html);

    build_navbar(&mut doc, body);

    let hero = ElementBuilder::new(TagName::Header)
        .id("home")
        .class("hero")
        .attr("tabindex", "-1")
        .geometry(0, 700)
        .append_to(&mut doc, body);
    ElementBuilder::new(TagName::H1)
        .class("hero-title")
        .text("Khushi Goyal")
        .append_to(&mut doc, hero);
    ElementBuilder::new(TagName::P)
        .class("hero-subtitle")
        .text("Law Student & Legal Researcher")
        .append_to(&mut doc, hero);

    let about = ElementBuilder::new(TagName::Section)
        .id("about")
        .class("about")
        .geometry(700, 600)
        .append_to(&mut doc, body);
    ElementBuilder::new(TagName::H2)
        .class("section-title animate-on-scroll")
        .text("About Me")
        .geometry(760, 60)
        .append_to(&mut doc, about);

    let articles_height = 100 + catalog.len() as i32 * (CARD_HEIGHT + CARD_GAP);
    let articles = ElementBuilder::new(TagName::Section)
        .id("articles")
        .class("articles")
        .geometry(1300, articles_height.max(900))
        .append_to(&mut doc, body);
    let mut top = 1400;
    for id in catalog.ids() {
        let title = catalog.get(id).map(|r| r.title.as_str()).unwrap_or(id);
        build_card(&mut doc, articles, id, title, top);
        top += CARD_HEIGHT + CARD_GAP;
    }

    let resume_top = 1300 + articles_height.max(900);
    let resume = ElementBuilder::new(TagName::Section)
        .id("resume")
        .class("resume")
        .geometry(resume_top, 500)
        .append_to(&mut doc, body);
    ElementBuilder::new(TagName::A)
        .class("btn-download")
        .href("Khushi_Goyal_Resume.pdf")
        .attr("download", "")
        .text("Download Resume")
        .geometry(resume_top + 200, 50)
        .append_to(&mut doc, resume);
    ElementBuilder::new(TagName::Img)
        .class("lazy")
        .attr("loading", "lazy")
        .attr("src", "placeholder.svg")
        .attr("data-src", "certificate.jpg")
        .attr("alt", "Certificate")
        .geometry(resume_top + 300, 150)
        .append_to(&mut doc, resume);

    let contact_top = resume_top + 500;
    let contact = ElementBuilder::new(TagName::Section)
        .id("contact")
        .class("contact")
        .geometry(contact_top, 500)
        .append_to(&mut doc, body);
    ElementBuilder::new(TagName::Form)
        .class("contact-form animate-on-scroll")
        .geometry(contact_top + 100, 300)
        .append_to(&mut doc, contact);

    ElementBuilder::new(TagName::Footer)
        .class("footer")
        .geometry(contact_top + 500, 100)
        .text("© Khushi Goyal")
        .append_to(&mut doc, body);

    let back = ElementBuilder::new(TagName::A)
        .id("backToTop")
        .class("back-to-top")
        .href("#home")
        .attr("aria-label", "Back to top")
        .append_to(&mut doc, body);
    ElementBuilder::new(TagName::Span)
        .text("↑")
        .append_to(&mut doc, back);

    doc
}

fn build_navbar(doc: &mut Document, body: NodeId) {
    let navbar = ElementBuilder::new(TagName::Nav)
        .class("navbar")
        .geometry(0, NAVBAR_HEIGHT)
        .append_to(doc, body);
    ElementBuilder::new(TagName::A)
        .class("nav-logo")
        .href("#home")
        .text("KG")
        .append_to(doc, navbar);
    let menu = ElementBuilder::new(TagName::Ul)
        .class("nav-menu")
        .append_to(doc, navbar);
    for (label, fragment) in NAV_ITEMS {
        let item = ElementBuilder::new(TagName::Li)
            .class("nav-item")
            .append_to(doc, menu);
        ElementBuilder::new(TagName::A)
            .class("nav-link")
            .href(&format!("#{fragment}"))
            .text(label)
            .append_to(doc, item);
    }
    let hamburger = ElementBuilder::new(TagName::Div)
        .class("hamburger")
        .attr("aria-label", "Toggle navigation")
        .append_to(doc, navbar);
    for _ in 0..3 {
        ElementBuilder::new(TagName::Span)
            .class("bar")
            .append_to(doc, hamburger);
    }
}

fn build_card(doc: &mut Document, parent: NodeId, id: &str, title: &str, top: i32) {
    let card = ElementBuilder::new(TagName::Article)
        .class("article-card animate-on-scroll")
        .attr("data-card", id)
        .geometry(top, CARD_HEIGHT)
        .append_to(doc, parent);
    ElementBuilder::new(TagName::H3)
        .text(title)
        .append_to(doc, card);
    ElementBuilder::new(TagName::A)
        .class("read-more")
        .href("#")
        .attr("data-article", id)
        .text("Read More")
        .append_to(doc, card);
    ElementBuilder::new(TagName::Button)
        .class("pdf-download")
        .attr("data-article", id)
        .text("Download PDF")
        .append_to(doc, card);
}

/// Find the "Read More" control for `article_id`.
pub fn read_more(doc: &Document, article_id: &str) -> Option<NodeId> {
    control(doc, "read-more", article_id)
}

/// Find the PDF download control for `article_id`.
pub fn pdf_download(doc: &Document, article_id: &str) -> Option<NodeId> {
    control(doc, "pdf-download", article_id)
}

fn control(doc: &Document, class: &str, article_id: &str) -> Option<NodeId> {
    doc.descendants(doc.root).find(|&n| {
        doc.element(n)
            .is_some_and(|el| el.has_class(class) && el.dataset("article") == Some(article_id))
    })
}
