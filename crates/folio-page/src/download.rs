//! Resume and article PDF downloads.

use folio_dom::{Document, NodeId};
use folio_types::error::Result;

use crate::catalog::ContentCatalog;
use crate::host::Host;

pub const PDF_DOWNLOAD_SELECTOR: &str = ".pdf-download[data-article]";
pub const RESUME_DOWNLOAD_SELECTOR: &str = ".btn-download";

/// What a click on a download control resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// The resume link was followed; the browser downloads it itself.
    Resume { href: Option<String> },
    /// An article PDF was handed to the host.
    Article { id: String, filename: String },
    /// The control names an article with no PDF.
    Unavailable { id: String },
}

/// Resolve a click on a download control. The resume link keeps its
/// default action; article PDFs are downloaded through the host.
pub fn handle_click<H: Host>(
    doc: &Document,
    catalog: &ContentCatalog,
    host: &mut H,
    target: NodeId,
) -> Result<Option<Download>> {
    if let Some(button) = doc.closest(target, PDF_DOWNLOAD_SELECTOR)? {
        let id = doc
            .element(button)
            .and_then(|el| el.dataset("article"))
            .unwrap_or_default()
            .to_string();
        let Some(pdf) = catalog.get(&id).and_then(|r| r.pdf.as_ref()) else {
            log::warn!("No PDF available for article {id}");
            return Ok(Some(Download::Unavailable { id }));
        };
        host.download(&pdf.path, &pdf.filename);
        log::info!("Downloading {}", pdf.filename);
        return Ok(Some(Download::Article {
            id,
            filename: pdf.filename.clone(),
        }));
    }

    if let Some(link) = doc.closest(target, RESUME_DOWNLOAD_SELECTOR)? {
        log::info!("Resume download initiated");
        return Ok(Some(Download::Resume {
            href: doc.attribute(link, "href").map(str::to_string),
        }));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArticleRecord, ContentCatalog};
    use crate::host::{DownloadRequest, HeadlessHost};
    use folio_dom::{ElementBuilder, TagName};

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root;
        let pdf = ElementBuilder::new(TagName::Button)
            .class("pdf-download")
            .attr("data-article", "article2")
            .append_to(&mut doc, root);
        let icon = ElementBuilder::new(TagName::Span)
            .class("icon")
            .append_to(&mut doc, pdf);
        let resume = ElementBuilder::new(TagName::A)
            .class("btn-download")
            .href("resume.pdf")
            .append_to(&mut doc, root);
        let other = ElementBuilder::new(TagName::P).append_to(&mut doc, root);
        (doc, icon, resume, other)
    }

    #[test]
    fn article_pdf_goes_through_host() {
        let (doc, icon, _, _) = page();
        let catalog = ContentCatalog::builtin();
        let mut host = HeadlessHost::new(800, 2000);
        let got = handle_click(&doc, &catalog, &mut host, icon).unwrap();
        let expected = catalog.get("article2").unwrap().pdf.clone().unwrap();
        assert_eq!(
            got,
            Some(Download::Article {
                id: "article2".into(),
                filename: expected.filename.clone(),
            })
        );
        assert_eq!(
            host.downloads,
            vec![DownloadRequest {
                href: expected.path,
                filename: expected.filename,
            }]
        );
    }

    #[test]
    fn article_without_pdf_is_unavailable() {
        let (doc, icon, _, _) = page();
        let catalog = ContentCatalog::from_records(vec![ArticleRecord {
            id: "article2".into(),
            title: "T".into(),
            body_markup: String::new(),
            tags: vec![],
            pdf: None,
        }])
        .unwrap();
        let mut host = HeadlessHost::new(800, 2000);
        let got = handle_click(&doc, &catalog, &mut host, icon).unwrap();
        assert_eq!(got, Some(Download::Unavailable { id: "article2".into() }));
        assert!(host.downloads.is_empty());
    }

    #[test]
    fn resume_is_left_to_the_browser() {
        let (doc, _, resume, _) = page();
        let mut host = HeadlessHost::new(800, 2000);
        let got = handle_click(&doc, &ContentCatalog::builtin(), &mut host, resume).unwrap();
        assert_eq!(
            got,
            Some(Download::Resume {
                href: Some("resume.pdf".into())
            })
        );
        assert!(host.downloads.is_empty());
    }

    #[test]
    fn other_clicks_pass_through() {
        let (doc, _, _, other) = page();
        let mut host = HeadlessHost::new(800, 2000);
        assert_eq!(handle_click(&doc, &ContentCatalog::builtin(), &mut host, other).unwrap(), None);
    }
}
