//! Start-up checks for page structure.

use folio_dom::Document;

/// Log every selector with no match. Returns the missing ones.
pub fn missing_required<'a>(doc: &Document, selectors: &'a [String]) -> Vec<&'a str> {
    let mut missing = Vec::new();
    for selector in selectors {
        match doc.query_selector(selector) {
            Ok(Some(_)) => {},
            Ok(None) => {
                log::warn!("Required element not found: {selector}");
                missing.push(selector.as_str());
            },
            Err(e) => {
                log::error!("Invalid required selector {selector}: {e}");
                missing.push(selector.as_str());
            },
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{ElementBuilder, TagName};

    #[test]
    fn reports_only_missing() {
        let mut doc = Document::new();
        let root = doc.root;
        ElementBuilder::new(TagName::Nav)
            .class("navbar")
            .append_to(&mut doc, root);
        let selectors = vec![".navbar".to_string(), ".hero".to_string(), "[".to_string()];
        assert_eq!(missing_required(&doc, &selectors), vec![".hero", "["]);
    }
}
