//! Page document: the persisted state of the editor.

use crate::element::{Element, ElementId};
use crate::page::{Page, PageId};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Vertical gap between stacked pages.
pub const DEFAULT_PAGE_GAP: f64 = 75.0;

/// A document made of pages stacked top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Pages in display order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Default for PageDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PageDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            pages: Vec::new(),
        }
    }

    /// Append a page below the last one.
    pub fn add_page(&mut self, size: Size, gap: f64) -> PageId {
        let mut page = Page::new(size);
        if let Some(last) = self.pages.last() {
            page.top = last.top + last.size.height + gap;
        }
        let id = page.id;
        log::info!("Adding page {} ({}x{})", id, page.size.width, page.size.height);
        self.pages.push(page);
        id
    }

    /// Remove a page.
    pub fn remove_page(&mut self, id: PageId) -> Option<Page> {
        let index = self.page_index(id)?;
        log::info!("Removing page {}", id);
        Some(self.pages.remove(index))
    }

    /// Duplicate a page directly after the original and restack.
    pub fn duplicate_page(&mut self, id: PageId, gap: f64) -> Option<PageId> {
        let index = self.page_index(id)?;
        let copy = self.pages[index].duplicate();
        let copy_id = copy.id;
        self.pages.insert(index + 1, copy);
        self.rearrange_pages(gap);
        Some(copy_id)
    }

    /// Stack pages top to bottom, `gap` apart.
    pub fn rearrange_pages(&mut self, gap: f64) {
        let mut top = 0.0;
        for page in &mut self.pages {
            page.top = top;
            top += page.size.height + gap;
        }
    }

    /// Copy the background of `source` onto every other page.
    pub fn apply_background_to_all(&mut self, source: PageId) -> bool {
        let Some(background) = self.page(source).map(|p| p.background.clone()) else {
            return false;
        };
        for page in self.pages.iter_mut().filter(|p| p.id != source) {
            page.background = background.clone();
        }
        true
    }

    /// Position of a page in display order.
    pub fn page_index(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id == id)
    }

    /// Get a page by ID.
    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Get a mutable reference to a page by ID.
    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// Page holding an element.
    pub fn page_of(&self, element: ElementId) -> Option<PageId> {
        self.pages.iter().find(|p| p.contains(element)).map(|p| p.id)
    }

    /// Find an element on any page.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.pages.iter().find_map(|p| p.element(id))
    }

    /// Find an element on any page, mutably.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.pages.iter_mut().find_map(|p| p.element_mut(id))
    }

    /// Remove an element from whichever page holds it.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        self.pages.iter_mut().find_map(|p| p.remove_element(id))
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get the number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Total number of elements across pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementContent;
    use crate::style::{Background, Color};

    fn size(w: f64, h: f64) -> Size {
        Size::new(w, h)
    }

    #[test]
    fn test_document_creation() {
        let doc = PageDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.element_count(), 0);
    }

    #[test]
    fn test_add_page_stacks_below_last() {
        let mut doc = PageDocument::new();
        let first = doc.add_page(size(800.0, 600.0), DEFAULT_PAGE_GAP);
        let second = doc.add_page(size(800.0, 400.0), DEFAULT_PAGE_GAP);

        assert_eq!(doc.page(first).unwrap().top, 0.0);
        assert_eq!(doc.page(second).unwrap().top, 675.0);
    }

    #[test]
    fn test_remove_page_and_rearrange() {
        let mut doc = PageDocument::new();
        let a = doc.add_page(size(100.0, 100.0), 10.0);
        let b = doc.add_page(size(100.0, 200.0), 10.0);
        let c = doc.add_page(size(100.0, 300.0), 10.0);
        assert_eq!(doc.page(c).unwrap().top, 320.0);

        assert!(doc.remove_page(b).is_some());
        doc.rearrange_pages(10.0);

        assert_eq!(doc.page(a).unwrap().top, 0.0);
        assert_eq!(doc.page(c).unwrap().top, 110.0);
        assert!(doc.remove_page(b).is_none());
    }

    #[test]
    fn test_duplicate_page_inserted_after() {
        let mut doc = PageDocument::new();
        let a = doc.add_page(size(100.0, 100.0), 10.0);
        let b = doc.add_page(size(100.0, 100.0), 10.0);
        doc.page_mut(a)
            .unwrap()
            .add_element(Element::new(ElementContent::placeholder_text()));

        let copy = doc.duplicate_page(a, 10.0).unwrap();

        assert_eq!(doc.page_index(copy), Some(1));
        assert_eq!(doc.page_index(b), Some(2));
        assert_eq!(doc.page(copy).unwrap().top, 110.0);
        assert_eq!(doc.page(b).unwrap().top, 220.0);
        assert_eq!(doc.element_count(), 2);
    }

    #[test]
    fn test_apply_background_to_all() {
        let mut doc = PageDocument::new();
        let a = doc.add_page(size(100.0, 100.0), 10.0);
        doc.add_page(size(100.0, 100.0), 10.0);
        doc.add_page(size(100.0, 100.0), 10.0);
        let bg = Background::Color {
            color: Color::new(1, 2, 3, 255),
        };
        doc.page_mut(a).unwrap().background = bg.clone();

        assert!(doc.apply_background_to_all(a));
        assert!(doc.pages.iter().all(|p| p.background == bg));
        assert!(!doc.apply_background_to_all(Uuid::new_v4()));
    }

    #[test]
    fn test_element_lookup_across_pages() {
        let mut doc = PageDocument::new();
        doc.add_page(size(100.0, 100.0), 10.0);
        let b = doc.add_page(size(100.0, 100.0), 10.0);
        let element = Element::new(ElementContent::Image { src: "x.png".into() });
        let id = doc.page_mut(b).unwrap().add_element(element);

        assert_eq!(doc.page_of(id), Some(b));
        assert!(doc.element(id).is_some());
        assert!(doc.remove_element(id).is_some());
        assert!(doc.element(id).is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut doc = PageDocument::new();
        doc.name = "Flyer".to_string();
        let page = doc.add_page(size(300.0, 200.0), DEFAULT_PAGE_GAP);
        doc.page_mut(page)
            .unwrap()
            .add_element(Element::new(ElementContent::placeholder_text()));

        let json = doc.to_json().unwrap();
        let loaded = PageDocument::from_json(&json).unwrap();

        assert_eq!(loaded, doc);
    }
}
