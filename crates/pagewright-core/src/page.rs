//! Pages and the elements stacked on them.

use crate::element::{Element, ElementId};
use crate::geometry::{GeometrySource, deserialize_size, sanitize_size};
use crate::style::Background;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pages.
pub type PageId = Uuid;

/// Default page size (A4 at 96 dpi).
pub const DEFAULT_PAGE_SIZE: Size = Size::new(794.0, 1123.0);

/// A virtual page holding elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Unique identifier.
    pub id: PageId,
    /// Size of the element area.
    #[serde(deserialize_with = "deserialize_size")]
    pub size: Size,
    /// Horizontal position inside the page strip.
    #[serde(default)]
    pub left: f64,
    /// Vertical position inside the page strip.
    #[serde(default)]
    pub top: f64,
    /// Page background.
    #[serde(default)]
    pub background: Background,
    /// Elements back to front.
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Page {
    /// Create an empty page.
    pub fn new(size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            size: sanitize_size(size),
            left: 0.0,
            top: 0.0,
            background: Background::None,
            elements: Vec::new(),
        }
    }

    /// Change the page size.
    pub fn resize(&mut self, size: Size) {
        self.size = sanitize_size(size);
    }

    /// Add an element on top of the stack.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Remove an element.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Get an element by ID.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Check if the page holds an element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Stacking index of an element (0 = bottom).
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == id)
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Bring an element to the front (topmost).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        match self.remove_element(id) {
            Some(element) => {
                self.elements.push(element);
                true
            }
            None => false,
        }
    }

    /// Send an element to the back (bottommost).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        match self.remove_element(id) {
            Some(element) => {
                self.elements.insert(0, element);
                true
            }
            None => false,
        }
    }

    /// Move an element one layer forward (towards front).
    /// Returns true if the element was moved, false if already at front.
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        if let Some(pos) = self.index_of(id) {
            if pos + 1 < self.elements.len() {
                self.elements.swap(pos, pos + 1);
                return true;
            }
        }
        false
    }

    /// Move an element one layer backward (towards back).
    /// Returns true if the element was moved, false if already at back.
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        if let Some(pos) = self.index_of(id) {
            if pos > 0 {
                self.elements.swap(pos, pos - 1);
                return true;
            }
        }
        false
    }

    /// Duplicate an element directly above the original.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let index = self.index_of(id)?;
        let copy = self.elements[index].duplicate();
        let copy_id = copy.id;
        self.elements.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Copy of the page with fresh page and element IDs.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            elements: self.elements.iter().map(Element::duplicate).collect(),
            ..self.clone()
        }
    }

    /// Center of the element area.
    pub fn center(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }
}

impl GeometrySource for Page {
    type Id = ElementId;

    fn container_extent(&self) -> Size {
        self.size
    }

    fn sibling_centers(&self, exclude: &ElementId) -> Vec<Point> {
        self.elements
            .iter()
            .filter(|e| e.id != *exclude)
            .map(Element::center)
            .collect()
    }
}
