//! Drag and resize interactions on page elements.
//!
//! The snapper itself is pure; this module is where its result gets
//! written back to the document and turned into guide lines.

use crate::canvas::CanvasError;
use crate::document::PageDocument;
use crate::element::ElementId;
use crate::geometry::{ElementGeometry, sanitize_size};
use crate::page::PageId;
use crate::snap::{Guide, SnapResult, snap_in};
use kurbo::{Point, Size, Vec2};

/// Alignment guides shown while dragging.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuideOverlay {
    /// Whether the guide layer is displayed at all.
    pub visible: bool,
    /// Horizontal guide, when vertical centers line up.
    pub horizontal: Option<Guide>,
    /// Vertical guide, when horizontal centers line up.
    pub vertical: Option<Guide>,
}

impl GuideOverlay {
    fn shown() -> Self {
        Self {
            visible: true,
            ..Self::default()
        }
    }

    fn update(&mut self, result: &SnapResult) {
        self.horizontal = result.horizontal;
        self.vertical = result.vertical;
    }
}

/// State of an element being dragged.
#[derive(Debug, Clone)]
pub struct DragSession {
    /// The element being dragged.
    pub element: ElementId,
    /// Page holding the element.
    pub page: PageId,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Geometry when the drag started.
    pub original: ElementGeometry,
    tolerance: f64,
    overlay: GuideOverlay,
}

impl DragSession {
    /// Start dragging `element` from `start_point`.
    pub fn begin(
        document: &PageDocument,
        element: ElementId,
        start_point: Point,
        tolerance: f64,
    ) -> Result<Self, CanvasError> {
        let page = document
            .page_of(element)
            .ok_or(CanvasError::ElementNotFound(element))?;
        let original = document
            .element(element)
            .ok_or(CanvasError::ElementNotFound(element))?
            .geometry;
        log::debug!("Drag start on element {}", element);
        Ok(Self {
            element,
            page,
            start_point,
            current_point: start_point,
            original,
            tolerance,
            overlay: GuideOverlay::shown(),
        })
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Current guide overlay.
    pub fn overlay(&self) -> GuideOverlay {
        self.overlay
    }

    /// Move the drag to `point`, snap the element and write its new offset.
    pub fn update(
        &mut self,
        document: &mut PageDocument,
        point: Point,
    ) -> Result<SnapResult, CanvasError> {
        self.current_point = point;
        let proposed = self.original.translated(self.delta());

        let page = document
            .page_mut(self.page)
            .ok_or(CanvasError::PageNotFound(self.page))?;
        let result = snap_in(&*page, &self.element, proposed, self.tolerance);
        page.element_mut(self.element)
            .ok_or(CanvasError::ElementNotFound(self.element))?
            .set_offset(result.offset);

        self.overlay.update(&result);
        Ok(result)
    }

    /// Finish the drag and hide the guides.
    pub fn end(mut self) -> GuideOverlay {
        self.overlay = GuideOverlay::default();
        log::debug!("Drag end on element {}", self.element);
        self.overlay
    }

    /// Abort the drag, restoring the original position.
    pub fn cancel(self, document: &mut PageDocument) -> GuideOverlay {
        if let Some(element) = document.element_mut(self.element) {
            element.set_offset(self.original.offset);
        }
        GuideOverlay::default()
    }
}

/// Result of a resize gesture: the new size and how far the left and top
/// edges moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDelta {
    pub size: Size,
    pub left: f64,
    pub top: f64,
}

/// Resize an element, shifting its offset by the moved edges.
///
/// Content that preserves its aspect ratio (images) keeps the ratio it had
/// before the resize, following whichever axis changed more.
pub fn resize_element(
    document: &mut PageDocument,
    id: ElementId,
    delta: ResizeDelta,
) -> Result<ElementGeometry, CanvasError> {
    let element = document
        .element_mut(id)
        .ok_or(CanvasError::ElementNotFound(id))?;
    let old = element.size();
    let mut size = sanitize_size(delta.size);

    if element.content.preserves_aspect_ratio() && old.width > 0.0 && old.height > 0.0 {
        let ratio = old.height / old.width;
        let dw = (size.width - old.width).abs() / old.width;
        let dh = (size.height - old.height).abs() / old.height;
        size = if dw >= dh {
            Size::new(size.width, size.width * ratio)
        } else {
            Size::new(size.height / ratio, size.height)
        };
    }

    let offset = element.offset() + Vec2::new(delta.left, delta.top);
    element.geometry = ElementGeometry::new(offset, size);
    Ok(element.geometry)
}
