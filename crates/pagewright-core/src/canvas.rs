//! Canvas state and the operations behind canvas events.

use crate::config::EditorConfig;
use crate::document::PageDocument;
use crate::element::{Element, ElementContent, ElementId};
use crate::events::{CanvasEvent, RemoveTarget, UiEvent};
use crate::mediator::{Mediator, PublishError};
use crate::page::{Page, PageId};
use crate::style::{Background, Color};
use kurbo::Size;
use std::rc::Rc;
use thiserror::Error;

/// Canvas errors.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Runtime canvas state (not persisted).
///
/// Holds the document, which page is selected and which element is
/// active. UI-facing notifications go out through the injected `ui`
/// mediator.
#[derive(Debug)]
pub struct Canvas {
    /// The document being edited.
    pub document: PageDocument,
    config: EditorConfig,
    selected_page: Option<PageId>,
    active: Option<ElementId>,
    ui: Rc<Mediator<UiEvent>>,
}

impl Canvas {
    /// Create a canvas with an empty document.
    pub fn new(config: EditorConfig, ui: Rc<Mediator<UiEvent>>) -> Self {
        Self::with_document(PageDocument::new(), config, ui)
    }

    /// Create a canvas with an existing document.
    pub fn with_document(
        document: PageDocument,
        config: EditorConfig,
        ui: Rc<Mediator<UiEvent>>,
    ) -> Self {
        Self {
            document,
            config,
            selected_page: None,
            active: None,
            ui,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Set the width of the area pages are centered in.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.config.viewport_width = width;
    }

    pub fn selected_page(&self) -> Option<PageId> {
        self.selected_page
    }

    /// The element currently selected for editing.
    pub fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn selected_page_mut(&mut self) -> Option<&mut Page> {
        let id = self.selected_page?;
        self.document.page_mut(id)
    }

    /// Apply a canvas event.
    pub fn handle(&mut self, event: &CanvasEvent) -> Result<(), CanvasError> {
        match event {
            CanvasEvent::AddPage => self.add_page().map(|_| ()),
            CanvasEvent::RemoveItem(target) => self.remove_item(*target),
            CanvasEvent::AddNewItem(content) => self.add_new_item(content.clone()).map(|_| ()),
            CanvasEvent::ChangePageSize(size) => self.change_page_size(*size),
            CanvasEvent::ChangeBackground(src) => {
                self.apply_background(Background::Image { src: src.clone() });
                Ok(())
            }
            CanvasEvent::ChangeBackgroundColor(color) => {
                self.change_background_color(*color);
                Ok(())
            }
            CanvasEvent::BlurActive => self.blur_active(),
            CanvasEvent::RearrangePages => {
                self.rearrange_pages();
                Ok(())
            }
            CanvasEvent::ApplyAnimation(name) => self.apply_animation(name),
        }
    }

    /// A click landed on `page`, optionally on one of its elements.
    ///
    /// Selects the page, deactivates the previous active element unless it
    /// was hit again, and activates the hit element.
    pub fn click_page(&mut self, page: PageId, hit: Option<ElementId>) -> Result<(), CanvasError> {
        let size = self
            .document
            .page(page)
            .ok_or(CanvasError::PageNotFound(page))?
            .size;
        self.ui.publish(&UiEvent::PageSizeChanged(size))?;
        self.selected_page = Some(page);

        if let Some(active) = self.active {
            if hit != Some(active) {
                self.set_active(active, false)?;
            }
        }
        if let Some(hit) = hit {
            if self.active != Some(hit) {
                self.set_active(hit, true)?;
            }
        }
        Ok(())
    }

    /// Append a page, select it and center it.
    ///
    /// If a UI handler fails while the page is being selected, the page is
    /// removed again and the error returned.
    pub fn add_page(&mut self) -> Result<PageId, CanvasError> {
        let id = self
            .document
            .add_page(self.config.page_size, self.config.page_gap);
        let selected = self
            .click_page(id, None)
            .and_then(|()| self.change_page_size(None));
        if let Err(err) = selected {
            log::warn!("Rolling back page {}: {}", id, err);
            self.document.remove_page(id);
            if self.selected_page == Some(id) {
                self.selected_page = None;
            }
            return Err(err);
        }
        Ok(id)
    }

    /// Remove a page or element.
    pub fn remove_item(&mut self, target: RemoveTarget) -> Result<(), CanvasError> {
        match target {
            RemoveTarget::Page(id) => self.remove_page(id),
            RemoveTarget::Element(id) => {
                if self.active == Some(id) {
                    self.active = None;
                    self.ui.publish(&UiEvent::ShowHotTools(None))?;
                }
                self.document
                    .remove_element(id)
                    .map(|_| ())
                    .ok_or(CanvasError::ElementNotFound(id))
            }
            RemoveTarget::Selection => {
                if let Some(active) = self.active.take() {
                    self.document.remove_element(active);
                    self.ui.publish(&UiEvent::ShowHotTools(None))?;
                    Ok(())
                } else if let Some(page) = self.selected_page {
                    self.remove_page(page)
                } else {
                    log::debug!("Nothing selected to remove");
                    Ok(())
                }
            }
        }
    }

    fn remove_page(&mut self, id: PageId) -> Result<(), CanvasError> {
        let page = self
            .document
            .remove_page(id)
            .ok_or(CanvasError::PageNotFound(id))?;
        if let Some(active) = self.active {
            if page.contains(active) {
                self.active = None;
                self.ui.publish(&UiEvent::ShowHotTools(None))?;
            }
        }
        if self.selected_page == Some(id) {
            self.selected_page = None;
        }
        self.rearrange_pages();
        Ok(())
    }

    /// Insert new content on the selected page and make it active.
    ///
    /// Returns `None` when no page is selected.
    pub fn add_new_item(&mut self, content: ElementContent) -> Result<Option<ElementId>, CanvasError> {
        if self.selected_page.is_none() {
            log::warn!("Ignoring new {} item: no page selected", content.kind().as_str());
            return Ok(None);
        }
        self.blur_active()?;

        let Some(page) = self.selected_page_mut() else {
            return Ok(None);
        };
        let id = page.add_element(Element::new(content));
        log::info!("Added element {} to page {}", id, page.id);
        self.set_active(id, true)?;
        Ok(Some(id))
    }

    /// Resize the selected page when a size is given, then center it.
    pub fn change_page_size(&mut self, size: Option<Size>) -> Result<(), CanvasError> {
        self.blur_active()?;
        let viewport = self.config.viewport_width;
        let Some(page) = self.selected_page_mut() else {
            return Ok(());
        };
        if let Some(size) = size {
            page.resize(size);
        }
        page.left = ((viewport - page.size.width) / 2.0).max(0.0);
        Ok(())
    }

    /// Set the background of the active element, or else the selected page.
    pub fn apply_background(&mut self, background: Background) {
        if let Some(active) = self.active {
            if let Some(element) = self.document.element_mut(active) {
                element.background = background;
                return;
            }
        }
        if let Some(page) = self.selected_page_mut() {
            page.background = background;
        }
    }

    /// Solid color background; replaces any background image.
    pub fn change_background_color(&mut self, color: Color) {
        self.apply_background(Background::Color { color });
    }

    /// Deactivate the active element.
    pub fn blur_active(&mut self) -> Result<(), CanvasError> {
        match self.active {
            Some(active) => self.set_active(active, false),
            None => Ok(()),
        }
    }

    /// Restack pages with the configured gap.
    pub fn rearrange_pages(&mut self) {
        self.document.rearrange_pages(self.config.page_gap);
    }

    /// Set the active element's entrance animation.
    pub fn apply_animation(&mut self, name: &str) -> Result<(), CanvasError> {
        let element = self.active.and_then(|id| self.document.element_mut(id));
        match element {
            Some(element) => {
                element.animation = Some(name.to_string());
                Ok(())
            }
            None => {
                self.ui.publish(&UiEvent::ShowWarning(
                    "Select an element to animate first".to_string(),
                ))?;
                Ok(())
            }
        }
    }

    fn set_active(&mut self, id: ElementId, active: bool) -> Result<(), CanvasError> {
        let element = self
            .document
            .element_mut(id)
            .ok_or(CanvasError::ElementNotFound(id))?;
        if active {
            element.editable = element.content.is_editable();
            let kind = element.kind();
            self.active = Some(id);
            if let Some(page) = self.document.page_of(id) {
                self.selected_page = Some(page);
            }
            self.ui.publish(&UiEvent::ShowHotTools(Some(kind)))?;
        } else {
            element.editable = false;
            self.active = None;
            self.ui.publish(&UiEvent::ShowHotTools(None))?;
        }
        Ok(())
    }
}
