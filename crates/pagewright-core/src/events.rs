//! Events exchanged between editor panels and the canvas.

use crate::element::{ContentKind, ElementContent, ElementId};
use crate::mediator::Event;
use crate::page::PageId;
use crate::style::Color;
use kurbo::Size;

/// What a remove request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveTarget {
    /// The active element if there is one, otherwise the selected page.
    Selection,
    /// A specific page.
    Page(PageId),
    /// A specific element.
    Element(ElementId),
}

/// Commands sent to the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// Append a page and select it.
    AddPage,
    /// Remove a page or element.
    RemoveItem(RemoveTarget),
    /// Insert new content on the selected page and activate it.
    AddNewItem(ElementContent),
    /// Resize the selected page, or just recenter it when `None`.
    ChangePageSize(Option<Size>),
    /// Use an image as background of the active element or selected page.
    ChangeBackground(String),
    /// Use a solid color as background of the active element or selected page.
    ChangeBackgroundColor(Color),
    /// Deactivate the active element.
    BlurActive,
    /// Restack pages.
    RearrangePages,
    /// Set the entrance animation of the active element.
    ApplyAnimation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasEventKind {
    AddPage,
    RemoveItem,
    AddNewItem,
    ChangePageSize,
    ChangeBackground,
    ChangeBackgroundColor,
    BlurActive,
    RearrangePages,
    ApplyAnimation,
}

impl CanvasEventKind {
    pub const ALL: [CanvasEventKind; 9] = [
        CanvasEventKind::AddPage,
        CanvasEventKind::RemoveItem,
        CanvasEventKind::AddNewItem,
        CanvasEventKind::ChangePageSize,
        CanvasEventKind::ChangeBackground,
        CanvasEventKind::ChangeBackgroundColor,
        CanvasEventKind::BlurActive,
        CanvasEventKind::RearrangePages,
        CanvasEventKind::ApplyAnimation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanvasEventKind::AddPage => "add-page",
            CanvasEventKind::RemoveItem => "remove-item",
            CanvasEventKind::AddNewItem => "add-new-item",
            CanvasEventKind::ChangePageSize => "change-page-size",
            CanvasEventKind::ChangeBackground => "change-background",
            CanvasEventKind::ChangeBackgroundColor => "change-background-color",
            CanvasEventKind::BlurActive => "blur-active",
            CanvasEventKind::RearrangePages => "rearrange-pages",
            CanvasEventKind::ApplyAnimation => "apply-animation",
        }
    }
}

impl Event for CanvasEvent {
    type Kind = CanvasEventKind;

    fn kind(&self) -> CanvasEventKind {
        match self {
            CanvasEvent::AddPage => CanvasEventKind::AddPage,
            CanvasEvent::RemoveItem(_) => CanvasEventKind::RemoveItem,
            CanvasEvent::AddNewItem(_) => CanvasEventKind::AddNewItem,
            CanvasEvent::ChangePageSize(_) => CanvasEventKind::ChangePageSize,
            CanvasEvent::ChangeBackground(_) => CanvasEventKind::ChangeBackground,
            CanvasEvent::ChangeBackgroundColor(_) => CanvasEventKind::ChangeBackgroundColor,
            CanvasEvent::BlurActive => CanvasEventKind::BlurActive,
            CanvasEvent::RearrangePages => CanvasEventKind::RearrangePages,
            CanvasEvent::ApplyAnimation(_) => CanvasEventKind::ApplyAnimation,
        }
    }

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Notifications sent from the canvas to the surrounding panels.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Show a transient warning message.
    ShowWarning(String),
    /// Show the toolbar for the given content kind, or hide all toolbars.
    ShowHotTools(Option<ContentKind>),
    /// The selected page's size, for the page size inputs.
    PageSizeChanged(Size),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEventKind {
    ShowWarning,
    ShowHotTools,
    PageSizeChanged,
}

impl UiEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UiEventKind::ShowWarning => "show-warning",
            UiEventKind::ShowHotTools => "show-hot-tools",
            UiEventKind::PageSizeChanged => "page-size-changed",
        }
    }
}

impl Event for UiEvent {
    type Kind = UiEventKind;

    fn kind(&self) -> UiEventKind {
        match self {
            UiEvent::ShowWarning(_) => UiEventKind::ShowWarning,
            UiEvent::ShowHotTools(_) => UiEventKind::ShowHotTools,
            UiEvent::PageSizeChanged(_) => UiEventKind::PageSizeChanged,
        }
    }

    fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canvas_kinds_are_distinct() {
        let names: HashSet<_> = CanvasEventKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), CanvasEventKind::ALL.len());
    }

    #[test]
    fn test_event_kind_and_name() {
        let event = CanvasEvent::AddNewItem(ElementContent::placeholder_text());
        assert_eq!(event.kind(), CanvasEventKind::AddNewItem);
        assert_eq!(event.name(), "add-new-item");

        let event = UiEvent::ShowHotTools(None);
        assert_eq!(event.kind(), UiEventKind::ShowHotTools);
        assert_eq!(event.name(), "show-hot-tools");
    }
}
