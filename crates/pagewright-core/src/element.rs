//! Content blocks placed on a page.

use crate::geometry::ElementGeometry;
use crate::style::Background;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Text inserted by a fresh text block.
pub const PLACEHOLDER_TEXT: &str = "Double-click to edit";

/// Content carried by an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementContent {
    /// Rich text.
    Text { text: String },
    /// Picture referenced by URL.
    Image { src: String },
    /// Rendered form markup.
    Form { html: String },
    /// Prebuilt component (card, note, tag...) from the component store.
    Component { kind: String, html: String },
    /// Audio player.
    Audio {
        src: String,
        #[serde(default)]
        looping: bool,
        #[serde(default)]
        autoplay: bool,
    },
    /// Embedded video player.
    Video { embed_code: String },
}

/// Content category, used to pick the matching toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Image,
    Form,
    Component,
    Audio,
    Video,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Image => "image",
            ContentKind::Form => "form",
            ContentKind::Component => "component",
            ContentKind::Audio => "audio",
            ContentKind::Video => "video",
        }
    }
}

impl ElementContent {
    /// A text block with placeholder text.
    pub fn placeholder_text() -> Self {
        ElementContent::Text {
            text: PLACEHOLDER_TEXT.to_string(),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ElementContent::Text { .. } => ContentKind::Text,
            ElementContent::Image { .. } => ContentKind::Image,
            ElementContent::Form { .. } => ContentKind::Form,
            ElementContent::Component { .. } => ContentKind::Component,
            ElementContent::Audio { .. } => ContentKind::Audio,
            ElementContent::Video { .. } => ContentKind::Video,
        }
    }

    /// Whether the content accepts inline editing while active.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            ElementContent::Text { .. } | ElementContent::Component { .. }
        )
    }

    /// Whether resizing keeps the width/height ratio.
    pub fn preserves_aspect_ratio(&self) -> bool {
        matches!(self, ElementContent::Image { .. })
    }

    /// Initial size of a freshly inserted element.
    pub fn default_size(&self) -> Size {
        match self {
            ElementContent::Image { .. } => Size::new(200.0, 150.0),
            ElementContent::Audio { .. } => Size::new(300.0, 54.0),
            ElementContent::Video { .. } => Size::new(320.0, 180.0),
            _ => Size::new(200.0, 100.0),
        }
    }
}

/// A block on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// What the block shows.
    pub content: ElementContent,
    /// Position and size relative to the page.
    pub geometry: ElementGeometry,
    /// Background of the content box.
    #[serde(default)]
    pub background: Background,
    /// Entrance animation class, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    /// Inline editing is enabled. Only true while the element is active.
    #[serde(skip)]
    pub editable: bool,
}

impl Element {
    /// Create an element at the page origin with its default size.
    pub fn new(content: ElementContent) -> Self {
        let size = content.default_size();
        Self {
            id: Uuid::new_v4(),
            content,
            geometry: ElementGeometry::new(Point::ZERO, size),
            background: Background::None,
            animation: None,
            editable: false,
        }
    }

    /// Builder-style position override.
    pub fn at(mut self, offset: Point) -> Self {
        self.geometry = ElementGeometry::new(offset, self.geometry.size);
        self
    }

    /// Builder-style size override.
    pub fn sized(mut self, size: Size) -> Self {
        self.geometry = ElementGeometry::new(self.geometry.offset, size);
        self
    }

    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }

    pub fn offset(&self) -> Point {
        self.geometry.offset
    }

    pub fn size(&self) -> Size {
        self.geometry.size
    }

    pub fn center(&self) -> Point {
        self.geometry.center()
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.geometry = ElementGeometry::new(offset, self.geometry.size);
    }

    pub fn set_size(&mut self, size: Size) {
        self.geometry = ElementGeometry::new(self.geometry.offset, size);
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.geometry = self.geometry.translated(delta);
    }

    /// Copy of this element with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            editable: false,
            ..self.clone()
        }
    }
}
