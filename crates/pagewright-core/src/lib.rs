//! Pagewright Core Library
//!
//! Document model, event bus and alignment snapping for the Pagewright
//! page editor.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod document;
pub mod element;
pub mod events;
pub mod geometry;
pub mod interaction;
pub mod mediator;
pub mod page;
pub mod snap;
pub mod storage;
pub mod style;

pub use canvas::{Canvas, CanvasError};
pub use config::{ConfigError, EditorConfig};
pub use controller::CanvasController;
pub use document::{DEFAULT_PAGE_GAP, PageDocument};
pub use element::{ContentKind, Element, ElementContent, ElementId};
pub use events::{CanvasEvent, CanvasEventKind, RemoveTarget, UiEvent, UiEventKind};
pub use geometry::{ElementGeometry, GeometrySource};
pub use interaction::{DragSession, GuideOverlay, ResizeDelta, resize_element};
pub use mediator::{Event, Handler, HandlerResult, Mediator, PublishError, handler};
pub use page::{DEFAULT_PAGE_SIZE, Page, PageId};
pub use snap::{DEFAULT_SNAP_TOLERANCE, Guide, SnapResult, snap_in, snap_to_alignment};
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use style::{Background, Color};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
