//! Wiring between the canvas event bus and a [`Canvas`].

use crate::canvas::Canvas;
use crate::events::{CanvasEvent, CanvasEventKind};
use crate::mediator::{Handler, Mediator, handler};
use std::cell::RefCell;
use std::rc::Rc;

/// Subscribes a canvas to every [`CanvasEventKind`] on a bus.
///
/// A handler that publishes a canvas event while the canvas is already
/// handling one gets a borrow error back instead of a panic.
pub struct CanvasController {
    canvas: Rc<RefCell<Canvas>>,
    bus: Rc<Mediator<CanvasEvent>>,
    handler: Handler<CanvasEvent>,
}

impl CanvasController {
    /// Subscribe `canvas` to `bus`.
    pub fn attach(canvas: Rc<RefCell<Canvas>>, bus: Rc<Mediator<CanvasEvent>>) -> Self {
        let target = Rc::clone(&canvas);
        let handler = handler(move |event: &CanvasEvent| {
            target.try_borrow_mut()?.handle(event)?;
            Ok(())
        });
        for kind in CanvasEventKind::ALL {
            bus.subscribe(kind, Rc::clone(&handler));
        }
        log::debug!("Canvas attached to event bus");
        Self {
            canvas,
            bus,
            handler,
        }
    }

    /// The controlled canvas.
    pub fn canvas(&self) -> &Rc<RefCell<Canvas>> {
        &self.canvas
    }

    /// The bus the canvas listens on.
    pub fn bus(&self) -> &Rc<Mediator<CanvasEvent>> {
        &self.bus
    }

    /// Unsubscribe the canvas and hand it back.
    pub fn detach(self) -> Rc<RefCell<Canvas>> {
        for kind in CanvasEventKind::ALL {
            self.bus.unsubscribe(kind, &self.handler);
        }
        log::debug!("Canvas detached from event bus");
        self.canvas
    }
}
