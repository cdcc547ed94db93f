//! Typed publish/subscribe mediator.
//!
//! A [`Mediator`] decouples the panels that produce editor notifications
//! from the canvas state that consumes them. Delivery is synchronous and
//! same-thread: `publish` runs every handler inline before returning.

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;
use thiserror::Error;

/// An event that can be dispatched through a [`Mediator`].
///
/// Handlers are registered per [`Event::Kind`], a fieldless tag derived from
/// the event value, so every variant can carry its own typed payload.
pub trait Event {
    /// Dispatch key of the event.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// Get the dispatch key of this event.
    fn kind(&self) -> Self::Kind;

    /// Stable name of this event's kind, used in logs and errors.
    fn name(&self) -> &'static str;
}

/// Result returned by a handler.
pub type HandlerResult = Result<(), Box<dyn Error + Send + Sync>>;

/// Shared handle to a subscribed callback.
///
/// Unsubscribing compares handles by identity, so keep a clone of the
/// handle you subscribed with.
pub type Handler<E> = Rc<dyn Fn(&E) -> HandlerResult>;

/// Wrap a closure into a [`Handler`].
pub fn handler<E, F>(f: F) -> Handler<E>
where
    F: Fn(&E) -> HandlerResult + 'static,
{
    Rc::new(f)
}

/// A handler failed while an event was being published.
#[derive(Debug, Error)]
#[error("handler #{index} for `{event}` failed: {source}")]
pub struct PublishError {
    /// Name of the event being published.
    pub event: &'static str,
    /// Position of the failing handler in registration order.
    pub index: usize,
    /// Error returned by the handler.
    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

/// In-process event bus.
///
/// Each instance owns its own subscriber table; nothing is shared between
/// mediators.
pub struct Mediator<E: Event> {
    subscribers: RefCell<HashMap<E::Kind, Vec<Handler<E>>>>,
}

impl<E: Event> Default for Mediator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Mediator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self.subscribers.borrow();
        let counts: HashMap<_, _> = subscribers.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("Mediator").field("subscribers", &counts).finish()
    }
}

impl<E: Event> Mediator<E> {
    /// Create a mediator with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: RefCell::new(HashMap::new()),
        }
    }

    /// Register `handler` for events of `kind`.
    ///
    /// Registrations are not deduplicated: a handler subscribed twice runs
    /// twice per publish.
    pub fn subscribe(&self, kind: E::Kind, handler: Handler<E>) {
        self.subscribers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(handler);
    }

    /// Remove the first registration of `handler` for `kind`.
    ///
    /// Returns false if nothing matched.
    pub fn unsubscribe(&self, kind: E::Kind, handler: &Handler<E>) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let Some(handlers) = subscribers.get_mut(&kind) else {
            return false;
        };
        match handlers.iter().position(|h| Rc::ptr_eq(h, handler)) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every handler registered for `kind`.
    pub fn clear(&self, kind: E::Kind) {
        self.subscribers.borrow_mut().remove(&kind);
    }

    /// Number of registrations for `kind`.
    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.subscribers
            .borrow()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Snapshot of the handlers for `kind`. Handlers may subscribe or
    /// unsubscribe while a publish is running, so dispatch never holds the
    /// borrow.
    fn handlers_for(&self, kind: E::Kind) -> Vec<Handler<E>> {
        self.subscribers
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Invoke every handler for the event's kind, in registration order.
    ///
    /// The first failing handler aborts the publish; the handlers after it
    /// do not run and the failure is returned to the caller.
    pub fn publish(&self, event: &E) -> Result<(), PublishError> {
        let handlers = self.handlers_for(event.kind());
        if handlers.is_empty() {
            log::trace!("No subscribers for `{}`", event.name());
            return Ok(());
        }

        log::debug!("Publishing `{}` to {} handler(s)", event.name(), handlers.len());
        for (index, handler) in handlers.iter().enumerate() {
            handler(event).map_err(|source| PublishError {
                event: event.name(),
                index,
                source,
            })?;
        }
        Ok(())
    }

    /// Invoke every handler for the event's kind, even if some fail.
    ///
    /// Returns the failures in the order they happened.
    pub fn publish_isolated(&self, event: &E) -> Vec<PublishError> {
        let handlers = self.handlers_for(event.kind());
        let mut failures = Vec::new();
        for (index, handler) in handlers.iter().enumerate() {
            if let Err(source) = handler(event) {
                log::warn!("Handler #{} for `{}` failed: {}", index, event.name(), source);
                failures.push(PublishError {
                    event: event.name(),
                    index,
                    source,
                });
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Ping(u32),
        Note(String),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Ping,
        Note,
    }

    impl Event for TestEvent {
        type Kind = TestKind;

        fn kind(&self) -> TestKind {
            match self {
                TestEvent::Ping(_) => TestKind::Ping,
                TestEvent::Note(_) => TestKind::Note,
            }
        }

        fn name(&self) -> &'static str {
            match self {
                TestEvent::Ping(_) => "ping",
                TestEvent::Note(_) => "note",
            }
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Handler<TestEvent> {
        let log = Rc::clone(log);
        handler(move |event: &TestEvent| {
            log.borrow_mut().push(format!("{tag}:{event:?}"));
            Ok(())
        })
    }

    #[test]
    fn test_publish_in_registration_order() {
        let mediator = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        mediator.subscribe(TestKind::Ping, recorder(&log, "f1"));
        mediator.subscribe(TestKind::Ping, recorder(&log, "f2"));
        mediator.subscribe(TestKind::Ping, recorder(&log, "f3"));

        mediator.publish(&TestEvent::Ping(7)).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["f1:Ping(7)", "f2:Ping(7)", "f3:Ping(7)"]
        );
    }

    #[test]
    fn test_unsubscribe_removes_only_that_handler() {
        let mediator = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let f2 = recorder(&log, "f2");
        mediator.subscribe(TestKind::Ping, recorder(&log, "f1"));
        mediator.subscribe(TestKind::Ping, Rc::clone(&f2));
        mediator.subscribe(TestKind::Ping, recorder(&log, "f3"));

        assert!(mediator.unsubscribe(TestKind::Ping, &f2));
        mediator.publish(&TestEvent::Ping(1)).unwrap();

        assert_eq!(*log.borrow(), vec!["f1:Ping(1)", "f3:Ping(1)"]);
    }

    #[test]
    fn test_unsubscribe_removes_first_duplicate_only() {
        let mediator = Mediator::new();
        let calls = Rc::new(Cell::new(0));
        let counter = {
            let calls = Rc::clone(&calls);
            handler(move |_: &TestEvent| {
                calls.set(calls.get() + 1);
                Ok(())
            })
        };
        mediator.subscribe(TestKind::Ping, Rc::clone(&counter));
        mediator.subscribe(TestKind::Ping, Rc::clone(&counter));

        mediator.publish(&TestEvent::Ping(0)).unwrap();
        assert_eq!(calls.get(), 2);

        assert!(mediator.unsubscribe(TestKind::Ping, &counter));
        assert_eq!(mediator.subscriber_count(TestKind::Ping), 1);
        mediator.publish(&TestEvent::Ping(0)).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_unsubscribe_unknown_is_noop() {
        let mediator: Mediator<TestEvent> = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let stray = recorder(&log, "stray");

        assert!(!mediator.unsubscribe(TestKind::Note, &stray));
        mediator.subscribe(TestKind::Note, recorder(&log, "other"));
        assert!(!mediator.unsubscribe(TestKind::Note, &stray));
        assert_eq!(mediator.subscriber_count(TestKind::Note), 1);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mediator: Mediator<TestEvent> = Mediator::new();
        assert!(mediator.publish(&TestEvent::Note("hi".into())).is_ok());
        assert!(mediator.publish_isolated(&TestEvent::Ping(3)).is_empty());
    }

    #[test]
    fn test_kinds_are_dispatched_separately() {
        let mediator = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        mediator.subscribe(TestKind::Note, recorder(&log, "note"));

        mediator.publish(&TestEvent::Ping(5)).unwrap();
        assert!(log.borrow().is_empty());

        mediator.publish(&TestEvent::Note("x".into())).unwrap();
        assert_eq!(*log.borrow(), vec!["note:Note(\"x\")"]);
    }

    #[test]
    fn test_instances_do_not_share_subscriptions() {
        let a = Mediator::new();
        let b = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        a.subscribe(TestKind::Ping, recorder(&log, "a"));

        b.publish(&TestEvent::Ping(9)).unwrap();

        assert!(log.borrow().is_empty());
        assert_eq!(b.subscriber_count(TestKind::Ping), 0);
    }

    #[test]
    fn test_failing_handler_aborts_publish() {
        let mediator = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        mediator.subscribe(TestKind::Ping, recorder(&log, "first"));
        mediator.subscribe(
            TestKind::Ping,
            handler(|_: &TestEvent| Err("vetoed".into())),
        );
        mediator.subscribe(TestKind::Ping, recorder(&log, "last"));

        let err = mediator.publish(&TestEvent::Ping(2)).unwrap_err();

        assert_eq!(err.event, "ping");
        assert_eq!(err.index, 1);
        assert_eq!(err.source.to_string(), "vetoed");
        assert_eq!(*log.borrow(), vec!["first:Ping(2)"]);
    }

    #[test]
    fn test_publish_isolated_runs_every_handler() {
        let mediator = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        mediator.subscribe(
            TestKind::Ping,
            handler(|_: &TestEvent| Err("first broke".into())),
        );
        mediator.subscribe(TestKind::Ping, recorder(&log, "second"));
        mediator.subscribe(
            TestKind::Ping,
            handler(|_: &TestEvent| Err("third broke".into())),
        );

        let failures = mediator.publish_isolated(&TestEvent::Ping(4));

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].index, 0);
        assert_eq!(failures[1].index, 2);
        assert_eq!(*log.borrow(), vec!["second:Ping(4)"]);
    }

    #[test]
    fn test_handler_can_subscribe_during_publish() {
        let mediator: Rc<Mediator<TestEvent>> = Rc::new(Mediator::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let late = recorder(&log, "late");
        let installer = {
            let mediator = Rc::clone(&mediator);
            let late = Rc::clone(&late);
            handler(move |_: &TestEvent| {
                mediator.subscribe(TestKind::Ping, Rc::clone(&late));
                Ok(())
            })
        };
        mediator.subscribe(TestKind::Ping, installer);

        // The handler list is fixed when the publish starts.
        mediator.publish(&TestEvent::Ping(1)).unwrap();
        assert!(log.borrow().is_empty());

        mediator.publish(&TestEvent::Ping(2)).unwrap();
        assert_eq!(*log.borrow(), vec!["late:Ping(2)"]);
    }

    #[test]
    fn test_handler_can_unsubscribe_during_publish() {
        let mediator: Rc<Mediator<TestEvent>> = Rc::new(Mediator::new());
        let log = Rc::new(RefCell::new(Vec::new()));
        let f2 = recorder(&log, "f2");
        let f1 = {
            let mediator = Rc::clone(&mediator);
            let f2 = Rc::clone(&f2);
            let log = Rc::clone(&log);
            handler(move |event: &TestEvent| {
                log.borrow_mut().push(format!("f1:{event:?}"));
                mediator.unsubscribe(TestKind::Ping, &f2);
                Ok(())
            })
        };
        mediator.subscribe(TestKind::Ping, f1);
        mediator.subscribe(TestKind::Ping, Rc::clone(&f2));

        // f2 was removed mid-publish but still runs for this one.
        mediator.publish(&TestEvent::Ping(1)).unwrap();
        assert_eq!(*log.borrow(), vec!["f1:Ping(1)", "f2:Ping(1)"]);
        assert_eq!(mediator.subscriber_count(TestKind::Ping), 1);

        mediator.publish(&TestEvent::Ping(2)).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["f1:Ping(1)", "f2:Ping(1)", "f1:Ping(2)"]
        );
    }

    #[test]
    fn test_clear_kind() {
        let mediator = Mediator::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        mediator.subscribe(TestKind::Ping, recorder(&log, "a"));
        mediator.subscribe(TestKind::Note, recorder(&log, "b"));

        mediator.clear(TestKind::Ping);

        assert_eq!(mediator.subscriber_count(TestKind::Ping), 0);
        assert_eq!(mediator.subscriber_count(TestKind::Note), 1);
    }
}
