//! Synchronous, identifier-keyed event dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use super::{DomainEvent, EventHandler, HandlerError};

/// Registry mapping event type names to ordered handler lists.
///
/// - Handlers run synchronously, in registration order.
/// - Registering the same handler twice makes it run twice per event.
/// - The first handler error stops the remaining handlers and is returned
///   to the caller of [`notify`](Self::notify).
pub struct EventDispatcher<E> {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler<E>>>>,
}

impl<E> EventDispatcher<E> {
    /// Creates a dispatcher with no registrations.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Appends a handler to the list for `event_type`.
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler<E>>) {
        self.handlers
            .entry(event_type.into())
            .or_default()
            .push(handler);
    }

    /// Removes the first registration of `handler` under `event_type`.
    ///
    /// Handlers are compared by identity. Returns `false` if no registration
    /// matched.
    pub fn unregister(&mut self, event_type: &str, handler: &Arc<dyn EventHandler<E>>) -> bool {
        let Some(list) = self.handlers.get_mut(event_type) else {
            return false;
        };

        match list.iter().position(|h| Arc::ptr_eq(h, handler)) {
            Some(index) => {
                list.remove(index);
                if list.is_empty() {
                    self.handlers.remove(event_type);
                }
                true
            }
            None => false,
        }
    }

    /// Clears every registration.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Returns the handlers registered for `event_type`, in invocation order.
    pub fn handlers(&self, event_type: &str) -> &[Arc<dyn EventHandler<E>>] {
        self.handlers
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the total number of registrations across all event types.
    pub fn registration_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }
}

impl<E: DomainEvent> EventDispatcher<E> {
    /// Invokes every handler registered for the event's type.
    ///
    /// Returns after all handlers completed, or at the first failure.
    pub fn notify(&self, event: &E) -> Result<(), HandlerError> {
        let event_type = event.event_type();
        metrics::counter!("domain_events_dispatched", "event_type" => event_type).increment(1);

        for handler in self.handlers(event_type) {
            tracing::debug!(event_type, handler = handler.name(), "dispatching event");
            if let Err(error) = handler.handle(event) {
                tracing::warn!(event_type, handler = handler.name(), %error, "event handler failed");
                return Err(error);
            }
        }

        Ok(())
    }
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventDispatcher<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
        }
    }
}

impl<E> std::fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut registrations: Vec<(&str, Vec<&'static str>)> = self
            .handlers
            .iter()
            .map(|(event_type, list)| (event_type.as_str(), list.iter().map(|h| h.name()).collect()))
            .collect();
        registrations.sort_by_key(|(event_type, _)| *event_type);

        f.debug_struct("EventDispatcher")
            .field("handlers", &registrations)
            .finish()
    }
}
