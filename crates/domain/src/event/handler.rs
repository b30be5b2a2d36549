//! Event handler capability.

use thiserror::Error;

/// Errors raised by event handlers.
///
/// A handler error propagates out of `EventDispatcher::notify` and aborts the
/// entity operation that raised the event.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler could not write to its output sink.
    #[error("Handler {handler} could not write its output: {source}")]
    Sink {
        handler: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The handler received an event variant it does not understand.
    #[error("Handler {handler} cannot handle event {event_type}")]
    UnexpectedEvent {
        handler: &'static str,
        event_type: &'static str,
    },

    /// The handler failed for any other reason.
    #[error("Handler {handler} failed: {reason}")]
    Failed {
        handler: &'static str,
        reason: String,
    },
}

/// A unit of work run when an event of a registered type is dispatched.
///
/// Handlers are shared between registrations, so they must not hold mutable
/// state behind `&self` other than through their own synchronization.
pub trait EventHandler<E>: Send + Sync {
    /// Returns the name of this handler, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Handles a single event.
    fn handle(&self, event: &E) -> Result<(), HandlerError>;
}
