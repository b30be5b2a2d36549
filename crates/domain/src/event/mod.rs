//! In-process domain events: payload records, handlers and the dispatcher.

mod dispatcher;
mod domain_event;
mod handler;
mod sink;

pub use dispatcher::EventDispatcher;
pub use domain_event::{DomainEvent, Event};
pub use handler::{EventHandler, HandlerError};
pub use sink::{LineSink, MemorySink, StdoutSink};
