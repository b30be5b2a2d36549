//! Handlers wired into every customer's dispatcher.
//!
//! Each handler writes one fixed line per event to its [`LineSink`].

use std::sync::Arc;

use crate::event::{DomainEvent, EventDispatcher, EventHandler, HandlerError, LineSink};

use super::{CUSTOMER_ADDRESS_CHANGED, CUSTOMER_CREATED, CustomerEvent};

pub const FIRST_CREATED_MESSAGE: &str = "Esse é o primeiro console.log do evento: CustomerCreated";
pub const SECOND_CREATED_MESSAGE: &str = "Esse é o segundo console.log do evento: CustomerCreated";

/// Writes the first fixed line for a created customer.
pub struct FirstCreatedLogHandler {
    sink: Arc<dyn LineSink>,
}

impl FirstCreatedLogHandler {
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self { sink }
    }
}

impl EventHandler<CustomerEvent> for FirstCreatedLogHandler {
    fn name(&self) -> &'static str {
        "FirstCreatedLogHandler"
    }

    fn handle(&self, event: &CustomerEvent) -> Result<(), HandlerError> {
        expect_created(self.name(), event)?;
        write(self.name(), self.sink.as_ref(), FIRST_CREATED_MESSAGE)
    }
}

/// Writes the second fixed line for a created customer.
pub struct SecondCreatedLogHandler {
    sink: Arc<dyn LineSink>,
}

impl SecondCreatedLogHandler {
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self { sink }
    }
}

impl EventHandler<CustomerEvent> for SecondCreatedLogHandler {
    fn name(&self) -> &'static str {
        "SecondCreatedLogHandler"
    }

    fn handle(&self, event: &CustomerEvent) -> Result<(), HandlerError> {
        expect_created(self.name(), event)?;
        write(self.name(), self.sink.as_ref(), SECOND_CREATED_MESSAGE)
    }
}

/// Writes the new address of a customer whose address changed.
pub struct AddressChangedLogHandler {
    sink: Arc<dyn LineSink>,
}

impl AddressChangedLogHandler {
    pub fn new(sink: Arc<dyn LineSink>) -> Self {
        Self { sink }
    }
}

impl EventHandler<CustomerEvent> for AddressChangedLogHandler {
    fn name(&self) -> &'static str {
        "AddressChangedLogHandler"
    }

    fn handle(&self, event: &CustomerEvent) -> Result<(), HandlerError> {
        let CustomerEvent::CustomerAddressChanged(changed) = event else {
            return Err(HandlerError::UnexpectedEvent {
                handler: self.name(),
                event_type: event.event_type(),
            });
        };

        let data = changed.payload();
        let line = format!(
            "Endereço do cliente {}, {} foi alterado para: {}",
            data.id, data.name, data.address
        );
        write(self.name(), self.sink.as_ref(), &line)
    }
}

/// Registers the default customer handlers, all writing to `sink`.
///
/// Both created handlers are registered in order, followed by the
/// address-changed handler.
pub fn register_default_handlers(
    dispatcher: &mut EventDispatcher<CustomerEvent>,
    sink: Arc<dyn LineSink>,
) {
    dispatcher.register(
        CUSTOMER_CREATED,
        Arc::new(FirstCreatedLogHandler::new(Arc::clone(&sink))),
    );
    dispatcher.register(
        CUSTOMER_CREATED,
        Arc::new(SecondCreatedLogHandler::new(Arc::clone(&sink))),
    );
    dispatcher.register(
        CUSTOMER_ADDRESS_CHANGED,
        Arc::new(AddressChangedLogHandler::new(sink)),
    );
}

fn expect_created(handler: &'static str, event: &CustomerEvent) -> Result<(), HandlerError> {
    match event {
        CustomerEvent::CustomerCreated(_) => Ok(()),
        other => Err(HandlerError::UnexpectedEvent {
            handler,
            event_type: other.event_type(),
        }),
    }
}

fn write(handler: &'static str, sink: &dyn LineSink, line: &str) -> Result<(), HandlerError> {
    sink.write_line(line)
        .map_err(|source| HandlerError::Sink { handler, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::Address;
    use crate::event::MemorySink;

    struct BrokenSink;

    impl LineSink for BrokenSink {
        fn write_line(&self, _line: &str) -> std::io::Result<()> {
            Err(std::io::Error::other("sink closed"))
        }
    }

    fn address_changed() -> CustomerEvent {
        let address = Address::new("New Street", 123, "78000-000", "Cuiabá").unwrap();
        CustomerEvent::customer_address_changed("cust_change_addres", "Mr Mover", address)
    }

    #[test]
    fn created_handlers_write_fixed_lines() {
        let sink = Arc::new(MemorySink::new());
        let event = CustomerEvent::customer_created("123", "John Doe");

        FirstCreatedLogHandler::new(sink.clone())
            .handle(&event)
            .unwrap();
        SecondCreatedLogHandler::new(sink.clone())
            .handle(&event)
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec![FIRST_CREATED_MESSAGE, SECOND_CREATED_MESSAGE]
        );
    }

    #[test]
    fn address_changed_handler_interpolates_payload() {
        let sink = Arc::new(MemorySink::new());

        AddressChangedLogHandler::new(sink.clone())
            .handle(&address_changed())
            .unwrap();

        assert_eq!(
            sink.lines(),
            vec![
                "Endereço do cliente cust_change_addres, Mr Mover foi alterado para: New Street, 123, 78000-000, Cuiabá"
            ]
        );
    }

    #[test]
    fn handlers_reject_unexpected_variants() {
        let sink = Arc::new(MemorySink::new());

        let err = FirstCreatedLogHandler::new(sink.clone())
            .handle(&address_changed())
            .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::UnexpectedEvent {
                handler: "FirstCreatedLogHandler",
                event_type: "CustomerAddressChangedEvent",
            }
        ));

        let err = AddressChangedLogHandler::new(sink.clone())
            .handle(&CustomerEvent::customer_created("1", "x"))
            .unwrap_err();
        assert!(matches!(err, HandlerError::UnexpectedEvent { .. }));
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn sink_failure_becomes_handler_error() {
        let err = SecondCreatedLogHandler::new(Arc::new(BrokenSink))
            .handle(&CustomerEvent::customer_created("1", "x"))
            .unwrap_err();
        assert!(matches!(
            err,
            HandlerError::Sink {
                handler: "SecondCreatedLogHandler",
                ..
            }
        ));
    }

    #[test]
    fn default_registrations() {
        let mut dispatcher = EventDispatcher::new();
        register_default_handlers(&mut dispatcher, Arc::new(MemorySink::new()));

        let created: Vec<_> = dispatcher
            .handlers(CUSTOMER_CREATED)
            .iter()
            .map(|h| h.name())
            .collect();
        assert_eq!(
            created,
            vec!["FirstCreatedLogHandler", "SecondCreatedLogHandler"]
        );
        assert_eq!(dispatcher.handlers(CUSTOMER_ADDRESS_CHANGED).len(), 1);
    }
}
