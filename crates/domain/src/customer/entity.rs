//! Customer entity.

use std::sync::Arc;

use crate::event::{EventDispatcher, LineSink, StdoutSink};

use super::handlers::register_default_handlers;
use super::{Address, CustomerError, CustomerEvent};

/// Customer entity.
///
/// Every customer owns its own [`EventDispatcher`], populated at construction
/// with the default log handlers. Creation and address changes raise events
/// synchronously: the operation returns only after every handler ran, and a
/// handler failure is returned as the operation's error.
#[derive(Debug, Clone)]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
    dispatcher: EventDispatcher<CustomerEvent>,
}

impl Customer {
    /// Creates a customer whose handlers write to standard output.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, CustomerError> {
        Self::with_sink(id, name, Arc::new(StdoutSink))
    }

    /// Creates a customer whose handlers write to `sink`.
    ///
    /// Raises `CustomerCreatedEvent`. Validation failures are reported before
    /// any handler runs.
    pub fn with_sink(
        id: impl Into<String>,
        name: impl Into<String>,
        sink: Arc<dyn LineSink>,
    ) -> Result<Self, CustomerError> {
        let customer = Self::build(id.into(), name.into(), sink)?;

        let event = CustomerEvent::customer_created(customer.id.clone(), customer.name.clone());
        customer.dispatcher.notify(&event)?;

        tracing::debug!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Rebuilds a customer from stored state without raising any event.
    ///
    /// Later events are written to standard output.
    pub fn restore(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: u64,
    ) -> Result<Self, CustomerError> {
        Self::restore_with_sink(id, name, address, active, reward_points, Arc::new(StdoutSink))
    }

    /// Rebuilds a customer from stored state, wiring its handlers to `sink`.
    pub fn restore_with_sink(
        id: impl Into<String>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: u64,
        sink: Arc<dyn LineSink>,
    ) -> Result<Self, CustomerError> {
        let mut customer = Self::build(id.into(), name.into(), sink)?;
        if active && address.is_none() {
            return Err(CustomerError::AddressRequiredForActivation);
        }
        customer.address = address;
        customer.active = active;
        customer.reward_points = reward_points;
        Ok(customer)
    }

    fn build(id: String, name: String, sink: Arc<dyn LineSink>) -> Result<Self, CustomerError> {
        validate(&id, &name)?;

        let mut dispatcher = EventDispatcher::new();
        register_default_handlers(&mut dispatcher, sink);

        Ok(Self {
            id,
            name,
            address: None,
            active: false,
            reward_points: 0,
            dispatcher,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Returns the dispatcher this customer raises its events on.
    pub fn dispatcher(&self) -> &EventDispatcher<CustomerEvent> {
        &self.dispatcher
    }

    /// Returns the dispatcher mutably, to subscribe additional handlers.
    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher<CustomerEvent> {
        &mut self.dispatcher
    }

    /// Renames the customer. An empty name is rejected and nothing changes.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), CustomerError> {
        let name = name.into();
        validate(&self.id, &name)?;
        self.name = name;
        Ok(())
    }

    /// Replaces the address and raises `CustomerAddressChangedEvent`.
    ///
    /// The new address stays in place even if a handler fails.
    pub fn change_address(&mut self, address: Address) -> Result<(), CustomerError> {
        self.address = Some(address.clone());

        let event = CustomerEvent::customer_address_changed(self.id.clone(), self.name.clone(), address);
        self.dispatcher.notify(&event)?;
        Ok(())
    }

    /// Replaces the address without raising an event.
    pub fn set_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    /// Activates the customer. Requires an address.
    pub fn activate(&mut self) -> Result<(), CustomerError> {
        if self.address.is_none() {
            return Err(CustomerError::AddressRequiredForActivation);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Adds reward points, saturating at `u64::MAX`.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}

/// Compares entity state; dispatcher registrations are not part of equality.
impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.address == other.address
            && self.active == other.active
            && self.reward_points == other.reward_points
    }
}

impl Eq for Customer {}

fn validate(id: &str, name: &str) -> Result<(), CustomerError> {
    if id.is_empty() {
        return Err(CustomerError::IdRequired);
    }
    if name.is_empty() {
        return Err(CustomerError::NameRequired);
    }
    Ok(())
}
