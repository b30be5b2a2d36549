//! Event records and the routing trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trait for domain events that can be routed by a dispatcher.
///
/// Domain events represent facts that have happened in the domain.
/// They are immutable and should be named in past tense.
pub trait DomainEvent: Send + Sync {
    /// Returns the event type name.
    ///
    /// This is the key handlers are registered under.
    fn event_type(&self) -> &'static str;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}

/// An immutable event record: a payload plus the moment it occurred.
///
/// Fields are private; once built, an event can only be read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event<P> {
    occurred_at: DateTime<Utc>,
    payload: P,
}

impl<P> Event<P> {
    /// Creates an event stamped with the current time.
    pub fn new(payload: P) -> Self {
        Self::with_timestamp(payload, Utc::now())
    }

    /// Creates an event with an explicit timestamp.
    pub fn with_timestamp(payload: P, occurred_at: DateTime<Utc>) -> Self {
        Self {
            occurred_at,
            payload,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Consumes the event and returns its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }
}
