//! Customer address value object.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building an [`Address`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Street is required")]
    StreetRequired,

    #[error("Number is required")]
    NumberRequired,

    #[error("Zip is required")]
    ZipRequired,

    #[error("City is required")]
    CityRequired,
}

/// A postal address. Immutable once built; replace it to change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), AddressError> {
        if self.street.is_empty() {
            return Err(AddressError::StreetRequired);
        }
        if self.number == 0 {
            return Err(AddressError::NumberRequired);
        }
        if self.zip.is_empty() {
            return Err(AddressError::ZipRequired);
        }
        if self.city.is_empty() {
            return Err(AddressError::CityRequired);
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street, self.number, self.zip, self.city
        )
    }
}
