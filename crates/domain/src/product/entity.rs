//! Product entity.

use common::Money;

use super::ProductError;

/// A product that can be sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: String,
    name: String,
    price: Money,
}

impl Product {
    /// Creates a validated product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ProductError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ProductError> {
        if self.id.is_empty() {
            return Err(ProductError::IdRequired);
        }
        if self.name.is_empty() {
            return Err(ProductError::NameRequired);
        }
        check_price(self.price)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Renames the product. An empty name is rejected and nothing changes.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ProductError::NameRequired);
        }
        self.name = name;
        Ok(())
    }

    /// Changes the price. A non-positive price is rejected and nothing changes.
    pub fn change_price(&mut self, price: Money) -> Result<(), ProductError> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }
}

fn check_price(price: Money) -> Result<(), ProductError> {
    if !price.is_positive() {
        return Err(ProductError::InvalidPrice {
            cents: price.cents(),
        });
    }
    Ok(())
}
