//! Operations spanning several products.

use super::{Product, ProductError};

/// Stateless operations over product collections.
pub struct ProductService;

impl ProductService {
    /// Raises the price of every product by `percentage` percent.
    ///
    /// Fractional cents are truncated. Every new price is computed before
    /// any product changes, so on error no product is modified.
    #[tracing::instrument(skip(products), fields(count = products.len()))]
    pub fn increase_price(products: &mut [Product], percentage: u32) -> Result<(), ProductError> {
        let prices = products
            .iter()
            .map(|product| {
                let price = product.price();
                price
                    .checked_percentage(percentage)
                    .and_then(|increase| price.checked_add(increase))
                    .ok_or_else(|| ProductError::PriceOverflow {
                        product_id: product.id().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (product, price) in products.iter_mut().zip(prices) {
            product.change_price(price)?;
        }
        Ok(())
    }
}
