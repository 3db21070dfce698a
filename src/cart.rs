//! Cart

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    ids::TypedId,
    money::{Amount, zero},
    pricing::{TotalPriceError, items_total},
};

/// Cart line identifier.
pub type CartLineId = TypedId<CartLine>;

/// Product identifier.
pub type ProductId = TypedId<ProductRef>;

/// Errors related to cart line construction and mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantities start at one; removing a line is a separate operation.
    #[error("quantity must be at least 1")]
    ZeroQuantity,

    /// The requested quantity does not fit a line quantity.
    #[error("quantity {0} is too large")]
    QuantityTooLarge(i64),

    /// Unit prices cannot be negative.
    #[error("line {0} has a negative unit price")]
    NegativePrice(CartLineId),

    /// A line's currency differs from the cart currency (line, line currency, cart currency).
    #[error("line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(CartLineId, &'static str, &'static str),

    /// No line with the given id is in the cart.
    #[error("line {0} is not in the cart")]
    UnknownLine(CartLineId),

    /// The line total does not fit in minor units.
    #[error("line {0} total overflows")]
    Overflow(CartLineId),
}

/// The product a cart line refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRef {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Primary product image, if any
    pub image: Option<String>,
}

/// A single line in the shopping cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    id: CartLineId,
    product: ProductRef,
    unit_price: Amount,
    quantity: u32,
}

impl CartLine {
    /// Create a new cart line.
    ///
    /// # Errors
    ///
    /// - [`CartError::ZeroQuantity`]: the quantity is zero.
    /// - [`CartError::NegativePrice`]: the unit price is below zero.
    pub fn new(
        id: CartLineId,
        product: ProductRef,
        unit_price: Amount,
        quantity: u32,
    ) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        if unit_price.to_minor_units() < 0 {
            return Err(CartError::NegativePrice(id));
        }

        Ok(Self {
            id,
            product,
            unit_price,
            quantity,
        })
    }

    /// Line id
    pub fn id(&self) -> &CartLineId {
        &self.id
    }

    /// Referenced product
    pub fn product(&self) -> &ProductRef {
        &self.product
    }

    /// Price of a single unit
    pub fn unit_price(&self) -> &Amount {
        &self.unit_price
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Replace the quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] when `quantity` is zero.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        self.quantity = quantity;

        Ok(())
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Overflow`] if the product overflows minor units.
    pub fn line_total(&self) -> Result<Amount, CartError> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .map(|minor| Money::from_minor(minor, self.unit_price.currency()))
            .ok_or_else(|| CartError::Overflow(self.id.clone()))
    }
}

/// The lines currently held in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart holding the given lines.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if any line is priced in another currency.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        lines.iter().try_for_each(|line| {
            let line_currency = line.unit_price().currency();

            if line_currency == currency {
                Ok(())
            } else {
                Err(CartError::CurrencyMismatch(
                    line.id().clone(),
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ))
            }
        })?;

        Ok(Self { lines, currency })
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by id.
    pub fn line(&self, id: &CartLineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Change the quantity of a line.
    ///
    /// # Errors
    ///
    /// - [`CartError::UnknownLine`]: no such line.
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    pub fn set_quantity(&mut self, id: &CartLineId, quantity: u32) -> Result<(), CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or_else(|| CartError::UnknownLine(id.clone()))?
            .set_quantity(quantity)
    }

    /// Remove a line, returning it if it was present.
    pub fn remove(&mut self, id: &CartLineId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id() == id)?;

        Some(self.lines.remove(index))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals; zero for an empty cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] on overflow or currency mismatch.
    pub fn subtotal(&self) -> Result<Amount, TotalPriceError> {
        if self.is_empty() {
            return Ok(zero(self.currency));
        }

        items_total(&self.lines)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rusty_money::{Money, iso};

    use super::*;

    pub(crate) fn product(id: &str) -> ProductRef {
        ProductRef {
            id: ProductId::new(format!("prod-{id}")),
            name: format!("Product {id}"),
            image: None,
        }
    }

    pub(crate) fn line(id: &str, price_major: i64, quantity: u32) -> CartLine {
        CartLine::new(
            CartLineId::new(id),
            product(id),
            Money::from_major(price_major, iso::INR),
            quantity,
        )
        .unwrap_or_else(|error| unreachable!("fixture line is valid: {error}"))
    }
}
