//! Shopping cart entities.
//!
//! The cart is a closed, tagged structure: line items and totals live in the
//! same value and totals are recomputed inside every mutation, so they can
//! never drift from the items they summarize. Callers cannot set `totals`
//! directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{LineItemId, ProductId, UserId};
use super::money::{CurrencyCode, Money, MoneyError};
use super::status::CartStatus;

/// Errors from cart mutations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The cart is checked out or abandoned and no longer accepts mutations.
    #[error("cart is {0:?} and can no longer be modified")]
    NotActive(CartStatus),
    /// The referenced line item does not exist in this cart.
    #[error("line item not found: {0}")]
    LineNotFound(LineItemId),
    /// A line item quantity of zero was passed to `add_item`.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// Line money arithmetic failed (mixed currencies or amount overflow).
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A single cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line ID, unique within the cart.
    pub id: LineItemId,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product title at the time it was added.
    pub title: String,
    /// Unit price at the time it was added.
    pub unit_price: Money,
    /// Number of units, always >= 1.
    pub quantity: u32,
}

impl LineItem {
    /// Total for this line (`unit_price * quantity`).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the total exceeds the decimal
    /// range.
    pub fn line_total(&self) -> Result<Money, MoneyError> {
        self.unit_price.times(self.quantity)
    }
}

/// Derived cart totals.
///
/// `tax` and `shipping` are zero until a pricing policy sets them; `total`
/// is always `subtotal + tax + shipping`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of all line totals.
    pub subtotal: Money,
    /// Tax amount.
    pub tax: Money,
    /// Shipping amount.
    pub shipping: Money,
    /// Grand total.
    pub total: Money,
}

impl CartTotals {
    /// All-zero totals in the given currency.
    #[must_use]
    pub const fn zero(currency: CurrencyCode) -> Self {
        Self {
            subtotal: Money::zero(currency),
            tax: Money::zero(currency),
            shipping: Money::zero(currency),
            total: Money::zero(currency),
        }
    }
}

/// A user's shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Owning user.
    pub user_id: UserId,
    /// Lifecycle status.
    pub status: CartStatus,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Derived totals, kept consistent with `items` by every mutation.
    pub totals: CartTotals,
    /// Cart currency; all line items must match.
    pub currency: CurrencyCode,
    /// Last mutation time.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create an empty active cart for a user.
    #[must_use]
    pub fn empty(user_id: UserId, currency: CurrencyCode, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            status: CartStatus::Active,
            items: Vec::new(),
            totals: CartTotals::zero(currency),
            currency,
            updated_at: now,
        }
    }

    /// Add units of a product to the cart.
    ///
    /// If a line for the same product already exists, its quantity is
    /// increased instead of adding a duplicate line. Returns the ID of the
    /// affected line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotActive`] if the cart is no longer active,
    /// [`CartError::ZeroQuantity`] for a zero quantity, or
    /// [`CartError::Money`] if the price currency differs from the cart's or
    /// the resulting totals overflow.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        title: String,
        unit_price: Money,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<LineItemId, CartError> {
        self.ensure_active()?;
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }
        if unit_price.currency_code != self.currency {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency,
                right: unit_price.currency_code,
            }
            .into());
        }

        let id = if let Some(line) = self.items.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
            line.unit_price = unit_price;
            line.id.clone()
        } else {
            let id = LineItemId::generate();
            self.items.push(LineItem {
                id: id.clone(),
                product_id,
                title,
                unit_price,
                quantity,
            });
            id
        };

        self.finish_mutation(now)?;
        Ok(id)
    }

    /// Set the quantity of an existing line. Quantity 0 removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotActive`] if the cart is no longer active or
    /// [`CartError::LineNotFound`] if the line does not exist.
    pub fn update_quantity(
        &mut self,
        line_id: &LineItemId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<(), CartError> {
        self.ensure_active()?;

        let pos = self
            .items
            .iter()
            .position(|l| &l.id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.clone()))?;

        if quantity == 0 {
            self.items.remove(pos);
        } else if let Some(line) = self.items.get_mut(pos) {
            line.quantity = quantity;
        }

        self.finish_mutation(now)
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotActive`] if the cart is no longer active or
    /// [`CartError::LineNotFound`] if the line does not exist.
    pub fn remove_item(
        &mut self,
        line_id: &LineItemId,
        now: DateTime<Utc>,
    ) -> Result<(), CartError> {
        self.ensure_active()?;

        let pos = self
            .items
            .iter()
            .position(|l| &l.id == line_id)
            .ok_or_else(|| CartError::LineNotFound(line_id.clone()))?;
        self.items.remove(pos);

        self.finish_mutation(now)
    }

    /// Transition the cart to `CHECKED_OUT`. Terminal.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotActive`] if the cart is not active.
    pub fn checkout(&mut self, now: DateTime<Utc>) -> Result<(), CartError> {
        self.ensure_active()?;
        self.status = CartStatus::CheckedOut;
        self.updated_at = now;
        Ok(())
    }

    /// Transition the cart to `ABANDONED`. Terminal.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotActive`] if the cart is not active.
    pub fn abandon(&mut self, now: DateTime<Utc>) -> Result<(), CartError> {
        self.ensure_active()?;
        self.status = CartStatus::Abandoned;
        self.updated_at = now;
        Ok(())
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    fn ensure_active(&self) -> Result<(), CartError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(CartError::NotActive(self.status))
        }
    }

    fn finish_mutation(&mut self, now: DateTime<Utc>) -> Result<(), CartError> {
        let mut subtotal = Money::zero(self.currency);
        for line in &self.items {
            subtotal = subtotal.checked_add(&line.line_total()?)?;
        }
        self.totals.subtotal = subtotal;
        self.totals.total = subtotal
            .checked_add(&self.totals.tax)?
            .checked_add(&self.totals.shipping)?;
        self.updated_at = now;
        Ok(())
    }
}
