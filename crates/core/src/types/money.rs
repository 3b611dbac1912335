//! Type-safe monetary amounts using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with currency information.
///
/// Amounts use [`Decimal`] so cart arithmetic is exact; floats are never
/// used for money anywhere in the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., lempiras, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Money {
    /// Create a new monetary amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Multiply by an item quantity.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::Overflow`] if the product exceeds the decimal
    /// range. Arithmetic here is always checked; a hostile amount must never
    /// panic a caller.
    pub fn times(&self, quantity: u32) -> Result<Self, MoneyError> {
        let amount = self
            .amount
            .checked_mul(Decimal::from(quantity))
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency_code))
    }

    /// Add another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::CurrencyMismatch`] if the currencies differ
    /// (mixed-currency carts are not supported) or [`MoneyError::Overflow`]
    /// if the sum exceeds the decimal range.
    pub fn checked_add(&self, other: &Self) -> Result<Self, MoneyError> {
        if self.currency_code != other.currency_code {
            return Err(MoneyError::CurrencyMismatch {
                left: self.currency_code,
                right: other.currency_code,
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::new(amount, self.currency_code))
    }
}

/// Errors from money arithmetic.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum MoneyError {
    /// Amounts in different currencies were combined.
    #[error("currency mismatch: {left:?} vs {right:?}")]
    CurrencyMismatch {
        /// Currency on the left-hand side.
        left: CurrencyCode,
        /// Currency on the right-hand side.
        right: CurrencyCode,
    },
    /// The result does not fit in the decimal range.
    #[error("amount out of range")]
    Overflow,
}

/// ISO 4217 currency codes.
///
/// HNL (Honduran lempira) is the default marketplace currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    HNL,
    USD,
}
