//! Promotional pricing.

use rust_decimal::Decimal;

use crate::domain::participations::errors::InvalidState;

/// How a participation discounts its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percentage off the snapshot price, `0..=100`.
    Percent(Decimal),

    /// Amount off the snapshot price. The promo price never drops below zero.
    Fixed(Decimal),
}

impl Discount {
    /// Pick the discount mode from the two optional inputs. Percent wins when
    /// both are supplied.
    #[must_use]
    pub fn from_parts(percent: Option<Decimal>, fixed: Option<Decimal>) -> Option<Self> {
        percent.map(Self::Percent).or(fixed.map(Self::Fixed))
    }

    #[must_use]
    pub const fn percent(self) -> Option<Decimal> {
        match self {
            Self::Percent(percent) => Some(percent),
            Self::Fixed(_) => None,
        }
    }

    #[must_use]
    pub const fn fixed(self) -> Option<Decimal> {
        match self {
            Self::Fixed(amount) => Some(amount),
            Self::Percent(_) => None,
        }
    }

    /// Check the discount against a campaign's floor.
    ///
    /// Only percentage discounts are held to `min_percent`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidState::DiscountOutOfRange`] for a percent outside
    /// `0..=100` or a negative fixed amount, and
    /// [`InvalidState::DiscountBelowMinimum`] for a percent under the floor.
    pub fn validate(self, min_percent: Decimal) -> Result<(), InvalidState> {
        match self {
            Self::Percent(percent) if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED => {
                Err(InvalidState::DiscountOutOfRange)
            }
            Self::Percent(percent) if percent < min_percent => {
                Err(InvalidState::DiscountBelowMinimum)
            }
            Self::Fixed(amount) if amount < Decimal::ZERO => Err(InvalidState::DiscountOutOfRange),
            Self::Percent(_) | Self::Fixed(_) => Ok(()),
        }
    }

    /// Promotional price for `price`. No rounding is applied.
    #[must_use]
    pub fn promo_price(self, price: Decimal) -> Decimal {
        match self {
            Self::Percent(percent) => price * (Decimal::ONE - percent / Decimal::ONE_HUNDRED),
            Self::Fixed(amount) => (price - amount).max(Decimal::ZERO),
        }
    }
}
