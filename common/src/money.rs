//! [`Money`]-related definitions.

use std::{fmt, iter::Sum, ops, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::Percent;

/// Amount of money in Vietnamese đồng.
///
/// The amount is signed: derived prices may legitimately go below zero
/// (a discount total exceeding the selling price is not clamped).
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Money(Decimal);

impl Money {
    /// [`Money`] amount of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] amount of the given number of đồng.
    #[must_use]
    pub fn vnd(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// Creates a new [`Money`] from the provided [`Decimal`] amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Returns the [`Decimal`] amount of this [`Money`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Indicates whether this [`Money`] amount is below zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(amount) = self;
        if amount.is_integer() {
            write!(f, "{} VND", amount.to_i128().expect("integer"))
        } else {
            write!(f, "{amount} VND")
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s.strip_suffix("VND").unwrap_or(s).trim_end();
        Decimal::from_str(amount)
            .map(Self)
            .map_err(|_| "invalid amount")
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl ops::Mul<Percent> for Money {
    type Output = Self;

    fn mul(self, rhs: Percent) -> Self::Output {
        Self(self.0 * rhs.as_decimal() / Decimal::ONE_HUNDRED)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Money, Percent};

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("299000000").unwrap(), Money::vnd(299_000_000));
        assert_eq!(Money::from_str("6500000 VND").unwrap(), Money::vnd(6_500_000));
        assert_eq!(Money::from_str("-1000").unwrap(), Money::vnd(-1000));

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("12,5").is_err());
        assert!(Money::from_str("VND").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::vnd(3_000_000).to_string(), "3000000 VND");
        assert_eq!(
            Money::new(Decimal::new(105, 1)).to_string(),
            "10.5 VND",
        );
    }

    #[test]
    fn arithmetic() {
        let price = Money::vnd(299_000_000);

        assert_eq!(price + Money::vnd(1_000_000), Money::vnd(300_000_000));
        assert_eq!(price - Money::vnd(299_000_001), Money::vnd(-1));
        assert!((price - Money::vnd(299_000_001)).is_negative());
        assert!(!Money::ZERO.is_negative());

        let four = Percent::new(4.into()).unwrap();
        assert_eq!(price * four, Money::vnd(11_960_000));
    }

    #[test]
    fn sums() {
        let total: Money =
            [Money::vnd(1), Money::vnd(2), Money::vnd(3)].into_iter().sum();
        assert_eq!(total, Money::vnd(6));
    }
}
