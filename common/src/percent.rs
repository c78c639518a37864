//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            Some(Self(val))
        }
    }

    /// Returns the [`Decimal`] value of this [`Percent`].
    #[must_use]
    pub const fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn checks_range() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(4.into()).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());

        assert!(Percent::new(Decimal::from(-1)).is_none());
        assert!(Percent::new(101.into()).is_none());
    }

    #[test]
    fn parses() {
        assert_eq!("3".parse::<Percent>().unwrap(), Percent::new(3.into()).unwrap());
        assert!("101".parse::<Percent>().is_err());
        assert!("nope".parse::<Percent>().is_err());
    }
}
