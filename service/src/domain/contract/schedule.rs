//! Payment schedule of a contract.

use common::{Date, Money};
use smart_default::SmartDefault;

/// Payment schedule of a contract, fixed at three installments.
///
/// Unused installments stay at zero with no date.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Schedule {
    /// Installments in payment order.
    #[default([
        Installment { amount: Money::ZERO, date: Some(Date::today()) },
        Installment::default(),
        Installment::default(),
    ])]
    pub installments: [Installment; 3],
}

impl Schedule {
    /// Sums up the amounts of all the installments.
    #[must_use]
    pub fn total(&self) -> Money {
        self.installments.iter().map(|i| i.amount).sum()
    }
}

/// Single installment of a [`Schedule`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Installment {
    /// Amount paid in this [`Installment`].
    pub amount: Money,

    /// Date this [`Installment`] was (or is to be) paid on.
    pub date: Option<Date>,
}
