//! Price quotation derived from [`Promotions`].

use common::{Money, Percent};

use super::promotion::{Promotions, Toggle};

/// Fixed amount of the [`Toggle::Vf3Social`] promotion.
fn vf3_social_amount() -> Money {
    Money::vnd(3_000_000)
}

/// Fixed amount of the [`Toggle::Vf3Fixed`] promotion.
fn vf3_fixed_amount() -> Money {
    Money::vnd(6_500_000)
}

/// Fixed amount of the [`Toggle::Vf5Fixed`] promotion.
fn vf5_fixed_amount() -> Money {
    Money::vnd(12_000_000)
}

/// Share of the selling price of the [`Toggle::FourPercent`] promotion.
fn four_percent() -> Percent {
    Percent::new(4.into()).unwrap_or_else(|| unreachable!("4 is in range"))
}

/// Share of the selling price of the [`Toggle::ThreePercent`] promotion.
fn three_percent() -> Percent {
    Percent::new(3.into()).unwrap_or_else(|| unreachable!("3 is in range"))
}

/// Single discount line of a [`Quote`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Line {
    /// [`Source`] this [`Line`] comes from.
    pub source: Source,

    /// Amount this [`Line`] contributes to the total discount.
    pub amount: Money,
}

/// Origin of a discount [`Line`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source {
    /// [`Toggle::FourPercent`] promotion.
    FourPercent,

    /// [`Toggle::ThreePercent`] promotion.
    ThreePercent,

    /// [`Toggle::Vf3Social`] promotion.
    Vf3Social,

    /// [`Toggle::Vf3Fixed`] promotion.
    Vf3Fixed,

    /// [`Toggle::Vf5Fixed`] promotion.
    Vf5Fixed,

    /// Manual discount of the salesperson.
    Salesperson,

    /// Manual discount of the company.
    Company,
}

/// Derived pricing of a contract.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Quote {
    /// Itemized discount breakdown.
    pub lines: Vec<Line>,

    /// Sum of all the [`Quote::lines`] amounts.
    pub total_discount: Money,

    /// Selling price after the [`Quote::total_discount`].
    ///
    /// Not clamped at zero, so the caller can surface an over-discounted
    /// contract instead of hiding it.
    pub final_price: Money,
}

/// Computes the [`Quote`] for the given `selling_price`, vehicle `model` and
/// [`Promotions`].
///
/// The percentage promotions are applied to the full `selling_price`, not to
/// a running total. Fixed model-gated promotions only contribute when their
/// [`Toggle`] is offered for the `model`, so a stale flag on a switched
/// contract cannot leak into the price. [`Toggle::Insurance`] never
/// contributes.
#[must_use]
pub fn quote(
    selling_price: Money,
    model: &str,
    promotions: &Promotions,
) -> Quote {
    let mut lines = Vec::new();
    let mut push = |source, amount| lines.push(Line { source, amount });

    if promotions.four_percent {
        push(Source::FourPercent, selling_price * four_percent());
    }
    if promotions.three_percent {
        push(Source::ThreePercent, selling_price * three_percent());
    }
    if promotions.vf3_social && Toggle::Vf3Social.offered_for(model) {
        push(Source::Vf3Social, vf3_social_amount());
    }
    if promotions.vf3_fixed && Toggle::Vf3Fixed.offered_for(model) {
        push(Source::Vf3Fixed, vf3_fixed_amount());
    }
    if promotions.vf5_fixed && Toggle::Vf5Fixed.offered_for(model) {
        push(Source::Vf5Fixed, vf5_fixed_amount());
    }
    if promotions.salesperson_discount > Money::ZERO {
        push(Source::Salesperson, promotions.salesperson_discount);
    }
    if promotions.company_discount > Money::ZERO {
        push(Source::Company, promotions.company_discount);
    }

    let total_discount = lines.iter().map(|l| l.amount).sum();
    Quote {
        lines,
        total_discount,
        final_price: selling_price - total_discount,
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use super::{
        super::promotion::Promotions, quote, Source,
    };

    #[test]
    fn vf3_with_four_percent_and_social() {
        let promos = Promotions {
            four_percent: true,
            vf3_social: true,
            ..Promotions::default()
        };

        let q = quote(Money::vnd(299_000_000), "VF3", &promos);

        assert_eq!(q.lines.len(), 2);
        assert_eq!(q.lines[0].amount, Money::vnd(11_960_000));
        assert_eq!(q.lines[1].amount, Money::vnd(3_000_000));
        assert_eq!(q.total_discount, Money::vnd(14_960_000));
        assert_eq!(q.final_price, Money::vnd(284_040_000));
    }

    #[test]
    fn vf3_with_manual_discount_on_top() {
        let promos = Promotions {
            four_percent: true,
            vf3_social: true,
            salesperson_discount: Money::vnd(1_000_000),
            ..Promotions::default()
        };

        let q = quote(Money::vnd(299_000_000), "VF3", &promos);

        assert_eq!(q.total_discount, Money::vnd(15_960_000));
        assert_eq!(q.final_price, Money::vnd(283_040_000));
    }

    #[test]
    fn percentages_apply_to_full_price() {
        let promos = Promotions {
            four_percent: true,
            three_percent: true,
            ..Promotions::default()
        };

        let q = quote(Money::vnd(1_000_000_000), "VF8 Plus", &promos);

        assert_eq!(q.total_discount, Money::vnd(70_000_000));
        assert_eq!(q.final_price, Money::vnd(930_000_000));
    }

    #[test]
    fn stale_model_gated_flags_do_not_contribute() {
        let promos = Promotions {
            vf3_fixed: true,
            vf5_fixed: true,
            ..Promotions::default()
        };

        let q = quote(Money::vnd(689_000_000), "VF6 ECO", &promos);

        assert!(q.lines.is_empty());
        assert_eq!(q.total_discount, Money::ZERO);
        assert_eq!(q.final_price, Money::vnd(689_000_000));
    }

    #[test]
    fn insurance_never_contributes() {
        let promos = Promotions {
            insurance: true,
            ..Promotions::default()
        };

        let q = quote(Money::vnd(529_000_000), "VF5 PLUS", &promos);

        assert!(q.lines.is_empty());
        assert_eq!(q.final_price, Money::vnd(529_000_000));
    }

    #[test]
    fn manual_discounts_taken_as_is() {
        let promos = Promotions {
            salesperson_discount: Money::vnd(5_000_000),
            company_discount: Money::vnd(2_000_000),
            ..Promotions::default()
        };

        let q = quote(Money::vnd(499_000_000), "HERIO", &promos);

        assert_eq!(q.lines[0].source, Source::Salesperson);
        assert_eq!(q.lines[1].source, Source::Company);
        assert_eq!(q.total_discount, Money::vnd(7_000_000));
    }

    #[test]
    fn final_price_may_go_negative() {
        let promos = Promotions {
            company_discount: Money::vnd(300_000_000),
            ..Promotions::default()
        };

        let q = quote(Money::vnd(299_000_000), "VF3", &promos);

        assert_eq!(q.final_price, Money::vnd(-1_000_000));
        assert!(q.final_price.is_negative());
    }
}
