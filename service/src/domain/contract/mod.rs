//! [`Contract`] definitions.

pub mod customer;
pub mod field;
pub mod pricing;
pub mod promotion;
pub mod schedule;
pub mod selection;
pub mod validation;

use common::{define_kind, Date, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
use rust_decimal::Decimal;
use smart_default::SmartDefault;
use uuid::Uuid;

use crate::domain::{user, Vehicle};

pub use self::{
    customer::Customer,
    field::Field,
    pricing::Quote,
    promotion::Promotions,
    schedule::Schedule,
    selection::Selection,
    validation::Violation,
};

/// Vehicle sale contract.
///
/// [`Contract::total_discount`] and [`Contract::final_price`] are derived
/// from the other fields via [`Contract::reprice()`] and are stored
/// denormalized, so listings never need to re-run the pricing.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Contract {
    /// ID of this [`Contract`].
    #[default(Id::new())]
    pub id: Id,

    /// Business [`Number`] of this [`Contract`].
    pub number: Number,

    /// Date this [`Contract`] was signed on.
    #[default(Some(Date::today()))]
    pub signing_date: Option<Date>,

    /// Date the vehicle is to be delivered on.
    #[default(Some(Date::today()))]
    pub delivery_date: Option<Date>,

    /// [`Salesperson`] who authored this [`Contract`].
    ///
    /// [`None`] only on a draft that hasn't been saved yet.
    pub salesperson: Option<Salesperson>,

    /// [`Customer`] this [`Contract`] is signed with.
    pub customer: Customer,

    /// Vehicle [`Selection`] being sold.
    pub vehicle: Selection,

    /// [`PaymentMethod`] agreed on.
    pub payment_method: PaymentMethod,

    /// Negotiated selling price before discounts.
    #[default(Vehicle::default_entry().price)]
    pub selling_price: Money,

    /// Promotion inputs of this [`Contract`].
    pub promotions: Promotions,

    /// Derived sum of all the applied discounts.
    pub total_discount: Money,

    /// Derived price after discounts. Not clamped at zero.
    #[default(Vehicle::default_entry().price)]
    pub final_price: Money,

    /// Payment [`Schedule`] of this [`Contract`].
    pub schedule: Schedule,
}

impl Contract {
    /// Computes the current [`Quote`] of this [`Contract`] without touching
    /// its stored totals.
    #[must_use]
    pub fn quote(&self) -> Quote {
        pricing::quote(self.selling_price, &self.vehicle.model, &self.promotions)
    }

    /// Recomputes and stores the derived pricing totals.
    ///
    /// Must be run after any change to the price, the model or the
    /// [`Promotions`], otherwise the stored totals go stale.
    pub fn reprice(&mut self) {
        let quote = self.quote();
        self.total_discount = quote.total_discount;
        self.final_price = quote.final_price;
    }

    /// Switches this [`Contract`] to the given catalog [`Vehicle`].
    ///
    /// Resets the selling price to the catalog one, drops the promotions
    /// that are not offered for the new model, and falls back to the
    /// vehicle's default color if the current one is not offered. Reprices
    /// afterwards.
    pub fn select_model(&mut self, vehicle: &Vehicle) {
        self.vehicle.model = vehicle.name.to_owned();
        self.selling_price = vehicle.price;
        if !vehicle.offers_color(&self.vehicle.color) {
            self.vehicle.color = vehicle.default_color().to_owned();
        }
        self.promotions.clear_ineligible(vehicle.name);
        self.reprice();
    }

    /// Sums up everything paid (or scheduled) across the installments.
    #[must_use]
    pub fn total_paid(&self) -> Money {
        self.schedule.total()
    }

    /// Returns the share of the selling price covered by the installments,
    /// in percent.
    ///
    /// [`None`] when the selling price is not positive, as no meaningful
    /// progress can be reported then.
    #[must_use]
    pub fn payment_progress(&self) -> Option<Decimal> {
        let total = self.selling_price.amount();
        (total > Decimal::ZERO).then(|| {
            self.total_paid().amount() * Decimal::ONE_HUNDRED / total
        })
    }
}

/// ID of a [`Contract`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Business number of a [`Contract`], as printed on the paper document.
///
/// Unique across contracts once filled in. May stay empty on a draft.
#[derive(
    AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq,
)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Number(String);

/// Authoring salesperson snapshot stored on a [`Contract`].
///
/// The name is denormalized for listings. It's kept in sync by the
/// name-change cascade rather than joined at read time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Salesperson {
    /// ID of the [`user`] who authored the contract.
    pub id: user::Id,

    /// Display name of that [`user`] at the time of the last sync.
    pub name: user::Name,
}

define_kind! {
    #[doc = "Payment method of a [`Contract`]."]
    enum PaymentMethod {
        #[doc = "Full payment upfront."]
        Outright = 1,

        #[doc = "Payment in installments via bank financing."]
        Installment = 2,
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Outright
    }
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::domain::Vehicle;

    use super::{promotion::Toggle, Contract, PaymentMethod};

    #[test]
    fn draft_defaults_follow_catalog() {
        let draft = Contract::default();

        assert_eq!(draft.vehicle.model, "VF3");
        assert_eq!(draft.selling_price, Money::vnd(299_000_000));
        assert_eq!(draft.final_price, Money::vnd(299_000_000));
        assert_eq!(draft.total_discount, Money::ZERO);
        assert_eq!(draft.payment_method, PaymentMethod::Outright);
        assert!(draft.salesperson.is_none());
        assert!(draft.signing_date.is_some());
    }

    #[test]
    fn reprice_refreshes_stored_totals() {
        let mut contract = Contract::default();
        contract.promotions.toggle(Toggle::FourPercent, true);
        contract.promotions.toggle(Toggle::Vf3Social, true);

        contract.reprice();

        assert_eq!(contract.total_discount, Money::vnd(14_960_000));
        assert_eq!(contract.final_price, Money::vnd(284_040_000));
    }

    #[test]
    fn model_switch_resets_price_and_drops_ineligible_promotions() {
        let mut contract = Contract::default();
        contract.promotions.toggle(Toggle::Vf3Fixed, true);
        contract.reprice();
        assert_eq!(contract.total_discount, Money::vnd(6_500_000));

        let vf6 = Vehicle::by_name("VF6 ECO").unwrap();
        contract.select_model(vf6);

        assert_eq!(contract.vehicle.model, "VF6 ECO");
        assert_eq!(contract.selling_price, Money::vnd(689_000_000));
        assert!(!contract.promotions.vf3_fixed);
        assert_eq!(contract.total_discount, Money::ZERO);
        assert_eq!(contract.final_price, Money::vnd(689_000_000));
    }

    #[test]
    fn model_switch_keeps_offered_color() {
        let mut contract = Contract::default();
        contract.vehicle.color = "Đỏ".to_owned();

        contract.select_model(Vehicle::by_name("VF8 Plus").unwrap());

        assert_eq!(contract.vehicle.color, "Đỏ");
    }

    #[test]
    fn model_switch_falls_back_to_default_color() {
        let restricted = Vehicle {
            id: "VF3",
            name: "VF3",
            price: Money::vnd(299_000_000),
            colors: &["Xanh Lục"],
        };
        let mut contract = Contract::default();
        contract.vehicle.color = "Đỏ".to_owned();

        contract.select_model(&restricted);

        assert_eq!(contract.vehicle.color, "Xanh Lục");
    }

    #[test]
    fn payment_progress_against_selling_price() {
        let mut contract = Contract::default();
        contract.schedule.installments[0].amount = Money::vnd(149_500_000);

        let progress = contract.payment_progress().unwrap();
        assert_eq!(progress, rust_decimal::Decimal::from(50));

        contract.selling_price = Money::ZERO;
        assert!(contract.payment_progress().is_none());
    }
}
