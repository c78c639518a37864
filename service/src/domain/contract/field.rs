//! Single-[`Field`] edits of a [`Contract`].

use common::{Date, Money};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use strum::{Display, EnumString};

use crate::domain::Vehicle;

use super::{validation, Contract};

/// Editable field of a [`Contract`], addressed by its wire name.
///
/// Every variant corresponds to one cell of the contract listing. Boolean
/// promotion toggles are not addressable here, as they're edited through
/// [`Promotions`] directly.
///
/// [`Promotions`]: super::Promotions
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    /// [`Contract::number`].
    ContractNumber,

    /// [`Contract::signing_date`].
    SigningDate,

    /// [`Contract::delivery_date`].
    DeliveryDate,

    /// [`Customer::name`](super::Customer::name).
    CustomerName,

    /// [`Customer::date_of_birth`](super::Customer::date_of_birth).
    CustomerDateOfBirth,

    /// [`Customer::gender`](super::Customer::gender).
    CustomerGender,

    /// [`Customer::phone`](super::Customer::phone).
    CustomerPhone,

    /// [`Customer::id_number`](super::Customer::id_number).
    CustomerIdNumber,

    /// [`Customer::id_issue_date`](super::Customer::id_issue_date).
    CustomerIdIssueDate,

    /// [`Customer::id_issue_place`](super::Customer::id_issue_place).
    CustomerIdIssuePlace,

    /// [`Customer::address`](super::Customer::address).
    CustomerAddress,

    /// [`Selection::model`](super::Selection::model).
    VehicleType,

    /// [`Selection::color`](super::Selection::color).
    VehicleColor,

    /// [`Selection::production_year`](super::Selection::production_year).
    VehicleProductionYear,

    /// [`Selection::vin`](super::Selection::vin).
    VehicleVin,

    /// [`Selection::engine_number`](super::Selection::engine_number).
    VehicleEngineNumber,

    /// [`Contract::payment_method`].
    PaymentMethod,

    /// [`Contract::selling_price`].
    SellingPrice,

    /// [`Promotions::salesperson_discount`](
    /// super::Promotions::salesperson_discount).
    SalespersonDiscount,

    /// [`Promotions::company_discount`](
    /// super::Promotions::company_discount).
    CompanyDiscount,

    /// [`Contract::total_discount`]. Overwritten by the repricing that
    /// follows any edit.
    TotalDiscount,

    /// [`Contract::final_price`]. Overwritten by the repricing that follows
    /// any edit.
    FinalPrice,

    /// First installment amount.
    Payment1,

    /// First installment date.
    Payment1Date,

    /// Second installment amount.
    Payment2,

    /// Second installment date.
    Payment2Date,

    /// Third installment amount.
    Payment3,

    /// Third installment date.
    Payment3Date,
}

impl Field {
    /// Indicates whether this [`Field`] holds a numeric value coerced on
    /// edit.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SellingPrice
                | Self::VehicleProductionYear
                | Self::SalespersonDiscount
                | Self::CompanyDiscount
                | Self::TotalDiscount
                | Self::FinalPrice
                | Self::Payment1
                | Self::Payment2
                | Self::Payment3
        )
    }

    /// Returns the uniqueness [`validation::Key`] this [`Field`] feeds, if
    /// any.
    #[must_use]
    pub const fn business_key(self) -> Option<validation::Key> {
        match self {
            Self::ContractNumber => Some(validation::Key::Number),
            Self::VehicleVin => Some(validation::Key::Vin),
            Self::VehicleEngineNumber => Some(validation::Key::EngineNumber),
            Self::SigningDate
            | Self::DeliveryDate
            | Self::CustomerName
            | Self::CustomerDateOfBirth
            | Self::CustomerGender
            | Self::CustomerPhone
            | Self::CustomerIdNumber
            | Self::CustomerIdIssueDate
            | Self::CustomerIdIssuePlace
            | Self::CustomerAddress
            | Self::VehicleType
            | Self::VehicleColor
            | Self::VehicleProductionYear
            | Self::PaymentMethod
            | Self::SellingPrice
            | Self::SalespersonDiscount
            | Self::CompanyDiscount
            | Self::TotalDiscount
            | Self::FinalPrice
            | Self::Payment1
            | Self::Payment1Date
            | Self::Payment2
            | Self::Payment2Date
            | Self::Payment3
            | Self::Payment3Date => None,
        }
    }
}

/// Parses a numeric cell value, defaulting to zero on malformed input.
fn decimal_or_zero(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or_default()
}

/// Parses a [`Money`] cell value, defaulting to zero.
fn money_or_zero(raw: &str) -> Money {
    Money::new(decimal_or_zero(raw))
}

/// Parses a date cell value, dropping the date on malformed input.
fn date_or_none(raw: &str) -> Option<Date> {
    raw.trim().parse().ok()
}

impl Contract {
    /// Applies a raw single-[`Field`] edit to this [`Contract`].
    ///
    /// Coercion rules:
    /// - numeric fields parse as a decimal number, defaulting to `0`;
    /// - date fields parse as ISO 8601, clearing the date on failure;
    /// - enumerated fields keep their current value on unknown input;
    /// - [`Field::VehicleType`] additionally resets the selling price to the
    ///   catalog one (when the model is a known catalog entry) and drops the
    ///   promotions not offered for the new model, leaving the color alone.
    ///
    /// The caller is expected to [`Contract::reprice()`] afterwards, the
    /// same way every other mutation path does.
    pub fn apply(&mut self, field: Field, raw: &str) {
        use Field as F;

        match field {
            F::ContractNumber => self.number = raw.into(),
            F::SigningDate => self.signing_date = date_or_none(raw),
            F::DeliveryDate => self.delivery_date = date_or_none(raw),
            F::CustomerName => self.customer.name = raw.to_owned(),
            F::CustomerDateOfBirth => {
                self.customer.date_of_birth = date_or_none(raw);
            }
            F::CustomerGender => {
                self.customer.gender =
                    raw.parse().unwrap_or(self.customer.gender);
            }
            F::CustomerPhone => self.customer.phone = raw.to_owned(),
            F::CustomerIdNumber => self.customer.id_number = raw.to_owned(),
            F::CustomerIdIssueDate => {
                self.customer.id_issue_date = date_or_none(raw);
            }
            F::CustomerIdIssuePlace => {
                self.customer.id_issue_place = raw.to_owned();
            }
            F::CustomerAddress => self.customer.address = raw.to_owned(),
            F::VehicleType => {
                self.vehicle.model = raw.to_owned();
                if let Some(vehicle) = Vehicle::by_name(raw) {
                    self.selling_price = vehicle.price;
                }
                self.promotions.clear_ineligible(raw);
            }
            F::VehicleColor => self.vehicle.color = raw.to_owned(),
            F::VehicleProductionYear => {
                self.vehicle.production_year =
                    decimal_or_zero(raw).trunc().to_i32().unwrap_or_default();
            }
            F::VehicleVin => self.vehicle.vin = raw.into(),
            F::VehicleEngineNumber => self.vehicle.engine_number = raw.into(),
            F::PaymentMethod => {
                self.payment_method =
                    raw.parse().unwrap_or(self.payment_method);
            }
            F::SellingPrice => self.selling_price = money_or_zero(raw),
            F::SalespersonDiscount => {
                self.promotions.salesperson_discount = money_or_zero(raw);
            }
            F::CompanyDiscount => {
                self.promotions.company_discount = money_or_zero(raw);
            }
            F::TotalDiscount => self.total_discount = money_or_zero(raw),
            F::FinalPrice => self.final_price = money_or_zero(raw),
            F::Payment1 => {
                self.schedule.installments[0].amount = money_or_zero(raw);
            }
            F::Payment1Date => {
                self.schedule.installments[0].date = date_or_none(raw);
            }
            F::Payment2 => {
                self.schedule.installments[1].amount = money_or_zero(raw);
            }
            F::Payment2Date => {
                self.schedule.installments[1].date = date_or_none(raw);
            }
            F::Payment3 => {
                self.schedule.installments[2].amount = money_or_zero(raw);
            }
            F::Payment3Date => {
                self.schedule.installments[2].date = date_or_none(raw);
            }
        }
    }
}
