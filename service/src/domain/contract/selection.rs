//! Vehicle selection of a contract.

use common::Date;
use derive_more::{AsRef, Display, From, Into};
use smart_default::SmartDefault;

use crate::domain::Vehicle;

/// Vehicle chosen in a contract.
///
/// The model and the color are stored as the display strings the catalog
/// uses, so a contract keeps its original wording even if the catalog
/// changes later.
#[derive(Clone, Debug, Eq, PartialEq, SmartDefault)]
pub struct Selection {
    /// Model name, normally one of the [`Vehicle`] catalog names.
    #[default(Vehicle::default_entry().name.to_owned())]
    pub model: String,

    /// Chosen color.
    #[default(Vehicle::default_entry().default_color().to_owned())]
    pub color: String,

    /// Production year of the concrete unit.
    #[default(Date::today().year())]
    pub production_year: i32,

    /// Chassis number (VIN) of the concrete unit.
    pub vin: Vin,

    /// Engine number of the concrete unit.
    pub engine_number: EngineNumber,
}

/// Chassis number (VIN) of a vehicle unit.
///
/// Unique across contracts once filled in. May stay empty while the unit is
/// not allocated yet.
#[derive(
    AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq,
)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Vin(String);

/// Engine number of a vehicle unit.
///
/// Unique across contracts once filled in, same as [`Vin`].
#[derive(
    AsRef, Clone, Debug, Default, Display, Eq, From, Into, PartialEq,
)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct EngineNumber(String);
