//! Domain definitions.

pub mod contract;
pub mod user;
pub mod vehicle;

pub use self::{contract::Contract, user::User, vehicle::Vehicle};
