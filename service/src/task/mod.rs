//! Background [`Task`]s definitions.

mod background;
pub mod refresh_contracts;

pub use common::Handler as Task;

pub use self::{background::Background, refresh_contracts::RefreshContracts};
