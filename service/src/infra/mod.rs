//! Infrastructure layer.

pub mod database;
pub mod identity;

pub use self::{database::Database, identity::Identity};
