//! [`Database`] implementations of the [`InMemory`] database.
//!
//! [`Database`]: crate::infra::Database
//! [`InMemory`]: super::InMemory

mod contract;
mod user;
