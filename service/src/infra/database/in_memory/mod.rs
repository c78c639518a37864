//! In-memory [`Database`] implementation.
//!
//! [`Database`]: super::Database

mod impls;

use std::sync::Arc;

use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;

use crate::domain::{contract, user, Contract, User};

/// In-memory [`Database`] holding its collections behind an async
/// [`RwLock`].
///
/// Cheap to clone. Documents keep their insertion order, the way a fresh
/// unordered listing of a persistent store would return them.
///
/// [`Database`]: super::Database
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Stored collections.
    collections: Arc<RwLock<Collections>>,
}

impl InMemory {
    /// Creates a new empty [`InMemory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Collections stored in an [`InMemory`] database.
#[derive(Debug, Default)]
struct Collections {
    /// "contracts" collection.
    contracts: Vec<Contract>,

    /// "users" collection.
    users: Vec<User>,
}

/// [`InMemory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Contract`] to update does not exist.
    #[display("`Contract(id: {_0})` does not exist")]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// [`User`] to update does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}
