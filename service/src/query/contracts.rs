//! [`Query`] collection related to the multiple [`Contract`]s.

use common::operations::By;

use crate::{domain::Contract, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Contract`]s matching a
/// [`Selector`](read::contract::list::Selector).
pub type List =
    DatabaseQuery<By<Vec<Contract>, read::contract::list::Selector>>;
