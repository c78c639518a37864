//! [`Contract`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{contract, Contract},
    infra::{
        database::{self, in_memory, InMemory},
        Database,
    },
    read,
};

impl Database<Select<By<Option<Contract>, contract::Id>>> for InMemory {
    type Ok = Option<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Contract>, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .collections
            .read()
            .await
            .contracts
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

impl Database<Select<By<Vec<Contract>, read::contract::list::Selector>>>
    for InMemory
{
    type Ok = Vec<Contract>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Contract>, read::contract::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        Ok(self
            .collections
            .read()
            .await
            .contracts
            .iter()
            .filter(|c| selector.matches(c))
            .cloned()
            .collect())
    }
}

impl Database<Insert<Contract>> for InMemory {
    type Ok = contract::Id;
    type Err = Traced<database::Error>;

    /// Inserts the [`Contract`], overwriting a stored one with the same ID.
    async fn execute(
        &self,
        Insert(contract): Insert<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = contract.id;
        let mut collections = self.collections.write().await;
        if let Some(stored) =
            collections.contracts.iter_mut().find(|c| c.id == id)
        {
            *stored = contract;
        } else {
            collections.contracts.push(contract);
        }
        Ok(id)
    }
}

impl Database<Update<Contract>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(contract): Update<Contract>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut collections = self.collections.write().await;
        let stored = collections
            .contracts
            .iter_mut()
            .find(|c| c.id == contract.id)
            .ok_or_else(|| {
                tracerr::new!(database::Error::from(
                    in_memory::Error::ContractNotExists(contract.id),
                ))
            })?;
        *stored = contract;
        Ok(())
    }
}

impl Database<Update<Vec<Contract>>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Updates the whole batch atomically: either every [`Contract`] is
    /// rewritten, or none is.
    async fn execute(
        &self,
        Update(contracts): Update<Vec<Contract>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut collections = self.collections.write().await;
        for c in &contracts {
            if !collections.contracts.iter().any(|s| s.id == c.id) {
                return Err(tracerr::new!(database::Error::from(
                    in_memory::Error::ContractNotExists(c.id),
                )));
            }
        }
        for c in contracts {
            if let Some(stored) =
                collections.contracts.iter_mut().find(|s| s.id == c.id)
            {
                *stored = c;
            }
        }
        Ok(())
    }
}

impl Database<Delete<By<Contract, contract::Id>>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Deletes the [`Contract`], succeeding even if it's already gone.
    async fn execute(
        &self,
        Delete(by): Delete<By<Contract, contract::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.collections
            .write()
            .await
            .contracts
            .retain(|c| c.id != id);
        Ok(())
    }
}
