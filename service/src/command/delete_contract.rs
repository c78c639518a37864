//! [`Command`] for deleting a [`Contract`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{contract, Contract},
    infra::{database, Database},
    store::Action,
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Contract`].
///
/// Deleting an already-removed [`Contract`] succeeds, so a double-click (or
/// a stale listing) never surfaces an error. The local state drops the
/// contract immediately, with no full refresh demanded.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteContract {
    /// ID of the [`Contract`] to delete.
    pub id: contract::Id,
}

impl<Db, Idp> Command<DeleteContract> for Service<Db, Idp>
where
    Db: Database<
        Delete<By<Contract, contract::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteContract,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteContract { id } = cmd;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.store().dispatch(Action::ContractRemoved(id)).await;

        Ok(())
    }
}

/// Error of [`DeleteContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::command::support::{saved_contract, service};

    use super::{Command as _, DeleteContract};

    #[tokio::test]
    async fn removes_contract_and_local_state() {
        let (service, _bg) = service();
        let contract = saved_contract(&service, "HD-001").await;

        service
            .execute(DeleteContract { id: contract.id })
            .await
            .unwrap();

        let state = service.store().snapshot().await;
        assert!(state.contracts.is_empty());

        // A repeated delete is a no-op rather than an error.
        service
            .execute(DeleteContract { id: contract.id })
            .await
            .unwrap();
    }
}
