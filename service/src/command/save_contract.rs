//! [`Command`] for saving a [`Contract`] from the full authoring form.

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, validation, Salesperson, Violation},
        user, Contract, User,
    },
    infra::{database, Database},
    read::contract::list::{Scope, Selector},
    store::Action,
    Service,
};

use super::Command;

/// [`Command`] for saving a [`Contract`] from the full authoring form.
///
/// Covers both creation and a full edit: the distinction is made by whether
/// a [`Contract`] with the same ID is already stored.
#[derive(Clone, Debug)]
pub struct SaveContract {
    /// [`Contract`] to save, as authored in the form.
    pub contract: Contract,

    /// [`User`] performing the save.
    pub editor: User,
}

impl<Db, Idp> Command<SaveContract> for Service<Db, Idp>
where
    Db: Database<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Contract>, Selector>>,
            Ok = Vec<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Insert<Contract>,
            Ok = contract::Id,
            Err = Traced<database::Error>,
        > + Database<Update<Contract>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SaveContract) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveContract {
            mut contract,
            editor,
        } = cmd;

        let stored: Option<Contract> = self
            .database()
            .execute(Select(By::new(contract.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let is_new = stored.is_none();

        if is_new && editor.role == user::Role::Manager {
            return Err(tracerr::new!(E::ManagerCannotCreate));
        }

        // The sweep runs against every stored contract, not just the ones
        // visible to the editor.
        let all = self
            .database()
            .execute(Select(By::new(Selector::all(Scope::All))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let violations = validation::duplicates(&contract, &all);
        self.store()
            .dispatch(Action::ViolationsReported {
                contract_id: contract.id,
                violations: violations.clone(),
            })
            .await;
        if !violations.is_empty() {
            return Err(tracerr::new!(E::DuplicateKeys(violations)));
        }

        if is_new {
            contract.salesperson = Some(Salesperson {
                id: editor.id,
                name: editor.name.clone(),
            });
        }
        contract.reprice();

        if is_new {
            let _ = self
                .database()
                .execute(Insert(contract.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        } else {
            self.database()
                .execute(Update(contract.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        self.store()
            .dispatch(Action::ContractSaved(contract.clone()))
            .await;
        self.store().dispatch(Action::RefreshRequested).await;

        Ok(contract)
    }
}

/// Error of [`SaveContract`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Unique field values conflict with other stored contracts.
    #[display(
        "Duplicated unique fields: {}",
        _0.iter().map(|v| v.key.to_string()).collect::<Vec<_>>().join(", ")
    )]
    #[from(ignore)]
    DuplicateKeys(#[error(not(source))] Vec<Violation>),

    /// Managers review contracts and cannot author new ones.
    #[display("Managers cannot create contracts")]
    ManagerCannotCreate,
}

#[cfg(test)]
mod spec {
    use crate::{
        command::support::{manager, salesperson, service},
        domain::Contract,
        store::Edit,
    };

    use super::{Command as _, ExecutionError, SaveContract};

    #[tokio::test]
    async fn new_contract_is_stamped_and_repriced() {
        let (service, _bg) = service();
        let editor = salesperson("lan");

        let mut contract = Contract::default();
        contract.number = "HD-001".into();
        contract.promotions.four_percent = true;

        let saved = service
            .execute(SaveContract {
                contract,
                editor: editor.clone(),
            })
            .await
            .unwrap();

        assert_eq!(saved.salesperson.as_ref().unwrap().id, editor.id);
        assert_eq!(saved.total_discount, common::Money::vnd(11_960_000));

        let state = service.store().snapshot().await;
        assert_eq!(state.contracts.len(), 1);
        assert!(state.violations.is_empty());
        assert!(state.needs_refresh);
        assert_eq!(state.edit, Edit::Viewing);
    }

    #[tokio::test]
    async fn duplicate_keys_block_the_save() {
        let (service, _bg) = service();
        let editor = salesperson("lan");

        let mut first = Contract::default();
        first.number = "HD-001".into();
        let _ = service
            .execute(SaveContract {
                contract: first,
                editor: editor.clone(),
            })
            .await
            .unwrap();

        let mut second = Contract::default();
        second.number = " hd-001 ".into();
        let err = service
            .execute(SaveContract {
                contract: second.clone(),
                editor,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::DuplicateKeys(_),
        ));
        let state = service.store().snapshot().await;
        assert_eq!(state.contracts.len(), 1, "blocked save must not persist");
        assert_eq!(state.violations.len(), 1);
        assert_eq!(state.violations[0].contract_id, second.id);
    }

    #[tokio::test]
    async fn manager_cannot_create_but_can_edit() {
        let (service, _bg) = service();

        let err = service
            .execute(SaveContract {
                contract: Contract::default(),
                editor: manager(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::ManagerCannotCreate,
        ));

        let mut contract = Contract::default();
        contract.number = "HD-001".into();
        let saved = service
            .execute(SaveContract {
                contract,
                editor: salesperson("lan"),
            })
            .await
            .unwrap();

        let mut edited = saved.clone();
        edited.customer.name = "Trần Thị Hoa".to_owned();
        let resaved = service
            .execute(SaveContract {
                contract: edited,
                editor: manager(),
            })
            .await
            .unwrap();

        assert_eq!(resaved.customer.name, "Trần Thị Hoa");
        assert_eq!(
            resaved.salesperson,
            saved.salesperson,
            "editing must not restamp the author",
        );
    }
}
