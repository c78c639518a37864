//! [`Command`] for applying a single-field inline edit to a [`Contract`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        contract::{self, validation, Field, Violation},
        Contract,
    },
    infra::{database, Database},
    read::contract::list::{Scope, Selector},
    store::Action,
    Service,
};

use super::Command;

/// [`Command`] for applying a single-field inline edit to a [`Contract`].
///
/// The raw cell text is coerced by [`Contract::apply()`], the pricing is
/// recomputed, and the result is persisted as a whole-document update.
/// Applying the same edit twice leaves the stored [`Contract`] identical.
#[derive(Clone, Debug)]
pub struct UpdateContractField {
    /// ID of the [`Contract`] being edited.
    pub id: contract::Id,

    /// [`Field`] being edited.
    pub field: Field,

    /// Raw text of the edited cell.
    pub value: String,
}

impl<Db, Idp> Command<UpdateContractField> for Service<Db, Idp>
where
    Db: Database<
            Select<By<Option<Contract>, contract::Id>>,
            Ok = Option<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Contract>, Selector>>,
            Ok = Vec<Contract>,
            Err = Traced<database::Error>,
        > + Database<Update<Contract>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Contract;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateContractField,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateContractField { id, field, value } = cmd;

        let mut contract: Contract = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ContractNotExists(id))
            .map_err(tracerr::wrap!())?;

        contract.apply(field, &value);
        contract.reprice();

        if field.business_key().is_some() {
            let all = self
                .database()
                .execute(Select(By::new(Selector::all(Scope::All))))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            let violations = validation::duplicates(&contract, &all);
            self.store()
                .dispatch(Action::ViolationsReported {
                    contract_id: id,
                    violations: violations.clone(),
                })
                .await;
            if !violations.is_empty() {
                return Err(tracerr::new!(E::DuplicateKeys(violations)));
            }
        }

        self.database()
            .execute(Update(contract.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.store()
            .dispatch(Action::ContractSaved(contract.clone()))
            .await;
        self.store().dispatch(Action::EditCommitted).await;
        self.store().dispatch(Action::RefreshRequested).await;

        Ok(contract)
    }
}

/// Error of [`UpdateContractField`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Contract`] doesn't exist.
    #[display("`Contract(id: {_0})` does not exist")]
    #[from(ignore)]
    ContractNotExists(#[error(not(source))] contract::Id),

    /// The edited value conflicts with another stored contract.
    #[display(
        "Duplicated unique fields: {}",
        _0.iter().map(|v| v.key.to_string()).collect::<Vec<_>>().join(", ")
    )]
    #[from(ignore)]
    DuplicateKeys(#[error(not(source))] Vec<Violation>),
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::support::{saved_contract, service},
        domain::{contract::Field, Contract},
        store::Edit,
    };

    use super::{Command as _, ExecutionError, UpdateContractField};

    #[tokio::test]
    async fn coerces_reprices_and_persists() {
        let (service, _bg) = service();
        let contract = saved_contract(&service, "HD-001").await;

        let updated = service
            .execute(UpdateContractField {
                id: contract.id,
                field: Field::SalespersonDiscount,
                value: "1000000".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(
            updated.promotions.salesperson_discount,
            Money::vnd(1_000_000),
        );
        assert_eq!(updated.total_discount, Money::vnd(1_000_000));
        assert_eq!(
            updated.final_price,
            updated.selling_price - Money::vnd(1_000_000),
        );

        let state = service.store().snapshot().await;
        assert_eq!(state.edit, Edit::Viewing);
        assert!(state.needs_refresh);
    }

    #[tokio::test]
    async fn is_idempotent() {
        let (service, _bg) = service();
        let contract = saved_contract(&service, "HD-001").await;

        let edit = UpdateContractField {
            id: contract.id,
            field: Field::SellingPrice,
            value: "500000000".to_owned(),
        };
        let once = service.execute(edit.clone()).await.unwrap();
        let twice = service.execute(edit).await.unwrap();

        assert_eq!(once, twice);
    }

    #[tokio::test]
    async fn model_edit_reprices_from_catalog() {
        let (service, _bg) = service();
        let contract = saved_contract(&service, "HD-001").await;

        let updated = service
            .execute(UpdateContractField {
                id: contract.id,
                field: Field::VehicleType,
                value: "VF6 ECO".to_owned(),
            })
            .await
            .unwrap();

        assert_eq!(updated.selling_price, Money::vnd(689_000_000));
        assert_eq!(updated.final_price, Money::vnd(689_000_000));
    }

    #[tokio::test]
    async fn duplicate_key_edit_is_blocked() {
        let (service, _bg) = service();
        let _first = saved_contract(&service, "HD-001").await;
        let second = saved_contract(&service, "HD-002").await;

        let err = service
            .execute(UpdateContractField {
                id: second.id,
                field: Field::ContractNumber,
                value: "HD-001".to_owned(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::DuplicateKeys(_)));

        let state = service.store().snapshot().await;
        let stored = state
            .contracts
            .iter()
            .find(|c| c.id == second.id)
            .unwrap();
        assert_eq!(stored.number, "HD-002".into());
    }

    #[tokio::test]
    async fn unknown_contract_is_reported() {
        let (service, _bg) = service();

        let err = service
            .execute(UpdateContractField {
                id: Contract::default().id,
                field: Field::CustomerName,
                value: "Ai đó".to_owned(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            ExecutionError::ContractNotExists(_),
        ));
    }
}
