//! [`Command`] for updating an [`user::Name`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::Name;
use crate::{
    domain::{user, Contract, User},
    infra::{database, identity, Database, Identity},
    read::contract::list::{Scope, Selector},
    store::Action,
    Service,
};

use super::Command;

/// [`Command`] for updating an [`user::Name`].
///
/// The denormalized salesperson name in all that user's contracts is
/// rewritten as a single batched update. The cascade is not atomic with the
/// user update itself: storage stays authoritative and the raised refresh
/// demand re-lists whatever actually persisted.
#[derive(Clone, Debug, From)]
pub struct UpdateUserName {
    /// ID of the [`User`] which [`Name`] should be updated.
    pub user_id: user::Id,

    /// New [`Name`] of the [`User`].
    pub name: user::Name,
}

impl<Db, Idp> Command<UpdateUserName> for Service<Db, Idp>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>
        + Database<
            Select<By<Vec<Contract>, Selector>>,
            Ok = Vec<Contract>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Vec<Contract>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
    Idp: Identity<
        identity::UpdateDisplayName,
        Ok = (),
        Err = Traced<identity::Error>,
    >,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateUserName,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUserName { user_id, name } = cmd;

        let mut user = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;
        if user.name == name {
            return Ok(user);
        }

        user.name = name.clone();
        self.database()
            .execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // The identity profile is display-only, so a failed sync is logged
        // rather than rolled back.
        _ = self
            .identity()
            .execute(identity::UpdateDisplayName(name.clone()))
            .await
            .map_err(|e| {
                log::warn!("failed to sync identity display name: {e}");
            });

        let mut authored: Vec<Contract> = self
            .database()
            .execute(Select(By::new(Selector::all(Scope::Salesperson(
                user_id,
            )))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !authored.is_empty() {
            for contract in &mut authored {
                if let Some(salesperson) = &mut contract.salesperson {
                    salesperson.name = name.clone();
                }
            }
            self.database()
                .execute(Update(authored))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            self.store().dispatch(Action::RefreshRequested).await;
        }

        Ok(user)
    }
}

/// Error of [`UpdateUserName`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
