//! [`RefreshContracts`] [`Task`].

use std::{convert::Infallible, time::Duration};

use common::operations::{By, Insert, Perform, Select, Start};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{ensure_user, EnsureUser},
    domain::{user, Contract, User},
    infra::{
        database,
        identity::{AuthState, Subscribe},
        Database,
    },
    read::contract::list::{Scope, Selector},
    store::Action,
    Service,
};

use super::Task;

/// Configuration for [`RefreshContracts`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Time to sit on a refresh demand before re-listing, letting a burst
    /// of consecutive mutations collapse into one listing.
    pub debounce: Duration,
}

/// [`Task`] keeping the local contract listing in sync with storage.
///
/// The single consumer of both the [`Store`]'s refresh demand and the
/// [`AuthState`] stream: every mutation raises a flag instead of re-listing
/// by itself, and this task folds all demands into one scoped listing.
///
/// [`Store`]: crate::store::Store
#[derive(Clone, Copy, Debug)]
pub struct RefreshContracts<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db, Idp> Task<Start<By<RefreshContracts<Self>, Config>>>
    for Service<Db, Idp>
where
    RefreshContracts<Service<Db, Idp>>:
        Task<Perform<AuthState>, Ok = (), Err: std::error::Error>,
    Idp: Subscribe,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<RefreshContracts<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = RefreshContracts {
            config,
            service: self.clone(),
        };

        let mut auth = self.identity().subscribe();
        loop {
            tokio::select! {
                () = self.store().refresh_needed() => {}
                changed = auth.changed() => {
                    if changed.is_err() {
                        // Identity collaborator is gone, nothing to follow.
                        break Ok(());
                    }
                }
            }
            tokio::time::sleep(task.config.debounce).await;

            let state = auth.borrow_and_update().clone();
            _ = task.execute(Perform(state)).await.map_err(|e| {
                log::error!("`task::RefreshContracts` failed: {e}");
            });
        }
    }
}

impl<Db, Idp> Task<Perform<AuthState>> for RefreshContracts<Service<Db, Idp>>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Contract>, Selector>>,
            Ok = Vec<Contract>,
            Err = Traced<database::Error>,
        > + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Perform(auth): Perform<AuthState>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let contracts = match auth {
            AuthState::SignedOut => Vec::new(),
            AuthState::SignedIn(account) => {
                // A first-time identity gets its document here, so a
                // provider sign-in never lands on an unknown id.
                let user = self
                    .service
                    .execute(EnsureUser { account })
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                let scope = if user.role == user::Role::Manager {
                    Scope::All
                } else {
                    Scope::Salesperson(user.id)
                };
                self.service
                    .database()
                    .execute(Select(By::new(Selector::all(scope))))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
            }
        };

        self.service
            .store()
            .dispatch(Action::ContractsLoaded(contracts))
            .await;

        Ok(())
    }
}

/// Error of [`RefreshContracts`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`EnsureUser`] failure while provisioning the signed-in identity.
    #[display("`EnsureUser` command failed: {_0}")]
    EnsureUser(ensure_user::ExecutionError),
}
