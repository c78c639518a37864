//! [`Command`] provisioning a [`User`] for an authenticated [`Account`].

use common::{operations::{By, Insert, Select}, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, identity::Account, Database},
    Service,
};

use super::Command;

/// [`Command`] provisioning a [`User`] for an authenticated [`Account`].
///
/// The first authenticated event for an unknown [`Account`] creates its
/// [`User`] document with the default salesperson [`user::Role`]; later
/// events return the stored document untouched, so a role assigned by an
/// administrator is never overwritten.
#[derive(Clone, Debug, From)]
pub struct EnsureUser {
    /// Authenticated [`Account`] to provision a [`User`] for.
    pub account: Account,
}

impl<Db, Idp> Command<EnsureUser> for Service<Db, Idp>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: EnsureUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let EnsureUser { account } = cmd;

        if let Some(user) = self
            .database()
            .execute(Select(By::new(account.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        {
            return Ok(user);
        }

        let name = account
            .name
            .unwrap_or_else(|| user::Name::or_fallback(account.email.local_part()));
        let user = User {
            id: account.id,
            email: account.email,
            name,
            role: user::Role::default(),
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`EnsureUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::support::service,
        domain::user,
        infra::identity::Account,
    };

    use super::{Command as _, EnsureUser};

    fn account(email: &str, name: Option<&str>) -> Account {
        Account {
            id: user::Id::new(),
            email: email.into(),
            name: name.map(user::Name::or_fallback),
        }
    }

    #[tokio::test]
    async fn provisions_unknown_account_as_salesperson() {
        let (service, _bg) = service();

        let user = service
            .execute(EnsureUser {
                account: account("lan@dealer.vn", Some("Lan")),
            })
            .await
            .unwrap();

        assert_eq!(user.role, user::Role::Salesperson);
        assert_eq!(user.name.to_string(), "Lan");
    }

    #[tokio::test]
    async fn falls_back_to_email_local_part() {
        let (service, _bg) = service();

        let user = service
            .execute(EnsureUser {
                account: account("minh@dealer.vn", None),
            })
            .await
            .unwrap();

        assert_eq!(user.name.to_string(), "minh");
    }

    #[tokio::test]
    async fn keeps_existing_document_untouched() {
        let (service, _bg) = service();
        let account = account("lan@dealer.vn", Some("Lan"));

        let first = service
            .execute(EnsureUser {
                account: account.clone(),
            })
            .await
            .unwrap();

        let renamed = Account {
            name: Some(user::Name::or_fallback("Someone Else")),
            ..account
        };
        let second = service
            .execute(EnsureUser { account: renamed })
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.name.to_string(), "Lan");
    }
}
