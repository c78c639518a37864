//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, in_memory, InMemory},
        Database,
    },
};

impl Database<Select<By<Option<User>, user::Id>>> for InMemory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .collections
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }
}

impl Database<Insert<User>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Inserts the [`User`], overwriting a stored one with the same ID.
    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut collections = self.collections.write().await;
        if let Some(stored) =
            collections.users.iter_mut().find(|u| u.id == user.id)
        {
            *stored = user;
        } else {
            collections.users.push(user);
        }
        Ok(())
    }
}

impl Database<Update<User>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut collections = self.collections.write().await;
        let stored = collections
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| {
                tracerr::new!(database::Error::from(
                    in_memory::Error::UserNotExists(user.id),
                ))
            })?;
        *stored = user;
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Insert, Select, Update},
        DateTime,
    };

    use crate::{
        domain::{user, User},
        infra::{
            database::{self, in_memory, InMemory},
            Database as _,
        },
    };

    fn sample(email: &str) -> User {
        User {
            id: user::Id::new(),
            email: email.into(),
            name: user::Name::or_fallback("Minh"),
            role: user::Role::Salesperson,
            created_at: DateTime::now().coerce(),
        }
    }

    #[tokio::test]
    async fn selects_by_id() {
        let db = InMemory::new();
        let user = sample("minh@dealer.vn");
        db.execute(Insert(user.clone())).await.unwrap();

        let by_id: Option<User> =
            db.execute(Select(By::new(user.id))).await.unwrap();
        assert_eq!(by_id.unwrap().id, user.id);

        let missing: Option<User> =
            db.execute(Select(By::new(user::Id::new()))).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn updating_a_missing_user_errors() {
        let db = InMemory::new();
        let user = sample("minh@dealer.vn");

        let err = db.execute(Update(user.clone())).await.unwrap_err();
        assert!(matches!(
            err.as_ref(),
            database::Error::InMemory(in_memory::Error::UserNotExists(_)),
        ));

        db.execute(Insert(user.clone())).await.unwrap();
        let renamed = User {
            name: user::Name::or_fallback("Minh Trần"),
            ..user.clone()
        };
        db.execute(Update(renamed)).await.unwrap();

        let stored: Option<User> =
            db.execute(Select(By::new(user.id))).await.unwrap();
        assert_eq!(stored.unwrap().name.to_string(), "Minh Trần");
    }
}
