//! [`Command`] definition.

pub mod authorize_user_session;
pub mod create_user_session;
pub mod delete_contract;
pub mod ensure_user;
pub mod save_contract;
pub mod update_contract_field;
pub mod update_user_name;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession,
    create_user_session::CreateUserSession, delete_contract::DeleteContract,
    ensure_user::EnsureUser, save_contract::SaveContract,
    update_contract_field::UpdateContractField,
    update_user_name::UpdateUserName,
};

#[cfg(test)]
pub(crate) mod support {
    //! Helpers shared by [`Command`] tests.

    use std::time::Duration;

    use common::DateTime;

    use crate::{
        domain::{user, Contract, User},
        infra::{database, identity},
        task, Config, Service,
    };

    use super::{Command as _, SaveContract};

    /// Test [`Service`] over empty in-memory collaborators.
    ///
    /// The returned [`task::Background`] is dropped by the caller, so the
    /// refresh task never interferes with assertions on the store.
    pub(crate) fn service(
    ) -> (Service<database::InMemory, identity::InMemory>, task::Background)
    {
        Service::new(
            Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"test-secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"test-secret",
                ),
                refresh_contracts: task::refresh_contracts::Config {
                    debounce: Duration::from_millis(1),
                },
            },
            database::InMemory::new(),
            identity::InMemory::new([]),
        )
    }

    /// Sample salesperson [`User`].
    pub(crate) fn salesperson(name: &str) -> User {
        User {
            id: user::Id::new(),
            email: format!("{name}@dealer.vn").into(),
            name: user::Name::or_fallback(name),
            role: user::Role::Salesperson,
            created_at: DateTime::now().coerce(),
        }
    }

    /// Sample manager [`User`].
    pub(crate) fn manager() -> User {
        User {
            role: user::Role::Manager,
            ..salesperson("boss")
        }
    }

    /// Saves a fresh [`Contract`] with the given `number` on behalf of a
    /// sample salesperson.
    pub(crate) async fn saved_contract(
        service: &Service<database::InMemory, identity::InMemory>,
        number: &str,
    ) -> Contract {
        let mut contract = Contract::default();
        contract.number = number.into();
        service
            .execute(SaveContract {
                contract,
                editor: salesperson("lan"),
            })
            .await
            .expect("sample contract must save")
    }
}
