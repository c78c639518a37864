//! In-memory [`Identity`] implementation.

use std::sync::Arc;

use secrecy::{ExposeSecret as _, SecretBox};
use tokio::sync::{watch, Mutex};
use tracerr::Traced;

use crate::domain::user;

use super::{
    Account, AuthState, Error, Identity, Password, Register, SignIn,
    SignInWithProvider, SignOut, Subscribe, UpdateDisplayName,
};

/// In-memory [`Identity`] provider backed by a seeded account directory.
///
/// Cheap to clone. Every sign-in/out is broadcast over a [`watch`] channel,
/// so subscribers always observe the latest [`AuthState`].
#[derive(Clone, Debug)]
pub struct InMemory(Arc<Shared>);

#[derive(Debug)]
struct Shared {
    directory: Mutex<Vec<Entry>>,
    auth: watch::Sender<AuthState>,
}

/// Single [`Account`] of the directory.
#[derive(Debug)]
struct Entry {
    account: Account,
    password: SecretBox<Password>,
    provider_linked: bool,
}

/// Seeded [`Account`] of an [`InMemory`] identity provider.
#[derive(Debug)]
pub struct Seed {
    /// [`user::Email`] the [`Account`] authenticates with.
    pub email: user::Email,

    /// [`Password`] of the [`Account`].
    pub password: SecretBox<Password>,

    /// Display name of the [`Account`], if any.
    pub name: Option<user::Name>,

    /// Whether the [`Account`] is linked to the external sign-in provider.
    pub provider_linked: bool,
}

impl InMemory {
    /// Creates a new [`InMemory`] identity provider holding the given
    /// [`Seed`] accounts, with nobody signed in.
    #[must_use]
    pub fn new(seeds: impl IntoIterator<Item = Seed>) -> Self {
        let directory = seeds
            .into_iter()
            .map(|seed| Entry {
                account: Account {
                    id: user::Id::new(),
                    email: seed.email,
                    name: seed.name,
                },
                password: seed.password,
                provider_linked: seed.provider_linked,
            })
            .collect();
        let (auth, _) = watch::channel(AuthState::SignedOut);
        Self(Arc::new(Shared {
            directory: Mutex::new(directory),
            auth,
        }))
    }

    fn sign_in_as(&self, account: Account) {
        _ = self.0.auth.send_replace(AuthState::SignedIn(account));
    }
}

impl Subscribe for InMemory {
    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.0.auth.subscribe()
    }
}

impl Identity<SignIn> for InMemory {
    type Ok = Account;
    type Err = Traced<Error>;

    async fn execute(&self, op: SignIn) -> Result<Self::Ok, Self::Err> {
        let directory = self.0.directory.lock().await;
        let account = directory
            .iter()
            .find(|e| {
                e.account.email == op.email
                    && e.password.expose_secret()
                        == op.password.expose_secret()
            })
            .map(|e| e.account.clone())
            .ok_or_else(|| tracerr::new!(Error::WrongCredentials))?;
        drop(directory);

        self.sign_in_as(account.clone());
        Ok(account)
    }
}

impl Identity<Register> for InMemory {
    type Ok = Account;
    type Err = Traced<Error>;

    async fn execute(&self, op: Register) -> Result<Self::Ok, Self::Err> {
        let mut directory = self.0.directory.lock().await;
        if directory.iter().any(|e| e.account.email == op.email) {
            return Err(tracerr::new!(Error::EmailTaken));
        }

        let account = Account {
            id: user::Id::new(),
            email: op.email,
            name: op.name,
        };
        directory.push(Entry {
            account: account.clone(),
            password: op.password,
            provider_linked: false,
        });
        drop(directory);

        self.sign_in_as(account.clone());
        Ok(account)
    }
}

impl Identity<SignInWithProvider> for InMemory {
    type Ok = Account;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: SignInWithProvider,
    ) -> Result<Self::Ok, Self::Err> {
        let directory = self.0.directory.lock().await;
        let account = directory
            .iter()
            .find(|e| e.provider_linked)
            .map(|e| e.account.clone())
            .ok_or_else(|| tracerr::new!(Error::NoProviderAccount))?;
        drop(directory);

        self.sign_in_as(account.clone());
        Ok(account)
    }
}

impl Identity<SignOut> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(&self, _: SignOut) -> Result<Self::Ok, Self::Err> {
        _ = self.0.auth.send_replace(AuthState::SignedOut);
        Ok(())
    }
}

impl Identity<UpdateDisplayName> for InMemory {
    type Ok = ();
    type Err = Traced<Error>;

    async fn execute(
        &self,
        UpdateDisplayName(name): UpdateDisplayName,
    ) -> Result<Self::Ok, Self::Err> {
        let signed_in = match &*self.0.auth.borrow() {
            AuthState::SignedIn(account) => account.clone(),
            AuthState::SignedOut => {
                return Err(tracerr::new!(Error::NotSignedIn));
            }
        };

        let mut directory = self.0.directory.lock().await;
        if let Some(entry) =
            directory.iter_mut().find(|e| e.account.id == signed_in.id)
        {
            entry.account.name = Some(name.clone());
        }
        drop(directory);

        self.sign_in_as(Account {
            name: Some(name),
            ..signed_in
        });
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use crate::{
        domain::user,
        infra::{
            identity::{
                AuthState, Error, Password, Register, SignIn,
                SignInWithProvider, SignOut, Subscribe as _,
                UpdateDisplayName,
            },
            Identity as _,
        },
    };

    use super::{InMemory, Seed};

    fn password(raw: &str) -> SecretBox<Password> {
        SecretBox::new(Box::new(Password::new(raw).unwrap()))
    }

    fn seeded() -> InMemory {
        InMemory::new([Seed {
            email: "lan@dealer.vn".into(),
            password: password("s3cr3t-lan"),
            name: Some(user::Name::or_fallback("Lan")),
            provider_linked: true,
        }])
    }

    #[tokio::test]
    async fn signs_in_with_correct_credentials_only() {
        let idp = seeded();
        let mut auth = idp.subscribe();

        let err = idp
            .execute(SignIn {
                email: "lan@dealer.vn".into(),
                password: password("wrong-one"),
            })
            .await
            .unwrap_err();
        assert!(matches!(*err.as_ref(), Error::WrongCredentials));

        let account = idp
            .execute(SignIn {
                email: "lan@dealer.vn".into(),
                password: password("s3cr3t-lan"),
            })
            .await
            .unwrap();
        assert_eq!(account.email, "lan@dealer.vn".into());

        assert!(auth.has_changed().unwrap());
        assert!(matches!(
            &*auth.borrow_and_update(),
            AuthState::SignedIn(_),
        ));

        idp.execute(SignOut).await.unwrap();
        assert!(matches!(&*auth.borrow_and_update(), AuthState::SignedOut));
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let idp = seeded();

        let err = idp
            .execute(Register {
                email: "lan@dealer.vn".into(),
                password: password("whatever"),
                name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(*err.as_ref(), Error::EmailTaken));

        let account = idp
            .execute(Register {
                email: "minh@dealer.vn".into(),
                password: password("m1nh-pass"),
                name: None,
            })
            .await
            .unwrap();
        assert!(account.name.is_none());
    }

    #[tokio::test]
    async fn provider_sign_in_uses_linked_account() {
        let idp = seeded();
        let account = idp.execute(SignInWithProvider).await.unwrap();
        assert_eq!(account.email, "lan@dealer.vn".into());

        let empty = InMemory::new([]);
        let err = empty.execute(SignInWithProvider).await.unwrap_err();
        assert!(matches!(*err.as_ref(), Error::NoProviderAccount));
    }

    #[tokio::test]
    async fn display_name_update_is_broadcast() {
        let idp = seeded();
        assert!(matches!(
            *idp.execute(UpdateDisplayName(user::Name::or_fallback("Hoa")))
                .await
                .unwrap_err()
                .as_ref(),
            Error::NotSignedIn,
        ));

        let _ = idp.execute(SignInWithProvider).await.unwrap();
        let mut auth = idp.subscribe();
        idp.execute(UpdateDisplayName(user::Name::or_fallback("Hoa")))
            .await
            .unwrap();

        match &*auth.borrow_and_update() {
            AuthState::SignedIn(account) => {
                assert_eq!(
                    account.name.as_ref().map(ToString::to_string),
                    Some("Hoa".to_owned()),
                );
            }
            AuthState::SignedOut => panic!("expected a signed-in state"),
        };
    }
}
