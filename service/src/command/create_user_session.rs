//! [`Command`] for creating a [`Session`].

use std::time::Duration;

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::SecretBox;
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, identity, Database, Identity},
    Service,
};

use super::{ensure_user, Command, EnsureUser};

/// [`Command`] for creating a [`Session`].
#[derive(Debug, From)]
pub enum CreateUserSession {
    /// Create a new [`Session`] by signing in with [`Account`] credentials.
    ///
    /// The [`User`] document is provisioned on the fly if this is the
    /// account's first sign-in.
    ///
    /// [`Account`]: identity::Account
    ByCredentials {
        /// [`user::Email`] of the [`Account`].
        ///
        /// [`Account`]: identity::Account
        email: user::Email,

        /// [`identity::Password`] of the [`Account`].
        ///
        /// [`Account`]: identity::Account
        password: SecretBox<identity::Password>,
    },

    /// Create a new [`Session`] by [`User`] ID.
    ByUserId(user::Id),
}

impl CreateUserSession {
    /// [`Duration`] of [`Session`] expiration.
    const EXPIRATION_DURATION: Duration = Duration::from_secs(30 * 60);
}

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    ///
    /// [`Token`]: session::Token
    pub token: session::Token,

    /// [`User`] whose [`Session`] has been created.
    pub user: User,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db, Idp> Command<CreateUserSession> for Service<Db, Idp>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
    Idp: Identity<
        identity::SignIn,
        Ok = identity::Account,
        Err = Traced<identity::Error>,
    >,
    Self: Command<
        EnsureUser,
        Ok = User,
        Err = Traced<ensure_user::ExecutionError>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use CreateUserSession as Cmd;
        use ExecutionError as E;

        let user = match cmd {
            Cmd::ByCredentials { email, password } => {
                let account = self
                    .identity()
                    .execute(identity::SignIn { email, password })
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;

                self.execute(EnsureUser { account })
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
            }
            Cmd::ByUserId(user_id) => self
                .database()
                .execute(Select(By::new(user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or_else(|| E::UserNotExists(user_id))
                .map_err(tracerr::wrap!())?,
        };

        let expires_at = (DateTime::now() + Cmd::EXPIRATION_DURATION).coerce();
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session {
                user_id: user.id,
                expires_at,
            },
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        Ok(Output {
            token: session::Token::new(token),
            user,
            expires_at,
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`EnsureUser`] [`Command`] failed.
    #[display("`EnsureUser` command failed: {_0}")]
    EnsureUser(ensure_user::ExecutionError),

    /// [`Identity`] error.
    #[display("{_0}")]
    Identity(identity::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use secrecy::SecretBox;

    use std::time::Duration;

    use crate::{
        domain::user,
        infra::{
            database,
            identity::{self, in_memory::Seed, InMemory, Password},
        },
        task, Config, Service,
    };

    use super::{Command as _, CreateUserSession, ExecutionError};

    fn seeded_service(
    ) -> (Service<database::InMemory, InMemory>, task::Background) {
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
            InMemory::new([Seed {
                email: "lan@dealer.vn".into(),
                password: SecretBox::new(Box::new(
                    Password::new("s3cr3t-lan").unwrap(),
                )),
                name: Some(user::Name::or_fallback("Lan")),
                provider_linked: false,
            }]),
        )
    }

    #[tokio::test]
    async fn credentials_sign_in_provisions_and_issues_token() {
        let (service, _bg) = seeded_service();

        let output = service
            .execute(CreateUserSession::ByCredentials {
                email: "lan@dealer.vn".into(),
                password: SecretBox::new(Box::new(
                    Password::new("s3cr3t-lan").unwrap(),
                )),
            })
            .await
            .unwrap();

        assert_eq!(output.user.email, "lan@dealer.vn".into());
        assert_eq!(output.user.role, user::Role::Salesperson);
        assert!(!output.token.to_string().is_empty());
    }

    #[tokio::test]
    async fn wrong_credentials_surface_identity_error() {
        let (service, _bg) = seeded_service();

        let err = service
            .execute(CreateUserSession::ByCredentials {
                email: "lan@dealer.vn".into(),
                password: SecretBox::new(Box::new(
                    Password::new("wrong-one").unwrap(),
                )),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Identity(identity::Error::WrongCredentials),
        ));
    }

    #[tokio::test]
    async fn unknown_user_id_is_reported() {
        let (service, _bg) = seeded_service();

        let err = service
            .execute(CreateUserSession::ByUserId(user::Id::new()))
            .await
            .unwrap_err();
        assert!(matches!(err.as_ref(), ExecutionError::UserNotExists(_)));
    }
}
