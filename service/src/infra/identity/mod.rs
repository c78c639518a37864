//! [`Identity`] collaborator definitions.

pub mod in_memory;

use std::str::FromStr;

use derive_more::{Display, Error as StdError};
use secrecy::{zeroize::Zeroize, CloneableSecret, SecretBox};
use tokio::sync::watch;

use crate::domain::user;

pub use self::in_memory::InMemory;

/// Identity operation.
pub use common::Handler as Identity;

/// Account registered with the [`Identity`] collaborator.
///
/// Its ID doubles as the [`user::Id`] of the provisioned [`User`] document,
/// the same way the external provider's UID keys the "users" collection.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Account {
    /// ID of this [`Account`].
    pub id: user::Id,

    /// [`user::Email`] this [`Account`] authenticates with.
    pub email: user::Email,

    /// Display name of this [`Account`], if one was ever set.
    pub name: Option<user::Name>,
}

/// Authentication state emitted by the [`Subscribe`] stream.
#[derive(Clone, Debug, Default)]
pub enum AuthState {
    /// An [`Account`] is signed in.
    SignedIn(Account),

    /// Nobody is signed in.
    #[default]
    SignedOut,
}

/// Subscription to [`AuthState`] changes.
///
/// Subscribed once at process start and torn down explicitly on shutdown by
/// dropping the receiver.
pub trait Subscribe {
    /// Returns a receiver following every [`AuthState`] change.
    fn subscribe(&self) -> watch::Receiver<AuthState>;
}

/// [`Identity`] operation signing an [`Account`] in by its credentials.
#[derive(Debug)]
pub struct SignIn {
    /// [`user::Email`] of the [`Account`].
    pub email: user::Email,

    /// [`Password`] of the [`Account`].
    pub password: SecretBox<Password>,
}

/// [`Identity`] operation registering a new [`Account`] and signing it in.
#[derive(Debug)]
pub struct Register {
    /// [`user::Email`] of the new [`Account`].
    pub email: user::Email,

    /// [`Password`] of the new [`Account`].
    pub password: SecretBox<Password>,

    /// Display name of the new [`Account`], if provided.
    pub name: Option<user::Name>,
}

/// [`Identity`] operation signing in via the linked external provider.
#[derive(Clone, Copy, Debug)]
pub struct SignInWithProvider;

/// [`Identity`] operation signing the current [`Account`] out.
#[derive(Clone, Copy, Debug)]
pub struct SignOut;

/// [`Identity`] operation updating the display name of the currently
/// signed-in [`Account`].
#[derive(Clone, Debug)]
pub struct UpdateDisplayName(pub user::Name);

/// Password of an [`Account`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let len = password.as_ref().len();
        (6..=128).contains(&len)
    }
}

impl FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// [`Identity`] error.
///
/// [`Display`]ed messages are surfaced to the signed-out screen as is, so
/// they're phrased for end users.
///
/// [`Display`]: std::fmt::Display
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Credentials don't match any [`Account`].
    #[display("Incorrect email or password")]
    WrongCredentials,

    /// Email is already registered.
    #[display("An account with this email already exists")]
    EmailTaken,

    /// No [`Account`] is linked to the external provider.
    #[display("No account is linked to the external sign-in provider")]
    NoProviderAccount,

    /// No [`Account`] is currently signed in.
    #[display("Nobody is signed in")]
    NotSignedIn,
}
