//! [`User`] definitions.

pub mod session;

use common::{define_kind, unit, DateTimeOf};
#[cfg(doc)]
use common::DateTime;
use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::session::Session;

/// Platform user.
#[derive(Clone, Debug)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Email`] this [`User`] authenticates with.
    pub email: Email,

    /// Display [`Name`] of this [`User`].
    pub name: Name,

    /// [`Role`] of this [`User`], fixed at account creation.
    pub role: Role,

    /// [`DateTime`] when this [`User`] was created.
    pub created_at: CreationDateTime,
}

/// ID of a [`User`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Display name of a [`User`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Fallback [`Name`] for identities arriving without a display name.
    pub const FALLBACK: &'static str = "New User";

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Creates a new [`Name`], falling back to [`Name::FALLBACK`] if the
    /// given `name` is not a valid one.
    #[expect(clippy::missing_panics_doc, reason = "fallback is valid")]
    #[must_use]
    pub fn or_fallback(name: impl Into<String>) -> Self {
        Self::new(name)
            .unwrap_or_else(|| Self::new(Self::FALLBACK).expect("valid name"))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl std::str::FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a [`User`].
///
/// The address arrives already verified by the identity collaborator, so no
/// format checking is performed here.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[from(&str, String)]
pub struct Email(String);

impl Email {
    /// Returns the local part of this [`Email`] (everything before `@`).
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

define_kind! {
    #[doc = "Role of a [`User`], determining contract visibility."]
    enum Role {
        #[doc = "Salesperson, seeing only their own contracts."]
        Salesperson = 1,

        #[doc = "Manager, seeing all contracts."]
        Manager = 2,
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Salesperson
    }
}

/// [`DateTime`] when a [`User`] was created.
pub type CreationDateTime = DateTimeOf<(User, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::{Email, Name, Role};

    #[test]
    fn name_rejects_untrimmed_and_empty() {
        assert!(Name::new("Nguyễn Văn A").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" padded ").is_none());
    }

    #[test]
    fn name_falls_back() {
        assert_eq!(Name::or_fallback("").to_string(), Name::FALLBACK);
        assert_eq!(Name::or_fallback("Thu").to_string(), "Thu");
    }

    #[test]
    fn email_local_part() {
        assert_eq!(Email::from("thu@example.com").local_part(), "thu");
        assert_eq!(Email::from("no-at-sign").local_part(), "no-at-sign");
    }

    #[test]
    fn default_role_is_salesperson() {
        assert_eq!(Role::default(), Role::Salesperson);
    }
}
