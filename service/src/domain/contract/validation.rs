//! Uniqueness validation of business keys.

use strum::{Display, EnumString};

use super::{Contract, Id};

/// Business key of a [`Contract`] that must stay unique across all the
/// stored contracts.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, Hash, PartialEq)]
#[strum(serialize_all = "camelCase")]
pub enum Key {
    /// [`Contract::number`].
    #[strum(serialize = "contractNumber")]
    Number,

    /// [`Selection::vin`](super::Selection::vin).
    #[strum(serialize = "vehicleVin")]
    Vin,

    /// [`Selection::engine_number`](super::Selection::engine_number).
    #[strum(serialize = "vehicleEngineNumber")]
    EngineNumber,
}

impl Key {
    /// All the [`Key`]s checked on every save.
    pub const ALL: [Self; 3] = [Self::Number, Self::Vin, Self::EngineNumber];

    /// Returns the raw value of this [`Key`] in the given [`Contract`].
    #[must_use]
    pub fn value(self, contract: &Contract) -> &str {
        match self {
            Self::Number => contract.number.as_ref(),
            Self::Vin => contract.vehicle.vin.as_ref(),
            Self::EngineNumber => contract.vehicle.engine_number.as_ref(),
        }
    }
}

/// Detected uniqueness [`Violation`] of a [`Key`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Violation {
    /// [`Contract`] the conflicting value was about to be saved into.
    pub contract_id: Id,

    /// [`Key`] the conflict was detected on.
    pub key: Key,
}

/// Checks the `candidate`'s business keys against `all` stored contracts,
/// returning a [`Violation`] per conflicting [`Key`].
///
/// Values are compared trimmed and lowercased, so `" ABC "` and `"abc"`
/// collide. Empty values never collide, and the `candidate` itself (matched
/// by ID) never conflicts with its own stored copy.
#[must_use]
pub fn duplicates(candidate: &Contract, all: &[Contract]) -> Vec<Violation> {
    Key::ALL
        .into_iter()
        .filter(|key| {
            let Some(needle) = normalized(key.value(candidate)) else {
                return false;
            };
            all.iter().any(|other| {
                other.id != candidate.id
                    && normalized(key.value(other)).as_deref()
                        == Some(&*needle)
            })
        })
        .map(|key| Violation {
            contract_id: candidate.id,
            key,
        })
        .collect()
}

/// Normalizes a business key value for comparison.
///
/// Returns [`None`] for values that are empty after trimming, as those are
/// exempt from uniqueness.
fn normalized(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

#[cfg(test)]
mod spec {
    use super::{duplicates, normalized, Contract, Key};

    fn stored(number: &str, vin: &str, engine: &str) -> Contract {
        let mut c = Contract::default();
        c.number = number.into();
        c.vehicle.vin = vin.into();
        c.vehicle.engine_number = engine.into();
        c
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalized("  HD-001 "), Some("hd-001".to_owned()));
        assert_eq!(normalized(""), None);
        assert_eq!(normalized("   "), None);
    }

    #[test]
    fn detects_conflicts_per_key() {
        let existing = stored("HD-001", "VIN123", "ENG123");
        let mut candidate = stored(" hd-001", "vin999", "eng123 ");

        let violations = duplicates(&candidate, &[existing.clone()]);

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].key, Key::Number);
        assert_eq!(violations[0].contract_id, candidate.id);
        assert_eq!(violations[1].key, Key::EngineNumber);

        candidate.vehicle.engine_number = "other".into();
        let violations = duplicates(&candidate, &[existing]);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn empty_values_never_conflict() {
        let existing = stored("", "", "");
        let candidate = stored("", "", "");

        assert!(duplicates(&candidate, &[existing]).is_empty());
    }

    #[test]
    fn candidate_is_excluded_from_the_sweep() {
        let mut stored_copy = stored("HD-001", "VIN123", "ENG123");
        let mut candidate = stored_copy.clone();
        candidate.number = "HD-001".into();

        assert!(duplicates(&candidate, &[stored_copy.clone()]).is_empty());

        // A different contract with the same keys still conflicts.
        stored_copy.id = super::super::Id::new();
        assert_eq!(duplicates(&candidate, &[stored_copy]).len(), 3);
    }

    #[test]
    fn wire_names_round_trip() {
        assert_eq!(Key::Number.to_string(), "contractNumber");
        assert_eq!(
            "vehicleEngineNumber".parse::<Key>().unwrap(),
            Key::EngineNumber,
        );
    }
}
