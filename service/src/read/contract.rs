//! [`Contract`] read model definition.
//!
//! [`Contract`]: crate::domain::Contract

pub mod list {
    //! [`Contract`]s list definitions.

    use common::Date;

    use crate::domain::{
        contract::customer::Gender, user, Contract,
    };

    /// Selector of a [`Contract`]s list.
    #[derive(Clone, Debug, Default)]
    pub struct Selector {
        /// Visibility [`Scope`] of the listing.
        pub scope: Scope,

        /// [`Filter`] narrowing the listing down.
        pub filter: Filter,
    }

    impl Selector {
        /// Creates a [`Selector`] listing everything visible in the given
        /// [`Scope`], unfiltered.
        #[must_use]
        pub fn all(scope: Scope) -> Self {
            Self {
                scope,
                ..Self::default()
            }
        }

        /// Indicates whether the given [`Contract`] is matched by this
        /// [`Selector`].
        #[must_use]
        pub fn matches(&self, contract: &Contract) -> bool {
            self.scope.matches(contract) && self.filter.matches(contract)
        }
    }

    /// Visibility scope of a [`Contract`]s list.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub enum Scope {
        /// Every stored [`Contract`], as seen by managers.
        #[default]
        All,

        /// Only the [`Contract`]s authored by the given salesperson.
        Salesperson(user::Id),
    }

    impl Scope {
        fn matches(self, contract: &Contract) -> bool {
            match self {
                Self::All => true,
                Self::Salesperson(id) => contract
                    .salesperson
                    .as_ref()
                    .is_some_and(|s| s.id == id),
            }
        }
    }

    /// Filter for [`Selector`].
    ///
    /// Every populated criterion must match. An empty [`Filter`] matches
    /// any [`Contract`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// Case-insensitive substring searched across the textual fields.
        pub search: Option<String>,

        /// Exact vehicle model to match.
        pub model: Option<String>,

        /// Exact vehicle color to match.
        pub color: Option<String>,

        /// Exact production year to match.
        pub production_year: Option<i32>,

        /// Exact customer [`Gender`] to match.
        pub gender: Option<Gender>,

        /// Inclusive lower bound of the signing date.
        pub signed_since: Option<Date>,

        /// Inclusive upper bound of the signing date.
        pub signed_until: Option<Date>,

        /// Inclusive lower bound of the delivery date.
        pub delivered_since: Option<Date>,

        /// Inclusive upper bound of the delivery date.
        pub delivered_until: Option<Date>,
    }

    impl Filter {
        /// Indicates whether the given [`Contract`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, contract: &Contract) -> bool {
            self.matches_search(contract)
                && self.model.as_ref().is_none_or(|m| {
                    contract.vehicle.model == *m
                })
                && self.color.as_ref().is_none_or(|c| {
                    contract.vehicle.color == *c
                })
                && self.production_year.is_none_or(|y| {
                    contract.vehicle.production_year == y
                })
                && self.gender.is_none_or(|g| contract.customer.gender == g)
                && Self::date_within(
                    contract.signing_date,
                    self.signed_since,
                    self.signed_until,
                )
                && Self::date_within(
                    contract.delivery_date,
                    self.delivered_since,
                    self.delivered_until,
                )
        }

        fn matches_search(&self, contract: &Contract) -> bool {
            let Some(term) = self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
            else {
                return true;
            };
            let term = term.to_lowercase();

            let haystacks = [
                AsRef::<str>::as_ref(&contract.number),
                &contract.customer.name,
                &contract.customer.phone,
                &contract.customer.id_number,
                &contract.customer.address,
                &contract.vehicle.model,
                &contract.vehicle.color,
                contract.vehicle.vin.as_ref(),
                contract.vehicle.engine_number.as_ref(),
            ];
            haystacks
                .into_iter()
                .any(|h| h.to_lowercase().contains(&term))
                || contract.salesperson.as_ref().is_some_and(|s| {
                    AsRef::<str>::as_ref(&s.name)
                        .to_lowercase()
                        .contains(&term)
                })
        }

        /// An unset bound always passes, while a set bound against a
        /// missing date never does.
        fn date_within(
            date: Option<Date>,
            since: Option<Date>,
            until: Option<Date>,
        ) -> bool {
            since.is_none_or(|s| date.is_some_and(|d| d >= s))
                && until.is_none_or(|u| date.is_some_and(|d| d <= u))
        }
    }

}
