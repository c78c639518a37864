//! Customer details of a contract.

use common::{define_kind, Date};

/// Customer a contract is signed with.
///
/// All the textual fields are free-form: the authoring form accepts whatever
/// the salesperson copies from the customer's papers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Customer {
    /// Full name.
    pub name: String,

    /// Birth date, if provided.
    pub date_of_birth: Option<Date>,

    /// Gender.
    pub gender: Gender,

    /// Contact phone number.
    pub phone: String,

    /// National ID card number.
    pub id_number: String,

    /// Issue date of the ID card, if provided.
    pub id_issue_date: Option<Date>,

    /// Issuing authority of the ID card.
    pub id_issue_place: String,

    /// Residential address.
    pub address: String,
}

define_kind! {
    #[doc = "Gender of a [`Customer`]."]
    enum Gender {
        #[doc = "Male gender."]
        Male = 1,

        #[doc = "Female gender."]
        Female = 2,

        #[doc = "Unspecified or other gender."]
        Other = 3,
    }
}

impl Default for Gender {
    fn default() -> Self {
        Self::Male
    }
}
