//! Small value types shared by several entities.

use serde::{Deserialize, Serialize};

/// A postal address.
///
/// Insightly stores addresses as flat `ADDRESS_<KIND>_<PART>` fields on the
/// owning record; entities expose accessors that convert to and from this
/// type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Whether every part is empty.
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postcode.is_none()
            && self.country.is_none()
    }
}

/// A tag attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Tag {
    pub tag_name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            tag_name: name.into(),
        }
    }
}

/// Who can see a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Everyone,
    Owner,
    SelectedTeam,
    IndividualPermissions,
    /// A value this library does not know about.
    #[serde(untagged)]
    Other(String),
}

/// Generates the address accessor pair for a flat address prefix.
macro_rules! address_accessors {
    ($get:ident, $set:ident, $street:ident, $city:ident, $state:ident, $postcode:ident, $country:ident) => {
        /// Read the flat address fields as an [`Address`](crate::Address).
        pub fn $get(&self) -> crate::Address {
            crate::Address {
                street: self.$street.clone(),
                city: self.$city.clone(),
                state: self.$state.clone(),
                postcode: self.$postcode.clone(),
                country: self.$country.clone(),
            }
        }

        /// Overwrite the flat address fields from an [`Address`](crate::Address).
        pub fn $set(&mut self, address: crate::Address) {
            self.$street = address.street;
            self.$city = address.city;
            self.$state = address.state;
            self.$postcode = address.postcode;
            self.$country = address.country;
        }
    };
}

pub(crate) use address_accessors;
