//! Address Records

use serde::Deserialize;

use storefront::prelude::{Address, AddressId};

use crate::domain::wire::string_or_number;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AddressRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(deserialize_with = "string_or_number")]
    pub mobile: String,

    pub address_line: String,

    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(deserialize_with = "string_or_number")]
    pub pincode: String,

    #[serde(default)]
    pub country: String,
}

impl From<AddressRecord> for Address {
    fn from(record: AddressRecord) -> Self {
        Self {
            id: AddressId::new(record.id),
            name: record.name,
            mobile: record.mobile,
            address_line: record.address_line,
            city: record.city,
            state: record.state,
            pincode: record.pincode,
            country: record.country,
        }
    }
}
