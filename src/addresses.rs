//! Delivery addresses

use std::fmt;

use crate::ids::TypedId;

/// Address identifier.
pub type AddressId = TypedId<Address>;

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Address id
    pub id: AddressId,

    /// Recipient name
    pub name: Option<String>,

    /// Contact number
    pub mobile: String,

    /// Street line
    pub address_line: String,

    /// City
    pub city: String,

    /// State or province
    pub state: String,

    /// Postal code
    pub pincode: String,

    /// Country
    pub country: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}",
            self.address_line, self.city, self.state, self.pincode, self.country
        )
    }
}

/// The address used when none is picked explicitly: the most recently saved one.
pub fn latest(addresses: &[Address]) -> Option<&Address> {
    addresses.last()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str) -> Address {
        Address {
            id: AddressId::new(id),
            name: None,
            mobile: "1234567890".to_string(),
            address_line: "1 Main Road".to_string(),
            city: "Kathmandu".to_string(),
            state: "Bagmati".to_string(),
            pincode: "44600".to_string(),
            country: "Nepal".to_string(),
        }
    }

    #[test]
    fn latest_is_last_saved() {
        let addresses = [address("first"), address("second")];

        assert_eq!(latest(&addresses).map(|a| a.id.as_str()), Some("second"));
        assert!(latest(&[]).is_none());
    }

    #[test]
    fn display_joins_fields() {
        assert_eq!(
            address("a").to_string(),
            "1 Main Road, Kathmandu, Bagmati, 44600, Nepal"
        );
    }
}
