//! Address Models

use serde::Serialize;

/// A delivery address to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mobile: String,
    pub address_line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
}
