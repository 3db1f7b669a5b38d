//! JSON shape of the dataset served on the REST endpoint.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GetPopulationResponse {
    pub population: Vec<Person>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub phone_number: String,
    pub address: Address,
    pub created_at: String,
    pub updated_at: String,
    pub active: bool,
    pub role: String,
    pub profile_image: String,
    /// Open map of mixed scalar values (`theme`, `notifications`, `language`, ...).
    pub preferences: HashMap<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}
