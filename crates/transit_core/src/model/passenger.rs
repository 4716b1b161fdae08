//! Passenger record.

use crate::model::validation::{require_key, require_text, ValidationError};
use serde::{Deserialize, Serialize};

pub type PassengerId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub id: PassengerId,
    pub name: String,
}

impl Passenger {
    pub fn new(id: impl Into<PassengerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Both id and name are required; the id must already be trimmed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_key("passenger_id", &self.id)?;
        require_text("passenger_name", &self.name)
    }
}
