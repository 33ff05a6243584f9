//! Records exchanged between the server and the client as JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user record as owned by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub foods: Vec<String>,
}

/// Body of `PUT /user`: replace the food at `index` for user `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodUpdate {
    pub id: String,
    pub food: String,
    pub index: usize,
}

/// Wire shape of `PUT /user` before validation. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodUpdateRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub food: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
}

/// Reasons an update payload is rejected before it reaches the directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("user id is missing")]
    MissingUserId,
    #[error("food value is empty")]
    EmptyFood,
    /// Only an absent index is missing. Index 0 is a valid row.
    #[error("index is undefined")]
    MissingIndex,
}

impl FoodUpdate {
    /// Builds a validated update.
    pub fn new(
        id: Option<&str>,
        food: &str,
        index: Option<usize>,
    ) -> Result<Self, ValidationError> {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ValidationError::MissingUserId),
        };
        if food.is_empty() {
            return Err(ValidationError::EmptyFood);
        }
        let index = index.ok_or(ValidationError::MissingIndex)?;
        Ok(Self {
            id: id.to_string(),
            food: food.to_string(),
            index,
        })
    }
}

impl TryFrom<FoodUpdateRequest> for FoodUpdate {
    type Error = ValidationError;

    fn try_from(req: FoodUpdateRequest) -> Result<Self, Self::Error> {
        FoodUpdate::new(
            req.id.as_deref(),
            req.food.as_deref().unwrap_or_default(),
            req.index,
        )
    }
}
