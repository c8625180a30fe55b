use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A recipe as stored in the `recipes` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The four mutable fields as sent by a client.
///
/// Every field is optional on the wire; the schema rules below are what the
/// store enforces on create. Updates skip validation and replace the whole
/// record, so anything left out is stored empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RecipeFields {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required)]
    pub ingredients: Option<Vec<String>>,
    #[validate(required, length(min = 1))]
    pub instructions: Option<String>,
    pub image: Option<String>,
}

impl Recipe {
    pub fn from_fields(id: ObjectId, fields: RecipeFields) -> Self {
        Self {
            id,
            title: fields.title.unwrap_or_default(),
            ingredients: fields.ingredients.unwrap_or_default(),
            instructions: fields.instructions.unwrap_or_default(),
            image: fields.image,
        }
    }
}
