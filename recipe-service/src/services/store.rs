//! The record store contract the HTTP handlers are written against.

use crate::models::{Recipe, RecipeFields};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Any failure reported by a record store. "No such record" is not an error;
/// lookups return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid recipe id: {0}")]
    InvalidId(String),

    #[error("Recipe failed validation: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Malformed recipe payload: {0}")]
    MalformedPayload(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    /// Validate `fields` against the schema and insert them under a fresh id.
    async fn create(&self, fields: RecipeFields) -> Result<Recipe, StoreError>;

    /// Replace all mutable fields of the record and return the new version.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError>;

    /// Remove the record and return what was removed.
    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Recipe>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

/// Identifiers are 24-character hex ObjectIds. Anything else is a store
/// failure, not a miss.
pub fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}
