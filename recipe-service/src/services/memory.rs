use super::store::{parse_id, RecipeStore, StoreError};
use crate::models::{Recipe, RecipeFields};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use validator::Validate;

/// Process-local record store with the same id scheme and schema rules as
/// the MongoDB store. Records are kept in id order, which is roughly creation
/// order (ObjectIds only sort by creation time to the second).
#[derive(Clone, Default)]
pub struct InMemoryRecipeStore {
    recipes: Arc<RwLock<BTreeMap<ObjectId, Recipe>>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.recipes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.read().await.is_empty()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.recipes.read().await.get(&id).cloned())
    }

    async fn create(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        fields.validate()?;

        let recipe = Recipe::from_fields(ObjectId::new(), fields);
        self.recipes.write().await.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        let mut recipes = self.recipes.write().await;

        Ok(recipes.get_mut(&id).map(|existing| {
            *existing = Recipe::from_fields(id, fields);
            existing.clone()
        }))
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.recipes.write().await.remove(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
