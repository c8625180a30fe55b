use super::store::{parse_id, RecipeStore, StoreError};
use crate::models::{Recipe, RecipeFields};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{ClientOptions, FindOneAndReplaceOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use validator::Validate;

const RECIPES_COLLECTION: &str = "recipes";

/// Record store over the MongoDB `recipes` collection. The client is created
/// once at startup and cloned into every request.
#[derive(Clone)]
pub struct MongoRecipeStore {
    client: MongoClient,
    db: Database,
}

impl MongoRecipeStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        tracing::info!(database = %database, "Connecting to MongoDB");

        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            StoreError::from(e)
        })?;
        options.app_name = Some("recipe-service".to_string());

        let client = MongoClient::with_options(options)?;
        let db = client.database(database);

        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    pub fn recipes(&self) -> Collection<Recipe> {
        self.db.collection(RECIPES_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let cursor = self.recipes().find(None, None).await?;
        let recipes: Vec<Recipe> = cursor.try_collect().await?;
        Ok(recipes)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        Ok(self.recipes().find_one(doc! { "_id": id }, None).await?)
    }

    async fn create(&self, fields: RecipeFields) -> Result<Recipe, StoreError> {
        fields.validate()?;

        let recipe = Recipe::from_fields(ObjectId::new(), fields);
        self.recipes().insert_one(&recipe, None).await?;

        tracing::info!(recipe_id = %recipe.id, "Recipe inserted");
        Ok(recipe)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        let replacement = Recipe::from_fields(id, fields);

        let options = FindOneAndReplaceOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .recipes()
            .find_one_and_replace(doc! { "_id": id }, &replacement, options)
            .await?)
    }

    async fn find_by_id_and_delete(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let id = parse_id(id)?;
        Ok(self
            .recipes()
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }
}
