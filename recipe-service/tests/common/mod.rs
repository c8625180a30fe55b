#![allow(dead_code)]

use async_trait::async_trait;
use recipe_service::config::{MongoConfig, RecipeConfig, StoreBackend};
use recipe_service::models::{Recipe, RecipeFields};
use recipe_service::services::{InMemoryRecipeStore, MongoRecipeStore, RecipeStore, StoreError};
use recipe_service::startup::Application;
use serde_json::{json, Value};
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    mongo: Option<(MongoRecipeStore, String)>,
}

impl TestApp {
    /// Spawn the service on a random port backed by the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryRecipeStore::new())).await
    }

    /// Spawn the service on a random port around the given store.
    pub async fn spawn_with_store(store: Arc<dyn RecipeStore>) -> Self {
        let config = RecipeConfig {
            common: test_common_config(),
            store: StoreBackend::Memory,
            mongodb: None,
        };

        let app = Application::build_with_store(config, store)
            .await
            .expect("Failed to build test application");

        Self::start(app, None).await
    }

    /// Spawn the service against a throwaway database on `TEST_MONGODB_URI`.
    pub async fn spawn_with_mongodb() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("recipe_test_{}", Uuid::new_v4().simple());

        let store = MongoRecipeStore::connect(&uri, &db_name)
            .await
            .expect("Failed to connect to MongoDB");

        let config = RecipeConfig {
            common: test_common_config(),
            store: StoreBackend::MongoDb,
            mongodb: Some(MongoConfig {
                uri,
                database: db_name.clone(),
            }),
        };

        let app = Application::build_with_store(config, Arc::new(store.clone()))
            .await
            .expect("Failed to build test application");

        Self::start(app, Some((store, db_name))).await
    }

    async fn start(app: Application, mongo: Option<(MongoRecipeStore, String)>) -> Self {
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            client,
            mongo,
        }
    }

    pub fn recipes_url(&self) -> String {
        format!("{}/recipes", self.address)
    }

    pub fn recipe_url(&self, id: &str) -> String {
        format!("{}/recipes/{}", self.address, id)
    }

    pub async fn post_recipe(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.recipes_url())
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_recipe(&self, id: &str) -> reqwest::Response {
        self.client
            .get(self.recipe_url(id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_recipe(&self, id: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.recipe_url(id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_recipe(&self, id: &str) -> reqwest::Response {
        self.client
            .delete(self.recipe_url(id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a recipe and return the `recipe` object from the 201 body.
    pub async fn create_recipe(&self, body: &Value) -> Value {
        let response = self.post_recipe(body).await;
        assert_eq!(response.status().as_u16(), 201);

        let mut body: Value = response.json().await.expect("Failed to parse JSON");
        body["recipe"].take()
    }

    /// Drop the throwaway MongoDB database, if any.
    pub async fn cleanup(&self) {
        if let Some((store, db_name)) = &self.mongo {
            let _ = store.client().database(db_name).drop(None).await;
        }
    }
}

pub fn tea() -> Value {
    json!({
        "title": "Tea",
        "ingredients": ["water", "tea leaves"],
        "instructions": "Boil and steep."
    })
}

/// A 24-hex id that no store has issued.
pub fn unissued_id() -> String {
    "65f0c0ffee65f0c0ffee65f0".to_string()
}

fn test_common_config() -> CoreConfig {
    CoreConfig {
        port: 0, // Random port for testing
        ..CoreConfig::default()
    }
}

/// A record store whose database is unreachable: every call fails.
pub struct UnreachableStore;

fn connection_refused() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    StoreError::Database(mongodb::error::Error::from(io))
}

#[async_trait]
impl RecipeStore for UnreachableStore {
    async fn find_all(&self) -> Result<Vec<Recipe>, StoreError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Recipe>, StoreError> {
        Err(connection_refused())
    }

    async fn create(&self, _fields: RecipeFields) -> Result<Recipe, StoreError> {
        Err(connection_refused())
    }

    async fn find_by_id_and_update(
        &self,
        _id: &str,
        _fields: RecipeFields,
    ) -> Result<Option<Recipe>, StoreError> {
        Err(connection_refused())
    }

    async fn find_by_id_and_delete(&self, _id: &str) -> Result<Option<Recipe>, StoreError> {
        Err(connection_refused())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(connection_refused())
    }
}
