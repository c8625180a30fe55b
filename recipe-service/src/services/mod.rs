pub mod database;
pub mod memory;
pub mod metrics;
pub mod store;

pub use database::MongoRecipeStore;
pub use memory::InMemoryRecipeStore;
pub use metrics::{get_metrics, init_metrics, record_store_operation};
pub use store::{parse_id, RecipeStore, StoreError};
