pub mod health;
pub mod recipes;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use recipes::{create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe};
