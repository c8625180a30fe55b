pub mod recipes;

pub use recipes::{CreatedRecipeResponse, MessageResponse, RecipeResponse};
