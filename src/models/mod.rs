mod plan;
mod preferences;
mod recipe;

pub use plan::{GroceryItem, LeftoverItem, PlanDay};
pub use preferences::{Diet, Goal, MealMix, UserPreferences};
pub use recipe::{Ingredient, MealType, Nutrition, Recipe, PROTEIN_CATEGORIES};
