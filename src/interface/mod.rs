pub mod prompts;
pub mod render;

pub use prompts::{collect_preferences, prompt_ingredient_terms, prompt_yes_no};
pub use render::{display_grocery_list, display_leftovers, display_plan};
