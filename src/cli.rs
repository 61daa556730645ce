use clap::{Parser, Subcommand};

/// WeekMealPlanner — plans a week of meals within calorie, time, and budget
/// constraints while minimizing wasted ingredients.
#[derive(Parser, Debug)]
#[command(name = "week_meal_planner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the recipe catalog JSON file.
    #[arg(short, long, default_value = "recipes.json")]
    pub recipes: String,

    /// Path to the planner state JSON file.
    #[arg(short, long, default_value = "planner_state.json")]
    pub state: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a fresh 7-day meal plan from the current preferences.
    Plan,

    /// Swap a single meal slot for a different eligible recipe.
    Swap {
        /// Weekday name of the day to change (e.g. "Monday").
        day: String,

        /// Meal slot to replace: breakfast, lunch, or dinner.
        meal: String,
    },

    /// Exchange two meal slots, possibly across days.
    Exchange {
        from_day: String,
        from_meal: String,
        to_day: String,
        to_meal: String,
    },

    /// Print the aggregated grocery list and total weekly cost.
    Grocery,

    /// Print which grocery items will be over-purchased, and by how much.
    Leftovers,

    /// Edit household preferences interactively.
    Preferences,

    /// Permanently remove a recipe from all future plans.
    Remove {
        /// Recipe id to exclude.
        recipe_id: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan
    }
}
