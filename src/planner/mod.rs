pub mod constants;
pub mod filter;
pub mod generate;
pub mod scoring;
pub mod swap;

pub use constants::*;
pub use filter::{base_candidates, plan_candidates};
pub use generate::{generate_for_days, generate_meal_plan, week_days_from, week_days_starting_today};
pub use scoring::{combined_score, leftover_score, reuse_score, IngredientUsage, UsageLedger};
pub use swap::{swap_meal, swap_meals_between_days, CrossSwapOutcome, SwapOutcome};
