mod manager;
mod persistence;

pub use manager::PlanStateManager;
pub use persistence::{load_recipes, load_state_or_default, save_state, PlannerState};
