use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{PlanDay, Recipe, UserPreferences};
use crate::pricing;

/// Everything the planner persists between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerState {
    #[serde(default)]
    pub preferences: UserPreferences,

    #[serde(default)]
    pub plan: Vec<PlanDay>,

    #[serde(default, rename = "removedRecipeIds")]
    pub removed_recipe_ids: Vec<String>,
}

/// Load saved state, falling back to defaults when the file is missing or
/// unreadable as JSON. A corrupted file is discarded, not a fatal error.
pub fn load_state_or_default<P: AsRef<Path>>(path: P) -> PlannerState {
    let path = path.as_ref();
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            debug!(path = %path.display(), "no saved state, starting fresh");
            return PlannerState::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "discarding corrupted state file");
            PlannerState::default()
        }
    }
}

/// Save state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &PlannerState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the recipe catalog from a JSON file.
///
/// Deduplicates by id (last occurrence wins) and fills missing ingredient
/// price data from the built-in price table.
pub fn load_recipes<P: AsRef<Path>>(path: P) -> Result<Vec<Recipe>> {
    let content = fs::read_to_string(path)?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)?;

    let mut seen: HashMap<String, Recipe> = HashMap::new();
    for mut recipe in recipes {
        fill_missing_prices(&mut recipe);
        seen.insert(recipe.id.clone(), recipe);
    }

    Ok(seen.into_values().collect())
}

/// Catalogs are allowed to ship ingredients without price data; resolve the
/// gaps against the price table so quantization and budgeting stay defined.
fn fill_missing_prices(recipe: &mut Recipe) {
    for ing in &mut recipe.ingredients {
        if ing.price > 0.0
            && ing.package_size > 0.0
            && ing.price_per_package > 0.0
            && !ing.category.is_empty()
        {
            continue;
        }

        let resolved = pricing::resolve_price(&ing.name, ing.amount);
        if ing.price <= 0.0 {
            ing.price = resolved.price;
        }
        if ing.package_size <= 0.0 {
            ing.package_size = resolved.package_size;
        }
        if ing.price_per_package <= 0.0 {
            ing.price_per_package = resolved.price_per_package;
        }
        if ing.category.is_empty() {
            ing.category = resolved.category;
        }
    }
}
