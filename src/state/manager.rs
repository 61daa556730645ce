use std::collections::HashSet;

use rand::Rng;

use crate::error::{PlanError, Result};
use crate::grocery;
use crate::models::{GroceryItem, LeftoverItem, MealType, PlanDay, Recipe, UserPreferences};
use crate::planner::generate::generate_meal_plan;
use crate::planner::swap::{
    swap_meal, swap_meals_between_days, CrossSwapOutcome, SwapOutcome,
};
use crate::state::persistence::PlannerState;

/// Owns the recipe catalog and the persisted planner state, and routes every
/// plan mutation through the planning engine.
pub struct PlanStateManager {
    catalog: Vec<Recipe>,
    state: PlannerState,
}

impl PlanStateManager {
    pub fn new(catalog: Vec<Recipe>, state: PlannerState) -> Self {
        Self { catalog, state }
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.state.preferences
    }

    pub fn set_preferences(&mut self, prefs: UserPreferences) {
        self.state.preferences = prefs;
    }

    pub fn plan(&self) -> &[PlanDay] {
        &self.state.plan
    }

    pub fn has_plan(&self) -> bool {
        !self.state.plan.is_empty()
    }

    pub fn catalog(&self) -> &[Recipe] {
        &self.catalog
    }

    fn removed_set(&self) -> HashSet<String> {
        self.state.removed_recipe_ids.iter().cloned().collect()
    }

    /// Throw away the current plan and build a fresh week.
    pub fn regenerate(&mut self, rng: &mut impl Rng) -> Result<&[PlanDay]> {
        if self.catalog.is_empty() {
            return Err(PlanError::NoRecipesAvailable("empty catalog".to_string()));
        }
        let removed = self.removed_set();
        self.state.plan =
            generate_meal_plan(&self.catalog, &self.state.preferences, &removed, rng);
        Ok(&self.state.plan)
    }

    /// Replace one slot with a different eligible recipe.
    pub fn swap(
        &mut self,
        day_ref: &str,
        meal_type: MealType,
        rng: &mut impl Rng,
    ) -> SwapOutcome {
        let removed = self.removed_set();
        swap_meal(
            &mut self.state.plan,
            day_ref,
            meal_type,
            &self.catalog,
            &self.state.preferences,
            &removed,
            rng,
        )
    }

    /// Exchange two slots, possibly across days.
    pub fn exchange(
        &mut self,
        from_day: &str,
        from_meal: MealType,
        to_day: &str,
        to_meal: MealType,
    ) -> CrossSwapOutcome {
        swap_meals_between_days(&mut self.state.plan, from_day, from_meal, to_day, to_meal)
    }

    /// Permanently exclude a recipe from future plans and swaps. The current
    /// plan keeps it until the slot is next regenerated or swapped.
    pub fn remove_recipe(&mut self, recipe_id: &str) -> Result<()> {
        if !self.catalog.iter().any(|r| r.id == recipe_id) {
            return Err(PlanError::RecipeNotFound(recipe_id.to_string()));
        }
        if !self.state.removed_recipe_ids.iter().any(|id| id == recipe_id) {
            self.state.removed_recipe_ids.push(recipe_id.to_string());
        }
        Ok(())
    }

    pub fn grocery_list(&self) -> Vec<GroceryItem> {
        grocery::generate_grocery_list(&self.state.plan, &self.state.preferences)
    }

    pub fn total_cost(&self) -> f64 {
        grocery::total_cost(&self.state.plan, &self.state.preferences)
    }

    pub fn leftovers(&self) -> Vec<LeftoverItem> {
        grocery::leftovers(&self.state.plan, &self.state.preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, Nutrition};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn recipe(id: &str, meal_type: MealType, calories: f64) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: id.to_string(),
            meal_type,
            cook_time: 10,
            servings: 2,
            nutrition: Nutrition {
                calories,
                ..Default::default()
            },
            tags: vec![],
            ingredients: vec![Ingredient {
                name: format!("{id} base"),
                amount: 250.0,
                unit: "g".to_string(),
                price: 1.0,
                category: "Pantry".to_string(),
                package_size: 500.0,
                price_per_package: 2.0,
            }],
        }
    }

    fn catalog() -> Vec<Recipe> {
        let mut recipes = Vec::new();
        for i in 0..8 {
            recipes.push(recipe(&format!("b{i}"), MealType::Breakfast, 500.0));
            recipes.push(recipe(&format!("l{i}"), MealType::Lunch, 650.0));
            recipes.push(recipe(&format!("d{i}"), MealType::Dinner, 850.0));
        }
        recipes
    }

    #[test]
    fn test_regenerate_builds_seven_days() {
        let mut manager = PlanStateManager::new(catalog(), PlannerState::default());
        let mut rng = StdRng::seed_from_u64(7);

        let plan = manager.regenerate(&mut rng).unwrap();
        assert_eq!(plan.len(), 7);
        assert!(manager.has_plan());
    }

    #[test]
    fn test_regenerate_without_catalog_fails() {
        let mut manager = PlanStateManager::new(vec![], PlannerState::default());
        let mut rng = StdRng::seed_from_u64(7);
        assert!(matches!(
            manager.regenerate(&mut rng),
            Err(PlanError::NoRecipesAvailable(_))
        ));
    }

    #[test]
    fn test_removed_recipe_excluded_from_next_plan() {
        let mut manager = PlanStateManager::new(catalog(), PlannerState::default());
        let mut rng = StdRng::seed_from_u64(7);

        manager.remove_recipe("b0").unwrap();
        manager.regenerate(&mut rng).unwrap();

        for day in manager.plan() {
            if let Some(b) = &day.breakfast {
                assert_ne!(b.id, "b0");
            }
        }
    }

    #[test]
    fn test_remove_unknown_recipe_fails() {
        let mut manager = PlanStateManager::new(catalog(), PlannerState::default());
        assert!(matches!(
            manager.remove_recipe("nope"),
            Err(PlanError::RecipeNotFound(_))
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut manager = PlanStateManager::new(catalog(), PlannerState::default());
        manager.remove_recipe("b0").unwrap();
        manager.remove_recipe("b0").unwrap();
        assert_eq!(manager.state().removed_recipe_ids.len(), 1);
    }

    #[test]
    fn test_swap_through_manager() {
        let mut manager = PlanStateManager::new(catalog(), PlannerState::default());
        let mut rng = StdRng::seed_from_u64(7);
        manager.regenerate(&mut rng).unwrap();

        let day_ref = manager.plan()[0].date.clone();
        let before = manager.plan()[0].dinner.as_ref().unwrap().id.clone();
        let outcome = manager.swap(&day_ref, MealType::Dinner, &mut rng);

        assert!(matches!(outcome, SwapOutcome::Swapped { .. }));
        let after = manager.plan()[0].dinner.as_ref().unwrap().id.clone();
        assert_ne!(before, after);
    }

    #[test]
    fn test_grocery_views_need_no_plan() {
        let manager = PlanStateManager::new(catalog(), PlannerState::default());
        assert!(manager.grocery_list().is_empty());
        assert_eq!(manager.total_cost(), 0.0);
        assert!(manager.leftovers().is_empty());
    }
}
