use serde::{Deserialize, Serialize};

use crate::models::{MealType, Recipe};

/// One day of the weekly plan.
///
/// `date` is a weekday name, not a calendar date: the plan covers a single
/// non-repeating week starting on today's weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDay {
    pub id: String,

    /// Weekday name ("Monday", ...).
    pub date: String,

    pub breakfast: Option<Recipe>,
    pub lunch: Option<Recipe>,
    pub dinner: Option<Recipe>,
}

impl PlanDay {
    pub fn new(id: String, date: String) -> Self {
        Self {
            id,
            date,
            breakfast: None,
            lunch: None,
            dinner: None,
        }
    }

    pub fn slot(&self, meal_type: MealType) -> Option<&Recipe> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    pub fn set_slot(&mut self, meal_type: MealType, recipe: Option<Recipe>) {
        match meal_type {
            MealType::Breakfast => self.breakfast = recipe,
            MealType::Lunch => self.lunch = recipe,
            MealType::Dinner => self.dinner = recipe,
        }
    }

    /// Matches a user-facing day reference: either the plan id or the
    /// weekday name.
    pub fn matches_ref(&self, day_ref: &str) -> bool {
        self.id == day_ref || self.date.eq_ignore_ascii_case(day_ref)
    }

    pub fn total_calories(&self) -> f64 {
        [&self.breakfast, &self.lunch, &self.dinner]
            .into_iter()
            .flatten()
            .map(Recipe::calories)
            .sum()
    }
}

/// An aggregated, package-priced shopping item. Derived on demand from the
/// plan; never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,

    /// Aggregated and rounded demand across the week.
    pub amount: f64,

    pub unit: String,

    /// Package-quantized cost: whole packages, not the raw demand.
    pub price: f64,

    pub category: String,

    /// Names of recipes contributing to this item.
    pub recipes: Vec<String>,

    #[serde(rename = "packageSize")]
    pub package_size: f64,

    #[serde(rename = "packagesNeeded")]
    pub packages_needed: u32,
}

/// An over-purchased grocery item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeftoverItem {
    pub name: String,

    /// Amount actually needed by the plan.
    pub amount: f64,

    pub unit: String,
    pub category: String,

    #[serde(rename = "leftoverAmount")]
    pub leftover_amount: f64,

    /// Percentage of the purchased total that goes unused.
    #[serde(rename = "leftoverPercentage")]
    pub leftover_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Nutrition;

    fn recipe(id: &str, meal_type: MealType, calories: f64) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: id.to_string(),
            meal_type,
            cook_time: 20,
            servings: 2,
            nutrition: Nutrition {
                calories,
                ..Default::default()
            },
            tags: vec![],
            ingredients: vec![],
        }
    }

    #[test]
    fn test_slot_accessors() {
        let mut day = PlanDay::new("day-0".to_string(), "Monday".to_string());
        assert!(day.slot(MealType::Breakfast).is_none());

        day.set_slot(MealType::Dinner, Some(recipe("d", MealType::Dinner, 800.0)));
        assert_eq!(day.slot(MealType::Dinner).unwrap().id, "d");
        assert!((day.total_calories() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_matches_ref() {
        let day = PlanDay::new("day-3".to_string(), "Thursday".to_string());
        assert!(day.matches_ref("day-3"));
        assert!(day.matches_ref("thursday"));
        assert!(!day.matches_ref("Friday"));
    }
}
