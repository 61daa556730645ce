use serde::{Deserialize, Serialize};

use crate::models::MealType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Diet {
    Any,
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    Mediterranean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealMix {
    Balanced,
    MoreMeat,
    MoreVeg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    Healthy,
    Budget,
    NoWaste,
    Tracking,
}

/// Household-level planning preferences. One instance per household,
/// persisted alongside the plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    pub diet: Diet,

    #[serde(rename = "mealMix")]
    pub meal_mix: MealMix,

    pub persons: u32,

    #[serde(rename = "budgetPerWeek")]
    pub budget_per_week: f64,

    /// Minutes, per meal slot.
    #[serde(rename = "maxTimeBreakfast")]
    pub max_time_breakfast: u32,
    #[serde(rename = "maxTimeLunch")]
    pub max_time_lunch: u32,
    #[serde(rename = "maxTimeDinner")]
    pub max_time_dinner: u32,

    /// Free-text tokens matched case-insensitively against ingredient names.
    #[serde(default)]
    pub allergies: Vec<String>,

    /// Free-text tokens matched against recipe and ingredient names.
    #[serde(default)]
    pub dislikes: Vec<String>,

    #[serde(default)]
    pub goals: Vec<Goal>,

    /// Weekday names on which lunch is skipped entirely.
    #[serde(rename = "eatingOutDays", default)]
    pub eating_out_days: Vec<String>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            diet: Diet::Any,
            meal_mix: MealMix::Balanced,
            persons: 2,
            budget_per_week: 100.0,
            max_time_breakfast: 15,
            max_time_lunch: 30,
            max_time_dinner: 45,
            allergies: Vec::new(),
            dislikes: Vec::new(),
            goals: vec![Goal::Healthy],
            eating_out_days: Vec::new(),
        }
    }
}

impl UserPreferences {
    pub fn max_time_for(&self, meal_type: MealType) -> u32 {
        match meal_type {
            MealType::Breakfast => self.max_time_breakfast,
            MealType::Lunch => self.max_time_lunch,
            MealType::Dinner => self.max_time_dinner,
        }
    }

    pub fn budget_goal(&self) -> bool {
        self.goals.contains(&Goal::Budget)
    }

    /// Whether lunch is skipped on the given weekday.
    pub fn is_eating_out(&self, weekday: &str) -> bool {
        self.eating_out_days.iter().any(|d| d == weekday)
    }

    /// Basic validation: at least one person, nonnegative budget.
    pub fn is_valid(&self) -> bool {
        self.persons >= 1 && self.budget_per_week >= 0.0
    }
}
