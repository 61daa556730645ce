use serde::{Deserialize, Serialize};

/// Shopping categories treated as protein for waste scoring.
pub const PROTEIN_CATEGORIES: [&str; 3] = ["Meat", "Fish", "Seafood"];

/// The three meal slots of a plan day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    /// Parse a user-supplied slot name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            _ => None,
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-serving nutrition facts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// One ingredient line of a recipe, priced for the recipe's stated servings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,

    /// Quantity for the recipe's stated servings.
    pub amount: f64,

    pub unit: String,

    /// Cost of `amount`, never below the 0.01 floor. Filled from the price
    /// table at load time when the catalog omits it.
    #[serde(default)]
    pub price: f64,

    /// Shopping category (Vegetables, Meat, Dairy, ...).
    #[serde(default)]
    pub category: String,

    /// Smallest purchasable quantity, in `unit`.
    #[serde(rename = "packageSize", default)]
    pub package_size: f64,

    #[serde(rename = "pricePerPackage", default)]
    pub price_per_package: f64,
}

impl Ingredient {
    /// Canonical key for aggregation and usage tracking.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn is_protein(&self) -> bool {
        PROTEIN_CATEGORIES.contains(&self.category.as_str())
    }

    /// Package size with a fallback for unpriced data: treat the needed
    /// amount itself as one package so quantization stays well-defined.
    pub fn package_size_or(&self, fallback: f64) -> f64 {
        if self.package_size > 0.0 {
            self.package_size
        } else {
            fallback
        }
    }
}

/// A recipe from the externally supplied catalog. Never mutated by the
/// planner; plan days hold their own copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,

    #[serde(rename = "mealType")]
    pub meal_type: MealType,

    /// Minutes.
    #[serde(rename = "cookTime")]
    pub cook_time: u32,

    pub servings: u32,
    pub nutrition: Nutrition,

    #[serde(default)]
    pub tags: Vec<String>,

    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn calories(&self) -> f64 {
        self.nutrition.calories
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn has_protein_ingredient(&self) -> bool {
        self.ingredients.iter().any(Ingredient::is_protein)
    }

    /// Raw ingredient cost divided by servings.
    pub fn cost_per_serving(&self) -> f64 {
        if self.servings == 0 {
            return 0.0;
        }
        let total: f64 = self.ingredients.iter().map(|i| i.price).sum();
        total / self.servings as f64
    }

    /// Cost of cooking this recipe for `persons` people.
    pub fn meal_cost(&self, persons: u32) -> f64 {
        self.cost_per_serving() * persons as f64
    }
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipe {}

impl std::hash::Hash for Recipe {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
