use std::collections::HashMap;

use crate::models::Recipe;
use crate::planner::constants::*;

/// Running usage of one ingredient across the week being assembled.
#[derive(Debug, Clone)]
pub struct IngredientUsage {
    pub total_used: f64,
    pub package_size: f64,
    pub category: String,
    pub price: f64,

    /// Set when the last committed recipe left this ingredient's packages
    /// badly under-used; strongly biases the next selections toward it.
    pub needs_more_use: bool,
}

impl IngredientUsage {
    fn is_protein(&self) -> bool {
        crate::models::PROTEIN_CATEGORIES.contains(&self.category.as_str())
    }
}

/// Weekly ingredient usage ledger. Ephemeral: lives for one generation run
/// and is discarded afterwards.
#[derive(Debug, Default)]
pub struct UsageLedger {
    entries: HashMap<String, IngredientUsage>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&IngredientUsage> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commit a selected recipe's scaled ingredients and refresh the
    /// `needs_more_use` flags.
    pub fn record_recipe(&mut self, recipe: &Recipe, persons: u32) {
        for ing in &recipe.ingredients {
            let scaled = scaled_amount(ing.amount, persons, recipe.servings);
            let key = ing.key();

            match self.entries.get_mut(&key) {
                Some(existing) => {
                    existing.total_used += scaled;

                    let packages = (existing.total_used / existing.package_size).ceil();
                    let total_bought = packages * existing.package_size;
                    let usage_pct = (existing.total_used / total_bought) * 100.0;

                    existing.needs_more_use = if existing.is_protein() {
                        usage_pct < PROTEIN_FLAG_USAGE_PCT
                    } else {
                        usage_pct < BULK_FLAG_USAGE_PCT
                            && existing.package_size > LEDGER_BULK_PACKAGE_THRESHOLD
                    };
                }
                None => {
                    self.entries.insert(
                        key,
                        IngredientUsage {
                            total_used: scaled,
                            package_size: ing.package_size_or(scaled),
                            category: ing.category.clone(),
                            price: if ing.price_per_package > 0.0 {
                                ing.price_per_package
                            } else {
                                ing.price
                            },
                            // New ingredients start flagged: a single use
                            // rarely empties a package.
                            needs_more_use: true,
                        },
                    );
                }
            }
        }
    }
}

fn scaled_amount(amount: f64, persons: u32, servings: u32) -> f64 {
    if servings == 0 {
        return amount;
    }
    (amount * persons as f64) / servings as f64
}

/// Average leftover percentage across this recipe's ingredients after
/// package quantization. Lower is better; 0 means every package is used up.
pub fn leftover_score(recipe: &Recipe, persons: u32) -> f64 {
    if recipe.ingredients.is_empty() {
        return MISSING_INGREDIENTS_SCORE;
    }

    let mut total_pct = 0.0;
    let mut count = 0u32;

    for ing in &recipe.ingredients {
        let scaled = scaled_amount(ing.amount, persons, recipe.servings);
        let package_size = ing.package_size_or(scaled);
        let packages = (scaled / package_size).ceil();
        let total_bought = packages * package_size;
        let leftover = total_bought - scaled;

        if leftover > LEFTOVER_EPSILON {
            total_pct += (leftover / total_bought) * 100.0;
            count += 1;
        }
    }

    if count > 0 {
        total_pct / count as f64
    } else {
        0.0
    }
}

/// Bonus for consuming ingredients already committed to the week. Higher is
/// better; protein and expensive or flagged ingredients weigh most.
pub fn reuse_score(recipe: &Recipe, ledger: &UsageLedger, persons: u32) -> f64 {
    let mut score = 0.0;

    for ing in &recipe.ingredients {
        match ledger.get(&ing.key()) {
            Some(existing) => {
                let scaled = scaled_amount(ing.amount, persons, recipe.servings);
                let combined = existing.total_used + scaled;
                let packages = (combined / existing.package_size).ceil();
                let total_bought = packages * existing.package_size;
                let usage_pct = (combined / total_bought) * 100.0;

                if existing.is_protein() {
                    score += PROTEIN_REUSE_BONUS;
                    if usage_pct > HIGH_USAGE_PCT {
                        score += PROTEIN_HIGH_USAGE_BONUS;
                    } else if usage_pct > MID_USAGE_PCT {
                        score += PROTEIN_MID_USAGE_BONUS;
                    }
                } else if existing.price > EXPENSIVE_PRICE_THRESHOLD {
                    score += EXPENSIVE_REUSE_BONUS;
                    if usage_pct > HIGH_USAGE_PCT {
                        score += EXPENSIVE_HIGH_USAGE_BONUS;
                    }
                } else {
                    score += BASE_REUSE_BONUS;
                    if usage_pct > BASE_HIGH_USAGE_PCT {
                        score += BASE_HIGH_USAGE_BONUS;
                    }
                }

                if existing.needs_more_use {
                    score += NEEDS_MORE_USE_BONUS;
                }
            }
            None => {
                // Discourage opening a fresh bulk package unless it is
                // protein (which the reuse bonuses will amortize later).
                if ing.package_size > NEW_BULK_PACKAGE_THRESHOLD && !ing.is_protein() {
                    score -= NEW_BULK_PENALTY;
                }
            }
        }
    }

    score
}

/// Combined waste score: leftover penalty minus reuse bonus. Lower is
/// better.
pub fn combined_score(recipe: &Recipe, ledger: &UsageLedger, persons: u32) -> f64 {
    leftover_score(recipe, persons) - reuse_score(recipe, ledger, persons)
}
