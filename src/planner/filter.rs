use std::collections::HashSet;

use crate::models::{MealMix, MealType, Recipe, UserPreferences};
use crate::planner::constants::*;

/// Case-insensitive substring check used for allergy and dislike tokens.
///
/// Known quirk, kept on purpose: a token like "pea" also matches "peanut".
fn name_contains_token(name: &str, token: &str) -> bool {
    name.to_lowercase().contains(&token.to_lowercase())
}

fn any_ingredient_matches(recipe: &Recipe, tokens: &[String]) -> bool {
    recipe.ingredients.iter().any(|ing| {
        tokens
            .iter()
            .any(|token| name_contains_token(&ing.name, token))
    })
}

fn matches_meal_mix(recipe: &Recipe, meal_mix: MealMix) -> bool {
    match meal_mix {
        MealMix::Balanced => true,
        MealMix::MoreMeat => {
            recipe.has_tag("meat-focused")
                || recipe.has_tag("high-protein")
                || recipe.has_protein_ingredient()
        }
        MealMix::MoreVeg => {
            recipe.has_tag("vegetarian")
                || recipe.has_tag("vegan")
                || !recipe.has_protein_ingredient()
        }
    }
}

fn calorie_target_for(meal_type: MealType) -> (f64, f64) {
    match meal_type {
        MealType::Breakfast => (TARGET_BREAKFAST_CALORIES, BREAKFAST_CALORIE_RANGE),
        MealType::Lunch => (TARGET_LUNCH_CALORIES, LUNCH_CALORIE_RANGE),
        MealType::Dinner => (TARGET_DINNER_CALORIES, DINNER_CALORIE_RANGE),
    }
}

/// Hard-constraint pool for one meal slot: slot match, removed set, cook
/// time, allergies, dislikes, and meal-mix bias.
///
/// This is the pool swap operations draw from; plan generation adds calorie
/// and budget shaping on top via [`plan_candidates`].
pub fn base_candidates<'a>(
    catalog: &'a [Recipe],
    meal_type: MealType,
    prefs: &UserPreferences,
    removed: &HashSet<String>,
) -> Vec<&'a Recipe> {
    let max_time = prefs.max_time_for(meal_type);

    catalog
        .iter()
        .filter(|r| r.meal_type == meal_type && !removed.contains(&r.id))
        .filter(|r| r.cook_time <= max_time)
        .filter(|r| !any_ingredient_matches(r, &prefs.allergies))
        .filter(|r| {
            !prefs.dislikes.iter().any(|token| {
                name_contains_token(&r.name, token)
                    || r.ingredients
                        .iter()
                        .any(|ing| name_contains_token(&ing.name, token))
            })
        })
        .filter(|r| matches_meal_mix(r, prefs.meal_mix))
        .collect()
}

/// Full generation-time pool: [`base_candidates`] narrowed by the calorie
/// band (with a closest-60% fallback when the band is too sparse) and, under
/// the budget goal, cut to the cheapest 40%.
pub fn plan_candidates<'a>(
    catalog: &'a [Recipe],
    meal_type: MealType,
    prefs: &UserPreferences,
    removed: &HashSet<String>,
) -> Vec<&'a Recipe> {
    let mut pool = base_candidates(catalog, meal_type, prefs, removed);

    let (target, range) = calorie_target_for(meal_type);

    let in_range: Vec<&Recipe> = pool
        .iter()
        .copied()
        .filter(|r| r.calories() >= target - range && r.calories() <= target + range)
        .collect();

    if in_range.len() >= MIN_POOL_IN_RANGE {
        pool = in_range;
    } else {
        // Sparse catalog: keep the closest 60% so there is still variety.
        pool.sort_by(|a, b| {
            let da = (a.calories() - target).abs();
            let db = (b.calories() - target).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        if pool.len() > FRACTION_CUT_MIN_POOL {
            let keep = (pool.len() as f64 * CLOSEST_FRACTION).ceil() as usize;
            pool.truncate(keep);
        }
    }

    if prefs.budget_goal() {
        pool.sort_by(|a, b| {
            a.cost_per_serving()
                .partial_cmp(&b.cost_per_serving())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        if pool.len() > FRACTION_CUT_MIN_POOL {
            let keep = (pool.len() as f64 * BUDGET_CHEAPEST_FRACTION).ceil() as usize;
            pool.truncate(keep);
        }
    }

    pool
}
