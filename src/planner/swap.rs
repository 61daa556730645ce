use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::models::{MealType, PlanDay, Recipe, UserPreferences};
use crate::planner::filter::base_candidates;

/// Result of a single-slot swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The slot now holds the named recipe.
    Swapped { new_recipe: String },

    /// Day or slot not found in the plan.
    SlotNotFound,

    /// Every eligible recipe is already on the plan or was the current one.
    NoAlternatives,
}

/// Result of a cross-day exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossSwapOutcome {
    Swapped,
    DayNotFound(String),
    SlotEmpty(String),
}

/// Replace one meal slot with a different eligible recipe.
///
/// Rebuilds the hard-constraint pool for the slot, prefers recipes not used
/// anywhere else in the week, and under the budget goal samples from the
/// cheaper half by cost per serving. Infeasibility is reported, never fatal.
pub fn swap_meal(
    plan: &mut [PlanDay],
    day_ref: &str,
    meal_type: MealType,
    catalog: &[Recipe],
    prefs: &UserPreferences,
    removed: &HashSet<String>,
    rng: &mut impl Rng,
) -> SwapOutcome {
    let Some(day_index) = plan.iter().position(|d| d.matches_ref(day_ref)) else {
        warn!(day = day_ref, "swap target day not in plan");
        return SwapOutcome::SlotNotFound;
    };

    let pool = base_candidates(catalog, meal_type, prefs, removed);

    let current_id = plan[day_index].slot(meal_type).map(|r| r.id.clone());

    // Every recipe occupying any other slot this week; excluding them keeps
    // the week varied.
    let mut used_elsewhere: HashSet<&str> = HashSet::new();
    for (i, day) in plan.iter().enumerate() {
        for slot in [MealType::Breakfast, MealType::Lunch, MealType::Dinner] {
            if i == day_index && slot == meal_type {
                continue;
            }
            if let Some(recipe) = day.slot(slot) {
                used_elsewhere.insert(recipe.id.as_str());
            }
        }
    }

    let unused: Vec<&Recipe> = pool
        .iter()
        .copied()
        .filter(|r| !used_elsewhere.contains(r.id.as_str()))
        .filter(|r| Some(&r.id) != current_id.as_ref())
        .collect();

    let candidates: Vec<&Recipe> = if unused.is_empty() {
        pool.iter()
            .copied()
            .filter(|r| Some(&r.id) != current_id.as_ref())
            .collect()
    } else {
        unused
    };

    if candidates.is_empty() {
        warn!(day = day_ref, slot = %meal_type, "no alternative recipes available");
        return SwapOutcome::NoAlternatives;
    }

    let new_recipe = if prefs.budget_goal() {
        let mut by_price = candidates;
        by_price.sort_by(|a, b| {
            a.cost_per_serving()
                .partial_cmp(&b.cost_per_serving())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let half = ((by_price.len() as f64 / 2.0).ceil() as usize).max(1);
        *by_price[..half].choose(rng).unwrap_or(&by_price[0])
    } else {
        match candidates.choose(rng) {
            Some(r) => *r,
            None => return SwapOutcome::NoAlternatives,
        }
    };

    plan[day_index].set_slot(meal_type, Some(new_recipe.clone()));
    SwapOutcome::Swapped {
        new_recipe: new_recipe.name.clone(),
    }
}

/// Exchange two meal slots, possibly across days. Both slots must already
/// hold a recipe; no filtering is re-applied since the user is trading two
/// already-valid meals. On failure nothing is mutated.
pub fn swap_meals_between_days(
    plan: &mut [PlanDay],
    from_day_ref: &str,
    from_meal: MealType,
    to_day_ref: &str,
    to_meal: MealType,
) -> CrossSwapOutcome {
    let Some(from_index) = plan.iter().position(|d| d.matches_ref(from_day_ref)) else {
        warn!(day = from_day_ref, "exchange source day not in plan");
        return CrossSwapOutcome::DayNotFound(from_day_ref.to_string());
    };
    let Some(to_index) = plan.iter().position(|d| d.matches_ref(to_day_ref)) else {
        warn!(day = to_day_ref, "exchange target day not in plan");
        return CrossSwapOutcome::DayNotFound(to_day_ref.to_string());
    };

    let Some(from_recipe) = plan[from_index].slot(from_meal).cloned() else {
        warn!(day = from_day_ref, slot = %from_meal, "exchange source slot is empty");
        return CrossSwapOutcome::SlotEmpty(format!("{from_day_ref}/{from_meal}"));
    };
    let Some(to_recipe) = plan[to_index].slot(to_meal).cloned() else {
        warn!(day = to_day_ref, slot = %to_meal, "exchange target slot is empty");
        return CrossSwapOutcome::SlotEmpty(format!("{to_day_ref}/{to_meal}"));
    };

    // Same-day exchanges update both slots of the one entry; cross-day
    // exchanges update each day independently.
    plan[from_index].set_slot(from_meal, Some(to_recipe));
    plan[to_index].set_slot(to_meal, Some(from_recipe));

    CrossSwapOutcome::Swapped
}
