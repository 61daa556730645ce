use std::collections::HashSet;

use chrono::{Datelike, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::models::{MealType, PlanDay, Recipe, UserPreferences};
use crate::planner::constants::*;
use crate::planner::filter::plan_candidates;
use crate::planner::scoring::{combined_score, UsageLedger};

/// The 7 weekday names starting from the given Sunday-based index.
pub fn week_days_from(start_index: usize) -> Vec<String> {
    (0..7)
        .map(|offset| WEEKDAYS[(start_index + offset) % 7].to_string())
        .collect()
}

/// The 7 weekday names starting from today.
pub fn week_days_starting_today() -> Vec<String> {
    let today = Local::now().weekday().num_days_from_sunday() as usize;
    week_days_from(today)
}

/// Pick the next recipe for a slot: score the unused subset of the pool,
/// sample from the best-scored 30%, and commit the choice to the ledger.
///
/// When every recipe in the pool is already on the plan, repeats are allowed
/// via a uniform pick (no ledger update; the ingredients are already
/// accounted for).
fn select_recipe<'a>(
    pool: &[&'a Recipe],
    used: &mut HashSet<String>,
    ledger: &mut UsageLedger,
    prefs: &UserPreferences,
    rng: &mut impl Rng,
) -> Option<&'a Recipe> {
    if pool.is_empty() {
        return None;
    }

    let unused: Vec<&Recipe> = pool
        .iter()
        .copied()
        .filter(|r| !used.contains(&r.id))
        .collect();

    if unused.is_empty() {
        return pool.choose(rng).copied();
    }

    let mut scored: Vec<(&Recipe, f64)> = unused
        .into_iter()
        .map(|r| (r, combined_score(r, ledger, prefs.persons)))
        .collect();
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let top = ((scored.len() as f64 * TOP_SCORED_FRACTION).ceil() as usize).max(1);
    let (selected, score) = scored[..top].choose(rng).copied()?;

    debug!(recipe = %selected.name, score, "selected");

    ledger.record_recipe(selected, prefs.persons);
    used.insert(selected.id.clone());
    Some(selected)
}

/// Generate a fresh 7-day plan.
///
/// Always returns exactly 7 day entries, weekday-ordered starting at today;
/// a slot is `None` only when its candidate pool is empty (or lunch on an
/// eating-out day). The selection is randomized on purpose: callers wanting
/// reproducibility pass a seeded `Rng`.
pub fn generate_meal_plan(
    catalog: &[Recipe],
    prefs: &UserPreferences,
    removed: &HashSet<String>,
    rng: &mut impl Rng,
) -> Vec<PlanDay> {
    let days = week_days_starting_today();
    generate_for_days(catalog, prefs, removed, &days, rng)
}

/// Same as [`generate_meal_plan`] but with the weekday rotation supplied by
/// the caller.
pub fn generate_for_days(
    catalog: &[Recipe],
    prefs: &UserPreferences,
    removed: &HashSet<String>,
    days: &[String],
    rng: &mut impl Rng,
) -> Vec<PlanDay> {
    let mut breakfast_pool = plan_candidates(catalog, MealType::Breakfast, prefs, removed);
    let mut lunch_pool = plan_candidates(catalog, MealType::Lunch, prefs, removed);
    let mut dinner_pool = plan_candidates(catalog, MealType::Dinner, prefs, removed);

    breakfast_pool.shuffle(rng);
    lunch_pool.shuffle(rng);
    dinner_pool.shuffle(rng);

    debug!(
        breakfast = breakfast_pool.len(),
        lunch = lunch_pool.len(),
        dinner = dinner_pool.len(),
        "filtered candidate pools"
    );

    for (pool, slot) in [
        (&breakfast_pool, MealType::Breakfast),
        (&lunch_pool, MealType::Lunch),
        (&dinner_pool, MealType::Dinner),
    ] {
        if pool.is_empty() {
            warn!(slot = %slot, "no recipes match the current preferences");
        }
    }

    let mut plan: Vec<PlanDay> = Vec::with_capacity(7);
    let mut used: HashSet<String> = HashSet::new();
    let mut ledger = UsageLedger::new();
    let mut total_weekly_cost = 0.0;
    let budget_enabled = prefs.budget_goal();

    for (index, day) in days.iter().enumerate() {
        let eating_out = prefs.is_eating_out(day);

        let mut breakfast = select_recipe(&breakfast_pool, &mut used, &mut ledger, prefs, rng);
        let mut lunch = if eating_out {
            None
        } else {
            select_recipe(&lunch_pool, &mut used, &mut ledger, prefs, rng)
        };
        let mut dinner = select_recipe(&dinner_pool, &mut used, &mut ledger, prefs, rng);

        let daily_calories = |b: Option<&Recipe>, l: Option<&Recipe>, d: Option<&Recipe>| {
            b.map_or(0.0, Recipe::calories)
                + l.map_or(0.0, Recipe::calories)
                + d.map_or(0.0, Recipe::calories)
        };

        // Calorie-floor correction: trade dinner up when the day runs light.
        if !eating_out
            && daily_calories(breakfast, lunch, dinner)
                < TARGET_DAILY_CALORIES - CALORIE_SHORTFALL
        {
            if let Some(current) = dinner {
                let upgrade = dinner_pool.iter().copied().find(|r| {
                    r.calories() > current.calories() + MIN_CALORIE_UPGRADE
                        && !used.contains(&r.id)
                });
                if let Some(better) = upgrade {
                    used.remove(&current.id);
                    used.insert(better.id.clone());
                    dinner = Some(better);
                }
            }
        }

        let slot_cost = |r: Option<&Recipe>| r.map_or(0.0, |r| r.meal_cost(prefs.persons));
        let mut day_cost = slot_cost(breakfast)
            + if eating_out { 0.0 } else { slot_cost(lunch) }
            + slot_cost(dinner);

        if budget_enabled {
            let remaining_budget = prefs.budget_per_week - total_weekly_cost;
            let days_remaining = (days.len() - index) as f64;
            let adjusted_daily_budget = remaining_budget / days_remaining;
            let max_daily_cost = adjusted_daily_budget * BUDGET_SLACK;

            let mut attempts = 0;
            while day_cost > max_daily_cost && attempts < MAX_BUDGET_ATTEMPTS {
                attempts += 1;

                let breakfast_cost = slot_cost(breakfast);
                let lunch_cost = if eating_out { 0.0 } else { slot_cost(lunch) };
                let dinner_cost = slot_cost(dinner);

                // Replace the costliest slot with the cheapest strictly
                // cheaper alternative not already used elsewhere.
                let swapped = if dinner_cost >= breakfast_cost && dinner_cost >= lunch_cost {
                    try_cheaper(&dinner_pool, &mut dinner, dinner_cost, &mut used, prefs)
                } else if breakfast_cost >= lunch_cost {
                    try_cheaper(
                        &breakfast_pool,
                        &mut breakfast,
                        breakfast_cost,
                        &mut used,
                        prefs,
                    )
                } else if !eating_out {
                    try_cheaper(&lunch_pool, &mut lunch, lunch_cost, &mut used, prefs)
                } else {
                    false
                };

                day_cost = slot_cost(breakfast)
                    + if eating_out { 0.0 } else { slot_cost(lunch) }
                    + slot_cost(dinner);

                if !swapped {
                    warn!(
                        day = %day,
                        cost = format!("{day_cost:.2}"),
                        budget = format!("{max_daily_cost:.2}"),
                        "no cheaper alternatives, leaving day over budget"
                    );
                    break;
                }
            }

            debug!(
                day = %day,
                cost = format!("{day_cost:.2}"),
                attempts,
                "budget correction finished"
            );
        }

        total_weekly_cost += day_cost;

        let mut plan_day = PlanDay::new(format!("day-{index}"), day.clone());
        plan_day.breakfast = breakfast.cloned();
        plan_day.lunch = lunch.cloned();
        plan_day.dinner = dinner.cloned();
        plan.push(plan_day);
    }

    debug!(
        total_cost = format!("{total_weekly_cost:.2}"),
        budget = prefs.budget_per_week,
        unique_recipes = used.len(),
        "generated weekly plan"
    );

    plan
}

/// Swap the current slot holder for the cheapest strictly cheaper pool
/// alternative. Returns false when none exists.
fn try_cheaper<'a>(
    pool: &[&'a Recipe],
    slot: &mut Option<&'a Recipe>,
    current_cost: f64,
    used: &mut HashSet<String>,
    prefs: &UserPreferences,
) -> bool {
    let Some(current) = *slot else {
        return false;
    };

    let cheapest = pool
        .iter()
        .copied()
        .filter(|r| r.meal_cost(prefs.persons) < current_cost)
        .filter(|r| !used.contains(&r.id) || r.id == current.id)
        .min_by(|a, b| {
            a.meal_cost(prefs.persons)
                .partial_cmp(&b.meal_cost(prefs.persons))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    match cheapest {
        Some(cheaper) => {
            used.remove(&current.id);
            used.insert(cheaper.id.clone());
            *slot = Some(cheaper);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Ingredient, Nutrition};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ingredient(name: &str, amount: f64, category: &str, price: f64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount,
            unit: "g".to_string(),
            price,
            category: category.to_string(),
            package_size: 500.0,
            price_per_package: price * 2.0,
        }
    }

    fn recipe(id: &str, meal_type: MealType, calories: f64, price: f64) -> Recipe {
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
            ingredients: vec![ingredient(&format!("{id} base"), 300.0, "Pantry", price)],
        }
    }

    fn catalog() -> Vec<Recipe> {
        let mut recipes = Vec::new();
        for i in 0..8 {
            recipes.push(recipe(
                &format!("b{i}"),
                MealType::Breakfast,
                450.0 + i as f64 * 20.0,
                1.0 + i as f64 * 0.5,
            ));
            recipes.push(recipe(
                &format!("l{i}"),
                MealType::Lunch,
                600.0 + i as f64 * 20.0,
                1.5 + i as f64 * 0.5,
            ));
            recipes.push(recipe(
                &format!("d{i}"),
                MealType::Dinner,
                750.0 + i as f64 * 30.0,
                2.0 + i as f64 * 0.5,
            ));
        }
        recipes
    }

    fn days() -> Vec<String> {
        week_days_from(1) // Monday start
    }

    #[test]
    fn test_week_days_rotation() {
        let days = week_days_from(3);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], "Wednesday");
        assert_eq!(days[6], "Tuesday");

        // Every weekday appears exactly once.
        let unique: HashSet<&String> = days.iter().collect();
        assert_eq!(unique.len(), 7);
    }

    #[test]
    fn test_plan_has_seven_days_with_all_slots() {
        let catalog = catalog();
        let prefs = UserPreferences::default();
        let mut rng = StdRng::seed_from_u64(7);

        let plan = generate_for_days(&catalog, &prefs, &HashSet::new(), &days(), &mut rng);
        assert_eq!(plan.len(), 7);
        for day in &plan {
            assert!(day.breakfast.is_some());
            assert!(day.lunch.is_some());
            assert!(day.dinner.is_some());
        }
    }

    #[test]
    fn test_eating_out_day_has_no_lunch() {
        let catalog = catalog();
        let prefs = UserPreferences {
            eating_out_days: vec!["Tuesday".to_string(), "Friday".to_string()],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);

        let plan = generate_for_days(&catalog, &prefs, &HashSet::new(), &days(), &mut rng);
        for day in &plan {
            let expect_skip = day.date == "Tuesday" || day.date == "Friday";
            assert_eq!(day.lunch.is_none(), expect_skip, "day {}", day.date);
        }
    }

    #[test]
    fn test_empty_pool_yields_missing_slot_not_missing_day() {
        // Breakfasts all exceed the time limit: slot is empty but the week
        // still has 7 days.
        let mut catalog = catalog();
        for r in catalog.iter_mut().filter(|r| r.meal_type == MealType::Breakfast) {
            r.cook_time = 120;
        }
        let prefs = UserPreferences::default();
        let mut rng = StdRng::seed_from_u64(3);

        let plan = generate_for_days(&catalog, &prefs, &HashSet::new(), &days(), &mut rng);
        assert_eq!(plan.len(), 7);
        assert!(plan.iter().all(|d| d.breakfast.is_none()));
        assert!(plan.iter().all(|d| d.dinner.is_some()));
    }

    #[test]
    fn test_small_pool_reuses_recipes() {
        // Two dinners for seven days: repeats must appear, never a hole.
        let mut catalog: Vec<Recipe> = catalog()
            .into_iter()
            .filter(|r| r.meal_type != MealType::Dinner)
            .collect();
        catalog.push(recipe("d0", MealType::Dinner, 800.0, 2.0));
        catalog.push(recipe("d1", MealType::Dinner, 850.0, 2.5));

        let prefs = UserPreferences::default();
        let mut rng = StdRng::seed_from_u64(5);

        let plan = generate_for_days(&catalog, &prefs, &HashSet::new(), &days(), &mut rng);
        assert!(plan.iter().all(|d| d.dinner.is_some()));
    }

    #[test]
    fn test_removed_recipes_never_selected() {
        let catalog = catalog();
        let prefs = UserPreferences::default();
        let removed: HashSet<String> = ["b0".to_string(), "d3".to_string()].into();
        let mut rng = StdRng::seed_from_u64(13);

        let plan = generate_for_days(&catalog, &prefs, &removed, &days(), &mut rng);
        for day in &plan {
            for slot in [&day.breakfast, &day.lunch, &day.dinner].into_iter().flatten() {
                assert!(!removed.contains(&slot.id));
            }
        }
    }

    #[test]
    fn test_budget_correction_terminates_on_expensive_pool() {
        // Every recipe costs far more than the weekly budget allows; the
        // correction loop must still terminate.
        let mut catalog = catalog();
        for r in &mut catalog {
            r.ingredients[0].price = 50.0;
        }
        let prefs = UserPreferences {
            goals: vec![Goal::Budget],
            budget_per_week: 20.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(17);

        let plan = generate_for_days(&catalog, &prefs, &HashSet::new(), &days(), &mut rng);
        assert_eq!(plan.len(), 7);
    }
}
