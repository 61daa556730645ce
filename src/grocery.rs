//! Derived shopping views over a finished plan: the aggregated grocery
//! list, its total cost, and the leftover report. All pure; safe to call
//! repeatedly.

use std::collections::HashMap;

use crate::models::{GroceryItem, LeftoverItem, PlanDay, Recipe, UserPreferences};
use crate::planner::constants::LEFTOVER_EPSILON;

/// Round a quantity to a "nice" shopping number: nearest 5 under 50,
/// nearest 10 under 100, nearest 25 under 500, else nearest 50.
pub fn round_to_nice_number(amount: f64) -> f64 {
    if amount < 50.0 {
        (amount / 5.0).round() * 5.0
    } else if amount < 100.0 {
        (amount / 10.0).round() * 10.0
    } else if amount < 500.0 {
        (amount / 25.0).round() * 25.0
    } else {
        (amount / 50.0).round() * 50.0
    }
}

struct Aggregate {
    name: String,
    category: String,
    unit: String,
    total_amount: f64,
    recipes: Vec<String>,
    package_size: f64,
    price_per_package: f64,
}

fn active_meals<'a>(day: &'a PlanDay, prefs: &UserPreferences) -> Vec<&'a Recipe> {
    let eating_out = prefs.is_eating_out(&day.date);
    let mut meals = Vec::with_capacity(3);
    if let Some(r) = &day.breakfast {
        meals.push(r);
    }
    if !eating_out {
        if let Some(r) = &day.lunch {
            meals.push(r);
        }
    }
    if let Some(r) = &day.dinner {
        meals.push(r);
    }
    meals
}

/// Walk the plan and aggregate every scaled, rounded ingredient into one
/// priced shopping item per (lowercased name, unit) pair, sorted by
/// category.
pub fn generate_grocery_list(plan: &[PlanDay], prefs: &UserPreferences) -> Vec<GroceryItem> {
    let mut map: HashMap<String, Aggregate> = HashMap::new();

    for day in plan {
        for recipe in active_meals(day, prefs) {
            for ing in &recipe.ingredients {
                let scaled = if recipe.servings > 0 {
                    (ing.amount * prefs.persons as f64) / recipe.servings as f64
                } else {
                    ing.amount
                };
                let rounded = round_to_nice_number(scaled);

                let key = format!("{}|||{}", ing.key(), ing.unit);
                match map.get_mut(&key) {
                    Some(existing) => {
                        existing.total_amount += rounded;
                        if !existing.recipes.contains(&recipe.name) {
                            existing.recipes.push(recipe.name.clone());
                        }
                    }
                    None => {
                        map.insert(
                            key,
                            Aggregate {
                                name: ing.name.clone(),
                                category: ing.category.clone(),
                                unit: ing.unit.clone(),
                                total_amount: rounded,
                                recipes: vec![recipe.name.clone()],
                                package_size: ing.package_size,
                                price_per_package: ing.price_per_package,
                            },
                        );
                    }
                }
            }
        }
    }

    let mut items: Vec<GroceryItem> = map
        .into_values()
        .map(|agg| {
            let amount = round_to_nice_number(agg.total_amount);
            let package_size = if agg.package_size > 0.0 {
                agg.package_size
            } else {
                amount
            };
            let packages_needed = if amount > 0.0 {
                (amount / package_size).ceil() as u32
            } else {
                0
            };
            let price = packages_needed as f64 * agg.price_per_package;

            GroceryItem {
                name: agg.name,
                amount,
                unit: agg.unit,
                price,
                category: agg.category,
                recipes: agg.recipes,
                package_size,
                packages_needed,
            }
        })
        .collect();

    items.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    items
}

/// Total package-quantized cost of the weekly shop.
pub fn total_cost(plan: &[PlanDay], prefs: &UserPreferences) -> f64 {
    generate_grocery_list(plan, prefs)
        .iter()
        .map(|item| item.price)
        .sum()
}

/// Items that will be over-purchased relative to need, largest leftover
/// first.
pub fn leftovers(plan: &[PlanDay], prefs: &UserPreferences) -> Vec<LeftoverItem> {
    let mut result: Vec<LeftoverItem> = generate_grocery_list(plan, prefs)
        .into_iter()
        .filter_map(|item| {
            let package_size = if item.package_size > 0.0 {
                item.package_size
            } else {
                item.amount
            };
            if item.amount <= 0.0 {
                return None;
            }
            let packages = (item.amount / package_size).ceil();
            let total_bought = packages * package_size;
            let leftover = total_bought - item.amount;

            if leftover > LEFTOVER_EPSILON {
                Some(LeftoverItem {
                    name: item.name,
                    amount: item.amount,
                    unit: item.unit,
                    category: item.category,
                    leftover_amount: (leftover * 10.0).round() / 10.0,
                    leftover_percentage: ((leftover / total_bought) * 100.0).round(),
                })
            } else {
                None
            }
        })
        .collect();

    result.sort_by(|a, b| {
        b.leftover_amount
            .partial_cmp(&a.leftover_amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, MealType, Nutrition};

    fn ingredient(name: &str, amount: f64, package_size: f64, price_per_package: f64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            amount,
            unit: "g".to_string(),
            price: (amount / package_size) * price_per_package,
            category: "Pantry".to_string(),
            package_size,
            price_per_package,
        }
    }

    fn recipe(id: &str, meal_type: MealType, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: id.to_string(),
            meal_type,
            cook_time: 20,
            servings: 2,
            nutrition: Nutrition::default(),
            tags: vec![],
            ingredients,
        }
    }

    fn day_with(date: &str, meals: [Option<Recipe>; 3]) -> PlanDay {
        let [breakfast, lunch, dinner] = meals;
        PlanDay {
            id: format!("day-{date}"),
            date: date.to_string(),
            breakfast,
            lunch,
            dinner,
        }
    }

    #[test]
    fn test_rounding_thresholds() {
        assert_eq!(round_to_nice_number(12.0), 10.0);
        assert_eq!(round_to_nice_number(13.0), 15.0);
        assert_eq!(round_to_nice_number(74.0), 70.0);
        assert_eq!(round_to_nice_number(76.0), 80.0);
        assert_eq!(round_to_nice_number(160.0), 150.0);
        assert_eq!(round_to_nice_number(170.0), 175.0);
        assert_eq!(round_to_nice_number(620.0), 600.0);
        assert_eq!(round_to_nice_number(630.0), 650.0);
    }

    #[test]
    fn test_package_quantized_cost_not_doubled() {
        // Two recipes each need 150 g of the same 500 g / 2.50 package:
        // total demand 300 g still fits one package.
        let r1 = recipe(
            "pasta night",
            MealType::Dinner,
            vec![ingredient("Parmesan", 150.0, 500.0, 2.50)],
        );
        let r2 = recipe(
            "risotto",
            MealType::Lunch,
            vec![ingredient("Parmesan", 150.0, 500.0, 2.50)],
        );
        let plan = vec![day_with("Monday", [None, Some(r2), Some(r1)])];
        let prefs = UserPreferences::default();

        let list = generate_grocery_list(&plan, &prefs);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].amount, 300.0);
        assert_eq!(list[0].packages_needed, 1);
        assert!((list[0].price - 2.50).abs() < 1e-9);
        assert_eq!(list[0].recipes.len(), 2);
    }

    #[test]
    fn test_aggregation_key_is_name_and_unit() {
        let mut oil_ml = ingredient("Olive Oil", 30.0, 500.0, 5.0);
        oil_ml.unit = "ml".to_string();
        let oil_g = ingredient("olive oil", 30.0, 500.0, 5.0);

        let r = recipe("mixed", MealType::Dinner, vec![oil_ml, oil_g]);
        let plan = vec![day_with("Monday", [None, None, Some(r)])];
        let list = generate_grocery_list(&plan, &UserPreferences::default());

        // Same lowercased name, different unit: two distinct items.
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_eating_out_lunch_excluded() {
        let lunch = recipe(
            "skipped lunch",
            MealType::Lunch,
            vec![ingredient("Rice", 200.0, 1000.0, 2.50)],
        );
        let dinner = recipe(
            "kept dinner",
            MealType::Dinner,
            vec![ingredient("Pasta", 200.0, 500.0, 1.20)],
        );
        let plan = vec![day_with("Friday", [None, Some(lunch), Some(dinner)])];
        let prefs = UserPreferences {
            eating_out_days: vec!["Friday".to_string()],
            ..Default::default()
        };

        let list = generate_grocery_list(&plan, &prefs);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Pasta");
    }

    #[test]
    fn test_amounts_follow_rounding_law() {
        let r = recipe(
            "odd amounts",
            MealType::Dinner,
            vec![
                ingredient("Spinach", 137.0, 200.0, 2.0),
                ingredient("Walnuts", 43.0, 200.0, 6.0),
            ],
        );
        let plan = vec![day_with("Monday", [None, None, Some(r)])];
        let list = generate_grocery_list(&plan, &UserPreferences::default());

        for item in &list {
            let granularity = if item.amount < 50.0 {
                5.0
            } else if item.amount < 100.0 {
                10.0
            } else if item.amount < 500.0 {
                25.0
            } else {
                50.0
            };
            assert_eq!(
                item.amount % granularity,
                0.0,
                "{} = {}",
                item.name,
                item.amount
            );
        }
    }

    #[test]
    fn test_idempotence() {
        let r = recipe(
            "stable",
            MealType::Breakfast,
            vec![ingredient("Oats", 80.0, 500.0, 2.50)],
        );
        let plan = vec![day_with("Monday", [Some(r), None, None])];
        let prefs = UserPreferences::default();

        let first = generate_grocery_list(&plan, &prefs);
        let second = generate_grocery_list(&plan, &prefs);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.amount, b.amount);
            assert_eq!(a.price, b.price);
        }
        assert_eq!(total_cost(&plan, &prefs), total_cost(&plan, &prefs));
    }

    #[test]
    fn test_leftover_detection() {
        // 150 g needed, 500 g package: 350 g (70%) left over.
        let r = recipe(
            "small need",
            MealType::Dinner,
            vec![ingredient("Feta", 150.0, 500.0, 4.20)],
        );
        let plan = vec![day_with("Monday", [None, None, Some(r)])];
        let report = leftovers(&plan, &UserPreferences::default());

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].leftover_amount, 350.0);
        assert_eq!(report[0].leftover_percentage, 70.0);
    }

    #[test]
    fn test_leftovers_sorted_descending() {
        let r = recipe(
            "two items",
            MealType::Dinner,
            vec![
                ingredient("Feta", 150.0, 500.0, 4.20),
                ingredient("Rice", 900.0, 1000.0, 2.50),
            ],
        );
        let plan = vec![day_with("Monday", [None, None, Some(r)])];
        let report = leftovers(&plan, &UserPreferences::default());

        assert_eq!(report.len(), 2);
        assert!(report[0].leftover_amount >= report[1].leftover_amount);
        assert_eq!(report[0].name, "Feta");
    }

    #[test]
    fn test_full_package_has_no_leftover() {
        let r = recipe(
            "exact",
            MealType::Dinner,
            vec![ingredient("Pasta", 500.0, 500.0, 1.20)],
        );
        let plan = vec![day_with("Monday", [None, None, Some(r)])];
        assert!(leftovers(&plan, &UserPreferences::default()).is_empty());
    }
}
