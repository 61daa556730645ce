use crate::models::{GroceryItem, LeftoverItem, MealType, PlanDay, UserPreferences};

fn slot_line(day: &PlanDay, meal_type: MealType, eating_out: bool) -> String {
    if eating_out && meal_type == MealType::Lunch {
        return "(eating out)".to_string();
    }
    match day.slot(meal_type) {
        Some(recipe) => format!(
            "{} ({:.0} cal, {} min)",
            recipe.name,
            recipe.calories(),
            recipe.cook_time
        ),
        None => "(no recipe found)".to_string(),
    }
}

/// Display the weekly plan, one block per day.
pub fn display_plan(plan: &[PlanDay], prefs: &UserPreferences) {
    if plan.is_empty() {
        println!("No plan yet. Run `plan` to generate one.");
        return;
    }

    println!();
    println!("=== Weekly Meal Plan ===");
    println!();

    for day in plan {
        let eating_out = prefs.is_eating_out(&day.date);
        println!("{}", day.date);
        println!("  Breakfast: {}", slot_line(day, MealType::Breakfast, eating_out));
        println!("  Lunch:     {}", slot_line(day, MealType::Lunch, eating_out));
        println!("  Dinner:    {}", slot_line(day, MealType::Dinner, eating_out));
        println!("  Total:     {:.0} cal", day.total_calories());
        println!();
    }
}

/// Display the grocery list grouped by category, with the package-quantized
/// total at the bottom.
pub fn display_grocery_list(items: &[GroceryItem], total: f64) {
    if items.is_empty() {
        println!("Grocery list is empty.");
        return;
    }

    println!();
    println!("=== Grocery List ===");

    let mut current_category = "";
    for item in items {
        if item.category != current_category {
            current_category = &item.category;
            println!();
            println!("{current_category}:");
        }
        println!(
            "  {} - {:.0} {} ({} x {:.0} {}) - {:.2}",
            item.name,
            item.amount,
            item.unit,
            item.packages_needed,
            item.package_size,
            item.unit,
            item.price
        );
    }

    println!();
    println!("Total: {total:.2}");
    println!();
}

/// Display the leftover report, largest leftover first.
pub fn display_leftovers(items: &[LeftoverItem]) {
    if items.is_empty() {
        println!("No significant leftovers. Nice.");
        return;
    }

    println!();
    println!("=== Expected Leftovers ===");
    println!();

    for item in items {
        println!(
            "  {} - {:.1} {} left over ({:.0}% of what you buy)",
            item.name, item.leftover_amount, item.unit, item.leftover_percentage
        );
    }

    println!();
}
