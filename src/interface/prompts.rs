use std::collections::BTreeSet;

use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::error::{PlanError, Result};
use crate::models::{Diet, Goal, MealMix, Recipe, UserPreferences};
use crate::planner::constants::WEEKDAYS;

const FUZZY_THRESHOLD: f64 = 0.7;

fn prompt_number<T: std::str::FromStr>(prompt: &str, default: &str) -> Result<T> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    input
        .parse()
        .map_err(|_| PlanError::InvalidInput("Invalid number".to_string()))
}

fn prompt_persons() -> Result<u32> {
    let persons: u32 = prompt_number("How many persons are you planning for?", "2")?;
    if persons == 0 {
        return Err(PlanError::InvalidInput(
            "At least one person required".to_string(),
        ));
    }
    Ok(persons)
}

fn prompt_budget() -> Result<f64> {
    let budget: f64 = prompt_number("What is your weekly grocery budget?", "100")?;
    if budget < 0.0 {
        return Err(PlanError::InvalidInput(
            "Budget must be nonnegative".to_string(),
        ));
    }
    Ok(budget)
}

fn prompt_diet() -> Result<Diet> {
    let options = [
        "Anything",
        "Vegetarian",
        "Vegan",
        "Keto",
        "Paleo",
        "Mediterranean",
    ];
    let selection = Select::new()
        .with_prompt("Which diet do you follow?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        1 => Diet::Vegetarian,
        2 => Diet::Vegan,
        3 => Diet::Keto,
        4 => Diet::Paleo,
        5 => Diet::Mediterranean,
        _ => Diet::Any,
    })
}

fn prompt_meal_mix() -> Result<MealMix> {
    let options = ["Balanced", "More meat", "More vegetarian"];
    let selection = Select::new()
        .with_prompt("What mix of meals do you prefer?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        1 => MealMix::MoreMeat,
        2 => MealMix::MoreVeg,
        _ => MealMix::Balanced,
    })
}

fn prompt_goals() -> Result<Vec<Goal>> {
    let options = [
        "Eat healthy",
        "Stay on budget",
        "Avoid food waste",
        "Track nutrition",
    ];
    let selections = MultiSelect::new()
        .with_prompt("What are your goals? (space to toggle, enter to confirm)")
        .items(&options)
        .interact()?;

    let goals: Vec<Goal> = selections
        .into_iter()
        .filter_map(|i| match i {
            0 => Some(Goal::Healthy),
            1 => Some(Goal::Budget),
            2 => Some(Goal::NoWaste),
            3 => Some(Goal::Tracking),
            _ => None,
        })
        .collect();

    if goals.is_empty() {
        Ok(vec![Goal::Healthy])
    } else {
        Ok(goals)
    }
}

fn prompt_eating_out_days() -> Result<Vec<String>> {
    let selections = MultiSelect::new()
        .with_prompt("On which days do you eat lunch out? (space to toggle)")
        .items(&WEEKDAYS)
        .interact()?;

    Ok(selections
        .into_iter()
        .map(|i| WEEKDAYS[i].to_string())
        .collect())
}

/// Collect free-text ingredient terms with fuzzy suggestions against the
/// names actually present in the catalog. Unknown terms are kept as typed;
/// they still match by substring later.
pub fn prompt_ingredient_terms(prompt: &str, known: &[String]) -> Result<Vec<String>> {
    let mut terms = Vec::new();

    loop {
        let input: String = Input::new()
            .with_prompt(format!("{prompt} (or press Enter to finish)"))
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim().to_string();
        if input.is_empty() {
            break;
        }

        let lower = input.to_lowercase();
        if known.iter().any(|k| k.to_lowercase() == lower) {
            println!("Added: {input}");
            terms.push(input);
            continue;
        }

        let mut candidates: Vec<(&String, f64)> = known
            .iter()
            .map(|k| (k, jaro_winkler(&k.to_lowercase(), &lower)))
            .filter(|(_, score)| *score > FUZZY_THRESHOLD)
            .collect();
        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        match candidates.len() {
            0 => {
                println!("Added: {input}");
                terms.push(input);
            }
            1 => {
                let suggestion = candidates[0].0;
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{suggestion}'?"))
                    .default(true)
                    .interact()?;
                let chosen = if confirm { suggestion.clone() } else { input };
                println!("Added: {chosen}");
                terms.push(chosen);
            }
            _ => {
                let mut options: Vec<String> = candidates
                    .iter()
                    .take(5)
                    .map(|(k, _)| (*k).clone())
                    .collect();
                let keep_as_typed = options.len();
                options.push(format!("Keep '{input}' as typed"));

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&options)
                    .default(0)
                    .interact()?;

                let chosen = if selection == keep_as_typed {
                    input
                } else {
                    options[selection].clone()
                };
                println!("Added: {chosen}");
                terms.push(chosen);
            }
        }
    }

    Ok(terms)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn ingredient_names(catalog: &[Recipe]) -> Vec<String> {
    let names: BTreeSet<String> = catalog
        .iter()
        .flat_map(|r| r.ingredients.iter())
        .map(|i| i.name.clone())
        .collect();
    names.into_iter().collect()
}

/// Run the full preference wizard.
pub fn collect_preferences(catalog: &[Recipe]) -> Result<UserPreferences> {
    let known = ingredient_names(catalog);

    let persons = prompt_persons()?;
    let budget_per_week = prompt_budget()?;
    let diet = prompt_diet()?;
    let meal_mix = prompt_meal_mix()?;
    let goals = prompt_goals()?;

    let max_time_breakfast = prompt_number("Max minutes for breakfast?", "15")?;
    let max_time_lunch = prompt_number("Max minutes for lunch?", "30")?;
    let max_time_dinner = prompt_number("Max minutes for dinner?", "45")?;

    let allergies = prompt_ingredient_terms("Enter an allergy", &known)?;
    let dislikes = prompt_ingredient_terms("Enter a disliked food", &known)?;
    let eating_out_days = prompt_eating_out_days()?;

    Ok(UserPreferences {
        diet,
        meal_mix,
        persons,
        budget_per_week,
        max_time_breakfast,
        max_time_lunch,
        max_time_dinner,
        allergies,
        dislikes,
        goals,
        eating_out_days,
    })
}
