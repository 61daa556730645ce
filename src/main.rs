use clap::Parser;
use rand::thread_rng;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use week_meal_planner_rs::cli::{Cli, Command};
use week_meal_planner_rs::error::{PlanError, Result};
use week_meal_planner_rs::interface::{
    collect_preferences, display_grocery_list, display_leftovers, display_plan, prompt_yes_no,
};
use week_meal_planner_rs::models::MealType;
use week_meal_planner_rs::planner::{CrossSwapOutcome, SwapOutcome};
use week_meal_planner_rs::state::{
    load_recipes, load_state_or_default, save_state, PlanStateManager,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    match command {
        Command::Plan => cmd_plan(&cli.recipes, &cli.state),
        Command::Swap { day, meal } => cmd_swap(&cli.recipes, &cli.state, &day, &meal),
        Command::Exchange {
            from_day,
            from_meal,
            to_day,
            to_meal,
        } => cmd_exchange(&cli.recipes, &cli.state, &from_day, &from_meal, &to_day, &to_meal),
        Command::Grocery => cmd_grocery(&cli.recipes, &cli.state),
        Command::Leftovers => cmd_leftovers(&cli.recipes, &cli.state),
        Command::Preferences => cmd_preferences(&cli.recipes, &cli.state),
        Command::Remove { recipe_id } => cmd_remove(&cli.recipes, &cli.state, &recipe_id),
    }
}

fn load_manager(recipes_path: &str, state_path: &str) -> Result<PlanStateManager> {
    let path = Path::new(recipes_path);
    if !path.exists() {
        return Err(PlanError::InvalidInput(format!(
            "Recipe catalog not found: {recipes_path}"
        )));
    }

    let catalog = load_recipes(path)?;
    let state = load_state_or_default(state_path);
    info!(recipes = catalog.len(), "catalog loaded");

    Ok(PlanStateManager::new(catalog, state))
}

fn persist(manager: &PlanStateManager, state_path: &str) {
    // Losing a save is annoying, not fatal; the plan was already shown.
    if let Err(err) = save_state(state_path, manager.state()) {
        warn!(path = state_path, error = %err, "failed to save planner state");
        eprintln!("Warning: could not save state: {err}");
    }
}

fn parse_meal(s: &str) -> Result<MealType> {
    MealType::parse(s).ok_or_else(|| {
        PlanError::InvalidInput(format!(
            "Unknown meal '{s}' (expected breakfast, lunch, or dinner)"
        ))
    })
}

/// Generate a fresh 7-day plan and save it.
fn cmd_plan(recipes_path: &str, state_path: &str) -> Result<()> {
    let mut manager = load_manager(recipes_path, state_path)?;

    if !manager.preferences().is_valid() {
        println!("Preferences look incomplete. Run `preferences` first.");
        return Ok(());
    }

    let mut rng = thread_rng();
    manager.regenerate(&mut rng)?;

    display_plan(manager.plan(), manager.preferences());
    println!("Estimated grocery cost: {:.2}", manager.total_cost());

    persist(&manager, state_path);
    Ok(())
}

/// Swap one meal slot for a different eligible recipe.
fn cmd_swap(recipes_path: &str, state_path: &str, day: &str, meal: &str) -> Result<()> {
    let mut manager = load_manager(recipes_path, state_path)?;
    if !manager.has_plan() {
        println!("No plan yet. Run `plan` first.");
        return Ok(());
    }

    let meal_type = parse_meal(meal)?;
    let mut rng = thread_rng();

    match manager.swap(day, meal_type, &mut rng) {
        SwapOutcome::Swapped { new_recipe } => {
            println!("Swapped {day} {meal_type} to: {new_recipe}");
            display_plan(manager.plan(), manager.preferences());
            persist(&manager, state_path);
        }
        SwapOutcome::SlotNotFound => {
            println!("No day matching '{day}' in the current plan.");
        }
        SwapOutcome::NoAlternatives => {
            println!("No alternative recipes available for {day} {meal_type}.");
        }
    }
    Ok(())
}

/// Exchange two meal slots, possibly across days.
fn cmd_exchange(
    recipes_path: &str,
    state_path: &str,
    from_day: &str,
    from_meal: &str,
    to_day: &str,
    to_meal: &str,
) -> Result<()> {
    let mut manager = load_manager(recipes_path, state_path)?;
    if !manager.has_plan() {
        println!("No plan yet. Run `plan` first.");
        return Ok(());
    }

    let from = parse_meal(from_meal)?;
    let to = parse_meal(to_meal)?;

    match manager.exchange(from_day, from, to_day, to) {
        CrossSwapOutcome::Swapped => {
            println!("Exchanged {from_day} {from} with {to_day} {to}.");
            display_plan(manager.plan(), manager.preferences());
            persist(&manager, state_path);
        }
        CrossSwapOutcome::DayNotFound(day) => {
            println!("No day matching '{day}' in the current plan.");
        }
        CrossSwapOutcome::SlotEmpty(slot) => {
            println!("Slot {slot} is empty; only filled slots can be exchanged.");
        }
    }
    Ok(())
}

/// Print the aggregated grocery list and total cost.
fn cmd_grocery(recipes_path: &str, state_path: &str) -> Result<()> {
    let manager = load_manager(recipes_path, state_path)?;
    if !manager.has_plan() {
        println!("No plan yet. Run `plan` first.");
        return Ok(());
    }

    display_grocery_list(&manager.grocery_list(), manager.total_cost());
    Ok(())
}

/// Print the leftover report.
fn cmd_leftovers(recipes_path: &str, state_path: &str) -> Result<()> {
    let manager = load_manager(recipes_path, state_path)?;
    if !manager.has_plan() {
        println!("No plan yet. Run `plan` first.");
        return Ok(());
    }

    display_leftovers(&manager.leftovers());
    Ok(())
}

/// Run the interactive preference wizard and optionally regenerate.
fn cmd_preferences(recipes_path: &str, state_path: &str) -> Result<()> {
    let mut manager = load_manager(recipes_path, state_path)?;

    let prefs = collect_preferences(manager.catalog())?;
    manager.set_preferences(prefs);
    persist(&manager, state_path);
    println!("Preferences saved.");

    if prompt_yes_no("Generate a new plan with these preferences?", true)? {
        let mut rng = thread_rng();
        manager.regenerate(&mut rng)?;
        display_plan(manager.plan(), manager.preferences());
        persist(&manager, state_path);
    }
    Ok(())
}

/// Permanently exclude a recipe from future plans.
fn cmd_remove(recipes_path: &str, state_path: &str, recipe_id: &str) -> Result<()> {
    let mut manager = load_manager(recipes_path, state_path)?;

    manager.remove_recipe(recipe_id)?;
    persist(&manager, state_path);
    println!("Removed recipe '{recipe_id}' from future plans.");
    Ok(())
}
