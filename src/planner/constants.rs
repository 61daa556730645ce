/// Assumed daily calorie profile.
pub const TARGET_DAILY_CALORIES: f64 = 2000.0;

/// Per-slot calorie targets (25% / 32.5% / 42.5% of daily).
pub const TARGET_BREAKFAST_CALORIES: f64 = 500.0;
pub const TARGET_LUNCH_CALORIES: f64 = 650.0;
pub const TARGET_DINNER_CALORIES: f64 = 850.0;

/// Allowed variance around the slot targets.
pub const BREAKFAST_CALORIE_RANGE: f64 = 200.0;
pub const LUNCH_CALORIE_RANGE: f64 = 200.0;
pub const DINNER_CALORIE_RANGE: f64 = 250.0;

/// Minimum in-window pool before the calorie band is enforced strictly.
pub const MIN_POOL_IN_RANGE: usize = 5;

/// Fraction of closest-to-target recipes kept when the band is too sparse.
pub const CLOSEST_FRACTION: f64 = 0.6;

/// Fraction of cheapest recipes kept under the budget goal.
pub const BUDGET_CHEAPEST_FRACTION: f64 = 0.4;

/// Pools below this size skip the fractional cuts entirely.
pub const FRACTION_CUT_MIN_POOL: usize = 10;

/// Fraction of best-scored candidates sampled during selection.
pub const TOP_SCORED_FRACTION: f64 = 0.3;

/// Calorie-floor correction: trigger when the day falls this far below the
/// daily target, and require at least this much improvement from a swap.
pub const CALORIE_SHORTFALL: f64 = 200.0;
pub const MIN_CALORIE_UPGRADE: f64 = 100.0;

/// Budget correction: bounded attempts with a little slack.
pub const MAX_BUDGET_ATTEMPTS: u32 = 10;
pub const BUDGET_SLACK: f64 = 1.05;

// ─────────────────────────────────────────────────────────────────────────────
// Waste / reuse scoring
// ─────────────────────────────────────────────────────────────────────────────

/// Leftover below this amount (in the ingredient's unit) is ignored.
pub const LEFTOVER_EPSILON: f64 = 0.1;

/// Score assigned to a recipe with no ingredient data at all.
pub const MISSING_INGREDIENTS_SCORE: f64 = 1000.0;

/// Reuse bonus schedule. Protein is expensive and bulk-packaged, so leaving
/// it unused is penalized hardest.
pub const PROTEIN_REUSE_BONUS: f64 = 100.0;
pub const PROTEIN_HIGH_USAGE_BONUS: f64 = 50.0;
pub const PROTEIN_MID_USAGE_BONUS: f64 = 30.0;
pub const EXPENSIVE_REUSE_BONUS: f64 = 40.0;
pub const EXPENSIVE_HIGH_USAGE_BONUS: f64 = 20.0;
pub const BASE_REUSE_BONUS: f64 = 15.0;
pub const BASE_HIGH_USAGE_BONUS: f64 = 10.0;
pub const NEEDS_MORE_USE_BONUS: f64 = 200.0;
pub const NEW_BULK_PENALTY: f64 = 5.0;

/// Usage-percentage thresholds for the bonus tiers.
pub const HIGH_USAGE_PCT: f64 = 70.0;
pub const MID_USAGE_PCT: f64 = 50.0;
pub const BASE_HIGH_USAGE_PCT: f64 = 80.0;

/// Price per package above which a non-protein ingredient counts as
/// expensive.
pub const EXPENSIVE_PRICE_THRESHOLD: f64 = 2.0;

/// Package sizes (in the ingredient's unit) above which an ingredient
/// counts as bulk.
pub const NEW_BULK_PACKAGE_THRESHOLD: f64 = 500.0;
pub const LEDGER_BULK_PACKAGE_THRESHOLD: f64 = 300.0;

/// `needs_more_use` flag thresholds after a recipe is committed.
pub const PROTEIN_FLAG_USAGE_PCT: f64 = 70.0;
pub const BULK_FLAG_USAGE_PCT: f64 = 50.0;

/// Weekday names, Sunday-first to match the weekday numbering used when
/// rotating the week to start on today.
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];
