use std::sync::LazyLock;

use tracing::warn;

/// Floor applied to every resolved price so budget-ratio math never divides
/// by or multiplies with zero.
pub const PRICE_FLOOR: f64 = 0.01;

/// Fallback when an ingredient is missing from the table entirely.
pub const DEFAULT_PRICE_PER_UNIT: f64 = 2.00;
pub const DEFAULT_PACKAGE_SIZE: f64 = 500.0;

/// Static price data for one table entry.
#[derive(Debug, Clone, Copy)]
pub struct PriceEntry {
    pub price_per_unit: f64,
    pub package_size: f64,
    pub unit: &'static str,
    pub category: &'static str,
}

const fn entry(
    price_per_unit: f64,
    package_size: f64,
    unit: &'static str,
    category: &'static str,
) -> PriceEntry {
    PriceEntry {
        price_per_unit,
        package_size,
        unit,
        category,
    }
}

/// Ordered price table. Substring matches resolve in declaration order, so
/// this must stay a list, not a map.
pub static PRICE_TABLE: LazyLock<Vec<(&'static str, PriceEntry)>> = LazyLock::new(|| {
    vec![
        ("broccoli", entry(2.50, 500.0, "g", "Vegetables")),
        ("zucchini", entry(1.80, 400.0, "g", "Vegetables")),
        ("eggs", entry(3.50, 660.0, "g", "Dairy")),
        ("chicken breast", entry(6.00, 500.0, "g", "Meat")),
        ("salmon", entry(12.00, 500.0, "g", "Fish")),
        ("cod", entry(10.00, 500.0, "g", "Fish")),
        ("tuna", entry(8.50, 400.0, "g", "Fish")),
        ("shrimp", entry(14.00, 400.0, "g", "Fish")),
        ("beef", entry(8.50, 500.0, "g", "Meat")),
        ("ground beef", entry(5.50, 500.0, "g", "Meat")),
        ("pork", entry(7.00, 500.0, "g", "Meat")),
        ("turkey", entry(6.50, 500.0, "g", "Meat")),
        ("bacon", entry(4.50, 200.0, "g", "Meat")),
        ("tofu", entry(2.50, 400.0, "g", "Protein")),
        ("tempeh", entry(3.50, 300.0, "g", "Protein")),
        ("lentils", entry(2.00, 500.0, "g", "Pantry")),
        ("chickpeas", entry(1.50, 400.0, "g", "Pantry")),
        ("black beans", entry(1.50, 400.0, "g", "Pantry")),
        ("rice", entry(2.50, 1000.0, "g", "Pantry")),
        ("quinoa", entry(4.50, 500.0, "g", "Pantry")),
        ("pasta", entry(1.20, 500.0, "g", "Pantry")),
        ("spaghetti", entry(1.20, 500.0, "g", "Pantry")),
        ("noodles", entry(1.80, 400.0, "g", "Pantry")),
        ("bread", entry(1.80, 500.0, "g", "Pantry")),
        ("flour", entry(1.50, 1000.0, "g", "Pantry")),
        ("oats", entry(2.50, 500.0, "g", "Pantry")),
        ("milk", entry(1.20, 1000.0, "ml", "Dairy")),
        ("yogurt", entry(2.50, 500.0, "g", "Dairy")),
        ("greek yogurt", entry(3.50, 500.0, "g", "Dairy")),
        ("cheese", entry(3.50, 200.0, "g", "Dairy")),
        ("mozzarella", entry(3.80, 200.0, "g", "Dairy")),
        ("parmesan", entry(4.50, 200.0, "g", "Dairy")),
        ("feta", entry(4.20, 200.0, "g", "Dairy")),
        ("butter", entry(2.50, 250.0, "g", "Dairy")),
        ("tomato", entry(2.50, 500.0, "g", "Vegetables")),
        ("cherry tomatoes", entry(3.00, 250.0, "g", "Vegetables")),
        ("tomato sauce", entry(1.50, 400.0, "g", "Pantry")),
        ("onion", entry(1.50, 500.0, "g", "Vegetables")),
        ("garlic", entry(1.50, 200.0, "g", "Vegetables")),
        ("bell pepper", entry(2.00, 300.0, "g", "Vegetables")),
        ("carrot", entry(1.20, 500.0, "g", "Vegetables")),
        ("cucumber", entry(1.00, 400.0, "g", "Vegetables")),
        ("lettuce", entry(1.50, 200.0, "g", "Vegetables")),
        ("spinach", entry(2.00, 200.0, "g", "Vegetables")),
        ("kale", entry(2.50, 200.0, "g", "Vegetables")),
        ("cauliflower", entry(2.00, 600.0, "g", "Vegetables")),
        ("mushrooms", entry(3.00, 250.0, "g", "Vegetables")),
        ("green beans", entry(2.50, 400.0, "g", "Vegetables")),
        ("peas", entry(2.00, 400.0, "g", "Vegetables")),
        ("corn", entry(1.80, 400.0, "g", "Vegetables")),
        ("potato", entry(1.50, 1000.0, "g", "Vegetables")),
        ("sweet potato", entry(2.00, 600.0, "g", "Vegetables")),
        ("avocado", entry(1.50, 200.0, "g", "Fruits")),
        ("banana", entry(1.50, 600.0, "g", "Fruits")),
        ("apple", entry(2.00, 600.0, "g", "Fruits")),
        ("lemon", entry(2.00, 400.0, "g", "Fruits")),
        ("berries", entry(3.50, 250.0, "g", "Fruits")),
        ("strawberries", entry(3.50, 250.0, "g", "Fruits")),
        ("blueberries", entry(4.00, 200.0, "g", "Fruits")),
        ("olive oil", entry(5.00, 500.0, "ml", "Pantry")),
        ("vegetable oil", entry(3.00, 1000.0, "ml", "Pantry")),
        ("soy sauce", entry(2.50, 250.0, "ml", "Condiments")),
        ("vinegar", entry(1.50, 500.0, "ml", "Condiments")),
        ("honey", entry(4.50, 350.0, "g", "Pantry")),
        ("sugar", entry(1.00, 1000.0, "g", "Pantry")),
        ("salt", entry(0.50, 500.0, "g", "Pantry")),
        ("pepper", entry(2.00, 100.0, "g", "Pantry")),
        ("paprika", entry(2.50, 50.0, "g", "Pantry")),
        ("cumin", entry(2.50, 50.0, "g", "Pantry")),
        ("oregano", entry(2.00, 30.0, "g", "Pantry")),
        ("basil", entry(2.00, 30.0, "g", "Pantry")),
        ("parsley", entry(1.50, 50.0, "g", "Vegetables")),
        ("ginger", entry(2.50, 200.0, "g", "Vegetables")),
        ("almonds", entry(5.50, 200.0, "g", "Nuts")),
        ("walnuts", entry(6.00, 200.0, "g", "Nuts")),
        ("peanuts", entry(3.50, 300.0, "g", "Nuts")),
        ("peanut butter", entry(4.00, 350.0, "g", "Pantry")),
        ("granola", entry(4.50, 375.0, "g", "Pantry")),
        ("coconut milk", entry(2.50, 400.0, "ml", "Pantry")),
        ("almond milk", entry(2.80, 1000.0, "ml", "Dairy")),
    ]
});

/// Resolved price data for a quantity of one ingredient.
#[derive(Debug, Clone)]
pub struct ResolvedPrice {
    pub price: f64,
    pub unit: String,
    pub category: String,
    pub package_size: f64,
    pub price_per_package: f64,
}

/// Look up a table entry for a free-text ingredient name.
///
/// Resolution order: exact case-insensitive match, then substring match in
/// either direction (first table entry wins), then `None`.
fn lookup(name: &str) -> Option<&'static PriceEntry> {
    let normalized = name.to_lowercase();
    let normalized = normalized.trim();

    if let Some((_, data)) = PRICE_TABLE.iter().find(|(key, _)| *key == normalized) {
        return Some(data);
    }

    PRICE_TABLE
        .iter()
        .find(|(key, _)| normalized.contains(key) || key.contains(normalized))
        .map(|(_, data)| data)
}

/// Price a quantity (grams-equivalent) of a free-text ingredient name.
///
/// Unknown ingredients fall back to a default estimate; that is a data
/// quality issue, not an error.
pub fn resolve_price(name: &str, quantity: f64) -> ResolvedPrice {
    let data = match lookup(name) {
        Some(data) => *data,
        None => {
            warn!(ingredient = name, "no price data, using default estimate");
            entry(
                DEFAULT_PRICE_PER_UNIT,
                DEFAULT_PACKAGE_SIZE,
                "g",
                "Other",
            )
        }
    };

    let price = (quantity / data.package_size) * data.price_per_unit;

    ResolvedPrice {
        price: price.max(PRICE_FLOOR),
        unit: data.unit.to_string(),
        category: data.category.to_string(),
        package_size: data.package_size,
        price_per_package: data.price_per_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let resolved = resolve_price("Chicken Breast", 250.0);
        assert_eq!(resolved.category, "Meat");
        assert_eq!(resolved.package_size, 500.0);
        assert!((resolved.price - 3.00).abs() < 1e-9);
    }

    #[test]
    fn test_substring_match_either_direction() {
        // Query contains a table key.
        let resolved = resolve_price("fresh broccoli florets", 500.0);
        assert_eq!(resolved.category, "Vegetables");
        assert!((resolved.price - 2.50).abs() < 1e-9);

        // Table key contains the query.
        let resolved = resolve_price("mozzarell", 200.0);
        assert_eq!(resolved.category, "Dairy");
    }

    #[test]
    fn test_substring_resolution_is_declaration_order() {
        // "beef" appears before "ground beef"; a query matching both takes
        // the first entry.
        let resolved = resolve_price("beef mince ground", 500.0);
        assert!((resolved.price_per_package - 8.50).abs() < 1e-9);
    }

    #[test]
    fn test_default_fallback() {
        let resolved = resolve_price("dragonfruit syrup", 250.0);
        assert_eq!(resolved.category, "Other");
        assert_eq!(resolved.package_size, DEFAULT_PACKAGE_SIZE);
        assert!((resolved.price - 1.00).abs() < 1e-9);
    }

    #[test]
    fn test_price_floor() {
        // Tiny quantities still cost at least one cent.
        let resolved = resolve_price("salt", 0.5);
        assert!(resolved.price >= PRICE_FLOOR);
        let resolved = resolve_price("unknown thing", 0.001);
        assert!(resolved.price >= PRICE_FLOOR);
    }
}
