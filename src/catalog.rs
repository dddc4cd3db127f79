//! # Known-Item Catalog and Default Meal Patterns
//!
//! Static data consumed by the matching engine and the keyword voice parser:
//! the table of common household items (with category and typical storage
//! location) and the default meal-pattern templates. Callers with their own
//! item lists can bypass these and construct patterns directly.

use crate::types::{
    EffortLevel, IngredientCategory, IngredientSlot, MealComponent, MealPattern, MealType,
    StorageLocation,
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A predefined item available for quick-add and name matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonItem {
    pub name: String,
    pub category: IngredientCategory,
    pub default_location: StorageLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_freshness_days: Option<u32>,
}

impl CommonItem {
    fn new(
        name: &str,
        category: IngredientCategory,
        default_location: StorageLocation,
        typical_freshness_days: Option<u32>,
    ) -> Self {
        Self {
            name: name.to_string(),
            category,
            default_location,
            typical_freshness_days,
        }
    }
}

static COMMON_ITEMS: LazyLock<Vec<CommonItem>> = LazyLock::new(build_common_items);

static DEFAULT_PATTERNS: LazyLock<Vec<MealPattern>> = LazyLock::new(build_default_patterns);

/// The built-in common-item table
pub fn common_items() -> &'static [CommonItem] {
    &COMMON_ITEMS
}

/// The built-in meal-pattern templates
pub fn default_meal_patterns() -> &'static [MealPattern] {
    &DEFAULT_PATTERNS
}

/// Default patterns applicable to a given meal type
pub fn patterns_by_meal_type(meal_type: MealType) -> Vec<&'static MealPattern> {
    DEFAULT_PATTERNS
        .iter()
        .filter(|p| p.meal_types.contains(&meal_type))
        .collect()
}

/// Default patterns carrying a given tag
pub fn patterns_by_tag(tag: &str) -> Vec<&'static MealPattern> {
    DEFAULT_PATTERNS
        .iter()
        .filter(|p| p.tags.iter().any(|t| t == tag))
        .collect()
}

fn build_common_items() -> Vec<CommonItem> {
    use IngredientCategory::*;
    use StorageLocation::*;

    vec![
        // Proteins
        CommonItem::new("Chicken breast", Protein, Fridge, Some(3)),
        CommonItem::new("Chicken thighs", Protein, Fridge, Some(3)),
        CommonItem::new("Ground beef", Protein, Fridge, Some(2)),
        CommonItem::new("Salmon", Protein, Fridge, Some(2)),
        CommonItem::new("Shrimp", Protein, Freezer, Some(90)),
        CommonItem::new("Eggs", Protein, Fridge, Some(21)),
        CommonItem::new("Tofu", Protein, Fridge, Some(7)),
        CommonItem::new("Bacon", Protein, Fridge, Some(7)),
        CommonItem::new("Sausage", Protein, Fridge, Some(5)),
        // Vegetables
        CommonItem::new("Spinach", Vegetable, Fridge, Some(5)),
        CommonItem::new("Broccoli", Vegetable, Fridge, Some(5)),
        CommonItem::new("Bell peppers", Vegetable, Fridge, Some(7)),
        CommonItem::new("Onions", Vegetable, Pantry, Some(30)),
        CommonItem::new("Garlic", Vegetable, Pantry, Some(21)),
        CommonItem::new("Tomatoes", Vegetable, Fridge, Some(7)),
        CommonItem::new("Carrots", Vegetable, Fridge, Some(14)),
        CommonItem::new("Zucchini", Vegetable, Fridge, Some(5)),
        CommonItem::new("Mushrooms", Vegetable, Fridge, Some(5)),
        CommonItem::new("Lettuce", Vegetable, Fridge, Some(5)),
        CommonItem::new("Cucumber", Vegetable, Fridge, Some(7)),
        CommonItem::new("Avocado", Vegetable, Fridge, Some(4)),
        CommonItem::new("Potatoes", Vegetable, Pantry, Some(21)),
        CommonItem::new("Sweet potatoes", Vegetable, Pantry, Some(21)),
        // Fruits
        CommonItem::new("Bananas", Fruit, Pantry, Some(5)),
        CommonItem::new("Apples", Fruit, Fridge, Some(14)),
        CommonItem::new("Lemons", Fruit, Fridge, Some(14)),
        CommonItem::new("Limes", Fruit, Fridge, Some(14)),
        CommonItem::new("Berries", Fruit, Fridge, Some(4)),
        // Dairy
        CommonItem::new("Milk", Dairy, Fridge, Some(7)),
        CommonItem::new("Greek yogurt", Dairy, Fridge, Some(14)),
        CommonItem::new("Butter", Dairy, Fridge, Some(30)),
        CommonItem::new("Cheddar cheese", Dairy, Fridge, Some(21)),
        CommonItem::new("Parmesan", Dairy, Fridge, Some(30)),
        CommonItem::new("Feta cheese", Dairy, Fridge, Some(14)),
        CommonItem::new("Cream cheese", Dairy, Fridge, Some(14)),
        CommonItem::new("Heavy cream", Dairy, Fridge, Some(10)),
        // Grains
        CommonItem::new("Rice", Grain, Pantry, Some(365)),
        CommonItem::new("Pasta", Grain, Pantry, Some(365)),
        CommonItem::new("Bread", Grain, Pantry, Some(5)),
        CommonItem::new("Tortillas", Grain, Fridge, Some(14)),
        CommonItem::new("Quinoa", Grain, Pantry, Some(365)),
        CommonItem::new("Oats", Grain, Pantry, Some(365)),
        // Condiments
        CommonItem::new("Soy sauce", Condiment, Pantry, Some(365)),
        CommonItem::new("Olive oil", Condiment, Pantry, Some(365)),
        CommonItem::new("Hot sauce", Condiment, Fridge, Some(180)),
        CommonItem::new("Mayo", Condiment, Fridge, Some(60)),
        CommonItem::new("Mustard", Condiment, Fridge, Some(180)),
        CommonItem::new("Ketchup", Condiment, Fridge, Some(180)),
        CommonItem::new("Salsa", Condiment, Fridge, Some(14)),
        CommonItem::new("Hummus", Condiment, Fridge, Some(7)),
        // Spices
        CommonItem::new("Salt", Spice, Pantry, None),
        CommonItem::new("Black pepper", Spice, Pantry, None),
        CommonItem::new("Cumin", Spice, Pantry, None),
        CommonItem::new("Paprika", Spice, Pantry, None),
        CommonItem::new("Italian seasoning", Spice, Pantry, None),
        CommonItem::new("Chili flakes", Spice, Pantry, None),
        // Frozen
        CommonItem::new("Frozen vegetables", Frozen, Freezer, Some(180)),
        CommonItem::new("Frozen berries", Frozen, Freezer, Some(180)),
        CommonItem::new("Ice cream", Frozen, Freezer, Some(60)),
        // Beverages
        CommonItem::new("Orange juice", Beverage, Fridge, Some(7)),
        CommonItem::new("Almond milk", Beverage, Fridge, Some(7)),
        CommonItem::new("Coffee", Beverage, Pantry, Some(90)),
    ]
}

fn build_default_patterns() -> Vec<MealPattern> {
    use IngredientCategory::*;
    use MealType::*;

    vec![
        MealPattern::new("eggs-toast", "Eggs & Toast")
            .with_description("Simple breakfast staple")
            .with_required(vec![
                IngredientSlot::specific("eggs", &["Eggs"]),
                IngredientSlot::specific("bread", &["Bread", "Tortillas"]),
            ])
            .with_flexible(vec![
                IngredientSlot::category("cheese", &[Dairy]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::category("vegetable", &[Vegetable]).optional(),
                IngredientSlot::specific("protein", &["Bacon", "Sausage"]).optional(),
            ])
            .with_effort(EffortLevel::Minimal)
            .with_meal_types(vec![Breakfast])
            .with_tags(&["quick", "breakfast", "classic"]),
        MealPattern::new("stir-fry", "Stir Fry")
            .with_description("Protein and veggies over rice or noodles")
            .with_required(vec![
                IngredientSlot::category("protein", &[Protein]),
                IngredientSlot::category("vegetables", &[Vegetable]),
            ])
            .with_flexible(vec![
                IngredientSlot::specific("base", &["Rice", "Pasta", "Quinoa"]).optional(),
                IngredientSlot::specific("sauce", &["Soy sauce"]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("aromatics", &["Garlic", "Onions"]).optional(),
            ])
            .with_meal_types(vec![Lunch, Dinner])
            .with_tags(&["quick", "healthy", "versatile"]),
        MealPattern::new("pasta-dish", "Pasta Night")
            .with_description("Pasta with protein and sauce")
            .with_required(vec![IngredientSlot::specific("pasta", &["Pasta"])])
            .with_flexible(vec![
                IngredientSlot::category("protein", &[Protein]).optional(),
                IngredientSlot::category("vegetables", &[Vegetable]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("cheese", &["Parmesan", "Feta cheese"]).optional(),
                IngredientSlot::specific("cream", &["Heavy cream"]).optional(),
            ])
            .with_meal_types(vec![Dinner])
            .with_tags(&["comfort", "classic"]),
        MealPattern::new("tacos", "Taco Night")
            .with_description("Tacos with protein and toppings")
            .with_required(vec![
                IngredientSlot::specific("shell", &["Tortillas"]),
                IngredientSlot::category("protein", &[Protein]),
            ])
            .with_flexible(vec![
                IngredientSlot::category("toppings", &[Vegetable]).optional(),
                IngredientSlot::category("cheese", &[Dairy]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("salsa", &["Salsa", "Hot sauce"]).optional(),
                IngredientSlot::specific("cream", &["Greek yogurt"]).optional(),
            ])
            .with_meal_types(vec![Dinner])
            .with_tags(&["fun", "family", "customizable"]),
        MealPattern::new("omelette", "Omelette")
            .with_description("Eggs with fillings")
            .with_required(vec![IngredientSlot::specific("eggs", &["Eggs"])])
            .with_flexible(vec![
                IngredientSlot::category("cheese", &[Dairy]).optional(),
                IngredientSlot::category("vegetables", &[Vegetable]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("protein", &["Bacon", "Sausage"]).optional(),
            ])
            .with_effort(EffortLevel::Minimal)
            .with_meal_types(vec![Breakfast, Lunch, Dinner])
            .with_tags(&["quick", "protein", "versatile"]),
        MealPattern::new("sandwich", "Sandwich")
            .with_description("Classic sandwich")
            .with_required(vec![IngredientSlot::specific("bread", &["Bread"])])
            .with_flexible(vec![
                IngredientSlot::category("protein", &[Protein, Dairy]).optional(),
                IngredientSlot::category("vegetables", &[Vegetable]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("spread", &["Mayo", "Mustard", "Hummus"]).optional(),
            ])
            .with_effort(EffortLevel::Minimal)
            .with_meal_types(vec![Lunch])
            .with_tags(&["quick", "portable", "classic"]),
        MealPattern::new("fried-rice", "Fried Rice")
            .with_description("Quick rice dish with vegetables and protein")
            .with_required(vec![
                IngredientSlot::specific("rice", &["Rice"]),
                IngredientSlot::specific("eggs", &["Eggs"]),
            ])
            .with_flexible(vec![
                IngredientSlot::category("vegetables", &[Vegetable]).optional(),
                IngredientSlot::category("protein", &[Protein]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("sauce", &["Soy sauce"]).optional(),
            ])
            .with_meal_types(vec![Lunch, Dinner])
            .with_tags(&["quick", "use-leftovers", "filling"]),
        MealPattern::new("smoothie", "Smoothie")
            .with_description("Blended fruit drink")
            .with_required(vec![
                IngredientSlot::category("fruit", &[Fruit]),
                IngredientSlot::specific("liquid", &["Milk", "Almond milk", "Greek yogurt"]),
            ])
            .with_flexible(vec![
                IngredientSlot::specific("greens", &["Spinach"]).optional(),
            ])
            .with_effort(EffortLevel::Minimal)
            .with_meal_types(vec![Breakfast, Snack])
            .with_tags(&["healthy", "quick", "refreshing"]),
        MealPattern::new("avocado-toast", "Avocado Toast")
            .with_description("Trendy but delicious")
            .with_required(vec![
                IngredientSlot::specific("bread", &["Bread"]),
                IngredientSlot::specific("avocado", &["Avocado"]),
            ])
            .with_flexible(vec![
                IngredientSlot::specific("eggs", &["Eggs"]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("heat", &["Chili flakes", "Hot sauce"]).optional(),
                IngredientSlot::specific("citrus", &["Lemons", "Limes"]).optional(),
            ])
            .with_effort(EffortLevel::Minimal)
            .with_meal_types(vec![Breakfast, Lunch])
            .with_tags(&["quick", "healthy", "trendy"]),
        MealPattern::new("mediterranean-chicken-salad", "Mediterranean Chicken Salad")
            .with_description("Fresh, hearty salad with lemon-herb chicken and homemade dressing")
            .with_required(vec![
                IngredientSlot::specific("protein", &["Chicken breast", "Chicken thighs", "Chicken"]),
                IngredientSlot::specific("greens", &["Kale", "Spinach", "Mixed greens"]),
            ])
            .with_flexible(vec![
                IngredientSlot::specific(
                    "vegetables",
                    &["Red onion", "Onions", "Cucumber", "Cherry tomatoes", "Tomatoes", "Bell peppers"],
                )
                .optional(),
                IngredientSlot::specific("cheese", &["Goat cheese", "Feta cheese"]).optional(),
            ])
            .with_upgrades(vec![
                IngredientSlot::specific("olives", &["Olives", "Kalamata olives"]).optional(),
                IngredientSlot::specific("nuts", &["Pine nuts", "Almonds", "Walnuts"]).optional(),
            ])
            .with_components(vec![
                MealComponent {
                    name: "Lemon-Dijon Dressing".to_string(),
                    slots: vec![
                        IngredientSlot::specific("citrus", &["Lemons", "Lemon juice"]),
                        IngredientSlot::specific("mustard", &["Dijon mustard", "Mustard"]),
                        IngredientSlot::specific("garlic", &["Garlic"]),
                        IngredientSlot::specific("oil", &["Olive oil"]).optional(),
                        IngredientSlot::specific("sweetener", &["Honey"]).optional(),
                    ],
                },
                MealComponent {
                    name: "Herb Marinade".to_string(),
                    slots: vec![
                        IngredientSlot::specific("citrus", &["Lemons", "Lemon juice"]),
                        IngredientSlot::specific("garlic", &["Garlic"]),
                        IngredientSlot::specific(
                            "herbs",
                            &["Thyme", "Oregano", "Basil", "Dill", "Fresh herbs"],
                        ),
                        IngredientSlot::specific("oil", &["Olive oil"]).optional(),
                    ],
                },
            ])
            .with_meal_types(vec![Lunch, Dinner])
            .with_tags(&["healthy", "fresh", "mediterranean", "salad"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_items_table() {
        let items = common_items();
        assert!(items.len() > 50);
        assert!(items.iter().any(|i| i.name == "Chicken breast"));
        assert!(items.iter().any(|i| i.name == "Milk"));
    }

    #[test]
    fn test_spices_default_to_pantry() {
        for item in common_items()
            .iter()
            .filter(|i| i.category == IngredientCategory::Spice)
        {
            assert_eq!(item.default_location, StorageLocation::Pantry);
        }
    }

    #[test]
    fn test_default_patterns_have_meal_types() {
        for pattern in default_meal_patterns() {
            assert!(
                !pattern.meal_types.is_empty(),
                "pattern '{}' has no meal types",
                pattern.name
            );
        }
    }

    #[test]
    fn test_patterns_by_meal_type() {
        let breakfast = patterns_by_meal_type(MealType::Breakfast);
        assert!(breakfast.iter().any(|p| p.id == "eggs-toast"));
        assert!(!breakfast.iter().any(|p| p.id == "tacos"));
    }

    #[test]
    fn test_patterns_by_tag() {
        let quick = patterns_by_tag("quick");
        assert!(!quick.is_empty());
        assert!(quick.iter().all(|p| p.tags.contains(&"quick".to_string())));
    }

    #[test]
    fn test_component_pattern_present() {
        let salad = default_meal_patterns()
            .iter()
            .find(|p| p.id == "mediterranean-chicken-salad")
            .unwrap();
        assert_eq!(salad.components.len(), 2);
    }
}
