//! # Grocery Suggestion Derivation
//!
//! Scans the ranked meal opportunities for near-miss patterns (one missing
//! ingredient) and the inventory for low-stock items, and proposes
//! shopping-list candidates. Suggestions tied to more meals surface first.

use crate::matching::calculate_opportunities;
use crate::types::{FrictionLevel, GrocerySuggestion, InventoryItem, MealPattern, QuantityLevel};
use log::debug;
use std::cmp::Reverse;

/// Derive shopping-list suggestions from inventory and meal patterns
///
/// Each missing slot of a one-away opportunity yields a candidate named after
/// the slot's first specific item (or "<role> item" for category slots).
/// A candidate enabling one meal reads "Would enable <pattern>"; one enabling
/// several reads "Would enable <N> meals". Inventory items running low are
/// appended with reason "Running low" unless already suggested.
pub fn derive_grocery_suggestions(
    inventory: &[InventoryItem],
    patterns: &[MealPattern],
) -> Vec<GrocerySuggestion> {
    let opportunities = calculate_opportunities(inventory, patterns);
    let mut suggestions: Vec<GrocerySuggestion> = Vec::new();

    for opportunity in &opportunities {
        if opportunity.friction_level != FrictionLevel::OneAway {
            continue;
        }
        for slot in &opportunity.missing {
            let name = slot
                .specific_items
                .first()
                .cloned()
                .unwrap_or_else(|| format!("{} item", slot.role));

            match suggestions.iter_mut().find(|s| s.name == name) {
                Some(existing) => {
                    if !existing.enables_meals.contains(&opportunity.pattern.name) {
                        existing.enables_meals.push(opportunity.pattern.name.clone());
                        existing.reason =
                            format!("Would enable {} meals", existing.enables_meals.len());
                    }
                }
                None => {
                    suggestions.push(GrocerySuggestion {
                        name,
                        reason: format!("Would enable {}", opportunity.pattern.name),
                        enables_meals: vec![opportunity.pattern.name.clone()],
                    });
                }
            }
        }
    }

    for item in inventory {
        if item.quantity == QuantityLevel::Low && !suggestions.iter().any(|s| s.name == item.name) {
            suggestions.push(GrocerySuggestion {
                name: item.name.clone(),
                reason: "Running low".to_string(),
                enables_meals: Vec::new(),
            });
        }
    }

    // Stable sort: meal-enabling suggestions first, ties keep insertion order
    suggestions.sort_by_key(|s| Reverse(s.enables_meals.len()));

    debug!(
        "Derived {} grocery suggestions from {} opportunities",
        suggestions.len(),
        opportunities.len()
    );
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IngredientCategory, IngredientSlot, StorageLocation};

    fn item(name: &str, category: IngredientCategory) -> InventoryItem {
        InventoryItem::new(name, category, StorageLocation::Fridge).with_id(&name.to_lowercase())
    }

    #[test]
    fn test_one_away_missing_slot_becomes_suggestion() {
        let inventory = vec![item("Eggs", IngredientCategory::Protein)];
        let patterns = vec![MealPattern::new("eggs-toast", "Eggs & Toast").with_required(vec![
            IngredientSlot::specific("eggs", &["Eggs"]),
            IngredientSlot::specific("bread", &["Bread"]),
        ])];

        let suggestions = derive_grocery_suggestions(&inventory, &patterns);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Bread");
        assert_eq!(suggestions[0].reason, "Would enable Eggs & Toast");
        assert_eq!(suggestions[0].enables_meals, vec!["Eggs & Toast"]);
    }

    #[test]
    fn test_category_slot_uses_role_name() {
        let inventory = vec![item("Rice", IngredientCategory::Grain)];
        let patterns = vec![MealPattern::new("bowl", "Grain Bowl").with_required(vec![
            IngredientSlot::specific("grain", &["Rice"]),
            IngredientSlot::category("protein", &[IngredientCategory::Protein]),
        ])];

        let suggestions = derive_grocery_suggestions(&inventory, &patterns);
        assert_eq!(suggestions[0].name, "protein item");
    }

    #[test]
    fn test_shared_missing_item_merges_and_counts() {
        let inventory = vec![item("Rice", IngredientCategory::Grain)];
        let patterns = vec![
            MealPattern::new("fried-rice", "Fried Rice").with_required(vec![
                IngredientSlot::specific("rice", &["Rice"]),
                IngredientSlot::specific("eggs", &["Eggs"]),
            ]),
            MealPattern::new("omelette-rice", "Omelette over Rice").with_required(vec![
                IngredientSlot::specific("rice", &["Rice"]),
                IngredientSlot::specific("eggs", &["Eggs"]),
            ]),
        ];

        let suggestions = derive_grocery_suggestions(&inventory, &patterns);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Eggs");
        assert_eq!(suggestions[0].reason, "Would enable 2 meals");
        assert_eq!(suggestions[0].enables_meals.len(), 2);
    }

    #[test]
    fn test_low_stock_items_appended() {
        let inventory = vec![
            item("Milk", IngredientCategory::Dairy).with_quantity(QuantityLevel::Low),
            item("Eggs", IngredientCategory::Protein),
        ];

        let suggestions = derive_grocery_suggestions(&inventory, &[]);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Milk");
        assert_eq!(suggestions[0].reason, "Running low");
        assert!(suggestions[0].enables_meals.is_empty());
    }

    #[test]
    fn test_first_specific_item_preferred_for_name() {
        let inventory = vec![item("Eggs", IngredientCategory::Protein)];
        let patterns = vec![MealPattern::new("toast", "Toast").with_required(vec![
            IngredientSlot::specific("eggs", &["Eggs"]),
            IngredientSlot::specific("bread", &["Sourdough", "Rye"]),
        ])];

        let suggestions = derive_grocery_suggestions(&inventory, &patterns);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Sourdough");
    }

    #[test]
    fn test_meal_enabling_sorts_before_running_low() {
        let inventory = vec![
            item("Milk", IngredientCategory::Dairy).with_quantity(QuantityLevel::Low),
            item("Eggs", IngredientCategory::Protein),
        ];
        let patterns = vec![MealPattern::new("eggs-toast", "Eggs & Toast").with_required(vec![
            IngredientSlot::specific("eggs", &["Eggs"]),
            IngredientSlot::specific("bread", &["Bread"]),
        ])];

        let suggestions = derive_grocery_suggestions(&inventory, &patterns);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].name, "Bread");
        assert_eq!(suggestions[1].name, "Milk");
    }

    #[test]
    fn test_ready_and_shopping_patterns_yield_nothing() {
        let inventory = vec![item("Eggs", IngredientCategory::Protein)];
        let patterns = vec![
            // Ready: nothing missing
            MealPattern::new("eggs", "Just Eggs")
                .with_required(vec![IngredientSlot::specific("eggs", &["Eggs"])]),
            // Two missing: needs shopping, not a near-miss
            MealPattern::new("salad", "Salad").with_required(vec![
                IngredientSlot::specific("greens", &["Spinach"]),
                IngredientSlot::specific("dressing", &["Olive oil"]),
            ]),
        ];

        let suggestions = derive_grocery_suggestions(&inventory, &patterns);
        assert!(suggestions.is_empty());
    }
}
