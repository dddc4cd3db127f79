//! # Meal Opportunity Matching
//!
//! The constraint-satisfaction core: decides which inventory items satisfy
//! which ingredient slots, scores every meal pattern against the current
//! inventory, and ranks the resulting opportunities by how close each meal is
//! to cookable.
//!
//! ## Scoring
//!
//! Each opportunity scores 0-100:
//!
//! - required slots contribute up to 60 points (60 flat when a pattern has
//!   no required slots, since it is trivially ready)
//! - flexible slots contribute up to 20 points (10 flat when none exist)
//! - a flat 20-point bonus applies when the meal would use at least one
//!   aging item (freshness `useSoon` or `bad`)
//!
//! Everything here is a pure function of its inputs: no I/O, no state between
//! calls, identical inputs always produce identical output.

use crate::types::{
    ComponentStatus, FrictionLevel, IngredientSlot, InventoryItem, MealComponent, MealOpportunity,
    MealPattern, SlotMatch,
};
use log::{debug, trace};
use std::cmp::Reverse;

/// Check whether a single inventory item satisfies a single slot
///
/// Specific item names win over categories and match by case-insensitive
/// substring in either direction, so "Chicken" satisfies a slot listing
/// "Chicken breast" and vice versa. A slot with neither specific items nor
/// accepted categories can never be satisfied.
pub fn item_satisfies_slot(item: &InventoryItem, slot: &IngredientSlot) -> bool {
    if !slot.specific_items.is_empty() {
        let item_name = item.name.to_lowercase();
        return slot.specific_items.iter().any(|name| {
            let slot_name = name.to_lowercase();
            item_name.contains(&slot_name) || slot_name.contains(&item_name)
        });
    }

    if !slot.accepted_categories.is_empty() {
        return slot.accepted_categories.contains(&item.category);
    }

    false
}

/// All inventory items satisfying a slot, in inventory order
pub fn find_items_for_slot<'a>(
    slot: &IngredientSlot,
    inventory: &'a [InventoryItem],
) -> Vec<&'a InventoryItem> {
    inventory
        .iter()
        .filter(|item| item_satisfies_slot(item, slot))
        .collect()
}

/// Items that should be used soon
pub fn get_aging_items(inventory: &[InventoryItem]) -> Vec<&InventoryItem> {
    inventory.iter().filter(|i| i.freshness.is_aging()).collect()
}

/// Compute the 0-100 opportunity score
fn calculate_score(
    satisfied_required: usize,
    total_required: usize,
    satisfied_flexible: usize,
    total_flexible: usize,
    uses_aging_items: bool,
) -> u8 {
    let required_score = if total_required > 0 {
        (satisfied_required as f64 / total_required as f64) * 60.0
    } else {
        60.0
    };

    let flexible_score = if total_flexible > 0 {
        (satisfied_flexible as f64 / total_flexible as f64) * 20.0
    } else {
        10.0
    };

    let aging_bonus = if uses_aging_items { 20.0 } else { 0.0 };

    (required_score + flexible_score + aging_bonus).round() as u8
}

/// Classify how close a pattern is to cookable
fn friction_level(satisfied_required: usize, total_required: usize) -> FrictionLevel {
    if satisfied_required == total_required {
        FrictionLevel::Ready
    } else if total_required - satisfied_required == 1 {
        FrictionLevel::OneAway
    } else {
        FrictionLevel::NeedsShopping
    }
}

/// Readiness of a single sub-component (dressing, marinade, sauce)
///
/// Component slots have no required/flexible split: every non-optional slot
/// must be satisfied for the component to be ready. Component readiness never
/// feeds the top-level score.
fn calculate_component_status(
    component: &MealComponent,
    inventory: &[InventoryItem],
) -> ComponentStatus {
    let mut satisfied = Vec::new();
    let mut missing = Vec::new();

    for slot in &component.slots {
        let matches = find_items_for_slot(slot, inventory);
        if let Some(first) = matches.first() {
            satisfied.push(SlotMatch {
                slot: slot.clone(),
                item: (*first).clone(),
            });
        } else if !slot.optional {
            missing.push(slot.clone());
        }
    }

    let ready = missing.is_empty();
    ComponentStatus {
        component: component.clone(),
        satisfied,
        missing,
        ready,
    }
}

/// Pick a satisfying item for a slot, preferring aging items, and record it
fn select_for_slot(
    slot: &IngredientSlot,
    candidates: &[&InventoryItem],
    aging: &[&InventoryItem],
    satisfied: &mut Vec<SlotMatch>,
    uses_aging: &mut Vec<InventoryItem>,
) {
    let aging_match = candidates
        .iter()
        .find(|c| aging.iter().any(|a| a.id == c.id));
    let selected = aging_match.copied().unwrap_or(candidates[0]);

    satisfied.push(SlotMatch {
        slot: slot.clone(),
        item: selected.clone(),
    });

    if let Some(aging_item) = aging_match {
        if !uses_aging.iter().any(|i| i.id == aging_item.id) {
            uses_aging.push((*aging_item).clone());
        }
    }
}

/// Compute and rank meal opportunities for every pattern
///
/// The result is sorted by friction tier (`ready` < `oneAway` <
/// `needsShopping`), then by score descending; ties keep the original pattern
/// order. Calling this twice with unchanged inputs yields identical output.
pub fn calculate_opportunities(
    inventory: &[InventoryItem],
    patterns: &[MealPattern],
) -> Vec<MealOpportunity> {
    let aging = get_aging_items(inventory);
    debug!(
        "Calculating opportunities: {} items ({} aging), {} patterns",
        inventory.len(),
        aging.len(),
        patterns.len()
    );

    let mut opportunities = Vec::with_capacity(patterns.len());

    for pattern in patterns {
        let mut satisfied = Vec::new();
        let mut missing = Vec::new();
        let mut uses_aging = Vec::new();

        for slot in &pattern.required_slots {
            let candidates = find_items_for_slot(slot, inventory);
            if candidates.is_empty() {
                if !slot.optional {
                    missing.push(slot.clone());
                }
            } else {
                select_for_slot(slot, &candidates, &aging, &mut satisfied, &mut uses_aging);
            }
        }

        let mut flexible_satisfied = 0;
        for slot in &pattern.flexible_slots {
            let candidates = find_items_for_slot(slot, inventory);
            if !candidates.is_empty() {
                flexible_satisfied += 1;
                select_for_slot(slot, &candidates, &aging, &mut satisfied, &mut uses_aging);
            }
        }

        let satisfied_required = pattern.required_slots.len() - missing.len();
        let score = calculate_score(
            satisfied_required,
            pattern.required_slots.len(),
            flexible_satisfied,
            pattern.flexible_slots.len(),
            !uses_aging.is_empty(),
        );
        let friction = friction_level(satisfied_required, pattern.required_slots.len());

        let component_statuses = if pattern.components.is_empty() {
            None
        } else {
            Some(
                pattern
                    .components
                    .iter()
                    .map(|c| calculate_component_status(c, inventory))
                    .collect(),
            )
        };

        trace!(
            "Pattern '{}': score {}, friction {:?}, {} missing",
            pattern.name,
            score,
            friction,
            missing.len()
        );

        opportunities.push(MealOpportunity {
            pattern: pattern.clone(),
            score,
            satisfied,
            missing,
            uses_aging_items: uses_aging,
            friction_level: friction,
            component_statuses,
        });
    }

    // Stable sort: friction tier first, then score descending
    opportunities.sort_by_key(|o| (o.friction_level.rank(), Reverse(o.score)));
    opportunities
}

/// Meals that are ready to make now
pub fn get_ready_meals(
    inventory: &[InventoryItem],
    patterns: &[MealPattern],
) -> Vec<MealOpportunity> {
    calculate_opportunities(inventory, patterns)
        .into_iter()
        .filter(|o| o.friction_level == FrictionLevel::Ready)
        .collect()
}

/// Meals that are exactly one ingredient away
pub fn get_almost_ready(
    inventory: &[InventoryItem],
    patterns: &[MealPattern],
) -> Vec<MealOpportunity> {
    calculate_opportunities(inventory, patterns)
        .into_iter()
        .filter(|o| o.friction_level == FrictionLevel::OneAway)
        .collect()
}

/// Meals that would use up aging items, most aging items first
pub fn get_meals_that_use_aging_items(
    inventory: &[InventoryItem],
    patterns: &[MealPattern],
) -> Vec<MealOpportunity> {
    let mut meals: Vec<MealOpportunity> = calculate_opportunities(inventory, patterns)
        .into_iter()
        .filter(|o| {
            !o.uses_aging_items.is_empty() && o.friction_level != FrictionLevel::NeedsShopping
        })
        .collect();
    meals.sort_by_key(|o| Reverse(o.uses_aging_items.len()));
    meals
}

/// Top suggestions for the home screen, capped at five
///
/// Order: ready meals that use aging items, then other ready meals, then
/// almost-ready meals that use aging items.
pub fn get_top_suggestions(
    inventory: &[InventoryItem],
    patterns: &[MealPattern],
) -> Vec<MealOpportunity> {
    let opportunities = calculate_opportunities(inventory, patterns);

    let mut suggestions: Vec<MealOpportunity> = Vec::new();
    suggestions.extend(
        opportunities
            .iter()
            .filter(|o| o.friction_level == FrictionLevel::Ready && !o.uses_aging_items.is_empty())
            .cloned(),
    );
    suggestions.extend(
        opportunities
            .iter()
            .filter(|o| o.friction_level == FrictionLevel::Ready && o.uses_aging_items.is_empty())
            .cloned(),
    );
    suggestions.extend(
        opportunities
            .iter()
            .filter(|o| {
                o.friction_level == FrictionLevel::OneAway && !o.uses_aging_items.is_empty()
            })
            .cloned(),
    );
    suggestions.truncate(5);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        FreshnessState, IngredientCategory, QuantityLevel, StorageLocation,
    };

    fn item(name: &str, category: IngredientCategory, location: StorageLocation) -> InventoryItem {
        InventoryItem::new(name, category, location).with_id(&name.to_lowercase())
    }

    fn eggs_and_toast() -> MealPattern {
        MealPattern::new("eggs-toast", "Eggs & Toast")
            .with_required(vec![
                IngredientSlot::specific("eggs", &["Eggs"]),
                IngredientSlot::specific("bread", &["Bread"]),
            ])
            .with_flexible(vec![
                IngredientSlot::category("cheese", &[IngredientCategory::Dairy]).optional(),
            ])
    }

    #[test]
    fn test_slot_match_specific_bidirectional() {
        let slot = IngredientSlot::specific("protein", &["Chicken breast"]);

        // Item name contained in slot name
        let chicken = item("Chicken", IngredientCategory::Protein, StorageLocation::Fridge);
        assert!(item_satisfies_slot(&chicken, &slot));

        // Slot name contained in item name
        let thighs = item(
            "Chicken breast thighs",
            IngredientCategory::Protein,
            StorageLocation::Fridge,
        );
        assert!(item_satisfies_slot(&thighs, &slot));

        let beef = item("Ground beef", IngredientCategory::Protein, StorageLocation::Fridge);
        assert!(!item_satisfies_slot(&beef, &slot));
    }

    #[test]
    fn test_slot_match_case_insensitive() {
        let slot = IngredientSlot::specific("eggs", &["eggs"]);
        let item = item("EGGS", IngredientCategory::Protein, StorageLocation::Fridge);
        assert!(item_satisfies_slot(&item, &slot));
    }

    #[test]
    fn test_slot_match_by_category() {
        let slot = IngredientSlot::category("vegetables", &[IngredientCategory::Vegetable]);
        let spinach = item("Spinach", IngredientCategory::Vegetable, StorageLocation::Fridge);
        let milk = item("Milk", IngredientCategory::Dairy, StorageLocation::Fridge);

        assert!(item_satisfies_slot(&spinach, &slot));
        assert!(!item_satisfies_slot(&milk, &slot));
    }

    #[test]
    fn test_specific_items_win_over_categories() {
        // When both constraints are present, specific items decide alone
        let mut slot = IngredientSlot::specific("protein", &["Tofu"]);
        slot.accepted_categories = vec![IngredientCategory::Protein];

        let chicken = item("Chicken", IngredientCategory::Protein, StorageLocation::Fridge);
        assert!(!item_satisfies_slot(&chicken, &slot));
    }

    #[test]
    fn test_unconstrained_slot_never_satisfied() {
        let slot = IngredientSlot {
            role: "mystery".to_string(),
            accepted_categories: Vec::new(),
            specific_items: Vec::new(),
            optional: false,
        };
        let anything = item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge);
        assert!(!item_satisfies_slot(&anything, &slot));
    }

    #[test]
    fn test_find_items_preserves_inventory_order() {
        let inventory = vec![
            item("Spinach", IngredientCategory::Vegetable, StorageLocation::Fridge),
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Broccoli", IngredientCategory::Vegetable, StorageLocation::Fridge),
        ];
        let slot = IngredientSlot::category("veg", &[IngredientCategory::Vegetable]);

        let found = find_items_for_slot(&slot, &inventory);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name, "Spinach");
        assert_eq!(found[1].name, "Broccoli");
    }

    #[test]
    fn test_ready_meal_score() {
        // Both required satisfied, flexible unsatisfied, no aging:
        // 60 + 0 + 0 = 60 with the dairy slot empty
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry),
        ];
        let opportunities = calculate_opportunities(&inventory, &[eggs_and_toast()]);

        assert_eq!(opportunities.len(), 1);
        let opp = &opportunities[0];
        assert_eq!(opp.friction_level, FrictionLevel::Ready);
        assert_eq!(opp.score, 60);
        assert!(opp.missing.is_empty());
    }

    #[test]
    fn test_one_away() {
        let inventory = vec![item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge)];
        let opportunities = calculate_opportunities(&inventory, &[eggs_and_toast()]);

        let opp = &opportunities[0];
        assert_eq!(opp.friction_level, FrictionLevel::OneAway);
        assert_eq!(opp.missing.len(), 1);
        assert_eq!(opp.missing[0].role, "bread");
    }

    #[test]
    fn test_needs_shopping() {
        let inventory = vec![item("Milk", IngredientCategory::Dairy, StorageLocation::Fridge)];
        let opportunities = calculate_opportunities(&inventory, &[eggs_and_toast()]);
        assert_eq!(opportunities[0].friction_level, FrictionLevel::NeedsShopping);
    }

    #[test]
    fn test_zero_required_slots_trivially_ready() {
        let pattern = MealPattern::new("anything", "Anything Goes");
        let opportunities = calculate_opportunities(&[], &[pattern]);

        let opp = &opportunities[0];
        assert_eq!(opp.friction_level, FrictionLevel::Ready);
        // 60 flat required + 10 flat flexible
        assert_eq!(opp.score, 70);
    }

    #[test]
    fn test_aging_item_preferred_and_bonus_applied() {
        let fresh_eggs = item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge);
        let aging_bread = item("Bread", IngredientCategory::Grain, StorageLocation::Pantry)
            .with_freshness(FreshnessState::UseSoon);
        let inventory = vec![fresh_eggs, aging_bread];

        let opportunities = calculate_opportunities(&inventory, &[eggs_and_toast()]);
        let opp = &opportunities[0];

        assert_eq!(opp.uses_aging_items.len(), 1);
        assert_eq!(opp.uses_aging_items[0].name, "Bread");
        // 60 required + 0 flexible + 20 aging
        assert_eq!(opp.score, 80);
    }

    #[test]
    fn test_aging_candidate_beats_inventory_order() {
        // Two satisfying items; the later aging one must be selected
        let inventory = vec![
            item("Chicken breast", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Tofu", IngredientCategory::Protein, StorageLocation::Fridge)
                .with_freshness(FreshnessState::UseSoon),
        ];
        let pattern = MealPattern::new("protein", "Protein Plate").with_required(vec![
            IngredientSlot::category("protein", &[IngredientCategory::Protein]),
        ]);

        let opportunities = calculate_opportunities(&inventory, &[pattern]);
        let opp = &opportunities[0];
        assert_eq!(opp.satisfied[0].item.name, "Tofu");
        assert_eq!(opp.uses_aging_items[0].name, "Tofu");
    }

    #[test]
    fn test_aging_set_no_duplicates() {
        // Same aging item satisfies a required and a flexible slot
        let aging_spinach = item("Spinach", IngredientCategory::Vegetable, StorageLocation::Fridge)
            .with_freshness(FreshnessState::Bad);
        let pattern = MealPattern::new("greens", "Greens")
            .with_required(vec![IngredientSlot::specific("greens", &["Spinach"])])
            .with_flexible(vec![
                IngredientSlot::category("veg", &[IngredientCategory::Vegetable]).optional(),
            ]);

        let opportunities = calculate_opportunities(&[aging_spinach], &[pattern]);
        assert_eq!(opportunities[0].uses_aging_items.len(), 1);
    }

    #[test]
    fn test_max_score_is_100() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry),
            item("Cheddar cheese", IngredientCategory::Dairy, StorageLocation::Fridge)
                .with_freshness(FreshnessState::UseSoon),
        ];
        let opportunities = calculate_opportunities(&inventory, &[eggs_and_toast()]);
        // 60 + 20 + 20
        assert_eq!(opportunities[0].score, 100);
    }

    #[test]
    fn test_ranking_friction_then_score() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry),
        ];
        let ready = eggs_and_toast();
        let one_away = MealPattern::new("fried-rice", "Fried Rice").with_required(vec![
            IngredientSlot::specific("rice", &["Rice"]),
            IngredientSlot::specific("eggs", &["Eggs"]),
        ]);
        let shopping = MealPattern::new("smoothie", "Smoothie").with_required(vec![
            IngredientSlot::category("fruit", &[IngredientCategory::Fruit]),
            IngredientSlot::specific("liquid", &["Milk"]),
        ]);

        // Deliberately unsorted input order
        let opportunities =
            calculate_opportunities(&inventory, &[shopping, one_away, ready]);

        assert_eq!(opportunities[0].friction_level, FrictionLevel::Ready);
        assert_eq!(opportunities[1].friction_level, FrictionLevel::OneAway);
        assert_eq!(opportunities[2].friction_level, FrictionLevel::NeedsShopping);
    }

    #[test]
    fn test_ranking_stable_on_ties() {
        let pattern_a = MealPattern::new("a", "Alpha");
        let pattern_b = MealPattern::new("b", "Beta");
        let opportunities = calculate_opportunities(&[], &[pattern_a, pattern_b]);

        // Identical friction and score: original pattern order retained
        assert_eq!(opportunities[0].pattern.id, "a");
        assert_eq!(opportunities[1].pattern.id, "b");
    }

    #[test]
    fn test_idempotent_derivation() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Spinach", IngredientCategory::Vegetable, StorageLocation::Fridge)
                .with_freshness(FreshnessState::UseSoon),
        ];
        let patterns = vec![eggs_and_toast()];

        let first = calculate_opportunities(&inventory, &patterns);
        let second = calculate_opportunities(&inventory, &patterns);
        assert_eq!(first, second);
    }

    #[test]
    fn test_component_readiness_reported_separately() {
        let inventory = vec![
            item("Chicken breast", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Spinach", IngredientCategory::Vegetable, StorageLocation::Fridge),
            item("Lemons", IngredientCategory::Fruit, StorageLocation::Fridge),
            item("Garlic", IngredientCategory::Vegetable, StorageLocation::Pantry),
        ];
        let pattern = MealPattern::new("salad", "Chicken Salad")
            .with_required(vec![
                IngredientSlot::specific("protein", &["Chicken breast"]),
                IngredientSlot::specific("greens", &["Spinach"]),
            ])
            .with_components(vec![MealComponent {
                name: "Dressing".to_string(),
                slots: vec![
                    IngredientSlot::specific("citrus", &["Lemons"]),
                    IngredientSlot::specific("mustard", &["Mustard"]),
                    IngredientSlot::specific("garlic", &["Garlic"]),
                ],
            }]);

        let opportunities = calculate_opportunities(&inventory, &[pattern]);
        let opp = &opportunities[0];

        // Top-level meal is ready even though the dressing is missing mustard
        assert_eq!(opp.friction_level, FrictionLevel::Ready);

        let statuses = opp.component_statuses.as_ref().unwrap();
        assert_eq!(statuses.len(), 1);
        assert!(!statuses[0].ready);
        assert_eq!(statuses[0].missing.len(), 1);
        assert_eq!(statuses[0].missing[0].role, "mustard");
    }

    #[test]
    fn test_component_optional_slot_does_not_block() {
        let inventory = vec![item("Lemons", IngredientCategory::Fruit, StorageLocation::Fridge)];
        let component = MealComponent {
            name: "Vinaigrette".to_string(),
            slots: vec![
                IngredientSlot::specific("citrus", &["Lemons"]),
                IngredientSlot::specific("oil", &["Olive oil"]).optional(),
            ],
        };
        let status = calculate_component_status(&component, &inventory);
        assert!(status.ready);
        assert_eq!(status.satisfied.len(), 1);
    }

    #[test]
    fn test_ready_and_almost_ready_views() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry),
        ];
        let patterns = vec![
            eggs_and_toast(),
            MealPattern::new("fried-rice", "Fried Rice").with_required(vec![
                IngredientSlot::specific("rice", &["Rice"]),
                IngredientSlot::specific("eggs", &["Eggs"]),
            ]),
        ];

        let ready = get_ready_meals(&inventory, &patterns);
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].pattern.id, "eggs-toast");

        let almost = get_almost_ready(&inventory, &patterns);
        assert_eq!(almost.len(), 1);
        assert_eq!(almost[0].pattern.id, "fried-rice");
    }

    #[test]
    fn test_aging_view_sorted_by_aging_count() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge)
                .with_freshness(FreshnessState::UseSoon),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry)
                .with_freshness(FreshnessState::UseSoon),
            item("Rice", IngredientCategory::Grain, StorageLocation::Pantry),
        ];
        let patterns = vec![
            MealPattern::new("rice-bowl", "Rice Bowl").with_required(vec![
                IngredientSlot::specific("rice", &["Rice"]),
                IngredientSlot::specific("eggs", &["Eggs"]),
            ]),
            eggs_and_toast(),
        ];

        let meals = get_meals_that_use_aging_items(&inventory, &patterns);
        assert_eq!(meals.len(), 2);
        // Eggs & Toast uses two aging items, Rice Bowl only one
        assert_eq!(meals[0].pattern.id, "eggs-toast");
        assert_eq!(meals[1].pattern.id, "rice-bowl");
    }

    #[test]
    fn test_top_suggestions_order_and_cap() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry)
                .with_freshness(FreshnessState::UseSoon),
            item("Rice", IngredientCategory::Grain, StorageLocation::Pantry),
        ];
        let patterns = vec![
            // Ready, no aging
            MealPattern::new("rice-plate", "Rice Plate")
                .with_required(vec![IngredientSlot::specific("rice", &["Rice"])]),
            // Ready, uses aging bread
            eggs_and_toast(),
            // One away, uses aging bread
            MealPattern::new("sandwich", "Sandwich").with_required(vec![
                IngredientSlot::specific("bread", &["Bread"]),
                IngredientSlot::specific("protein", &["Tofu"]),
            ]),
        ];

        let suggestions = get_top_suggestions(&inventory, &patterns);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].pattern.id, "eggs-toast");
        assert_eq!(suggestions[1].pattern.id, "rice-plate");
        assert_eq!(suggestions[2].pattern.id, "sandwich");
        assert!(suggestions.len() <= 5);
    }

    #[test]
    fn test_score_bounds_across_catalog() {
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge)
                .with_freshness(FreshnessState::UseSoon),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry),
            item("Spinach", IngredientCategory::Vegetable, StorageLocation::Fridge),
        ];
        for opp in calculate_opportunities(&inventory, crate::catalog::default_meal_patterns()) {
            assert!(opp.score <= 100);
        }
    }

    #[test]
    fn test_low_quantity_still_satisfies() {
        // Quantity level does not affect slot satisfaction
        let inventory = vec![
            item("Eggs", IngredientCategory::Protein, StorageLocation::Fridge)
                .with_quantity(QuantityLevel::Low),
            item("Bread", IngredientCategory::Grain, StorageLocation::Pantry),
        ];
        let opportunities = calculate_opportunities(&inventory, &[eggs_and_toast()]);
        assert_eq!(opportunities[0].friction_level, FrictionLevel::Ready);
    }
}
