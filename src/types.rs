//! # Household Inventory Data Model
//!
//! This module defines the data structures shared by the meal-matching engine
//! and the voice-command pipeline: inventory items, meal patterns with their
//! ingredient slots, computed meal opportunities, and the parse-result shapes
//! produced by the voice interpreters.
//!
//! ## Core Concepts
//!
//! - **InventoryItem**: a food item the household has on hand
//! - **IngredientSlot**: a named role within a meal pattern, satisfied by
//!   specific item names or by accepted categories
//! - **MealPattern**: a template for a meal (not a recipe) built from
//!   required, flexible, and upgrade slots
//! - **MealOpportunity**: a computed, never-persisted pairing of a pattern
//!   with the items that satisfy it
//!
//! All types serialize with serde to the same JSON shape the sync endpoint
//! exchanges (camelCase fields, epoch-millisecond timestamps), so results can
//! be posted outbound without an adapter layer.
//!
//! ## Usage
//!
//! ```rust
//! use larder::types::{InventoryItem, IngredientCategory, StorageLocation, QuantityLevel};
//!
//! let eggs = InventoryItem::new("Eggs", IngredientCategory::Protein, StorageLocation::Fridge);
//! assert_eq!(eggs.quantity, QuantityLevel::Plenty);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of ingredient categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Fruit,
    Dairy,
    Grain,
    Condiment,
    Spice,
    Beverage,
    Frozen,
    Other,
}

/// Where an item is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
}

/// Coarse quantity level; the app tracks levels, not counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityLevel {
    Plenty,
    Some,
    Low,
}

/// Freshness state of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreshnessState {
    Fresh,
    Good,
    UseSoon,
    Bad,
}

impl FreshnessState {
    /// Whether this item should be used soon (drives the aging-item bonus)
    pub fn is_aging(&self) -> bool {
        matches!(self, FreshnessState::UseSoon | FreshnessState::Bad)
    }
}

/// How confident the household is that the item record is accurate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Sure,
    Unsure,
}

/// Effort required to cook a meal pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Minimal,
    Moderate,
    Involved,
}

/// Meal-of-day a pattern applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// A food item currently in household storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: IngredientCategory,
    pub location: StorageLocation,
    pub quantity: QuantityLevel,
    pub freshness: FreshnessState,
    pub confidence: ConfidenceLevel,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Create a new item with fresh defaults (plenty, fresh, sure)
    pub fn new(name: &str, category: IngredientCategory, location: StorageLocation) -> Self {
        let now = Utc::now();
        Self {
            id: format!("item-{}", now.timestamp_millis()),
            name: name.to_string(),
            category,
            location,
            quantity: QuantityLevel::Plenty,
            freshness: FreshnessState::Fresh,
            confidence: ConfidenceLevel::Sure,
            added_at: now,
            updated_at: now,
        }
    }

    /// Override the generated id
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Set the quantity level
    pub fn with_quantity(mut self, quantity: QuantityLevel) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the freshness state
    pub fn with_freshness(mut self, freshness: FreshnessState) -> Self {
        self.freshness = freshness;
        self
    }
}

/// A named role within a meal pattern (e.g., "protein", "greens")
///
/// A slot is satisfiable through `specific_items` (matched loosely by name)
/// or through `accepted_categories`; a slot carrying neither can never be
/// satisfied, which is a defined edge case rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSlot {
    pub role: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_categories: Vec<IngredientCategory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_items: Vec<String>,
    pub optional: bool,
}

impl IngredientSlot {
    /// Slot satisfied by specific item names
    pub fn specific(role: &str, items: &[&str]) -> Self {
        Self {
            role: role.to_string(),
            accepted_categories: Vec::new(),
            specific_items: items.iter().map(|s| s.to_string()).collect(),
            optional: false,
        }
    }

    /// Slot satisfied by any item of the accepted categories
    pub fn category(role: &str, categories: &[IngredientCategory]) -> Self {
        Self {
            role: role.to_string(),
            accepted_categories: categories.to_vec(),
            specific_items: Vec::new(),
            optional: false,
        }
    }

    /// Mark this slot optional
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A named sub-recipe within a pattern (dressing, marinade, sauce)
///
/// Components carry their own slots; their readiness is reported alongside
/// the opportunity and never folded into the top-level score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealComponent {
    pub name: String,
    pub slots: Vec<IngredientSlot>,
}

/// A template for a meal, not a recipe
///
/// Required slots must all be satisfied for the meal to be ready; each
/// satisfied flexible slot adds to the score; optional upgrades are cosmetic
/// and never scored. A pattern with zero required slots is trivially ready.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPattern {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required_slots: Vec<IngredientSlot>,
    pub flexible_slots: Vec<IngredientSlot>,
    pub optional_upgrades: Vec<IngredientSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<MealComponent>,
    pub effort: EffortLevel,
    pub meal_types: Vec<MealType>,
    pub tags: Vec<String>,
}

impl MealPattern {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            required_slots: Vec::new(),
            flexible_slots: Vec::new(),
            optional_upgrades: Vec::new(),
            components: Vec::new(),
            effort: EffortLevel::Moderate,
            meal_types: vec![MealType::Dinner],
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_required(mut self, slots: Vec<IngredientSlot>) -> Self {
        self.required_slots = slots;
        self
    }

    pub fn with_flexible(mut self, slots: Vec<IngredientSlot>) -> Self {
        self.flexible_slots = slots;
        self
    }

    pub fn with_upgrades(mut self, slots: Vec<IngredientSlot>) -> Self {
        self.optional_upgrades = slots;
        self
    }

    pub fn with_components(mut self, components: Vec<MealComponent>) -> Self {
        self.components = components;
        self
    }

    pub fn with_effort(mut self, effort: EffortLevel) -> Self {
        self.effort = effort;
        self
    }

    pub fn with_meal_types(mut self, meal_types: Vec<MealType>) -> Self {
        self.meal_types = meal_types;
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// How close a meal is to being cookable right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FrictionLevel {
    Ready,
    OneAway,
    NeedsShopping,
}

impl FrictionLevel {
    /// Sort rank: ready meals surface first, shopping-required last
    pub fn rank(&self) -> u8 {
        match self {
            FrictionLevel::Ready => 0,
            FrictionLevel::OneAway => 1,
            FrictionLevel::NeedsShopping => 2,
        }
    }
}

/// A slot paired with the inventory item chosen to satisfy it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotMatch {
    pub slot: IngredientSlot,
    pub item: InventoryItem,
}

/// Readiness of a single meal component against current inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub component: MealComponent,
    pub satisfied: Vec<SlotMatch>,
    pub missing: Vec<IngredientSlot>,
    pub ready: bool,
}

/// A computed meal possibility: pure function of (inventory, pattern)
///
/// Never persisted; recompute whenever inventory or patterns change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOpportunity {
    pub pattern: MealPattern,
    /// 0-100 integer score
    pub score: u8,
    pub satisfied: Vec<SlotMatch>,
    pub missing: Vec<IngredientSlot>,
    pub uses_aging_items: Vec<InventoryItem>,
    pub friction_level: FrictionLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_statuses: Option<Vec<ComponentStatus>>,
}

/// A derived shopping-list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrocerySuggestion {
    pub name: String,
    pub reason: String,
    pub enables_meals: Vec<String>,
}

/// Why a grocery item is on the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroceryPriority {
    Urgent,
    Replenish,
    Opportunity,
    Manual,
}

/// A persisted shopping-list item (owned by the excluded storage layer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub id: String,
    pub name: String,
    pub category: IngredientCategory,
    pub reason: String,
    pub priority: GroceryPriority,
    pub checked: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub added_at: DateTime<Utc>,
}

/// A record of a meal that was eaten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub id: String,
    /// ISO date string
    pub date: String,
    pub meal_type: MealType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inventory item ids used for the meal
    pub items_used: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// The complete shared household state, mirrored one-for-one by the sync
/// endpoint's request/response bodies. The core only reads `inventory` and
/// `meal_patterns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdState {
    pub inventory: Vec<InventoryItem>,
    pub grocery_list: Vec<GroceryItem>,
    pub meal_log: Vec<MealLog>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meal_patterns: Vec<MealPattern>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub household_name: Option<String>,
}

// =============================================================================
// Voice parse result shapes
// =============================================================================

/// Action extracted from a voice transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceIntent {
    AddItems,
    RemoveItems,
    CreatePattern,
    EditPattern,
    Unknown,
}

impl VoiceIntent {
    /// Whether this intent creates or edits a meal pattern
    pub fn is_pattern_intent(&self) -> bool {
        matches!(self, VoiceIntent::CreatePattern | VoiceIntent::EditPattern)
    }
}

/// A single item extracted by the keyword parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    pub name: String,
    pub category: IngredientCategory,
    pub location: StorageLocation,
    pub quantity: QuantityLevel,
    /// Per-item confidence in [0, 1]
    pub confidence: f32,
    pub ambiguous: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

/// Meal-pattern payload extracted by the keyword parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// For edit intents: which existing pattern to modify
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_ingredients: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_ingredients: Vec<String>,
}

/// Result of the keyword voice parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedVoiceInput {
    pub intent: VoiceIntent,
    /// Overall confidence in [0, 1]
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ParsedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<ParsedPattern>,
    /// Location mentioned generally in the phrase, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_location: Option<StorageLocation>,
    /// Original transcript text, preserved verbatim
    pub raw: String,
}

/// A validated item from the LLM parse path (or bridged from the keyword path)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmParsedItem {
    pub name: String,
    pub matched_known_item: Option<String>,
    pub category: IngredientCategory,
    pub location: StorageLocation,
    pub quantity: QuantityLevel,
    pub confidence: f32,
    pub possible_duplicate: bool,
    pub duplicate_item_id: Option<String>,
    pub reasoning: String,
    pub location_overridden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_location: Option<StorageLocation>,
}

/// A validated meal-pattern payload from the LLM parse path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmParsedPattern {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_existing_pattern: Option<String>,
    pub ingredients: Vec<String>,
    pub effort: EffortLevel,
    pub meal_types: Vec<MealType>,
}

/// The unified voice-parse result, regardless of which parser produced it
///
/// The LLM validator and the keyword-fallback bridge both emit this shape, so
/// downstream code handles one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmParseResult {
    pub intent: VoiceIntent,
    pub confidence: f32,
    pub items: Vec<LlmParsedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<LlmParsedPattern>,
    pub extracted_location: Option<StorageLocation>,
    pub warnings: Vec<String>,
    /// Original transcript, re-attached by the caller after validation
    pub raw: String,
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}, {:?})", self.name, self.location, self.quantity)
    }
}
