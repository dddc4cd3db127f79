//! # LLM Response Validation
//!
//! Strict sanitizer for the JSON a language model returns when asked to
//! interpret a voice transcript. The contract is reject-don't-throw: any
//! malformed input collapses to `None`, which tells the caller to fall back
//! to the deterministic [`crate::keyword_parser`]. Individually broken items
//! are skipped rather than failing the whole response.
//!
//! The fallback bridge at the bottom converts a keyword-parser result into
//! the same [`LlmParseResult`] shape, so downstream code handles a single
//! contract no matter which path produced it.

use crate::catalog::common_items;
use crate::keyword_parser::KeywordParser;
use crate::types::{
    EffortLevel, IngredientCategory, InventoryItem, LlmParseResult, LlmParsedItem,
    LlmParsedPattern, MealType, ParsedVoiceInput, QuantityLevel, StorageLocation, VoiceIntent,
};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

lazy_static! {
    static ref CODE_FENCE_RE: Regex =
        Regex::new(r"```(?:json)?\s*([\s\S]*?)```").expect("code-fence pattern is valid");
}

/// System prompt framing the model as a kitchen inventory assistant
pub const LLM_SYSTEM_PROMPT: &str = r#"You are a kitchen inventory assistant for a fridge-mounted household terminal. Parse voice commands about food items and meal recipes.

RULES:
1. Extract the primary action: "add_items" (putting items into storage), "remove_items" (using/discarding items), "create_pattern" (saving a new meal recipe), "edit_pattern" (changing an existing recipe), or "unknown"
2. Extract ALL food items mentioned, even if grammar is imperfect or items are listed without commas
3. For each item, determine:
   - name: Canonical name (e.g., "Chicken breast" not "some chicken")
   - matchedKnownItem: If it matches a known item, use that exact name; otherwise null
   - category: protein | vegetable | fruit | dairy | grain | condiment | spice | beverage | frozen | other
   - location: fridge | freezer | pantry (infer from item type using typical storage, NOT what user says if incorrect)
   - quantity: plenty | some | low (default: "plenty" for adds, infer from context)
   - confidence: 0.0-1.0 (how certain you are about this extraction)
   - possibleDuplicate: true if item appears to already exist in the provided inventory
   - duplicateItemId: the ID of the existing inventory item if duplicate, otherwise null
   - reasoning: brief explanation of your decisions (especially for location overrides or duplicates)
   - locationOverridden: true if you changed location from what user said to what's typical
   - originalLocation: only set if locationOverridden is true, the location user requested
4. Use KNOWN ITEMS list for matching - prefer exact matches when possible
5. For items not in known list, infer category and typical location based on food type
6. Handle natural speech patterns like "milk eggs cumin and apples" or "some chicken, rice"
7. Spices ALWAYS go in pantry, dairy ALWAYS in fridge, frozen items ALWAYS in freezer
8. For recipe commands, fill the pattern object with the recipe name and ingredient list

OUTPUT FORMAT: Valid JSON only, no markdown, no explanation outside JSON."#;

/// Serialized wire name of an enum value ("dairy", "fridge", ...)
fn wire_name<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Build the per-request user prompt: known items, current inventory, the
/// transcript, and the exact response schema
pub fn build_user_prompt(transcription: &str, current_inventory: &[InventoryItem]) -> String {
    let known_items_list = common_items()
        .iter()
        .map(|item| {
            format!(
                "- {} ({}, typically {})",
                item.name,
                wire_name(&item.category),
                wire_name(&item.default_location)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let inventory_list = if current_inventory.is_empty() {
        "(empty)".to_string()
    } else {
        current_inventory
            .iter()
            .map(|item| {
                format!(
                    "- {} (id: {}, {}, {})",
                    item.name,
                    item.id,
                    wire_name(&item.location),
                    wire_name(&item.quantity)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"KNOWN ITEMS (with default locations):
{known_items_list}

CURRENT INVENTORY:
{inventory_list}

VOICE INPUT: "{transcription}"

Parse this and return JSON matching this exact schema:
{{
  "intent": "add_items" | "remove_items" | "create_pattern" | "edit_pattern" | "unknown",
  "confidence": number between 0 and 1,
  "items": [
    {{
      "name": "string - canonical item name",
      "matchedKnownItem": "string or null - exact name from known items if matched",
      "category": "protein|vegetable|fruit|dairy|grain|condiment|spice|beverage|frozen|other",
      "location": "fridge|freezer|pantry",
      "quantity": "plenty|some|low",
      "confidence": number between 0 and 1,
      "possibleDuplicate": boolean,
      "duplicateItemId": "string or null",
      "reasoning": "string explaining your decisions",
      "locationOverridden": boolean,
      "originalLocation": "fridge|freezer|pantry or null if not overridden"
    }}
  ],
  "pattern": {{
    "name": "string - recipe name, only for create_pattern/edit_pattern",
    "matchedExistingPattern": "string or null",
    "ingredients": ["array of ingredient names"],
    "effort": "minimal|moderate|involved",
    "mealTypes": ["breakfast|lunch|dinner|snack"]
  }} or null,
  "extractedLocation": "fridge|freezer|pantry or null if not specified",
  "warnings": ["array of strings for any issues or notes"]
}}"#
    )
}

fn enum_field<T: DeserializeOwned>(value: Option<&Value>) -> Option<T> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

/// Validate and normalize a decoded model response
///
/// Returns `None` when the top-level shape is unusable: not an object,
/// intent outside the closed set, confidence missing or outside [0, 1], or
/// `items` absent. Everything below that degrades per field instead.
///
/// The `raw` transcript field comes back empty; the caller re-attaches it.
pub fn validate_llm_response(response: &Value) -> Option<LlmParseResult> {
    let data = response.as_object()?;

    let intent: VoiceIntent = enum_field(data.get("intent"))?;
    let confidence = data.get("confidence")?.as_f64()?;
    if !(0.0..=1.0).contains(&confidence) {
        return None;
    }
    let raw_items = data.get("items")?.as_array()?;

    let mut items = Vec::new();
    for entry in raw_items {
        let Some(item) = entry.as_object() else {
            continue;
        };
        // Name is the only hard requirement per item
        let Some(name) = item.get("name").and_then(Value::as_str) else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let item_confidence = item
            .get("confidence")
            .and_then(Value::as_f64)
            .map(|c| c.clamp(0.0, 1.0) as f32)
            .unwrap_or(0.5);

        items.push(LlmParsedItem {
            name: name.to_string(),
            matched_known_item: string_field(item.get("matchedKnownItem")),
            category: enum_field(item.get("category")).unwrap_or(IngredientCategory::Other),
            location: enum_field(item.get("location")).unwrap_or(StorageLocation::Fridge),
            quantity: enum_field(item.get("quantity")).unwrap_or(QuantityLevel::Plenty),
            confidence: item_confidence,
            possible_duplicate: item.get("possibleDuplicate") == Some(&Value::Bool(true)),
            duplicate_item_id: string_field(item.get("duplicateItemId")),
            reasoning: string_field(item.get("reasoning")).unwrap_or_default(),
            location_overridden: item.get("locationOverridden") == Some(&Value::Bool(true)),
            original_location: enum_field(item.get("originalLocation")),
        });
    }

    let pattern = if intent.is_pattern_intent() {
        validate_pattern(data.get("pattern"))
    } else {
        None
    };

    let warnings = data
        .get("warnings")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|w| w.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Some(LlmParseResult {
        intent,
        confidence: confidence as f32,
        items,
        pattern,
        extracted_location: enum_field(data.get("extractedLocation")),
        warnings,
        raw: String::new(),
    })
}

/// Validate the pattern payload; a pattern without a usable name is dropped
fn validate_pattern(value: Option<&Value>) -> Option<LlmParsedPattern> {
    let pattern = value?.as_object()?;
    let name = pattern.get("name").and_then(Value::as_str)?.trim();
    if name.is_empty() {
        return None;
    }

    let ingredients = pattern
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    let mut meal_types: Vec<MealType> = pattern
        .get("mealTypes")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect()
        })
        .unwrap_or_default();
    // A pattern must apply to at least one meal type
    if meal_types.is_empty() {
        meal_types.push(MealType::Dinner);
    }

    Some(LlmParsedPattern {
        name: name.to_string(),
        matched_existing_pattern: string_field(pattern.get("matchedExistingPattern")),
        ingredients,
        effort: enum_field(pattern.get("effort")).unwrap_or(EffortLevel::Moderate),
        meal_types,
    })
}

/// Parse raw model text into a validated result
///
/// Strips an optional surrounding markdown code fence, JSON-decodes, and
/// delegates to [`validate_llm_response`]. Decode failure and validator
/// rejection both collapse to `None`.
pub fn parse_llm_response(response_text: &str, raw_transcription: &str) -> Option<LlmParseResult> {
    let trimmed = response_text.trim();
    let json_str = match CODE_FENCE_RE.captures(trimmed) {
        Some(caps) => caps[1].trim().to_string(),
        None => trimmed.to_string(),
    };

    let parsed: Value = match serde_json::from_str(&json_str) {
        Ok(value) => value,
        Err(err) => {
            warn!("LLM response was not valid JSON: {}", err);
            return None;
        }
    };

    let mut validated = validate_llm_response(&parsed)?;
    validated.raw = raw_transcription.to_string();
    debug!(
        "Validated LLM response: {:?} with {} items",
        validated.intent,
        validated.items.len()
    );
    Some(validated)
}

/// Convert a keyword-parser result into the unified result shape
///
/// Total function: any keyword result maps to a well-formed [`LlmParseResult`].
/// Duplicate flags come from a case-insensitive name match against the
/// current inventory. The keyword parser never infers typical storage, so
/// `location_overridden` is always false here.
pub fn convert_keyword_result(
    keyword_result: &ParsedVoiceInput,
    current_inventory: &[InventoryItem],
) -> LlmParseResult {
    let items: Vec<LlmParsedItem> = keyword_result
        .items
        .iter()
        .map(|item| {
            let duplicate = current_inventory
                .iter()
                .find(|inv| inv.name.eq_ignore_ascii_case(&item.name));

            LlmParsedItem {
                name: item.name.clone(),
                matched_known_item: if item.confidence >= 0.9 {
                    Some(item.name.clone())
                } else {
                    None
                },
                category: item.category,
                location: item.location,
                quantity: item.quantity,
                confidence: item.confidence,
                possible_duplicate: duplicate.is_some(),
                duplicate_item_id: duplicate.map(|inv| inv.id.clone()),
                reasoning: if item.ambiguous {
                    format!(
                        "Ambiguous match - alternatives: {}",
                        item.alternatives.join(", ")
                    )
                } else {
                    "Matched via keyword parser".to_string()
                },
                location_overridden: false,
                original_location: None,
            }
        })
        .collect();

    let pattern = if keyword_result.intent.is_pattern_intent() {
        keyword_result.pattern.as_ref().map(|p| LlmParsedPattern {
            name: p
                .name
                .clone()
                .or_else(|| p.target_pattern.clone())
                .unwrap_or_default(),
            matched_existing_pattern: p.target_pattern.clone(),
            ingredients: if p.add_ingredients.is_empty() {
                p.remove_ingredients.clone()
            } else {
                p.add_ingredients.clone()
            },
            // The keyword parser infers neither effort nor meal types
            effort: EffortLevel::Moderate,
            meal_types: vec![MealType::Dinner],
        })
    } else {
        None
    };

    let warnings = if keyword_result.confidence < 0.5 {
        vec!["Low confidence - parsed with fallback method".to_string()]
    } else {
        Vec::new()
    };

    LlmParseResult {
        intent: keyword_result.intent,
        confidence: keyword_result.confidence,
        items,
        pattern,
        extracted_location: keyword_result.extracted_location,
        warnings,
        raw: keyword_result.raw.clone(),
    }
}

/// Run the keyword parser and bridge its output into the unified shape
pub fn get_fallback_parse_result(
    transcription: &str,
    current_inventory: &[InventoryItem],
    recent_item_names: &[String],
) -> LlmParseResult {
    let keyword_result = KeywordParser::new().parse(transcription, recent_item_names);
    convert_keyword_result(&keyword_result, current_inventory)
}
