//! # Keyword Voice Parser
//!
//! Rule-based intent detection and entity extraction over a raw voice
//! transcript. No ML: intents are scored from trigger-phrase tables, items
//! are matched against the known-item catalog, and everything degrades to a
//! defined low-confidence result instead of failing.
//!
//! This is the deterministic fallback behind the LLM parse path; callers
//! feed its output through the fallback bridge in [`crate::llm_validator`]
//! to get the unified result shape.
//!
//! ## Usage
//!
//! ```rust
//! use larder::keyword_parser::KeywordParser;
//! use larder::types::VoiceIntent;
//!
//! let parser = KeywordParser::new();
//! let result = parser.parse("add milk to the fridge", &[]);
//!
//! assert_eq!(result.intent, VoiceIntent::AddItems);
//! assert_eq!(result.items[0].name, "Milk");
//! ```

use crate::catalog::{common_items, CommonItem};
use crate::types::{
    IngredientCategory, ParsedItem, ParsedPattern, ParsedVoiceInput, QuantityLevel,
    StorageLocation, VoiceIntent,
};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use std::collections::HashSet;

// =============================================================================
// Trigger tables
// =============================================================================

const ADD_TRIGGERS: &[&str] = &[
    // Simple starts (checked with a start-of-sentence bonus)
    "add",
    "adding",
    // General add
    "bought",
    "picked up",
    "got",
    "added",
    "have",
    "restocked",
    "brought home",
    "just got",
    "grabbed",
    "stocked up on",
    "put",
    "putting",
    "store",
    "storing",
    // Location-specific add
    "add to fridge",
    "add to freezer",
    "add to pantry",
    "put in fridge",
    "put in freezer",
    "put in pantry",
    "putting in fridge",
    "putting in freezer",
    "putting in pantry",
    "store in fridge",
    "store in freezer",
    "store in pantry",
    "fridge has",
    "freezer has",
    "pantry has",
    "add to the fridge",
    "add to the freezer",
    "add to the pantry",
    "put in the fridge",
    "put in the freezer",
    "put in the pantry",
    "to the fridge",
    "to the freezer",
    "to the pantry",
    "to our fridge",
    "to our freezer",
    "to our pantry",
    "to my fridge",
    "to my freezer",
    "to my pantry",
    "in the fridge",
    "in the freezer",
    "in the pantry",
    "in our fridge",
    "in our freezer",
    "in our pantry",
];

const REMOVE_TRIGGERS: &[&str] = &[
    "used",
    "used up",
    "finished",
    "threw out",
    "tossed",
    "gone",
    "out of",
    "ran out",
    "expired",
    "bad",
    "eaten",
    "remove",
    "removing",
    "take out",
    "took out",
    "remove from fridge",
    "remove from freezer",
    "remove from pantry",
    "take out of fridge",
    "take out of freezer",
    "take out of pantry",
    "took from fridge",
    "took from freezer",
    "took from pantry",
    "grab from fridge",
    "grab from freezer",
    "grab from pantry",
    "remove from the fridge",
    "remove from the freezer",
    "remove from the pantry",
    "no more",
    "all out of",
    "none left",
    "ran out of",
];

const CREATE_PATTERN_TRIGGERS: &[&str] = &[
    "new recipe",
    "new meal",
    "add recipe",
    "add meal",
    "create recipe",
    "save recipe",
    "save meal",
    "create meal",
    "make a recipe",
    "make a new recipe",
    "new meal pattern",
];

const EDIT_PATTERN_TRIGGERS: &[&str] = &[
    "change recipe",
    "edit recipe",
    "update recipe",
    "modify recipe",
    "add to recipe",
    "remove from recipe",
    "change meal",
    "edit meal",
    "update meal",
    "modify meal",
    "change the recipe",
    "edit the recipe",
];

const PLENTY_PATTERNS: &[&str] = &[
    "a lot", "lots", "tons", "bunch", "big bag", "large", "full", "dozen", "gallon", "pack",
    "case", "box", "bag",
];

const SOME_PATTERNS: &[&str] = &["some", "a few", "couple", "a bit", "small", "half"];

const LOW_PATTERNS: &[&str] = &[
    "last",
    "almost out",
    "running low",
    "little bit",
    "nearly out",
    "just a little",
    "not much",
];

const FRIDGE_PATTERNS: &[&str] = &[
    "fridge",
    "refrigerator",
    "in the fridge",
    "to the fridge",
    "in fridge",
    "to fridge",
    "from fridge",
    "from the fridge",
];

const FREEZER_PATTERNS: &[&str] = &[
    "freezer",
    "frozen",
    "in the freezer",
    "to the freezer",
    "in freezer",
    "to freezer",
    "from freezer",
    "from the freezer",
];

const PANTRY_PATTERNS: &[&str] = &[
    "pantry",
    "cabinet",
    "cupboard",
    "shelf",
    "in the pantry",
    "to the pantry",
    "in pantry",
    "to pantry",
    "from pantry",
    "from the pantry",
];

const ADD_FIRST_WORDS: &[&str] = &["add", "adding", "put", "putting", "store"];
const REMOVE_FIRST_WORDS: &[&str] = &["remove", "removing", "used", "finished", "threw"];

lazy_static! {
    static ref PUNCTUATION_RE: Regex = Regex::new(r"[^\w\s]").expect("punctuation pattern is valid");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
    static ref ADD_LOCATION_RE: Regex =
        Regex::new(r"\b(to|in)\s+(the\s+|our\s+|my\s+)?(fridge|freezer|pantry)\b")
            .expect("add-location pattern is valid");
    static ref REMOVE_LOCATION_RE: Regex =
        Regex::new(r"\bfrom\s+(the\s+|our\s+|my\s+)?(fridge|freezer|pantry)\b")
            .expect("remove-location pattern is valid");
    static ref CALLED_RE: Regex = Regex::new(r"called\s+([^,]+)").expect("called pattern is valid");
    static ref NAMED_RE: Regex = Regex::new(r"named\s+([^,]+)").expect("named pattern is valid");
    static ref RECIPE_NAME_RE: Regex =
        Regex::new(r"recipe\s+(\w+(?:\s+\w+)?)").expect("recipe-name pattern is valid");
    static ref WITH_RE: Regex = Regex::new(r"with\s+(.+)").expect("with pattern is valid");
    static ref INGREDIENT_SPLIT_RE: Regex =
        Regex::new(r",|\sand\s").expect("ingredient-split pattern is valid");
    static ref TOKEN_SPLIT_RE: Regex = Regex::new(r"[\s,]+").expect("token-split pattern is valid");
    static ref STOP_WORDS: HashSet<&'static str> = [
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "as", "is", "was", "are", "were", "been", "be", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "shall", "can", "need",
        "dare", "ought", "used", "i", "we", "you", "he", "she", "it", "they", "me", "us", "him",
        "her", "them", "my", "our", "your", "his", "its", "their", "this", "that", "these",
        "those", "what", "which", "who", "whom", "whose", "where", "when", "why", "how", "all",
        "each", "every", "both", "few", "more", "most", "other", "some", "such", "no", "nor",
        "not", "only", "own", "same", "so", "than", "too", "very", "just", "also", "now", "here",
        "there", "then", "once", "already", "always", "up", "out", "into", "over", "after",
        "before", "under", "again", "further", "put", "get", "got", "take", "took",
    ]
    .into_iter()
    .collect();
    // Food-modifier words that would otherwise be filtered as stop words
    static ref KEEP_WORDS: HashSet<&'static str> = [
        "chicken", "ground", "greek", "bell", "cream", "ice", "frozen", "almond", "orange",
        "sweet", "black", "italian", "olive", "soy", "heavy", "feta", "cheddar",
    ]
    .into_iter()
    .collect();
}

/// Normalize text for matching: lowercase, strip punctuation, collapse whitespace
fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let no_punct = PUNCTUATION_RE.replace_all(&lowered, "");
    WHITESPACE_RE.replace_all(&no_punct, " ").trim().to_string()
}

/// Capitalize the first letter of each word
fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword-based voice parser over a known-item catalog
///
/// Pure and stateless: `parse` is a single pass over the transcript and is
/// safe to call concurrently.
pub struct KeywordParser {
    catalog: Vec<CommonItem>,
}

impl KeywordParser {
    /// Parser backed by the built-in common-item catalog
    pub fn new() -> Self {
        Self {
            catalog: common_items().to_vec(),
        }
    }

    /// Parser backed by a caller-supplied catalog
    pub fn with_catalog(catalog: Vec<CommonItem>) -> Self {
        Self { catalog }
    }

    /// Parse a voice transcript into intent, items, and other entities
    ///
    /// `recent_item_names` biases ambiguous matches toward items the
    /// household touched recently. The original transcript is preserved
    /// verbatim in the result's `raw` field.
    pub fn parse(&self, text: &str, recent_item_names: &[String]) -> ParsedVoiceInput {
        let normalized = normalize(text);
        let (intent, mut confidence) = detect_intent(&normalized);
        let extracted_location = extract_location(&normalized);

        debug!(
            "Keyword parse: intent {:?} (confidence {:.2}), location {:?}",
            intent, confidence, extracted_location
        );

        let mut items = Vec::new();
        let mut pattern = None;

        match intent {
            VoiceIntent::AddItems | VoiceIntent::RemoveItems => {
                let names = self.extract_item_names(&normalized);
                let quantity = extract_quantity(&normalized);

                items = names
                    .iter()
                    .map(|name| {
                        let mut parsed = self.match_item(name, recent_item_names);
                        parsed.quantity = if intent == VoiceIntent::RemoveItems {
                            QuantityLevel::Low
                        } else {
                            quantity
                        };
                        if let Some(location) = extracted_location {
                            parsed.location = location;
                        }
                        parsed
                    })
                    .collect();

                if items.is_empty() {
                    confidence = confidence.min(0.4);
                } else {
                    let avg: f32 =
                        items.iter().map(|i| i.confidence).sum::<f32>() / items.len() as f32;
                    confidence = (confidence + avg) / 2.0;
                }
            }
            VoiceIntent::CreatePattern => {
                let name = self.extract_pattern_name(&normalized);
                let ingredients = self.extract_pattern_ingredients(&normalized);

                if name.is_none() {
                    confidence = confidence.min(0.5);
                }
                pattern = Some(ParsedPattern {
                    name,
                    target_pattern: None,
                    add_ingredients: ingredients,
                    remove_ingredients: Vec::new(),
                });
            }
            VoiceIntent::EditPattern => {
                let target = self.extract_pattern_name(&normalized);
                let ingredients = self.extract_pattern_ingredients(&normalized);
                let is_remove =
                    normalized.contains("remove from") || normalized.contains("take out");

                pattern = Some(if is_remove {
                    ParsedPattern {
                        name: None,
                        target_pattern: target,
                        add_ingredients: Vec::new(),
                        remove_ingredients: ingredients,
                    }
                } else {
                    ParsedPattern {
                        name: None,
                        target_pattern: target,
                        add_ingredients: ingredients,
                        remove_ingredients: Vec::new(),
                    }
                });
            }
            VoiceIntent::Unknown => {
                // Still attempt extraction: an unrecognized utterance that
                // yields items is useful to the caller
                let names = self.extract_item_names(&normalized);
                items = names
                    .iter()
                    .map(|name| self.match_item(name, recent_item_names))
                    .collect();
            }
        }

        ParsedVoiceInput {
            intent,
            confidence,
            items,
            pattern,
            extracted_location,
            raw: text.to_string(),
        }
    }

    /// Match a spoken item name against the catalog
    ///
    /// Exact normalized match wins at confidence 1.0. A single partial hit
    /// scores 0.9. Multiple hits prefer a recently used item (0.85) else the
    /// first hit (0.7), both flagged ambiguous with alternatives attached.
    /// No hit synthesizes a custom fridge item at 0.5.
    pub fn match_item(&self, spoken: &str, recent_item_names: &[String]) -> ParsedItem {
        let normalized = normalize(spoken);

        if let Some(exact) = self
            .catalog
            .iter()
            .find(|item| normalize(&item.name) == normalized)
        {
            return ParsedItem {
                name: exact.name.clone(),
                category: exact.category,
                location: exact.default_location,
                quantity: QuantityLevel::Plenty,
                confidence: 1.0,
                ambiguous: false,
                alternatives: Vec::new(),
            };
        }

        let partial: Vec<&CommonItem> = self
            .catalog
            .iter()
            .filter(|item| {
                let item_norm = normalize(&item.name);
                let first_word = item_norm.split(' ').next().unwrap_or("");
                item_norm.contains(&normalized) || normalized.contains(first_word)
            })
            .collect();

        match partial.len() {
            0 => {
                trace!("No catalog match for '{}', synthesizing custom item", spoken);
                ParsedItem {
                    name: capitalize(spoken),
                    category: IngredientCategory::Other,
                    location: StorageLocation::Fridge,
                    quantity: QuantityLevel::Plenty,
                    confidence: 0.5,
                    ambiguous: false,
                    alternatives: Vec::new(),
                }
            }
            1 => ParsedItem {
                name: partial[0].name.clone(),
                category: partial[0].category,
                location: partial[0].default_location,
                quantity: QuantityLevel::Plenty,
                confidence: 0.9,
                ambiguous: false,
                alternatives: Vec::new(),
            },
            _ => {
                let alternatives: Vec<String> = partial.iter().map(|m| m.name.clone()).collect();
                let recent = partial
                    .iter()
                    .find(|item| recent_item_names.contains(&item.name));

                let (chosen, confidence) = match recent {
                    Some(item) => (*item, 0.85),
                    None => (partial[0], 0.7),
                };

                ParsedItem {
                    name: chosen.name.clone(),
                    category: chosen.category,
                    location: chosen.default_location,
                    quantity: QuantityLevel::Plenty,
                    confidence,
                    ambiguous: true,
                    alternatives,
                }
            }
        }
    }

    /// Extract candidate item names from normalized text
    fn extract_item_names(&self, normalized: &str) -> Vec<String> {
        // Phase one: direct scan of known item names
        let mut found: Vec<String> = Vec::new();
        for item in &self.catalog {
            if normalized.contains(&normalize(&item.name)) {
                found.push(item.name.clone());
            }
        }
        if !found.is_empty() {
            trace!("Direct item scan matched: {:?}", found);
            return found;
        }

        // Phase two: strip trigger, location, and quantity phrases, then try
        // to match what remains
        let mut cleaned = normalized.to_string();
        for triggers in [
            ADD_TRIGGERS,
            REMOVE_TRIGGERS,
            CREATE_PATTERN_TRIGGERS,
            EDIT_PATTERN_TRIGGERS,
        ] {
            for trigger in triggers {
                cleaned = cleaned.replacen(trigger, " ", 1);
            }
        }
        for patterns in [FRIDGE_PATTERNS, FREEZER_PATTERNS, PANTRY_PATTERNS] {
            for pattern in patterns {
                cleaned = cleaned.replacen(pattern, " ", 1);
            }
        }
        for patterns in [PLENTY_PATTERNS, SOME_PATTERNS, LOW_PATTERNS] {
            for pattern in patterns {
                cleaned = cleaned.replacen(pattern, " ", 1);
            }
        }

        let words: Vec<&str> = TOKEN_SPLIT_RE
            .split(&cleaned)
            .filter(|word| {
                word.len() >= 2 && (!STOP_WORDS.contains(word) || KEEP_WORDS.contains(word))
            })
            .collect();

        // Greedy windows: two-word combinations first (e.g. "ground beef")
        let mut matched: Vec<String> = Vec::new();
        let mut i = 0;
        while i < words.len() {
            if i + 1 < words.len() {
                let two_words = format!("{} {}", words[i], words[i + 1]);
                if self
                    .catalog
                    .iter()
                    .any(|item| normalize(&item.name).contains(&two_words))
                {
                    matched.push(two_words);
                    i += 2;
                    continue;
                }
            }

            let single_hit = self.catalog.iter().any(|item| {
                let item_norm = normalize(&item.name);
                let first_word = item_norm.split(' ').next().unwrap_or("");
                item_norm.contains(words[i]) || words[i].contains(first_word)
            });
            if single_hit || KEEP_WORDS.contains(words[i]) {
                matched.push(words[i].to_string());
            }
            i += 1;
        }

        if matched.is_empty() {
            // Last resort: first five surviving tokens verbatim
            words.iter().take(5).map(|w| w.to_string()).collect()
        } else {
            matched
        }
    }

    /// Extract a pattern name ("called X", "named X", "recipe X")
    fn extract_pattern_name(&self, normalized: &str) -> Option<String> {
        if let Some(caps) = CALLED_RE.captures(normalized) {
            return Some(capitalize(caps[1].trim()));
        }
        if let Some(caps) = NAMED_RE.captures(normalized) {
            return Some(capitalize(caps[1].trim()));
        }
        if let Some(caps) = RECIPE_NAME_RE.captures(normalized) {
            let candidate = caps[1].trim();
            if !["called", "named", "with", "for"].contains(&candidate) {
                return Some(capitalize(candidate));
            }
        }
        None
    }

    /// Extract an ingredient list from a "with A, B and C" phrase
    fn extract_pattern_ingredients(&self, normalized: &str) -> Vec<String> {
        let Some(caps) = WITH_RE.captures(normalized) else {
            return Vec::new();
        };

        INGREDIENT_SPLIT_RE
            .split(&caps[1])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| self.match_item(s, &[]).name)
            .collect()
    }
}

impl Default for KeywordParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Score each actionable intent and pick the winner
fn detect_intent(normalized: &str) -> (VoiceIntent, f32) {
    let first_word = normalized.split(' ').next().unwrap_or("");

    let intents: [(VoiceIntent, &[&str]); 4] = [
        (VoiceIntent::AddItems, ADD_TRIGGERS),
        (VoiceIntent::RemoveItems, REMOVE_TRIGGERS),
        (VoiceIntent::CreatePattern, CREATE_PATTERN_TRIGGERS),
        (VoiceIntent::EditPattern, EDIT_PATTERN_TRIGGERS),
    ];
    let mut scores = [0u32; 4];

    for (idx, (_, triggers)) in intents.iter().enumerate() {
        for trigger in triggers.iter() {
            let word_count = trigger.split(' ').count() as u32;
            if normalized.starts_with(&format!("{trigger} ")) || normalized == *trigger {
                // Sentence-initial triggers are strong signals
                scores[idx] += 3 + word_count;
            } else if normalized.contains(trigger) {
                // Longer triggers are more specific
                scores[idx] += word_count;
            }
        }
    }

    // Location phrasing disambiguates add vs remove
    if ADD_LOCATION_RE.is_match(normalized) && !normalized.contains("from") {
        scores[0] += 2;
    }
    if REMOVE_LOCATION_RE.is_match(normalized) {
        scores[1] += 2;
    }

    if ADD_FIRST_WORDS.contains(&first_word) {
        scores[0] += 3;
    }
    if REMOVE_FIRST_WORDS.contains(&first_word) {
        scores[1] += 3;
    }

    let mut max_intent = VoiceIntent::Unknown;
    let mut max_score = 0;
    for (idx, (intent, _)) in intents.iter().enumerate() {
        if scores[idx] > max_score {
            max_score = scores[idx];
            max_intent = *intent;
        }
    }

    let confidence = if max_score > 0 {
        (0.5 + max_score as f32 * 0.1).min(0.95)
    } else {
        0.3
    };

    trace!(
        "Intent scores add={} remove={} create={} edit={} -> {:?}",
        scores[0],
        scores[1],
        scores[2],
        scores[3],
        max_intent
    );
    (max_intent, confidence)
}

/// First storage location whose trigger phrases appear in the text
fn extract_location(normalized: &str) -> Option<StorageLocation> {
    let locations: [(StorageLocation, &[&str]); 3] = [
        (StorageLocation::Fridge, FRIDGE_PATTERNS),
        (StorageLocation::Freezer, FREEZER_PATTERNS),
        (StorageLocation::Pantry, PANTRY_PATTERNS),
    ];

    for (location, patterns) in locations {
        if patterns.iter().any(|p| normalized.contains(p)) {
            return Some(location);
        }
    }
    None
}

/// Quantity level mentioned in the text, defaulting to plenty
fn extract_quantity(normalized: &str) -> QuantityLevel {
    let levels: [(QuantityLevel, &[&str]); 3] = [
        (QuantityLevel::Plenty, PLENTY_PATTERNS),
        (QuantityLevel::Some, SOME_PATTERNS),
        (QuantityLevel::Low, LOW_PATTERNS),
    ];

    for (level, patterns) in levels {
        if patterns.iter().any(|p| normalized.contains(p)) {
            return level;
        }
    }
    QuantityLevel::Plenty
}

/// Human-readable one-line summary of a parse result
pub fn get_parse_result_summary(result: &ParsedVoiceInput) -> String {
    match result.intent {
        VoiceIntent::AddItems => {
            if result.items.is_empty() {
                "No items recognized".to_string()
            } else {
                format!(
                    "Adding: {}",
                    result
                        .items
                        .iter()
                        .map(|i| i.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
        VoiceIntent::RemoveItems => {
            if result.items.is_empty() {
                "No items recognized".to_string()
            } else {
                format!(
                    "Removing: {}",
                    result
                        .items
                        .iter()
                        .map(|i| i.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
        VoiceIntent::CreatePattern => match result.pattern.as_ref().and_then(|p| p.name.as_ref()) {
            Some(name) => format!("New recipe: {name}"),
            None => "Create new recipe (name not recognized)".to_string(),
        },
        VoiceIntent::EditPattern => {
            match result.pattern.as_ref().and_then(|p| p.target_pattern.as_ref()) {
                Some(target) => format!("Edit: {target}"),
                None => "Edit recipe (which one?)".to_string(),
            }
        }
        VoiceIntent::Unknown => {
            "Could not understand. Try: \"Add chicken to fridge\" or \"Used the milk\"".to_string()
        }
    }
}
