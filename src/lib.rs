//! # Larder
//!
//! Core engine for a household food-inventory tracker: figures out which
//! meals a household can cook from what is on hand, derives a shopping list
//! from the near misses, and interprets voice commands about the larder.
//!
//! ## Features
//!
//! - Ingredient-slot matching of inventory items against meal patterns
//! - Opportunity scoring with friction classification (ready / one away /
//!   needs shopping) and an aging-item bonus
//! - Grocery suggestions from one-away meals and low-stock items
//! - Keyword-based voice parsing with intent detection and item extraction
//! - Strict validation of LLM voice-parse responses with a deterministic
//!   keyword fallback behind the same result contract
//!
//! All functions are pure and synchronous: no I/O, no shared state, safe to
//! call concurrently. Storage, networking, and UI belong to the caller.

pub mod catalog;
pub mod grocery;
pub mod keyword_parser;
pub mod llm_validator;
pub mod matching;
pub mod types;
