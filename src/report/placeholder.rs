//! `{{namespace.field}}` substitution over strings and JSON trees.
//!
//! Resolution never fails: tokens with no defined value render as
//! `[namespace.field]` so they stay visible in the output, and text that does
//! not match the token grammar is left alone.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use super::context::PlaceholderContext;
use crate::blocks::TemplateSchema;

lazy_static! {
    static ref TOKEN: Regex =
        Regex::new(r"\{\{([a-z_]+)\.([a-z_]+)\}\}").expect("placeholder token pattern");
}

/// Replace every token in `text` in a single left-to-right pass.
///
/// Substituted values are inserted verbatim and never re-scanned.
pub fn resolve(text: &str, context: &PlaceholderContext) -> String {
    if !text.contains("{{") {
        return text.to_string();
    }

    TOKEN
        .replace_all(text, |caps: &Captures| {
            let key = token_key(caps);
            match context.get(&key) {
                Some(value) => value.to_string(),
                None => format!("[{key}]"),
            }
        })
        .into_owned()
}

/// Token keys in first-seen order, without duplicates.
pub fn extract_tokens(text: &str) -> Vec<String> {
    let mut keys = Vec::new();
    collect_tokens(text, &mut keys);
    keys
}

/// Resolve every string inside `value`. Arrays keep their order, objects
/// keep their keys, other scalars pass through.
pub fn resolve_tree(value: &Value, context: &PlaceholderContext) -> Value {
    match value {
        Value::String(text) => Value::String(resolve(text, context)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_tree(item, context))
                .collect(),
        ),
        Value::Object(map) => Value::Object(resolve_map(map, context)),
        scalar => scalar.clone(),
    }
}

/// [`resolve_tree`] for a block's config object.
pub fn resolve_map(map: &Map<String, Value>, context: &PlaceholderContext) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), resolve_tree(value, context)))
        .collect()
}

/// [`extract_tokens`] over every string inside `value`, in traversal order.
pub fn extract_tree_tokens(value: &Value) -> Vec<String> {
    let mut keys = Vec::new();
    walk_tokens(value, &mut keys);
    keys
}

/// Token keys used by any block config of `schema`, in block order.
pub fn schema_tokens(schema: &TemplateSchema) -> Vec<String> {
    let mut keys = Vec::new();
    for block in &schema.blocks {
        block.config.values().for_each(|value| walk_tokens(value, &mut keys));
    }
    keys
}

fn walk_tokens(value: &Value, keys: &mut Vec<String>) {
    match value {
        Value::String(text) => collect_tokens(text, keys),
        Value::Array(items) => items.iter().for_each(|item| walk_tokens(item, keys)),
        Value::Object(map) => map.values().for_each(|item| walk_tokens(item, keys)),
        _ => {}
    }
}

fn collect_tokens(text: &str, keys: &mut Vec<String>) {
    for caps in TOKEN.captures_iter(text) {
        let key = token_key(&caps);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
}

fn token_key(caps: &Captures) -> String {
    format!("{}.{}", &caps[1], &caps[2])
}
