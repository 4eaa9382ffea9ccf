//! Structural validation of template schemas.
//!
//! Issues carry the offending block id so the editor can highlight it, and a
//! message written for the person editing the template. Validation only
//! reports; it never changes the schema.

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blocks::{BlockConfig, TemplateSchema};

pub const MAX_KEY_LEN: usize = 64;

lazy_static! {
    static ref KEY_PATTERN: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").expect("data key pattern");
}

/// One validation problem attached to a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchemaIssue {
    pub block_id: String,
    /// Config field at fault (`key`, `options`, ...), or `id`.
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl SchemaIssue {
    pub fn new(
        block_id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            block_id: block_id.into(),
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_key(block_id: &str) -> Self {
        Self::new(block_id, "key", "La clave del campo no puede estar vacía")
            .with_suggestion("Asigne una clave en minúsculas, por ejemplo: numero_serie")
    }

    pub fn invalid_key_format(block_id: &str, key: &str) -> Self {
        Self::new(
            block_id,
            "key",
            format!("La clave '{}' no tiene un formato válido", key),
        )
        .with_suggestion(
            "Use solo minúsculas, dígitos y guiones bajos, empezando por una letra (ej. serial_1)",
        )
    }

    pub fn key_too_long(block_id: &str, key: &str) -> Self {
        Self::new(
            block_id,
            "key",
            format!(
                "La clave '{}' supera los {} caracteres permitidos",
                key, MAX_KEY_LEN
            ),
        )
    }

    pub fn duplicate_key(block_id: &str, key: &str) -> Self {
        Self::new(
            block_id,
            "key",
            format!("La clave '{}' ya está en uso en otro bloque", key),
        )
        .with_suggestion("Cada campo de la plantilla necesita una clave única")
    }

    pub fn duplicate_id(block_id: &str) -> Self {
        Self::new(
            block_id,
            "id",
            format!("El identificador de bloque '{}' está repetido", block_id),
        )
    }

    pub fn empty_collection(block_id: &str, field: &str, label: &str) -> Self {
        Self::new(
            block_id,
            field,
            format!("La lista de {} no puede estar vacía", label),
        )
        .with_suggestion(format!("Añada al menos un elemento a {}", label))
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}.{}] {}", self.block_id, self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaIssue {}

/// Collection of issues with a human-readable summary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchemaIssues {
    issues: Vec<SchemaIssue>,
}

impl SchemaIssues {
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    pub fn add(&mut self, issue: SchemaIssue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.issues.iter()
    }

    pub fn into_vec(self) -> Vec<SchemaIssue> {
        self.issues
    }

    pub fn summary(&self) -> String {
        if self.issues.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "La plantilla tiene {} error(es) de validación:",
            self.issues.len()
        )];
        for (i, issue) in self.issues.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, issue));
        }
        parts.join("\n")
    }

    /// `Ok` when there is nothing to report.
    pub fn into_result(self) -> Result<(), SchemaIssues> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<SchemaIssue>> for SchemaIssues {
    fn from(issues: Vec<SchemaIssue>) -> Self {
        Self { issues }
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Check `schema` for structural problems. An empty list means valid.
pub fn validate_schema(schema: &TemplateSchema) -> Vec<SchemaIssue> {
    let mut issues = SchemaIssues::new();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut seen_keys: HashSet<String> = HashSet::new();

    for block in &schema.blocks {
        if !seen_ids.insert(block.id.as_str()) {
            issues.add(SchemaIssue::duplicate_id(&block.id));
        }

        if !block.block_type.is_known() || !block.block_type.is_data_producing() {
            continue;
        }

        let config = block.typed_config();
        if let Some(field) = config.field() {
            validate_key(&block.id, &field.key, &mut seen_keys, &mut issues);
        }

        match config {
            BlockConfig::Select(select) if select.options.is_empty() => {
                issues.add(SchemaIssue::empty_collection(&block.id, "options", "opciones"));
            }
            BlockConfig::Checklist(checklist) if checklist.items.is_empty() => {
                issues.add(SchemaIssue::empty_collection(&block.id, "items", "elementos"));
            }
            BlockConfig::Table(table) if table.columns.is_empty() => {
                issues.add(SchemaIssue::empty_collection(&block.id, "columns", "columnas"));
            }
            _ => {}
        }
    }

    issues.into_vec()
}

/// Validate one data key. The first block to use a key owns it; every later
/// block using it gets a duplicate issue.
pub fn validate_key(
    block_id: &str,
    key: &str,
    seen_keys: &mut HashSet<String>,
    issues: &mut SchemaIssues,
) {
    if key.trim().is_empty() {
        issues.add(SchemaIssue::empty_key(block_id));
        return;
    }

    if !KEY_PATTERN.is_match(key) {
        issues.add(SchemaIssue::invalid_key_format(block_id, key));
    } else if key.len() > MAX_KEY_LEN {
        issues.add(SchemaIssue::key_too_long(block_id, key));
    }

    if !seen_keys.insert(key.to_string()) {
        issues.add(SchemaIssue::duplicate_key(block_id, key));
    }
}
