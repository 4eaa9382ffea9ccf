//! Placeholder resolution over strings, JSON trees and informe metadata.

mod common;

use chrono::NaiveDate;
use common::{block, maintenance_document};
use informes_server::blocks::{BlockType, TemplateSchema};
use informes_server::report::{
    extract_tokens, resolve, resolve_tree, schema_tokens, InformeMetadata, PlaceholderContext,
};
use serde_json::json;

#[test]
fn test_resolve_component_label() {
    let context: PlaceholderContext = [("componente.etiqueta", "Robot 1")].into_iter().collect();

    assert_eq!(
        resolve("Control de {{componente.etiqueta}}", &context),
        "Control de Robot 1"
    );
}

#[test]
fn test_missing_key_renders_bracketed() {
    assert_eq!(resolve("{{foo.bar}}", &PlaceholderContext::new()), "[foo.bar]");
}

#[test]
fn test_non_matching_text_is_left_alone() {
    let context: PlaceholderContext = [("a.b", "V")].into_iter().collect();

    assert_eq!(resolve("{{ a.b }}", &context), "{{ a.b }}");
    assert_eq!(resolve("{{A.b}}", &context), "{{A.b}}");
    assert_eq!(resolve("{{a}}", &context), "{{a}}");
    assert_eq!(resolve("sin marcadores", &context), "sin marcadores");
}

#[test]
fn test_substituted_values_are_not_rescanned() {
    let context: PlaceholderContext = [("a.b", "{{c.d}}"), ("c.d", "nested")]
        .into_iter()
        .collect();

    assert_eq!(resolve("{{a.b}}", &context), "{{c.d}}");
}

#[test]
fn test_resolve_tree_walks_nested_values() {
    let context: PlaceholderContext = [("a.b", "V")].into_iter().collect();
    let tree = json!({ "title": "{{a.b}}", "rows": [{ "x": "{{a.b}}" }], "width": 3, "on": true });

    assert_eq!(
        resolve_tree(&tree, &context),
        json!({ "title": "V", "rows": [{ "x": "V" }], "width": 3, "on": true })
    );
}

#[test]
fn test_extract_tokens_first_seen_order_without_duplicates() {
    let keys = extract_tokens("{{b.b}} y {{a.a}}, otra vez {{b.b}}");

    assert_eq!(keys, vec!["b.b".to_string(), "a.a".to_string()]);
}

#[test]
fn test_schema_tokens_cover_every_block() {
    let mut keys = schema_tokens(&maintenance_document());
    keys.sort();

    assert_eq!(
        keys,
        vec!["cliente.nombre".to_string(), "intervencion.titulo".to_string()]
    );
}

#[test]
fn test_schema_tokens_ignore_ids_and_types() {
    let schema = TemplateSchema::new(vec![block(
        "{{not.config}}",
        BlockType::StaticText,
        json!({ "text": "{{sistema.nombre}}" }),
    )]);

    assert_eq!(schema_tokens(&schema), vec!["sistema.nombre".to_string()]);
}

#[test]
fn test_context_from_metadata_formats_dates() {
    let mut metadata = InformeMetadata::default();
    metadata.intervencion.fecha_inicio = NaiveDate::from_ymd_opt(2025, 3, 15);
    metadata.informe.numero = Some("INF-2025-014".to_string());

    let context = PlaceholderContext::from_metadata(&metadata);

    assert_eq!(
        context.get("intervencion.fecha_inicio"),
        Some("15 de marzo de 2025")
    );
    assert_eq!(context.get("informe.numero"), Some("INF-2025-014"));
    assert_eq!(context.get("cliente.nombre"), None);
    assert_eq!(
        resolve("Cliente: {{cliente.nombre}}", &context),
        "Cliente: [cliente.nombre]"
    );
}

#[test]
fn test_metadata_deserializes_from_camel_case() {
    let metadata: InformeMetadata = serde_json::from_value(json!({
        "intervencion": { "titulo": "Revisión", "fechaInicio": "2025-01-02" },
        "cliente": { "nombre": "ACME" }
    }))
    .unwrap();

    let context = PlaceholderContext::from_metadata(&metadata);
    assert_eq!(context.get("intervencion.titulo"), Some("Revisión"));
    assert_eq!(context.get("intervencion.fecha_inicio"), Some("2 de enero de 2025"));
    assert_eq!(context.get("cliente.nombre"), Some("ACME"));
}
