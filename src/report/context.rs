//! Placeholder context: the flat `namespace.field -> value` map tokens resolve against.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Flat key/value context. A key may be present but undefined, which renders
/// the same as an absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceholderContext {
    values: BTreeMap<String, Option<String>>,
}

impl PlaceholderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), Some(value.into()));
    }

    pub fn set(&mut self, key: impl Into<String>, value: Option<String>) {
        self.values.insert(key.into(), value);
    }

    /// Defined value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of `self` with every entry of `overlay` on top.
    pub fn overlay(&self, overlay: &PlaceholderContext) -> PlaceholderContext {
        let mut merged = self.clone();
        merged
            .values
            .extend(overlay.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    pub fn from_metadata(metadata: &InformeMetadata) -> Self {
        let mut context = Self::new();
        let i = &metadata.intervencion;
        context.set("intervencion.titulo", i.titulo.clone());
        context.set("intervencion.referencia", i.referencia.clone());
        context.set("intervencion.fecha_inicio", i.fecha_inicio.map(format_fecha));
        context.set("intervencion.fecha_fin", i.fecha_fin.map(format_fecha));
        context.set("intervencion.tecnico", i.tecnico.clone());

        let c = &metadata.cliente;
        context.set("cliente.nombre", c.nombre.clone());
        context.set("cliente.direccion", c.direccion.clone());
        context.set("cliente.contacto", c.contacto.clone());

        let s = &metadata.sistema;
        context.set("sistema.nombre", s.nombre.clone());
        context.set("sistema.fabricante", s.fabricante.clone());
        context.set("sistema.modelo", s.modelo.clone());

        context.set("informe.numero", metadata.informe.numero.clone());
        context.set("informe.fecha", metadata.informe.fecha.map(format_fecha));
        context
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PlaceholderContext {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut context = Self::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InformeMetadata {
    pub intervencion: IntervencionInfo,
    pub cliente: ClienteInfo,
    pub sistema: SistemaInfo,
    pub informe: InformeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct IntervencionInfo {
    #[schema(example = "Mantenimiento preventivo anual")]
    pub titulo: Option<String>,
    pub referencia: Option<String>,
    #[schema(example = "2025-03-15")]
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub tecnico: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ClienteInfo {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub contacto: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SistemaInfo {
    pub nombre: Option<String>,
    pub fabricante: Option<String>,
    pub modelo: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InformeInfo {
    pub numero: Option<String>,
    pub fecha: Option<NaiveDate>,
}

/// Entry of the fixed placeholder table shown by the editor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlaceholderKey {
    pub key: &'static str,
    pub description: &'static str,
}

pub const PLACEHOLDER_KEYS: &[PlaceholderKey] = &[
    PlaceholderKey { key: "intervencion.titulo", description: "Título de la intervención" },
    PlaceholderKey { key: "intervencion.referencia", description: "Referencia u orden de trabajo" },
    PlaceholderKey { key: "intervencion.fecha_inicio", description: "Fecha de inicio" },
    PlaceholderKey { key: "intervencion.fecha_fin", description: "Fecha de finalización" },
    PlaceholderKey { key: "intervencion.tecnico", description: "Técnico responsable" },
    PlaceholderKey { key: "cliente.nombre", description: "Nombre del cliente" },
    PlaceholderKey { key: "cliente.direccion", description: "Dirección del cliente" },
    PlaceholderKey { key: "cliente.contacto", description: "Persona de contacto" },
    PlaceholderKey { key: "sistema.nombre", description: "Nombre del sistema" },
    PlaceholderKey { key: "sistema.fabricante", description: "Fabricante del sistema" },
    PlaceholderKey { key: "sistema.modelo", description: "Modelo del sistema" },
    PlaceholderKey { key: "informe.numero", description: "Número de informe" },
    PlaceholderKey { key: "informe.fecha", description: "Fecha del informe" },
    PlaceholderKey { key: "componente.etiqueta", description: "Etiqueta del componente" },
    PlaceholderKey { key: "componente.numero_serie", description: "Número de serie del componente" },
    PlaceholderKey { key: "componente.modelo", description: "Modelo del componente" },
    PlaceholderKey { key: "componente.tipo", description: "Tipo de contenido del componente" },
];

/// Long Spanish date, e.g. "15 de marzo de 2025".
pub fn format_fecha(date: NaiveDate) -> String {
    let months = [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ];

    let month = months[(date.month0() as usize).min(months.len() - 1)];
    format!("{} de {} de {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_values_read_as_absent() {
        let mut context = PlaceholderContext::new();
        context.set("cliente.nombre", None);
        context.insert("sistema.nombre", "Célula 3");

        assert_eq!(context.get("cliente.nombre"), None);
        assert_eq!(context.get("sistema.nombre"), Some("Célula 3"));
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn test_overlay_wins_and_keeps_base_untouched() {
        let base: PlaceholderContext = [("a.b", "base"), ("c.d", "keep")].into_iter().collect();
        let top: PlaceholderContext = [("a.b", "top")].into_iter().collect();

        let merged = base.overlay(&top);
        assert_eq!(merged.get("a.b"), Some("top"));
        assert_eq!(merged.get("c.d"), Some("keep"));
        assert_eq!(base.get("a.b"), Some("base"));
    }

    #[test]
    fn test_from_metadata_formats_dates() {
        let metadata = InformeMetadata {
            intervencion: IntervencionInfo {
                titulo: Some("Revisión anual".into()),
                fecha_inicio: NaiveDate::from_ymd_opt(2025, 3, 15),
                ..Default::default()
            },
            ..Default::default()
        };

        let context = PlaceholderContext::from_metadata(&metadata);
        assert_eq!(context.get("intervencion.titulo"), Some("Revisión anual"));
        assert_eq!(
            context.get("intervencion.fecha_inicio"),
            Some("15 de marzo de 2025")
        );
        assert_eq!(context.get("cliente.nombre"), None);
    }

    #[test]
    fn test_placeholder_table_keys_are_well_formed() {
        for entry in PLACEHOLDER_KEYS {
            let (namespace, field) = entry.key.split_once('.').unwrap();
            assert!(namespace.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
            assert!(field.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
