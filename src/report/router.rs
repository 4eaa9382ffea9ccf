//! Routing of component blocks into the document template's content markers.
//!
//! Content markers are `content_placeholder` and `component_section` blocks
//! of the document template. Each marker declares a `contentType`; the router
//! decides which components land under which marker and in what order.

use std::collections::{HashMap, HashSet};

use super::model::ComponenteInforme;
use crate::blocks::{Block, BlockConfig, BlockType, ContentType};

/// Content routed to one document marker.
#[derive(Debug)]
pub struct RoutedMarker<'a> {
    /// Index of the marker in the document's blocks.
    pub position: usize,
    pub marker: &'a Block,
    pub content_type: ContentType,
    /// Components in injection order with the blocks each contributes.
    pub components: Vec<RoutedComponent<'a>>,
}

#[derive(Debug)]
pub struct RoutedComponent<'a> {
    pub component: &'a ComponenteInforme,
    pub blocks: Vec<&'a Block>,
}

impl RoutedMarker<'_> {
    pub fn block_count(&self) -> usize {
        self.components.iter().map(|c| c.blocks.len()).sum()
    }
}

/// Route `components` into the markers of `document_blocks`, one entry per
/// marker in document order.
///
/// - A specific-type marker receives every component of that type, by `orden`
///   ascending with ties kept in input order. Only the first marker of a type
///   receives content; later duplicates stay empty.
/// - The first `all` marker receives the components whose type has no
///   specific marker in the document.
/// - A `content_placeholder` without `contentType` counts as `all`; a
///   `component_section` without one matches nothing.
pub fn route<'a>(
    document_blocks: &'a [Block],
    components: &'a [ComponenteInforme],
) -> Vec<RoutedMarker<'a>> {
    let mut ordered: Vec<&ComponenteInforme> = components.iter().collect();
    ordered.sort_by_key(|component| component.orden);

    let markers: Vec<(usize, &Block, ContentType)> = document_blocks
        .iter()
        .enumerate()
        .filter_map(|(position, block)| {
            marker_type(block).map(|content_type| (position, block, content_type))
        })
        .collect();

    let mut first_of_type: HashMap<&ContentType, usize> = HashMap::new();
    for (position, _, content_type) in &markers {
        if content_type.is_specific() || *content_type == ContentType::All {
            first_of_type.entry(content_type).or_insert(*position);
        }
    }
    let claimed: HashSet<&ContentType> = first_of_type
        .keys()
        .copied()
        .filter(|content_type| content_type.is_specific())
        .collect();

    let routed: Vec<RoutedMarker<'a>> = markers
        .iter()
        .map(|(position, marker, content_type)| {
            let receives = first_of_type.get(content_type) == Some(position);
            let components = if !receives {
                Vec::new()
            } else if *content_type == ContentType::All {
                ordered
                    .iter()
                    .filter(|component| !claimed.contains(&component.tipo_componente))
                    .map(|component| routed_component(*component))
                    .collect()
            } else {
                ordered
                    .iter()
                    .filter(|component| component.tipo_componente == *content_type)
                    .map(|component| routed_component(*component))
                    .collect()
            };

            RoutedMarker {
                position: *position,
                marker: *marker,
                content_type: content_type.clone(),
                components,
            }
        })
        .collect();

    for component in &ordered {
        let placed = routed
            .iter()
            .any(|marker| marker.components.iter().any(|c| c.component.id == component.id));
        if !placed {
            log::debug!(
                "component {} ({}) matches no content marker and is left out",
                component.id,
                component.tipo_componente
            );
        }
    }

    routed
}

/// Declared content type of a document-level marker.
fn marker_type(block: &Block) -> Option<ContentType> {
    let BlockConfig::ContentMarker(config) = block.typed_config() else {
        return None;
    };
    match (config.content_type, &block.block_type) {
        (Some(content_type), _) => Some(content_type),
        (None, BlockType::ContentPlaceholder) => Some(ContentType::All),
        (None, _) => Some(ContentType::Other(String::new())),
    }
}

fn routed_component(component: &ComponenteInforme) -> RoutedComponent<'_> {
    RoutedComponent {
        component,
        blocks: component_run(component),
    }
}

/// The blocks a component contributes, in schema order.
///
/// When the frozen schema is partitioned by `component_section` markers, the
/// blocks before the first marker are always kept, and each following run is
/// kept only when its marker accepts the component's type (an untyped marker
/// accepts everything). Content markers themselves are never emitted.
pub fn component_run(component: &ComponenteInforme) -> Vec<&Block> {
    let mut active = true;
    let mut run = Vec::new();

    for block in &component.schema_congelado.blocks {
        if block.block_type == BlockType::ComponentSection {
            active = match block.typed_config() {
                BlockConfig::ContentMarker(config) => config
                    .content_type
                    .map_or(true, |section| section.accepts(&component.tipo_componente)),
                _ => true,
            };
            continue;
        }
        if block.block_type.is_content_marker() {
            continue;
        }
        if active {
            run.push(block);
        }
    }

    run
}
