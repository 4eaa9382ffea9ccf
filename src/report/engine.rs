//! Report assembly.
//!
//! Walks the document template once, resolving placeholders and expanding
//! content markers in place, then numbers pages. Pure: the same inputs always
//! produce the same output and nothing passed in is modified.

use std::collections::HashMap;

use serde_json::Value;

use super::context::PlaceholderContext;
use super::model::{AssembledBlock, AssembledReport, ComponenteInforme, Informe};
use super::placeholder::resolve_map;
use super::router::{route, RoutedMarker};
use super::toc::{project_toc, toc_config_for};
use crate::blocks::{Block, TemplateSchema};

pub const PAGE_NUMBER_KEY: &str = "_pageNumber";
pub const TOTAL_PAGES_KEY: &str = "_totalPages";

/// Merge `document` with the routed component blocks into one ordered,
/// page-numbered sequence.
pub fn assemble(
    document: &TemplateSchema,
    components: &[ComponenteInforme],
    context: &PlaceholderContext,
) -> Vec<AssembledBlock> {
    let routes = route(&document.blocks, components);
    let by_position: HashMap<usize, &RoutedMarker> =
        routes.iter().map(|marker| (marker.position, marker)).collect();

    let mut output = Vec::with_capacity(document.blocks.len());
    for (position, block) in document.blocks.iter().enumerate() {
        if block.block_type.is_content_marker() {
            if let Some(marker) = by_position.get(&position) {
                inject(marker, context, &mut output);
            }
            continue;
        }
        output.push(AssembledBlock::from_block(
            block,
            resolve_map(&block.config, context),
        ));
    }

    let total = number_pages(&mut output);
    log::debug!(
        "assembled {} blocks from {} template blocks and {} components over {} pages",
        output.len(),
        document.blocks.len(),
        components.len(),
        total
    );
    output
}

/// [`assemble`] plus the table of contents, driven by the informe's metadata.
pub fn assemble_report(informe: &Informe) -> AssembledReport {
    let context = PlaceholderContext::from_metadata(&informe.metadata);
    let blocks = assemble(&informe.document_schema, &informe.componentes, &context);
    let toc = project_toc(&blocks, &toc_config_for(&informe.document_schema.blocks));
    let total_pages = page_count(&blocks);

    AssembledReport {
        blocks,
        toc,
        total_pages,
    }
}

fn inject(marker: &RoutedMarker, context: &PlaceholderContext, output: &mut Vec<AssembledBlock>) {
    for routed in &marker.components {
        let component = routed.component;
        let component_context = context.overlay(&component.placeholder_overlay());
        for block in &routed.blocks {
            output.push(component_block(block, component, &component_context));
        }
    }
}

/// Injected block: config resolved with the component's context, data
/// fields filled from `datos`.
fn component_block(
    block: &Block,
    component: &ComponenteInforme,
    context: &PlaceholderContext,
) -> AssembledBlock {
    let mut assembled = AssembledBlock::from_block(block, resolve_map(&block.config, context));
    if block.block_type.is_data_producing() {
        let value = block
            .data_key()
            .map(|key| component.value_for(key))
            .unwrap_or(Value::Null);
        assembled.value = Some(value);
    }
    assembled.component_id = Some(component.id.clone());
    assembled
}

/// Logical page count of an assembled sequence: one plus every page boundary.
pub fn page_count(blocks: &[AssembledBlock]) -> u32 {
    let boundaries = blocks
        .iter()
        .filter(|block| block.block_type.is_page_boundary())
        .count();
    1 + boundaries as u32
}

/// Stamp `_pageNumber` on chrome blocks as the page counter advances, then
/// `_totalPages` once the final count is known. Returns the final count.
fn number_pages(blocks: &mut [AssembledBlock]) -> u32 {
    let mut page: u32 = 1;
    for block in blocks.iter_mut() {
        if block.block_type.is_chrome() {
            block
                .config
                .insert(PAGE_NUMBER_KEY.to_string(), Value::from(page));
        }
        if block.block_type.is_page_boundary() {
            page += 1;
        }
    }

    for block in blocks.iter_mut().filter(|b| b.block_type.is_chrome()) {
        block
            .config
            .insert(TOTAL_PAGES_KEY.to_string(), Value::from(page));
    }
    page
}
