//! Table of contents derived from an assembled block sequence.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::AssembledBlock;
use crate::blocks::config::HeadingConfig;
use crate::blocks::{Block, BlockType, TocConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    pub number: u32,
    pub title: String,
    pub level: u8,
    pub page_number: u32,
}

/// Scan `blocks` for `section_title` entries. Pages start at 1 and advance on
/// every `section_separator` or `page_break`.
pub fn project_toc(blocks: &[AssembledBlock], config: &TocConfig) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut page: u32 = 1;

    for block in blocks {
        if block.block_type.is_page_boundary() {
            page += 1;
            continue;
        }
        if block.block_type != BlockType::SectionTitle {
            continue;
        }

        let heading = HeadingConfig::read(&block.config);
        if config.max_level.is_some_and(|max| heading.level > max) {
            continue;
        }

        entries.push(TocEntry {
            number: entries.len() as u32 + 1,
            title: heading.title,
            level: heading.level,
            page_number: page,
        });
    }

    entries
}

/// Config of the first `table_of_contents` block, or defaults.
pub fn toc_config_for(blocks: &[Block]) -> TocConfig {
    blocks
        .iter()
        .find(|block| block.block_type == BlockType::TableOfContents)
        .map(|block| TocConfig::read(&block.config))
        .unwrap_or_default()
}
