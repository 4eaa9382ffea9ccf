use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::config::BlockConfig;
use super::defaults::default_config;

/// Closed set of block types a template may contain.
///
/// Types this build does not know are kept verbatim in [`BlockType::Unknown`]
/// so that schemas written by newer editors still load, resolve and assemble.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Header,
    SectionTitle,
    StaticText,
    Divider,
    Spacer,
    Image,
    TableOfContents,
    PageBreak,
    SectionSeparator,
    CoverHeader,
    PageHeader,
    PageFooter,
    BackCover,
    ComponentSection,
    ContentPlaceholder,
    TextField,
    Textarea,
    NumberField,
    DateField,
    SelectField,
    Checkbox,
    Signature,
    Table,
    Checklist,
    Tristate,
    Unknown(String),
}

/// Grouping used by the editor palette and by assembly rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    Structure,
    Pagination,
    Document,
    Content,
    Field,
    Inspection,
    Unknown,
}

impl BlockType {
    /// Every known block type, in palette order.
    pub const KNOWN: [BlockType; 25] = [
        BlockType::Header,
        BlockType::SectionTitle,
        BlockType::StaticText,
        BlockType::Divider,
        BlockType::Spacer,
        BlockType::Image,
        BlockType::TableOfContents,
        BlockType::PageBreak,
        BlockType::SectionSeparator,
        BlockType::CoverHeader,
        BlockType::PageHeader,
        BlockType::PageFooter,
        BlockType::BackCover,
        BlockType::ComponentSection,
        BlockType::ContentPlaceholder,
        BlockType::TextField,
        BlockType::Textarea,
        BlockType::NumberField,
        BlockType::DateField,
        BlockType::SelectField,
        BlockType::Checkbox,
        BlockType::Signature,
        BlockType::Table,
        BlockType::Checklist,
        BlockType::Tristate,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "header",
            Self::SectionTitle => "section_title",
            Self::StaticText => "static_text",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
            Self::Image => "image",
            Self::TableOfContents => "table_of_contents",
            Self::PageBreak => "page_break",
            Self::SectionSeparator => "section_separator",
            Self::CoverHeader => "cover_header",
            Self::PageHeader => "page_header",
            Self::PageFooter => "page_footer",
            Self::BackCover => "back_cover",
            Self::ComponentSection => "component_section",
            Self::ContentPlaceholder => "content_placeholder",
            Self::TextField => "text_field",
            Self::Textarea => "textarea",
            Self::NumberField => "number_field",
            Self::DateField => "date_field",
            Self::SelectField => "select_field",
            Self::Checkbox => "checkbox",
            Self::Signature => "signature",
            Self::Table => "table",
            Self::Checklist => "checklist",
            Self::Tristate => "tristate",
            Self::Unknown(name) => name.as_str(),
        }
    }

    pub fn category(&self) -> BlockCategory {
        match self {
            Self::Header
            | Self::SectionTitle
            | Self::StaticText
            | Self::Divider
            | Self::Spacer
            | Self::Image
            | Self::TableOfContents => BlockCategory::Structure,
            Self::PageBreak | Self::SectionSeparator => BlockCategory::Pagination,
            Self::CoverHeader | Self::PageHeader | Self::PageFooter | Self::BackCover => {
                BlockCategory::Document
            }
            Self::ComponentSection | Self::ContentPlaceholder => BlockCategory::Content,
            Self::TextField
            | Self::Textarea
            | Self::NumberField
            | Self::DateField
            | Self::SelectField
            | Self::Checkbox
            | Self::Signature => BlockCategory::Field,
            Self::Table | Self::Checklist | Self::Tristate => BlockCategory::Inspection,
            Self::Unknown(_) => BlockCategory::Unknown,
        }
    }

    /// Data-producing blocks carry a `config.key` and receive a value from `datos`.
    pub fn is_data_producing(&self) -> bool {
        matches!(
            self.category(),
            BlockCategory::Field | BlockCategory::Inspection
        )
    }

    /// Page chrome: annotated with `_pageNumber` / `_totalPages` on assembly.
    pub fn is_chrome(&self) -> bool {
        self.category() == BlockCategory::Document
    }

    pub fn is_content_marker(&self) -> bool {
        self.category() == BlockCategory::Content
    }

    /// Blocks that start a new logical page once emitted.
    pub fn is_page_boundary(&self) -> bool {
        self.category() == BlockCategory::Pagination
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for BlockType {
    fn from(value: String) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == value)
            .cloned()
            .unwrap_or(Self::Unknown(value))
    }
}

impl From<&str> for BlockType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing category shared by content markers and component instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    All,
    ControllerInfo,
    ManipulatorInfo,
    ManipulatorInstallation,
    MechanicalUnitControl,
    CabinetControl,
    ProgrammingUnitControl,
    SystemControl,
    /// Unrecognised category; never matches anything.
    Other(String),
}

impl ContentType {
    pub const KNOWN: [ContentType; 8] = [
        ContentType::All,
        ContentType::ControllerInfo,
        ContentType::ManipulatorInfo,
        ContentType::ManipulatorInstallation,
        ContentType::MechanicalUnitControl,
        ContentType::CabinetControl,
        ContentType::ProgrammingUnitControl,
        ContentType::SystemControl,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::ControllerInfo => "controller_info",
            Self::ManipulatorInfo => "manipulator_info",
            Self::ManipulatorInstallation => "manipulator_installation",
            Self::MechanicalUnitControl => "mechanical_unit_control",
            Self::CabinetControl => "cabinet_control",
            Self::ProgrammingUnitControl => "programming_unit_control",
            Self::SystemControl => "system_control",
            Self::Other(name) => name.as_str(),
        }
    }

    /// A specific, recognised type (neither `all` nor unrecognised).
    pub fn is_specific(&self) -> bool {
        !matches!(self, Self::All | Self::Other(_))
    }

    /// Whether content of type `tipo` belongs under this marker type.
    pub fn accepts(&self, tipo: &ContentType) -> bool {
        match self {
            Self::All => true,
            Self::Other(_) => false,
            specific => specific == tipo,
        }
    }
}

impl From<String> for ContentType {
    fn from(value: String) -> Self {
        Self::KNOWN
            .iter()
            .find(|known| known.as_str() == value)
            .cloned()
            .unwrap_or(Self::Other(value))
    }
}

impl From<&str> for ContentType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ContentType> for String {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of document structure or data capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Block {
    #[schema(example = "b7c1d9e2-0f4a-4c55-9d8e-3a6f1b2c4d5e")]
    pub id: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "text_field")]
    pub block_type: BlockType,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub config: Map<String, Value>,
}

impl Block {
    /// New block with a fresh id and the type's default configuration.
    pub fn new(block_type: BlockType) -> Self {
        let config = default_config(&block_type);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            block_type,
            config,
        }
    }

    pub fn with_config(
        id: impl Into<String>,
        block_type: impl Into<BlockType>,
        config: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            block_type: block_type.into(),
            config,
        }
    }

    /// `config.key` of a data-producing block.
    pub fn data_key(&self) -> Option<&str> {
        if !self.block_type.is_data_producing() {
            return None;
        }
        self.config.get("key").and_then(Value::as_str)
    }

    pub fn typed_config(&self) -> BlockConfig {
        BlockConfig::from_block(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Presentation metadata carried through assembly untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub orientation: Orientation,
    /// Margins in millimetres.
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    /// Base font size in pixels.
    pub font_size: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            margin_top: 20.0,
            margin_right: 15.0,
            margin_bottom: 20.0,
            margin_left: 15.0,
            font_size: 12.0,
        }
    }
}

/// Ordered blocks plus page setup. Block order is canonical.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSchema {
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default)]
    pub page_config: PageConfig,
}

impl TemplateSchema {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            page_config: PageConfig::default(),
        }
    }

    pub fn position(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == block_id)
    }

    /// Data keys in schema order.
    pub fn data_keys(&self) -> Vec<&str> {
        self.blocks.iter().filter_map(Block::data_key).collect()
    }
}
