use crate::features::labels::{CatalogService, LabelCatalog};
use crate::features::tools::dtos::{ToolResponseDto, ToolStatsDto};
use crate::modules::store::LabelKind;

/// The tool catalog
#[derive(Debug)]
pub struct Tools;

impl LabelCatalog for Tools {
    const KIND: LabelKind = LabelKind::Tool;
    type Response = ToolResponseDto;
    type Stats = ToolStatsDto;
}

/// Service for tool operations
pub type ToolService = CatalogService<Tools>;
