pub mod tool_dto;

pub use tool_dto::{ToolResponseDto, ToolStatsDto};
