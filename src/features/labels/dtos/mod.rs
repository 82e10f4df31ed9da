pub mod label_dto;

pub use label_dto::{CreateLabelDto, LabelQueryParams, UpdateLabelDto};
