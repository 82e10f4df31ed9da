//! Machinery shared by the category and tool catalogs, which differ only in
//! the table they live in.

pub mod dtos;
pub mod handlers;
pub mod services;

pub use services::{CatalogService, LabelCatalog, LabelService};
