pub mod catalog_service;
pub mod label_service;

pub use catalog_service::{CatalogService, LabelCatalog};
pub use label_service::LabelService;
