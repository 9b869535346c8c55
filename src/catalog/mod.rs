pub mod builder;
pub mod cache;
pub mod classify;
pub mod evaluator;
pub mod render;
pub mod schema;
pub mod variants;

pub use builder::{Catalog, build_catalog};
pub use cache::CatalogCache;
pub use render::OperationRecord;
