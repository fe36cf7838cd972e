mod model;
mod store;

pub use model::{NumberDesc, NumberFormatRule, RegionMetadata};
pub use store::{MetadataError, MetadataStore};
