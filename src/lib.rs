mod engine;
mod metadata;
mod interfaces;
mod parsed_number;
mod phone_number;
mod regex_based_matcher;
mod regexp_cache;
pub mod config;
pub mod region_code;
pub(crate) mod regex_util;

pub use engine::{NumberCategory, NumberFormat, NumberLengthType, ParseError, PhoneNumberEngine, ENGINE};
pub use metadata::{MetadataError, MetadataStore, NumberDesc, NumberFormatRule, RegionMetadata};
pub use parsed_number::ParsedNumber;
pub use phone_number::PhoneNumber;

#[cfg(test)]
mod tests;
