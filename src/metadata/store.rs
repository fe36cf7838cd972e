use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use crate::region_code;

use super::model::{MetadataFile, RegionMetadata};

const EMBEDDED_METADATA: &str = include_str!("../../assets/metadata.json");

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Could not deserialize metadata: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("Region {0} appears more than once in the metadata")]
    DuplicateRegion(String),
}

/// The in-memory numbering-plan table. Built once at startup and only read
/// afterwards, so lookups need no locking.
pub struct MetadataStore {
    by_region: HashMap<String, RegionMetadata>,
    /// Region ids per calling code, in asset order with the main region
    /// moved to the back. Resolution tries each in turn, so specific
    /// regions win and the main region is the fallback.
    by_calling_code: HashMap<u16, Vec<String>>,
    version: String,
}

impl MetadataStore {
    /// Loads the metadata table compiled into the binary.
    pub fn load_embedded() -> Result<Self, MetadataError> {
        Self::from_json(EMBEDDED_METADATA)
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        let file: MetadataFile = serde_json::from_str(json)?;
        Self::from_regions(file.regions, file.version)
    }

    fn from_regions(
        regions: Vec<RegionMetadata>,
        version: String,
    ) -> Result<Self, MetadataError> {
        let mut by_region = HashMap::with_capacity(regions.len());
        let mut by_calling_code: HashMap<u16, Vec<String>> = HashMap::new();

        for region in regions {
            let id = region.id().to_string();
            let calling_code = region.country_code();
            let entry = by_calling_code.entry(calling_code).or_default();
            if region.is_main_country_for_code() {
                entry.push(id.clone());
            } else {
                // Keep non-main regions ahead of the main one so the more
                // specific plans are consulted first.
                let insert_at = entry
                    .iter()
                    .position(|existing| {
                        by_region
                            .get(existing)
                            .is_some_and(RegionMetadata::is_main_country_for_code)
                    })
                    .unwrap_or(entry.len());
                entry.insert(insert_at, id.clone());
            }
            if by_region.insert(id.clone(), region).is_some() {
                return Err(MetadataError::DuplicateRegion(id));
            }
        }

        debug!(
            "Loaded metadata version {} covering {} regions",
            version,
            by_region.len()
        );
        Ok(Self {
            by_region,
            by_calling_code,
            version,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn lookup_by_region(&self, region: &str) -> Option<&RegionMetadata> {
        self.by_region.get(region)
    }

    /// All candidate regions for a calling code, most specific first and
    /// the main region last.
    pub fn regions_for_calling_code(&self, calling_code: u16) -> &[String] {
        self.by_calling_code
            .get(&calling_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn main_region_for_calling_code(&self, calling_code: u16) -> Option<&str> {
        self.regions_for_calling_code(calling_code)
            .last()
            .map(String::as_str)
    }

    /// The record for a non-geographical calling code, such as 800.
    pub fn lookup_non_geo(&self, calling_code: u16) -> Option<&RegionMetadata> {
        let regions = self.regions_for_calling_code(calling_code);
        match regions {
            [single] if single == region_code::NON_GEO_ENTITY => self.lookup_by_region(single),
            _ => None,
        }
    }

    pub fn is_known_region(&self, region: &str) -> bool {
        self.by_region.contains_key(region)
    }

    pub fn supported_regions(&self) -> impl Iterator<Item = &str> {
        self.by_region
            .keys()
            .map(String::as_str)
            .filter(|id| *id != region_code::NON_GEO_ENTITY)
    }

    pub fn supported_calling_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.by_calling_code.keys().copied()
    }

    /// Fetches metadata either by geographical region or, for the
    /// non-geographical pseudo-region, by calling code.
    pub fn metadata_for_region_or_calling_code(
        &self,
        calling_code: u16,
        region: &str,
    ) -> Option<&RegionMetadata> {
        if region == region_code::NON_GEO_ENTITY {
            self.lookup_non_geo(calling_code)
        } else {
            self.lookup_by_region(region)
        }
    }
}
