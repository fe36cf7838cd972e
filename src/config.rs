//! Process-wide interpretation settings: the region assumed for input
//! written in national form, and whether discarded parse errors should be
//! surfaced in the logs.

use std::sync::{LazyLock, PoisonError, RwLock};

use log::warn;

use crate::engine::ENGINE;
use crate::region_code;

/// The region assumed when nothing was configured.
pub const DEFAULT_REGION: &str = "RU";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Region for input without a `+` or international prefix. `None`
    /// restricts interpretation to internationally written numbers.
    pub default_region: Option<String>,
    /// When set, numbers that fail to parse are reported at warn level
    /// instead of being silently collapsed to the empty state.
    pub debug: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_region: Some(DEFAULT_REGION.to_string()),
            debug: false,
        }
    }
}

static CONFIG: LazyLock<RwLock<EngineConfig>> =
    LazyLock::new(|| RwLock::new(EngineConfig::default()));

/// Drops region values that can never be interpreted: the unknown sentinel
/// and codes absent from the metadata table. The same policy applies to
/// region assignment on [`crate::PhoneNumber`].
pub(crate) fn validated_region(region: Option<&str>) -> Option<String> {
    let region = region.filter(|region| !region_code::is_unknown(region))?;
    if !ENGINE.is_known_region(region) {
        warn!("Ignoring unknown region code: {}", region);
        return None;
    }
    Some(region.to_string())
}

/// Replaces the whole configuration.
pub fn configure(mut config: EngineConfig) {
    config.default_region = validated_region(config.default_region.as_deref());
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = config;
}

pub fn set_default_region(region: Option<&str>) {
    CONFIG
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .default_region = validated_region(region);
}

pub fn set_debug(debug: bool) {
    CONFIG.write().unwrap_or_else(PoisonError::into_inner).debug = debug;
}

pub fn default_region() -> Option<String> {
    CONFIG
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .default_region
        .clone()
}

pub fn debug_enabled() -> bool {
    CONFIG.read().unwrap_or_else(PoisonError::into_inner).debug
}
