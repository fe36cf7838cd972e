use std::fmt;

use log::{debug, warn};

use crate::engine::{ENGINE, NumberCategory, NumberFormat};
use crate::parsed_number::ParsedNumber;
use crate::region_code;
use crate::{config, engine::ParseError};

/// A forgiving value wrapper around the engine: holds either a parsed
/// number or nothing, and never returns an error. Input that cannot be
/// interpreted collapses to the empty state, with the reason available in
/// the logs when debug is configured.
#[derive(Debug, Clone, Default, Eq)]
pub struct PhoneNumber {
    number: Option<ParsedNumber>,
    /// Region used to interpret raw values assigned later. Unknown regions
    /// collapse to `None` at assignment.
    default_region: Option<String>,
    raw_value: String,
}

impl PhoneNumber {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Interprets a raw string with an explicit region. Passing `None` (or
    /// a code outside the known region set) limits interpretation to
    /// internationally written numbers.
    pub fn new(raw_value: &str, region: Option<&str>) -> Self {
        let mut phone_number = Self {
            number: None,
            default_region: config::validated_region(region),
            raw_value: String::new(),
        };
        phone_number.set_raw_value(raw_value);
        phone_number
    }

    /// Interprets a raw string with the configured default region.
    pub fn from_raw(raw_value: &str) -> Self {
        let region = config::default_region();
        Self::new(raw_value, region.as_deref())
    }

    pub fn from_parsed(number: ParsedNumber) -> Self {
        Self {
            number: Some(number),
            default_region: None,
            raw_value: String::new(),
        }
    }

    /// Re-interprets the wrapper from a new raw value. A value that does
    /// not parse leaves the wrapper empty rather than failing.
    pub fn set_raw_value(&mut self, raw_value: &str) {
        self.raw_value = raw_value.to_string();
        if raw_value.trim().is_empty() {
            self.number = None;
            return;
        }
        match ENGINE.parse(raw_value, self.default_region.as_deref()) {
            Ok(number) => self.number = Some(number),
            Err(err) => {
                self.log_discarded(raw_value, err);
                self.number = None;
            }
        }
    }

    fn log_discarded(&self, raw_value: &str, err: ParseError) {
        if config::debug_enabled() {
            warn!("Discarding phone number input '{}': {}", raw_value, err);
        } else {
            debug!("Discarding phone number input '{}': {}", raw_value, err);
        }
    }

    /// Changes the region used for later raw assignments. Codes outside
    /// the known region set collapse to no region. The number already held
    /// is kept as parsed; its digits are not reinterpreted.
    pub fn set_region_code(&mut self, region: &str) {
        self.default_region = config::validated_region(Some(region));
    }

    pub fn is_empty(&self) -> bool {
        self.number.is_none()
    }

    pub fn raw_value(&self) -> &str {
        &self.raw_value
    }

    pub fn parsed(&self) -> Option<&ParsedNumber> {
        self.number.as_ref()
    }

    pub fn has_extension(&self) -> bool {
        self.extension().is_some()
    }

    pub fn extension(&self) -> Option<&str> {
        self.number.as_ref()?.extension()
    }

    /// The country calling code as digits, or `""` when empty.
    pub fn country_code(&self) -> String {
        match &self.number {
            Some(number) => number.country_code().to_string(),
            None => String::new(),
        }
    }

    /// The national significant number as digits, or `""` when empty.
    pub fn national_number(&self) -> String {
        match &self.number {
            Some(number) => number.national_significant_number(),
            None => String::new(),
        }
    }

    pub fn format(&self, number_format: NumberFormat) -> String {
        match &self.number {
            Some(number) => ENGINE.format(number, number_format),
            None => String::new(),
        }
    }

    /// The dialing string for someone calling from `region`, or `""` when
    /// empty.
    pub fn format_for_calling_from(&self, region: &str) -> String {
        match &self.number {
            Some(number) => ENGINE.format_for_calling_from(number, region),
            None => String::new(),
        }
    }

    /// The `+`-prefixed compact form, or `""` when empty.
    pub fn e164(&self) -> String {
        self.format(NumberFormat::E164)
    }

    pub fn international(&self) -> String {
        self.format(NumberFormat::International)
    }

    pub fn national(&self) -> String {
        self.format(NumberFormat::National)
    }

    pub fn rfc3966(&self) -> String {
        self.format(NumberFormat::Rfc3966)
    }

    /// The geographical region the number belongs to. Numbers of
    /// non-geographical plans (such as +800) have no region.
    pub fn region_code(&self) -> Option<&str> {
        let number = self.number.as_ref()?;
        ENGINE
            .region_code_for_number(number)
            .filter(|region| *region != region_code::NON_GEO_ENTITY)
    }

    pub fn category(&self) -> NumberCategory {
        match &self.number {
            Some(number) => ENGINE.number_category(number),
            None => NumberCategory::Unknown,
        }
    }

    pub fn is_valid(&self) -> bool {
        match &self.number {
            Some(number) => ENGINE.is_valid_number(number),
            None => false,
        }
    }

    /// Validity against one specific region's plan rather than whichever
    /// region claims the number.
    pub fn is_valid_for_region(&self, region: &str) -> bool {
        match &self.number {
            Some(number) => ENGINE.is_valid_number_for_region(number, region),
            None => false,
        }
    }
}

/// Displays as E.164, the only unambiguous single-string form; empty
/// wrappers display as the empty string.
impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.e164())
    }
}

// Two populated wrappers are the same number when their parsed forms agree;
// the raw text they came from is not part of identity. Two empty wrappers
// are equal when they carry the same region, so an empty RU wrapper and an
// empty US wrapper stay distinguishable. Empty never equals populated.
impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        match (&self.number, &other.number) {
            (Some(this), Some(that)) => this == that,
            (None, None) => self.default_region == other.default_region,
            _ => false,
        }
    }
}
