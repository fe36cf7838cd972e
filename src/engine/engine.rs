// Copyright (C) 2009 The Libphonenumber Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::collections::HashSet;

use log::{trace, warn};
use strum::IntoEnumIterator;

use crate::{
    interfaces::MatcherApi,
    metadata::{MetadataStore, NumberDesc, NumberFormatRule, RegionMetadata},
    parsed_number::ParsedNumber,
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{RegexConsume, RegexFullMatch},
    regexp_cache::InvalidRegexError,
    region_code,
};

use super::{
    NumberCategory, NumberFormat, NumberLengthType,
    errors::{ParseError, ParseErrorInternal},
    helpers::{
        desc_by_category, desc_has_data, normalize_helper, prefix_number_with_calling_code,
        test_number_length_with_unknown_category,
    },
    patterns::{
        DEFAULT_EXTN_PREFIX, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN, MIN_LENGTH_FOR_NSN,
        PhoneNumberPatterns, RFC3966_EXTN_PREFIX,
    },
};

type InternalResult<T> = Result<T, ParseErrorInternal>;

/// The interpretation engine: parses freeform input into [`ParsedNumber`]s
/// and answers validity, category, region and formatting questions about
/// them against the compiled-in metadata table.
pub struct PhoneNumberEngine {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Compiled regular expressions and character mappings.
    patterns: PhoneNumberPatterns,

    /// The numbering-plan table, indexed by region and by calling code.
    store: MetadataStore,
}

impl PhoneNumberEngine {
    pub(super) fn new() -> Self {
        let store = match MetadataStore::load_embedded() {
            Ok(store) => store,
            Err(err) => {
                let err_message = format!("Could not parse compiled-in metadata: {}", err);
                log::error!("{}", err_message);
                panic!("{}", err_message);
            }
        };
        Self::with_store(store)
    }

    /// Builds an engine over an alternate metadata table. The global
    /// [`ENGINE`](super::ENGINE) uses the compiled-in one.
    pub fn with_store(store: MetadataStore) -> Self {
        Self {
            matcher_api: Box::new(RegexBasedMatcher::new()),
            patterns: PhoneNumberPatterns::new(),
            store,
        }
    }

    fn expect_metadata_regex<T>(result: Result<T, InvalidRegexError>) -> T {
        result.unwrap_or_else(|err| {
            panic!(
                "A valid regex is expected in metadata; this indicates a library bug! {}",
                err
            )
        })
    }

    pub fn metadata_version(&self) -> &str {
        self.store.version()
    }

    pub fn is_known_region(&self, region: &str) -> bool {
        self.store.is_known_region(region)
    }

    pub fn supported_regions(&self) -> Vec<&str> {
        self.store.supported_regions().collect()
    }

    pub fn supported_calling_codes(&self) -> HashSet<u16> {
        self.store.supported_calling_codes().collect()
    }

    pub fn country_code_for_region(&self, region: &str) -> Option<u16> {
        self.store
            .lookup_by_region(region)
            .map(RegionMetadata::country_code)
    }

    /// The region that owns the formatting rules for a calling code. For
    /// shared codes this is the plan's main region, e.g. US for NANPA.
    pub fn main_region_for_calling_code(&self, calling_code: u16) -> Option<&str> {
        self.store.main_region_for_calling_code(calling_code)
    }

    /// The number categories a region has patterns for.
    pub fn supported_categories_for_region(
        &self,
        region: &str,
    ) -> Option<HashSet<NumberCategory>> {
        let Some(metadata) = self.store.lookup_by_region(region) else {
            warn!("Invalid or unknown region code provided: {}", region);
            return None;
        };
        Some(
            NumberCategory::iter()
                // FixedLineOrMobile is a convenience value and Unknown the
                // non-category; neither is backed by a description.
                .filter(|category| {
                    !matches!(
                        category,
                        NumberCategory::FixedLineOrMobile | NumberCategory::Unknown
                    )
                })
                .filter(|category| desc_has_data(desc_by_category(metadata, *category)))
                .collect(),
        )
    }

    /// A valid number of the region, taken from the metadata examples.
    pub fn example_number(&self, region: &str) -> Option<ParsedNumber> {
        let metadata = self.store.lookup_by_region(region)?;
        let example = metadata.general_desc().example_number();
        if example.is_empty() {
            return None;
        }
        self.parse(example, Some(region)).ok()
    }

    // --- Parsing ---------------------------------------------------------

    /// Parses a freeform string into a structured number. `default_region`
    /// supplies the numbering plan for input without a `+` or international
    /// dialling prefix; passing `None` (or the unknown region) restricts
    /// parsing to internationally written numbers.
    pub fn parse(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
    ) -> Result<ParsedNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false)
            .map_err(ParseErrorInternal::into_public)
    }

    /// Like [`Self::parse`], but records the verbatim input on the result.
    /// The raw input never takes part in number equality.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
    ) -> Result<ParsedNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true)
            .map_err(ParseErrorInternal::into_public)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: Option<&str>,
        keep_raw_input: bool,
    ) -> InternalResult<ParsedNumber> {
        if number_to_parse.trim().is_empty() {
            return Err(ParseError::InvalidLength.into());
        }
        let Some(extracted) = self.extract_possible_number(number_to_parse) else {
            trace!("No possible number extracted from '{}'", number_to_parse);
            return Err(ParseError::NotANumber.into());
        };
        if !self.is_viable_phone_number(extracted) {
            trace!("The string '{}' is not a viable phone number", extracted);
            return Err(ParseError::NotANumber.into());
        }

        let default_region = default_region.filter(|region| !region_code::is_unknown(region));
        let default_metadata = match default_region {
            Some(region) => {
                let metadata = self.store.lookup_by_region(region);
                if metadata.is_none() {
                    warn!("Unknown default region code provided: {}", region);
                }
                metadata
            }
            None => None,
        };

        let mut number = extracted.to_string();
        let extension = self.maybe_strip_extension(&mut number);

        let (country_code, mut national_number) =
            self.maybe_extract_country_code(&number, default_metadata)?;

        // National prefix stripping needs the metadata of the plan the
        // number actually belongs to, which may differ from the default
        // region when the input carried its own country code.
        let region_for_parsing = match default_metadata {
            Some(metadata) if metadata.country_code() == country_code => default_region,
            _ => self.store.main_region_for_calling_code(country_code),
        };
        let metadata = region_for_parsing
            .and_then(|region| self.store.metadata_for_region_or_calling_code(country_code, region));

        if let Some(metadata) = metadata {
            if let Some(stripped) =
                self.maybe_strip_national_prefix(&national_number, metadata)?
            {
                // Only accept the stripped form when it still has a fully
                // possible length; otherwise the prefix digits were part of
                // the subscriber number after all.
                if matches!(
                    test_number_length_with_unknown_category(&stripped, metadata),
                    Ok(NumberLengthType::IsPossible)
                ) {
                    national_number = stripped;
                }
            }
        }

        if national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShort.into());
        }
        if national_number.len() > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLong.into());
        }
        if let Some(metadata) = metadata {
            // Local-only lengths are accepted here: such numbers are
            // parseable and classifiable even though they are not valid
            // complete numbers.
            test_number_length_with_unknown_category(&national_number, metadata)
                .map_err(ParseErrorInternal::from)?;
        }

        let mut phone_number = ParsedNumber::default();
        phone_number.set_country_code(country_code);
        phone_number.set_national_number_from_digits(&national_number);
        if let Some(extension) = extension {
            phone_number.set_extension(extension);
        }
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_string());
        }
        Ok(phone_number)
    }

    /// Cuts the part of the input that can be a phone number: drops
    /// meaningless leading characters, anything following a second-number
    /// marker, and trailing characters that carry no number information.
    fn extract_possible_number<'b>(&self, number: &'b str) -> Option<&'b str> {
        let start = self.patterns.valid_start_char_pattern.find(number)?;
        let mut candidate = &number[start.start()..];

        if let Some(captures) = self
            .patterns
            .capture_up_to_second_number_start_pattern
            .captures(candidate)
        {
            if let Some(first_number) = captures.get(1) {
                candidate = first_number.as_str();
            }
        }

        if let Some(trailing) = self.patterns.unwanted_end_char_pattern.find(candidate) {
            candidate = &candidate[..trailing.start()];
        }

        if candidate.is_empty() {
            None
        } else {
            Some(candidate)
        }
    }

    fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.len() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.patterns.valid_phone_number_pattern.full_match(number)
    }

    /// Converts a number to pure ASCII digits. When at least three letters
    /// are present they carry digit information, so the keypad mapping is
    /// applied; otherwise letters and punctuation are dropped.
    fn normalize(&self, number: &str) -> String {
        if self.patterns.valid_alpha_phone_pattern.full_match(number) {
            normalize_helper(&self.patterns.alpha_phone_mappings, true, number)
        } else {
            Self::normalize_digits_only(number)
        }
    }

    fn normalize_digits_only(number: &str) -> String {
        let decimal_normalized = dec_from_char::normalize_decimals(number);
        decimal_normalized
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }

    /// Strips a trailing extension off the number, returning the extension
    /// digits when the remainder is still a viable number on its own.
    fn maybe_strip_extension(&self, number: &mut String) -> Option<String> {
        let (cut_at, extension) = {
            let captures = self.patterns.extn_pattern.captures(number)?;
            let full_match = captures.get(0)?;
            // There is one group per way of writing an extension; exactly
            // one of them participates in any match.
            let extension = (1..captures.len())
                .find_map(|i| captures.get(i))
                .map(|group| group.as_str().to_string())?;
            (full_match.start(), extension)
        };
        if !self.is_viable_phone_number(&number[..cut_at]) {
            return None;
        }
        number.truncate(cut_at);
        Some(extension)
    }

    /// Establishes the country calling code and returns it together with
    /// the remaining (normalized) national number.
    fn maybe_extract_country_code(
        &self,
        number: &str,
        default_metadata: Option<&RegionMetadata>,
    ) -> InternalResult<(u16, String)> {
        if let Some(plus) = self.patterns.plus_chars_pattern.find_start(number) {
            let normalized = self.normalize(&number[plus.end()..]);
            if normalized.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShort.into());
            }
            let (country_code, national) = self
                .extract_country_code(&normalized)
                .ok_or(ParseError::InvalidCountryCode)?;
            return Ok((country_code, national.to_string()));
        }

        let normalized = self.normalize(number);
        let Some(metadata) = default_metadata else {
            trace!("No default region and no leading plus; cannot infer country code");
            return Err(ParseError::InvalidCountryCode.into());
        };

        if let Some(rest) = self.maybe_strip_international_prefix(&normalized, metadata)? {
            if rest.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShort.into());
            }
            let (country_code, national) = self
                .extract_country_code(rest)
                .ok_or(ParseError::InvalidCountryCode)?;
            return Ok((country_code, national.to_string()));
        }

        Ok((metadata.country_code(), normalized))
    }

    /// Finds the shortest known calling code at the front of a digit
    /// string. Calling codes are prefix-free, so the first known prefix of
    /// up to three digits is the only possible reading.
    fn extract_country_code<'b>(&self, number: &'b str) -> Option<(u16, &'b str)> {
        // Country calling codes never begin with a zero.
        if number.starts_with('0') {
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(number.len()) {
            let (prefix, rest) = number.split_at(length);
            let Ok(code) = prefix.parse::<u16>() else {
                return None;
            };
            if !self.store.regions_for_calling_code(code).is_empty() {
                return Some((code, rest));
            }
        }
        None
    }

    /// Consumes the region's international dialling prefix when the digits
    /// start with one, returning the remainder.
    fn maybe_strip_international_prefix<'b>(
        &self,
        number: &'b str,
        metadata: &RegionMetadata,
    ) -> Result<Option<&'b str>, InvalidRegexError> {
        let international_prefix = metadata.international_prefix();
        if international_prefix.is_empty() {
            return Ok(None);
        }
        let regex = self
            .patterns
            .regexp_cache
            .get_regex_anchored(international_prefix)?;
        let Some(matched) = regex.find_start(number) else {
            return Ok(None);
        };
        let rest = &number[matched.end()..];
        // A zero straight after the prefix means we were looking at a
        // national prefix followed by a subscriber number instead.
        if rest.starts_with('0') {
            return Ok(None);
        }
        Ok(Some(rest))
    }

    /// Strips the region's national prefix, guarded so that digits which
    /// happen to look like the prefix but belong to the subscriber number
    /// are kept: a number matching the plan before stripping must still
    /// match afterwards.
    fn maybe_strip_national_prefix(
        &self,
        number: &str,
        metadata: &RegionMetadata,
    ) -> Result<Option<String>, InvalidRegexError> {
        let prefix_pattern = metadata.national_prefix_for_parsing();
        if prefix_pattern.is_empty() || number.is_empty() {
            return Ok(None);
        }
        let regex = self.patterns.regexp_cache.get_regex_anchored(prefix_pattern)?;
        let Some(matched) = regex.find_start(number) else {
            return Ok(None);
        };
        let stripped = &number[matched.end()..];
        if stripped.is_empty() {
            return Ok(None);
        }

        let general_desc = metadata.general_desc();
        let matched_before = self
            .matcher_api
            .match_national_number(number, general_desc, false);
        if matched_before
            && !self
                .matcher_api
                .match_national_number(stripped, general_desc, false)
        {
            return Ok(None);
        }
        Ok(Some(stripped.to_string()))
    }

    // --- Region resolution and classification ----------------------------

    /// The region a parsed number belongs to, or `None` when the calling
    /// code is unknown to the table. With a shared calling code the regions
    /// with narrower rules are consulted first; when none claims the number
    /// the plan's main region is assigned as the fallback.
    pub fn region_code_for_number(&self, phone_number: &ParsedNumber) -> Option<&str> {
        Self::expect_metadata_regex(self.region_code_for_number_internal(phone_number))
    }

    fn region_code_for_number_internal(
        &self,
        phone_number: &ParsedNumber,
    ) -> Result<Option<&str>, InvalidRegexError> {
        let country_code = phone_number.country_code();
        let regions = self.store.regions_for_calling_code(country_code);
        if regions.is_empty() {
            trace!("Missing/invalid country calling code ({})", country_code);
            return Ok(None);
        }
        if regions.len() == 1 {
            return Ok(Some(regions[0].as_str()));
        }

        let national_number = phone_number.national_significant_number();
        for region in regions {
            // Metadata cannot be absent: the candidate list is built from
            // the same table.
            let Some(metadata) = self.store.lookup_by_region(region) else {
                continue;
            };
            if let Some(leading_digits) = metadata.leading_digits() {
                if self
                    .patterns
                    .regexp_cache
                    .get_regex_anchored(leading_digits)?
                    .find_start(&national_number)
                    .is_some()
                {
                    return Ok(Some(region.as_str()));
                }
            } else if self.category_helper(&national_number, metadata) != NumberCategory::Unknown {
                return Ok(Some(region.as_str()));
            }
        }
        Ok(self.store.main_region_for_calling_code(country_code))
    }

    /// Classifies a parsed number within its numbering plan.
    pub fn number_category(&self, phone_number: &ParsedNumber) -> NumberCategory {
        Self::expect_metadata_regex(self.number_category_internal(phone_number))
    }

    fn number_category_internal(
        &self,
        phone_number: &ParsedNumber,
    ) -> Result<NumberCategory, InvalidRegexError> {
        let Some(region) = self.region_code_for_number_internal(phone_number)? else {
            return Ok(NumberCategory::Unknown);
        };
        let Some(metadata) = self
            .store
            .metadata_for_region_or_calling_code(phone_number.country_code(), region)
        else {
            return Ok(NumberCategory::Unknown);
        };
        let national_number = phone_number.national_significant_number();
        Ok(self.category_helper(&national_number, metadata))
    }

    /// Short numbers first, then the regular plan categories. Emergency
    /// numbers and short codes are shorter than anything the general
    /// description admits, so they are checked before its gate.
    fn category_helper(
        &self,
        national_number: &str,
        metadata: &RegionMetadata,
    ) -> NumberCategory {
        let short_category = self.short_category(national_number, metadata);
        if short_category != NumberCategory::Unknown {
            return short_category;
        }
        self.plan_category(national_number, metadata)
    }

    fn short_category(&self, national_number: &str, metadata: &RegionMetadata) -> NumberCategory {
        if self.is_number_matching_desc(national_number, metadata.emergency()) {
            trace!("Number '{national_number}' is an emergency number.");
            return NumberCategory::Emergency;
        }
        if self.is_number_matching_desc(national_number, metadata.short_code()) {
            trace!("Number '{national_number}' is a short code.");
            return NumberCategory::ShortCode;
        }
        if self.is_number_matching_desc(national_number, metadata.standard_rate()) {
            trace!("Number '{national_number}' is a standard rate number.");
            return NumberCategory::StandardRate;
        }
        NumberCategory::Unknown
    }

    /// The regular plan categories, gated by the general description: a
    /// number that fails it belongs to no category at all.
    fn plan_category(&self, national_number: &str, metadata: &RegionMetadata) -> NumberCategory {
        if !self.is_number_matching_desc(national_number, metadata.general_desc()) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match general national number pattern"
            );
            return NumberCategory::Unknown;
        }
        if self.is_number_matching_desc(national_number, metadata.premium_rate()) {
            trace!("Number '{national_number}' is a premium number.");
            return NumberCategory::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, metadata.toll_free()) {
            trace!("Number '{national_number}' is a toll-free number.");
            return NumberCategory::TollFree;
        }
        if self.is_number_matching_desc(national_number, metadata.shared_cost()) {
            trace!("Number '{national_number}' is a shared cost number.");
            return NumberCategory::SharedCost;
        }
        if self.is_number_matching_desc(national_number, metadata.voip()) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return NumberCategory::VoIP;
        }
        if self.is_number_matching_desc(national_number, metadata.personal_number()) {
            trace!("Number '{national_number}' is a personal number.");
            return NumberCategory::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, metadata.pager()) {
            trace!("Number '{national_number}' is a pager number.");
            return NumberCategory::Pager;
        }
        if self.is_number_matching_desc(national_number, metadata.uan()) {
            trace!("Number '{national_number}' is a UAN.");
            return NumberCategory::UAN;
        }
        if self.is_number_matching_desc(national_number, metadata.voicemail()) {
            trace!("Number '{national_number}' is a voicemail number.");
            return NumberCategory::VoiceMail;
        }

        if self.is_number_matching_desc(national_number, metadata.fixed_line()) {
            if metadata.same_mobile_and_fixed_line_pattern() {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns equal, \
                     number is fixed-line or mobile"
                );
                return NumberCategory::FixedLineOrMobile;
            }
            if self.is_number_matching_desc(national_number, metadata.mobile()) {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns differ, but number \
                     is still fixed-line or mobile"
                );
                return NumberCategory::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return NumberCategory::FixedLine;
        }
        // Only test mobile separately when certain the patterns differ.
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, metadata.mobile())
        {
            trace!("Number '{national_number}' is a mobile number.");
            return NumberCategory::Mobile;
        }
        trace!(
            "Number '{national_number}' type unknown - doesn't match any specific number type pattern."
        );
        NumberCategory::Unknown
    }

    fn is_number_matching_desc(&self, national_number: &str, number_desc: &NumberDesc) -> bool {
        // Possible lengths, when present, let us skip the pattern when they
        // cannot match. Absent lengths mean the description inherits from
        // the general one, which is checked separately.
        let actual_length = national_number.len() as u8;
        if !number_desc.possible_length().is_empty()
            && !number_desc.possible_length().contains(&actual_length)
        {
            return false;
        }
        self.matcher_api
            .match_national_number(national_number, number_desc, false)
    }

    // --- Validity --------------------------------------------------------

    /// Whether the number is a valid, complete number of some region under
    /// its calling code. Short numbers such as emergency codes are
    /// classifiable but not valid in this sense.
    pub fn is_valid_number(&self, phone_number: &ParsedNumber) -> bool {
        let Some(region) = self.region_code_for_number(phone_number) else {
            return false;
        };
        self.is_valid_number_for_region(phone_number, region)
    }

    /// Like [`Self::is_valid_number`], but against one specific region's
    /// plan. A number valid under a shared calling code is not necessarily
    /// valid for every region of that code.
    pub fn is_valid_number_for_region(&self, phone_number: &ParsedNumber, region: &str) -> bool {
        let Some(metadata) = self
            .store
            .metadata_for_region_or_calling_code(phone_number.country_code(), region)
        else {
            return false;
        };
        if metadata.country_code() != phone_number.country_code() {
            return false;
        }
        let national_number = phone_number.national_significant_number();
        self.plan_category(&national_number, metadata) != NumberCategory::Unknown
    }

    /// A cheaper test than validity: only the length is checked, not the
    /// digit patterns.
    pub fn is_possible_number(&self, phone_number: &ParsedNumber) -> bool {
        let country_code = phone_number.country_code();
        let Some(region) = self.store.main_region_for_calling_code(country_code) else {
            return false;
        };
        let Some(metadata) = self
            .store
            .metadata_for_region_or_calling_code(country_code, region)
        else {
            return false;
        };
        let national_number = phone_number.national_significant_number();
        test_number_length_with_unknown_category(&national_number, metadata).is_ok()
    }

    // --- Formatting ------------------------------------------------------

    /// Renders a parsed number in the requested format. Numbers whose
    /// calling code is unknown to the table come back as their bare
    /// significant digits.
    pub fn format(&self, phone_number: &ParsedNumber, number_format: NumberFormat) -> String {
        Self::expect_metadata_regex(self.format_internal(phone_number, number_format))
    }

    fn format_internal(
        &self,
        phone_number: &ParsedNumber,
        number_format: NumberFormat,
    ) -> Result<String, InvalidRegexError> {
        if phone_number.national_number().is_empty() {
            // Unparseable numbers that kept their raw input just use that.
            if let Some(raw_input) = phone_number.raw_input() {
                if !raw_input.is_empty() {
                    return Ok(raw_input.to_string());
                }
            }
        }
        let country_calling_code = phone_number.country_code();
        let mut formatted_number = phone_number.national_significant_number();

        if matches!(number_format, NumberFormat::E164) {
            // Early exit for E164 (even when the calling code is unknown):
            // no grouping is applied and extensions are not carried.
            prefix_number_with_calling_code(
                country_calling_code,
                NumberFormat::E164,
                &mut formatted_number,
            );
            return Ok(formatted_number);
        }

        // All formatting rules of a shared calling code live on its main
        // region, so NANPA numbers format through the US table and numbers
        // of the Russian plan through RU.
        let metadata = self
            .store
            .main_region_for_calling_code(country_calling_code)
            .and_then(|region| {
                self.store
                    .metadata_for_region_or_calling_code(country_calling_code, region)
            });
        let Some(metadata) = metadata else {
            return Ok(formatted_number);
        };

        formatted_number = self.format_nsn(&formatted_number, metadata, number_format)?;
        if let Some(formatted_extension) =
            Self::formatted_extension(phone_number, Some(metadata), number_format)
        {
            formatted_number.push_str(&formatted_extension);
        }
        prefix_number_with_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        Ok(formatted_number)
    }

    fn format_nsn(
        &self,
        number: &str,
        metadata: &RegionMetadata,
        number_format: NumberFormat,
    ) -> Result<String, InvalidRegexError> {
        let formatting_pattern =
            self.choose_formatting_pattern(metadata.number_formats(), number)?;
        match formatting_pattern {
            Some(formatting_pattern) => {
                self.format_nsn_using_pattern(number, formatting_pattern, number_format)
            }
            None => Ok(number.to_string()),
        }
    }

    fn choose_formatting_pattern<'b>(
        &self,
        available_formats: &'b [NumberFormatRule],
        national_number: &str,
    ) -> Result<Option<&'b NumberFormatRule>, InvalidRegexError> {
        for format in available_formats {
            // Only the last leading-digits entry is consulted; it is the
            // most detailed refinement.
            if let Some(leading_digits) = format.leading_digits().last() {
                let regex = self.patterns.regexp_cache.get_regex(leading_digits)?;
                if regex.find_start(national_number).is_none() {
                    continue;
                }
            }
            let pattern_to_match = self.patterns.regexp_cache.get_regex(format.pattern())?;
            if pattern_to_match.full_match(national_number) {
                return Ok(Some(format));
            }
        }
        Ok(None)
    }

    fn format_nsn_using_pattern(
        &self,
        national_number: &str,
        formatting_pattern: &NumberFormatRule,
        number_format: NumberFormat,
    ) -> Result<String, InvalidRegexError> {
        let mut number_format_rule: Cow<str> = Cow::Borrowed(match number_format {
            NumberFormat::National => formatting_pattern.format(),
            // International shapes prefer the dedicated template when the
            // rule carries one.
            _ => formatting_pattern
                .intl_format()
                .unwrap_or_else(|| formatting_pattern.format()),
        });

        if matches!(number_format, NumberFormat::National) {
            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();
            if !national_prefix_formatting_rule.is_empty() {
                // The formatting pattern only knows how to lay out the
                // significant digits; splice the prefix rule onto its first
                // substitution group.
                if let Cow::Owned(s) = self
                    .patterns
                    .first_group_capturing_pattern
                    .replace(&number_format_rule, national_prefix_formatting_rule)
                {
                    number_format_rule = Cow::Owned(s);
                }
            }
        }

        let pattern_to_match = self
            .patterns
            .regexp_cache
            .get_regex(formatting_pattern.pattern())?;
        let mut formatted_number = pattern_to_match
            .replace_all(national_number, number_format_rule.as_ref())
            .to_string();

        if matches!(number_format, NumberFormat::Rfc3966) {
            // First consume any leading punctuation, then turn the
            // remaining separators into hyphens.
            if let Some(leading_separator) =
                self.patterns.separator_pattern.find_start(&formatted_number)
            {
                formatted_number = formatted_number[leading_separator.end()..].to_string();
            }
            formatted_number = self
                .patterns
                .separator_pattern
                .replace_all(&formatted_number, "-")
                .to_string();
        }
        Ok(formatted_number)
    }

    fn formatted_extension(
        phone_number: &ParsedNumber,
        metadata: Option<&RegionMetadata>,
        number_format: NumberFormat,
    ) -> Option<String> {
        let extension = phone_number.extension()?;
        if extension.is_empty() {
            return None;
        }
        if matches!(number_format, NumberFormat::Rfc3966) {
            return Some(fast_cat::concat_str!(RFC3966_EXTN_PREFIX, extension));
        }
        let prefix = metadata
            .and_then(RegionMetadata::preferred_extn_prefix)
            .unwrap_or(DEFAULT_EXTN_PREFIX);
        Some(fast_cat::concat_str!(prefix, extension))
    }

    /// Formats a number the way someone in `calling_from` would dial it:
    /// nationally inside the same plan, with the caller's international
    /// dialling prefix when that prefix is a single fixed sequence, and in
    /// the generic `+`-prefixed form otherwise.
    pub fn format_for_calling_from(
        &self,
        phone_number: &ParsedNumber,
        calling_from: &str,
    ) -> String {
        Self::expect_metadata_regex(self.format_for_calling_from_internal(phone_number, calling_from))
    }

    fn format_for_calling_from_internal(
        &self,
        phone_number: &ParsedNumber,
        calling_from: &str,
    ) -> Result<String, InvalidRegexError> {
        let Some(from_metadata) = self.store.lookup_by_region(calling_from) else {
            warn!(
                "Invalid or unknown region code ({}) provided for origin",
                calling_from
            );
            return self.format_internal(phone_number, NumberFormat::International);
        };

        let country_calling_code = phone_number.country_code();
        if from_metadata.country_code() == country_calling_code {
            // Same plan, even across regions sharing the calling code:
            // dialled as a national call.
            return self.format_internal(phone_number, NumberFormat::National);
        }

        let international_prefix = from_metadata.international_prefix();
        if !self
            .patterns
            .single_international_prefix
            .full_match(international_prefix)
        {
            // The origin has several possible prefixes; fall back to the
            // universal form.
            return self.format_internal(phone_number, NumberFormat::International);
        }

        let national_number = phone_number.national_significant_number();
        let metadata = self
            .store
            .main_region_for_calling_code(country_calling_code)
            .and_then(|region| {
                self.store
                    .metadata_for_region_or_calling_code(country_calling_code, region)
            });
        let formatted_nsn = match metadata {
            Some(metadata) => {
                self.format_nsn(&national_number, metadata, NumberFormat::International)?
            }
            None => national_number,
        };

        let mut buf = itoa::Buffer::new();
        let calling_code_str = buf.format(country_calling_code);
        let mut formatted_number = fast_cat::concat_str!(
            international_prefix,
            " ",
            calling_code_str,
            " ",
            &formatted_nsn
        );
        if let Some(formatted_extension) =
            Self::formatted_extension(phone_number, metadata, NumberFormat::International)
        {
            formatted_number.push_str(&formatted_extension);
        }
        Ok(formatted_number)
    }
}
