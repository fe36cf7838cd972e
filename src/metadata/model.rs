use serde::Deserialize;

/// A pattern and length description for one category of numbers within a
/// region, such as its mobile or toll-free range.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NumberDesc {
    national_number_pattern: Option<String>,
    possible_length: Vec<u8>,
    possible_length_local_only: Vec<u8>,
    example_number: Option<String>,
}

impl NumberDesc {
    pub fn national_number_pattern(&self) -> &str {
        self.national_number_pattern.as_deref().unwrap_or("")
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    pub fn possible_length(&self) -> &[u8] {
        &self.possible_length
    }

    pub fn possible_length_local_only(&self) -> &[u8] {
        &self.possible_length_local_only
    }

    pub fn example_number(&self) -> &str {
        self.example_number.as_deref().unwrap_or("")
    }
}

/// One formatting rule: a capture pattern over the national significant
/// number plus the template its groups are substituted into.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NumberFormatRule {
    pattern: String,
    format: String,
    leading_digits: Vec<String>,
    national_prefix_formatting_rule: Option<String>,
    intl_format: Option<String>,
}

impl NumberFormatRule {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Successive refinements of the leading-digit guard. Only the last
    /// entry is authoritative when picking a rule.
    pub fn leading_digits(&self) -> &[String] {
        &self.leading_digits
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        self.national_prefix_formatting_rule.as_deref().unwrap_or("")
    }

    /// The template for international output, when it differs from the
    /// national one.
    pub fn intl_format(&self) -> Option<&str> {
        self.intl_format.as_deref()
    }
}

/// The complete numbering-plan record for one region.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegionMetadata {
    id: String,
    country_code: u16,
    main_country_for_code: bool,
    international_prefix: Option<String>,
    national_prefix: Option<String>,
    national_prefix_for_parsing: Option<String>,
    preferred_extn_prefix: Option<String>,
    leading_digits: Option<String>,
    general: NumberDesc,
    fixed_line: NumberDesc,
    mobile: NumberDesc,
    toll_free: NumberDesc,
    premium_rate: NumberDesc,
    shared_cost: NumberDesc,
    voip: NumberDesc,
    personal_number: NumberDesc,
    pager: NumberDesc,
    uan: NumberDesc,
    voicemail: NumberDesc,
    emergency: NumberDesc,
    short_code: NumberDesc,
    standard_rate: NumberDesc,
    same_mobile_and_fixed_line_pattern: bool,
    number_formats: Vec<NumberFormatRule>,
}

impl RegionMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    pub fn is_main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn international_prefix(&self) -> &str {
        self.international_prefix.as_deref().unwrap_or("")
    }

    pub fn national_prefix(&self) -> &str {
        self.national_prefix.as_deref().unwrap_or("")
    }

    pub fn has_national_prefix(&self) -> bool {
        self.national_prefix.is_some()
    }

    /// The pattern stripped from the front of national input. Falls back to
    /// the plain national prefix when no dedicated parsing pattern is set.
    pub fn national_prefix_for_parsing(&self) -> &str {
        self.national_prefix_for_parsing
            .as_deref()
            .or(self.national_prefix.as_deref())
            .unwrap_or("")
    }

    /// The extension separator customary in this region, when it differs
    /// from the default " ext. ".
    pub fn preferred_extn_prefix(&self) -> Option<&str> {
        self.preferred_extn_prefix.as_deref()
    }

    /// Set only for regions sharing a calling code with a main region;
    /// narrows which national numbers belong here.
    pub fn leading_digits(&self) -> Option<&str> {
        self.leading_digits.as_deref()
    }

    pub fn general_desc(&self) -> &NumberDesc {
        &self.general
    }

    pub fn fixed_line(&self) -> &NumberDesc {
        &self.fixed_line
    }

    pub fn mobile(&self) -> &NumberDesc {
        &self.mobile
    }

    pub fn toll_free(&self) -> &NumberDesc {
        &self.toll_free
    }

    pub fn premium_rate(&self) -> &NumberDesc {
        &self.premium_rate
    }

    pub fn shared_cost(&self) -> &NumberDesc {
        &self.shared_cost
    }

    pub fn voip(&self) -> &NumberDesc {
        &self.voip
    }

    pub fn personal_number(&self) -> &NumberDesc {
        &self.personal_number
    }

    pub fn pager(&self) -> &NumberDesc {
        &self.pager
    }

    pub fn uan(&self) -> &NumberDesc {
        &self.uan
    }

    pub fn voicemail(&self) -> &NumberDesc {
        &self.voicemail
    }

    pub fn emergency(&self) -> &NumberDesc {
        &self.emergency
    }

    pub fn short_code(&self) -> &NumberDesc {
        &self.short_code
    }

    pub fn standard_rate(&self) -> &NumberDesc {
        &self.standard_rate
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn number_formats(&self) -> &[NumberFormatRule] {
        &self.number_formats
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetadataFile {
    pub version: String,
    pub regions: Vec<RegionMetadata>,
}
