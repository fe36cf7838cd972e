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

use std::collections::HashMap;

use crate::metadata::{NumberDesc, RegionMetadata};

use super::{
    NumberCategory, NumberFormat, NumberLengthType,
    errors::LengthError,
    patterns::{PLUS_SIGN, RFC3966_PREFIX},
};

/// Returns the description inside the metadata of the appropriate category.
pub(super) fn desc_by_category(
    metadata: &RegionMetadata,
    category: NumberCategory,
) -> &NumberDesc {
    match category {
        NumberCategory::PremiumRate => metadata.premium_rate(),
        NumberCategory::TollFree => metadata.toll_free(),
        NumberCategory::Mobile => metadata.mobile(),
        NumberCategory::FixedLine | NumberCategory::FixedLineOrMobile => metadata.fixed_line(),
        NumberCategory::SharedCost => metadata.shared_cost(),
        NumberCategory::VoIP => metadata.voip(),
        NumberCategory::PersonalNumber => metadata.personal_number(),
        NumberCategory::Pager => metadata.pager(),
        NumberCategory::UAN => metadata.uan(),
        NumberCategory::VoiceMail => metadata.voicemail(),
        NumberCategory::Emergency => metadata.emergency(),
        NumberCategory::ShortCode => metadata.short_code(),
        NumberCategory::StandardRate => metadata.standard_rate(),
        NumberCategory::Unknown => metadata.general_desc(),
    }
}

/// Prepends the country calling code in the shape the chosen output format
/// requires. National format carries no calling code at all.
pub(super) fn prefix_number_with_calling_code(
    calling_code: u16,
    number_format: NumberFormat,
    formatted_number: &mut String,
) {
    let mut buf = itoa::Buffer::new();
    let calling_code_str = buf.format(calling_code);

    match number_format {
        NumberFormat::E164 => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, calling_code_str, &formatted_number);
        }
        NumberFormat::International => {
            *formatted_number =
                fast_cat::concat_str!(PLUS_SIGN, calling_code_str, " ", &formatted_number);
        }
        NumberFormat::Rfc3966 => {
            *formatted_number = fast_cat::concat_str!(
                RFC3966_PREFIX,
                PLUS_SIGN,
                calling_code_str,
                "-",
                &formatted_number
            );
        }
        NumberFormat::National => {}
    }
}

/// Rewrites a number through a character translation table. Characters with
/// no entry are dropped when `remove_non_matches` is set and kept verbatim
/// otherwise.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &str,
) -> String {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) =
            normalization_replacements.get(&phone_char.to_ascii_uppercase())
        {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
    }
    normalized_number
}

/// Returns `true` when a description carries enough data to decide length
/// questions for its category. A description with neither a pattern nor
/// lengths of its own means the region has no numbers of that category.
pub(super) fn desc_has_possible_number_data(desc: &NumberDesc) -> bool {
    desc.has_national_number_pattern() || !desc.possible_length().is_empty()
}

/// Returns `true` if a description defines any data at all for its
/// category, counting example numbers as data.
pub(super) fn desc_has_data(desc: &NumberDesc) -> bool {
    !desc.example_number().is_empty() || desc_has_possible_number_data(desc)
}

/// Checks a national significant number against the possible lengths for a
/// category, reporting whether it fits, and if not, in which direction it
/// misses.
pub(super) fn test_number_length(
    phone_number: &str,
    phone_metadata: &RegionMetadata,
    category: NumberCategory,
) -> Result<NumberLengthType, LengthError> {
    let desc_for_category = desc_by_category(phone_metadata, category);
    if !desc_has_possible_number_data(desc_for_category) {
        return Err(LengthError::InvalidLength);
    }
    // Where a sub-description has the same possible lengths as the general
    // description they are left out of the table, so we fall back.
    let mut possible_lengths: Vec<u8> = if desc_for_category.possible_length().is_empty() {
        phone_metadata.general_desc().possible_length().to_vec()
    } else {
        desc_for_category.possible_length().to_vec()
    };
    let mut local_lengths: Vec<u8> = desc_for_category.possible_length_local_only().to_vec();

    if category == NumberCategory::FixedLineOrMobile {
        if !desc_has_possible_number_data(phone_metadata.fixed_line()) {
            // No fixed-line data at all (true for some non-geographical
            // entities), so only mobile decides.
            return test_number_length(phone_number, phone_metadata, NumberCategory::Mobile);
        }
        let mobile_desc = phone_metadata.mobile();
        if desc_has_possible_number_data(mobile_desc) {
            let mobile_lengths = if mobile_desc.possible_length().is_empty() {
                phone_metadata.general_desc().possible_length()
            } else {
                mobile_desc.possible_length()
            };
            possible_lengths.extend_from_slice(mobile_lengths);
            possible_lengths.sort_unstable();
            local_lengths.extend_from_slice(mobile_desc.possible_length_local_only());
            local_lengths.sort_unstable();
        }
    }

    if possible_lengths.is_empty() {
        return Err(LengthError::InvalidLength);
    }

    let actual_length = phone_number.len() as u8;
    // Possible lengths and local-only lengths never overlap; this is
    // checked when the metadata table is assembled.
    if local_lengths.contains(&actual_length) {
        return Ok(NumberLengthType::IsPossibleLocalOnly);
    }

    let minimum_length = possible_lengths[0];
    if minimum_length == actual_length {
        return Ok(NumberLengthType::IsPossible);
    } else if minimum_length > actual_length {
        return Err(LengthError::TooShort);
    } else if possible_lengths[possible_lengths.len() - 1] < actual_length {
        return Err(LengthError::TooLong);
    }
    if possible_lengths[1..].contains(&actual_length) {
        Ok(NumberLengthType::IsPossible)
    } else {
        Err(LengthError::InvalidLength)
    }
}

/// Length check against the whole numbering plan rather than one category.
pub(super) fn test_number_length_with_unknown_category(
    phone_number: &str,
    phone_metadata: &RegionMetadata,
) -> Result<NumberLengthType, LengthError> {
    test_number_length(phone_number, phone_metadata, NumberCategory::Unknown)
}
