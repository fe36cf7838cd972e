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

use std::hash::{Hash, Hasher};

/// The structured result of parsing: a country calling code plus the
/// national significant number, with leading zeros carried out of band so
/// they survive the digit representation.
#[derive(Debug, Clone, Default, Eq)]
pub struct ParsedNumber {
    country_code: u16,
    /// The national significant number with any leading zeros removed.
    /// Stored as digits so arbitrarily long numbers round-trip exactly.
    national_number: String,
    extension: Option<String>,
    /// In Italy and a few other plans a leading zero is a meaningful part
    /// of the subscriber number rather than a national prefix.
    italian_leading_zero: bool,
    number_of_leading_zeros: u8,
    /// The verbatim input this number was parsed from, when the caller
    /// asked for it to be kept. Never part of equality.
    raw_input: Option<String>,
}

impl ParsedNumber {
    pub fn country_code(&self) -> u16 {
        self.country_code
    }

    pub(crate) fn set_country_code(&mut self, country_code: u16) {
        self.country_code = country_code;
    }

    /// The stored digits, without leading zeros. Most callers want
    /// [`Self::national_significant_number`] instead.
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub(crate) fn set_extension(&mut self, extension: String) {
        self.extension = Some(extension);
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero
    }

    pub fn number_of_leading_zeros(&self) -> u8 {
        self.number_of_leading_zeros
    }

    pub fn raw_input(&self) -> Option<&str> {
        self.raw_input.as_deref()
    }

    pub(crate) fn set_raw_input(&mut self, raw_input: String) {
        self.raw_input = Some(raw_input);
    }

    /// Splits leading zeros off a digit string and records them separately.
    pub(crate) fn set_national_number_from_digits(&mut self, digits: &str) {
        let significant = digits.trim_start_matches('0');
        let leading_zeros = digits.len() - significant.len();
        self.national_number = significant.to_string();
        if leading_zeros > 0 {
            self.italian_leading_zero = true;
            self.number_of_leading_zeros = leading_zeros.min(u8::MAX as usize) as u8;
        } else {
            self.italian_leading_zero = false;
            self.number_of_leading_zeros = 0;
        }
    }

    /// The full national significant number, leading zeros included.
    pub fn national_significant_number(&self) -> String {
        if self.italian_leading_zero {
            let zeros = "0".repeat(self.number_of_leading_zeros as usize);
            fast_cat::concat_str!(&zeros, &self.national_number)
        } else {
            self.national_number.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country_code == 0 && self.national_number.is_empty()
    }
}

// Two numbers are the same when their dialable parts agree; the raw input a
// number was parsed from is context, not identity.
impl PartialEq for ParsedNumber {
    fn eq(&self, other: &Self) -> bool {
        self.country_code == other.country_code
            && self.national_number == other.national_number
            && self.extension == other.extension
            && self.italian_leading_zero == other.italian_leading_zero
            && self.number_of_leading_zeros == other.number_of_leading_zeros
    }
}

impl Hash for ParsedNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.country_code.hash(state);
        self.national_number.hash(state);
        self.extension.hash(state);
        self.italian_leading_zero.hash(state);
        self.number_of_leading_zeros.hash(state);
    }
}
