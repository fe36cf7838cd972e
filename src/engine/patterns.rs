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

use regex::Regex;

use crate::regexp_cache::RegexCache;

// The minimum and maximum length of the national significant number.
pub const MIN_LENGTH_FOR_NSN: usize = 2;
// The ITU says the maximum length should be 15, but we have found longer
// numbers in Germany.
pub const MAX_LENGTH_FOR_NSN: usize = 17;
/// The maximum length of the country calling code.
pub const MAX_LENGTH_COUNTRY_CODE: usize = 3;

pub const PLUS_SIGN: &str = "+";
pub const PLUS_CHARS: &str = "+\u{FF0B}";

// Regular expression of acceptable punctuation found in phone numbers. This
// excludes punctuation found as a leading character only. This consists of
// dash characters, white space characters, full stops, slashes, square
// brackets, parentheses and tildes. It also includes the letter 'x' as that
// is found as a placeholder for carrier information in some phone numbers.
// Full-width variants are also present.
pub const VALID_PUNCTUATION: &str = "-x\
\u{2010}-\u{2015}\u{2212}\u{30FC}\u{FF0D}-\u{FF0F} \u{00A0}\
\u{00AD}\u{200B}\u{2060}\u{3000}()\u{FF08}\u{FF09}\u{FF3B}\
\u{FF3D}.\\[\\]/~\u{2053}\u{223C}";

pub const STAR_SIGN: &str = "*";
pub const DIGITS: &str = r"\p{Nd}";
pub const VALID_ALPHA: &str = "a-z";

pub const RFC3966_PREFIX: &str = "tel:";
pub const RFC3966_EXTN_PREFIX: &str = ";ext=";

// Put in front of any extension component when formatting nationally, e.g.
// "044 668 1800 ext. 101".
pub const DEFAULT_EXTN_PREFIX: &str = " ext. ";

// All the ways an extension can be written after the main number. There are
// three capturing groups for the extension digits; MaybeStripExtension takes
// the first one that participated in the match. Group one covers the RFC 3966
// ";ext=" parameter, group two explicit and single-character labels, group
// three the American style where the extension trails after a separator and
// ends with a hash.
const EXTN_PATTERNS_FOR_PARSING: &str = "(?:\
;ext=(\\p{Nd}{1,7})|\
[ \u{00A0}\\t,]*(?:e?xt(?:ensio)?n?|\u{0434}\u{043E}\u{0431}|anexo|[x\u{FF58}#\u{FF03}~\u{FF5E}])\
[:\\.\u{FF0E}]?[ \u{00A0}\\t,-]*(\\p{Nd}{1,7})#?|\
[- ]+(\\p{Nd}{1,5})#)";

/// Compiled expressions and character mappings shared by the whole engine.
/// Built once; everything here is immutable afterwards.
pub(super) struct PhoneNumberPatterns {
    pub regexp_cache: RegexCache,

    /// Regular expression of viable phone numbers. This is location
    /// independent: at least the minimum number of digits with no
    /// punctuation, or three or more digits allowing punctuation, alpha
    /// characters and a leading plus.
    pub valid_phone_number_pattern: Regex,

    /// Matches extension suffixes at the end of a number being parsed.
    pub extn_pattern: Regex,

    /// One or more plus characters at the start of the input.
    pub plus_chars_pattern: Regex,

    /// Characters a phone number may meaningfully start with: digits and the
    /// plus sign. Everything before the first of these carries no
    /// information and is stripped.
    pub valid_start_char_pattern: Regex,

    /// Captures everything before a marker that likely starts a second
    /// number, such as "(530) 583-6985 x302/x2303".
    pub capture_up_to_second_number_start_pattern: Regex,

    /// Trailing characters to remove: anything that is not a letter, digit
    /// or the hash sign, which may terminate an extension.
    pub unwanted_end_char_pattern: Regex,

    /// Groups of punctuation acting as separators between digit blocks.
    pub separator_pattern: Regex,

    /// Matches when at least three letters appear among the digits, in
    /// which case the letters are carrying number information.
    pub valid_alpha_phone_pattern: Regex,

    /// The first substitution group of a format template, e.g. "$1". Used
    /// when splicing a national prefix rule into a format.
    pub first_group_capturing_pattern: Regex,

    /// Distinguishes regions with a single, directly dialable international
    /// prefix (digits, optionally split by a wait-for-tone tilde) from
    /// regions where the prefix field is itself a pattern.
    pub single_international_prefix: Regex,

    /// Keypad letter to digit translations, combined with the identity
    /// mapping for ASCII digits.
    pub alpha_phone_mappings: HashMap<char, char>,
}

fn build_alpha_phone_mappings() -> HashMap<char, char> {
    let mut mappings = HashMap::with_capacity(40);
    for (letters, digit) in [
        ("ABC", '2'),
        ("DEF", '3'),
        ("GHI", '4'),
        ("JKL", '5'),
        ("MNO", '6'),
        ("PQRS", '7'),
        ("TUV", '8'),
        ("WXYZ", '9'),
    ] {
        for letter in letters.chars() {
            mappings.insert(letter, digit);
        }
    }
    for digit in '0'..='9' {
        mappings.insert(digit, digit);
    }
    mappings
}

impl PhoneNumberPatterns {
    pub fn new() -> Self {
        let valid_phone_number = format!(
            // the bare short form is tried last so full numbers match first
            "[{plus}]*(?:[{punct}{star}]*{digits}){{3,}}[{punct}{star}{digits}{alpha}]*|{digits}{{{min_nsn}}}",
            plus = PLUS_CHARS,
            punct = VALID_PUNCTUATION,
            star = STAR_SIGN,
            digits = DIGITS,
            alpha = VALID_ALPHA,
            min_nsn = MIN_LENGTH_FOR_NSN,
        );

        Self {
            regexp_cache: RegexCache::with_capacity(128),
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^(?:{})(?:{})?$",
                valid_phone_number, EXTN_PATTERNS_FOR_PARSING
            ))
            .unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{})$", EXTN_PATTERNS_FOR_PARSING)).unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            valid_start_char_pattern: Regex::new(&format!("[{}{}]", PLUS_CHARS, DIGITS)).unwrap(),
            capture_up_to_second_number_start_pattern: Regex::new(r"(.*)[\\/] *x").unwrap(),
            unwanted_end_char_pattern: Regex::new(r"[^\p{N}\p{L}#]+$").unwrap(),
            separator_pattern: Regex::new(&format!("[{}]+", VALID_PUNCTUATION)).unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
            // $1 itself may be absent from some formats, so we match any
            // first substitution group instead.
            first_group_capturing_pattern: Regex::new(r"(\$\d)").unwrap(),
            single_international_prefix: Regex::new(
                "^[\\d]+(?:[~\u{2053}\u{223C}\u{FF5E}][\\d]+)?$",
            )
            .unwrap(),
            alpha_phone_mappings: build_alpha_phone_mappings(),
        }
    }
}
