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

use thiserror::Error;

use crate::regexp_cache::InvalidRegexError;

/// The reasons an input string can be rejected by parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// No country calling code could be established: the input had no
    /// recognizable code after `+` or an international dialling prefix, and
    /// no default region was supplied to fall back on.
    #[error("Invalid country calling code")]
    InvalidCountryCode,
    /// The national number is shorter than any valid number of its region.
    #[error("The string supplied is too short to be a phone number")]
    TooShort,
    /// The national number is longer than any valid number of its region.
    #[error("The string supplied is too long to be a phone number")]
    TooLong,
    /// The national number sits between the region's shortest and longest
    /// valid lengths without matching any of them.
    #[error("The string supplied does not have a valid length for its region")]
    InvalidLength,
    /// The input does not look like a phone number at all.
    #[error("The string supplied did not seem to be a phone number")]
    NotANumber,
}

/// Length check failures, before they are folded into [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub(crate) enum LengthError {
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
    #[error("The number length matches no valid number for this region")]
    InvalidLength,
}

impl From<LengthError> for ParseError {
    fn from(value: LengthError) -> Self {
        match value {
            LengthError::TooShort => ParseError::TooShort,
            LengthError::TooLong => ParseError::TooLong,
            LengthError::InvalidLength => ParseError::InvalidLength,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ParseErrorInternal {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Regex(#[from] InvalidRegexError),
}

impl From<LengthError> for ParseErrorInternal {
    fn from(value: LengthError) -> Self {
        ParseErrorInternal::Parse(value.into())
    }
}

impl ParseErrorInternal {
    /// Splits a metadata regex failure off from ordinary parse errors. The
    /// patterns come from the compiled-in table, so a failure to build one
    /// is a library bug rather than a condition the caller can handle.
    pub fn into_public(self) -> ParseError {
        match self {
            ParseErrorInternal::Parse(err) => err,
            ParseErrorInternal::Regex(err) => {
                panic!(
                    "A valid regex is expected in metadata; this indicates a library bug! {}",
                    err
                )
            }
        }
    }
}
