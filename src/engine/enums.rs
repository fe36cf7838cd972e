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

use strum::EnumIter;

/// The standardized output shapes for a phone number.
///
/// `International` and `National` follow the ITU-T E.123 recommendation,
/// using the separators customary in the number's own region.
///
/// For the Google Switzerland office number:
/// - **International**: `+41 44 668 1800`
/// - **National**: `044 668 1800`
/// - **E164**: `+41446681800`
/// - **Rfc3966**: `tel:+41-44-668-1800`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    /// The compact international form: a `+`, the country calling code and
    /// the national significant number, with no separators and no extension.
    E164,
    /// The display form for dialling from abroad, starting with `+` and the
    /// country calling code.
    International,
    /// The display form for dialling within the number's own region. May
    /// include a national prefix such as `0`.
    National,
    /// The `tel:` URI form, with hyphens between groups and the extension
    /// carried as an `;ext=` parameter.
    Rfc3966,
}

/// Categorizes numbers by their use within a numbering plan.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberCategory {
    /// Traditional landline numbers tied to a geographic area.
    FixedLine,
    /// Numbers assigned to wireless devices.
    Mobile,
    /// Returned in regions (e.g. the USA) where fixed-line and mobile
    /// numbers cannot be told apart by their digits alone.
    FixedLineOrMobile,
    /// Calls are free for the caller; the recipient pays.
    TollFree,
    /// Calls are charged above the normal rate.
    PremiumRate,
    /// The call cost is split between caller and recipient.
    SharedCost,
    /// Numbers routed over the internet.
    VoIP,
    /// A number attached to a person rather than a line, routed to
    /// whatever destination its owner configured.
    PersonalNumber,
    /// Numbers for paging devices.
    Pager,
    /// Universal access numbers routed by a company to varying offices.
    UAN,
    /// Direct voicemail access numbers.
    VoiceMail,
    /// Emergency services, such as 112 or 911. These are shorter than any
    /// dialable subscriber number.
    Emergency,
    /// Short codes carrier services are reached on within a region.
    ShortCode,
    /// Short numbers billed at the standard rate.
    StandardRate,
    /// The number does not match any pattern of its numbering plan.
    Unknown,
}

/// The possible outcomes when a number's length is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberLengthType {
    /// The length matches a complete, dialable number of the region.
    IsPossible,
    /// The length is only valid for local dialling, without the area code.
    IsPossibleLocalOnly,
}
