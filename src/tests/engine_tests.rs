use crate::engine::{NumberCategory, NumberFormat, ParseError};
use crate::parsed_number::ParsedNumber;

use super::{get_engine, region_code::RegionCode};

fn parse(number: &str, region: Option<&str>) -> ParsedNumber {
    get_engine()
        .parse(number, region)
        .unwrap_or_else(|err| panic!("Could not parse '{}': {}", number, err))
}

// --- Parsing -------------------------------------------------------------

#[test]
fn parses_international_form_without_default_region() {
    let number = parse("+41 44 668 18 00", None);
    assert_eq!(number.country_code(), 41);
    assert_eq!(number.national_significant_number(), "446681800");
}

#[test]
fn parses_national_form_with_default_region() {
    let number = parse("044 668 18 00", Some(RegionCode::ch()));
    assert_eq!(number.country_code(), 41);
    assert_eq!(number.national_significant_number(), "446681800");
}

#[test]
fn national_prefix_is_stripped() {
    let number = parse("8 (495) 123-45-67", Some(RegionCode::ru()));
    assert_eq!(number.country_code(), 7);
    assert_eq!(number.national_significant_number(), "4951234567");
}

#[test]
fn national_prefix_lookalike_digits_are_kept() {
    // The 8 here is the first digit of the toll-free number, not the
    // Russian national prefix; stripping it would leave nothing valid.
    let number = parse("+7 800 123-45-67", Some(RegionCode::ru()));
    assert_eq!(number.national_significant_number(), "8001234567");
    assert_eq!(get_engine().number_category(&number), NumberCategory::TollFree);
}

#[test]
fn international_dialling_prefix_is_stripped() {
    let number = parse("011 41 44 668 1800", Some(RegionCode::us()));
    assert_eq!(number.country_code(), 41);
    assert_eq!(number.national_significant_number(), "446681800");

    let number = parse("00 1 650 253 0000", Some(RegionCode::ch()));
    assert_eq!(number.country_code(), 1);
    assert_eq!(number.national_significant_number(), "6502530000");
}

#[test]
fn italian_leading_zero_is_preserved() {
    let number = parse("02 3661 8300", Some(RegionCode::it()));
    assert_eq!(number.country_code(), 39);
    assert!(number.italian_leading_zero());
    assert_eq!(number.number_of_leading_zeros(), 1);
    assert_eq!(number.national_significant_number(), "0236618300");
}

#[test]
fn alpha_characters_map_to_keypad_digits() {
    let number = parse("1-800-FLOWERS", Some(RegionCode::us()));
    assert_eq!(number.national_significant_number(), "8003569377");
    assert_eq!(get_engine().number_category(&number), NumberCategory::TollFree);
}

#[test]
fn extension_is_split_off() {
    let number = parse("044 668 1800 ext. 101", Some(RegionCode::ch()));
    assert_eq!(number.national_significant_number(), "446681800");
    assert_eq!(number.extension(), Some("101"));

    let number = parse("+41446681800x26", None);
    assert_eq!(number.extension(), Some("26"));
}

#[test]
fn second_number_is_cut_off() {
    let number = parse("+41 44 668 1800/ x26", None);
    assert_eq!(number.national_significant_number(), "446681800");
}

#[test]
fn raw_input_is_kept_on_request_only() {
    let engine = get_engine();
    let kept = engine
        .parse_and_keep_raw_input("+41 44 668 18 00", None)
        .unwrap();
    assert_eq!(kept.raw_input(), Some("+41 44 668 18 00"));

    let plain = parse("+41 44 668 18 00", None);
    assert_eq!(plain.raw_input(), None);
    // Raw input never takes part in identity.
    assert_eq!(kept, plain);
}

#[test]
fn equal_numbers_written_differently_compare_equal() {
    let international = parse("+41 44 668 18 00", None);
    let national = parse("044-668-18-00", Some(RegionCode::ch()));
    assert_eq!(international, national);
}

#[test]
fn rejects_garbage_as_not_a_number() {
    let engine = get_engine();
    assert_eq!(
        engine.parse("NotPhoneNumber", Some(RegionCode::us())),
        Err(ParseError::NotANumber)
    );
    assert_eq!(engine.parse("abc", Some(RegionCode::us())), Err(ParseError::NotANumber));
    assert_eq!(engine.parse("1", Some(RegionCode::us())), Err(ParseError::NotANumber));
}

#[test]
fn rejects_blank_input_as_invalid_length() {
    let engine = get_engine();
    assert_eq!(
        engine.parse("", Some(RegionCode::us())),
        Err(ParseError::InvalidLength)
    );
    assert_eq!(
        engine.parse("   \t ", Some(RegionCode::us())),
        Err(ParseError::InvalidLength)
    );
}

#[test]
fn rejects_unknown_country_code() {
    let engine = get_engine();
    assert_eq!(
        engine.parse("+999 123 456 789", None),
        Err(ParseError::InvalidCountryCode)
    );
    // National form without any region to interpret it against.
    assert_eq!(
        engine.parse("253 0000", None),
        Err(ParseError::InvalidCountryCode)
    );
}

#[test]
fn rejects_wrong_lengths() {
    let engine = get_engine();
    assert_eq!(
        engine.parse("+1 253 000", Some(RegionCode::us())),
        Err(ParseError::TooShort)
    );
    assert_eq!(
        engine.parse("+41 44 668 1800 000 000 000", None),
        Err(ParseError::TooLong)
    );
}

#[test]
fn local_only_lengths_parse_but_are_not_valid() {
    let engine = get_engine();
    let number = parse("253 0000", Some(RegionCode::us()));
    assert_eq!(number.national_significant_number(), "2530000");
    assert!(!engine.is_valid_number(&number));
    assert!(engine.is_possible_number(&number));
}

// --- Region resolution ---------------------------------------------------

#[test]
fn resolves_regions_of_shared_calling_code() {
    let engine = get_engine();
    let number = parse("+1 650 253 0000", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::us()));

    let number = parse("+1 204 234 5678", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::ca()));

    let number = parse("+1 242 345 6789", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::bs()));

    // Toll-free numbers exist only in the main region's table, so the
    // narrower regions pass and US claims the number last.
    let number = parse("+1 800 274 2333", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::us()));
}

#[test]
fn resolves_regions_by_leading_digits() {
    let engine = get_engine();
    let number = parse("+44 1624 756789", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::im()));

    let number = parse("+44 7624 987654", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::im()));

    let number = parse("+44 7912 345678", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::gb()));
}

#[test]
fn resolves_russian_plan_regions() {
    let engine = get_engine();
    let number = parse("+7 717 212 3456", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::kz()));

    let number = parse("+7 912 345 6789", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::ru()));
}

#[test]
fn resolves_non_geographical_entity() {
    let engine = get_engine();
    let number = parse("+800 1234 5678", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::un001()));
}

#[test]
fn short_numbers_resolve_their_region() {
    let engine = get_engine();
    let number = parse("911", Some(RegionCode::us()));
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::us()));
}

#[test]
fn unclaimed_numbers_fall_back_to_the_main_region() {
    let engine = get_engine();
    // Ten digits, but NANPA numbers never start with 1: no candidate
    // claims the number, so the plan's main region is assigned. It still
    // classifies as nothing and stays invalid.
    let number = parse("+1 123 456 7890", None);
    assert_eq!(engine.region_code_for_number(&number), Some(RegionCode::us()));
    assert_eq!(engine.number_category(&number), NumberCategory::Unknown);
    assert!(!engine.is_valid_number(&number));
}

// --- Classification ------------------------------------------------------

#[test]
fn classifies_fixed_line_and_mobile() {
    let engine = get_engine();
    assert_eq!(
        engine.number_category(&parse("+41 44 668 18 00", None)),
        NumberCategory::FixedLine
    );
    assert_eq!(
        engine.number_category(&parse("+41 78 123 45 67", None)),
        NumberCategory::Mobile
    );
    assert_eq!(
        engine.number_category(&parse("+7 495 123 45 67", None)),
        NumberCategory::FixedLine
    );
    assert_eq!(
        engine.number_category(&parse("+7 912 345 67 89", None)),
        NumberCategory::Mobile
    );
    // NANPA uses one pattern for both.
    assert_eq!(
        engine.number_category(&parse("+1 650 253 0000", None)),
        NumberCategory::FixedLineOrMobile
    );
}

#[test]
fn classifies_special_rate_categories() {
    let engine = get_engine();
    assert_eq!(
        engine.number_category(&parse("+1 900 253 0000", None)),
        NumberCategory::PremiumRate
    );
    assert_eq!(
        engine.number_category(&parse("+1 500 234 5678", None)),
        NumberCategory::PersonalNumber
    );
    assert_eq!(
        engine.number_category(&parse("+41 800 123 456", None)),
        NumberCategory::TollFree
    );
    assert_eq!(
        engine.number_category(&parse("+41 844 123 456", None)),
        NumberCategory::SharedCost
    );
    assert_eq!(
        engine.number_category(&parse("+41 878 123 456", None)),
        NumberCategory::VoIP
    );
    assert_eq!(
        engine.number_category(&parse("+41 58 123 45 67", None)),
        NumberCategory::UAN
    );
    assert_eq!(
        engine.number_category(&parse("+800 1234 5678", None)),
        NumberCategory::TollFree
    );
}

#[test]
fn classifies_short_numbers_before_the_general_gate() {
    let engine = get_engine();
    // Far shorter than anything the general description admits, so the
    // short-number categories have to be consulted first.
    assert_eq!(
        engine.number_category(&parse("911", Some(RegionCode::us()))),
        NumberCategory::Emergency
    );
    assert_eq!(
        engine.number_category(&parse("112", Some(RegionCode::ch()))),
        NumberCategory::Emergency
    );
    assert_eq!(
        engine.number_category(&parse("999", Some(RegionCode::gb()))),
        NumberCategory::Emergency
    );
    assert_eq!(
        engine.number_category(&parse("150", Some(RegionCode::gb()))),
        NumberCategory::ShortCode
    );
}

// --- Validity ------------------------------------------------------------

#[test]
fn validates_complete_numbers() {
    let engine = get_engine();
    assert!(engine.is_valid_number(&parse("+41 44 668 18 00", None)));
    assert!(engine.is_valid_number(&parse("+1 650 253 0000", None)));
    assert!(engine.is_valid_number(&parse("+44 7912 345678", None)));
    assert!(engine.is_valid_number(&parse("+39 02 3661 8300", None)));
    assert!(engine.is_valid_number(&parse("+800 1234 5678", None)));
}

#[test]
fn short_numbers_are_classifiable_but_not_valid() {
    let engine = get_engine();
    let number = parse("911", Some(RegionCode::us()));
    assert_eq!(engine.number_category(&number), NumberCategory::Emergency);
    assert!(!engine.is_valid_number(&number));
}

#[test]
fn validity_is_region_specific_under_a_shared_code() {
    let engine = get_engine();
    let number = parse("+44 1624 756789", None);
    assert!(engine.is_valid_number(&number));
    assert!(engine.is_valid_number_for_region(&number, RegionCode::im()));
    // The Manx block is carved out of the British patterns.
    assert!(!engine.is_valid_number_for_region(&number, RegionCode::gb()));

    let number = parse("+1 650 253 0000", None);
    assert!(engine.is_valid_number_for_region(&number, RegionCode::us()));
    assert!(!engine.is_valid_number_for_region(&number, RegionCode::ca()));
    // A region of a different calling code can never claim the number.
    assert!(!engine.is_valid_number_for_region(&number, RegionCode::ch()));
}

#[test]
fn possible_is_weaker_than_valid() {
    let engine = get_engine();
    let number = parse("+1 123 456 7890", None);
    assert!(engine.is_possible_number(&number));
    assert!(!engine.is_valid_number(&number));
}

// --- Formatting ----------------------------------------------------------

#[test]
fn formats_swiss_numbers() {
    let engine = get_engine();
    let number = parse("+41446681800", None);
    assert_eq!(engine.format(&number, NumberFormat::E164), "+41446681800");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+41 44 668 1800"
    );
    assert_eq!(engine.format(&number, NumberFormat::National), "044 668 1800");
    assert_eq!(
        engine.format(&number, NumberFormat::Rfc3966),
        "tel:+41-44-668-1800"
    );
}

#[test]
fn formats_nanpa_numbers() {
    let engine = get_engine();
    let number = parse("+16502530000", None);
    assert_eq!(engine.format(&number, NumberFormat::E164), "+16502530000");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+1 650-253-0000"
    );
    assert_eq!(engine.format(&number, NumberFormat::National), "(650) 253-0000");
    assert_eq!(
        engine.format(&number, NumberFormat::Rfc3966),
        "tel:+1-650-253-0000"
    );
}

#[test]
fn formats_seven_digit_nanpa_numbers() {
    let engine = get_engine();
    let number = parse("253 0000", Some(RegionCode::us()));
    assert_eq!(engine.format(&number, NumberFormat::National), "253-0000");
}

#[test]
fn formats_russian_plan_numbers_through_the_main_region() {
    let engine = get_engine();
    let number = parse("+74951234567", None);
    assert_eq!(
        engine.format(&number, NumberFormat::National),
        "8 (495) 123-45-67"
    );
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+7 495 123-45-67"
    );

    // Kazakhstan has no formatting rules of its own; the Russian ones
    // apply to the whole plan.
    let number = parse("+77172123456", None);
    assert_eq!(
        engine.format(&number, NumberFormat::National),
        "8 (717) 212-34-56"
    );
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+7 717 212-34-56"
    );
}

#[test]
fn formats_italian_numbers_with_their_leading_zero() {
    let engine = get_engine();
    let number = parse("+390236618300", None);
    assert_eq!(engine.format(&number, NumberFormat::E164), "+390236618300");
    assert_eq!(engine.format(&number, NumberFormat::National), "02 3661 8300");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+39 02 3661 8300"
    );

    let number = parse("+393123456789", None);
    assert_eq!(engine.format(&number, NumberFormat::National), "312 345 6789");
}

#[test]
fn formats_german_numbers() {
    let engine = get_engine();
    let number = parse("+4930123456", None);
    assert_eq!(engine.format(&number, NumberFormat::National), "030 123456");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+49 30 123456"
    );
    let number = parse("+4915123456789", None);
    assert_eq!(engine.format(&number, NumberFormat::National), "0151 23456789");
}

#[test]
fn formats_non_geographical_numbers() {
    let engine = get_engine();
    let number = parse("+80012345678", None);
    assert_eq!(engine.format(&number, NumberFormat::E164), "+80012345678");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+800 1234 5678"
    );
}

#[test]
fn numbers_without_a_matching_rule_keep_their_digits() {
    let engine = get_engine();
    // A short Italian toll-free number no grouping rule covers.
    let number = parse("803 123", Some(RegionCode::it()));
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+39 803123"
    );
}

#[test]
fn extension_is_carried_by_all_formats_except_e164() {
    let engine = get_engine();
    let number = parse("+41 44 668 1800 ext. 101", None);
    assert_eq!(engine.format(&number, NumberFormat::E164), "+41446681800");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+41 44 668 1800 ext. 101"
    );
    assert_eq!(
        engine.format(&number, NumberFormat::National),
        "044 668 1800 ext. 101"
    );
    assert_eq!(
        engine.format(&number, NumberFormat::Rfc3966),
        "tel:+41-44-668-1800;ext=101"
    );
}

#[test]
fn regions_can_prefer_their_own_extension_separator() {
    let engine = get_engine();
    let number = parse("030 123456 ext. 12", Some(RegionCode::de()));
    assert_eq!(number.extension(), Some("12"));
    assert_eq!(engine.format(&number, NumberFormat::National), "030 123456-12");
    assert_eq!(
        engine.format(&number, NumberFormat::International),
        "+49 30 123456-12"
    );
    assert_eq!(
        engine.format(&number, NumberFormat::Rfc3966),
        "tel:+49-30-123456;ext=12"
    );
}

#[test]
fn formats_for_calling_from_another_region() {
    let engine = get_engine();
    let swiss = parse("+41446681800", None);
    let us = parse("+16502530000", None);
    let kazakh = parse("+77172123456", None);

    assert_eq!(
        engine.format_for_calling_from(&swiss, RegionCode::us()),
        "011 41 44 668 1800"
    );
    assert_eq!(
        engine.format_for_calling_from(&us, RegionCode::ch()),
        "00 1 650-253-0000"
    );
    assert_eq!(
        engine.format_for_calling_from(&swiss, RegionCode::ru()),
        "810 41 44 668 1800"
    );

    // Same calling code: dialled as a national call.
    assert_eq!(
        engine.format_for_calling_from(&us, RegionCode::ca()),
        "(650) 253-0000"
    );
    assert_eq!(
        engine.format_for_calling_from(&kazakh, RegionCode::ru()),
        "8 (717) 212-34-56"
    );

    // Unknown origin falls back to the universal form.
    assert_eq!(
        engine.format_for_calling_from(&swiss, RegionCode::zz()),
        "+41 44 668 1800"
    );
}

// --- Metadata queries ----------------------------------------------------

#[test]
fn reports_known_regions_and_codes() {
    let engine = get_engine();
    assert!(engine.is_known_region(RegionCode::us()));
    assert!(engine.is_known_region(RegionCode::kz()));
    assert!(!engine.is_known_region(RegionCode::zz()));
    assert!(!engine.is_known_region("XX"));

    assert_eq!(engine.country_code_for_region(RegionCode::us()), Some(1));
    assert_eq!(engine.country_code_for_region(RegionCode::kz()), Some(7));
    assert_eq!(engine.country_code_for_region("XX"), None);

    assert_eq!(engine.main_region_for_calling_code(1), Some(RegionCode::us()));
    assert_eq!(engine.main_region_for_calling_code(7), Some(RegionCode::ru()));
    assert_eq!(engine.main_region_for_calling_code(44), Some(RegionCode::gb()));
    assert_eq!(engine.main_region_for_calling_code(999), None);

    let calling_codes = engine.supported_calling_codes();
    for code in [1, 7, 39, 41, 44, 49, 800] {
        assert!(calling_codes.contains(&code), "missing calling code {}", code);
    }

    let regions = engine.supported_regions();
    assert!(regions.contains(&RegionCode::us()));
    assert!(regions.contains(&RegionCode::im()));
    // Non-geographical entities are not regions.
    assert!(!regions.contains(&RegionCode::un001()));
}

#[test]
fn reports_supported_categories() {
    let engine = get_engine();
    let categories = engine
        .supported_categories_for_region(RegionCode::ch())
        .unwrap();
    assert!(categories.contains(&NumberCategory::FixedLine));
    assert!(categories.contains(&NumberCategory::Mobile));
    assert!(categories.contains(&NumberCategory::SharedCost));
    assert!(categories.contains(&NumberCategory::Emergency));
    assert!(!categories.contains(&NumberCategory::Pager));
    assert!(!categories.contains(&NumberCategory::FixedLineOrMobile));

    let categories = engine
        .supported_categories_for_region(RegionCode::us())
        .unwrap();
    assert!(categories.contains(&NumberCategory::TollFree));
    assert!(categories.contains(&NumberCategory::PersonalNumber));
    assert!(!categories.contains(&NumberCategory::VoIP));

    assert!(engine.supported_categories_for_region("XX").is_none());
}

#[test]
fn example_numbers_are_valid_and_round_trip_through_e164() {
    let engine = get_engine();
    for region in engine.supported_regions() {
        let example = engine
            .example_number(region)
            .unwrap_or_else(|| panic!("No example number for {}", region));
        assert!(
            engine.is_valid_number(&example),
            "Example number for {} is not valid",
            region
        );
        assert_ne!(
            engine.number_category(&example),
            NumberCategory::Unknown,
            "Example number for {} is valid but unclassified",
            region
        );
        let e164 = engine.format(&example, NumberFormat::E164);
        let reparsed = engine
            .parse(&e164, None)
            .unwrap_or_else(|err| panic!("Could not reparse '{}': {}", e164, err));
        assert_eq!(reparsed, example, "E.164 round trip changed the {} example", region);
    }
}

#[test]
fn engine_over_an_injected_table() {
    let json = r#"{
        "version": "test",
        "regions": [
            {
                "id": "US",
                "country_code": 1,
                "main_country_for_code": true,
                "national_prefix": "1",
                "general": {
                    "national_number_pattern": "[2-9]\\d{9}",
                    "possible_length": [10]
                },
                "toll_free": {
                    "national_number_pattern": "800[2-9]\\d{6}",
                    "possible_length": [10]
                }
            }
        ]
    }"#;
    let store = crate::metadata::MetadataStore::from_json(json).unwrap();
    let engine = crate::engine::PhoneNumberEngine::with_store(store);
    assert_eq!(engine.metadata_version(), "test");
    assert!(engine.is_known_region(RegionCode::us()));
    assert!(!engine.is_known_region(RegionCode::ch()));

    let number = engine.parse("+18002530000", None).unwrap();
    assert_eq!(
        engine.number_category(&number),
        NumberCategory::TollFree
    );
    // Nothing else is in the table, so other calling codes are unknown.
    assert_eq!(
        engine.parse("+41446681800", None),
        Err(ParseError::InvalidCountryCode)
    );
}
