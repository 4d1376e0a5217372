//! Writing models back to ISG text, same version and across versions.

use chrono::NaiveDate;
use isg_format::header::{self, BANNER_PREFIX, BEGIN_OF_HEAD};
use isg_format::{FieldSlug, GridModel, IsgVersion};
use test_utils::{assert_approx_eq, fixtures};

const GENERATOR: &str = "roundtrip-tests";

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
}

/// The fixture as the writer renders it: banner and blank line before the header.
fn with_banner(fixture: &str) -> String {
    fixture.replace(
        BEGIN_OF_HEAD,
        &format!("{}{}\n\n{}", BANNER_PREFIX, GENERATOR, BEGIN_OF_HEAD),
    )
}

fn header_line<'a>(text: &'a str, keyword: &str) -> &'a str {
    text.lines()
        .find(|line| line.starts_with(keyword))
        .unwrap_or_else(|| panic!("no line for {}", keyword))
}

// ============================================================================
// Same-version round trips
// ============================================================================

#[test]
fn test_write_reproduces_each_fixture() {
    let cases = [
        (fixtures::isg_1_0(), IsgVersion::V1_0),
        (fixtures::isg_1_01(), IsgVersion::V1_01),
        (fixtures::isg_2_0(), IsgVersion::V2_0),
        (fixtures::isg_2_0_dms(), IsgVersion::V2_0),
        (fixtures::isg_2_0_alias(), IsgVersion::V2_0),
    ];
    for (text, version) in cases {
        let model = GridModel::parse(&text).unwrap();
        let written = header::write_with_date(&model, version, GENERATOR, date());
        assert_eq!(written, with_banner(&text));
    }
}

#[test]
fn test_parse_write_parse_is_stable() {
    for text in [fixtures::isg_1_0(), fixtures::isg_1_01(), fixtures::isg_2_0_dms()] {
        let model = GridModel::parse(&text).unwrap();
        let written = header::write_with_date(&model, model.version(), GENERATOR, date());
        let reparsed = GridModel::parse(&written).unwrap();

        assert_eq!(reparsed.version(), model.version());
        assert_eq!(reparsed.fields(), model.fields());
        assert_eq!(reparsed.bounds(), model.bounds());
        assert_eq!(reparsed.data(), model.data());

        // The banner is read back as an ordinary comment.
        let mut comments = model.comment_lines().to_vec();
        comments.push(format!("{}{}", BANNER_PREFIX, GENERATOR));
        comments.push(String::new());
        assert_eq!(reparsed.comment_lines(), &comments[..]);

        // ...and is not written a second time.
        let rewritten = header::write_with_date(&reparsed, model.version(), "other-tool", date());
        assert_eq!(rewritten, written);
    }
}

#[test]
fn test_existing_banner_not_duplicated() {
    let text = fixtures::isg_2_0().replace(
        BEGIN_OF_HEAD,
        &format!("Created by the National Geodetic Survey, 2019\n\n{}", BEGIN_OF_HEAD),
    );
    let model = GridModel::parse(&text).unwrap();
    assert_eq!(
        model.comment_lines().last().map(String::as_str),
        Some("")
    );

    let written = header::write_with_date(&model, IsgVersion::V2_0, GENERATOR, date());
    assert_eq!(written, text);
    assert!(!written.contains(GENERATOR));
}

#[test]
fn test_legacy_shift_inverted_on_write() {
    let model = GridModel::parse(&fixtures::isg_1_01()).unwrap();
    assert_approx_eq!(model.bounds().lat_min, 10.25, 1e-12);

    let written = model.to_isg_string(IsgVersion::V1_01, GENERATOR);
    assert_eq!(header_line(&written, "lat min"), "lat min    =    10.000000000000");
    assert_eq!(header_line(&written, "lat max"), "lat max    =    11.500000000000");
}

#[test]
fn test_alias_sticks_on_write() {
    let model = GridModel::parse(&fixtures::isg_2_0_alias()).unwrap();
    let written = model.to_isg_string(IsgVersion::V2_0, GENERATOR);
    assert_eq!(header_line(&written, "north min"), "north min      =   40.000000");
    assert!(!written.contains("lat min"));
}

#[test]
fn test_normalized_orderings_write_canonical_document() {
    for phrase in fixtures::ORDERINGS {
        let model = GridModel::parse(&fixtures::isg_2_0_ordered(phrase)).unwrap();
        let written = header::write_with_date(&model, IsgVersion::V2_0, GENERATOR, date());
        assert_eq!(written, with_banner(&fixtures::isg_2_0()), "ordering {}", phrase);
    }
}

// ============================================================================
// Version conversion
// ============================================================================

#[test]
fn test_legacy_to_2_0() {
    let model = GridModel::parse(&fixtures::isg_1_01()).unwrap();
    let written = header::write_with_date(&model, IsgVersion::V2_0, GENERATOR, date());

    assert_eq!(header_line(&written, "lat min"), "lat min        =   10.250000");
    assert_eq!(header_line(&written, "data units"), "data units     : meters");
    assert_eq!(header_line(&written, "ref ellipsoid"), "ref ellipsoid  : GRS80");
    assert_eq!(header_line(&written, "data format"), "data format    : grid");
    assert_eq!(header_line(&written, "coord units"), "coord units    : deg");
    assert_eq!(header_line(&written, "model year"), "model year     : ---");
    assert_eq!(header_line(&written, "creation date"), "creation date  =  01/02/2024");
    assert_eq!(header_line(&written, "ISG format"), "ISG format     =        2.0");
    assert_eq!(header_line(&written, "nrows"), "nrows          =          3");

    let converted = GridModel::parse(&written).unwrap();
    assert_eq!(converted.version(), IsgVersion::V2_0);
    assert_eq!(converted.bounds(), model.bounds());
    assert_eq!(converted.data(), model.data());
}

#[test]
fn test_2_0_to_legacy() {
    let model = GridModel::parse(&fixtures::isg_2_0()).unwrap();
    let written = model.to_isg_string(IsgVersion::V1_01, GENERATOR);

    assert_eq!(header_line(&written, "lat min"), "lat min    =    39.750000000000");
    assert_eq!(header_line(&written, "units"), "units      : meters");
    assert_eq!(header_line(&written, "ISG format"), "ISG format =       1.01");
    assert!(!written.contains("coord units"));

    let converted = GridModel::parse(&written).unwrap();
    assert_approx_eq!(converted.bounds().lat_min, 40.0, 1e-12);
    assert_approx_eq!(converted.bounds().lon_max, 12.0, 1e-12);
}

#[test]
fn test_dms_fixture_to_1_0_writes_decimal() {
    let model = GridModel::parse(&fixtures::isg_2_0_dms()).unwrap();
    let written = model.to_isg_string(IsgVersion::V1_0, GENERATOR);
    let converted = GridModel::parse(&written).unwrap();
    // 1.0 keeps four decimals.
    assert_approx_eq!(converted.bounds().lat_max, 45.016667, 1e-4);
}

// ============================================================================
// Subsets
// ============================================================================

#[test]
fn test_subset_name_and_date() {
    let mut model = GridModel::parse(&fixtures::isg_2_0()).unwrap();
    model.mark_subset();
    let written = header::write_with_date(&model, IsgVersion::V2_0, GENERATOR, date());

    assert_eq!(header_line(&written, "model name"), "model name     : TEST-20 subset");
    assert_eq!(header_line(&written, "creation date"), "creation date  =  01/02/2024");
    // The model itself is not renamed.
    assert_eq!(model.field_value(FieldSlug::ModelName), Some("TEST-20"));
}

#[test]
fn test_resize_updates_header() {
    let mut model = GridModel::parse(&fixtures::isg_2_0()).unwrap();
    let mut bounds = *model.bounds();
    bounds.lat_max = 40.5;
    model.resize(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], bounds);

    assert!(model.check_dimensions().is_ok());
    let written = model.to_isg_string(IsgVersion::V2_0, GENERATOR);
    assert_eq!(header_line(&written, "nrows"), "nrows          =          2");
    assert_eq!(header_line(&written, "lat max"), "lat max        =   40.500000");
}

#[test]
fn test_numeric_fallback_writes_raw_text() {
    let text = fixtures::isg_2_0().replace("nodata         = -9999.0000", "nodata         = none");
    let model = GridModel::parse(&text).unwrap();
    let written = model.to_isg_string(IsgVersion::V2_0, GENERATOR);
    assert_eq!(header_line(&written, "nodata"), "nodata         = none");
}
