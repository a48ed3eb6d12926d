use chrono::NaiveDate;

use super::interpolate::{format_scaled, interpolate, parse_scaled};
use crate::engine::errors::SplitError;
use crate::engine::types::{ColumnDomain, ColumnType, SqlValue};

fn int_domain(min: i64, max: i64) -> ColumnDomain {
    ColumnDomain::new(
        "id",
        ColumnType::Integer { unsigned: false },
        SqlValue::Int(min),
        SqlValue::Int(max),
    )
}

#[test]
fn integer_domain_splits_evenly() {
    let values = interpolate(&int_domain(0, 1000), 5).unwrap();
    assert_eq!(
        values,
        vec![
            SqlValue::Int(200),
            SqlValue::Int(400),
            SqlValue::Int(600),
            SqlValue::Int(800)
        ]
    );
}

#[test]
fn narrow_domain_collapses_duplicates() {
    let values = interpolate(&int_domain(0, 2), 10).unwrap();
    assert_eq!(values, vec![SqlValue::Int(1)]);

    let values = interpolate(&int_domain(7, 7), 4).unwrap();
    assert!(values.is_empty());
}

#[test]
fn negative_bounds_round_down() {
    let values = interpolate(&int_domain(-10, 0), 3).unwrap();
    assert_eq!(values, vec![SqlValue::Int(-7), SqlValue::Int(-4)]);
}

#[test]
fn unsigned_domain_stays_unsigned() {
    let domain = ColumnDomain::new(
        "id",
        ColumnType::Integer { unsigned: true },
        SqlValue::UInt(0),
        SqlValue::UInt(u64::MAX),
    );
    let values = interpolate(&domain, 2).unwrap();
    assert_eq!(values, vec![SqlValue::UInt(u64::MAX / 2)]);
}

#[test]
fn decimal_domain_keeps_scale() {
    let domain = ColumnDomain::new(
        "price",
        ColumnType::Decimal { scale: 2 },
        SqlValue::Decimal("0.00".into()),
        SqlValue::Decimal("10.00".into()),
    );
    let values = interpolate(&domain, 4).unwrap();
    assert_eq!(
        values,
        vec![
            SqlValue::Decimal("2.50".into()),
            SqlValue::Decimal("5.00".into()),
            SqlValue::Decimal("7.50".into())
        ]
    );
}

#[test]
fn date_domain_splits_on_days() {
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    let domain = ColumnDomain::new(
        "created",
        ColumnType::Date,
        SqlValue::Date(day(1)),
        SqlValue::Date(day(11)),
    );
    let values = interpolate(&domain, 2).unwrap();
    assert_eq!(values, vec![SqlValue::Date(day(6))]);
}

#[test]
fn datetime_domain_splits_on_seconds() {
    let at = |s: u32| {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, s)
            .unwrap()
    };
    let domain = ColumnDomain::new(
        "ts",
        ColumnType::DateTime,
        SqlValue::DateTime(at(0)),
        SqlValue::DateTime(at(10)),
    );
    let values = interpolate(&domain, 2).unwrap();
    assert_eq!(values, vec![SqlValue::DateTime(at(5))]);
}

#[test]
fn float_domain_is_strictly_inside() {
    let domain = ColumnDomain::new(
        "score",
        ColumnType::Float,
        SqlValue::Double(0.0),
        SqlValue::Double(1.0),
    );
    let values = interpolate(&domain, 4).unwrap();
    assert_eq!(
        values,
        vec![
            SqlValue::Double(0.25),
            SqlValue::Double(0.5),
            SqlValue::Double(0.75)
        ]
    );
}

#[test]
fn text_domain_is_unorderable() {
    let domain = ColumnDomain::new(
        "sku",
        ColumnType::Text,
        SqlValue::Text("a".into()),
        SqlValue::Text("z".into()),
    );
    assert!(matches!(
        interpolate(&domain, 4),
        Err(SplitError::UnorderableDomain { .. })
    ));
}

#[test]
fn empty_domain_is_reported() {
    let domain = ColumnDomain::new(
        "id",
        ColumnType::Integer { unsigned: false },
        SqlValue::Null,
        SqlValue::Null,
    );
    assert!(matches!(
        interpolate(&domain, 4),
        Err(SplitError::EmptyDomain(_))
    ));
}

#[test]
fn scaled_decimal_text_round_trips_sign_and_padding() {
    assert_eq!(parse_scaled("-1.5", 2), Some(-150));
    assert_eq!(parse_scaled("12", 2), Some(1200));
    assert_eq!(parse_scaled("0.129", 2), Some(12));
    assert_eq!(parse_scaled("abc", 2), None);
    assert_eq!(format_scaled(-5, 2), "-0.05");
    assert_eq!(format_scaled(1200, 0), "1200");
}
