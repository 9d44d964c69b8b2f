//! Behavioral tests for the index calculator.

use aq_common::PollutantKind;
use aqi::{index_for, AqiCategory, BreakpointTable, IndexResult};

fn all_pollutants() -> Vec<PollutantKind> {
    vec![
        PollutantKind::No2,
        PollutantKind::O3,
        PollutantKind::Hcho,
        PollutantKind::Other("SO2".to_string()),
    ]
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_no2_upper_boundary_of_good() {
    let r = index_for(&PollutantKind::No2, Some(53.0));
    assert_eq!(r.aqi, Some(50));
    assert_eq!(r.category, AqiCategory::Good);
}

#[test]
fn test_no2_just_above_good() {
    let r = index_for(&PollutantKind::No2, Some(53.01));
    assert_eq!(r.category, AqiCategory::Moderate);
    assert_eq!(r.aqi, Some(50));

    let (raw, _) = BreakpointTable::for_pollutant(&PollutantKind::No2)
        .evaluate(53.01)
        .unwrap();
    assert!(raw > 50.0 && raw < 50.1);
}

#[test]
fn test_no2_category_progression() {
    let cases = [
        (0.0, 0, AqiCategory::Good),
        (26.5, 25, AqiCategory::Good),
        (100.0, 100, AqiCategory::Moderate),
        (230.0, 125, AqiCategory::UnhealthyForSensitiveGroups),
        (649.0, 200, AqiCategory::Unhealthy),
        (949.0, 250, AqiCategory::VeryUnhealthy),
        (2049.0, 500, AqiCategory::Hazardous),
    ];
    for (value, aqi, category) in cases {
        let r = index_for(&PollutantKind::No2, Some(value));
        assert_eq!(r.aqi, Some(aqi), "value {}", value);
        assert_eq!(r.category, category, "value {}", value);
    }
}

#[test]
fn test_beyond_last_boundary_is_finite() {
    for p in all_pollutants() {
        let r = index_for(&p, Some(1.0e6));
        assert!(r.is_available());
        assert_eq!(r.category, AqiCategory::Hazardous);
        assert!(r.aqi.unwrap() > 500);
    }
}

#[test]
fn test_huge_values_keep_distinct_scores() {
    // Open segment slope for NO2 is 200 / 800 above 2049 ppb.
    let r11 = index_for(&PollutantKind::No2, Some(1.0e11));
    let r12 = index_for(&PollutantKind::No2, Some(1.0e12));
    assert_eq!(r11.aqi, Some(24_999_999_987));
    assert_eq!(r12.aqi, Some(249_999_999_987));
    assert_eq!(r12.category, AqiCategory::Hazardous);
    assert!(r12.aqi > r11.aqi);

    // Just under the fill sentinel after NO2 conversion.
    let r = index_for(&PollutantKind::No2, Some(4.95e14));
    assert_eq!(r.aqi, Some(123_749_999_999_987));
}

#[test]
fn test_score_beyond_integer_range_is_not_available() {
    let r = index_for(&PollutantKind::No2, Some(1.0e25));
    assert_eq!(r, IndexResult::not_available());
}

// ============================================================================
// Absent-value invariant
// ============================================================================

#[test]
fn test_absent_and_invalid_values() {
    for p in all_pollutants() {
        for value in [None, Some(f64::NAN), Some(f64::INFINITY), Some(-1.0)] {
            let r = index_for(&p, value);
            assert_eq!(r, IndexResult::not_available());
            assert_eq!(r.category.label(), "Not Available");
        }
    }
}

#[test]
fn test_not_available_serializes_null() {
    let json = serde_json::to_value(index_for(&PollutantKind::O3, None)).unwrap();
    assert!(json["aqi"].is_null());
    assert_eq!(json["category"], "Not Available");

    let json = serde_json::to_value(index_for(&PollutantKind::O3, Some(30.0))).unwrap();
    assert_eq!(json["category"], "Good");
}

// ============================================================================
// Table properties
// ============================================================================

#[test]
fn test_continuous_at_every_boundary() {
    for p in all_pollutants() {
        let table = BreakpointTable::for_pollutant(&p);
        for pair in table.segments().windows(2) {
            let boundary = pair[0].upper.unwrap();
            let left = pair[0].score_at(boundary);
            let right = pair[1].score_at(boundary);
            assert!(
                (left - right).abs() < 1e-9,
                "{}: discontinuity at {} ({} vs {})",
                p,
                boundary,
                left,
                right
            );
        }
    }
}

#[test]
fn test_monotonic_non_decreasing() {
    for p in all_pollutants() {
        let mut prev_score = -1.0;
        let mut prev_category = AqiCategory::Good;
        let table = BreakpointTable::for_pollutant(&p);
        let mut v = 0.0;
        while v < 3000.0 {
            let (score, category) = table.evaluate(v).unwrap();
            assert!(score >= prev_score, "{}: score fell at {}", p, v);
            assert!(category >= prev_category, "{}: category fell at {}", p, v);
            prev_score = score;
            prev_category = category;
            v += 0.25;
        }
    }
}

#[test]
fn test_category_changes_exactly_at_breakpoints() {
    for p in all_pollutants() {
        let table = BreakpointTable::for_pollutant(&p);
        for pair in table.segments().windows(2) {
            let boundary = pair[0].upper.unwrap();
            assert_eq!(index_for(&p, Some(boundary)).category, pair[0].category);
            assert_eq!(
                index_for(&p, Some(boundary + 1e-6)).category,
                pair[1].category
            );
        }
    }
}
