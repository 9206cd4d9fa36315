use cleanskies::parser::{ParseError, ParseOptions, read_readings};
use cleanskies::pipeline::{find_by_city, find_by_zip_code, process_readings, process_text};
use cleanskies::summary::BatchSummary;
use cleanskies::trend::generate_trend_seeded;
use cleanskies::{AirQualityStatus, calculate_aqi};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/mixed_readings.csv");

#[test]
fn test_full_pipeline() {
    let readings = read_readings(FIXTURE, &ParseOptions::default()).expect("Failed to read fixture");
    let classified = process_readings(readings);

    assert_eq!(classified.len(), 4);

    let springfield = &classified[0];
    assert_eq!(springfield.reading.city.as_deref(), Some("Springfield"));
    assert_eq!(springfield.reading.so2, Some(2.0));
    assert_eq!(springfield.reading.temperature, Some(21.5));
    assert_eq!(springfield.reading.wind_speed, Some(12.0));
    assert_eq!(springfield.reading.timestamp.as_deref(), Some("2024-05-01"));
    assert_eq!(springfield.aqi, 33);
    assert_eq!(springfield.status, AirQualityStatus::Clean);

    // pm10 "abc" and empty no2 both fall back to 0
    let peoria = &classified[1];
    assert_eq!(peoria.reading.pm10, 0.0);
    assert_eq!(peoria.reading.no2, 0.0);
    assert_eq!(peoria.reading.humidity, Some(0.0));
    assert_eq!(peoria.aqi, 125);
    assert_eq!(peoria.status, AirQualityStatus::Unhealthy);

    // short row with a negative concentration
    let joliet = &classified[2];
    assert_eq!(joliet.reading.pm25, -4.0);
    assert_eq!(joliet.reading.so2, Some(0.0));
    assert_eq!(joliet.reading.humidity, Some(0.0));
    assert_eq!(joliet.reading.timestamp, None);
    assert_eq!(joliet.aqi, 0);
    assert_eq!(joliet.status, AirQualityStatus::Clean);

    let rockford = &classified[3];
    assert_eq!(rockford.aqi, 100);
    assert_eq!(rockford.status, AirQualityStatus::Moderate);
}

#[test]
fn test_strict_mode_rejects_fixture() {
    let err = read_readings(FIXTURE, &ParseOptions::strict()).unwrap_err();
    match err {
        ParseError::InvalidNumber { line, column, .. } => {
            assert_eq!(line, 3);
            assert_eq!(column, "pm10");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reference_row_from_dashboard() {
    let text = "city,zip_code,pm2.5,pm10,ozone,no2\nChicago,60601,12,25,18,30";
    let classified = process_text(text, &ParseOptions::default()).unwrap();

    assert_eq!(classified.len(), 1);
    assert_eq!(classified[0].aqi, 50);
    assert_eq!(classified[0].status, AirQualityStatus::Clean);
    assert_eq!(calculate_aqi(12.0, 54.0, 54.0, 53.0), 50);
}

#[test]
fn test_lookup_then_trend() {
    let classified = process_readings(read_readings(FIXTURE, &ParseOptions::default()).unwrap());

    let hit = find_by_zip_code(&classified, "61602").unwrap();
    assert_eq!(find_by_city(&classified, "peor").unwrap(), hit);

    let points = generate_trend_seeded(hit.aqi, 2024);
    assert_eq!(points.len(), 15);
    assert_eq!(points[6].time, "Now");
    assert_eq!(points[6].aqi, Some(125));
}

#[test]
fn test_summary_over_fixture() {
    let classified = process_readings(read_readings(FIXTURE, &ParseOptions::default()).unwrap());
    let summary = BatchSummary::from_readings(&classified);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.clean, 2);
    assert_eq!(summary.moderate, 1);
    assert_eq!(summary.unhealthy, 1);
    assert_eq!(summary.hazardous, 0);
    assert_eq!(summary.max_aqi, 125);
    assert_eq!(summary.worst_location.as_deref(), Some("Peoria"));
}

#[test]
fn test_empty_input_is_an_error() {
    let err = process_text(" \n ", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, ParseError::EmptyInput));
}
