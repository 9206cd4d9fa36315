//! Parse → classify, plus the lookups the dashboard runs over a batch.

use tracing::info;

use crate::parser::{ParseError, ParseOptions, parse_readings};
use crate::reading::{ClassifiedReading, PollutantReading};

/// Computes AQI and status for every reading, keeping input order.
pub fn process_readings(readings: Vec<PollutantReading>) -> Vec<ClassifiedReading> {
    readings
        .into_iter()
        .map(ClassifiedReading::from_reading)
        .collect()
}

/// Parses `text` and classifies every row.
pub fn process_text(
    text: &str,
    options: &ParseOptions,
) -> Result<Vec<ClassifiedReading>, ParseError> {
    let readings = parse_readings(text, options)?;
    let classified = process_readings(readings);
    info!(records = classified.len(), "Classified readings");
    Ok(classified)
}

/// First reading whose zip code matches exactly.
pub fn find_by_zip_code<'a>(
    data: &'a [ClassifiedReading],
    zip_code: &str,
) -> Option<&'a ClassifiedReading> {
    data.iter().find(|c| c.reading.zip_code.as_deref() == Some(zip_code))
}

/// First reading whose city contains `name`, ignoring case.
pub fn find_by_city<'a>(data: &'a [ClassifiedReading], name: &str) -> Option<&'a ClassifiedReading> {
    let needle = name.to_lowercase();
    data.iter().find(|c| {
        c.reading
            .city
            .as_deref()
            .is_some_and(|city| city.to_lowercase().contains(&needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::AirQualityStatus;

    const TABLE: &str = "city,zip_code,pm2.5,pm10,ozone,no2
Chicago,60601,12,25,18,30
Minneapolis,55401,25,40,25,35
Mexico City,01000,50,80,45,55
Kansas City,64101,22,38,26,34";

    fn data() -> Vec<ClassifiedReading> {
        process_text(TABLE, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_process_text_classifies_rows() {
        let data = data();
        assert_eq!(data.len(), 4);

        assert_eq!(data[0].aqi, 50);
        assert_eq!(data[0].status, AirQualityStatus::Clean);

        // 25 / 12 * 50 = 104.17
        assert_eq!(data[1].aqi, 104);
        assert_eq!(data[1].status, AirQualityStatus::Unhealthy);

        // 50 / 12 * 50 = 208.3
        assert_eq!(data[2].aqi, 208);
        assert_eq!(data[2].status, AirQualityStatus::Hazardous);

        // 22 / 12 * 50 = 91.67
        assert_eq!(data[3].aqi, 92);
        assert_eq!(data[3].status, AirQualityStatus::Moderate);
    }

    #[test]
    fn test_process_empty_batch() {
        assert!(process_readings(Vec::new()).is_empty());
    }

    #[test]
    fn test_find_by_zip_code() {
        let data = data();
        let hit = find_by_zip_code(&data, "01000").unwrap();
        assert_eq!(hit.reading.city.as_deref(), Some("Mexico City"));
        assert!(find_by_zip_code(&data, "1000").is_none());
    }

    #[test]
    fn test_find_by_city_substring_case_insensitive() {
        let data = data();
        let hit = find_by_city(&data, "minnea").unwrap();
        assert_eq!(hit.reading.zip_code.as_deref(), Some("55401"));

        // first match wins
        let hit = find_by_city(&data, "CITY").unwrap();
        assert_eq!(hit.reading.zip_code.as_deref(), Some("01000"));

        assert!(find_by_city(&data, "Toronto").is_none());
    }
}
