/// City-level demo table shown on the dashboard before any upload.
///
/// The trailing `aqi` column is not a recognised header, so the parser drops
/// it and every AQI is recomputed from the pollutant columns.
pub const SAMPLE_READINGS: &str = include_str!("../data/sample_readings.csv");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParseOptions;
    use crate::pipeline::{find_by_zip_code, process_text};

    #[test]
    fn test_sample_parses() {
        let data = process_text(SAMPLE_READINGS, &ParseOptions::default()).unwrap();
        assert_eq!(data.len(), 27);
        assert!(data.iter().all(|c| c.reading.city.is_some()));
    }

    #[test]
    fn test_sample_keeps_leading_zero_zip() {
        let data = process_text(SAMPLE_READINGS, &ParseOptions::default()).unwrap();
        let boston = find_by_zip_code(&data, "02101").unwrap();
        assert_eq!(boston.reading.city.as_deref(), Some("Boston"));
        // 14 / 12 * 50 = 58.3, not the 50 listed in the table
        assert_eq!(boston.aqi, 58);
    }
}
