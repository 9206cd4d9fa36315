//! Pollutant readings as parsed from tabular input, and their classified form.

use serde::Serialize;

use crate::aqi::calculate_aqi;
use crate::status::AirQualityStatus;

/// One observation for one location.
///
/// The four headline pollutants always carry a value (`0.0` when the source
/// column is missing). Auxiliary fields stay `None` unless their column was
/// present in the header.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantReading {
    pub city: Option<String>,
    pub zip_code: Option<String>,

    pub pm25: f64,
    pub pm10: f64,
    pub ozone: f64,
    pub no2: f64,

    // auxiliary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub so2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl PollutantReading {
    /// Label used in logs and summaries: city, then zip code, then `"unknown"`.
    pub fn label(&self) -> &str {
        self.city
            .as_deref()
            .or(self.zip_code.as_deref())
            .unwrap_or("unknown")
    }
}

/// A [`PollutantReading`] together with its derived AQI and status tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedReading {
    #[serde(flatten)]
    pub reading: PollutantReading,
    pub aqi: u32,
    pub status: AirQualityStatus,
}

impl ClassifiedReading {
    pub fn from_reading(reading: PollutantReading) -> Self {
        let aqi = calculate_aqi(reading.pm25, reading.pm10, reading.ozone, reading.no2);
        Self {
            reading,
            aqi,
            status: AirQualityStatus::from_aqi(aqi),
        }
    }
}

/// Flat row layout used when appending classified readings to CSV.
///
/// `csv` cannot serialize flattened structs, so the output module writes
/// this instead of [`ClassifiedReading`].
#[derive(Debug, Serialize)]
pub struct ReadingRow<'a> {
    pub city: &'a str,
    pub zip_code: &'a str,
    pub pm25: f64,
    pub pm10: f64,
    pub ozone: f64,
    pub no2: f64,
    pub so2: Option<f64>,
    pub co: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub timestamp: Option<&'a str>,
    pub aqi: u32,
    pub status: AirQualityStatus,
}

impl<'a> From<&'a ClassifiedReading> for ReadingRow<'a> {
    fn from(c: &'a ClassifiedReading) -> Self {
        let r = &c.reading;
        ReadingRow {
            city: r.city.as_deref().unwrap_or(""),
            zip_code: r.zip_code.as_deref().unwrap_or(""),
            pm25: r.pm25,
            pm10: r.pm10,
            ozone: r.ozone,
            no2: r.no2,
            so2: r.so2,
            co: r.co,
            temperature: r.temperature,
            humidity: r.humidity,
            wind_speed: r.wind_speed,
            timestamp: r.timestamp.as_deref(),
            aqi: c.aqi,
            status: c.status,
        }
    }
}
