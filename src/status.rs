use serde::Serialize;
use std::fmt;

/// Severity tier derived solely from the headline AQI.
///
/// | AQI       | Status    |
/// |-----------|-----------|
/// | 0 – 50    | clean     |
/// | 51 – 100  | moderate  |
/// | 101 – 150 | unhealthy |
/// | 151 +     | hazardous |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AirQualityStatus {
    Clean,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl AirQualityStatus {
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => AirQualityStatus::Clean,
            51..=100 => AirQualityStatus::Moderate,
            101..=150 => AirQualityStatus::Unhealthy,
            _ => AirQualityStatus::Hazardous,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AirQualityStatus::Clean => "clean",
            AirQualityStatus::Moderate => "moderate",
            AirQualityStatus::Unhealthy => "unhealthy",
            AirQualityStatus::Hazardous => "hazardous",
        }
    }

    /// Headline shown next to a location's AQI card.
    pub fn title(self) -> &'static str {
        match self {
            AirQualityStatus::Clean => "Good Air Quality",
            AirQualityStatus::Moderate => "Moderate Air Quality",
            AirQualityStatus::Unhealthy => "Unhealthy Air Quality",
            AirQualityStatus::Hazardous => "Hazardous Air Quality",
        }
    }
}

impl fmt::Display for AirQualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
