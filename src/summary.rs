use serde::Serialize;

use crate::reading::ClassifiedReading;
use crate::status::AirQualityStatus;

/// Per-batch counts by status tier and headline AQI statistics.
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,

    // tiers
    pub clean: usize,
    pub moderate: usize,
    pub unhealthy: usize,
    pub hazardous: usize,

    pub mean_aqi: f64,
    pub max_aqi: u32,
    pub worst_location: Option<String>,
}

impl BatchSummary {
    pub fn from_readings(readings: &[ClassifiedReading]) -> Self {
        let mut s = BatchSummary {
            total: readings.len(),
            ..Default::default()
        };

        let mut aqi_sum = 0u64;
        for r in readings {
            match r.status {
                AirQualityStatus::Clean => s.clean += 1,
                AirQualityStatus::Moderate => s.moderate += 1,
                AirQualityStatus::Unhealthy => s.unhealthy += 1,
                AirQualityStatus::Hazardous => s.hazardous += 1,
            }

            aqi_sum += u64::from(r.aqi);

            if s.worst_location.is_none() || r.aqi > s.max_aqi {
                s.max_aqi = r.aqi;
                s.worst_location = Some(r.reading.label().to_string());
            }
        }

        if s.total > 0 {
            s.mean_aqi = aqi_sum as f64 / s.total as f64;
        }

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of readings above the moderate tier.
    pub fn unhealthy_or_worse_pct(&self) -> f64 {
        Self::pct(self.unhealthy + self.hazardous, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::PollutantReading;

    fn reading(city: &str, pm25: f64) -> ClassifiedReading {
        ClassifiedReading::from_reading(PollutantReading {
            city: Some(city.to_string()),
            pm25,
            ..Default::default()
        })
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(BatchSummary::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(BatchSummary::pct(50, 100), 50.0);
        assert_eq!(BatchSummary::pct(1, 4), 25.0);
    }

    #[test]
    fn test_summary_empty() {
        let s = BatchSummary::from_readings(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.mean_aqi, 0.0);
        assert_eq!(s.worst_location, None);
    }

    #[test]
    fn test_summary_counts_tiers() {
        let readings = vec![
            reading("A", 6.0),  // 25
            reading("B", 18.0), // 75
            reading("C", 30.0), // 125
            reading("D", 48.0), // 200
        ];
        let s = BatchSummary::from_readings(&readings);

        assert_eq!(s.total, 4);
        assert_eq!(s.clean, 1);
        assert_eq!(s.moderate, 1);
        assert_eq!(s.unhealthy, 1);
        assert_eq!(s.hazardous, 1);
        assert_eq!(s.max_aqi, 200);
        assert_eq!(s.worst_location.as_deref(), Some("D"));
        assert_eq!(s.mean_aqi, 106.25);
        assert_eq!(s.unhealthy_or_worse_pct(), 50.0);
    }

    #[test]
    fn test_worst_location_keeps_first_on_tie() {
        let readings = vec![reading("first", 0.0), reading("second", 0.0)];
        let s = BatchSummary::from_readings(&readings);
        assert_eq!(s.worst_location.as_deref(), Some("first"));
    }
}
