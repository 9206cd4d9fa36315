//! Mock trend series for charting.
//!
//! The points are random jitter around a single AQI value, not a forecast.
//! Use them only to fill a chart when no real history is available.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Hours of simulated history before "Now".
pub const HISTORY_HOURS: u32 = 6;
/// Furthest simulated forecast point, in hours.
pub const FORECAST_HOURS: u32 = 48;
/// Spacing between forecast points, in hours.
pub const FORECAST_STEP_HOURS: u32 = 6;

const HISTORY_JITTER: f64 = 10.0;
const FORECAST_JITTER: f64 = 15.0;

/// One chart point. Exactly one of `aqi` (history and "Now") or `predicted`
/// (forecast) is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted: Option<u32>,
}

impl TrendPoint {
    /// Whichever of `aqi` or `predicted` is set.
    pub fn value(&self) -> u32 {
        self.aqi.or(self.predicted).unwrap_or(0)
    }

    pub fn is_predicted(&self) -> bool {
        self.predicted.is_some()
    }
}

/// Builds `6h ago … 1h ago`, `Now`, `+6h … +48h` around `baseline`.
///
/// History points vary by up to ±10 and forecast points by up to ±15. Every
/// value is floored at 0. "Now" is exactly `baseline`.
pub fn generate_trend<R: Rng + ?Sized>(baseline: u32, rng: &mut R) -> Vec<TrendPoint> {
    let capacity = HISTORY_HOURS + 1 + FORECAST_HOURS / FORECAST_STEP_HOURS;
    let mut points = Vec::with_capacity(capacity as usize);

    for hours in (1..=HISTORY_HOURS).rev() {
        points.push(TrendPoint {
            time: format!("{hours}h ago"),
            aqi: Some(jitter(baseline, HISTORY_JITTER, rng)),
            predicted: None,
        });
    }

    points.push(TrendPoint {
        time: "Now".to_string(),
        aqi: Some(baseline),
        predicted: None,
    });

    for hours in (FORECAST_STEP_HOURS..=FORECAST_HOURS).step_by(FORECAST_STEP_HOURS as usize) {
        points.push(TrendPoint {
            time: format!("+{hours}h"),
            aqi: None,
            predicted: Some(jitter(baseline, FORECAST_JITTER, rng)),
        });
    }

    points
}

/// [`generate_trend`] with a seeded generator, for reproducible output.
pub fn generate_trend_seeded(baseline: u32, seed: u64) -> Vec<TrendPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_trend(baseline, &mut rng)
}

fn jitter<R: Rng + ?Sized>(baseline: u32, spread: f64, rng: &mut R) -> u32 {
    let offset = rng.gen_range(-spread..=spread);
    (f64::from(baseline) + offset).round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_labels_and_layout() {
        let points = generate_trend_seeded(80, 1);
        let labels: Vec<_> = points.iter().map(|p| p.time.as_str()).collect();

        assert_eq!(
            labels,
            vec![
                "6h ago", "5h ago", "4h ago", "3h ago", "2h ago", "1h ago", "Now", "+6h", "+12h",
                "+18h", "+24h", "+30h", "+36h", "+42h", "+48h",
            ]
        );

        for p in &points[..7] {
            assert!(p.aqi.is_some() && p.predicted.is_none());
        }
        for p in &points[7..] {
            assert!(p.aqi.is_none() && p.predicted.is_some());
        }
    }

    #[test]
    fn test_now_equals_baseline() {
        for seed in 0..20 {
            let points = generate_trend_seeded(137, seed);
            assert_eq!(points[6].aqi, Some(137));
        }
    }

    #[test]
    fn test_points_within_bounds() {
        for baseline in [0u32, 5, 12, 50, 151, 500] {
            for seed in 0..50 {
                let points = generate_trend_seeded(baseline, seed);
                let b = i64::from(baseline);

                for p in &points[..6] {
                    let v = i64::from(p.value());
                    assert!(v >= (b - 10).max(0) && v <= b + 10, "{p:?} baseline {b}");
                }
                for p in &points[7..] {
                    let v = i64::from(p.value());
                    assert!(v >= (b - 15).max(0) && v <= b + 15, "{p:?} baseline {b}");
                }
            }
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        assert_eq!(generate_trend_seeded(64, 42), generate_trend_seeded(64, 42));
    }

    #[test]
    fn test_injected_rng() {
        let mut rng = StepRng::new(0, 0);
        let points = generate_trend(100, &mut rng);
        assert_eq!(points.len(), 15);
        assert_eq!(points[6].value(), 100);
        assert!(points.iter().all(|p| (85..=115).contains(&p.value())));
    }

    #[test]
    fn test_json_omits_missing_field() {
        let points = generate_trend_seeded(40, 7);
        let json = serde_json::to_value(&points).unwrap();

        assert_eq!(json[6]["time"], "Now");
        assert_eq!(json[6]["aqi"], 40);
        assert!(json[6].get("predicted").is_none());
        assert!(json[7].get("aqi").is_none());
    }
}
