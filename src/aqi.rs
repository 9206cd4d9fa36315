//! Simplified linear AQI.
//!
//! Each pollutant gets a sub-index of `concentration / reference * 50`,
//! clamped to `[0, 500]`. The headline AQI is the worst sub-index, rounded.
//! This is not the EPA piecewise breakpoint table.

use serde::Serialize;
use std::fmt;

/// Upper clamp for a single pollutant's sub-index.
pub const MAX_SUB_INDEX: f64 = 500.0;

/// Sub-index value a pollutant reaches at its reference concentration.
const REFERENCE_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    Ozone,
    No2,
}

impl Pollutant {
    pub const ALL: [Pollutant; 4] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::Ozone,
        Pollutant::No2,
    ];

    /// Concentration that maps to a sub-index of 50.
    pub fn reference_concentration(self) -> f64 {
        match self {
            Pollutant::Pm25 => 12.0,
            Pollutant::Pm10 => 54.0,
            Pollutant::Ozone => 54.0,
            Pollutant::No2 => 53.0,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Ozone => "O3",
            Pollutant::No2 => "NO2",
        };
        f.write_str(name)
    }
}

/// Linear sub-index for one pollutant, clamped to `[0, MAX_SUB_INDEX]`.
///
/// Negative concentrations are not rejected; they clamp to 0. `NaN` also
/// ends up at 0.
pub fn sub_index(pollutant: Pollutant, concentration: f64) -> f64 {
    let raw = concentration / pollutant.reference_concentration() * REFERENCE_SCORE;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_SUB_INDEX)
}

fn sub_indices(pm25: f64, pm10: f64, ozone: f64, no2: f64) -> [(Pollutant, f64); 4] {
    [
        (Pollutant::Pm25, sub_index(Pollutant::Pm25, pm25)),
        (Pollutant::Pm10, sub_index(Pollutant::Pm10, pm10)),
        (Pollutant::Ozone, sub_index(Pollutant::Ozone, ozone)),
        (Pollutant::No2, sub_index(Pollutant::No2, no2)),
    ]
}

/// Headline AQI: the maximum of the four clamped sub-indices, rounded to
/// the nearest integer.
pub fn calculate_aqi(pm25: f64, pm10: f64, ozone: f64, no2: f64) -> u32 {
    let worst = sub_indices(pm25, pm10, ozone, no2)
        .iter()
        .map(|(_, s)| *s)
        .fold(0.0_f64, f64::max);

    // worst is within [0, 500], so the cast cannot truncate
    worst.round() as u32
}

/// The pollutant whose sub-index sets the headline AQI.
///
/// Ties go to the first pollutant in [`Pollutant::ALL`] order. Returns `None`
/// when every sub-index is zero.
pub fn dominant_pollutant(pm25: f64, pm10: f64, ozone: f64, no2: f64) -> Option<Pollutant> {
    let mut best: Option<(Pollutant, f64)> = None;
    for (p, s) in sub_indices(pm25, pm10, ozone, no2) {
        if s <= 0.0 {
            continue;
        }
        match best {
            Some((_, b)) if b >= s => {}
            _ => best = Some((p, s)),
        }
    }
    best.map(|(p, _)| p)
}
