//! Air-quality readings: parse pollutant tables, derive an AQI and status
//! tier per row, and build mock trend series for charting.

pub mod api;
pub mod aqi;
pub mod config;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reading;
pub mod sample;
pub mod session;
pub mod status;
pub mod summary;
pub mod trend;

pub use aqi::{Pollutant, calculate_aqi};
pub use parser::{NumericPolicy, ParseError, ParseOptions, parse_readings};
pub use pipeline::{find_by_city, find_by_zip_code, process_readings, process_text};
pub use reading::{ClassifiedReading, PollutantReading};
pub use status::AirQualityStatus;
pub use trend::{TrendPoint, generate_trend};
