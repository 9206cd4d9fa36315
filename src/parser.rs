//! Delimited-text parser for pollutant readings.
//!
//! After trimming the input, the first line is the header and every later
//! line is one record, blank lines included. Header names are matched
//! case-insensitively against a fixed alias table and unknown columns are
//! dropped. No quoting or escaping: fields are split on the delimiter as-is.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::reading::PollutantReading;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no data found")]
    EmptyInput,

    #[error("invalid number {value:?} for column '{column}' on line {line}")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

}

/// What to do with a numeric field whose text does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Take the longest numeric prefix, or `0` if there is none.
    #[default]
    Zero,
    /// Reject the whole batch with [`ParseError::InvalidNumber`].
    Error,
}

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub delimiter: u8,
    pub on_parse_failure: NumericPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            on_parse_failure: NumericPolicy::Zero,
        }
    }
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            on_parse_failure: NumericPolicy::Error,
            ..Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// A recognised input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    City,
    ZipCode,
    Pm25,
    Pm10,
    Ozone,
    No2,
    So2,
    Co,
    Temperature,
    Humidity,
    WindSpeed,
    Timestamp,
}

impl Column {
    /// Maps a raw header name to its column, ignoring case and surrounding
    /// whitespace. Returns `None` for names not in the alias table.
    pub fn from_header(header: &str) -> Option<Column> {
        let column = match header.trim().to_lowercase().as_str() {
            "city" | "city_name" | "location" => Column::City,
            "zip" | "zip_code" | "zipcode" => Column::ZipCode,
            "pm2.5" | "pm25" | "pm_2_5" => Column::Pm25,
            "pm10" | "pm_10" => Column::Pm10,
            "ozone" | "o3" | "o_3" => Column::Ozone,
            "no2" | "nitrogen_dioxide" | "no_2" => Column::No2,
            "so2" | "sulfur_dioxide" | "so_2" => Column::So2,
            "co" | "carbon_monoxide" | "carbon_monoxide_ppm" => Column::Co,
            "temperature" | "temp" | "temp_c" => Column::Temperature,
            "humidity" | "humidity_percent" => Column::Humidity,
            "wind_speed" | "wind" | "wind_kmh" => Column::WindSpeed,
            "timestamp" | "date" | "time" => Column::Timestamp,
            _ => return None,
        };
        Some(column)
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::City => "city",
            Column::ZipCode => "zipCode",
            Column::Pm25 => "pm25",
            Column::Pm10 => "pm10",
            Column::Ozone => "ozone",
            Column::No2 => "no2",
            Column::So2 => "so2",
            Column::Co => "co",
            Column::Temperature => "temperature",
            Column::Humidity => "humidity",
            Column::WindSpeed => "windSpeed",
            Column::Timestamp => "timestamp",
        }
    }
}

/// Parses delimited text into readings, one per data line, in input order.
///
/// # Errors
///
/// [`ParseError::EmptyInput`] if the text is empty after trimming.
/// [`ParseError::InvalidNumber`] only under [`NumericPolicy::Error`].
pub fn parse_readings(
    text: &str,
    options: &ParseOptions,
) -> Result<Vec<PollutantReading>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let delimiter = char::from(options.delimiter);
    let mut lines = text.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));

    let header = lines.next().unwrap_or_default();
    let columns: Vec<Option<Column>> = header.split(delimiter).map(Column::from_header).collect();

    let ignored: Vec<&str> = header
        .split(delimiter)
        .map(str::trim)
        .zip(&columns)
        .filter(|(_, c)| c.is_none())
        .map(|(h, _)| h)
        .collect();
    if !ignored.is_empty() {
        debug!(?ignored, "Dropping unrecognised columns");
    }

    let mut readings = Vec::new();
    for (idx, raw) in lines.enumerate() {
        // header is line 1
        let line = idx as u64 + 2;
        let fields: Vec<&str> = raw.split(delimiter).map(str::trim).collect();

        // a blank line or short row reads as empty cells for every missing column
        let mut reading = PollutantReading::default();
        for (i, column) in columns.iter().enumerate() {
            if let Some(column) = column {
                let value = fields.get(i).copied().unwrap_or("");
                assign(&mut reading, *column, value, line, options.on_parse_failure)?;
            }
        }
        readings.push(reading);
    }

    debug!(records = readings.len(), "Parsed readings");
    Ok(readings)
}

/// Reads a file once and parses its contents with [`parse_readings`].
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_readings(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<Vec<PollutantReading>, ParseError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_readings(&text, options)
}

fn assign(
    reading: &mut PollutantReading,
    column: Column,
    value: &str,
    line: u64,
    policy: NumericPolicy,
) -> Result<(), ParseError> {
    let number = || parse_number(value, column, line, policy);

    match column {
        Column::City => reading.city = text_value(value),
        Column::ZipCode => reading.zip_code = text_value(value),
        Column::Timestamp => reading.timestamp = text_value(value),
        Column::Pm25 => reading.pm25 = number()?,
        Column::Pm10 => reading.pm10 = number()?,
        Column::Ozone => reading.ozone = number()?,
        Column::No2 => reading.no2 = number()?,
        Column::So2 => reading.so2 = Some(number()?),
        Column::Co => reading.co = Some(number()?),
        Column::Temperature => reading.temperature = Some(number()?),
        Column::Humidity => reading.humidity = Some(number()?),
        Column::WindSpeed => reading.wind_speed = Some(number()?),
    }
    Ok(())
}

fn text_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_number(
    value: &str,
    column: Column,
    line: u64,
    policy: NumericPolicy,
) -> Result<f64, ParseError> {
    // Empty cells are missing data, not malformed data.
    if value.is_empty() {
        return Ok(0.0);
    }

    match policy {
        // overflow saturates so the sub-index still clamps to its maximum
        NumericPolicy::Zero => {
            Ok(leading_number(value).map_or(0.0, |n| n.clamp(f64::MIN, f64::MAX)))
        }
        NumericPolicy::Error => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => {
                warn!(line, column = column.name(), value, "Rejecting malformed number");
                Err(ParseError::InvalidNumber {
                    line,
                    column: column.name(),
                    value: value.to_string(),
                })
            }
        },
    }
}

/// Parses the longest decimal prefix of `s`, e.g. `"12.5ppm"` -> `12.5`.
///
/// A signed `Infinity` prefix, or a literal too large for `f64`, yields an
/// infinite value. Returns `None` when there is no numeric prefix.
pub fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let inf = if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Some(inf);
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // exponent only counts when followed by at least one digit
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
