//! Runtime configuration from the environment (and `.env`, loaded by the
//! binary before this is read).

use anyhow::{Context, Result, bail};

use crate::parser::{NumericPolicy, ParseOptions};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_FILE: &str = "logs/cleanskies.log";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub log_file_path: String,
    pub parse: ParseOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_file_path: DEFAULT_LOG_FILE.to_string(),
            parse: ParseOptions::default(),
        }
    }
}

impl Config {
    /// Reads `CLEANSKIES_API_URL`, `LOG_FILE_PATH`, `CLEANSKIES_DELIMITER`
    /// and `CLEANSKIES_STRICT_NUMBERS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("CLEANSKIES_API_URL") {
            config.api_url = url;
        }
        if let Some(path) = lookup("LOG_FILE_PATH") {
            config.log_file_path = path;
        }
        if let Some(d) = lookup("CLEANSKIES_DELIMITER") {
            config.parse.delimiter = parse_delimiter(&d).context("CLEANSKIES_DELIMITER")?;
        }
        if let Some(strict) = lookup("CLEANSKIES_STRICT_NUMBERS") {
            let strict = parse_bool(&strict).context("CLEANSKIES_STRICT_NUMBERS")?;
            config.parse.on_parse_failure = if strict {
                NumericPolicy::Error
            } else {
                NumericPolicy::Zero
            };
        }

        Ok(config)
    }
}

/// Accepts a single ASCII character, or the names `tab`, `comma`,
/// `semicolon` and `pipe`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    let d = match s {
        "tab" | "\\t" | "\t" => b'\t',
        "comma" => b',',
        "semicolon" => b';',
        "pipe" => b'|',
        other => match other.as_bytes() {
            [b] if b.is_ascii() && *b != b'\n' && *b != b'\r' => *b,
            _ => bail!("delimiter must be a single ASCII character, got {other:?}"),
        },
    };
    Ok(d)
}

fn parse_bool(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
