//! CLI entry point for the cleanskies air-quality tool.
//!
//! Classifies pollutant tables, looks up locations, builds mock trend
//! series, and talks to the backend for recorded trends and chat.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use cleanskies::api::ApiClient;
use cleanskies::api::types::ChatQuery;
use cleanskies::config::{Config, parse_delimiter};
use cleanskies::output::{append_records, print_json, print_pretty, write_json};
use cleanskies::parser::{NumericPolicy, ParseOptions, read_readings};
use cleanskies::pipeline::{find_by_city, find_by_zip_code, process_readings, process_text};
use cleanskies::sample::SAMPLE_READINGS;
use cleanskies::summary::BatchSummary;
use cleanskies::trend::{generate_trend, generate_trend_seeded};
use cleanskies::{ClassifiedReading, aqi::dominant_pollutant};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cleanskies")]
#[command(about = "Classify air-quality readings and chart their trends", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Parser flags shared by every command that reads a table.
#[derive(Args, Clone)]
struct ParseFlags {
    /// Field delimiter (single character, or tab/comma/semicolon/pipe)
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Fail on malformed numbers instead of treating them as 0
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl ParseFlags {
    fn resolve(&self, config: &Config) -> Result<ParseOptions> {
        let mut options = config.parse;
        if let Some(d) = &self.delimiter {
            options.delimiter = parse_delimiter(d)?;
        }
        if self.strict {
            options.on_parse_failure = NumericPolicy::Error;
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and classify a readings file
    Process {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// CSV file to append classified rows to
        #[arg(short, long)]
        output: Option<String>,

        /// JSON file to write classified rows to
        #[arg(long)]
        json: Option<String>,

        #[command(flatten)]
        parse: ParseFlags,
    },
    /// Classify the bundled demo table
    Demo {
        /// CSV file to append classified rows to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Find one location in a readings file by zip code or city
    Lookup {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, conflicts_with = "city", required_unless_present = "city")]
        zip: Option<String>,

        /// Case-insensitive substring of the city name
        #[arg(long)]
        city: Option<String>,

        #[command(flatten)]
        parse: ParseFlags,
    },
    /// Build a mock trend series around one location's AQI
    Trend {
        /// Readings file; the demo table is used when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long)]
        zip: String,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file to write the series to
        #[arg(long)]
        json: Option<String>,

        #[command(flatten)]
        parse: ParseFlags,
    },
    /// Fetch recorded trends for a zip code from the backend
    RemoteTrends {
        #[arg(long)]
        zip: String,

        /// Show monthly instead of weekly trends
        #[arg(long, default_value_t = false)]
        monthly: bool,
    },
    /// Ask the backend's air-quality assistant a question
    Chat {
        #[arg(value_name = "QUESTION")]
        question: String,

        #[arg(long)]
        zip: Option<String>,

        #[arg(long)]
        health_issue: Option<String>,

        #[arg(long)]
        activity: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env()?;
    let _file_guard = init_logging(&config.log_file_path)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            file,
            output,
            json,
            parse,
        } => {
            let options = parse.resolve(&config)?;
            let readings = read_readings(&file, &options)
                .with_context(|| format!("failed to load {}", file.display()))?;
            let classified = process_readings(readings);
            report(&classified, output.as_deref(), json.as_deref())?;
        }
        Commands::Demo { output } => {
            let classified = process_text(SAMPLE_READINGS, &ParseOptions::default())?;
            report(&classified, output.as_deref(), None)?;
        }
        Commands::Lookup {
            file,
            zip,
            city,
            parse,
        } => {
            let options = parse.resolve(&config)?;
            let classified = process_readings(read_readings(&file, &options)?);

            let hit = match (&zip, &city) {
                (Some(zip), _) => find_by_zip_code(&classified, zip),
                (None, Some(city)) => find_by_city(&classified, city),
                (None, None) => bail!("either --zip or --city is required"),
            };

            match hit {
                Some(c) => {
                    let r = &c.reading;
                    info!(
                        location = r.label(),
                        zip = r.zip_code.as_deref().unwrap_or(""),
                        aqi = c.aqi,
                        status = %c.status,
                        dominant = ?dominant_pollutant(r.pm25, r.pm10, r.ozone, r.no2),
                        "{}",
                        c.status.title()
                    );
                    print_json(c)?;
                }
                None => warn!(?zip, ?city, "No matching location"),
            }
        }
        Commands::Trend {
            file,
            zip,
            seed,
            json,
            parse,
        } => {
            let options = parse.resolve(&config)?;
            let classified = match file {
                Some(path) => process_readings(read_readings(&path, &options)?),
                None => process_text(SAMPLE_READINGS, &options)?,
            };

            let Some(current) = find_by_zip_code(&classified, &zip) else {
                bail!("no reading for zip code {zip}");
            };

            let points = match seed {
                Some(seed) => generate_trend_seeded(current.aqi, seed),
                None => generate_trend(current.aqi, &mut rand::thread_rng()),
            };

            info!(
                location = current.reading.label(),
                baseline = current.aqi,
                points = points.len(),
                "Simulated trend (mock data, not a forecast)"
            );

            match json {
                Some(path) => write_json(&path, &points)?,
                None => print_json(&points)?,
            }
        }
        Commands::RemoteTrends { zip, monthly } => {
            let username = std::env::var("CLEANSKIES_USERNAME")
                .context("CLEANSKIES_USERNAME must be set")?;
            let password = std::env::var("CLEANSKIES_PASSWORD")
                .context("CLEANSKIES_PASSWORD must be set")?;

            let client = ApiClient::new(&config.api_url)?;
            let mut session = client.login(&username, &password).await?;
            let user = client.me(&mut session).await?;
            info!(user = %user.username, "Logged in");

            let trends = client.trends(&session, &zip).await?;
            let series = if monthly {
                &trends.monthly_trends
            } else {
                &trends.weekly_trends
            };

            info!(
                location = %trends.location_name,
                points = series.len(),
                range = if monthly { "month" } else { "week" },
                "Fetched trends"
            );
            print_json(series)?;

            session.invalidate();
        }
        Commands::Chat {
            question,
            zip,
            health_issue,
            activity,
        } => {
            let client = ApiClient::new(&config.api_url)?;
            let query = ChatQuery {
                question,
                zip_code: zip,
                health_issue,
                activity,
            };
            let response = client.chat(&query).await?;
            info!(zip = %response.active_zip, "{}", response.answer);
        }
    }

    Ok(())
}

/// Logs a batch summary and writes the requested outputs.
fn report(classified: &[ClassifiedReading], csv: Option<&str>, json: Option<&str>) -> Result<()> {
    let summary = BatchSummary::from_readings(classified);
    info!(
        total = summary.total,
        clean = summary.clean,
        moderate = summary.moderate,
        unhealthy = summary.unhealthy,
        hazardous = summary.hazardous,
        mean_aqi = summary.mean_aqi,
        max_aqi = summary.max_aqi,
        worst = summary.worst_location.as_deref().unwrap_or("-"),
        "Batch summary"
    );
    print_pretty(&summary);

    for c in classified {
        info!(
            location = c.reading.label(),
            aqi = c.aqi,
            status = %c.status,
            "Reading"
        );
    }

    if let Some(path) = csv {
        append_records(path, classified)?;
        info!(path, rows = classified.len(), "Appended CSV");
    }
    if let Some(path) = json {
        write_json(path, classified)?;
        info!(path, "Wrote JSON");
    }
    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard must live until exit so buffered file output is
/// flushed.
fn init_logging(log_file_path: &str) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cleanskies.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
