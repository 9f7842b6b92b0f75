use crate::assessment::{AdvisorSettings, TierLabels, TierOrdering, TierPolicy, TierPolicyError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub advisor: AdvisorSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(value) => LogFormat::parse(&value)?,
            Err(_) => LogFormat::Compact,
        };

        let catalog = CatalogConfig {
            questions_csv: env::var_os("ADMIT_QUESTIONS_CSV").map(PathBuf::from),
            weights_csv: env::var_os("ADMIT_WEIGHTS_CSV").map(PathBuf::from),
            benchmarks_csv: env::var_os("ADMIT_BENCHMARKS_CSV").map(PathBuf::from),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            catalog,
            advisor: load_advisor_settings()?,
        })
    }
}

fn load_advisor_settings() -> Result<AdvisorSettings, ConfigError> {
    let defaults = AdvisorSettings::default();

    let safe_threshold = parse_number_var("ADMIT_SAFE_GAP_PCT")?
        .unwrap_or(defaults.tier_policy.safe_threshold);
    let target_threshold = parse_number_var("ADMIT_TARGET_GAP_PCT")?
        .unwrap_or(defaults.tier_policy.target_threshold);

    let ordering = match env::var("ADMIT_TIER_ORDERING") {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "closest_gap" | "closest-gap" | "gap" => TierOrdering::ClosestGapFirst,
            "prestige" | "benchmark" => TierOrdering::PrestigeFirst,
            _ => return Err(ConfigError::InvalidTierOrdering(value)),
        },
        Err(_) => defaults.tier_policy.ordering,
    };

    let labels = match env::var("ADMIT_TIER_LABELS") {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "classic" => TierLabels::Classic,
            "growth" => TierLabels::Growth,
            _ => return Err(ConfigError::InvalidTierLabels(value)),
        },
        Err(_) => defaults.tier_policy.labels,
    };

    let max_regions = match env::var("ADMIT_MAX_REGIONS") {
        Ok(value) => match value.trim().parse::<usize>() {
            Ok(count) if count > 0 => count,
            _ => return Err(ConfigError::InvalidMaxRegions(value)),
        },
        Err(_) => defaults.max_regions,
    };

    let tier_policy = TierPolicy::new(safe_threshold, target_threshold)
        .map_err(ConfigError::TierPolicy)?
        .with_ordering(ordering)
        .with_labels(labels);

    Ok(AdvisorSettings {
        tier_policy,
        max_regions,
    })
}

fn parse_number_var(name: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        Err(_) => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

/// Optional CSV overrides for the bundled reference data.
#[derive(Debug, Clone, Default)]
pub struct CatalogConfig {
    pub questions_csv: Option<PathBuf>,
    pub weights_csv: Option<PathBuf>,
    pub benchmarks_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidNumber { name: &'static str, value: String },
    InvalidTierOrdering(String),
    InvalidTierLabels(String),
    InvalidMaxRegions(String),
    TierPolicy(TierPolicyError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'full', got '{value}'")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a number, got '{value}'")
            }
            ConfigError::InvalidTierOrdering(value) => write!(
                f,
                "ADMIT_TIER_ORDERING must be 'closest_gap' or 'prestige', got '{value}'"
            ),
            ConfigError::InvalidTierLabels(value) => write!(
                f,
                "ADMIT_TIER_LABELS must be 'classic' or 'growth', got '{value}'"
            ),
            ConfigError::InvalidMaxRegions(value) => {
                write!(f, "ADMIT_MAX_REGIONS must be a positive integer, got '{value}'")
            }
            ConfigError::TierPolicy(err) => write!(f, "invalid tier thresholds: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::TierPolicy(err) => Some(err),
            _ => None,
        }
    }
}
