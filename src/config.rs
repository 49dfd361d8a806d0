use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub quiz: QuizSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

/// Remote backend endpoint (the client against it is stubbed for now)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSettings {
    #[serde(default = "default_question_count")]
    pub question_count: usize,
    #[serde(default = "default_time_limit_secs")]
    pub time_limit_secs: u64,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_count: default_question_count(),
            time_limit_secs: default_time_limit_secs(),
        }
    }
}

fn default_question_count() -> usize {
    5
}
fn default_time_limit_secs() -> u64 {
    180
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_college_bonus")]
    pub college_bonus: u8,
    #[serde(default = "default_empty_interests_default")]
    pub empty_interests_default: u8,
    #[serde(default = "default_mutual_probability")]
    pub mutual_probability: f64,
    #[serde(default = "default_high_threshold")]
    pub high_compatibility_threshold: u8,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            college_bonus: default_college_bonus(),
            empty_interests_default: default_empty_interests_default(),
            mutual_probability: default_mutual_probability(),
            high_compatibility_threshold: default_high_threshold(),
        }
    }
}

fn default_college_bonus() -> u8 {
    10
}
fn default_empty_interests_default() -> u8 {
    50
}
fn default_mutual_probability() -> f64 {
    0.7
}
fn default_high_threshold() -> u8 {
    80
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with CAMPUS_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. CAMPUS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CAMPUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quiz_settings() {
        let quiz = QuizSettings::default();
        assert_eq!(quiz.question_count, 5);
        assert_eq!(quiz.time_limit_secs, 180);
    }

    #[test]
    fn test_default_matching_settings() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.college_bonus, 10);
        assert_eq!(matching.empty_interests_default, 50);
        assert_eq!(matching.mutual_probability, 0.7);
        assert_eq!(matching.high_compatibility_threshold, 80);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
