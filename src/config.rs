//! Configuration for rho-scan
//!
//! Fixtures and run options come from environment variables (with `.env`
//! support) or from a TOML file.

use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

// ============================================
// MAIN CONFIGURATION
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // ========== Price Scan ==========
    /// Daily prices for the max-profit scan
    pub prices: Vec<u64>,

    // ========== Cycle Detection ==========
    /// Node values, linked in order from the head
    pub list_values: Vec<i64>,

    /// Index the tail links back to (None = no cycle, written as -1)
    #[serde(with = "pos_format")]
    pub cycle_pos: Option<usize>,

    // ========== Run Log ==========
    /// Append one JSON line per exercise run
    pub run_log: bool,

    pub run_log_path: String,

    // ========== Crosscheck ==========
    /// Random lists to generate per crosscheck
    pub crosscheck_trials: usize,

    /// Longest random list
    pub crosscheck_max_len: usize,

    /// Fixed RNG seed (random if unset)
    #[serde(with = "seed_format", skip_serializing_if = "Option::is_none")]
    pub crosscheck_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            prices: env::var("PRICES")
                .map(|s| parse_list("PRICES", &s, defaults.prices.clone()))
                .unwrap_or(defaults.prices),
            list_values: env::var("LIST_VALUES")
                .map(|s| parse_list("LIST_VALUES", &s, defaults.list_values.clone()))
                .unwrap_or(defaults.list_values),
            cycle_pos: match env::var("CYCLE_POS") {
                Ok(s) => parse_pos(&s),
                Err(_) => defaults.cycle_pos,
            },

            run_log: env::var("RUN_LOG")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            run_log_path: env::var("RUN_LOG_PATH").unwrap_or(defaults.run_log_path),

            crosscheck_trials: env::var("CROSSCHECK_TRIALS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10_000),
            crosscheck_max_len: env::var("CROSSCHECK_MAX_LEN")
                .unwrap_or_else(|_| "64".to_string())
                .parse()
                .unwrap_or(64),
            crosscheck_seed: env::var("CROSSCHECK_SEED").ok().and_then(|s| s.parse().ok()),
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.cycle_pos {
            if pos >= self.list_values.len() {
                return Err(eyre!(
                    "CYCLE_POS {} is out of range for {} LIST_VALUES",
                    pos,
                    self.list_values.len()
                ));
            }
        }

        if self.crosscheck_trials == 0 {
            return Err(eyre!("CROSSCHECK_TRIALS must be at least 1"));
        }
        if self.crosscheck_max_len == 0 {
            return Err(eyre!("CROSSCHECK_MAX_LEN must be at least 1"));
        }

        Ok(())
    }

    pub fn print_summary(&self) {
        let pos = self
            .cycle_pos
            .map(|p| p.to_string())
            .unwrap_or_else(|| "none".to_string());
        let seed = self
            .crosscheck_seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "random".to_string());

        println!("╔════════════════════════════════════════════════════════════╗");
        println!("║                RHO-SCAN - CONFIGURATION                    ║");
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ PRICE SCAN                                                 ║");
        println!("║ • Days:            {:^40} ║", self.prices.len());
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ CYCLE DETECTION                                            ║");
        println!("║ • Nodes:           {:^40} ║", self.list_values.len());
        println!("║ • Tail links to:   {:^40} ║", pos);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ CROSSCHECK                                                 ║");
        println!("║ • Trials:          {:^40} ║", self.crosscheck_trials);
        println!("║ • Max Length:      {:^40} ║", self.crosscheck_max_len);
        println!("║ • Seed:            {:^40} ║", seed);
        println!("╠════════════════════════════════════════════════════════════╣");
        println!("║ • Run Log:         {:^40} ║",
            if self.run_log { "✓ Enabled" } else { "✗ Disabled" }
        );
        println!("╚════════════════════════════════════════════════════════════╝");
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prices: vec![7, 1, 5, 3, 6, 4],
            list_values: vec![1, 2, 3, 4, 5],
            cycle_pos: Some(1),
            run_log: false,
            run_log_path: "./logs/runs.jsonl".to_string(),
            crosscheck_trials: 10_000,
            crosscheck_max_len: 64,
            crosscheck_seed: None,
        }
    }
}

/// Comma-separated list; falls back to `default` on any bad entry
fn parse_list<T>(key: &str, raw: &str, default: Vec<T>) -> Vec<T>
where
    T: FromStr,
    T::Err: Display,
{
    let parsed: std::result::Result<Vec<T>, T::Err> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect();

    match parsed {
        Ok(values) => values,
        Err(e) => {
            warn!("Invalid {} ({}), using default", key, e);
            default
        }
    }
}

/// `-1` (or any negative) means no cycle
fn parse_pos(raw: &str) -> Option<usize> {
    match raw.trim().parse::<i64>() {
        Ok(p) if p >= 0 => Some(p as usize),
        Ok(_) => None,
        Err(e) => {
            warn!("Invalid CYCLE_POS ({}), using no cycle", e);
            None
        }
    }
}

/// `cycle_pos` in files: a plain integer, -1 for no cycle
mod pos_format {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pos: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match pos {
            Some(p) => serializer.serialize_i64(*p as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}

/// `crosscheck_seed` in files: TOML integers stop at i64::MAX, so seeds are
/// written as strings and read back from either form
mod seed_format {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSeed {
        Int(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(seed: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match seed {
            Some(s) => serializer.serialize_str(&s.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        match RawSeed::deserialize(deserializer)? {
            RawSeed::Int(s) => Ok(Some(s)),
            RawSeed::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ============================================
// RUN LOG
// ============================================

/// One executed exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: DateTime<Utc>,
    pub exercise: String,
    pub input: String,
    pub result: String,
}

impl RunRecord {
    pub fn new(exercise: &str, input: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            exercise: exercise.to_string(),
            input: input.into(),
            result: result.into(),
        }
    }

    /// Append this record as one JSON line
    pub fn append_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        let json = serde_json::to_string(self)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.prices, vec![7, 1, 5, 3, 6, 4]);
        assert_eq!(config.cycle_pos, Some(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_pos() {
        let config = Config {
            list_values: vec![1, 2],
            cycle_pos: Some(2),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            list_values: vec![],
            cycle_pos: None,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_crosscheck() {
        let config = Config {
            crosscheck_trials: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            crosscheck_max_len: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list::<u64>("PRICES", "7, 1,5", vec![]), vec![7, 1, 5]);
        assert_eq!(parse_list::<u64>("PRICES", "", vec![9]), Vec::<u64>::new());
        assert_eq!(parse_list::<u64>("PRICES", "1,x", vec![9]), vec![9]);
        assert_eq!(parse_list::<i64>("LIST_VALUES", "3,2,0,-4", vec![]), vec![3, 2, 0, -4]);
    }

    #[test]
    fn test_parse_pos() {
        assert_eq!(parse_pos("1"), Some(1));
        assert_eq!(parse_pos("-1"), None);
        assert_eq!(parse_pos("abc"), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("prices = [3, 8]\ncycle_pos = 0\n").unwrap();
        assert_eq!(config.prices, vec![3, 8]);
        assert_eq!(config.cycle_pos, Some(0));
        assert_eq!(config.list_values, vec![1, 2, 3, 4, 5]);

        let config: Config = toml::from_str("cycle_pos = -1\n").unwrap();
        assert_eq!(config.cycle_pos, None);

        let config: Config = toml::from_str("crosscheck_seed = 42\n").unwrap();
        assert_eq!(config.crosscheck_seed, Some(42));
        assert_eq!(Config::default().crosscheck_seed, None);
    }

    #[test]
    fn test_large_seed_survives_toml() {
        let config = Config {
            crosscheck_seed: Some(u64::MAX - 1),
            ..Config::default()
        };

        let text = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&text).unwrap();
        assert_eq!(loaded.crosscheck_seed, Some(u64::MAX - 1));

        let loaded: Config = toml::from_str("crosscheck_seed = \"18446744073709551614\"\n").unwrap();
        assert_eq!(loaded.crosscheck_seed, Some(18_446_744_073_709_551_614));

        let unset = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(!unset.contains("crosscheck_seed"));
    }

    #[test]
    fn test_file_round_trip_and_run_log() {
        let dir = std::env::temp_dir().join(format!("rho-scan-test-{}", std::process::id()));
        let config_path = dir.join("config.toml");
        fs::create_dir_all(&dir).unwrap();

        let config = Config {
            cycle_pos: None,
            crosscheck_seed: Some(99),
            ..Config::default()
        };
        config.save_to_file(&config_path).unwrap();
        assert_eq!(Config::from_file(&config_path).unwrap(), config);

        let log_path = dir.join("logs").join("runs.jsonl");
        RunRecord::new("profit", "[7,1,5]", "4").append_to_file(&log_path).unwrap();
        RunRecord::new("cycle", "1 → 2", "none").append_to_file(&log_path).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: RunRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.exercise, "profit");
        assert_eq!(first.result, "4");

        fs::remove_dir_all(&dir).ok();
    }
}
