use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_DATASET_PATH: &str = "data/vehicles_dataset.csv";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: PathBuf,
    /// Keep the parsed dataset in memory between requests, reloading on file change.
    pub dataset_cache: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            dataset_path: std::env::var("DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATASET_PATH)),
            dataset_cache: parse_flag(
                "DATASET_CACHE",
                std::env::var("DATASET_CACHE").ok().as_deref(),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5001".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_flag(key: &str, value: Option<&str>) -> Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => bail!("{key} must be a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults_to_false() {
        assert!(!parse_flag("DATASET_CACHE", None).unwrap());
        assert!(!parse_flag("DATASET_CACHE", Some("  ")).unwrap());
    }

    #[test]
    fn test_flag_accepts_common_spellings() {
        assert!(parse_flag("DATASET_CACHE", Some("TRUE")).unwrap());
        assert!(parse_flag("DATASET_CACHE", Some("on")).unwrap());
        assert!(!parse_flag("DATASET_CACHE", Some("0")).unwrap());
    }

    #[test]
    fn test_flag_rejects_garbage() {
        let err = parse_flag("DATASET_CACHE", Some("maybe")).unwrap_err();
        assert!(err.to_string().contains("DATASET_CACHE"));
    }
}
