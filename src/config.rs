// src/config.rs

//! Configuration loading utilities.
//!
//! The CLI loads a TOML config file; the Lambda environment builds its
//! configuration from environment variables. The upstream API key always
//! comes from the environment, never from a file.

use std::path::Path;

use crate::error::Result;
use crate::models::{ApiKey, Config};

/// Load configuration from a TOML file.
///
/// Falls back to defaults if loading fails.
pub fn load_config(path: &Path) -> Config {
    Config::load_or_default(path)
}

/// Load and validate configuration plus the API key for local runs.
pub fn load_all(config_path: &Path) -> Result<(Config, ApiKey)> {
    let config = load_config(config_path);
    config.validate()?;
    let api_key = ApiKey::from_env()?;
    Ok((config, api_key))
}

/// Build and validate configuration plus the API key from the environment.
///
/// Used in the Lambda environment where no config file is deployed.
pub fn load_from_env() -> Result<(Config, ApiKey)> {
    let config = Config::from_env();
    config.validate()?;
    let api_key = ApiKey::from_env()?;
    Ok((config, api_key))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[upstream]\nbase_url = \"https://example.com/headlines\"\nmax_results = 5"
        )
        .unwrap();

        let config = load_config(file.path());
        assert_eq!(config.upstream.base_url, "https://example.com/headlines");
        assert_eq!(config.upstream.max_results, 5);
        assert_eq!(config.upstream.lang, "en");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.upstream.country, "us");
    }
}
