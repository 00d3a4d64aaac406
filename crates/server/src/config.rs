//! Server configuration from environment variables.
//!
//! All variables carry the `RECMENDER_` prefix, e.g. `RECMENDER_DATA_DIR`
//! or `RECMENDER_OMDB_API_KEY`. A `.env` file is honored when present.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Directory containing movies.csv and ratings.csv
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Path to the serialized rating-prediction model
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Address to bind the HTTP listener to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the movie-metadata API
    #[serde(default = "default_omdb_base_url")]
    pub omdb_base_url: String,

    /// API key for the metadata API; the search endpoint returns an error
    /// when unset, everything else works without it
    #[serde(default)]
    pub omdb_api_key: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("resources/data")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("resources/models/svd.json")
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_omdb_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = envy::prefixed("RECMENDER_").from_env::<ServerConfig>()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        let config: ServerConfig = envy::prefixed("RECMENDER_TEST_UNSET_").from_env().unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.data_dir, PathBuf::from("resources/data"));
        assert!(config.omdb_api_key.is_none());
    }
}
