use std::{
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{apod, facts};

pub const API_KEY_ENV: &str = "NASA_API_KEY";

const CONFIG_FILE: &str = "apod.toml";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read {0}: {1}")]
    Read(PathBuf, io::Error),

    #[error("parse {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub fact_interval_secs: Option<u64>,
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "apod").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(x) => x,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(Error::Read(path.to_owned(), err)),
        };

        toml::from_str(&content).map_err(|err| Error::Parse(path.to_owned(), err))
    }

    /// Flag or environment first, then the file, then the demo key.
    /// A blank source counts as unset.
    pub fn api_key(&self, explicit: Option<&str>) -> String {
        fn non_blank(x: Option<&str>) -> Option<&str> {
            x.map(str::trim).filter(|x| !x.is_empty())
        }

        non_blank(explicit)
            .or_else(|| non_blank(self.api_key.as_deref()))
            .unwrap_or(apod::DEMO_KEY)
            .to_owned()
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(apod::BASE_URL)
    }

    pub fn fact_interval(&self) -> Duration {
        self.fact_interval_secs
            .filter(|x| *x > 0)
            .map(Duration::from_secs)
            .unwrap_or(facts::FACT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.api_key(None), apod::DEMO_KEY);
        assert_eq!(config.base_url(), apod::BASE_URL);
        assert_eq!(config.fact_interval(), facts::FACT_INTERVAL);
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "api_key = \"from-file\"\nbase_url = \"http://localhost:8080/apod\"\nfact_interval_secs = 5\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.api_key(None), "from-file");
        assert_eq!(config.api_key(Some("from-flag")), "from-flag");
        assert_eq!(config.base_url(), "http://localhost:8080/apod");
        assert_eq!(config.fact_interval(), Duration::from_secs(5));
    }

    #[test]
    fn blank_key_falls_back_to_demo() {
        let config = Config {
            api_key: Some("  ".to_owned()),
            ..Default::default()
        };

        assert_eq!(config.api_key(None), apod::DEMO_KEY);
        assert_eq!(config.api_key(Some("")), apod::DEMO_KEY);
    }

    #[test]
    fn blank_env_key_falls_back_to_file() {
        let config = Config {
            api_key: Some("from-file".to_owned()),
            ..Default::default()
        };

        assert_eq!(config.api_key(Some("")), "from-file");
        assert_eq!(config.api_key(Some("   ")), "from-file");
        assert_eq!(config.api_key(Some(" from-env ")), "from-env");
    }

    #[test]
    fn malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "api_key = [").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Parse(..))));
    }
}
