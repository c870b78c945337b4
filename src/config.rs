use std::fs;
use std::time::Duration;

use camino::Utf8PathBuf;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::OrthologError;

pub const DEFAULT_DOWNLOADS_URL: &str = "https://fungidb.org/common/downloads/Current_Release/";
pub const DEFAULT_REPORT_URL: &str = "https://fungidb.org/fungidb/service/record-types/gene/searches/GenesByTaxonGene/reports/tableTabular";
pub const CONFIG_FILE_NAME: &str = "fungidb-orthologs.json";

/// On-disk settings; every field may be omitted.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub downloads_url: Option<String>,
    #[serde(default)]
    pub report_url: Option<String>,
    #[serde(default)]
    pub listing_timeout_secs: Option<u64>,
    #[serde(default)]
    pub report_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub downloads_url: String,
    pub report_url: String,
    pub listing_timeout: Duration,
    pub report_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            downloads_url: DEFAULT_DOWNLOADS_URL.to_string(),
            report_url: DEFAULT_REPORT_URL.to_string(),
            listing_timeout: Duration::from_secs(30),
            // ortholog tables for large genomes take minutes
            report_timeout: Duration::from_secs(300),
        }
    }
}

pub struct SettingsLoader;

impl SettingsLoader {
    /// An explicit path must be readable. Without one, the project file and
    /// then the user config file are tried; defaults apply when neither
    /// exists.
    pub fn resolve(path: Option<&str>) -> Result<Settings, OrthologError> {
        let config_path = match path {
            Some(path) => Some(Utf8PathBuf::from(path)),
            None => Self::candidate_paths().into_iter().find(|p| p.exists()),
        };

        let Some(config_path) = config_path else {
            return Ok(Settings::default());
        };

        tracing::debug!("loading settings from {config_path}");
        let content = fs::read_to_string(&config_path)
            .map_err(|_| OrthologError::ConfigRead(config_path.clone().into_std_path_buf()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| OrthologError::ConfigParse(err.to_string()))?;

        Ok(Self::resolve_config(config))
    }

    pub fn resolve_config(config: Config) -> Settings {
        let defaults = Settings::default();
        Settings {
            downloads_url: config.downloads_url.unwrap_or(defaults.downloads_url),
            report_url: config.report_url.unwrap_or(defaults.report_url),
            listing_timeout: config
                .listing_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.listing_timeout),
            report_timeout: config
                .report_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.report_timeout),
        }
    }

    fn candidate_paths() -> Vec<Utf8PathBuf> {
        let mut paths = vec![Utf8PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(user) = BaseDirs::new().and_then(|dirs| {
            Utf8PathBuf::from_path_buf(dirs.config_dir().join("fungidb-orthologs").join("config.json"))
                .ok()
        }) {
            paths.push(user);
        }
        paths
    }
}
