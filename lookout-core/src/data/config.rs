use std::{
    env::{self, VarError},
    fs::File,
    path::PathBuf,
    time::Duration,
};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};

use crate::{error::Error, util::mkdir_if_not_exists};

const APP_NAME: &str = "Lookout";
const CONFIG_FILENAME: &str = "config.json";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";
const SERVER_ENV_VAR: &str = "LOOKOUT_SERVER";
const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub refresh_interval_ms: u64,
    pub start_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/".to_string(),
            refresh_interval_ms: 5000,
            start_path: "/".to_string(),
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    /// Loads the saved config, `None` if there is none yet.
    pub fn load() -> Result<Option<Config>, Error> {
        let path = Self::config_path()
            .ok_or_else(|| Error::ConfigError("no config directory".to_string()))?;
        if let Ok(file) = File::open(&path) {
            log::info!("loading config: {:?}", &path);
            Ok(Some(serde_json::from_reader(file)?))
        } else {
            Ok(None)
        }
    }

    pub fn save(&self) -> Result<(), Error> {
        let dir = Self::config_dir()
            .ok_or_else(|| Error::ConfigError("no config directory".to_string()))?;
        mkdir_if_not_exists(&dir)?;
        let file = File::create(dir.join(CONFIG_FILENAME))?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Applies overrides from the environment.
    pub fn with_env(mut self) -> Self {
        if let Some(url) = read_env(SERVER_ENV_VAR) {
            self.server_url = url;
        }
        self
    }

    /// Refresh period, never shorter than half a second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms).max(MIN_REFRESH_INTERVAL)
    }

    pub fn proxy() -> Option<String> {
        read_env(PROXY_ENV_VAR)
    }
}

fn read_env(name: &str) -> Option<String> {
    env::var(name).map_or_else(
        |err| match err {
            VarError::NotPresent => None,
            VarError::NotUnicode(_) => {
                log::error!("{} is not a valid unicode", name);
                None
            }
        },
        Some,
    )
}
