use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::leaderboard::LeaderboardPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Startup configuration of the server.
/// Everything here is injected into the adapters at launch.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Directory served as static files; local uploads land in its `uploads/` subdirectory.
    pub public_dir: PathBuf,
    /// Prefix for urls of locally stored uploads. Empty means relative urls.
    pub public_base_url: String,
    pub upload_limit_mib: u64,
    pub asset_store: AssetStoreConfig,
    pub ocr: OcrConfig,
    pub leaderboard: LeaderboardConfig,
    /// Whether `/save-score` rejects requests without a game name.
    pub game_name_required: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssetStoreConfig {
    Local,
    Cloudinary {
        api_base: String,
        cloud_name: String,
        upload_preset: String,
        folder: String,
    },
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub tesseract_path: PathBuf,
    pub tessdata_dir: Option<PathBuf>,
    pub language: String,
    pub timeout: Option<Duration>,
}

#[derive(Clone, Debug)]
pub struct LeaderboardConfig {
    pub policy: LeaderboardPolicy,
    pub window: chrono::Duration,
    pub per_game: i64,
    pub global_limit: i64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: PathBuf::from("tesseract"),
            tessdata_dir: None,
            language: "eng".to_owned(),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            policy: LeaderboardPolicy::Windowed,
            window: chrono::Duration::hours(48),
            per_game: 2,
            global_limit: 10,
        }
    }
}

impl Config {
    /// Default configuration around the given database.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            database_max_connections: 5,
            public_dir: PathBuf::from("public"),
            public_base_url: String::new(),
            upload_limit_mib: 50,
            asset_store: AssetStoreConfig::Local,
            ocr: OcrConfig::default(),
            leaderboard: LeaderboardConfig::default(),
            game_name_required: true,
        }
    }

    /// Reads the configuration from the environment, loading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| dotenv::var(key).ok())
    }

    /// Reads the configuration from variables looked up by name.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let vars = Vars { lookup };

        let mut config = Self::new(vars.required("DATABASE_URL")?);
        config.database_max_connections = vars.bounded(
            "DATABASE_MAX_CONNECTIONS",
            config.database_max_connections,
            |count| count > 0,
        )?;
        if let Some(dir) = vars.optional("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(url) = vars.optional("PUBLIC_BASE_URL") {
            config.public_base_url = url;
        }
        config.upload_limit_mib = vars.parsed("UPLOAD_LIMIT_MIB", config.upload_limit_mib)?;

        config.asset_store = match vars.optional("ASSET_STORE").as_deref() {
            None | Some("local") => AssetStoreConfig::Local,
            Some("cloudinary") => AssetStoreConfig::Cloudinary {
                api_base: vars
                    .optional("CLOUDINARY_API_BASE")
                    .unwrap_or_else(|| "https://api.cloudinary.com/v1_1".to_owned()),
                cloud_name: vars.required("CLOUDINARY_CLOUD_NAME")?,
                upload_preset: vars.required("CLOUDINARY_UPLOAD_PRESET")?,
                folder: vars
                    .optional("CLOUDINARY_FOLDER")
                    .unwrap_or_else(|| "meme".to_owned()),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "ASSET_STORE",
                    value: other.to_owned(),
                })
            }
        };

        if let Some(path) = vars.optional("TESSERACT_PATH") {
            config.ocr.tesseract_path = PathBuf::from(path);
        }
        config.ocr.tessdata_dir = vars.optional("TESSDATA_DIR").map(PathBuf::from);
        if let Some(language) = vars.optional("OCR_LANGUAGE") {
            config.ocr.language = language;
        }
        config.ocr.timeout = match vars.parsed("OCR_TIMEOUT_SECS", 60u64)? {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let leaderboard = &mut config.leaderboard;
        leaderboard.policy = vars.parsed("LEADERBOARD_POLICY", leaderboard.policy)?;
        let window_hours = vars.bounded("LEADERBOARD_WINDOW_HOURS", 48, |hours| {
            (1..=MAX_WINDOW_HOURS).contains(&hours)
        })?;
        leaderboard.window = chrono::Duration::hours(window_hours);
        leaderboard.per_game =
            vars.bounded("LEADERBOARD_PER_GAME", leaderboard.per_game, |limit| limit > 0)?;
        leaderboard.global_limit = vars.bounded(
            "LEADERBOARD_GLOBAL_LIMIT",
            leaderboard.global_limit,
            |limit| limit > 0,
        )?;

        config.game_name_required =
            vars.parsed("GAME_NAME_REQUIRED", config.game_name_required)?;

        Ok(config)
    }
}

/// A hundred years, far below where timestamp arithmetic overflows.
const MAX_WINDOW_HOURS: i64 = 100 * 366 * 24;

struct Vars<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    fn parsed<T: FromStr>(&self, key: &'static str, default: T) -> Result<T, ConfigError> {
        match self.optional(key) {
            None => Ok(default),
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value }),
        }
    }

    /// Like `parsed`, but also rejects values outside what `valid` accepts.
    fn bounded<T: FromStr + Copy>(
        &self,
        key: &'static str,
        default: T,
        valid: impl Fn(T) -> bool,
    ) -> Result<T, ConfigError> {
        let value = self.parsed(key, default)?;
        if valid(value) {
            Ok(value)
        } else {
            Err(ConfigError::Invalid {
                key,
                value: self.optional(key).unwrap_or_default(),
            })
        }
    }
}
