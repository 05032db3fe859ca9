use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parse settings for one platform's export format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Field delimiter in the export file.
    pub delimiter: char,
    /// Column holding the shelf/status value.
    pub status_column: String,
    /// Rows are kept only when the status column equals this
    /// (case-insensitive, trimmed).
    pub status_value: String,
    /// Date formats tried in order until one parses.
    pub date_formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// +/- slack in days when comparing two events' date ranges.
    pub tolerance_days: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self { tolerance_days: 30 }
    }
}

/// Optional TOML profile overriding the built-in parse settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncProfile {
    pub matching: MatchingConfig,
    pub goodreads: PlatformConfig,
    pub booktracker: PlatformConfig,
}

impl Default for SyncProfile {
    fn default() -> Self {
        let formats = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            matching: MatchingConfig::default(),
            goodreads: PlatformConfig {
                delimiter: ',',
                status_column: "Exclusive Shelf".to_string(),
                status_value: "read".to_string(),
                date_formats: formats(&["%Y/%m/%d", "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"]),
            },
            booktracker: PlatformConfig {
                delimiter: ';',
                status_column: "readingStatus".to_string(),
                status_value: "read".to_string(),
                date_formats: formats(&["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"]),
            },
        }
    }
}

impl SyncProfile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyncError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        let profile: SyncProfile =
            toml::from_str(&processed).map_err(|e| SyncError::ConfigValidationError {
                field: "profile".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        profile.validate()?;
        Ok(profile)
    }

    /// 替換環境變數 (例如 ${SYNC_TOLERANCE})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for SyncProfile {
    fn validate(&self) -> Result<()> {
        validate_range("matching.tolerance_days", self.matching.tolerance_days, 0, 3650)?;

        for (name, platform) in [
            ("goodreads", &self.goodreads),
            ("booktracker", &self.booktracker),
        ] {
            if platform.date_formats.is_empty() {
                return Err(SyncError::ConfigValidationError {
                    field: format!("{}.date_formats", name),
                    message: "At least one date format is required".to_string(),
                });
            }
            if !platform.delimiter.is_ascii() {
                return Err(SyncError::ConfigValidationError {
                    field: format!("{}.delimiter", name),
                    message: "Delimiter must be a single ASCII character".to_string(),
                });
            }
        }
        Ok(())
    }
}
