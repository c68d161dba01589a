//! Debug configuration from environment variables

use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "dashboard=info,lib_evm=info,warn";
pub const LOG_FILE_NAME: &str = "dashboard.log";

/// Debug system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file path, without the rotation date suffix
    pub log_file: PathBuf,
    /// Log level filter (e.g., "dashboard=debug,info")
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let log_dir = PathBuf::from("logs");
        Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            log_dir,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("DASHBOARD_LOG_DIR").ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_values(log_dir: Option<String>, log_level: Option<String>) -> Self {
        let log_dir = log_dir
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("logs"));

        Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            log_dir,
            log_level: log_level
                .filter(|level| !level.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = DebugConfig::from_values(None, None);
        assert_eq!(config, DebugConfig::default());
        assert_eq!(config.log_file, PathBuf::from("logs/dashboard.log"));
    }

    #[test]
    fn test_custom_dir_and_level() {
        let config = DebugConfig::from_values(
            Some("/tmp/wind".to_string()),
            Some("lib_evm=trace".to_string()),
        );
        assert_eq!(config.log_file, PathBuf::from("/tmp/wind/dashboard.log"));
        assert_eq!(config.log_level, "lib_evm=trace");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = DebugConfig::from_values(Some("  ".to_string()), Some(String::new()));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }
}
