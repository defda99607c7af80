use crate::{TaskboardError, TaskboardResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MAX_LISTS: usize = 6;
pub const DEFAULT_LIST_TITLE: &str = "New List";
pub const DEFAULT_TASK_DATE: &str = "Today";
pub const DEFAULT_COMPLETED_BADGE_THRESHOLD: usize = 10;

/// Retry schedule for store writes that report failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    50
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), doubling each time.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.initial_backoff_ms.saturating_mul(factor))
    }

    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_max_lists")]
    pub max_lists: usize,
    /// Lists holding more tasks than this need an explicit confirmation before deletion.
    #[serde(default)]
    pub delete_confirm_threshold: usize,
    #[serde(default = "default_list_title")]
    pub default_list_title: String,
    #[serde(default = "default_task_date")]
    pub default_task_date: String,
    #[serde(default = "default_completed_badge_threshold")]
    pub completed_badge_threshold: usize,
    #[serde(default)]
    pub write_retry: RetryPolicy,
}

fn default_max_lists() -> usize {
    DEFAULT_MAX_LISTS
}

fn default_list_title() -> String {
    DEFAULT_LIST_TITLE.to_string()
}

fn default_task_date() -> String {
    DEFAULT_TASK_DATE.to_string()
}

fn default_completed_badge_threshold() -> usize {
    DEFAULT_COMPLETED_BADGE_THRESHOLD
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_lists: default_max_lists(),
            delete_confirm_threshold: 0,
            default_list_title: default_list_title(),
            default_task_date: default_task_date(),
            completed_badge_threshold: default_completed_badge_threshold(),
            write_retry: RetryPolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Load from the platform config path, falling back to defaults.
    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(config) = Self::load_from(&config_path) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Load from an explicit path. Unlike [`AppConfig::load`], errors are reported.
    pub fn load_from(path: &Path) -> TaskboardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> TaskboardResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> TaskboardResult<()> {
        if self.max_lists == 0 {
            return Err(TaskboardError::Validation(
                "max_lists must be at least 1".into(),
            ));
        }
        if self.default_list_title.trim().is_empty() {
            return Err(TaskboardError::Validation(
                "default_list_title must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.max_lists, 6);
        assert_eq!(config.delete_confirm_threshold, 0);
        assert_eq!(config.default_list_title, "New List");
        assert_eq!(config.default_task_date, "Today");
        assert_eq!(config.completed_badge_threshold, 10);
        assert_eq!(config.write_retry.max_attempts, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let source = "max_lists = 4\n[write_retry]\nmax_attempts = 5\n";
        let config = AppConfig::from_toml(source).unwrap();
        assert_eq!(config.max_lists, 4);
        assert_eq!(config.default_list_title, "New List");
        assert_eq!(config.write_retry.max_attempts, 5);
        assert_eq!(config.write_retry.initial_backoff_ms, 50);
    }

    #[test]
    fn test_rejects_zero_max_lists() {
        let err = AppConfig::from_toml("max_lists = 0").unwrap_err();
        assert!(matches!(err, TaskboardError::Validation(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "delete_confirm_threshold = 1").unwrap();
        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.delete_confirm_threshold, 1);
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_attempts: 4,
            initial_backoff_ms: 10,
        };
        assert_eq!(policy.backoff_for(1), Duration::from_millis(10));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(20));
        assert_eq!(policy.backoff_for(3), Duration::from_millis(40));
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            initial_backoff_ms: 0,
        };
        assert_eq!(policy.effective_max_attempts(), 1);
    }
}
