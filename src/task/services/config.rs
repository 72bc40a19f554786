//! Tunables for a [`super::TaskDirectory`].

use serde::{Deserialize, Serialize};

/// Configuration for a task directory.
///
/// Missing fields fall back to their defaults when deserialized, so a
/// partial configuration document is valid.
///
/// # Examples
///
/// ```
/// use taskboard::task::services::DirectoryConfig;
///
/// let config = DirectoryConfig::default();
/// assert_eq!(config.default_list_limit, 100);
/// assert_eq!(config.default_velocity_window_days, 14);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Page size used when a list query does not set its own limit.
    pub default_list_limit: usize,
    /// Trailing window, in days, used by the default velocity calculation.
    pub default_velocity_window_days: u32,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            default_list_limit: 100,
            default_velocity_window_days: 14,
        }
    }
}

impl DirectoryConfig {
    /// Returns a copy with a different default page size.
    #[must_use]
    pub const fn with_default_list_limit(mut self, limit: usize) -> Self {
        self.default_list_limit = limit;
        self
    }

    /// Returns a copy with a different default velocity window.
    #[must_use]
    pub const fn with_default_velocity_window_days(mut self, days: u32) -> Self {
        self.default_velocity_window_days = days;
        self
    }
}
