//! Validated synchronization options.

use chrono::Duration as ChronoDuration;
use std::time::Duration;
use thiserror::Error;

/// Smallest accepted poll interval in seconds.
pub const MIN_POLL_INTERVAL_SECS: u64 = 60;
/// Largest accepted poll interval in seconds.
pub const MAX_POLL_INTERVAL_SECS: u64 = 3600;
/// Poll interval used when the host supplies no value.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Smallest accepted due-soon window in minutes.
pub const MIN_DUE_SOON_MINUTES: u32 = 5;
/// Largest accepted due-soon window in minutes.
pub const MAX_DUE_SOON_MINUTES: u32 = 120;
/// Due-soon window used when the host supplies no value.
pub const DEFAULT_DUE_SOON_MINUTES: u32 = 30;

/// Errors returned while validating synchronization options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The poll interval lies outside the accepted bounds.
    #[error(
        "poll interval {0}s out of range \
         [{MIN_POLL_INTERVAL_SECS}, {MAX_POLL_INTERVAL_SECS}]"
    )]
    PollIntervalOutOfRange(u64),

    /// The due-soon window lies outside the accepted bounds.
    #[error(
        "due-soon window {0}min out of range \
         [{MIN_DUE_SOON_MINUTES}, {MAX_DUE_SOON_MINUTES}]"
    )]
    DueSoonWindowOutOfRange(u32),
}

/// Synchronization options supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    poll_interval_secs: u64,
    due_soon_minutes: u32,
    include_completed: bool,
}

impl SyncConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when either value lies outside its bounds.
    /// Out-of-range values are rejected, not clamped.
    pub const fn new(
        poll_interval_secs: u64,
        due_soon_minutes: u32,
        include_completed: bool,
    ) -> Result<Self, ConfigError> {
        if poll_interval_secs < MIN_POLL_INTERVAL_SECS
            || poll_interval_secs > MAX_POLL_INTERVAL_SECS
        {
            return Err(ConfigError::PollIntervalOutOfRange(poll_interval_secs));
        }
        if due_soon_minutes < MIN_DUE_SOON_MINUTES || due_soon_minutes > MAX_DUE_SOON_MINUTES {
            return Err(ConfigError::DueSoonWindowOutOfRange(due_soon_minutes));
        }
        Ok(Self {
            poll_interval_secs,
            due_soon_minutes,
            include_completed,
        })
    }

    /// Returns the interval between scheduled refreshes.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Returns the due-soon window as a chrono duration for timestamp
    /// arithmetic.
    #[must_use]
    pub fn due_soon_window(&self) -> ChronoDuration {
        ChronoDuration::minutes(i64::from(self.due_soon_minutes))
    }

    /// Returns the configured due-soon window in minutes.
    #[must_use]
    pub const fn due_soon_minutes(&self) -> u32 {
        self.due_soon_minutes
    }

    /// Returns the include-completed flag.
    ///
    /// Accepted and stored for hosts that persist it, but not yet honoured
    /// by the refresh filter: completed tasks are always excluded from
    /// snapshots pending product clarification of the intended behaviour.
    #[must_use]
    pub const fn include_completed(&self) -> bool {
        self.include_completed
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            due_soon_minutes: DEFAULT_DUE_SOON_MINUTES,
            include_completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SyncConfig};

    #[test]
    fn default_config_uses_documented_values() {
        let config = SyncConfig::default();
        assert_eq!(config.poll_interval().as_secs(), 300);
        assert_eq!(config.due_soon_minutes(), 30);
        assert!(!config.include_completed());
    }

    #[test]
    fn new_accepts_boundary_values() {
        assert!(SyncConfig::new(60, 5, false).is_ok());
        assert!(SyncConfig::new(3600, 120, true).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_poll_interval() {
        assert_eq!(
            SyncConfig::new(59, 30, false),
            Err(ConfigError::PollIntervalOutOfRange(59))
        );
        assert_eq!(
            SyncConfig::new(3601, 30, false),
            Err(ConfigError::PollIntervalOutOfRange(3601))
        );
    }

    #[test]
    fn new_rejects_out_of_range_due_soon_window() {
        assert_eq!(
            SyncConfig::new(300, 4, false),
            Err(ConfigError::DueSoonWindowOutOfRange(4))
        );
        assert_eq!(
            SyncConfig::new(300, 121, false),
            Err(ConfigError::DueSoonWindowOutOfRange(121))
        );
    }
}
