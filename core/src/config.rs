use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Truncate,
    Memory,
}

impl JournalMode {
    pub fn as_pragma_value(self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Memory => "MEMORY",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub journal_mode: JournalMode,
    /// How long a statement waits on a locked database before failing, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Make `list` prefix/pattern matching case-sensitive for ASCII letters.
    #[serde(default)]
    pub case_sensitive_like: bool,
}

const MAX_BUSY_TIMEOUT_MS: u64 = 600_000;

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            journal_mode: JournalMode::default(),
            busy_timeout_ms: default_busy_timeout_ms(),
            case_sensitive_like: false,
        }
    }
}

impl StoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.busy_timeout_ms > MAX_BUSY_TIMEOUT_MS {
            return Err(Error::InvalidConfig(format!(
                "busy_timeout_ms is too large ({}; max {})",
                self.busy_timeout_ms, MAX_BUSY_TIMEOUT_MS
            )));
        }
        Ok(())
    }
}
