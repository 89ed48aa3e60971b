// src/options.rs
use crate::error::Result;
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_MAX_SUGGESTION: usize = 10;
pub const DEFAULT_MISMATCH_ALLOW: usize = 3;
pub const DEFAULT_IGNORE_CASE: bool = true;

/// Resolved engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Caps every rank list and every suggestion set.
    pub max_suggestion: usize,
    /// How many character substitutions a query may spend, at most 3.
    pub allowed_mismatch_count: usize,
    /// Lowercase and trim text before it touches the trie.
    pub ignore_case: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_suggestion: DEFAULT_MAX_SUGGESTION,
            allowed_mismatch_count: DEFAULT_MISMATCH_ALLOW,
            ignore_case: DEFAULT_IGNORE_CASE,
        }
    }
}

/// A partial configuration. Unset fields keep their current (or default) value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsUpdate {
    pub max_suggestion: Option<usize>,
    pub allowed_mismatch_count: Option<usize>,
    pub ignore_case: Option<bool>,
}

impl OptionsUpdate {
    pub fn max_suggestion(mut self, value: usize) -> Self {
        self.max_suggestion = Some(value);
        self
    }

    pub fn allowed_mismatch_count(mut self, value: usize) -> Self {
        self.allowed_mismatch_count = Some(value);
        self
    }

    pub fn ignore_case(mut self, value: bool) -> Self {
        self.ignore_case = Some(value);
        self
    }
}

impl Options {
    /// Builds options for a new engine. A mismatch count of 0 is honored
    /// here; anything above 3 falls back to the default.
    pub fn new(update: OptionsUpdate) -> Self {
        let mut options = Self::default();
        if let Some(max) = update.max_suggestion {
            options.max_suggestion = clamp_max_suggestion(max);
        }
        if let Some(count) = update.allowed_mismatch_count {
            options.allowed_mismatch_count = if count > DEFAULT_MISMATCH_ALLOW {
                warn!(target: "autocomplete::options", count, "mismatch count out of range, using default");
                DEFAULT_MISMATCH_ALLOW
            } else {
                count
            };
        }
        if let Some(ignore_case) = update.ignore_case {
            options.ignore_case = ignore_case;
        }
        options
    }

    /// Parses a JSON object such as `{"maxSuggestion": 3, "ignoreCase": false}`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let update: OptionsUpdate = serde_json::from_str(raw)?;
        Ok(Self::new(update))
    }

    /// Applies a partial update to live options. Unlike construction, a
    /// mismatch count of 0 is treated as unset and resets to the default.
    pub fn apply(&mut self, update: OptionsUpdate) {
        if let Some(max) = update.max_suggestion {
            self.max_suggestion = clamp_max_suggestion(max);
        }
        if let Some(count) = update.allowed_mismatch_count {
            self.allowed_mismatch_count = if count == 0 || count > DEFAULT_MISMATCH_ALLOW {
                warn!(target: "autocomplete::options", count, "mismatch count reset to default");
                DEFAULT_MISMATCH_ALLOW
            } else {
                count
            };
        }
        if let Some(ignore_case) = update.ignore_case {
            self.ignore_case = ignore_case;
        }
    }
}

fn clamp_max_suggestion(max: usize) -> usize {
    if max == 0 {
        warn!(target: "autocomplete::options", "max suggestion must be positive, using default");
        DEFAULT_MAX_SUGGESTION
    } else {
        max
    }
}
