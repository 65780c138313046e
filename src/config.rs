use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{StrataError, StrataResult};

/// Era keys of the built-in vignettes, in page order.
pub const ERAS: [&str; 5] = ["punch", "tape", "hdd", "ssd", "cloud"];

/// Stage settings, loadable from JSON.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Fixed seed for every random choice. `None` draws fresh randomness per load.
    pub seed: Option<u64>,
    /// Reset a visualization when its section is scrolled out of view.
    pub reset_on_exit: bool,
    /// Frame interval used by headless drivers.
    pub frame_ms: f64,
    /// Container selector overrides by era key. Unlisted eras use `#viz-<era>`.
    pub containers: BTreeMap<String, String>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reset_on_exit: true,
            frame_ms: 1000.0 / 60.0,
            containers: BTreeMap::new(),
        }
    }
}

impl StageConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> StrataResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| StrataError::validation(format!("stage config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Container selector for `era`.
    pub fn selector(&self, era: &str) -> String {
        self.containers
            .get(era)
            .cloned()
            .unwrap_or_else(|| format!("#viz-{era}"))
    }

    /// Reject settings no driver can honor.
    pub fn validate(&self) -> StrataResult<()> {
        if !self.frame_ms.is_finite() || self.frame_ms <= 0.0 || self.frame_ms > 1000.0 {
            return Err(StrataError::validation(format!(
                "frame_ms must be in (0, 1000], got {}",
                self.frame_ms
            )));
        }
        for (era, selector) in &self.containers {
            let id = selector.strip_prefix('#').unwrap_or_default();
            if id.is_empty() || id.contains(char::is_whitespace) {
                return Err(StrataError::validation(format!(
                    "container for era '{era}' must be an '#id' selector, got '{selector}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
