//! Front-end configuration file.

use std::path::Path;
use std::time::Duration;

use cq_core::{Cue, CueMap, SessionConfig};
use serde::Deserialize;

/// Settings read from a TOML file, all optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuiConfig {
    /// Exit cooldown in milliseconds.
    pub exit_delay_ms: u64,
    /// Frame length in milliseconds.
    pub tick_rate_ms: u64,
    /// Number of choice slots on screen.
    pub slots: usize,
    /// Choice-to-cue rules.
    pub cues: Vec<CueRule>,
}

/// Fires `cue` when a choice matches `choice` (index) or `tag`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CueRule {
    /// 0-based choice index to match.
    pub choice: Option<usize>,
    /// Choice tag to match.
    pub tag: Option<String>,
    /// Cue to fire.
    pub cue: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            exit_delay_ms: 200,
            tick_rate_ms: 16,
            slots: 4,
            cues: Vec::new(),
        }
    }
}

impl TuiConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        Self::parse(&text).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Parse config from TOML text.
    pub fn parse(text: &str) -> Result<Self, String> {
        let config: TuiConfig = toml::from_str(text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that parse but cannot run a session.
    ///
    /// With no slots a choice point can never be answered.
    pub fn validate(&self) -> Result<(), String> {
        if self.slots == 0 {
            return Err("`slots` must be at least 1".to_string());
        }
        self.cue_map().map(|_| ())
    }

    /// Frame length.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Session settings derived from this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new().with_exit_delay(Duration::from_millis(self.exit_delay_ms))
    }

    /// Build the cue map. Each rule needs exactly one of `choice` or `tag`.
    pub fn cue_map(&self) -> Result<CueMap, String> {
        self.cues
            .iter()
            .try_fold(CueMap::new(), |map, rule| match (&rule.choice, &rule.tag) {
                (Some(index), None) => Ok(map.with_index_cue(*index, Cue::new(&rule.cue))),
                (None, Some(tag)) => Ok(map.with_tag_cue(tag, Cue::new(&rule.cue))),
                _ => Err(format!(
                    "cue '{}' needs exactly one of `choice` or `tag`",
                    rule.cue
                )),
            })
    }
}
