use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// How a `Disabled` macroboard slot (full, no recorded result) is scored
/// when ranking microboards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabledScoring {
    /// Dead slot: blocks macro lines for both players.
    #[default]
    AsTie,
    /// Treated as empty for line detection. It is still never offered as a
    /// place to play.
    AsUndecided,
}

/// When the safety filter runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyMode {
    Off,
    /// Under free choice, drop microboards whose top-ranked move would send
    /// the opponent into a board where they already threaten. Forced play
    /// takes the top-ranked move.
    #[default]
    TopRanked,
    /// Always look for any local move with a safe destination, both under
    /// free choice and forced play, before falling back to the top-ranked move.
    AnySafeCell,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the remainder shuffle. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub safety: SafetyMode,
    /// Opponent partial-line length that makes a destination microboard unsafe.
    pub safety_threshold: usize,
    pub disabled_scoring: DisabledScoring,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { seed: None, safety: SafetyMode::TopRanked, safety_threshold: 2, disabled_scoring: DisabledScoring::AsTie }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> std::result::Result<Self, serde_json::Error> { serde_json::from_str(s) }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigIo { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text).map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })
    }
}
