//! Scenario packs from JSON.

use std::path::Path;

use anyhow::{Context, Result};

use crate::parameters::ScenarioParameters;

/// Parse a scenario pack. Out-of-range values are reported on the warning
/// channel, malformed JSON is an error.
pub fn load_scenarios_from_str(json: &str) -> Result<ScenarioParameters> {
    let params: ScenarioParameters = serde_json::from_str(json).context("Failed to parse scenario parameters")?;
    if params.classes.is_empty() {
        anyhow::bail!("scenario pack defines no size classes");
    }
    params.validate();
    Ok(params)
}

pub fn load_scenarios_from_path<P: AsRef<Path>>(path: P) -> Result<ScenarioParameters> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    load_scenarios_from_str(&content).with_context(|| format!("Invalid scenario file {}", path.display()))
}
