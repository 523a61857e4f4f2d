//! Declarative YAML scenario specification

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{VerifyError, VerifyResult};

/// One self-contained verification run against a single target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// What to drive the browser to. Omitted for artifact-only scenarios.
    #[serde(default)]
    pub target: Option<Target>,

    /// Steps to execute in order
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Expected build/scaffold output to probe on disk
    #[serde(default)]
    pub artifacts: Option<ArtifactSpec>,

    /// Where to write the evidence screenshot (defaults to
    /// `<screenshot_dir>/<name>.png`)
    #[serde(default)]
    pub screenshot: Option<PathBuf>,
}

/// Navigation target: a served URL, or literal markup injected directly
/// when no build/server pipeline is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Url(String),
    Content(String),
}

/// Expected artifact paths under a base directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub base_dir: PathBuf,
    pub paths: Vec<String>,
}

/// A single step in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Block until a readiness condition holds, bounded by `timeout_ms`
    WaitFor {
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
    },

    /// Assert the serialized DOM contains a substring
    AssertText { text: String },

    /// Assert at least one element matches a selector
    AssertSelector { selector: String },

    /// Click an element
    Click { selector: String },

    /// Fill an input field
    Fill { selector: String, value: String },
}

fn default_wait_timeout() -> u64 {
    5000
}

impl Step {
    /// Whether this step is a falsifiable check on rendered state.
    pub fn is_assertion(&self) -> bool {
        matches!(self, Step::AssertText { .. } | Step::AssertSelector { .. })
    }
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        serde_yaml::from_str(yaml).map_err(VerifyError::from)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> VerifyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all scenarios from a directory
    pub fn load_all(dir: &Path) -> VerifyResult<Vec<Self>> {
        let mut scenarios = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let scenario = Self::from_file(entry.path())?;
            scenarios.push(scenario);
        }

        Ok(scenarios)
    }

    /// True when the scenario probes the filesystem only and never needs a
    /// browser session.
    pub fn is_artifact_only(&self) -> bool {
        self.artifacts.is_some() && self.steps.is_empty() && self.target.is_none()
    }

    /// Reject scenarios that cannot fail. Every scenario must declare at
    /// least one real assertion or an artifact check; a claim of correctness
    /// with nothing falsifiable behind it is a harness misuse, not a pass.
    pub fn validate(&self) -> VerifyResult<()> {
        let has_assertion = self.steps.iter().any(Step::is_assertion);
        if !has_assertion && self.artifacts.is_none() {
            return Err(VerifyError::ScenarioInvalid {
                name: self.name.clone(),
                reason: "declares no assertion step and no artifact check".to_string(),
            });
        }

        if !self.steps.is_empty() && self.target.is_none() {
            return Err(VerifyError::ScenarioInvalid {
                name: self.name.clone(),
                reason: "has browser steps but no navigation target".to_string(),
            });
        }

        for step in &self.steps {
            if let Step::WaitFor { selector, text, .. } = step {
                if selector.is_none() && text.is_none() {
                    return Err(VerifyError::ScenarioInvalid {
                        name: self.name.clone(),
                        reason: "wait_for step names neither a selector nor a text".to_string(),
                    });
                }
            }
        }

        if let Some(artifacts) = &self.artifacts {
            if artifacts.paths.is_empty() {
                return Err(VerifyError::ScenarioInvalid {
                    name: self.name.clone(),
                    reason: "artifact check lists no expected paths".to_string(),
                });
            }
        }

        Ok(())
    }
}
