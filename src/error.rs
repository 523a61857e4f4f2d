//! Error types for the verification harness

use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Browser failed to launch: {0}")]
    BrowserLaunch(String),

    #[error("Navigation to {target} failed: {reason}")]
    Navigation { target: String, reason: String },

    #[error("Timed out after {timeout_ms} ms waiting for: {condition}")]
    Timeout { condition: String, timeout_ms: u64 },

    #[error("Assertion failed: expected {expected:?}, observed {actual}")]
    Assertion { expected: String, actual: String },

    #[error("No element matches {selector:?} (action: {action})")]
    ElementNotFound { selector: String, action: String },

    #[error("Element {selector:?} cannot receive {action}: {reason}")]
    ElementNotInteractable {
        selector: String,
        action: String,
        reason: String,
    },

    #[error("Missing expected artifacts: {}", format_paths(.0))]
    MissingArtifacts(BTreeSet<String>),

    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    #[error("Invalid scenario {name:?}: {reason}")]
    ScenarioInvalid { name: String, reason: String },

    #[error("Scenario parse error: {0}")]
    ScenarioParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

fn format_paths(paths: &BTreeSet<String>) -> String {
    paths.iter().cloned().collect::<Vec<_>>().join(", ")
}

pub type VerifyResult<T> = Result<T, VerifyError>;
