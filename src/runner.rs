//! Scenario orchestration - sequencing session, navigation, assertions,
//! interactions, artifact probes and evidence capture
//!
//! Scenarios run strictly sequentially. Within a scenario the steps execute
//! in declared order; the first failure skips everything that remains except
//! evidence capture and session release. Failures are reported truthfully
//! and never retried.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::artifacts::check_artifacts;
use crate::assertions::{assert_contains, assert_selector_present};
use crate::capture::capture;
use crate::error::{VerifyError, VerifyResult};
use crate::interact::{click, fill};
use crate::nav::{await_ready, goto, ReadyCondition};
use crate::scenario::{Scenario, Step};
use crate::session::{BrowserSession, SessionConfig};

/// Outcome of one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u64,
    /// Unmet expectations, in the order they were detected
    pub failures: Vec<String>,
    /// Evidence screenshot, when a navigated page existed to capture
    pub evidence: Option<PathBuf>,
}

/// Outcome of a sequential run over several scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

/// Configuration for the scenario runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub session: SessionConfig,

    /// Directory for evidence screenshots when the scenario does not name
    /// an explicit path
    pub screenshot_dir: PathBuf,

    /// Directory for the JSON results report
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            screenshot_dir: PathBuf::from("verification"),
            output_dir: PathBuf::from("verification"),
        }
    }
}

/// Sequences one scenario at a time through the browser and the filesystem.
pub struct ScenarioRunner {
    config: RunnerConfig,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run a single scenario to completion or first failure.
    ///
    /// The browser session, when one is acquired, is released on every exit
    /// path. Evidence is captured before release even after a failed
    /// assertion, so the screenshot reflects the failing state; scenarios
    /// that fail before any page exists (artifact-only probes, navigation
    /// errors) produce no screenshot.
    pub async fn run(&self, scenario: &Scenario) -> VerifyResult<ScenarioResult> {
        scenario.validate()?;

        let start = Instant::now();
        debug!("Running scenario: {}", scenario.name);

        if scenario.is_artifact_only() {
            return Ok(self.run_artifact_probe(scenario, start));
        }

        // Browser launch failure is fatal for the scenario: no steps are
        // attempted and there is nothing to capture.
        let session = BrowserSession::acquire(&self.config.session).await?;

        let mut failures = Vec::new();
        let mut navigated = false;

        match self.drive(&session, scenario, &mut navigated).await {
            Ok(()) => {
                // Steps held; probe expected artifacts, reporting the full
                // set of missing paths rather than the first.
                if let Some(spec) = &scenario.artifacts {
                    let missing = check_artifacts(&spec.base_dir, &spec.paths);
                    if !missing.is_empty() {
                        failures.push(VerifyError::MissingArtifacts(missing).to_string());
                    }
                }
            }
            Err(e) => failures.push(e.to_string()),
        }

        let evidence = if navigated {
            let path = self.evidence_path(scenario);
            match capture(&session, &path).await {
                Ok(written) => Some(written),
                Err(e) => {
                    // A capture failure must not mask an already-detected
                    // upstream failure.
                    if failures.is_empty() {
                        failures.push(e.to_string());
                    } else {
                        warn!("Evidence capture failed after earlier failure: {}", e);
                    }
                    None
                }
            }
        } else {
            None
        };

        if let Err(e) = session.release().await {
            warn!("Session release reported: {}", e);
        }

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            passed: failures.is_empty(),
            duration_ms: start.elapsed().as_millis() as u64,
            failures,
            evidence,
        })
    }

    /// Run every scenario in order, never in parallel.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> SuiteResult {
        let start = Instant::now();
        let mut results = Vec::new();
        let mut passed = 0;
        let mut failed = 0;

        info!("Running {} scenario(s)...", scenarios.len());

        for scenario in scenarios {
            match self.run(scenario).await {
                Ok(result) => {
                    if result.passed {
                        passed += 1;
                        info!("✓ {} ({} ms)", result.name, result.duration_ms);
                    } else {
                        failed += 1;
                        for failure in &result.failures {
                            error!("✗ {} - {}", result.name, failure);
                        }
                    }
                    results.push(result);
                }
                Err(e) => {
                    failed += 1;
                    error!("✗ {} - {}", scenario.name, e);
                    results.push(ScenarioResult {
                        name: scenario.name.clone(),
                        passed: false,
                        duration_ms: 0,
                        failures: vec![e.to_string()],
                        evidence: None,
                    });
                }
            }
        }

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scenario results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        SuiteResult {
            total: scenarios.len(),
            passed,
            failed,
            duration_ms,
            results,
        }
    }

    /// Write the suite report as JSON under the configured output directory.
    pub fn write_results(&self, results: &SuiteResult) -> VerifyResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("verify-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }

    fn run_artifact_probe(&self, scenario: &Scenario, start: Instant) -> ScenarioResult {
        // Validated: artifact-only scenarios always carry an artifact spec.
        let spec = scenario.artifacts.as_ref().expect("artifact-only scenario");
        let missing = check_artifacts(&spec.base_dir, &spec.paths);

        let failures = if missing.is_empty() {
            Vec::new()
        } else {
            vec![VerifyError::MissingArtifacts(missing).to_string()]
        };

        ScenarioResult {
            name: scenario.name.clone(),
            passed: failures.is_empty(),
            duration_ms: start.elapsed().as_millis() as u64,
            failures,
            evidence: None,
        }
    }

    async fn drive(
        &self,
        session: &BrowserSession,
        scenario: &Scenario,
        navigated: &mut bool,
    ) -> VerifyResult<()> {
        let target = scenario
            .target
            .as_ref()
            .expect("validated: browser steps require a target");

        goto(session, target).await?;
        *navigated = true;

        for step in &scenario.steps {
            match step {
                Step::WaitFor {
                    selector,
                    text,
                    timeout_ms,
                } => {
                    let condition = match (selector, text) {
                        (Some(sel), _) => ReadyCondition::SelectorAttached(sel.clone()),
                        (None, Some(needle)) => ReadyCondition::TextPresent(needle.clone()),
                        (None, None) => unreachable!("rejected by Scenario::validate"),
                    };
                    await_ready(session, &condition, Duration::from_millis(*timeout_ms)).await?;
                }
                Step::AssertText { text } => assert_contains(session, text).await?,
                Step::AssertSelector { selector } => {
                    assert_selector_present(session, selector).await?
                }
                Step::Click { selector } => click(session, selector).await?,
                Step::Fill { selector, value } => fill(session, selector, value).await?,
            }
        }

        Ok(())
    }

    fn evidence_path(&self, scenario: &Scenario) -> PathBuf {
        scenario.screenshot.clone().unwrap_or_else(|| {
            self.config
                .screenshot_dir
                .join(format!("{}.png", scenario.name))
        })
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn evidence_path_defaults_to_scenario_name() {
        let runner = ScenarioRunner::new();
        let scenario = Scenario::from_yaml(
            r#"
name: smoke
target:
  content: '<p>hi</p>'
steps:
  - action: assert_text
    text: hi
"#,
        )
        .unwrap();

        let path = runner.evidence_path(&scenario);
        assert_eq!(path, PathBuf::from("verification/smoke.png"));
    }

    #[test]
    fn evidence_path_honors_scenario_override() {
        let runner = ScenarioRunner::new();
        let scenario = Scenario::from_yaml(
            r#"
name: smoke
target:
  content: '<p>hi</p>'
screenshot: verification/zenojs_demo.png
steps:
  - action: assert_text
    text: hi
"#,
        )
        .unwrap();

        let path = runner.evidence_path(&scenario);
        assert_eq!(path, PathBuf::from("verification/zenojs_demo.png"));
    }
}
