//! ZenoJS acceptance verification harness
//!
//! This crate drives a real headless Chromium against a built ZenoJS surface
//! (a served page or injected markup) and decides pass/fail from what the
//! browser actually renders, plus what the build/scaffold left on disk:
//! - Launches and tears down an isolated browser session per scenario
//! - Navigates to a URL or injects literal markup when no server exists
//! - Waits on readiness conditions with bounded polling (never a bare sleep)
//! - Asserts on rendered content and simulates user interaction
//! - Probes the filesystem for expected build/scaffold artifacts
//! - Persists a screenshot as evidence of the observed state
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Scenario Runner (orchestrator)              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ScenarioRunner                                             │
//! │    ├── BrowserSession::acquire() / release()                │
//! │    ├── goto(target) + await_ready(condition, timeout)       │
//! │    ├── assert_contains / assert_selector_present            │
//! │    ├── click / fill                                         │
//! │    ├── check_artifacts(base_dir, paths) -> missing          │
//! │    └── capture(session, path) -> evidence PNG               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (YAML)                                            │
//! │    ├── name, description                                    │
//! │    ├── target: { url } | { content }                        │
//! │    ├── steps: [Step]                                        │
//! │    │     ├── wait_for { selector | text, timeout_ms }       │
//! │    │     ├── assert_text { text }                           │
//! │    │     ├── assert_selector { selector }                   │
//! │    │     ├── click { selector }                             │
//! │    │     └── fill { selector, value }                       │
//! │    ├── artifacts: { base_dir, paths } (optional)            │
//! │    └── screenshot: path override (optional)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scenarios run strictly sequentially; the first failure skips the
//! remaining steps but still captures evidence of the failing state (when a
//! navigated page exists) and always releases the browser session.

pub mod artifacts;
pub mod assertions;
pub mod capture;
pub mod error;
pub mod interact;
pub mod nav;
pub mod runner;
pub mod scenario;
pub mod session;

pub use error::{VerifyError, VerifyResult};
pub use runner::{RunnerConfig, ScenarioResult, ScenarioRunner, SuiteResult};
pub use scenario::{Scenario, Step, Target};
pub use session::{BrowserSession, SessionConfig};
