//! Navigation and readiness waiting

use std::fmt;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{VerifyError, VerifyResult};
use crate::scenario::Target;
use crate::session::BrowserSession;

/// Interval between readiness polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Drive the session to its target: request a URL load, or inject literal
/// markup directly when no server is available to serve framework sources.
pub async fn goto(session: &BrowserSession, target: &Target) -> VerifyResult<()> {
    match target {
        Target::Url(url) => {
            debug!("Navigating to {}", url);
            session
                .page()
                .goto(url.as_str())
                .await
                .map_err(|e| VerifyError::Navigation {
                    target: url.clone(),
                    reason: e.to_string(),
                })?;
        }
        Target::Content(html) => {
            debug!("Injecting {} bytes of literal content", html.len());
            session
                .page()
                .set_content(html.as_str())
                .await
                .map_err(|e| VerifyError::Navigation {
                    target: "<literal content>".to_string(),
                    reason: e.to_string(),
                })?;
        }
    }
    Ok(())
}

/// A predicate over page state used to decide when it is safe to assert or
/// interact.
#[derive(Debug, Clone)]
pub enum ReadyCondition {
    /// A CSS selector matches at least one attached element
    SelectorAttached(String),

    /// The serialized DOM contains a substring
    TextPresent(String),
}

impl fmt::Display for ReadyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyCondition::SelectorAttached(selector) => {
                write!(f, "selector {:?} attached", selector)
            }
            ReadyCondition::TextPresent(text) => write!(f, "text {:?} present", text),
        }
    }
}

impl ReadyCondition {
    async fn holds(&self, session: &BrowserSession) -> VerifyResult<bool> {
        match self {
            ReadyCondition::SelectorAttached(selector) => {
                let expr = format!(
                    "document.querySelector({}) !== null",
                    serde_json::to_string(selector)?
                );
                let satisfied = session
                    .page()
                    .evaluate(expr)
                    .await?
                    .into_value::<bool>()
                    .unwrap_or(false);
                Ok(satisfied)
            }
            ReadyCondition::TextPresent(text) => {
                let content = session.page().content().await?;
                Ok(content.contains(text.as_str()))
            }
        }
    }
}

/// Poll `condition` at a short fixed interval until it holds or `timeout`
/// elapses. Rendering and client-side reactivity are asynchronous; this
/// bounded poll replaces the fixed post-interaction delay and is guaranteed
/// to terminate within the budget.
pub async fn await_ready(
    session: &BrowserSession,
    condition: &ReadyCondition,
    timeout: Duration,
) -> VerifyResult<()> {
    let deadline = Instant::now() + timeout;

    loop {
        if condition.holds(session).await? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(VerifyError::Timeout {
                condition: condition.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        sleep(POLL_INTERVAL).await;
    }
}
