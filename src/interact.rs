//! Synthetic user interaction against the live DOM
//!
//! Interactions mutate page state; DOM updates they trigger may be
//! asynchronous, so callers re-establish readiness (see [`crate::nav`])
//! before asserting on their effects.

use chromiumoxide::element::Element;
use tracing::debug;

use crate::error::{VerifyError, VerifyResult};
use crate::session::BrowserSession;

/// Dispatch a click at the element matching `selector`.
pub async fn click(session: &BrowserSession, selector: &str) -> VerifyResult<()> {
    let element = resolve(session, selector, "click").await?;

    element
        .click()
        .await
        .map_err(|e| VerifyError::ElementNotInteractable {
            selector: selector.to_string(),
            action: "click".to_string(),
            reason: e.to_string(),
        })?;

    debug!("Clicked {:?}", selector);
    Ok(())
}

/// Focus the element matching `selector` and type `value` into it.
pub async fn fill(session: &BrowserSession, selector: &str, value: &str) -> VerifyResult<()> {
    let element = resolve(session, selector, "fill").await?;

    element
        .focus()
        .await
        .map_err(|e| VerifyError::ElementNotInteractable {
            selector: selector.to_string(),
            action: "fill".to_string(),
            reason: e.to_string(),
        })?;

    element
        .type_str(value)
        .await
        .map_err(|e| VerifyError::ElementNotInteractable {
            selector: selector.to_string(),
            action: "fill".to_string(),
            reason: e.to_string(),
        })?;

    debug!("Filled {:?} with {:?}", selector, value);
    Ok(())
}

async fn resolve(
    session: &BrowserSession,
    selector: &str,
    action: &str,
) -> VerifyResult<Element> {
    session
        .page()
        .find_element(selector)
        .await
        .map_err(|_| VerifyError::ElementNotFound {
            selector: selector.to_string(),
            action: action.to_string(),
        })
}
