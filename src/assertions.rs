//! Assertions over rendered DOM state
//!
//! Assertions are read-only and repeatable: evaluating one twice without an
//! intervening interaction yields the same result.

use tracing::debug;

use crate::error::{VerifyError, VerifyResult};
use crate::session::BrowserSession;

/// How much of the observed content to carry into a failure message.
const SNIPPET_LEN: usize = 200;

/// Fail unless the serialized DOM contains `text`.
pub async fn assert_contains(session: &BrowserSession, text: &str) -> VerifyResult<()> {
    let content = session.page().content().await?;

    if content.contains(text) {
        debug!("Content contains {:?}", text);
        return Ok(());
    }

    Err(VerifyError::Assertion {
        expected: text.to_string(),
        actual: snippet(&content),
    })
}

/// Fail unless at least one element matches `selector`.
pub async fn assert_selector_present(session: &BrowserSession, selector: &str) -> VerifyResult<()> {
    let expr = format!(
        "document.querySelector({}) !== null",
        serde_json::to_string(selector)?
    );
    let present = session
        .page()
        .evaluate(expr)
        .await?
        .into_value::<bool>()
        .unwrap_or(false);

    if present {
        debug!("Selector {:?} matched", selector);
        return Ok(());
    }

    Err(VerifyError::Assertion {
        expected: format!("element matching {:?}", selector),
        actual: "no match in rendered DOM".to_string(),
    })
}

fn snippet(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return "<empty document>".to_string();
    }
    if trimmed.len() <= SNIPPET_LEN {
        return format!("{:?}", trimmed);
    }
    let cut = trimmed
        .char_indices()
        .take_while(|(i, _)| *i < SNIPPET_LEN)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    format!("{:?}...", &trimmed[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_of_empty_content_is_marked() {
        assert_eq!(snippet("   "), "<empty document>");
    }

    #[test]
    fn snippet_truncates_long_content() {
        let long = "x".repeat(1000);
        let s = snippet(&long);
        assert!(s.ends_with("..."));
        assert!(s.len() < 250);
    }

    #[test]
    fn snippet_respects_multibyte_boundaries() {
        let long = "é".repeat(500);
        let s = snippet(&long);
        assert!(s.ends_with("..."));
    }
}
