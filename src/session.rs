//! Browser session management - acquiring and releasing headless Chromium

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{VerifyError, VerifyResult};

/// One isolated browser process plus a single active page.
///
/// A session is exclusively owned by the scenario that acquired it. The
/// orchestrator releases it on every exit path; the Drop fallback stops the
/// protocol event loop so a panicked scenario cannot leak the handler task.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// Launch a fresh browser process and open one page.
    pub async fn acquire(config: &SessionConfig) -> VerifyResult<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(config.window_width, config.window_height)
            .no_sandbox();
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(VerifyError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| VerifyError::BrowserLaunch(e.to_string()))?;

        // Drive the CDP event stream until the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(VerifyError::BrowserLaunch(e.to_string()));
            }
        };

        debug!("Browser session acquired");
        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// The active page of this session.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Close the page and the browser process unconditionally.
    pub async fn release(mut self) -> VerifyResult<()> {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close returned an error: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Waiting for browser exit failed: {}", e);
        }
        self.handler_task.abort();
        info!("Browser session released");
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // `release` already aborted this for the normal path; this covers
        // early returns and panics between acquire and release.
        self.handler_task.abort();
    }
}

/// Configuration for launching a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Run without a visible window
    pub headless: bool,

    /// Viewport width in pixels
    pub window_width: u32,

    /// Viewport height in pixels
    pub window_height: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 720,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_is_headless() {
        let config = SessionConfig::default();
        assert!(config.headless);
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 720);
    }
}
