//! Evidence capture - persisting a screenshot of current browser state

use std::path::{Path, PathBuf};

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use tracing::info;

use crate::error::{VerifyError, VerifyResult};
use crate::session::BrowserSession;

/// Render the current page to a PNG at `output_path`, creating parent
/// directories as needed. Overwrites any existing file at that path.
pub async fn capture(session: &BrowserSession, output_path: &Path) -> VerifyResult<PathBuf> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| VerifyError::Capture(format!("{}: {}", parent.display(), e)))?;
        }
    }

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .full_page(true)
        .build();

    let bytes = session
        .page()
        .screenshot(params)
        .await
        .map_err(|e| VerifyError::Capture(e.to_string()))?;

    std::fs::write(output_path, &bytes)
        .map_err(|e| VerifyError::Capture(format!("{}: {}", output_path.display(), e)))?;

    info!("Evidence saved to {}", output_path.display());
    Ok(output_path.to_path_buf())
}
