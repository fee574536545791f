//! # Page Renderer
//!
//! Headless rendering for the scrape sources whose landing pages assemble
//! their story lists in JavaScript. One short-lived browser session per
//! call; the throwaway profile and the child process are both released on
//! every exit path (success, non-zero exit, timeout).

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::error::IngestError;

/// Bound on a single headless page load.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Concurrent browser session cap. Each session is heavy (hundreds of MB
/// RSS, several child processes), so refreshes queue here rather than
/// stampede the host.
pub const MAX_CONCURRENT_SESSIONS: usize = 2;

/// News sites serve the full markup to desktop browsers only; the bot UA
/// used for feeds gets a stub page or a block.
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Renders a URL into its post-JavaScript DOM. Implemented by the headless
/// browser in production and by stubs in tests.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<String, IngestError>;
}

/// Shells out to headless Chromium (`$CHROME_BIN`, default `chromium`) with
/// `--dump-dom` and returns the rendered document.
pub struct ChromeRenderer {
    semaphore: Semaphore,
}

impl ChromeRenderer {
    pub fn new() -> Self {
        Self {
            semaphore: Semaphore::new(MAX_CONCURRENT_SESSIONS),
        }
    }
}

impl Default for ChromeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&self, url: &str) -> Result<String, IngestError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| IngestError::fetch(url, format!("invalid url: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(IngestError::fetch(
                url,
                format!("unsupported scheme: {}", parsed.scheme()),
            ));
        }

        let _session = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| IngestError::fetch(url, "render semaphore closed"))?;

        let chrome_bin = std::env::var("CHROME_BIN").unwrap_or_else(|_| "chromium".to_string());
        // Fresh profile per session, deleted when this guard drops.
        let profile = tempfile::tempdir()
            .map_err(|e| IngestError::fetch(url, format!("temp profile dir: {e}")))?;

        debug!(url, bin = %chrome_bin, "rendering page");

        let mut cmd = tokio::process::Command::new(&chrome_bin);
        cmd.args([
            "--headless",
            "--no-sandbox",
            "--disable-gpu",
            "--disable-dev-shm-usage",
            &format!("--user-data-dir={}", profile.path().display()),
            &format!("--user-agent={DESKTOP_USER_AGENT}"),
            "--dump-dom",
            url,
        ])
        .kill_on_drop(true);

        let output = match tokio::time::timeout(RENDER_TIMEOUT, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(IngestError::fetch(
                    url,
                    format!("failed to launch {chrome_bin}: {e}"),
                ))
            }
            Err(_) => {
                return Err(IngestError::fetch(
                    url,
                    format!("render timed out after {}s", RENDER_TIMEOUT.as_secs()),
                ))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(url, %stderr, "headless session exited with error");
            return Err(IngestError::fetch(
                url,
                format!("browser exited with {}", output.status),
            ));
        }
        if output.stdout.is_empty() {
            return Err(IngestError::fetch(url, "empty DOM output"));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
