//! Notification Center delivery through `osascript`.
//!
//! Off macOS the notifier does nothing. Delivery problems are logged and never fail the
//! notify step, matching how a desktop banner is a best-effort side channel.

use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::Notifier;
use crate::error::WatchResult;
use crate::models::AlertPayload;

const OSASCRIPT_TIMEOUT: Duration = Duration::from_secs(5);
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct MacosNotifier {
    site_name: String,
    sound: String,
}

impl MacosNotifier {
    pub fn new(site_name: impl Into<String>, sound: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            sound: sound.into(),
        }
    }

    /// The AppleScript `display notification` statement for `payload`.
    pub fn script(&self, payload: &AlertPayload) -> String {
        let count = payload.len();
        let plural = if count > 1 { "s" } else { "" };

        let title = format!("New PCCP object{} - {}", plural, self.site_name);
        let subtitle = format!(
            "{} object{} observable from {}",
            count, plural, self.site_name
        );
        let body = payload.designations().join(", ");

        let mut script = format!(
            "display notification \"{}\" with title \"{}\" subtitle \"{}\"",
            escape(&body),
            escape(&title),
            escape(&subtitle)
        );
        if !self.sound.is_empty() {
            script.push_str(&format!(" sound name \"{}\"", escape(&self.sound)));
        }
        script
    }

    fn run_osascript(&self, script: &str) -> std::io::Result<()> {
        let mut child = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let deadline = Instant::now() + OSASCRIPT_TIMEOUT;
        loop {
            if let Some(status) = child.try_wait()? {
                if !status.success() {
                    warn!(status = %status, "osascript exited with failure");
                }
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!("osascript timed out; killing it");
                let _ = child.kill();
                let _ = child.wait();
                return Ok(());
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Escape for an AppleScript string literal.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Notifier for MacosNotifier {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn notify(&self, payload: &AlertPayload) -> WatchResult<()> {
        if !cfg!(target_os = "macos") {
            debug!("Not running on macOS; skipping desktop notification");
            return Ok(());
        }

        if let Err(err) = self.run_osascript(&self.script(payload)) {
            warn!(error = %err, "macOS notification failed");
        }
        Ok(())
    }
}
