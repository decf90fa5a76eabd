//! Discord webhook delivery.
//!
//! One embed per alert entry, colored by tier. Discord accepts at most ten embeds per
//! message, so larger payloads are split; the mention is only sent with the first
//! message.

use serde_json::{json, Value};

use super::Notifier;
use crate::error::{WatchError, WatchResult};
use crate::models::{AlertEntry, AlertPayload, Tier};
use crate::services::report::{format_dec, format_ra};

/// Discord's per-message embed limit
pub const MAX_EMBEDS_PER_MESSAGE: usize = 10;

pub const COLOR_NOW: u32 = 0x00FF00;
pub const COLOR_TONIGHT: u32 = 0xFFAA00;

#[derive(Debug, Clone)]
pub struct DiscordNotifier {
    #[cfg_attr(not(feature = "remote"), allow(dead_code))]
    webhook_url: String,
    mention: String,
    site_name: String,
}

impl DiscordNotifier {
    pub fn new(
        webhook_url: impl Into<String>,
        mention: impl Into<String>,
        site_name: impl Into<String>,
    ) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            mention: mention.into(),
            site_name: site_name.into(),
        }
    }

    fn embed(&self, entry: &AlertEntry, time: &str) -> Value {
        let (color, description) = match entry.tier {
            Tier::Now => (COLOR_NOW, format!("**Observable now** from {}!", self.site_name)),
            Tier::Tonight => (COLOR_TONIGHT, format!("Observable tonight from {}", self.site_name)),
        };
        let observations = match (entry.nobs, entry.arc_days) {
            (Some(nobs), Some(arc)) => format!("{} (arc {} d)", nobs, arc),
            _ => "?".to_string(),
        };
        let altitude = match (entry.altitude_now, entry.peak_altitude) {
            (Some(now), Some(peak)) => {
                format!("{:.1}°  (24h max: {:.1}°)", now.value(), peak.value())
            }
            _ => "?".to_string(),
        };

        json!({
            "title": format!("[{}] {} - possible new comet on the PCCP", entry.tier, entry.designation),
            "description": description,
            "color": color,
            "url": entry.link,
            "fields": [
                { "name": "PCCP score", "value": format!("{}%", entry.score), "inline": true },
                { "name": "Magnitude", "value": format!("{:.1}", entry.magnitude), "inline": true },
                { "name": "Discovery", "value": entry.discovery, "inline": true },
                { "name": "Observations", "value": observations, "inline": true },
                {
                    "name": "RA / Dec",
                    "value": format!("RA {}  |  Dec {}", format_ra(entry.ra), format_dec(entry.dec)),
                    "inline": false
                },
                { "name": "Altitude now", "value": altitude, "inline": false },
                { "name": "Observation window", "value": entry.window().describe(), "inline": false },
            ],
            "footer": { "text": format!("PCCP Watch {} | {}", self.site_name, time) },
        })
    }

    /// Webhook bodies for `payload`, in sending order.
    pub fn messages(&self, payload: &AlertPayload) -> Vec<Value> {
        let time = payload.generated_at.format("%Y-%m-%d %H:%M UTC").to_string();
        let embeds: Vec<Value> = payload
            .entries
            .iter()
            .map(|entry| self.embed(entry, &time))
            .collect();

        embeds
            .chunks(MAX_EMBEDS_PER_MESSAGE)
            .enumerate()
            .map(|(index, chunk)| {
                let mut message = json!({ "embeds": chunk });
                if index == 0 && !self.mention.is_empty() {
                    message["content"] = Value::String(self.mention.clone());
                }
                message
            })
            .collect()
    }

    #[cfg(feature = "remote")]
    fn post(&self, message: &Value) -> WatchResult<()> {
        use reqwest::blocking::Client;
        use reqwest::StatusCode;
        use std::time::Duration;

        let http = Client::builder()
            .user_agent(crate::source::user_agent())
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WatchError::Notification(format!("cannot build HTTP client: {e}")))?;

        let resp = http
            .post(&self.webhook_url)
            .json(message)
            .send()
            .map_err(|e| WatchError::Notification(format!("Discord webhook: {e}")))?;

        match resp.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            status => Err(WatchError::Notification(format!(
                "Discord webhook returned unexpected status {}",
                status
            ))),
        }
    }

    #[cfg(not(feature = "remote"))]
    fn post(&self, _message: &Value) -> WatchResult<()> {
        Err(WatchError::Notification(
            "Discord delivery requires the `remote` feature".to_string(),
        ))
    }
}

impl Notifier for DiscordNotifier {
    fn name(&self) -> &'static str {
        "discord"
    }

    fn notify(&self, payload: &AlertPayload) -> WatchResult<()> {
        for message in self.messages(payload) {
            self.post(&message)?;
        }
        Ok(())
    }
}
