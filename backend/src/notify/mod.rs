//! Alert delivery.
//!
//! Notifiers consume a non-empty [`AlertPayload`] and nothing else. Each one is enabled
//! from the notification settings of the configuration file.

pub mod discord;
pub mod macos;

pub use discord::DiscordNotifier;
pub use macos::MacosNotifier;

use tracing::{info, warn};

use crate::config::WatchConfig;
use crate::db::PendingAlertStore;
use crate::error::{WatchError, WatchResult};
use crate::models::AlertPayload;

/// A delivery channel for alerts.
pub trait Notifier {
    fn name(&self) -> &'static str;

    fn notify(&self, payload: &AlertPayload) -> WatchResult<()>;
}

/// Notifiers enabled by `config`, macOS first.
pub fn notifiers_from_config(config: &WatchConfig) -> Vec<Box<dyn Notifier>> {
    let settings = &config.notifications;
    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

    if settings.macos_notify {
        notifiers.push(Box::new(MacosNotifier::new(
            config.site_name.clone(),
            settings.macos_sound.clone(),
        )));
    }

    if settings.discord_enabled {
        if settings.discord_webhook_url.trim().is_empty() {
            warn!("discord_enabled is set but discord_webhook_url is empty; Discord disabled");
        } else {
            notifiers.push(Box::new(DiscordNotifier::new(
                settings.discord_webhook_url.trim(),
                settings.discord_mention.clone(),
                config.site_name.clone(),
            )));
        }
    }

    notifiers
}

/// Deliver `payload` through every notifier.
///
/// Every notifier is attempted even after a failure. Returns an error naming the failed
/// channels when at least one of them failed.
pub fn deliver_all(notifiers: &[Box<dyn Notifier>], payload: &AlertPayload) -> WatchResult<()> {
    if payload.is_empty() {
        return Ok(());
    }

    let mut failed = Vec::new();
    for notifier in notifiers {
        match notifier.notify(payload) {
            Ok(()) => info!(notifier = notifier.name(), entries = payload.len(), "Alert delivered"),
            Err(err) => {
                warn!(notifier = notifier.name(), error = %err, "Alert delivery failed");
                failed.push(format!("{}: {}", notifier.name(), err));
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(WatchError::Notification(failed.join("; ")))
    }
}

/// What [`deliver_pending`] did with the pending alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    NothingPending,
    /// No notifier is enabled; the alert stays pending.
    Kept,
    /// Delivered to every notifier and removed; carries the entry count.
    Delivered(usize),
}

/// Deliver the pending alert of `store`, whichever cycle wrote it.
///
/// The alert is removed only when every notifier succeeded, so a failed delivery is
/// retried on the next call.
pub fn deliver_pending(
    store: &PendingAlertStore,
    notifiers: &[Box<dyn Notifier>],
) -> WatchResult<Delivery> {
    let Some(payload) = store.read()? else {
        return Ok(Delivery::NothingPending);
    };
    if notifiers.is_empty() {
        info!("No notifier enabled; pending alert kept");
        return Ok(Delivery::Kept);
    }

    deliver_all(notifiers, &payload)?;
    store.clear()?;
    info!(path = %store.alert_path().display(), "Pending alert delivered and removed");
    Ok(Delivery::Delivered(payload.len()))
}
