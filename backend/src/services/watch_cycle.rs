//! One complete watch cycle.
//!
//! ```text
//! catalog ─┐
//!          ├─ diff ─ scan ─ assemble ─ report ─┬─ pending alert (if non-empty)
//! state ───┘                                   └─ state ∪ catalog (saved last)
//! ```
//!
//! The known set is committed only after everything else succeeded, so a failed cycle
//! never marks an object as known without having had the chance to alert on it.

use chrono::{DateTime, Utc};
use qtty::Degrees;
use tracing::{info, warn};

use crate::config::WatchConfig;
use crate::db::{PendingAlertStore, StateRepository};
use crate::error::{WatchError, WatchResult};
use crate::models::{AlertPayload, CelestialObject, KnownSet, ObservationWindow, Tier};
use crate::services::alert_assembler::{assemble, NotObservableReason, ObjectAssessment};
use crate::services::astronomical_night::current_night;
use crate::services::catalog_diff::{current_designations, new_objects};
use crate::services::coordinates::sun_altitude;
use crate::services::report::{render_report, render_undelivered, ReportContext};
use crate::services::visibility_computer::ScanParameters;

/// A new object that produced no alert, with the reasons.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedObject {
    pub designation: String,
    pub reasons: Vec<NotObservableReason>,
}

/// Result of [`run_cycle`].
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    /// Alert decision; empty means no notification. Carries the report.
    pub payload: AlertPayload,
    pub new_designations: Vec<String>,
    pub not_observable: Vec<SkippedObject>,
    pub first_run: bool,
    pub catalog_size: usize,
    pub sun_altitude: Degrees,
    pub current_night: Option<ObservationWindow>,
    /// Whether the pending-alert artifact was written.
    pub alert_written: bool,
    /// The known set as committed at the end of the cycle.
    pub known: KnownSet,
}

impl CycleOutcome {
    pub fn report(&self) -> &str {
        &self.payload.report
    }

    pub fn should_notify(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// Run a cycle with the default scan parameters.
pub fn run_cycle<R>(
    config: &WatchConfig,
    catalog: &[CelestialObject],
    repository: &R,
    alerts: Option<&PendingAlertStore>,
    now: DateTime<Utc>,
) -> WatchResult<CycleOutcome>
where
    R: StateRepository + ?Sized,
{
    run_cycle_with_params(config, catalog, repository, alerts, now, &ScanParameters::default())
}

/// Run one cycle against an already parsed catalog.
///
/// # Arguments
/// * `config` - Site and notification configuration; validated before any computation
/// * `catalog` - Records of the freshly fetched catalog
/// * `repository` - Known-set storage, loaded once and saved once
/// * `alerts` - Where to write a non-empty payload; `None` skips the artifact
/// * `now` - Cycle execution time, also the scan start
/// * `params` - Scan horizon and step
///
/// # Errors
/// * `WatchError::Configuration` for an invalid site
/// * `WatchError::CatalogParse` for an empty catalog; state is left untouched
/// * I/O or serialization errors while writing the alert or the state
pub fn run_cycle_with_params<R>(
    config: &WatchConfig,
    catalog: &[CelestialObject],
    repository: &R,
    alerts: Option<&PendingAlertStore>,
    now: DateTime<Utc>,
    params: &ScanParameters,
) -> WatchResult<CycleOutcome>
where
    R: StateRepository + ?Sized,
{
    let site = &config.site;
    site.validate()?;

    if catalog.is_empty() {
        return Err(WatchError::CatalogParse(
            "catalog contains no record; skipping cycle".to_string(),
        ));
    }

    let known = repository.load_or_empty()?;
    let first_run = known.is_first_run();
    if first_run {
        info!(location = %repository.location(), "Empty known set; every catalog object is new");
    }

    let new = new_objects(catalog, &known);
    let night = current_night(site, now, params);
    if night.is_none() {
        warn!("No night within the scan horizon; no object can be observable");
    }

    let assessments: Vec<ObjectAssessment<'_>> = new
        .iter()
        .map(|&object| ObjectAssessment::assess(object, site, now, params, night.as_ref()))
        .collect();

    let assembled = assemble(&assessments, site, &config.catalog_page_url, now);
    let mut payload = assembled.payload;

    let sun_alt = sun_altitude(now, site.longitude, site.latitude);
    let report = render_report(
        &ReportContext {
            generated_at: now,
            site_name: &config.site_name,
            site,
            sun_altitude: sun_alt,
            catalog_size: catalog.len(),
            first_run,
            page_url: &config.catalog_page_url,
        },
        &assessments,
    );
    payload.report = report;

    let alert_written = match alerts {
        Some(store) => {
            if !payload.is_empty() {
                if let Some(undelivered) = undelivered_alert(store)? {
                    let carried = payload.carry_over(undelivered);
                    payload
                        .report
                        .push_str(&render_undelivered(&payload.entries[..carried]));
                    info!(carried, "Undelivered alert merged into the new one");
                }
            }
            store.write(&payload)?
        }
        None => false,
    };

    let merged = known.merged_with(current_designations(catalog), now);
    repository.save(&merged)?;

    info!(
        catalog = catalog.len(),
        new = new.len(),
        now_tier = payload.count_tier(Tier::Now),
        tonight_tier = payload.count_tier(Tier::Tonight),
        known = merged.len(),
        "Cycle complete"
    );

    Ok(CycleOutcome {
        new_designations: new.iter().map(|o| o.designation.clone()).collect(),
        not_observable: assembled
            .not_observable
            .into_iter()
            .map(|skipped| SkippedObject {
                designation: skipped.object.designation.clone(),
                reasons: skipped.reasons,
            })
            .collect(),
        payload,
        first_run,
        catalog_size: catalog.len(),
        sun_altitude: sun_alt,
        current_night: night,
        alert_written,
        known: merged,
    })
}

/// The alert still waiting for delivery, if any. An unreadable one is dropped.
fn undelivered_alert(store: &PendingAlertStore) -> WatchResult<Option<AlertPayload>> {
    match store.read() {
        Err(WatchError::State(reason)) => {
            warn!(reason = %reason, "Pending alert is unreadable and will be replaced");
            Ok(None)
        }
        other => other,
    }
}
