//! Alert assembly.
//!
//! Joins the new objects of a cycle with their visibility scans. Objects with a tier
//! become [`AlertEntry`]s; the rest are kept aside with the reasons they were dropped so
//! that the report and the logs can explain them.

use chrono::{DateTime, Duration, Utc};
use qtty::Degrees;
use std::fmt;
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::models::{AlertEntry, AlertPayload, CelestialObject, ObservationWindow, Tier};
use crate::services::coordinates::{max_altitude, object_altitude};
use crate::services::visibility_computer::{scan_object, ScanParameters, VisibilityScan};

/// Span and step, in minutes, of the peak-altitude estimate shown in reports.
const PEAK_ALTITUDE_SPAN_MINUTES: i64 = 24 * 60;
const PEAK_ALTITUDE_STEP_MINUTES: i64 = 5;

/// Why a new object produced no alert entry.
#[derive(Debug, Clone, PartialEq)]
pub enum NotObservableReason {
    TooFaint { magnitude: f64, limit: f64 },
    NeverHighEnough { peak: Degrees, min_altitude: Degrees },
    /// Visible within the horizon, but only after the current night.
    NoWindowTonight { next: Option<ObservationWindow> },
}

impl fmt::Display for NotObservableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotObservableReason::TooFaint { magnitude, limit } => {
                write!(f, "too faint (mag {:.1} > limit {:.1})", magnitude, limit)
            }
            NotObservableReason::NeverHighEnough { peak, min_altitude } => write!(
                f,
                "never above {:.1}° (24h max {:.1}°)",
                min_altitude.value(),
                peak.value()
            ),
            NotObservableReason::NoWindowTonight { next: Some(window) } => {
                write!(f, "no window tonight (next {})", window.describe())
            }
            NotObservableReason::NoWindowTonight { next: None } => {
                write!(f, "no window in the next 25h")
            }
        }
    }
}

/// Everything the cycle knows about one new object.
#[derive(Debug, Clone)]
pub struct ObjectAssessment<'a> {
    pub object: &'a CelestialObject,
    pub altitude_now: Degrees,
    pub peak_altitude: Degrees,
    pub scan: VisibilityScan,
}

impl<'a> ObjectAssessment<'a> {
    /// Scan `object` from `now` and record its current and 24 h peak altitude.
    pub fn assess(
        object: &'a CelestialObject,
        site: &SiteConfig,
        now: DateTime<Utc>,
        params: &ScanParameters,
        current_night: Option<&ObservationWindow>,
    ) -> Self {
        Self {
            object,
            altitude_now: object_altitude(object, site, now),
            peak_altitude: max_altitude(
                object,
                site,
                now,
                Duration::minutes(PEAK_ALTITUDE_SPAN_MINUTES),
                Duration::minutes(PEAK_ALTITUDE_STEP_MINUTES),
            ),
            scan: scan_object(object, site, now, params, current_night),
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        self.scan.tier
    }

    /// The first window, if it earned a tier and the magnitude is within the limit.
    pub fn qualifying_window(&self, site: &SiteConfig) -> Option<(Tier, ObservationWindow)> {
        if !self.object.is_brighter_than(site.max_mag) {
            return None;
        }
        let tier = self.scan.tier?;
        let window = *self.scan.first_window()?;
        Some((tier, window))
    }

    /// Reasons this object is not alerted on; empty when it qualifies.
    pub fn reasons(&self, site: &SiteConfig) -> Vec<NotObservableReason> {
        if self.qualifying_window(site).is_some() {
            return Vec::new();
        }

        let mut reasons = Vec::new();
        if !self.object.is_brighter_than(site.max_mag) {
            reasons.push(NotObservableReason::TooFaint {
                magnitude: self.object.magnitude,
                limit: site.max_mag,
            });
        }
        if self.peak_altitude < site.min_alt_obj {
            reasons.push(NotObservableReason::NeverHighEnough {
                peak: self.peak_altitude,
                min_altitude: site.min_alt_obj,
            });
        }
        if reasons.is_empty() {
            reasons.push(NotObservableReason::NoWindowTonight {
                next: self.scan.first_window().copied(),
            });
        }
        reasons
    }
}

/// A new object left out of the payload.
#[derive(Debug, Clone)]
pub struct NotObservable<'a> {
    pub object: &'a CelestialObject,
    pub reasons: Vec<NotObservableReason>,
}

/// Output of [`assemble`].
#[derive(Debug, Clone)]
pub struct AssembledAlert<'a> {
    pub payload: AlertPayload,
    pub not_observable: Vec<NotObservable<'a>>,
}

/// Build the alert payload from assessed new objects.
///
/// Entries follow the order of `assessments`. Every entry links to `page_url`.
pub fn assemble<'a>(
    assessments: &[ObjectAssessment<'a>],
    site: &SiteConfig,
    page_url: &str,
    generated_at: DateTime<Utc>,
) -> AssembledAlert<'a> {
    let mut payload = AlertPayload::new(generated_at);
    let mut not_observable = Vec::new();

    for assessment in assessments {
        match assessment.qualifying_window(site) {
            Some((tier, window)) => {
                debug!(
                    designation = %assessment.object.designation,
                    tier = %tier,
                    window = %window.describe(),
                    "New object is observable"
                );
                payload.entries.push(
                    AlertEntry::new(assessment.object, tier, window, page_url)
                        .with_altitudes(assessment.altitude_now, assessment.peak_altitude),
                );
            }
            None => {
                let reasons = assessment.reasons(site);
                info!(
                    designation = %assessment.object.designation,
                    reasons = %reasons
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", "),
                    "New object not observable"
                );
                not_observable.push(NotObservable {
                    object: assessment.object,
                    reasons,
                });
            }
        }
    }

    AssembledAlert {
        payload,
        not_observable,
    }
}
