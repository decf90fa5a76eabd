//! Night period computation service.
//!
//! Computes the periods, within the scan horizon, during which the Sun is below a given
//! altitude for the configured site. The first such period is the "current local night"
//! used to separate TONIGHT alerts from objects only visible on a later night.

use chrono::{DateTime, Utc};
use qtty::Degrees;

use crate::config::SiteConfig;
use crate::models::ObservationWindow;
use crate::services::coordinates::{sun_altitude, ASTRONOMICAL_TWILIGHT};
use crate::services::visibility_computer::{scan_windows, ScanParameters};

/// Periods with the Sun strictly below `sun_limit`, sampled like an object scan.
pub fn compute_dark_periods(
    site: &SiteConfig,
    start: DateTime<Utc>,
    params: &ScanParameters,
    sun_limit: Degrees,
) -> Vec<ObservationWindow> {
    scan_windows(start, params, |instant| {
        sun_altitude(instant, site.longitude, site.latitude) < sun_limit
    })
}

/// Night periods according to the site's `max_sun_alt`.
pub fn compute_night_periods(
    site: &SiteConfig,
    start: DateTime<Utc>,
    params: &ScanParameters,
) -> Vec<ObservationWindow> {
    compute_dark_periods(site, start, params, site.max_sun_alt)
}

/// Compute astronomical night periods (Sun altitude < -18°) within the horizon.
pub fn compute_astronomical_nights(
    site: &SiteConfig,
    start: DateTime<Utc>,
    params: &ScanParameters,
) -> Vec<ObservationWindow> {
    compute_dark_periods(site, start, params, ASTRONOMICAL_TWILIGHT)
}

/// The night in progress at `start`, or the next one when it is day.
///
/// Returns `None` when the Sun never drops below `max_sun_alt` within the horizon
/// (e.g. high-latitude summer).
pub fn current_night(
    site: &SiteConfig,
    start: DateTime<Utc>,
    params: &ScanParameters,
) -> Option<ObservationWindow> {
    compute_night_periods(site, start, params).into_iter().next()
}
