//! Visibility window computation service.
//!
//! This module turns the instantaneous visibility predicate into observation windows by
//! sampling a fixed horizon at a fixed step. A sample is "visible" when:
//!
//! - the Sun is strictly below `max_sun_alt`
//! - the object altitude is at least `min_alt_obj`
//! - the object magnitude is at most `max_mag`
//!
//! Magnitude does not depend on time, so it gates the whole scan. Consecutive visible
//! samples are merged into maximal [`ObservationWindow`]s whose bounds are the first and
//! last visible samples of each run.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::SiteConfig;
use crate::error::{WatchError, WatchResult};
use crate::models::{CelestialObject, ObservationWindow, Tier};
use crate::services::coordinates::{object_altitude, sun_altitude};

/// Sampling plan for a visibility scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanParameters {
    /// Length of the scanned future.
    horizon: Duration,
    /// Spacing between samples.
    step: Duration,
    /// A first window starting no later than `start + immediate_threshold` is tier NOW.
    immediate_threshold: Duration,
}

impl Default for ScanParameters {
    fn default() -> Self {
        Self {
            horizon: Duration::hours(25),
            step: Duration::minutes(10),
            immediate_threshold: Duration::zero(),
        }
    }
}

impl ScanParameters {
    /// Create scan parameters with a zero immediate threshold.
    ///
    /// # Returns
    /// * `Err(WatchError::Configuration)` if `step` is not positive or `horizon` is negative
    pub fn new(horizon: Duration, step: Duration) -> WatchResult<Self> {
        if step <= Duration::zero() {
            return Err(WatchError::Configuration(format!(
                "scan step must be positive, got {}s",
                step.num_seconds()
            )));
        }
        if horizon < Duration::zero() {
            return Err(WatchError::Configuration(format!(
                "scan horizon must not be negative, got {}s",
                horizon.num_seconds()
            )));
        }
        Ok(Self {
            horizon,
            step,
            immediate_threshold: Duration::zero(),
        })
    }

    pub fn with_immediate_threshold(mut self, threshold: Duration) -> Self {
        self.immediate_threshold = threshold.max(Duration::zero());
        self
    }

    pub fn horizon(&self) -> Duration {
        self.horizon
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn immediate_threshold(&self) -> Duration {
        self.immediate_threshold
    }

    /// Number of sampled instants, including both the start and the horizon boundary.
    pub fn sample_count(&self) -> usize {
        let step_ms = self.step.num_milliseconds().max(1);
        (self.horizon.num_milliseconds().max(0) / step_ms) as usize + 1
    }

    pub fn horizon_end(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        start + self.horizon
    }

    /// Sampled instants `start + i·step` for `i = 0..=N`, clipped to the horizon.
    pub fn sample_instants(&self, start: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
        let step = self.step;
        let end = self.horizon_end(start);
        (0..self.sample_count()).map(move |i| (start + step * i as i32).min(end))
    }
}

/// Reduce a sampled predicate to maximal runs of consecutive `true` samples.
///
/// Each run becomes one window from its first to its last true sample. A run that is
/// still true at the final sample ends at the horizon boundary; a single true sample
/// yields a window with `start == end`. Windows are returned in chronological order.
pub fn scan_windows<F>(
    start: DateTime<Utc>,
    params: &ScanParameters,
    mut predicate: F,
) -> Vec<ObservationWindow>
where
    F: FnMut(DateTime<Utc>) -> bool,
{
    let mut windows = Vec::new();
    let mut run: Option<(DateTime<Utc>, DateTime<Utc>)> = None;

    for instant in params.sample_instants(start) {
        if predicate(instant) {
            run = match run {
                Some((run_start, _)) => Some((run_start, instant)),
                None => Some((instant, instant)),
            };
        } else if let Some((run_start, run_end)) = run.take() {
            windows.push(ObservationWindow::new(run_start, run_end));
        }
    }

    if let Some((run_start, _)) = run {
        windows.push(ObservationWindow::new(run_start, params.horizon_end(start)));
    }

    windows
}

/// Joint visibility predicate at one instant.
pub fn is_observable_at(
    object: &CelestialObject,
    site: &SiteConfig,
    instant: DateTime<Utc>,
) -> bool {
    object.is_brighter_than(site.max_mag)
        && sun_altitude(instant, site.longitude, site.latitude) < site.max_sun_alt
        && object_altitude(object, site, instant) >= site.min_alt_obj
}

/// Compute the observation windows of one object over the scan horizon.
///
/// # Arguments
/// * `object` - Catalog object to scan
/// * `site` - Observing site and thresholds
/// * `start` - Scan start (the cycle execution time)
/// * `params` - Horizon and step
///
/// # Returns
/// Chronological windows; empty when the object is too faint or never visible.
pub fn compute_object_windows(
    object: &CelestialObject,
    site: &SiteConfig,
    start: DateTime<Utc>,
    params: &ScanParameters,
) -> Vec<ObservationWindow> {
    if !object.is_brighter_than(site.max_mag) {
        debug!(
            designation = %object.designation,
            magnitude = object.magnitude,
            max_mag = site.max_mag,
            "Skipping scan: object fainter than limiting magnitude"
        );
        return Vec::new();
    }

    scan_windows(start, params, |instant| {
        sun_altitude(instant, site.longitude, site.latitude) < site.max_sun_alt
            && object_altitude(object, site, instant) >= site.min_alt_obj
    })
}

/// Derive the urgency tier from the first window.
///
/// NOW when the first window starts within the immediate threshold of the scan start;
/// TONIGHT when it overlaps the current local night; otherwise no tier.
pub fn classify_tier(
    windows: &[ObservationWindow],
    start: DateTime<Utc>,
    current_night: Option<&ObservationWindow>,
    params: &ScanParameters,
) -> Option<Tier> {
    let first = windows.first()?;

    if first.start <= start + params.immediate_threshold {
        return Some(Tier::Now);
    }

    match current_night {
        Some(night) if first.overlaps(night) => Some(Tier::Tonight),
        _ => None,
    }
}

/// Scan result for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityScan {
    pub windows: Vec<ObservationWindow>,
    pub tier: Option<Tier>,
}

impl VisibilityScan {
    pub fn first_window(&self) -> Option<&ObservationWindow> {
        self.windows.first()
    }

    pub fn is_observable(&self) -> bool {
        !self.windows.is_empty()
    }
}

/// Scan one object and classify it against the current local night.
pub fn scan_object(
    object: &CelestialObject,
    site: &SiteConfig,
    start: DateTime<Utc>,
    params: &ScanParameters,
    current_night: Option<&ObservationWindow>,
) -> VisibilityScan {
    let windows = compute_object_windows(object, site, start, params);
    let tier = classify_tier(&windows, start, current_night, params);
    VisibilityScan { windows, tier }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use qtty::{Degrees, Meters};

    fn r85() -> SiteConfig {
        SiteConfig {
            longitude: Degrees::new(7.07181),
            latitude: Degrees::new(43.6),
            elevation: Meters::new(50.0),
            min_alt_obj: Degrees::new(20.0),
            max_sun_alt: Degrees::new(-12.0),
            max_mag: 21.0,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_parameters() {
        let params = ScanParameters::default();
        assert_eq!(params.sample_count(), 151);
        let instants: Vec<_> = params.sample_instants(start()).collect();
        assert_eq!(instants.first().copied(), Some(start()));
        assert_eq!(instants.last().copied(), Some(start() + Duration::hours(25)));
    }

    #[test]
    fn test_invalid_step_rejected() {
        assert!(ScanParameters::new(Duration::hours(25), Duration::zero()).is_err());
        assert!(ScanParameters::new(Duration::hours(-1), Duration::minutes(10)).is_err());
    }

    #[test]
    fn test_sample_count_never_wraps() {
        let params = ScanParameters {
            horizon: Duration::hours(-3),
            step: Duration::minutes(10),
            immediate_threshold: Duration::zero(),
        };
        assert_eq!(params.sample_count(), 1);

        let widened = ScanParameters::default().with_immediate_threshold(Duration::minutes(-30));
        assert_eq!(widened.immediate_threshold(), Duration::zero());
        assert_eq!(widened.horizon(), Duration::hours(25));
        assert_eq!(widened.step(), Duration::minutes(10));
    }

    #[test]
    fn test_scan_windows_reduces_runs() {
        let params = ScanParameters::new(Duration::minutes(90), Duration::minutes(10)).unwrap();
        // samples 0..=9; true at 1,2,3 and 6
        let pattern = [false, true, true, true, false, false, true, false, false, false];
        let mut i = 0;
        let windows = scan_windows(start(), &params, |_| {
            let v = pattern[i];
            i += 1;
            v
        });

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, start() + Duration::minutes(10));
        assert_eq!(windows[0].end, start() + Duration::minutes(30));
        assert_eq!(windows[1].start, start() + Duration::minutes(60));
        assert_eq!(windows[1].end, windows[1].start);
    }

    #[test]
    fn test_open_run_extends_to_horizon() {
        let params = ScanParameters::new(Duration::minutes(60), Duration::minutes(10)).unwrap();
        let threshold = start() + Duration::minutes(35);
        let windows = scan_windows(start(), &params, |t| t >= threshold);

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, start() + Duration::minutes(40));
        assert_eq!(windows[0].end, start() + Duration::minutes(60));
    }

    #[test]
    fn test_always_true_spans_full_horizon() {
        let params = ScanParameters::default();
        let windows = scan_windows(start(), &params, |_| true);
        assert_eq!(windows, vec![ObservationWindow::new(start(), start() + Duration::hours(25))]);
    }

    #[test]
    fn test_faint_object_never_sampled() {
        let mut site = r85();
        site.max_sun_alt = Degrees::new(90.0);
        site.min_alt_obj = Degrees::new(-90.0);
        let faint = CelestialObject::new("FAINT", Degrees::new(0.0), Degrees::new(0.0), 21.5);

        let windows = compute_object_windows(&faint, &site, start(), &ScanParameters::default());
        assert!(windows.is_empty());
        assert!(!is_observable_at(&faint, &site, start()));
    }

    #[test]
    fn test_forced_visible_object_single_window() {
        let mut site = r85();
        site.max_sun_alt = Degrees::new(90.1);
        site.min_alt_obj = Degrees::new(-90.0);
        let object = CelestialObject::new("ALWAYS", Degrees::new(120.0), Degrees::new(-40.0), 18.0);

        let windows = compute_object_windows(&object, &site, start(), &ScanParameters::default());

        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].start, start());
        assert_eq!(windows[0].end, start() + Duration::hours(25));
    }

    #[test]
    fn test_classify_tier() {
        let params = ScanParameters::default();
        let night = ObservationWindow::new(
            start() + Duration::hours(6),
            start() + Duration::hours(18),
        );

        let now = [ObservationWindow::new(start(), start() + Duration::hours(1))];
        assert_eq!(classify_tier(&now, start(), Some(&night), &params), Some(Tier::Now));

        let tonight = [ObservationWindow::new(
            start() + Duration::hours(8),
            start() + Duration::hours(9),
        )];
        assert_eq!(
            classify_tier(&tonight, start(), Some(&night), &params),
            Some(Tier::Tonight)
        );

        let tomorrow = [ObservationWindow::new(
            start() + Duration::hours(22),
            start() + Duration::hours(23),
        )];
        assert_eq!(classify_tier(&tomorrow, start(), Some(&night), &params), None);
        assert_eq!(classify_tier(&[], start(), Some(&night), &params), None);
    }

    #[test]
    fn test_immediate_threshold_widens_now() {
        let params = ScanParameters::default().with_immediate_threshold(Duration::minutes(10));
        let windows = [ObservationWindow::new(
            start() + Duration::minutes(10),
            start() + Duration::hours(2),
        )];
        assert_eq!(classify_tier(&windows, start(), None, &params), Some(Tier::Now));
    }
}
