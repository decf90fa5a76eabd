//! Property tests for the coordinate math.

mod support;

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use qtty::Degrees;

use pccp_watch::services::{altitude, sidereal_time, sun_altitude};

/// One sidereal day, 23h 56m 04.0905s.
const SIDEREAL_DAY_MS: i64 = 86_164_091;

fn instant(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).expect("timestamp in range")
}

fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

proptest! {
    #[test]
    fn prop_sidereal_time_in_range(
        seconds in 946_684_800i64..2_524_608_000,
        longitude in -180.0f64..180.0,
    ) {
        let lst = sidereal_time(instant(seconds), Degrees::new(longitude)).value();
        prop_assert!((0.0..360.0).contains(&lst));
    }

    #[test]
    fn prop_sidereal_time_repeats_each_sidereal_day(
        seconds in 946_684_800i64..2_524_608_000,
        longitude in -180.0f64..180.0,
    ) {
        let t = instant(seconds);
        let a = sidereal_time(t, Degrees::new(longitude)).value();
        let later = t + Duration::milliseconds(SIDEREAL_DAY_MS);
        let b = sidereal_time(later, Degrees::new(longitude)).value();
        prop_assert!(angular_distance(a, b) < 0.01, "{} vs {}", a, b);
    }

    #[test]
    fn prop_altitude_bounded(
        ra in 0.0f64..360.0,
        dec in -90.0f64..90.0,
        lst in 0.0f64..360.0,
        latitude in -90.0f64..90.0,
    ) {
        let alt = altitude(
            Degrees::new(ra),
            Degrees::new(dec),
            Degrees::new(lst),
            Degrees::new(latitude),
        )
        .value();
        prop_assert!((-90.0..=90.0).contains(&alt));
    }

    #[test]
    fn prop_transit_altitude(dec in -89.0f64..89.0, latitude in -89.0f64..89.0) {
        // On the meridian the altitude is 90° minus the zenith distance |lat - dec|.
        let meridian = Degrees::new(100.0);
        let alt = altitude(meridian, Degrees::new(dec), meridian, Degrees::new(latitude)).value();
        prop_assert!((alt - (90.0 - (latitude - dec).abs())).abs() < 1e-6);
    }
}

#[test]
fn test_sun_below_horizon_at_local_midnight() {
    let midnight = support::utc(2026, 1, 15, 23, 30);
    let sun = sun_altitude(
        midnight,
        Degrees::new(support::R85_LONGITUDE),
        Degrees::new(support::R85_LATITUDE),
    );
    assert!(sun.value() < -40.0);
}
