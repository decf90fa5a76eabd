//! Low-precision time and coordinate math.
//!
//! Sidereal time, horizon altitude of an equatorial position, and an approximate solar
//! position good to about one degree. Every function is a pure mapping from
//! (instant, site, target) to an angle. Inputs and outputs are degrees; radians only
//! appear inside the trigonometry.

use chrono::{DateTime, Duration, Utc};
use qtty::Degrees;

use crate::config::SiteConfig;
use crate::models::{CelestialObject, ModifiedJulianDate};

/// Sun altitude below which the sky is astronomically dark.
pub const ASTRONOMICAL_TWILIGHT: Degrees = Degrees::new(-18.0);

/// Local sidereal time at `longitude` (degrees east), normalized into `[0, 360)`.
///
/// GMST follows the IAU 1982 polynomial in days `d` and Julian centuries `T` since J2000.0:
/// `280.46061837 + 360.98564736629·d + 0.000387933·T² − T³/38710000`.
pub fn sidereal_time(instant: DateTime<Utc>, longitude: Degrees) -> Degrees {
    let mjd = ModifiedJulianDate::from_datetime(instant);
    let d = mjd.days_since_j2000();
    let t = mjd.centuries_since_j2000();

    let gmst = 280.46061837 + 360.98564736629 * d + 0.000387933 * t * t - t * t * t / 38_710_000.0;

    (Degrees::new(gmst) + longitude).wrap_pos()
}

/// Altitude above the horizon of an equatorial position, in `[-90, 90]`.
///
/// # Arguments
///
/// * `ra` - Right ascension
/// * `dec` - Declination
/// * `lst` - Local sidereal time at the site
/// * `latitude` - Site latitude
pub fn altitude(ra: Degrees, dec: Degrees, lst: Degrees, latitude: Degrees) -> Degrees {
    let hour_angle = (lst - ra).wrap_signed();

    let sin_alt = latitude.sin() * dec.sin() + latitude.cos() * dec.cos() * hour_angle.cos();

    Degrees::new(sin_alt.clamp(-1.0, 1.0).asin().to_degrees())
}

/// Approximate apparent equatorial position of the Sun as `(ra, dec)`.
///
/// Mean longitude and mean anomaly are linear in days since J2000.0; the equation of
/// centre keeps the first two terms. Good to roughly 1° over several decades.
pub fn sun_position(instant: DateTime<Utc>) -> (Degrees, Degrees) {
    let n = ModifiedJulianDate::from_datetime(instant).days_since_j2000();

    let mean_longitude = Degrees::new(280.460 + 0.9856474 * n).wrap_pos();
    let mean_anomaly = Degrees::new(357.528 + 0.9856003 * n).wrap_pos();

    let lambda = mean_longitude
        + Degrees::new(1.915 * mean_anomaly.sin() + 0.020 * (mean_anomaly * 2.0).sin());
    let obliquity = Degrees::new(23.439 - 4e-7 * n);

    let ra = (obliquity.cos() * lambda.sin())
        .atan2(lambda.cos())
        .to_degrees();
    let dec = (obliquity.sin() * lambda.sin()).clamp(-1.0, 1.0).asin().to_degrees();

    (Degrees::new(ra).wrap_pos(), Degrees::new(dec))
}

/// Altitude of the Sun seen from the given site.
pub fn sun_altitude(instant: DateTime<Utc>, longitude: Degrees, latitude: Degrees) -> Degrees {
    let (ra, dec) = sun_position(instant);
    altitude(ra, dec, sidereal_time(instant, longitude), latitude)
}

/// Altitude of a catalog object from the configured site.
pub fn object_altitude(
    object: &CelestialObject,
    site: &SiteConfig,
    instant: DateTime<Utc>,
) -> Degrees {
    let lst = sidereal_time(instant, site.longitude);
    altitude(object.ra, object.dec, lst, site.latitude)
}

/// Peak altitude of `object` sampled every `step` over `[start, start + span)`.
pub fn max_altitude(
    object: &CelestialObject,
    site: &SiteConfig,
    start: DateTime<Utc>,
    span: Duration,
    step: Duration,
) -> Degrees {
    let step_secs = step.num_seconds().max(1);
    let samples = (span.num_seconds() / step_secs).max(1);

    (0..samples)
        .map(|i| object_altitude(object, site, start + Duration::seconds(i * step_secs)))
        .fold(Degrees::new(-90.0), |acc, alt| if alt > acc { alt } else { acc })
}

/// Coarse sky state used by the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyCondition {
    /// Sun below -18°.
    AstronomicalNight,
    /// Sun below the configured `max_sun_alt`.
    Night,
    TwilightOrDay,
}

impl SkyCondition {
    pub fn label(&self) -> &'static str {
        match self {
            SkyCondition::AstronomicalNight => "astronomical night",
            SkyCondition::Night => "night",
            SkyCondition::TwilightOrDay => "twilight/day",
        }
    }

    pub fn is_dark(&self) -> bool {
        !matches!(self, SkyCondition::TwilightOrDay)
    }
}

/// Classify a sun altitude against the site threshold.
///
/// Astronomical night wins only when the site threshold also holds, so a site configured
/// with `max_sun_alt < -18` never reports darkness it would not observe in.
pub fn sky_condition(sun_alt: Degrees, max_sun_alt: Degrees) -> SkyCondition {
    if sun_alt >= max_sun_alt {
        SkyCondition::TwilightOrDay
    } else if sun_alt < ASTRONOMICAL_TWILIGHT {
        SkyCondition::AstronomicalNight
    } else {
        SkyCondition::Night
    }
}
