use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// One candidate from the confirmation-page catalog.
///
/// `designation` is the stable unique key used by the diff. The remaining metadata is
/// carried verbatim for the report and notifications and never enters any visibility
/// computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub designation: String,
    /// Right ascension in degrees, `[0, 360)`.
    pub ra: Degrees,
    /// Declination in degrees, `[-90, 90]`.
    pub dec: Degrees,
    /// Estimated V magnitude (lower is brighter).
    pub magnitude: f64,
    /// Opaque score field from the catalog (usually a 0-100 percentage).
    pub score: String,
    #[serde(default)]
    pub discovery: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nobs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_days: Option<f64>,
}

impl CelestialObject {
    /// Minimal constructor; catalog metadata left empty.
    pub fn new(designation: impl Into<String>, ra: Degrees, dec: Degrees, magnitude: f64) -> Self {
        Self {
            designation: designation.into(),
            ra,
            dec,
            magnitude,
            score: String::new(),
            discovery: String::new(),
            updated: None,
            nobs: None,
            arc_days: None,
        }
    }

    pub fn with_score(mut self, score: impl Into<String>) -> Self {
        self.score = score.into();
        self
    }

    /// Right ascension expressed in decimal hours.
    pub fn ra_hours(&self) -> f64 {
        self.ra.value() / 15.0
    }

    /// Whether the object is bright enough for a given limiting magnitude.
    pub fn is_brighter_than(&self, limiting_magnitude: f64) -> bool {
        self.magnitude <= limiting_magnitude
    }
}
