use chrono::{DateTime, Utc};
use qtty::Degrees;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CelestialObject, ObservationWindow};

/// Urgency of an alert entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    /// Observable at the scan start.
    Now,
    /// Observable later during the current local night.
    Tonight,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Now => "NOW",
            Tier::Tonight => "TONIGHT",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One newly-seen, observable object in the pending alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEntry {
    pub designation: String,
    pub magnitude: f64,
    pub ra: Degrees,
    pub dec: Degrees,
    pub tier: Tier,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub link: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub discovery: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nobs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arc_days: Option<f64>,
    /// Altitude at the cycle time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_now: Option<Degrees>,
    /// Highest altitude over the next 24 h.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_altitude: Option<Degrees>,
}

impl AlertEntry {
    pub fn new(
        object: &CelestialObject,
        tier: Tier,
        window: ObservationWindow,
        link: impl Into<String>,
    ) -> Self {
        Self {
            designation: object.designation.clone(),
            magnitude: object.magnitude,
            ra: object.ra,
            dec: object.dec,
            tier,
            window_start: window.start,
            window_end: window.end,
            link: link.into(),
            score: object.score.clone(),
            discovery: object.discovery.clone(),
            nobs: object.nobs,
            arc_days: object.arc_days,
            altitude_now: None,
            peak_altitude: None,
        }
    }

    pub fn with_altitudes(mut self, now: Degrees, peak: Degrees) -> Self {
        self.altitude_now = Some(now);
        self.peak_altitude = Some(peak);
        self
    }

    pub fn window(&self) -> ObservationWindow {
        ObservationWindow::new(self.window_start, self.window_end)
    }
}

/// The single structured output of a check cycle.
///
/// An empty payload means no alert is emitted and nothing is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<AlertEntry>,
    #[serde(default)]
    pub report: String,
}

impl AlertPayload {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            entries: Vec::new(),
            report: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn designations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.designation.as_str()).collect()
    }

    pub fn count_tier(&self, tier: Tier) -> usize {
        self.entries.iter().filter(|e| e.tier == tier).count()
    }

    /// Put the entries of an undelivered earlier payload in front of this one.
    ///
    /// An earlier entry wins over a fresh one with the same designation. Returns how many
    /// leading entries came from `undelivered`.
    pub fn carry_over(&mut self, undelivered: AlertPayload) -> usize {
        let fresh = std::mem::replace(&mut self.entries, undelivered.entries);
        let carried = self.entries.len();
        for entry in fresh {
            if !self.entries.iter().any(|e| e.designation == entry.designation) {
                self.entries.push(entry);
            }
        }
        carried
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tier_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Tier::Now).unwrap(), "NOW");
        assert_eq!(serde_json::to_value(Tier::Tonight).unwrap(), "TONIGHT");
        let tier: Tier = serde_json::from_str("\"TONIGHT\"").unwrap();
        assert_eq!(tier, Tier::Tonight);
    }

    #[test]
    fn test_entry_copies_object_fields() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 20, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 15, 23, 0, 0).unwrap();
        let mut object =
            CelestialObject::new("C34ABC1", Degrees::new(45.0), Degrees::new(30.0), 19.8)
                .with_score("88");
        object.nobs = Some(5);

        let entry = AlertEntry::new(
            &object,
            Tier::Tonight,
            ObservationWindow::new(start, end),
            "https://example.org/pccp",
        );

        assert_eq!(entry.designation, "C34ABC1");
        assert_eq!(entry.score, "88");
        assert_eq!(entry.nobs, Some(5));
        assert_eq!(entry.window().duration_hours(), 3.0);
    }

    fn entry(designation: &str, tier: Tier) -> AlertEntry {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 22, 0, 0).unwrap();
        let object =
            CelestialObject::new(designation, Degrees::new(92.4), Degrees::new(43.6), 19.0);
        AlertEntry::new(
            &object,
            tier,
            ObservationWindow::new(start, start + chrono::Duration::hours(7)),
            "link",
        )
    }

    #[test]
    fn test_carry_over_keeps_undelivered_entries_first() {
        let earlier = Utc.with_ymd_and_hms(2026, 1, 15, 22, 0, 0).unwrap();
        let mut undelivered = AlertPayload::new(earlier);
        undelivered.entries.push(entry("Y", Tier::Now));

        let mut payload = AlertPayload::new(earlier + chrono::Duration::hours(1));
        payload.entries.push(entry("W", Tier::Tonight));
        payload.entries.push(entry("Y", Tier::Tonight));

        let carried = payload.carry_over(undelivered);

        assert_eq!(carried, 1);
        assert_eq!(payload.designations(), vec!["Y", "W"]);
        assert_eq!(payload.entries[0].tier, Tier::Now);
        assert_eq!(payload.generated_at, earlier + chrono::Duration::hours(1));
    }

    #[test]
    fn test_altitudes_are_optional_in_json() {
        let mut value = serde_json::to_value(entry("Y", Tier::Now)).unwrap();
        assert!(value.get("altitude_now").is_none());
        value.as_object_mut().unwrap().remove("score");
        let decoded: AlertEntry = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.peak_altitude, None);

        let with = entry("Y", Tier::Now).with_altitudes(Degrees::new(62.0), Degrees::new(76.4));
        let value = serde_json::to_value(&with).unwrap();
        assert_eq!(value["altitude_now"], 62.0);
        assert_eq!(value["peak_altitude"], 76.4);
    }

    #[test]
    fn test_payload_counts() {
        let payload = AlertPayload::new(Utc::now());
        assert!(payload.is_empty());
        assert_eq!(payload.count_tier(Tier::Now), 0);
    }
}
