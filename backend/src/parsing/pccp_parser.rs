use anyhow::{Context, Result};
use qtty::Degrees;
use std::path::Path;
use tracing::debug;

use crate::error::{WatchError, WatchResult};
use crate::models::CelestialObject;

/// Minimum number of whitespace-separated fields of a usable line
const MIN_FIELDS: usize = 8;

/// Parse a PCCP catalog file
pub fn parse_catalog_file(path: &Path) -> Result<Vec<CelestialObject>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
}

/// Parse PCCP catalog text.
///
/// Malformed lines are skipped one by one. A text that yields no record at all is an
/// error, since a cycle must never run against an empty catalog.
pub fn parse_catalog_str(content: &str) -> WatchResult<Vec<CelestialObject>> {
    let mut objects = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(object) => objects.push(object),
            Err(reason) => {
                skipped += 1;
                debug!(line = index + 1, reason = %reason, "Skipping catalog line");
            }
        }
    }

    if objects.is_empty() {
        return Err(WatchError::CatalogParse(format!(
            "no usable record in catalog ({} line(s) skipped)",
            skipped
        )));
    }

    debug!(records = objects.len(), skipped, "Parsed catalog");
    Ok(objects)
}

/// Parse a single catalog line, or `None` if it is malformed
pub fn parse_catalog_line(line: &str) -> Option<CelestialObject> {
    parse_line(line).ok()
}

fn parse_line(line: &str) -> std::result::Result<CelestialObject, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(format!("expected at least {} fields, got {}", MIN_FIELDS, fields.len()));
    }

    let ra_hours = parse_number(fields[5], "RA")?;
    let dec = parse_number(fields[6], "Dec")?;
    let magnitude = parse_number(fields[7], "magnitude")?;

    if !(0.0..24.0).contains(&ra_hours) {
        return Err(format!("RA out of range: {}h", ra_hours));
    }
    if !(-90.0..=90.0).contains(&dec) {
        return Err(format!("Dec out of range: {}°", dec));
    }

    let mut object = CelestialObject::new(
        fields[0],
        Degrees::new(ra_hours * 15.0),
        Degrees::new(dec),
        magnitude,
    )
    .with_score(fields[1]);
    object.discovery = format!("{}-{}-{}", fields[2], fields[3], fields[4]);
    object.updated = extract_updated(line);

    // NObs and Arc are the 4th and 3rd fields from the end; both or neither
    let tail = fields.len();
    let nobs = fields[tail - 4].parse::<u32>();
    let arc = fields[tail - 3].parse::<f64>();
    if let (Ok(nobs), Ok(arc)) = (nobs, arc) {
        object.nobs = Some(nobs);
        object.arc_days = Some(arc);
    }

    Ok(object)
}

fn parse_number(field: &str, name: &str) -> std::result::Result<f64, String> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid {}: '{}'", name, field))
}

/// `Updated Jan. 15.84 UT` clause, normalized to `Jan. 15.84 UT`
fn extract_updated(line: &str) -> Option<String> {
    let start = line.find("Updated")?;
    let clause = &line[start + "Updated".len()..];
    let text = clause.split("UT").next().unwrap_or("").trim();
    if text.is_empty() {
        None
    } else {
        Some(format!("{} UT", text))
    }
}
