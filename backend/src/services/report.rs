//! Plain-text cycle report.
//!
//! The report is printed by the CLI and embedded in the pending-alert artifact, so it is
//! rendered from values only; no I/O happens here.

use chrono::{DateTime, Utc};
use qtty::Degrees;
use std::fmt::Write;

use crate::config::SiteConfig;
use crate::models::{AlertEntry, Tier};
use crate::services::alert_assembler::ObjectAssessment;
use crate::services::coordinates::sky_condition;

const RULE_WIDTH: usize = 50;

/// Right ascension as `HHh MMm SSs` (truncated, not rounded).
pub fn format_ra(ra: Degrees) -> String {
    let hours = ra.wrap_pos().value() / 15.0;
    let h = hours.trunc();
    let m = ((hours - h) * 60.0).trunc();
    let s = ((hours - h) * 3600.0 % 60.0).trunc();
    format!("{:02}h {:02}m {:02}s", h as u32, m as u32, s as u32)
}

/// Declination as `±dd.dd°`.
pub fn format_dec(dec: Degrees) -> String {
    format!("{:+.2}°", dec.value())
}

/// Header values of a cycle report.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub generated_at: DateTime<Utc>,
    pub site_name: &'a str,
    pub site: &'a SiteConfig,
    pub sun_altitude: Degrees,
    pub catalog_size: usize,
    pub first_run: bool,
    pub page_url: &'a str,
}

/// Render the text report for one cycle.
///
/// `assessments` holds the new objects in catalog order. On a first run every catalog
/// object is new and the report lists them compactly with a status marker instead of
/// detailing each one.
pub fn render_report(ctx: &ReportContext<'_>, assessments: &[ObjectAssessment<'_>]) -> String {
    let mut out = String::new();
    let sky = sky_condition(ctx.sun_altitude, ctx.site.max_sun_alt);

    let _ = writeln!(
        out,
        "PCCP Watch {} | {}",
        ctx.site_name,
        ctx.generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "Sun: {:.1}° ({})", ctx.sun_altitude.value(), sky.label());
    let _ = writeln!(
        out,
        "PCCP total: {} object(s) | New: {}",
        ctx.catalog_size,
        assessments.len()
    );
    out.push('\n');

    if ctx.first_run {
        render_initial_listing(&mut out, ctx, assessments);
    } else if assessments.is_empty() {
        out.push_str("No new object since the last check.");
    } else {
        render_new_objects(&mut out, ctx, assessments);
    }

    out
}

fn status_marker(assessment: &ObjectAssessment<'_>, site: &SiteConfig) -> &'static str {
    match assessment.qualifying_window(site) {
        Some((Tier::Now, _)) => "[NOW]",
        Some((Tier::Tonight, _)) => "[TONIGHT]",
        None => "[--]",
    }
}

fn render_initial_listing(
    out: &mut String,
    ctx: &ReportContext<'_>,
    assessments: &[ObjectAssessment<'_>],
) {
    out.push_str("Initial listing (first run):\n");
    for assessment in assessments {
        let object = assessment.object;
        let _ = write!(
            out,
            "  {} {}  mag={:.1}  alt={:.1}°",
            status_marker(assessment, ctx.site),
            object.designation,
            object.magnitude,
            assessment.altitude_now.value()
        );
        if let Some(nobs) = object.nobs {
            let _ = write!(out, "  nobs={}", nobs);
        }
        out.push('\n');
    }
    out.push_str("\nInitial state recorded.");
}

fn render_new_objects(
    out: &mut String,
    ctx: &ReportContext<'_>,
    assessments: &[ObjectAssessment<'_>],
) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{}\nNEW OBJECTS ON THE PCCP\n{}", rule, rule);

    for assessment in assessments {
        let object = assessment.object;
        let observations = match (object.nobs, object.arc_days) {
            (Some(nobs), Some(arc)) => format!("{}  (arc: {} d)", nobs, arc),
            (Some(nobs), None) => nobs.to_string(),
            _ => "?".to_string(),
        };

        let _ = writeln!(out, "\n* Designation  : {}", object.designation);
        let _ = writeln!(out, "  Score        : {}%", object.score);
        let _ = writeln!(out, "  Discovery    : {}", object.discovery);
        if let Some(updated) = &object.updated {
            let _ = writeln!(out, "  Updated      : {}", updated);
        }
        let _ = writeln!(
            out,
            "  Position     : RA {}  Dec {}",
            format_ra(object.ra),
            format_dec(object.dec)
        );
        let _ = writeln!(out, "  Magnitude    : {:.1}", object.magnitude);
        let _ = writeln!(out, "  Observations : {}", observations);
        let _ = writeln!(
            out,
            "  Altitude now : {:.1}°  (24h max: {:.1}°)",
            assessment.altitude_now.value(),
            assessment.peak_altitude.value()
        );

        match assessment.qualifying_window(ctx.site) {
            Some((Tier::Now, window)) => {
                let _ = writeln!(
                    out,
                    "  [NOW] Observable now from {} until {}",
                    ctx.site_name,
                    window.end.format("%H:%M UTC")
                );
            }
            Some((Tier::Tonight, window)) => {
                let _ = writeln!(out, "  [TONIGHT] Observable tonight: {}", window.describe());
            }
            None => {
                let reasons = assessment
                    .reasons(ctx.site)
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "  [--] Not observable: {}", reasons);
            }
        }
    }

    let _ = write!(out, "\nLink: {}", ctx.page_url);
}

/// Section appended to a report when earlier, undelivered entries are carried over.
pub fn render_undelivered(entries: &[AlertEntry]) -> String {
    let mut out = String::from("\n\nStill pending from an earlier check:");
    for entry in entries {
        let _ = write!(
            out,
            "\n  [{}] {}  {}",
            entry.tier,
            entry.designation,
            entry.window().describe()
        );
    }
    out
}
