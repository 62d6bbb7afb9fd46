//! Risk-driver list resolution, filtering, and contract checks.
//!
//! Upstream promises at most three drivers whose impacts roughly
//! partition 100%. Both promises are checked and reported, never
//! enforced: drivers are not rescaled or truncated here.

use crate::coerce::{clamp, round, to_number};
use crate::config::AdapterConfig;
use crate::defaults::NO_SOURCE;
use crate::diagnostics::{Diagnostic, Normalized};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::Driver;
use crate::resolve::{self, Candidate};

pub const DRIVER_CHAIN: &[Candidate] = &[
    Candidate::list("drivers", |doc| doc.get("drivers")),
    Candidate::non_empty_list("risk_factors", |doc| doc.get("risk_factors")),
    Candidate::non_empty_list("factors", |doc| doc.get("factors")),
];

const DRIVER_NAME: &[Candidate] = key_chain!("name", "factor", "label");
const DRIVER_IMPACT: &[Candidate] = key_chain!("impact", "weight", "contribution");
const DRIVER_DESCRIPTION: &[Candidate] = key_chain!("description", "detail");

/// Names that carry no information, compared case- and
/// whitespace-insensitively.
pub const PLACEHOLDER_NAMES: &[&str] = &["unknown", "other", "misc", "n/a", "none"];

#[derive(Debug, Clone, PartialEq)]
pub struct DriverSet {
    pub drivers: Vec<Driver>,
    pub source: &'static str,
}

pub fn normalize_drivers(root: Doc<'_>, config: &AdapterConfig) -> Normalized<DriverSet> {
    let mut diagnostics = Vec::new();

    let Some(resolved) = resolve::first(root, DRIVER_CHAIN) else {
        diagnostics.push(Diagnostic::missing(format!(
            "No driver list found (checked {}); showing no drivers",
            resolve::describe(DRIVER_CHAIN)
        )));
        return Normalized::with(
            DriverSet {
                drivers: Vec::new(),
                source: NO_SOURCE,
            },
            diagnostics,
        );
    };

    let drivers: Vec<Driver> = resolved.doc.items().filter_map(normalize_driver).collect();

    if drivers.len() > config.max_drivers {
        diagnostics.push(Diagnostic::contract(format!(
            "Top-{} driver contract violated: upstream returned {} drivers",
            config.max_drivers,
            drivers.len()
        )));
    }

    if !drivers.is_empty() {
        let total: f64 = drivers.iter().map(|driver| driver.impact).sum();
        if total < config.impact_sum_min || total > config.impact_sum_max {
            diagnostics.push(Diagnostic::contract(format!(
                "Relative-impact contract violated: driver impacts sum to {}%, expected {}-{}%",
                round(total, 1),
                config.impact_sum_min,
                config.impact_sum_max
            )));
        }
    }

    Normalized::with(
        DriverSet {
            drivers,
            source: resolved.label,
        },
        diagnostics,
    )
}

fn normalize_driver(entry: Doc<'_>) -> Option<Driver> {
    let name = resolve::text(entry, DRIVER_NAME, "");
    if name.is_empty() || is_placeholder(&name) {
        return None;
    }

    let impact = round(clamp(driver_impact(entry), 0.0, 100.0), 1);
    if impact <= 0.0 {
        return None;
    }

    Some(Driver {
        name,
        impact,
        description: resolve::text(entry, DRIVER_DESCRIPTION, ""),
    })
}

/// Impacts in (0, 1] are fractions; anything larger is already percent.
fn driver_impact(entry: Doc<'_>) -> f64 {
    let raw = to_number(resolve::pick(entry, DRIVER_IMPACT).value(), 0.0);
    if raw > 0.0 && raw <= 1.0 {
        raw * 100.0
    } else {
        raw
    }
}

#[must_use]
pub fn is_placeholder(name: &str) -> bool {
    let normalized = name.trim().to_lowercase();
    PLACEHOLDER_NAMES.contains(&normalized.as_str())
}
