//! Insurance, timing, and routing recommendation blocks.
//!
//! Each block is resolved independently from `decision_summary.<block>`
//! or a top-level `<block>` section. Numeric deltas stay `None` when not
//! supplied so the dashboard can tell "no effect" from "not computed".

use crate::coerce::is_valid_iso_date;
use crate::defaults::{
    DECISION_RATIONALE_DEFAULT, DECISION_RECOMMENDATION_DEFAULT, DECISION_STATUS_DEFAULT,
};
use crate::diagnostics::{Diagnostic, Normalized};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::{
    DateWindow, DecisionCore, Decisions, InsuranceDecision, RoutingDecision, TimingDecision,
};
use crate::resolve::{self, Candidate};
use crate::shipment::display_raw;

const INSURANCE_BLOCK: &[Candidate] = &[
    Candidate::object("decision_summary.insurance", |doc| {
        doc.path(&["decision_summary", "insurance"])
    }),
    Candidate::object("insurance", |doc| doc.get("insurance")),
];

const TIMING_BLOCK: &[Candidate] = &[
    Candidate::object("decision_summary.timing", |doc| {
        doc.path(&["decision_summary", "timing"])
    }),
    Candidate::object("timing", |doc| doc.get("timing")),
];

const ROUTING_BLOCK: &[Candidate] = &[
    Candidate::object("decision_summary.routing", |doc| {
        doc.path(&["decision_summary", "routing"])
    }),
    Candidate::object("routing", |doc| doc.get("routing")),
];

const OPTIMAL_WINDOW: &[Candidate] = &[
    Candidate::object("decision_summary.timing.optimal_window", |doc| {
        doc.path(&["decision_summary", "timing", "optimal_window"])
    }),
    Candidate::object("timing.optimalWindow", |doc| {
        doc.path(&["timing", "optimalWindow"])
    }),
];

const STATUS: &[Candidate] = key_chain!("status");
const RECOMMENDATION: &[Candidate] = key_chain!("recommendation", "action");
const RATIONALE: &[Candidate] = key_chain!("rationale", "reason");

const PREMIUM: &[Candidate] = key_chain!("premium", "premium_cost", "cost");
const EXPECTED_LOSS_REDUCTION: &[Candidate] =
    key_chain!("expected_loss_reduction", "expectedLossReduction", "loss_reduction");
const DELAY_DAYS: &[Candidate] = key_chain!("delay_days", "delayDays", "delay");
const RISK_REDUCTION: &[Candidate] = key_chain!("risk_reduction", "riskReduction", "risk_delta");
const ALTERNATIVE_ROUTE: &[Candidate] =
    key_chain!("alternative_route", "alternativeRoute", "route");
const COST_DELTA: &[Candidate] = key_chain!("cost_delta", "costDelta", "additional_cost");
const TRANSIT_TIME_DELTA: &[Candidate] =
    key_chain!("transit_time_delta", "transitTimeDelta", "transit_delta_days");

pub fn normalize_decisions(root: Doc<'_>) -> Normalized<Decisions> {
    let insurance = resolve::pick(root, INSURANCE_BLOCK);
    let timing = resolve::pick(root, TIMING_BLOCK);
    let routing = resolve::pick(root, ROUTING_BLOCK);

    let window = normalize_window(root);

    let decisions = Decisions {
        insurance: InsuranceDecision {
            core: decision_core(insurance),
            premium: resolve::optional_number(insurance, PREMIUM),
            expected_loss_reduction: resolve::optional_number(insurance, EXPECTED_LOSS_REDUCTION),
        },
        timing: TimingDecision {
            core: decision_core(timing),
            delay_days: resolve::optional_number(timing, DELAY_DAYS),
            risk_reduction: resolve::optional_number(timing, RISK_REDUCTION),
            optimal_window: window.value,
        },
        routing: RoutingDecision {
            core: decision_core(routing),
            alternative_route: Some(resolve::text(routing, ALTERNATIVE_ROUTE, ""))
                .filter(|route| !route.is_empty()),
            cost_delta: resolve::optional_number(routing, COST_DELTA),
            transit_time_delta: resolve::optional_number(routing, TRANSIT_TIME_DELTA),
            risk_reduction: resolve::optional_number(routing, RISK_REDUCTION),
        },
    };

    Normalized::with(decisions, window.diagnostics)
}

fn decision_core(block: Doc<'_>) -> DecisionCore {
    DecisionCore {
        status: resolve::text(block, STATUS, DECISION_STATUS_DEFAULT).to_uppercase(),
        recommendation: resolve::text(block, RECOMMENDATION, DECISION_RECOMMENDATION_DEFAULT),
        rationale: resolve::text(block, RATIONALE, DECISION_RATIONALE_DEFAULT),
    }
}

/// Accepted only when both ends are present and valid; never half-filled.
fn normalize_window(root: Doc<'_>) -> Normalized<Option<DateWindow>> {
    let Some(resolved) = resolve::first(root, OPTIMAL_WINDOW) else {
        return Normalized::clean(None);
    };
    let start = resolved.doc.get("start").value();
    let end = resolved.doc.get("end").value();

    if is_valid_iso_date(start) && is_valid_iso_date(end) {
        let window = start
            .as_str()
            .zip(end.as_str())
            .map(|(start, end)| DateWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        return Normalized::clean(window);
    }

    Normalized::with(
        None,
        vec![Diagnostic::anomaly(format!(
            "Timing optimal window from {} dropped: start={} end={} must both be ISO-8601 dates",
            resolved.label,
            display_raw(start),
            display_raw(end)
        ))],
    )
}
