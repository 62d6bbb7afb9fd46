//! Property-based invariant tests for the result adapter.
//!
//! These tests verify structural invariants that must hold for **any**
//! input, including payloads no engine would ever produce:
//!
//! 1. `adapt` never panics and always serializes every top-level section.
//! 2. Percentage-like outputs stay within [0, 100].
//! 3. Matrix axes are integers within [1, 9].
//! 4. Projections satisfy p10 <= p50 <= p90 after adaptation.
//! 5. Surviving drivers are named, non-placeholder, and 0 < impact <= 100.
//! 6. Non-object inputs yield exactly one warning.
//! 7. Adaptation is deterministic under a fixed clock.
//! 8. `to_number` never returns a non-finite value.

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{Map, Number, Value, json};
use shipment_risk_view::coerce::{clamp, round, to_number, to_percent};
use shipment_risk_view::drivers::PLACEHOLDER_NAMES;
use shipment_risk_view::{Adapter, AdapterConfig, Clock, ViewModel};

// ── Strategies ────────────────────────────────────────────────────────────

fn adapter() -> Adapter {
    Adapter::new(AdapterConfig::default()).with_clock(Clock::Fixed(
        NaiveDate::from_ymd_opt(2026, 6, 1).expect("date"),
    ))
}

/// Numbers in the shapes engines actually emit, plus garbage.
fn numberish() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1.0e6f64..1.0e6).prop_map(|n| Number::from_f64(n).map_or(Value::Null, Value::Number)),
        (0.0f64..=1.0).prop_map(|n| Number::from_f64(n).map_or(Value::Null, Value::Number)),
        (-200i64..200).prop_map(|n| json!(n)),
        (-200i64..200).prop_map(|n| Value::String(n.to_string())),
        "[a-z0-9. -]{0,8}".prop_map(Value::String),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn name() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[A-Za-z ]{0,12}".prop_map(Value::String),
        prop::sample::select(PLACEHOLDER_NAMES).prop_map(|name| json!(format!(" {} ", name.to_uppercase()))),
        Just(Value::Null),
    ]
}

fn driver() -> impl Strategy<Value = Value> {
    (name(), numberish()).prop_map(|(name, impact)| json!({"name": name, "impact": impact}))
}

fn projection() -> impl Strategy<Value = Value> {
    (numberish(), numberish(), numberish(), prop::option::of("[0-9-]{0,10}"))
        .prop_map(|(p10, p50, p90, date)| json!({"p10": p10, "p50": p50, "p90": p90, "date": date}))
}

/// Arbitrary JSON up to a small depth.
fn any_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[ -~]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,10}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Payloads shaped like engine output with every field perturbed.
fn engine_payload() -> impl Strategy<Value = Value> {
    (
        numberish(),
        numberish(),
        prop::collection::vec(driver(), 0..6),
        prop::collection::vec(projection(), 0..4),
        (numberish(), numberish()),
        numberish(),
    )
        .prop_map(|(score, confidence, drivers, projections, (probability, severity), tail)| {
            json!({
                "risk_score": score,
                "confidence": confidence,
                "drivers": drivers,
                "riskScenarioProjections": projections,
                "profile": {"factors": {"a": confidence, "b": score}},
                "risk_matrix": {"probability": probability, "severity": severity},
                "layers": [{"name": "L", "score": score, "contribution": confidence}],
                "loss": {"p95": score, "tailContribution": tail},
                "scenarios": [{"riskReduction": tail}]
            })
        })
}

fn in_percent_range(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

fn assert_view_invariants(view: &ViewModel) -> Result<(), TestCaseError> {
    let score = &view.overview.risk_score;
    prop_assert!(in_percent_range(score.score), "score {}", score.score);
    prop_assert!(in_percent_range(score.confidence), "confidence {}", score.confidence);

    let profile = &view.overview.profile;
    prop_assert!(in_percent_range(profile.score));
    prop_assert!(in_percent_range(profile.confidence));
    for value in profile.factors.values() {
        prop_assert!(in_percent_range(*value), "factor {}", value);
    }
    for axis in [profile.matrix.probability, profile.matrix.severity] {
        prop_assert!((1..=9).contains(&axis), "axis {}", axis);
    }

    for layer in &view.breakdown.layers {
        prop_assert!(in_percent_range(layer.score));
        prop_assert!(in_percent_range(layer.contribution));
    }
    for value in view.breakdown.factors.values() {
        prop_assert!(in_percent_range(*value));
    }

    for projection in &view.timeline.projections {
        prop_assert!(projection.p10 <= projection.p50, "{:?}", projection);
        prop_assert!(projection.p50 <= projection.p90, "{:?}", projection);
        prop_assert!(in_percent_range(projection.p10) && in_percent_range(projection.p90));
    }

    for driver in &view.drivers {
        let folded = driver.name.trim().to_lowercase();
        prop_assert!(!folded.is_empty());
        prop_assert!(!PLACEHOLDER_NAMES.contains(&folded.as_str()), "placeholder {}", driver.name);
        prop_assert!(driver.impact > 0.0 && driver.impact <= 100.0, "impact {}", driver.impact);
    }

    if let Some(loss) = &view.loss {
        prop_assert!(loss.p95 >= 0.0 && loss.p99 >= 0.0 && loss.expected_loss >= 0.0);
        prop_assert!(in_percent_range(loss.tail_contribution));
    }
    for scenario in &view.scenarios {
        prop_assert!(in_percent_range(scenario.risk_reduction));
        prop_assert!(!scenario.id.is_empty());
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
// 1-5. View invariants over engine-shaped payloads
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn engine_shaped_payloads_satisfy_view_invariants(raw in engine_payload()) {
        let adapted = adapter().adapt(&raw);
        assert_view_invariants(&adapted.view)?;
        prop_assert_eq!(adapted.view.meta.warnings.len(), adapted.diagnostics.len());
    }
}

proptest! {
    #[test]
    fn arbitrary_json_never_breaks_the_view(raw in any_json()) {
        let view = adapter().adapt(&raw).view;
        assert_view_invariants(&view)?;
        let encoded = serde_json::to_value(&view).expect("serialize");
        for key in ["overview", "breakdown", "timeline", "loss", "scenarios", "drivers", "decisions", "meta"] {
            prop_assert!(encoded.get(key).is_some(), "missing {}", key);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 6. Non-object inputs yield exactly one warning
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn non_objects_yield_single_warning(raw in any_json().prop_filter("non-object", |v| !v.is_object())) {
        let view = adapter().adapt(&raw).view;
        prop_assert_eq!(view.meta.warnings.len(), 1);
        prop_assert!(view.meta.warnings[0].starts_with("Invalid input"));
    }

    #[test]
    fn arbitrary_text_never_panics(text in "[ -~]{0,64}") {
        let view = adapter().adapt_str(&text).view;
        assert_view_invariants(&view)?;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 7. Determinism
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn adaptation_is_deterministic(raw in engine_payload()) {
        prop_assert_eq!(adapter().adapt(&raw), adapter().adapt(&raw));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// 8. Coercer totality
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn to_number_is_always_finite(raw in numberish(), fallback in -10.0f64..10.0) {
        prop_assert!(to_number(&raw, fallback).is_finite());
    }

    #[test]
    fn to_percent_stays_in_range(raw in any_json()) {
        prop_assert!(in_percent_range(to_percent(&raw)));
    }

    #[test]
    fn clamp_bounds_hold_for_finite_input(n in -1.0e9f64..1.0e9, lo in -100.0f64..0.0, hi in 0.0f64..100.0) {
        let clamped = clamp(n, lo, hi);
        prop_assert!(clamped >= lo && clamped <= hi);
    }

    #[test]
    fn round_is_idempotent(n in -1.0e6f64..1.0e6, decimals in 0u32..4) {
        let once = round(n, decimals);
        prop_assert!((round(once, decimals) - once).abs() < 1e-9);
    }
}
