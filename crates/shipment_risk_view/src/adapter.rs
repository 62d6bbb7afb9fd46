//! Result adapter: raw engine JSON in, canonical [`ViewModel`] out.
//!
//! The adapter never fails. Input that is not a JSON object yields the
//! default view model with a single structural warning; everything else
//! degrades field by field, recording each deviation as a diagnostic.
//!
//! ## Step order
//!
//! | Step | Section |
//! |------|---------|
//! | shape guard | early return for non-objects |
//! | emptiness guard | warn, keep going |
//! | canonical score | score, confidence, level + score provenance |
//! | drivers | list resolution, placeholder filter, contract checks |
//! | shipment | per-field coercion, date validation |
//! | profile | nested profile inheriting canonical values |
//! | breakdown | layers and factor map |
//! | timeline | percentile repair |
//! | loss | optional tail-loss block |
//! | scenarios | identifier synthesis |
//! | decisions | insurance / timing / routing |
//! | meta | warnings, provenance, version, language, timestamp |

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::breakdown::normalize_breakdown;
use crate::config::AdapterConfig;
use crate::decisions::normalize_decisions;
use crate::defaults::build_default_with;
use crate::diagnostics::{Diagnostic, messages};
use crate::doc::Doc;
use crate::drivers::normalize_drivers;
use crate::loss::normalize_loss;
use crate::model::{Meta, Overview, SourceInfo, ViewModel};
use crate::profile::{RISK_SCORE_CHAIN, normalize_profile, resolve_canonical, resolve_reasoning};
use crate::resolve::{self, Candidate};
use crate::scenarios::normalize_scenarios;
use crate::shipment::{normalize_shipment, validated_date};
use crate::timeline::normalize_timeline;

/// Keys that do not count as analysis content for the emptiness guard.
const IGNORED_KEYS: &[&str] = &["timestamp", "engine_version", "language"];

const ENGINE_VERSION: &[Candidate] = &[
    Candidate::present("engine_version", |doc| doc.get("engine_version")),
    Candidate::present("engineVersion", |doc| doc.get("engineVersion")),
];

const LANGUAGE: &[Candidate] = &[
    Candidate::present("language", |doc| doc.get("language")),
    Candidate::present("lang", |doc| doc.get("lang")),
];

/// Source of "today" for projection points without a usable date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    #[must_use]
    pub fn today(self) -> String {
        let date = match self {
            Self::System => Utc::now().date_naive(),
            Self::Fixed(date) => date,
        };
        date.format("%Y-%m-%d").to_string()
    }
}

/// The view model plus the typed diagnostics behind `meta.warnings`.
#[derive(Debug, Clone, PartialEq)]
pub struct Adapted {
    pub view: ViewModel,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct Adapter {
    config: AdapterConfig,
    clock: Clock,
}

impl Adapter {
    #[must_use]
    pub fn new(config: AdapterConfig) -> Self {
        Self {
            config,
            clock: Clock::System,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Parse `text` as JSON and adapt it. Unparseable text is treated as
    /// structurally invalid input, not as an error.
    #[must_use]
    pub fn adapt_str(&self, text: &str) -> Adapted {
        match serde_json::from_str::<Value>(text) {
            Ok(raw) => self.adapt(&raw),
            Err(error) => self.invalid(format!("Invalid input: payload is not valid JSON ({error})")),
        }
    }

    #[must_use]
    pub fn adapt(&self, raw: &Value) -> Adapted {
        if !raw.is_object() {
            return self.invalid(format!(
                "Invalid input: expected a JSON object, got {}",
                kind_of(raw)
            ));
        }

        let root = Doc::root(raw);
        let mut diagnostics = Vec::new();

        if is_empty_payload(root) {
            diagnostics.push(Diagnostic::structural(
                "Empty or invalid data: payload carries no analysis fields",
            ));
        }

        let canonical = resolve_canonical(root).merge_into(&mut diagnostics);
        let drivers = normalize_drivers(root, &self.config).merge_into(&mut diagnostics);
        let shipment = normalize_shipment(root).merge_into(&mut diagnostics);
        let profile = normalize_profile(root, &canonical.score).merge_into(&mut diagnostics);
        let breakdown = normalize_breakdown(root);
        let timeline = normalize_timeline(root, &self.clock.today()).merge_into(&mut diagnostics);
        let loss = normalize_loss(root).merge_into(&mut diagnostics);
        let scenarios = normalize_scenarios(root);
        let decisions = normalize_decisions(root).merge_into(&mut diagnostics);
        let timestamp = validated_date(root.get("timestamp"), "timestamp", &mut diagnostics);

        let view = ViewModel {
            overview: Overview {
                shipment,
                risk_score: canonical.score,
                profile,
                reasoning: resolve_reasoning(root),
            },
            breakdown,
            timeline,
            loss,
            scenarios,
            drivers: drivers.drivers,
            decisions,
            meta: Meta {
                warnings: messages(&diagnostics),
                source: SourceInfo {
                    canonical_risk_score_from: canonical.source.to_string(),
                    canonical_drivers_from: drivers.source.to_string(),
                },
                engine_version: resolve::text(
                    root,
                    ENGINE_VERSION,
                    &self.config.default_engine_version,
                ),
                language: resolve::text(root, LANGUAGE, &self.config.default_language),
                timestamp,
            },
        };

        self.finish(view, diagnostics)
    }

    fn invalid(&self, message: String) -> Adapted {
        let diagnostics = vec![Diagnostic::structural(message)];
        let view = build_default_with(&self.config, messages(&diagnostics));
        self.finish(view, diagnostics)
    }

    fn finish(&self, view: ViewModel, diagnostics: Vec<Diagnostic>) -> Adapted {
        for diagnostic in &diagnostics {
            tracing::warn!(
                target: "shipment_risk_view.adapter",
                category = diagnostic.category.as_str(),
                "{}",
                diagnostic.message
            );
        }
        tracing::debug!(
            target: "shipment_risk_view.adapter",
            warnings = diagnostics.len(),
            score_source = %view.meta.source.canonical_risk_score_from,
            drivers_source = %view.meta.source.canonical_drivers_from,
            score = view.overview.risk_score.score,
            "adapted analysis result"
        );
        Adapted { view, diagnostics }
    }
}

/// Adapt with default configuration and the system clock.
#[must_use]
pub fn adapt(raw: &Value) -> ViewModel {
    Adapter::default().adapt(raw).view
}

/// Adapt JSON text with default configuration and the system clock.
#[must_use]
pub fn adapt_str(text: &str) -> ViewModel {
    Adapter::default().adapt_str(text).view
}

/// No canonical score field and nothing beyond bookkeeping keys.
fn is_empty_payload(root: Doc<'_>) -> bool {
    let has_score = resolve::first(root, RISK_SCORE_CHAIN).is_some();
    let has_content = root
        .as_object()
        .is_some_and(|map| map.keys().any(|key| !IGNORED_KEYS.contains(&key.as_str())));
    !has_score && !has_content
}

fn kind_of(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(text) => format!("a string ({:?})", truncate(text, 40)),
        Value::Array(items) => format!("an array of {} item(s)", items.len()),
        Value::Object(_) => "an object".to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    if truncated.len() < text.len() {
        format!("{truncated}…")
    } else {
        truncated
    }
}
