//! Canonical score, confidence, and level, plus the nested risk profile.

use crate::breakdown::percent_map;
use crate::coerce::{clamp, normalize_risk_level, round, to_number, to_percent, to_string};
use crate::defaults::{MATRIX_AXIS_DEFAULT, MATRIX_QUADRANT_DEFAULT, NO_SOURCE};
use crate::diagnostics::{Diagnostic, Normalized};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::{RiskLevel, RiskMatrix, RiskProfile, RiskScore};
use crate::resolve::{self, Candidate};

pub const RISK_SCORE_CHAIN: &[Candidate] = &[
    Candidate::present("profile.score", |doc| doc.path(&["profile", "score"])),
    Candidate::present("risk_score", |doc| doc.get("risk_score")),
    Candidate::present("overall_risk", |doc| doc.get("overall_risk")),
];

pub const CONFIDENCE_CHAIN: &[Candidate] = &[
    Candidate::present("profile.confidence", |doc| {
        doc.path(&["profile", "confidence"])
    }),
    Candidate::present("confidence", |doc| doc.get("confidence")),
];

pub const LEVEL_CHAIN: &[Candidate] = &[
    Candidate::filled("profile.level", |doc| doc.path(&["profile", "level"])),
    Candidate::filled("risk_level", |doc| doc.get("risk_level")),
];

const REASONING_CHAIN: &[Candidate] = &[
    Candidate::present("reasoning", |doc| doc.get("reasoning")),
    Candidate::present("profile.reasoning", |doc| doc.path(&["profile", "reasoning"])),
    Candidate::present("explanation", |doc| doc.get("explanation")),
];

const MATRIX_CHAIN: &[Candidate] = &[
    Candidate::object("profile.risk_matrix", |doc| {
        doc.path(&["profile", "risk_matrix"])
    }),
    Candidate::object("profile.matrix", |doc| doc.path(&["profile", "matrix"])),
    Candidate::object("risk_matrix", |doc| doc.get("risk_matrix")),
];

const QUADRANT: &[Candidate] = key_chain!("quadrant");
const MATRIX_DESCRIPTION: &[Candidate] = key_chain!("description");

/// The canonical headline score and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalScore {
    pub score: RiskScore,
    pub source: &'static str,
}

pub fn resolve_canonical(root: Doc<'_>) -> Normalized<CanonicalScore> {
    let mut diagnostics = Vec::new();

    let (score, source) = match resolve::first(root, RISK_SCORE_CHAIN) {
        Some(resolved) => (round(to_percent(resolved.doc.value()), 1), resolved.label),
        None => {
            diagnostics.push(Diagnostic::missing(format!(
                "No risk score found (checked {}); defaulting to 0",
                resolve::describe(RISK_SCORE_CHAIN)
            )));
            (0.0, NO_SOURCE)
        }
    };

    let confidence = match resolve::first(root, CONFIDENCE_CHAIN) {
        Some(resolved) => round(to_percent(resolved.doc.value()), 0),
        None => {
            diagnostics.push(Diagnostic::missing(format!(
                "No confidence found (checked {}); defaulting to 0",
                resolve::describe(CONFIDENCE_CHAIN)
            )));
            0.0
        }
    };

    let level = match resolve::first(root, LEVEL_CHAIN) {
        Some(resolved) => normalize_risk_level(resolved.doc.value()),
        None => {
            diagnostics.push(Diagnostic::missing(format!(
                "No risk level found (checked {}); defaulting to Unknown",
                resolve::describe(LEVEL_CHAIN)
            )));
            RiskLevel::Unknown
        }
    };

    Normalized::with(
        CanonicalScore {
            score: RiskScore {
                score,
                level,
                confidence,
            },
            source,
        },
        diagnostics,
    )
}

/// Single explanation string shown beside the score.
#[must_use]
pub fn resolve_reasoning(root: Doc<'_>) -> String {
    resolve::text(root, REASONING_CHAIN, "")
}

/// Build the nested profile. Score, level, and confidence fall back to the
/// canonical values so a partial profile never regresses below them.
pub fn normalize_profile(root: Doc<'_>, canonical: &RiskScore) -> Normalized<RiskProfile> {
    let block = root.get("profile");
    let mut diagnostics = Vec::new();

    let score = if block.get("score").is_present() {
        round(to_percent(block.get("score").value()), 1)
    } else {
        canonical.score
    };
    let confidence = if block.get("confidence").is_present() {
        round(to_percent(block.get("confidence").value()), 0)
    } else {
        canonical.confidence
    };
    let level = if block.get("level").is_present() {
        normalize_risk_level(block.get("level").value())
    } else {
        canonical.level
    };

    let matrix = normalize_matrix(resolve::pick(root, MATRIX_CHAIN), &mut diagnostics);

    let profile = RiskProfile {
        score,
        level,
        confidence,
        explanation: explanation_lines(block.get("explanation")),
        factors: percent_map(block.get("factors")),
        matrix,
    };

    Normalized::with(profile, diagnostics)
}

/// A list of lines, or a single string treated as one line.
fn explanation_lines(doc: Doc<'_>) -> Vec<String> {
    if let Some(line) = doc.as_str() {
        let line = line.trim();
        return if line.is_empty() {
            Vec::new()
        } else {
            vec![line.to_string()]
        };
    }
    doc.items()
        .map(|item| to_string(item.value(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn normalize_matrix(block: Doc<'_>, diagnostics: &mut Vec<Diagnostic>) -> RiskMatrix {
    RiskMatrix {
        probability: matrix_axis(block.get("probability"), "probability", diagnostics),
        severity: matrix_axis(block.get("severity"), "severity", diagnostics),
        quadrant: resolve::text(block, QUADRANT, MATRIX_QUADRANT_DEFAULT),
        description: resolve::text(block, MATRIX_DESCRIPTION, ""),
    }
}

/// Integer in 1..=9; unusable input lands on the middle of the scale.
fn matrix_axis(doc: Doc<'_>, axis: &str, diagnostics: &mut Vec<Diagnostic>) -> u8 {
    let raw = round(to_number(doc.value(), f64::from(MATRIX_AXIS_DEFAULT)), 0);
    let clamped = clamp(raw, 1.0, 9.0);
    if clamped != raw {
        diagnostics.push(Diagnostic::anomaly(format!(
            "Risk matrix {axis} {raw} outside 1-9; clamped to {clamped}"
        )));
    }
    clamped as u8
}
