//! Declarative alias chains for canonical fields.
//!
//! Upstream engines renamed fields between versions. Each canonical field
//! lists its accepted sources in priority order as a `const` slice of
//! [`Candidate`]s; [`first`] walks the slice and reports which one won.

use crate::coerce;
use crate::doc::Doc;

/// What a candidate must hold to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accept {
    /// Present and not `null`.
    Present,
    /// Present, and not a blank string.
    Filled,
    /// An array with at least one element.
    NonEmptyList,
    /// Any array, empty or not.
    List,
    /// A JSON object.
    Object,
}

impl Accept {
    fn admits(self, doc: Doc<'_>) -> bool {
        match self {
            Self::Present => doc.is_present(),
            Self::Filled => {
                doc.is_present() && doc.as_str().is_none_or(|text| !text.trim().is_empty())
            }
            Self::NonEmptyList => doc.non_empty_list(),
            Self::List => doc.is_list(),
            Self::Object => doc.as_object().is_some(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Candidate {
    pub label: &'static str,
    pub access: for<'a> fn(Doc<'a>) -> Doc<'a>,
    pub accept: Accept,
}

impl Candidate {
    #[must_use]
    pub const fn present(label: &'static str, access: for<'a> fn(Doc<'a>) -> Doc<'a>) -> Self {
        Self {
            label,
            access,
            accept: Accept::Present,
        }
    }

    #[must_use]
    pub const fn filled(label: &'static str, access: for<'a> fn(Doc<'a>) -> Doc<'a>) -> Self {
        Self {
            label,
            access,
            accept: Accept::Filled,
        }
    }

    #[must_use]
    pub const fn list(label: &'static str, access: for<'a> fn(Doc<'a>) -> Doc<'a>) -> Self {
        Self {
            label,
            access,
            accept: Accept::List,
        }
    }

    #[must_use]
    pub const fn non_empty_list(
        label: &'static str,
        access: for<'a> fn(Doc<'a>) -> Doc<'a>,
    ) -> Self {
        Self {
            label,
            access,
            accept: Accept::NonEmptyList,
        }
    }

    #[must_use]
    pub const fn object(label: &'static str, access: for<'a> fn(Doc<'a>) -> Doc<'a>) -> Self {
        Self {
            label,
            access,
            accept: Accept::Object,
        }
    }
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("label", &self.label)
            .field("accept", &self.accept)
            .finish_non_exhaustive()
    }
}

/// The winning candidate of a chain.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    pub label: &'static str,
    pub doc: Doc<'a>,
}

/// First candidate in `chain` whose target is accepted.
#[must_use]
pub fn first<'a>(doc: Doc<'a>, chain: &[Candidate]) -> Option<Resolved<'a>> {
    chain.iter().find_map(|candidate| {
        let target = (candidate.access)(doc);
        candidate.accept.admits(target).then_some(Resolved {
            label: candidate.label,
            doc: target,
        })
    })
}

/// The winning target, or an absent cursor.
#[must_use]
pub fn pick<'a>(doc: Doc<'a>, chain: &[Candidate]) -> Doc<'a> {
    first(doc, chain).map_or_else(Doc::absent, |resolved| resolved.doc)
}

/// Trimmed text of the winning candidate; blank results become `fallback`.
#[must_use]
pub fn text(doc: Doc<'_>, chain: &[Candidate], fallback: &str) -> String {
    let raw = coerce::to_string(pick(doc, chain).value(), "");
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[must_use]
pub fn number(doc: Doc<'_>, chain: &[Candidate], fallback: f64) -> f64 {
    coerce::to_number(pick(doc, chain).value(), fallback)
}

/// `None` when no candidate holds a usable number.
#[must_use]
pub fn optional_number(doc: Doc<'_>, chain: &[Candidate]) -> Option<f64> {
    coerce::to_optional_number(pick(doc, chain).value())
}

/// Labels of a chain, for "checked a, b, c" messages.
#[must_use]
pub fn describe(chain: &[Candidate]) -> String {
    chain
        .iter()
        .map(|candidate| candidate.label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Alias chain over keys of a single object.
///
/// Expands to a `&'static [Candidate]` of `Accept::Present` entries.
#[macro_export]
macro_rules! key_chain {
    ($($key:literal),+ $(,)?) => {
        &[$($crate::resolve::Candidate::present($key, |doc| doc.get($key))),+]
    };
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Candidate, describe, first, pick};
    use crate::doc::Doc;

    const SCORE: &[Candidate] = &[
        Candidate::present("profile.score", |doc| doc.path(&["profile", "score"])),
        Candidate::present("risk_score", |doc| doc.get("risk_score")),
        Candidate::present("overall_risk", |doc| doc.get("overall_risk")),
    ];

    const LISTS: &[Candidate] = &[
        Candidate::list("drivers", |doc| doc.get("drivers")),
        Candidate::non_empty_list("risk_factors", |doc| doc.get("risk_factors")),
    ];

    #[test]
    fn earlier_candidates_win() {
        let raw = json!({"profile": {"score": 75}, "risk_score": 10});
        let resolved = first(Doc::root(&raw), SCORE).expect("resolved");
        assert_eq!(resolved.label, "profile.score");
        assert_eq!(resolved.doc.value(), &json!(75));
    }

    #[test]
    fn null_candidates_are_skipped() {
        let raw = json!({"profile": {"score": null}, "risk_score": null, "overall_risk": 0.3});
        let resolved = first(Doc::root(&raw), SCORE).expect("resolved");
        assert_eq!(resolved.label, "overall_risk");
    }

    #[test]
    fn list_acceptance_rules_differ() {
        let raw = json!({"drivers": [], "risk_factors": [{"name": "x"}]});
        assert_eq!(first(Doc::root(&raw), LISTS).unwrap().label, "drivers");

        let raw = json!({"drivers": "nope", "risk_factors": []});
        assert!(first(Doc::root(&raw), LISTS).is_none());
        assert!(!pick(Doc::root(&raw), LISTS).is_present());
    }

    #[test]
    fn key_chain_macro_builds_present_candidates() {
        let chain: &[Candidate] = crate::key_chain!("pol", "origin");
        let raw = json!({"origin": "CNSHA"});
        let resolved = first(Doc::root(&raw), chain).unwrap();
        assert_eq!(resolved.label, "origin");
        assert_eq!(describe(chain), "pol, origin");
    }
}
