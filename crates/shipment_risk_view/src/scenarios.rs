use crate::coerce::{round, slugify, to_bool, to_percent};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::Scenario;
use crate::resolve::{self, Candidate};

const SCENARIOS_CHAIN: &[Candidate] = &[
    Candidate::list("scenarios", |doc| doc.get("scenarios")),
    Candidate::list("mitigation_scenarios", |doc| doc.get("mitigation_scenarios")),
];

const ID: &[Candidate] = key_chain!("id", "scenario_id");
const TITLE: &[Candidate] = key_chain!("title", "name");
const CATEGORY: &[Candidate] = key_chain!("category", "type");
const RISK_REDUCTION: &[Candidate] = key_chain!("riskReduction", "risk_reduction");
const COST_IMPACT: &[Candidate] = key_chain!("costImpact", "cost_impact");
const IS_RECOMMENDED: &[Candidate] = key_chain!("isRecommended", "is_recommended", "recommended");
const RANK: &[Candidate] = key_chain!("rank");
const DESCRIPTION: &[Candidate] = key_chain!("description", "summary");

pub const UNTITLED: &str = "Untitled scenario";
pub const DEFAULT_CATEGORY: &str = "general";

#[must_use]
pub fn normalize_scenarios(root: Doc<'_>) -> Vec<Scenario> {
    resolve::pick(root, SCENARIOS_CHAIN)
        .items()
        .enumerate()
        .map(|(index, entry)| normalize_scenario(index, entry))
        .collect()
}

fn normalize_scenario(index: usize, entry: Doc<'_>) -> Scenario {
    let title = resolve::text(entry, TITLE, "");
    let default_rank = u32::try_from(index + 1).unwrap_or(u32::MAX);
    let rank = resolve::number(entry, RANK, f64::from(default_rank));

    Scenario {
        id: scenario_id(index, entry, &title),
        title: if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        },
        category: resolve::text(entry, CATEGORY, DEFAULT_CATEGORY),
        risk_reduction: round(to_percent(resolve::pick(entry, RISK_REDUCTION).value()), 1),
        cost_impact: resolve::number(entry, COST_IMPACT, 0.0),
        is_recommended: to_bool(resolve::pick(entry, IS_RECOMMENDED).value(), false),
        rank: if rank >= 1.0 {
            round(rank, 0) as u32
        } else {
            default_rank
        },
        description: resolve::text(entry, DESCRIPTION, ""),
    }
}

/// Supplied id, else a slug of the title, else `scenario-<index>`.
fn scenario_id(index: usize, entry: Doc<'_>, title: &str) -> String {
    let supplied = resolve::text(entry, ID, "");
    if !supplied.is_empty() {
        return supplied;
    }
    let slug = slugify(title);
    if slug.is_empty() {
        format!("scenario-{index}")
    } else {
        slug
    }
}
