use std::collections::BTreeMap;

use crate::coerce::{round, to_percent};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::{Breakdown, Layer};
use crate::resolve::{self, Candidate};

const LAYERS_CHAIN: &[Candidate] = &[
    Candidate::list("layers", |doc| doc.get("layers")),
    Candidate::list("breakdown.layers", |doc| doc.path(&["breakdown", "layers"])),
    Candidate::list("layer_breakdown", |doc| doc.get("layer_breakdown")),
];

const FACTORS_CHAIN: &[Candidate] = &[
    Candidate::object("breakdown.factors", |doc| doc.path(&["breakdown", "factors"])),
    Candidate::object("factor_scores", |doc| doc.get("factor_scores")),
    Candidate::object("profile.factors", |doc| doc.path(&["profile", "factors"])),
];

const LAYER_NAME: &[Candidate] = key_chain!("name", "layer");
const LAYER_SCORE: &[Candidate] = key_chain!("score");
const LAYER_CONTRIBUTION: &[Candidate] = key_chain!("contribution", "weight");

pub const UNKNOWN_LAYER: &str = "Unknown Layer";

#[must_use]
pub fn normalize_breakdown(root: Doc<'_>) -> Breakdown {
    Breakdown {
        layers: resolve::pick(root, LAYERS_CHAIN)
            .items()
            .map(normalize_layer)
            .collect(),
        factors: percent_map(resolve::pick(root, FACTORS_CHAIN)),
    }
}

fn normalize_layer(entry: Doc<'_>) -> Layer {
    Layer {
        name: resolve::text(entry, LAYER_NAME, UNKNOWN_LAYER),
        score: round(to_percent(resolve::pick(entry, LAYER_SCORE).value()), 1),
        contribution: round(
            to_percent(resolve::pick(entry, LAYER_CONTRIBUTION).value()),
            1,
        ),
    }
}

/// Free-form `name -> value` mapping with every value percent-normalized
/// and rounded to a whole number. Blank names are skipped.
#[must_use]
pub fn percent_map(doc: Doc<'_>) -> BTreeMap<String, f64> {
    doc.as_object()
        .into_iter()
        .flatten()
        .filter_map(|(name, value)| {
            let name = name.trim();
            (!name.is_empty()).then(|| (name.to_string(), round(to_percent(value), 0)))
        })
        .collect()
}
