use crate::coerce::{is_valid_iso_date, round, to_percent, to_string};
use crate::diagnostics::{Diagnostic, Normalized};
use crate::doc::Doc;
use crate::model::{Projection, Timeline};
use crate::resolve::{self, Candidate};

const PROJECTIONS_CHAIN: &[Candidate] = &[
    Candidate::list("riskScenarioProjections", |doc| {
        doc.get("riskScenarioProjections")
    }),
    Candidate::list("projections", |doc| doc.get("projections")),
    Candidate::list("timeline.projections", |doc| {
        doc.path(&["timeline", "projections"])
    }),
];

/// Normalize projected percentile bands. `today` replaces missing or
/// invalid dates, since a dateless point cannot be plotted.
pub fn normalize_timeline(root: Doc<'_>, today: &str) -> Normalized<Timeline> {
    let mut diagnostics = Vec::new();

    let projections: Vec<Projection> = resolve::pick(root, PROJECTIONS_CHAIN)
        .items()
        .map(|entry| normalize_projection(entry, today, &mut diagnostics))
        .collect();

    let has_data = !projections.is_empty();
    Normalized::with(
        Timeline {
            projections,
            has_data,
        },
        diagnostics,
    )
}

fn normalize_projection(
    entry: Doc<'_>,
    today: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Projection {
    let percentile = |key: &str| round(to_percent(entry.get(key).value()), 1);
    let (p10, p50, p90) = (percentile("p10"), percentile("p50"), percentile("p90"));

    if p10 > p50 || p50 > p90 {
        let label = entry
            .get("date")
            .as_str()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .unwrap_or("unknown date");
        diagnostics.push(Diagnostic::contract(format!(
            "Projection for {label} had out-of-order percentiles \
             (p10={p10}, p50={p50}, p90={p90}); values were repaired by sorting"
        )));
    }

    let mut band = [p10, p50, p90];
    band.sort_by(f64::total_cmp);

    let date_value = entry.get("date").value();
    let date = if is_valid_iso_date(date_value) {
        to_string(date_value, today)
    } else {
        today.to_string()
    };

    Projection {
        date,
        p10: band[0],
        p50: band[1],
        p90: band[2],
        phase: to_string(entry.get("phase").value(), "").trim().to_string(),
    }
}
