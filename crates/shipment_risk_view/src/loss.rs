use crate::coerce::{round, to_percent};
use crate::diagnostics::{Diagnostic, Normalized};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::LossMetrics;
use crate::resolve::{self, Candidate};

// Historical engines named the tail metrics differently.
const P95: &[Candidate] = key_chain!("p95", "var95", "var_95", "VaR95");
const P99: &[Candidate] = key_chain!("p99", "var99", "var_99", "VaR99");
const EXPECTED_LOSS: &[Candidate] = key_chain!("expectedLoss", "expected_loss", "mean", "el");
const TAIL_CONTRIBUTION: &[Candidate] = key_chain!("tailContribution", "tail_contribution");

/// `None` when the payload has no truthy `loss` key: "no loss model was
/// computed" is distinct from a zero-valued loss.
pub fn normalize_loss(root: Doc<'_>) -> Normalized<Option<LossMetrics>> {
    let block = root.get("loss");
    if !block.is_truthy() {
        return Normalized::clean(None);
    }

    let mut negative = Vec::new();
    let mut non_negative = |label: &'static str, chain: &[Candidate]| {
        let value = resolve::number(block, chain, 0.0);
        if value < 0.0 {
            negative.push(label);
            0.0
        } else {
            value
        }
    };

    let p95 = non_negative("p95", P95);
    let p99 = non_negative("p99", P99);
    let expected_loss = non_negative("expectedLoss", EXPECTED_LOSS);

    let tail = resolve::pick(block, TAIL_CONTRIBUTION);
    let tail_contribution = if tail.is_present() {
        round(to_percent(tail.value()), 1)
    } else {
        0.0
    };

    let mut diagnostics = Vec::new();
    if !negative.is_empty() {
        diagnostics.push(Diagnostic::anomaly(format!(
            "Negative loss metrics clamped to 0: {}",
            negative.join(", ")
        )));
    }

    Normalized::with(
        Some(LossMetrics {
            p95,
            p99,
            expected_loss,
            tail_contribution,
        }),
        diagnostics,
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::normalize_loss;
    use crate::diagnostics::Category;
    use crate::doc::Doc;

    #[test]
    fn absent_or_falsy_loss_block_means_no_model() {
        for raw in [json!({}), json!({"loss": null}), json!({"loss": false}), json!({"loss": 0})] {
            let result = normalize_loss(Doc::root(&raw));
            assert!(result.value.is_none());
            assert!(result.is_clean());
        }
    }

    #[test]
    fn aliases_resolve_across_engine_generations() {
        let raw = json!({"loss": {"var_95": 12000, "VaR99": "18000.5", "expected_loss": 4000, "tail_contribution": 0.35}});
        let loss = normalize_loss(Doc::root(&raw)).value.expect("loss block");
        assert_eq!(loss.p95, 12_000.0);
        assert_eq!(loss.p99, 18_000.5);
        assert_eq!(loss.expected_loss, 4_000.0);
        assert_eq!(loss.tail_contribution, 35.0);
    }

    #[test]
    fn negative_metrics_are_clamped_with_one_warning() {
        let raw = json!({"loss": {"p95": -5, "p99": 10, "expectedLoss": -1}});
        let result = normalize_loss(Doc::root(&raw));
        let loss = result.value.clone().expect("loss block");
        assert_eq!(loss.p95, 0.0);
        assert_eq!(loss.expected_loss, 0.0);
        assert_eq!(loss.p99, 10.0);
        assert_eq!(loss.tail_contribution, 0.0);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].category, Category::UnitAnomaly);
        assert!(result.diagnostics[0].message.contains("p95, expectedLoss"));
    }

    #[test]
    fn truthy_non_object_loss_yields_zeroed_block() {
        let raw = json!({"loss": true});
        let loss = normalize_loss(Doc::root(&raw)).value.expect("loss block");
        assert_eq!(loss, crate::model::LossMetrics::default());
    }
}
