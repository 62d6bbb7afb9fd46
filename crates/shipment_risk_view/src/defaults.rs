//! The canonical empty view model.

use std::collections::BTreeMap;

use crate::config::AdapterConfig;
use crate::model::{
    Breakdown, DecisionCore, Decisions, InsuranceDecision, Meta, Overview, RiskLevel,
    RiskMatrix, RiskProfile, RiskScore, RoutingDecision, Shipment, SourceInfo, Timeline,
    TimingDecision, ViewModel,
};

pub const NO_SOURCE: &str = "none";
pub const MATRIX_AXIS_DEFAULT: u8 = 5;
pub const MATRIX_QUADRANT_DEFAULT: &str = "Medium-Medium";
pub const DECISION_STATUS_DEFAULT: &str = "UNKNOWN";
pub const DECISION_RECOMMENDATION_DEFAULT: &str = "N/A";
pub const DECISION_RATIONALE_DEFAULT: &str = "No rationale provided";

/// Every number zeroed, every level `Unknown`, every list empty, no loss
/// block, and `warnings` attached verbatim.
#[must_use]
pub fn build_default(warnings: Vec<String>) -> ViewModel {
    build_default_with(&AdapterConfig::default(), warnings)
}

#[must_use]
pub fn build_default_with(config: &AdapterConfig, warnings: Vec<String>) -> ViewModel {
    ViewModel {
        overview: Overview {
            shipment: Shipment::default(),
            risk_score: RiskScore::default(),
            profile: default_profile(),
            reasoning: String::new(),
        },
        breakdown: Breakdown::default(),
        timeline: Timeline::default(),
        loss: None,
        scenarios: Vec::new(),
        drivers: Vec::new(),
        decisions: Decisions {
            insurance: InsuranceDecision {
                core: default_decision_core(),
                premium: None,
                expected_loss_reduction: None,
            },
            timing: TimingDecision {
                core: default_decision_core(),
                delay_days: None,
                risk_reduction: None,
                optimal_window: None,
            },
            routing: RoutingDecision {
                core: default_decision_core(),
                alternative_route: None,
                cost_delta: None,
                transit_time_delta: None,
                risk_reduction: None,
            },
        },
        meta: Meta {
            warnings,
            source: SourceInfo {
                canonical_risk_score_from: NO_SOURCE.to_string(),
                canonical_drivers_from: NO_SOURCE.to_string(),
            },
            engine_version: config.default_engine_version.clone(),
            language: config.default_language.clone(),
            timestamp: None,
        },
    }
}

#[must_use]
pub fn default_profile() -> RiskProfile {
    RiskProfile {
        score: 0.0,
        level: RiskLevel::Unknown,
        confidence: 0.0,
        explanation: Vec::new(),
        factors: BTreeMap::new(),
        matrix: default_matrix(),
    }
}

#[must_use]
pub fn default_matrix() -> RiskMatrix {
    RiskMatrix {
        probability: MATRIX_AXIS_DEFAULT,
        severity: MATRIX_AXIS_DEFAULT,
        quadrant: MATRIX_QUADRANT_DEFAULT.to_string(),
        description: String::new(),
    }
}

#[must_use]
pub fn default_decision_core() -> DecisionCore {
    DecisionCore {
        status: DECISION_STATUS_DEFAULT.to_string(),
        recommendation: DECISION_RECOMMENDATION_DEFAULT.to_string(),
        rationale: DECISION_RATIONALE_DEFAULT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_fully_populated_and_neutral() {
        let model = build_default(vec!["Invalid input".to_string()]);

        assert_eq!(model.meta.warnings, vec!["Invalid input"]);
        assert_eq!(model.overview.risk_score.score, 0.0);
        assert_eq!(model.overview.risk_score.level, RiskLevel::Unknown);
        assert_eq!(model.overview.profile.matrix.probability, 5);
        assert_eq!(model.overview.profile.matrix.quadrant, "Medium-Medium");
        assert!(model.loss.is_none());
        assert!(model.drivers.is_empty());
        assert!(!model.timeline.has_data);
        assert_eq!(model.decisions.timing.core.status, "UNKNOWN");
        assert_eq!(model.decisions.routing.core.recommendation, "N/A");
        assert_eq!(model.decisions.insurance.core.rationale, "No rationale provided");
        assert_eq!(model.meta.source.canonical_risk_score_from, "none");
        assert_eq!(model.meta.engine_version, "v2");
        assert_eq!(model.meta.language, "en");
    }

    #[test]
    fn default_model_serializes_every_top_level_section() {
        let value = serde_json::to_value(build_default(Vec::new())).unwrap();
        for key in [
            "overview",
            "breakdown",
            "timeline",
            "loss",
            "scenarios",
            "drivers",
            "decisions",
            "meta",
        ] {
            assert!(value.get(key).is_some(), "missing section {key}");
        }
        assert!(value["loss"].is_null());
        assert!(value["overview"]["shipment"]["etd"].is_null());
    }

    #[test]
    fn config_defaults_flow_into_meta() {
        let config = AdapterConfig {
            default_language: "fr".to_string(),
            ..AdapterConfig::default()
        };
        assert_eq!(build_default_with(&config, Vec::new()).meta.language, "fr");
    }
}
