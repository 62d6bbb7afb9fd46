//! Canonical view model consumed by the dashboard.
//!
//! Every field is populated after adaptation. Optional fields are `None`
//! only where absence carries meaning (no loss model computed, no valid
//! date, a delta that was never computed) and serialize as `null`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    Unknown,
}

impl RiskLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub overview: Overview,
    pub breakdown: Breakdown,
    pub timeline: Timeline,
    pub loss: Option<LossMetrics>,
    pub scenarios: Vec<Scenario>,
    pub drivers: Vec<Driver>,
    pub decisions: Decisions,
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub shipment: Shipment,
    pub risk_score: RiskScore,
    pub profile: RiskProfile,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub id: String,
    pub route: String,
    /// Port of loading.
    pub origin: String,
    /// Port of discharge.
    pub destination: String,
    pub carrier: String,
    pub etd: Option<String>,
    pub eta: Option<String>,
    pub transit_days: f64,
    pub container: String,
    pub cargo: String,
    pub incoterm: String,
    pub cargo_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    /// 0–100, one decimal.
    pub score: f64,
    pub level: RiskLevel,
    /// 0–100, whole percent.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub score: f64,
    pub level: RiskLevel,
    pub confidence: f64,
    pub explanation: Vec<String>,
    pub factors: BTreeMap<String, f64>,
    pub matrix: RiskMatrix,
}

/// Probability × severity placement, both axes integers in 1..=9.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMatrix {
    pub probability: u8,
    pub severity: u8,
    pub quadrant: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub layers: Vec<Layer>,
    pub factors: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub name: String,
    pub score: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub projections: Vec<Projection>,
    pub has_data: bool,
}

/// One projected point; `p10 <= p50 <= p90` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub date: String,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
    pub phase: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LossMetrics {
    pub p95: f64,
    pub p99: f64,
    pub expected_loss: f64,
    pub tail_contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub category: String,
    pub risk_reduction: f64,
    pub cost_impact: f64,
    pub is_recommended: bool,
    pub rank: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub name: String,
    /// In (0, 100], one decimal.
    pub impact: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decisions {
    pub insurance: InsuranceDecision,
    pub timing: TimingDecision,
    pub routing: RoutingDecision,
}

/// Fields shared by every recommendation block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionCore {
    pub status: String,
    pub recommendation: String,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceDecision {
    #[serde(flatten)]
    pub core: DecisionCore,
    pub premium: Option<f64>,
    pub expected_loss_reduction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingDecision {
    #[serde(flatten)]
    pub core: DecisionCore,
    pub delay_days: Option<f64>,
    pub risk_reduction: Option<f64>,
    pub optimal_window: Option<DateWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    #[serde(flatten)]
    pub core: DecisionCore,
    pub alternative_route: Option<String>,
    pub cost_delta: Option<f64>,
    pub transit_time_delta: Option<f64>,
    pub risk_reduction: Option<f64>,
}

/// Both ends are validated ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub warnings: Vec<String>,
    pub source: SourceInfo,
    pub engine_version: String,
    pub language: String,
    pub timestamp: Option<String>,
}

/// Which upstream field supplied each canonical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub canonical_risk_score_from: String,
    pub canonical_drivers_from: String,
}
