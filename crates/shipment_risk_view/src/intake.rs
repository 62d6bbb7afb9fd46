//! Legacy intake transform.
//!
//! The intake form keeps its own local state and predates the current
//! engine schema. This turns that state into a legacy-shaped payload the
//! adapter accepts through its alias chains. No risk values are computed.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

pub const LEGACY_ENGINE_VERSION: &str = "legacy-intake";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeForm {
    pub shipment_id: String,
    pub origin: String,
    pub destination: String,
    pub carrier: String,
    pub etd: String,
    pub eta: String,
    pub transit_days: Option<f64>,
    pub container_type: String,
    pub cargo_type: String,
    pub incoterm: String,
    pub cargo_value: Option<f64>,
    pub notes: String,
    pub language: String,
}

impl IntakeForm {
    pub fn from_json_str(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Build the engine-shaped payload. Blank form fields are omitted so the
/// adapter applies its own defaults.
#[must_use]
pub fn to_legacy_payload(form: &IntakeForm, now: DateTime<Utc>) -> Value {
    let mut shipment = Map::new();
    let mut put_text = |key: &str, value: &str| {
        let value = value.trim();
        if !value.is_empty() {
            shipment.insert(key.to_string(), Value::String(value.to_string()));
        }
    };

    put_text("id", &form.shipment_id);
    put_text("origin", &form.origin);
    put_text("destination", &form.destination);
    put_text("carrier", &form.carrier);
    put_text("etd", &form.etd);
    put_text("eta", &form.eta);
    put_text("container_type", &form.container_type);
    put_text("cargo_type", &form.cargo_type);
    put_text("incoterm", &form.incoterm);

    let (origin, destination) = (form.origin.trim(), form.destination.trim());
    if !origin.is_empty() && !destination.is_empty() {
        shipment.insert(
            "route".to_string(),
            Value::String(format!("{origin} → {destination}")),
        );
    }
    if let Some(days) = form.transit_days.filter(|days| days.is_finite()) {
        shipment.insert("transit_days".to_string(), json!(days));
    }
    if let Some(value) = form.cargo_value.filter(|value| value.is_finite()) {
        shipment.insert("value".to_string(), json!(value));
    }

    let mut payload = Map::new();
    payload.insert("shipment".to_string(), Value::Object(shipment));
    if !form.notes.trim().is_empty() {
        payload.insert(
            "reasoning".to_string(),
            Value::String(form.notes.trim().to_string()),
        );
    }
    payload.insert(
        "engine_version".to_string(),
        Value::String(LEGACY_ENGINE_VERSION.to_string()),
    );
    if !form.language.trim().is_empty() {
        payload.insert(
            "language".to_string(),
            Value::String(form.language.trim().to_string()),
        );
    }
    payload.insert(
        "timestamp".to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    Value::Object(payload)
}
