use serde_json::Value;

use crate::coerce::is_valid_iso_date;
use crate::diagnostics::{Diagnostic, Normalized};
use crate::doc::Doc;
use crate::key_chain;
use crate::model::Shipment;
use crate::resolve::{self, Candidate};

const SHIPMENT_ID: &[Candidate] = &[
    Candidate::present("shipment.id", |doc| doc.path(&["shipment", "id"])),
    Candidate::present("shipment.shipment_id", |doc| {
        doc.path(&["shipment", "shipment_id"])
    }),
    Candidate::present("shipment_id", |doc| doc.get("shipment_id")),
];

const ROUTE: &[Candidate] = key_chain!("route");
const ORIGIN: &[Candidate] = key_chain!("pol", "origin");
const DESTINATION: &[Candidate] = key_chain!("pod", "destination");
const CARRIER: &[Candidate] = key_chain!("carrier");
const TRANSIT: &[Candidate] = key_chain!("transit_time", "transit_days", "transitTime");
const CONTAINER: &[Candidate] = key_chain!("container", "container_type");
const CARGO: &[Candidate] = key_chain!("cargo", "cargo_type", "commodity");
const INCOTERM: &[Candidate] = key_chain!("incoterm");
const CARGO_VALUE: &[Candidate] = key_chain!("cargo_value", "value");

/// Coerce the `shipment` block field by field. `root` is the whole payload.
pub fn normalize_shipment(root: Doc<'_>) -> Normalized<Shipment> {
    let block = root.get("shipment");
    let mut diagnostics = Vec::new();

    let etd = validated_date(block.get("etd"), "ETD", &mut diagnostics);
    let eta = validated_date(block.get("eta"), "ETA", &mut diagnostics);

    let shipment = Shipment {
        id: resolve::text(root, SHIPMENT_ID, ""),
        route: resolve::text(block, ROUTE, ""),
        origin: resolve::text(block, ORIGIN, ""),
        destination: resolve::text(block, DESTINATION, ""),
        carrier: resolve::text(block, CARRIER, ""),
        etd,
        eta,
        transit_days: resolve::number(block, TRANSIT, 0.0).max(0.0),
        container: resolve::text(block, CONTAINER, ""),
        cargo: resolve::text(block, CARGO, ""),
        incoterm: resolve::text(block, INCOTERM, "").to_uppercase(),
        cargo_value: resolve::number(block, CARGO_VALUE, 0.0).max(0.0),
    };

    Normalized::with(shipment, diagnostics)
}

/// A present date that fails validation is dropped and reported with its
/// raw value; it is never passed through.
pub(crate) fn validated_date(
    doc: Doc<'_>,
    label: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    if !doc.is_present() {
        return None;
    }
    let value = doc.value();
    if is_valid_iso_date(value) {
        return value.as_str().map(str::to_string);
    }
    diagnostics.push(Diagnostic::anomaly(format!(
        "Invalid {label} value {} dropped; expected an ISO-8601 date",
        display_raw(value)
    )));
    None
}

/// Compact JSON rendering of a raw value for warning text.
pub(crate) fn display_raw(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}
