#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use shipment_risk_view::{Adapter, Clock};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 16 * 1024 {
        return;
    }

    let Some(today) = NaiveDate::from_ymd_opt(2026, 1, 1) else {
        return;
    };
    let adapted = Adapter::default().with_clock(Clock::Fixed(today)).adapt_str(text);
    let view = &adapted.view;

    assert_eq!(view.meta.warnings.len(), adapted.diagnostics.len());

    let score = view.overview.risk_score.score;
    assert!((0.0..=100.0).contains(&score), "score out of range: {score}");

    let matrix = &view.overview.profile.matrix;
    assert!((1..=9).contains(&matrix.probability));
    assert!((1..=9).contains(&matrix.severity));

    for projection in &view.timeline.projections {
        assert!(projection.p10 <= projection.p50 && projection.p50 <= projection.p90);
    }
    for driver in &view.drivers {
        assert!(!driver.name.trim().is_empty());
        assert!(driver.impact > 0.0 && driver.impact <= 100.0);
    }

    // The view must always serialize.
    let encoded = serde_json::to_string(view).expect("view model serializes");
    assert!(encoded.starts_with('{'));
});

