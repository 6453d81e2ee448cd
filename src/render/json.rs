//! JSON renderer: the full allocation result plus aggregate metrics, the
//! shape a downstream provisioning system consumes.

use crate::model::AllocationResult;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct Report<'a> {
    panels: &'a [crate::model::Panel],
    modules: &'a [crate::model::Module],
    cables: &'a [crate::model::Cable],
    sessions: &'a [crate::model::Session],
    metrics: Metrics,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct Metrics {
    sessions_by_media: BTreeMap<String, usize>,
    cables_by_type: BTreeMap<String, usize>,
    modules_by_type: BTreeMap<String, usize>,
}

fn metrics(result: &AllocationResult) -> Metrics {
    let mut sessions_by_media = BTreeMap::new();
    for s in &result.sessions {
        *sessions_by_media.entry(s.media.to_string()).or_insert(0) += 1;
    }
    let mut cables_by_type = BTreeMap::new();
    for c in &result.cables {
        *cables_by_type.entry(c.cable_type.to_string()).or_insert(0) += 1;
    }
    let mut modules_by_type = BTreeMap::new();
    for m in &result.modules {
        *modules_by_type.entry(m.module_type.to_string()).or_insert(0) += 1;
    }
    Metrics {
        sessions_by_media,
        cables_by_type,
        modules_by_type,
    }
}

/// Renders `result` as a pretty-printed JSON document: the result's four
/// lists verbatim, plus a `metrics` breakdown and an always-empty
/// `warnings` list (the allocator has no runtime failure modes to warn
/// about; the field exists for forward compatibility with the validator).
pub fn render_json(result: &AllocationResult) -> String {
    let report = Report {
        panels: &result.panels,
        modules: &result.modules,
        cables: &result.cables,
        sessions: &result.sessions,
        metrics: metrics(result),
        warnings: Vec::new(),
    };
    serde_json::to_string_pretty(&report).expect("Report contains no non-serializable values")
}
