//! The allocation engine: orchestrates the MPO, LC, and UTP allocators in
//! the fixed category order spec.md §5 demands, then sorts the combined
//! output into the deterministic order §6 requires.

mod lc;
mod mpo;
mod utp;

use crate::demand;
use crate::model::{AllocationResult, Media, Project};
use crate::natural_order;
use crate::slot::SlotReserver;

/// Runs the full deterministic allocation pipeline over a validated
/// project. Pure function: no I/O, no shared state across calls, no
/// runtime failure modes (invalid input is rejected upstream by the
/// validator).
pub fn allocate_project(project: &Project) -> AllocationResult {
    let normalized = demand::normalize(&project.demands);
    let mut reserver = SlotReserver::new();

    let mut modules = Vec::new();
    let mut cables = Vec::new();
    let mut sessions = Vec::new();

    let (m, c, s) = mpo::allocate(&normalized, &mut reserver);
    modules.extend(m);
    cables.extend(c);
    sessions.extend(s);

    let (m, c, s) = lc::allocate(&normalized, Media::MmfLcDuplex, &mut reserver);
    modules.extend(m);
    cables.extend(c);
    sessions.extend(s);

    let (m, c, s) = lc::allocate(&normalized, Media::SmfLcDuplex, &mut reserver);
    modules.extend(m);
    cables.extend(c);
    sessions.extend(s);

    let (m, c, s) = utp::allocate(&project.racks, &normalized, &mut reserver);
    modules.extend(m);
    cables.extend(c);
    sessions.extend(s);

    let mut panels = reserver.panels();
    panels.sort_by(|a, b| {
        natural_order::compare(&a.rack_id, &b.rack_id).then_with(|| a.u.cmp(&b.u))
    });

    modules.sort_by(|a, b| {
        natural_order::compare(&a.rack_id, &b.rack_id)
            .then_with(|| a.panel_u.cmp(&b.panel_u))
            .then_with(|| a.slot.cmp(&b.slot))
    });
    cables.sort_by(|a, b| a.cable_id.cmp(&b.cable_id));
    sessions.sort_by(|a, b| a.session_id.cmp(&b.session_id));

    AllocationResult {
        panels,
        modules,
        cables,
        sessions,
    }
}
