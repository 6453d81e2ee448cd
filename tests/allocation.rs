//! End-to-end allocation scenarios and the quantified invariants they
//! exercise, built directly against the validated model rather than the
//! CLI or JSON boundary.

use patchplan::model::{Demand, Media, Project, Rack};
use patchplan::allocate_project;

fn racks(ids: &[&str]) -> Vec<Rack> {
    ids.iter().map(|id| Rack { id: id.to_string() }).collect()
}

fn demand(src: &str, dst: &str, media: Media, count: u32) -> Demand {
    Demand {
        src: src.into(),
        dst: dst.into(),
        media,
        count,
    }
}

/// S1: MMF LC breakout demand of 13 sessions between two racks needs two
/// module pairs (ceil(13/12) = 2), four modules total, four trunk cables
/// (every pair always consumes two, regardless of fill).
#[test]
fn s1_lc_breakout_scales_past_a_single_module_pair() {
    let project = Project {
        racks: racks(&["R01", "R02"]),
        demands: vec![demand("R01", "R02", Media::MmfLcDuplex, 13)],
    };
    let result = allocate_project(&project);
    assert_eq!(result.modules.len(), 4);
    assert_eq!(result.cables.len(), 4);
    assert_eq!(result.sessions.len(), 13);
}

/// S2: a 14-session MPO end-to-end demand needs a second slot pair.
#[test]
fn s2_mpo_end_to_end_scales_past_a_single_slot_pair() {
    let project = Project {
        racks: racks(&["R01", "R02"]),
        demands: vec![demand("R01", "R02", Media::Mpo12, 14)],
    };
    let result = allocate_project(&project);
    assert_eq!(result.modules.len(), 4);
    assert_eq!(result.cables.len(), 14);
    assert_eq!(result.sessions.len(), 14);
    for s in &result.sessions {
        assert_eq!(s.src_port, s.dst_port);
    }
}

/// S3: R01 has a UTP demand of 7 sessions to R02 and 2 to R03. Tail sharing
/// packs the trailing ports of R01's first module pair with a second
/// module, which ends up shared between both peers.
#[test]
fn s3_utp_tail_sharing_across_two_peers() {
    let project = Project {
        racks: racks(&["R01", "R02", "R03"]),
        demands: vec![
            demand("R01", "R02", Media::UtpRj45, 7),
            demand("R01", "R03", Media::UtpRj45, 2),
        ],
    };
    let result = allocate_project(&project);
    assert_eq!(result.sessions.len(), 9);
    let r01_modules: Vec<_> = result.modules.iter().filter(|m| m.rack_id == "R01").collect();
    assert_eq!(r01_modules.len(), 2);
    assert!(r01_modules.iter().any(|m| m.peer_rack_id.is_none()));
}

/// S4: mixed media in the same rack. MPO and MMF LC breakout demands
/// against R01 pack into the same 1U panel once the MPO category's slots
/// run out mid-U.
#[test]
fn s4_mixed_media_shares_a_panel() {
    let project = Project {
        racks: racks(&["R01", "R02", "R03"]),
        demands: vec![
            demand("R01", "R02", Media::Mpo12, 1),
            demand("R01", "R03", Media::MmfLcDuplex, 1),
        ],
    };
    let result = allocate_project(&project);
    let r01_panels: Vec<_> = result.panels.iter().filter(|p| p.rack_id == "R01").collect();
    assert_eq!(r01_panels.len(), 1);
    let r01_modules: Vec<_> = result.modules.iter().filter(|m| m.rack_id == "R01").collect();
    assert_eq!(r01_modules.len(), 2);
    assert!(r01_modules.iter().all(|m| m.panel_u == 1));
}

/// S5: demand direction doesn't affect the resulting plan, only the
/// natural-order rack pair does.
#[test]
fn s5_demand_direction_is_irrelevant_to_the_result() {
    let forward = Project {
        racks: racks(&["R2", "R10"]),
        demands: vec![demand("R10", "R2", Media::Mpo12, 3)],
    };
    let reversed = Project {
        racks: racks(&["R2", "R10"]),
        demands: vec![demand("R2", "R10", Media::Mpo12, 3)],
    };
    let a = allocate_project(&forward);
    let b = allocate_project(&reversed);
    assert_eq!(a.cables.len(), b.cables.len());
    let mut a_ids: Vec<_> = a.sessions.iter().map(|s| &s.session_id).collect();
    let mut b_ids: Vec<_> = b.sessions.iter().map(|s| &s.session_id).collect();
    a_ids.sort();
    b_ids.sort();
    assert_eq!(a_ids, b_ids);
}

/// S6: running the same project twice is byte-for-byte idempotent.
#[test]
fn s6_idempotent_across_reruns() {
    let project = Project {
        racks: racks(&["R01", "R02", "R03"]),
        demands: vec![
            demand("R01", "R02", Media::Mpo12, 14),
            demand("R01", "R02", Media::MmfLcDuplex, 13),
            demand("R02", "R01", Media::SmfLcDuplex, 5),
            demand("R01", "R03", Media::UtpRj45, 9),
        ],
    };
    let a = allocate_project(&project);
    let b = allocate_project(&project);
    assert_eq!(a, b);
}

/// Invariant: within any UTP module, a single peer's assigned ports are
/// contiguous and start at 1.
#[test]
fn invariant_utp_ports_contiguous_per_peer() {
    let project = Project {
        racks: racks(&["R01", "R02"]),
        demands: vec![demand("R01", "R02", Media::UtpRj45, 13)],
    };
    let result = allocate_project(&project);
    use std::collections::HashMap;
    let mut by_module: HashMap<(u32, u8), Vec<u8>> = HashMap::new();
    for s in result.sessions.iter().filter(|s| s.src_rack == "R01") {
        by_module.entry((s.src_u, s.src_slot)).or_default().push(s.src_port);
    }
    for mut ports in by_module.into_values() {
        ports.sort();
        let expected: Vec<u8> = (1..=ports.len() as u8).collect();
        assert_eq!(ports, expected);
    }
}

/// Invariant: LC breakout fiber indices follow the fixed MPO-to-LC mapping
/// (MPO #1 serves LC ports 1-6, MPO #2 serves LC ports 7-12; strand pair
/// `(2q-1, 2q)`).
#[test]
fn invariant_lc_fiber_mapping_is_fixed() {
    let project = Project {
        racks: racks(&["R01", "R02"]),
        demands: vec![demand("R01", "R02", Media::SmfLcDuplex, 12)],
    };
    let result = allocate_project(&project);
    for s in &result.sessions {
        let q = if s.src_port <= 6 { s.src_port } else { s.src_port - 6 };
        assert_eq!(s.fiber_a, Some(2 * q - 1));
        assert_eq!(s.fiber_b, Some(2 * q));
    }
}

/// Invariant: MPO and LC breakout modules are always dedicated to a single
/// peer rack; only UTP modules may be shared.
#[test]
fn invariant_only_utp_modules_are_ever_shared() {
    let project = Project {
        racks: racks(&["R01", "R02", "R03"]),
        demands: vec![
            demand("R01", "R02", Media::Mpo12, 1),
            demand("R01", "R03", Media::MmfLcDuplex, 1),
        ],
    };
    let result = allocate_project(&project);
    for m in &result.modules {
        assert!(m.dedicated);
        assert!(m.peer_rack_id.is_some());
    }
}

/// Property 13: rendering a result twice is byte-identical, across all
/// three output formats.
#[test]
fn property_renderers_are_pure_functions_of_the_result() {
    use patchplan::render::{render_csv, render_json, render_svg};
    let project = Project {
        racks: racks(&["R01", "R02"]),
        demands: vec![demand("R01", "R02", Media::Mpo12, 3)],
    };
    let result = allocate_project(&project);
    assert_eq!(render_csv(&result.sessions), render_csv(&result.sessions));
    assert_eq!(render_json(&result), render_json(&result));
    let a = render_svg(&result);
    let b = render_svg(&result);
    assert_eq!(a.topology, b.topology);
    assert_eq!(a.panels, b.panels);
    assert_eq!(a.pair_detail, b.pair_detail);
}
