//! SVG renderer: three independent hand-emitted documents, built the same
//! way the rest of the crate builds text formats: `String`/`write!`
//! templating, not a layout library.

use crate::model::AllocationResult;
use crate::natural_order;
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// The three SVG documents a full render produces.
pub struct SvgViews {
    pub topology: String,
    pub panels: String,
    pub pair_detail: String,
}

const NODE_SPACING: i32 = 120;
const CELL_SIZE: i32 = 24;

/// Renders all three views for `result`.
pub fn render_svg(result: &AllocationResult) -> SvgViews {
    SvgViews {
        topology: render_topology(result),
        panels: render_panels(result),
        pair_detail: render_pair_detail(result),
    }
}

fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )
}

/// One node per rack, one edge per rack pair carrying at least one cable.
fn render_topology(result: &AllocationResult) -> String {
    let mut racks: Vec<String> = result
        .panels
        .iter()
        .map(|p| p.rack_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    natural_order::sort_by_key(&mut racks, |r| r.as_str());

    let mut edges: BTreeSet<(String, String)> = BTreeSet::new();
    for c in &result.cables {
        let (lo, hi) = natural_order::order_pair(&c.src_rack, &c.dst_rack);
        edges.insert((lo.to_string(), hi.to_string()));
    }

    let width = (racks.len() as i32 + 1) * NODE_SPACING;
    let height = NODE_SPACING * 2;
    let mut out = svg_header(width, height);
    let positions: std::collections::HashMap<&str, i32> = racks
        .iter()
        .enumerate()
        .map(|(i, r)| (r.as_str(), (i as i32 + 1) * NODE_SPACING))
        .collect();

    for (lo, hi) in &edges {
        let x1 = positions[lo.as_str()];
        let x2 = positions[hi.as_str()];
        let _ = write!(
            out,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="black"/>"#,
            y = height / 2
        );
    }
    for rack in &racks {
        let x = positions[rack.as_str()];
        let _ = write!(
            out,
            r#"<circle cx="{x}" cy="{y}" r="16" fill="white" stroke="black"/><text x="{x}" y="{y}" text-anchor="middle" dominant-baseline="middle">{rack}</text>"#,
            y = height / 2
        );
    }
    out.push_str("</svg>");
    out
}

/// One row per U, one cell per slot, per rack.
fn render_panels(result: &AllocationResult) -> String {
    let mut racks: Vec<String> = result
        .panels
        .iter()
        .map(|p| p.rack_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    natural_order::sort_by_key(&mut racks, |r| r.as_str());

    let max_u = result.panels.iter().map(|p| p.u).max().unwrap_or(0);
    let width = (racks.len() as i32) * (CELL_SIZE * 4 + CELL_SIZE);
    let height = (max_u as i32 + 1) * CELL_SIZE;
    let mut out = svg_header(width, height);

    for (ri, rack) in racks.iter().enumerate() {
        let base_x = ri as i32 * (CELL_SIZE * 4 + CELL_SIZE);
        for panel in result.panels.iter().filter(|p| &p.rack_id == rack) {
            let y = (panel.u as i32 - 1) * CELL_SIZE;
            for slot in 1..=panel.slots_per_u {
                let x = base_x + (slot as i32 - 1) * CELL_SIZE;
                let module = result
                    .modules
                    .iter()
                    .find(|m| &m.rack_id == rack && m.panel_u == panel.u && m.slot == slot);
                let label = module.map(|m| m.module_type.to_string()).unwrap_or_default();
                let _ = write!(
                    out,
                    r#"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="white" stroke="black"/><title>{label}</title>"#
                );
            }
        }
    }
    out.push_str("</svg>");
    out
}

/// Modules and trunk cables between exactly two racks, one view per pair
/// that has at least one cable between them.
fn render_pair_detail(result: &AllocationResult) -> String {
    let mut edges: BTreeSet<(String, String)> = BTreeSet::new();
    for c in &result.cables {
        let (lo, hi) = natural_order::order_pair(&c.src_rack, &c.dst_rack);
        edges.insert((lo.to_string(), hi.to_string()));
    }

    let height = (edges.len() as i32 + 1) * CELL_SIZE * 2;
    let mut out = svg_header(NODE_SPACING * 3, height.max(CELL_SIZE));

    for (row, (lo, hi)) in edges.iter().enumerate() {
        let cable_count = result
            .cables
            .iter()
            .filter(|c| {
                let (a, b) = natural_order::order_pair(&c.src_rack, &c.dst_rack);
                a == lo && b == hi
            })
            .count();
        let module_count = result
            .modules
            .iter()
            .filter(|m| {
                m.peer_rack_id.as_deref() == Some(hi.as_str())
                    || m.peer_rack_id.as_deref() == Some(lo.as_str())
            })
            .count();
        let y = (row as i32 + 1) * CELL_SIZE * 2;
        let _ = write!(
            out,
            r#"<text x="4" y="{y}">{lo} &#8596; {hi}: {module_count} modules, {cable_count} cables</text>"#
        );
    }
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cable, CableType, Module, ModuleType, Panel};

    fn sample_result() -> AllocationResult {
        AllocationResult {
            panels: vec![Panel {
                rack_id: "R01".to_string(),
                u: 1,
                slots_per_u: 4,
            }],
            modules: vec![Module {
                rack_id: "R01".to_string(),
                panel_u: 1,
                slot: 1,
                module_type: ModuleType::Mpo12PassThrough12Port,
                fiber_kind: None,
                polarity_variant: None,
                peer_rack_id: Some("R02".to_string()),
                dedicated: true,
            }],
            cables: vec![Cable {
                cable_id: "c1".to_string(),
                cable_type: CableType::Mpo12Trunk,
                fiber_kind: None,
                polarity_type: None,
                src_rack: "R01".to_string(),
                dst_rack: "R02".to_string(),
            }],
            sessions: Vec::new(),
        }
    }

    #[test]
    fn all_three_views_are_well_formed_svg_tags() {
        let views = render_svg(&sample_result());
        for doc in [&views.topology, &views.panels, &views.pair_detail] {
            assert!(doc.starts_with("<svg"));
            assert!(doc.ends_with("</svg>"));
        }
    }

    #[test]
    fn rendering_twice_is_byte_identical() {
        let result = sample_result();
        let a = render_svg(&result);
        let b = render_svg(&result);
        assert_eq!(a.topology, b.topology);
        assert_eq!(a.panels, b.panels);
        assert_eq!(a.pair_detail, b.pair_detail);
    }
}
