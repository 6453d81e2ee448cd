//! LC breakout allocator. Runs twice per `allocate_project` call: all MMF
//! rack pairs, then all SMF rack pairs, so that, per rack, every MMF
//! breakout module is allocated before any SMF one (strict
//! MMF-before-SMF ordering).

use crate::demand::NormalizedDemand;
use crate::ident::canonical_id;
use crate::model::{
    Cable, CableType, FiberKind, Media, Module, ModuleType, PolarityType, PolarityVariant, Session,
};
use crate::slot::SlotReserver;

/// Allocates every demand of `media` (must be `MmfLcDuplex` or
/// `SmfLcDuplex`) across all rack pairs.
pub fn allocate(
    demands: &[NormalizedDemand],
    media: Media,
    reserver: &mut SlotReserver,
) -> (Vec<Module>, Vec<Cable>, Vec<Session>) {
    let fiber_kind = media.fiber_kind().expect("LC media always carries a fiber kind");
    let mut modules = Vec::new();
    let mut cables = Vec::new();
    let mut sessions = Vec::new();

    for d in demands.iter().filter(|d| d.media == media) {
        let rack_lo = &d.rack_a;
        let rack_hi = &d.rack_b;
        let pair_count = d.count.div_ceil(12);

        for i in 1..=pair_count {
            let pos_lo = reserver.reserve(rack_lo);
            let pos_hi = reserver.reserve(rack_hi);
            modules.push(Module {
                rack_id: rack_lo.clone(),
                panel_u: pos_lo.u,
                slot: pos_lo.slot,
                module_type: ModuleType::LcBreakout2xMpo12To12xLcDuplex,
                fiber_kind: Some(fiber_kind),
                polarity_variant: Some(PolarityVariant::Af),
                peer_rack_id: Some(rack_hi.clone()),
                dedicated: true,
            });
            modules.push(Module {
                rack_id: rack_hi.clone(),
                panel_u: pos_hi.u,
                slot: pos_hi.slot,
                module_type: ModuleType::LcBreakout2xMpo12To12xLcDuplex,
                fiber_kind: Some(fiber_kind),
                polarity_variant: Some(PolarityVariant::Af),
                peer_rack_id: Some(rack_lo.clone()),
                dedicated: true,
            });

            // Every breakout module pair has exactly two back-side MPO
            // connectors, so it always consumes exactly two trunks, even
            // if the last pair only lights up a single front LC port.
            let trunk_cable_id = |j: u8| {
                canonical_id(&[
                    &media.to_string(),
                    &fiber_kind.to_string(),
                    "A",
                    rack_lo,
                    rack_hi,
                    &i.to_string(),
                    &j.to_string(),
                ])
            };
            let trunks: [String; 2] = [trunk_cable_id(1), trunk_cable_id(2)];
            for cable_id in &trunks {
                cables.push(Cable {
                    cable_id: cable_id.clone(),
                    cable_type: CableType::Mpo12Trunk,
                    fiber_kind: Some(fiber_kind),
                    polarity_type: Some(PolarityType::A),
                    src_rack: rack_lo.clone(),
                    dst_rack: rack_hi.clone(),
                });
            }

            let used_ports = d.count - 12 * (i - 1);
            let used_ports = used_ports.min(12);
            for p in 1..=used_ports {
                let j = if p <= 6 { 1 } else { 2 };
                let q = if p <= 6 { p } else { p - 6 };
                let fiber_a = (2 * q - 1) as u8;
                let fiber_b = (2 * q) as u8;
                let cable_id = trunks[(j - 1) as usize].clone();

                let session_id = canonical_id(&[
                    &media.to_string(),
                    rack_lo,
                    &pos_lo.u.to_string(),
                    &pos_lo.slot.to_string(),
                    &p.to_string(),
                    rack_hi,
                    &pos_hi.u.to_string(),
                    &pos_hi.slot.to_string(),
                    &p.to_string(),
                    &cable_id,
                    &fiber_a.to_string(),
                    &fiber_b.to_string(),
                ]);
                sessions.push(Session {
                    session_id,
                    media,
                    cable_id,
                    cable_type: CableType::Mpo12Trunk,
                    fiber_kind: Some(fiber_kind),
                    polarity_type: Some(PolarityType::A),
                    adapter_type: "lc_duplex".to_string(),
                    src_rack: rack_lo.clone(),
                    src_u: pos_lo.u,
                    src_slot: pos_lo.slot,
                    src_port: p as u8,
                    label_a: format!("{rack_lo}U{}S{}P{p}", pos_lo.u, pos_lo.slot),
                    dst_rack: rack_hi.clone(),
                    dst_u: pos_hi.u,
                    dst_slot: pos_hi.slot,
                    dst_port: p as u8,
                    label_b: format!("{rack_hi}U{}S{}P{p}", pos_hi.u, pos_hi.slot),
                    fiber_a: Some(fiber_a),
                    fiber_b: Some(fiber_b),
                    face: "front",
                    notes: None,
                });
            }
        }
    }

    (modules, cables, sessions)
}
