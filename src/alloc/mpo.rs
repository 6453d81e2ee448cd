//! MPO end-to-end pass-through allocator. Runs first, ahead of every LC or
//! UTP allocation, so its modules always occupy the lowest slots in a rack.

use crate::demand::NormalizedDemand;
use crate::ident::canonical_id;
use crate::model::{Cable, CableType, Media, Module, ModuleType, PolarityType, PolarityVariant, Session};
use crate::slot::SlotReserver;

/// Allocates every `mpo12` demand. Returns the modules and cables/sessions
/// produced, in allocation order (the caller sorts the final output).
pub fn allocate(
    demands: &[NormalizedDemand],
    reserver: &mut SlotReserver,
) -> (Vec<Module>, Vec<Cable>, Vec<Session>) {
    let mut modules = Vec::new();
    let mut cables = Vec::new();
    let mut sessions = Vec::new();

    for d in demands.iter().filter(|d| d.media == Media::Mpo12) {
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
                module_type: ModuleType::Mpo12PassThrough12Port,
                fiber_kind: None,
                polarity_variant: Some(PolarityVariant::A),
                peer_rack_id: Some(rack_hi.clone()),
                dedicated: true,
            });
            modules.push(Module {
                rack_id: rack_hi.clone(),
                panel_u: pos_hi.u,
                slot: pos_hi.slot,
                module_type: ModuleType::Mpo12PassThrough12Port,
                fiber_kind: None,
                polarity_variant: Some(PolarityVariant::A),
                peer_rack_id: Some(rack_lo.clone()),
                dedicated: true,
            });

            let used_ports = d.count - 12 * (i - 1);
            let used_ports = used_ports.min(12);
            for k in 1..=used_ports {
                let cable_id = canonical_id(&[
                    "mpo12",
                    "B",
                    rack_lo,
                    rack_hi,
                    &i.to_string(),
                    &k.to_string(),
                ]);
                cables.push(Cable {
                    cable_id: cable_id.clone(),
                    cable_type: CableType::Mpo12Trunk,
                    fiber_kind: None,
                    polarity_type: Some(PolarityType::B),
                    src_rack: rack_lo.clone(),
                    dst_rack: rack_hi.clone(),
                });

                let session_id = canonical_id(&[
                    "mpo12",
                    rack_lo,
                    &pos_lo.u.to_string(),
                    &pos_lo.slot.to_string(),
                    &k.to_string(),
                    rack_hi,
                    &pos_hi.u.to_string(),
                    &pos_hi.slot.to_string(),
                    &k.to_string(),
                    &cable_id,
                ]);
                sessions.push(Session {
                    session_id,
                    media: Media::Mpo12,
                    cable_id,
                    cable_type: CableType::Mpo12Trunk,
                    fiber_kind: None,
                    polarity_type: Some(PolarityType::B),
                    adapter_type: "mpo12".to_string(),
                    src_rack: rack_lo.clone(),
                    src_u: pos_lo.u,
                    src_slot: pos_lo.slot,
                    src_port: k as u8,
                    label_a: format!("{rack_lo}U{}S{}P{k}", pos_lo.u, pos_lo.slot),
                    dst_rack: rack_hi.clone(),
                    dst_u: pos_hi.u,
                    dst_slot: pos_hi.slot,
                    dst_port: k as u8,
                    label_b: format!("{rack_hi}U{}S{}P{k}", pos_hi.u, pos_hi.slot),
                    fiber_a: None,
                    fiber_b: None,
                    face: "front",
                    notes: None,
                });
            }
        }
    }

    (modules, cables, sessions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(rack_a: &str, rack_b: &str, count: u32) -> NormalizedDemand {
        NormalizedDemand {
            rack_a: rack_a.into(),
            rack_b: rack_b.into(),
            media: Media::Mpo12,
            count,
        }
    }

    #[test]
    fn scaling_over_12_ports_opens_a_second_slot_pair() {
        let mut reserver = SlotReserver::new();
        let (modules, cables, sessions) = allocate(&[demand("R01", "R02", 14)], &mut reserver);
        assert_eq!(modules.len(), 4); // 2 slot pairs x 2 racks
        assert_eq!(cables.len(), 14);
        assert_eq!(sessions.len(), 14);
        for s in &sessions {
            assert_eq!(s.src_port, s.dst_port);
        }
        let second_pair_ports: Vec<u8> = sessions
            .iter()
            .filter(|s| s.src_slot == modules[2].slot && s.src_u == modules[2].panel_u)
            .map(|s| s.src_port)
            .collect();
        assert_eq!(second_pair_ports.len(), 2);
    }

    #[test]
    fn modules_are_dedicated_to_the_peer_rack() {
        let mut reserver = SlotReserver::new();
        let (modules, _, _) = allocate(&[demand("R01", "R02", 1)], &mut reserver);
        assert!(modules.iter().all(|m| m.dedicated));
        assert_eq!(modules[0].peer_rack_id.as_deref(), Some("R02"));
        assert_eq!(modules[1].peer_rack_id.as_deref(), Some("R01"));
    }
}
