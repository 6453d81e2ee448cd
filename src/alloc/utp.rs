//! UTP allocator, the packing heart. Runs last, after every MPO and LC
//! slot has been claimed. UTP modules are never dedicated, so they pack
//! tightly: a module can be shared between whichever peers happen to land
//! on either side of a 6-port boundary.

use crate::demand::NormalizedDemand;
use crate::ident::canonical_id;
use crate::model::{Cable, CableType, Media, Module, ModuleType, Session};
use crate::natural_order;
use crate::slot::SlotReserver;
use std::collections::HashMap;

/// Per-module bookkeeping while packing one rack's peers. `peers` lists
/// every peer that has at least one port in this module, in the order they
/// first touched it, used only to decide `dedicated`/`peer_rack_id`.
struct ModuleBuild {
    u: u32,
    slot: u8,
    peers: Vec<String>,
}

struct OpenTail {
    free: u8,
}

/// Packs one rack's UTP peers into 6-port modules, returning the modules
/// created and, for every peer, its assigned ports in session-sequence
/// order (the k-th entry is where the k-th RJ45 session to that peer
/// lands).
fn pack_rack(
    rack_id: &str,
    mut peers: Vec<(String, u32)>,
    reserver: &mut SlotReserver,
) -> (Vec<Module>, HashMap<String, Vec<(u32, u8, u8)>>) {
    natural_order::sort_by_key(&mut peers, |(peer, _)| peer.as_str());

    let mut builds: Vec<ModuleBuild> = Vec::new();
    let mut open_tail: Option<OpenTail> = None;
    let mut peer_ports: HashMap<String, Vec<(u32, u8, u8)>> = HashMap::new();

    for (peer, count) in peers {
        let mut remaining = count;

        if remaining > 0 {
            if let Some(tail) = &mut open_tail {
                if tail.free > 0 {
                    let take = remaining.min(tail.free as u32) as u8;
                    let build = builds.last_mut().expect("open tail always has a module");
                    let start_port = 6 - tail.free + 1;
                    for k in 0..take {
                        peer_ports
                            .entry(peer.clone())
                            .or_default()
                            .push((build.u, build.slot, start_port + k));
                    }
                    if !build.peers.contains(&peer) {
                        build.peers.push(peer.clone());
                    }
                    remaining -= take as u32;
                    tail.free -= take;
                    if tail.free == 0 {
                        open_tail = None;
                    }
                }
            }
        }

        while remaining >= 6 {
            let pos = reserver.reserve(rack_id);
            builds.push(ModuleBuild {
                u: pos.u,
                slot: pos.slot,
                peers: vec![peer.clone()],
            });
            for k in 1..=6u8 {
                peer_ports.entry(peer.clone()).or_default().push((pos.u, pos.slot, k));
            }
            remaining -= 6;
        }

        if remaining > 0 {
            let pos = reserver.reserve(rack_id);
            builds.push(ModuleBuild {
                u: pos.u,
                slot: pos.slot,
                peers: vec![peer.clone()],
            });
            for k in 1..=(remaining as u8) {
                peer_ports.entry(peer.clone()).or_default().push((pos.u, pos.slot, k));
            }
            open_tail = Some(OpenTail {
                free: 6 - remaining as u8,
            });
        }
    }

    let modules = builds
        .into_iter()
        .map(|b| Module {
            rack_id: rack_id.to_string(),
            panel_u: b.u,
            slot: b.slot,
            module_type: ModuleType::Utp6xRj45,
            fiber_kind: None,
            polarity_variant: None,
            peer_rack_id: if b.peers.len() == 1 {
                Some(b.peers[0].clone())
            } else {
                None
            },
            dedicated: false,
        })
        .collect();

    (modules, peer_ports)
}

/// Allocates every `utp_rj45` demand across every rack.
pub fn allocate(
    racks: &[crate::model::Rack],
    demands: &[NormalizedDemand],
    reserver: &mut SlotReserver,
) -> (Vec<Module>, Vec<Cable>, Vec<Session>) {
    let mut peers_of: HashMap<String, Vec<(String, u32)>> = HashMap::new();
    for d in demands.iter().filter(|d| d.media == Media::UtpRj45) {
        peers_of
            .entry(d.rack_a.clone())
            .or_default()
            .push((d.rack_b.clone(), d.count));
        peers_of
            .entry(d.rack_b.clone())
            .or_default()
            .push((d.rack_a.clone(), d.count));
    }

    let mut rack_ids: Vec<&str> = racks.iter().map(|r| r.id.as_str()).collect();
    natural_order::sort_by_key(&mut rack_ids, |id| id);

    let mut modules = Vec::new();
    let mut ports_by_rack: HashMap<String, HashMap<String, Vec<(u32, u8, u8)>>> = HashMap::new();
    for rack_id in rack_ids {
        let Some(peers) = peers_of.remove(rack_id) else {
            continue;
        };
        let (rack_modules, peer_ports) = pack_rack(rack_id, peers, reserver);
        modules.extend(rack_modules);
        ports_by_rack.insert(rack_id.to_string(), peer_ports);
    }

    let mut cables = Vec::new();
    let mut sessions = Vec::new();
    for d in demands.iter().filter(|d| d.media == Media::UtpRj45) {
        let rack_lo = &d.rack_a;
        let rack_hi = &d.rack_b;
        let lo_ports = &ports_by_rack[rack_lo][rack_hi];
        let hi_ports = &ports_by_rack[rack_hi][rack_lo];
        for k in 1..=d.count {
            let (u_lo, slot_lo, port_lo) = lo_ports[(k - 1) as usize];
            let (u_hi, slot_hi, port_hi) = hi_ports[(k - 1) as usize];

            let cable_id = canonical_id(&["utp_rj45", rack_lo, rack_hi, &k.to_string()]);
            cables.push(Cable {
                cable_id: cable_id.clone(),
                cable_type: CableType::UtpCable,
                fiber_kind: None,
                polarity_type: None,
                src_rack: rack_lo.clone(),
                dst_rack: rack_hi.clone(),
            });

            let session_id = canonical_id(&[
                "utp_rj45",
                rack_lo,
                &u_lo.to_string(),
                &slot_lo.to_string(),
                &port_lo.to_string(),
                rack_hi,
                &u_hi.to_string(),
                &slot_hi.to_string(),
                &port_hi.to_string(),
                &cable_id,
            ]);
            sessions.push(Session {
                session_id,
                media: Media::UtpRj45,
                cable_id,
                cable_type: CableType::UtpCable,
                fiber_kind: None,
                polarity_type: None,
                adapter_type: "rj45".to_string(),
                src_rack: rack_lo.clone(),
                src_u: u_lo,
                src_slot: slot_lo,
                src_port: port_lo,
                label_a: format!("{rack_lo}U{u_lo}S{slot_lo}P{port_lo}"),
                dst_rack: rack_hi.clone(),
                dst_u: u_hi,
                dst_slot: slot_hi,
                dst_port: port_hi,
                label_b: format!("{rack_hi}U{u_hi}S{slot_hi}P{port_hi}"),
                fiber_a: None,
                fiber_b: None,
                face: "front",
                notes: None,
            });
        }
    }

    (modules, cables, sessions)
}
