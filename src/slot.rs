//! Per-rack slot reserver.
//!
//! Tracks, per rack, the next free `(u, slot)` position and the panels
//! created so far. No category is ever stored on a slot, the only thing
//! that enforces "MPO E2E before LC MMF before LC SMF before UTP" is the
//! order in which allocators call [`SlotReserver::reserve`]. That's what
//! makes mixed-in-U packing fall out for free: when one category's calls
//! stop mid-U, the next category's calls simply continue filling that U.

use crate::model::{Panel, SLOTS_PER_U};
use std::collections::HashMap;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub u: u32,
    pub slot: u8,
}

struct RackLedger {
    panels: Vec<Panel>,
    next: Position,
}

/// Call-local, single-threaded reservation state for every rack in one
/// `allocate_project` invocation. Never shared across calls.
#[derive(Default)]
pub struct SlotReserver {
    racks: HashMap<String, RackLedger>,
}

impl SlotReserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next free slot in `rack_id`, creating a new panel first
    /// if the current one is full. Returns the `(u, slot)` position.
    pub fn reserve(&mut self, rack_id: &str) -> Position {
        let ledger = self.racks.entry(rack_id.to_string()).or_insert_with(|| RackLedger {
            panels: Vec::new(),
            next: Position { u: 0, slot: SLOTS_PER_U },
        });
        if ledger.next.slot >= SLOTS_PER_U {
            let u = ledger.next.u + 1;
            ledger.panels.push(Panel {
                rack_id: rack_id.to_string(),
                u,
                slots_per_u: SLOTS_PER_U,
            });
            ledger.next = Position { u, slot: 1 };
        } else {
            ledger.next.slot += 1;
        }
        ledger.next
    }

    /// All panels created across every rack so far, in creation order.
    pub fn panels(&self) -> Vec<Panel> {
        self.racks.values().flat_map(|l| l.panels.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reservation_creates_panel_at_u1_slot1() {
        let mut r = SlotReserver::new();
        let pos = r.reserve("R01");
        assert_eq!(pos, Position { u: 1, slot: 1 });
    }

    #[test]
    fn fills_slots_top_down_before_opening_a_new_panel() {
        let mut r = SlotReserver::new();
        let positions: Vec<_> = (0..5).map(|_| r.reserve("R01")).collect();
        assert_eq!(
            positions,
            vec![
                Position { u: 1, slot: 1 },
                Position { u: 1, slot: 2 },
                Position { u: 1, slot: 3 },
                Position { u: 1, slot: 4 },
                Position { u: 2, slot: 1 },
            ]
        );
    }

    #[test]
    fn racks_are_independent() {
        let mut r = SlotReserver::new();
        r.reserve("R01");
        r.reserve("R01");
        let pos = r.reserve("R02");
        assert_eq!(pos, Position { u: 1, slot: 1 });
    }

    #[test]
    fn panels_created_with_no_gaps() {
        let mut r = SlotReserver::new();
        for _ in 0..9 {
            r.reserve("R01");
        }
        let mut panels = r.panels();
        panels.sort_by_key(|p| p.u);
        let us: Vec<u32> = panels.iter().map(|p| p.u).collect();
        assert_eq!(us, vec![1, 2, 3]);
    }
}
