//! The data model shared by the allocator, the validator, and the
//! renderers.
//!
//! All types here are plain values: none of them outlive a single
//! `allocate_project` call except the `AllocationResult` returned by value.
//! See spec §3 for the full definition of each entity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of module bays in a single 1U patch panel. Fixed by the hardware
/// this plans for; never varies.
pub const SLOTS_PER_U: u8 = 4;

/// The four supported connectivity media. The wire vocabulary (used by both
/// the validator's `endpoint_type` input and the renderers' `media` output
/// column) is this enum's `Display`/`FromStr` string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Media {
    MmfLcDuplex,
    SmfLcDuplex,
    Mpo12,
    UtpRj45,
}

impl Media {
    /// The fiber kind this medium uses on its LC side, if any.
    pub fn fiber_kind(self) -> Option<FiberKind> {
        match self {
            Media::MmfLcDuplex => Some(FiberKind::Mmf),
            Media::SmfLcDuplex => Some(FiberKind::Smf),
            Media::Mpo12 | Media::UtpRj45 => None,
        }
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Media::MmfLcDuplex => "mmf_lc_duplex",
            Media::SmfLcDuplex => "smf_lc_duplex",
            Media::Mpo12 => "mpo12",
            Media::UtpRj45 => "utp_rj45",
        };
        f.write_str(s)
    }
}

impl FromStr for Media {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mmf_lc_duplex" => Media::MmfLcDuplex,
            "smf_lc_duplex" => Media::SmfLcDuplex,
            "mpo12" => Media::Mpo12,
            "utp_rj45" => Media::UtpRj45,
            _ => return Err(()),
        })
    }
}

/// Fiber family carried by an LC breakout pair. Mirrors `Media`'s LC split
/// but is also attached directly to modules and cables, which don't
/// otherwise know their medium.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiberKind {
    Mmf,
    Smf,
}

impl fmt::Display for FiberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FiberKind::Mmf => "mmf",
            FiberKind::Smf => "smf",
        })
    }
}

/// Wiring convention for a trunk cable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PolarityType {
    A,
    B,
}

impl fmt::Display for PolarityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolarityType::A => "A",
            PolarityType::B => "B",
        })
    }
}

/// Wiring convention for a breakout or pass-through module.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PolarityVariant {
    A,
    Af,
}

impl fmt::Display for PolarityVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PolarityVariant::A => "A",
            PolarityVariant::Af => "AF",
        })
    }
}

/// One of the three closed module families. Modeled as a tagged variant
/// rather than a trait object: the set never grows, and the three families
/// share little enough behavior that dynamic dispatch would only hide the
/// differences.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleType {
    LcBreakout2xMpo12To12xLcDuplex,
    Mpo12PassThrough12Port,
    Utp6xRj45,
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModuleType::LcBreakout2xMpo12To12xLcDuplex => "lc_breakout_2xmpo12_to_12xlcduplex",
            ModuleType::Mpo12PassThrough12Port => "mpo12_pass_through_12port",
            ModuleType::Utp6xRj45 => "utp_6xrj45",
        };
        f.write_str(s)
    }
}

/// Cable family.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CableType {
    Mpo12Trunk,
    UtpCable,
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CableType::Mpo12Trunk => "mpo12_trunk",
            CableType::UtpCable => "utp_cable",
        })
    }
}

/// A rack, identified by a caller-supplied id. Immutable once created.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rack {
    pub id: String,
}

/// A normalized, validated connectivity demand between two distinct racks.
/// `src`/`dst` are not yet canonically ordered: that happens per rack pair
/// inside each allocator, not at this layer, since a project may list the
/// same pair from either direction across different demand rows.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Demand {
    pub src: String,
    pub dst: String,
    pub media: Media,
    pub count: u32,
}

/// A 1U patch panel. Created lazily by the slot reserver; never mutated
/// after creation.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Panel {
    pub rack_id: String,
    pub u: u32,
    pub slots_per_u: u8,
}

/// A module occupying exactly one slot of one panel.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Module {
    pub rack_id: String,
    pub panel_u: u32,
    pub slot: u8,
    pub module_type: ModuleType,
    pub fiber_kind: Option<FiberKind>,
    pub polarity_variant: Option<PolarityVariant>,
    pub peer_rack_id: Option<String>,
    pub dedicated: bool,
}

/// A physical cable connecting two racks, referenced by one or more
/// sessions.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Cable {
    pub cable_id: String,
    pub cable_type: CableType,
    pub fiber_kind: Option<FiberKind>,
    pub polarity_type: Option<PolarityType>,
    pub src_rack: String,
    pub dst_rack: String,
}

/// One logical endpoint-to-endpoint connection, the unit the CSV/JSON
/// renderers ultimately emit.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub media: Media,
    pub cable_id: String,
    pub cable_type: CableType,
    pub fiber_kind: Option<FiberKind>,
    pub polarity_type: Option<PolarityType>,
    pub adapter_type: String,
    pub src_rack: String,
    pub src_u: u32,
    pub src_slot: u8,
    pub src_port: u8,
    pub label_a: String,
    pub dst_rack: String,
    pub dst_u: u32,
    pub dst_slot: u8,
    pub dst_port: u8,
    pub label_b: String,
    pub fiber_a: Option<u8>,
    pub fiber_b: Option<u8>,
    pub face: &'static str,
    pub notes: Option<String>,
}

/// The full, ordered output of one `allocate_project` call.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct AllocationResult {
    pub panels: Vec<Panel>,
    pub modules: Vec<Module>,
    pub cables: Vec<Cable>,
    pub sessions: Vec<Session>,
}

/// A validated project, the only shape `allocate_project` accepts.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Project {
    pub racks: Vec<Rack>,
    pub demands: Vec<Demand>,
}
