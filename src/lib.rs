//! A deterministic physical-termination planner for rack-to-rack patch
//! cabling in a data center.
//!
//! Given a set of racks and an aggregated set of inter-rack connectivity
//! demands across four media (12-fiber MPO end-to-end, MMF LC breakout, SMF
//! LC breakout, UTP), [`alloc::allocate_project`] produces a complete
//! physical plan: which patch panels sit where, which modules occupy each
//! slot, which trunk cables run between racks, and which endpoint port on
//! one rack is wired to which endpoint port on the other. Identical input
//! always yields byte-identical output, including the cable and session
//! identifiers used for labeling.
//!
//! The crate is organized bottom-up: [`natural_order`] and [`ident`] are
//! small, dependency-free utilities; [`model`] is the shared vocabulary;
//! [`slot`] and [`demand`] are the allocator's private bookkeeping, exposed
//! because [`alloc`]'s tests build on them directly; [`alloc`] is the
//! allocation engine itself; [`validate`] and [`render`] sit at the crate's
//! edges, turning untrusted input into a [`model::Project`] and a finished
//! [`model::AllocationResult`] into CSV/JSON/SVG respectively.

pub mod alloc;
pub mod demand;
pub mod ident;
pub mod model;
pub mod natural_order;
pub mod render;
pub mod slot;
pub mod validate;

pub use alloc::allocate_project;
pub use model::{AllocationResult, Project};
pub use validate::{validate, RawProject, ValidationError};
