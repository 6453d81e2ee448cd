//! Output renderers. Each takes a finished [`AllocationResult`] and
//! produces one on-disk representation; none of them can fail on
//! well-formed input, since the values they render were produced by the
//! allocator, not supplied by a caller.

mod csv;
mod json;
mod svg;

pub use csv::render_csv;
pub use json::render_json;
pub use svg::render_svg;
