//! Demand normalizer: groups the project's raw demand list by unordered
//! rack pair and medium, merging counts. Self-loops are rejected by the
//! validator before this runs, so this stage assumes every demand's `src`
//! and `dst` already differ.

use crate::model::{Demand, Media};
use crate::natural_order;
use std::collections::HashMap;

/// A demand merged across every input row naming the same unordered rack
/// pair and the same medium. `rack_a` is always the natural-order-smaller
/// of the two racks.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NormalizedDemand {
    pub rack_a: String,
    pub rack_b: String,
    pub media: Media,
    pub count: u32,
}

/// Merges `demands` by `(unordered pair, media)`, returning one row per
/// distinct combination, sorted by natural order of `(rack_a, rack_b)` so
/// downstream consumers see a deterministic sequence.
pub fn normalize(demands: &[Demand]) -> Vec<NormalizedDemand> {
    let mut merged: HashMap<(String, String, Media), u32> = HashMap::new();
    for d in demands {
        debug_assert_ne!(d.src, d.dst, "self-loops must be rejected before normalization");
        let (lo, hi) = natural_order::order_pair(&d.src, &d.dst);
        *merged
            .entry((lo.to_string(), hi.to_string(), d.media))
            .or_insert(0) += d.count;
    }
    let mut out: Vec<NormalizedDemand> = merged
        .into_iter()
        .map(|((rack_a, rack_b, media), count)| NormalizedDemand {
            rack_a,
            rack_b,
            media,
            count,
        })
        .collect();
    out.sort_by(|x, y| {
        natural_order::compare(&x.rack_a, &y.rack_a)
            .then_with(|| natural_order::compare(&x.rack_b, &y.rack_b))
            .then_with(|| format!("{}", x.media).cmp(&format!("{}", y.media)))
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(src: &str, dst: &str, media: Media, count: u32) -> Demand {
        Demand {
            src: src.into(),
            dst: dst.into(),
            media,
            count,
        }
    }

    #[test]
    fn merges_counts_for_the_same_pair_and_media() {
        let demands = vec![
            demand("R01", "R02", Media::Mpo12, 5),
            demand("R02", "R01", Media::Mpo12, 3),
        ];
        let out = normalize(&demands);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].count, 8);
        assert_eq!(out[0].rack_a, "R01");
        assert_eq!(out[0].rack_b, "R02");
    }

    #[test]
    fn keeps_different_media_separate() {
        let demands = vec![
            demand("R01", "R02", Media::Mpo12, 5),
            demand("R01", "R02", Media::MmfLcDuplex, 7),
        ];
        let out = normalize(&demands);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn orders_rack_pair_by_natural_order_regardless_of_input_direction() {
        let demands = vec![demand("R10", "R2", Media::Mpo12, 1)];
        let out = normalize(&demands);
        assert_eq!(out[0].rack_a, "R2");
        assert_eq!(out[0].rack_b, "R10");
    }

    #[test]
    fn output_is_sorted_deterministically() {
        let demands = vec![
            demand("R10", "R20", Media::Mpo12, 1),
            demand("R01", "R02", Media::Mpo12, 1),
            demand("R01", "R03", Media::Mpo12, 1),
        ];
        let out = normalize(&demands);
        let pairs: Vec<(String, String)> = out
            .iter()
            .map(|d| (d.rack_a.clone(), d.rack_b.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("R01".to_string(), "R02".to_string()),
                ("R01".to_string(), "R03".to_string()),
                ("R10".to_string(), "R20".to_string()),
            ]
        );
    }
}
