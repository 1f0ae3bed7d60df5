//! Normal-distribution weighting of nodes by horizontal position.
//!
//! Hybrid mode discounts text that sits far from the visually dominant
//! region of the page. The dominant region is modeled as a normal
//! distribution centered on the widest visible element (`mean`, `sd`
//! derived from its bounding box), and each leaf's character count is
//! scaled by the probability mass covering its horizontal span.

use crate::scratch::ScratchMap;
use crate::tree::{Bounds, DocTree, NodeId};

use std::f64::consts::{PI, SQRT_2};

/// Cumulative probability of a standard normal variable being below `z`.
///
/// A fixed 12-term alternating-series approximation, not an exact error
/// function. Downstream scores depend on its exact rounding behavior, so
/// do not substitute a library CDF.
pub fn z_score_probability(z: f64) -> f64 {
    let negative = z < 0.0;
    let z = z.abs();
    let s = (SQRT_2 / 3.0) * z;
    let mut b = 0.0;
    let mut hh = 0.5;
    for _ in 0..12 {
        b += (f64::exp(-hh * hh / 9.0) * (hh * s).sin()) / hh;
        hh += 1.0;
    }
    let p = 0.5 - b / PI;
    if negative { p } else { 1.0 - p }
}

/// Probability mass of the `(mean, sd)` normal distribution covering the
/// horizontal span of `bounds`, rounded to 4 decimal places.
pub fn visual_importance(mean: f64, sd: f64, bounds: Bounds) -> f64 {
    let z1 = (bounds.left - mean) / sd;
    let z2 = (bounds.right - mean) / sd;
    let mass = z_score_probability(z2) - z_score_probability(z1);
    (mass * 10000.0).round() / 10000.0
}

/// Writes `hybrid_char_number` for every visible node.
///
/// Leaves get `char_count * visual_importance`; internal nodes sum their
/// visible children. Must run after [`crate::metrics::collect_metrics`].
pub fn apply_visual_weights(tree: &DocTree, scratch: &mut ScratchMap, mean: f64, sd: f64) {
    weigh(tree, scratch, tree.root(), mean, sd);
}

fn weigh(tree: &DocTree, scratch: &mut ScratchMap, id: NodeId, mean: f64, sd: f64) {
    for child in tree.visible_children(id) {
        weigh(tree, scratch, child, mean, sd);
    }

    if tree.is_leaf(id) {
        let chars = scratch[id].char_count as f64;
        scratch[id].hybrid_char_number = chars * visual_importance(mean, sd, tree.bounds(id));
    } else {
        let mut weighted = 0.0;
        for child in tree.visible_children(id) {
            weighted += scratch[child].hybrid_char_number;
        }
        scratch[id].hybrid_char_number = weighted;
    }
}
