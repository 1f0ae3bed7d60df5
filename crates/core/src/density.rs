//! The three interchangeable text-density scoring formulas.
//!
//! Each function maps a node's accumulated metrics (plus two document-wide
//! scalars) to a single score approximating how text-rich versus
//! markup-heavy the node is. Numeric degeneracy never raises: counts used
//! as divisors are floored to 1 and `NaN` results collapse to 0.

use crate::scratch::{NodeScratch, ScratchMap};
use crate::tree::DocTree;

use serde::{Deserialize, Serialize};
use std::f64::consts::E;
use std::fmt;
use std::str::FromStr;

use crate::{PithError, Result};

/// Scoring method selecting one of the density formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Characters per tag.
    Standard,
    /// Characters per tag, discounted by link content relative to the
    /// whole document.
    Composite,
    /// Composite shape over position-weighted character counts.
    Hybrid,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Standard => "standard",
            Method::Composite => "composite",
            Method::Hybrid => "hybrid",
        }
    }

    /// Applies this method's density function to one node's scratch slot.
    pub fn density(self, node: &NodeScratch, body: &BodyStats) -> f64 {
        match self {
            Method::Standard => standard_density(node),
            Method::Composite => composite_density(node, body),
            Method::Hybrid => hybrid_density(node, body),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = PithError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Method::Standard),
            "composite" => Ok(Method::Composite),
            "hybrid" => Ok(Method::Hybrid),
            _ => Err(PithError::UnknownMethod(s.to_string())),
        }
    }
}

/// Document-wide scalars consumed by the composite and hybrid formulas,
/// taken from the root node once before the propagation pass.
#[derive(Debug, Clone, Copy)]
pub struct BodyStats {
    /// Total character count of the document. Under hybrid this is the
    /// root's position-weighted count instead.
    pub char_count: f64,
    /// Total link character count of the document.
    pub link_char_count: f64,
}

impl BodyStats {
    /// Reads the scalars for `method` from the root's scratch slot.
    pub fn from_root(tree: &DocTree, scratch: &ScratchMap, method: Method) -> Self {
        let root = &scratch[tree.root()];
        let char_count = match method {
            Method::Hybrid => root.hybrid_char_number,
            _ => root.char_count as f64,
        };
        Self { char_count, link_char_count: root.link_char_count as f64 }
    }
}

/// `char_count / tag_count`, tag count floored to 1.
pub fn standard_density(node: &NodeScratch) -> f64 {
    node.char_count as f64 / node.tag_count.max(1) as f64
}

/// Link-aware density:
///
/// ```text
/// (c/t) * ln((c*t) / (lc*lt)) / ln(c*lc/nonlink + body_lc*c/body_c + e)
/// ```
///
/// where `nonlink = c - lc` floored to 1. A `NaN` result (for instance
/// `0 * ln(0)` on an empty node) collapses to 0.
pub fn composite_density(node: &NodeScratch, body: &BodyStats) -> f64 {
    let chars = node.char_count as f64;
    let tags = node.tag_count.max(1) as f64;
    let link_chars = node.link_char_count.max(1) as f64;
    let link_tags = node.link_tag_count.max(1) as f64;
    let non_link_chars = (chars - link_chars).max(1.0);
    let body_chars = body.char_count.max(1.0);

    let density = chars / tags;
    let log_arg = ((chars * tags) / (link_chars * link_tags)).ln();
    let log_base = (chars * link_chars / non_link_chars + body.link_char_count * chars / body_chars + E).ln();

    let result = density * log_arg / log_base;
    if result.is_nan() { 0.0 } else { result }
}

/// Composite shape with the position-weighted character count in place of
/// the raw one for both the density and the log argument.
///
/// A non-positive weighted count yields 0; a degenerate or negative
/// log-ratio result falls back to `weighted / chars`.
pub fn hybrid_density(node: &NodeScratch, body: &BodyStats) -> f64 {
    let weighted = node.hybrid_char_number;
    if !(weighted > 0.0) {
        return 0.0;
    }

    let chars = node.char_count.max(1) as f64;
    let tags = node.tag_count.max(1) as f64;
    let link_chars = node.link_char_count.max(1) as f64;
    let link_tags = node.link_tag_count.max(1) as f64;
    let non_link_chars = (chars - link_chars).max(1.0);
    let body_chars = body.char_count.max(1.0);
    let body_link_chars = body.link_char_count.max(1.0);

    let log_arg = ((weighted * tags) / (link_chars * link_tags)).ln();
    let log_base = (weighted * link_chars / non_link_chars + body_link_chars * chars / body_chars + E).ln();

    let mut density = (weighted / tags) * log_arg / log_base;
    if !density.is_finite() || density == 0.0 {
        density = weighted / chars;
    }
    if density < 0.0 {
        return weighted / chars;
    }
    density
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn node(chars: usize, tags: usize, link_chars: usize, link_tags: usize) -> NodeScratch {
        NodeScratch { char_count: chars, tag_count: tags, link_char_count: link_chars, link_tag_count: link_tags, ..Default::default() }
    }

    fn body(chars: f64, link_chars: f64) -> BodyStats {
        BodyStats { char_count: chars, link_char_count: link_chars }
    }

    #[rstest]
    #[case(100, 5, 20.0)]
    #[case(20, 2, 10.0)]
    #[case(0, 0, 0.0)] // divisor floored, no division error
    #[case(50, 0, 50.0)]
    fn test_standard_density(#[case] chars: usize, #[case] tags: usize, #[case] expected: f64) {
        assert_eq!(standard_density(&node(chars, tags, 0, 0)), expected);
    }

    #[test]
    fn test_composite_empty_node_is_zero() {
        // 0 * ln(0) is NaN and must collapse to 0
        assert_eq!(composite_density(&node(0, 0, 0, 0), &body(0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_composite_prefers_text_over_links() {
        let b = body(1000.0, 100.0);
        let prose = composite_density(&node(500, 5, 10, 1), &b);
        let linkfarm = composite_density(&node(500, 5, 480, 4), &b);
        assert!(prose > linkfarm);
    }

    #[test]
    fn test_composite_matches_formula() {
        let n = node(200, 4, 20, 1);
        let b = body(1000.0, 50.0);
        let expected = (200.0 / 4.0) * ((200.0_f64 * 4.0) / (20.0 * 1.0)).ln()
            / (200.0 * 20.0 / 180.0 + 50.0 * 200.0 / 1000.0 + E).ln();
        assert_eq!(composite_density(&n, &b), expected);
    }

    #[test]
    fn test_hybrid_non_positive_weight_is_zero() {
        let mut n = node(100, 5, 10, 1);
        n.hybrid_char_number = 0.0;
        assert_eq!(hybrid_density(&n, &body(100.0, 10.0)), 0.0);
        n.hybrid_char_number = -3.0;
        assert_eq!(hybrid_density(&n, &body(100.0, 10.0)), 0.0);
        n.hybrid_char_number = f64::NAN;
        assert_eq!(hybrid_density(&n, &body(100.0, 10.0)), 0.0);
    }

    #[test]
    fn test_hybrid_negative_result_falls_back_to_ratio() {
        // heavy link content drives the log ratio negative
        let mut n = node(100, 1, 90, 8);
        n.hybrid_char_number = 5.0;
        let b = body(100.0, 90.0);
        let d = hybrid_density(&n, &b);
        assert_eq!(d, 5.0 / 100.0);
    }

    #[test]
    fn test_hybrid_positive_case() {
        let mut n = node(400, 4, 20, 1);
        n.hybrid_char_number = 350.0;
        let d = hybrid_density(&n, &body(900.0, 40.0));
        assert!(d.is_finite());
        assert!(d > 0.0);
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("standard".parse::<Method>().unwrap(), Method::Standard);
        assert_eq!("COMPOSITE".parse::<Method>().unwrap(), Method::Composite);
        assert_eq!("hybrid".parse::<Method>().unwrap(), Method::Hybrid);
        assert!("density".parse::<Method>().is_err());
    }

    #[test]
    fn test_method_serde_round_trip() {
        let json = serde_json::to_string(&Method::Hybrid).unwrap();
        assert_eq!(json, "\"hybrid\"");
        let back: Method = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Method::Hybrid);
    }
}
