pub mod density;
pub mod error;
pub mod extract;
pub mod html;
pub mod metrics;
pub mod propagate;
pub mod scratch;
pub mod tree;
pub mod visual;

pub use density::{BodyStats, Method, composite_density, hybrid_density, standard_density};
pub use error::{PithError, Result};
pub use extract::extract_content;
pub use html::{LayoutConfig, parse_document, parse_document_with};
pub use metrics::collect_metrics;
pub use propagate::propagate_density;
#[doc(hidden)]
pub use scratch::{ContentState, NodeScratch, ScratchMap};
pub use tree::{Bounds, DocTree, NodeId, NodeKind};
pub use visual::{apply_visual_weights, visual_importance, z_score_probability};
