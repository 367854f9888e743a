//! citeweave-diagram — Provenance diagrams rendered as interactive HTML.
//!
//! Two graph shapes: the flat keyword → reference graph for one reference
//! set, and the five-tier pipeline graph (article → strategy → keyword →
//! reference → source). Layout is fixed column/row placement by node type;
//! no layout algorithm runs. Rendering builds Plotly scatter traces and
//! injects them into an embedded HTML template.

pub mod graph;
pub mod plotly;
pub mod render;

pub use graph::{DiagramGraph, Node, NodeKind};
pub use render::write_html;
