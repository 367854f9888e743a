//! Plotly figure construction.
//!
//! Builds the two scatter traces Plotly needs: one polyline trace for all
//! edges (with null breaks between segments) and one marker+text trace for
//! the nodes, colored by node type.

use serde_json::{json, Value};

use crate::graph::{DiagramGraph, NodeKind};

/// Marker palette. The two graph shapes color their nodes differently: the
/// flat keyword → reference graph uses orange keywords and lightblue
/// references, while the five-tier pipeline graph spreads its palette over
/// all five node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Flat,
    Pipeline,
}

impl Palette {
    pub fn color_for(self, kind: NodeKind) -> &'static str {
        match (self, kind) {
            (Palette::Flat, NodeKind::Keyword) => "orange",
            (Palette::Flat, NodeKind::Reference) => "lightblue",
            (_, NodeKind::Article) => "darkgreen",
            (_, NodeKind::Method) => "orange",
            (_, NodeKind::Keyword) => "lightblue",
            (_, NodeKind::Reference) => "purple",
            (_, NodeKind::SourceApi) => "red",
        }
    }
}

/// Edge trace: x/y coordinate lists with a null entry after each segment so
/// Plotly draws disconnected lines.
pub fn edge_trace(graph: &DiagramGraph) -> Value {
    let mut edge_x: Vec<Value> = Vec::new();
    let mut edge_y: Vec<Value> = Vec::new();
    for (from, to) in graph.edges() {
        let (Some(a), Some(b)) = (graph.node(from), graph.node(to)) else {
            continue;
        };
        edge_x.extend([json!(a.x), json!(b.x), Value::Null]);
        edge_y.extend([json!(a.y), json!(b.y), Value::Null]);
    }

    json!({
        "x": edge_x,
        "y": edge_y,
        "mode": "lines",
        "hoverinfo": "none",
        "line": { "width": 1, "color": "#888" }
    })
}

/// Node trace: markers with labels above them, hover text, per-type colors.
pub fn node_trace(graph: &DiagramGraph, palette: Palette) -> Value {
    let nodes = graph.nodes();
    let x: Vec<f64> = nodes.iter().map(|n| n.x).collect();
    let y: Vec<f64> = nodes.iter().map(|n| n.y).collect();
    let text: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    let color: Vec<&str> = nodes.iter().map(|n| palette.color_for(n.kind)).collect();

    json!({
        "x": x,
        "y": y,
        "mode": "markers+text",
        "text": text,
        "textposition": "top center",
        "hoverinfo": "text",
        "marker": { "color": color, "size": 20, "line": { "width": 2 } }
    })
}

/// Complete figure: both traces plus an axis-less layout.
pub fn figure(graph: &DiagramGraph, title: &str, palette: Palette) -> Value {
    json!({
        "data": [edge_trace(graph), node_trace(graph, palette)],
        "layout": {
            "title": { "text": title },
            "showlegend": false,
            "hovermode": "closest",
            "margin": { "b": 20, "l": 5, "r": 5, "t": 40 },
            "xaxis": { "showgrid": false, "zeroline": false, "showticklabels": false },
            "yaxis": { "showgrid": false, "zeroline": false, "showticklabels": false }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DiagramGraph;

    fn two_node_graph() -> DiagramGraph {
        let mut g = DiagramGraph::default();
        g.add_node("kw", "keyword", NodeKind::Keyword, 0.0, 0.0);
        g.add_node("ref", "paper", NodeKind::Reference, 1.0, -1.0);
        g.add_edge("kw", "ref");
        g
    }

    #[test]
    fn test_edge_trace_null_breaks() {
        let trace = edge_trace(&two_node_graph());
        let xs = trace["x"].as_array().unwrap();
        assert_eq!(xs.len(), 3);
        assert!(xs[2].is_null());
    }

    #[test]
    fn test_pipeline_palette_colors() {
        let trace = node_trace(&two_node_graph(), Palette::Pipeline);
        let colors = trace["marker"]["color"].as_array().unwrap();
        assert_eq!(colors[0], "lightblue");
        assert_eq!(colors[1], "purple");
    }

    #[test]
    fn test_flat_palette_colors() {
        let trace = node_trace(&two_node_graph(), Palette::Flat);
        let colors = trace["marker"]["color"].as_array().unwrap();
        assert_eq!(colors[0], "orange");
        assert_eq!(colors[1], "lightblue");
    }

    #[test]
    fn test_figure_has_two_traces_and_title() {
        let fig = figure(&two_node_graph(), "Keyword → Reference Graph", Palette::Flat);
        assert_eq!(fig["data"].as_array().unwrap().len(), 2);
        assert_eq!(fig["layout"]["title"]["text"], "Keyword → Reference Graph");
    }

    #[test]
    fn test_dangling_edge_skipped() {
        let mut g = two_node_graph();
        g.add_edge("kw", "missing");
        let trace = edge_trace(&g);
        // Only the valid edge contributes coordinates
        assert_eq!(trace["x"].as_array().unwrap().len(), 3);
    }
}
