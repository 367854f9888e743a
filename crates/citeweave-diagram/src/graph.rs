//! Directed graph model with manually assigned layout coordinates.
//!
//! Columns encode node depth (article 0, method 1, keyword 2, reference 3,
//! source 4 in the pipeline shape); rows are enumeration order, negated so
//! the first node sits on top.

use std::collections::HashMap;

use serde_json::Value;

use citeweave_common::{Source, Strategy};

/// Node type, which determines column and marker color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Article,
    Method,
    Keyword,
    Reference,
    SourceApi,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub x: f64,
    pub y: f64,
}

/// A directed graph with stable node order and id-indexed lookup.
#[derive(Debug, Default)]
pub struct DiagramGraph {
    nodes: Vec<Node>,
    edges: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl DiagramGraph {
    pub fn add_node(&mut self, id: &str, label: &str, kind: NodeKind, x: f64, y: f64) {
        if self.index.contains_key(id) {
            return;
        }
        self.index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(Node {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            x,
            y,
        });
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push((from.to_string(), to.to_string()));
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }
}

/// Flat keyword → reference graph for one reference-set JSON.
///
/// Keywords sit in the left column, references in the right, both spread
/// vertically in enumeration order.
pub fn keyword_graph(references: &Value) -> DiagramGraph {
    let mut graph = DiagramGraph::default();
    let empty = serde_json::Map::new();
    let mapping = references.as_object().unwrap_or(&empty);

    for (i, keyword) in mapping.keys().enumerate() {
        graph.add_node(keyword, keyword, NodeKind::Keyword, 0.0, -(i as f64));
    }

    let mut ref_row = 0usize;
    for (keyword, refs) in mapping {
        for (i, reference) in refs.as_array().unwrap_or(&vec![]).iter().enumerate() {
            let ref_id = format!("{keyword}_ref_{i}");
            let label = reference["title"]
                .as_str()
                .filter(|t| !t.is_empty())
                .map(String::from)
                .unwrap_or_else(|| format!("Untitled {i}"));
            graph.add_node(&ref_id, &label, NodeKind::Reference, 1.0, -(ref_row as f64));
            graph.add_edge(keyword, &ref_id);
            ref_row += 1;
        }
    }

    graph
}

/// Five-tier pipeline graph: article → strategy → keyword → reference → source.
///
/// `references` maps each (strategy, source) pair to its reference-set JSON;
/// pairs whose file was missing are simply absent. A strategy with no
/// keywords gets a single placeholder keyword node.
pub fn pipeline_graph(
    article: &str,
    keywords: &Value,
    references: &HashMap<(Strategy, Source), Value>,
) -> DiagramGraph {
    let mut graph = DiagramGraph::default();

    graph.add_node(article, article, NodeKind::Article, 0.0, 0.0);

    for (i, strategy) in Strategy::ALL.iter().enumerate() {
        graph.add_node(
            strategy.as_str(),
            strategy.as_str(),
            NodeKind::Method,
            1.0,
            -(i as f64),
        );
        graph.add_edge(article, strategy.as_str());
    }

    for (i, strategy) in Strategy::ALL.iter().enumerate() {
        let kws = keywords[strategy.as_str()].as_array().cloned().unwrap_or_default();
        if kws.is_empty() {
            let placeholder = format!("{strategy}_kw_empty");
            graph.add_node(
                &placeholder,
                "(no keywords)",
                NodeKind::Keyword,
                2.0,
                -(i as f64) * 5.0,
            );
            graph.add_edge(strategy.as_str(), &placeholder);
            continue;
        }
        for (j, kw) in kws.iter().enumerate() {
            let kw_node = format!("{strategy}_kw_{j}");
            let label = kw.as_str().unwrap_or("");
            graph.add_node(
                &kw_node,
                label,
                NodeKind::Keyword,
                2.0,
                -(i as f64) * 5.0 - j as f64,
            );
            graph.add_edge(strategy.as_str(), &kw_node);
        }
    }

    let mut ref_row = 0i64;
    for strategy in Strategy::ALL {
        let kws = keywords[strategy.as_str()].as_array().cloned().unwrap_or_default();
        for (kw_idx, kw) in kws.iter().enumerate() {
            let kw_node = format!("{strategy}_kw_{kw_idx}");
            let Some(kw_text) = kw.as_str() else { continue };
            for source in Source::ALL {
                let Some(refset) = references.get(&(strategy, source)) else {
                    continue;
                };
                for (k, reference) in refset[kw_text].as_array().unwrap_or(&vec![]).iter().enumerate() {
                    let ref_id = format!("ref_{source}_{strategy}_{kw_idx}_{k}");
                    let label = reference["title"]
                        .as_str()
                        .filter(|t| !t.is_empty())
                        .map(String::from)
                        .unwrap_or_else(|| format!("Ref {k}"));
                    graph.add_node(&ref_id, &label, NodeKind::Reference, 3.0, ref_row as f64);
                    graph.add_edge(&kw_node, &ref_id);
                    graph.add_edge(&ref_id, source.as_str());
                    ref_row -= 1;
                }
            }
        }
    }

    for (i, source) in Source::ALL.iter().enumerate() {
        graph.add_node(
            source.as_str(),
            source.as_str(),
            NodeKind::SourceApi,
            4.0,
            -(i as f64) * 5.0,
        );
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keyword_graph_columns_and_edges() {
        let refs = json!({
            "deep learning": [{ "title": "Paper A" }, { "title": "Paper B" }],
            "neural networks": []
        });
        let graph = keyword_graph(&refs);

        let kw = graph.node("deep learning").unwrap();
        assert_eq!(kw.kind, NodeKind::Keyword);
        assert_eq!(kw.x, 0.0);

        let r = graph.node("deep learning_ref_1").unwrap();
        assert_eq!(r.kind, NodeKind::Reference);
        assert_eq!(r.x, 1.0);
        assert_eq!(r.label, "Paper B");

        assert_eq!(graph.edges().len(), 2);
        // Keyword with no results still gets its node
        assert!(graph.node("neural networks").is_some());
    }

    #[test]
    fn test_keyword_graph_untitled_fallback() {
        let refs = json!({ "kw": [{}] });
        let graph = keyword_graph(&refs);
        assert_eq!(graph.node("kw_ref_0").unwrap().label, "Untitled 0");
    }

    #[test]
    fn test_pipeline_graph_empty_strategy_placeholder() {
        let keywords = json!({ "rake": ["neural networks"], "yake": [], "bert_score": ["deep learning"] });
        let graph = pipeline_graph("article_1", &keywords, &HashMap::new());

        let placeholder = graph.node("yake_kw_empty").unwrap();
        assert_eq!(placeholder.label, "(no keywords)");
        assert_eq!(placeholder.x, 2.0);
        // Non-empty strategies get real keyword nodes instead
        assert!(graph.node("rake_kw_0").is_some());
        assert!(graph.node("rake_kw_empty").is_none());
    }

    #[test]
    fn test_pipeline_graph_reference_links_keyword_and_source() {
        let keywords = json!({ "rake": [], "yake": [], "bert_score": ["deep learning"] });
        let mut references = HashMap::new();
        references.insert(
            (Strategy::BertScore, Source::OpenAlex),
            json!({ "deep learning": [{ "title": "Found Paper" }] }),
        );
        let graph = pipeline_graph("article_1", &keywords, &references);

        let ref_node = graph.node("ref_openalex_bert_score_0_0").unwrap();
        assert_eq!(ref_node.label, "Found Paper");
        assert_eq!(ref_node.x, 3.0);

        let edges = graph.edges();
        assert!(edges.contains(&("bert_score_kw_0".to_string(), "ref_openalex_bert_score_0_0".to_string())));
        assert!(edges.contains(&("ref_openalex_bert_score_0_0".to_string(), "openalex".to_string())));
    }

    #[test]
    fn test_pipeline_graph_missing_source_skipped() {
        let keywords = json!({ "rake": ["x y"], "yake": [], "bert_score": [] });
        // No reference files at all: article, methods, keywords, sources only
        let graph = pipeline_graph("a", &keywords, &HashMap::new());
        assert!(graph.nodes().iter().all(|n| n.kind != NodeKind::Reference));
        assert_eq!(
            graph
                .nodes()
                .iter()
                .filter(|n| n.kind == NodeKind::SourceApi)
                .count(),
            3
        );
    }
}
