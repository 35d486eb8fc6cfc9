use serde::Deserialize;

use crate::graph::{DocumentId, GraphEdge, GraphNode, GraphSnapshot};

use super::LoadError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for DocumentId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(value) => DocumentId::from(value),
            RawId::Text(value) => DocumentId::new(value),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: RawId,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    source: RawId,
    target: RawId,
}

#[derive(Debug, Deserialize)]
struct RawGraphData {
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

pub(super) fn parse_graph_data(raw: &str) -> Result<GraphSnapshot, LoadError> {
    let data: RawGraphData = serde_json::from_str(raw)?;

    let nodes = data
        .nodes
        .into_iter()
        .map(|node| GraphNode {
            id: node.id.into(),
            title: node.title,
        })
        .collect();
    let edges = data
        .edges
        .into_iter()
        .map(|edge| GraphEdge {
            source: edge.source.into(),
            target: edge.target.into(),
        })
        .collect();

    Ok(GraphSnapshot::new(nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_id_forms() {
        let snapshot = parse_graph_data(
            r#"{
                "nodes": [{"id": 1, "title": "One"}, {"id": "2", "title": "Two"}],
                "edges": [{"source": "1", "target": 2}]
            }"#,
        )
        .expect("valid graph data");

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.nodes()[0].id.as_str(), "1");
        assert_eq!(snapshot.edges(), &[(0, 1)]);
    }

    #[test]
    fn missing_edges_and_titles_default_to_empty() {
        let snapshot = parse_graph_data(r#"{"nodes": [{"id": "a"}]}"#).expect("valid graph data");
        assert_eq!(snapshot.node_count(), 1);
        assert_eq!(snapshot.nodes()[0].title, "");
        assert_eq!(snapshot.edge_count(), 0);
    }

    #[test]
    fn zero_nodes_is_a_valid_snapshot() {
        let snapshot = parse_graph_data(r#"{"nodes": [], "edges": []}"#).expect("valid graph data");
        assert!(snapshot.is_empty());
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(
            parse_graph_data(r#"{"edges": []}"#),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_graph_data("not json"),
            Err(LoadError::Parse(_))
        ));
    }
}
